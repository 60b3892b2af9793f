//! Run SQL scripts so every schema statement takes effect exactly once.
//!
//! `sqlonce` takes a script of SQL statements and applies it to a live
//! database in a way that can be repeated safely:
//! - `CREATE TABLE` on an existing table drops and recreates it
//! - `ALTER TABLE ... ADD COLUMN` is skipped when the column already has the
//!   requested definition, and replaced when it differs
//! - `CREATE INDEX` on an existing index drops and recreates it
//! - everything else runs verbatim
//!
//! # Architecture
//!
//! - **Splitter** - Cuts a script into statements, ignoring comments and
//!   quoted terminators
//! - **Classifier** - Recognises the statements that create schema objects
//! - **Normalizer** - Canonical form of column definitions for comparison
//! - **Inspector** - Parameterized lookups of live schema metadata
//! - **Engine** - Decides apply / skip / replace and runs each decision
//! - **Gateway** - The single database connection (SQLite or MySQL)
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlonce::prelude::*;
//!
//! # async fn run() -> sqlonce::error::Result<()> {
//! let mut gateway = ConnectionConfig::sqlite_memory().connect().await?;
//! let script = "
//!     CREATE TABLE users (id INT PRIMARY KEY);
//!     ALTER TABLE users ADD COLUMN age INT DEFAULT 0;
//!     CREATE INDEX idx_age ON users (age);
//! ";
//! let report = execute_script(&mut gateway, script, false).await;
//! println!("{}", report.counts());
//! assert!(report.success());
//! # Ok(())
//! # }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Preview decisions without touching the database
//! sqlonce apply schema.sql --dry-run -d app
//!
//! # Apply a script to a SQLite file
//! sqlonce apply schema.sql --backend sqlite -d app.db
//!
//! # Check how scripts split and classify, offline
//! sqlonce validate schema.sql seed.sql
//! ```

pub mod classifier;
pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod inspector;
pub mod normalize;
pub mod report;
pub mod splitter;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::classifier::{
        ClassifiedStatement, IndexType, ParseAmbiguity, classify, classify_with_diagnostic,
    };
    pub use crate::config::{Backend, ConnectionConfig};
    pub use crate::dialect::{Dialect, MySqlDialect, SqliteDialect};
    pub use crate::engine::{IdempotencyEngine, Plan, execute_script};
    pub use crate::error::{GatewayError, Result, SqlonceError, StatementError};
    pub use crate::gateway::{AnyGateway, Gateway, MySqlGateway, SqliteGateway};
    pub use crate::inspector::SchemaInspector;
    pub use crate::normalize::{NormalizedDefinition, equivalent, normalize};
    pub use crate::report::{Decision, Outcome, OutcomeCounts, ReportEntry, RunReport};
    pub use crate::splitter::{RawStatement, split};
}
