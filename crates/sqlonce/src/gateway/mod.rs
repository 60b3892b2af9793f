//! Database gateways.
//!
//! A gateway owns the single connection a run uses. It executes statements
//! in the connection's autocommit mode, runs parameterized metadata queries,
//! and opens explicit transactions on request. Connection setup lives
//! outside the engine; see
//! [`ConnectionConfig`](crate::config::ConnectionConfig).

mod mysql;
mod sqlite;

pub use mysql::MySqlGateway;
pub use sqlite::SqliteGateway;

use crate::dialect::{Dialect, MetadataRow};
use crate::error::GatewayError;

pub(crate) const BEGIN_SQL: &str = "BEGIN";
pub(crate) const COMMIT_SQL: &str = "COMMIT";
pub(crate) const ROLLBACK_SQL: &str = "ROLLBACK";

/// Executes statements against one database connection.
///
/// Calls complete one at a time; the engine never has two in flight.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Returns the dialect spoken by the connection.
    fn dialect(&self) -> &dyn Dialect;

    /// Executes `sql` with bound `params`, returning rows affected.
    ///
    /// With no params the text is sent as-is, so any DDL the server accepts
    /// can pass through.
    async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, GatewayError>;

    /// Runs a query with bound `params`, reading every cell as text.
    async fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<MetadataRow>, GatewayError>;

    /// Opens a transaction.
    async fn begin(&mut self) -> Result<(), GatewayError> {
        self.execute(BEGIN_SQL, &[]).await.map(|_| ())
    }

    /// Commits the open transaction.
    async fn commit(&mut self) -> Result<(), GatewayError> {
        self.execute(COMMIT_SQL, &[]).await.map(|_| ())
    }

    /// Rolls back the open transaction.
    async fn rollback(&mut self) -> Result<(), GatewayError> {
        self.execute(ROLLBACK_SQL, &[]).await.map(|_| ())
    }
}

/// A gateway to whichever backend the configuration selected.
#[derive(Debug)]
pub enum AnyGateway {
    /// SQLite connection.
    Sqlite(SqliteGateway),
    /// MySQL connection.
    MySql(MySqlGateway),
}

impl AnyGateway {
    /// Closes the underlying connection.
    pub async fn close(self) -> Result<(), GatewayError> {
        match self {
            Self::Sqlite(gateway) => gateway.close().await,
            Self::MySql(gateway) => gateway.close().await,
        }
    }
}

impl Gateway for AnyGateway {
    fn dialect(&self) -> &dyn Dialect {
        match self {
            Self::Sqlite(gateway) => gateway.dialect(),
            Self::MySql(gateway) => gateway.dialect(),
        }
    }

    async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, GatewayError> {
        match self {
            Self::Sqlite(gateway) => gateway.execute(sql, params).await,
            Self::MySql(gateway) => gateway.execute(sql, params).await,
        }
    }

    async fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<MetadataRow>, GatewayError> {
        match self {
            Self::Sqlite(gateway) => gateway.query(sql, params).await,
            Self::MySql(gateway) => gateway.query(sql, params).await,
        }
    }
}
