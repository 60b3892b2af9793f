//! SQLite dialect.
//!
//! Tables and indexes are looked up in `sqlite_master`; columns through the
//! `pragma_table_info` table-valued function. SQLite compares identifiers
//! case-insensitively, so the lookups do too.

use super::{Dialect, cell};

const TABLE_EXISTS_SQL: &str = "SELECT CAST(COUNT(*) AS TEXT) FROM sqlite_master \
     WHERE type = 'table' AND name = ?1 COLLATE NOCASE";

const COLUMN_METADATA_SQL: &str = "SELECT CAST(type AS TEXT), CAST(\"notnull\" AS TEXT), \
     CAST(dflt_value AS TEXT), CAST(pk AS TEXT) \
     FROM pragma_table_info(?1) WHERE name = ?2 COLLATE NOCASE";

const INDEX_EXISTS_SQL: &str = "SELECT CAST(COUNT(*) AS TEXT) FROM sqlite_master \
     WHERE type = 'index' AND tbl_name = ?1 COLLATE NOCASE AND name = ?2 COLLATE NOCASE";

/// SQLite dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn table_exists_sql(&self) -> &'static str {
        TABLE_EXISTS_SQL
    }

    fn column_metadata_sql(&self) -> &'static str {
        COLUMN_METADATA_SQL
    }

    fn index_exists_sql(&self) -> &'static str {
        INDEX_EXISTS_SQL
    }

    /// `<type>[ NOT NULL][ DEFAULT <dflt>][ PRIMARY KEY]`
    fn column_definition(&self, row: &[Option<String>]) -> Option<String> {
        let mut parts = Vec::new();
        let declared_type = cell(row, 0)?.trim();
        if !declared_type.is_empty() {
            parts.push(declared_type.to_string());
        }
        if cell(row, 1) == Some("1") {
            parts.push("NOT NULL".to_string());
        }
        if let Some(default) = cell(row, 2) {
            parts.push(format!("DEFAULT {default}"));
        }
        if cell(row, 3).is_some_and(|pk| pk != "0") {
            parts.push("PRIMARY KEY".to_string());
        }
        Some(parts.join(" "))
    }

    fn drop_index_sql(&self, _table: &str, index: &str) -> String {
        format!("DROP INDEX IF EXISTS {}", self.quote_identifier(index))
    }
}
