//! Database dialect implementations.
//!
//! Each dialect knows where its server keeps schema metadata, how to turn a
//! metadata row back into a column definition, and how to spell the drop
//! statements used before a replace.

mod mysql;
mod sqlite;

pub use mysql::MySqlDialect;
pub use sqlite::SqliteDialect;

/// One metadata row, every cell read as text.
pub type MetadataRow = Vec<Option<String>>;

/// Trait for database-specific metadata lookups and drop statements.
///
/// Every metadata query takes its object names as bound parameters, in the
/// order documented on each method, and selects text-typed cells only.
pub trait Dialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Query returning one row whose first cell is the number of tables
    /// named by parameter 1.
    fn table_exists_sql(&self) -> &'static str;

    /// Query returning the metadata row for column parameter 2 of table
    /// parameter 1, or no rows.
    fn column_metadata_sql(&self) -> &'static str;

    /// Query returning one row whose first cell is the number of index
    /// entries named by parameter 2 on table parameter 1.
    fn index_exists_sql(&self) -> &'static str;

    /// Rebuilds a column definition from a row of
    /// [`column_metadata_sql`](Self::column_metadata_sql).
    fn column_definition(&self, row: &[Option<String>]) -> Option<String>;

    /// Quote an identifier (table name, column name, etc.).
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Generates SQL for dropping a table.
    fn drop_table_sql(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {}", self.quote_identifier(table))
    }

    /// Generates SQL for dropping a column.
    fn drop_column_sql(&self, table: &str, column: &str) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quote_identifier(table),
            self.quote_identifier(column)
        )
    }

    /// Generates SQL for dropping an index.
    fn drop_index_sql(&self, table: &str, index: &str) -> String;
}

/// Returns cell `index` of a row, if present and not NULL.
pub(crate) fn cell(row: &[Option<String>], index: usize) -> Option<&str> {
    row.get(index).and_then(Option::as_deref)
}
