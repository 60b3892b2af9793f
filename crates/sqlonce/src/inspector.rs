//! Live schema lookups.
//!
//! Every lookup concerns one named object and binds its names as query
//! parameters. Nothing is cached: each call reads the server's current state.

use tracing::debug;

use crate::dialect::MetadataRow;
use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Read-only view of the live schema behind a gateway.
pub struct SchemaInspector<'a, G: Gateway> {
    gateway: &'a mut G,
}

impl<'a, G: Gateway> SchemaInspector<'a, G> {
    /// Creates an inspector over `gateway`.
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    /// Returns whether table `table` exists.
    pub async fn table_exists(&mut self, table: &str) -> Result<bool, GatewayError> {
        let sql = self.gateway.dialect().table_exists_sql();
        let rows = self.gateway.query(sql, &[table]).await?;
        let exists = count_is_positive(&rows)?;
        debug!(table = %table, exists, "Checked table");
        Ok(exists)
    }

    /// Returns the current definition of `table.column`, or `None` when the
    /// column (or the table) does not exist.
    pub async fn column_definition(
        &mut self,
        table: &str,
        column: &str,
    ) -> Result<Option<String>, GatewayError> {
        let sql = self.gateway.dialect().column_metadata_sql();
        let rows = self.gateway.query(sql, &[table, column]).await?;
        let definition = rows
            .first()
            .and_then(|row| self.gateway.dialect().column_definition(row));
        debug!(
            table = %table,
            column = %column,
            definition = ?definition,
            "Checked column"
        );
        Ok(definition)
    }

    /// Returns whether index `index` exists on table `table`.
    pub async fn index_exists(&mut self, table: &str, index: &str) -> Result<bool, GatewayError> {
        let sql = self.gateway.dialect().index_exists_sql();
        let rows = self.gateway.query(sql, &[table, index]).await?;
        let exists = count_is_positive(&rows)?;
        debug!(table = %table, index_name = %index, exists, "Checked index");
        Ok(exists)
    }
}

/// Reads the first cell of a count query.
fn count_is_positive(rows: &[MetadataRow]) -> Result<bool, GatewayError> {
    let Some(cell) = rows.first().and_then(|row| row.first()) else {
        return Err(GatewayError::rejected("metadata query returned no rows"));
    };
    let count = cell.as_deref().unwrap_or("0").trim();
    count
        .parse::<u64>()
        .map(|n| n > 0)
        .map_err(|_| GatewayError::rejected(format!("unexpected metadata count: {count}")))
}
