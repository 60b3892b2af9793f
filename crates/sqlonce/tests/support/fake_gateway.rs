use std::collections::{BTreeMap, BTreeSet};

use sqlonce::dialect::{Dialect, MetadataRow};
use sqlonce::error::GatewayError;
use sqlonce::gateway::Gateway;

pub const BEGIN_SQL: &str = "BEGIN";
pub const COMMIT_SQL: &str = "COMMIT";
pub const ROLLBACK_SQL: &str = "ROLLBACK";

const TABLE_EXISTS_SQL: &str = "fake: table exists";
const COLUMN_METADATA_SQL: &str = "fake: column metadata";
const INDEX_EXISTS_SQL: &str = "fake: index exists";

/// Dialect whose metadata row is just the column definition.
#[derive(Debug, Default)]
pub struct FakeDialect;

impl Dialect for FakeDialect {
    fn name(&self) -> &'static str {
        "fake"
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

    fn column_definition(&self, row: &[Option<String>]) -> Option<String> {
        row.first().cloned().flatten()
    }

    fn drop_index_sql(&self, table: &str, index: &str) -> String {
        format!("DROP INDEX {index} ON {table}")
    }

    fn quote_identifier(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Gateway answering metadata lookups from a scripted schema and recording
/// every statement it is asked to run.
#[derive(Debug, Default)]
pub struct FakeGateway {
    dialect: FakeDialect,
    tables: BTreeSet<String>,
    columns: BTreeMap<(String, String), String>,
    indexes: BTreeSet<(String, String)>,
    executed_sql: Vec<String>,
    queries: Vec<(String, Vec<String>)>,
    fail_on_sql: Vec<(String, GatewayError)>,
    fail_on_query: Option<GatewayError>,
    lost: Option<String>,
}

#[allow(dead_code)]
impl FakeGateway {
    pub fn with_table(mut self, table: &str) -> Self {
        self.tables.insert(table.to_string());
        self
    }

    pub fn with_column(mut self, table: &str, column: &str, definition: &str) -> Self {
        self.columns
            .insert((table.to_string(), column.to_string()), definition.to_string());
        self
    }

    pub fn with_index(mut self, table: &str, index: &str) -> Self {
        self.indexes.insert((table.to_string(), index.to_string()));
        self
    }

    /// Rejects `sql` with `error`. A fatal error also loses the connection.
    pub fn fail_on_sql(mut self, sql: &str, error: GatewayError) -> Self {
        self.fail_on_sql.push((sql.to_string(), error));
        self
    }

    /// Fails every metadata query with `error`.
    pub fn fail_queries(mut self, error: GatewayError) -> Self {
        self.fail_on_query = Some(error);
        self
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.executed_sql.clone()
    }

    pub fn queries(&self) -> Vec<(String, Vec<String>)> {
        self.queries.clone()
    }

    pub fn count(&self, sql: &str) -> usize {
        self.executed_sql.iter().filter(|s| *s == sql).count()
    }

    fn check_connection(&self) -> Result<(), GatewayError> {
        match &self.lost {
            Some(message) => Err(GatewayError::connection_lost(message.clone())),
            None => Ok(()),
        }
    }
}

fn count_row(found: bool) -> Vec<MetadataRow> {
    vec![vec![Some(if found { "1" } else { "0" }.to_string())]]
}

impl Gateway for FakeGateway {
    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    async fn execute(&mut self, sql: &str, _params: &[&str]) -> Result<u64, GatewayError> {
        self.check_connection()?;
        if let Some((_, error)) = self.fail_on_sql.iter().find(|(rule, _)| rule == sql) {
            let error = error.clone();
            if error.is_fatal() {
                self.lost = Some(error.to_string());
            }
            return Err(error);
        }
        self.executed_sql.push(sql.to_string());
        Ok(0)
    }

    async fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<MetadataRow>, GatewayError> {
        self.check_connection()?;
        self.queries.push((
            sql.to_string(),
            params.iter().map(|param| (*param).to_string()).collect(),
        ));
        if let Some(error) = &self.fail_on_query {
            return Err(error.clone());
        }
        let param = |index: usize| params.get(index).copied().unwrap_or_default().to_string();
        match sql {
            TABLE_EXISTS_SQL => Ok(count_row(self.tables.contains(&param(0)))),
            COLUMN_METADATA_SQL => Ok(self
                .columns
                .get(&(param(0), param(1)))
                .map(|definition| vec![vec![Some(definition.clone())]])
                .unwrap_or_default()),
            INDEX_EXISTS_SQL => Ok(count_row(self.indexes.contains(&(param(0), param(1))))),
            other => Err(GatewayError::rejected(format!("unexpected query: {other}"))),
        }
    }
}
