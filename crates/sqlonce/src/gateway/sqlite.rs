//! SQLite gateway backed by a single `sqlx` connection.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, Row};

use super::Gateway;
use crate::dialect::{Dialect, MetadataRow, SqliteDialect};
use crate::error::GatewayError;

/// Gateway over one SQLite connection.
#[derive(Debug)]
pub struct SqliteGateway {
    connection: SqliteConnection,
    dialect: SqliteDialect,
}

impl SqliteGateway {
    /// Wraps an open connection.
    #[must_use]
    pub fn new(connection: SqliteConnection) -> Self {
        Self {
            connection,
            dialect: SqliteDialect::new(),
        }
    }

    /// Opens a connection from a URL such as `sqlite::memory:`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        SqliteConnection::connect(url).await.map(Self::new)
    }

    /// Opens a connection from options.
    pub async fn connect_with(options: &SqliteConnectOptions) -> Result<Self, sqlx::Error> {
        options.connect().await.map(Self::new)
    }

    /// Returns the underlying connection.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.connection
    }

    /// Closes the connection.
    pub async fn close(self) -> Result<(), GatewayError> {
        self.connection.close().await.map_err(GatewayError::from)
    }
}

impl Gateway for SqliteGateway {
    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, GatewayError> {
        let result = if params.is_empty() {
            sqlx::raw_sql(sql).execute(&mut self.connection).await?
        } else {
            let mut query = sqlx::query(sql);
            for param in params {
                query = query.bind(*param);
            }
            query.execute(&mut self.connection).await?
        };
        Ok(result.rows_affected())
    }

    async fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<MetadataRow>, GatewayError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(*param);
        }
        let rows = query.fetch_all(&mut self.connection).await?;
        rows.iter()
            .map(|row| {
                (0..row.len())
                    .map(|index| row.try_get::<Option<String>, _>(index))
                    .collect::<Result<MetadataRow, _>>()
                    .map_err(GatewayError::from)
            })
            .collect()
    }
}
