//! MySQL gateway backed by a single `sqlx` connection.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Row};

use super::Gateway;
use crate::dialect::{Dialect, MetadataRow, MySqlDialect};
use crate::error::GatewayError;

/// Gateway over one MySQL connection.
#[derive(Debug)]
pub struct MySqlGateway {
    connection: MySqlConnection,
    dialect: MySqlDialect,
}

impl MySqlGateway {
    /// Wraps an open connection.
    #[must_use]
    pub fn new(connection: MySqlConnection) -> Self {
        Self {
            connection,
            dialect: MySqlDialect::new(),
        }
    }

    /// Opens a connection from a `mysql://` URL.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        MySqlConnection::connect(url).await.map(Self::new)
    }

    /// Opens a connection from options.
    pub async fn connect_with(options: &MySqlConnectOptions) -> Result<Self, sqlx::Error> {
        options.connect().await.map(Self::new)
    }

    /// Closes the connection.
    pub async fn close(self) -> Result<(), GatewayError> {
        self.connection.close().await.map_err(GatewayError::from)
    }
}

impl Gateway for MySqlGateway {
    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, GatewayError> {
        // DDL goes over the text protocol; not every statement can be prepared.
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
