//! Connection configuration.
//!
//! One run owns one connection, so `connect` opens a single connection
//! rather than a pool.

use std::str::FromStr;

use clap::{Args, ValueEnum};
use serde::Serialize;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::sqlite::SqliteConnectOptions;
use tracing::info;

use crate::error::{Result, SqlonceError};
use crate::gateway::{AnyGateway, MySqlGateway, SqliteGateway};

/// Database server kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// MySQL or MariaDB.
    #[default]
    #[value(name = "mysql")]
    MySql,
    /// SQLite file or in-memory database.
    #[value(name = "sqlite")]
    Sqlite,
}

impl Backend {
    /// Infers the backend from a connection URL scheme.
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url.split(':').next().unwrap_or_default().to_ascii_lowercase();
        match scheme.as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(SqlonceError::InvalidConfig(format!(
                "unsupported database URL scheme: {scheme:?}"
            ))),
        }
    }
}

/// Where and how to connect.
///
/// Defaults: backend `mysql`, host `localhost`, port `3306`, user `root`,
/// empty password. `database` has no default. For SQLite it is the database
/// file path, or `:memory:`. A `url` takes precedence over every other field.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ConnectionConfig {
    /// Database backend.
    #[arg(long, value_enum, default_value_t = Backend::MySql)]
    pub backend: Backend,

    /// Server host.
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Server port.
    #[arg(short = 'P', long, default_value_t = 3306)]
    pub port: u16,

    /// User name.
    #[arg(short, long, default_value = "root")]
    pub user: String,

    /// Password.
    #[arg(
        short,
        long,
        env = "SQLONCE_PASSWORD",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Database name (SQLite: file path or `:memory:`).
    #[arg(short, long)]
    pub database: Option<String>,

    /// Connection URL, overriding the fields above.
    #[arg(long = "database-url", env = "DATABASE_URL")]
    pub url: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            backend: Backend::MySql,
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: None,
            url: None,
        }
    }
}

impl ConnectionConfig {
    /// Creates a configuration for an in-memory SQLite database.
    #[must_use]
    pub fn sqlite_memory() -> Self {
        Self {
            backend: Backend::Sqlite,
            database: Some(":memory:".to_string()),
            ..Self::default()
        }
    }

    /// Sets the database name.
    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the connection URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns the backend that `connect` will use.
    pub fn effective_backend(&self) -> Result<Backend> {
        match &self.url {
            Some(url) => Backend::from_url(url),
            None => Ok(self.backend),
        }
    }

    /// Describes the target without credentials, for logging.
    #[must_use]
    pub fn describe(&self) -> String {
        if let Some(url) = &self.url {
            let scheme = url.split(':').next().unwrap_or_default();
            return format!("{scheme} (from URL)");
        }
        let database = self.database.as_deref().unwrap_or("?");
        match self.backend {
            Backend::MySql => format!(
                "mysql://{}@{}:{}/{}",
                self.user, self.host, self.port, database
            ),
            Backend::Sqlite => format!("sqlite:{database}"),
        }
    }

    /// Opens one connection.
    pub async fn connect(&self) -> Result<AnyGateway> {
        let backend = self.effective_backend()?;
        info!(target_db = %self.describe(), "Connecting");

        let gateway = match (backend, &self.url) {
            (Backend::MySql, Some(url)) => {
                let options = MySqlConnectOptions::from_str(url)?;
                AnyGateway::MySql(MySqlGateway::connect_with(&options).await?)
            }
            (Backend::Sqlite, Some(url)) => {
                let options = SqliteConnectOptions::from_str(url)?;
                AnyGateway::Sqlite(SqliteGateway::connect_with(&options).await?)
            }
            (Backend::MySql, None) => {
                let options = MySqlConnectOptions::new()
                    .host(&self.host)
                    .port(self.port)
                    .username(&self.user)
                    .password(&self.password)
                    .database(self.required_database()?);
                AnyGateway::MySql(MySqlGateway::connect_with(&options).await?)
            }
            (Backend::Sqlite, None) => {
                let database = self.required_database()?;
                let options = if database == ":memory:" {
                    SqliteConnectOptions::from_str("sqlite::memory:")?
                } else {
                    SqliteConnectOptions::new()
                        .filename(database)
                        .create_if_missing(true)
                };
                AnyGateway::Sqlite(SqliteGateway::connect_with(&options).await?)
            }
        };
        Ok(gateway)
    }

    fn required_database(&self) -> Result<&str> {
        self.database
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                SqlonceError::InvalidConfig(
                    "a database name or a database URL is required".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Gateway;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        connection: ConnectionConfig,
    }

    #[test]
    fn test_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.backend, Backend::MySql);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.user, "root");
        assert!(config.database.is_none());
        assert!(config.url.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = TestCli::try_parse_from([
            "test",
            "--backend",
            "sqlite",
            "-d",
            "app.db",
            "-u",
            "admin",
            "-P",
            "3307",
        ])
        .unwrap();
        assert_eq!(cli.connection.backend, Backend::Sqlite);
        assert_eq!(cli.connection.database.as_deref(), Some("app.db"));
        assert_eq!(cli.connection.user, "admin");
        assert_eq!(cli.connection.port, 3307);
        assert_eq!(cli.connection.host, "localhost");
    }

    #[test]
    fn test_backend_from_url() {
        assert_eq!(Backend::from_url("mysql://root@localhost/app").unwrap(), Backend::MySql);
        assert_eq!(Backend::from_url("sqlite::memory:").unwrap(), Backend::Sqlite);
        assert!(matches!(
            Backend::from_url("postgres://localhost/app"),
            Err(SqlonceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_describe_hides_password() {
        let mut config = ConnectionConfig::default().database("app");
        config.password = "secret".to_string();
        assert_eq!(config.describe(), "mysql://root@localhost:3306/app");
        assert!(!config.describe().contains("secret"));
    }

    #[tokio::test]
    async fn test_missing_database_is_rejected() {
        let config = ConnectionConfig {
            backend: Backend::Sqlite,
            ..ConnectionConfig::default()
        };
        assert!(matches!(
            config.connect().await,
            Err(SqlonceError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let mut gateway = ConnectionConfig::sqlite_memory().connect().await.unwrap();
        assert_eq!(gateway.dialect().name(), "sqlite");
        gateway.execute("CREATE TABLE t (id INT)", &[]).await.unwrap();
        gateway.close().await.unwrap();

        let gateway = ConnectionConfig::default()
            .url("sqlite::memory:")
            .connect()
            .await
            .unwrap();
        assert!(matches!(gateway, AnyGateway::Sqlite(_)));
    }

    #[tokio::test]
    async fn test_connect_sqlite_file_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");
        let config = ConnectionConfig {
            backend: Backend::Sqlite,
            ..ConnectionConfig::default()
        }
        .database(path.to_string_lossy());

        let gateway = config.connect().await.unwrap();
        gateway.close().await.unwrap();
        assert!(path.exists());
    }
}
