//! Error types for script execution.

use serde::Serialize;

/// Errors that end a whole run or prevent it from starting.
#[derive(Debug, thiserror::Error)]
pub enum SqlonceError {
    /// Database error while connecting.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (reading script files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while rendering a report.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Connection settings that cannot be turned into a connection.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for run-level operations.
pub type Result<T> = std::result::Result<T, SqlonceError>;

/// Failure reported by a [`Gateway`](crate::gateway::Gateway) call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The server refused the statement (syntax, constraint, permission).
    #[error("{message}")]
    Rejected {
        /// Driver-reported message.
        message: String,
    },

    /// The connection can no longer be used.
    #[error("connection lost: {message}")]
    ConnectionLost {
        /// Driver-reported message.
        message: String,
    },
}

impl GatewayError {
    /// Creates a statement-scoped failure.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates a connection-level failure.
    pub fn connection_lost(message: impl Into<String>) -> Self {
        Self::ConnectionLost {
            message: message.into(),
        }
    }

    /// Returns true when the remaining statements cannot be attempted.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::ConnectionLost { .. })
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(db) => Self::rejected(db.message()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::connection_lost(error.to_string()),
            other => Self::rejected(other.to_string()),
        }
    }
}

/// Stage of a statement at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Reading live schema metadata.
    Inspection,
    /// Running the DDL/DML itself.
    Execution,
}

/// A failure scoped to one statement of a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatementError {
    /// A metadata lookup failed; the decision could not be made.
    #[error("schema inspection failed: {0}")]
    Inspection(#[source] GatewayError),

    /// The gateway rejected a physical statement.
    #[error("execution failed: {0}")]
    Execution(#[source] GatewayError),
}

impl StatementError {
    /// Returns the stage that failed.
    #[must_use]
    pub const fn stage(&self) -> FailureStage {
        match self {
            Self::Inspection(_) => FailureStage::Inspection,
            Self::Execution(_) => FailureStage::Execution,
        }
    }

    /// Returns the underlying gateway failure.
    #[must_use]
    pub const fn gateway_error(&self) -> &GatewayError {
        match self {
            Self::Inspection(e) | Self::Execution(e) => e,
        }
    }

    /// Returns true when the run must stop after this statement.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.gateway_error().is_fatal()
    }
}
