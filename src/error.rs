use std::process::ExitStatus;

use rowstore::TableError;
use thiserror::Error;
use tonic::{Code, Status};

/// Errors surfaced by a [`StoreClient`](crate::store::StoreClient).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("rpc error: {0}")]
    Rpc(Status),

    /// The named table or scanner does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Table(TableError),

    #[error("malformed {0} response from server")]
    MalformedResponse(&'static str),
}

impl From<Status> for StoreError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::NotFound => StoreError::NotFound(status.message().to_string()),
            _ => StoreError::Rpc(status),
        }
    }
}

impl From<TableError> for StoreError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::TableNotFound(_) | TableError::UnknownScanner(_) => {
                StoreError::NotFound(err.to_string())
            }
            other => StoreError::Table(other),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{name} is {value}, the maximum is {max}")]
    TooLarge {
        name: &'static str,
        value: usize,
        max: usize,
    },

    #[error("at least one scenario must be selected")]
    NoScenario,

    #[error("table name must not be empty")]
    EmptyTable,

    #[error("shell command must not be empty")]
    EmptyShellCommand,

    #[error("--admin shell cannot create tables in the embedded store")]
    EmbeddedShellAdmin,
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("failed to spawn admin shell {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("admin shell i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("admin shell exited with {status}: {output}")]
    ShellFailed { status: ExitStatus, output: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Admin(#[from] AdminError),
}
