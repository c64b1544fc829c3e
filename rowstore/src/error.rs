use thiserror::Error;
use tonic::Status;

use crate::table::ScannerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("table {0} already exists")]
    TableExists(String),

    #[error("table {0} not found")]
    TableNotFound(String),

    #[error("table {0} is not enabled")]
    TableNotEnabled(String),

    #[error("table {0} must be disabled before it can be deleted")]
    TableNotDisabled(String),

    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("table {0} needs at least one column family")]
    NoColumnFamilies(String),

    #[error("invalid column family name: {0:?}")]
    InvalidFamilyName(String),

    #[error("column family {0} declared twice")]
    DuplicateFamily(String),

    #[error("column family {family} does not exist in table {table}")]
    UnknownFamily { table: String, family: String },

    #[error("column {0:?} is not of the form family:qualifier")]
    InvalidColumn(String),

    #[error("scanner {0} does not exist")]
    UnknownScanner(ScannerId),

    #[error("fetch size must be positive, got {0}")]
    InvalidFetchSize(i32),
}

impl From<TableError> for Status {
    fn from(err: TableError) -> Self {
        let message = err.to_string();
        match err {
            TableError::TableExists(_) => Status::already_exists(message),
            TableError::TableNotFound(_) | TableError::UnknownScanner(_) => {
                Status::not_found(message)
            }
            TableError::TableNotEnabled(_) | TableError::TableNotDisabled(_) => {
                Status::failed_precondition(message)
            }
            _ => Status::invalid_argument(message),
        }
    }
}
