use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Malformed export: {0}")]
    MalformedInput(String),
    #[error("Table access failed ({operation} on {table}): {reason}")]
    TableAccess {
        operation: &'static str,
        table: String,
        reason: String,
    },
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    pub fn table_access(operation: &'static str, table: &str, reason: impl ToString) -> Self {
        Self::TableAccess {
            operation,
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }
}
