use rockbound::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("ack counter not yet bootstrapped")]
    NotBootstrapped,

    #[error("tried to overwrite checkpoint at height {0}")]
    OverwriteCheckpoint(u64),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for DbError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value.to_string())
    }
}

impl From<CodecError> for DbError {
    fn from(value: CodecError) -> Self {
        Self::Other(value.to_string())
    }
}

impl From<rockbound::TransactionError<DbError>> for DbError {
    fn from(value: rockbound::TransactionError<DbError>) -> Self {
        match value {
            // logical errors raised inside the transaction closure pass through
            rockbound::TransactionError::Rollback(dberr) => dberr,
            err => DbError::Other(err.to_string()),
        }
    }
}
