use berth_db::DbError;
use berth_primitives::tx::EncodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Chain-init fired a second time.
    #[error("chain already initialized")]
    AlreadyInitialized,

    /// Block hooks invoked before chain-init.
    #[error("chain not initialized")]
    NotInitialized,

    /// Canonical encoding failed for a structurally valid record. This is an
    /// invariant violation, surfaced to the caller rather than defaulted.
    #[error("encoding checkpoint: {0}")]
    Encode(#[from] EncodeError),

    /// Persistent store fault, fatal to the node.
    #[error("store: {0}")]
    Db(#[from] DbError),

    /// The lifecycle worker is gone.
    #[error("lifecycle worker exited")]
    WorkerExited,
}
