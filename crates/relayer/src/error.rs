use thiserror::Error;

pub type RelayerResult<T> = Result<T, RelayerError>;

#[derive(Debug, Error)]
pub enum RelayerError {
    /// The submission queue is full, the caller should drop the submission
    /// and move on.
    #[error("submission queue full")]
    QueueFull,

    /// The relayer worker is gone, nothing more will be delivered.
    #[error("relayer worker exited")]
    WorkerExited,

    #[error("transport: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}
