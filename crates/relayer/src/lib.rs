//! Fire-and-forget delivery of checkpoint submissions to the root chain.

pub mod error;
pub mod handle;
pub mod task;
pub mod traits;
pub mod types;

pub use error::RelayerError;
pub use handle::{spawn_relayer_task, RelayerHandle};
pub use traits::{NoopRelay, RootChainRelay};
pub use types::SubmissionPayload;
