// Re-exports from elsewhere in the crate.

pub use crate::block::{BlockHeader, GenesisParams};
pub use crate::buf::{Buf20, Buf32, Buf64};
pub use crate::checkpoint::CheckpointRecord;
pub use crate::valset::ValidatorSetUpdate;
pub use crate::vote::Vote;
