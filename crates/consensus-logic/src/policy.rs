//! Detection of checkpoint-bearing blocks.

use berth_primitives::block::BlockHeader;

/// Decides whether a finalized block carries the checkpoint marker and
/// should trigger the submission path at block-end.
///
/// Injectable because the exact marker contract belongs to the surrounding
/// runtime, not to this core.
pub trait CheckpointMarkerPolicy: Sync + Send + 'static {
    fn is_checkpoint_block(&self, header: &BlockHeader) -> bool;
}

/// Default policy: the block contains exactly the single designated
/// checkpoint-bearing transaction.
#[derive(Debug, Clone, Default)]
pub struct SingleTxMarkerPolicy;

impl CheckpointMarkerPolicy for SingleTxMarkerPolicy {
    fn is_checkpoint_block(&self, header: &BlockHeader) -> bool {
        header.num_txs() == 1
    }
}
