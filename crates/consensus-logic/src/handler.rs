//! Checkpoint proposal ingestion.
//!
//! This is the message-handler boundary with the routing runtime: proposals
//! arrive as `{proposer, startBlock, endBlock, rootHash}` and get written
//! into the store keyed by the height they target.

use berth_db::DbError;
use berth_primitives::checkpoint::CheckpointRecord;
use berth_storage::CheckpointDbManager;
use thiserror::Error;
use tracing::*;

#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("malformed range (start {start} > end {end})")]
    MalformedRange { start: u64, end: u64 },

    #[error("zero root hash")]
    ZeroRootHash,

    /// A different record is already stored at this height.
    #[error("conflicts with stored checkpoint at height {0}")]
    Conflict(u64),

    #[error("store: {0}")]
    Db(DbError),
}

/// Validates a proposal's shape and stores it for the block-end path to pick
/// up. Re-proposing the identical record is accepted silently.
pub async fn handle_checkpoint_proposal(
    ckman: &CheckpointDbManager,
    height: u64,
    record: CheckpointRecord,
) -> Result<(), ProposalError> {
    if record.start_block() > record.end_block() {
        return Err(ProposalError::MalformedRange {
            start: record.start_block(),
            end: record.end_block(),
        });
    }

    if record.root_hash().is_zero() {
        return Err(ProposalError::ZeroRootHash);
    }

    match ckman.put_checkpoint(height, record).await {
        Ok(()) => {
            debug!(%height, "stored checkpoint proposal");
            Ok(())
        }
        Err(DbError::OverwriteCheckpoint(h)) => Err(ProposalError::Conflict(h)),
        Err(e) => Err(ProposalError::Db(e)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use berth_db::stubs::StubCheckpointDb;
    use berth_primitives::buf::{Buf20, Buf32};
    use threadpool::ThreadPool;

    use super::*;

    fn setup_manager() -> CheckpointDbManager {
        CheckpointDbManager::new(ThreadPool::new(1), Arc::new(StubCheckpointDb::new()))
    }

    #[tokio::test]
    async fn test_proposal_stored() {
        let ckman = setup_manager();
        let record = CheckpointRecord::new(Buf20::zero(), 100, 200, Buf32::from([1; 32]));

        handle_checkpoint_proposal(&ckman, 100, record)
            .await
            .expect("test: propose");
        assert_eq!(
            ckman.get_checkpoint(100).await.expect("test: query"),
            Some(record)
        );

        // identical re-proposal is fine
        handle_checkpoint_proposal(&ckman, 100, record)
            .await
            .expect("test: repropose");
    }

    #[tokio::test]
    async fn test_malformed_range_rejected() {
        let ckman = setup_manager();
        let record = CheckpointRecord::new(Buf20::zero(), 300, 200, Buf32::from([1; 32]));

        let res = handle_checkpoint_proposal(&ckman, 300, record).await;
        assert!(matches!(
            res,
            Err(ProposalError::MalformedRange {
                start: 300,
                end: 200
            })
        ));
        assert_eq!(ckman.get_checkpoint(300).await.expect("test: query"), None);
    }

    #[tokio::test]
    async fn test_zero_root_hash_rejected() {
        let ckman = setup_manager();
        let record = CheckpointRecord::new(Buf20::zero(), 100, 200, Buf32::zero());

        let res = handle_checkpoint_proposal(&ckman, 100, record).await;
        assert!(matches!(res, Err(ProposalError::ZeroRootHash)));
    }

    #[tokio::test]
    async fn test_conflicting_proposal_rejected() {
        let ckman = setup_manager();
        let record = CheckpointRecord::new(Buf20::zero(), 100, 200, Buf32::from([1; 32]));
        let other = CheckpointRecord::new(Buf20::zero(), 100, 200, Buf32::from([2; 32]));

        handle_checkpoint_proposal(&ckman, 100, record)
            .await
            .expect("test: propose");
        let res = handle_checkpoint_proposal(&ckman, 100, other).await;
        assert!(matches!(res, Err(ProposalError::Conflict(100))));

        // first record wins
        assert_eq!(
            ckman.get_checkpoint(100).await.expect("test: query"),
            Some(record)
        );
    }
}
