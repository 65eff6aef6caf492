//! Start-block contiguity validation against the root chain view.

use berth_primitives::{checkpoint::CheckpointRecord, status::RootChainStatus};
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum InvalidCheckpoint {
    /// The proposed range does not begin where the last confirmed range
    /// ended.
    #[error("start block mismatch (expected {expected}, got {got})")]
    StartBlockMismatch { expected: u64, got: u64 },
}

/// Checks that the proposed checkpoint starts exactly at the last block the
/// root chain has confirmed through.
///
/// This is what makes submission at-most-once per height: a range that was
/// already anchored fails the check on every later block, and a gap never
/// opens between confirmed ranges.
pub fn validate_start_block(
    record: &CheckpointRecord,
    external: &RootChainStatus,
) -> Result<(), InvalidCheckpoint> {
    if external.last_confirmed_block != record.start_block() {
        return Err(InvalidCheckpoint::StartBlockMismatch {
            expected: external.last_confirmed_block,
            got: record.start_block(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use berth_primitives::buf::{Buf20, Buf32};

    use super::*;

    fn record(start: u64, end: u64) -> CheckpointRecord {
        CheckpointRecord::new(Buf20::zero(), start, end, Buf32::from([1; 32]))
    }

    fn external(last_confirmed: u64) -> RootChainStatus {
        RootChainStatus {
            last_confirmed_block: last_confirmed,
            last_update: 0,
        }
    }

    #[test]
    fn test_contiguous_range_is_valid() {
        assert_eq!(validate_start_block(&record(100, 200), &external(100)), Ok(()));
    }

    #[test]
    fn test_genesis_boundary_is_valid() {
        // 0 == 0 must pass, the very first checkpoint starts at genesis
        assert_eq!(validate_start_block(&record(0, 50), &external(0)), Ok(()));
    }

    #[test]
    fn test_gap_is_invalid() {
        let res = validate_start_block(&record(150, 200), &external(100));
        assert_eq!(
            res,
            Err(InvalidCheckpoint::StartBlockMismatch {
                expected: 100,
                got: 150
            })
        );
    }

    #[test]
    fn test_replay_is_invalid() {
        // range already anchored, confirmation moved past its start
        let res = validate_start_block(&record(100, 200), &external(200));
        assert_eq!(
            res,
            Err(InvalidCheckpoint::StartBlockMismatch {
                expected: 200,
                got: 100
            })
        );
    }
}
