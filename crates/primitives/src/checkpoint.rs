use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};

use crate::buf::{Buf20, Buf32};

/// Attested summary of a contiguous range of sidechain blocks, proposed for
/// anchoring on the root chain.
///
/// Immutable once written at a given height.  The proposal path creates it,
/// the block lifecycle controller only reads it back.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct CheckpointRecord {
    /// Address of the validator that proposed this checkpoint.
    proposer: Buf20,

    /// First sidechain block covered by the checkpoint.
    start_block: u64,

    /// Last sidechain block covered by the checkpoint, inclusive.
    end_block: u64,

    /// Root hash committing to the block range.
    root_hash: Buf32,
}

impl CheckpointRecord {
    pub fn new(proposer: Buf20, start_block: u64, end_block: u64, root_hash: Buf32) -> Self {
        Self {
            proposer,
            start_block,
            end_block,
            root_hash,
        }
    }

    pub fn proposer(&self) -> &Buf20 {
        &self.proposer
    }

    pub fn start_block(&self) -> u64 {
        self.start_block
    }

    pub fn end_block(&self) -> u64 {
        self.end_block
    }

    pub fn root_hash(&self) -> &Buf32 {
        &self.root_hash
    }
}
