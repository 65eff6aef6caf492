use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};

/// Subset of the finalized block header this core cares about.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct BlockHeader {
    /// Height of the finalized block.
    height: u64,

    /// Number of transactions included in the block.
    num_txs: u64,
}

impl BlockHeader {
    pub fn new(height: u64, num_txs: u64) -> Self {
        Self { height, num_txs }
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn num_txs(&self) -> u64 {
        self.num_txs
    }
}

/// Parameters handed to the chain-init hook at genesis.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisParams {
    chain_id: String,
}

impl GenesisParams {
    pub fn new(chain_id: String) -> Self {
        Self { chain_id }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }
}
