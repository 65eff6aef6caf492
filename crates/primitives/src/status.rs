use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

/// View of the root chain bridge contract state we track locally.
#[derive(Debug, Clone, Default, Arbitrary, Serialize, Deserialize)]
pub struct RootChainStatus {
    /// Last sidechain block the bridge contract has confirmed a checkpoint
    /// through.
    pub last_confirmed_block: u64,

    /// Unix millis of the most recent successful poll of the contract.
    pub last_update: u64,
}
