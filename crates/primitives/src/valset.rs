use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};

use crate::buf::Buf32;

/// A pending change to the validator set, produced by the staking
/// collaborator and passed through block-end unmodified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct ValidatorSetUpdate {
    /// Consensus pubkey of the validator being updated.
    pubkey: Buf32,

    /// New voting power, zero removes the validator.
    power: u64,
}

impl ValidatorSetUpdate {
    pub fn new(pubkey: Buf32, power: u64) -> Self {
        Self { pubkey, power }
    }

    pub fn pubkey(&self) -> &Buf32 {
        &self.pubkey
    }

    pub fn power(&self) -> u64 {
        self.power
    }
}
