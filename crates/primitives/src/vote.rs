use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};

use crate::buf::Buf64;

/// A precommit vote attached to a finalized block.
///
/// Produced per validator by the consensus layer.  This core treats votes as
/// read-only inputs and never verifies the signatures itself, that happens
/// upstream before finalization.
#[derive(Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct Vote {
    /// The validator's signature over the vote payload.
    signature: Buf64,

    /// Canonical bytes the signature was computed over.
    sign_bytes: Vec<u8>,
}

impl Vote {
    pub fn new(signature: Buf64, sign_bytes: Vec<u8>) -> Self {
        Self {
            signature,
            sign_bytes,
        }
    }

    pub fn signature(&self) -> &Buf64 {
        &self.signature
    }

    pub fn sign_bytes(&self) -> &[u8] {
        &self.sign_bytes
    }
}
