/// Everything the root chain bridge contract needs to verify one checkpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmissionPayload {
    /// Canonical sign bytes the validators voted over.
    vote_sign_bytes: Vec<u8>,

    /// Vote signatures concatenated in validator set order.
    agg_signature: Vec<u8>,

    /// Canonical checkpoint tx bytes carried alongside the votes.
    extra_data: Vec<u8>,
}

impl SubmissionPayload {
    pub fn new(vote_sign_bytes: Vec<u8>, agg_signature: Vec<u8>, extra_data: Vec<u8>) -> Self {
        Self {
            vote_sign_bytes,
            agg_signature,
            extra_data,
        }
    }

    pub fn vote_sign_bytes(&self) -> &[u8] {
        &self.vote_sign_bytes
    }

    pub fn agg_signature(&self) -> &[u8] {
        &self.agg_signature
    }

    pub fn extra_data(&self) -> &[u8] {
        &self.extra_data
    }
}
