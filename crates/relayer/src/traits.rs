use async_trait::async_trait;
use tracing::*;

use crate::{error::RelayerResult, types::SubmissionPayload};

/// Transport that carries a checkpoint submission to the root chain.
#[async_trait]
pub trait RootChainRelay: Sync + Send + 'static {
    /// Hands the payload to the root chain. Delivery is best effort, the
    /// worker never waits for inclusion.
    async fn submit_checkpoint(&self, payload: SubmissionPayload) -> RelayerResult<()>;
}

/// Relay that just logs submissions, used when running without a root chain
/// connection.
#[derive(Debug, Clone, Default)]
pub struct NoopRelay;

#[async_trait]
impl RootChainRelay for NoopRelay {
    async fn submit_checkpoint(&self, payload: SubmissionPayload) -> RelayerResult<()> {
        info!(
            extra_data = %hex::encode(payload.extra_data()),
            "would submit checkpoint"
        );
        Ok(())
    }
}
