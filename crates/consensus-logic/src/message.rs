//! Block event channel between the replication runtime and the lifecycle
//! worker.

use berth_primitives::{
    block::{BlockHeader, GenesisParams},
    valset::ValidatorSetUpdate,
    vote::Vote,
};
use tokio::sync::{mpsc, oneshot};

use crate::errors::LifecycleError;

/// Events the replication runtime feeds the worker, applied strictly in
/// arrival order.
#[derive(Debug)]
pub enum BlockEvent {
    ChainInit(GenesisParams),

    BlockBegin(BlockHeader),

    BlockEnd {
        header: BlockHeader,
        votes: Vec<Vote>,
        /// Responder for the validator set updates, when the runtime wants
        /// them back.
        resp: Option<oneshot::Sender<Result<Vec<ValidatorSetUpdate>, LifecycleError>>>,
    },
}

/// Sender side of the block event channel.
#[derive(Clone)]
pub struct LifecycleHandle {
    event_tx: mpsc::Sender<BlockEvent>,
}

impl LifecycleHandle {
    pub fn new(event_tx: mpsc::Sender<BlockEvent>) -> Self {
        Self { event_tx }
    }

    pub async fn chain_init(&self, params: GenesisParams) -> Result<(), LifecycleError> {
        self.send(BlockEvent::ChainInit(params)).await
    }

    pub async fn block_begin(&self, header: BlockHeader) -> Result<(), LifecycleError> {
        self.send(BlockEvent::BlockBegin(header)).await
    }

    /// Feeds a finalized block and waits for the worker's validator set
    /// updates.
    pub async fn block_end(
        &self,
        header: BlockHeader,
        votes: Vec<Vote>,
    ) -> Result<Vec<ValidatorSetUpdate>, LifecycleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.send(BlockEvent::BlockEnd {
            header,
            votes,
            resp: Some(resp_tx),
        })
        .await?;

        resp_rx.await.map_err(|_| LifecycleError::WorkerExited)?
    }

    async fn send(&self, event: BlockEvent) -> Result<(), LifecycleError> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| LifecycleError::WorkerExited)
    }
}
