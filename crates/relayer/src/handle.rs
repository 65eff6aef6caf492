use std::sync::Arc;

use berth_tasks::TaskExecutor;
use tokio::sync::mpsc;
use tracing::*;

use crate::{
    error::{RelayerError, RelayerResult},
    task::relayer_task,
    traits::RootChainRelay,
    types::SubmissionPayload,
};

/// Depth of the pending submission queue. Submissions past this are dropped
/// at the source, the next checkpoint round carries the data again.
const SUBMISSION_QUEUE_DEPTH: usize = 64;

/// Frontend for queueing checkpoint submissions onto the relayer worker.
#[derive(Clone)]
pub struct RelayerHandle {
    sender: mpsc::Sender<SubmissionPayload>,
}

impl RelayerHandle {
    pub fn new(sender: mpsc::Sender<SubmissionPayload>) -> Self {
        Self { sender }
    }

    /// Queues a payload without waiting for delivery.
    ///
    /// A full queue is reported as [`RelayerError::QueueFull`] so the caller
    /// can log and move on, it must never block block processing.
    pub fn submit(&self, payload: SubmissionPayload) -> RelayerResult<()> {
        self.sender.try_send(payload).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => RelayerError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => RelayerError::WorkerExited,
        })
    }
}

pub fn spawn_relayer_task(
    executor: &TaskExecutor,
    relay: Arc<impl RootChainRelay>,
) -> RelayerHandle {
    let (submit_tx, submit_rx) = mpsc::channel::<SubmissionPayload>(SUBMISSION_QUEUE_DEPTH);
    executor.spawn_critical_async("relayer_task", async move {
        if let Err(e) = relayer_task(relay, submit_rx).await {
            error!(err = %e, "relayer task exited");
        }
    });
    RelayerHandle::new(submit_tx)
}
