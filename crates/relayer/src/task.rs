use std::sync::Arc;

use tokio::sync::mpsc::Receiver;
use tracing::*;

use crate::{error::RelayerResult, traits::RootChainRelay, types::SubmissionPayload};

/// Drains the submission queue into the root chain relay.
///
/// Transport failures are logged and the payload is dropped. The next
/// checkpoint that lands on the contract supersedes anything we failed to
/// deliver, so there is no retry bookkeeping here.
pub async fn relayer_task(
    relay: Arc<impl RootChainRelay>,
    mut submit_rx: Receiver<SubmissionPayload>,
) -> RelayerResult<()> {
    info!("starting relayer task");

    while let Some(payload) = submit_rx.recv().await {
        match relay.submit_checkpoint(payload).await {
            Ok(()) => {
                debug!("checkpoint submission relayed");
            }
            Err(e) => {
                warn!(err = %e, "failed to relay checkpoint submission");
            }
        }
    }

    info!("submission queue closed, relayer task winding down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{error::RelayerError, handle::RelayerHandle};

    #[derive(Default)]
    struct CapturingRelay {
        seen: Mutex<Vec<SubmissionPayload>>,
    }

    #[async_trait]
    impl RootChainRelay for CapturingRelay {
        async fn submit_checkpoint(&self, payload: SubmissionPayload) -> RelayerResult<()> {
            self.seen.lock().push(payload);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_payloads_flow_to_relay() {
        let relay = Arc::new(CapturingRelay::default());
        let (tx, rx) = mpsc::channel(8);
        let handle = RelayerHandle::new(tx);

        let worker = tokio::spawn(relayer_task(relay.clone(), rx));

        let payload = SubmissionPayload::new(b"sign".to_vec(), b"sig".to_vec(), b"tx".to_vec());
        handle.submit(payload.clone()).expect("test: submit");

        drop(handle);
        worker.await.expect("test: join").expect("test: task");

        assert_eq!(relay.seen.lock().as_slice(), &[payload]);
    }

    #[tokio::test]
    async fn test_submit_reports_full_queue() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = RelayerHandle::new(tx);

        let payload = SubmissionPayload::new(vec![], vec![], vec![]);
        handle.submit(payload.clone()).expect("test: submit");

        let res = handle.submit(payload);
        assert!(matches!(res, Err(RelayerError::QueueFull)));
    }

    #[tokio::test]
    async fn test_submit_reports_worker_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = RelayerHandle::new(tx);

        let res = handle.submit(SubmissionPayload::new(vec![], vec![], vec![]));
        assert!(matches!(res, Err(RelayerError::WorkerExited)));
    }
}
