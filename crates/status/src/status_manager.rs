use std::sync::Arc;

use berth_primitives::status::RootChainStatus;
use tokio::sync::watch::{self, error::RecvError};
use tracing::warn;

/// A wrapper around the status sender and receiver.
///
/// Components hold a clone of this, readers borrow the latest snapshot and
/// the root chain poller pushes updates through the sender side.
#[derive(Clone)]
pub struct StatusChannel {
    /// Shared reference to the status sender.
    sender: Arc<StatusSender>,
    /// Shared reference to the status receiver.
    receiver: Arc<StatusReceiver>,
}

impl StatusChannel {
    pub fn new(rc_status: RootChainStatus) -> Self {
        let (rc_tx, rc_rx) = watch::channel(rc_status);

        let sender = Arc::new(StatusSender { rc: rc_tx });
        let receiver = Arc::new(StatusReceiver { rc: rc_rx });

        Self { sender, receiver }
    }

    // Receiver methods

    /// Gets the latest [`RootChainStatus`].
    pub fn get_root_chain_status(&self) -> RootChainStatus {
        self.receiver.rc.borrow().clone()
    }

    /// Gets the last block height the root chain contract has confirmed a
    /// checkpoint through.
    pub fn get_last_confirmed_block(&self) -> u64 {
        self.receiver.rc.borrow().last_confirmed_block
    }

    /// Create a subscription to the root chain status watcher.
    pub fn subscribe_root_chain_status(&self) -> watch::Receiver<RootChainStatus> {
        self.sender.rc.subscribe()
    }

    /// Waits until the contract view has confirmed at least up to `height`.
    pub async fn wait_until_confirmed(&self, height: u64) -> Result<RootChainStatus, RecvError> {
        let mut rx = self.receiver.rc.clone();
        loop {
            if rx.borrow().last_confirmed_block >= height {
                return Ok(rx.borrow().clone());
            }
            rx.changed().await?;
        }
    }

    // Sender methods

    /// Sends the updated [`RootChainStatus`] to the receivers. Logs a warning
    /// if every receiver is dropped.
    pub fn update_root_chain_status(&self, post_state: RootChainStatus) {
        if self.sender.rc.send(post_state).is_err() {
            warn!("root chain status receiver dropped");
        }
    }
}

/// Wrapper for watch status receivers.
struct StatusReceiver {
    rc: watch::Receiver<RootChainStatus>,
}

/// Wrapper for watch status senders.
struct StatusSender {
    rc: watch::Sender<RootChainStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_visible_to_readers() {
        let channel = StatusChannel::new(RootChainStatus::default());
        assert_eq!(channel.get_last_confirmed_block(), 0);

        channel.update_root_chain_status(RootChainStatus {
            last_confirmed_block: 512,
            last_update: 1,
        });
        assert_eq!(channel.get_last_confirmed_block(), 512);
    }

    #[tokio::test]
    async fn test_wait_until_confirmed() {
        let channel = StatusChannel::new(RootChainStatus::default());

        let waiter = channel.clone();
        let task = tokio::spawn(async move { waiter.wait_until_confirmed(100).await });

        channel.update_root_chain_status(RootChainStatus {
            last_confirmed_block: 50,
            last_update: 1,
        });
        channel.update_root_chain_status(RootChainStatus {
            last_confirmed_block: 150,
            last_update: 2,
        });

        let status = task.await.expect("test: join").expect("test: recv");
        assert_eq!(status.last_confirmed_block, 150);
    }
}
