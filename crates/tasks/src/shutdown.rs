use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

use tokio::sync::{futures::Notified, Notify};

/// Broadcast side of the shutdown flag. Cloneable, any clone can trigger
/// shutdown for everyone.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    pub(crate) fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Send shutdown signal to every subscriber.
    pub fn send(&self) {
        self.flag.store(true, Ordering::Relaxed);
        self.notify.notify_waiters();
    }

    pub(crate) fn subscribe(&self) -> Shutdown {
        Shutdown(self.clone())
    }

    fn should_shutdown(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    fn notified(&self) -> Notified<'_> {
        self.notify.notified()
    }
}

/// Listen side of the shutdown flag.
pub(crate) struct Shutdown(ShutdownSignal);

impl Shutdown {
    pub(crate) fn should_shutdown(&self) -> bool {
        self.0.should_shutdown()
    }

    pub(crate) async fn wait_for_shutdown(&self) {
        while !self.should_shutdown() {
            self.0.notified().await
        }
    }
}

/// Shutdown listener handed to spawned tasks. Registers the task in the
/// pending counter on creation and deregisters on drop, which is what the
/// graceful shutdown wait observes.
pub struct ShutdownGuard {
    shutdown: Shutdown,
    counter: Arc<AtomicUsize>,
}

impl ShutdownGuard {
    pub(crate) fn new(shutdown: Shutdown, counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { shutdown, counter }
    }

    /// Check if shutdown signal has been sent.
    pub fn should_shutdown(&self) -> bool {
        self.shutdown.should_shutdown()
    }

    /// Waits until shutdown signal is sent.
    pub async fn wait_for_shutdown(&self) {
        self.shutdown.wait_for_shutdown().await
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
