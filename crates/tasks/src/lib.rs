//! Long running task management with panic propagation and graceful
//! shutdown.

pub mod manager;
pub mod shutdown;

pub use manager::{PanickedTaskError, TaskExecutor, TaskManager};
pub use shutdown::{ShutdownGuard, ShutdownSignal};
