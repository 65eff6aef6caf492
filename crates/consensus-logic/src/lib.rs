//! Checkpoint commitment logic driven by the block lifecycle hooks.
//!
//! Block finalization events come in over a single channel, a dedicated
//! worker applies them strictly in order, and when a finalized block carries
//! the checkpoint marker the stored record is validated against the root
//! chain view and dispatched for submission.

pub mod errors;
pub mod handler;
pub mod lifecycle;
pub mod message;
pub mod policy;
pub mod validation;
pub mod votes;
pub mod worker;

pub use errors::LifecycleError;
pub use lifecycle::LifecycleController;
pub use message::{BlockEvent, LifecycleHandle};
