//! Manages and updates the node's shared view of the root chain.

pub mod status_manager;

pub use status_manager::StatusChannel;
