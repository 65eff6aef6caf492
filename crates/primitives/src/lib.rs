//! Primitive types shared across the berth node: fixed-size buffers,
//! checkpoint records, consensus votes and the canonical transaction
//! encoding submitted to the root chain.

pub mod block;
pub mod buf;
pub mod checkpoint;
pub mod prelude;
pub mod status;
pub mod tx;
pub mod valset;
pub mod vote;
