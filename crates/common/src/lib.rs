//! Reusable service plumbing, currently just the tracing setup.

pub mod logging;
