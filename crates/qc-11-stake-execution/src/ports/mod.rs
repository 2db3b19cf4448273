//! Ports for Stake Execution.

pub mod outbound;

pub use outbound::*;
