//! Domain layer for Stake Execution.

pub mod errors;
pub mod lifecycle;
pub mod mode;

pub use errors::*;
pub use lifecycle::*;
pub use mode::*;
