//! Cross-subsystem integration tests.

mod flows;
mod properties;
