//! # Quantum Telemetry
//!
//! Structured logging bootstrap for Quantum-Chain subsystems.
//!
//! Library crates only emit `tracing` events. Binaries and test harnesses
//! call `init_logging` once to decide where those events go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_subsystem("11", "stake-execution");
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `quantum-chain` | Service name in logs |
//! | `QC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `QC_JSON_LOGS` | `false` (`true` in containers) | JSON lines output |
//! | `QC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `QC_SUBSYSTEM_ID` | `00` | Subsystem identifier |
//! | `QC_NETWORK` | `testnet` | Network name |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
