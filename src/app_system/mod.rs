//! System wiring, configuration and startup/shutdown logic.

pub mod config;
pub mod inventory_system;
pub mod tracing;

pub use config::*;
pub use inventory_system::*;
pub use self::tracing::setup_tracing;
