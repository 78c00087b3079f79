//! # Firethorn Core
//!
//! Core crate for Firethorn basic utilities.

pub mod pool;
pub mod profiling;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder for future engine bootstrap
pub fn init() {
    log::info!("Firethorn Core v{} initialized", VERSION);
}
