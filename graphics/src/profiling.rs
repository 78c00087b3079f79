//! Profiling support via Tracy.
//!
//! This module re-exports CPU profiling from [`firethorn_core::profiling`].
//! Profiling is enabled via the `profiling` Cargo feature:
//!
//! ```toml
//! [dependencies]
//! firethorn-graphics = { version = "0.1", features = ["profiling"] }
//! ```
//!
//! The frame graph instruments its own hot paths (`cull`, `compile`,
//! `execute`) with [`profile_function!`]; pass callbacks can add their own
//! scopes:
//!
//! ```ignore
//! use firethorn_graphics::profiling::{profile_scope, profile_scope_dynamic};
//!
//! |resources, data, driver| {
//!     profile_scope_dynamic!(resources.pass_name());
//!     // ... record commands ...
//! }
//! ```
//!
//! When profiling is disabled (the default), all macros compile to no-ops.

pub use firethorn_core::profiling::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_compile() {
        // These should compile regardless of profiling feature
        frame_mark!();
        profile_scope!("test_scope");
        profile_function!();
        profile_plot!("test_value", 42.0);
    }
}
