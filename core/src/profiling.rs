//! Profiling support via Tracy.
//!
//! This module provides optional profiling instrumentation using the
//! [Tracy profiler](https://github.com/wolfpld/tracy). Profiling is enabled
//! via the `profiling` Cargo feature.
//!
//! # Enabling Profiling
//!
//! Add the `profiling` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! firethorn-core = { version = "0.1", features = ["profiling"] }
//! ```
//!
//! # CPU Profiling
//!
//! Use the provided macros to instrument your code:
//!
//! ```ignore
//! use firethorn_core::profiling::{profile_scope, profile_function};
//!
//! fn compile_frame() {
//!     profile_function!();  // Profiles entire function
//!
//!     {
//!         profile_scope!("cull");  // Profiles this scope
//!         // ... do work ...
//!     }
//! }
//! ```
//!
//! # Frame Marking
//!
//! Mark frame boundaries for frame-time analysis:
//!
//! ```ignore
//! use firethorn_core::profiling::frame_mark;
//!
//! loop {
//!     // ... build, compile, execute ...
//!     frame_mark!();  // Signal end of frame
//! }
//! ```
//!
//! # Performance
//!
//! When profiling is disabled (the default), all macros compile to no-ops with
//! zero runtime overhead.

// Re-export tracy-client types when profiling is enabled
#[cfg(feature = "profiling")]
pub use tracy_client::{self, Client, Span, frame_mark as tracy_frame_mark, plot as tracy_plot, span};

/// Mark the end of a frame for Tracy's frame analysis.
///
/// This should be called once per frame, typically after `execute()` in the
/// render loop. Tracy uses these markers to calculate frame times and display
/// frame boundaries.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! frame_mark {
    () => {
        $crate::profiling::tracy_frame_mark()
    };
}

/// Mark the end of a frame (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! frame_mark {
    () => {};
}

/// Create a profiling span for the current scope.
///
/// The span automatically ends when the scope exits.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Create a profiling span for the entire function.
///
/// Place this at the start of a function to profile its entire execution.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::span!();
    };
}

/// Create a profiling span for function (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

/// Create a profiling span with a runtime-determined name.
///
/// Unlike [`profile_scope!`] which requires a string literal, this macro
/// accepts any `&str` expression (e.g. a pass name). It uses
/// `tracy_client::Client::span_alloc` which heap-allocates the span name.
/// Prefer [`profile_scope!`] for static names.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope_dynamic {
    ($name:expr) => {
        let _profile_span = $crate::profiling::Client::running()
            .map(|c| c.span_alloc(Some($name), "", file!(), line!(), 0));
    };
}

/// Create a profiling span with a dynamic name (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope_dynamic {
    ($name:expr) => {
        let _ = $name;
    };
}

/// Plot a value over time in Tracy.
///
/// This is useful for tracking metrics like alive pass counts or culled
/// resource counts per frame.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_plot {
    ($name:expr, $value:expr) => {
        $crate::profiling::tracy_plot!($name, $value as f64)
    };
}

/// Plot a value (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_plot {
    ($name:expr, $value:expr) => {
        let _ = $value; // Avoid unused warnings
    };
}

// Re-export macros at module level
pub use frame_mark;
pub use profile_function;
pub use profile_plot;
pub use profile_scope;
pub use profile_scope_dynamic;
