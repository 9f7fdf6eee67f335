//! Logging facilities for the Giswater form engine.
//!
//! The engine uses the `tracing` crate for instrumentation. Every warning the
//! engine raises while reading a form (lenient XML recovery, malformed
//! embedded JSON, parse results dropped as stale) goes through `tracing`, so
//! the host decides where it ends up by installing a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("giswater_forms=debug")
//!     .init();
//! ```

/// Span names used throughout the engine.
pub mod span_names {
    /// A single parse + normalize run.
    pub const PARSE: &str = "giswater_forms::parse";
    /// A full render of a form document.
    pub const RENDER: &str = "giswater_forms::render";
    /// Signal emission.
    pub const SIGNAL: &str = "giswater_forms::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Root target.
    pub const FORMS: &str = "giswater_forms";
    /// XML reading and tree normalization.
    pub const PARSE: &str = "giswater_forms::parse";
    /// Widget rendering.
    pub const RENDER: &str = "giswater_forms::render";
    /// Change propagation to the host.
    pub const BINDING: &str = "giswater_forms::binding";
    /// Form instance lifecycle.
    pub const INSTANCE: &str = "giswater_forms::instance";
    /// Signal/slot dispatch.
    pub const SIGNAL: &str = "giswater_forms::signal";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time parse runs and full renders.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "giswater_forms::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// Thin wrappers around the `tracing` macros with the engine's root target.
#[macro_export]
macro_rules! forms_trace {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "giswater_forms", $($arg)*)
    };
}

#[macro_export]
macro_rules! forms_debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "giswater_forms", $($arg)*)
    };
}

#[macro_export]
macro_rules! forms_info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "giswater_forms", $($arg)*)
    };
}

#[macro_export]
macro_rules! forms_warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "giswater_forms", $($arg)*)
    };
}

#[macro_export]
macro_rules! forms_error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "giswater_forms", $($arg)*)
    };
}
