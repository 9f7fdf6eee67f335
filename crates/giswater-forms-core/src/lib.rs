//! Core systems for the Giswater form engine.
//!
//! This crate provides the foundation shared by the form engine:
//!
//! - **Errors**: [`FormError`] and the [`FormResult`] alias
//! - **Logging**: `tracing` targets, span names and `forms_*!` macros
//! - **Signals**: [`Signal`], the callback seam towards the host
//! - **Generations**: [`Generation`]/[`RequestToken`] for stale-result guards
//!
//! # Signal Example
//!
//! ```
//! use giswater_forms_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod generation;
pub mod logging;
pub mod signal;

pub use error::{FormError, FormResult};
pub use generation::{Generation, RequestToken};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};

#[doc(hidden)]
pub use tracing;
