//! Giswater Forms - a Qt Designer form interpretation engine.
//!
//! Backends describe forms as Qt Designer `.ui` XML. This crate turns such a
//! document into a normalized widget tree, lays it out, renders it against
//! host-owned state into a framework-neutral [`UiElement`] tree, and reports
//! user input back to the host through signals.
//!
//! # Pipeline
//!
//! 1. [`xml`]: lenient XML reading into a merged raw value tree
//! 2. [`document`]: normalization into a [`FormDocument`]
//! 3. [`layout`]: grid, form and box layout plans
//! 4. [`widget`]: rendering with [`Renderer`]
//! 5. [`binding`]: [`FormEvent`] translation and host signals
//! 6. [`instance`]: the [`FormInstance`] lifecycle with stale-parse guards
//!
//! # Example
//!
//! ```no_run
//! use giswater_forms::prelude::*;
//!
//! let mut form = FormInstance::new();
//! form.binding().field_changed.connect(|update| {
//!     println!("{} -> {}", update.key, update.value);
//! });
//!
//! form.load(r#"<ui><widget class="QLineEdit" name="txt_code"/></ui>"#);
//!
//! let context = RenderContext::new();
//! form.seed_defaults(&context);
//! if let FormView::Ready(element) = form.view(&context) {
//!     println!("{element:?}");
//! }
//! ```

pub use giswater_forms_core::*;

pub mod binding;
pub mod config;
pub mod document;
pub mod i18n;
pub mod instance;
pub mod layout;
pub mod prelude;
pub mod seed;
pub mod state;
pub mod widget;
pub mod xml;

pub use binding::{ButtonAction, FieldUpdate, FormBinding, FormEvent, TabChange};
pub use config::FormConfig;
pub use document::{FormDocument, Layout, Widget, WidgetKind};
pub use i18n::Translator;
pub use instance::{FormInstance, FormPhase, FormView, ParseOutcome, ParseRequest};
pub use state::{ExternalState, FieldState, TableStore};
pub use widget::{RenderContext, RenderOptions, Renderer, UiElement};
