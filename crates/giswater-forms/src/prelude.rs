//! Prelude module for Giswater Forms.
//!
//! ```ignore
//! use giswater_forms::prelude::*;
//! ```

// ============================================================================
// Lifecycle
// ============================================================================

pub use crate::instance::{FormInstance, FormPhase, FormView, ParseOutcome, ParseRequest};

// ============================================================================
// Host data and configuration
// ============================================================================

pub use crate::config::FormConfig;
pub use crate::i18n::Translator;
pub use crate::state::{ExternalState, FieldState, TableStore};

// ============================================================================
// Documents and rendering
// ============================================================================

pub use crate::document::{FormDocument, Widget, WidgetKind};
pub use crate::widget::{RenderContext, RenderOptions, Renderer, UiElement};

// ============================================================================
// Binding
// ============================================================================

pub use crate::binding::{ButtonAction, FieldUpdate, FormBinding, FormEvent, TabChange};
pub use giswater_forms_core::{FormError, FormResult, Signal};
