//! Per-form lifecycle.
//!
//! A [`FormInstance`] holds everything one mounted form owns: the parsed
//! document, the active tab of each tab widget, the loading phase and the
//! request generation that guards background parses.
//!
//! # Lifecycle
//!
//! ```text
//!            set_ui_xml(changed)          apply_parse(current token)
//!   Empty ─────────────────────▶ Loading ──────────────────────────▶ Ready
//!     ▲                            │ ▲                                 │
//!     └── apply_parse(error) ──────┘ └──── set_ui_xml(changed) ────────┘
//!
//!   any ── unmount() ──▶ Destroyed
//! ```
//!
//! Parsing is handed out as a [`ParseRequest`] that can run on any thread.
//! Its [`ParseOutcome`] is applied back on the owner; an outcome whose token
//! is no longer current is dropped without any state change.
//!
//! # Example
//!
//! ```ignore
//! let mut form = FormInstance::new();
//! if let Some(request) = form.set_ui_xml(&xml) {
//!     let outcome = request.run_async().await;
//!     form.apply_parse(outcome);
//! }
//! form.seed_defaults(&context);
//! let view = form.view(&context);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use giswater_forms_core::logging::span_names;
use giswater_forms_core::{FormError, FormResult, Generation, PerfSpan, RequestToken};

use crate::binding::{translate_event, FormBinding, FormEvent, TabChange};
use crate::document::{FormDocument, WidgetKind};
use crate::seed::collect_defaults;
use crate::widget::{RenderContext, Renderer, UiElement};

/// Lifecycle phase of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// No document and nothing loading.
    #[default]
    Empty,
    /// A parse has been requested and not applied yet.
    Loading,
    /// A document is available.
    Ready,
    /// The form has been unmounted.
    Destroyed,
}

/// A unit of parsing work for one XML input.
#[derive(Debug, Clone)]
pub struct ParseRequest {
    token: RequestToken,
    xml: Arc<str>,
}

impl ParseRequest {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Parses and normalizes on the current thread.
    pub fn run(self) -> ParseOutcome {
        let _span = PerfSpan::new(span_names::PARSE);
        ParseOutcome {
            token: self.token,
            result: FormDocument::parse(&self.xml),
        }
    }

    /// Parses on tokio's blocking pool.
    pub async fn run_async(self) -> ParseOutcome {
        let token = self.token;
        match tokio::task::spawn_blocking(move || self.run()).await {
            Ok(outcome) => outcome,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(error) => {
                tracing::debug!(
                    target: "giswater_forms::instance",
                    token = token.as_u64(),
                    %error,
                    "parse task cancelled"
                );
                ParseOutcome {
                    token,
                    result: Err(FormError::Destroyed),
                }
            }
        }
    }
}

/// The result of a [`ParseRequest`], tagged with its token.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub token: RequestToken,
    pub result: FormResult<FormDocument>,
}

/// What the host should display for a form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormView {
    /// Nothing: no document, a failed parse, or a destroyed form.
    Empty,
    /// A loading notice with its translated text.
    Loading(String),
    /// The rendered form.
    Ready(UiElement),
}

/// One mounted form.
#[derive(Debug, Default)]
pub struct FormInstance {
    binding: FormBinding,
    generation: Generation,
    phase: FormPhase,
    document: Option<FormDocument>,
    active_tabs: HashMap<String, String>,
    last_xml: Option<Arc<str>>,
    seeded: HashSet<String>,
}

impl FormInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// The signals towards the host.
    pub fn binding(&self) -> &FormBinding {
        &self.binding
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Loading
    }

    pub fn document(&self) -> Option<&FormDocument> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut FormDocument> {
        self.document.as_mut()
    }

    /// Active page name by tab widget name.
    pub fn active_tabs(&self) -> &HashMap<String, String> {
        &self.active_tabs
    }

    /// The token of the parse currently awaited, if any.
    pub fn pending_token(&self) -> Option<RequestToken> {
        self.generation.current()
    }

    /// Supplies the form's XML.
    ///
    /// The same XML as last time changes nothing and returns `None`. New XML
    /// drops the document and the tab selection, enters `Loading` and returns
    /// the parse to run. Empty XML leaves the form empty.
    pub fn set_ui_xml(&mut self, xml: &str) -> Option<ParseRequest> {
        if self.phase == FormPhase::Destroyed {
            tracing::debug!(target: "giswater_forms::instance", "xml supplied to destroyed form");
            return None;
        }
        if self.last_xml.as_deref() == Some(xml) {
            return None;
        }

        self.active_tabs.clear();
        self.document = None;
        self.seeded.clear();

        if xml.trim().is_empty() {
            self.last_xml = None;
            self.generation.retire();
            self.phase = FormPhase::Empty;
            return None;
        }

        let xml: Arc<str> = Arc::from(xml);
        self.last_xml = Some(xml.clone());
        self.phase = FormPhase::Loading;
        let token = self.generation.issue();
        tracing::debug!(
            target: "giswater_forms::instance",
            token = token.as_u64(),
            bytes = xml.len(),
            "form xml changed, parse requested"
        );
        Some(ParseRequest { token, xml })
    }

    /// Applies a finished parse.
    ///
    /// Returns false when the outcome was dropped: the form is destroyed or a
    /// newer parse has been requested since. A parse error is logged and
    /// leaves the form `Empty`.
    pub fn apply_parse(&mut self, outcome: ParseOutcome) -> bool {
        if self.phase == FormPhase::Destroyed {
            tracing::debug!(
                target: "giswater_forms::instance",
                token = outcome.token.as_u64(),
                "parse finished after unmount, ignoring"
            );
            return false;
        }
        if !self.generation.is_current(outcome.token) {
            tracing::debug!(
                target: "giswater_forms::instance",
                token = outcome.token.as_u64(),
                current = ?self.generation.current().map(RequestToken::as_u64),
                "dropping stale parse result"
            );
            return false;
        }

        self.generation.retire();
        match outcome.result {
            Ok(document) => {
                tracing::debug!(
                    target: "giswater_forms::instance",
                    token = outcome.token.as_u64(),
                    widgets = document.fields().len(),
                    "form document ready"
                );
                self.document = Some(document);
                self.phase = FormPhase::Ready;
            }
            Err(error) => {
                tracing::warn!(
                    target: "giswater_forms::instance",
                    token = outcome.token.as_u64(),
                    %error,
                    "form parse failed"
                );
                self.document = None;
                self.phase = FormPhase::Empty;
            }
        }
        true
    }

    /// Sets the XML and parses it on the current thread.
    pub fn load(&mut self, xml: &str) -> FormPhase {
        if let Some(request) = self.set_ui_xml(xml) {
            let outcome = request.run();
            self.apply_parse(outcome);
        }
        self.phase
    }

    /// Makes `tab` the active page of `tab_widget` and notifies the host.
    ///
    /// Other tab widgets keep their selection. Returns false if there is no
    /// such tab widget or page.
    pub fn select_tab(&mut self, tab_widget: &str, tab: &str) -> bool {
        let Some(widget) = self
            .document
            .as_ref()
            .and_then(|document| document.widget(tab_widget))
            .filter(|widget| *widget.kind() == WidgetKind::TabWidget)
            .cloned()
        else {
            tracing::debug!(target: "giswater_forms::instance", tab_widget, "no such tab widget");
            return false;
        };
        if !widget.widgets().iter().any(|page| page.name() == tab) {
            tracing::debug!(target: "giswater_forms::instance", tab_widget, tab, "no such tab page");
            return false;
        }

        self.active_tabs
            .insert(tab_widget.to_string(), tab.to_string());
        self.binding.notify_tab_changed(TabChange {
            widget,
            tab: tab.to_string(),
        });
        true
    }

    /// Handles user interaction with the rendered form.
    pub fn handle_event(&mut self, event: &FormEvent, context: &RenderContext) {
        if let FormEvent::TabSelected { tab_widget, tab } = event {
            self.select_tab(tab_widget, tab);
            return;
        }
        let Some(document) = self.document.as_ref() else {
            tracing::debug!(target: "giswater_forms::instance", ?event, "event without a document");
            return;
        };
        if let Some(outgoing) = translate_event(document, &context.state, event) {
            self.binding.send(outgoing);
        }
    }

    /// Emits the declared defaults of widgets the host has no value for.
    ///
    /// Each key is emitted at most once per document. Disabled by
    /// `seed_defaults = false`. Returns the number of updates emitted.
    pub fn seed_defaults(&mut self, context: &RenderContext) -> usize {
        if !context.config.seed_defaults {
            return 0;
        }
        let Some(document) = self.document.as_ref() else {
            return 0;
        };
        let updates: Vec<_> = collect_defaults(
            document,
            &context.state,
            context.combo_placeholder(),
        )
        .into_iter()
        .filter(|update| self.seeded.insert(update.key.clone()))
        .collect();

        let count = updates.len();
        for update in updates {
            self.binding.update_field(update);
        }
        if count > 0 {
            tracing::debug!(target: "giswater_forms::instance", count, "seeded form defaults");
        }
        count
    }

    /// Renders the form in its current phase.
    pub fn view(&self, context: &RenderContext) -> FormView {
        match self.phase {
            FormPhase::Empty | FormPhase::Destroyed => FormView::Empty,
            FormPhase::Loading => FormView::Loading(
                context
                    .translator
                    .tr(&context.config.strings.loading_id)
                    .to_string(),
            ),
            FormPhase::Ready => {
                let Some(document) = self.document.as_ref() else {
                    return FormView::Empty;
                };
                let _span = PerfSpan::new(span_names::RENDER);
                match Renderer::new(context, &self.active_tabs).render_widget(document.root()) {
                    Some(element) => FormView::Ready(element),
                    None => FormView::Empty,
                }
            }
        }
    }

    /// Tears the form down. Later parse outcomes are ignored and all slots
    /// are disconnected.
    pub fn unmount(&mut self) {
        self.phase = FormPhase::Destroyed;
        self.generation.retire();
        self.document = None;
        self.active_tabs.clear();
        self.binding.field_changed.disconnect_all();
        self.binding.button_dispatched.disconnect_all();
        self.binding.tab_changed.disconnect_all();
        tracing::debug!(target: "giswater_forms::instance", "form unmounted");
    }

    /// Returns the document, or an error once the form is destroyed or
    /// before one is ready.
    pub fn require_document(&self) -> FormResult<&FormDocument> {
        match (self.phase, self.document.as_ref()) {
            (FormPhase::Destroyed, _) => Err(FormError::Destroyed),
            (_, Some(document)) => Ok(document),
            (_, None) => Err(FormError::MissingRoot),
        }
    }
}
