//! Navigation state and its transitions.
//!
//! The base view is one of Dashboard, Specialty(id) or Alphabetical. Two overlays sit on
//! top of it: a search term, which replaces the base list while non-empty, and an open
//! prescription detail. Every transition is total and replaces state in place; there is
//! no history stack, so "back" is [`ViewController::clear_selection`].

use crate::constants::{
    ALPHABETICAL_CONTEXT, ALPHABETICAL_HEADING, RESULT_NOUN, SEARCH_CONTEXT,
    SEARCH_HEADING_PREFIX, SPECIALTY_HEADING_FALLBACK,
};
use crate::query::{compute_results, ResultItem};
use ordo_corpus::{Corpus, Prescription};
use std::sync::Arc;

/// Base navigation mode.
///
/// The selected specialty id lives inside [`ViewMode::Specialty`], so it cannot be set
/// in any other mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Dashboard,
    Specialty(String),
    Alphabetical,
}

/// Snapshot of what the user is looking at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    selected_prescription: Option<Arc<Prescription>>,
    search_term: String,
}

impl ViewState {
    pub fn dashboard() -> Self {
        Self::default()
    }

    pub fn specialty(id: impl Into<String>) -> Self {
        Self {
            mode: ViewMode::Specialty(id.into()),
            ..Self::default()
        }
    }

    pub fn alphabetical() -> Self {
        Self {
            mode: ViewMode::Alphabetical,
            ..Self::default()
        }
    }

    /// Same base view with a search term overlay.
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn selected_specialty_id(&self) -> Option<&str> {
        match &self.mode {
            ViewMode::Specialty(id) => Some(id),
            _ => None,
        }
    }

    pub fn selected_prescription(&self) -> Option<&Arc<Prescription>> {
        self.selected_prescription.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }
}

/// Owns the view state for one session and derives what should be displayed.
#[derive(Clone, Debug)]
pub struct ViewController {
    corpus: Arc<Corpus>,
    state: ViewState,
}

impl ViewController {
    /// Start a session on the dashboard.
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self {
            corpus,
            state: ViewState::dashboard(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn select_dashboard(&mut self) {
        self.state = ViewState::dashboard();
    }

    /// Open a specialty. Unknown ids are accepted and list nothing.
    pub fn select_specialty(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.corpus.specialty(&id).is_none() {
            tracing::warn!(specialty = %id, "selected unknown specialty");
        }
        self.state = ViewState::specialty(id);
    }

    pub fn select_alphabetical(&mut self) {
        self.state = ViewState::alphabetical();
    }

    /// Open a detail on top of the current list; mode and search term are kept.
    pub fn select_prescription(&mut self, prescription: Arc<Prescription>) {
        self.state.selected_prescription = Some(prescription);
    }

    /// Close the detail and return to the list that produced it.
    pub fn clear_selection(&mut self) {
        self.state.selected_prescription = None;
    }

    /// Typing a query while a detail is open returns to the list.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        if self.state.is_searching() {
            self.state.selected_prescription = None;
        }
    }

    /// Active result list for the current state.
    pub fn results(&self) -> Vec<ResultItem> {
        compute_results(&self.corpus, &self.state)
    }

    /// The specialty grid is shown only on a bare dashboard.
    pub fn is_dashboard(&self) -> bool {
        self.state.mode == ViewMode::Dashboard
            && !self.state.is_searching()
            && self.state.selected_prescription.is_none()
    }

    /// Whether list rows should display their specialty tags.
    pub fn shows_specialty_tags(&self) -> bool {
        self.state.is_searching() || self.state.mode == ViewMode::Alphabetical
    }

    /// Title above the result list.
    pub fn list_heading(&self) -> String {
        if self.state.is_searching() {
            return format!("{SEARCH_HEADING_PREFIX} : \"{}\"", self.state.search_term);
        }
        if self.state.mode == ViewMode::Alphabetical {
            return ALPHABETICAL_HEADING.to_string();
        }
        self.selected_specialty_name()
            .unwrap_or(SPECIALTY_HEADING_FALLBACK)
            .to_string()
    }

    /// Breadcrumb shown above an open detail.
    pub fn detail_context(&self) -> Option<String> {
        if self.state.is_searching() {
            return Some(SEARCH_CONTEXT.to_string());
        }
        if self.state.mode == ViewMode::Alphabetical {
            return Some(ALPHABETICAL_CONTEXT.to_string());
        }
        self.selected_specialty_name().map(str::to_string)
    }

    fn selected_specialty_name(&self) -> Option<&str> {
        self.state
            .selected_specialty_id()
            .and_then(|id| self.corpus.specialty(id))
            .map(|s| s.name.as_str())
    }
}

/// Result count as shown next to a list heading, e.g. `3 ordonnances`.
pub fn result_count_label(count: usize) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} {RESULT_NOUN}{plural}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = r#"specialties:
  - id: cardio
    name: Cardiologie
    icon: Heart
    color: red
    prescriptions:
      - title: HTA
        lines: ["-AMLOR 5mg cp : 1cp/j"]
      - title: Angor
        lines: ["-RISORDAN 5mg cp sublingual"]
  - id: neuro
    name: Neurologie
    icon: Brain
    color: violet
    prescriptions:
      - title: Migraine
        lines: ["-ASPEGIC 1000mg : 1 sachet"]
"#;

    fn controller() -> ViewController {
        let corpus = Corpus::parse(CORPUS).expect("parse corpus");
        ViewController::new(Arc::new(corpus))
    }

    fn first_result(controller: &ViewController) -> Arc<Prescription> {
        let results = controller.results();
        Arc::clone(&results.first().expect("at least one result").prescription)
    }

    #[test]
    fn starts_on_dashboard() {
        let c = controller();
        assert_eq!(c.state(), &ViewState::dashboard());
        assert!(c.is_dashboard());
        assert!(c.results().is_empty());
    }

    #[test]
    fn select_dashboard_is_idempotent() {
        let mut c = controller();
        c.select_specialty("cardio");
        c.set_search_term("hta");
        c.select_dashboard();
        let once = c.state().clone();
        c.select_dashboard();
        assert_eq!(c.state(), &once);
        assert_eq!(once, ViewState::dashboard());
    }

    #[test]
    fn select_specialty_clears_detail_and_search() {
        let mut c = controller();
        c.select_alphabetical();
        let p = first_result(&c);
        c.select_prescription(p);
        c.select_specialty("neuro");

        assert!(c.state().selected_prescription().is_none());
        assert_eq!(c.state().mode(), &ViewMode::Specialty("neuro".into()));
        assert_eq!(c.state().selected_specialty_id(), Some("neuro"));
        assert_eq!(c.state().search_term(), "");
    }

    #[test]
    fn select_alphabetical_clears_specialty() {
        let mut c = controller();
        c.select_specialty("cardio");
        c.select_alphabetical();
        assert_eq!(c.state().selected_specialty_id(), None);
        assert_eq!(c.results().len(), 3);
    }

    #[test]
    fn unknown_specialty_is_accepted() {
        let mut c = controller();
        c.select_specialty("pneumo");
        assert_eq!(c.state().selected_specialty_id(), Some("pneumo"));
        assert!(c.results().is_empty());
        assert_eq!(c.list_heading(), "Spécialité");
    }

    #[test]
    fn select_prescription_keeps_mode_and_search() {
        let mut c = controller();
        c.select_specialty("cardio");
        c.set_search_term("aspegic");
        let p = first_result(&c);
        c.select_prescription(Arc::clone(&p));

        assert_eq!(c.state().selected_prescription(), Some(&p));
        assert_eq!(c.state().selected_specialty_id(), Some("cardio"));
        assert_eq!(c.state().search_term(), "aspegic");
    }

    #[test]
    fn clear_selection_returns_to_list() {
        let mut c = controller();
        c.select_specialty("cardio");
        let before = c.results();
        c.select_prescription(Arc::clone(&before[0].prescription));
        c.clear_selection();

        assert!(c.state().selected_prescription().is_none());
        assert_eq!(c.results(), before);
    }

    #[test]
    fn typing_a_search_closes_the_detail() {
        let mut c = controller();
        c.select_specialty("cardio");
        let p = first_result(&c);
        c.select_prescription(p);
        c.set_search_term("migraine");
        assert!(c.state().selected_prescription().is_none());
    }

    #[test]
    fn clearing_search_restores_the_base_list() {
        let mut c = controller();
        c.select_specialty("cardio");
        let unfiltered = c.results();

        c.set_search_term("x");
        c.set_search_term("");

        assert_eq!(c.state().mode(), &ViewMode::Specialty("cardio".into()));
        assert_eq!(c.results(), unfiltered);
    }

    #[test]
    fn clearing_search_keeps_an_open_detail() {
        let mut c = controller();
        c.set_search_term("hta");
        let p = first_result(&c);
        c.select_prescription(Arc::clone(&p));
        c.set_search_term("");
        assert_eq!(c.state().selected_prescription(), Some(&p));
    }

    #[test]
    fn search_from_dashboard_leaves_the_grid() {
        let mut c = controller();
        c.set_search_term("angor");
        assert!(!c.is_dashboard());
        assert_eq!(c.results().len(), 1);
    }

    #[test]
    fn headings_follow_the_active_view() {
        let mut c = controller();
        c.select_specialty("cardio");
        assert_eq!(c.list_heading(), "Cardiologie");
        assert_eq!(c.detail_context().as_deref(), Some("Cardiologie"));
        assert!(!c.shows_specialty_tags());

        c.select_alphabetical();
        assert_eq!(c.list_heading(), "Index Alphabétique (A-Z)");
        assert_eq!(c.detail_context().as_deref(), Some("Index Global"));
        assert!(c.shows_specialty_tags());

        c.set_search_term("hta");
        assert_eq!(c.list_heading(), "Résultats pour : \"hta\"");
        assert_eq!(c.detail_context().as_deref(), Some("Recherche"));

        c.select_dashboard();
        assert_eq!(c.detail_context(), None);
    }

    #[test]
    fn result_count_label_pluralizes() {
        assert_eq!(result_count_label(0), "0 ordonnance");
        assert_eq!(result_count_label(1), "1 ordonnance");
        assert_eq!(result_count_label(12), "12 ordonnances");
    }
}
