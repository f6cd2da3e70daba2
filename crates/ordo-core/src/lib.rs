//! # Ordo Core
//!
//! Query and navigation logic for the prescription library.
//!
//! This crate turns the frozen corpus from `ordo-corpus` into what a renderer displays:
//! - accent-insensitive search and French-style title collation ([`text`])
//! - the query engine for search, alphabetical and specialty listings ([`query`])
//! - the view-state controller and its derived labels ([`view`])
//! - startup configuration ([`config`])
//!
//! **No presentation concerns**: icons, colours, layout and printing belong to the
//! consumer.

pub mod config;
pub mod constants;
pub mod error;
pub mod query;
pub mod text;
pub mod view;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use query::{compute_results, Query, ResultItem};
pub use view::{result_count_label, ViewController, ViewMode, ViewState};

pub use ordo_corpus::{
    Corpus, Prescription, PrescriptionLine, Specialty, SpecialtySummary, SpecialtyTag,
};

use std::sync::Arc;

/// Read-only access to a loaded corpus.
///
/// Cloning is cheap; clones share the same corpus.
#[derive(Clone, Debug)]
pub struct Library {
    corpus: Arc<Corpus>,
}

impl Library {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus: Arc::new(corpus),
        }
    }

    /// Load the corpus named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corpus`] if the file cannot be read or fails validation.
    pub fn open(config: &CoreConfig) -> CoreResult<Self> {
        let corpus = Corpus::load(config.corpus_path())?;
        Ok(Self::new(corpus))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Result list for an arbitrary view state.
    pub fn results(&self, state: &ViewState) -> Vec<ResultItem> {
        compute_results(&self.corpus, state)
    }

    /// Dashboard cards, in authored order.
    pub fn specialty_summaries(&self) -> Vec<SpecialtySummary> {
        self.corpus.summaries()
    }

    pub fn specialty_by_id(&self, id: &str) -> Option<&Specialty> {
        self.corpus.specialty(id)
    }

    /// First prescription with this id, in corpus order.
    pub fn prescription_by_id(&self, id: &str) -> Option<&Arc<Prescription>> {
        self.corpus.prescription(id)
    }

    /// New navigation session sharing this corpus, starting on the dashboard.
    pub fn controller(&self) -> ViewController {
        ViewController::new(Arc::clone(&self.corpus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve_corpus_path;

    fn bundled() -> Library {
        let path = resolve_corpus_path(None).expect("bundled corpus path");
        let config = CoreConfig::new(path).expect("config");
        Library::open(&config).expect("open bundled corpus")
    }

    #[test]
    fn opens_bundled_corpus() {
        let library = bundled();
        let summaries = library.specialty_summaries();
        assert!(!summaries.is_empty());
        for summary in &summaries {
            let specialty = library
                .specialty_by_id(summary.id.as_str())
                .expect("summary id resolves");
            assert_eq!(summary.prescription_count, specialty.prescriptions.len());
        }
    }

    #[test]
    fn alphabetical_index_covers_every_prescription_id() {
        let library = bundled();
        let results = library.results(&ViewState::alphabetical());

        let mut ids: Vec<_> = library
            .corpus()
            .occurrences()
            .map(|(_, p)| p.id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let mut listed: Vec<_> = results.iter().map(|r| r.prescription.id.as_str()).collect();
        listed.sort_unstable();
        assert_eq!(listed, ids);
    }

    #[test]
    fn accessors_resolve_known_ids() {
        let library = Library::new(
            Corpus::parse(
                r#"specialties:
  - id: orl
    name: Oto-Rhino-Laryngologie
    icon: Ear
    color: sky
    prescriptions:
      - id: otite
        title: Otite moyenne aiguë
"#,
            )
            .expect("parse corpus"),
        );
        assert_eq!(
            library.specialty_by_id("orl").map(|s| s.name.as_str()),
            Some("Oto-Rhino-Laryngologie")
        );
        assert_eq!(
            library.prescription_by_id("otite").map(|p| p.title.as_str()),
            Some("Otite moyenne aiguë")
        );
        assert!(library.prescription_by_id("angine").is_none());
    }

    #[test]
    fn controllers_share_the_corpus_but_not_state() {
        let library = bundled();
        let mut first = library.controller();
        let second = library.controller();

        first.select_alphabetical();
        assert_eq!(second.state(), &ViewState::dashboard());
        assert_eq!(first.results(), library.results(&ViewState::alphabetical()));
    }
}
