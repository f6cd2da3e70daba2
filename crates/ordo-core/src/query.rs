//! Query engine: view state in, ordered result list out.
//!
//! Results are recomputed from the corpus on every call. The active query is chosen in
//! strict priority order:
//!
//! 1. a non-empty search term searches the whole corpus, whatever the mode;
//! 2. the alphabetical index lists the whole corpus;
//! 3. a specialty lists its own prescriptions in authored order;
//! 4. the dashboard lists nothing.
//!
//! Whole-corpus queries collapse repeated prescription ids into one [`ResultItem`] that
//! collects every specialty it was found under, then sort by title with
//! [`CollationKey`]. Specialty listings keep their curated order.

use crate::text::{contains_folded, fold, CollationKey};
use crate::view::{ViewMode, ViewState};
use ordo_corpus::{Corpus, Prescription, Specialty, SpecialtyTag};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// One row of a result list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub prescription: Arc<Prescription>,

    /// Distinct specialties the prescription was found under, first seen first.
    pub specialty_tags: Vec<SpecialtyTag>,
}

/// The query a view state resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    /// Whole-corpus search on the already folded term.
    Search(String),
    Alphabetical,
    Specialty(String),
    Dashboard,
}

impl Query {
    pub fn from_state(state: &ViewState) -> Query {
        if !state.search_term().is_empty() {
            return Query::Search(fold(state.search_term()));
        }
        match state.mode() {
            ViewMode::Alphabetical => Query::Alphabetical,
            ViewMode::Specialty(id) => Query::Specialty(id.clone()),
            ViewMode::Dashboard => Query::Dashboard,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Query::Search(_) => "search",
            Query::Alphabetical => "alphabetical",
            Query::Specialty(_) => "specialty",
            Query::Dashboard => "dashboard",
        }
    }
}

/// Compute the result list for a view state.
pub fn compute_results(corpus: &Corpus, state: &ViewState) -> Vec<ResultItem> {
    run_query(corpus, &Query::from_state(state))
}

/// Run a resolved query against the corpus.
pub fn run_query(corpus: &Corpus, query: &Query) -> Vec<ResultItem> {
    let results = match query {
        Query::Search(term) => sorted_by_title(group_by_id(
            corpus
                .occurrences()
                .filter(|(_, p)| matches_term(p, term)),
        )),
        Query::Alphabetical => sorted_by_title(group_by_id(corpus.occurrences())),
        Query::Specialty(id) => corpus
            .specialty(id)
            .map(specialty_listing)
            .unwrap_or_default(),
        Query::Dashboard => Vec::new(),
    };

    tracing::debug!(query = query.kind(), results = results.len(), "computed results");
    results
}

/// A prescription matches when the folded term occurs in its title, subtitle or any line.
fn matches_term(prescription: &Prescription, folded_term: &str) -> bool {
    contains_folded(prescription.title.as_str(), folded_term)
        || prescription
            .subtitle
            .as_deref()
            .is_some_and(|s| contains_folded(s, folded_term))
        || prescription
            .lines
            .iter()
            .any(|line| contains_folded(line.text(), folded_term))
}

/// Collapse occurrences sharing a prescription id, collecting specialty tags.
fn group_by_id<'a>(
    occurrences: impl Iterator<Item = (&'a Specialty, &'a Arc<Prescription>)>,
) -> Vec<ResultItem> {
    let mut items: Vec<ResultItem> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for (specialty, prescription) in occurrences {
        match positions.get(prescription.id.as_str()) {
            Some(&position) => {
                let tags = &mut items[position].specialty_tags;
                if !tags.iter().any(|t| t.id == specialty.id) {
                    tags.push(specialty.tag());
                }
            }
            None => {
                positions.insert(prescription.id.as_str(), items.len());
                items.push(ResultItem {
                    prescription: Arc::clone(prescription),
                    specialty_tags: vec![specialty.tag()],
                });
            }
        }
    }

    items
}

fn sorted_by_title(mut items: Vec<ResultItem>) -> Vec<ResultItem> {
    // Stable: equal titles keep first-encountered order.
    items.sort_by_cached_key(|item| CollationKey::new(item.prescription.title.as_str()));
    items
}

fn specialty_listing(specialty: &Specialty) -> Vec<ResultItem> {
    let tag = specialty.tag();
    specialty
        .prescriptions
        .iter()
        .map(|p| ResultItem {
            prescription: Arc::clone(p),
            specialty_tags: vec![tag.clone()],
        })
        .collect()
}
