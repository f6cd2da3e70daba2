//! The frozen specialty tree.
//!
//! A [`Corpus`] is parsed once from YAML, validated, and then shared read-only for the
//! lifetime of the process. Lookups are linear scans: the dataset holds a few dozen
//! specialties and a few hundred prescriptions.

use crate::prescription::Prescription;
use crate::specialty::{self, Specialty, SpecialtySummary, SpecialtyWire};
use crate::{CorpusError, CorpusResult};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Ordered, immutable collection of specialties.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    specialties: Vec<Specialty>,
}

impl Corpus {
    /// Parse a corpus from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path"
    /// (e.g. `specialties[2].prescriptions[0].title`) to the failing field when the YAML
    /// does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError`] if:
    /// - the YAML does not match the schema (unknown keys, wrong types, missing fields),
    /// - a specialty id/name or a prescription title/explicit id is empty,
    /// - two specialties share an id,
    /// - two prescriptions of the same specialty share an id.
    pub fn parse(yaml_text: &str) -> CorpusResult<Corpus> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, CorpusWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(CorpusError::Translation(format!(
                    "Corpus schema mismatch at {path}: {source}"
                )));
            }
        };

        let specialties = wire
            .specialties
            .into_iter()
            .enumerate()
            .map(|(position, s)| specialty::wire_to_domain(s, position))
            .collect::<CorpusResult<Vec<_>>>()?;

        let corpus = Corpus::from_specialties(specialties)?;
        tracing::info!(
            specialties = corpus.specialties.len(),
            prescriptions = corpus.prescription_count(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Read and parse a corpus file.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Io`] if the file cannot be read, otherwise the errors of
    /// [`Corpus::parse`].
    pub fn load(path: &Path) -> CorpusResult<Corpus> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "parsing corpus file");
        Corpus::parse(&text)
    }

    /// Assemble a corpus from already-built specialties.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::DuplicateSpecialty`] if two specialties share an id.
    pub fn from_specialties(specialties: Vec<Specialty>) -> CorpusResult<Corpus> {
        {
            let mut seen = HashSet::new();
            for s in &specialties {
                if !seen.insert(s.id.as_str()) {
                    return Err(CorpusError::DuplicateSpecialty(s.id.to_string()));
                }
            }
        }
        Ok(Corpus { specialties })
    }

    /// Specialties in authored order.
    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn specialty(&self, id: &str) -> Option<&Specialty> {
        self.specialties.iter().find(|s| s.id.as_str() == id)
    }

    /// First prescription with this id, in corpus order.
    pub fn prescription(&self, id: &str) -> Option<&Arc<Prescription>> {
        self.occurrences()
            .map(|(_, p)| p)
            .find(|p| p.id.as_str() == id)
    }

    /// Every (specialty, prescription) pair in corpus order, duplicates included.
    pub fn occurrences(&self) -> impl Iterator<Item = (&Specialty, &Arc<Prescription>)> + '_ {
        self.specialties
            .iter()
            .flat_map(|s| s.prescriptions.iter().map(move |p| (s, p)))
    }

    /// Number of prescription entries across all specialties, duplicates included.
    pub fn prescription_count(&self) -> usize {
        self.specialties.iter().map(|s| s.prescriptions.len()).sum()
    }

    pub fn summaries(&self) -> Vec<SpecialtySummary> {
        self.specialties.iter().map(Specialty::summary).collect()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Root of the corpus YAML document.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct CorpusWire {
    pub specialties: Vec<SpecialtyWire>,
}
