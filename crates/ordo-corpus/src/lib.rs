//! Prescription corpus: authored YAML in, frozen specialty tree out.
//!
//! This crate provides the **wire models** for the authored dataset and the one-time
//! translation into domain types:
//! - specialty and prescription records (strict YAML schema)
//! - the line normalizer that turns heterogeneous raw line shapes into [`PrescriptionLine`]
//! - corpus construction, structural validation and read-only lookup
//!
//! Everything here runs once at startup. After [`Corpus::parse`] returns, the tree is
//! immutable and shared by reference.

pub mod corpus;
pub mod line;
pub mod prescription;
pub mod specialty;

// Re-export facades
pub use corpus::Corpus;
pub use line::{normalize_line, PrescriptionLine, RawLine};
pub use prescription::Prescription;
pub use specialty::{Specialty, SpecialtySummary, SpecialtyTag};

// Re-export validated primitives
pub use ordo_types::{NonEmptyText, RecordId};

/// Errors returned while building the corpus.
///
/// All of these are load-time failures: a corpus that produces one of them must not be
/// served.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("duplicate specialty id: {0}")]
    DuplicateSpecialty(String),

    #[error("duplicate prescription id '{id}' in specialty '{specialty}'")]
    DuplicatePrescription { specialty: String, id: String },
}

/// Type alias for Results that can fail with a [`CorpusError`].
pub type CorpusResult<T> = Result<T, CorpusError>;
