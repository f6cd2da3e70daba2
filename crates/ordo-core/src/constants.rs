//! Constants used throughout the Ordo core crate.
//!
//! Paths, environment variable names and the fixed French labels derived from view
//! state live here so the renderer and the tests agree on them.

/// Corpus file looked up relative to the working directory and the crate ancestors.
pub const DEFAULT_CORPUS_FILE: &str = "data/specialties.yaml";

/// Environment variable overriding the corpus location.
pub const CORPUS_PATH_ENV: &str = "ORDO_CORPUS_PATH";

/// List heading prefix while a search term is active.
pub const SEARCH_HEADING_PREFIX: &str = "Résultats pour";

/// List heading of the global alphabetical index.
pub const ALPHABETICAL_HEADING: &str = "Index Alphabétique (A-Z)";

/// List heading when the selected specialty cannot be resolved.
pub const SPECIALTY_HEADING_FALLBACK: &str = "Spécialité";

/// Detail breadcrumb while searching.
pub const SEARCH_CONTEXT: &str = "Recherche";

/// Detail breadcrumb in the alphabetical index.
pub const ALPHABETICAL_CONTEXT: &str = "Index Global";

/// Noun used in result counts.
pub const RESULT_NOUN: &str = "ordonnance";
