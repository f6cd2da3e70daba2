//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! [`Library`](crate::Library). Environment variables are read by the binary only; the
//! helpers here take already-read values so they stay testable.

use crate::constants::DEFAULT_CORPUS_FILE;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    corpus_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `corpus_path` is not an existing file.
    pub fn new(corpus_path: PathBuf) -> CoreResult<Self> {
        if !corpus_path.is_file() {
            return Err(CoreError::InvalidInput(format!(
                "corpus file not found: {}",
                corpus_path.display()
            )));
        }
        Ok(Self { corpus_path })
    }

    pub fn corpus_path(&self) -> &Path {
        &self.corpus_path
    }
}

/// Resolve the corpus file without reading environment variables.
///
/// If `override_path` is provided it must be an existing file. Otherwise this looks for
/// `data/specialties.yaml` relative to the current working directory and then walks up
/// from `CARGO_MANIFEST_DIR`.
pub fn resolve_corpus_path(override_path: Option<PathBuf>) -> CoreResult<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path);
        }
        return Err(CoreError::InvalidInput(format!(
            "corpus override is not a file: {}",
            path.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_CORPUS_FILE);
    if cwd_relative.is_file() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_CORPUS_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(CoreError::InvalidInput(format!(
        "could not locate {DEFAULT_CORPUS_FILE}"
    )))
}

/// Interpret an optional environment value as a corpus path.
///
/// `None` and empty/whitespace values mean "not set".
pub fn corpus_path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn override_file_is_used() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("corpus.yaml");
        fs::write(&file, "specialties: []\n").expect("write corpus");

        let resolved = resolve_corpus_path(Some(file.clone())).expect("resolve override");
        assert_eq!(resolved, file);
    }

    #[test]
    fn override_directory_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let err = resolve_corpus_path(Some(dir.path().to_path_buf())).expect_err("dir");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("not a file")));
    }

    #[test]
    fn default_lookup_finds_bundled_corpus() {
        let resolved = resolve_corpus_path(None).expect("bundled corpus");
        assert!(resolved.ends_with(DEFAULT_CORPUS_FILE));
    }

    #[test]
    fn config_requires_existing_file() {
        let dir = TempDir::new().expect("tempdir");
        let err = CoreConfig::new(dir.path().join("missing.yaml")).expect_err("missing");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn env_value_blank_means_unset() {
        assert_eq!(corpus_path_from_env_value(None), None);
        assert_eq!(corpus_path_from_env_value(Some("  ".into())), None);
        assert_eq!(
            corpus_path_from_env_value(Some(" /srv/ordo.yaml ".into())),
            Some(PathBuf::from("/srv/ordo.yaml"))
        );
    }
}
