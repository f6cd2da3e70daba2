//! Prescription templates.
//!
//! Responsibilities:
//! - Define the domain-level [`Prescription`] record
//! - Define the strict wire model authored in the corpus YAML
//! - Translate wire records into domain records, normalizing every line once

use crate::line::{PrescriptionLine, RawLine};
use crate::{CorpusError, CorpusResult};
use ordo_types::{NonEmptyText, RecordId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public domain-level types
// ============================================================================

/// A titled prescription template.
///
/// Built once while the corpus loads and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Prescription {
    /// Authored id, or an id derived from the title.
    pub id: RecordId,

    pub title: NonEmptyText,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Normalized body lines in authored order.
    pub lines: Vec<PrescriptionLine>,

    /// Footer notes; empty when none were authored.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,

    /// Footer warnings; empty when none were authored.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Prescription {
    /// Body text as copied from a detail view: one line per row, kinds flattened.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(PrescriptionLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a prescription inside a specialty.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct PrescriptionWire {
    #[serde(default)]
    pub id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    /// Lines stay untyped until classification.
    #[serde(default)]
    pub lines: Vec<serde_yaml::Value>,

    #[serde(default)]
    pub notes: Vec<String>,

    #[serde(default)]
    pub warnings: Vec<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Convert a wire prescription into its frozen domain form.
///
/// `specialty_id` and `position` only feed error messages and log fields.
pub(crate) fn wire_to_domain(
    wire: PrescriptionWire,
    specialty_id: &RecordId,
    position: usize,
) -> CorpusResult<Prescription> {
    let title = NonEmptyText::new(&wire.title).map_err(|_| {
        CorpusError::InvalidInput(format!(
            "specialty '{specialty_id}', prescription #{position}: title cannot be empty"
        ))
    })?;

    let id = match wire.id {
        Some(explicit) => RecordId::new(&explicit).map_err(|_| {
            CorpusError::InvalidInput(format!(
                "specialty '{specialty_id}', prescription '{title}': id cannot be empty"
            ))
        })?,
        None => RecordId::from_title(&title),
    };

    let lines = wire
        .lines
        .iter()
        .map(|value| {
            let raw = RawLine::classify(value);
            if let RawLine::Unrecognized(repr) = &raw {
                tracing::warn!(
                    specialty = %specialty_id,
                    prescription = %id,
                    line = %repr,
                    "unrecognized line shape, keeping raw text"
                );
            }
            PrescriptionLine::from(raw)
        })
        .collect();

    let subtitle = wire.subtitle.filter(|s| !s.trim().is_empty());

    Ok(Prescription {
        id,
        title,
        subtitle,
        lines,
        notes: wire.notes,
        warnings: wire.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specialty() -> RecordId {
        RecordId::new("dermato").expect("valid id")
    }

    fn parse_wire(yaml: &str) -> PrescriptionWire {
        serde_yaml::from_str(yaml).expect("valid wire")
    }

    #[test]
    fn derives_id_when_absent() {
        let wire = parse_wire("title: Eczéma de contact aigu\n");
        let p = wire_to_domain(wire, &specialty(), 0).expect("translate");
        assert_eq!(p.id.as_str(), "ecz-ma-de-contact-aigu");
        assert!(p.lines.is_empty());
        assert!(p.subtitle.is_none());
    }

    #[test]
    fn keeps_explicit_id_and_footer() {
        let wire = parse_wire(
            r#"id: dysidrose
title: Dysidroses
subtitle: Mains
lines:
  - "-DIPROSONE pommade : 1 application/J pendant 7 jours"
notes:
  - Diagnostic différentiel avec la gale
warnings:
  - Pas sur le visage
"#,
        );
        let p = wire_to_domain(wire, &specialty(), 0).expect("translate");
        assert_eq!(p.id.as_str(), "dysidrose");
        assert_eq!(p.subtitle.as_deref(), Some("Mains"));
        assert_eq!(p.notes, vec!["Diagnostic différentiel avec la gale"]);
        assert_eq!(p.warnings, vec!["Pas sur le visage"]);
    }

    #[test]
    fn blank_subtitle_is_dropped() {
        let wire = parse_wire("title: Urticaire\nsubtitle: '  '\n");
        let p = wire_to_domain(wire, &specialty(), 0).expect("translate");
        assert!(p.subtitle.is_none());
    }

    #[test]
    fn rejects_empty_title() {
        let wire = parse_wire("title: '   '\n");
        let err = wire_to_domain(wire, &specialty(), 4).expect_err("empty title");
        match err {
            CorpusError::InvalidInput(msg) => {
                assert!(msg.contains("dermato"));
                assert!(msg.contains("#4"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_explicit_id() {
        let wire = parse_wire("id: ''\ntitle: Urticaire\n");
        let err = wire_to_domain(wire, &specialty(), 0).expect_err("empty id");
        assert!(matches!(err, CorpusError::InvalidInput(msg) if msg.contains("Urticaire")));
    }

    #[test]
    fn plain_text_joins_all_line_kinds() {
        let wire = parse_wire(
            r#"title: Helicobacter pylori
lines:
  - { drug: AMOXIL 1G cp, dosage: 1cp*2/j }
  - { text: 'PUIS :', isHeader: true }
  - { type: note, content: Contrôle à 4 semaines }
"#,
        );
        let p = wire_to_domain(wire, &specialty(), 0).expect("translate");
        assert_eq!(
            p.plain_text(),
            "AMOXIL 1G cp: 1cp*2/j\nPUIS :\nContrôle à 4 semaines"
        );
    }
}
