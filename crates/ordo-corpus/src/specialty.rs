//! Medical specialties and their curated prescription lists.

use crate::prescription::{self, Prescription, PrescriptionWire};
use crate::{CorpusError, CorpusResult};
use ordo_types::{NonEmptyText, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// Public domain-level types
// ============================================================================

/// A named category owning an ordered list of prescriptions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Specialty {
    pub id: RecordId,

    pub name: NonEmptyText,

    /// Symbolic icon key, opaque to the core.
    pub icon: String,

    /// Symbolic colour key, opaque to the core.
    pub color: String,

    /// Prescriptions in curated presentation order.
    pub prescriptions: Vec<Arc<Prescription>>,
}

impl Specialty {
    /// Dashboard card data for this specialty.
    pub fn summary(&self) -> SpecialtySummary {
        SpecialtySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
            prescription_count: self.prescriptions.len(),
        }
    }

    /// Label attached to results that came from this specialty.
    pub fn tag(&self) -> SpecialtyTag {
        SpecialtyTag {
            id: self.id.clone(),
            name: self.name.clone(),
            color: self.color.clone(),
        }
    }
}

/// Dashboard summary of a specialty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpecialtySummary {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub icon: String,
    pub color: String,
    pub prescription_count: usize,
}

/// Specialty membership shown next to a result.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SpecialtyTag {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub color: String,
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a specialty block in the corpus YAML.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct SpecialtyWire {
    pub id: String,

    pub name: String,

    pub icon: String,

    pub color: String,

    #[serde(default)]
    pub prescriptions: Vec<PrescriptionWire>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Convert a wire specialty, rejecting empty keys and duplicate prescription ids.
pub(crate) fn wire_to_domain(wire: SpecialtyWire, position: usize) -> CorpusResult<Specialty> {
    let id = RecordId::new(&wire.id).map_err(|_| {
        CorpusError::InvalidInput(format!("specialty #{position}: id cannot be empty"))
    })?;
    let name = NonEmptyText::new(&wire.name).map_err(|_| {
        CorpusError::InvalidInput(format!("specialty '{id}': name cannot be empty"))
    })?;

    let mut seen = HashSet::new();
    let mut prescriptions = Vec::with_capacity(wire.prescriptions.len());

    for (index, p) in wire.prescriptions.into_iter().enumerate() {
        let p = prescription::wire_to_domain(p, &id, index)?;
        if !seen.insert(p.id.clone()) {
            return Err(CorpusError::DuplicatePrescription {
                specialty: id.to_string(),
                id: p.id.to_string(),
            });
        }
        prescriptions.push(Arc::new(p));
    }

    Ok(Specialty {
        id,
        name,
        icon: wire.icon,
        color: wire.color,
        prescriptions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_wire(yaml: &str) -> SpecialtyWire {
        serde_yaml::from_str(yaml).expect("valid wire")
    }

    #[test]
    fn summary_counts_prescriptions() {
        let wire = parse_wire(
            r#"id: cardio
name: Cardiologie
icon: Heart
color: red
prescriptions:
  - title: HTA
  - title: Insuffisance cardiaque
"#,
        );
        let specialty = wire_to_domain(wire, 0).expect("translate");
        let summary = specialty.summary();
        assert_eq!(summary.id.as_str(), "cardio");
        assert_eq!(summary.icon, "Heart");
        assert_eq!(summary.color, "red");
        assert_eq!(summary.prescription_count, 2);
    }

    #[test]
    fn tag_carries_id_name_and_color() {
        let wire = parse_wire("id: orl\nname: Oto-Rhino-Laryngologie\nicon: Ear\ncolor: sky\n");
        let tag = wire_to_domain(wire, 0).expect("translate").tag();
        assert_eq!(tag.id.as_str(), "orl");
        assert_eq!(tag.name.as_str(), "Oto-Rhino-Laryngologie");
        assert_eq!(tag.color, "sky");
    }

    #[test]
    fn rejects_empty_id() {
        let wire = parse_wire("id: ''\nname: Cardiologie\nicon: Heart\ncolor: red\n");
        let err = wire_to_domain(wire, 3).expect_err("empty id");
        assert!(matches!(err, CorpusError::InvalidInput(msg) if msg.contains("#3")));
    }

    #[test]
    fn rejects_duplicate_prescription_ids() {
        let wire = parse_wire(
            r#"id: gastro
name: Gastro
icon: Stethoscope
color: amber
prescriptions:
  - title: Ascite
  - id: ascite
    title: Ascite réfractaire
"#,
        );
        let err = wire_to_domain(wire, 0).expect_err("duplicate id");
        match err {
            CorpusError::DuplicatePrescription { specialty, id } => {
                assert_eq!(specialty, "gastro");
                assert_eq!(id, "ascite");
            }
            other => panic!("expected DuplicatePrescription error, got {other:?}"),
        }
    }
}
