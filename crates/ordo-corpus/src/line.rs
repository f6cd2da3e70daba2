//! Prescription lines and the raw-line normalizer.
//!
//! Authored datasets describe a line in several overlapping shapes: bare strings,
//! flagged objects (`isHeader`, `isNote`), `type`/`content` pairs, and drug or name
//! records with dosage details. Normalization is a two-step parse run once at load:
//!
//! 1. [`RawLine::classify`] sniffs a YAML value into a closed set of recognized shapes,
//!    applying a fixed precedence because shapes can overlap.
//! 2. `PrescriptionLine::from(RawLine)` collapses the shape into one of three kinds.
//!
//! The normalizer is total. Values matching no shape become an instruction carrying
//! their JSON text so that authored content never disappears.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

// ============================================================================
// Public domain-level types
// ============================================================================

/// One normalized line of a prescription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrescriptionLine {
    /// A drug, dosage or care instruction.
    Instruction { text: String },
    /// A section header inside the prescription body (for example `PUIS :`).
    Header { text: String },
    /// An advisory note rendered inline with the lines.
    Note { text: String },
}

impl PrescriptionLine {
    /// Text of the line, whatever its kind.
    pub fn text(&self) -> &str {
        match self {
            PrescriptionLine::Instruction { text }
            | PrescriptionLine::Header { text }
            | PrescriptionLine::Note { text } => text,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, PrescriptionLine::Header { .. })
    }

    pub fn is_note(&self) -> bool {
        matches!(self, PrescriptionLine::Note { .. })
    }
}

/// Recognized shapes of an authored line, in precedence order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawLine {
    /// A bare string.
    Text(String),
    /// `{isHeader: true, text}`
    FlaggedHeader { text: String },
    /// `{type: header, content}`
    TaggedHeader { content: String },
    /// `{type: note, content}`
    TaggedNote { content: String },
    /// `{isNote: true, text}`
    FlaggedNote { text: String },
    /// `{type: drug | instruction, content}`
    TaggedInstruction { content: String },
    /// `{drug, dosage?, duration?}`
    Drug {
        drug: String,
        dosage: Option<String>,
        duration: Option<String>,
    },
    /// `{name, dosage?, note?, duration?}`
    Named {
        name: String,
        dosage: Option<String>,
        note: Option<String>,
        duration: Option<String>,
    },
    /// `{text}` with no other recognized tag.
    Normalized { text: String },
    /// Anything else, kept as its JSON text.
    Unrecognized(String),
}

impl RawLine {
    /// Classify an authored YAML value. First matching shape wins.
    pub fn classify(value: &Value) -> RawLine {
        let map = match value {
            Value::String(text) => return RawLine::Text(text.clone()),
            Value::Mapping(map) => map,
            other => return RawLine::Unrecognized(render_value(other)),
        };

        let line_type = map.get("type").and_then(Value::as_str);

        if is_truthy(map.get("isHeader")) {
            return RawLine::FlaggedHeader {
                text: text_of(map.get("text")),
            };
        }
        if line_type == Some("header") {
            return RawLine::TaggedHeader {
                content: text_of(map.get("content")),
            };
        }
        if line_type == Some("note") {
            return RawLine::TaggedNote {
                content: text_of(map.get("content")),
            };
        }
        if is_truthy(map.get("isNote")) {
            return RawLine::FlaggedNote {
                text: text_of(map.get("text")),
            };
        }
        if matches!(line_type, Some("drug") | Some("instruction")) {
            return RawLine::TaggedInstruction {
                content: text_of(map.get("content")),
            };
        }
        if is_truthy(map.get("drug")) {
            return RawLine::Drug {
                drug: text_of(map.get("drug")),
                dosage: optional_text(map, "dosage"),
                duration: optional_text(map, "duration"),
            };
        }
        if is_truthy(map.get("name")) {
            return RawLine::Named {
                name: text_of(map.get("name")),
                dosage: optional_text(map, "dosage"),
                note: optional_text(map, "note"),
                duration: optional_text(map, "duration"),
            };
        }
        if is_truthy(map.get("text")) {
            return RawLine::Normalized {
                text: text_of(map.get("text")),
            };
        }

        RawLine::Unrecognized(render_value(value))
    }
}

impl From<RawLine> for PrescriptionLine {
    fn from(raw: RawLine) -> Self {
        match raw {
            RawLine::Text(text)
            | RawLine::Normalized { text }
            | RawLine::Unrecognized(text)
            | RawLine::TaggedInstruction { content: text } => PrescriptionLine::Instruction { text },
            RawLine::FlaggedHeader { text } | RawLine::TaggedHeader { content: text } => {
                PrescriptionLine::Header { text }
            }
            RawLine::TaggedNote { content: text } | RawLine::FlaggedNote { text } => {
                PrescriptionLine::Note { text }
            }
            RawLine::Drug {
                drug,
                dosage,
                duration,
            } => {
                let mut text = drug;
                append_dosage(&mut text, dosage);
                append_parenthetical(&mut text, duration);
                PrescriptionLine::Instruction { text }
            }
            RawLine::Named {
                name,
                dosage,
                note,
                duration,
            } => {
                let mut text = name;
                append_dosage(&mut text, dosage);
                append_parenthetical(&mut text, note);
                append_parenthetical(&mut text, duration);
                PrescriptionLine::Instruction { text }
            }
        }
    }
}

/// Normalize one authored line. Never fails.
pub fn normalize_line(value: &Value) -> PrescriptionLine {
    RawLine::classify(value).into()
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Authored flags follow loose truthiness: `true`, non-zero numbers, non-empty strings
/// and any collection count as set.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Sequence(_)) | Some(Value::Mapping(_)) => true,
        Some(Value::Tagged(tagged)) => is_truthy(Some(&tagged.value)),
    }
}

/// Text of a field; missing or null fields read as empty.
fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => render_value(other),
    }
}

/// An optional detail is present only when it carries a truthy value.
fn optional_text(map: &Mapping, key: &str) -> Option<String> {
    let value = map.get(key);
    is_truthy(value).then(|| text_of(value))
}

fn append_dosage(text: &mut String, dosage: Option<String>) {
    if let Some(dosage) = dosage {
        text.push_str(": ");
        text.push_str(&dosage);
    }
}

fn append_parenthetical(text: &mut String, detail: Option<String>) {
    if let Some(detail) = detail {
        text.push_str(" (");
        text.push_str(&detail);
        text.push(')');
    }
}

fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}
