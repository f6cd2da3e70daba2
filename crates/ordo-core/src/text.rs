//! Accent folding and French-style collation.
//!
//! Search compares folded text: lowercase, canonical decomposition, combining marks
//! removed, and the `œ`/`æ`/`ß` ligatures spelled out. Sorting uses a three-level key
//! modelled on the French collation tables: base letters first, then accents, then
//! case, so accented titles sit beside their unaccented neighbours.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for accent- and case-insensitive comparison.
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase).nfd() {
        if is_combining_mark(c) {
            continue;
        }
        push_expanded(&mut folded, c);
    }
    folded
}

/// True when `folded_needle` occurs in the folded form of `haystack`.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    fold(haystack).contains(folded_needle)
}

/// Primary weight class. Spaces and punctuation sort before digits, digits before letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum CharClass {
    Symbol,
    Digit,
    Letter,
}

/// Sort key for locale-aware title ordering.
///
/// Levels compare in order: base characters, accents attached to each base character,
/// case of each base character, and finally the raw text so that the order is total.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(CharClass, char)>,
    secondary: Vec<Vec<char>>,
    tertiary: Vec<bool>,
    raw: String,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let mut primary = Vec::with_capacity(text.len());
        let mut secondary: Vec<Vec<char>> = Vec::with_capacity(text.len());
        let mut tertiary = Vec::with_capacity(text.len());

        for c in text.nfd() {
            if is_combining_mark(c) {
                // Marks attach to the preceding base character; a leading mark has none.
                if let Some(marks) = secondary.last_mut() {
                    marks.push(c);
                }
                continue;
            }

            let upper = c.is_uppercase();
            let mut base = String::new();
            for lower in c.to_lowercase() {
                push_expanded(&mut base, lower);
            }

            for b in base.chars() {
                primary.push((classify(b), b));
                secondary.push(Vec::new());
                tertiary.push(upper);
            }
        }

        Self {
            primary,
            secondary,
            tertiary,
            raw: text.to_owned(),
        }
    }
}

fn classify(c: char) -> CharClass {
    if c.is_alphabetic() {
        CharClass::Letter
    } else if c.is_numeric() {
        CharClass::Digit
    } else {
        CharClass::Symbol
    }
}

fn push_expanded(out: &mut String, c: char) {
    match c {
        'œ' => out.push_str("oe"),
        'æ' => out.push_str("ae"),
        'ß' => out.push_str("ss"),
        other => out.push(other),
    }
}
