//! Definition normalizer.
//!
//! Canonicalizes column and index definitions so that definitions differing
//! only in whitespace or keyword case compare equal. Quoted literal spans are
//! kept byte-for-byte.

use std::fmt;

use serde::Serialize;

/// Canonical form of a column or index definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedDefinition(String);

impl NormalizedDefinition {
    /// Returns the canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the definition, returning the canonical text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a definition.
///
/// Outside `'...'` and `"..."` spans, runs of whitespace become one space and
/// letters are lower-cased; leading and trailing whitespace is dropped.
#[must_use]
pub fn normalize(definition: &str) -> NormalizedDefinition {
    let mut out = String::with_capacity(definition.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;
    let mut chars = definition.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                if chars.peek() == Some(&q) {
                    out.push(q);
                    chars.next();
                } else {
                    quote = None;
                }
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if c == '\'' || c == '"' {
            quote = Some(c);
            out.push(c);
        } else {
            out.extend(c.to_lowercase());
        }
    }

    NormalizedDefinition(out)
}

/// Normalizes each entry of an index column list, keeping order.
#[must_use]
pub fn normalize_columns<S: AsRef<str>>(columns: &[S]) -> Vec<NormalizedDefinition> {
    columns.iter().map(|c| normalize(c.as_ref())).collect()
}

/// Returns true when two definitions normalize to the same text.
#[must_use]
pub fn equivalent(left: &str, right: &str) -> bool {
    normalize(left) == normalize(right)
}
