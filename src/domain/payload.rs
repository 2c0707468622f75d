//! Default row payloads.

use std::fmt;

/// Produces the payload for each newly added row.
pub trait PayloadSource {
    type Payload;

    fn next_payload(&mut self) -> Self::Payload;
}

/// Display label of a generated row, e.g. `Row 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabel {
    pub number: u32,
    pub text: String,
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Auto-incrementing row label counter.
///
/// Owned by the component that creates rows, so two trees never share a
/// sequence and tests can start from a known number.
#[derive(Debug, Clone)]
pub struct RowNumbering {
    prefix: String,
    next: u32,
}

impl Default for RowNumbering {
    fn default() -> Self {
        Self::new("Row", 0)
    }
}

impl RowNumbering {
    pub fn new(prefix: impl Into<String>, first: u32) -> Self {
        Self {
            prefix: prefix.into(),
            next: first,
        }
    }

    /// Number the next generated label will carry.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl PayloadSource for RowNumbering {
    type Payload = RowLabel;

    fn next_payload(&mut self) -> RowLabel {
        let number = self.next;
        self.next = self.next.wrapping_add(1);
        let text = if self.prefix.is_empty() {
            number.to_string()
        } else {
            format!("{} {}", self.prefix, number)
        };
        RowLabel { number, text }
    }
}
