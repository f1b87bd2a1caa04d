//! Internal implementation of the identifier generators.

use crate::{IdError, IdResult};
use chrono::{Datelike, Utc};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// How new identifiers are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IdScheme {
    /// Prefix plus a monotonically increasing, zero-padded counter.
    #[default]
    Sequential,
    /// Prefix plus a random v4 UUID in simple (unhyphenated) form.
    Uuid,
}

impl FromStr for IdScheme {
    type Err = IdError;

    /// Parses `sequential` or `uuid`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            other => Err(IdError::InvalidInput(format!(
                "unknown id scheme '{}', expected 'sequential' or 'uuid'",
                other
            ))),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Uuid => f.write_str("uuid"),
        }
    }
}

/// Shape of the identifiers of one entity collection.
///
/// Rendered as `<prefix>[<year>-]<counter>` where the counter is zero-padded to `width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdPattern {
    /// Literal prefix, including any trailing separator (`"P-"`, `"S"`).
    pub prefix: &'static str,
    /// Minimum number of counter digits.
    pub width: usize,
    /// Whether the current year is inserted after the prefix.
    pub year_segment: bool,
    /// First counter value handed out when nothing has been observed.
    pub start: u64,
}

impl IdPattern {
    pub const fn new(prefix: &'static str, width: usize) -> Self {
        Self {
            prefix,
            width,
            year_segment: false,
            start: 1,
        }
    }

    pub const fn with_year_segment(mut self) -> Self {
        self.year_segment = true;
        self
    }

    pub const fn starting_at(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    /// Extracts the trailing counter of an identifier that carries this pattern's prefix.
    ///
    /// Returns `None` for identifiers with a different prefix or without trailing digits.
    pub fn counter_of(&self, id: &str) -> Option<u64> {
        let rest = id.strip_prefix(self.prefix)?;
        let digits_start = rest
            .rfind(|c: char| !c.is_ascii_digit())
            .map_or(0, |i| i + 1);
        let digits = &rest[digits_start..];
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }
}

/// Per-collection identifier generator.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    pattern: IdPattern,
    scheme: IdScheme,
    next: u64,
    year: Option<i32>,
}

impl IdGenerator {
    pub fn new(pattern: IdPattern, scheme: IdScheme) -> Self {
        Self {
            next: pattern.start,
            pattern,
            scheme,
            year: None,
        }
    }

    /// Pins the year used by patterns with a year segment instead of the current UTC year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn pattern(&self) -> IdPattern {
        self.pattern
    }

    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    /// Advances the counter past an identifier that already exists in the collection.
    pub fn observe(&mut self, id: &str) {
        if let Some(counter) = self.pattern.counter_of(id) {
            self.next = self.next.max(counter.saturating_add(1));
        }
    }

    /// Produces the next identifier for which `is_taken` returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Exhausted`] if the sequential counter would overflow.
    pub fn next_id(&mut self, is_taken: impl Fn(&str) -> bool) -> IdResult<String> {
        loop {
            let candidate = match self.scheme {
                IdScheme::Sequential => {
                    let counter = self.next;
                    self.next = counter
                        .checked_add(1)
                        .ok_or(IdError::Exhausted(self.pattern.prefix))?;
                    self.render(counter)
                }
                IdScheme::Uuid => format!("{}{}", self.pattern.prefix, Uuid::new_v4().simple()),
            };

            if !is_taken(&candidate) {
                return Ok(candidate);
            }
        }
    }

    fn render(&self, counter: u64) -> String {
        let width = self.pattern.width;
        if self.pattern.year_segment {
            let year = self.year.unwrap_or_else(|| Utc::now().year());
            format!("{}{}-{:0width$}", self.pattern.prefix, year, counter)
        } else {
            format!("{}{:0width$}", self.pattern.prefix, counter)
        }
    }
}
