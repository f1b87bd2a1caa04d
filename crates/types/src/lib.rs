//! Validated text types shared by the CRM crates.
//!
//! Each type checks its invariant once, at construction or parsing, and exposes the cleaned
//! value as `&str` afterwards.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input was empty or only whitespace.
    #[error("text cannot be empty")]
    Empty,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Text with at least one non-whitespace character, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A structurally plausible email address, stored trimmed.
///
/// The check is deliberately shallow: one `@` with a non-empty local part, and a domain with a
/// dot that has text on both sides. Deliverability is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and `TextError::InvalidEmail` otherwise.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = NonEmptyText::new(input)?.into_inner();
        let valid = trimmed.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });
        if !valid {
            return Err(TextError::InvalidEmail(trimmed));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

macro_rules! text_type {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $ty {
            type Err = TextError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

text_type!(NonEmptyText);
text_type!(EmailAddress);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_input() {
        let text = NonEmptyText::new("  Jane Roe \n").expect("should accept padded text");
        assert_eq!(text.as_str(), "Jane Roe");
    }

    #[test]
    fn test_new_rejects_whitespace_only() {
        assert_eq!(NonEmptyText::new("   \t"), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
    }

    #[test]
    fn test_parse_and_display_use_trimmed_text() {
        let text: NonEmptyText = " Cardiology ".parse().expect("should parse");
        assert_eq!(text.to_string(), "Cardiology");
        assert_eq!("  ".parse::<NonEmptyText>(), Err(TextError::Empty));
    }

    #[test]
    fn test_email_accepts_hospital_addresses() {
        let email = EmailAddress::new(" g.house@hospital.com ").expect("should be valid");
        assert_eq!(email.as_str(), "g.house@hospital.com");
        assert_eq!(email.domain(), "hospital.com");
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        for bad in ["house", "@hospital.com", "house@", "house@hospital", "a@b@c.com", "a@.com"] {
            assert!(
                matches!(EmailAddress::new(bad), Err(TextError::InvalidEmail(_))),
                "{bad} should be rejected"
            );
        }
        assert_eq!(EmailAddress::new("  "), Err(TextError::Empty));
    }
}
