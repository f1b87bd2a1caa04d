//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store. Nothing in
//! this crate reads environment variables while handling a call; the binary reads them and hands
//! the raw values to the `*_from_env_value` helpers below.

use crate::{CrmError, CrmResult};
use medcrm_ids::IdScheme;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    seed_demo_data: bool,
    id_scheme: IdScheme,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(true, IdScheme::Sequential)
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(seed_demo_data: bool, id_scheme: IdScheme) -> Self {
        Self {
            seed_demo_data,
            id_scheme,
        }
    }

    /// Whether a freshly created store is populated with the demo data set.
    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data
    }

    /// Scheme used to generate identifiers for new entities.
    pub fn id_scheme(&self) -> IdScheme {
        self.id_scheme
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a boolean flag from an optional environment value.
///
/// Accepts `1/0`, `true/false`, `yes/no` and `on/off` (any case). `None` or a blank value
/// yields `default`.
pub fn flag_from_env_value(value: Option<String>, default: bool) -> CrmResult<bool> {
    let Some(value) = non_blank(value) else {
        return Ok(default);
    };

    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CrmError::InvalidInput(format!(
            "expected a boolean flag, got '{}'",
            other
        ))),
    }
}

/// Parse the identifier scheme from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`IdScheme::Sequential`].
pub fn id_scheme_from_env_value(value: Option<String>) -> CrmResult<IdScheme> {
    let parsed = non_blank(value).map(|v| v.parse::<IdScheme>()).transpose()?;
    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults_when_unset_or_blank() {
        assert!(flag_from_env_value(None, true).unwrap());
        assert!(!flag_from_env_value(Some("   ".into()), false).unwrap());
    }

    #[test]
    fn test_flag_parses_common_spellings() {
        assert!(flag_from_env_value(Some("YES".into()), false).unwrap());
        assert!(!flag_from_env_value(Some(" off ".into()), true).unwrap());
        assert!(matches!(
            flag_from_env_value(Some("maybe".into()), true),
            Err(CrmError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_id_scheme_from_env_value() {
        assert_eq!(id_scheme_from_env_value(None).unwrap(), IdScheme::Sequential);
        assert_eq!(
            id_scheme_from_env_value(Some("uuid".into())).unwrap(),
            IdScheme::Uuid
        );
        assert!(matches!(
            id_scheme_from_env_value(Some("snowflake".into())),
            Err(CrmError::Id(_))
        ));
    }

    #[test]
    fn test_default_config_seeds_with_sequential_ids() {
        let cfg = CoreConfig::default();
        assert!(cfg.seed_demo_data());
        assert_eq!(cfg.id_scheme(), IdScheme::Sequential);
    }
}
