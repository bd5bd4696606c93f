//! Store configuration with sensible defaults.
//!
//! Operational parameters of the profile store are centralized here.
//! Every value has a documented default.

use serde::{Deserialize, Serialize};

use crate::{KeyfoldError, Result};

/// Profile store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Capacity of the wallet created/updated broadcast channel.
    /// Slow subscribers that fall more than this many events behind
    /// observe a lag, not a store failure.
    pub event_capacity: usize,

    /// Wordlist language tag of the user's UI language, used as the
    /// default validation hint for recovery-phrase import when the
    /// caller supplies none. `None` means the default ("english").
    pub wordlist_language: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            event_capacity: 16,
            wordlist_language: None,
        }
    }
}

impl StoreConfig {
    /// Validates all configuration values.
    ///
    /// Returns an error if any value is outside its acceptable range.
    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(KeyfoldError::ConfigError {
                reason: "event_capacity must be greater than 0".into(),
            });
        }

        if let Some(tag) = &self.wordlist_language {
            if tag.is_empty() {
                return Err(KeyfoldError::ConfigError {
                    reason: "wordlist_language must not be empty when set".into(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_values() {
        let config = StoreConfig::default();
        assert_eq!(config.event_capacity, 16);
        assert!(config.wordlist_language.is_none());
    }

    #[test]
    fn zero_event_capacity_rejected() {
        let config = StoreConfig {
            event_capacity: 0,
            ..StoreConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_language_tag_rejected() {
        let config = StoreConfig {
            wordlist_language: Some(String::new()),
            ..StoreConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_language_tag_accepted() {
        let config = StoreConfig {
            wordlist_language: Some("french".into()),
            ..StoreConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
