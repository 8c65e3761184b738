//! crates/sink/src/config.rs
//! Per-level enablement configuration for the enablement filter.

use thiserror::Error;

use crate::registry::LogLevel;

/// Selects the levels a [`LevelEnablement`] update applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LevelSelector {
    /// A single level.
    Level(LogLevel),
    /// Every level.
    All,
}

impl From<LogLevel> for LevelSelector {
    fn from(level: LogLevel) -> Self {
        Self::Level(level)
    }
}

/// Errors produced while parsing enablement tokens.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TokenError {
    /// The token was empty.
    #[error("empty level token")]
    Empty,
    /// The level name is not one of the five severity levels or `all`.
    #[error("unknown level: {0}")]
    UnknownLevel(String),
    /// The trailing switch was neither `0` nor `1`.
    #[error("invalid switch in level token: {0}")]
    InvalidSwitch(String),
}

/// Enabled flag for each severity level.
///
/// Every level starts enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelEnablement {
    /// `log` enabled.
    pub log: bool,
    /// `info` enabled.
    pub info: bool,
    /// `warn` enabled.
    pub warn: bool,
    /// `debug` enabled.
    pub debug: bool,
    /// `error` enabled.
    pub error: bool,
}

impl Default for LevelEnablement {
    fn default() -> Self {
        Self::all(true)
    }
}

impl LevelEnablement {
    /// Creates a configuration with every level set to `enabled`.
    #[must_use]
    pub const fn all(enabled: bool) -> Self {
        Self {
            log: enabled,
            info: enabled,
            warn: enabled,
            debug: enabled,
            error: enabled,
        }
    }

    /// Get the flag for a specific level.
    #[must_use]
    pub const fn get(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Log => self.log,
            LogLevel::Info => self.info,
            LogLevel::Warn => self.warn,
            LogLevel::Debug => self.debug,
            LogLevel::Error => self.error,
        }
    }

    /// Set the flag for a specific level.
    pub fn set(&mut self, level: LogLevel, enabled: bool) {
        match level {
            LogLevel::Log => self.log = enabled,
            LogLevel::Info => self.info = enabled,
            LogLevel::Warn => self.warn = enabled,
            LogLevel::Debug => self.debug = enabled,
            LogLevel::Error => self.error = enabled,
        }
    }

    /// Set every level to `enabled`.
    pub fn set_all(&mut self, enabled: bool) {
        *self = Self::all(enabled);
    }

    /// Apply an update to the selected levels.
    pub fn apply(&mut self, selector: LevelSelector, enabled: bool) {
        match selector {
            LevelSelector::Level(level) => self.set(level, enabled),
            LevelSelector::All => self.set_all(enabled),
        }
    }

    /// Apply a single level token (e.g., "warn0", "debug", "all1").
    ///
    /// A bare name enables the level; a trailing `0` disables it and a
    /// trailing `1` enables it.
    pub fn apply_token(&mut self, token: &str) -> Result<(), TokenError> {
        let (selector, enabled) = parse_level_token(token)?;
        self.apply(selector, enabled);
        Ok(())
    }

    /// Build a configuration from a comma separated token list, applied left
    /// to right on top of the defaults.
    pub fn from_tokens(list: &str) -> Result<Self, TokenError> {
        let mut config = Self::default();
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            config.apply_token(token)?;
        }
        Ok(config)
    }
}

/// Parse a level token like "warn0" into (Warn, false) or "info" into (Info, true).
fn parse_level_token(token: &str) -> Result<(LevelSelector, bool), TokenError> {
    if token.is_empty() {
        return Err(TokenError::Empty);
    }

    let digit_start = token.find(|c: char| c.is_ascii_digit());
    let (name, enabled) = match digit_start {
        Some(pos) => {
            let enabled = match &token[pos..] {
                "0" => false,
                "1" => true,
                _ => return Err(TokenError::InvalidSwitch(token.to_string())),
            };
            (&token[..pos], enabled)
        }
        None => (token, true),
    };

    let selector = if name == "all" {
        LevelSelector::All
    } else {
        LevelSelector::Level(
            name.parse::<LogLevel>()
                .map_err(|_| TokenError::UnknownLevel(name.to_string()))?,
        )
    };
    Ok((selector, enabled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_enabled_by_default() {
        let config = LevelEnablement::default();
        for level in LogLevel::ALL {
            assert!(config.get(level));
        }
    }

    #[test]
    fn set_touches_only_one_level() {
        let mut config = LevelEnablement::default();
        config.set(LogLevel::Warn, false);
        assert!(!config.warn);
        assert!(config.log && config.info && config.debug && config.error);
    }

    #[test]
    fn all_selector_sets_every_level() {
        let mut config = LevelEnablement::default();
        config.apply(LevelSelector::All, false);
        assert_eq!(config, LevelEnablement::all(false));
        config.apply(LogLevel::Error.into(), true);
        assert!(config.error);
        assert!(!config.log);
    }

    #[test]
    fn test_parse_level_token() {
        assert_eq!(
            parse_level_token("warn0"),
            Ok((LevelSelector::Level(LogLevel::Warn), false))
        );
        assert_eq!(
            parse_level_token("info"),
            Ok((LevelSelector::Level(LogLevel::Info), true))
        );
        assert_eq!(parse_level_token("all1"), Ok((LevelSelector::All, true)));
        assert_eq!(parse_level_token(""), Err(TokenError::Empty));
        assert_eq!(
            parse_level_token("warn2"),
            Err(TokenError::InvalidSwitch("warn2".to_string()))
        );
        assert_eq!(
            parse_level_token("count0"),
            Err(TokenError::UnknownLevel("count".to_string()))
        );
    }

    #[test]
    fn from_tokens_applies_left_to_right() {
        let config = LevelEnablement::from_tokens("all0, error, warn1").unwrap();
        assert!(config.error);
        assert!(config.warn);
        assert!(!config.log);
        assert!(!config.info);
        assert!(!config.debug);
    }

    #[test]
    fn from_tokens_stops_at_first_bad_token() {
        let err = LevelEnablement::from_tokens("log0,verbose").unwrap_err();
        assert_eq!(err, TokenError::UnknownLevel("verbose".to_string()));
        assert_eq!(err.to_string(), "unknown level: verbose");
    }

    #[test]
    fn empty_list_is_default() {
        assert_eq!(
            LevelEnablement::from_tokens("").unwrap(),
            LevelEnablement::default()
        );
    }
}
