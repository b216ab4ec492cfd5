//! Search configuration.
//!
//! One engine covers every playing style; the knobs are which leaf policy
//! runs at the horizon, whether the transposition cache is used, how draws
//! are scored and how much time a move may take. Configurations can be built
//! in code, taken from a preset, or parsed from TOML.

use crate::error::ConfigError;
use crate::search::TimeCeiling;
use crate::types::MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// What the search does once the depth budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafPolicy {
    /// Resolve pending captures with a quiescence search
    #[default]
    Captures,
    /// Evaluate statically and clamp the score into the window
    StaticClamp,
}

/// How drawn interior nodes are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// A draw is worth exactly zero
    #[default]
    Zero,
    /// A drawn node scores `-SCORE_DRAW_AVOID` for its own side to move, so
    /// the side that moves into a draw sees `+SCORE_DRAW_AVOID` and will
    /// seek repetitions it can complete
    Avoid,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub leaf: LeafPolicy,
    /// Use the transposition cache
    pub transposition: bool,
    /// Transposition cache size in MB
    pub tt_size_mb: usize,
    pub draw_policy: DrawPolicy,
    pub time: TimeCeiling,
    /// Deepest iteration the driver will start
    pub max_depth: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            leaf: LeafPolicy::Captures,
            transposition: true,
            tt_size_mb: 16,
            draw_policy: DrawPolicy::Zero,
            time: TimeCeiling::default(),
            max_depth: MAX_DEPTH,
        }
    }
}

impl SearchConfig {
    /// Cache enabled, `DrawPolicy::Avoid` scoring (prefers completing a
    /// repetition), clock-proportional ceiling
    pub fn cached() -> Self {
        Self {
            transposition: true,
            draw_policy: DrawPolicy::Avoid,
            time: TimeCeiling::Proportional {
                min_millis: 400,
                max_millis: 400,
            },
            ..Self::default()
        }
    }

    /// Capture quiescence without the cache, fixed 300 ms ceiling
    pub fn quiescent() -> Self {
        Self {
            transposition: false,
            time: TimeCeiling::Fixed { millis: 300 },
            ..Self::default()
        }
    }

    /// Static leaf evaluation without the cache, fixed 400 ms ceiling
    pub fn baseline() -> Self {
        Self {
            leaf: LeafPolicy::StaticClamp,
            transposition: false,
            time: TimeCeiling::Fixed { millis: 400 },
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DEPTH).contains(&self.max_depth) {
            return Err(ConfigError::Invalid(format!(
                "max_depth must be within 1..={}, got {}",
                MAX_DEPTH, self.max_depth
            )));
        }
        if self.transposition && self.tt_size_mb == 0 {
            return Err(ConfigError::Invalid("tt_size_mb must be positive".to_string()));
        }
        if let TimeCeiling::Proportional {
            min_millis,
            max_millis,
        } = self.time
        {
            if min_millis > max_millis {
                return Err(ConfigError::Invalid(format!(
                    "min_millis ({}) exceeds max_millis ({})",
                    min_millis, max_millis
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            SearchConfig::default(),
            SearchConfig::cached(),
            SearchConfig::quiescent(),
            SearchConfig::baseline(),
        ] {
            assert!(config.validate().is_ok(), "{:?}", config);
        }
        assert_eq!(SearchConfig::baseline().leaf, LeafPolicy::StaticClamp);
        assert_eq!(SearchConfig::cached().draw_policy, DrawPolicy::Avoid);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = SearchConfig::from_toml_str(
            r#"
            leaf = "static_clamp"
            draw_policy = "avoid"

            [time]
            kind = "proportional"
            min_millis = 50
            max_millis = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.leaf, LeafPolicy::StaticClamp);
        assert_eq!(config.draw_policy, DrawPolicy::Avoid);
        assert!(config.transposition);
        assert_eq!(
            config.time,
            TimeCeiling::Proportional {
                min_millis: 50,
                max_millis: 250
            }
        );
        assert_eq!(config.max_depth, MAX_DEPTH);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = SearchConfig::from_toml_str("quiescence = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_inverted_proportional_bounds() {
        let err = SearchConfig::from_toml_str(
            r#"
            [time]
            kind = "proportional"
            min_millis = 500
            max_millis = 100
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_depth() {
        let err = SearchConfig::from_toml_str("max_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
