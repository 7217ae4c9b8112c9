//! Runner configuration from environment variables.
//!
//! - `BLOCKFALL_SEED`: piece sequence seed (default: random)
//! - `BLOCKFALL_TICK_MS`: periodic advance interval (default: 1000)
//! - `BLOCKFALL_LEVEL_SPEEDUP`: set to "1" or "true" to shorten the interval per level
//!
//! Unparseable values fall back to the defaults.

use blockfall_core::SessionConfig;
use blockfall_types::INITIAL_SPEED_MS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub seed: u32,
    pub tick_interval_ms: u32,
    pub level_speedup: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            tick_interval_ms: INITIAL_SPEED_MS,
            level_speedup: false,
        }
    }
}

impl RunConfig {
    /// Create from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (the environment, a map in tests, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(rand::random);

        let tick_interval_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(INITIAL_SPEED_MS);

        let level_speedup = lookup("BLOCKFALL_LEVEL_SPEEDUP")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            seed,
            tick_interval_ms,
            level_speedup,
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            tick_interval_ms: self.tick_interval_ms,
            level_speedup: self.level_speedup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = RunConfig::from_lookup(lookup(&[]));
        assert_eq!(config.tick_interval_ms, INITIAL_SPEED_MS);
        assert!(!config.level_speedup);
        assert_eq!(config.session(), SessionConfig::default());
    }

    #[test]
    fn reads_values() {
        let config = RunConfig::from_lookup(lookup(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_TICK_MS", " 250 "),
            ("BLOCKFALL_LEVEL_SPEEDUP", "TRUE"),
        ]));
        assert_eq!(config.seed, 42);
        assert_eq!(config.tick_interval_ms, 250);
        assert!(config.level_speedup);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = RunConfig::from_lookup(lookup(&[
            ("BLOCKFALL_TICK_MS", "0"),
            ("BLOCKFALL_LEVEL_SPEEDUP", "maybe"),
        ]));
        assert_eq!(config.tick_interval_ms, INITIAL_SPEED_MS);
        assert!(!config.level_speedup);

        let config = RunConfig::from_lookup(lookup(&[("BLOCKFALL_TICK_MS", "fast")]));
        assert_eq!(config.tick_interval_ms, INITIAL_SPEED_MS);
    }
}
