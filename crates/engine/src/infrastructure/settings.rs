//! Application settings read from environment variables
//!
//! Environment I/O stays here; the domain only knows `StoryTiming`.
//!
//! # Environment Variables
//!
//! - `GLIMPSE_STORY_DURATION_MS` - How long each story is shown (default: 5000)
//! - `GLIMPSE_TICK_INTERVAL_MS` - Progress timer cadence (default: 100)
//! - `GLIMPSE_SIMULATED_LATENCY` - Sleep like a remote API on every repository call (default: true)
//! - `GLIMPSE_SEED_PATH` - JSON seed file; the embedded seed is used when unset
//! - `GLIMPSE_CURRENT_USERNAME` - Who is signed in (default: you)
//! - `GLIMPSE_DEMO_KEYS` - Comma separated key names the demo presses, one per
//!   story shown (e.g. `ArrowRight,ArrowLeft,Escape`; default: none, autoplay)
//!
//! Missing values use the default. Unparseable values use the default and log a warning.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use glimpse_domain::{Key, StoryTiming};

pub const DEFAULT_CURRENT_USERNAME: &str = "you";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub story_duration_ms: u64,
    pub tick_interval_ms: u64,
    pub simulated_latency: bool,
    pub seed_path: Option<PathBuf>,
    pub current_username: String,
    pub demo_keys: Vec<Key>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            story_duration_ms: duration_ms(StoryTiming::DEFAULT_STORY_DURATION),
            tick_interval_ms: duration_ms(StoryTiming::DEFAULT_TICK_INTERVAL),
            simulated_latency: true,
            seed_path: None,
            current_username: DEFAULT_CURRENT_USERNAME.to_string(),
            demo_keys: Vec::new(),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Parse `key` from `lookup`, keeping `default` when missing or malformed.
fn lookup_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unparseable setting, using default");
                default
            }
        },
    }
}

/// Parse comma separated key names, skipping unknown ones.
fn parse_keys(raw: &str) -> Vec<Key> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match Key::from_name(name) {
            Key::Other => {
                tracing::warn!(key = name, "Ignoring unknown demo key");
                None
            }
            key => Some(key),
        })
        .collect()
}

impl AppSettings {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            story_duration_ms: lookup_or(
                &lookup,
                "GLIMPSE_STORY_DURATION_MS",
                defaults.story_duration_ms,
            ),
            tick_interval_ms: lookup_or(
                &lookup,
                "GLIMPSE_TICK_INTERVAL_MS",
                defaults.tick_interval_ms,
            ),
            simulated_latency: lookup_or(
                &lookup,
                "GLIMPSE_SIMULATED_LATENCY",
                defaults.simulated_latency,
            ),
            seed_path: non_blank("GLIMPSE_SEED_PATH").map(PathBuf::from),
            current_username: non_blank("GLIMPSE_CURRENT_USERNAME")
                .unwrap_or(defaults.current_username),
            demo_keys: non_blank("GLIMPSE_DEMO_KEYS")
                .map(|raw| parse_keys(&raw))
                .unwrap_or_default(),
        }
    }

    /// Story timing, or the default timing if the configured pair is invalid.
    pub fn timing(&self) -> StoryTiming {
        StoryTiming::new(
            Duration::from_millis(self.story_duration_ms),
            Duration::from_millis(self.tick_interval_ms),
        )
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid story timing, using defaults");
            StoryTiming::default()
        })
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
    fn empty_environment_gives_defaults() {
        let settings = AppSettings::from_lookup(lookup(&[]));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.story_duration_ms, 5000);
        assert_eq!(settings.tick_interval_ms, 100);
        assert!(settings.simulated_latency);
        assert_eq!(settings.current_username, "you");
        assert!(settings.demo_keys.is_empty());
    }

    #[test]
    fn reads_every_variable() {
        let settings = AppSettings::from_lookup(lookup(&[
            ("GLIMPSE_STORY_DURATION_MS", "3000"),
            ("GLIMPSE_TICK_INTERVAL_MS", "50"),
            ("GLIMPSE_SIMULATED_LATENCY", "false"),
            ("GLIMPSE_SEED_PATH", "/tmp/seed.json"),
            ("GLIMPSE_CURRENT_USERNAME", "mia"),
            ("GLIMPSE_DEMO_KEYS", "ArrowRight, Space,Escape"),
        ]));
        assert_eq!(settings.story_duration_ms, 3000);
        assert_eq!(settings.tick_interval_ms, 50);
        assert!(!settings.simulated_latency);
        assert_eq!(settings.seed_path, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(settings.current_username, "mia");
        assert_eq!(settings.demo_keys, vec![Key::ArrowRight, Key::Space, Key::Escape]);
        assert_eq!(settings.timing().progress_step(), 100.0 / 60.0);
    }

    #[test]
    fn malformed_values_fall_back() {
        let settings = AppSettings::from_lookup(lookup(&[
            ("GLIMPSE_STORY_DURATION_MS", "soon"),
            ("GLIMPSE_SIMULATED_LATENCY", "maybe"),
            ("GLIMPSE_SEED_PATH", "   "),
        ]));
        assert_eq!(settings.story_duration_ms, 5000);
        assert!(settings.simulated_latency);
        assert!(settings.seed_path.is_none());
    }

    #[test]
    fn unknown_demo_keys_are_skipped() {
        let settings = AppSettings::from_lookup(lookup(&[(
            "GLIMPSE_DEMO_KEYS",
            "Enter,ArrowLeft,,Tab,Esc",
        )]));
        assert_eq!(settings.demo_keys, vec![Key::ArrowLeft, Key::Escape]);
    }

    #[test]
    fn invalid_timing_pair_uses_default_timing() {
        let settings = AppSettings {
            tick_interval_ms: 0,
            ..AppSettings::default()
        };
        assert_eq!(settings.timing(), StoryTiming::default());
    }
}
