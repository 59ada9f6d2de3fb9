// Sherman Config
// Timing configuration loaded from TOML, with firmware defaults

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::action::{KeyAction, ParseError};

/// Global tap-hold decision window
pub const TAPPING_TERM: u16 = 200;
/// Tap-hold window for the pinky mod-taps
pub const PINKY_TAPPING_TERM: u16 = 180;
/// Global combo window
pub const COMBO_TERM: u16 = 50;
/// How long achordion waits for a chord to resolve
pub const ACHORDION_TIMEOUT: u16 = 500;
/// Streak window after which a mod-tap may resolve as hold again
pub const ACHORDION_STREAK_TIMEOUT: u16 = 200;
/// Largest timing accepted from a config file
pub const MAX_TIMING_MS: u16 = 5000;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("invalid override key '{key}': {source}")]
    InvalidOverride {
        key: String,
        #[source]
        source: ParseError,
    },

    #[error("{name} = {value} is out of range (1..={max} ms)")]
    TimingOutOfRange { name: String, value: u64, max: u16 },

    #[error("no source path set")]
    NoSourcePath,
}

/// Every timing value handed to the firmware runtime
#[derive(Debug, Clone, PartialEq)]
pub struct Timings {
    /// Default tapping term
    pub tapping_term: u16,
    /// Tapping term for the pinky mod-taps
    pub pinky_term: u16,
    /// Per-key tapping terms, checked before the pinky set
    pub term_overrides: IndexMap<KeyAction, u16>,
    /// Default combo term
    pub combo_term: u16,
    pub achordion_timeout: u16,
    pub streak_timeout: u16,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tapping_term: TAPPING_TERM,
            pinky_term: PINKY_TAPPING_TERM,
            term_overrides: IndexMap::new(),
            combo_term: COMBO_TERM,
            achordion_timeout: ACHORDION_TIMEOUT,
            streak_timeout: ACHORDION_STREAK_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    tapping: Option<TappingSection>,

    #[serde(default)]
    combo: Option<ComboSection>,

    #[serde(default)]
    achordion: Option<AchordionSection>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TappingSection {
    term: Option<u64>,
    pinky_term: Option<u64>,
    #[serde(default)]
    overrides: IndexMap<String, u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ComboSection {
    term: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct AchordionSection {
    timeout: Option<u64>,
    streak_timeout: Option<u64>,
}

fn checked_timing(name: &str, value: u64) -> Result<u16, ConfigError> {
    if value == 0 || value > u64::from(MAX_TIMING_MS) {
        return Err(ConfigError::TimingOutOfRange {
            name: name.to_string(),
            value,
            max: MAX_TIMING_MS,
        });
    }
    Ok(value as u16)
}

fn apply(target: &mut u16, name: &str, value: Option<u64>) -> Result<(), ConfigError> {
    if let Some(v) = value {
        *target = checked_timing(name, v)?;
    }
    Ok(())
}

/// Loaded configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub timings: Timings,
    source_path: Option<PathBuf>,
}

impl Config {
    /// Configuration with firmware defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        let mut timings = Timings::default();

        if let Some(tapping) = parsed.tapping {
            apply(&mut timings.tapping_term, "tapping.term", tapping.term)?;
            apply(&mut timings.pinky_term, "tapping.pinky_term", tapping.pinky_term)?;
            for (key, value) in tapping.overrides {
                let action = key
                    .parse::<KeyAction>()
                    .map_err(|source| ConfigError::InvalidOverride {
                        key: key.clone(),
                        source,
                    })?;
                let term = checked_timing(&format!("tapping.overrides.\"{}\"", key), value)?;
                timings.term_overrides.insert(action, term);
            }
        }

        if let Some(combo) = parsed.combo {
            apply(&mut timings.combo_term, "combo.term", combo.term)?;
        }

        if let Some(achordion) = parsed.achordion {
            apply(&mut timings.achordion_timeout, "achordion.timeout", achordion.timeout)?;
            apply(
                &mut timings.streak_timeout,
                "achordion.streak_timeout",
                achordion.streak_timeout,
            )?;
        }

        Ok(Self {
            timings,
            source_path: None,
        })
    }

    /// Load a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        debug!(
            "loaded config from {}: {:?}",
            path.as_ref().display(),
            config.timings
        );
        Ok(config)
    }

    /// `~/.config/sherman/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sherman").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
            debug!("no config at {}, using defaults", path.display());
        }
        Ok(Self::new())
    }

    /// Path this config was read from
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Re-read the file this config came from
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let path = self.source_path.clone().ok_or(ConfigError::NoSourcePath)?;
        *self = Self::from_file(path)?;
        Ok(())
    }
}

/// Template written for a new installation
pub fn default_config_content() -> &'static str {
    r#"# Sherman timing configuration
# Place this file at: ~/.config/sherman/config.toml

[tapping]
# Default tap-hold window (ms)
term = 200
# Window for the pinky home-row mods (ms)
pinky_term = 180

# Per-key windows, keyed by firmware notation
[tapping.overrides]
# "LSFT_T(KC_D)" = 160

[combo]
term = 50

[achordion]
timeout = 500
# Set by the streak check for non-shift mod-taps
streak_timeout = 200
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::Keycode;
    use crate::modifier::ModMask;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.timings.tapping_term, 200);
        assert_eq!(config.timings.pinky_term, 180);
        assert_eq!(config.timings.combo_term, 50);
        assert_eq!(config.timings.achordion_timeout, 500);
        assert_eq!(config.timings.streak_timeout, 200);
        assert!(config.source_path().is_none());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config = Config::from_toml(default_config_content()).unwrap();
        assert_eq!(config.timings, Timings::default());
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
[tapping]
term = 220

[tapping.overrides]
"LSFT_T(KC_D)" = 160
"RSFT_T(KC_K)" = 165

[achordion]
streak_timeout = 150
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.timings.tapping_term, 220);
        assert_eq!(config.timings.pinky_term, 180);
        assert_eq!(config.timings.streak_timeout, 150);

        let overrides: Vec<(KeyAction, u16)> =
            config.timings.term_overrides.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(
            overrides,
            vec![
                (KeyAction::mod_tap(ModMask::LSFT, Keycode::D), 160),
                (KeyAction::mod_tap(ModMask::RSFT, Keycode::K), 165),
            ]
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_toml("[combo]\nterm = 0\n"),
            Err(ConfigError::TimingOutOfRange { .. })
        ));
        assert!(matches!(
            Config::from_toml("[achordion]\ntimeout = 9000\n"),
            Err(ConfigError::TimingOutOfRange { value: 9000, .. })
        ));
        assert!(matches!(
            Config::from_toml("[tapping.overrides]\n\"LSFT_T(KC_WHAT)\" = 100\n"),
            Err(ConfigError::InvalidOverride { .. })
        ));
        assert!(matches!(
            Config::from_toml("[display]\nflip = true\n"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_reload_without_source() {
        let mut config = Config::new();
        assert!(matches!(config.reload(), Err(ConfigError::NoSourcePath)));
    }
}
