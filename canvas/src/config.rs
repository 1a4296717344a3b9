//! Editor configuration: feature flags, hit-test tolerance, speech defaults.
//!
//! Configuration can come from three places: `EditorConfig::default()`, a JSON
//! document (`from_json`, missing keys keep their defaults), or environment
//! variables (`from_env`).
//!
//! Environment variables:
//! - `SLIDES_SPEECH_ELEMENTS`: `true` (default) / `false`
//! - `SLIDES_QUIZ_SLIDES`: `true` (default) / `false`
//! - `SLIDES_NARRATION`: `true` (default) / `false`, deck-wide timed narration
//! - `SLIDES_HANDLE_TOLERANCE_PX`: default 5
//! - `SLIDES_DEFAULT_VOICE`: voice name, platform default when absent
//! - `SLIDES_DEFAULT_RATE`: default 1.0
//! - `SLIDES_DEFAULT_VOLUME`: default 1.0

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::HANDLE_TOLERANCE_PX;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be true/false/1/0, got '{value}'")]
    InvalidBool { var: String, value: String },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Voice settings applied to newly created speech elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechDefaults {
    pub voice: Option<String>,
    pub rate: f64,
    pub volume: f64,
}

impl Default for SpeechDefaults {
    fn default() -> Self {
        Self { voice: None, rate: 1.0, volume: 1.0 }
    }
}

/// Feature switches carried by the deck itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckOptions {
    /// Allow TTS-annotated speech elements on basic slides.
    pub speech_elements: bool,
    /// Allow quiz slides.
    pub quiz_slides: bool,
    /// Allow one narration track read over the whole deck.
    pub narration: bool,
    pub speech: SpeechDefaults,
}

impl Default for DeckOptions {
    fn default() -> Self {
        EditorConfig::default().deck_options()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub speech_elements: bool,
    pub quiz_slides: bool,
    pub narration: bool,
    /// Slop around resize handles, in canvas pixels.
    pub handle_tolerance_px: f64,
    pub speech: SpeechDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            speech_elements: true,
            quiz_slides: true,
            narration: true,
            handle_tolerance_px: HANDLE_TOLERANCE_PX,
            speech: SpeechDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Build config from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] for an unrecognized flag value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env_value(key, std::env::var(key)))
    }

    /// Build config from any key lookup. Unparsable numbers fall back to
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] for an unrecognized flag value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let num = |key: &str, default: f64| parse_num(key, lookup(key), default);

        Ok(Self {
            speech_elements: parse_bool("SLIDES_SPEECH_ELEMENTS", lookup("SLIDES_SPEECH_ELEMENTS"), true)?,
            quiz_slides: parse_bool("SLIDES_QUIZ_SLIDES", lookup("SLIDES_QUIZ_SLIDES"), true)?,
            narration: parse_bool("SLIDES_NARRATION", lookup("SLIDES_NARRATION"), true)?,
            handle_tolerance_px: num("SLIDES_HANDLE_TOLERANCE_PX", defaults.handle_tolerance_px),
            speech: SpeechDefaults {
                voice: lookup("SLIDES_DEFAULT_VOICE").filter(|v| !v.trim().is_empty()),
                rate: num("SLIDES_DEFAULT_RATE", defaults.speech.rate),
                volume: num("SLIDES_DEFAULT_VOLUME", defaults.speech.volume),
            },
        })
    }

    /// Parse a (possibly partial) JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or mistyped fields.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The subset of settings the deck enforces.
    #[must_use]
    pub fn deck_options(&self) -> DeckOptions {
        DeckOptions {
            speech_elements: self.speech_elements,
            quiz_slides: self.quiz_slides,
            narration: self.narration,
            speech: self.speech.clone(),
        }
    }
}

/// An unset variable is absent. A set but non-UTF-8 value is also treated as
/// absent, with a warning so the operator can see it was ignored.
fn env_value(var: &str, raw: Result<String, VarError>) -> Option<String> {
    match raw {
        Ok(v) => Some(v),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(value)) => {
            warn!(var, ?value, "ignoring non-UTF-8 environment value");
            None
        }
    }
}

fn parse_num(var: &str, raw: Option<String>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            warn!(var, value = %raw, default, "ignoring unparsable number");
            default
        }
    }
}

fn parse_bool(var: &str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var: var.to_owned(), value: raw }),
    }
}
