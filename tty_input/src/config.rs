// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Configuration. There is one knob: how long a lone `ESC` waits before it is taken to
//! be the Escape key.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default escape timeout. Long enough for a remote terminal to deliver the rest of a
/// sequence, short enough that pressing Escape still feels immediate.
pub const DEFAULT_ESC_KEY_TIMEOUT: Duration = Duration::from_millis(100);

/// Largest escape timeout [`TtyInputConfig::validate`] accepts.
pub const MAX_ESC_KEY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtyInputConfig {
    /// Serialized as whole milliseconds under the key `escKeyTimeout`.
    #[serde(rename = "escKeyTimeout", with = "duration_as_millis")]
    pub esc_key_timeout: Duration,
}

impl Default for TtyInputConfig {
    fn default() -> Self {
        Self {
            esc_key_timeout: DEFAULT_ESC_KEY_TIMEOUT,
        }
    }
}

impl TtyInputConfig {
    #[must_use]
    pub fn with_esc_key_timeout(mut self, esc_key_timeout: Duration) -> Self {
        self.esc_key_timeout = esc_key_timeout;
        self
    }

    /// Parse and validate a JSON object such as `{"escKeyTimeout": 50}`. Missing keys
    /// take their default.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed JSON or a wrongly typed value, and
    /// [`ConfigError::EscKeyTimeoutTooLarge`] from [`Self::validate`].
    pub fn try_from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Json)?;
        config.validate()
    }

    /// # Errors
    ///
    /// [`ConfigError::EscKeyTimeoutTooLarge`] when the timeout exceeds
    /// [`MAX_ESC_KEY_TIMEOUT`].
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.esc_key_timeout > MAX_ESC_KEY_TIMEOUT {
            return Err(ConfigError::EscKeyTimeoutTooLarge {
                actual_ms: self.esc_key_timeout.as_millis(),
                max_ms: MAX_ESC_KEY_TIMEOUT.as_millis(),
            });
        }
        Ok(self)
    }
}

mod duration_as_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
