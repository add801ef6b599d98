//! Configuration types and defaults for the Regex Tester
//!
//! Mirrors the `quickUtils.*` settings the extension host forwards to the
//! core. Field names are camelCase on the wire to match the host's JSON.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Hard cap on match records collected in find-all mode
pub const DEFAULT_MAX_MATCHES: usize = 100;

/// Quiet period between the last edit and the dispatched test, in ms
pub const DEFAULT_DEBOUNCE_MS: f64 = 300.0;

/// Compiled regex size limit (same as the `regex` crate default)
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidValue { field: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// Main Configuration
// =============================================================================

/// Regex Tester configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TesterConfig {
    /// Maximum records returned in find-all mode. Default: 100
    pub max_matches: usize,
    /// Emit a `truncated` field on results. Default: false
    pub report_truncation: bool,
    /// Debounce window for edits, in milliseconds. Default: 300
    pub debounce_ms: f64,
    /// Compiled program size limit in bytes. Default: 10 MiB
    pub size_limit: usize,
    /// Console log level, applied when a session is created. Default: info
    pub log_level: LogLevel,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            max_matches: DEFAULT_MAX_MATCHES,
            report_truncation: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            size_limit: DEFAULT_SIZE_LIMIT,
            log_level: LogLevel::Info,
        }
    }
}

impl TesterConfig {
    /// Same output as the webview has always seen (no truncation marker)
    pub fn parity() -> Self {
        Self::default()
    }

    /// Parity plus the optional `truncated` indicator on results
    pub fn extended() -> Self {
        Self {
            report_truncation: true,
            ..Self::default()
        }
    }

    /// Parse host settings JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TesterConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_matches == 0 {
            return Err(ConfigError::InvalidValue {
                field: "maxMatches",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.debounce_ms.is_finite() || self.debounce_ms < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "debounceMs",
                reason: format!("expected a non-negative number, got {}", self.debounce_ms),
            });
        }
        if self.size_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sizeLimit",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
