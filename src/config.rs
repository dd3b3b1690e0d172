//! Provider configuration.

use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_LOCK_LABEL: &str = "LobbyProvider.lock";

/// Settings applied to every provider a factory builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Diagnostic label attached to each provider's lock while it is alive.
    pub lock_label: String,
    /// Emit a debug event whenever a stub operation is invoked.
    pub log_stub_calls: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            lock_label: DEFAULT_LOCK_LABEL.to_string(),
            log_stub_calls: true,
        }
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the environment.
    ///
    /// - `LOBBY_SP_LOCK_LABEL`: lock label (ignored when blank)
    /// - `LOBBY_SP_LOG_STUBS`: `0` or `false` silences stub-call events
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("LOBBY_SP_LOCK_LABEL") {
            let v = v.trim();
            if !v.is_empty() {
                cfg.lock_label = v.to_string();
            }
        }
        if let Ok(v) = env::var("LOBBY_SP_LOG_STUBS") {
            cfg.log_stub_calls = parse_flag(&v).unwrap_or(cfg.log_stub_calls);
        }
        cfg
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_lock_label(mut self, label: impl Into<String>) -> Self {
        self.lock_label = label.into();
        self
    }

    pub fn with_log_stub_calls(mut self, enabled: bool) -> Self {
        self.log_stub_calls = enabled;
        self
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
