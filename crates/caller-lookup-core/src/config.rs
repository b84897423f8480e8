//! Provider credentials

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Twilio account settings
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TwilioSettings {
    pub account_sid: String,
    pub auth_token: String,
    /// Lookup API root, defaults to the public Twilio endpoint
    #[serde(default)]
    pub base_url: Option<String>,
}

impl TwilioSettings {
    /// Create settings for the public endpoint
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            base_url: None,
        }
    }

    /// Reject blank credentials
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_sid.trim().is_empty() {
            return Err(ConfigError::Missing("account_sid"));
        }
        if self.auth_token.trim().is_empty() {
            return Err(ConfigError::Missing("auth_token"));
        }
        Ok(())
    }
}

impl fmt::Debug for TwilioSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioSettings")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
