//! Server configuration
//!
//! Credentials come from flags, environment, or a TOML file; flags and
//! environment win over the file. Missing credentials stop the server
//! before it binds.

use caller_lookup_core::{ConfigError, TwilioSettings};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "caller-lookup")]
#[command(version)]
#[command(about = "Phone number and caller-name lookup page", long_about = None)]
pub struct Args {
    /// Listen address
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Twilio account SID
    #[arg(long, env = "TWILIO_ACCOUNT_SID")]
    pub account_sid: Option<String>,

    /// Twilio auth token
    #[arg(long, env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Override the Twilio Lookup API root
    #[arg(long, env = "TWILIO_LOOKUP_BASE_URL")]
    pub lookup_base_url: Option<String>,

    /// TOML settings file
    #[arg(long, short, env = "CALLER_LOOKUP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Settings file layout
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    twilio: FileTwilio,
}

#[derive(Debug, Default, Deserialize)]
struct FileTwilio {
    account_sid: Option<String>,
    auth_token: Option<String>,
    base_url: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl Args {
    /// Resolve Twilio credentials
    pub fn twilio_settings(&self) -> Result<TwilioSettings, ConfigError> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let settings = TwilioSettings {
            account_sid: self
                .account_sid
                .clone()
                .or(file.twilio.account_sid)
                .ok_or(ConfigError::Missing("account_sid"))?,
            auth_token: self
                .auth_token
                .clone()
                .or(file.twilio.auth_token)
                .ok_or(ConfigError::Missing("auth_token"))?,
            base_url: self.lookup_base_url.clone().or(file.twilio.base_url),
        };
        settings.validate()?;
        Ok(settings)
    }
}
