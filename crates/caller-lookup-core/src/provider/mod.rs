//! Phone number lookup providers
//!
//! The workflow talks to a provider through [`LookupProvider`]; the
//! production implementation is the Twilio Lookup v1 client.

pub mod twilio;

pub use twilio::TwilioLookupClient;

use crate::LookupResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Lookup provider trait
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Provider name used in user-facing error messages
    fn name(&self) -> &'static str;

    /// Resolve a number for an issuing country. One attempt, no retries.
    async fn fetch(&self, request: &LookupRequest) -> LookupResult<LookupResponse>;
}

/// Lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub country_code: String,
    pub phone_number: String,
    /// Ask for caller-name enrichment
    pub caller_name: bool,
}

impl LookupRequest {
    /// Request with caller-name enrichment
    pub fn with_caller_name(country_code: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            phone_number: phone_number.into(),
            caller_name: true,
        }
    }
}

/// Normalized provider answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub country_code: String,
    pub national_format: String,
    /// Canonical (E.164) form
    pub phone_number: String,
    pub caller_name: Option<CallerNameRecord>,
}

/// Caller-name sub-result; every key may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerNameRecord {
    pub caller_name: Option<String>,
    pub caller_type: Option<String>,
    pub error_code: Option<String>,
}

impl CallerNameRecord {
    /// Error code of the sub-lookup, if a non-empty one was reported
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref().filter(|code| !code.is_empty())
    }
}
