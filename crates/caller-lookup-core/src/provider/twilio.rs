//! Twilio Lookup v1 client
//!
//! `GET /v1/PhoneNumbers/{number}?CountryCode=..&Type=caller-name` with HTTP
//! basic auth (account SID, auth token).

use super::{CallerNameRecord, LookupProvider, LookupRequest, LookupResponse};
use crate::{ConfigError, LookupError, LookupResult, TwilioSettings};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};
use url::Url;

/// Public Twilio Lookup endpoint
pub const DEFAULT_BASE_URL: &str = "https://lookups.twilio.com";

/// Twilio Lookup client
pub struct TwilioLookupClient {
    client: Client,
    base_url: Url,
    account_sid: String,
    auth_token: String,
}

impl TwilioLookupClient {
    /// Create client from validated settings
    pub fn new(settings: &TwilioSettings) -> Result<Self, ConfigError> {
        Self::with_client(Client::new(), settings)
    }

    /// Create client on a caller-supplied `reqwest::Client`
    pub fn with_client(client: Client, settings: &TwilioSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let raw = settings.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            account_sid: settings.account_sid.clone(),
            auth_token: settings.auth_token.clone(),
        })
    }

    fn endpoint(&self, request: &LookupRequest) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "PhoneNumbers", request.phone_number.as_str()]);
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("CountryCode", &request.country_code);
            if request.caller_name {
                query.append_pair("Type", "caller-name");
            }
        }
        url
    }
}

#[async_trait]
impl LookupProvider for TwilioLookupClient {
    fn name(&self) -> &'static str {
        "Twilio"
    }

    async fn fetch(&self, request: &LookupRequest) -> LookupResult<LookupResponse> {
        let url = self.endpoint(request);
        debug!(country = %request.country_code, caller_name = request.caller_name, "Twilio lookup request");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = provider_error(status, &body);
            warn!(status = status.as_u16(), error = %err, "Twilio lookup rejected");
            return Err(err);
        }

        let resource: PhoneNumberResource = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(resource.into())
    }
}

fn provider_error(status: StatusCode, body: &str) -> LookupError {
    let parsed: Option<TwilioErrorBody> = serde_json::from_str(body).ok();
    let (code, message) = match parsed {
        Some(err) => (err.code, err.message),
        None => (None, None),
    };

    LookupError::Provider {
        code: code.unwrap_or_else(|| i64::from(status.as_u16())),
        message: message.unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("unexpected status").to_string()
        }),
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct PhoneNumberResource {
    country_code: Option<String>,
    national_format: Option<String>,
    phone_number: Option<String>,
    caller_name: Option<CallerNameResource>,
}

#[derive(Debug, Deserialize)]
struct CallerNameResource {
    caller_name: Option<String>,
    caller_type: Option<String>,
    #[serde(default, deserialize_with = "code_as_string")]
    error_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

impl From<PhoneNumberResource> for LookupResponse {
    fn from(r: PhoneNumberResource) -> Self {
        Self {
            country_code: r.country_code.unwrap_or_default(),
            national_format: r.national_format.unwrap_or_default(),
            phone_number: r.phone_number.unwrap_or_default(),
            caller_name: r.caller_name.map(|c| CallerNameRecord {
                caller_name: c.caller_name,
                caller_type: c.caller_type,
                error_code: c.error_code,
            }),
        }
    }
}

/// Twilio sends `error_code` as a number, a string, or null.
fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
