//! Lookup workflow
//!
//! ```text
//! Received → Validating ─┬─ Invalid ───────────────────────────────▶ Rejected
//!                        └─ LookingUp ─┬─ ProviderError ───────────▶ Rejected
//!                                      └─ Enriching ─┬─ CallerOk ──▶ Found
//!                                                    └─ CallerErr ─▶ Rejected
//! ```
//!
//! Every submission ends in a [`LookupOutcome`]; nothing propagates past
//! [`LookupWorkflow::on_submit`].

use crate::domain::{Caller, FieldId, FormError, PhoneNumberInfo};
use crate::provider::{LookupProvider, LookupRequest, LookupResponse};
use crate::{LookupError, LookupResult, DEFAULT_COUNTRY};
use std::sync::Arc;
use tracing::{info, warn};

/// Message used when the caller-name sub-lookup reports an error
pub const CALLER_LOOKUP_ERROR: &str = "caller lookup error";

/// Result of one form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Lookup succeeded, record fully populated
    Found(PhoneNumberInfo),
    /// Validation or lookup failed; `info` echoes the submitted input
    Rejected {
        info: PhoneNumberInfo,
        errors: Vec<FormError>,
    },
}

impl LookupOutcome {
    /// Record to render
    pub fn info(&self) -> &PhoneNumberInfo {
        match self {
            Self::Found(info) => info,
            Self::Rejected { info, .. } => info,
        }
    }

    /// Errors to render (empty on success)
    pub fn errors(&self) -> &[FormError] {
        match self {
            Self::Found(_) => &[],
            Self::Rejected { errors, .. } => errors,
        }
    }

    /// Lookup succeeded
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Validates input, calls the provider and maps the answer onto the form
#[derive(Clone)]
pub struct LookupWorkflow {
    provider: Arc<dyn LookupProvider>,
}

impl LookupWorkflow {
    /// Create workflow over a provider
    pub fn new(provider: Arc<dyn LookupProvider>) -> Self {
        Self { provider }
    }

    /// Fresh form with the demo issuing country preset
    pub fn on_load(&self) -> PhoneNumberInfo {
        PhoneNumberInfo::new(DEFAULT_COUNTRY, "")
    }

    /// Run one submission
    pub async fn on_submit(&self, input: PhoneNumberInfo) -> LookupOutcome {
        let errors = input.validation_errors();
        if !errors.is_empty() {
            return LookupOutcome::Rejected { info: input.echo(), errors };
        }

        let display = input.echo();
        let request = LookupRequest::with_caller_name(
            display.country_code_selected(),
            display.phone_number_raw.as_str(),
        );

        let result = match self.provider.fetch(&request).await {
            Ok(response) => populate(display.clone(), response),
            Err(err) => Err(err),
        };

        match result {
            Ok(info) => {
                info!(
                    country = %info.country_code,
                    caller = info.caller.is_some(),
                    "Phone number lookup succeeded"
                );
                LookupOutcome::Found(info)
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "Phone number lookup failed");
                LookupOutcome::Rejected {
                    info: display,
                    errors: vec![self.form_error(&err)],
                }
            }
        }
    }

    /// Display name of the backing provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    fn form_error(&self, err: &LookupError) -> FormError {
        match err {
            LookupError::Provider { code, message } => FormError::field(
                FieldId::PhoneNumberRaw,
                format!("{} API Error {}: {}", self.provider.name(), code, message),
            ),
            LookupError::Transport(message) => FormError::field(
                FieldId::PhoneNumberRaw,
                format!("{} API Error: {}", self.provider.name(), message),
            ),
            LookupError::Decode(message) | LookupError::InvalidCallerErrorCode(message) => {
                FormError::page(format!("{}: {}", err.kind(), message))
            }
        }
    }
}

/// Copy provider data onto the echoed record. The record is only returned
/// when every step succeeds, so a caller sub-error leaves no partial result.
fn populate(mut info: PhoneNumberInfo, response: LookupResponse) -> LookupResult<PhoneNumberInfo> {
    info.valid = true;
    info.country_code = response.country_code;
    info.phone_number_formatted = response.national_format;
    info.phone_number_mobile_dialing = response.phone_number;

    if let Some(record) = response.caller_name {
        if let Some(code) = record.error_code() {
            let code = code
                .trim()
                .parse::<i64>()
                .map_err(|_| LookupError::InvalidCallerErrorCode(code.to_string()))?;
            return Err(LookupError::Provider {
                code,
                message: CALLER_LOOKUP_ERROR.to_string(),
            });
        }

        info.caller = Some(Caller {
            caller_name: record.caller_name.unwrap_or_default(),
            caller_type: record.caller_type.unwrap_or_default(),
            error_code: String::new(),
        });
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CallerNameRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Provider returning a canned answer and recording requests
    struct FakeProvider {
        answer: LookupResult<LookupResponse>,
        calls: AtomicUsize,
        last: Mutex<Option<LookupRequest>>,
    }

    impl FakeProvider {
        fn new(answer: LookupResult<LookupResponse>) -> Arc<Self> {
            Arc::new(Self { answer, calls: AtomicUsize::new(0), last: Mutex::new(None) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LookupProvider for FakeProvider {
        fn name(&self) -> &'static str {
            "Twilio"
        }

        async fn fetch(&self, request: &LookupRequest) -> LookupResult<LookupResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            self.answer.clone()
        }
    }

    fn acme() -> LookupResponse {
        LookupResponse {
            country_code: "US".into(),
            national_format: "(415) 555-1234".into(),
            phone_number: "+14155551234".into(),
            caller_name: Some(CallerNameRecord {
                caller_name: Some("Acme Corp".into()),
                caller_type: Some("business".into()),
                error_code: None,
            }),
        }
    }

    #[test]
    fn test_on_load_presets_us() {
        let workflow = LookupWorkflow::new(FakeProvider::new(Ok(acme())));
        let info = workflow.on_load();
        assert_eq!(info.country_code_selected(), "US");
        assert!(info.phone_number_raw.is_empty());
        assert!(!info.valid);
    }

    #[tokio::test]
    async fn test_successful_lookup_populates_record() {
        let provider = FakeProvider::new(Ok(acme()));
        let workflow = LookupWorkflow::new(provider.clone());

        let outcome = workflow.on_submit(PhoneNumberInfo::new("us", "4155551234")).await;

        assert!(outcome.is_found());
        assert!(outcome.errors().is_empty());
        let info = outcome.info();
        assert!(info.valid);
        assert_eq!(info.country_code_selected(), "US");
        assert_eq!(info.phone_number_raw, "4155551234");
        assert_eq!(info.country_code, "US");
        assert_eq!(info.phone_number_formatted, "(415) 555-1234");
        assert_eq!(info.phone_number_mobile_dialing, "+14155551234");
        let caller = info.caller.as_ref().unwrap();
        assert_eq!(caller.caller_name, "Acme Corp");
        assert_eq!(caller.caller_type, "business");

        let request = provider.last.lock().unwrap().clone().unwrap();
        assert_eq!(request, LookupRequest::with_caller_name("US", "4155551234"));
    }

    #[tokio::test]
    async fn test_invalid_input_skips_provider() {
        let provider = FakeProvider::new(Ok(acme()));
        let workflow = LookupWorkflow::new(provider.clone());

        for input in [
            PhoneNumberInfo::new("", "4155551234"),
            PhoneNumberInfo::new("US", ""),
            PhoneNumberInfo::new("US", "1234567890123456789"),
        ] {
            let outcome = workflow.on_submit(input).await;
            assert!(!outcome.is_found());
            assert!(!outcome.info().valid);
            assert!(outcome.errors().iter().all(|e| e.field.is_some()));
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_caller_error_code_fails_whole_lookup() {
        let mut response = acme();
        response.caller_name = Some(CallerNameRecord {
            caller_name: Some("Acme Corp".into()),
            caller_type: None,
            error_code: Some("60600".into()),
        });
        let workflow = LookupWorkflow::new(FakeProvider::new(Ok(response)));

        let outcome = workflow.on_submit(PhoneNumberInfo::new("US", "4155551234")).await;

        let info = outcome.info();
        assert!(!info.valid);
        assert!(info.caller.is_none());
        assert!(info.country_code.is_empty());
        assert!(info.phone_number_formatted.is_empty());
        assert_eq!(
            outcome.errors(),
            &[FormError::field(
                FieldId::PhoneNumberRaw,
                "Twilio API Error 60600: caller lookup error"
            )]
        );
    }

    #[tokio::test]
    async fn test_missing_caller_values_default_to_empty() {
        let mut response = acme();
        response.caller_name = Some(CallerNameRecord::default());
        let workflow = LookupWorkflow::new(FakeProvider::new(Ok(response)));

        let outcome = workflow.on_submit(PhoneNumberInfo::new("US", "4155551234")).await;

        let caller = outcome.info().caller.clone().unwrap();
        assert_eq!(caller.caller_name, "");
        assert_eq!(caller.caller_type, "");
    }

    #[tokio::test]
    async fn test_no_caller_block_leaves_caller_unset() {
        let mut response = acme();
        response.caller_name = None;
        let workflow = LookupWorkflow::new(FakeProvider::new(Ok(response)));

        let outcome = workflow.on_submit(PhoneNumberInfo::new("US", "4155551234")).await;
        assert!(outcome.is_found());
        assert!(outcome.info().caller.is_none());
    }

    #[tokio::test]
    async fn test_provider_error_on_phone_field() {
        let workflow = LookupWorkflow::new(FakeProvider::new(Err(LookupError::Provider {
            code: 20404,
            message: "The requested resource was not found".into(),
        })));

        let outcome = workflow.on_submit(PhoneNumberInfo::new("us", "12")).await;

        assert!(!outcome.info().valid);
        assert_eq!(outcome.info().country_code_selected(), "US");
        assert_eq!(outcome.info().phone_number_raw, "12");
        let errors = outcome.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Some(FieldId::PhoneNumberRaw));
        assert!(errors[0].message.contains("20404"));
        assert!(errors[0].message.contains("The requested resource was not found"));
    }

    #[tokio::test]
    async fn test_transport_error_on_phone_field() {
        let workflow = LookupWorkflow::new(FakeProvider::new(Err(LookupError::Transport(
            "connection refused".into(),
        ))));

        let outcome = workflow.on_submit(PhoneNumberInfo::new("US", "4155551234")).await;
        assert_eq!(
            outcome.errors(),
            &[FormError::field(FieldId::PhoneNumberRaw, "Twilio API Error: connection refused")]
        );
    }

    #[tokio::test]
    async fn test_decode_error_is_page_error() {
        let workflow = LookupWorkflow::new(FakeProvider::new(Err(LookupError::Decode(
            "expected value at line 1".into(),
        ))));

        let outcome = workflow.on_submit(PhoneNumberInfo::new("US", "4155551234")).await;
        assert_eq!(
            outcome.errors(),
            &[FormError::page("DecodeError: expected value at line 1")]
        );
    }

    #[tokio::test]
    async fn test_non_numeric_caller_code_is_page_error() {
        let mut response = acme();
        response.caller_name = Some(CallerNameRecord {
            error_code: Some("oops".into()),
            ..Default::default()
        });
        let workflow = LookupWorkflow::new(FakeProvider::new(Ok(response)));

        let outcome = workflow.on_submit(PhoneNumberInfo::new("US", "4155551234")).await;
        assert_eq!(outcome.errors(), &[FormError::page("FormatError: oops")]);
        assert!(outcome.info().caller.is_none());
    }

    #[tokio::test]
    async fn test_posted_result_fields_are_discarded() {
        let workflow = LookupWorkflow::new(FakeProvider::new(Err(LookupError::Provider {
            code: 20404,
            message: "not found".into(),
        })));

        let mut input = PhoneNumberInfo::new("US", "4155551234");
        input.valid = true;
        input.phone_number_formatted = "forged".into();

        let outcome = workflow.on_submit(input).await;
        assert!(!outcome.info().valid);
        assert!(outcome.info().phone_number_formatted.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_input_never_carries_results() {
        let provider = FakeProvider::new(Ok(acme()));
        let workflow = LookupWorkflow::new(provider.clone());

        let mut input = PhoneNumberInfo::new("us", "");
        input.valid = true;
        input.country_code = "US".into();
        input.caller = Some(Caller::default());

        let outcome = workflow.on_submit(input).await;
        assert!(!outcome.is_found());
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.info().country_code_selected(), "US");
        assert!(!outcome.info().valid);
        assert!(outcome.info().country_code.is_empty());
        assert!(outcome.info().caller.is_none());
        assert_eq!(provider.calls(), 0);
    }
}
