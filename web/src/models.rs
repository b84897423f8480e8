//! Request and response models

use caller_lookup_core::{FormError, PhoneNumberInfo};
use serde::{Deserialize, Serialize};

/// Urlencoded lookup form. Missing controls bind as empty strings so they
/// surface as validation errors instead of a rejected request.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupForm {
    #[serde(rename = "PhoneNumberInfo.CountryCodeSelected")]
    pub country_code_selected: String,
    #[serde(rename = "PhoneNumberInfo.PhoneNumberRaw")]
    pub phone_number_raw: String,
}

impl From<LookupForm> for PhoneNumberInfo {
    fn from(form: LookupForm) -> Self {
        PhoneNumberInfo::new(form.country_code_selected, form.phone_number_raw)
    }
}

/// Standard API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<FormError>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), errors: Vec::new() }
    }

    pub fn rejected(errors: Vec<FormError>) -> Self {
        Self { success: false, data: None, errors }
    }
}
