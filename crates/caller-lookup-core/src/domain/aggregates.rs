//! Phone number lookup record
//!
//! One record is built per request: bound from the form, validated, then
//! filled with provider data by the workflow. It is never stored.

use super::value_objects::{Caller, FieldId, FormError};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Maximum accepted length of the raw phone number. Mirrored by the
/// `length` constraint on `phone_number_raw`.
pub const PHONE_NUMBER_MAX_LEN: u64 = 18;

/// Input and display model of the lookup page
///
/// # Invariants
/// - `country_code_selected` is stored upper-cased
/// - `valid` is only set by a successful lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PhoneNumberInfo {
    #[serde(deserialize_with = "upper_case")]
    #[validate(custom = "not_blank")]
    country_code_selected: String,

    #[validate(custom = "not_blank", length(max = 18))]
    pub phone_number_raw: String,

    pub valid: bool,
    pub country_code: String,
    pub phone_number_formatted: String,
    pub phone_number_mobile_dialing: String,
    pub caller: Option<Caller>,
}

impl PhoneNumberInfo {
    /// Create a record from raw form input
    pub fn new(country_code_selected: impl Into<String>, phone_number_raw: impl Into<String>) -> Self {
        let mut info = Self { phone_number_raw: phone_number_raw.into(), ..Self::default() };
        info.set_country_code_selected(country_code_selected);
        info
    }

    /// Selected issuing country (upper case)
    pub fn country_code_selected(&self) -> &str {
        &self.country_code_selected
    }

    /// Set the issuing country, normalizing to upper case
    pub fn set_country_code_selected(&mut self, value: impl Into<String>) {
        self.country_code_selected = value.into().to_uppercase();
    }

    /// Copy of the submitted input with every result field cleared
    pub fn echo(&self) -> Self {
        Self {
            country_code_selected: self.country_code_selected.clone(),
            phone_number_raw: self.phone_number_raw.clone(),
            ..Self::default()
        }
    }

    /// Field errors for every violated input constraint, in form order
    pub fn validation_errors(&self) -> Vec<FormError> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        let by_field = errors.field_errors();
        FieldId::ALL
            .into_iter()
            .filter_map(|field| by_field.get(field.struct_name()).map(|errs| (field, *errs)))
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FormError::field(field, message_for(field, e)))
            })
            .collect()
    }
}

fn message_for(field: FieldId, error: &ValidationError) -> String {
    match error.code.as_ref() {
        "required" => format!("The {} field is required.", field.display_name()),
        "length" => format!(
            "The field {} must be a string with a maximum length of {}.",
            field.display_name(),
            PHONE_NUMBER_MAX_LEN
        ),
        other => format!("The field {} is invalid ({}).", field.display_name(), other),
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn upper_case<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|v| v.to_uppercase()).unwrap_or_default())
}
