//! Value objects shared by the lookup form and workflow

use serde::{Deserialize, Serialize};

/// Caller-name metadata attached to a looked-up number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub caller_name: String,
    pub caller_type: String,
    pub error_code: String,
}

/// Bound input field of the lookup form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    CountryCodeSelected,
    PhoneNumberRaw,
}

impl FieldId {
    /// Every bound field, in form order
    pub const ALL: [FieldId; 2] = [Self::CountryCodeSelected, Self::PhoneNumberRaw];

    /// Name of the HTML form control bound to this field
    pub fn form_name(&self) -> &'static str {
        match self {
            Self::CountryCodeSelected => "PhoneNumberInfo.CountryCodeSelected",
            Self::PhoneNumberRaw => "PhoneNumberInfo.PhoneNumberRaw",
        }
    }

    /// Human readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CountryCodeSelected => "Issuing Country",
            Self::PhoneNumberRaw => "Phone Number",
        }
    }

    /// Struct field name, as reported by the validator
    pub(crate) fn struct_name(&self) -> &'static str {
        match self {
            Self::CountryCodeSelected => "country_code_selected",
            Self::PhoneNumberRaw => "phone_number_raw",
        }
    }
}

/// Error shown on the form. `field == None` is a page-level error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormError {
    pub field: Option<FieldId>,
    pub message: String,
}

impl FormError {
    /// Error attached to one field
    pub fn field(field: FieldId, message: impl Into<String>) -> Self {
        Self { field: Some(field), message: message.into() }
    }

    /// Error not tied to any field
    pub fn page(message: impl Into<String>) -> Self {
        Self { field: None, message: message.into() }
    }
}
