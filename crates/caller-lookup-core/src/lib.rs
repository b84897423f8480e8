//! Caller Lookup Core
//!
//! Phone number validation and caller-name lookup behind a single form.
//!
//! ## Components
//!
//! - **Domain**: `PhoneNumberInfo` input/display record and its constraints
//! - **Provider**: `LookupProvider` seam with the Twilio Lookup v1 client
//! - **Workflow**: `LookupWorkflow` mapping provider answers onto the form
//!
//! ```text
//! form ──▶ PhoneNumberInfo ──▶ LookupWorkflow ──▶ LookupProvider ──▶ Twilio
//!                ▲                    │
//!                └──── LookupOutcome ◀┘
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod workflow;

pub use config::TwilioSettings;
pub use domain::*;
pub use error::*;
pub use provider::{LookupProvider, LookupRequest, LookupResponse, TwilioLookupClient};
pub use workflow::{LookupOutcome, LookupWorkflow};

/// Issuing country preset on page load. Caller-name lookup is US only.
pub const DEFAULT_COUNTRY: &str = "US";
