//! Lookup page rendering

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use caller_lookup_core::{FieldId, FormError, PhoneNumberInfo, PHONE_NUMBER_MAX_LEN};
use handlebars::Handlebars;
use serde::Serialize;

const PAGE_TEMPLATE: &str = "lookup_page";

/// Lookup page renderer
pub struct LookupPage {
    handlebars: Handlebars<'static>,
}

impl LookupPage {
    pub fn new() -> Result<Self, PageError> {
        let mut hb = Handlebars::new();
        hb.register_template_string(PAGE_TEMPLATE, LOOKUP_PAGE_TEMPLATE)?;
        Ok(Self { handlebars: hb })
    }

    /// Render the page for a record and its errors
    pub fn render(&self, info: &PhoneNumberInfo, errors: &[FormError]) -> Result<String, PageError> {
        let data = build_page_data(info, errors);
        Ok(self.handlebars.render(PAGE_TEMPLATE, &data)?)
    }
}

#[derive(Serialize)]
struct PageData<'a> {
    page_errors: Vec<&'a str>,
    fields: Vec<FieldData<'a>>,
    results: Option<Vec<ResultRow<'a>>>,
}

#[derive(Serialize)]
struct FieldData<'a> {
    id: String,
    name: &'static str,
    label: &'static str,
    value: &'a str,
    max_len: Option<u64>,
    errors: Vec<&'a str>,
}

#[derive(Serialize)]
struct ResultRow<'a> {
    label: &'static str,
    value: &'a str,
}

fn build_page_data<'a>(info: &'a PhoneNumberInfo, errors: &'a [FormError]) -> PageData<'a> {
    let field = move |id: FieldId, value: &'a str, max_len: Option<u64>| FieldData {
        id: id.form_name().replace('.', "_"),
        name: id.form_name(),
        label: id.display_name(),
        value,
        max_len,
        errors: errors
            .iter()
            .filter(|e| e.field == Some(id))
            .map(|e| e.message.as_str())
            .collect(),
    };

    PageData {
        page_errors: errors
            .iter()
            .filter(|e| e.field.is_none())
            .map(|e| e.message.as_str())
            .collect(),
        fields: vec![
            field(FieldId::CountryCodeSelected, info.country_code_selected(), None),
            field(FieldId::PhoneNumberRaw, &info.phone_number_raw, Some(PHONE_NUMBER_MAX_LEN)),
        ],
        results: info.valid.then(|| result_rows(info)),
    }
}

fn result_rows(info: &PhoneNumberInfo) -> Vec<ResultRow<'_>> {
    let mut rows = vec![
        ResultRow { label: "Valid Number", value: "true" },
        ResultRow { label: "Country Code", value: &info.country_code },
        ResultRow { label: "National Dialing Format", value: &info.phone_number_formatted },
        ResultRow { label: "Mobile Dialing Format", value: &info.phone_number_mobile_dialing },
    ];
    if let Some(caller) = &info.caller {
        rows.push(ResultRow { label: "Caller Name", value: &caller.caller_name });
        rows.push(ResultRow { label: "Caller Type", value: &caller.caller_type });
    }
    rows
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("invalid template: {0}")]
    Registration(#[from] handlebars::TemplateError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Failed to render lookup page");
        (StatusCode::INTERNAL_SERVER_ERROR, "page rendering failed").into_response()
    }
}

const LOOKUP_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Phone Number Lookup</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; color: #1f2937; }
        h1 { font-size: 1.5rem; }
        .field { margin-bottom: 1rem; }
        label { display: block; font-weight: 600; margin-bottom: 0.25rem; }
        input { padding: 0.5rem; width: 100%; box-sizing: border-box; }
        .field-error { color: #b91c1c; font-size: 0.875rem; }
        .validation-summary { color: #b91c1c; border: 1px solid #fca5a5; padding: 0.5rem 1rem; margin-bottom: 1rem; }
        button { padding: 0.5rem 1.5rem; }
        table.results { margin-top: 2rem; border-collapse: collapse; }
        table.results th { text-align: left; padding-right: 1.5rem; }
        table.results td, table.results th { padding-top: 0.25rem; padding-bottom: 0.25rem; }
    </style>
</head>
<body>
    <h1>Phone Number Lookup</h1>
{{#if page_errors}}
    <div class="validation-summary"><ul>
{{#each page_errors}}
        <li>{{this}}</li>
{{/each}}
    </ul></div>
{{/if}}
    <form method="post" action="/lookup">
{{#each fields}}
        <div class="field">
            <label for="{{id}}">{{label}}</label>
            <input type="text" id="{{id}}" name="{{name}}" value="{{value}}"{{#if max_len}} maxlength="{{max_len}}"{{/if}}>
{{#each errors}}
            <span class="field-error" data-valmsg-for="{{../name}}">{{this}}</span>
{{/each}}
        </div>
{{/each}}
        <button type="submit">Look up</button>
    </form>
{{#if results}}
    <table class="results">
{{#each results}}
        <tr><th>{{label}}</th><td>{{value}}</td></tr>
{{/each}}
    </table>
{{/if}}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use caller_lookup_core::Caller;

    fn render(info: &PhoneNumberInfo, errors: &[FormError]) -> String {
        LookupPage::new().unwrap().render(info, errors).unwrap()
    }

    #[test]
    fn test_render_empty_form() {
        let html = render(&PhoneNumberInfo::new("US", ""), &[]);
        assert!(html.contains(r#"name="PhoneNumberInfo.CountryCodeSelected" value="US">"#));
        assert!(html.contains(r#"name="PhoneNumberInfo.PhoneNumberRaw" value="" maxlength="18">"#));
        assert!(html.contains(r#"<label for="PhoneNumberInfo_PhoneNumberRaw">Phone Number</label>"#));
        assert!(!html.contains("class=\"results\""));
        assert!(!html.contains("class=\"validation-summary\""));
        assert!(!html.contains("field-error\" data-valmsg-for"));
    }

    #[test]
    fn test_render_results() {
        let mut info = PhoneNumberInfo::new("US", "4155551234");
        info.valid = true;
        info.country_code = "US".into();
        info.phone_number_formatted = "(415) 555-1234".into();
        info.phone_number_mobile_dialing = "+14155551234".into();
        info.caller = Some(Caller {
            caller_name: "Acme & Sons".into(),
            caller_type: "BUSINESS".into(),
            error_code: String::new(),
        });

        let html = render(&info, &[]);
        assert!(html.contains("<tr><th>Valid Number</th><td>true</td></tr>"));
        assert!(html.contains("<tr><th>National Dialing Format</th><td>(415) 555-1234</td></tr>"));
        assert!(html.contains("<tr><th>Mobile Dialing Format</th><td>+14155551234</td></tr>"));
        assert!(html.contains("<tr><th>Caller Name</th><td>Acme &amp; Sons</td></tr>"));
        assert!(html.contains("<tr><th>Caller Type</th><td>BUSINESS</td></tr>"));
    }

    #[test]
    fn test_results_without_caller() {
        let mut info = PhoneNumberInfo::new("US", "4155551234");
        info.valid = true;
        info.country_code = "US".into();

        let html = render(&info, &[]);
        assert!(html.contains("<tr><th>Country Code</th><td>US</td></tr>"));
        assert!(!html.contains("Caller Name"));
    }

    #[test]
    fn test_render_errors() {
        let info = PhoneNumberInfo::new("US", "<script>");
        let errors = vec![
            FormError::field(FieldId::PhoneNumberRaw, "Twilio API Error 20404: not found"),
            FormError::page("DecodeError: bad body"),
        ];

        let html = render(&info, &errors);
        assert!(html.contains("value=\"&lt;script&gt;\""));
        assert!(html.contains(
            "data-valmsg-for=\"PhoneNumberInfo.PhoneNumberRaw\">Twilio API Error 20404: not found</span>"
        ));
        assert!(html.contains("<li>DecodeError: bad body</li>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_values_cannot_break_out_of_attributes() {
        let info = PhoneNumberInfo::new("US", r#""><b>x</b>"#);
        let errors = vec![FormError::page("<img src=x onerror=alert(1)>")];

        let html = render(&info, &errors);
        assert!(html.contains("value=\"&quot;&gt;&lt;b&gt;x&lt;/b&gt;\""));
        assert!(!html.contains("<b>x</b>"));
        assert!(!html.contains("<img"));
    }
}
