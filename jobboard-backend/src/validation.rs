//! Content rules for listing fields supplied by clients.

use jobboard_core::document::fields;
use jobboard_core::{parse_deadline, JobType, ListingError, ListingStatus, Location, SalaryRange};
use serde_json::Value;

pub const TITLE_MAX_CHARS: usize = 100;
pub const COMPANY_NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// JSON truthiness: absent, null, empty string, `false` and zero count as missing.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

pub fn as_text<'a>(field: &'static str, value: Option<&'a Value>) -> Result<&'a str, ListingError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        None | Some(Value::Null) => Err(ListingError::MissingField(field)),
        Some(_) => Err(ListingError::invalid(field, format!("{field} must be a string"))),
    }
}

/// Numbers are accepted as-is for form fields that browsers may send either way.
pub fn as_form_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn bounded(
    field: &'static str,
    raw: &str,
    min: usize,
    max: usize,
    label: &str,
) -> Result<String, ListingError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(ListingError::invalid(field, format!("{label} must not be empty")));
    }
    if len < min {
        return Err(ListingError::invalid(
            field,
            format!("{label} must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(ListingError::invalid(
            field,
            format!("{label} must be at most {max} characters"),
        ));
    }
    if trimmed.chars().any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t') {
        return Err(ListingError::invalid(
            field,
            format!("{label} contains control characters"),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn title(raw: &str) -> Result<String, ListingError> {
    bounded(fields::TITLE, raw, 1, TITLE_MAX_CHARS, "Job title")
}

pub fn company_name(raw: &str) -> Result<String, ListingError> {
    bounded(fields::COMPANY_NAME, raw, 1, COMPANY_NAME_MAX_CHARS, "Company name")
}

pub fn description(raw: &str) -> Result<String, ListingError> {
    bounded(
        fields::DESCRIPTION,
        raw,
        DESCRIPTION_MIN_CHARS,
        DESCRIPTION_MAX_CHARS,
        "Description",
    )
}

pub fn location(raw: &str) -> Result<Location, ListingError> {
    raw.trim().parse()
}

pub fn job_type(raw: &str) -> Result<JobType, ListingError> {
    raw.trim().parse()
}

pub fn salary_range(raw: &str) -> Result<SalaryRange, ListingError> {
    let range = SalaryRange::parse(raw).ok_or_else(|| {
        ListingError::invalid(
            fields::SALARY_RANGE,
            "Salary range must look like ₹<min>L - ₹<max>L",
        )
    })?;
    if range.max_lakh <= range.min_lakh {
        return Err(ListingError::invalid(
            fields::SALARY_RANGE,
            "Maximum salary must be greater than minimum salary",
        ));
    }
    Ok(range)
}

pub fn status(raw: &str) -> Result<ListingStatus, ListingError> {
    raw.trim().parse()
}

pub fn deadline(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, ListingError> {
    parse_deadline(raw)
}
