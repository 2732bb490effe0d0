use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ListingError;

static RANGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^₹([0-9]+)L - ₹([0-9]+)L$").expect("salary range regex"));
static LOWER_BOUND_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"₹([0-9]+)L").expect("salary bound regex"));

/// Salary range in lakh units, formatted as `₹<min>L - ₹<max>L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryRange {
    pub min_lakh: u32,
    pub max_lakh: u32,
}

impl SalaryRange {
    /// Parse a fully formatted range. Does not check the bounds' order, since
    /// stored ranges predate any check.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = RANGE_REGEX.captures(raw.trim())?;
        Some(Self {
            min_lakh: caps[1].parse().ok()?,
            max_lakh: caps[2].parse().ok()?,
        })
    }

    /// First `₹<int>L` amount found in `raw`, in lakh. `None` when absent or too large.
    pub fn lower_bound_lakh(raw: &str) -> Option<u64> {
        LOWER_BOUND_REGEX
            .captures(raw)
            .and_then(|caps| caps[1].parse().ok())
    }
}

impl fmt::Display for SalaryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}L - ₹{}L", self.min_lakh, self.max_lakh)
    }
}

/// Raw minimum/maximum salary as entered on the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryForm {
    pub salary_from: String,
    pub salary_to: String,
}

impl SalaryForm {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            salary_from: from.into(),
            salary_to: to.into(),
        }
    }

    /// Validate the raw bounds and build the range. The maximum must exceed the minimum.
    pub fn into_range(self) -> Result<SalaryRange, ListingError> {
        let min_lakh = parse_lakh("salaryFrom", &self.salary_from, "Minimum salary")?;
        let max_lakh = parse_lakh("salaryTo", &self.salary_to, "Maximum salary")?;
        if max_lakh <= min_lakh {
            return Err(ListingError::invalid(
                "salaryTo",
                "Maximum salary must be greater than minimum salary",
            ));
        }
        Ok(SalaryRange { min_lakh, max_lakh })
    }
}

fn parse_lakh(field: &'static str, raw: &str, label: &str) -> Result<u32, ListingError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ListingError::invalid(field, format!("{label} is required")));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ListingError::invalid(field, "Please enter a valid number"));
    }
    raw.parse()
        .map_err(|_| ListingError::invalid(field, "Please enter a valid number"))
}
