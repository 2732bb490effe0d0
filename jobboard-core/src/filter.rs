//! Browsing filter applied to the listing set a client has fetched.
//!
//! All predicates must pass. Filtering keeps the input order and never sorts.

use serde::{Deserialize, Serialize};

use crate::listing::Listing;
use crate::salary::SalaryRange;

/// Default salary window of the browsing UI, in thousands.
pub const DEFAULT_SALARY_RANGE_K: (u64, u64) = (50, 150);

/// Either every value, or exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        if value.is_empty() || value == "all" {
            Choice::All
        } else {
            Choice::Only(value)
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Choice::from(value.to_string())
    }
}

impl From<Choice> for String {
    fn from(value: Choice) -> Self {
        match value {
            Choice::All => "all".to_string(),
            Choice::Only(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    pub search_term: String,
    pub location: Choice,
    pub job_type: Choice,
    /// Inclusive salary window in thousands.
    #[serde(rename = "salaryRangeK")]
    pub salary_range_k: (u64, u64),
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            location: Choice::All,
            job_type: Choice::All,
            salary_range_k: DEFAULT_SALARY_RANGE_K,
        }
    }
}

impl FilterConfig {
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_text(listing)
            && self.location.accepts(&listing.location)
            && self.job_type.accepts(&listing.job_type)
            && self.matches_salary(listing)
    }

    fn matches_text(&self, listing: &Listing) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        listing.title.to_lowercase().contains(&needle)
            || listing.company_name.to_lowercase().contains(&needle)
    }

    /// Unparseable salary data never hides a listing.
    fn matches_salary(&self, listing: &Listing) -> bool {
        let Some(lakh) = SalaryRange::lower_bound_lakh(&listing.salary_range) else {
            return true;
        };
        let Some(thousands) = lakh.checked_mul(10) else {
            return true;
        };
        let (lo, hi) = self.salary_range_k;
        thousands >= lo && thousands <= hi
    }
}

/// Listings from `listings` that pass every predicate of `config`, in input order.
pub fn filter(listings: &[Listing], config: &FilterConfig) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| config.matches(l))
        .cloned()
        .collect()
}
