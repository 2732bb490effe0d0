use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ListingError;

/// Cities a listing may be posted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Bangalore,
    Mumbai,
    Delhi,
    Pune,
    Chennai,
    Hyderabad,
}

impl Location {
    pub const ALL: [Location; 6] = [
        Location::Bangalore,
        Location::Mumbai,
        Location::Delhi,
        Location::Pune,
        Location::Chennai,
        Location::Hyderabad,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Location::Bangalore => "Bangalore",
            Location::Mumbai => "Mumbai",
            Location::Delhi => "Delhi",
            Location::Pune => "Pune",
            Location::Chennai => "Chennai",
            Location::Hyderabad => "Hyderabad",
        }
    }
}

impl FromStr for Location {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| ListingError::invalid("location", format!("unknown location '{s}'")))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }
}

impl FromStr for JobType {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ListingError::invalid("jobType", format!("unknown job type '{s}'")))
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication state of a listing. Only published listings are visible by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Draft,
    #[default]
    Published,
}

impl ListingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Draft => "draft",
            ListingStatus::Published => "published",
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    ///
    /// | from      | to        | allowed |
    /// |-----------|-----------|---------|
    /// | draft     | draft     | yes     |
    /// | draft     | published | yes     |
    /// | published | published | yes     |
    /// | published | draft     | no      |
    pub const fn can_transition_to(self, next: ListingStatus) -> bool {
        matches!(
            (self, next),
            (ListingStatus::Draft, _) | (ListingStatus::Published, ListingStatus::Published)
        )
    }

    pub fn transition_to(self, next: ListingStatus) -> Result<ListingStatus, ListingError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ListingError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl FromStr for ListingStatus {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ListingStatus::Draft),
            "published" => Ok(ListingStatus::Published),
            other => Err(ListingError::invalid(
                "status",
                format!("status must be draft or published, got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire record for a listing, as returned by every read and write endpoint.
///
/// Enumerated fields are carried as strings: stored documents may hold values
/// written by other tools, and a record is returned even when they fall
/// outside the closed sets above.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub job_type: String,
    pub salary_range: String,
    pub description: String,
    pub application_deadline: String,
    pub status: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Listing {
    pub fn is_published(&self) -> bool {
        self.status == ListingStatus::Published.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_sets_round_trip_through_strings() {
        for l in Location::ALL {
            assert_eq!(l.as_str().parse::<Location>().unwrap(), l);
        }
        for t in JobType::ALL {
            assert_eq!(t.as_str().parse::<JobType>().unwrap(), t);
        }
        assert!("Goa".parse::<Location>().is_err());
        assert!("full-time".parse::<JobType>().is_err());
    }

    #[test]
    fn status_transition_table() {
        use ListingStatus::*;
        assert_eq!(Draft.transition_to(Published).unwrap(), Published);
        assert_eq!(Draft.transition_to(Draft).unwrap(), Draft);
        assert_eq!(Published.transition_to(Published).unwrap(), Published);
        let err = Published.transition_to(Draft).unwrap_err();
        assert_eq!(err.field(), "status");
    }

    #[test]
    fn listing_serializes_camel_case_without_missing_updated_at() {
        let listing = Listing {
            id: "abc".into(),
            company_name: "Amazon".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(&listing).unwrap();
        assert_eq!(v["companyName"], "Amazon");
        assert!(v.get("updatedAt").is_none());
        assert!(v.get("_id").is_none());
    }
}
