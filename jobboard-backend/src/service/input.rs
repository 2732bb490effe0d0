//! Request bodies accepted by the create and update operations.

use chrono::{DateTime, Utc};
use jobboard_core::document::fields;
use jobboard_core::{
    DocumentValue, Fields, JobType, ListingError, ListingStatus, Location, SalaryForm, SalaryRange,
};
use serde::Deserialize;
use serde_json::Value;

use crate::validation::{self, as_form_text, as_text, is_present};

/// Create payload as sent by clients. Fields stay untyped until validated so
/// that a missing field is reported before a malformed one.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    pub title: Option<Value>,
    pub company_name: Option<Value>,
    pub location: Option<Value>,
    pub job_type: Option<Value>,
    pub salary_range: Option<Value>,
    /// Raw lakh bounds, used when `salary_range` is not given.
    pub salary_from: Option<Value>,
    pub salary_to: Option<Value>,
    pub description: Option<Value>,
    pub application_deadline: Option<Value>,
    pub status: Option<Value>,
}

/// A validated listing ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub company_name: String,
    pub location: Location,
    pub job_type: JobType,
    pub salary_range: SalaryRange,
    pub description: String,
    pub application_deadline: DateTime<Utc>,
    pub status: ListingStatus,
}

impl CreateJob {
    pub fn from_json(body: Value) -> Result<Self, ListingError> {
        match body {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(body)
                .map_err(|e| ListingError::invalid("body", e.to_string())),
            _ => Err(ListingError::invalid("body", "request body must be a JSON object")),
        }
    }

    /// Presence first, in field order, then content.
    pub fn validate(self) -> Result<NewListing, ListingError> {
        self.check_presence()?;

        let title = validation::title(as_text(fields::TITLE, self.title.as_ref())?)?;
        let company_name =
            validation::company_name(as_text(fields::COMPANY_NAME, self.company_name.as_ref())?)?;
        let location = validation::location(as_text(fields::LOCATION, self.location.as_ref())?)?;
        let job_type = validation::job_type(as_text(fields::JOB_TYPE, self.job_type.as_ref())?)?;
        let salary_range = if is_present(self.salary_range.as_ref()) {
            validation::salary_range(as_text(fields::SALARY_RANGE, self.salary_range.as_ref())?)?
        } else {
            SalaryForm::new(
                as_form_text(self.salary_from.as_ref()),
                as_form_text(self.salary_to.as_ref()),
            )
            .into_range()?
        };
        let description =
            validation::description(as_text(fields::DESCRIPTION, self.description.as_ref())?)?;
        let application_deadline = validation::deadline(as_text(
            fields::APPLICATION_DEADLINE,
            self.application_deadline.as_ref(),
        )?)?;
        let status = if is_present(self.status.as_ref()) {
            validation::status(as_text(fields::STATUS, self.status.as_ref())?)?
        } else {
            ListingStatus::default()
        };

        Ok(NewListing {
            title,
            company_name,
            location,
            job_type,
            salary_range,
            description,
            application_deadline,
            status,
        })
    }

    fn check_presence(&self) -> Result<(), ListingError> {
        let salary_given = is_present(self.salary_range.as_ref())
            || is_present(self.salary_from.as_ref())
            || is_present(self.salary_to.as_ref());
        let checks = [
            (fields::TITLE, is_present(self.title.as_ref())),
            (fields::COMPANY_NAME, is_present(self.company_name.as_ref())),
            (fields::LOCATION, is_present(self.location.as_ref())),
            (fields::JOB_TYPE, is_present(self.job_type.as_ref())),
            (fields::SALARY_RANGE, salary_given),
            (fields::DESCRIPTION, is_present(self.description.as_ref())),
            (
                fields::APPLICATION_DEADLINE,
                is_present(self.application_deadline.as_ref()),
            ),
        ];
        match checks.into_iter().find(|(_, present)| !present) {
            Some((field, _)) => Err(ListingError::MissingField(field)),
            None => Ok(()),
        }
    }
}

impl NewListing {
    /// Document body with service-assigned timestamps.
    pub fn into_fields(self, now: DateTime<Utc>) -> Fields {
        let mut f = Fields::new();
        f.insert(fields::TITLE.into(), self.title.into());
        f.insert(fields::COMPANY_NAME.into(), self.company_name.into());
        f.insert(fields::LOCATION.into(), self.location.as_str().into());
        f.insert(fields::JOB_TYPE.into(), self.job_type.as_str().into());
        f.insert(fields::SALARY_RANGE.into(), self.salary_range.to_string().into());
        f.insert(fields::DESCRIPTION.into(), self.description.into());
        f.insert(
            fields::APPLICATION_DEADLINE.into(),
            self.application_deadline.into(),
        );
        f.insert(fields::STATUS.into(), self.status.as_str().into());
        f.insert(fields::CREATED_AT.into(), now.into());
        f.insert(fields::UPDATED_AT.into(), now.into());
        f
    }
}

/// Partial update. Only the fields listed here may be changed.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
    pub application_deadline: Option<String>,
    pub status: Option<String>,
}

/// A validated patch. `status` is kept apart because applying it depends on
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingUpdate {
    pub fields: Fields,
    pub status: Option<ListingStatus>,
}

impl JobPatch {
    pub const FIELDS: [&'static str; 8] = [
        fields::TITLE,
        fields::COMPANY_NAME,
        fields::LOCATION,
        fields::JOB_TYPE,
        fields::SALARY_RANGE,
        fields::DESCRIPTION,
        fields::APPLICATION_DEADLINE,
        fields::STATUS,
    ];

    /// Unknown keys are reported by name rather than merged.
    pub fn from_json(body: Value) -> Result<Self, ListingError> {
        let map = match body {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            _ => {
                return Err(ListingError::invalid(
                    "body",
                    "request body must be a JSON object",
                ))
            }
        };
        if let Some(unknown) = map.keys().find(|k| !Self::FIELDS.contains(&k.as_str())) {
            return Err(ListingError::UnknownField(unknown.clone()));
        }
        serde_json::from_value(Value::Object(map))
            .map_err(|e| ListingError::invalid("body", e.to_string()))
    }

    pub fn validate(self) -> Result<ListingUpdate, ListingError> {
        let mut update = ListingUpdate::default();
        let f = &mut update.fields;
        if let Some(v) = self.title {
            f.insert(fields::TITLE.into(), validation::title(&v)?.into());
        }
        if let Some(v) = self.company_name {
            f.insert(fields::COMPANY_NAME.into(), validation::company_name(&v)?.into());
        }
        if let Some(v) = self.location {
            f.insert(fields::LOCATION.into(), validation::location(&v)?.as_str().into());
        }
        if let Some(v) = self.job_type {
            f.insert(fields::JOB_TYPE.into(), validation::job_type(&v)?.as_str().into());
        }
        if let Some(v) = self.salary_range {
            f.insert(
                fields::SALARY_RANGE.into(),
                validation::salary_range(&v)?.to_string().into(),
            );
        }
        if let Some(v) = self.description {
            f.insert(fields::DESCRIPTION.into(), validation::description(&v)?.into());
        }
        if let Some(v) = self.application_deadline {
            f.insert(
                fields::APPLICATION_DEADLINE.into(),
                DocumentValue::Timestamp(validation::deadline(&v)?),
            );
        }
        if let Some(v) = self.status {
            update.status = Some(validation::status(&v)?);
        }
        Ok(update)
    }
}
