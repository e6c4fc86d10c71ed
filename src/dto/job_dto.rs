use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::Result;
use crate::models::job::{
    DeletedJob, JobField, JobPosting, JobStats, DEFAULT_JOB_TYPE, DEFAULT_LEVEL,
    DESCRIPTION_MAX_CHARS, STATUS_ACTIVE,
};
use crate::services::job_query::SqlValue;
use crate::services::job_service::JobList;
use crate::utils::text::{non_empty, non_zero, truncate_chars};
use crate::utils::validation::validate_required;

pub const CREATE_REQUIRED_FIELDS: &[&str] = &["title", "location"];
pub const REPLACE_REQUIRED_FIELDS: &[&str] = &["title", "company", "location"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobPayload {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    pub company: Option<String>,
    #[validate(required, length(min = 1))]
    pub location: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: Option<String>,
}

/// Full replacement of a job. Unlike creation, `company` is mandatory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReplaceJobPayload {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub company: Option<String>,
    #[validate(required, length(min = 1))]
    pub location: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: Option<String>,
}

/// Partial update. Nullable columns distinguish an explicit `null` (clear the
/// value) from a missing key (leave it alone); keys outside the patchable
/// set are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PatchJobPayload {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub company: Option<Option<String>>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub salary_min: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub salary_max: Option<Option<f64>>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub level: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub requirements: Option<Option<String>>,
    pub status: Option<String>,
}

fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PatchJobPayload {
    /// Columns to overwrite, in declaration order of [`JobField::ALL`].
    pub fn changes(self) -> Vec<(JobField, SqlValue)> {
        let candidates = [
            (JobField::Title, self.title.map(SqlValue::Text)),
            (JobField::Company, self.company.map(SqlValue::from)),
            (JobField::Location, self.location.map(SqlValue::Text)),
            (JobField::SalaryMin, self.salary_min.map(SqlValue::from)),
            (JobField::SalaryMax, self.salary_max.map(SqlValue::from)),
            (JobField::Type, self.job_type.map(SqlValue::Text)),
            (JobField::Level, self.level.map(SqlValue::Text)),
            (JobField::Description, self.description.map(SqlValue::from)),
            (JobField::Requirements, self.requirements.map(SqlValue::from)),
            (JobField::Status, self.status.map(SqlValue::Text)),
        ];

        candidates
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }
}

/// Fully resolved column values for an insert or a full replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub title: String,
    pub company: Option<String>,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub job_type: String,
    pub level: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: String,
}

impl JobRecord {
    pub fn from_create(payload: CreateJobPayload) -> Result<Self> {
        validate_required(&payload, CREATE_REQUIRED_FIELDS)?;
        let (Some(title), Some(location)) = (payload.title, payload.location) else {
            return Err(crate::error::Error::MissingFields {
                required: CREATE_REQUIRED_FIELDS,
            });
        };

        Ok(Self {
            title,
            company: non_empty(payload.company),
            location,
            salary_min: non_zero(payload.salary_min),
            salary_max: non_zero(payload.salary_max),
            job_type: or_default(payload.job_type, DEFAULT_JOB_TYPE),
            level: or_default(payload.level, DEFAULT_LEVEL),
            description: non_empty(payload.description)
                .map(|text| truncate_chars(&text, DESCRIPTION_MAX_CHARS)),
            requirements: non_empty(payload.requirements),
            status: or_default(payload.status, STATUS_ACTIVE),
        })
    }

    /// Descriptions are stored as given on replacement, whatever their length.
    pub fn from_replace(payload: ReplaceJobPayload) -> Result<Self> {
        validate_required(&payload, REPLACE_REQUIRED_FIELDS)?;
        let (Some(title), Some(company), Some(location)) =
            (payload.title, payload.company, payload.location)
        else {
            return Err(crate::error::Error::MissingFields {
                required: REPLACE_REQUIRED_FIELDS,
            });
        };

        Ok(Self {
            title,
            company: Some(company),
            location,
            salary_min: non_zero(payload.salary_min),
            salary_max: non_zero(payload.salary_max),
            job_type: or_default(payload.job_type, DEFAULT_JOB_TYPE),
            level: or_default(payload.level, DEFAULT_LEVEL),
            description: non_empty(payload.description),
            requirements: non_empty(payload.requirements),
            status: or_default(payload.status, STATUS_ACTIVE),
        })
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or_else(|| default.to_string())
}

/// Listing parameters. Everything arrives as text and is interpreted
/// leniently when the query plan is built.
#[derive(Debug, Clone, Serialize, Deserialize, Default, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct JobListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub data: Vec<JobPosting>,
    pub pagination: Pagination,
}

impl From<JobList> for JobListResponse {
    fn from(value: JobList) -> Self {
        Self {
            pagination: Pagination {
                current_page: value.page,
                per_page: value.per_page,
                total: value.total,
                total_pages: value.total_pages,
                has_next: value.page < value.total_pages,
                has_prev: value.page > 1,
            },
            data: value.items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub data: JobPosting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatsResponse {
    pub data: JobStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMutationResponse {
    pub message: String,
    pub data: JobPosting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDeletedResponse {
    pub message: String,
    pub data: DeletedJob,
}
