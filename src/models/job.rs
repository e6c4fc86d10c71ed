use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const DEFAULT_JOB_TYPE: &str = "CLT";
pub const DEFAULT_LEVEL: &str = "junior";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// Descriptions are cut to this many characters when a job is created.
pub const DESCRIPTION_MAX_CHARS: usize = 100;

pub const JOB_COLUMNS: &str = "id, title, company, location, salary_min, salary_max, type, level, description, requirements, status, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub company: Option<String>,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub job_type: String,
    pub level: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Snapshot of a job as it was right before deletion. Clients of the
/// delete endpoint read the lifecycle label under the `statsu` key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedJob {
    pub id: i64,
    pub title: String,
    pub company: Option<String>,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub level: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "statsu")]
    pub status: String,
}

impl From<JobPosting> for DeletedJob {
    fn from(value: JobPosting) -> Self {
        Self {
            id: value.id,
            title: value.title,
            company: value.company,
            location: value.location,
            salary_min: value.salary_min,
            salary_max: value.salary_max,
            job_type: value.job_type,
            level: value.level,
            description: value.description,
            requirements: value.requirements,
            created_at: value.created_at,
            updated_at: value.updated_at,
            status: value.status,
        }
    }
}

/// Columns a partial update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Company,
    Location,
    SalaryMin,
    SalaryMax,
    Type,
    Level,
    Description,
    Requirements,
    Status,
}

impl JobField {
    pub const ALL: [JobField; 10] = [
        JobField::Title,
        JobField::Company,
        JobField::Location,
        JobField::SalaryMin,
        JobField::SalaryMax,
        JobField::Type,
        JobField::Level,
        JobField::Description,
        JobField::Requirements,
        JobField::Status,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Company => "company",
            JobField::Location => "location",
            JobField::SalaryMin => "salary_min",
            JobField::SalaryMax => "salary_max",
            JobField::Type => "type",
            JobField::Level => "level",
            JobField::Description => "description",
            JobField::Requirements => "requirements",
            JobField::Status => "status",
        }
    }
}

pub const PATCHABLE_FIELDS: &[&str] = &[
    "title",
    "company",
    "location",
    "salary_min",
    "salary_max",
    "type",
    "level",
    "description",
    "requirements",
    "status",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TypeCount {
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub job_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LevelCount {
    pub level: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AverageSalary {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub average_salary: AverageSalary,
    pub by_type: Vec<TypeCount>,
    pub by_level: Vec<LevelCount>,
    pub by_location: Vec<LocationCount>,
}
