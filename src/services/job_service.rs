use crate::dto::job_dto::{CreateJobPayload, JobRecord, PatchJobPayload, ReplaceJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{DeletedJob, JobPosting, JOB_COLUMNS, PATCHABLE_FIELDS};
use crate::services::job_query::QueryPlan;
use crate::utils::time::now;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

#[derive(Clone)]
pub struct JobService {
    pool: SqlitePool,
}

pub struct JobList {
    pub items: Vec<JobPosting>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self, plan: &QueryPlan) -> Result<i64> {
        let mut statement = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM jobs");
        plan.push_filters(&mut statement);
        let total = statement
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn list(&self, plan: &QueryPlan) -> Result<JobList> {
        tracing::debug!(
            filters = %plan.where_clause(),
            params = ?plan.params(),
            order = %plan.order_clause(),
            limit = plan.limit,
            offset = plan.offset,
            "Listing jobs"
        );

        let total = self.count(plan).await?;

        let mut statement = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
        plan.push_filters(&mut statement);
        plan.push_page(&mut statement);
        let items = statement
            .build_query_as::<JobPosting>()
            .fetch_all(&self.pool)
            .await?;

        Ok(JobList {
            items,
            total,
            page: plan.page,
            per_page: plan.limit,
            total_pages: plan.total_pages(total),
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<JobPosting>> {
        let job = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {} FROM jobs WHERE id = ?",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn require(&self, id: i64) -> Result<JobPosting> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<JobPosting> {
        let record = JobRecord::from_create(payload)?;
        let created_at = now();

        let job = sqlx::query_as::<_, JobPosting>(&format!(
            r#"
            INSERT INTO jobs (
                title, company, location, salary_min, salary_max,
                type, level, description, requirements, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(record.title)
        .bind(record.company)
        .bind(record.location)
        .bind(record.salary_min)
        .bind(record.salary_max)
        .bind(record.job_type)
        .bind(record.level)
        .bind(record.description)
        .bind(record.requirements)
        .bind(record.status)
        .bind(created_at)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(job_id = job.id, "Job created");
        Ok(job)
    }

    /// Overwrites every mutable column. `updated_at` keeps its creation value.
    pub async fn replace(&self, id: i64, payload: ReplaceJobPayload) -> Result<JobPosting> {
        self.require(id).await?;
        let record = JobRecord::from_replace(payload)?;

        let job = sqlx::query_as::<_, JobPosting>(&format!(
            r#"
            UPDATE jobs
            SET
                title = ?,
                company = ?,
                location = ?,
                salary_min = ?,
                salary_max = ?,
                type = ?,
                level = ?,
                description = ?,
                requirements = ?,
                status = ?
            WHERE id = ?
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(record.title)
        .bind(record.company)
        .bind(record.location)
        .bind(record.salary_min)
        .bind(record.salary_max)
        .bind(record.job_type)
        .bind(record.level)
        .bind(record.description)
        .bind(record.requirements)
        .bind(record.status)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(job_id = id, "Job replaced");
        Ok(job)
    }

    pub async fn patch(&self, id: i64, payload: PatchJobPayload) -> Result<JobPosting> {
        self.require(id).await?;

        let changes = payload.changes();
        if changes.is_empty() {
            return Err(Error::NoUpdatableFields {
                allowed: PATCHABLE_FIELDS,
            });
        }

        let mut statement = QueryBuilder::<Sqlite>::new("UPDATE jobs SET ");
        for (index, (field, value)) in changes.iter().enumerate() {
            if index > 0 {
                statement.push(", ");
            }
            statement.push(field.column()).push(" = ");
            value.bind_to(&mut statement);
        }
        statement.push(" WHERE id = ").push_bind(id);
        statement.push(format!(" RETURNING {}", JOB_COLUMNS));

        let job = statement
            .build_query_as::<JobPosting>()
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(job_id = id, fields = changes.len(), "Job patched");
        Ok(job)
    }

    pub async fn delete(&self, id: i64) -> Result<DeletedJob> {
        let existing = self.require(id).await?;

        sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(job_id = id, "Job deleted");
        Ok(DeletedJob::from(existing))
    }
}
