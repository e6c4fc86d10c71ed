use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::job_dto::{CreateJobPayload, Pagination, PatchJobPayload, ReplaceJobPayload};
use crate::models::job::{
    AverageSalary, DeletedJob, JobPosting, JobStats, LevelCount, LocationCount, TypeCount,
};
use crate::routes::jobs;

#[derive(OpenApi)]
#[openapi(
    paths(
        jobs::list_jobs,
        jobs::job_stats,
        jobs::get_job,
        jobs::create_job,
        jobs::replace_job,
        jobs::patch_job,
        jobs::delete_job,
    ),
    components(schemas(
        JobPosting,
        DeletedJob,
        JobStats,
        AverageSalary,
        TypeCount,
        LevelCount,
        LocationCount,
        Pagination,
        CreateJobPayload,
        ReplaceJobPayload,
        PatchJobPayload,
    )),
    tags((name = "jobs", description = "Job postings"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
