use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{
    dto::job_dto::{
        CreateJobPayload, JobDeletedResponse, JobListQuery, JobListResponse,
        JobMutationResponse, JobResponse, JobStatsResponse, PatchJobPayload, ReplaceJobPayload,
    },
    error::Result,
    models::job::{DeletedJob, JobPosting, JobStats},
    routes::extract::{AppJson, AppPath, AppQuery},
    services::job_query::QueryPlan,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "jobs",
    params(JobListQuery),
    responses(
        (status = 200, description = "Page of jobs with pagination metadata", body = [JobPosting])
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<JobListQuery>,
) -> Result<impl IntoResponse> {
    let plan = QueryPlan::from_query(&query);
    let result = state.job_service.list(&plan).await?;
    Ok(Json(JobListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/stats/summary",
    tag = "jobs",
    responses(
        (status = 200, description = "Aggregate statistics", body = JobStats)
    )
)]
#[axum::debug_handler]
pub async fn job_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats: JobStats = state.stats_service.summary().await?;
    Ok(Json(JobStatsResponse { data: stats }))
}

/// A missing job answers 200 with an empty object. Ids that are not
/// integers can never match a row and are answered the same way.
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found, or an empty object", body = JobPosting)
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Response> {
    let job = match id.parse::<i64>() {
        Ok(id) => state.job_service.get_by_id(id).await?,
        Err(_) => None,
    };
    let response = match job {
        Some(job) => Json(JobResponse { data: job }).into_response(),
        None => Json(json!({})).into_response(),
    };
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 200, description = "Job created", body = JobPosting),
        (status = 400, description = "Missing title or location")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let job: JobPosting = state.job_service.create(payload).await?;
    Ok(Json(JobMutationResponse {
        message: "Job created successfully".to_string(),
        data: job,
    }))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = ReplaceJobPayload,
    responses(
        (status = 200, description = "Job replaced", body = JobPosting),
        (status = 400, description = "Missing title, company or location"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn replace_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ReplaceJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.replace(id, payload).await?;
    Ok(Json(JobMutationResponse {
        message: "Job updated successfully".to_string(),
        data: job,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = PatchJobPayload,
    responses(
        (status = 200, description = "Job updated", body = JobPosting),
        (status = 400, description = "No updatable field in the payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn patch_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<PatchJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.patch(id, payload).await?;
    Ok(Json(JobMutationResponse {
        message: "Job updated successfully".to_string(),
        data: job,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job deleted, with its last known state", body = DeletedJob),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    let snapshot: DeletedJob = state.job_service.delete(id).await?;
    Ok(Json(JobDeletedResponse {
        message: "Job deleted successfully".to_string(),
        data: snapshot,
    }))
}
