use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[axum::debug_handler]
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Job Postings API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /api/jobs": "List jobs (filters, pagination and sorting)",
            "GET /api/jobs/:id": "Fetch a job by id",
            "POST /api/jobs": "Create a job",
            "PUT /api/jobs/:id": "Replace a job",
            "PATCH /api/jobs/:id": "Partially update a job",
            "DELETE /api/jobs/:id": "Delete a job",
            "GET /api/jobs/stats/summary": "Job statistics",
            "GET /api-docs/openapi.json": "OpenAPI document",
        },
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
