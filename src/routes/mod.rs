pub mod docs;
pub mod extract;
pub mod health;
pub mod index;
pub mod jobs;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{middleware::cors::permissive_cors, AppState};

pub fn app(state: AppState) -> Router {
    let base_routes = Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    let jobs_api = Router::new()
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/stats/summary", get(jobs::job_stats))
        .route(
            "/api/jobs/:id",
            get(jobs::get_job)
                .put(jobs::replace_job)
                .patch(jobs::patch_job)
                .delete(jobs::delete_job),
        );

    base_routes
        .merge(jobs_api)
        .fallback(index::not_found)
        .with_state(state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
}
