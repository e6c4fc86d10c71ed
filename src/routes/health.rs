use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    let body = json!({
        "status": "ok",
    });
    Ok((StatusCode::OK, Json(body)))
}
