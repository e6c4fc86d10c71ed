use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

async fn setup_app() -> Router {
    let pool = job_postings_api::database::pool::create_memory_pool()
        .await
        .expect("pool");
    job_postings_api::database::run_migrations(&pool)
        .await
        .expect("migrations");

    job_postings_api::routes::app(job_postings_api::AppState::new(pool))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

async fn create(app: &Router, body: JsonValue) -> JsonValue {
    let (status, body) = send(app, "POST", "/api/jobs", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["data"].clone()
}

fn titles(body: &JsonValue) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_applies_defaults_and_is_retrievable() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({ "title": "Engineer", "location": "Remote" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Job created successfully");
    let job = &body["data"];
    assert_eq!(job["type"], "CLT");
    assert_eq!(job["level"], "junior");
    assert_eq!(job["status"], "active");
    assert!(job["company"].is_null());
    assert!(job["created_at"].is_string());
    assert_eq!(job["created_at"], job["updated_at"]);

    let id = job["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/jobs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], *job);
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let app = setup_app().await;

    let (status, body) = send(&app, "POST", "/api/jobs", Some(json!({ "title": "Engineer" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["required"], json!(["title", "location"]));

    let (status, _) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(json!({ "title": "", "location": "Remote" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/api/jobs", None).await;
    assert_eq!(list["pagination"]["total"], 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = setup_app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn description_is_truncated_on_create_but_not_on_replace() {
    let app = setup_app().await;
    let long = "a".repeat(150);

    let job = create(
        &app,
        json!({ "title": "Engineer", "location": "Remote", "description": long }),
    )
    .await;
    assert_eq!(job["description"].as_str().unwrap().len(), 100);

    let id = job["id"].as_i64().unwrap();
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/jobs/{}", id),
        Some(json!({
            "title": "Engineer",
            "company": "Acme",
            "location": "Remote",
            "description": long,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"].as_str().unwrap().len(), 150);
}

#[tokio::test]
async fn list_filters_by_level() {
    let app = setup_app().await;
    let job = create(&app, json!({ "title": "Engineer", "location": "Remote" })).await;

    let (status, body) = send(&app, "GET", "/api/jobs?level=junior&page=1&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], job["id"]);
    assert_eq!(body["pagination"]["total"], 1);

    let (_, body) = send(&app, "GET", "/api/jobs?level=senior", None).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["total_pages"], 0);
}

#[tokio::test]
async fn pagination_reports_totals_for_the_filtered_set() {
    let app = setup_app().await;
    for i in 0..25 {
        create(
            &app,
            json!({ "title": format!("Job {:02}", i), "location": "Remote", "level": "senior" }),
        )
        .await;
    }
    for i in 0..4 {
        create(&app, json!({ "title": format!("Intern {}", i), "location": "Office" })).await;
    }

    let (_, body) = send(&app, "GET", "/api/jobs?level=senior&page=3&limit=10", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(
        body["pagination"],
        json!({
            "current_page": 3,
            "per_page": 10,
            "total": 25,
            "total_pages": 3,
            "has_next": false,
            "has_prev": true,
        })
    );

    let (_, body) = send(&app, "GET", "/api/jobs", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["total"], 29);
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["has_next"], true);
    assert_eq!(body["pagination"]["has_prev"], false);
}

#[tokio::test]
async fn order_asc_sorts_descending() {
    let app = setup_app().await;
    for title in ["Bravo", "Alpha", "Charlie"] {
        create(&app, json!({ "title": title, "location": "Remote" })).await;
    }

    let (_, body) = send(&app, "GET", "/api/jobs?sort=title&order=asc", None).await;
    assert_eq!(titles(&body), vec!["Charlie", "Bravo", "Alpha"]);

    let (_, body) = send(&app, "GET", "/api/jobs?sort=title&order=desc", None).await;
    assert_eq!(titles(&body), vec!["Alpha", "Bravo", "Charlie"]);

    let (_, body) = send(&app, "GET", "/api/jobs?sort=title&order=ASC", None).await;
    assert_eq!(titles(&body), vec!["Charlie", "Bravo", "Alpha"]);
}

#[tokio::test]
async fn unknown_sort_field_is_harmless() {
    let app = setup_app().await;
    create(&app, json!({ "title": "Engineer", "location": "Remote" })).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/jobs?sort=id%3B%20DROP%20TABLE%20jobs",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn substring_and_salary_filters() {
    let app = setup_app().await;
    create(
        &app,
        json!({
            "title": "Rust Developer",
            "company": "Acme Corp",
            "location": "São Paulo",
            "salary_min": 3000,
            "salary_max": 6000,
            "type": "PJ",
        }),
    )
    .await;
    create(
        &app,
        json!({
            "title": "Go Developer",
            "company": "Globex",
            "location": "Remote",
            "salary_min": 8000,
            "salary_max": 12000,
        }),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/jobs?search=Rust", None).await;
    assert_eq!(titles(&body), vec!["Rust Developer"]);

    let (_, body) = send(&app, "GET", "/api/jobs?company=Glob", None).await;
    assert_eq!(titles(&body), vec!["Go Developer"]);

    let (_, body) = send(&app, "GET", "/api/jobs?location=Paulo&type=PJ", None).await;
    assert_eq!(titles(&body), vec!["Rust Developer"]);

    let (_, body) = send(&app, "GET", "/api/jobs?salary_min=5000", None).await;
    assert_eq!(titles(&body), vec!["Rust Developer"]);

    let (_, body) = send(&app, "GET", "/api/jobs?salary_max=12000&sort=title&order=desc", None).await;
    assert_eq!(titles(&body), vec!["Go Developer", "Rust Developer"]);

    let (_, body) = send(&app, "GET", "/api/jobs?salary_max=5000", None).await;
    assert_eq!(body["pagination"]["total"], 0);

    let (_, body) = send(&app, "GET", "/api/jobs?search=Developer&status=inactive", None).await;
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn missing_job_returns_empty_object() {
    let app = setup_app().await;
    let (status, body) = send(&app, "GET", "/api/jobs/999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn non_numeric_id_reads_as_missing() {
    let app = setup_app().await;
    create(&app, json!({ "title": "Dev", "location": "SP" })).await;

    for uri in ["/api/jobs/abc", "/api/jobs/stats"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!({}), "{}", uri);
    }
}

#[tokio::test]
async fn replace_requires_existing_job_and_company() {
    let app = setup_app().await;

    let (status, body) = send(&app, "PUT", "/api/jobs/42", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job not found");

    let job = create(
        &app,
        json!({ "title": "Engineer", "location": "Remote", "level": "senior", "salary_min": 1000 }),
    )
    .await;
    let uri = format!("/api/jobs/{}", job["id"]);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "title": "Engineer", "location": "Remote" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["required"], json!(["title", "company", "location"]));

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "title": "Lead", "company": "Acme", "location": "Lisbon" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["title"], "Lead");
    assert_eq!(data["company"], "Acme");
    // Every column is overwritten, with defaults for what was left out.
    assert_eq!(data["level"], "junior");
    assert!(data["salary_min"].is_null());
    assert_eq!(data["created_at"], job["created_at"]);
    assert_eq!(data["updated_at"], job["updated_at"]);
}

#[tokio::test]
async fn patch_changes_only_given_fields() {
    let app = setup_app().await;
    let job = create(
        &app,
        json!({ "title": "Engineer", "company": "Acme", "location": "Remote" }),
    )
    .await;
    let uri = format!("/api/jobs/{}", job["id"]);

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "salary_min": 5000 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Job updated successfully");
    let data = &body["data"];
    assert_eq!(data["salary_min"], 5000.0);
    assert_eq!(data["title"], "Engineer");
    assert_eq!(data["company"], "Acme");
    assert_eq!(data["location"], "Remote");
    assert_eq!(data["updated_at"], job["updated_at"]);

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "company": null, "status": "inactive" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["company"].is_null());
    assert_eq!(body["data"]["status"], "inactive");
    assert_eq!(body["data"]["salary_min"], 5000.0);
}

#[tokio::test]
async fn patch_without_allowed_fields_is_rejected() {
    let app = setup_app().await;
    let job = create(&app, json!({ "title": "Engineer", "location": "Remote" })).await;
    let uri = format!("/api/jobs/{}", job["id"]);

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "id": 7, "owner": "me" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["allowed"].as_array().unwrap().len(), 10);

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched["data"], job);

    let (status, _) = send(&app, "PATCH", "/api/jobs/999", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_snapshot() {
    let app = setup_app().await;
    let job = create(&app, json!({ "title": "Engineer", "location": "Remote" })).await;
    let uri = format!("/api/jobs/{}", job["id"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Job deleted successfully");
    assert_eq!(body["data"]["id"], job["id"]);
    assert_eq!(body["data"]["title"], "Engineer");
    assert_eq!(body["data"]["statsu"], "active");
    assert!(body["data"].get("status").is_none());

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_summary() {
    let app = setup_app().await;

    let (status, body) = send(&app, "GET", "/api/jobs/stats/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["average_salary"], json!({ "min": 0, "max": 0 }));

    create(
        &app,
        json!({ "title": "A", "location": "Remote", "salary_min": 1000, "salary_max": 2001 }),
    )
    .await;
    create(
        &app,
        json!({ "title": "B", "location": "Remote", "salary_min": 2000, "salary_max": 4000, "type": "PJ" }),
    )
    .await;
    create(
        &app,
        json!({ "title": "C", "location": "Lisbon", "status": "inactive", "level": "senior" }),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/jobs/stats/summary", None).await;
    let data = &body["data"];
    assert_eq!(data["active"], 2);
    assert_eq!(data["inactive"], 1);
    assert_eq!(data["total"], 4);
    assert_eq!(data["average_salary"], json!({ "min": 1500, "max": 3001 }));

    let by_type = data["by_type"].as_array().unwrap();
    assert!(by_type.contains(&json!({ "type": "CLT", "count": 2 })));
    assert!(by_type.contains(&json!({ "type": "PJ", "count": 1 })));

    let by_level = data["by_level"].as_array().unwrap();
    assert!(by_level.contains(&json!({ "level": "junior", "count": 2 })));
    assert!(by_level.contains(&json!({ "level": "senior", "count": 1 })));

    assert_eq!(
        data["by_location"],
        json!([
            { "location": "Remote", "count": 2 },
            { "location": "Lisbon", "count": 1 },
        ])
    );
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let app = setup_app().await;
    let (status, body) = send(&app, "DELETE", "/api/jobs/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_query_is_a_json_bad_request() {
    let app = setup_app().await;
    let req = Request::builder()
        .method("GET")
        .uri("/api/jobs?level=a&level=b")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn service_routes() {
    let app = setup_app().await;

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"]["GET /api/jobs"].is_string());

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/jobs/{id}"].is_object());

    let (status, body) = send(&app, "GET", "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}
