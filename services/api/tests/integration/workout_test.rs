use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use crate::helpers::{
    FailingWorkoutRepo, InMemoryUserRepo, InMemoryWorkoutRepo, SlowWorkoutRepo, empty_request,
    json_request, leg_day, send, test_router, test_router_with_timeout,
};

fn raw_json_request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn router_with_store() -> (axum::Router, InMemoryWorkoutRepo) {
    let workouts = InMemoryWorkoutRepo::default();
    let router = test_router(workouts.clone(), InMemoryUserRepo::default());
    (router, workouts)
}

// ── POST /workouts ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_workout_with_populated_ids() {
    let (router, _) = router_with_store();

    let resp = send(&router, json_request("POST", "/workouts", leg_day())).await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let data = &resp.json()["data"];
    let id = data["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(data["title"], "Leg Day");
    let entries = data["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["workout_id"].as_i64().unwrap(), id);
    assert_eq!(entries[0]["name"], "Squat");
    assert_eq!(entries[1]["name"], "Wall Sit");
    assert!(entries.iter().all(|e| e["id"].as_i64().unwrap() > 0));
    assert_eq!(entries[1]["reps"], serde_json::Value::Null);
    assert_eq!(entries[1]["duration_seconds"], 45);
}

#[tokio::test]
async fn should_render_pretty_json_with_trailing_newline() {
    let (router, _) = router_with_store();

    let resp = send(&router, json_request("POST", "/workouts", leg_day())).await;

    assert_eq!(
        resp.headers.get("content-type").unwrap(),
        "application/json"
    );
    let text = resp.text();
    assert!(text.starts_with("{\n \"data\": {"), "{text}");
    assert!(text.ends_with("}\n"));
}

#[tokio::test]
async fn should_reject_malformed_workout_body() {
    let (router, workouts) = router_with_store();

    let resp = send(
        &router,
        json_request("POST", "/workouts", serde_json::json!({ "title": 42 })),
    )
    .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let message = resp.json()["error"].as_str().unwrap().to_owned();
    assert!(message.starts_with("invalid request body"), "{message}");
    assert_eq!(workouts.len(), 0);
}

#[tokio::test]
async fn should_return_500_without_leaking_store_error() {
    let router = test_router(FailingWorkoutRepo, InMemoryUserRepo::default());

    let resp = send(&router, json_request("POST", "/workouts", leg_day())).await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.json(),
        serde_json::json!({ "error": "internal server error" })
    );
}

// ── GET /workouts/{id} ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_get_created_workout() {
    let (router, _) = router_with_store();
    let created = send(&router, json_request("POST", "/workouts", leg_day())).await;
    let id = created.json()["data"]["id"].as_i64().unwrap();

    let resp = send(&router, empty_request("GET", &format!("/workouts/{id}"))).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["data"], created.json()["data"]);
}

#[tokio::test]
async fn should_return_404_for_unknown_workout() {
    let (router, _) = router_with_store();

    let resp = send(&router, empty_request("GET", "/workouts/999999")).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json(), serde_json::json!({ "error": "workout not found" }));
}

#[tokio::test]
async fn should_return_400_for_non_numeric_id() {
    let (router, _) = router_with_store();

    for method in ["GET", "DELETE"] {
        let resp = send(&router, empty_request(method, "/workouts/abc")).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(resp.json(), serde_json::json!({ "error": "invalid workout id" }));
    }
}

// ── PUT /workouts/{id} ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_merge_scalars_and_keep_entries_when_absent() {
    let (router, _) = router_with_store();
    let created = send(&router, json_request("POST", "/workouts", leg_day())).await;
    let id = created.json()["data"]["id"].as_i64().unwrap();

    let resp = send(
        &router,
        json_request(
            "PUT",
            &format!("/workouts/{id}"),
            serde_json::json!({ "title": "Heavy Leg Day", "calories_burned": 650 }),
        ),
    )
    .await;

    assert_eq!(resp.status, StatusCode::OK);
    let data = &resp.json()["data"];
    assert_eq!(data["title"], "Heavy Leg Day");
    assert_eq!(data["calories_burned"], 650);
    assert_eq!(data["description"], "lower body");
    assert_eq!(data["duration_minutes"], 60);
    let names: Vec<&str> = data["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Squat", "Wall Sit"]);
}

#[tokio::test]
async fn should_replace_entries_when_supplied() {
    let (router, _) = router_with_store();
    let created = send(&router, json_request("POST", "/workouts", leg_day())).await;
    let id = created.json()["data"]["id"].as_i64().unwrap();

    let resp = send(
        &router,
        json_request(
            "PUT",
            &format!("/workouts/{id}"),
            serde_json::json!({ "entries": [{ "name": "Deadlift", "sets": 3, "reps": 3 }] }),
        ),
    )
    .await;

    assert_eq!(resp.status, StatusCode::OK);
    let fetched = send(&router, empty_request("GET", &format!("/workouts/{id}"))).await;
    let data = &fetched.json()["data"];
    assert_eq!(data["title"], "Leg Day");
    let entries = data["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Deadlift");
    assert_eq!(entries[0]["order_index"], 0);
}

#[tokio::test]
async fn should_clear_entries_with_empty_array() {
    let (router, _) = router_with_store();
    let created = send(&router, json_request("POST", "/workouts", leg_day())).await;
    let id = created.json()["data"]["id"].as_i64().unwrap();

    let resp = send(
        &router,
        json_request(
            "PUT",
            &format!("/workouts/{id}"),
            serde_json::json!({ "entries": [] }),
        ),
    )
    .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["data"]["entries"], serde_json::json!([]));
}

#[tokio::test]
async fn should_return_404_when_updating_unknown_workout() {
    let (router, _) = router_with_store();

    let resp = send(
        &router,
        json_request("PUT", "/workouts/77", serde_json::json!({ "title": "x" })),
    )
    .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_report_unknown_workout_before_malformed_body() {
    let (router, _) = router_with_store();

    let resp = send(&router, raw_json_request("PUT", "/workouts/77", "{\"title\": ")).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json(), serde_json::json!({ "error": "workout not found" }));
}

#[tokio::test]
async fn should_reject_malformed_body_for_existing_workout() {
    let (router, _) = router_with_store();
    let created = send(&router, json_request("POST", "/workouts", leg_day())).await;
    let id = created.json()["data"]["id"].as_i64().unwrap();

    let resp = send(
        &router,
        raw_json_request("PUT", &format!("/workouts/{id}"), "{\"duration_minutes\": \"long\"}"),
    )
    .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let message = resp.json()["error"].as_str().unwrap().to_owned();
    assert!(message.starts_with("invalid request body"), "{message}");
    let fetched = send(&router, empty_request("GET", &format!("/workouts/{id}"))).await;
    assert_eq!(fetched.json()["data"], created.json()["data"]);
}

// ── DELETE /workouts/{id} ────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_workout_then_return_404() {
    let (router, workouts) = router_with_store();
    let created = send(&router, json_request("POST", "/workouts", leg_day())).await;
    let id = created.json()["data"]["id"].as_i64().unwrap();

    let resp = send(&router, empty_request("DELETE", &format!("/workouts/{id}"))).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.json(),
        serde_json::json!({ "message": "workout deleted successfully" })
    );
    assert_eq!(workouts.len(), 0);

    let resp = send(&router, empty_request("GET", &format!("/workouts/{id}"))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = send(&router, empty_request("DELETE", &format!("/workouts/{id}"))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

// ── Ambient ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_health_check() {
    let (router, _) = router_with_store();

    let resp = send(&router, empty_request("GET", "/health")).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "Hello world!\n");
}

#[tokio::test]
async fn should_attach_request_id_to_every_response() {
    let (router, _) = router_with_store();

    for request in [
        empty_request("GET", "/health"),
        empty_request("GET", "/workouts/1"),
    ] {
        let resp = send(&router, request).await;
        let id = resp.headers.get("x-request-id").unwrap().to_str().unwrap();
        assert_eq!(id.len(), 36, "{id}");
    }
}

#[tokio::test]
async fn should_answer_slow_requests_with_json_timeout() {
    let router = test_router_with_timeout(
        SlowWorkoutRepo {
            delay: Duration::from_secs(5),
        },
        InMemoryUserRepo::default(),
        Duration::from_millis(20),
    );

    let resp = send(&router, empty_request("GET", "/workouts/1")).await;

    assert_eq!(resp.status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        resp.headers.get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(resp.json(), serde_json::json!({ "error": "request timed out" }));
    assert!(resp.headers.contains_key("x-request-id"));
}
