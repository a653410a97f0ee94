use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceExt;

use arbolado::http::api_router;
use arbolado::MemStore;

fn app() -> Router {
    api_router(Arc::new(RwLock::new(MemStore::new())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn parse_date(value: &Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn test_catalogs_are_seeded() {
    let app = app();

    let (status, types) = send(&app, "GET", "/api/maintenance-types", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(types.as_array().unwrap().len(), 5);

    let (status, reasons) = send(&app, "GET", "/api/extraction-reasons", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reasons.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_location_crud_round_trip() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/locations",
        Some(json!({
            "address": "Av. Rivadavia 4200",
            "neighborhood": "Almagro",
            "coordinates": "-34.61,-58.42"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["address"], "Av. Rivadavia 4200");
    assert_eq!(created["notes"], Value::Null);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/locations/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // partial update: neighborhood changes, explicit null clears coordinates
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/locations/{}", id),
        Some(json!({ "neighborhood": "Caballito", "coordinates": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["neighborhood"], "Caballito");
    assert_eq!(updated["address"], "Av. Rivadavia 4200");
    assert_eq!(updated["coordinates"], Value::Null);

    let (status, _) = send(&app, "DELETE", &format!("/api/locations/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/locations/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // deleting again is still a 204, not an error
    let (status, _) = send(&app, "DELETE", &format!("/api/locations/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_missing_record_is_404() {
    let app = app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/trees/{}", missing),
        Some(json!({ "species": "Ceibo" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected_before_the_store() {
    let app = app();

    // address is required
    let (status, _) = send(
        &app,
        "POST",
        "/api/locations",
        Some(json!({ "neighborhood": "Almagro" })),
    )
    .await;
    assert!(status.is_client_error());

    let (status, locations) = send(&app, "GET", "/api/locations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(locations.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_id_in_path_is_client_error() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/trees/not-a-uuid", None).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_tree_listing_embeds_related_records() {
    let app = app();

    let (_, location) = send(
        &app,
        "POST",
        "/api/locations",
        Some(json!({ "address": "Av. San Martín 2200", "neighborhood": "Paternal" })),
    )
    .await;
    let (_, pit) = send(
        &app,
        "POST",
        "/api/tree-pits",
        Some(json!({ "material": "Concrete", "size": "1.2m x 1.2m" })),
    )
    .await;
    assert_eq!(pit["condition"], "Good condition");

    let (status, tree) = send(
        &app,
        "POST",
        "/api/trees",
        Some(json!({
            "species": "Jacaranda mimosifolia",
            "tree_pit_id": pit["id"],
            "location_id": location["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tree["status"], "alive");

    let (status, details) = send(
        &app,
        "GET",
        &format!("/api/trees/{}", tree["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["location"]["id"], location["id"]);
    assert_eq!(details["tree_pit"]["id"], pit["id"]);
    assert_eq!(details["maintenance"], json!([]));
}

#[tokio::test]
async fn test_maintenance_flow_with_next_due_and_extraction() {
    let app = app();

    let (_, location) = send(
        &app,
        "POST",
        "/api/locations",
        Some(json!({ "address": "Humahuaca 3500", "neighborhood": "Abasto" })),
    )
    .await;
    let (_, pit) = send(
        &app,
        "POST",
        "/api/tree-pits",
        Some(json!({ "material": "Brick", "size": "1m x 1m" })),
    )
    .await;
    let (_, tree) = send(
        &app,
        "POST",
        "/api/trees",
        Some(json!({
            "species": "Fraxinus excelsior",
            "tree_pit_id": pit["id"],
            "location_id": location["id"]
        })),
    )
    .await;
    let tree_id = tree["id"].as_str().unwrap().to_string();

    let (_, types) = send(&app, "GET", "/api/maintenance-types", None).await;
    let find_kind = |kind: &str| {
        types
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["kind"] == kind)
            .unwrap()
            .clone()
    };
    let fertilization = find_kind("fertilization");
    let extraction = find_kind("extraction");

    // next-due derived from the 90-day fertilization frequency
    let (status, event) = send(
        &app,
        "POST",
        "/api/maintenance",
        Some(json!({
            "tree_id": tree_id,
            "type_id": fertilization["id"],
            "performed_at": "2025-03-01T12:00:00Z",
            "responsible": "Parks crew",
            "cost": 120.5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let performed = parse_date(&event["performed_at"]);
    let next_due = parse_date(&event["next_due"]);
    assert_eq!(next_due - performed, Duration::days(90));

    // the extraction event flips the tree's status
    let (_, reasons) = send(&app, "GET", "/api/extraction-reasons", None).await;
    let reason_id = reasons.as_array().unwrap()[0]["id"].clone();

    let (status, extraction_event) = send(
        &app,
        "POST",
        "/api/maintenance",
        Some(json!({
            "tree_id": tree_id,
            "type_id": extraction["id"],
            "performed_at": "2025-04-01T12:00:00Z",
            "extraction_reason_id": reason_id.clone(),
            "responsible": "Parks crew",
            "cost": 900.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(extraction_event["next_due"], Value::Null);

    let (_, details) = send(&app, "GET", &format!("/api/trees/{}", tree_id), None).await;
    assert_eq!(details["status"], "extracted");

    // both events embedded, most recent first, with catalog records resolved
    let embedded = details["maintenance"].as_array().unwrap();
    assert_eq!(embedded.len(), 2);
    assert_eq!(embedded[0]["maintenance_type"]["kind"], "extraction");
    assert_eq!(embedded[0]["extraction_reason"]["id"], reason_id);
    assert_eq!(embedded[1]["maintenance_type"]["kind"], "fertilization");

    let (status, listed) = send(&app, "GET", "/api/maintenance", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["maintenance_type"]["kind"], "extraction");

    // reports reflect the same state
    let (status, report) = send(&app, "GET", "/api/reports/neighborhoods", None).await;
    assert_eq!(status, StatusCode::OK);
    let row = &report.as_array().unwrap()[0];
    assert_eq!(row["neighborhood"], "Abasto");
    assert_eq!(row["total"], 1);
    assert_eq!(row["extracted"], 1);
    assert_eq!(row["maintenance_cost"], 1020.5);

    let (status, stats) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_trees"], 1);
    assert_eq!(stats["extracted"], 1);
    assert_eq!(stats["total_cost"], 1020.5);

    let (status, extractions) = send(&app, "GET", "/api/reports/extractions", None).await;
    assert_eq!(status, StatusCode::OK);
    let extraction_row = &extractions.as_array().unwrap()[0];
    assert_eq!(extraction_row["count"], 1);
    assert_eq!(extraction_row["total_cost"], 900.0);
}
