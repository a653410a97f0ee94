//! REST surface over the registry store.
//!
//! Thin translation layer: routes map URLs to store operations and shape the
//! outcomes into status codes and JSON bodies. All domain behavior lives in
//! [`MemStore`]; the store is built once at process start and injected here.

pub mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::entity::{
    ExtractionReason, ExtractionReasonUpdate, Location, LocationUpdate, MaintenanceDetails,
    MaintenanceEvent, MaintenanceType, MaintenanceTypeUpdate, MaintenanceUpdate,
    NewExtractionReason, NewLocation, NewMaintenanceEvent, NewMaintenanceType, NewTree, NewTreePit,
    Tree, TreeDetails, TreePit, TreePitUpdate, TreeUpdate,
};
use crate::error::{ArboladoError, EntityKind, Result};
use crate::report;
use crate::storage::MemStore;
use error::ApiError;

/// The registry store as shared by every handler.
pub type SharedStore = Arc<RwLock<MemStore>>;

/// Build the API router over an injected store.
pub fn api_router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/locations", get(list_locations).post(create_location))
        .route(
            "/api/locations/{id}",
            get(get_location).put(update_location).delete(delete_location),
        )
        .route("/api/tree-pits", get(list_tree_pits).post(create_tree_pit))
        .route(
            "/api/tree-pits/{id}",
            get(get_tree_pit).put(update_tree_pit).delete(delete_tree_pit),
        )
        .route(
            "/api/maintenance-types",
            get(list_maintenance_types).post(create_maintenance_type),
        )
        .route(
            "/api/maintenance-types/{id}",
            get(get_maintenance_type)
                .put(update_maintenance_type)
                .delete(delete_maintenance_type),
        )
        .route(
            "/api/extraction-reasons",
            get(list_extraction_reasons).post(create_extraction_reason),
        )
        .route(
            "/api/extraction-reasons/{id}",
            get(get_extraction_reason)
                .put(update_extraction_reason)
                .delete(delete_extraction_reason),
        )
        .route("/api/trees", get(list_trees).post(create_tree))
        .route(
            "/api/trees/{id}",
            get(get_tree).put(update_tree).delete(delete_tree),
        )
        .route("/api/maintenance", get(list_maintenance).post(create_maintenance))
        .route(
            "/api/maintenance/{id}",
            get(get_maintenance)
                .put(update_maintenance)
                .delete(delete_maintenance),
        )
        .route("/api/reports/neighborhoods", get(report_neighborhoods))
        .route(
            "/api/reports/maintenance-types",
            get(report_maintenance_types),
        )
        .route("/api/reports/extractions", get(report_extractions))
        .route("/api/stats", get(dashboard_stats))
        .with_state(store)
}

/// Serve the API on `addr` until a shutdown signal arrives.
pub async fn serve(store: SharedStore, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "arbolado API listening");

    axum::serve(listener, api_router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

fn or_not_found<T>(value: Option<T>, kind: EntityKind, id: Uuid) -> std::result::Result<Json<T>, ApiError> {
    match value {
        Some(value) => Ok(Json(value)),
        None => Err(ApiError(ArboladoError::not_found(kind, id))),
    }
}

// ========== Locations ==========

async fn list_locations(State(store): State<SharedStore>) -> Json<Vec<Location>> {
    Json(store.read().await.locations())
}

async fn get_location(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> std::result::Result<Json<Location>, ApiError> {
    or_not_found(store.read().await.location(id), EntityKind::Location, id)
}

async fn create_location(
    State(store): State<SharedStore>,
    Json(new): Json<NewLocation>,
) -> (StatusCode, Json<Location>) {
    let location = store.write().await.create_location(new);
    (StatusCode::CREATED, Json(location))
}

async fn update_location(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(update): Json<LocationUpdate>,
) -> std::result::Result<Json<Location>, ApiError> {
    let location = store.write().await.update_location(id, update)?;
    Ok(Json(location))
}

async fn delete_location(State(store): State<SharedStore>, Path(id): Path<Uuid>) -> StatusCode {
    store.write().await.delete_location(id);
    StatusCode::NO_CONTENT
}

// ========== Tree pits ==========

async fn list_tree_pits(State(store): State<SharedStore>) -> Json<Vec<TreePit>> {
    Json(store.read().await.tree_pits())
}

async fn get_tree_pit(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> std::result::Result<Json<TreePit>, ApiError> {
    or_not_found(store.read().await.tree_pit(id), EntityKind::TreePit, id)
}

async fn create_tree_pit(
    State(store): State<SharedStore>,
    Json(new): Json<NewTreePit>,
) -> (StatusCode, Json<TreePit>) {
    let pit = store.write().await.create_tree_pit(new);
    (StatusCode::CREATED, Json(pit))
}

async fn update_tree_pit(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(update): Json<TreePitUpdate>,
) -> std::result::Result<Json<TreePit>, ApiError> {
    let pit = store.write().await.update_tree_pit(id, update)?;
    Ok(Json(pit))
}

async fn delete_tree_pit(State(store): State<SharedStore>, Path(id): Path<Uuid>) -> StatusCode {
    store.write().await.delete_tree_pit(id);
    StatusCode::NO_CONTENT
}

// ========== Maintenance types ==========

async fn list_maintenance_types(State(store): State<SharedStore>) -> Json<Vec<MaintenanceType>> {
    Json(store.read().await.maintenance_types())
}

async fn get_maintenance_type(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> std::result::Result<Json<MaintenanceType>, ApiError> {
    or_not_found(
        store.read().await.maintenance_type(id),
        EntityKind::MaintenanceType,
        id,
    )
}

async fn create_maintenance_type(
    State(store): State<SharedStore>,
    Json(new): Json<NewMaintenanceType>,
) -> (StatusCode, Json<MaintenanceType>) {
    let maintenance_type = store.write().await.create_maintenance_type(new);
    (StatusCode::CREATED, Json(maintenance_type))
}

async fn update_maintenance_type(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(update): Json<MaintenanceTypeUpdate>,
) -> std::result::Result<Json<MaintenanceType>, ApiError> {
    let maintenance_type = store.write().await.update_maintenance_type(id, update)?;
    Ok(Json(maintenance_type))
}

async fn delete_maintenance_type(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    store.write().await.delete_maintenance_type(id);
    StatusCode::NO_CONTENT
}

// ========== Extraction reasons ==========

async fn list_extraction_reasons(
    State(store): State<SharedStore>,
) -> Json<Vec<ExtractionReason>> {
    Json(store.read().await.extraction_reasons())
}

async fn get_extraction_reason(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> std::result::Result<Json<ExtractionReason>, ApiError> {
    or_not_found(
        store.read().await.extraction_reason(id),
        EntityKind::ExtractionReason,
        id,
    )
}

async fn create_extraction_reason(
    State(store): State<SharedStore>,
    Json(new): Json<NewExtractionReason>,
) -> (StatusCode, Json<ExtractionReason>) {
    let reason = store.write().await.create_extraction_reason(new);
    (StatusCode::CREATED, Json(reason))
}

async fn update_extraction_reason(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(update): Json<ExtractionReasonUpdate>,
) -> std::result::Result<Json<ExtractionReason>, ApiError> {
    let reason = store.write().await.update_extraction_reason(id, update)?;
    Ok(Json(reason))
}

async fn delete_extraction_reason(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    store.write().await.delete_extraction_reason(id);
    StatusCode::NO_CONTENT
}

// ========== Trees ==========

async fn list_trees(State(store): State<SharedStore>) -> Json<Vec<TreeDetails>> {
    Json(store.read().await.trees_with_details())
}

async fn get_tree(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> std::result::Result<Json<TreeDetails>, ApiError> {
    or_not_found(store.read().await.tree_with_details(id), EntityKind::Tree, id)
}

async fn create_tree(
    State(store): State<SharedStore>,
    Json(new): Json<NewTree>,
) -> (StatusCode, Json<Tree>) {
    let tree = store.write().await.create_tree(new);
    (StatusCode::CREATED, Json(tree))
}

async fn update_tree(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(update): Json<TreeUpdate>,
) -> std::result::Result<Json<Tree>, ApiError> {
    let tree = store.write().await.update_tree(id, update)?;
    Ok(Json(tree))
}

async fn delete_tree(State(store): State<SharedStore>, Path(id): Path<Uuid>) -> StatusCode {
    store.write().await.delete_tree(id);
    StatusCode::NO_CONTENT
}

// ========== Maintenance ==========

async fn list_maintenance(State(store): State<SharedStore>) -> Json<Vec<MaintenanceDetails>> {
    Json(store.read().await.maintenance_with_details())
}

async fn get_maintenance(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> std::result::Result<Json<MaintenanceDetails>, ApiError> {
    or_not_found(
        store.read().await.maintenance_event_with_details(id),
        EntityKind::Maintenance,
        id,
    )
}

async fn create_maintenance(
    State(store): State<SharedStore>,
    Json(new): Json<NewMaintenanceEvent>,
) -> (StatusCode, Json<MaintenanceEvent>) {
    let event = store.write().await.create_maintenance(new);
    (StatusCode::CREATED, Json(event))
}

async fn update_maintenance(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(update): Json<MaintenanceUpdate>,
) -> std::result::Result<Json<MaintenanceEvent>, ApiError> {
    let event = store.write().await.update_maintenance(id, update)?;
    Ok(Json(event))
}

async fn delete_maintenance(State(store): State<SharedStore>, Path(id): Path<Uuid>) -> StatusCode {
    store.write().await.delete_maintenance(id);
    StatusCode::NO_CONTENT
}

// ========== Reports ==========

async fn report_neighborhoods(
    State(store): State<SharedStore>,
) -> Json<Vec<report::NeighborhoodReport>> {
    Json(report::by_neighborhood(&*store.read().await))
}

async fn report_maintenance_types(
    State(store): State<SharedStore>,
) -> Json<Vec<report::MaintenanceTypeReport>> {
    Json(report::by_maintenance_type(&*store.read().await))
}

async fn report_extractions(
    State(store): State<SharedStore>,
) -> Json<Vec<report::ExtractionReasonReport>> {
    Json(report::by_extraction_reason(&*store.read().await))
}

async fn dashboard_stats(State(store): State<SharedStore>) -> Json<report::DashboardStats> {
    Json(report::dashboard(&*store.read().await, Utc::now()))
}
