use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;
use super::{ExtractionReason, MaintenanceType};

/// One maintenance action performed on a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    pub id: Uuid,
    pub tree_id: Uuid,
    pub performed_at: DateTime<Utc>,
    pub type_id: Uuid,
    pub extraction_reason_id: Option<Uuid>,
    pub responsible: String,
    pub notes: Option<String>,
    pub cost: f64,
    pub next_due: Option<DateTime<Utc>>,
}

/// Insertable subset of [`MaintenanceEvent`]. The maintenance date defaults
/// to the creation time when omitted; `next_due`, when omitted, may be filled
/// in from the type's recommended frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaintenanceEvent {
    pub tree_id: Uuid,
    pub performed_at: Option<DateTime<Utc>>,
    pub type_id: Uuid,
    pub extraction_reason_id: Option<Uuid>,
    pub responsible: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub cost: f64,
    pub next_due: Option<DateTime<Utc>>,
}

/// Partial update for a maintenance record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceUpdate {
    pub tree_id: Option<Uuid>,
    pub performed_at: Option<DateTime<Utc>>,
    pub type_id: Option<Uuid>,
    // Some(None) to clear, Some(Some(id)) to set
    #[serde(default, deserialize_with = "double_option")]
    pub extraction_reason_id: Option<Option<Uuid>>,
    pub responsible: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub next_due: Option<Option<DateTime<Utc>>>,
}

/// Read-side view of a maintenance record with its catalog references
/// embedded. Unresolvable references show up as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceDetails {
    #[serde(flatten)]
    pub event: MaintenanceEvent,
    pub maintenance_type: Option<MaintenanceType>,
    pub extraction_reason: Option<ExtractionReason>,
}
