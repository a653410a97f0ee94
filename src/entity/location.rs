use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;

/// A planting site: street address plus the neighborhood it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub address: String,
    pub neighborhood: String,
    pub coordinates: Option<String>,
    pub notes: Option<String>,
}

/// Insertable subset of [`Location`]: everything but the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
    pub address: String,
    pub neighborhood: String,
    pub coordinates: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for a location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationUpdate {
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    // Some(None) to clear, Some(Some(s)) to set
    #[serde(default, deserialize_with = "double_option")]
    pub coordinates: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
