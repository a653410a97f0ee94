use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Condition label applied when a pit is registered without one.
pub const DEFAULT_PIT_CONDITION: &str = "Good condition";

/// A tree pit (cazuela): the cut-out in pavement or ground holding a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreePit {
    pub id: Uuid,
    pub material: String,
    pub size: String,
    pub installed_at: DateTime<Utc>,
    pub condition: String,
}

/// Insertable subset of [`TreePit`]. The installation date defaults to the
/// creation time when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTreePit {
    pub material: String,
    pub size: String,
    pub installed_at: Option<DateTime<Utc>>,
    #[serde(default = "default_condition")]
    pub condition: String,
}

fn default_condition() -> String {
    DEFAULT_PIT_CONDITION.to_string()
}

/// Partial update for a tree pit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreePitUpdate {
    pub material: Option<String>,
    pub size: Option<String>,
    pub installed_at: Option<DateTime<Utc>>,
    pub condition: Option<String>,
}
