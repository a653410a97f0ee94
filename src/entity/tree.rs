use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;
use super::{Location, MaintenanceDetails, TreePit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TreeStatus {
    #[default]
    Alive,
    Dead,
    Extracted,
}

impl std::fmt::Display for TreeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeStatus::Alive => write!(f, "alive"),
            TreeStatus::Dead => write!(f, "dead"),
            TreeStatus::Extracted => write!(f, "extracted"),
        }
    }
}

impl std::str::FromStr for TreeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alive" => Ok(TreeStatus::Alive),
            "dead" => Ok(TreeStatus::Dead),
            "extracted" => Ok(TreeStatus::Extracted),
            _ => Err(format!("Invalid tree status: {}", s)),
        }
    }
}

/// A registered tree. The pit and location references are stored as given and
/// are not checked for existence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub id: Uuid,
    pub species: String,
    pub planted_at: DateTime<Utc>,
    pub status: TreeStatus,
    pub tree_pit_id: Uuid,
    pub location_id: Uuid,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

/// Insertable subset of [`Tree`]. The planting date defaults to the creation
/// time when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTree {
    pub species: String,
    pub planted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TreeStatus,
    pub tree_pit_id: Uuid,
    pub location_id: Uuid,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for a tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeUpdate {
    pub species: Option<String>,
    pub planted_at: Option<DateTime<Utc>>,
    pub status: Option<TreeStatus>,
    pub tree_pit_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    // Some(None) to clear, Some(Some(s)) to set
    #[serde(default, deserialize_with = "double_option")]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Read-side view of a tree with its related records embedded. Unresolvable
/// references show up as `None`, and the maintenance history is sorted most
/// recent first. Built fresh per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDetails {
    #[serde(flatten)]
    pub tree: Tree,
    pub location: Option<Location>,
    pub tree_pit: Option<TreePit>,
    pub maintenance: Vec<MaintenanceDetails>,
}
