use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;

/// Stable tag carried by every catalog entry so the rule engine can dispatch
/// without comparing display names. User-created entries default to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceKind {
    Pruning,
    Watering,
    Fertilization,
    Fumigation,
    Extraction,
    #[default]
    Other,
}

impl std::fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceKind::Pruning => write!(f, "pruning"),
            MaintenanceKind::Watering => write!(f, "watering"),
            MaintenanceKind::Fertilization => write!(f, "fertilization"),
            MaintenanceKind::Fumigation => write!(f, "fumigation"),
            MaintenanceKind::Extraction => write!(f, "extraction"),
            MaintenanceKind::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for MaintenanceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pruning" => Ok(MaintenanceKind::Pruning),
            "watering" => Ok(MaintenanceKind::Watering),
            "fertilization" => Ok(MaintenanceKind::Fertilization),
            "fumigation" => Ok(MaintenanceKind::Fumigation),
            "extraction" => Ok(MaintenanceKind::Extraction),
            "other" => Ok(MaintenanceKind::Other),
            _ => Err(format!("Invalid maintenance kind: {}", s)),
        }
    }
}

/// A catalog entry for a category of maintenance work. An absent frequency
/// means the category has no recurring schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceType {
    pub id: Uuid,
    pub name: String,
    pub kind: MaintenanceKind,
    pub frequency_days: Option<u32>,
    pub description: Option<String>,
}

/// Insertable subset of [`MaintenanceType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaintenanceType {
    pub name: String,
    #[serde(default)]
    pub kind: MaintenanceKind,
    pub frequency_days: Option<u32>,
    pub description: Option<String>,
}

/// Partial update for a maintenance type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceTypeUpdate {
    pub name: Option<String>,
    pub kind: Option<MaintenanceKind>,
    // Some(None) to clear, Some(Some(n)) to set
    #[serde(default, deserialize_with = "double_option")]
    pub frequency_days: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}
