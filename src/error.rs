use thiserror::Error;
use uuid::Uuid;

/// The six record collections a lookup can fail against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Location,
    TreePit,
    MaintenanceType,
    ExtractionReason,
    Tree,
    Maintenance,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Location => write!(f, "location"),
            EntityKind::TreePit => write!(f, "tree pit"),
            EntityKind::MaintenanceType => write!(f, "maintenance type"),
            EntityKind::ExtractionReason => write!(f, "extraction reason"),
            EntityKind::Tree => write!(f, "tree"),
            EntityKind::Maintenance => write!(f, "maintenance record"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ArboladoError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArboladoError {
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        ArboladoError::NotFound { kind, id }
    }
}

pub type Result<T> = std::result::Result<T, ArboladoError>;
