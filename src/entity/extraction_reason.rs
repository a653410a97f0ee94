use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry naming why a tree was permanently removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReason {
    pub id: Uuid,
    pub reason: String,
}

/// Insertable subset of [`ExtractionReason`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExtractionReason {
    pub reason: String,
}

/// Partial update for an extraction reason.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionReasonUpdate {
    pub reason: Option<String>,
}
