mod extraction_reason;
mod location;
mod maintenance;
mod maintenance_type;
mod tree;
mod tree_pit;

pub use extraction_reason::{ExtractionReason, ExtractionReasonUpdate, NewExtractionReason};
pub use location::{Location, LocationUpdate, NewLocation};
pub use maintenance::{
    MaintenanceDetails, MaintenanceEvent, MaintenanceUpdate, NewMaintenanceEvent,
};
pub use maintenance_type::{
    MaintenanceKind, MaintenanceType, MaintenanceTypeUpdate, NewMaintenanceType,
};
pub use tree::{NewTree, Tree, TreeDetails, TreeStatus, TreeUpdate};
pub use tree_pit::{NewTreePit, TreePit, TreePitUpdate, DEFAULT_PIT_CONDITION};

use serde::{Deserialize, Deserializer};

/// Deserialize an update field that must distinguish "absent" from "set to
/// null": a missing key stays `None`, an explicit `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
