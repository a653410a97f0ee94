use std::collections::HashMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::entity::{
    ExtractionReason, ExtractionReasonUpdate, Location, LocationUpdate, MaintenanceDetails,
    MaintenanceEvent, MaintenanceKind, MaintenanceType, MaintenanceTypeUpdate, MaintenanceUpdate,
    NewExtractionReason, NewLocation, NewMaintenanceEvent, NewMaintenanceType, NewTree, NewTreePit,
    Tree, TreeDetails, TreePit, TreePitUpdate, TreeStatus, TreeUpdate,
};
use crate::error::{ArboladoError, EntityKind, Result};

/// Keyed records plus an explicit insertion order, so listings come back in
/// the order records were created.
#[derive(Debug)]
struct Collection<T> {
    items: HashMap<Uuid, T>,
    order: Vec<Uuid>,
}

impl<T> Collection<T> {
    fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn insert(&mut self, id: Uuid, item: T) {
        self.items.insert(id, item);
        self.order.push(id);
    }

    fn get(&self, id: &Uuid) -> Option<&T> {
        self.items.get(id)
    }

    fn get_mut(&mut self, id: &Uuid) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    fn remove(&mut self, id: &Uuid) {
        if self.items.remove(id).is_some() {
            self.order.retain(|existing| existing != id);
        }
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }
}

/// In-memory registry backing the whole application. One instance is built at
/// process start and shared behind a lock; tests build their own. All data is
/// lost on restart.
#[derive(Debug)]
pub struct MemStore {
    locations: Collection<Location>,
    tree_pits: Collection<TreePit>,
    maintenance_types: Collection<MaintenanceType>,
    extraction_reasons: Collection<ExtractionReason>,
    trees: Collection<Tree>,
    maintenance: Collection<MaintenanceEvent>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        let mut store = Self {
            locations: Collection::new(),
            tree_pits: Collection::new(),
            maintenance_types: Collection::new(),
            extraction_reasons: Collection::new(),
            trees: Collection::new(),
            maintenance: Collection::new(),
        };
        store.seed_catalogs();
        store
    }

    /// Fixed starter catalogs, inserted once at construction. Ids are fresh
    /// per process.
    fn seed_catalogs(&mut self) {
        let default_types: [(&str, MaintenanceKind, Option<u32>, &str); 5] = [
            (
                "Pruning",
                MaintenanceKind::Pruning,
                Some(180),
                "Routine pruning of branches and foliage",
            ),
            (
                "Watering",
                MaintenanceKind::Watering,
                Some(7),
                "Regular watering of the tree",
            ),
            (
                "Fertilization",
                MaintenanceKind::Fertilization,
                Some(90),
                "Fertilizer and nutrient application",
            ),
            (
                "Fumigation",
                MaintenanceKind::Fumigation,
                Some(120),
                "Pest and disease control",
            ),
            (
                "Extraction",
                MaintenanceKind::Extraction,
                None,
                "Complete removal of the tree",
            ),
        ];

        for (name, kind, frequency_days, description) in default_types {
            let id = Uuid::new_v4();
            self.maintenance_types.insert(
                id,
                MaintenanceType {
                    id,
                    name: name.to_string(),
                    kind,
                    frequency_days,
                    description: Some(description.to_string()),
                },
            );
        }

        let default_reasons = [
            "Dead tree",
            "Neighbor request",
            "Sidewalk or infrastructure damage",
            "Terminal disease",
            "Fall risk",
            "Public works",
        ];

        for reason in default_reasons {
            let id = Uuid::new_v4();
            self.extraction_reasons.insert(
                id,
                ExtractionReason {
                    id,
                    reason: reason.to_string(),
                },
            );
        }
    }

    // ========== Location methods ==========

    pub fn locations(&self) -> Vec<Location> {
        self.locations.iter().cloned().collect()
    }

    pub fn location(&self, id: Uuid) -> Option<Location> {
        self.locations.get(&id).cloned()
    }

    pub fn create_location(&mut self, new: NewLocation) -> Location {
        let location = Location {
            id: Uuid::new_v4(),
            address: new.address,
            neighborhood: new.neighborhood,
            coordinates: new.coordinates,
            notes: new.notes,
        };
        self.locations.insert(location.id, location.clone());
        location
    }

    pub fn update_location(&mut self, id: Uuid, update: LocationUpdate) -> Result<Location> {
        let location = self
            .locations
            .get_mut(&id)
            .ok_or_else(|| ArboladoError::not_found(EntityKind::Location, id))?;

        if let Some(address) = update.address {
            location.address = address;
        }
        if let Some(neighborhood) = update.neighborhood {
            location.neighborhood = neighborhood;
        }
        if let Some(coordinates) = update.coordinates {
            location.coordinates = coordinates;
        }
        if let Some(notes) = update.notes {
            location.notes = notes;
        }

        Ok(location.clone())
    }

    pub fn delete_location(&mut self, id: Uuid) {
        self.locations.remove(&id);
    }

    // ========== Tree pit methods ==========

    pub fn tree_pits(&self) -> Vec<TreePit> {
        self.tree_pits.iter().cloned().collect()
    }

    pub fn tree_pit(&self, id: Uuid) -> Option<TreePit> {
        self.tree_pits.get(&id).cloned()
    }

    pub fn create_tree_pit(&mut self, new: NewTreePit) -> TreePit {
        let pit = TreePit {
            id: Uuid::new_v4(),
            material: new.material,
            size: new.size,
            installed_at: new.installed_at.unwrap_or_else(Utc::now),
            condition: new.condition,
        };
        self.tree_pits.insert(pit.id, pit.clone());
        pit
    }

    pub fn update_tree_pit(&mut self, id: Uuid, update: TreePitUpdate) -> Result<TreePit> {
        let pit = self
            .tree_pits
            .get_mut(&id)
            .ok_or_else(|| ArboladoError::not_found(EntityKind::TreePit, id))?;

        if let Some(material) = update.material {
            pit.material = material;
        }
        if let Some(size) = update.size {
            pit.size = size;
        }
        if let Some(installed_at) = update.installed_at {
            pit.installed_at = installed_at;
        }
        if let Some(condition) = update.condition {
            pit.condition = condition;
        }

        Ok(pit.clone())
    }

    pub fn delete_tree_pit(&mut self, id: Uuid) {
        self.tree_pits.remove(&id);
    }

    // ========== Maintenance type methods ==========

    pub fn maintenance_types(&self) -> Vec<MaintenanceType> {
        self.maintenance_types.iter().cloned().collect()
    }

    pub fn maintenance_type(&self, id: Uuid) -> Option<MaintenanceType> {
        self.maintenance_types.get(&id).cloned()
    }

    pub fn create_maintenance_type(&mut self, new: NewMaintenanceType) -> MaintenanceType {
        let maintenance_type = MaintenanceType {
            id: Uuid::new_v4(),
            name: new.name,
            kind: new.kind,
            frequency_days: new.frequency_days,
            description: new.description,
        };
        self.maintenance_types
            .insert(maintenance_type.id, maintenance_type.clone());
        maintenance_type
    }

    pub fn update_maintenance_type(
        &mut self,
        id: Uuid,
        update: MaintenanceTypeUpdate,
    ) -> Result<MaintenanceType> {
        let maintenance_type = self
            .maintenance_types
            .get_mut(&id)
            .ok_or_else(|| ArboladoError::not_found(EntityKind::MaintenanceType, id))?;

        if let Some(name) = update.name {
            maintenance_type.name = name;
        }
        if let Some(kind) = update.kind {
            maintenance_type.kind = kind;
        }
        if let Some(frequency_days) = update.frequency_days {
            maintenance_type.frequency_days = frequency_days;
        }
        if let Some(description) = update.description {
            maintenance_type.description = description;
        }

        Ok(maintenance_type.clone())
    }

    pub fn delete_maintenance_type(&mut self, id: Uuid) {
        self.maintenance_types.remove(&id);
    }

    // ========== Extraction reason methods ==========

    pub fn extraction_reasons(&self) -> Vec<ExtractionReason> {
        self.extraction_reasons.iter().cloned().collect()
    }

    pub fn extraction_reason(&self, id: Uuid) -> Option<ExtractionReason> {
        self.extraction_reasons.get(&id).cloned()
    }

    pub fn create_extraction_reason(&mut self, new: NewExtractionReason) -> ExtractionReason {
        let reason = ExtractionReason {
            id: Uuid::new_v4(),
            reason: new.reason,
        };
        self.extraction_reasons.insert(reason.id, reason.clone());
        reason
    }

    pub fn update_extraction_reason(
        &mut self,
        id: Uuid,
        update: ExtractionReasonUpdate,
    ) -> Result<ExtractionReason> {
        let reason = self
            .extraction_reasons
            .get_mut(&id)
            .ok_or_else(|| ArboladoError::not_found(EntityKind::ExtractionReason, id))?;

        if let Some(text) = update.reason {
            reason.reason = text;
        }

        Ok(reason.clone())
    }

    pub fn delete_extraction_reason(&mut self, id: Uuid) {
        self.extraction_reasons.remove(&id);
    }

    // ========== Tree methods ==========

    pub fn trees(&self) -> Vec<Tree> {
        self.trees.iter().cloned().collect()
    }

    pub fn tree(&self, id: Uuid) -> Option<Tree> {
        self.trees.get(&id).cloned()
    }

    pub fn trees_with_details(&self) -> Vec<TreeDetails> {
        self.trees.iter().map(|tree| self.enrich_tree(tree)).collect()
    }

    pub fn tree_with_details(&self, id: Uuid) -> Option<TreeDetails> {
        self.trees.get(&id).map(|tree| self.enrich_tree(tree))
    }

    pub fn create_tree(&mut self, new: NewTree) -> Tree {
        let tree = Tree {
            id: Uuid::new_v4(),
            species: new.species,
            planted_at: new.planted_at.unwrap_or_else(Utc::now),
            status: new.status,
            tree_pit_id: new.tree_pit_id,
            location_id: new.location_id,
            photo_url: new.photo_url,
            notes: new.notes,
        };
        self.trees.insert(tree.id, tree.clone());
        tree
    }

    pub fn update_tree(&mut self, id: Uuid, update: TreeUpdate) -> Result<Tree> {
        let tree = self
            .trees
            .get_mut(&id)
            .ok_or_else(|| ArboladoError::not_found(EntityKind::Tree, id))?;

        if let Some(species) = update.species {
            tree.species = species;
        }
        if let Some(planted_at) = update.planted_at {
            tree.planted_at = planted_at;
        }
        if let Some(status) = update.status {
            tree.status = status;
        }
        if let Some(tree_pit_id) = update.tree_pit_id {
            tree.tree_pit_id = tree_pit_id;
        }
        if let Some(location_id) = update.location_id {
            tree.location_id = location_id;
        }
        if let Some(photo_url) = update.photo_url {
            tree.photo_url = photo_url;
        }
        if let Some(notes) = update.notes {
            tree.notes = notes;
        }

        Ok(tree.clone())
    }

    pub fn delete_tree(&mut self, id: Uuid) {
        self.trees.remove(&id);
    }

    // ========== Maintenance methods ==========

    pub fn maintenance_events(&self) -> Vec<MaintenanceEvent> {
        self.maintenance.iter().cloned().collect()
    }

    pub fn maintenance_event(&self, id: Uuid) -> Option<MaintenanceEvent> {
        self.maintenance.get(&id).cloned()
    }

    pub fn maintenance_with_details(&self) -> Vec<MaintenanceDetails> {
        let mut details: Vec<MaintenanceDetails> = self
            .maintenance
            .iter()
            .map(|event| self.enrich_maintenance(event))
            .collect();
        details.sort_by(|a, b| b.event.performed_at.cmp(&a.event.performed_at));
        details
    }

    pub fn maintenance_event_with_details(&self, id: Uuid) -> Option<MaintenanceDetails> {
        self.maintenance
            .get(&id)
            .map(|event| self.enrich_maintenance(event))
    }

    /// Creating a maintenance record is the one operation with logic beyond
    /// storage: the next-due date is derived from the type's recommended
    /// frequency when the caller left it out, and an extraction marks the
    /// tree as extracted. A type reference that does not resolve disables
    /// both without failing the creation.
    pub fn create_maintenance(&mut self, new: NewMaintenanceEvent) -> MaintenanceEvent {
        let maintenance_type = self.maintenance_types.get(&new.type_id).cloned();
        let performed_at = new.performed_at.unwrap_or_else(Utc::now);

        let mut next_due = new.next_due;
        if next_due.is_none() {
            if let Some(days) = maintenance_type.as_ref().and_then(|t| t.frequency_days) {
                next_due = Some(performed_at + Duration::days(i64::from(days)));
            }
        }

        let event = MaintenanceEvent {
            id: Uuid::new_v4(),
            tree_id: new.tree_id,
            performed_at,
            type_id: new.type_id,
            extraction_reason_id: new.extraction_reason_id,
            responsible: new.responsible,
            notes: new.notes,
            cost: new.cost,
            next_due,
        };
        self.maintenance.insert(event.id, event.clone());

        if maintenance_type.map(|t| t.kind) == Some(MaintenanceKind::Extraction) {
            if let Some(tree) = self.trees.get_mut(&event.tree_id) {
                tree.status = TreeStatus::Extracted;
            }
        }

        event
    }

    pub fn update_maintenance(
        &mut self,
        id: Uuid,
        update: MaintenanceUpdate,
    ) -> Result<MaintenanceEvent> {
        let event = self
            .maintenance
            .get_mut(&id)
            .ok_or_else(|| ArboladoError::not_found(EntityKind::Maintenance, id))?;

        if let Some(tree_id) = update.tree_id {
            event.tree_id = tree_id;
        }
        if let Some(performed_at) = update.performed_at {
            event.performed_at = performed_at;
        }
        if let Some(type_id) = update.type_id {
            event.type_id = type_id;
        }
        if let Some(extraction_reason_id) = update.extraction_reason_id {
            event.extraction_reason_id = extraction_reason_id;
        }
        if let Some(responsible) = update.responsible {
            event.responsible = responsible;
        }
        if let Some(notes) = update.notes {
            event.notes = notes;
        }
        if let Some(cost) = update.cost {
            event.cost = cost;
        }
        if let Some(next_due) = update.next_due {
            event.next_due = next_due;
        }

        Ok(event.clone())
    }

    pub fn delete_maintenance(&mut self, id: Uuid) {
        self.maintenance.remove(&id);
    }

    // ========== Enrichment ==========

    fn enrich_tree(&self, tree: &Tree) -> TreeDetails {
        let location = self.locations.get(&tree.location_id).cloned();
        let tree_pit = self.tree_pits.get(&tree.tree_pit_id).cloned();

        let mut maintenance: Vec<MaintenanceDetails> = self
            .maintenance
            .iter()
            .filter(|event| event.tree_id == tree.id)
            .map(|event| self.enrich_maintenance(event))
            .collect();
        maintenance.sort_by(|a, b| b.event.performed_at.cmp(&a.event.performed_at));

        TreeDetails {
            tree: tree.clone(),
            location,
            tree_pit,
            maintenance,
        }
    }

    fn enrich_maintenance(&self, event: &MaintenanceEvent) -> MaintenanceDetails {
        let maintenance_type = self.maintenance_types.get(&event.type_id).cloned();
        let extraction_reason = event
            .extraction_reason_id
            .and_then(|id| self.extraction_reasons.get(&id).cloned());

        MaintenanceDetails {
            event: event.clone(),
            maintenance_type,
            extraction_reason,
        }
    }
}
