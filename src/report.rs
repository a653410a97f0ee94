//! Aggregate reports derived from current store state.
//!
//! These are read-only rollups for the reporting screens: tree counts and
//! maintenance costs grouped by neighborhood, by maintenance type, and by
//! extraction reason, plus the dashboard headline numbers.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{MaintenanceKind, TreeStatus};
use crate::storage::MemStore;

/// Group label used when a reference does not resolve.
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborhoodReport {
    pub neighborhood: String,
    pub total: usize,
    pub alive: usize,
    pub dead: usize,
    pub extracted: usize,
    pub maintenance_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceTypeReport {
    pub type_name: String,
    pub count: usize,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReasonReport {
    pub reason: String,
    pub count: usize,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_trees: usize,
    pub alive: usize,
    pub dead: usize,
    pub extracted: usize,
    pub maintenance_this_month: usize,
    pub total_cost: f64,
}

/// Tree census per neighborhood, with the summed maintenance cost of that
/// neighborhood's trees. Trees whose location does not resolve group under
/// "Unknown". Sorted by neighborhood name.
pub fn by_neighborhood(store: &MemStore) -> Vec<NeighborhoodReport> {
    let events = store.maintenance_events();
    let mut groups: BTreeMap<String, NeighborhoodReport> = BTreeMap::new();

    for details in store.trees_with_details() {
        let neighborhood = details
            .location
            .as_ref()
            .map(|l| l.neighborhood.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let entry = groups
            .entry(neighborhood.clone())
            .or_insert_with(|| NeighborhoodReport {
                neighborhood,
                total: 0,
                alive: 0,
                dead: 0,
                extracted: 0,
                maintenance_cost: 0.0,
            });

        entry.total += 1;
        match details.tree.status {
            TreeStatus::Alive => entry.alive += 1,
            TreeStatus::Dead => entry.dead += 1,
            TreeStatus::Extracted => entry.extracted += 1,
        }
        entry.maintenance_cost += events
            .iter()
            .filter(|event| event.tree_id == details.tree.id)
            .map(|event| event.cost)
            .sum::<f64>();
    }

    groups.into_values().collect()
}

/// Event count and summed cost per maintenance type. Events whose type does
/// not resolve group under "Unknown". Sorted by type name.
pub fn by_maintenance_type(store: &MemStore) -> Vec<MaintenanceTypeReport> {
    let mut groups: BTreeMap<String, MaintenanceTypeReport> = BTreeMap::new();

    for details in store.maintenance_with_details() {
        let type_name = details
            .maintenance_type
            .as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let entry = groups
            .entry(type_name.clone())
            .or_insert_with(|| MaintenanceTypeReport {
                type_name,
                count: 0,
                total_cost: 0.0,
            });

        entry.count += 1;
        entry.total_cost += details.event.cost;
    }

    groups.into_values().collect()
}

/// Count and summed cost of extraction events per reason. Only extraction
/// events whose reason reference resolves are counted. Sorted by reason.
pub fn by_extraction_reason(store: &MemStore) -> Vec<ExtractionReasonReport> {
    let mut groups: BTreeMap<String, ExtractionReasonReport> = BTreeMap::new();

    for details in store.maintenance_with_details() {
        let is_extraction = details
            .maintenance_type
            .as_ref()
            .map(|t| t.kind == MaintenanceKind::Extraction)
            .unwrap_or(false);
        let Some(reason) = details.extraction_reason.as_ref() else {
            continue;
        };
        if !is_extraction {
            continue;
        }

        let entry = groups
            .entry(reason.reason.clone())
            .or_insert_with(|| ExtractionReasonReport {
                reason: reason.reason.clone(),
                count: 0,
                total_cost: 0.0,
            });

        entry.count += 1;
        entry.total_cost += details.event.cost;
    }

    groups.into_values().collect()
}

/// Headline numbers for the dashboard. `now` decides which month counts as
/// the current one.
pub fn dashboard(store: &MemStore, now: DateTime<Utc>) -> DashboardStats {
    let trees = store.trees();
    let events = store.maintenance_events();

    DashboardStats {
        total_trees: trees.len(),
        alive: trees.iter().filter(|t| t.status == TreeStatus::Alive).count(),
        dead: trees.iter().filter(|t| t.status == TreeStatus::Dead).count(),
        extracted: trees
            .iter()
            .filter(|t| t.status == TreeStatus::Extracted)
            .count(),
        maintenance_this_month: events
            .iter()
            .filter(|event| {
                event.performed_at.year() == now.year()
                    && event.performed_at.month() == now.month()
            })
            .count(),
        total_cost: events.iter().map(|event| event.cost).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{NewLocation, NewMaintenanceEvent, NewTree, NewTreePit};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn location_in(store: &mut MemStore, neighborhood: &str) -> Uuid {
        store
            .create_location(NewLocation {
                address: "Calle Falsa 123".to_string(),
                neighborhood: neighborhood.to_string(),
                coordinates: None,
                notes: None,
            })
            .id
    }

    fn tree_at(store: &mut MemStore, location_id: Uuid) -> Uuid {
        let pit = store.create_tree_pit(NewTreePit {
            material: "Brick".to_string(),
            size: "1m x 1m".to_string(),
            installed_at: None,
            condition: "Good condition".to_string(),
        });
        store
            .create_tree(NewTree {
                species: "Tipa".to_string(),
                planted_at: None,
                status: Default::default(),
                tree_pit_id: pit.id,
                location_id,
                photo_url: None,
                notes: None,
            })
            .id
    }

    fn maintenance_costing(tree_id: Uuid, type_id: Uuid, cost: f64) -> NewMaintenanceEvent {
        NewMaintenanceEvent {
            tree_id,
            performed_at: None,
            type_id,
            extraction_reason_id: None,
            responsible: "Crew".to_string(),
            notes: None,
            cost,
            next_due: None,
        }
    }

    fn type_named(store: &MemStore, name: &str) -> Uuid {
        store
            .maintenance_types()
            .into_iter()
            .find(|t| t.name == name)
            .unwrap()
            .id
    }

    #[test]
    fn test_neighborhood_report_groups_and_sums() {
        let mut store = MemStore::new();
        let almagro = location_in(&mut store, "Almagro");
        let flores = location_in(&mut store, "Flores");

        let tree_a = tree_at(&mut store, almagro);
        let tree_b = tree_at(&mut store, almagro);
        let tree_c = tree_at(&mut store, flores);

        let pruning = type_named(&store, "Pruning");
        let event = maintenance_costing(tree_a, pruning, 100.0);
        store.create_maintenance(event);
        let event = maintenance_costing(tree_b, pruning, 50.0);
        store.create_maintenance(event);
        let event = maintenance_costing(tree_c, pruning, 25.0);
        store.create_maintenance(event);

        let report = by_neighborhood(&store);
        assert_eq!(report.len(), 2);

        let almagro_row = report.iter().find(|r| r.neighborhood == "Almagro").unwrap();
        assert_eq!(almagro_row.total, 2);
        assert_eq!(almagro_row.alive, 2);
        assert_eq!(almagro_row.maintenance_cost, 150.0);

        let flores_row = report.iter().find(|r| r.neighborhood == "Flores").unwrap();
        assert_eq!(flores_row.total, 1);
        assert_eq!(flores_row.maintenance_cost, 25.0);
    }

    #[test]
    fn test_neighborhood_report_dangling_location_groups_as_unknown() {
        let mut store = MemStore::new();
        tree_at(&mut store, Uuid::new_v4());

        let report = by_neighborhood(&store);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].neighborhood, "Unknown");
        assert_eq!(report[0].total, 1);
    }

    #[test]
    fn test_maintenance_type_report() {
        let mut store = MemStore::new();
        let location = location_in(&mut store, "Almagro");
        let tree = tree_at(&mut store, location);

        let pruning = type_named(&store, "Pruning");
        let watering = type_named(&store, "Watering");
        let event = maintenance_costing(tree, pruning, 200.0);
        store.create_maintenance(event);
        let event = maintenance_costing(tree, watering, 10.0);
        store.create_maintenance(event);
        let event = maintenance_costing(tree, watering, 15.0);
        store.create_maintenance(event);

        let report = by_maintenance_type(&store);
        let watering_row = report.iter().find(|r| r.type_name == "Watering").unwrap();
        assert_eq!(watering_row.count, 2);
        assert_eq!(watering_row.total_cost, 25.0);

        let pruning_row = report.iter().find(|r| r.type_name == "Pruning").unwrap();
        assert_eq!(pruning_row.count, 1);
    }

    #[test]
    fn test_extraction_report_counts_only_reasoned_extractions() {
        let mut store = MemStore::new();
        let location = location_in(&mut store, "Almagro");
        let tree = tree_at(&mut store, location);

        let extraction = type_named(&store, "Extraction");
        let reason = store.extraction_reasons()[0].clone();

        // with a reason: counted
        let mut event = maintenance_costing(tree, extraction, 500.0);
        event.extraction_reason_id = Some(reason.id);
        store.create_maintenance(event);

        // without a reason: skipped
        let tree_b = tree_at(&mut store, location);
        let event = maintenance_costing(tree_b, extraction, 400.0);
        store.create_maintenance(event);

        let report = by_extraction_reason(&store);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].reason, reason.reason);
        assert_eq!(report[0].count, 1);
        assert_eq!(report[0].total_cost, 500.0);
    }

    #[test]
    fn test_dashboard_stats() {
        let mut store = MemStore::new();
        let location = location_in(&mut store, "Almagro");
        let tree = tree_at(&mut store, location);
        let extracted_tree = tree_at(&mut store, location);

        let pruning = type_named(&store, "Pruning");
        let extraction = type_named(&store, "Extraction");

        let mut event = maintenance_costing(tree, pruning, 100.0);
        event.performed_at = Some(Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap());
        store.create_maintenance(event);

        let mut event = maintenance_costing(extracted_tree, extraction, 900.0);
        event.performed_at = Some(Utc.with_ymd_and_hms(2025, 5, 2, 9, 0, 0).unwrap());
        store.create_maintenance(event);

        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let stats = dashboard(&store, now);

        assert_eq!(stats.total_trees, 2);
        assert_eq!(stats.alive, 1);
        assert_eq!(stats.extracted, 1);
        assert_eq!(stats.maintenance_this_month, 1);
        assert_eq!(stats.total_cost, 1000.0);
    }
}
