//! Rule-based organization suggestions.
//!
//! Deterministic, offline generator used directly for local suggestions
//! and as the fallback when the AI collaborator is unavailable. Each
//! rule is evaluated independently and appends at most its own
//! suggestions; insertion order is the only ranking.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::capacity::zone_capacity_info;
use crate::model::{
    CapacityStatus, InventoryItem, ItemCategory, KitchenZone, Suggestion, SuggestionAction,
    SuggestionPriority, SuggestionType,
};

/// Days-ahead window for the expiry rule. Items expiring within this
/// many days (exclusive of already-expired ones) are flagged.
const EXPIRY_WINDOW_DAYS: i64 = 7;

/// Generates the full advisory list for the current inventory snapshot.
///
/// Rules: expiring items (grouped, high), unassigned items (grouped,
/// medium), per-zone capacity warnings (high when full), and spice
/// consolidation across multiple zones (low, with an executable action).
pub fn generate(items: &[InventoryItem], zones: &[KitchenZone], today: NaiveDate) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if let Some(suggestion) = expiry_suggestion(items, today) {
        suggestions.push(suggestion);
    }
    if let Some(suggestion) = unassigned_suggestion(items, zones) {
        suggestions.push(suggestion);
    }
    suggestions.extend(capacity_suggestions(items, zones));
    if let Some(suggestion) = spice_consolidation_suggestion(items, zones) {
        suggestions.push(suggestion);
    }

    suggestions
}

/// Applies an executable suggestion action to the item collection.
///
/// Returns the number of items that were reassigned.
pub fn apply_action(items: &mut [InventoryItem], action: &SuggestionAction) -> usize {
    match action {
        SuggestionAction::Consolidate {
            target_zone_id,
            item_ids,
        } => {
            let mut moved = 0;
            for item in items.iter_mut() {
                if item_ids.contains(&item.id) && item.zone_id != Some(*target_zone_id) {
                    item.zone_id = Some(*target_zone_id);
                    moved += 1;
                }
            }
            moved
        }
    }
}

fn expiry_suggestion(items: &[InventoryItem], today: NaiveDate) -> Option<Suggestion> {
    let expiring: Vec<&InventoryItem> = items
        .iter()
        .filter(|item| {
            item.expiry_date.is_some_and(|date| {
                let days_left = (date - today).num_days();
                days_left > 0 && days_left <= EXPIRY_WINDOW_DAYS
            })
        })
        .collect();

    if expiring.is_empty() {
        return None;
    }

    let names: Vec<&str> = expiring.iter().map(|item| item.name.as_str()).collect();
    Some(Suggestion {
        id: Uuid::new_v4(),
        suggestion_type: SuggestionType::Expiry,
        title: "Use expiring items soon".to_string(),
        description: format!(
            "These items expire within the next {} days: {}",
            EXPIRY_WINDOW_DAYS,
            names.join(", ")
        ),
        zone_id: None,
        item_ids: Some(expiring.iter().map(|item| item.id).collect()),
        priority: SuggestionPriority::High,
        action: None,
    })
}

fn unassigned_suggestion(items: &[InventoryItem], zones: &[KitchenZone]) -> Option<Suggestion> {
    // A zone_id pointing at a removed zone counts as unassigned.
    let unassigned: Vec<&InventoryItem> = items
        .iter()
        .filter(|item| {
            !item
                .zone_id
                .is_some_and(|id| zones.iter().any(|zone| zone.id == id))
        })
        .collect();

    if unassigned.is_empty() {
        return None;
    }

    Some(Suggestion {
        id: Uuid::new_v4(),
        suggestion_type: SuggestionType::Placement,
        title: "Put away unassigned items".to_string(),
        description: format!(
            "{} item(s) have no storage zone yet. Drag them into a cabinet, drawer or shelf.",
            unassigned.len()
        ),
        zone_id: None,
        item_ids: Some(unassigned.iter().map(|item| item.id).collect()),
        priority: SuggestionPriority::Medium,
        action: None,
    })
}

fn capacity_suggestions(items: &[InventoryItem], zones: &[KitchenZone]) -> Vec<Suggestion> {
    zones
        .iter()
        .filter(|zone| zone.zone_type.tracks_capacity())
        .filter_map(|zone| {
            let info = zone_capacity_info(zone, items);
            match info.status {
                CapacityStatus::Ok => None,
                CapacityStatus::Warning => Some(Suggestion {
                    id: Uuid::new_v4(),
                    suggestion_type: SuggestionType::Capacity,
                    title: format!("{} is getting crowded", zone.name),
                    description: format!(
                        "{} holds {} of an estimated {} items ({}%). Consider moving some elsewhere.",
                        zone.name, info.item_count, info.max_items, info.usage_percent
                    ),
                    zone_id: Some(zone.id),
                    item_ids: None,
                    priority: SuggestionPriority::Medium,
                    action: None,
                }),
                CapacityStatus::Full => Some(Suggestion {
                    id: Uuid::new_v4(),
                    suggestion_type: SuggestionType::Capacity,
                    title: format!("{} is full", zone.name),
                    description: format!(
                        "{} holds {} of an estimated {} items ({}%). New items will pile up visibly.",
                        zone.name, info.item_count, info.max_items, info.usage_percent
                    ),
                    zone_id: Some(zone.id),
                    item_ids: None,
                    priority: SuggestionPriority::High,
                    action: None,
                }),
            }
        })
        .collect()
}

fn spice_consolidation_suggestion(
    items: &[InventoryItem],
    zones: &[KitchenZone],
) -> Option<Suggestion> {
    let spices: Vec<&InventoryItem> = items
        .iter()
        .filter(|item| item.category == ItemCategory::Spices && item.zone_id.is_some())
        .collect();

    let mut distinct_zones: Vec<Uuid> = Vec::new();
    for item in &spices {
        let zone_id = item.zone_id.expect("filtered to assigned spices");
        if !distinct_zones.contains(&zone_id) {
            distinct_zones.push(zone_id);
        }
    }

    if distinct_zones.len() < 2 {
        return None;
    }

    // Target is the first listed item's zone.
    let target_zone_id = distinct_zones[0];
    let target_name = zones
        .iter()
        .find(|zone| zone.id == target_zone_id)
        .map(|zone| zone.name.as_str())
        .unwrap_or("one place");
    let item_ids: Vec<Uuid> = spices.iter().map(|item| item.id).collect();

    Some(Suggestion {
        id: Uuid::new_v4(),
        suggestion_type: SuggestionType::Organization,
        title: "Keep spices together".to_string(),
        description: format!(
            "Your spices are spread across {} zones. Gather them in {}.",
            distinct_zones.len(),
            target_name
        ),
        zone_id: Some(target_zone_id),
        item_ids: Some(item_ids.clone()),
        priority: SuggestionPriority::Low,
        action: Some(SuggestionAction::Consolidate {
            target_zone_id,
            item_ids,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ZoneType;
    use crate::types::Vec3;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn zone(name: &str, zone_type: ZoneType, max_items: usize) -> KitchenZone {
        KitchenZone::new(name, zone_type, Vec3::zero(), Vec3::new(0.8, 0.7, 0.35), max_items)
            .unwrap()
    }

    fn item(name: &str, category: ItemCategory) -> InventoryItem {
        InventoryItem::new(name, category, 1.0, "pcs").unwrap()
    }

    #[test]
    fn no_items_no_suggestions() {
        assert!(generate(&[], &[], today()).is_empty());
    }

    #[test]
    fn item_expiring_in_three_days_triggers_expiry_rule() {
        let zone = zone("Fridge", ZoneType::Fridge, 40);
        let mut milk = item("Milk", ItemCategory::Food)
            .with_expiry(today().checked_add_days(Days::new(3)).unwrap());
        milk.zone_id = Some(zone.id);

        let suggestions = generate(std::slice::from_ref(&milk), std::slice::from_ref(&zone), today());
        assert_eq!(suggestions.len(), 1);
        let suggestion = &suggestions[0];
        assert_eq!(suggestion.suggestion_type, SuggestionType::Expiry);
        assert_eq!(suggestion.priority, SuggestionPriority::High);
        assert_eq!(suggestion.item_ids.as_deref(), Some(&[milk.id][..]));
        assert!(suggestion.description.contains("Milk"));
    }

    #[test]
    fn expiry_window_boundaries() {
        let zone = zone("Fridge", ZoneType::Fridge, 40);
        let cases = [
            (0i64, false),  // expires today: already handled, not "soon"
            (-2, false),    // expired: excluded from this rule
            (1, true),
            (7, true),      // inclusive upper bound
            (8, false),
        ];
        for (offset, expected) in cases {
            let date = today() + chrono::Duration::days(offset);
            let mut thing = item("Yogurt", ItemCategory::Food).with_expiry(date);
            thing.zone_id = Some(zone.id);
            let suggestions =
                generate(std::slice::from_ref(&thing), std::slice::from_ref(&zone), today());
            let has_expiry = suggestions
                .iter()
                .any(|s| s.suggestion_type == SuggestionType::Expiry);
            assert_eq!(has_expiry, expected, "offset {} days", offset);
        }
    }

    #[test]
    fn unassigned_items_grouped_into_one_suggestion() {
        let zones = [zone("Pantry", ZoneType::PantryShelf, 40)];
        let items = [item("Rice", ItemCategory::Food), item("Pot", ItemCategory::Cookware)];

        let suggestions = generate(&items, &zones, today());
        let placement: Vec<_> = suggestions
            .iter()
            .filter(|s| s.suggestion_type == SuggestionType::Placement)
            .collect();
        assert_eq!(placement.len(), 1);
        assert_eq!(placement[0].priority, SuggestionPriority::Medium);
        assert_eq!(placement[0].item_ids.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn dangling_zone_reference_counts_as_unassigned() {
        let zones = [zone("Pantry", ZoneType::PantryShelf, 40)];
        let mut orphan = item("Beans", ItemCategory::Food);
        orphan.zone_id = Some(Uuid::new_v4());

        let suggestions = generate(std::slice::from_ref(&orphan), &zones, today());
        assert!(
            suggestions
                .iter()
                .any(|s| s.suggestion_type == SuggestionType::Placement)
        );
    }

    #[test]
    fn full_zone_emits_high_priority_capacity_suggestion() {
        let cabinet = zone("Upper cabinet", ZoneType::UpperCabinet, 1);
        let mut a = item("Plates", ItemCategory::Dishes);
        a.zone_id = Some(cabinet.id);
        let mut b = item("Bowls", ItemCategory::Dishes);
        b.zone_id = Some(cabinet.id);

        let suggestions = generate(&[a, b], std::slice::from_ref(&cabinet), today());
        let capacity: Vec<_> = suggestions
            .iter()
            .filter(|s| s.suggestion_type == SuggestionType::Capacity)
            .collect();
        assert_eq!(capacity.len(), 1);
        assert_eq!(capacity[0].priority, SuggestionPriority::High);
        assert_eq!(capacity[0].zone_id, Some(cabinet.id));
    }

    #[test]
    fn countertop_crowding_is_not_flagged() {
        let counter = zone("Countertop", ZoneType::Countertop, 1);
        let mut a = item("Kettle", ItemCategory::Appliances);
        a.zone_id = Some(counter.id);
        let mut b = item("Toaster", ItemCategory::Appliances);
        b.zone_id = Some(counter.id);

        let suggestions = generate(&[a, b], std::slice::from_ref(&counter), today());
        assert!(
            !suggestions
                .iter()
                .any(|s| s.suggestion_type == SuggestionType::Capacity)
        );
    }

    #[test]
    fn scattered_spices_yield_one_consolidation_with_working_action() {
        let shelf = zone("Spice shelf", ZoneType::UpperCabinet, 40);
        let drawer = zone("Drawer", ZoneType::Drawer, 40);
        let mut paprika = item("Paprika", ItemCategory::Spices);
        paprika.zone_id = Some(shelf.id);
        let mut cumin = item("Cumin", ItemCategory::Spices);
        cumin.zone_id = Some(drawer.id);

        let zones = [shelf.clone(), drawer];
        let mut items = vec![paprika.clone(), cumin.clone()];

        let suggestions = generate(&items, &zones, today());
        let organization: Vec<_> = suggestions
            .iter()
            .filter(|s| s.suggestion_type == SuggestionType::Organization)
            .collect();
        assert_eq!(organization.len(), 1);
        let suggestion = organization[0];
        assert_eq!(suggestion.priority, SuggestionPriority::Low);
        let ids = suggestion.item_ids.as_ref().unwrap();
        assert!(ids.contains(&paprika.id) && ids.contains(&cumin.id));

        // Applying moves everything to the first listed item's zone.
        let action = suggestion.action.as_ref().unwrap();
        let moved = apply_action(&mut items, action);
        assert_eq!(moved, 1);
        assert_eq!(items[0].zone_id, Some(shelf.id));
        assert_eq!(items[1].zone_id, Some(shelf.id));
    }

    #[test]
    fn spices_in_one_zone_do_not_trigger_consolidation() {
        let shelf = zone("Spice shelf", ZoneType::UpperCabinet, 40);
        let mut paprika = item("Paprika", ItemCategory::Spices);
        paprika.zone_id = Some(shelf.id);
        let mut cumin = item("Cumin", ItemCategory::Spices);
        cumin.zone_id = Some(shelf.id);

        let suggestions = generate(&[paprika, cumin], std::slice::from_ref(&shelf), today());
        assert!(
            !suggestions
                .iter()
                .any(|s| s.suggestion_type == SuggestionType::Organization)
        );
    }
}
