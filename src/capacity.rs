//! Volume-based capacity estimation for zones.
//!
//! This model is a coarse advisory estimate and is deliberately
//! independent of the layout engine: the two may disagree (a zone can
//! report "full" while the packer still finds room, and vice versa).

use crate::model::{CapacityStatus, InventoryItem, KitchenZone, ZoneCapacityInfo};

/// Assumed average item volume in cubic meters.
pub const DEFAULT_AVG_ITEM_VOLUME: f64 = 0.015;

/// Fraction of a zone's volume that is realistically packable.
pub const PACKING_EFFICIENCY: f64 = 0.6;

/// Estimates how many items fit into a volume of the given extents.
///
/// `floor(volume * efficiency / avg_item_volume)`, never negative.
pub fn capacity_of(width: f64, height: f64, depth: f64, avg_item_volume: f64) -> usize {
    let usable = width * height * depth * PACKING_EFFICIENCY;
    if avg_item_volume <= 0.0 || !usable.is_finite() {
        return 0;
    }
    (usable / avg_item_volume).floor().max(0.0) as usize
}

/// Estimates zone capacity with the default average item volume.
pub fn default_capacity_of(width: f64, height: f64, depth: f64) -> usize {
    capacity_of(width, height, depth, DEFAULT_AVG_ITEM_VOLUME)
}

/// Usage of a zone in percent, rounded to the nearest integer.
///
/// `max_items` is clamped to at least 1, so a zone that expects no items
/// but holds some reads as over 100% rather than dividing by zero.
pub fn usage_of(item_count: usize, max_items: usize) -> u32 {
    let max_items = max_items.max(1);
    ((100.0 * item_count as f64) / max_items as f64).round() as u32
}

/// Derives the capacity tier from usage and the zone's warning threshold.
pub fn status_of(usage_percent: u32, warning_threshold: f64) -> CapacityStatus {
    if usage_percent >= 100 {
        CapacityStatus::Full
    } else if usage_percent as f64 >= warning_threshold {
        CapacityStatus::Warning
    } else {
        CapacityStatus::Ok
    }
}

/// Builds the capacity report for a single zone.
///
/// Counts items whose `zone_id` matches; dangling references on other
/// items never reach this function since they point elsewhere.
pub fn zone_capacity_info(zone: &KitchenZone, items: &[InventoryItem]) -> ZoneCapacityInfo {
    let item_count = items
        .iter()
        .filter(|item| item.zone_id == Some(zone.id))
        .count();
    let usage_percent = usage_of(item_count, zone.max_items);
    ZoneCapacityInfo {
        zone_id: zone.id,
        zone_name: zone.name.clone(),
        item_count,
        max_items: zone.max_items,
        usage_percent,
        status: status_of(usage_percent, zone.capacity_warning),
    }
}

/// Builds the capacity report for every zone, in zone order.
pub fn capacity_report(zones: &[KitchenZone], items: &[InventoryItem]) -> Vec<ZoneCapacityInfo> {
    zones
        .iter()
        .map(|zone| zone_capacity_info(zone, items))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemCategory, ZoneType};
    use crate::types::Vec3;

    fn zone_with_capacity(max_items: usize) -> KitchenZone {
        KitchenZone::new(
            "Test cabinet",
            ZoneType::UpperCabinet,
            Vec3::zero(),
            Vec3::new(0.8, 0.7, 0.35),
            max_items,
        )
        .unwrap()
    }

    fn item_in(zone: &KitchenZone) -> InventoryItem {
        let mut item = InventoryItem::new("Thing", ItemCategory::Food, 1.0, "pcs").unwrap();
        item.zone_id = Some(zone.id);
        item
    }

    #[test]
    fn capacity_formula_matches_reference_values() {
        // 0.8 * 0.7 * 0.35 * 0.6 / 0.015 = 7.84 -> 7
        assert_eq!(default_capacity_of(0.8, 0.7, 0.35), 7);
        // 1.0 * 1.0 * 1.0 * 0.6 / 0.015 = 40
        assert_eq!(default_capacity_of(1.0, 1.0, 1.0), 40);
    }

    #[test]
    fn capacity_is_monotonic_in_volume() {
        let mut last = 0;
        for i in 1..=20 {
            let side = i as f64 * 0.1;
            let cap = default_capacity_of(side, side, side);
            assert!(cap >= last, "capacity shrank at side {}", side);
            last = cap;
        }
    }

    #[test]
    fn usage_rounds_to_nearest_percent() {
        assert_eq!(usage_of(0, 10), 0);
        assert_eq!(usage_of(1, 3), 33);
        assert_eq!(usage_of(2, 3), 67);
        assert_eq!(usage_of(10, 10), 100);
        assert_eq!(usage_of(15, 10), 150);
    }

    #[test]
    fn zero_max_items_clamps_to_one() {
        assert_eq!(usage_of(0, 0), 0);
        assert_eq!(usage_of(3, 0), 300);
        assert_eq!(status_of(usage_of(1, 0), 80.0), CapacityStatus::Full);
    }

    #[test]
    fn status_tiers() {
        assert_eq!(status_of(0, 80.0), CapacityStatus::Ok);
        assert_eq!(status_of(79, 80.0), CapacityStatus::Ok);
        assert_eq!(status_of(80, 80.0), CapacityStatus::Warning);
        assert_eq!(status_of(99, 80.0), CapacityStatus::Warning);
        assert_eq!(status_of(100, 80.0), CapacityStatus::Full);
        assert_eq!(status_of(150, 80.0), CapacityStatus::Full);
    }

    #[test]
    fn status_respects_custom_threshold() {
        assert_eq!(status_of(59, 60.0), CapacityStatus::Ok);
        assert_eq!(status_of(60, 60.0), CapacityStatus::Warning);
    }

    #[test]
    fn report_counts_only_matching_items() {
        let zone_a = zone_with_capacity(4);
        let zone_b = zone_with_capacity(4);

        let mut items = vec![item_in(&zone_a), item_in(&zone_a), item_in(&zone_b)];
        // Unassigned item is counted nowhere.
        items.push(InventoryItem::new("Loose", ItemCategory::Other, 1.0, "pcs").unwrap());

        let report = capacity_report(&[zone_a.clone(), zone_b.clone()], &items);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].item_count, 2);
        assert_eq!(report[0].usage_percent, 50);
        assert_eq!(report[0].status, CapacityStatus::Ok);
        assert_eq!(report[1].item_count, 1);
    }

    #[test]
    fn report_flags_full_zone() {
        let zone = zone_with_capacity(2);
        let items = vec![item_in(&zone), item_in(&zone), item_in(&zone)];
        let info = zone_capacity_info(&zone, &items);
        assert_eq!(info.usage_percent, 150);
        assert_eq!(info.status, CapacityStatus::Full);
    }
}
