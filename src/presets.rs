//! Built-in kitchen layout presets.
//!
//! A preset is a bulk set of zones with room-space positions and sizes;
//! `max_items` is estimated from the volume when the zones are created.

use crate::model::{KitchenZone, ValidationError, ZoneType};
use crate::store::zone_with_estimated_capacity;
use crate::types::Vec3;

/// Names of the available presets, in menu order.
pub const PRESET_NAMES: [&str; 3] = ["galley", "l_shaped", "u_shaped"];

/// Builds the zone set for a named preset. `None` for unknown names.
pub fn load(name: &str) -> Option<Result<Vec<KitchenZone>, ValidationError>> {
    match name {
        "galley" => Some(galley()),
        "l_shaped" => Some(l_shaped()),
        "u_shaped" => Some(u_shaped()),
        _ => None,
    }
}

type ZoneSpec = (&'static str, ZoneType, Vec3, Vec3);

fn build(specs: &[ZoneSpec]) -> Result<Vec<KitchenZone>, ValidationError> {
    specs
        .iter()
        .map(|(name, zone_type, position, dims)| {
            zone_with_estimated_capacity(name, *zone_type, *position, *dims)
        })
        .collect()
}

/// Two parallel runs, storage on one side, fixtures on the other.
fn galley() -> Result<Vec<KitchenZone>, ValidationError> {
    build(&[
        (
            "Upper cabinet left",
            ZoneType::UpperCabinet,
            Vec3::new(-1.5, 1.8, -1.2),
            Vec3::new(0.8, 0.7, 0.35),
        ),
        (
            "Upper cabinet right",
            ZoneType::UpperCabinet,
            Vec3::new(-0.5, 1.8, -1.2),
            Vec3::new(0.8, 0.7, 0.35),
        ),
        (
            "Lower cabinet",
            ZoneType::LowerCabinet,
            Vec3::new(-1.5, 0.45, -1.2),
            Vec3::new(0.8, 0.9, 0.6),
        ),
        (
            "Cutlery drawer",
            ZoneType::Drawer,
            Vec3::new(-0.5, 0.75, -1.2),
            Vec3::new(0.6, 0.15, 0.5),
        ),
        (
            "Fridge",
            ZoneType::Fridge,
            Vec3::new(1.25, 1.0, -1.2),
            Vec3::new(0.7, 1.8, 0.7),
        ),
        (
            "Countertop",
            ZoneType::Countertop,
            Vec3::new(-1.0, 0.95, 1.2),
            Vec3::new(2.4, 0.05, 0.6),
        ),
        (
            "Sink",
            ZoneType::Sink,
            Vec3::new(0.5, 0.9, 1.2),
            Vec3::new(0.6, 0.2, 0.5),
        ),
        (
            "Stove",
            ZoneType::Stove,
            Vec3::new(1.5, 0.95, 1.2),
            Vec3::new(0.6, 0.1, 0.6),
        ),
    ])
}

/// Corner layout with a pantry column on the short leg.
fn l_shaped() -> Result<Vec<KitchenZone>, ValidationError> {
    build(&[
        (
            "Pantry top",
            ZoneType::PantryShelf,
            Vec3::new(-2.0, 1.6, -1.0),
            Vec3::new(0.9, 0.5, 0.45),
        ),
        (
            "Pantry middle",
            ZoneType::PantryShelf,
            Vec3::new(-2.0, 1.0, -1.0),
            Vec3::new(0.9, 0.5, 0.45),
        ),
        (
            "Pantry bottom",
            ZoneType::PantryShelf,
            Vec3::new(-2.0, 0.4, -1.0),
            Vec3::new(0.9, 0.5, 0.45),
        ),
        (
            "Upper cabinet",
            ZoneType::UpperCabinet,
            Vec3::new(-0.5, 1.8, -1.0),
            Vec3::new(0.8, 0.7, 0.35),
        ),
        (
            "Pot drawer",
            ZoneType::Drawer,
            Vec3::new(0.5, 0.4, -1.0),
            Vec3::new(0.8, 0.3, 0.55),
        ),
        (
            "Fridge",
            ZoneType::Fridge,
            Vec3::new(1.75, 1.0, -1.0),
            Vec3::new(0.7, 1.8, 0.7),
        ),
        (
            "Countertop",
            ZoneType::Countertop,
            Vec3::new(0.0, 0.95, -1.0),
            Vec3::new(2.0, 0.05, 0.6),
        ),
        (
            "Sink",
            ZoneType::Sink,
            Vec3::new(1.75, 0.9, 0.5),
            Vec3::new(0.6, 0.2, 0.5),
        ),
        (
            "Dishwasher",
            ZoneType::Dishwasher,
            Vec3::new(1.75, 0.45, 1.25),
            Vec3::new(0.6, 0.85, 0.6),
        ),
    ])
}

/// Three runs around the room, freezer and microwave included.
fn u_shaped() -> Result<Vec<KitchenZone>, ValidationError> {
    build(&[
        (
            "Upper cabinet left",
            ZoneType::UpperCabinet,
            Vec3::new(-2.0, 1.8, -1.5),
            Vec3::new(0.8, 0.7, 0.35),
        ),
        (
            "Upper cabinet center",
            ZoneType::UpperCabinet,
            Vec3::new(0.0, 1.8, -1.5),
            Vec3::new(0.8, 0.7, 0.35),
        ),
        (
            "Upper cabinet right",
            ZoneType::UpperCabinet,
            Vec3::new(2.0, 1.8, -1.5),
            Vec3::new(0.8, 0.7, 0.35),
        ),
        (
            "Lower cabinet left",
            ZoneType::LowerCabinet,
            Vec3::new(-2.0, 0.45, -1.5),
            Vec3::new(0.8, 0.9, 0.6),
        ),
        (
            "Lower cabinet right",
            ZoneType::LowerCabinet,
            Vec3::new(2.0, 0.45, -1.5),
            Vec3::new(0.8, 0.9, 0.6),
        ),
        (
            "Cutlery drawer",
            ZoneType::Drawer,
            Vec3::new(-1.0, 0.75, -1.5),
            Vec3::new(0.6, 0.15, 0.5),
        ),
        (
            "Pantry shelf",
            ZoneType::PantryShelf,
            Vec3::new(-2.75, 1.2, 0.0),
            Vec3::new(0.9, 1.6, 0.45),
        ),
        (
            "Fridge",
            ZoneType::Fridge,
            Vec3::new(2.75, 1.0, 0.0),
            Vec3::new(0.7, 1.8, 0.7),
        ),
        (
            "Freezer",
            ZoneType::Freezer,
            Vec3::new(2.75, 0.4, 1.25),
            Vec3::new(0.7, 0.8, 0.7),
        ),
        (
            "Island",
            ZoneType::Island,
            Vec3::new(0.0, 0.45, 0.5),
            Vec3::new(1.6, 0.9, 0.9),
        ),
        (
            "Countertop",
            ZoneType::Countertop,
            Vec3::new(0.0, 0.95, -1.5),
            Vec3::new(3.0, 0.05, 0.6),
        ),
        (
            "Sink",
            ZoneType::Sink,
            Vec3::new(-1.0, 0.9, 1.5),
            Vec3::new(0.6, 0.2, 0.5),
        ),
        (
            "Stove",
            ZoneType::Stove,
            Vec3::new(1.0, 0.95, 1.5),
            Vec3::new(0.6, 0.1, 0.6),
        ),
        (
            "Microwave",
            ZoneType::Microwave,
            Vec3::new(2.0, 1.5, 1.5),
            Vec3::new(0.5, 0.3, 0.4),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_preset_is_none() {
        assert!(load("open_plan").is_none());
    }

    #[test]
    fn all_presets_build() {
        for name in PRESET_NAMES {
            let zones = load(name).expect("preset listed but missing").unwrap();
            assert!(!zones.is_empty(), "{} is empty", name);
        }
    }

    #[test]
    fn storage_zones_get_usable_capacity_estimates() {
        for name in PRESET_NAMES {
            for zone in load(name).unwrap().unwrap() {
                if zone.zone_type.is_storage() {
                    assert!(
                        zone.max_items >= 1,
                        "{} / {} has no capacity",
                        name,
                        zone.name
                    );
                }
            }
        }
    }

    #[test]
    fn preset_zone_ids_are_unique() {
        for name in PRESET_NAMES {
            let zones = load(name).unwrap().unwrap();
            for (i, a) in zones.iter().enumerate() {
                for b in &zones[i + 1..] {
                    assert_ne!(a.id, b.id);
                }
            }
        }
    }
}
