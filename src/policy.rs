//! Drop validity rules: may this item be assigned to this zone?
//!
//! The rules are evaluated in order and short-circuit on the first
//! failure. Pure read over the current item and zone collections.

use uuid::Uuid;

use crate::capacity::zone_capacity_info;
use crate::model::{CapacityStatus, InventoryItem, ItemCategory, KitchenZone, ZoneType};

/// Why a drop was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropRejection {
    ZoneNotFound,
    NotAStorageZone,
    ZoneFull,
    CleaningInPantry,
    PerishableInPantry,
}

impl DropRejection {
    pub fn code(&self) -> &'static str {
        match self {
            DropRejection::ZoneNotFound => "zone_not_found",
            DropRejection::NotAStorageZone => "not_a_storage_zone",
            DropRejection::ZoneFull => "zone_full",
            DropRejection::CleaningInPantry => "cleaning_in_pantry",
            DropRejection::PerishableInPantry => "perishable_in_pantry",
        }
    }
}

impl std::fmt::Display for DropRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropRejection::ZoneNotFound => write!(f, "The target zone does not exist"),
            DropRejection::NotAStorageZone => {
                write!(f, "Items cannot be stored in this kind of zone")
            }
            DropRejection::ZoneFull => write!(f, "The target zone is at full capacity"),
            DropRejection::CleaningInPantry => {
                write!(f, "Cleaning supplies do not belong on pantry shelves")
            }
            DropRejection::PerishableInPantry => {
                write!(f, "Perishable food does not belong on pantry shelves")
            }
        }
    }
}

/// Checks the drop rules and returns the first violated one, if any.
///
/// Rule order: zone exists, zone type is storage, zone is not full,
/// category exclusions (cleaning and perishable food stay off pantry
/// shelves; perishables belong in the fridge instead).
pub fn check_drop(
    zones: &[KitchenZone],
    items: &[InventoryItem],
    zone_id: Uuid,
    item: &InventoryItem,
) -> Result<(), DropRejection> {
    let Some(zone) = zones.iter().find(|z| z.id == zone_id) else {
        return Err(DropRejection::ZoneNotFound);
    };

    if !zone.zone_type.is_storage() {
        return Err(DropRejection::NotAStorageZone);
    }

    if zone_capacity_info(zone, items).status == CapacityStatus::Full {
        return Err(DropRejection::ZoneFull);
    }

    if zone.zone_type == ZoneType::PantryShelf {
        if item.category == ItemCategory::Cleaning {
            return Err(DropRejection::CleaningInPantry);
        }
        if item.category == ItemCategory::Food && item.expiry_date.is_some() {
            return Err(DropRejection::PerishableInPantry);
        }
    }

    Ok(())
}

/// Boolean form of [`check_drop`].
pub fn is_valid_drop_zone(
    zones: &[KitchenZone],
    items: &[InventoryItem],
    zone_id: Uuid,
    item: &InventoryItem,
) -> bool {
    check_drop(zones, items, zone_id, item).is_ok()
}
