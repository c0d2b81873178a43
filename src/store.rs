//! Owner of the live item and zone collections.
//!
//! All mutations go through this struct; the core algorithms receive
//! immutable snapshots of its slices and return derived values. No
//! ambient global state.

use uuid::Uuid;

use crate::capacity::{self, capacity_report};
use crate::layout;
use crate::model::{InventoryItem, ItemDimensions, KitchenZone, SuggestionAction, ZoneCapacityInfo};
use crate::policy::{self, DropRejection};
use crate::resolver::resolved_dimensions;
use crate::suggest;
use crate::types::{POSITION_GRID_STEP, ROTATION_GRID_STEP, Vec3};

/// Errors from store mutations.
#[derive(Debug, Clone)]
pub enum StoreError {
    ItemNotFound(Uuid),
    ZoneNotFound(Uuid),
    InvalidDrop(DropRejection),
    InvalidQuantity(f64),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::ItemNotFound(id) => write!(f, "No item with id {}", id),
            StoreError::ZoneNotFound(id) => write!(f, "No zone with id {}", id),
            StoreError::InvalidDrop(rejection) => write!(f, "{}", rejection),
            StoreError::InvalidQuantity(value) => {
                write!(f, "Quantity must be positive, got: {}", value)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Live kitchen state: all items and zones of the current session.
#[derive(Clone, Debug, Default)]
pub struct KitchenStore {
    items: Vec<InventoryItem>,
    zones: Vec<KitchenZone>,
}

impl KitchenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all items.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Snapshot of all zones.
    pub fn zones(&self) -> &[KitchenZone] {
        &self.zones
    }

    /// Looks up one item.
    pub fn item(&self, id: Uuid) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Looks up one zone.
    pub fn zone(&self, id: Uuid) -> Option<&KitchenZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// Adds an item and returns its id.
    pub fn add_item(&mut self, item: InventoryItem) -> Uuid {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Adds a zone and returns its id.
    pub fn add_zone(&mut self, zone: KitchenZone) -> Uuid {
        let id = zone.id;
        self.zones.push(zone);
        id
    }

    /// Removes an item. Returns whether it existed.
    pub fn remove_item(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Removes a zone and clears the assignment of every item that
    /// referenced it. Returns whether the zone existed.
    pub fn remove_zone(&mut self, id: Uuid) -> bool {
        let before = self.zones.len();
        self.zones.retain(|zone| zone.id != id);
        if self.zones.len() == before {
            return false;
        }
        for item in &mut self.items {
            if item.zone_id == Some(id) {
                item.zone_id = None;
            }
        }
        true
    }

    /// Updates an item's quantity.
    pub fn set_quantity(&mut self, id: Uuid, quantity: f64) -> Result<(), StoreError> {
        if quantity <= 0.0 || quantity.is_nan() || quantity.is_infinite() {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Assigns an item to a zone after checking the drop rules.
    pub fn assign_item(&mut self, item_id: Uuid, zone_id: Uuid) -> Result<(), StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(StoreError::ItemNotFound(item_id))?;

        policy::check_drop(&self.zones, &self.items, zone_id, &self.items[index])
            .map_err(StoreError::InvalidDrop)?;

        self.items[index].zone_id = Some(zone_id);
        Ok(())
    }

    /// Clears an item's zone assignment without any rule check.
    pub fn clear_assignment(&mut self, item_id: Uuid) -> Result<(), StoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(StoreError::ItemNotFound(item_id))?;
        item.zone_id = None;
        Ok(())
    }

    /// Moves a zone, snapping the position to the 0.25 m grid.
    pub fn move_zone(&mut self, zone_id: Uuid, position: Vec3) -> Result<Vec3, StoreError> {
        let zone = self
            .zones
            .iter_mut()
            .find(|zone| zone.id == zone_id)
            .ok_or(StoreError::ZoneNotFound(zone_id))?;
        zone.position = position.snapped(POSITION_GRID_STEP);
        Ok(zone.position)
    }

    /// Rotates a zone, snapping each axis to the 15 degree grid.
    pub fn rotate_zone(&mut self, zone_id: Uuid, rotation: Vec3) -> Result<Vec3, StoreError> {
        let zone = self
            .zones
            .iter_mut()
            .find(|zone| zone.id == zone_id)
            .ok_or(StoreError::ZoneNotFound(zone_id))?;
        zone.rotation = rotation.snapped(ROTATION_GRID_STEP);
        Ok(zone.rotation)
    }

    /// Replaces all zones with a preset layout.
    ///
    /// Assignments pointing at zones that no longer exist are cleared so
    /// the affected items read as unassigned.
    pub fn load_preset(&mut self, zones: Vec<KitchenZone>) {
        self.zones = zones;
        for item in &mut self.items {
            if let Some(zone_id) = item.zone_id {
                if !self.zones.iter().any(|zone| zone.id == zone_id) {
                    item.zone_id = None;
                }
            }
        }
    }

    /// Applies an executable suggestion action. Returns the number of
    /// items that were reassigned.
    pub fn apply_suggestion_action(&mut self, action: &SuggestionAction) -> usize {
        suggest::apply_action(&mut self.items, action)
    }

    /// Capacity report over all zones.
    pub fn capacity_report(&self) -> Vec<ZoneCapacityInfo> {
        capacity_report(&self.zones, &self.items)
    }

    /// Collects the layout input for one zone: every assigned item with
    /// its resolved extents, plus the zone's packable inner bounds.
    pub fn layout_input(
        &self,
        zone_id: Uuid,
    ) -> Result<(Vec<(Uuid, ItemDimensions)>, Vec3), StoreError> {
        let zone = self.zone(zone_id).ok_or(StoreError::ZoneNotFound(zone_id))?;
        let entries = self
            .items
            .iter()
            .filter(|item| item.zone_id == Some(zone_id))
            .map(|item| (item.id, resolved_dimensions(item)))
            .collect();
        Ok((entries, layout::inner_bounds(zone.dims)))
    }

    /// Total number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of zones.
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }
}

/// Helper to build a zone with its capacity estimate computed from the
/// dimensions, the way preset loading creates zones.
pub fn zone_with_estimated_capacity(
    name: &str,
    zone_type: crate::model::ZoneType,
    position: Vec3,
    dims: Vec3,
) -> Result<KitchenZone, crate::model::ValidationError> {
    let max_items = capacity::default_capacity_of(dims.x, dims.y, dims.z);
    KitchenZone::new(name, zone_type, position, dims, max_items)
}
