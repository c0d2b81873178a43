//! Data models for the kitchen storage organizer.
//!
//! This module defines the fundamental data structures shared by the core
//! algorithms and the REST API:
//! - `InventoryItem`: one trackable physical good
//! - `KitchenZone`: one storage or fixture volume in the room
//! - `ZoneCapacityInfo`: derived capacity report for a zone
//! - `Suggestion`: one advisory organization hint
//!
//! All spatial structures implement the traits from the `types` module.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::types::{Dimensional, Vec3};

/// Validation error for domain data.
#[derive(Debug, Clone)]
pub enum ValidationError {
    InvalidDimension(String),
    InvalidQuantity(String),
    InvalidThreshold(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidDimension(msg) => write!(f, "Invalid dimension: {}", msg),
            ValidationError::InvalidQuantity(msg) => write!(f, "Invalid quantity: {}", msg),
            ValidationError::InvalidThreshold(msg) => write!(f, "Invalid threshold: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Helper function to validate a single dimension (DRY principle).
fn validate_dimension(value: f64, name: &str) -> Result<(), ValidationError> {
    if value <= 0.0 || value.is_nan() || value.is_infinite() {
        return Err(ValidationError::InvalidDimension(format!(
            "{} must be positive, got: {}",
            name, value
        )));
    }
    Ok(())
}

/// Validates all three extents of a dimension vector.
fn validate_dims(dims: Vec3, what: &str) -> Result<(), ValidationError> {
    validate_dimension(dims.x, &format!("{} width", what))?;
    validate_dimension(dims.y, &format!("{} height", what))?;
    validate_dimension(dims.z, &format!("{} depth", what))?;
    Ok(())
}

/// Closed set of inventory categories.
///
/// Unknown category strings deserialize to `Other`; every read path is
/// total over this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Food,
    Cookware,
    Utensils,
    Appliances,
    Dishes,
    Storage,
    Cleaning,
    Spices,
    Beverages,
    #[serde(other)]
    Other,
}

/// Cosmetic/geometric shape of an item.
///
/// The shape drives both rendering on the client and the default
/// dimension lookup in the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemShape {
    Box,
    Bottle,
    Jar,
    Can,
    Cylinder,
    Bag,
    Pouch,
    Carton,
}

/// Closed set of zone types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    UpperCabinet,
    LowerCabinet,
    Drawer,
    PantryShelf,
    Fridge,
    Freezer,
    Island,
    Countertop,
    Window,
    Sink,
    Stove,
    Dishwasher,
    Microwave,
}

impl ZoneType {
    /// Whether items may be stored in zones of this type.
    ///
    /// Fixtures (sink, stove, window, ...) and work surfaces are not
    /// valid drop targets.
    pub fn is_storage(&self) -> bool {
        !matches!(
            self,
            ZoneType::Countertop
                | ZoneType::Window
                | ZoneType::Sink
                | ZoneType::Stove
                | ZoneType::Dishwasher
                | ZoneType::Microwave
        )
    }

    /// Whether capacity suggestions are generated for this zone type.
    ///
    /// Work surfaces and pure fixtures are exempt; a crowded countertop
    /// is normal kitchen life, not a capacity problem.
    pub fn tracks_capacity(&self) -> bool {
        !matches!(
            self,
            ZoneType::Countertop | ZoneType::Window | ZoneType::Sink | ZoneType::Stove
        )
    }
}

/// Physical extents of an item in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl ItemDimensions {
    /// Creates item dimensions with validation.
    pub fn new(width: f64, height: f64, depth: f64) -> Result<Self, ValidationError> {
        validate_dims(Vec3::new(width, height, depth), "item")?;
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Creates item dimensions without validation.
    ///
    /// Used for the fixed resolver tables, which are positive by
    /// construction.
    pub const fn raw(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Converts the extents to a Vec3.
    #[inline]
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Calculates the volume of the item footprint.
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }
}

impl Dimensional for ItemDimensions {
    fn dimensions(&self) -> Vec3 {
        self.as_vec3()
    }
}

/// Represents one trackable physical good.
///
/// # Fields
/// * `zone_id` - owning zone; `None` means unassigned. A stale id whose
///   zone no longer exists is tolerated and read as unassigned.
/// * `shape` / `dims` - explicit overrides; when absent the resolver
///   derives defaults from category and unit.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: ItemCategory,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub zone_id: Option<Uuid>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub shape: Option<ItemShape>,
    #[serde(default)]
    pub dims: Option<ItemDimensions>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InventoryItem {
    /// Creates a new item with a fresh id, validating the quantity.
    pub fn new(
        name: impl Into<String>,
        category: ItemCategory,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if quantity <= 0.0 || quantity.is_nan() || quantity.is_infinite() {
            return Err(ValidationError::InvalidQuantity(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            quantity,
            unit: unit.into(),
            zone_id: None,
            expiry_date: None,
            shape: None,
            dims: None,
            notes: None,
        })
    }

    /// Sets an expiry date (builder style).
    pub fn with_expiry(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    /// Sets an explicit shape override (builder style).
    pub fn with_shape(mut self, shape: ItemShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Sets explicit dimensions (builder style).
    pub fn with_dims(mut self, dims: ItemDimensions) -> Self {
        self.dims = Some(dims);
        self
    }
}

/// Default capacity warning threshold in percent.
pub const DEFAULT_CAPACITY_WARNING: f64 = 80.0;

/// Represents one storage or fixture volume in the room.
///
/// # Fields
/// * `position` - room-space position of the volume center, meters
/// * `dims` - local-space extents (width, height, depth), all positive
/// * `rotation` - radians per axis
/// * `max_items` - capacity estimate, computed when the zone is created
/// * `capacity_warning` - warning threshold in percent, in (0, 100]
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct KitchenZone {
    pub id: Uuid,
    pub name: String,
    pub zone_type: ZoneType,
    pub position: Vec3,
    pub dims: Vec3,
    #[serde(default = "Vec3::zero")]
    pub rotation: Vec3,
    #[serde(default)]
    pub color: Option<String>,
    pub max_items: usize,
    #[serde(default = "default_capacity_warning")]
    pub capacity_warning: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_capacity_warning() -> f64 {
    DEFAULT_CAPACITY_WARNING
}

impl KitchenZone {
    /// Creates a new zone with a fresh id, validating dimensions and
    /// warning threshold.
    pub fn new(
        name: impl Into<String>,
        zone_type: ZoneType,
        position: Vec3,
        dims: Vec3,
        max_items: usize,
    ) -> Result<Self, ValidationError> {
        validate_dims(dims, "zone")?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            zone_type,
            position,
            dims,
            rotation: Vec3::zero(),
            color: None,
            max_items,
            capacity_warning: DEFAULT_CAPACITY_WARNING,
            notes: None,
        })
    }

    /// Sets the capacity warning threshold (builder style).
    pub fn with_capacity_warning(mut self, percent: f64) -> Result<Self, ValidationError> {
        if !(percent > 0.0 && percent <= 100.0) {
            return Err(ValidationError::InvalidThreshold(format!(
                "Capacity warning must be in (0, 100], got: {}",
                percent
            )));
        }
        self.capacity_warning = percent;
        Ok(self)
    }
}

impl Dimensional for KitchenZone {
    fn dimensions(&self) -> Vec3 {
        self.dims
    }
}

/// Capacity tier of a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    Ok,
    Warning,
    Full,
}

/// Derived capacity report for one zone. Recomputed on demand, never
/// persisted.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ZoneCapacityInfo {
    pub zone_id: Uuid,
    pub zone_name: String,
    pub item_count: usize,
    pub max_items: usize,
    pub usage_percent: u32,
    pub status: CapacityStatus,
}

/// Kind of an advisory suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Organization,
    Expiry,
    Placement,
    Optimization,
    Capacity,
}

/// Priority of an advisory suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    Low,
    Medium,
    High,
}

/// Executable part of a suggestion.
///
/// Applying a `Consolidate` action reassigns every listed item to the
/// target zone.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionAction {
    Consolidate {
        target_zone_id: Uuid,
        item_ids: Vec<Uuid>,
    },
}

/// One advisory organization hint.
///
/// Ephemeral: generated, shown, then dismissed or applied. Carries no
/// ranking beyond insertion order.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Suggestion {
    pub id: Uuid,
    pub suggestion_type: SuggestionType,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub zone_id: Option<Uuid>,
    #[serde(default)]
    pub item_ids: Option<Vec<Uuid>>,
    pub priority: SuggestionPriority,
    #[serde(default)]
    pub action: Option<SuggestionAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_rejects_non_positive_quantity() {
        assert!(InventoryItem::new("Rice", ItemCategory::Food, 0.0, "bag").is_err());
        assert!(InventoryItem::new("Rice", ItemCategory::Food, -1.0, "bag").is_err());
        assert!(InventoryItem::new("Rice", ItemCategory::Food, f64::NAN, "bag").is_err());
        assert!(InventoryItem::new("Rice", ItemCategory::Food, 2.0, "bag").is_ok());
    }

    #[test]
    fn zone_rejects_non_positive_dimensions() {
        let bad = KitchenZone::new(
            "Cabinet",
            ZoneType::UpperCabinet,
            Vec3::zero(),
            Vec3::new(0.8, 0.0, 0.35),
            10,
        );
        assert!(bad.is_err());

        let ok = KitchenZone::new(
            "Cabinet",
            ZoneType::UpperCabinet,
            Vec3::zero(),
            Vec3::new(0.8, 0.7, 0.35),
            10,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn zone_warning_threshold_bounds() {
        let zone = KitchenZone::new(
            "Pantry",
            ZoneType::PantryShelf,
            Vec3::zero(),
            Vec3::new(1.0, 2.0, 0.4),
            20,
        )
        .unwrap();

        assert!(zone.clone().with_capacity_warning(0.0).is_err());
        assert!(zone.clone().with_capacity_warning(101.0).is_err());
        assert!(zone.clone().with_capacity_warning(100.0).is_ok());
        let custom = zone.with_capacity_warning(60.0).unwrap();
        assert!((custom.capacity_warning - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zone_type_storage_classification() {
        assert!(ZoneType::UpperCabinet.is_storage());
        assert!(ZoneType::Drawer.is_storage());
        assert!(ZoneType::Fridge.is_storage());
        assert!(!ZoneType::Countertop.is_storage());
        assert!(!ZoneType::Sink.is_storage());
        assert!(!ZoneType::Microwave.is_storage());
    }

    #[test]
    fn zone_type_capacity_tracking() {
        assert!(ZoneType::PantryShelf.tracks_capacity());
        assert!(ZoneType::Dishwasher.tracks_capacity());
        assert!(!ZoneType::Countertop.tracks_capacity());
        assert!(!ZoneType::Stove.tracks_capacity());
    }

    #[test]
    fn dimensional_trait_bridges_items_and_zones() {
        let dims = ItemDimensions::new(0.1, 0.2, 0.3).unwrap();
        assert!((Dimensional::volume(&dims) - 0.006).abs() < 1e-9);

        let zone = KitchenZone::new(
            "Cabinet",
            ZoneType::UpperCabinet,
            Vec3::zero(),
            Vec3::new(0.8, 0.7, 0.35),
            10,
        )
        .unwrap();
        assert!(dims.fits_in(&zone.dimensions(), 1e-6));
        assert!(!zone.fits_in(&dims.as_vec3(), 1e-6));
    }

    #[test]
    fn unknown_category_deserializes_to_other() {
        let category: ItemCategory = serde_json::from_str("\"gadgets\"").unwrap();
        assert_eq!(category, ItemCategory::Other);
    }

    #[test]
    fn category_round_trips_snake_case() {
        let json = serde_json::to_string(&ItemCategory::Beverages).unwrap();
        assert_eq!(json, "\"beverages\"");
        let back: ItemCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ItemCategory::Beverages);
    }

    #[test]
    fn item_deserializes_with_minimal_fields() {
        let json = r#"{
            "id": "7f8d1e7e-11d4-4f4b-9aab-2a6f3e3f2c10",
            "name": "Olive oil",
            "category": "food",
            "quantity": 1.0
        }"#;
        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.unit, "");
        assert!(item.zone_id.is_none());
        assert!(item.expiry_date.is_none());
        assert!(item.shape.is_none());
    }
}
