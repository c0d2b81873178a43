//! Shape and dimension resolution for inventory items.
//!
//! Maps an item's category and free-text unit to a canonical shape, and a
//! shape plus category to canonical extents in meters. Both lookups are
//! total: every input resolves to something, with `Box` as the cascading
//! fallback. Explicit overrides on the item always win.

use crate::model::{InventoryItem, ItemCategory, ItemDimensions, ItemShape};

/// Container words recognized in unit strings, checked in order.
///
/// First match wins, so "jar container" resolves to `Jar`.
const UNIT_SHAPE_HINTS: &[(&str, ItemShape)] = &[
    ("bottle", ItemShape::Bottle),
    ("jar", ItemShape::Jar),
    ("container", ItemShape::Jar),
    ("can", ItemShape::Can),
    ("bag", ItemShape::Bag),
    ("pouch", ItemShape::Pouch),
    ("carton", ItemShape::Carton),
    ("gallon", ItemShape::Carton),
    ("box", ItemShape::Box),
];

/// Resolves the canonical shape for a category/unit combination.
///
/// Resolution order:
/// 1. case-insensitive substring match of the unit against known
///    container words, first match wins
/// 2. category default table
///
/// Never fails; the fallback is `Box`.
pub fn resolve_shape(category: ItemCategory, unit: &str) -> ItemShape {
    let unit = unit.to_lowercase();
    for (hint, shape) in UNIT_SHAPE_HINTS {
        if unit.contains(hint) {
            return *shape;
        }
    }

    match category {
        ItemCategory::Beverages => ItemShape::Bottle,
        ItemCategory::Spices => ItemShape::Jar,
        ItemCategory::Food => ItemShape::Box,
        ItemCategory::Cookware | ItemCategory::Utensils | ItemCategory::Dishes => {
            ItemShape::Cylinder
        }
        ItemCategory::Storage => ItemShape::Jar,
        ItemCategory::Cleaning => ItemShape::Bottle,
        ItemCategory::Appliances => ItemShape::Box,
        ItemCategory::Other => ItemShape::Box,
    }
}

/// Resolves canonical extents in meters for a shape/category combination.
///
/// Fixed lookup with three category-dependent cases: spice jars are
/// smaller, cookware cylinders are wide and flat (a pan) while other
/// cylinders are narrow and tall (a utensil), and boxes vary between
/// appliances (large), dishes (flat, plate-like) and the generic food box.
pub fn resolve_dimensions(shape: ItemShape, category: ItemCategory) -> ItemDimensions {
    match shape {
        ItemShape::Bottle => ItemDimensions::raw(0.08, 0.25, 0.08),
        ItemShape::Jar => {
            if category == ItemCategory::Spices {
                ItemDimensions::raw(0.05, 0.09, 0.05)
            } else {
                ItemDimensions::raw(0.09, 0.13, 0.09)
            }
        }
        ItemShape::Can => ItemDimensions::raw(0.07, 0.11, 0.07),
        ItemShape::Cylinder => {
            if category == ItemCategory::Cookware {
                ItemDimensions::raw(0.28, 0.08, 0.28)
            } else {
                ItemDimensions::raw(0.04, 0.3, 0.04)
            }
        }
        ItemShape::Bag => ItemDimensions::raw(0.15, 0.2, 0.08),
        ItemShape::Pouch => ItemDimensions::raw(0.12, 0.16, 0.05),
        ItemShape::Carton => ItemDimensions::raw(0.1, 0.2, 0.1),
        ItemShape::Box => match category {
            ItemCategory::Appliances => ItemDimensions::raw(0.3, 0.25, 0.25),
            ItemCategory::Dishes => ItemDimensions::raw(0.2, 0.03, 0.2),
            _ => ItemDimensions::raw(0.15, 0.1, 0.1),
        },
    }
}

/// Returns the effective shape of an item, honoring the override.
pub fn resolved_shape(item: &InventoryItem) -> ItemShape {
    item.shape
        .unwrap_or_else(|| resolve_shape(item.category, &item.unit))
}

/// Returns the effective extents of an item, honoring the override.
pub fn resolved_dimensions(item: &InventoryItem) -> ItemDimensions {
    item.dims
        .unwrap_or_else(|| resolve_dimensions(resolved_shape(item), item.category))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CATEGORIES: [ItemCategory; 10] = [
        ItemCategory::Food,
        ItemCategory::Cookware,
        ItemCategory::Utensils,
        ItemCategory::Appliances,
        ItemCategory::Dishes,
        ItemCategory::Storage,
        ItemCategory::Cleaning,
        ItemCategory::Spices,
        ItemCategory::Beverages,
        ItemCategory::Other,
    ];

    const ALL_SHAPES: [ItemShape; 8] = [
        ItemShape::Box,
        ItemShape::Bottle,
        ItemShape::Jar,
        ItemShape::Can,
        ItemShape::Cylinder,
        ItemShape::Bag,
        ItemShape::Pouch,
        ItemShape::Carton,
    ];

    #[test]
    fn unit_hints_override_category_defaults() {
        assert_eq!(
            resolve_shape(ItemCategory::Food, "glass bottle"),
            ItemShape::Bottle
        );
        assert_eq!(resolve_shape(ItemCategory::Food, "Jar"), ItemShape::Jar);
        assert_eq!(
            resolve_shape(ItemCategory::Beverages, "can"),
            ItemShape::Can
        );
        assert_eq!(resolve_shape(ItemCategory::Food, "BAG"), ItemShape::Bag);
        assert_eq!(
            resolve_shape(ItemCategory::Cleaning, "gallon"),
            ItemShape::Carton
        );
        assert_eq!(
            resolve_shape(ItemCategory::Spices, "container"),
            ItemShape::Jar
        );
    }

    #[test]
    fn category_defaults_when_unit_has_no_hint() {
        assert_eq!(resolve_shape(ItemCategory::Beverages, ""), ItemShape::Bottle);
        assert_eq!(resolve_shape(ItemCategory::Spices, "g"), ItemShape::Jar);
        assert_eq!(resolve_shape(ItemCategory::Food, "kg"), ItemShape::Box);
        assert_eq!(
            resolve_shape(ItemCategory::Cookware, "pcs"),
            ItemShape::Cylinder
        );
        assert_eq!(
            resolve_shape(ItemCategory::Utensils, "pcs"),
            ItemShape::Cylinder
        );
        assert_eq!(
            resolve_shape(ItemCategory::Dishes, "pcs"),
            ItemShape::Cylinder
        );
        assert_eq!(resolve_shape(ItemCategory::Storage, ""), ItemShape::Jar);
        assert_eq!(resolve_shape(ItemCategory::Cleaning, ""), ItemShape::Bottle);
        assert_eq!(resolve_shape(ItemCategory::Appliances, ""), ItemShape::Box);
        assert_eq!(resolve_shape(ItemCategory::Other, ""), ItemShape::Box);
    }

    #[test]
    fn resolution_is_total_and_positive() {
        for category in ALL_CATEGORIES {
            for unit in ["", "unknown-unit", "stück", "x"] {
                let shape = resolve_shape(category, unit);
                let dims = resolve_dimensions(shape, category);
                assert!(
                    dims.as_vec3().is_valid_dimension(),
                    "{:?}/{} resolved to invalid dims",
                    category,
                    unit
                );
            }
        }
        for shape in ALL_SHAPES {
            for category in ALL_CATEGORIES {
                let dims = resolve_dimensions(shape, category);
                assert!(dims.as_vec3().is_valid_dimension());
            }
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = resolve_shape(ItemCategory::Spices, "small jar");
        let second = resolve_shape(ItemCategory::Spices, "small jar");
        assert_eq!(first, second);
        assert_eq!(
            resolve_dimensions(first, ItemCategory::Spices),
            resolve_dimensions(second, ItemCategory::Spices)
        );
    }

    #[test]
    fn spice_jars_shrink() {
        let spice = resolve_dimensions(ItemShape::Jar, ItemCategory::Spices);
        let generic = resolve_dimensions(ItemShape::Jar, ItemCategory::Food);
        assert!(spice.volume() < generic.volume());
    }

    #[test]
    fn cookware_cylinders_are_wide_and_flat() {
        let pan = resolve_dimensions(ItemShape::Cylinder, ItemCategory::Cookware);
        let utensil = resolve_dimensions(ItemShape::Cylinder, ItemCategory::Utensils);
        assert!(pan.width > pan.height);
        assert!(utensil.height > utensil.width);
    }

    #[test]
    fn box_dimensions_vary_by_category() {
        let appliance = resolve_dimensions(ItemShape::Box, ItemCategory::Appliances);
        let plate = resolve_dimensions(ItemShape::Box, ItemCategory::Dishes);
        let generic = resolve_dimensions(ItemShape::Box, ItemCategory::Food);
        assert!(appliance.volume() > generic.volume());
        assert!(plate.height < generic.height);
    }

    #[test]
    fn item_overrides_win() {
        let mut item = InventoryItem::new("Flour", ItemCategory::Food, 1.0, "kg").unwrap();
        assert_eq!(resolved_shape(&item), ItemShape::Box);

        item.shape = Some(ItemShape::Bag);
        assert_eq!(resolved_shape(&item), ItemShape::Bag);

        let custom = ItemDimensions::new(0.2, 0.3, 0.1).unwrap();
        item.dims = Some(custom);
        assert_eq!(resolved_dimensions(&item), custom);
    }
}
