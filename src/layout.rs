//! Greedy shelf layout engine for placing items inside a zone volume.
//!
//! Places a set of items with known extents into a bounded 3D volume and
//! returns one center position per item, in zone-local coordinates with
//! the origin at the volume center.
//!
//! The algorithm is a deterministic row/layer/tier sweep:
//! items are sorted by volume descending (stable, so equal volumes keep
//! input order), then laid out along X, wrapping into new Z rows, then
//! into new Y tiers. Items that no longer fit anywhere are piled at a
//! fixed, visible overflow corner instead of being rejected.
//!
//! Preconditions (not validated here, the caller owns input hygiene):
//! all item extents and the bounds must be positive, and the padding must
//! be smaller than half the smallest bound.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::model::ItemDimensions;
use crate::types::Vec3;

/// Uniform padding margin between items and walls, in meters.
pub const DEFAULT_PADDING: f64 = 0.015;

/// Fraction of a zone's stored width usable for item placement.
pub const INNER_WIDTH_RATIO: f64 = 0.85;

/// Fraction of a zone's stored height usable for item placement.
pub const INNER_HEIGHT_RATIO: f64 = 0.85;

/// Fraction of a zone's stored depth usable for item placement.
///
/// Depth loses more than the other axes: door clearance and reachability.
pub const INNER_DEPTH_RATIO: f64 = 0.7;

/// Derives the packable inner volume from a zone's stored dimensions.
pub fn inner_bounds(zone_dims: Vec3) -> Vec3 {
    Vec3::new(
        zone_dims.x * INNER_WIDTH_RATIO,
        zone_dims.y * INNER_HEIGHT_RATIO,
        zone_dims.z * INNER_DEPTH_RATIO,
    )
}

/// Events emitted while a layout is computed, for live visualization.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum LayoutEvent {
    /// An item received a regular position.
    ItemPlaced {
        id: Uuid,
        position: Vec3,
        dims: ItemDimensions,
    },
    /// The volume was full; the item was piled at the overflow corner.
    ItemOverflowed {
        id: Uuid,
        position: Vec3,
        dims: ItemDimensions,
    },
    /// Layout finished.
    Finished { placed: usize, overflowed: usize },
}

/// Computes positions for all items inside the given volume.
///
/// Returns exactly one position per distinct input id; ids outside the
/// input never appear. Pure function, deterministic for identical input
/// order.
pub fn pack_zone(
    items: &[(Uuid, ItemDimensions)],
    bounds: Vec3,
    padding: f64,
) -> HashMap<Uuid, Vec3> {
    pack_zone_with_progress(items, bounds, padding, |_| {})
}

/// Like [`pack_zone`], but reports each placement through a callback
/// (suitable for SSE streaming).
pub fn pack_zone_with_progress(
    items: &[(Uuid, ItemDimensions)],
    bounds: Vec3,
    padding: f64,
    mut on_event: impl FnMut(&LayoutEvent),
) -> HashMap<Uuid, Vec3> {
    let mut positions = HashMap::with_capacity(items.len());

    // Stable sort keeps input order for equal volumes; that tie-break is
    // part of the contract and must not gain a secondary key.
    let mut ordered: Vec<&(Uuid, ItemDimensions)> = items.iter().collect();
    ordered.sort_by(|a, b| {
        b.1.volume()
            .partial_cmp(&a.1.volume())
            .unwrap_or(Ordering::Equal)
    });

    let half = bounds.half();
    let start_x = -half.x + padding;
    let start_y = -half.y + padding;
    let start_z = -half.z + padding;

    let mut current_x = start_x;
    let mut current_y = start_y;
    let mut current_z = start_z;
    let mut row_max_height: f64 = 0.0;
    let mut layer_max_depth: f64 = 0.0;

    let mut placed = 0usize;
    let mut overflowed = 0usize;

    for (id, dims) in ordered {
        // Row wrap: the item no longer fits along X.
        if current_x + dims.width > half.x - padding {
            current_x = start_x;
            current_z += layer_max_depth + padding;
            layer_max_depth = 0.0;
        }

        // Layer wrap: the row no longer fits along Z, open a new Y tier.
        if current_z + dims.depth > half.z - padding {
            current_z = start_z;
            current_x = start_x;
            current_y += row_max_height + padding;
            row_max_height = 0.0;
        }

        // Volume exhausted: pile the item at the visible overflow corner
        // (top front, centered on X) and leave the cursors untouched.
        if current_y + dims.height > half.y - padding {
            let position = Vec3::new(
                0.0,
                half.y - dims.height / 2.0,
                half.z - dims.depth / 2.0,
            );
            positions.insert(*id, position);
            overflowed += 1;
            on_event(&LayoutEvent::ItemOverflowed {
                id: *id,
                position,
                dims: *dims,
            });
            continue;
        }

        let position = Vec3::new(
            current_x + dims.width / 2.0,
            current_y + dims.height / 2.0,
            current_z + dims.depth / 2.0,
        );
        positions.insert(*id, position);
        placed += 1;
        on_event(&LayoutEvent::ItemPlaced {
            id: *id,
            position,
            dims: *dims,
        });

        current_x += dims.width + padding;
        row_max_height = row_max_height.max(dims.height);
        layer_max_depth = layer_max_depth.max(dims.depth);
    }

    on_event(&LayoutEvent::Finished { placed, overflowed });
    positions
}
