//! Common types and traits for 3D geometry.
//!
//! This module defines the reusable spatial primitives shared by the
//! layout engine, the capacity model and the zone editing operations.
//!
//! Axis convention: X is width, Y is height (up), Z is depth. Zone-local
//! coordinates have their origin at the volume center.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Global numerical tolerance for floating-point comparisons.
pub const EPSILON_GENERAL: f64 = 1e-6;

/// Position grid for zone edits, in meters.
pub const POSITION_GRID_STEP: f64 = 0.25;

/// Rotation grid for zone edits, in radians (15 degrees).
pub const ROTATION_GRID_STEP: f64 = std::f64::consts::PI / 12.0;

/// Represents a 3D vector or point in space.
///
/// Used for positions, dimensions, and calculations in 3D space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new 3D vector.
    ///
    /// # Parameters
    /// * `x` - X component (width)
    /// * `y` - Y component (height)
    /// * `z` - Z component (depth)
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a zero vector (origin).
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Calculates the volume (product of all components).
    ///
    /// Useful for dimension vectors.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }

    /// Checks if all components are positive and finite.
    #[inline]
    pub fn is_valid_dimension(&self) -> bool {
        self.x > 0.0
            && self.y > 0.0
            && self.z > 0.0
            && self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_finite()
    }

    /// Checks if the vector fits within another vector (component-wise <=).
    ///
    /// # Parameters
    /// * `container` - The outer vector (e.g., zone dimensions)
    /// * `tolerance` - Numerical tolerance for the comparison
    #[inline]
    pub fn fits_within(&self, container: &Self, tolerance: f64) -> bool {
        self.x <= container.x + tolerance
            && self.y <= container.y + tolerance
            && self.z <= container.z + tolerance
    }

    /// Returns half of each component (half-extents of a dimension vector).
    #[inline]
    pub fn half(&self) -> Self {
        Self::new(self.x / 2.0, self.y / 2.0, self.z / 2.0)
    }

    /// Snaps every component to a grid of the given step size.
    #[inline]
    pub fn snapped(&self, step: f64) -> Self {
        Self::new(
            (self.x / step).round() * step,
            (self.y / step).round() * step,
            (self.z / step).round() * step,
        )
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// Trait for objects with 3D dimensions.
///
/// Provides a common interface for all objects with spatial extent.
pub trait Dimensional {
    /// Returns the dimensions of the object.
    fn dimensions(&self) -> Vec3;

    /// Calculates the volume.
    fn volume(&self) -> f64 {
        self.dimensions().volume()
    }

    /// Checks if this object fits in a container with the given dimensions.
    fn fits_in(&self, container_dims: &Vec3, tolerance: f64) -> bool {
        self.dimensions().fits_within(container_dims, tolerance)
    }
}

/// Represents an Axis-Aligned Bounding Box (AABB).
///
/// Used for overlap checks on placed items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box from a center point and dimensions.
    ///
    /// The layout engine works with center positions, so this is the
    /// primary constructor for placed items.
    #[inline]
    pub fn from_center_and_dims(center: Vec3, dims: Vec3) -> Self {
        let half = dims.half();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Checks if two bounding boxes intersect.
    ///
    /// Implements the Separating Axis Theorem (SAT) for AABBs. Touching
    /// faces do not count as an intersection.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.max.x <= other.min.x + EPSILON_GENERAL
            || other.max.x <= self.min.x + EPSILON_GENERAL
            || self.max.y <= other.min.y + EPSILON_GENERAL
            || other.max.y <= self.min.y + EPSILON_GENERAL
            || self.max.z <= other.min.z + EPSILON_GENERAL
            || other.max.z <= self.min.z + EPSILON_GENERAL)
    }

    /// Checks if this box lies entirely within another, with tolerance.
    #[inline]
    pub fn contained_in(&self, outer: &Self, tolerance: f64) -> bool {
        self.min.x >= outer.min.x - tolerance
            && self.min.y >= outer.min.y - tolerance
            && self.min.z >= outer.min.z - tolerance
            && self.max.x <= outer.max.x + tolerance
            && self.max.y <= outer.max.y + tolerance
            && self.max.z <= outer.max.z + tolerance
    }

    /// Returns the center point.
    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Returns the dimensions (width, height, depth).
    #[inline]
    pub fn dimensions(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_vec3_volume() {
        let dims = Vec3::new(0.1, 0.2, 0.3);
        assert!((dims.volume() - 0.006).abs() < EPSILON_GENERAL);
    }

    #[test]
    fn test_vec3_fits_within() {
        let small = Vec3::new(0.5, 0.5, 0.5);
        let large = Vec3::new(1.0, 1.0, 1.0);

        assert!(small.fits_within(&large, EPSILON_GENERAL));
        assert!(!large.fits_within(&small, EPSILON_GENERAL));
    }

    #[test]
    fn test_vec3_valid_dimension() {
        assert!(Vec3::new(0.1, 0.2, 0.3).is_valid_dimension());
        assert!(!Vec3::new(0.0, 0.2, 0.3).is_valid_dimension());
        assert!(!Vec3::new(-0.1, 0.2, 0.3).is_valid_dimension());
        assert!(!Vec3::new(f64::NAN, 0.2, 0.3).is_valid_dimension());
        assert!(!Vec3::new(f64::INFINITY, 0.2, 0.3).is_valid_dimension());
    }

    #[test]
    fn test_vec3_snapped_to_grid() {
        let pos = Vec3::new(1.13, 0.0, 2.61);
        let snapped = pos.snapped(POSITION_GRID_STEP);
        assert!((snapped.x - 1.25).abs() < EPSILON_GENERAL);
        assert!((snapped.z - 2.5).abs() < EPSILON_GENERAL);
    }

    #[test]
    fn test_bounding_box_intersects() {
        let a = BoundingBox::from_center_and_dims(Vec3::zero(), Vec3::new(1.0, 1.0, 1.0));
        let b =
            BoundingBox::from_center_and_dims(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 1.0, 1.0));
        let c =
            BoundingBox::from_center_and_dims(Vec3::new(2.0, 2.0, 2.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_bounding_box_touching_faces_do_not_intersect() {
        let a = BoundingBox::from_center_and_dims(Vec3::zero(), Vec3::new(1.0, 1.0, 1.0));
        let b =
            BoundingBox::from_center_and_dims(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_bounding_box_containment() {
        let outer = BoundingBox::from_center_and_dims(Vec3::zero(), Vec3::new(1.0, 1.0, 1.0));
        let inner =
            BoundingBox::from_center_and_dims(Vec3::new(0.2, 0.2, 0.2), Vec3::new(0.2, 0.2, 0.2));
        let outside =
            BoundingBox::from_center_and_dims(Vec3::new(0.6, 0.0, 0.0), Vec3::new(0.2, 0.2, 0.2));

        assert!(inner.contained_in(&outer, EPSILON_GENERAL));
        assert!(!outside.contained_in(&outer, EPSILON_GENERAL));
    }
}
