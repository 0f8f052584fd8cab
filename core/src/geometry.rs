//! Planar geometry shared by entities, systems, and presenters.
//!
//! Positions are expressed in arena units with the origin in the upper-left
//! corner and the y axis pointing down, matching screen space. Angles are
//! radians measured clockwise from the positive x axis under that convention.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Computes the bearing in radians from `origin` toward `target`.
///
/// Uses the four-quadrant arctangent of the displacement. When the two points
/// coincide, or either contains a non-finite component, the bearing is
/// undefined and `0.0` is returned instead so that no NaN reaches entity
/// state.
#[must_use]
pub fn angle_between(origin: Vec2, target: Vec2) -> f32 {
    let delta = target - origin;
    if !delta.is_finite() || delta == Vec2::ZERO {
        return 0.0;
    }
    delta.y.atan2(delta.x)
}

/// Reports whether two axis-aligned boxes overlap with a non-zero area.
///
/// Boxes that only share an edge or a corner do not overlap.
#[must_use]
pub fn bounding_boxes_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Fixed direction of travel captured when an entity is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bearing {
    radians: f32,
    direction: Vec2,
}

impl Bearing {
    /// Bearing pointing along the positive x axis.
    pub const EAST: Self = Self {
        radians: 0.0,
        direction: Vec2::X,
    };

    /// Creates a bearing from an angle in radians.
    ///
    /// Non-finite angles collapse to [`Bearing::EAST`].
    #[must_use]
    pub fn from_radians(radians: f32) -> Self {
        if !radians.is_finite() {
            return Self::EAST;
        }
        let (sin, cos) = radians.sin_cos();
        Self {
            radians,
            direction: Vec2::new(cos, sin),
        }
    }

    /// Creates a bearing from an angle in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// Bearing from `origin` toward `target`, see [`angle_between`].
    #[must_use]
    pub fn toward(origin: Vec2, target: Vec2) -> Self {
        Self::from_radians(angle_between(origin, target))
    }

    /// Angle of the bearing in radians.
    #[must_use]
    pub const fn radians(&self) -> f32 {
        self.radians
    }

    /// Unit vector pointing along the bearing.
    #[must_use]
    pub const fn direction(&self) -> Vec2 {
        self.direction
    }
}

impl Default for Bearing {
    fn default() -> Self {
        Self::EAST
    }
}

/// Axis-aligned rectangle anchored at its upper-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl BoundingBox {
    /// Creates a box from its upper-left corner and extent.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a box from its upper-left corner and size vectors.
    #[must_use]
    pub const fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Upper-left corner.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Lower-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Reports whether this box overlaps `other`, see [`bounding_boxes_overlap`].
    #[must_use]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        bounding_boxes_overlap(self, other)
    }
}

/// Rectangular play field spanning `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArenaBounds {
    /// Horizontal extent of the arena.
    pub width: f32,
    /// Vertical extent of the arena.
    pub height: f32,
}

impl ArenaBounds {
    /// Creates arena bounds with the provided extent.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre point of the arena.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Reports whether the point lies inside the arena, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
