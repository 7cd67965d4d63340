use glam::Vec2;

use super::handle::BodyHandle;
use crate::core::math::range_overlap;

/// Coordinate axis along which a collision is detected or resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes in resolution order
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// The perpendicular axis
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Read this axis' component of a vector
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Mutable access to this axis' component of a vector
    pub fn of_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }
}

/// Axis-aligned bounding box, the only collision shape in the space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box with its top-left corner at `position` and the given dimensions
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test, boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Penetration depth on each axis
    ///
    /// Components are only meaningful as depths when the boxes overlap; a
    /// non-positive component means the boxes are separated on that axis.
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            range_overlap(self.min.x, self.max.x, other.min.x, other.max.x),
            range_overlap(self.min.y, self.max.y, other.min.y, other.max.y),
        )
    }

    /// Axis with the smaller penetration depth, ties go to X
    pub fn min_penetration_axis(&self, other: &Aabb) -> Axis {
        let depth = self.penetration(other);
        if depth.x <= depth.y {
            Axis::X
        } else {
            Axis::Y
        }
    }
}

/// Which kinds of body took part in a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// An entity was pushed out of a concrete
    EntityConcrete,
    /// Two entities exchanged an impulse
    EntityEntity,
}

/// A collision detected during the last `update()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Always an entity
    pub first: BodyHandle,
    /// The concrete for `EntityConcrete`, the later entity for `EntityEntity`
    pub second: BodyHandle,
    /// Axis the contact was resolved on
    pub axis: Axis,
    /// Penetration depth per axis at the moment of detection
    pub overlap: Vec2,
    pub kind: ContactKind,
}

impl CollisionEvent {
    pub fn involves(&self, handle: BodyHandle) -> bool {
        self.first == handle || self.second == handle
    }

    pub fn has_concrete(&self) -> bool {
        self.kind == ContactKind::EntityConcrete
    }
}

/// Sides of an entity that touched a concrete during the last tick
///
/// `min_x` is the side facing negative X, `max_y` the side facing positive Y,
/// and so on. Cleared at the start of every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub min_x: bool,
    pub max_x: bool,
    pub min_y: bool,
    pub max_y: bool,
}

impl Contacts {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record a contact on the side of `axis` the entity was moving toward
    pub fn mark(&mut self, axis: Axis, toward_positive: bool) {
        match (axis, toward_positive) {
            (Axis::X, true) => self.max_x = true,
            (Axis::X, false) => self.min_x = true,
            (Axis::Y, true) => self.max_y = true,
            (Axis::Y, false) => self.min_y = true,
        }
    }

    pub fn any(&self) -> bool {
        self.min_x || self.max_x || self.min_y || self.max_y
    }
}
