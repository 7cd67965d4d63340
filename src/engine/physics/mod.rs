// Axis-aligned box physics: bodies, collision resolution and the space that
// drives them one tick at a time.

pub mod body;
mod collision;
mod config;
mod handle;
mod snapshot;
mod space;

pub use body::{presets, Body, BodyBuilder, BodyKind, EntityState};
pub use collision::{Aabb, Axis, CollisionEvent, ContactKind, Contacts};
pub use config::{SpaceConfig, DEFAULT_CONFIG};
pub use handle::BodyHandle;
pub use snapshot::{instance_bytes, BodyInstance, KIND_CONCRETE, KIND_ENTITY};
pub use space::Space;

/// Physics errors
///
/// Only construction and handle lookups fail; a tick never does.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("Invalid body dimensions: {width} x {height} (both must be positive)")]
    InvalidDimension { width: f32, height: f32 },

    #[error("Invalid mass: {0} (must be positive)")]
    InvalidMass(f32),

    #[error("Unknown body: {0}")]
    UnknownBody(BodyHandle),

    #[error("Operation requires an entity, got a concrete")]
    NotAnEntity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_error_display() {
        let err = PhysicsError::InvalidMass(0.0);
        assert_eq!(err.to_string(), "Invalid mass: 0 (must be positive)");

        let err = PhysicsError::UnknownBody(BodyHandle::from_u64(3));
        assert_eq!(err.to_string(), "Unknown body: body#3");
    }

    #[test]
    fn test_invalid_dimension_display() {
        let err = PhysicsError::InvalidDimension {
            width: 0.0,
            height: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid body dimensions: 0 x 10 (both must be positive)"
        );
    }
}
