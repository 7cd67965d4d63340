//! Minimal 2D axis-aligned box physics.
//!
//! A [`Space`] owns dynamic entities and static or kinematic concretes and
//! advances them one tick per [`Space::update`]: gravity and forces first,
//! then movement and blocker resolution on X, then on Y, then impulses
//! between overlapping entities. Resolving the axes separately keeps bodies
//! from snagging on corners.

pub mod core;
pub mod engine;

pub use engine::physics::{
    instance_bytes, presets, Aabb, Axis, Body, BodyBuilder, BodyHandle, BodyInstance, BodyKind,
    CollisionEvent, ContactKind, Contacts, EntityState, PhysicsError, Space, SpaceConfig,
};
