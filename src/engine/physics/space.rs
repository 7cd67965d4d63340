use glam::Vec2;
use log::{debug, trace};
use std::collections::HashMap;

use super::body::Body;
use super::collision::{Aabb, Axis, CollisionEvent, ContactKind, Contacts};
use super::config::SpaceConfig;
use super::handle::{BodyHandle, HandleAllocator};
use super::snapshot::BodyInstance;
use super::PhysicsError;
use crate::core::math::{pair_mut, place_before};

#[derive(Debug)]
struct Slot {
    handle: BodyHandle,
    body: Body,
}

/// Owns every body and advances the simulation one tick per `update()`
///
/// Bodies live in a single arena kept in insertion order; that order is the
/// enumeration order for hosts and the processing order of every pass.
#[derive(Debug)]
pub struct Space {
    config: SpaceConfig,

    /// All bodies, entities and concretes, in insertion order
    slots: Vec<Slot>,

    /// Handle -> position in `slots`
    index: HashMap<BodyHandle, usize>,

    handles: HandleAllocator,

    /// Collisions found during the last tick
    events: Vec<CollisionEvent>,
}

impl Space {
    /// Create an empty space with the default configuration
    pub fn new() -> Self {
        Self::with_config(SpaceConfig::default())
    }

    /// Create an empty space with custom constants
    pub fn with_config(config: SpaceConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            index: HashMap::new(),
            handles: HandleAllocator::default(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    pub fn gravity(&self) -> f32 {
        self.config.gravity
    }

    /// Set the per-tick Y velocity increment for entities
    pub fn set_gravity(&mut self, gravity: f32) {
        self.config.gravity = gravity;
    }

    pub fn collision_coefficient(&self) -> f32 {
        self.config.collision_coefficient
    }

    /// Set the global entity-entity impulse scalar
    pub fn set_collision_coefficient(&mut self, coefficient: f32) {
        self.config.collision_coefficient = coefficient;
    }

    pub fn air_resistance(&self) -> f32 {
        self.config.air_resistance
    }

    pub fn set_air_resistance(&mut self, air_resistance: f32) {
        self.config.air_resistance = air_resistance;
    }

    pub fn axis_speed_limit(&self) -> Option<f32> {
        self.config.axis_speed_limit
    }

    pub fn set_axis_speed_limit(&mut self, limit: Option<f32>) {
        self.config.axis_speed_limit = limit;
    }

    /// Register a body of either kind
    pub fn add(&mut self, body: Body) -> BodyHandle {
        let handle = self.handles.allocate();
        debug!(
            "Adding {} {} at {:?}",
            if body.is_entity() { "entity" } else { "concrete" },
            handle,
            body.position()
        );
        self.index.insert(handle, self.slots.len());
        self.slots.push(Slot { handle, body });
        handle
    }

    /// Register a body that must be an entity
    pub fn add_entity(&mut self, body: Body) -> Result<BodyHandle, PhysicsError> {
        if !body.is_entity() {
            return Err(PhysicsError::NotAnEntity);
        }
        Ok(self.add(body))
    }

    /// Remove a body, keeping the order of the others
    pub fn remove(&mut self, handle: BodyHandle) -> Result<Body, PhysicsError> {
        let position = self
            .index
            .remove(&handle)
            .ok_or(PhysicsError::UnknownBody(handle))?;
        let slot = self.slots.remove(position);

        for (offset, shifted) in self.slots[position..].iter().enumerate() {
            self.index.insert(shifted.handle, position + offset);
        }

        debug!("Removed {}", handle);
        Ok(slot.body)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.index.get(&handle).map(|&i| &self.slots[i].body)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.index.get(&handle).map(|&i| &mut self.slots[i].body)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.index.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every body with its handle, in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.slots.iter().map(|slot| (slot.handle, &slot.body))
    }

    /// Every body in insertion order, which is also the drawing order
    pub fn get_all(&self) -> impl Iterator<Item = &Body> + '_ {
        self.slots.iter().map(|slot| &slot.body)
    }

    /// Entities only, in insertion order
    pub fn entities(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.bodies().filter(|(_, body)| body.is_entity())
    }

    /// Concretes only, in insertion order
    pub fn concretes(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.bodies().filter(|(_, body)| body.is_concrete())
    }

    /// Accumulate a force on an entity, consumed by the next `update()`
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) -> Result<(), PhysicsError> {
        self.get_mut(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?
            .apply_force(force)
    }

    /// Sides of an entity that touched a concrete during the last tick
    pub fn contacts(&self, handle: BodyHandle) -> Option<Contacts> {
        self.get(handle)?.as_entity().map(|state| state.contacts())
    }

    /// Whether the entity rested on a concrete during the last tick, on the
    /// side gravity pulls toward
    pub fn is_grounded(&self, handle: BodyHandle) -> bool {
        let Some(contacts) = self.contacts(handle) else {
            return false;
        };
        if self.config.gravity < 0.0 {
            contacts.min_y
        } else if self.config.gravity > 0.0 {
            contacts.max_y
        } else {
            false
        }
    }

    /// Collisions found during the last `update()`
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Concretes whose boxes overlap `aabb`, in insertion order
    pub fn concretes_overlapping<'a>(
        &'a self,
        aabb: &'a Aabb,
    ) -> impl Iterator<Item = BodyHandle> + 'a {
        self.concretes()
            .filter(move |(_, body)| body.aabb().overlaps(aabb))
            .map(|(handle, _)| handle)
    }

    /// Whether a box placed at `aabb` would overlap any concrete
    pub fn overlaps_any_concrete(&self, aabb: &Aabb) -> bool {
        self.concretes_overlapping(aabb).next().is_some()
    }

    /// Flat render records for every body, in insertion order
    pub fn instances(&self) -> Vec<BodyInstance> {
        self.get_all().map(BodyInstance::from).collect()
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self) {
        self.events.clear();

        self.integrate_forces();
        for axis in Axis::ALL {
            self.move_along(axis);
        }
        self.resolve_entity_pairs();
    }

    /// Gravity, pending forces, drag and the speed limit, entities only
    fn integrate_forces(&mut self) {
        let gravity = Vec2::new(0.0, self.config.gravity);
        let air_resistance = self.config.air_resistance;
        let speed_limit = self.config.axis_speed_limit;

        for slot in &mut self.slots {
            let body = &mut slot.body;
            let Some(state) = body.as_entity_mut() else {
                continue;
            };
            state.contacts.clear();
            let acceleration = state.take_acceleration();
            let damping = state.drag * air_resistance / state.mass();

            let mut velocity = body.velocity() + gravity + acceleration;

            if damping != 0.0 {
                for axis in Axis::ALL {
                    let component = axis.of_mut(&mut velocity);
                    let change = damping * *component;
                    // Drag strong enough to reverse the motion just stops it
                    *component = if change.abs() > component.abs() {
                        0.0
                    } else {
                        *component - change
                    };
                }
            }

            if let Some(limit) = speed_limit {
                velocity = velocity.clamp(Vec2::splat(-limit), Vec2::splat(limit));
            }

            body.set_velocity(velocity);
        }
    }

    /// Move every body along `axis`, then push entities out of concretes
    fn move_along(&mut self, axis: Axis) {
        for slot in &mut self.slots {
            let step = axis.of(slot.body.velocity());
            slot.body.translate(axis.unit() * step);
        }

        for i in 0..self.slots.len() {
            if self.slots[i].body.is_entity() {
                self.resolve_against_concrete(i, axis);
            }
        }
    }

    /// Resolve the entity at `entity_index` against the first concrete it
    /// overlaps. Later blockers are left for the next tick.
    fn resolve_against_concrete(&mut self, entity_index: usize, axis: Axis) {
        let entity_box = self.slots[entity_index].body.aabb();
        let Some(blocker) = self
            .slots
            .iter()
            .find(|slot| slot.body.is_concrete() && slot.body.aabb().overlaps(&entity_box))
        else {
            return;
        };

        let blocker_handle = blocker.handle;
        let blocker_box = blocker.body.aabb();
        let blocker_velocity = blocker.body.velocity();
        let friction = blocker.body.friction();
        let overlap = entity_box.penetration(&blocker_box);

        let slot = &mut self.slots[entity_index];
        let entity_handle = slot.handle;
        let body = &mut slot.body;

        let relative = axis.of(body.velocity()) - axis.of(blocker_velocity);
        let toward_positive = if relative != 0.0 {
            relative > 0.0
        } else {
            axis.of(entity_box.center()) <= axis.of(blocker_box.center())
        };

        // Flush against the edge the entity came through
        let mut position = body.position();
        *axis.of_mut(&mut position) = if toward_positive {
            place_before(axis.of(blocker_box.min), axis.of(body.hitbox()))
        } else {
            axis.of(blocker_box.max)
        };
        body.set_position(position);

        let mut velocity = body.velocity();
        *axis.of_mut(&mut velocity) = if friction > 0.0 {
            axis.of(blocker_velocity) * friction
        } else {
            0.0
        };
        let tangent = axis.other();
        let carry = friction.clamp(0.0, 1.0);
        let tangential = tangent.of_mut(&mut velocity);
        *tangential += (tangent.of(blocker_velocity) - *tangential) * carry;
        body.set_velocity(velocity);

        if let Some(state) = body.as_entity_mut() {
            state.contacts.mark(axis, toward_positive);
        }

        trace!(
            "{} resolved against {} on {:?} (overlap {:?})",
            entity_handle,
            blocker_handle,
            axis,
            overlap
        );
        self.events.push(CollisionEvent {
            first: entity_handle,
            second: blocker_handle,
            axis,
            overlap,
            kind: ContactKind::EntityConcrete,
        });

        let resolved_box = self.slots[entity_index].body.aabb();
        if self.overlaps_any_concrete(&resolved_box) {
            debug!(
                "{} squeezed on {:?}, overlap left for next tick",
                entity_handle, axis
            );
        }
    }

    /// Equal and opposite impulses between overlapping entities, plus surface
    /// friction along the contact
    fn resolve_entity_pairs(&mut self) {
        let coefficient = self.config.collision_coefficient;
        let entity_indices: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.body.is_entity())
            .map(|(i, _)| i)
            .collect();

        for (n, &i) in entity_indices.iter().enumerate() {
            for &j in &entity_indices[n + 1..] {
                let (a, b) = pair_mut(&mut self.slots, i, j);
                let (a_box, b_box) = (a.body.aabb(), b.body.aabb());
                if !a_box.overlaps(&b_box) {
                    continue;
                }

                let (Some(a_state), Some(b_state)) = (a.body.as_entity(), b.body.as_entity())
                else {
                    continue;
                };
                let (a_mass, b_mass) = (a_state.mass(), b_state.mass());
                let bounciness = a_state.elasticity * b_state.elasticity;
                let grip = (a.body.friction() * b.body.friction()).clamp(0.0, 1.0);

                let axis = a_box.min_penetration_axis(&b_box);
                let relative = b.body.velocity() - a.body.velocity();
                let impulse = coefficient * bounciness * axis.of(relative);

                // Surface friction pulls both toward their shared momentum
                // velocity along the contact, full grip matches them exactly
                let tangent = axis.other();
                let drag = grip * tangent.of(relative) / (1.0 / a_mass + 1.0 / b_mass);

                let exchange = axis.unit() * impulse + tangent.unit() * drag;
                let a_velocity = a.body.velocity() + exchange / a_mass;
                let b_velocity = b.body.velocity() - exchange / b_mass;
                a.body.set_velocity(a_velocity);
                b.body.set_velocity(b_velocity);

                trace!(
                    "{} and {} exchanged impulse {} on {:?}",
                    a.handle,
                    b.handle,
                    impulse,
                    axis
                );
                self.events.push(CollisionEvent {
                    first: a.handle,
                    second: b.handle,
                    axis,
                    overlap: a_box.penetration(&b_box),
                    kind: ContactKind::EntityEntity,
                });
            }
        }
    }
}

impl Default for Space {
    fn default() -> Self {
        Self::new()
    }
}
