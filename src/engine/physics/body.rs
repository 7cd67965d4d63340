use glam::Vec2;

use super::collision::{Aabb, Contacts};
use super::PhysicsError;

/// Default elasticity of a new entity (no damping of entity-entity impulses)
pub const DEFAULT_ELASTICITY: f32 = 1.0;

/// Default drag coefficient of a new entity
pub const DEFAULT_DRAG: f32 = 0.5;

/// State only dynamic bodies carry
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    mass: f32,
    pending_force: Vec2,
    /// Multiplied with the other entity's elasticity to scale impulses
    pub elasticity: f32,
    /// Scales air resistance, 0 ignores the space's air resistance
    pub drag: f32,
    pub(crate) contacts: Contacts,
}

impl EntityState {
    fn new(mass: f32) -> Result<Self, PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        Ok(Self {
            mass,
            pending_force: Vec2::ZERO,
            elasticity: DEFAULT_ELASTICITY,
            drag: DEFAULT_DRAG,
            contacts: Contacts::default(),
        })
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Force accumulated since the last tick
    pub fn pending_force(&self) -> Vec2 {
        self.pending_force
    }

    /// Sides that touched a concrete during the last tick
    pub fn contacts(&self) -> Contacts {
        self.contacts
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.pending_force += force;
    }

    /// Velocity change from the pending force; clears the force
    pub(crate) fn take_acceleration(&mut self) -> Vec2 {
        let delta = self.pending_force / self.mass;
        self.pending_force = Vec2::ZERO;
        delta
    }
}

/// What a body does in the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    /// Dynamic: gravity, forces, pushed out of concretes, collides with entities
    Entity(EntityState),
    /// Static or kinematic blocker, never displaced by resolution
    Concrete,
}

/// An axis-aligned box living in a `Space`
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Vec2,
    size: Vec2,
    velocity: Vec2,
    friction: f32,
    kind: BodyKind,
}

impl Body {
    /// Create a dynamic body with its top-left corner at `position`
    pub fn entity(position: Vec2, size: Vec2, mass: f32) -> Result<Self, PhysicsError> {
        Self::with_kind(position, size, BodyKind::Entity(EntityState::new(mass)?))
    }

    /// Create a blocker with its top-left corner at `position`
    pub fn concrete(position: Vec2, size: Vec2) -> Result<Self, PhysicsError> {
        Self::with_kind(position, size, BodyKind::Concrete)
    }

    fn with_kind(position: Vec2, size: Vec2, kind: BodyKind) -> Result<Self, PhysicsError> {
        if !(size.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(PhysicsError::InvalidDimension {
                width: size.x,
                height: size.y,
            });
        }
        Ok(Self {
            position,
            size,
            velocity: Vec2::ZERO,
            friction: 0.0,
            kind,
        })
    }

    /// Top-left corner
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport the body; no collision check is made
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Width and height, fixed at construction
    pub fn hitbox(&self) -> Vec2 {
        self.size
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_position_size(self.position, self.size)
    }

    /// `[x, y, x + width, y + height]`
    pub fn bounds(&self) -> [f32; 4] {
        let aabb = self.aabb();
        [aabb.min.x, aabb.min.y, aabb.max.x, aabb.max.y]
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_vel_x(&mut self, vel_x: f32) {
        self.velocity.x = vel_x;
    }

    pub fn set_vel_y(&mut self, vel_y: f32) {
        self.velocity.y = vel_y;
    }

    /// On a concrete, how much of its velocity it imparts to entities
    /// resolved against it. Between two entities the product of both
    /// frictions sets how strongly they drag each other along the contact.
    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction;
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    pub fn is_entity(&self) -> bool {
        matches!(self.kind, BodyKind::Entity(_))
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self.kind, BodyKind::Concrete)
    }

    pub fn as_entity(&self) -> Option<&EntityState> {
        match &self.kind {
            BodyKind::Entity(state) => Some(state),
            BodyKind::Concrete => None,
        }
    }

    pub fn as_entity_mut(&mut self) -> Option<&mut EntityState> {
        match &mut self.kind {
            BodyKind::Entity(state) => Some(state),
            BodyKind::Concrete => None,
        }
    }

    pub fn mass(&self) -> Option<f32> {
        self.as_entity().map(EntityState::mass)
    }

    /// Accumulate a force, consumed at the start of the next tick
    pub fn apply_force(&mut self, force: Vec2) -> Result<(), PhysicsError> {
        self.as_entity_mut()
            .map(|state| state.apply_force(force))
            .ok_or(PhysicsError::NotAnEntity)
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// Builder for bodies with non-default tunables
#[derive(Debug, Clone)]
pub struct BodyBuilder {
    mass: Option<f32>,
    position: Vec2,
    size: Vec2,
    velocity: Vec2,
    friction: f32,
    elasticity: f32,
    drag: f32,
}

impl BodyBuilder {
    /// Start a dynamic body with the given mass
    pub fn entity(mass: f32) -> Self {
        Self {
            mass: Some(mass),
            position: Vec2::ZERO,
            size: Vec2::ONE,
            velocity: Vec2::ZERO,
            friction: 0.0,
            elasticity: DEFAULT_ELASTICITY,
            drag: DEFAULT_DRAG,
        }
    }

    /// Start a static or kinematic blocker
    pub fn concrete() -> Self {
        Self {
            mass: None,
            ..Self::entity(1.0)
        }
    }

    /// Set the top-left corner
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set width and height
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    /// Set the initial velocity
    pub fn velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    pub fn friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Ignored for concretes
    pub fn elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity;
        self
    }

    /// Ignored for concretes
    pub fn drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    /// Validate and build the body
    pub fn build(self) -> Result<Body, PhysicsError> {
        let mut body = match self.mass {
            Some(mass) => Body::entity(self.position, self.size, mass)?,
            None => Body::concrete(self.position, self.size)?,
        };
        body.velocity = self.velocity;
        body.friction = self.friction;
        if let Some(state) = body.as_entity_mut() {
            state.elasticity = self.elasticity;
            state.drag = self.drag;
        }
        Ok(body)
    }
}

/// Common body configurations
pub mod presets {
    use super::*;

    /// Player-sized entity
    pub fn player(x: f32, y: f32) -> Result<Body, PhysicsError> {
        BodyBuilder::entity(5.0).position(x, y).size(50.0, 50.0).build()
    }

    /// Immovable block
    pub fn platform(x: f32, y: f32, width: f32, height: f32) -> Result<Body, PhysicsError> {
        BodyBuilder::concrete()
            .position(x, y)
            .size(width, height)
            .build()
    }

    /// Kinematic block that carries resting entities along with it
    pub fn moving_platform(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        vel_x: f32,
    ) -> Result<Body, PhysicsError> {
        BodyBuilder::concrete()
            .position(x, y)
            .size(width, height)
            .velocity(vel_x, 0.0)
            .friction(1.0)
            .build()
    }
}
