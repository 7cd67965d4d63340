// Global tunables for a physics space

/// Per-space simulation constants
///
/// Every field is settable at runtime through the matching `Space` setter;
/// new values take effect on the next `update()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceConfig {
    /// Added to every entity's Y velocity each tick
    pub gravity: f32,
    /// Scales the impulse exchanged by overlapping entities
    pub collision_coefficient: f32,
    /// Scales velocity-proportional drag on entities (0 disables drag)
    pub air_resistance: f32,
    /// Clamp applied to each velocity component of an entity before
    /// integration. Keep it below the smallest body dimension to stop
    /// fast entities from skipping over thin blockers.
    pub axis_speed_limit: Option<f32>,
}

/// A space with no gravity, no entity-entity impulse and no drag
pub const DEFAULT_CONFIG: SpaceConfig = SpaceConfig {
    gravity: 0.0,
    collision_coefficient: 0.0,
    air_resistance: 0.0,
    axis_speed_limit: None,
};

impl Default for SpaceConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl SpaceConfig {
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_collision_coefficient(mut self, coefficient: f32) -> Self {
        self.collision_coefficient = coefficient;
        self
    }

    pub fn with_air_resistance(mut self, air_resistance: f32) -> Self {
        self.air_resistance = air_resistance;
        self
    }

    pub fn with_axis_speed_limit(mut self, limit: f32) -> Self {
        self.axis_speed_limit = Some(limit);
        self
    }
}
