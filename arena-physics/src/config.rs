// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Engine configuration
//!
//! Settings are plain structs with defaults and `with_*` builders. They are
//! validated when handed to the [`World`](crate::ecs::World) or the
//! [`ParticleSystem`](crate::particles::ParticleSystem); the per-frame code
//! reads them without further checks.

use crate::error::{EngineError, Result};

/// Default maximum number of objects in the registry
pub const DEFAULT_MAX_OBJECTS: usize = 500;

/// Default maximum number of live particle emitters
pub const DEFAULT_MAX_EMITTERS: usize = 20;

/// Upper bound on a single emitter's particle pool
pub const DEFAULT_MAX_PARTICLES_PER_EMITTER: usize = 500;

/// Player movement and physics tuning
///
/// Read by every physics step. `gravity` is also the scene gravity applied to
/// every simulated object, so changing it affects more than the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPhysicsSettings {
    /// Horizontal speed while walking (units/s)
    pub walk_speed: f32,
    /// Horizontal speed while running (units/s)
    pub run_speed: f32,
    /// Vertical velocity applied on jump (units/s)
    pub jump_force: f32,
    /// Signed vertical acceleration (units/s², negative is down)
    pub gravity: f32,
    /// Player capsule height
    pub player_height: f32,
    /// Player capsule radius
    pub player_radius: f32,
    /// Fraction of steering authority kept while airborne, in `[0, 1]`
    pub air_control: f32,
    /// Per-frame horizontal velocity multiplier while the player is grounded
    pub ground_friction: f32,
}

impl Default for PlayerPhysicsSettings {
    fn default() -> Self {
        PlayerPhysicsSettings {
            walk_speed: 5.0,
            run_speed: 10.0,
            jump_force: 12.0,
            gravity: -25.0,
            player_height: 1.8,
            player_radius: 0.3,
            air_control: 0.3,
            ground_friction: 0.8,
        }
    }
}

impl PlayerPhysicsSettings {
    /// Set walk and run speeds
    pub fn with_speeds(mut self, walk_speed: f32, run_speed: f32) -> Self {
        self.walk_speed = walk_speed;
        self.run_speed = run_speed;
        self
    }

    /// Set the jump velocity
    pub fn with_jump_force(mut self, jump_force: f32) -> Self {
        self.jump_force = jump_force;
        self
    }

    /// Set the gravity magnitude (signed, negative pulls down)
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the player capsule dimensions
    pub fn with_capsule(mut self, height: f32, radius: f32) -> Self {
        self.player_height = height;
        self.player_radius = radius;
        self
    }

    /// Set the airborne steering factor
    pub fn with_air_control(mut self, air_control: f32) -> Self {
        self.air_control = air_control;
        self
    }

    /// Set the grounded friction multiplier
    pub fn with_ground_friction(mut self, ground_friction: f32) -> Self {
        self.ground_friction = ground_friction;
        self
    }

    /// Check that every value is finite and the capsule is well formed
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("player_height", self.player_height),
            ("player_radius", self.player_radius),
            ("air_control", self.air_control),
            ("ground_friction", self.ground_friction),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EngineError::InvalidConfig(format!("{name} must be finite, got {value}")));
        }
        if self.player_radius <= 0.0 || self.player_height < self.player_radius * 2.0 {
            return Err(EngineError::InvalidConfig(format!(
                "player capsule {}x{} is degenerate",
                self.player_height, self.player_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.air_control) {
            return Err(EngineError::InvalidConfig(format!(
                "air_control must be within [0, 1], got {}",
                self.air_control
            )));
        }
        Ok(())
    }
}

/// Object registry configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    /// Maximum number of live objects
    pub max_objects: usize,
    /// Initial player and gravity settings
    pub player: PlayerPhysicsSettings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            max_objects: DEFAULT_MAX_OBJECTS,
            player: PlayerPhysicsSettings::default(),
        }
    }
}

impl WorldConfig {
    /// Create a configuration with a custom object capacity
    pub fn new(max_objects: usize) -> Self {
        WorldConfig {
            max_objects,
            ..Default::default()
        }
    }

    /// Use the given player settings
    pub fn with_player_settings(mut self, player: PlayerPhysicsSettings) -> Self {
        self.player = player;
        self
    }

    /// Check capacities and nested settings
    pub fn validate(&self) -> Result<()> {
        if self.max_objects == 0 {
            return Err(EngineError::InvalidConfig("max_objects must be at least 1".to_string()));
        }
        self.player.validate()
    }
}

/// Particle system configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticleConfig {
    /// Maximum number of live emitters
    pub max_emitters: usize,
    /// Largest particle pool a single emitter may allocate
    pub max_particles_per_emitter: usize,
    /// Seed for emitter random streams, `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            max_emitters: DEFAULT_MAX_EMITTERS,
            max_particles_per_emitter: DEFAULT_MAX_PARTICLES_PER_EMITTER,
            seed: None,
        }
    }
}

impl ParticleConfig {
    /// Create a configuration with custom capacities
    pub fn new(max_emitters: usize, max_particles_per_emitter: usize) -> Self {
        ParticleConfig {
            max_emitters,
            max_particles_per_emitter,
            seed: None,
        }
    }

    /// Seed the emitter random streams for reproducible effects
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check capacities
    pub fn validate(&self) -> Result<()> {
        if self.max_emitters == 0 {
            return Err(EngineError::InvalidConfig("max_emitters must be at least 1".to_string()));
        }
        if self.max_particles_per_emitter == 0 {
            return Err(EngineError::InvalidConfig(
                "max_particles_per_emitter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
