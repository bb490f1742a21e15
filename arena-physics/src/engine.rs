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
//! Engine context
//!
//! [`Engine`] owns the object registry, the particle system and the system
//! scheduler, and advances them together once per frame.

use crate::config::{ParticleConfig, WorldConfig};
use crate::ecs::scheduler::{stages, Scheduler, StageId};
use crate::ecs::systems::{BodyIntegrationSystem, CollisionSystem, PlayerSystem};
use crate::ecs::{System, World};
use crate::error::Result;
use crate::particles::ParticleSystem;
use log::{info, trace};

/// Physics world plus particles, stepped as one
///
/// # Examples
///
/// ```
/// use arena_physics::ecs::components::EntityKind;
/// use arena_physics::engine::Engine;
/// use arena_physics::math::Vec3;
///
/// let mut engine = Engine::new();
/// let ball = engine
///     .world_mut()
///     .create(EntityKind::Sphere, None, Vec3::new(0.0, 10.0, 0.0), true, true)
///     .unwrap();
///
/// for _ in 0..60 {
///     engine.tick(1.0 / 60.0);
/// }
/// assert!(engine.world().get(ball).unwrap().position().y < 10.0);
/// ```
pub struct Engine {
    world: World,
    particles: ParticleSystem,
    scheduler: Scheduler,
    physics_enabled: bool,
    frame: u64,
}

impl Engine {
    /// Create an engine with default capacities
    pub fn new() -> Self {
        Self::assemble(World::new(), ParticleSystem::new())
    }

    /// Create an engine from validated configurations
    pub fn with_config(world: WorldConfig, particles: ParticleConfig) -> Result<Self> {
        Ok(Self::assemble(
            World::with_config(world)?,
            ParticleSystem::with_config(particles)?,
        ))
    }

    fn assemble(world: World, particles: ParticleSystem) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.add_system(BodyIntegrationSystem::new(), stages::INTEGRATION);
        scheduler.add_system(CollisionSystem::new(), stages::COLLISION);
        scheduler.add_system(PlayerSystem::new(), stages::PLAYER);
        info!("Engine initialized with {} systems", scheduler.system_count());

        Engine {
            world,
            particles,
            scheduler,
            physics_enabled: true,
            frame: 0,
        }
    }

    /// Advance one frame
    ///
    /// Runs body integration, the collision pass and the player step (unless
    /// physics is paused), any extra systems, then the particle update.
    pub fn tick(&mut self, dt: f32) {
        if self.physics_enabled {
            self.scheduler.run(&mut self.world, dt);
        }
        self.particles.update(dt);
        self.frame += 1;
        trace!("Frame {} done (dt {:.4})", self.frame, dt);
    }

    /// Register an additional system
    pub fn add_system<S: System + 'static>(&mut self, system: S, stage: StageId) {
        self.scheduler.add_system(system, stage);
    }

    /// Pause or resume the physics systems; particles keep updating
    pub fn set_physics_enabled(&mut self, enabled: bool) {
        if enabled != self.physics_enabled {
            info!("Physics {}", if enabled { "enabled" } else { "paused" });
        }
        self.physics_enabled = enabled;
    }

    /// Check if the physics systems run on tick
    pub fn physics_enabled(&self) -> bool {
        self.physics_enabled
    }

    /// Frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The object registry
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The object registry, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The particle system
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// The particle system, mutably
    pub fn particles_mut(&mut self) -> &mut ParticleSystem {
        &mut self.particles
    }

    /// The system scheduler
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
