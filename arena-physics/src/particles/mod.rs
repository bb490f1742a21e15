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
//! Particle engine
//!
//! A [`ParticleSystem`] owns a fixed number of emitters; each emitter owns a
//! fixed pool of particles. Updating the system emits new particles at each
//! emitter's rate and ages the live ones. Randomness is confined to emission
//! and every emitter draws from its own generator, so a seeded system
//! replays identically whether emitters are updated in sequence or in
//! parallel.
//!
//! # Examples
//!
//! ```
//! use arena_physics::config::ParticleConfig;
//! use arena_physics::math::Vec3;
//! use arena_physics::particles::ParticleSystem;
//!
//! let config = ParticleConfig::default().with_seed(1);
//! let mut particles = ParticleSystem::with_config(config).unwrap();
//! let sparks = particles.spawn_sparks(Vec3::new(0.0, 1.0, 0.0), 20).unwrap();
//! assert_eq!(particles.get(sparks).unwrap().live_count(), 20);
//!
//! particles.update(1.0 / 60.0);
//! assert!(particles.billboards().count() <= 20);
//! ```

mod emitter;
mod particle;
mod presets;

pub use emitter::{Billboard, EmitterConfig, ParticleEmitter};
pub use particle::{Particle, ParticleKind};

use crate::config::ParticleConfig;
use crate::error::{EngineError, Result};
use crate::math::Vec3;
use crate::pool::{PoolKey, SlotPool};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Handle to an emitter in a [`ParticleSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmitterId {
    index: u32,
    generation: u32,
}

impl PoolKey for EmitterId {
    fn from_raw(index: u32, generation: u32) -> Self {
        EmitterId { index, generation }
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Emitter({}, gen: {})", self.index, self.generation)
    }
}

/// The emitter collection
pub struct ParticleSystem {
    emitters: SlotPool<EmitterId, ParticleEmitter>,
    max_particles_per_emitter: usize,
    seeder: StdRng,
}

impl ParticleSystem {
    /// Create a system with default capacities, seeded from the OS
    pub fn new() -> Self {
        Self::build(&ParticleConfig::default())
    }

    /// Create a system from a validated configuration
    pub fn with_config(config: ParticleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &ParticleConfig) -> Self {
        let seeder = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            "Particle system initialized ({} emitters, {} particles each)",
            config.max_emitters, config.max_particles_per_emitter
        );
        ParticleSystem {
            emitters: SlotPool::with_capacity(config.max_emitters),
            max_particles_per_emitter: config.max_particles_per_emitter,
            seeder,
        }
    }

    /// Create an emitter with the base defaults for `kind`
    pub fn create(&mut self, name: &str, position: Vec3, kind: ParticleKind) -> Result<EmitterId> {
        self.create_with_config(name, position, EmitterConfig::for_kind(kind))
    }

    /// Create an emitter with a full configuration
    ///
    /// The pool is allocated here with `config.max_particles` slots, clamped
    /// to the per-emitter limit.
    pub fn create_with_config(
        &mut self,
        name: &str,
        position: Vec3,
        mut config: EmitterConfig,
    ) -> Result<EmitterId> {
        if self.emitters.is_full() {
            warn!("Maximum emitter limit of {} reached", self.emitters.capacity());
            return Err(EngineError::CapacityExceeded {
                pool: "emitter",
                capacity: self.emitters.capacity(),
            });
        }
        if config.max_particles > self.max_particles_per_emitter {
            warn!(
                "Emitter {name:?} asked for {} particles, clamped to {}",
                config.max_particles, self.max_particles_per_emitter
            );
            config.max_particles = self.max_particles_per_emitter;
        }

        let rng = StdRng::seed_from_u64(self.seeder.gen());
        let emitter = ParticleEmitter::new(name, position, config, rng);
        let id = self
            .emitters
            .insert(emitter)
            .ok_or(EngineError::CapacityExceeded {
                pool: "emitter",
                capacity: self.emitters.capacity(),
            })?;
        info!("Created particle emitter: {name}");
        Ok(id)
    }

    /// Destroy an emitter and its particles
    pub fn destroy(&mut self, id: EmitterId) -> Option<ParticleEmitter> {
        let emitter = self.emitters.remove(id)?;
        info!("Destroyed particle emitter: {}", emitter.name());
        Some(emitter)
    }

    /// Destroy every emitter
    pub fn clear(&mut self) {
        let removed = self.emitters.clear().len();
        info!("All particles cleared ({removed} emitters)");
    }

    /// First emitter with the given name, in creation order
    pub fn find(&self, name: &str) -> Option<EmitterId> {
        self.emitters
            .iter()
            .find(|(_, e)| e.name() == name)
            .map(|(id, _)| id)
    }

    /// Get an emitter
    pub fn get(&self, id: EmitterId) -> Option<&ParticleEmitter> {
        self.emitters.get(id)
    }

    /// Get an emitter mutably
    pub fn get_mut(&mut self, id: EmitterId) -> Option<&mut ParticleEmitter> {
        self.emitters.get_mut(id)
    }

    fn emitter_mut(&mut self, id: EmitterId) -> Result<&mut ParticleEmitter> {
        self.emitters.get_mut(id).ok_or(EngineError::StaleHandle)
    }

    /// Pause or resume an emitter
    pub fn set_active(&mut self, id: EmitterId, active: bool) -> Result<()> {
        self.emitter_mut(id)?.set_active(active);
        Ok(())
    }

    /// Move an emitter
    pub fn set_position(&mut self, id: EmitterId, position: Vec3) -> Result<()> {
        self.emitter_mut(id)?.set_position(position);
        Ok(())
    }

    /// Spawn up to `count` particles from an emitter, returning how many fit
    pub fn emit(&mut self, id: EmitterId, count: usize) -> Result<usize> {
        Ok(self.emitter_mut(id)?.emit(count))
    }

    /// Advance every emitter by `dt`
    pub fn update(&mut self, dt: f32) {
        #[cfg(feature = "parallel")]
        self.emitters.par_values_mut().for_each(|e| e.update(dt));

        #[cfg(not(feature = "parallel"))]
        for emitter in self.emitters.values_mut() {
            emitter.update(dt);
        }

        debug!(
            "Particle update: {} emitters, {} live particles",
            self.emitters.len(),
            self.live_particles()
        );
    }

    /// Number of emitters
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    /// Check if there are no emitters
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Maximum number of emitters
    pub fn capacity(&self) -> usize {
        self.emitters.capacity()
    }

    /// Live particles across all emitters
    pub fn live_particles(&self) -> usize {
        self.emitters.iter().map(|(_, e)| e.live_count()).sum()
    }

    /// Iterate over emitters in creation order
    pub fn iter(&self) -> impl Iterator<Item = (EmitterId, &ParticleEmitter)> + '_ {
        self.emitters.iter()
    }

    /// Every live particle as a billboard, grouped by emitter
    pub fn billboards(&self) -> impl Iterator<Item = Billboard> + '_ {
        self.emitters.iter().flat_map(|(_, e)| e.billboards())
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
