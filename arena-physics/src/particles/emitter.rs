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
//! Particle emitters
//!
//! An emitter owns a fixed pool of [`Particle`] slots allocated once at
//! creation. Emission fills the first free slot; nothing is allocated per
//! particle afterwards.

use super::particle::{Particle, ParticleKind};
use crate::color::Color;
use crate::math::Vec3;
use log::trace;
use rand::rngs::StdRng;
use rand::Rng;

/// Spawn policy and appearance of an emitter's particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterConfig {
    /// Archetype stamped onto spawned particles
    pub kind: ParticleKind,
    /// Pool size
    pub max_particles: usize,
    /// Particles per second while looping, zero for burst-only emitters
    pub emission_rate: f32,
    /// Base lifetime in seconds, jittered by ±20% per particle
    pub lifetime: f32,
    /// Smallest spawn size
    pub min_size: f32,
    /// Largest spawn size
    pub max_size: f32,
    /// Color at birth
    pub start_color: Color,
    /// Color at death
    pub end_color: Color,
    /// Per-axis lower bound of the spawn velocity
    pub velocity_min: Vec3,
    /// Per-axis upper bound of the spawn velocity
    pub velocity_max: Vec3,
    /// Added to each particle's acceleration every second
    pub gravity: Vec3,
    /// Keep emitting at `emission_rate`
    pub looping: bool,
    /// Store absolute positions instead of offsets from the emitter origin
    pub world_space: bool,
}

impl EmitterConfig {
    /// Base defaults shared by every archetype
    pub fn for_kind(kind: ParticleKind) -> Self {
        EmitterConfig {
            kind,
            max_particles: 100,
            emission_rate: 10.0,
            lifetime: 2.0,
            min_size: 0.1,
            max_size: 0.3,
            start_color: Color::WHITE,
            end_color: Color::WHITE.with_alpha(0),
            velocity_min: Vec3::new(-1.0, 1.0, -1.0),
            velocity_max: Vec3::new(1.0, 3.0, 1.0),
            gravity: Vec3::new(0.0, -2.0, 0.0),
            looping: true,
            world_space: true,
        }
    }

    /// Set the pool size
    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    /// Set the looping emission rate
    pub fn with_emission_rate(mut self, emission_rate: f32) -> Self {
        self.emission_rate = emission_rate;
        self
    }

    /// Set the base lifetime
    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Set the spawn size range
    pub fn with_size_range(mut self, min_size: f32, max_size: f32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    /// Set the color gradient
    pub fn with_colors(mut self, start_color: Color, end_color: Color) -> Self {
        self.start_color = start_color;
        self.end_color = end_color;
        self
    }

    /// Set the spawn velocity range
    pub fn with_velocity_range(mut self, velocity_min: Vec3, velocity_max: Vec3) -> Self {
        self.velocity_min = velocity_min;
        self.velocity_max = velocity_max;
        self
    }

    /// Set the particle gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Turn looping emission on or off
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Choose world-space or emitter-local particle positions
    pub fn with_world_space(mut self, world_space: bool) -> Self {
        self.world_space = world_space;
        self
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self::for_kind(ParticleKind::Custom)
    }
}

/// A particle ready for billboard drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    /// World position
    pub position: Vec3,
    /// Edge length
    pub size: f32,
    /// Tint
    pub color: Color,
    /// Rotation in degrees
    pub rotation: f32,
}

/// Uniform sample from the range spanned by `min` and `max`
///
/// The bounds may be given in either order.
fn random_between(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// A named particle source with its own pool
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    name: String,
    position: Vec3,
    config: EmitterConfig,
    active: bool,
    particles: Vec<Particle>,
    live: usize,
    emission_timer: f32,
    rng: StdRng,
}

impl ParticleEmitter {
    pub(crate) fn new(name: &str, position: Vec3, config: EmitterConfig, rng: StdRng) -> Self {
        ParticleEmitter {
            name: name.to_string(),
            position,
            config,
            active: true,
            particles: vec![Particle::default(); config.max_particles],
            live: 0,
            emission_timer: 0.0,
            rng,
        }
    }

    /// Emitter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emitter origin
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the emitter origin
    ///
    /// Local-space particles follow the origin, world-space ones stay put.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Archetype
    pub fn kind(&self) -> ParticleKind {
        self.config.kind
    }

    /// Spawn configuration
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Check if the emitter is updating and emitting
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pause or resume the emitter
    ///
    /// A paused emitter neither emits nor ages its particles, but they stay
    /// visible.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Number of live particles
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Pool size
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Check if every pool slot is in use
    pub fn is_full(&self) -> bool {
        self.live >= self.particles.len()
    }

    /// Live particles in pool order
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter().filter(|p| p.active)
    }

    /// Live particles as billboards in world coordinates
    pub fn billboards(&self) -> impl Iterator<Item = Billboard> + '_ {
        let offset = if self.config.world_space {
            Vec3::ZERO
        } else {
            self.position
        };
        self.particles().map(move |p| Billboard {
            position: p.position + offset,
            size: p.size,
            color: p.color,
            rotation: p.rotation,
        })
    }

    /// Spawn up to `count` particles into free slots
    ///
    /// Returns how many were spawned: fewer than `count` once the pool fills,
    /// zero if the emitter is inactive.
    pub fn emit(&mut self, count: usize) -> usize {
        if !self.active {
            return 0;
        }

        let mut spawned = 0;
        while spawned < count && self.live < self.particles.len() {
            let Some(slot) = self.particles.iter().position(|p| !p.active) else {
                break;
            };
            let particle = self.spawn();
            self.particles[slot] = particle;
            self.live += 1;
            spawned += 1;
        }
        spawned
    }

    fn spawn(&mut self) -> Particle {
        let config = &self.config;
        let rng = &mut self.rng;

        let position = if config.world_space {
            self.position
        } else {
            Vec3::ZERO
        };
        let velocity = Vec3::new(
            random_between(rng, config.velocity_min.x, config.velocity_max.x),
            random_between(rng, config.velocity_min.y, config.velocity_max.y),
            random_between(rng, config.velocity_min.z, config.velocity_max.z),
        );
        let start_size = random_between(rng, config.min_size, config.max_size);
        let max_lifetime = config.lifetime * random_between(rng, 0.8, 1.2);

        Particle {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            color: config.start_color,
            start_color: config.start_color,
            end_color: config.end_color,
            size: start_size,
            start_size,
            end_size: start_size * 0.1,
            lifetime: max_lifetime,
            max_lifetime,
            rotation: random_between(rng, 0.0, 360.0),
            rotation_speed: random_between(rng, -180.0, 180.0),
            kind: config.kind,
            active: true,
        }
    }

    /// Advance the emitter by `dt`
    ///
    /// A looping emitter first spawns one particle per elapsed emission
    /// interval, as many as fit in the pool, so a long frame catches up in a
    /// single call. Then every live particle is aged and integrated.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        if self.config.looping && self.config.emission_rate > 0.0 {
            self.emission_timer += dt;
            let interval = 1.0 / self.config.emission_rate;
            let mut spawned = 0;
            while self.emission_timer >= interval && !self.is_full() {
                spawned += self.emit(1);
                self.emission_timer -= interval;
            }
            if spawned > 0 {
                trace!("{}: emitted {} particles", self.name, spawned);
            }
        }

        let gravity = self.config.gravity;
        for particle in self.particles.iter_mut().filter(|p| p.active) {
            if !particle.advance(gravity, dt) {
                self.live -= 1;
            }
        }
    }

    /// Deactivate every particle
    pub fn clear_particles(&mut self) {
        for particle in &mut self.particles {
            particle.active = false;
        }
        self.live = 0;
        self.emission_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn emitter(config: EmitterConfig) -> ParticleEmitter {
        ParticleEmitter::new("test", Vec3::new(1.0, 2.0, 3.0), config, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_base_defaults() {
        let config = EmitterConfig::for_kind(ParticleKind::Magic);
        assert_eq!(config.max_particles, 100);
        assert_eq!(config.emission_rate, 10.0);
        assert_eq!(config.end_color, Color::rgba(255, 255, 255, 0));
        assert!(config.looping && config.world_space);
    }

    #[test]
    fn test_emit_stops_at_capacity() {
        let mut e = emitter(EmitterConfig::default().with_max_particles(10));
        assert_eq!(e.emit(4), 4);
        assert_eq!(e.emit(20), 6);
        assert_eq!(e.live_count(), 10);
        assert_eq!(e.emit(1), 0);
    }

    #[test]
    fn test_inactive_emitter_is_frozen() {
        let mut e = emitter(EmitterConfig::default());
        e.emit(5);
        e.set_active(false);
        assert_eq!(e.emit(5), 0);

        let before: Vec<Particle> = e.particles().copied().collect();
        e.update(0.5);
        let after: Vec<Particle> = e.particles().copied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_spawn_ranges() {
        let config = EmitterConfig::default()
            .with_max_particles(200)
            .with_size_range(0.2, 0.5)
            .with_velocity_range(Vec3::new(-1.0, -20.0, -1.0), Vec3::new(1.0, -25.0, 1.0));
        let mut e = emitter(config);
        e.emit(200);

        for p in e.particles() {
            assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
            assert!(p.velocity.x >= -1.0 && p.velocity.x <= 1.0);
            assert!(p.velocity.y <= -20.0 && p.velocity.y >= -25.0);
            assert!(p.start_size >= 0.2 && p.start_size <= 0.5);
            assert!((p.end_size - p.start_size * 0.1).abs() < 1e-7);
            assert!(p.max_lifetime >= 1.6 && p.max_lifetime <= 2.4);
            assert!(p.rotation >= 0.0 && p.rotation <= 360.0);
            assert!(p.rotation_speed >= -180.0 && p.rotation_speed <= 180.0);
            assert_eq!(p.acceleration, Vec3::ZERO);
            assert_eq!(p.color, Color::WHITE);
        }
    }

    #[test]
    fn test_local_space_billboards_follow_origin() {
        let mut e = emitter(EmitterConfig::default().with_world_space(false));
        e.emit(1);
        assert_eq!(e.particles().next().unwrap().position, Vec3::ZERO);

        e.set_position(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(e.billboards().next().unwrap().position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_rate_drains_multiple_per_frame() {
        let config = EmitterConfig::default()
            .with_max_particles(8)
            .with_emission_rate(100.0)
            .with_lifetime(10.0);
        let mut e = emitter(config);
        e.update(0.05);
        assert!(e.live_count() >= 4 && e.live_count() <= 5);

        e.update(1.0);
        assert_eq!(e.live_count(), 8);
    }

    #[test]
    fn test_burst_only_never_refills() {
        let config = EmitterConfig::default()
            .with_emission_rate(0.0)
            .with_lifetime(0.5);
        let mut e = emitter(config);
        e.emit(10);
        e.update(0.1);
        assert_eq!(e.live_count(), 10);

        // Longest jittered lifetime is 0.6
        e.update(1.0);
        assert_eq!(e.live_count(), 0);
        e.update(1.0);
        assert_eq!(e.live_count(), 0);
    }

    #[test]
    fn test_expired_slots_are_reused() {
        let config = EmitterConfig::default()
            .with_max_particles(3)
            .with_emission_rate(0.0)
            .with_lifetime(0.1);
        let mut e = emitter(config);
        e.emit(3);
        e.update(1.0);
        assert_eq!(e.live_count(), 0);
        assert_eq!(e.emit(3), 3);
        assert_eq!(e.particles().count(), 3);
    }

    #[test]
    fn test_clear_particles() {
        let mut e = emitter(EmitterConfig::default());
        e.emit(30);
        e.clear_particles();
        assert_eq!(e.live_count(), 0);
        assert_eq!(e.particles().count(), 0);
        assert_eq!(e.capacity(), 100);
    }
}
