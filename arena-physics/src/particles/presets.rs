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
//! Emitter presets
//!
//! Each preset is an [`EmitterConfig`] constructor plus a `spawn_*` method
//! on [`ParticleSystem`] that creates the emitter under the preset's name
//! and fires any initial burst.

use super::{EmitterConfig, EmitterId, ParticleKind, ParticleSystem};
use crate::color::Color;
use crate::error::Result;
use crate::math::Vec3;

impl EmitterConfig {
    /// Flames scaled by `intensity`
    pub fn fire(intensity: f32) -> Self {
        EmitterConfig::for_kind(ParticleKind::Fire)
            .with_max_particles((100.0 * intensity) as usize)
            .with_emission_rate(50.0 * intensity)
            .with_size_range(0.2 * intensity, 0.5 * intensity)
            .with_colors(Color::rgba(255, 100, 50, 255), Color::rgba(255, 50, 0, 0))
            .with_velocity_range(
                Vec3::new(-0.5, 0.5, -0.5),
                Vec3::new(0.5, 3.0 * intensity, 0.5),
            )
            .with_gravity(Vec3::new(0.0, 0.5, 0.0))
            .with_lifetime(1.5)
    }

    /// Rising smoke scaled by `intensity`
    pub fn smoke(intensity: f32) -> Self {
        EmitterConfig::for_kind(ParticleKind::Smoke)
            .with_max_particles((80.0 * intensity) as usize)
            .with_emission_rate(20.0 * intensity)
            .with_size_range(0.3 * intensity, intensity)
            .with_colors(Color::rgba(100, 100, 100, 200), Color::rgba(50, 50, 50, 0))
            .with_velocity_range(Vec3::new(-1.0, 0.2, -1.0), Vec3::new(1.0, 1.5, 1.0))
            .with_gravity(Vec3::new(0.0, 0.2, 0.0))
            .with_lifetime(4.0)
    }

    /// One-shot burst with room for `count * 2` sparks
    pub fn sparks(count: usize) -> Self {
        EmitterConfig::for_kind(ParticleKind::Spark)
            .with_max_particles(count * 2)
            .with_emission_rate(0.0)
            .with_size_range(0.05, 0.15)
            .with_colors(Color::YELLOW, Color::rgba(255, 150, 0, 0))
            .with_velocity_range(Vec3::new(-5.0, 1.0, -5.0), Vec3::new(5.0, 8.0, 5.0))
            .with_gravity(Vec3::new(0.0, -10.0, 0.0))
            .with_lifetime(1.0)
            .with_looping(false)
    }

    /// Rain falling over a box of the given size
    pub fn rain(area: Vec3) -> Self {
        let tint = Color::rgba(200, 200, 255, 200);
        EmitterConfig::for_kind(ParticleKind::Rain)
            .with_max_particles(500)
            .with_emission_rate(200.0)
            .with_size_range(0.05, 0.1)
            .with_colors(tint, tint)
            .with_velocity_range(
                Vec3::new(-area.x / 2.0, -20.0, -area.z / 2.0),
                Vec3::new(area.x / 2.0, -25.0, area.z / 2.0),
            )
            .with_gravity(Vec3::ZERO)
            .with_lifetime(area.y / 20.0)
            .with_world_space(false)
    }

    /// Snow drifting over a box of the given size
    pub fn snow(area: Vec3) -> Self {
        EmitterConfig::for_kind(ParticleKind::Snow)
            .with_max_particles(300)
            .with_emission_rate(50.0)
            .with_size_range(0.1, 0.3)
            .with_colors(Color::WHITE, Color::WHITE)
            .with_velocity_range(
                Vec3::new(-area.x / 2.0, -1.0, -area.z / 2.0),
                Vec3::new(area.x / 2.0, -3.0, area.z / 2.0),
            )
            .with_gravity(Vec3::new(0.0, -0.5, 0.0))
            .with_lifetime(area.y / 2.0)
            .with_world_space(false)
    }

    /// Dust kicked up within `radius`
    pub fn dust(radius: f32) -> Self {
        let tint = Color::rgba(200, 180, 150, 150);
        EmitterConfig::for_kind(ParticleKind::Dust)
            .with_max_particles(50)
            .with_emission_rate(10.0)
            .with_size_range(0.1, 0.4)
            .with_colors(tint, tint.with_alpha(0))
            .with_velocity_range(
                Vec3::new(-radius, 0.1, -radius),
                Vec3::new(radius, radius / 2.0, radius),
            )
            .with_gravity(Vec3::new(0.0, 0.5, 0.0))
            .with_lifetime(2.0)
    }
}

impl ParticleSystem {
    fn spawn_preset(
        &mut self,
        name: &str,
        position: Vec3,
        config: EmitterConfig,
        burst: usize,
    ) -> Result<EmitterId> {
        let id = self.create_with_config(name, position, config)?;
        if burst > 0 {
            self.emit(id, burst)?;
        }
        Ok(id)
    }

    /// Fire emitter, pre-filled to half its pool
    pub fn spawn_fire(&mut self, position: Vec3, intensity: f32) -> Result<EmitterId> {
        let config = EmitterConfig::fire(intensity);
        self.spawn_preset("Fire", position, config, config.max_particles / 2)
    }

    /// Smoke emitter, starts empty
    pub fn spawn_smoke(&mut self, position: Vec3, intensity: f32) -> Result<EmitterId> {
        self.spawn_preset("Smoke", position, EmitterConfig::smoke(intensity), 0)
    }

    /// Burst of `count` sparks that never re-emits
    pub fn spawn_sparks(&mut self, position: Vec3, count: usize) -> Result<EmitterId> {
        self.spawn_preset("Sparks", position, EmitterConfig::sparks(count), count)
    }

    /// Rain over `area` centered on `center`, pre-filled to its full pool
    pub fn spawn_rain(&mut self, center: Vec3, area: Vec3) -> Result<EmitterId> {
        let config = EmitterConfig::rain(area);
        self.spawn_preset("Rain", center, config, config.max_particles)
    }

    /// Snow over `area` centered on `center`
    pub fn spawn_snow(&mut self, center: Vec3, area: Vec3) -> Result<EmitterId> {
        self.spawn_preset("Snow", center, EmitterConfig::snow(area), 0)
    }

    /// Dust cloud of the given radius
    pub fn spawn_dust(&mut self, position: Vec3, radius: f32) -> Result<EmitterId> {
        self.spawn_preset("Dust", position, EmitterConfig::dust(radius), 0)
    }
}
