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
//! Individual particles

use crate::color::Color;
use crate::math::{lerp, Vec3};

/// Particle archetype
///
/// Presets exist for fire, smoke, sparks, rain, snow and dust. The remaining
/// kinds start from the base emitter defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleKind {
    /// Rising, fading flame
    Fire,
    /// Slow, expanding smoke
    Smoke,
    /// Short-lived ballistic sparks
    Spark,
    /// Fast falling streaks over an area
    Rain,
    /// Slow falling flakes over an area
    Snow,
    /// Blood splatter
    Blood,
    /// Drifting dust
    Dust,
    /// Magic effect
    Magic,
    /// User-configured
    #[default]
    Custom,
}

/// One pooled particle
///
/// Fields of an inactive particle are leftovers from its last life and carry
/// no meaning; the slot is free for the next emission.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    /// Position, absolute or relative to the emitter origin
    pub position: Vec3,
    /// Velocity in units per second
    pub velocity: Vec3,
    /// Acceleration, grows with the emitter gravity over the particle's life
    pub acceleration: Vec3,
    /// Current color
    pub color: Color,
    /// Color at birth
    pub start_color: Color,
    /// Color at death
    pub end_color: Color,
    /// Current billboard size
    pub size: f32,
    /// Size at birth
    pub start_size: f32,
    /// Size at death
    pub end_size: f32,
    /// Remaining lifetime in seconds
    pub lifetime: f32,
    /// Total lifetime in seconds
    pub max_lifetime: f32,
    /// Billboard rotation in degrees
    pub rotation: f32,
    /// Spin in degrees per second
    pub rotation_speed: f32,
    /// Archetype of the emitter that spawned it
    pub kind: ParticleKind,
    /// Whether the slot is in use
    pub active: bool,
}

impl Particle {
    /// Fraction of the lifetime already spent, from 0 at birth to 1 at death
    pub fn life_ratio(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return 1.0;
        }
        1.0 - self.lifetime / self.max_lifetime
    }

    /// Age the particle by `dt` and integrate its motion
    ///
    /// Returns false, leaving the particle inactive, once its lifetime runs
    /// out. Gravity feeds the acceleration after the position update, so it
    /// reaches the position one step late.
    pub fn advance(&mut self, gravity: Vec3, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.active = false;
            return false;
        }

        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.acceleration += gravity * dt;
        self.rotation += self.rotation_speed * dt;

        self.refresh_appearance();
        true
    }

    /// Recompute size and color from the current life ratio
    pub fn refresh_appearance(&mut self) {
        let ratio = self.life_ratio();
        self.size = lerp(self.start_size, self.end_size, ratio);
        self.color = self.start_color.lerp(self.end_color, ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(lifetime: f32) -> Particle {
        Particle {
            start_color: Color::rgba(255, 100, 50, 255),
            end_color: Color::rgba(255, 50, 0, 0),
            start_size: 0.4,
            end_size: 0.04,
            size: 0.4,
            lifetime,
            max_lifetime: lifetime,
            active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_half_life_interpolation() {
        let mut p = live(2.0);
        assert!(p.advance(Vec3::ZERO, 1.0));
        assert_eq!(p.life_ratio(), 0.5);
        assert!((p.size - (0.4 + 0.04) / 2.0).abs() < 1e-6);
        assert_eq!(p.color, Color::rgba(255, 75, 25, 127));
    }

    #[test]
    fn test_expiry_deactivates() {
        let mut p = live(0.5);
        assert!(!p.advance(Vec3::ZERO, 0.5));
        assert!(!p.active);
    }

    #[test]
    fn test_gravity_lags_one_step() {
        let mut p = live(10.0);
        p.advance(Vec3::new(0.0, -2.0, 0.0), 0.5);
        // First step only seeds the acceleration
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.acceleration, Vec3::new(0.0, -1.0, 0.0));

        p.advance(Vec3::new(0.0, -2.0, 0.0), 0.5);
        assert_eq!(p.velocity, Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(p.position, Vec3::new(0.0, -0.25, 0.0));
    }

    #[test]
    fn test_life_ratio_is_monotonic() {
        let mut p = live(1.0);
        let mut last = p.life_ratio();
        while p.advance(Vec3::ZERO, 0.07) {
            let ratio = p.life_ratio();
            assert!(ratio >= last);
            assert!(ratio <= 1.0);
            last = ratio;
        }
    }

    #[test]
    fn test_zero_lifetime_ratio() {
        let p = Particle::default();
        assert_eq!(p.life_ratio(), 1.0);
    }
}
