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
//! Particle effects showcase
//!
//! Spawns every preset, steps the particle system for a few seconds and
//! reports live particle counts and a sample billboard per emitter.

use arena_physics::config::ParticleConfig;
use arena_physics::math::Vec3;
use arena_physics::particles::{EmitterConfig, ParticleKind, ParticleSystem};

fn main() -> arena_physics::Result<()> {
    env_logger::init();

    println!("Arena Physics - Particle Effects Example");
    println!("========================================\n");

    let mut particles = ParticleSystem::with_config(ParticleConfig::default().with_seed(42))?;

    particles.spawn_fire(Vec3::new(-6.0, 0.0, 0.0), 1.0)?;
    particles.spawn_smoke(Vec3::new(-6.0, 1.0, 0.0), 1.0)?;
    particles.spawn_sparks(Vec3::new(0.0, 1.0, 0.0), 40)?;
    particles.spawn_rain(Vec3::new(0.0, 20.0, 0.0), Vec3::new(40.0, 20.0, 40.0))?;
    particles.spawn_snow(Vec3::new(10.0, 10.0, 0.0), Vec3::new(10.0, 10.0, 10.0))?;
    particles.spawn_dust(Vec3::new(6.0, 0.0, 0.0), 1.5)?;

    let magic = EmitterConfig::for_kind(ParticleKind::Magic)
        .with_max_particles(64)
        .with_emission_rate(32.0)
        .with_gravity(Vec3::new(0.0, 1.0, 0.0));
    let orb = particles.create_with_config("Orb", Vec3::new(0.0, 2.0, -4.0), magic)?;

    println!("Created {} emitters\n", particles.len());

    for step in 1..=4 {
        for _ in 0..60 {
            particles.update(1.0 / 60.0);
        }
        // Circle the orb around the origin
        let angle = step as f32 * std::f32::consts::FRAC_PI_2;
        particles.set_position(orb, Vec3::new(4.0 * angle.cos(), 2.0, 4.0 * angle.sin()))?;

        println!("After {step}s:");
        for (_, emitter) in particles.iter() {
            let sample = emitter.billboards().next();
            println!(
                "  {:<6} {:>3}/{:<3} live  sample: {}",
                emitter.name(),
                emitter.live_count(),
                emitter.capacity(),
                sample.map_or("-".to_string(), |b| format!(
                    "({:.1}, {:.1}, {:.1}) size {:.2} alpha {}",
                    b.position.x, b.position.y, b.position.z, b.size, b.color.a
                )),
            );
        }
        println!("  total  {} particles\n", particles.live_particles());
    }

    if let Some(sparks) = particles.find("Sparks") {
        particles.destroy(sparks);
    }
    particles.clear();
    println!("Cleared, {} emitters left", particles.len());

    Ok(())
}
