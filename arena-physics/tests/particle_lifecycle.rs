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
//! Particle pool and lifetime behavior

use arena_physics::color::Color;
use arena_physics::config::ParticleConfig;
use arena_physics::math::{lerp, Vec3};
use arena_physics::particles::{EmitterConfig, ParticleKind, ParticleSystem};

fn seeded() -> ParticleSystem {
    ParticleSystem::with_config(ParticleConfig::default().with_seed(2025)).unwrap()
}

#[test]
fn test_fire_catches_up_within_capacity() {
    let mut particles = seeded();
    let fire = particles.spawn_fire(Vec3::ZERO, 1.0).unwrap();
    assert_eq!(particles.get(fire).unwrap().live_count(), 50);

    // Rate 50/s: a tenth of a second is worth about five particles
    particles.update(0.1);
    let live = particles.get(fire).unwrap().live_count();
    assert!((54..=55).contains(&live), "live = {live}");

    // A full second would be fifty more, the pool stops it at 100
    particles.update(1.0);
    let emitter = particles.get(fire).unwrap();
    assert_eq!(emitter.live_count(), emitter.capacity());
    assert_eq!(emitter.capacity(), 100);
}

#[test]
fn test_emit_activates_only_free_slots() {
    let mut particles = seeded();
    let id = particles
        .create_with_config(
            "burst",
            Vec3::ZERO,
            EmitterConfig::default().with_max_particles(25).with_emission_rate(0.0),
        )
        .unwrap();

    assert_eq!(particles.emit(id, 20).unwrap(), 20);
    // Five free slots left
    assert_eq!(particles.emit(id, 20).unwrap(), 5);
    assert_eq!(particles.get(id).unwrap().particles().count(), 25);
}

#[test]
fn test_live_count_never_exceeds_capacity() {
    let mut particles = seeded();
    let ids = [
        particles.spawn_fire(Vec3::ZERO, 0.5).unwrap(),
        particles.spawn_smoke(Vec3::ONE, 1.5).unwrap(),
        particles.spawn_snow(Vec3::ZERO, Vec3::new(20.0, 4.0, 20.0)).unwrap(),
        particles.spawn_dust(Vec3::ZERO, 1.0).unwrap(),
    ];

    for frame in 0..200 {
        let dt = if frame % 10 == 0 { 0.1 } else { 1.0 / 60.0 };
        particles.update(dt);
        for id in ids {
            let emitter = particles.get(id).unwrap();
            assert!(emitter.live_count() <= emitter.capacity());
            assert_eq!(emitter.live_count(), emitter.particles().count());
        }
    }
}

#[test]
fn test_single_particle_interpolates_over_life() {
    let mut particles = seeded();
    let config = EmitterConfig::for_kind(ParticleKind::Magic)
        .with_max_particles(1)
        .with_emission_rate(0.0)
        .with_colors(Color::rgba(200, 100, 0, 255), Color::rgba(0, 100, 200, 0));
    let id = particles.create_with_config("magic", Vec3::ZERO, config).unwrap();
    particles.emit(id, 1).unwrap();

    let mut last_ratio = 0.0;
    loop {
        particles.update(0.05);
        let emitter = particles.get(id).unwrap();
        let Some(p) = emitter.particles().next() else {
            break;
        };

        let ratio = p.life_ratio();
        assert!(ratio >= last_ratio && ratio <= 1.0);
        last_ratio = ratio;

        assert!((p.size - lerp(p.start_size, p.end_size, ratio)).abs() < 1e-6);
        assert_eq!(p.color, p.start_color.lerp(p.end_color, ratio));
        assert!(p.size <= p.start_size && p.size >= p.end_size);
    }
    assert_eq!(particles.get(id).unwrap().live_count(), 0);
    assert!(last_ratio > 0.9);
}

#[test]
fn test_destroyed_emitter_stops_rendering() {
    let mut particles = seeded();
    let sparks = particles.spawn_sparks(Vec3::new(0.0, 2.0, 0.0), 10).unwrap();
    particles.spawn_dust(Vec3::ZERO, 1.0).unwrap();
    assert_eq!(particles.billboards().count(), 10);

    particles.destroy(sparks);
    assert_eq!(particles.billboards().count(), 0);
    assert_eq!(particles.len(), 1);
}

#[test]
fn test_seeded_runs_replay() {
    let run = || {
        let mut particles = seeded();
        particles.spawn_fire(Vec3::ZERO, 1.0).unwrap();
        particles
            .spawn_rain(Vec3::new(0.0, 10.0, 0.0), Vec3::new(10.0, 10.0, 10.0))
            .unwrap();
        for _ in 0..30 {
            particles.update(1.0 / 30.0);
        }
        particles.billboards().collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
