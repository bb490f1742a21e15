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
//! Headless arena run
//!
//! Builds a small arena, walks the player across it with scripted input and
//! prints the state once per simulated second. Set `RUST_LOG=debug` to see
//! the engine's own diagnostics.

use arena_physics::color::Color;
use arena_physics::controller::{apply_move_intent, MoveIntent};
use arena_physics::ecs::components::EntityKind;
use arena_physics::ecs::scheduler::stages;
use arena_physics::ecs::{System, World};
use arena_physics::engine::Engine;
use arena_physics::math::Vec3;
use arena_physics::time::{clamp_delta, MAX_FRAME_DELTA};

/// Counts objects that are resting on the ground
struct RestingCounter {
    resting: usize,
}

impl System for RestingCounter {
    fn run(&mut self, world: &mut World, _dt: f32) {
        let resting = world
            .iter()
            .filter(|(_, o)| o.has_physics() && !o.is_player() && o.is_grounded())
            .count();
        if resting != self.resting {
            log::info!("Resting bodies: {} -> {}", self.resting, resting);
            self.resting = resting;
        }
    }

    fn name(&self) -> &str {
        "RestingCounter"
    }
}

fn main() -> arena_physics::Result<()> {
    env_logger::init();

    println!("Arena Physics - Arena Example");
    println!("=============================\n");

    let mut engine = Engine::new();
    engine.add_system(RestingCounter { resting: 0 }, stages::POST_PROCESS);

    let world = engine.world_mut();
    world.create_plane("Ground", Vec3::ZERO, 50.0, 50.0, Color::GRAY)?;
    for (i, x) in [-8.0, 8.0].iter().enumerate() {
        let wall = world.create_cube(
            &format!("Wall_{i}"),
            Vec3::new(*x, 1.5, 0.0),
            false,
            true,
            Color::GRAY,
            None,
        )?;
        world.set_scale(wall, Vec3::new(1.0, 3.0, 16.0))?;
        world.set_static(wall, true)?;
    }
    for i in 0..5 {
        let f = i as f32;
        let position = Vec3::new(-4.0 + 2.0 * f, 3.0 + f, -3.0);
        world.create(EntityKind::Cube, None, position, true, true)?;
    }
    world.create_sphere("Ball", Vec3::new(0.0, 12.0, 2.0), true, true, Color::RED, 0.5)?;
    let player = world.create_player("Player", Vec3::new(0.0, 3.0, 5.0), true, true)?;
    let pickup_at = Vec3::new(4.0, 0.5, 5.0);
    let pickup = world.create_cube("Pickup", pickup_at, false, true, Color::GREEN, None)?;
    world.set_trigger(pickup, true)?;

    println!("Created {} objects\n", engine.world().len());

    // Simulated frame times, with a hitch every few seconds
    let frame_times = (0..600).map(|i| if i % 200 == 199 { 0.5 } else { 1.0 / 60.0 });

    for (frame, raw_dt) in frame_times.enumerate() {
        let dt = clamp_delta(raw_dt, MAX_FRAME_DELTA);
        let second = frame / 60;
        let intent = match second {
            0 => MoveIntent::default(),
            1..=3 => MoveIntent::new(Vec3::new(1.0, 0.0, 0.0)),
            4 => MoveIntent::new(Vec3::new(-1.0, 0.0, -1.0))
                .with_run(true)
                .with_jump(frame % 60 == 0),
            _ => MoveIntent::new(Vec3::new(0.0, 0.0, 1.0)),
        };
        apply_move_intent(engine.world_mut(), intent);
        engine.tick(dt);

        if frame % 60 == 59 {
            let world = engine.world();
            let p = world.player_position();
            let ball = world.find("Ball").and_then(|e| world.get(e)).map(|o| o.position());
            println!(
                "t={:>2}s  player ({:>6.2}, {:>5.2}, {:>6.2}) grounded={:<5}  ball y={:.2}",
                second + 1,
                p.x,
                p.y,
                p.z,
                world.is_player_grounded(),
                ball.map_or(0.0, |b| b.y),
            );
        }
    }

    let world = engine.world();
    println!("\nPlayer handle still valid: {}", world.is_alive(player));
    println!("Frames simulated: {}", engine.frame());
    println!("Object pool peak: {}", world.pool_stats().peak_len);

    Ok(())
}
