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
//! Player movement input
//!
//! Turns a per-frame [`MoveIntent`] from the input layer into player
//! velocity. Run it before [`Engine::tick`](crate::engine::Engine::tick) so
//! the player step integrates the new velocity.

use crate::ecs::World;
use crate::math::{lerp, Vec3};
use log::trace;

/// What the player wants to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveIntent {
    /// Desired horizontal direction; `y` is ignored and length is normalized
    pub direction: Vec3,
    /// Use run speed instead of walk speed
    pub run: bool,
    /// Jump if grounded
    pub jump: bool,
}

impl MoveIntent {
    /// Walk in `direction`
    pub fn new(direction: Vec3) -> Self {
        MoveIntent {
            direction,
            ..Default::default()
        }
    }

    /// Toggle running
    pub fn with_run(mut self, run: bool) -> Self {
        self.run = run;
        self
    }

    /// Toggle jumping
    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }
}

/// Apply a movement intent to the player
///
/// On the ground the horizontal velocity is replaced by the target velocity.
/// In the air it moves toward the target by the `air_control` fraction. A
/// jump sets vertical velocity to the jump force and leaves the ground.
///
/// Returns false if there is no active player with a physics body.
///
/// # Examples
///
/// ```
/// use arena_physics::controller::{apply_move_intent, MoveIntent};
/// use arena_physics::ecs::World;
/// use arena_physics::math::Vec3;
///
/// let mut world = World::new();
/// let player = world.create_player("Player", Vec3::new(0.0, 0.9, 0.0), true, true).unwrap();
/// world.get_mut(player).unwrap().body.as_mut().unwrap().grounded = true;
///
/// let intent = MoveIntent::new(Vec3::new(0.0, 0.0, -1.0)).with_run(true);
/// assert!(apply_move_intent(&mut world, intent));
/// assert_eq!(world.get(player).unwrap().velocity(), Vec3::new(0.0, 0.0, -10.0));
/// ```
pub fn apply_move_intent(world: &mut World, intent: MoveIntent) -> bool {
    let settings = *world.settings();
    let Some(player) = world.player_object_mut() else {
        return false;
    };
    if !player.is_active() {
        return false;
    }
    let Some(body) = player.body.as_mut() else {
        return false;
    };

    let speed = if intent.run {
        settings.run_speed
    } else {
        settings.walk_speed
    };
    let target = Vec3::new(intent.direction.x, 0.0, intent.direction.z).normalize() * speed;

    if body.grounded {
        body.velocity.x = target.x;
        body.velocity.z = target.z;
    } else {
        body.velocity.x = lerp(body.velocity.x, target.x, settings.air_control);
        body.velocity.z = lerp(body.velocity.z, target.z, settings.air_control);
    }

    if intent.jump && body.grounded {
        body.velocity.y = settings.jump_force;
        body.grounded = false;
        trace!("Player jumped");
    }
    true
}
