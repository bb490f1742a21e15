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
//! Per-frame motion integration
//!
//! Objects are point masses integrated with explicit Euler over the frame's
//! `dt`. Two paths exist:
//!
//! - **Bodies** ([`integrate_body`]): scene gravity every frame, a bounce off
//!   the ground plane at `y = size.y / 2`, ground friction on contact and a
//!   small horizontal air drag otherwise.
//! - **Player** ([`integrate_player`]): gravity only while airborne, no
//!   bounce, ground friction from the player settings.
//!
//! Both follow the same two-state machine, `Airborne ⇄ Grounded`, decided
//! after the position update. There is no hysteresis; a resting body is kept
//! still by snapping small bounce speeds to zero.
//!
//! Nothing here is random, so identical inputs and `dt` sequences give
//! bit-identical results. `dt` is trusted as given.

use crate::config::PlayerPhysicsSettings;
use crate::ecs::components::GameObject;
use crate::math::Vec3;

/// Horizontal velocity multiplier applied every airborne frame
pub const AIR_DRAG: f32 = 0.99;

/// Rebound speeds below this are snapped to zero
pub const BOUNCE_REST_THRESHOLD: f32 = 0.1;

/// Contact state against the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundState {
    /// Above the ground plane
    Airborne,
    /// Touching the ground plane, or standing on another object
    Grounded,
}

impl GroundState {
    fn from_flag(grounded: bool) -> Self {
        if grounded {
            GroundState::Grounded
        } else {
            GroundState::Airborne
        }
    }
}

/// Advance a simulated non-player object by `dt`
///
/// The object never ends this step below `size.y / 2`. The collision pass
/// runs afterwards and its separation can push a grounded body under the
/// floor; it stays there until the next call clamps it back up.
///
/// Returns `None` without touching the object if it has no physics body or
/// is static.
///
/// # Examples
///
/// ```
/// use arena_physics::ecs::components::{
///     Appearance, EntityFlags, EntityKind, GameObject, PhysicsBody, Shape, Transform,
/// };
/// use arena_physics::integration::{integrate_body, GroundState};
/// use arena_physics::math::Vec3;
///
/// let mut ball = GameObject {
///     name: "ball".to_string(),
///     kind: EntityKind::Sphere,
///     transform: Transform::at(Vec3::new(0.0, 1.0, 0.0)),
///     shape: Shape::Sphere { radius: 1.0 },
///     appearance: Appearance::default(),
///     flags: EntityFlags::default(),
///     body: Some(PhysicsBody::default()),
/// };
///
/// // Already resting on the ground plane
/// assert_eq!(integrate_body(&mut ball, -9.8, 1.0 / 60.0), Some(GroundState::Grounded));
/// assert_eq!(ball.position().y, 1.0);
/// ```
pub fn integrate_body(object: &mut GameObject, gravity: f32, dt: f32) -> Option<GroundState> {
    if object.is_static() {
        return None;
    }
    let ground_level = object.size().y / 2.0;
    let body = object.body.as_mut()?;
    let position = &mut object.transform.position;

    body.velocity.y += gravity * dt;
    *position += body.velocity * dt;

    if position.y <= ground_level {
        position.y = ground_level;
        body.velocity.y = -body.velocity.y * body.bounce_factor;
        body.grounded = true;

        if body.velocity.y.abs() < BOUNCE_REST_THRESHOLD {
            body.velocity.y = 0.0;
        }

        body.velocity.x *= body.friction;
        body.velocity.z *= body.friction;
    } else {
        body.grounded = false;
    }

    if !body.grounded {
        body.velocity.x *= AIR_DRAG;
        body.velocity.z *= AIR_DRAG;
    }

    Some(GroundState::from_flag(body.grounded))
}

/// Advance the player capsule by `dt`
///
/// Gravity only accumulates while airborne. Landing on the ground plane at
/// half the configured player height zeroes vertical velocity without a
/// bounce. Grounded state set by a collision (standing on an object) is kept
/// until something clears it, such as a jump.
///
/// Returns `None` if the player has no physics body.
pub fn integrate_player(
    player: &mut GameObject,
    settings: &PlayerPhysicsSettings,
    dt: f32,
) -> Option<GroundState> {
    let body = player.body.as_mut()?;
    let position = &mut player.transform.position;

    if !body.grounded {
        body.velocity.y += settings.gravity * dt;
    }

    *position += body.velocity * dt;

    let ground_level = settings.player_height / 2.0;
    if position.y <= ground_level {
        position.y = ground_level;
        body.velocity.y = 0.0;
        body.grounded = true;
    }

    if body.grounded {
        body.velocity.x *= settings.ground_friction;
        body.velocity.z *= settings.ground_friction;
    }

    Some(GroundState::from_flag(body.grounded))
}

/// Apply an instantaneous force, changing velocity by `force / mass`
///
/// Returns false if the object has no body or an effectively zero mass.
pub fn apply_impulse(object: &mut GameObject, force: Vec3) -> bool {
    let Some(body) = object.body.as_mut() else {
        return false;
    };
    let inverse_mass = body.inverse_mass();
    if inverse_mass == 0.0 {
        return false;
    }
    body.velocity += force * inverse_mass;
    true
}
