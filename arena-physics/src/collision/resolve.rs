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
//! Collision resolution
//!
//! Resolution is a positional correction, not an impulse solver:
//!
//! - Triggers are detected but never pushed.
//! - The player is pushed out of whatever it touches by half the
//!   penetration along the contact normal, and loses the part of its
//!   horizontal velocity heading into the surface.
//! - Any other pair is separated as two spheres of radius `size.x / 4`,
//!   each movable party taking half of the overlap.
//!
//! Every normal is derived from a distance that is checked against zero
//! first, so coincident centers resolve to nothing instead of NaN.

use super::{player_probe, Aabb};
use crate::ecs::components::GameObject;
use crate::math::Vec3;

/// Normal y component above which a contact counts as standing on top
pub const GROUND_NORMAL_THRESHOLD: f32 = 0.7;

/// Fraction of the into-surface horizontal velocity removed on contact
pub const SLIDE_DAMPING: f32 = 0.8;

/// What the resolver did with a colliding pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// One of the pair is a trigger, nothing moved
    Trigger,
    /// The player was pushed out
    PlayerPushed,
    /// The pair was pushed apart
    Separated,
    /// Nothing to do: no penetration or a degenerate normal
    Skipped,
}

/// Resolve a colliding pair
///
/// Dispatches to the player resolver when either object is the player.
pub fn resolve_collision(a: &mut GameObject, b: &mut GameObject) -> Resolution {
    if a.is_trigger() || b.is_trigger() {
        return Resolution::Trigger;
    }

    let pushed = if a.is_player() {
        resolve_player_collision(a, b)
    } else if b.is_player() {
        resolve_player_collision(b, a)
    } else {
        return if separate_bodies(a, b) {
            Resolution::Separated
        } else {
            Resolution::Skipped
        };
    };

    if pushed {
        Resolution::PlayerPushed
    } else {
        Resolution::Skipped
    }
}

/// Push the player's probe sphere out of `other`
///
/// Returns true if the player was moved. A near-vertical contact normal
/// grounds the player and zeroes its vertical velocity.
pub fn resolve_player_collision(player: &mut GameObject, other: &GameObject) -> bool {
    let probe = player_probe(player);

    let closest = if other.shape.is_sphere() {
        let delta = other.position() - probe.center;
        let distance = delta.length();
        if distance == 0.0 {
            return false;
        }
        let normal = delta * (1.0 / distance);
        other.position() - normal * other.shape.bounding_radius()
    } else {
        Aabb::from_center(other.position(), other.shape.half_extents()).closest_point(probe.center)
    };

    let offset = probe.center - closest;
    let distance = offset.length();
    if !(distance < probe.radius && distance > 0.0) {
        return false;
    }

    let normal = Vec3::new(offset.x / distance, offset.y / distance, offset.z / distance);
    let overlap = probe.radius - distance;
    player.transform.position += normal * (overlap * 0.5);

    if let Some(body) = player.body.as_mut() {
        if normal.y > GROUND_NORMAL_THRESHOLD {
            body.grounded = true;
            body.velocity.y = 0.0;
        }

        let into_surface = body.velocity.x * normal.x + body.velocity.z * normal.z;
        if into_surface < 0.0 {
            body.velocity.x -= normal.x * into_surface * SLIDE_DAMPING;
            body.velocity.z -= normal.z * into_surface * SLIDE_DAMPING;
        }
    }
    true
}

/// Push two non-player objects apart
///
/// Both are treated as spheres whose radii sum to `(a.size.x + b.size.x) / 4`.
/// Static objects never move. Returns true if there was an overlap to fix.
pub fn separate_bodies(a: &mut GameObject, b: &mut GameObject) -> bool {
    let delta = b.position() - a.position();
    let distance = delta.length();
    if distance == 0.0 {
        return false;
    }

    let min_distance = (a.size().x + b.size().x) / 4.0;
    let overlap = min_distance - distance;
    if overlap <= 0.0 {
        return false;
    }

    let normal = Vec3::new(delta.x / distance, delta.y / distance, delta.z / distance);
    let push = normal * (overlap * 0.5);
    if !a.is_static() {
        a.transform.position -= push;
    }
    if !b.is_static() {
        b.transform.position += push;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{
        Appearance, EntityFlags, EntityKind, PhysicsBody, Shape, Transform,
    };

    fn object(kind: EntityKind, position: Vec3, shape: Shape) -> GameObject {
        GameObject {
            name: format!("{kind:?}"),
            kind,
            transform: Transform::at(position),
            shape,
            appearance: Appearance::default(),
            flags: EntityFlags::default() | EntityFlags::COLLIDABLE,
            body: Some(PhysicsBody::default()),
        }
    }

    fn player_at(position: Vec3) -> GameObject {
        object(EntityKind::Player, position, Shape::Capsule { radius: 0.3, height: 1.8 })
    }

    #[test]
    fn test_separate_cubes_half_overlap_each() {
        let mut a = object(EntityKind::Cube, Vec3::ZERO, Shape::Box { size: Vec3::ONE });
        let mut b = object(
            EntityKind::Cube,
            Vec3::new(0.3, 0.0, 0.0),
            Shape::Box { size: Vec3::ONE },
        );

        assert!(separate_bodies(&mut a, &mut b));
        // min distance 0.5, overlap 0.2, each moves 0.1
        assert!((a.position().x + 0.1).abs() < 1e-6);
        assert!((b.position().x - 0.4).abs() < 1e-6);
        assert_eq!(a.position().y, 0.0);
    }

    #[test]
    fn test_static_party_never_moves() {
        let mut ground = object(EntityKind::Cube, Vec3::ZERO, Shape::Box { size: Vec3::ONE });
        ground.flags.insert(EntityFlags::STATIC);
        let mut crate_box = object(
            EntityKind::Cube,
            Vec3::new(0.0, 0.3, 0.0),
            Shape::Box { size: Vec3::ONE },
        );

        assert!(separate_bodies(&mut ground, &mut crate_box));
        assert_eq!(ground.position(), Vec3::ZERO);
        assert!((crate_box.position().y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_centers_are_skipped() {
        let mut a = object(EntityKind::Cube, Vec3::ONE, Shape::Box { size: Vec3::ONE });
        let mut b = a.clone();
        assert!(!separate_bodies(&mut a, &mut b));
        assert_eq!(resolve_collision(&mut a, &mut b), Resolution::Skipped);
        assert!(a.position().is_finite());
    }

    #[test]
    fn test_trigger_is_not_resolved() {
        let mut a = object(EntityKind::Cube, Vec3::ZERO, Shape::Box { size: Vec3::ONE });
        let mut b = object(
            EntityKind::Cube,
            Vec3::new(0.2, 0.0, 0.0),
            Shape::Box { size: Vec3::ONE },
        );
        b.flags.insert(EntityFlags::TRIGGER);

        assert_eq!(resolve_collision(&mut a, &mut b), Resolution::Trigger);
        assert_eq!(a.position(), Vec3::ZERO);
        assert_eq!(b.position(), Vec3::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn test_player_lands_on_box() {
        let mut player = player_at(Vec3::new(0.0, 0.6, 0.0));
        player.body.as_mut().unwrap().velocity = Vec3::new(0.0, -3.0, 0.0);
        let platform = object(
            EntityKind::Cube,
            Vec3::new(0.0, 0.5, 0.0),
            Shape::Box { size: Vec3::new(4.0, 1.0, 4.0) },
        );

        // Probe center y = 0.6 + 0.9 - 0.3 = 1.2, 0.2 above the top face at 1.0
        assert!(resolve_player_collision(&mut player, &platform));
        let body = player.body.unwrap();
        assert!(body.grounded);
        assert_eq!(body.velocity.y, 0.0);
        // Pushed up by half of the 0.1 overlap
        assert!((player.position().y - 0.65).abs() < 1e-5);
    }

    #[test]
    fn test_player_slides_along_wall() {
        // Wall face at z = 0.5, probe center at z = 0.3
        let mut player = player_at(Vec3::new(0.0, 0.9, 0.3));
        player.body.as_mut().unwrap().velocity = Vec3::new(2.0, 0.0, 5.0);
        let wall = object(
            EntityKind::Cube,
            Vec3::new(0.0, 1.5, 1.0),
            Shape::Box { size: Vec3::new(4.0, 3.0, 1.0) },
        );

        assert!(resolve_player_collision(&mut player, &wall));
        let body = player.body.unwrap();
        // Normal is -z; into-surface speed is -5, 80% of it is removed
        assert!((body.velocity.z - 1.0).abs() < 1e-5);
        assert_eq!(body.velocity.x, 2.0);
        assert!(!body.grounded);
        assert!((player.position().z - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_player_vs_sphere() {
        let mut player = player_at(Vec3::new(0.0, 0.9, 0.0));
        let ball = object(
            EntityKind::Sphere,
            Vec3::new(1.2, 1.5, 0.0),
            Shape::Sphere { radius: 1.0 },
        );

        assert_eq!(resolve_collision(&mut player, &mut ball.clone()), Resolution::PlayerPushed);
        // Surface point at x = 0.2, overlap 0.1, pushed 0.05 along -x
        assert!((player.position().x + 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_player_resolution_is_dispatched_either_way() {
        let mut wall = object(
            EntityKind::Cube,
            Vec3::new(0.0, 1.5, 1.0),
            Shape::Box {
                size: Vec3::new(4.0, 3.0, 1.0),
            },
        );
        let mut player = player_at(Vec3::new(0.0, 0.9, 0.3));
        assert_eq!(resolve_collision(&mut wall, &mut player), Resolution::PlayerPushed);
        assert_eq!(wall.position(), Vec3::new(0.0, 1.5, 1.0));
    }
}
