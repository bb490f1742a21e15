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
//! Collision detection
//!
//! Narrow-phase tests used by the per-frame collision pass:
//!
//! - **AABB vs AABB**: strict overlap on all three axes
//! - **Sphere vs AABB**: closest-point clamping, used for the player probe
//! - **Sphere vs sphere**: center distance against the radius sum
//!
//! The player is tested with a probe sphere placed at the top of its capsule
//! (see [`player_probe`]) in addition to its bounding box. There is no broad
//! phase; the pass in [`crate::ecs::systems::CollisionSystem`] checks every
//! pair, which is fine at registry capacity.

mod resolve;

pub use resolve::{resolve_collision, resolve_player_collision, separate_bodies, Resolution};

use crate::ecs::components::GameObject;
use crate::math::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Create a box from its center and half extents
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Check for strict overlap on all three axes
    ///
    /// Boxes that merely touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
            && self.max.z > other.min.z
            && self.min.z < other.max.z
    }

    /// Point inside or on the box closest to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }
}

/// Sphere used for the player probe and bounding tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center
    pub center: Vec3,
    /// Radius
    pub radius: f32,
}

/// Check if a sphere intersects a box
///
/// Uses strict comparison: a sphere exactly touching a face does not collide.
pub fn sphere_aabb(center: Vec3, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    (center - closest).length_squared() < radius * radius
}

/// Check if two spheres intersect, touching counts as a hit
pub fn sphere_sphere(c1: Vec3, r1: f32, c2: Vec3, r2: f32) -> bool {
    let radius_sum = r1 + r2;
    (c2 - c1).length_squared() <= radius_sum * radius_sum
}

/// Bounding-box overlap test between two collidable objects
///
/// Returns false unless both objects have collision enabled. The test is
/// symmetric in its arguments.
pub fn aabb_overlap(a: &GameObject, b: &GameObject) -> bool {
    if !a.has_collision() || !b.has_collision() {
        return false;
    }
    a.aabb().overlaps(&b.aabb())
}

/// Probe sphere of the player capsule
///
/// Sits at the top of the capsule: its center is raised from the object
/// center by half the height minus the radius.
pub fn player_probe(player: &GameObject) -> BoundingSphere {
    let size = player.size();
    let radius = size.x / 2.0;
    BoundingSphere {
        center: player.position() + Vec3::new(0.0, size.y / 2.0 - radius, 0.0),
        radius,
    }
}

/// Check the player probe sphere against another object
///
/// Spheres are tested sphere-to-sphere, everything else by its bounding box.
pub fn player_overlaps(player: &GameObject, other: &GameObject) -> bool {
    if !other.has_collision() {
        return false;
    }
    let probe = player_probe(player);
    if other.shape.is_sphere() {
        sphere_sphere(probe.center, probe.radius, other.position(), other.size().x / 2.0)
    } else {
        sphere_aabb(probe.center, probe.radius, &other.aabb())
    }
}

/// Coarse collision test between two objects
///
/// If either object is a sphere both are treated as bounding spheres,
/// otherwise their bounding boxes are compared.
pub fn check_collision(a: &GameObject, b: &GameObject) -> bool {
    if !a.has_collision() || !b.has_collision() {
        return false;
    }
    if a.shape.is_sphere() || b.shape.is_sphere() {
        sphere_sphere(
            a.position(),
            a.shape.bounding_radius(),
            b.position(),
            b.shape.bounding_radius(),
        )
    } else {
        a.aabb().overlaps(&b.aabb())
    }
}

/// The test used by the collision pass for an unordered pair
///
/// A pair collides if their boxes overlap, or if one of them is the player
/// and its probe sphere touches the other.
pub fn pair_collides(a: &GameObject, b: &GameObject) -> bool {
    aabb_overlap(a, b)
        || (a.is_player() && player_overlaps(a, b))
        || (b.is_player() && player_overlaps(b, a))
}
