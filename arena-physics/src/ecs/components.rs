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
//! Object components
//!
//! A [`GameObject`] is assembled from small plain-data components: a
//! transform, a tagged [`Shape`] carrying only the geometry its kind needs,
//! render attributes, behavior flags and an optional [`PhysicsBody`].

use crate::collision::Aabb;
use crate::color::Color;
use crate::config::PlayerPhysicsSettings;
use crate::math::Vec3;
use bitflags::bitflags;

/// Thickness given to ground planes
pub const PLANE_THICKNESS: f32 = 0.1;

/// The kind of object, which selects its defaults and collision treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Axis-aligned box
    Cube,
    /// Ball
    Sphere,
    /// The player capsule
    Player,
    /// Pyramid, collides as its bounding box
    Pyramid,
    /// Upright cylinder, collides as its bounding box
    Cylinder,
    /// Thin static slab
    Plane,
    /// Upright cone, collides as its bounding box
    Cone,
    /// Anything else, collides as its bounding box
    Custom,
}

impl EntityKind {
    /// Default color for objects of this kind
    pub fn default_color(self) -> Color {
        match self {
            EntityKind::Cube => Color::BLUE,
            EntityKind::Sphere => Color::RED,
            EntityKind::Player => Color::GREEN,
            EntityKind::Pyramid => Color::YELLOW,
            EntityKind::Cylinder => Color::ORANGE,
            EntityKind::Plane => Color::GRAY,
            EntityKind::Cone => Color::MAGENTA,
            EntityKind::Custom => Color::WHITE,
        }
    }

    /// Default geometry for objects of this kind
    pub fn default_shape(self, settings: &PlayerPhysicsSettings) -> Shape {
        match self {
            EntityKind::Sphere => Shape::Sphere { radius: 1.0 },
            EntityKind::Player => Shape::Capsule {
                radius: settings.player_radius,
                height: settings.player_height,
            },
            EntityKind::Cylinder => Shape::Cylinder { radius: 0.5, height: 1.0 },
            EntityKind::Cone => Shape::Cone { radius: 0.5, height: 1.0 },
            EntityKind::Plane => Shape::Plane {
                width: 1.0,
                depth: 1.0,
                thickness: PLANE_THICKNESS,
            },
            EntityKind::Cube | EntityKind::Pyramid | EntityKind::Custom => {
                Shape::Box { size: Vec3::ONE }
            }
        }
    }
}

/// Collision and render geometry, one variant per family of kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Box with full edge lengths
    Box {
        /// Edge lengths along x, y and z
        size: Vec3,
    },
    /// Ball
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Upright capsule
    Capsule {
        /// Radius of the hemispherical caps
        radius: f32,
        /// Total height including caps
        height: f32,
    },
    /// Upright cylinder
    Cylinder {
        /// Radius
        radius: f32,
        /// Height
        height: f32,
    },
    /// Upright cone
    Cone {
        /// Base radius
        radius: f32,
        /// Height
        height: f32,
    },
    /// Horizontal slab
    Plane {
        /// Extent along x
        width: f32,
        /// Extent along z
        depth: f32,
        /// Extent along y
        thickness: f32,
    },
}

impl Shape {
    /// Full extents of the axis-aligned bounding box
    pub fn extents(&self) -> Vec3 {
        match *self {
            Shape::Box { size } => size,
            Shape::Sphere { radius } => Vec3::splat(radius * 2.0),
            Shape::Capsule { radius, height }
            | Shape::Cylinder { radius, height }
            | Shape::Cone { radius, height } => Vec3::new(radius * 2.0, height, radius * 2.0),
            Shape::Plane { width, depth, thickness } => Vec3::new(width, thickness, depth),
        }
    }

    /// Half of [`Shape::extents`]
    pub fn half_extents(&self) -> Vec3 {
        self.extents() * 0.5
    }

    /// Same variant rebuilt from new bounding-box extents
    ///
    /// Round shapes take their radius from the x extent. A sphere also drops
    /// the y and z extents, and capsules, cylinders and cones drop z.
    pub fn resized(&self, size: Vec3) -> Shape {
        match self {
            Shape::Box { .. } => Shape::Box { size },
            Shape::Sphere { .. } => Shape::Sphere { radius: size.x / 2.0 },
            Shape::Capsule { .. } => Shape::Capsule { radius: size.x / 2.0, height: size.y },
            Shape::Cylinder { .. } => Shape::Cylinder { radius: size.x / 2.0, height: size.y },
            Shape::Cone { .. } => Shape::Cone { radius: size.x / 2.0, height: size.y },
            Shape::Plane { .. } => Shape::Plane {
                width: size.x,
                depth: size.z,
                thickness: size.y,
            },
        }
    }

    /// Radius of a sphere enclosing the shape
    ///
    /// Exact for spheres; half the largest extent otherwise.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
            _ => {
                let e = self.extents();
                e.x.max(e.y.max(e.z)) / 2.0
            }
        }
    }

    /// Check if the shape should be treated as a true sphere in narrow phase
    pub fn is_sphere(&self) -> bool {
        matches!(self, Shape::Sphere { .. })
    }
}

/// Position and orientation
///
/// Scale lives in the object's [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// Center of the object
    pub position: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
}

impl Transform {
    /// Create a transform at `position` with no rotation
    pub fn at(position: Vec3) -> Self {
        Transform {
            position,
            rotation: Vec3::ZERO,
        }
    }
}

/// Point-mass dynamics state
///
/// # Examples
///
/// ```
/// use arena_physics::ecs::components::PhysicsBody;
///
/// let body = PhysicsBody::default();
/// assert_eq!(body.mass, 1.0);
/// assert_eq!(body.bounce_factor, 0.5);
/// assert!(!body.grounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    /// Mass used to turn forces into velocity changes
    pub mass: f32,
    /// Linear velocity (units/s)
    pub velocity: Vec3,
    /// Reserved acceleration accumulator
    pub acceleration: Vec3,
    /// Whether the body is resting on the ground or on top of something
    pub grounded: bool,
    /// Fraction of vertical speed kept when bouncing off the ground
    pub bounce_factor: f32,
    /// Horizontal velocity multiplier applied on ground contact
    pub friction: f32,
}

impl PhysicsBody {
    /// Threshold below which mass is considered effectively zero
    pub const IMMOVABLE_THRESHOLD: f32 = 1e-10;

    /// Create a resting body with the given mass
    pub fn with_mass(mass: f32) -> Self {
        PhysicsBody {
            mass,
            ..Default::default()
        }
    }

    /// Get the inverse mass (1/m) for use in calculations
    ///
    /// Returns 0.0 for massless bodies to prevent division by zero.
    pub fn inverse_mass(&self) -> f32 {
        if self.mass.abs() < Self::IMMOVABLE_THRESHOLD || !self.mass.is_finite() {
            0.0
        } else {
            1.0 / self.mass
        }
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        PhysicsBody {
            mass: 1.0,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            grounded: false,
            bounce_factor: 0.5,
            friction: 0.8,
        }
    }
}

bitflags! {
    /// Behavior flags of an object
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EntityFlags: u8 {
        /// Submitted for rendering
        const VISIBLE = 1 << 0;
        /// Takes part in simulation and collision
        const ACTIVE = 1 << 1;
        /// Never integrated and never moved by collision resolution
        const STATIC = 1 << 2;
        /// Detects overlaps without being pushed apart
        const TRIGGER = 1 << 3;
        /// Takes part in the collision pass
        const COLLIDABLE = 1 << 4;
    }
}

impl Default for EntityFlags {
    fn default() -> Self {
        EntityFlags::VISIBLE | EntityFlags::ACTIVE
    }
}

/// Opaque handle to a renderer-owned texture or material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Render attributes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Appearance {
    /// Tint color
    pub color: Color,
    /// Texture or material owned by this object, if any
    pub material: Option<MaterialId>,
}

/// An object in the world
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    /// Unique name within the registry
    pub name: String,
    /// Object kind
    pub kind: EntityKind,
    /// Position and orientation
    pub transform: Transform,
    /// Geometry
    pub shape: Shape,
    /// Render attributes
    pub appearance: Appearance,
    /// Behavior flags
    pub flags: EntityFlags,
    /// Dynamics state, present when physics is enabled
    pub body: Option<PhysicsBody>,
}

impl GameObject {
    /// Center position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Full bounding-box extents
    pub fn size(&self) -> Vec3 {
        self.shape.extents()
    }

    /// World-space bounding box
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.transform.position, self.shape.half_extents())
    }

    /// Check if this is the player capsule
    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    /// Check if the object takes part in simulation
    pub fn is_active(&self) -> bool {
        self.flags.contains(EntityFlags::ACTIVE)
    }

    /// Check if the object is submitted for rendering
    pub fn is_visible(&self) -> bool {
        self.flags.contains(EntityFlags::VISIBLE)
    }

    /// Check if the object is immovable
    pub fn is_static(&self) -> bool {
        self.flags.contains(EntityFlags::STATIC)
    }

    /// Check if the object only detects overlaps
    pub fn is_trigger(&self) -> bool {
        self.flags.contains(EntityFlags::TRIGGER)
    }

    /// Check if the object takes part in the collision pass
    pub fn has_collision(&self) -> bool {
        self.flags.contains(EntityFlags::COLLIDABLE)
    }

    /// Check if the object carries a physics body
    pub fn has_physics(&self) -> bool {
        self.body.is_some()
    }

    /// Check if the object is on the ground, false without a body
    pub fn is_grounded(&self) -> bool {
        self.body.map_or(false, |b| b.grounded)
    }

    /// Current velocity, zero without a body
    pub fn velocity(&self) -> Vec3 {
        self.body.map_or(Vec3::ZERO, |b| b.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_extents() {
        assert_eq!(Shape::Sphere { radius: 1.0 }.extents(), Vec3::splat(2.0));
        assert_eq!(
            Shape::Capsule { radius: 0.3, height: 1.8 }.extents(),
            Vec3::new(0.6, 1.8, 0.6)
        );
        assert_eq!(
            Shape::Plane { width: 50.0, depth: 40.0, thickness: 0.1 }.extents(),
            Vec3::new(50.0, 0.1, 40.0)
        );
    }

    #[test]
    fn test_shape_resized_keeps_variant() {
        let sphere = Shape::Sphere { radius: 1.0 }.resized(Vec3::new(4.0, 9.0, 9.0));
        assert_eq!(sphere, Shape::Sphere { radius: 2.0 });

        let plane = Shape::Plane { width: 1.0, depth: 1.0, thickness: 0.1 }
            .resized(Vec3::new(10.0, 0.5, 20.0));
        assert_eq!(plane, Shape::Plane { width: 10.0, depth: 20.0, thickness: 0.5 });
    }

    #[test]
    fn test_bounding_radius() {
        assert_eq!(Shape::Sphere { radius: 1.5 }.bounding_radius(), 1.5);
        assert_eq!(Shape::Box { size: Vec3::new(1.0, 4.0, 2.0) }.bounding_radius(), 2.0);
    }

    #[test]
    fn test_kind_defaults() {
        let settings = PlayerPhysicsSettings::default();
        assert_eq!(EntityKind::Sphere.default_shape(&settings).extents(), Vec3::splat(2.0));
        assert_eq!(EntityKind::Cube.default_shape(&settings).extents(), Vec3::ONE);
        assert_eq!(
            EntityKind::Player.default_shape(&settings),
            Shape::Capsule { radius: 0.3, height: 1.8 }
        );
        assert_eq!(EntityKind::Sphere.default_color(), Color::RED);
        assert_eq!(EntityKind::Player.default_color(), Color::GREEN);
    }

    #[test]
    fn test_inverse_mass() {
        assert_eq!(PhysicsBody::with_mass(2.0).inverse_mass(), 0.5);
        assert_eq!(PhysicsBody::with_mass(0.0).inverse_mass(), 0.0);
    }

    #[test]
    fn test_default_flags() {
        let flags = EntityFlags::default();
        assert!(flags.contains(EntityFlags::VISIBLE | EntityFlags::ACTIVE));
        assert!(!flags.contains(EntityFlags::STATIC));
    }
}
