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
//! Object registry
//!
//! The World owns every [`GameObject`] in a fixed-capacity generational
//! pool, indexes them by unique name, and tracks the single player object
//! and the physics settings every step reads.

use crate::color::Color;
use crate::config::{PlayerPhysicsSettings, WorldConfig};
use crate::ecs::components::{
    Appearance, EntityFlags, EntityKind, GameObject, MaterialId, PhysicsBody, Shape, Transform,
    PLANE_THICKNESS,
};
use crate::ecs::Entity;
use crate::error::{EngineError, Result};
use crate::integration::apply_impulse;
use crate::math::Vec3;
use crate::pool::{PoolStats, SlotPool};
use log::{debug, info, warn};
use std::collections::HashMap;

/// The object registry
///
/// # Examples
///
/// ```
/// use arena_physics::ecs::components::EntityKind;
/// use arena_physics::ecs::World;
/// use arena_physics::math::Vec3;
///
/// let mut world = World::new();
/// let ball = world
///     .create(EntityKind::Sphere, Some("ball"), Vec3::new(0.0, 10.0, 0.0), true, true)
///     .unwrap();
///
/// assert_eq!(world.find("ball"), Some(ball));
/// assert_eq!(world.get(ball).unwrap().size(), Vec3::splat(2.0));
///
/// world.destroy(ball);
/// assert!(world.get(ball).is_none());
/// ```
pub struct World {
    objects: SlotPool<Entity, GameObject>,
    names: HashMap<String, Entity>,
    player: Option<Entity>,
    settings: PlayerPhysicsSettings,
    released_materials: Vec<MaterialId>,
}

impl World {
    /// Create an empty world with default capacity and settings
    pub fn new() -> Self {
        Self::build(WorldConfig::default())
    }

    /// Create an empty world from a validated configuration
    pub fn with_config(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: WorldConfig) -> Self {
        World {
            objects: SlotPool::with_capacity(config.max_objects),
            names: HashMap::with_capacity(config.max_objects),
            player: None,
            settings: config.player,
            released_materials: Vec::new(),
        }
    }

    /// Create an object with the defaults of its kind
    ///
    /// A name is synthesized from the current object count when `name` is
    /// `None`. Fails when the registry is full, the name is taken, or a second
    /// player is requested.
    pub fn create(
        &mut self,
        kind: EntityKind,
        name: Option<&str>,
        position: Vec3,
        has_physics: bool,
        has_collision: bool,
    ) -> Result<Entity> {
        if self.objects.is_full() {
            warn!("Maximum object limit of {} reached", self.objects.capacity());
            return Err(EngineError::CapacityExceeded {
                pool: "object",
                capacity: self.objects.capacity(),
            });
        }
        if kind == EntityKind::Player && self.player.is_some() {
            warn!("Refusing to create a second player object");
            return Err(EngineError::PlayerAlreadyExists);
        }

        let name = match name {
            Some(name) => {
                if self.names.contains_key(name) {
                    warn!("Object name {name:?} is already taken");
                    return Err(EngineError::DuplicateName(name.to_string()));
                }
                name.to_string()
            }
            None => self.synthesize_name(),
        };

        let mut flags = EntityFlags::default();
        if has_collision {
            flags.insert(EntityFlags::COLLIDABLE);
        }
        if kind == EntityKind::Plane {
            flags.insert(EntityFlags::STATIC);
        }

        let body = has_physics.then(|| {
            let mut body = PhysicsBody::default();
            if kind == EntityKind::Player {
                body.friction = self.settings.ground_friction;
            }
            body
        });

        let object = GameObject {
            name: name.clone(),
            kind,
            transform: Transform::at(position),
            shape: kind.default_shape(&self.settings),
            appearance: Appearance {
                color: kind.default_color(),
                material: None,
            },
            flags,
            body,
        };

        let entity = self.objects.insert(object).ok_or(EngineError::CapacityExceeded {
            pool: "object",
            capacity: self.objects.capacity(),
        })?;
        self.names.insert(name.clone(), entity);
        if kind == EntityKind::Player {
            self.player = Some(entity);
        }

        info!(
            "Created object: {} at ({:.1}, {:.1}, {:.1})",
            name, position.x, position.y, position.z
        );
        Ok(entity)
    }

    fn synthesize_name(&self) -> String {
        let mut n = self.objects.len();
        loop {
            let candidate = format!("Object_{n}");
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_shaped(
        &mut self,
        kind: EntityKind,
        name: &str,
        position: Vec3,
        has_physics: bool,
        has_collision: bool,
        color: Color,
        shape: Option<Shape>,
    ) -> Result<Entity> {
        let entity = self.create(kind, Some(name), position, has_physics, has_collision)?;
        if let Some(object) = self.objects.get_mut(entity) {
            object.appearance.color = color;
            if let Some(shape) = shape {
                object.shape = shape;
            }
        }
        Ok(entity)
    }

    /// Create a unit cube with an optional material
    pub fn create_cube(
        &mut self,
        name: &str,
        position: Vec3,
        has_physics: bool,
        has_collision: bool,
        color: Color,
        material: Option<MaterialId>,
    ) -> Result<Entity> {
        let entity = self.create_shaped(
            EntityKind::Cube,
            name,
            position,
            has_physics,
            has_collision,
            color,
            None,
        )?;
        self.set_material(entity, material)?;
        Ok(entity)
    }

    /// Create a ball of the given radius
    pub fn create_sphere(
        &mut self,
        name: &str,
        position: Vec3,
        has_physics: bool,
        has_collision: bool,
        color: Color,
        radius: f32,
    ) -> Result<Entity> {
        self.create_shaped(
            EntityKind::Sphere,
            name,
            position,
            has_physics,
            has_collision,
            color,
            Some(Shape::Sphere { radius }),
        )
    }

    /// Create the player capsule sized from the current settings
    pub fn create_player(
        &mut self,
        name: &str,
        position: Vec3,
        has_physics: bool,
        has_collision: bool,
    ) -> Result<Entity> {
        self.create(EntityKind::Player, Some(name), position, has_physics, has_collision)
    }

    /// Create a unit pyramid with an optional material
    pub fn create_pyramid(
        &mut self,
        name: &str,
        position: Vec3,
        has_physics: bool,
        has_collision: bool,
        color: Color,
        material: Option<MaterialId>,
    ) -> Result<Entity> {
        let entity = self.create_shaped(
            EntityKind::Pyramid,
            name,
            position,
            has_physics,
            has_collision,
            color,
            None,
        )?;
        self.set_material(entity, material)?;
        Ok(entity)
    }

    /// Create an upright cylinder
    #[allow(clippy::too_many_arguments)]
    pub fn create_cylinder(
        &mut self,
        name: &str,
        position: Vec3,
        has_physics: bool,
        has_collision: bool,
        color: Color,
        radius: f32,
        height: f32,
    ) -> Result<Entity> {
        self.create_shaped(
            EntityKind::Cylinder,
            name,
            position,
            has_physics,
            has_collision,
            color,
            Some(Shape::Cylinder { radius, height }),
        )
    }

    /// Create a static, collidable ground slab
    pub fn create_plane(
        &mut self,
        name: &str,
        position: Vec3,
        width: f32,
        depth: f32,
        color: Color,
    ) -> Result<Entity> {
        self.create_shaped(
            EntityKind::Plane,
            name,
            position,
            false,
            true,
            color,
            Some(Shape::Plane {
                width,
                depth,
                thickness: PLANE_THICKNESS,
            }),
        )
    }

    /// Create an upright cone
    #[allow(clippy::too_many_arguments)]
    pub fn create_cone(
        &mut self,
        name: &str,
        position: Vec3,
        has_physics: bool,
        has_collision: bool,
        color: Color,
        radius: f32,
        height: f32,
    ) -> Result<Entity> {
        self.create_shaped(
            EntityKind::Cone,
            name,
            position,
            has_physics,
            has_collision,
            color,
            Some(Shape::Cone { radius, height }),
        )
    }

    /// Destroy an object
    ///
    /// Its material is queued for release (see
    /// [`World::drain_released_materials`]) and the player slot is cleared if
    /// it was the player. Returns the removed object, or `None` if the handle
    /// is stale.
    pub fn destroy(&mut self, entity: Entity) -> Option<GameObject> {
        let object = self.objects.remove(entity)?;
        self.names.remove(&object.name);
        if let Some(material) = object.appearance.material {
            self.released_materials.push(material);
        }
        if self.player == Some(entity) {
            self.player = None;
        }
        info!("Destroyed object: {}", object.name);
        Some(object)
    }

    /// Destroy the object with the given name
    pub fn destroy_by_name(&mut self, name: &str) -> Result<GameObject> {
        let entity = self
            .find(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))?;
        self.destroy(entity).ok_or(EngineError::StaleHandle)
    }

    /// Destroy every object
    pub fn clear(&mut self) {
        for object in self.objects.clear() {
            if let Some(material) = object.appearance.material {
                self.released_materials.push(material);
            }
        }
        self.names.clear();
        self.player = None;
        info!("Cleared all objects");
    }

    /// Look up an object by name
    pub fn find(&self, name: &str) -> Option<Entity> {
        self.names.get(name).copied()
    }

    /// Get an object
    pub fn get(&self, entity: Entity) -> Option<&GameObject> {
        self.objects.get(entity)
    }

    /// Get an object mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut GameObject> {
        self.objects.get_mut(entity)
    }

    /// Borrow two distinct objects mutably
    pub fn get_pair_mut(
        &mut self,
        a: Entity,
        b: Entity,
    ) -> Option<(&mut GameObject, &mut GameObject)> {
        self.objects.get2_mut(a, b)
    }

    /// Check if the handle still refers to a live object
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.objects.contains(entity)
    }

    fn modify(&mut self, entity: Entity, f: impl FnOnce(&mut GameObject)) -> Result<()> {
        let object = self.objects.get_mut(entity).ok_or(EngineError::StaleHandle)?;
        f(object);
        Ok(())
    }

    fn set_flag(&mut self, entity: Entity, flag: EntityFlags, value: bool) -> Result<()> {
        self.modify(entity, |o| o.flags.set(flag, value))
    }

    /// Move an object
    pub fn set_position(&mut self, entity: Entity, position: Vec3) -> Result<()> {
        self.modify(entity, |o| o.transform.position = position)
    }

    /// Resize an object's bounding extents, keeping its shape family
    ///
    /// Boxes and planes take `size` as given. Round shapes stay round, so the
    /// mapping is lossy: a sphere's diameter becomes `size.x` and its y and z
    /// follow, while capsules, cylinders and cones take their diameter from
    /// `size.x` and their height from `size.y`, ignoring `size.z`.
    pub fn set_scale(&mut self, entity: Entity, size: Vec3) -> Result<()> {
        self.modify(entity, |o| o.shape = o.shape.resized(size))
    }

    /// Set an object's Euler rotation in degrees
    pub fn set_rotation(&mut self, entity: Entity, rotation: Vec3) -> Result<()> {
        self.modify(entity, |o| o.transform.rotation = rotation)
    }

    /// Set an object's tint
    pub fn set_color(&mut self, entity: Entity, color: Color) -> Result<()> {
        self.modify(entity, |o| o.appearance.color = color)
    }

    /// Replace an object's material, queueing the previous one for release
    pub fn set_material(&mut self, entity: Entity, material: Option<MaterialId>) -> Result<()> {
        let object = self.objects.get_mut(entity).ok_or(EngineError::StaleHandle)?;
        let previous = std::mem::replace(&mut object.appearance.material, material);
        if let Some(previous) = previous.filter(|p| Some(*p) != material) {
            self.released_materials.push(previous);
        }
        Ok(())
    }

    /// Enable or disable simulation and collision for an object
    pub fn set_active(&mut self, entity: Entity, active: bool) -> Result<()> {
        self.set_flag(entity, EntityFlags::ACTIVE, active)
    }

    /// Show or hide an object
    pub fn set_visible(&mut self, entity: Entity, visible: bool) -> Result<()> {
        self.set_flag(entity, EntityFlags::VISIBLE, visible)
    }

    /// Make an object immovable or movable
    pub fn set_static(&mut self, entity: Entity, is_static: bool) -> Result<()> {
        self.set_flag(entity, EntityFlags::STATIC, is_static)
    }

    /// Turn overlap-only detection on or off
    pub fn set_trigger(&mut self, entity: Entity, trigger: bool) -> Result<()> {
        self.set_flag(entity, EntityFlags::TRIGGER, trigger)
    }

    /// Turn collision on or off
    pub fn set_collision(&mut self, entity: Entity, collision: bool) -> Result<()> {
        self.set_flag(entity, EntityFlags::COLLIDABLE, collision)
    }

    /// Apply an instantaneous force (`velocity += force / mass`)
    ///
    /// Returns `Ok(false)` if the object has no body or zero mass.
    pub fn apply_force(&mut self, entity: Entity, force: Vec3) -> Result<bool> {
        let object = self.objects.get_mut(entity).ok_or(EngineError::StaleHandle)?;
        Ok(apply_impulse(object, force))
    }

    /// Handle of the player object
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// The player object
    pub fn player_object(&self) -> Option<&GameObject> {
        self.player.and_then(|p| self.objects.get(p))
    }

    /// The player object, mutably
    pub fn player_object_mut(&mut self) -> Option<&mut GameObject> {
        let player = self.player?;
        self.objects.get_mut(player)
    }

    /// Player position, or the origin when there is no player
    pub fn player_position(&self) -> Vec3 {
        self.player_object().map_or(Vec3::ZERO, |p| p.position())
    }

    /// Check if the player exists and is grounded
    pub fn is_player_grounded(&self) -> bool {
        self.player_object().map_or(false, |p| p.is_grounded())
    }

    /// Current physics settings
    pub fn settings(&self) -> &PlayerPhysicsSettings {
        &self.settings
    }

    /// Replace the physics settings and resize the live player capsule
    pub fn set_player_settings(&mut self, settings: PlayerPhysicsSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        if let Some(player) = self.player_object_mut() {
            player.shape = Shape::Capsule {
                radius: settings.player_radius,
                height: settings.player_height,
            };
        }
        info!(
            "Player physics settings updated: walk {:.1}, run {:.1}, jump {:.1}, gravity {:.1}",
            settings.walk_speed, settings.run_speed, settings.jump_force, settings.gravity
        );
        Ok(())
    }

    /// Set the signed gravity used by every physics step
    pub fn set_gravity(&mut self, gravity: f32) {
        debug!("Gravity set to {gravity:.2}");
        self.settings.gravity = gravity;
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Maximum number of live objects
    pub fn capacity(&self) -> usize {
        self.objects.capacity()
    }

    /// Handles of live objects in creation order
    pub fn entities(&self) -> &[Entity] {
        self.objects.keys()
    }

    /// Iterate over live objects in creation order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &GameObject)> + '_ {
        self.objects.iter()
    }

    /// Iterate mutably over live objects in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> + '_ {
        self.objects.values_mut()
    }

    /// Active, visible objects for draw submission
    pub fn renderables(&self) -> impl Iterator<Item = (Entity, &GameObject)> + '_ {
        self.objects
            .iter()
            .filter(|(_, o)| o.is_active() && o.is_visible())
    }

    /// Take the materials of destroyed objects so the renderer can free them
    pub fn drain_released_materials(&mut self) -> Vec<MaterialId> {
        std::mem::take(&mut self.released_materials)
    }

    /// Slot usage statistics of the registry
    pub fn pool_stats(&self) -> &PoolStats {
        self.objects.stats()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
