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
//! Object registry and frame systems
//!
//! This module provides the world-side half of the engine:
//! - Generational entity handles
//! - Game object components and the registry that owns them
//! - The system trait and a staged scheduler
//! - The integration, collision and player systems

mod entity;
mod system;
mod world;

pub mod components;
pub mod scheduler;
pub mod systems;

pub use entity::Entity;
pub use system::System;
pub use world::World;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_world_creation() {
        let world = World::new();
        assert_eq!(world.len(), 0);
        assert!(world.is_empty());
    }

    #[test]
    fn test_entity_creation() {
        let mut world = World::new();
        let entity = world
            .create(components::EntityKind::Cube, None, Vec3::ZERO, false, true)
            .unwrap();
        assert_eq!(world.len(), 1);
        assert!(world.is_alive(entity));
    }
}
