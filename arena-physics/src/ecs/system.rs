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
//! System trait
//!
//! Systems hold the per-frame logic that mutates the [`World`]. They run in
//! stage order under a [`Scheduler`](crate::ecs::scheduler::Scheduler).

use crate::ecs::World;

/// Per-frame logic operating on the world
pub trait System: Send + Sync {
    /// Advance the world by `dt` seconds
    fn run(&mut self, world: &mut World, dt: f32);

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::EntityKind;
    use crate::math::Vec3;

    struct Lift;

    impl System for Lift {
        fn run(&mut self, world: &mut World, dt: f32) {
            let entities = world.entities().to_vec();
            for entity in entities {
                if let Some(object) = world.get_mut(entity) {
                    object.transform.position.y += dt;
                }
            }
        }
    }

    #[test]
    fn test_system_runs_on_world() {
        let mut world = World::new();
        let cube = world.create(EntityKind::Cube, None, Vec3::ZERO, false, false).unwrap();

        let mut lift = Lift;
        lift.run(&mut world, 0.5);
        assert_eq!(world.get(cube).unwrap().position().y, 0.5);
        assert!(lift.name().ends_with("Lift"));
    }
}
