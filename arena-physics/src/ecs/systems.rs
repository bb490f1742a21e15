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
//! Physics systems
//!
//! The three systems of a physics frame, in the order the engine schedules
//! them: body integration, the pairwise collision pass, then the player step.

use crate::collision::{pair_collides, resolve_collision, Resolution};
use crate::ecs::{Entity, System, World};
use crate::integration::{integrate_body, integrate_player, GroundState};
use log::{debug, trace};

/// Applies gravity, ground bounce and drag to every active non-player body
#[derive(Debug, Default)]
pub struct BodyIntegrationSystem {
    grounded: usize,
}

impl BodyIntegrationSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bodies resting on the ground after the last run
    pub fn grounded_count(&self) -> usize {
        self.grounded
    }
}

impl System for BodyIntegrationSystem {
    fn run(&mut self, world: &mut World, dt: f32) {
        let gravity = world.settings().gravity;
        self.grounded = world
            .iter_mut()
            .filter(|o| o.is_active() && !o.is_player())
            .filter_map(|o| integrate_body(o, gravity, dt))
            .filter(|state| *state == GroundState::Grounded)
            .count();
    }

    fn name(&self) -> &str {
        "BodyIntegrationSystem"
    }
}

/// Counters from one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Unordered pairs examined
    pub pairs_tested: usize,
    /// Pairs that overlapped
    pub contacts: usize,
    /// Contacts involving a trigger
    pub triggers: usize,
    /// Contacts that moved something
    pub resolved: usize,
}

/// Tests every unordered pair of active, collidable objects once and
/// resolves the ones that touch
///
/// Pairs are visited in creation order and resolved immediately, so a push
/// applied early in the pass is seen by later tests in the same pass.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    candidates: Vec<Entity>,
    last: CollisionStats,
}

impl CollisionSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters from the last run
    pub fn last_stats(&self) -> CollisionStats {
        self.last
    }
}

impl System for CollisionSystem {
    fn run(&mut self, world: &mut World, _dt: f32) {
        self.candidates.clear();
        self.candidates.extend(
            world
                .iter()
                .filter(|(_, o)| o.is_active() && o.has_collision())
                .map(|(entity, _)| entity),
        );

        let mut stats = CollisionStats::default();
        for (i, &a) in self.candidates.iter().enumerate() {
            for &b in &self.candidates[i + 1..] {
                let Some((first, second)) = world.get_pair_mut(a, b) else {
                    continue;
                };
                stats.pairs_tested += 1;
                if !pair_collides(first, second) {
                    continue;
                }
                stats.contacts += 1;
                match resolve_collision(first, second) {
                    Resolution::Trigger => stats.triggers += 1,
                    Resolution::PlayerPushed | Resolution::Separated => stats.resolved += 1,
                    Resolution::Skipped => {}
                }
            }
        }

        if stats.contacts > 0 {
            debug!(
                "Collision pass: {} pairs, {} contacts, {} resolved, {} triggers",
                stats.pairs_tested, stats.contacts, stats.resolved, stats.triggers
            );
        }
        self.last = stats;
    }

    fn name(&self) -> &str {
        "CollisionSystem"
    }
}

/// Steps the player capsule with the world's player settings
#[derive(Debug, Default)]
pub struct PlayerSystem {
    state: Option<GroundState>,
}

impl PlayerSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    /// Ground state after the last run, `None` if the player was not stepped
    pub fn ground_state(&self) -> Option<GroundState> {
        self.state
    }
}

impl System for PlayerSystem {
    fn run(&mut self, world: &mut World, dt: f32) {
        let settings = *world.settings();
        let state = match world.player_object_mut() {
            Some(player) if player.is_active() => integrate_player(player, &settings, dt),
            _ => None,
        };

        if state != self.state {
            trace!("Player ground state: {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    fn name(&self) -> &str {
        "PlayerSystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::ecs::components::EntityKind;
    use crate::math::Vec3;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_integration_skips_player_and_inactive() {
        let mut world = World::new();
        let player = world.create_player("Player", Vec3::new(0.0, 5.0, 0.0), true, true).unwrap();
        let sleeper = world
            .create(EntityKind::Sphere, Some("sleeper"), Vec3::new(0.0, 5.0, 0.0), true, true)
            .unwrap();
        world.set_active(sleeper, false).unwrap();

        let mut system = BodyIntegrationSystem::new();
        system.run(&mut world, DT);

        assert_eq!(world.get(player).unwrap().position().y, 5.0);
        assert_eq!(world.get(sleeper).unwrap().position().y, 5.0);
    }

    #[test]
    fn test_integration_counts_grounded() {
        let mut world = World::new();
        world.create(EntityKind::Cube, None, Vec3::new(0.0, 0.5, 0.0), true, true).unwrap();
        world.create(EntityKind::Cube, None, Vec3::new(5.0, 10.0, 0.0), true, true).unwrap();

        let mut system = BodyIntegrationSystem::new();
        system.run(&mut world, DT);
        assert_eq!(system.grounded_count(), 1);
    }

    #[test]
    fn test_collision_pass_counts_pairs_once() {
        let mut world = World::new();
        for i in 0..4 {
            world
                .create(EntityKind::Cube, None, Vec3::new(i as f32 * 10.0, 0.5, 0.0), false, true)
                .unwrap();
        }
        world.create(EntityKind::Cube, None, Vec3::ZERO, false, false).unwrap();

        let mut system = CollisionSystem::new();
        system.run(&mut world, DT);
        assert_eq!(system.last_stats().pairs_tested, 6);
        assert_eq!(system.last_stats().contacts, 0);
    }

    #[test]
    fn test_collision_separates_overlapping_bodies() {
        let mut world = World::new();
        let a = world.create(EntityKind::Cube, Some("a"), Vec3::ZERO, false, true).unwrap();
        let b = world
            .create(EntityKind::Cube, Some("b"), Vec3::new(0.3, 0.0, 0.0), false, true)
            .unwrap();

        let mut system = CollisionSystem::new();
        system.run(&mut world, DT);

        assert_eq!(system.last_stats().resolved, 1);
        assert!(world.get(a).unwrap().position().x < 0.0);
        assert!(world.get(b).unwrap().position().x > 0.3);
    }

    #[test]
    fn test_trigger_overlap_moves_nothing() {
        let mut world = World::new();
        let zone = world
            .create_cube("zone", Vec3::ZERO, false, true, Color::GREEN, None)
            .unwrap();
        world.set_trigger(zone, true).unwrap();
        let crate_box = world
            .create(EntityKind::Cube, Some("box"), Vec3::new(0.2, 0.0, 0.0), false, true)
            .unwrap();

        let mut system = CollisionSystem::new();
        system.run(&mut world, DT);

        assert_eq!(system.last_stats().triggers, 1);
        assert_eq!(world.get(zone).unwrap().position(), Vec3::ZERO);
        assert_eq!(world.get(crate_box).unwrap().position(), Vec3::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn test_player_system_without_player() {
        let mut world = World::new();
        let mut system = PlayerSystem::new();
        system.run(&mut world, DT);
        assert_eq!(system.ground_state(), None);
    }

    #[test]
    fn test_player_system_steps_player() {
        let mut world = World::new();
        let player = world.create_player("Player", Vec3::new(0.0, 0.9, 0.0), true, true).unwrap();

        let mut system = PlayerSystem::new();
        system.run(&mut world, DT);

        assert_eq!(system.ground_state(), Some(GroundState::Grounded));
        assert_eq!(world.get(player).unwrap().position().y, 0.9);
        assert!(world.is_player_grounded());

        world.set_active(player, false).unwrap();
        system.run(&mut world, DT);
        assert_eq!(system.ground_state(), None);
    }
}
