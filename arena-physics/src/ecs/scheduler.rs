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
//! Staged system scheduler
//!
//! Systems are grouped into stages that run in ascending order. Within a
//! stage, systems run in the order they were added, so a frame is fully
//! deterministic.

use crate::ecs::System;
use crate::ecs::World;
use log::trace;

/// Stage identifier for grouping systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub usize);

impl StageId {
    /// Create a new stage ID
    pub fn new(id: usize) -> Self {
        StageId(id)
    }
}

/// Standard stages of a physics frame
pub mod stages {
    use super::StageId;

    /// Gravity, bounce and drag for non-player bodies
    pub const INTEGRATION: StageId = StageId(0);

    /// Pairwise overlap detection and response
    pub const COLLISION: StageId = StageId(1);

    /// Player gravity, landing and ground friction
    pub const PLAYER: StageId = StageId(2);

    /// Gameplay reactions that inspect the settled state
    pub const POST_PROCESS: StageId = StageId(3);
}

/// A system with metadata for scheduling
struct ScheduledSystem {
    system: Box<dyn System>,
    stage: StageId,
}

/// Runs systems stage by stage
///
/// # Examples
///
/// ```
/// use arena_physics::ecs::scheduler::{Scheduler, stages};
/// use arena_physics::ecs::{World, System};
///
/// struct Spin;
/// impl System for Spin {
///     fn run(&mut self, _world: &mut World, _dt: f32) {}
/// }
///
/// let mut scheduler = Scheduler::new();
/// scheduler.add_system(Spin, stages::POST_PROCESS);
/// scheduler.run(&mut World::new(), 1.0 / 60.0);
/// ```
pub struct Scheduler {
    systems: Vec<ScheduledSystem>,
    sorted: bool,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Scheduler {
            systems: Vec::new(),
            sorted: true,
        }
    }

    /// Add a system to a specific stage
    pub fn add_system<S: System + 'static>(&mut self, system: S, stage: StageId) {
        self.systems.push(ScheduledSystem {
            system: Box::new(system),
            stage,
        });
        self.sorted = false;
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Get the number of stages in use
    pub fn stage_count(&self) -> usize {
        self.systems
            .iter()
            .map(|s| s.stage.0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// Names of the registered systems in execution order
    pub fn system_names(&mut self) -> Vec<&str> {
        self.sort();
        self.systems.iter().map(|s| s.system.name()).collect()
    }

    fn sort(&mut self) {
        if !self.sorted {
            // Stable, so insertion order holds within a stage
            self.systems.sort_by_key(|s| s.stage);
            self.sorted = true;
        }
    }

    /// Run every system once with the given timestep
    pub fn run(&mut self, world: &mut World, dt: f32) {
        self.sort();
        for scheduled in &mut self.systems {
            trace!("Running {} (stage {})", scheduled.system.name(), scheduled.stage.0);
            scheduled.system.run(world, dt);
        }
    }

    /// Clear all systems from the scheduler
    pub fn clear(&mut self) {
        self.systems.clear();
        self.sorted = true;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestSystem {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl TestSystem {
        fn new(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Self {
            TestSystem {
                name: name.to_string(),
                log: Arc::clone(log),
            }
        }
    }

    impl System for TestSystem {
        fn run(&mut self, _world: &mut World, _dt: f32) {
            self.log.lock().unwrap().push(self.name.clone());
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_scheduler_creation() {
        let scheduler = Scheduler::new();
        assert_eq!(scheduler.system_count(), 0);
        assert_eq!(scheduler.stage_count(), 0);
    }

    #[test]
    fn test_stage_ordering() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(TestSystem::new("player", &log), stages::PLAYER);
        scheduler.add_system(TestSystem::new("bodies", &log), stages::INTEGRATION);
        scheduler.add_system(TestSystem::new("collide", &log), stages::COLLISION);
        scheduler.add_system(TestSystem::new("bodies2", &log), stages::INTEGRATION);

        let mut world = World::new();
        scheduler.run(&mut world, 0.016);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["bodies", "bodies2", "collide", "player"]
        );
        assert_eq!(
            scheduler.system_names(),
            vec!["bodies", "bodies2", "collide", "player"]
        );
    }

    #[test]
    fn test_empty_scheduler() {
        let mut scheduler = Scheduler::new();
        let mut world = World::new();
        scheduler.run(&mut world, 0.016);
    }

    #[test]
    fn test_clear_scheduler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(TestSystem::new("test", &log), stages::INTEGRATION);
        assert_eq!(scheduler.system_count(), 1);

        scheduler.clear();
        assert_eq!(scheduler.system_count(), 0);
        scheduler.run(&mut World::new(), 0.016);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stage_count() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(TestSystem::new("s1", &log), StageId::new(0));
        assert_eq!(scheduler.stage_count(), 1);

        scheduler.add_system(TestSystem::new("s2", &log), StageId::new(5));
        assert_eq!(scheduler.stage_count(), 6);
    }
}
