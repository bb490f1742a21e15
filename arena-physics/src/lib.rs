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
//! # Arena Physics
//!
//! Physics, collision and particle core for a small real-time arena game.
//! Everything runs inside one frame step driven by the caller.
//!
//! ## Features
//!
//! - **Object Registry**: fixed-capacity generational storage for game objects
//! - **Body Integration**: gravity, ground bounce, friction and air drag
//! - **Collision**: AABB, sphere and player-probe tests with positional response
//! - **Player Capsule**: configurable walk/run/jump movement with air control
//! - **Particles**: pooled emitters with rate-driven emission and presets
//! - **Parallelization**: optional Rayon fan-out of emitter updates
//!
//! ## Example
//!
//! ```rust
//! use arena_physics::color::Color;
//! use arena_physics::engine::Engine;
//! use arena_physics::math::Vec3;
//!
//! let mut engine = Engine::new();
//! let world = engine.world_mut();
//! world.create_plane("Ground", Vec3::ZERO, 50.0, 50.0, Color::GRAY).unwrap();
//! world.create_player("Player", Vec3::new(0.0, 5.0, 0.0), true, true).unwrap();
//! engine.particles_mut().spawn_fire(Vec3::new(3.0, 0.0, 3.0), 1.0).unwrap();
//!
//! for _ in 0..120 {
//!     engine.tick(1.0 / 60.0);
//! }
//! assert!(engine.world().is_player_grounded());
//! ```

#![warn(missing_docs)]

/// Vector math
pub mod math;

/// RGBA colors
pub mod color;

/// Engine configuration
pub mod config;

/// Error types
pub mod error;

/// Fixed-capacity generational pools
pub mod pool;

/// Object registry and frame systems
pub mod ecs;

/// Body and player integration steps
pub mod integration;

/// Collision detection and response
pub mod collision;

/// Particle engine
pub mod particles;

/// Player movement input
pub mod controller;

/// Frame timing
pub mod time;

/// Engine context
pub mod engine;

pub use ecs::{Entity, World};
pub use engine::Engine;
pub use error::{EngineError, Result};
