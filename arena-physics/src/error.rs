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
//! Error types for registry and emitter operations
//!
//! Only operations that can be refused return an error. Lookups hand back
//! `Option`, a full particle pool silently emits nothing, and degenerate
//! geometry (zero-length normals) is skipped where it is computed.

use thiserror::Error;

/// Errors reported by the object registry and the particle system
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A fixed-capacity pool has no free slot
    #[error("{pool} capacity of {capacity} exhausted")]
    CapacityExceeded {
        /// Which pool refused the insertion
        pool: &'static str,
        /// The configured capacity of that pool
        capacity: usize,
    },

    /// No object or emitter carries the requested name
    #[error("no object named {0:?}")]
    NotFound(String),

    /// The handle refers to a slot that has since been freed
    #[error("stale handle: the referenced object was destroyed")]
    StaleHandle,

    /// Object names must be unique within the registry
    #[error("an object named {0:?} already exists")]
    DuplicateName(String),

    /// The registry already holds a player object
    #[error("a player object already exists")]
    PlayerAlreadyExists,

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;
