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
//! Frame timing
//!
//! The physics core trusts the timestep it is given. [`FrameClock`] sits in
//! front of it and bounds that timestep so a hitch cannot produce one huge
//! integration step.

use std::time::Instant;

/// Largest timestep handed to the core, in seconds
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Clamp a raw frame delta into `[0, max]`
///
/// Negative and non-finite deltas become zero.
pub fn clamp_delta(dt: f32, max: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max)
    }
}

/// Measures wall-clock time between frames
///
/// # Examples
///
/// ```
/// use arena_physics::time::{FrameClock, MAX_FRAME_DELTA};
///
/// let mut clock = FrameClock::new();
/// let dt = clock.tick();
/// assert!(dt >= 0.0 && dt <= MAX_FRAME_DELTA);
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: f32,
}

impl FrameClock {
    /// Create a clock that clamps to [`MAX_FRAME_DELTA`]
    pub fn new() -> Self {
        Self::with_max_delta(MAX_FRAME_DELTA)
    }

    /// Create a clock with a custom clamp
    pub fn with_max_delta(max_delta: f32) -> Self {
        FrameClock {
            last: None,
            max_delta,
        }
    }

    /// Largest delta this clock returns
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Seconds since the previous tick, clamped; zero on the first tick
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`FrameClock::tick`] with an explicit timestamp
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        clamp_delta(dt, self.max_delta)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(0.016, MAX_FRAME_DELTA), 0.016);
        assert_eq!(clamp_delta(0.5, MAX_FRAME_DELTA), MAX_FRAME_DELTA);
        assert_eq!(clamp_delta(-1.0, MAX_FRAME_DELTA), 0.0);
        assert_eq!(clamp_delta(f32::NAN, MAX_FRAME_DELTA), 0.0);
    }

    #[test]
    fn test_hitch_is_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(start), 0.0);

        let dt = clock.tick_at(start + Duration::from_millis(20));
        assert!((dt - 0.02).abs() < 1e-4);

        let dt = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(dt, MAX_FRAME_DELTA);
    }

    #[test]
    fn test_clock_going_backwards() {
        let start = Instant::now();
        let mut clock = FrameClock::with_max_delta(0.05);
        clock.tick_at(start + Duration::from_secs(1));
        assert_eq!(clock.tick_at(start), 0.0);
    }
}
