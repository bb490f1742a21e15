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
//! Three-component vector math
//!
//! Plain Euclidean operations over `f32` vectors. Every physics and particle
//! computation in the crate goes through these, so they are kept free of
//! side effects and failure modes: normalizing a zero-length vector yields
//! the zero vector rather than NaN.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// 3D vector with single-precision components
///
/// # Examples
///
/// ```
/// use arena_physics::math::Vec3;
///
/// let v = Vec3::new(3.0, 4.0, 0.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component (up)
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// The zero vector
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    /// Vector with all components set to one
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    /// World up axis
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    /// Create a vector from components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    /// Create a vector with every component set to `v`
    pub const fn splat(v: f32) -> Self {
        Vec3::new(v, v, v)
    }

    /// Euclidean length
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length, avoids the square root for comparisons
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Unit vector in the same direction
    ///
    /// Returns [`Vec3::ZERO`] when the length is exactly zero.
    pub fn normalize(self) -> Vec3 {
        let length = self.length();
        if length == 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(self.x / length, self.y / length, self.z / length)
    }

    /// Right-handed cross product
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Dot product
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Distance between two points
    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    /// Component-wise minimum
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Clamp each component into `[lo, hi]`
    ///
    /// Written as `max(lo, min(v, hi))` so an inverted box still yields a point.
    pub fn clamp(self, lo: Vec3, hi: Vec3) -> Vec3 {
        lo.max(self.min(hi))
    }

    /// Linear interpolation towards `other`
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.z, other.z, t),
        )
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Get the vector as an array
    pub fn as_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(arr: [f32; 3]) -> Self {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Linear interpolation `a + t * (b - a)`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Clamp `value` into `[min, max]`
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_subtract() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_scale_and_neg() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_eq!(v * 2.0, Vec3::new(2.0, -4.0, 1.0));
        assert_eq!(-v, Vec3::new(-1.0, 2.0, -0.5));
    }

    #[test]
    fn test_length() {
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(Vec3::new(1.0, 2.0, 2.0).length_squared(), 9.0);
    }

    #[test]
    fn test_normalize() {
        let n = Vec3::new(0.0, 0.0, 10.0).normalize();
        assert_eq!(n, Vec3::new(0.0, 0.0, 1.0));

        let tilted = Vec3::new(1.0, 1.0, 1.0).normalize();
        assert!((tilted.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        let n = Vec3::ZERO.normalize();
        assert_eq!(n, Vec3::ZERO);
        assert!(n.is_finite());
    }

    #[test]
    fn test_cross_and_dot() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(x.dot(y), 0.0);
        assert_eq!(Vec3::new(1.0, 2.0, 3.0).dot(Vec3::new(4.0, 5.0, 6.0)), 32.0);
    }

    #[test]
    fn test_clamp_to_box() {
        let p = Vec3::new(5.0, -5.0, 0.25);
        let clamped = p.clamp(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(clamped, Vec3::new(1.0, -1.0, 0.25));
    }

    #[test]
    fn test_scalar_helpers() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(clamp(0.2, 0.0, 0.1), 0.1);
        assert_eq!(clamp(-1.0, 0.0, 0.1), 0.0);
        assert_eq!(clamp(0.05, 0.0, 0.1), 0.05);
    }
}
