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
//! RGBA colors for entities and particles

/// 8-bit-per-channel RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Opaque black
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// Default cube color
    pub const BLUE: Color = Color::rgba(0, 121, 241, 255);
    /// Default sphere color
    pub const RED: Color = Color::rgba(230, 41, 55, 255);
    /// Default player color
    pub const GREEN: Color = Color::rgba(0, 228, 48, 255);
    /// Default pyramid color
    pub const YELLOW: Color = Color::rgba(253, 249, 0, 255);
    /// Default cylinder color
    pub const ORANGE: Color = Color::rgba(255, 161, 0, 255);
    /// Default plane color
    pub const GRAY: Color = Color::rgba(130, 130, 130, 255);
    /// Default cone color
    pub const MAGENTA: Color = Color::rgba(255, 0, 255, 255);

    /// Create a color from its four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::rgba(r, g, b, 255)
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Color::rgba(self.r, self.g, self.b, a)
    }

    /// Interpolate every channel towards `to`
    ///
    /// Each channel is computed in floating point and truncated towards zero,
    /// so `t = 1.0` lands exactly on `to` and intermediate values never round up.
    pub fn lerp(self, to: Color, t: f32) -> Color {
        Color::rgba(
            lerp_channel(self.r, to.r, t),
            lerp_channel(self.g, to.g, t),
            lerp_channel(self.b, to.b, t),
            lerp_channel(self.a, to.a, t),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    let from = from as f32;
    (from + (to as f32 - from) * t) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let start = Color::rgba(255, 100, 50, 255);
        let end = Color::rgba(255, 50, 0, 0);
        assert_eq!(start.lerp(end, 0.0), start);
        assert_eq!(start.lerp(end, 1.0), end);
    }

    #[test]
    fn test_lerp_truncates() {
        let start = Color::rgba(0, 0, 0, 255);
        let end = Color::rgba(3, 255, 1, 0);
        let mid = start.lerp(end, 0.5);
        // 1.5 -> 1, 127.5 -> 127, 0.5 -> 0, 127.5 -> 127
        assert_eq!(mid, Color::rgba(1, 127, 0, 127));
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(Color::WHITE.with_alpha(0), Color::rgba(255, 255, 255, 0));
    }
}
