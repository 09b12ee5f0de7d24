// Copyright 2025 the Aster authors
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

//! Defines color types for rendering.

/// An RGBA color in linear space with `f32` components.
///
/// Components are unclamped; values above 1.0 act as brightness multipliers
/// when used as a per-draw tint.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LinearRgba {
    /// The red channel.
    pub r: f32,
    /// The green channel.
    pub g: f32,
    /// The blue channel.
    pub b: f32,
    /// The alpha channel.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new color from its channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linearly interpolates between two colors.
    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        Self {
            r: self.r + (rhs.r - self.r) * t,
            g: self.g + (rhs.g - self.g) * t,
            b: self.b + (rhs.b - self.b) * t,
            a: self.a + (rhs.a - self.a) * t,
        }
    }

    /// Converts to an 8-bit-per-channel color, clamping each channel
    /// to `[0, 1]` first.
    pub fn to_color32(self) -> Color32 {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        Color32 {
            r: quantize(self.r),
            g: quantize(self.g),
            b: quantize(self.b),
            a: quantize(self.a),
        }
    }
}

/// An RGBA color with 8 bits per channel, as stored in texture data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Color32 {
    /// The red channel.
    pub r: u8,
    /// The green channel.
    pub g: u8,
    /// The blue channel.
    pub b: u8,
    /// The alpha channel.
    pub a: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = LinearRgba::BLACK;
        let b = LinearRgba::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_to_color32_clamps() {
        let hot = LinearRgba::new(1.5, 1.5, 1.5, 1.0);
        assert_eq!(
            hot.to_color32(),
            Color32 {
                r: 255,
                g: 255,
                b: 255,
                a: 255
            }
        );
    }
}
