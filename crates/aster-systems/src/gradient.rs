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

//! A small multi-stop color gradient, used to bake the default hand
//! material's texture.

use aster_core::math::{Color32, LinearRgba};

/// A color stop at a position in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
struct GradientStop {
    color: LinearRgba,
    position: f32,
}

/// A piecewise-linear color gradient over `[0, 1]`.
#[derive(Debug, Default)]
pub struct Gradient {
    // Kept sorted by position.
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Creates an empty gradient. Sampling an empty gradient yields black.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a color stop at `position`.
    pub fn add(&mut self, color: LinearRgba, position: f32) {
        let at = self
            .stops
            .partition_point(|stop| stop.position <= position);
        self.stops.insert(at, GradientStop { color, position });
    }

    /// Samples the gradient at `t`, clamping outside the stop range.
    pub fn sample(&self, t: f32) -> LinearRgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return LinearRgba::new(0.0, 0.0, 0.0, 0.0);
        };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }
        let after = self.stops.partition_point(|stop| stop.position < t);
        let hi = self.stops[after];
        let lo = self.stops[after - 1];
        let span = hi.position - lo.position;
        if span <= f32::EPSILON {
            return hi.color;
        }
        lo.color.lerp(hi.color, (t - lo.position) / span)
    }

    /// Samples the gradient at `t` as an 8-bit color.
    pub fn sample32(&self, t: f32) -> Color32 {
        self.sample(t).to_color32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_interpolates_between_stops() {
        let mut grad = Gradient::new();
        grad.add(LinearRgba::new(0.0, 0.0, 0.0, 0.0), 0.0);
        grad.add(LinearRgba::new(1.0, 1.0, 1.0, 1.0), 1.0);
        let mid = grad.sample(0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_clamps_outside_range() {
        let mut grad = Gradient::new();
        grad.add(LinearRgba::new(0.2, 0.2, 0.2, 1.0), 0.25);
        grad.add(LinearRgba::WHITE, 0.75);
        assert_eq!(grad.sample(0.0), LinearRgba::new(0.2, 0.2, 0.2, 1.0));
        assert_eq!(grad.sample(1.0), LinearRgba::WHITE);
    }

    #[test]
    fn test_empty_gradient_is_transparent_black() {
        let grad = Gradient::new();
        assert_eq!(grad.sample(0.5), LinearRgba::new(0.0, 0.0, 0.0, 0.0));
    }
}
