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

//! Bundled default assets for input visuals.
//!
//! These exist so a usable visual always exists: resolution failures
//! degrade to the default controller models, and the hand material is the
//! ready-made default unless the application overrides it.

use crate::gradient::Gradient;
use aster_core::asset::AssetHandle;
use aster_core::math::{Color32, LinearRgba};
use aster_core::renderer::{Material, Model, TexAddress, TexFormat, Texture, Transparency};

/// Cache id of the default hand material.
pub const ID_MATERIAL_HAND: &str = "default/material_hand";
/// Cache id of the bundled left controller model.
pub const ID_CONTROLLER_LEFT: &str = "default/model_controller_l";
/// Cache id of the bundled right controller model.
pub const ID_CONTROLLER_RIGHT: &str = "default/model_controller_r";

/// The bundled defaults, constructed once at system startup and held for
/// the life of the input visual system.
pub struct InputDefaults {
    /// The bundled left controller model.
    pub controller_left: AssetHandle<Model>,
    /// The bundled right controller model.
    pub controller_right: AssetHandle<Model>,
    /// The default hand material with its baked gradient texture.
    pub hand_material: AssetHandle<Material>,
}

impl InputDefaults {
    /// Builds the default assets.
    pub fn build() -> Self {
        let mut material = Material::new(ID_MATERIAL_HAND);
        material.transparency = Transparency::Blend;
        material.queue_offset = 10;
        material.diffuse = Some(AssetHandle::new(hand_gradient_texture()));

        Self {
            controller_left: AssetHandle::new(Model::placeholder(ID_CONTROLLER_LEFT)),
            controller_right: AssetHandle::new(Model::placeholder(ID_CONTROLLER_RIGHT)),
            hand_material: AssetHandle::new(material),
        }
    }
}

/// Bakes the 16x16 vertical gradient the default hand material samples:
/// transparent gray at the wrist rising to opaque white at the fingertips.
fn hand_gradient_texture() -> Texture {
    let mut grad = Gradient::new();
    grad.add(LinearRgba::new(0.4, 0.4, 0.4, 0.0), 0.0);
    grad.add(LinearRgba::new(0.6, 0.6, 0.6, 0.0), 0.4);
    grad.add(LinearRgba::new(0.8, 0.8, 0.8, 1.0), 0.55);
    grad.add(LinearRgba::new(1.0, 1.0, 1.0, 1.0), 1.0);

    const SIZE: usize = 16;
    let mut pixels = vec![Color32::default(); SIZE * SIZE];
    for y in 0..SIZE {
        let col = grad.sample32(1.0 - y as f32 / (SIZE - 1) as f32);
        for x in 0..SIZE {
            pixels[x + y * SIZE] = col;
        }
    }

    Texture {
        width: SIZE as u32,
        height: SIZE as u32,
        pixels,
        address: TexAddress::Clamp,
        format: TexFormat::Rgba32Linear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_tagged() {
        let defaults = InputDefaults::build();
        assert_eq!(defaults.controller_left.id(), Some(ID_CONTROLLER_LEFT));
        assert_eq!(defaults.controller_right.id(), Some(ID_CONTROLLER_RIGHT));
        assert_eq!(defaults.hand_material.id, ID_MATERIAL_HAND);
    }

    #[test]
    fn test_hand_material_blends_and_sorts_late() {
        let defaults = InputDefaults::build();
        assert_eq!(defaults.hand_material.transparency, Transparency::Blend);
        assert_eq!(defaults.hand_material.queue_offset, 10);
    }

    #[test]
    fn test_gradient_texture_fades_toward_wrist() {
        let tex = hand_gradient_texture();
        assert_eq!((tex.width, tex.height), (16, 16));
        // Row 0 is the fingertip end (opaque), the last row the wrist
        // end (transparent).
        assert_eq!(tex.pixels[0].a, 255);
        assert_eq!(tex.pixels[15 * 16].a, 0);
        assert_eq!(tex.address, TexAddress::Clamp);
    }
}
