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

//! Management of hand and controller visual representations.
//!
//! Per hand this system tracks a procedural fallback mesh, a runtime
//! articulated mesh, a hand material, and a controller model. The
//! controller model is resolved from three competing sources in priority
//! order: the runtime controller-model capability, the model cache, and
//! the bundled defaults. Resolution never fails outward: a usable visual
//! must always exist, so every failure degrades to the bundled default.

use crate::defaults::InputDefaults;
use crate::hand_mesh::gen_fallback_mesh;
use aster_core::asset::{AssetHandle, Assets};
use aster_core::input::{
    AppFocus, ButtonState, HandMeshState, HandSelect, HandSource, Handed, TrackingProvider,
};
use aster_core::math::{LinearRgba, Mat4, PI};
use aster_core::renderer::{Material, Model, RenderQueue};
use aster_core::xr::{ControllerModelProvider, ModelKey, XrCapabilityError, XrExtensions};

/// Cache id of the left fallback hand mesh.
const ID_MESH_LEFT_HAND: &str = "default/mesh_lefthand";
/// Cache id of the right fallback hand mesh.
const ID_MESH_RIGHT_HAND: &str = "default/mesh_righthand";

/// Which strategy the input visual system uses for hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputRenderMode {
    /// Do not render hand meshes at all.
    None,
    /// Render the synthesized fallback mesh where no richer source exists.
    #[default]
    HandFallback,
}

/// One hand's mesh and material state.
struct HandVisual {
    fallback: HandMeshState,
    articulated: HandMeshState,
    material: Option<AssetHandle<Material>>,
}

/// One hand's controller model state.
///
/// `is_fallback` records that the stored handle was not set from a live
/// application call: the runtime may report a better model at any time, so
/// fallback models are re-resolved every frame they are rendered.
struct ControllerVisual {
    model: Option<AssetHandle<Model>>,
    is_fallback: bool,
}

/// The input visual system: resolves, caches, and submits the visual
/// representation of both hands each frame.
pub struct InputVisuals {
    render_mode: InputRenderMode,
    hands: [HandVisual; 2],
    controllers: [ControllerVisual; 2],
    model_cache: Assets<Model>,
    defaults: InputDefaults,
    ext: XrExtensions,
}

impl InputVisuals {
    /// Creates the system with the given set of active runtime
    /// capabilities, builds the bundled defaults, and resolves both
    /// controller models.
    pub fn new(ext: XrExtensions) -> Self {
        let defaults = InputDefaults::build();
        let hand_material = defaults.hand_material.clone();
        let mut visuals = Self {
            render_mode: InputRenderMode::default(),
            hands: [
                HandVisual {
                    fallback: HandMeshState::new(ID_MESH_LEFT_HAND),
                    articulated: HandMeshState::new("articulated/mesh_lefthand"),
                    material: None,
                },
                HandVisual {
                    fallback: HandMeshState::new(ID_MESH_RIGHT_HAND),
                    articulated: HandMeshState::new("articulated/mesh_righthand"),
                    material: None,
                },
            ],
            controllers: [
                ControllerVisual {
                    model: None,
                    is_fallback: false,
                },
                ControllerVisual {
                    model: None,
                    is_fallback: false,
                },
            ],
            model_cache: Assets::new(),
            defaults,
            ext,
        };

        visuals.set_hand_material(HandSelect::Both, Some(hand_material));
        // Resolving with no explicit model picks the runtime's model if
        // one is reported, else the bundled default.
        visuals.set_controller_model(HandSelect::Both, None);
        visuals
    }

    /// Returns the active hand render strategy.
    pub fn render_mode(&self) -> InputRenderMode {
        self.render_mode
    }

    /// Selects the hand render strategy.
    pub fn set_render_mode(&mut self, mode: InputRenderMode) {
        self.render_mode = mode;
    }

    /// Assigns the material hands are drawn with. `None` disables hand
    /// mesh rendering for the selected hand(s).
    pub fn set_hand_material(
        &mut self,
        select: HandSelect,
        material: Option<AssetHandle<Material>>,
    ) {
        for &hand in select.hands() {
            let slot = &mut self.hands[hand.index()].material;
            match (&material, &slot) {
                (Some(new), Some(old)) if AssetHandle::ptr_eq(new, old) => {}
                _ => *slot = material.clone(),
            }
        }
    }

    /// Returns the material assigned to a hand.
    pub fn hand_material(&self, hand: Handed) -> Option<AssetHandle<Material>> {
        self.hands[hand.index()].material.clone()
    }

    /// Assigns or resolves the controller model for the selected hand(s).
    ///
    /// Passing `Some(model)` stores the model directly and pins it until
    /// the next explicit call. Passing `None` resolves the model from the
    /// runtime controller-model capability, the cache, or the bundled
    /// default, and marks it for per-frame re-validation.
    pub fn set_controller_model(&mut self, select: HandSelect, model: Option<AssetHandle<Model>>) {
        for &hand in select.hands() {
            match &model {
                Some(explicit) => self.store_controller(hand, explicit.clone(), false),
                None => self.resolve_controller(hand),
            }
        }
    }

    /// Returns the controller model currently assigned to a hand.
    ///
    /// After construction this is never `None`: resolution always lands
    /// on at least the bundled default.
    pub fn controller_model(&self, hand: Handed) -> Option<AssetHandle<Model>> {
        self.controllers[hand.index()].model.clone()
    }

    /// Returns whether a hand's controller model is a fallback that gets
    /// re-validated every rendered frame.
    pub fn is_controller_fallback(&self, hand: Handed) -> bool {
        self.controllers[hand.index()].is_fallback
    }

    /// Regenerates a hand's procedural fallback mesh from the current
    /// finger joints.
    pub fn update_fallback_mesh(&mut self, hand: Handed, tracking: &dyn TrackingProvider) {
        gen_fallback_mesh(
            &tracking.hand(hand).fingers,
            &mut self.hands[hand.index()].fallback,
        );
    }

    /// Early-frame hook. Currently nothing happens before submission.
    pub fn step(&mut self) {}

    /// Late-frame submission: decides each hand's authoritative visual and
    /// queues its draw.
    ///
    /// Skipped entirely when the app is not in foreground focus; an
    /// overlay may be compositing over the app, rendering input visuals
    /// of its own.
    pub fn submit_step(
        &mut self,
        tracking: &dyn TrackingProvider,
        focus: AppFocus,
        queue: &mut RenderQueue,
    ) {
        if focus != AppFocus::Active {
            return;
        }

        for hand in Handed::BOTH {
            if !tracking.hand_visible(hand) {
                continue;
            }
            match tracking.hand_source(hand) {
                HandSource::Articulated => self.submit_articulated(hand, tracking, queue),
                HandSource::Simulated => self.submit_simulated(hand, tracking, queue),
                HandSource::Overridden => self.submit_overridden(hand, tracking, queue),
                HandSource::None => {}
            }
        }
    }

    /// Tears the system down to its neutral state: handles released, mesh
    /// buffers freed, render mode back to the default.
    pub fn shutdown(&mut self) {
        for hand in Handed::BOTH {
            let idx = hand.index();
            self.hands[idx].material = None;
            self.hands[idx].fallback.verts = Vec::new();
            self.hands[idx].fallback.inds = Vec::new();
            self.hands[idx].articulated.verts = Vec::new();
            self.hands[idx].articulated.inds = Vec::new();
            self.controllers[idx].model = None;
            self.controllers[idx].is_fallback = false;
        }
        self.model_cache.clear();
        self.render_mode = InputRenderMode::default();
    }

    // --- Per-source submission ---

    fn submit_articulated(
        &mut self,
        hand: Handed,
        tracking: &dyn TrackingProvider,
        queue: &mut RenderQueue,
    ) {
        let state = *tracking.hand(hand);
        if !state.tracked_state.is_active() {
            return;
        }
        let idx = hand.index();
        let Some(material) = self.hands[idx].material.clone() else {
            return;
        };

        // Prefer the runtime's articulated mesh when the capability is
        // active; otherwise synthesize the fallback.
        let active = if let Some(articulated) = self.ext.articulated_mesh.as_deref() {
            articulated.update_system_mesh(hand, &mut self.hands[idx].articulated);
            &self.hands[idx].articulated
        } else {
            if self.render_mode != InputRenderMode::HandFallback {
                return;
            }
            gen_fallback_mesh(&state.fingers, &mut self.hands[idx].fallback);
            &self.hands[idx].fallback
        };

        queue.add_mesh(
            active.mesh.clone(),
            material,
            active.root_transform,
            pinch_tint(state.pinch_state),
        );
    }

    fn submit_simulated(
        &mut self,
        hand: Handed,
        tracking: &dyn TrackingProvider,
        queue: &mut RenderQueue,
    ) {
        let control = *tracking.controller(hand);
        if !control.tracked.is_active() {
            return;
        }
        let idx = hand.index();
        if self.controllers[idx].model.is_none() {
            return;
        }
        // A fallback model may be superseded by a late runtime report, so
        // it is re-resolved on every frame it is drawn.
        if self.controllers[idx].is_fallback {
            self.resolve_controller(hand);
        }
        if let Some(model) = self.controllers[idx].model.clone() {
            queue.add_model(model, control.pose.to_matrix());
        }
    }

    fn submit_overridden(
        &mut self,
        hand: Handed,
        tracking: &dyn TrackingProvider,
        queue: &mut RenderQueue,
    ) {
        let state = *tracking.hand(hand);
        if !state.tracked_state.is_active() {
            return;
        }
        let idx = hand.index();
        let Some(material) = self.hands[idx].material.clone() else {
            return;
        };
        if self.render_mode != InputRenderMode::HandFallback {
            return;
        }

        // Overridden sources never use the articulated path: the override
        // data only carries joints.
        gen_fallback_mesh(&state.fingers, &mut self.hands[idx].fallback);
        let fallback = &self.hands[idx].fallback;
        queue.add_mesh(
            fallback.mesh.clone(),
            material,
            fallback.root_transform,
            pinch_tint(state.pinch_state),
        );
    }

    // --- Model resolution ---

    /// Resolves the controller model for `hand` from the runtime, the
    /// cache, or the bundled default, and stores it as a fallback.
    fn resolve_controller(&mut self, hand: Handed) {
        let resolved = self.resolved_model_for(hand);
        self.store_controller(hand, resolved, true);
    }

    fn resolved_model_for(&mut self, hand: Handed) -> AssetHandle<Model> {
        let Some(provider) = self.ext.controller_model.as_deref() else {
            return self.default_model(hand).clone();
        };
        let Some(key) = provider.model_key(hand.user_path()) else {
            return self.default_model(hand).clone();
        };

        let key_str = key.to_string();
        if let Some(cached) = self.model_cache.find(&key_str) {
            return cached.clone();
        }

        match load_runtime_model(provider, hand, key, &key_str) {
            Ok(model) => {
                let handle = AssetHandle::new(model);
                self.model_cache.insert(key_str, handle.clone());
                handle
            }
            Err(err) => {
                // Degrading is the designed behavior here: a usable
                // visual must always exist.
                log::debug!(
                    "Controller model load failed for {}, using default: {err}",
                    hand.user_path()
                );
                self.default_model(hand).clone()
            }
        }
    }

    fn default_model(&self, hand: Handed) -> &AssetHandle<Model> {
        match hand {
            Handed::Left => &self.defaults.controller_left,
            Handed::Right => &self.defaults.controller_right,
        }
    }

    /// Stores a controller model handle, skipping the replacement when
    /// the new handle already is the stored one.
    fn store_controller(&mut self, hand: Handed, model: AssetHandle<Model>, is_fallback: bool) {
        let slot = &mut self.controllers[hand.index()];
        slot.is_fallback = is_fallback;
        if let Some(current) = &slot.model {
            if AssetHandle::ptr_eq(current, &model) {
                return;
            }
        }
        slot.model = Some(model);
    }
}

/// Loads and prepares a model reported by the controller-model capability.
fn load_runtime_model(
    provider: &dyn ControllerModelProvider,
    hand: Handed,
    key: ModelKey,
    key_str: &str,
) -> Result<Model, ModelLoadError> {
    let size = provider.buffer_size(key).map_err(ModelLoadError::Query)?;
    let mut buffer = vec![0u8; size];
    let used = provider
        .fill_buffer(key, &mut buffer)
        .map_err(ModelLoadError::Fill)?;
    buffer.truncate(used);

    let label = match hand {
        Handed::Left => format!("msft/controller_l_{key_str}.glb"),
        Handed::Right => format!("msft/controller_r_{key_str}.glb"),
    };
    let mut model = Model::from_binary(&label, buffer).map_err(ModelLoadError::Construct)?;
    // Runtime models face the user; rotate 180 degrees to align with the
    // hand holding them.
    model.set_root_transform(model.root_transform() * Mat4::from_rotation_y(PI));
    model.set_id(key_str);
    Ok(model)
}

#[derive(Debug)]
enum ModelLoadError {
    Query(XrCapabilityError),
    Fill(XrCapabilityError),
    Construct(aster_core::asset::AssetError),
}

impl std::fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelLoadError::Query(err) => write!(f, "buffer size query failed: {err}"),
            ModelLoadError::Fill(err) => write!(f, "buffer fill failed: {err}"),
            ModelLoadError::Construct(err) => write!(f, "model construction failed: {err}"),
        }
    }
}

/// The brightness tint for a hand mesh draw: 1.5x while pinching.
fn pinch_tint(pinch: ButtonState) -> LinearRgba {
    if pinch.is_active() {
        LinearRgba::new(1.5, 1.5, 1.5, 1.0)
    } else {
        LinearRgba::new(1.0, 1.0, 1.0, 1.0)
    }
}
