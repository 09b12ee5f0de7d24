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

//! End-to-end tests for the input visual system: model resolution,
//! handle lifecycle, and per-frame render submission.

use std::sync::{Arc, Mutex};

use aster_core::asset::AssetHandle;
use aster_core::input::{
    AppFocus, ButtonState, ControllerState, HandSelect, HandSource, HandState, Handed,
    TrackingProvider,
};
use aster_core::math::{Mat4, PI};
use aster_core::renderer::{DrawItem, Model, RenderQueue};
use aster_core::xr::{ControllerModelProvider, ModelKey, XrCapabilityError, XrExtensions};
use aster_systems::defaults::{ID_CONTROLLER_LEFT, ID_CONTROLLER_RIGHT};
use aster_systems::InputVisuals;
use approx::assert_abs_diff_eq;

// --- Test doubles ---

struct FakeTracking {
    hands: [HandState; 2],
    controllers: [ControllerState; 2],
    sources: [HandSource; 2],
    visible: [bool; 2],
}

impl FakeTracking {
    fn new() -> Self {
        Self {
            hands: [HandState::default(); 2],
            controllers: [ControllerState::default(); 2],
            sources: [HandSource::None; 2],
            visible: [true; 2],
        }
    }

    fn with_simulated(hand: Handed) -> Self {
        let mut tracking = Self::new();
        tracking.sources[hand.index()] = HandSource::Simulated;
        tracking.controllers[hand.index()].tracked = ButtonState::ACTIVE;
        tracking
    }

    fn with_articulated(hand: Handed) -> Self {
        let mut tracking = Self::new();
        tracking.sources[hand.index()] = HandSource::Articulated;
        tracking.hands[hand.index()].tracked_state = ButtonState::ACTIVE;
        tracking
    }
}

impl TrackingProvider for FakeTracking {
    fn hand(&self, hand: Handed) -> &HandState {
        &self.hands[hand.index()]
    }

    fn controller(&self, hand: Handed) -> &ControllerState {
        &self.controllers[hand.index()]
    }

    fn hand_source(&self, hand: Handed) -> HandSource {
        self.sources[hand.index()]
    }

    fn hand_visible(&self, hand: Handed) -> bool {
        self.visible[hand.index()]
    }
}

/// Shared mutable state so tests can change the runtime's reported model
/// after the provider has been boxed into the extension set.
#[derive(Default)]
struct FakeRuntimeModels {
    key: Mutex<Option<u64>>,
    fail_fill: bool,
}

impl FakeRuntimeModels {
    fn with_key(key: u64) -> Arc<Self> {
        Arc::new(Self {
            key: Mutex::new(Some(key)),
            fail_fill: false,
        })
    }

    fn set_key(&self, key: Option<u64>) {
        *self.key.lock().unwrap() = key;
    }

    fn glb_blob() -> Vec<u8> {
        let mut blob = b"glTF".to_vec();
        blob.extend_from_slice(&[0u8; 28]);
        blob
    }
}

/// Local wrapper so the provider trait can be implemented over the shared
/// state the tests keep a handle to.
struct FakeModelProvider(Arc<FakeRuntimeModels>);

impl ControllerModelProvider for FakeModelProvider {
    fn model_key(&self, _hand_path: &str) -> Option<ModelKey> {
        self.0.key.lock().unwrap().map(ModelKey)
    }

    fn buffer_size(&self, _key: ModelKey) -> Result<usize, XrCapabilityError> {
        Ok(FakeRuntimeModels::glb_blob().len())
    }

    fn fill_buffer(&self, _key: ModelKey, buf: &mut [u8]) -> Result<usize, XrCapabilityError> {
        if self.0.fail_fill {
            return Err(XrCapabilityError::RuntimeFailure {
                details: "fill rejected".into(),
            });
        }
        let blob = FakeRuntimeModels::glb_blob();
        buf[..blob.len()].copy_from_slice(&blob);
        Ok(blob.len())
    }
}

fn ext_with(models: Arc<FakeRuntimeModels>) -> XrExtensions {
    XrExtensions {
        controller_model: Some(Box::new(FakeModelProvider(models))),
        articulated_mesh: None,
    }
}

// --- Resolution ---

#[test]
fn new_system_always_has_controller_models() {
    let visuals = InputVisuals::new(XrExtensions::none());
    for hand in Handed::BOTH {
        let model = visuals
            .controller_model(hand)
            .expect("a usable model must always exist");
        let expected = match hand {
            Handed::Left => ID_CONTROLLER_LEFT,
            Handed::Right => ID_CONTROLLER_RIGHT,
        };
        assert_eq!(model.id(), Some(expected));
        assert!(visuals.is_controller_fallback(hand));
    }
}

#[test]
fn runtime_model_resolves_with_cache_id_and_flip() {
    let models = FakeRuntimeModels::with_key(42);
    let visuals = InputVisuals::new(ext_with(models));

    let model = visuals.controller_model(Handed::Left).unwrap();
    assert_eq!(model.id(), Some("42"));
    assert!(model.binary_data().is_some());
    // Runtime models are turned 180 degrees to face away from the user.
    assert_abs_diff_eq!(
        model.root_transform(),
        Mat4::from_rotation_y(PI),
        epsilon = 1e-5
    );
    assert!(visuals.is_controller_fallback(Handed::Left));
}

#[test]
fn both_hands_share_one_cached_model_per_key() {
    let models = FakeRuntimeModels::with_key(7);
    let visuals = InputVisuals::new(ext_with(models));

    let left = visuals.controller_model(Handed::Left).unwrap();
    let right = visuals.controller_model(Handed::Right).unwrap();
    assert!(AssetHandle::ptr_eq(&left, &right));
}

#[test]
fn failed_runtime_load_degrades_to_default() {
    let models = Arc::new(FakeRuntimeModels {
        key: Mutex::new(Some(9)),
        fail_fill: true,
    });
    let visuals = InputVisuals::new(ext_with(models));

    let model = visuals.controller_model(Handed::Left).unwrap();
    assert_eq!(model.id(), Some(ID_CONTROLLER_LEFT));
    assert!(visuals.is_controller_fallback(Handed::Left));
}

// --- Setters ---

#[test]
fn explicit_model_pins_and_clears_fallback_flag() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let custom = AssetHandle::new(Model::placeholder("app/custom"));

    visuals.set_controller_model(HandSelect::Left, Some(custom.clone()));
    assert!(!visuals.is_controller_fallback(Handed::Left));
    assert!(AssetHandle::ptr_eq(
        &visuals.controller_model(Handed::Left).unwrap(),
        &custom
    ));
    // The untouched hand keeps its fallback.
    assert!(visuals.is_controller_fallback(Handed::Right));
}

#[test]
fn reassigning_the_same_model_is_a_no_op() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let custom = AssetHandle::new(Model::placeholder("app/custom"));

    visuals.set_controller_model(HandSelect::Left, Some(custom.clone()));
    let count = AssetHandle::strong_count(&custom);
    visuals.set_controller_model(HandSelect::Left, Some(custom.clone()));
    assert_eq!(AssetHandle::strong_count(&custom), count);
}

#[test]
fn both_selection_equals_left_then_right() {
    let mut both = InputVisuals::new(XrExtensions::none());
    let mut separate = InputVisuals::new(XrExtensions::none());
    let custom = AssetHandle::new(Model::placeholder("app/custom"));

    both.set_controller_model(HandSelect::Both, Some(custom.clone()));
    separate.set_controller_model(HandSelect::Left, Some(custom.clone()));
    separate.set_controller_model(HandSelect::Right, Some(custom.clone()));

    for hand in Handed::BOTH {
        assert!(AssetHandle::ptr_eq(
            &both.controller_model(hand).unwrap(),
            &separate.controller_model(hand).unwrap()
        ));
    }
}

// --- Submission ---

#[test]
fn untracked_hands_draw_nothing() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let mut tracking = FakeTracking::new();
    tracking.sources = [HandSource::Articulated, HandSource::Simulated];
    // tracked_state stays inactive on both sides.
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);
    assert!(queue.is_empty());
}

#[test]
fn background_focus_draws_nothing() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let tracking = FakeTracking::with_simulated(Handed::Right);
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Background, &mut queue);
    assert!(queue.is_empty());
}

#[test]
fn hidden_hand_is_skipped() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let mut tracking = FakeTracking::with_simulated(Handed::Right);
    tracking.visible[Handed::Right.index()] = false;
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);
    assert!(queue.is_empty());
}

#[test]
fn simulated_hand_draws_its_controller_model() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let tracking = FakeTracking::with_simulated(Handed::Right);
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);

    assert_eq!(queue.len(), 1);
    let DrawItem::Model { model, .. } = &queue.items()[0] else {
        panic!("expected a model draw");
    };
    assert_eq!(model.id(), Some(ID_CONTROLLER_RIGHT));
}

#[test]
fn articulated_hand_draws_fallback_mesh_at_unit_tint() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let tracking = FakeTracking::with_articulated(Handed::Left);
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);

    assert_eq!(queue.len(), 1);
    let DrawItem::Mesh { mesh, color, .. } = &queue.items()[0] else {
        panic!("expected a mesh draw");
    };
    let (verts, inds) = mesh.counts();
    assert!(verts > 0 && inds > 0);
    assert_eq!((color.r, color.g, color.b, color.a), (1.0, 1.0, 1.0, 1.0));
}

#[test]
fn pinching_brightens_the_hand() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let mut tracking = FakeTracking::with_articulated(Handed::Left);
    tracking.hands[Handed::Left.index()].pinch_state = ButtonState::ACTIVE;
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);

    let DrawItem::Mesh { color, .. } = &queue.items()[0] else {
        panic!("expected a mesh draw");
    };
    assert_eq!((color.r, color.g, color.b, color.a), (1.5, 1.5, 1.5, 1.0));
}

#[test]
fn no_hand_material_draws_nothing() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    visuals.set_hand_material(HandSelect::Both, None);
    let tracking = FakeTracking::with_articulated(Handed::Left);
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);
    assert!(queue.is_empty());
}

// --- Per-frame re-resolution ---

#[test]
fn fallback_model_upgrades_when_runtime_reports_late() {
    let models = Arc::new(FakeRuntimeModels::default());
    let mut visuals = InputVisuals::new(ext_with(models.clone()));
    assert_eq!(
        visuals.controller_model(Handed::Right).unwrap().id(),
        Some(ID_CONTROLLER_RIGHT)
    );

    // The runtime starts reporting a model mid-session; the next rendered
    // frame picks it up.
    models.set_key(Some(42));
    let tracking = FakeTracking::with_simulated(Handed::Right);
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);

    assert_eq!(
        visuals.controller_model(Handed::Right).unwrap().id(),
        Some("42")
    );
}

#[test]
fn pinned_model_is_never_re_resolved() {
    let models = FakeRuntimeModels::with_key(42);
    let mut visuals = InputVisuals::new(ext_with(models));
    let custom = AssetHandle::new(Model::placeholder("app/custom"));
    visuals.set_controller_model(HandSelect::Right, Some(custom.clone()));

    let tracking = FakeTracking::with_simulated(Handed::Right);
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);

    assert!(AssetHandle::ptr_eq(
        &visuals.controller_model(Handed::Right).unwrap(),
        &custom
    ));
}

#[test]
fn re_resolution_reuses_the_cached_model() {
    let models = FakeRuntimeModels::with_key(42);
    let mut visuals = InputVisuals::new(ext_with(models));
    let first = visuals.controller_model(Handed::Right).unwrap();

    let tracking = FakeTracking::with_simulated(Handed::Right);
    let mut queue = RenderQueue::new();
    visuals.submit_step(&tracking, AppFocus::Active, &mut queue);

    let second = visuals.controller_model(Handed::Right).unwrap();
    assert!(AssetHandle::ptr_eq(&first, &second));
}

// --- Shutdown ---

#[test]
fn shutdown_releases_all_handles() {
    let mut visuals = InputVisuals::new(XrExtensions::none());
    let custom = AssetHandle::new(Model::placeholder("app/custom"));
    visuals.set_controller_model(HandSelect::Both, Some(custom.clone()));
    assert!(AssetHandle::strong_count(&custom) > 1);

    visuals.shutdown();
    assert_eq!(AssetHandle::strong_count(&custom), 1);
    assert!(visuals.controller_model(Handed::Left).is_none());
    assert!(visuals.hand_material(Handed::Left).is_none());
}
