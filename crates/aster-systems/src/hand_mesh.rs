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

//! The fallback hand mesh synthesizer.
//!
//! Produces procedural hand geometry from the current finger-joint poses:
//! a ring of vertices per joint, connected into a capped tube per finger.
//! Used whenever no richer runtime mesh is available.

use aster_core::input::tracking::{JointPose, FINGER_COUNT, JOINT_COUNT};
use aster_core::input::HandMeshState;
use aster_core::math::{Color32, Vec2, Vec3, TAU};
use aster_core::renderer::Vertex;

/// Vertices in each joint ring.
const RING: usize = 6;
/// Vertices per finger: one ring per joint plus a tip vertex.
const VERTS_PER_FINGER: usize = JOINT_COUNT * RING + 1;
/// Indices per finger: a quad strip between consecutive rings plus the
/// tip fan.
const INDS_PER_FINGER: usize = (JOINT_COUNT - 1) * RING * 6 + RING * 3;

/// Regenerates `mesh` from the given finger-joint poses and pushes the
/// result to its GPU mesh.
///
/// A pure function of the joint data: safe to call every frame. Topology
/// is fixed, so the index buffer is built once and the vertex buffer is
/// reused without reallocation on subsequent calls.
pub fn gen_fallback_mesh(
    fingers: &[[JointPose; JOINT_COUNT]; FINGER_COUNT],
    mesh: &mut HandMeshState,
) {
    mesh.verts
        .resize(FINGER_COUNT * VERTS_PER_FINGER, Vertex::default());
    if mesh.inds.len() != FINGER_COUNT * INDS_PER_FINGER {
        build_indices(&mut mesh.inds);
    }

    let white = Color32 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    for (f, joints) in fingers.iter().enumerate() {
        let base = f * VERTS_PER_FINGER;
        for (j, joint) in joints.iter().enumerate() {
            // The v coordinate walks the gradient texture from knuckle
            // (0) to tip (1).
            let v = j as f32 / (JOINT_COUNT - 1) as f32;
            for r in 0..RING {
                let angle = r as f32 / RING as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                let radial = joint
                    .orientation
                    .rotate_vec3(Vec3::new(cos, sin, 0.0));
                mesh.verts[base + j * RING + r] = Vertex {
                    pos: joint.position + radial * joint.radius,
                    norm: radial,
                    uv: Vec2::new(r as f32 / RING as f32, v),
                    col: white,
                };
            }
        }
        // Tip vertex, pushed out along the last joint's bone direction.
        let tip = &joints[JOINT_COUNT - 1];
        let forward = tip.orientation.rotate_vec3(Vec3::Z);
        mesh.verts[base + JOINT_COUNT * RING] = Vertex {
            pos: tip.position + forward * tip.radius,
            norm: forward,
            uv: Vec2::new(0.5, 1.0),
            col: white,
        };
    }

    mesh.upload();
}

fn build_indices(inds: &mut Vec<u32>) {
    inds.clear();
    inds.reserve(FINGER_COUNT * INDS_PER_FINGER);
    for f in 0..FINGER_COUNT {
        let base = (f * VERTS_PER_FINGER) as u32;
        for j in 0..JOINT_COUNT - 1 {
            let ring_a = base + (j * RING) as u32;
            let ring_b = base + ((j + 1) * RING) as u32;
            for r in 0..RING as u32 {
                let next = (r + 1) % RING as u32;
                inds.extend_from_slice(&[
                    ring_a + r,
                    ring_b + r,
                    ring_a + next,
                    ring_a + next,
                    ring_b + r,
                    ring_b + next,
                ]);
            }
        }
        let last_ring = base + ((JOINT_COUNT - 1) * RING) as u32;
        let tip = base + (JOINT_COUNT * RING) as u32;
        for r in 0..RING as u32 {
            let next = (r + 1) % RING as u32;
            inds.extend_from_slice(&[last_ring + r, tip, last_ring + next]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand() -> [[JointPose; JOINT_COUNT]; FINGER_COUNT] {
        let mut fingers = [[JointPose::default(); JOINT_COUNT]; FINGER_COUNT];
        for (f, finger) in fingers.iter_mut().enumerate() {
            for (j, joint) in finger.iter_mut().enumerate() {
                joint.position = Vec3::new(f as f32 * 0.02, 0.0, j as f32 * 0.03);
            }
        }
        fingers
    }

    #[test]
    fn test_generates_expected_topology() {
        let mut mesh = HandMeshState::new("test/hand");
        gen_fallback_mesh(&flat_hand(), &mut mesh);
        assert_eq!(mesh.verts.len(), FINGER_COUNT * VERTS_PER_FINGER);
        assert_eq!(mesh.inds.len(), FINGER_COUNT * INDS_PER_FINGER);
        assert_eq!(
            mesh.mesh.counts(),
            (
                FINGER_COUNT * VERTS_PER_FINGER,
                FINGER_COUNT * INDS_PER_FINGER
            )
        );
    }

    #[test]
    fn test_indices_stay_in_bounds() {
        let mut mesh = HandMeshState::new("test/hand");
        gen_fallback_mesh(&flat_hand(), &mut mesh);
        let max = mesh.verts.len() as u32;
        assert!(mesh.inds.iter().all(|&i| i < max));
    }

    #[test]
    fn test_buffers_reused_across_runs() {
        let mut mesh = HandMeshState::new("test/hand");
        gen_fallback_mesh(&flat_hand(), &mut mesh);
        let cap = mesh.verts.capacity();
        let inds_before = mesh.inds.clone();
        let mut moved = flat_hand();
        moved[0][0].position = Vec3::new(1.0, 2.0, 3.0);
        gen_fallback_mesh(&moved, &mut mesh);
        assert_eq!(mesh.verts.capacity(), cap);
        assert_eq!(mesh.inds, inds_before);
    }
}
