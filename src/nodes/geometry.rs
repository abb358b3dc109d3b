//! The drawable leaf: where the environment becomes a draw call.

use glam::Mat4;

use crate::bounds::Aabb;
use crate::frame::FrameContext;
use crate::hash::NameHash;
use crate::keys;
use crate::node::RenderNode;
use crate::queue::DrawCall;
use crate::scope::Scope;

/// A leaf node wrapping one piece of drawable geometry.
///
/// On execution the leaf acquires its mesh from the asset provider (best
/// currently available resource, never blocking), reads the model matrix
/// visible in the environment — a required value; executing a leaf with
/// no model matrix anywhere upstream is a contract violation — and
/// submits a [`DrawCall`].
///
/// Uniform forwarding is opt-in per key: keys registered with
/// [`forward_uniform`](Self::forward_uniform) are copied into the draw
/// call *when present*. Absence is deliberate here, not an error — a bone
/// palette only exists under an active skeleton, a texture binding only
/// under an `ApplyTextures`, and the same leaf is reusable under both
/// configurations.
///
/// The leaf's bounds are its own local-space box; transform nodes above
/// it reorient them on the way up. [`set_local_bounds`](Self::set_local_bounds)
/// records the frame stamp of the change for `bounds_changed_since`.
pub struct GeometryLeaf {
    mesh: NameHash,
    lod: u32,
    local_bounds: Aabb,
    changed_at: u64,
    forwarded: Vec<NameHash>,
}

impl GeometryLeaf {
    /// Creates a leaf for the named mesh asset with the given local
    /// bounds.
    pub fn new(mesh: NameHash, local_bounds: Aabb) -> Self {
        GeometryLeaf {
            mesh,
            lod: 0,
            local_bounds,
            changed_at: 0,
            forwarded: Vec::new(),
        }
    }

    /// Level of detail requested when acquiring the mesh.
    pub fn set_lod(&mut self, lod: u32) {
        self.lod = lod;
    }

    /// Registers an environment key to forward into draw calls when it
    /// is visible at this leaf.
    pub fn forward_uniform(&mut self, key: NameHash) {
        self.forwarded.push(key);
    }

    /// Replaces the local bounds, recording `frame` as the moment they
    /// changed.
    pub fn set_local_bounds(&mut self, bounds: Aabb, frame: u64) {
        self.local_bounds = bounds;
        self.changed_at = frame;
    }
}

impl RenderNode for GeometryLeaf {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        let model = scope.get::<Mat4>(keys::MODEL_MATRIX);
        let mesh = ctx.assets.asset(self.mesh).acquire(self.lod);

        let mut uniforms = Vec::with_capacity(self.forwarded.len());
        for &key in &self.forwarded {
            if let Some(value) = scope.lookup(key) {
                uniforms.push((key, value.clone()));
            }
        }

        ctx.queue.submit(DrawCall {
            mesh,
            model,
            uniforms,
        });
    }

    fn bounds(&self) -> Aabb {
        self.local_bounds
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.changed_at >= frame
    }
}
