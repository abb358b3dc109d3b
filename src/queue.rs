//! Deferred draw submission filled in during a traversal.

use glam::Mat4;

use crate::assets::GpuResourceId;
use crate::hash::NameHash;
use crate::value::Value;

/// One drawable submitted by a leaf node.
///
/// This is the whole contract between the graph and the GPU backend:
/// which resource to draw, where, and the uniforms the leaf forwarded
/// from its environment. Command encoding is the backend's business.
#[derive(Clone, Debug)]
pub struct DrawCall {
    /// The geometry resource to draw.
    pub mesh: GpuResourceId,
    /// Model (object-to-world) matrix visible at the leaf.
    pub model: Mat4,
    /// Environment values the leaf was configured to forward
    /// (textures, bone palettes, light parameters, ...).
    pub uniforms: Vec<(NameHash, Value)>,
}

/// Accumulates [`DrawCall`]s over one traversal.
///
/// The manager hands a fresh or cleared queue to each pass; leaves that
/// survive visibility and culling push into it, and the host drains it
/// after the pass returns.
#[derive(Default)]
pub struct DrawQueue {
    calls: Vec<DrawCall>,
}

impl DrawQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a draw call for this pass.
    pub fn submit(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    /// The calls submitted so far, in submission order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of calls submitted so far.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Clears the queue for the next pass. Submitted calls are dropped.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}
