//! Model-matrix composition.

use glam::Mat4;

use crate::bounds::{Aabb, Obb};
use crate::frame::FrameContext;
use crate::keys;
use crate::node::{Callee, NodeRef, RenderNode};
use crate::scope::Scope;

/// Multiplies the current model-matrix binding by its own transform.
///
/// The node binds [`keys::MODEL_MATRIX`] in a pushed scope — copying the
/// ancestor's matrix down, or starting from identity at the top of the
/// graph — and right-multiplies its own matrix, so chained transforms
/// compose as `parent * A * B`.
///
/// The matrix is edited between frames via [`set_matrix`](Self::set_matrix),
/// which records the frame stamp of the change; that stamp is what
/// [`bounds_changed_since`](RenderNode::bounds_changed_since) compares
/// against, OR-ed with the child's own answer.
///
/// Bounds pass through the oriented-box intermediate: the child's
/// axis-aligned box is carried oriented under this node's matrix and only
/// re-expanded to axis-aligned at the end, so the box is not over-grown.
pub struct TransformNode {
    matrix: Mat4,
    changed_at: u64,
    child: Callee,
}

impl TransformNode {
    /// Creates a transform with no child attached.
    pub fn new(matrix: Mat4) -> Self {
        TransformNode {
            matrix,
            changed_at: 0,
            child: Callee::none(),
        }
    }

    /// Creates a transform delegating to `child`.
    pub fn with_child(matrix: Mat4, child: NodeRef) -> Self {
        TransformNode {
            matrix,
            changed_at: 0,
            child: Callee::to(child),
        }
    }

    /// Attaches or detaches the child.
    pub fn set_child(&mut self, child: Option<NodeRef>) {
        self.child.set(child);
    }

    /// The node's own matrix.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Replaces the matrix, recording `frame` as the moment the subtree's
    /// bounds may have changed.
    ///
    /// Call between frames with the manager's current stamp; not safe to
    /// call concurrently with an in-flight traversal.
    pub fn set_matrix(&mut self, matrix: Mat4, frame: u64) {
        self.matrix = matrix;
        self.changed_at = frame;
    }
}

impl RenderNode for TransformNode {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        let mut moved = scope.child();
        let model = moved.bind::<Mat4>(keys::MODEL_MATRIX);
        *model = *model * self.matrix;
        self.child.execute(ctx, &moved);
    }

    fn bounds(&self) -> Aabb {
        Obb::from_aabb(self.child.bounds())
            .transformed(self.matrix)
            .to_aabb()
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.changed_at >= frame || self.child.bounds_changed_since(frame)
    }
}
