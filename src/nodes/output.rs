//! Output declarations for downstream shader generation.

use crate::bounds::Aabb;
use crate::frame::FrameContext;
use crate::hash::NameHash;
use crate::keys;
use crate::node::{Callee, NodeRef, RenderNode};
use crate::scope::Scope;

/// Declares which output variable the subtree is expected to produce.
///
/// Purely a declaration — nothing is computed here. The node binds
/// [`keys::REQUESTED_OUTPUT`] to the requested variable name (the
/// fragment color by default) and flags [`keys::CLIP_POSITION`] as
/// expected, for whatever shader-generation logic runs downstream of the
/// draw queue.
pub struct RequestOutput {
    output: NameHash,
    child: Callee,
}

impl RequestOutput {
    /// Declares the default fragment-color output, no child attached.
    pub fn new() -> Self {
        RequestOutput {
            output: keys::FRAG_COLOR,
            child: Callee::none(),
        }
    }

    /// Declares the default fragment-color output, delegating to `child`.
    pub fn with_child(child: NodeRef) -> Self {
        RequestOutput {
            output: keys::FRAG_COLOR,
            child: Callee::to(child),
        }
    }

    /// Attaches or detaches the child.
    pub fn set_child(&mut self, child: Option<NodeRef>) {
        self.child.set(child);
    }

    /// Requests a different output variable.
    pub fn set_output(&mut self, output: NameHash) {
        self.output = output;
    }
}

impl Default for RequestOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderNode for RequestOutput {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        let mut declared = scope.child();
        declared.set(keys::REQUESTED_OUTPUT, self.output);
        declared.set(keys::CLIP_POSITION, true);
        self.child.execute(ctx, &declared);
    }

    fn bounds(&self) -> Aabb {
        self.child.bounds()
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.child.bounds_changed_since(frame)
    }
}
