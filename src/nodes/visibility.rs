//! Object-level show/hide gate.

use crate::bounds::Aabb;
use crate::frame::FrameContext;
use crate::node::{Callee, NodeRef, RenderNode};
use crate::scope::Scope;

/// Skips its entire subtree while the flag is false.
///
/// The gate binds nothing: when visible it forwards the caller's scope to
/// the child untouched, and when hidden the child is simply never invoked
/// this frame — zero calls reach any descendant. The flag is toggled
/// externally between frames via [`set_visible`](Self::set_visible); it is
/// not safe to flip concurrently with an in-flight traversal.
pub struct Visibility {
    visible: bool,
    child: Callee,
}

impl Visibility {
    /// Creates a visible gate with no child attached.
    pub fn new() -> Self {
        Visibility {
            visible: true,
            child: Callee::none(),
        }
    }

    /// Creates a visible gate delegating to `child`.
    pub fn with_child(child: NodeRef) -> Self {
        Visibility {
            visible: true,
            child: Callee::to(child),
        }
    }

    /// Attaches or detaches the child.
    pub fn set_child(&mut self, child: Option<NodeRef>) {
        self.child.set(child);
    }

    /// Whether the subtree currently executes.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the subtree starting with the next traversal.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderNode for Visibility {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        if !self.visible {
            return;
        }
        self.child.execute(ctx, scope);
    }

    fn bounds(&self) -> Aabb {
        self.child.bounds()
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.child.bounds_changed_since(frame)
    }
}
