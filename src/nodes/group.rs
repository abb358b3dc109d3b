//! Fan-out of one incoming state to several consumers.

use crate::bounds::Aabb;
use crate::frame::FrameContext;
use crate::node::{Fanout, NodeRef, RenderNode};
use crate::scope::Scope;

/// Executes every child with the caller's environment, unchanged.
///
/// The demultiplexer of the graph: when one incoming state (a camera
/// setup, a bound light) must reach several independent consumers, a
/// `Group` forwards the same scope to all of them, in insertion order,
/// unconditionally. It binds nothing of its own, so the children see
/// exactly what the group's caller saw.
///
/// # Example
///
/// ```
/// use phalanx::{Group, RenderManager};
///
/// let mut manager = RenderManager::new();
/// let left = manager.register(Group::new());
/// let right = manager.register(Group::new());
///
/// let mut split = Group::new();
/// split.add(left);
/// split.add(right);
/// ```
#[derive(Default)]
pub struct Group {
    children: Fanout,
}

impl Group {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child. Children execute in insertion order.
    pub fn add(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl RenderNode for Group {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        self.children.execute(ctx, scope);
    }

    fn bounds(&self) -> Aabb {
        self.children.bounds()
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.children.bounds_changed_since(frame)
    }
}
