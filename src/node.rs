//! The render node abstraction and its two child-holding shapes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bounds::Aabb;
use crate::frame::FrameContext;
use crate::scope::Scope;

/// An executable unit of the render graph.
///
/// A frame is rendered by calling [`execute`](Self::execute) on the
/// graph's root; execution recurses depth-first, synchronously, and runs
/// to completion. A node that wants to mutate the environment pushes a
/// child [`Scope`] and hands that to its callee(s), so siblings and the
/// caller never observe its bindings.
///
/// The bounds methods exist for spatial culling. The defaults — an empty
/// box and "never changed" — suit nodes that wrap no geometry; nodes with
/// children usually delegate through [`Callee`] or [`Fanout`] instead.
///
/// # Implementing
///
/// ```
/// use phalanx::{FrameContext, RenderNode, Scope, keys};
/// use phalanx::Vec4;
///
/// /// Tints everything below it.
/// struct Tint {
///     color: Vec4,
///     child: phalanx::Callee,
/// }
///
/// impl RenderNode for Tint {
///     fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
///         let mut tinted = scope.child();
///         tinted.set(keys::LIGHT_COLOR, self.color);
///         self.child.execute(ctx, &tinted);
///     }
/// }
/// ```
pub trait RenderNode {
    /// Runs this node for the current pass.
    ///
    /// Mutations of the environment go into a freshly pushed child scope,
    /// never into `scope` itself.
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>);

    /// Axis-aligned bounds of this node's subtree, or the empty box when
    /// it wraps nothing drawable.
    fn bounds(&self) -> Aabb {
        Aabb::EMPTY
    }

    /// Whether this subtree's bounds could have changed at or after the
    /// given frame stamp.
    fn bounds_changed_since(&self, _frame: u64) -> bool {
        false
    }
}

/// Shared handle to a node in the graph.
///
/// The render manager's registry owns every node for the engine's
/// lifetime; parents hold `NodeRef` clones of their children, so the graph
/// can be edited without invalidating anything. The graph must stay a
/// DAG — a reference cycle is a programming error, not a runtime-checked
/// condition.
pub type NodeRef = Rc<RefCell<dyn RenderNode>>;

/// The single-callee shape: zero or one child.
///
/// Embedded by every node kind that delegates to at most one child. An
/// absent child makes the owning node an inert pass-through, which some
/// nodes use to mean "disabled". Bounds queries delegate to the child or
/// answer empty/false when there is none.
#[derive(Default)]
pub struct Callee {
    child: Option<NodeRef>,
}

impl Callee {
    /// No child; the owning node is inert.
    pub fn none() -> Self {
        Self::default()
    }

    /// Delegates to `child`.
    pub fn to(child: NodeRef) -> Self {
        Callee { child: Some(child) }
    }

    /// Replaces the child. `None` detaches it.
    pub fn set(&mut self, child: Option<NodeRef>) {
        self.child = child;
    }

    /// Whether a child is attached.
    pub fn is_attached(&self) -> bool {
        self.child.is_some()
    }

    /// Executes the child if one is attached; no-op otherwise.
    pub fn execute(&self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        if let Some(child) = &self.child {
            child.borrow_mut().execute(ctx, scope);
        }
    }

    /// The child's bounds, or the empty box.
    pub fn bounds(&self) -> Aabb {
        match &self.child {
            Some(child) => child.borrow().bounds(),
            None => Aabb::EMPTY,
        }
    }

    /// The child's answer, or `false` without a child.
    pub fn bounds_changed_since(&self, frame: u64) -> bool {
        match &self.child {
            Some(child) => child.borrow().bounds_changed_since(frame),
            None => false,
        }
    }
}

/// The multiple-callee shape: an ordered list of children that all always
/// execute.
///
/// Fan-out, not selection — there is no early exit and no skipping here;
/// gating belongs to dedicated nodes. Bounds are the union over children,
/// change queries the OR.
#[derive(Default)]
pub struct Fanout {
    children: Vec<NodeRef>,
}

impl Fanout {
    /// An empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child; children execute in insertion order.
    pub fn push(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether there are no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Executes every child, in order, with the same scope.
    pub fn execute(&self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        for child in &self.children {
            child.borrow_mut().execute(ctx, scope);
        }
    }

    /// Union of the children's bounds.
    pub fn bounds(&self) -> Aabb {
        let mut out = Aabb::EMPTY;
        for child in &self.children {
            out = out.union(&child.borrow().bounds());
        }
        out
    }

    /// Whether any child's bounds could have changed since `frame`.
    pub fn bounds_changed_since(&self, frame: u64) -> bool {
        self.children
            .iter()
            .any(|child| child.borrow().bounds_changed_since(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::FixedAssets;
    use crate::assets::GpuResourceId;
    use crate::frame::Viewport;
    use crate::queue::DrawQueue;
    use glam::Vec3;

    struct Probe {
        runs: u32,
        bounds: Aabb,
    }

    impl Probe {
        fn shared(bounds: Aabb) -> Rc<RefCell<Probe>> {
            Rc::new(RefCell::new(Probe { runs: 0, bounds }))
        }
    }

    impl RenderNode for Probe {
        fn execute(&mut self, _ctx: &mut FrameContext<'_>, _scope: &Scope<'_>) {
            self.runs += 1;
        }

        fn bounds(&self) -> Aabb {
            self.bounds
        }
    }

    fn with_ctx(f: impl FnOnce(&mut FrameContext<'_>)) {
        let assets = FixedAssets::new(GpuResourceId(0));
        let mut queue = DrawQueue::new();
        let mut ctx = FrameContext {
            frame: 1,
            viewport: Viewport::new(64, 64),
            assets: &assets,
            queue: &mut queue,
        };
        f(&mut ctx);
    }

    #[test]
    fn detached_callee_is_inert() {
        let callee = Callee::none();
        with_ctx(|ctx| callee.execute(ctx, &Scope::root()));
        assert!(callee.bounds().is_empty());
        assert!(!callee.bounds_changed_since(0));
    }

    #[test]
    fn callee_delegates_execution_and_bounds() {
        let probe = Probe::shared(Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE));
        let callee = Callee::to(probe.clone());

        with_ctx(|ctx| callee.execute(ctx, &Scope::root()));
        assert_eq!(probe.borrow().runs, 1);
        assert_eq!(callee.bounds().max, Vec3::ONE);
    }

    #[test]
    fn fanout_runs_every_child_unconditionally() {
        let a = Probe::shared(Aabb::EMPTY);
        let b = Probe::shared(Aabb::EMPTY);
        let mut fanout = Fanout::new();
        fanout.push(a.clone());
        fanout.push(b.clone());

        with_ctx(|ctx| {
            fanout.execute(ctx, &Scope::root());
            fanout.execute(ctx, &Scope::root());
        });
        assert_eq!(a.borrow().runs, 2);
        assert_eq!(b.borrow().runs, 2);
    }

    #[test]
    fn fanout_bounds_are_the_union() {
        let a = Probe::shared(Aabb::from_min_max(Vec3::ZERO, Vec3::ONE));
        let b = Probe::shared(Aabb::from_min_max(Vec3::splat(-2.0), Vec3::splat(-1.0)));
        let mut fanout = Fanout::new();
        fanout.push(a);
        fanout.push(b);

        let bounds = fanout.bounds();
        assert_eq!(bounds.min, Vec3::splat(-2.0));
        assert_eq!(bounds.max, Vec3::ONE);
    }
}
