//! Brute-force frustum culling over an unordered leaf set.

use std::collections::HashMap;

use glam::Mat4;

use crate::bounds::{Aabb, Frustum};
use crate::frame::FrameContext;
use crate::keys;
use crate::node::{NodeRef, RenderNode};
use crate::scope::Scope;

/// Handle to a node held by a [`FlatScene`].
///
/// Issued by [`FlatScene::add`] and stays valid until
/// [`remove`](FlatScene::remove); removals never disturb other handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LeafId(u64);

/// An unordered collection of nodes, executed under per-frame frustum
/// culling.
///
/// Each execution derives a view frustum from the projection and view
/// matrices visible in the environment and runs only the children whose
/// bounds are not entirely outside it. The test is brute force —
/// O(children) per frame with nothing cached across frames — which is
/// exactly right for the flat scenes this holds; insertion and removal
/// stay O(1) average.
///
/// When either matrix is absent upstream there is nothing meaningful to
/// cull against or render into, so the node exits silently; that is
/// expected early-frame state, not an error, and next frame is a fresh
/// attempt. Children with empty (or unreported) bounds always execute:
/// culling needs positive evidence of being fully outside.
///
/// Execution order across children is unspecified.
#[derive(Default)]
pub struct FlatScene {
    children: HashMap<LeafId, NodeRef>,
    next_id: u64,
}

impl FlatScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its handle.
    pub fn add(&mut self, child: NodeRef) -> LeafId {
        let id = LeafId(self.next_id);
        self.next_id += 1;
        self.children.insert(id, child);
        id
    }

    /// Removes a node by handle, returning it if it was present.
    pub fn remove(&mut self, id: LeafId) -> Option<NodeRef> {
        self.children.remove(&id)
    }

    /// Number of held nodes.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the scene holds nothing.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl RenderNode for FlatScene {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        let (Some(projection), Some(view)) = (
            scope.try_get::<Mat4>(keys::PROJECTION_MATRIX),
            scope.try_get::<Mat4>(keys::VIEW_MATRIX),
        ) else {
            log::debug!("flat scene skipped, projection/view not bound");
            return;
        };
        let frustum = Frustum::from_matrix(projection * view);

        for child in self.children.values() {
            let bounds = child.borrow().bounds();
            if frustum.intersects(&bounds) {
                child.borrow_mut().execute(ctx, scope);
            }
        }
    }

    fn bounds(&self) -> Aabb {
        let mut out = Aabb::EMPTY;
        for child in self.children.values() {
            out = out.union(&child.borrow().bounds());
        }
        out
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.children
            .values()
            .any(|child| child.borrow().bounds_changed_since(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{FixedAssets, GpuResourceId};
    use crate::frame::Viewport;
    use crate::queue::DrawQueue;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CountingLeaf {
        bounds: Aabb,
        runs: u32,
        changed_at: u64,
    }

    impl CountingLeaf {
        fn shared(center: Vec3, half: f32) -> Rc<RefCell<CountingLeaf>> {
            Rc::new(RefCell::new(CountingLeaf {
                bounds: Aabb::from_center_half_extents(center, Vec3::splat(half)),
                runs: 0,
                changed_at: 0,
            }))
        }
    }

    impl RenderNode for CountingLeaf {
        fn execute(&mut self, _: &mut FrameContext<'_>, _: &Scope<'_>) {
            self.runs += 1;
        }

        fn bounds(&self) -> Aabb {
            self.bounds
        }

        fn bounds_changed_since(&self, frame: u64) -> bool {
            self.changed_at >= frame
        }
    }

    fn run(scene: &mut FlatScene, scope: &Scope<'_>) {
        let assets = FixedAssets::new(GpuResourceId(0));
        let mut queue = DrawQueue::new();
        let mut ctx = FrameContext {
            frame: 1,
            viewport: Viewport::new(64, 64),
            assets: &assets,
            queue: &mut queue,
        };
        scene.execute(&mut ctx, scope);
    }

    /// A projection/view pair framing only the +X+Y quadrant around (2, 2).
    fn quadrant_scope() -> Scope<'static> {
        let projection = Mat4::perspective_rh_gl(0.8, 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(2.0, 2.0, 10.0), Vec3::new(2.0, 2.0, 0.0), Vec3::Y);
        let mut scope = Scope::root();
        scope.set(keys::PROJECTION_MATRIX, projection);
        scope.set(keys::VIEW_MATRIX, view);
        scope
    }

    #[test]
    fn culls_fully_outside_children_and_keeps_visible_ones() {
        let outside = CountingLeaf::shared(Vec3::new(-5.0, -5.0, 0.0), 0.1);
        let inside = CountingLeaf::shared(Vec3::new(2.0, 2.0, 0.0), 0.5);

        let mut scene = FlatScene::new();
        scene.add(outside.clone());
        scene.add(inside.clone());

        run(&mut scene, &quadrant_scope());
        assert_eq!(outside.borrow().runs, 0, "fully outside the frustum");
        assert_eq!(inside.borrow().runs, 1);
    }

    #[test]
    fn children_with_empty_bounds_always_execute() {
        let unbounded = Rc::new(RefCell::new(CountingLeaf {
            bounds: Aabb::EMPTY,
            runs: 0,
            changed_at: 0,
        }));
        let mut scene = FlatScene::new();
        scene.add(unbounded.clone());

        run(&mut scene, &quadrant_scope());
        assert_eq!(unbounded.borrow().runs, 1);
    }

    #[test]
    fn missing_matrices_skip_the_scene_silently() {
        let leaf = CountingLeaf::shared(Vec3::ZERO, 1.0);
        let mut scene = FlatScene::new();
        scene.add(leaf.clone());

        run(&mut scene, &Scope::root());
        assert_eq!(leaf.borrow().runs, 0);
    }

    #[test]
    fn removal_stops_execution_without_touching_other_handles() {
        let a = CountingLeaf::shared(Vec3::new(2.0, 2.0, 0.0), 0.5);
        let b = CountingLeaf::shared(Vec3::new(2.0, 2.0, 0.0), 0.5);

        let mut scene = FlatScene::new();
        let id_a = scene.add(a.clone());
        let _id_b = scene.add(b.clone());

        assert!(scene.remove(id_a).is_some());
        assert!(scene.remove(id_a).is_none());
        assert_eq!(scene.len(), 1);

        run(&mut scene, &quadrant_scope());
        assert_eq!(a.borrow().runs, 0);
        assert_eq!(b.borrow().runs, 1);
    }

    #[test]
    fn aggregate_bounds_union_the_children() {
        let a = CountingLeaf::shared(Vec3::ZERO, 1.0);
        let b = CountingLeaf::shared(Vec3::new(10.0, 0.0, 0.0), 1.0);
        let mut scene = FlatScene::new();
        scene.add(a);
        scene.add(b.clone());

        let bounds = scene.bounds();
        assert_eq!(bounds.min.x, -1.0);
        assert_eq!(bounds.max.x, 11.0);

        assert!(!scene.bounds_changed_since(2));
        b.borrow_mut().changed_at = 3;
        assert!(scene.bounds_changed_since(2));
    }
}
