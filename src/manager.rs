//! Graph ownership and per-frame traversal.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;

use crate::assets::AssetProvider;
use crate::frame::{FrameContext, RenderView};
use crate::keys;
use crate::node::{NodeRef, RenderNode};
use crate::queue::DrawQueue;
use crate::scope::Scope;

/// Owns the render graph and drives its traversals.
///
/// Every node is registered here and lives for the manager's lifetime;
/// parents hold clones of the same shared handles, so the graph can be
/// rewired (children attached, detached, moved) between frames without
/// invalidating anything.
///
/// Rendering a frame means [`begin_frame`](Self::begin_frame) once, then
/// [`render_pass`](Self::render_pass) once per pass or eye. Each pass is
/// one synchronous depth-first traversal with its own root scope chain,
/// so concurrent passes never share environment state; node configuration
/// (visibility flags, poses, transforms) is only touched between frames.
///
/// The frame counter is the one piece of cross-frame state. It advances
/// once per frame, and transform-bearing nodes record it when edited so
/// `bounds_changed_since` queries can answer without any cached bounds.
///
/// # Example
///
/// ```
/// use phalanx::*;
///
/// let mut manager = RenderManager::new();
/// let scene = manager.register(FlatScene::new());
/// manager.set_root(scene);
///
/// let assets = FixedAssets::new(GpuResourceId(0));
/// let mut queue = DrawQueue::new();
///
/// manager.begin_frame();
/// manager.render_pass(
///     &RenderView::with_viewport(Viewport::new(1280, 720)),
///     &assets,
///     &mut queue,
/// );
/// ```
#[derive(Default)]
pub struct RenderManager {
    nodes: Vec<NodeRef>,
    root: Option<NodeRef>,
    frame: u64,
}

impl RenderManager {
    /// Creates an empty manager with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a node and returns a shared, typed handle.
    ///
    /// The typed handle is what configuration setters are reached
    /// through between frames; it coerces to [`NodeRef`] wherever a
    /// child reference is needed.
    pub fn register<N: RenderNode + 'static>(&mut self, node: N) -> Rc<RefCell<N>> {
        let node = Rc::new(RefCell::new(node));
        let as_ref: NodeRef = node.clone();
        self.nodes.push(as_ref);
        node
    }

    /// Sets the node traversals start from.
    pub fn set_root(&mut self, root: NodeRef) {
        self.root = Some(root);
    }

    /// The current frame stamp. Pass this to setters that record when a
    /// transform or bounds edit happened.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances the frame counter. Call once per frame, before the
    /// frame's passes.
    pub fn begin_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Runs one full traversal for `view`, submitting draw work into
    /// `queue`.
    ///
    /// The root scope binds an identity model matrix plus the view's
    /// projection and view matrices, then the root executes to
    /// completion. Without a root this is a silent no-op — an unwired
    /// graph is expected setup-time state, not an error.
    pub fn render_pass(
        &mut self,
        view: &RenderView,
        assets: &dyn AssetProvider,
        queue: &mut DrawQueue,
    ) {
        let Some(root) = &self.root else {
            log::debug!("render pass skipped, no root set");
            return;
        };

        let mut scope = Scope::root();
        scope.set(keys::MODEL_MATRIX, Mat4::IDENTITY);
        scope.set(keys::PROJECTION_MATRIX, view.projection);
        scope.set(keys::VIEW_MATRIX, view.view);

        let mut ctx = FrameContext {
            frame: self.frame,
            viewport: view.viewport,
            assets,
            queue,
        };
        root.borrow_mut().execute(&mut ctx, &scope);
        log::trace!(
            "frame {}: pass produced {} draw calls",
            self.frame,
            ctx.queue.len()
        );
    }
}
