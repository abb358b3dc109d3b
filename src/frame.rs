//! Per-traversal context threaded through `execute`.

use glam::Mat4;

use crate::assets::AssetProvider;
use crate::queue::DrawQueue;

/// The target rectangle a pass renders into, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// A viewport anchored at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        Viewport {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// What the render-target provider supplies for one pass: where to render
/// and through which projection/view. The graph only reads these; surface
/// and swapchain management live with the host.
///
/// Stereo rendering runs one pass per eye, each with its own `RenderView`
/// and its own root scope chain.
#[derive(Clone, Copy, Debug)]
pub struct RenderView {
    pub viewport: Viewport,
    pub projection: Mat4,
    pub view: Mat4,
}

impl RenderView {
    /// A view with identity matrices, useful for tests and tools.
    pub fn with_viewport(viewport: Viewport) -> Self {
        RenderView {
            viewport,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        }
    }
}

/// Everything a node can reach besides the scope during one traversal.
///
/// Borrowed for the duration of a single pass, like the render context the
/// graph hands each node in a pass chain: the current frame stamp for
/// bounds-change queries, the viewport, the asset provider, and the draw
/// queue leaves submit into.
pub struct FrameContext<'a> {
    /// Monotonically increasing frame counter, advanced once per frame by
    /// the manager. Comparison against stored stamps answers
    /// `bounds_changed_since`.
    pub frame: u64,
    /// Target rectangle for this pass.
    pub viewport: Viewport,
    /// Asset access for nodes that stream resources while executing.
    pub assets: &'a dyn AssetProvider,
    /// Where surviving leaves deposit their draw work.
    pub queue: &'a mut DrawQueue,
}
