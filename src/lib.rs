//! # Phalanx
//!
//! **A composable render-function graph with scoped variable environments.**
//!
//! A frame is a function: the graph's root executes once per pass,
//! recursing depth-first through nodes that bind matrices, lights,
//! textures, and skeletal poses into a chain of scoped environments, and
//! only the subtrees that pass visibility and frustum tests submit draw
//! work. GPU command submission, window management, and asset file
//! parsing stay outside, behind small collaborator traits.
//!
//! ## Quick start
//!
//! ```
//! use phalanx::*;
//!
//! let mut manager = RenderManager::new();
//!
//! // A cube leaf, moved up one unit, inside a culled scene.
//! let leaf = manager.register(GeometryLeaf::new(
//!     NameHash::of("meshes/cube"),
//!     Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5)),
//! ));
//! let lifted = manager.register(TransformNode::with_child(
//!     Mat4::from_translation(Vec3::Y),
//!     leaf,
//! ));
//! let mut scene = FlatScene::new();
//! scene.add(lifted);
//! let scene = manager.register(scene);
//! manager.set_root(scene);
//!
//! // Each frame: advance the counter, run one pass per view.
//! let assets = FixedAssets::new(GpuResourceId(0));
//! let mut queue = DrawQueue::new();
//! manager.begin_frame();
//! manager.render_pass(
//!     &RenderView {
//!         viewport: Viewport::new(1280, 720),
//!         projection: Mat4::perspective_rh_gl(1.0, 16.0 / 9.0, 0.1, 100.0),
//!         view: Mat4::look_at_rh(Vec3::new(0.0, 1.0, 8.0), Vec3::ZERO, Vec3::Y),
//!     },
//!     &assets,
//!     &mut queue,
//! );
//! assert_eq!(queue.len(), 1);
//! ```
//!
//! ## Philosophy
//!
//! - **Two primitives** — Node composition and scoped variable binding;
//!   every subsystem (lighting, skinning, texture streaming, culling)
//!   plugs in through the same pair.
//! - **Dynamic scoping, value semantics** — A descendant can introduce,
//!   override, or hide any named value; ancestors and siblings never
//!   notice.
//! - **The backend is someone else's problem** — The graph produces
//!   [`DrawCall`]s and consumes opaque [`GpuResourceId`]s; nothing here
//!   touches a GPU API.

mod assets;
mod bounds;
mod frame;
mod hash;
pub mod keys;
mod logging;
mod manager;
mod node;
mod nodes;
mod queue;
mod scope;
mod value;

pub use assets::{Asset, AssetProvider, FixedAssets, GpuResourceId};
pub use bounds::{Aabb, Frustum, Obb, Plane};
pub use frame::{FrameContext, RenderView, Viewport};
pub use hash::NameHash;
pub use logging::init_logging;
pub use manager::RenderManager;
pub use node::{Callee, Fanout, NodeRef, RenderNode};
pub use nodes::{
    ApplyTextures, DirectionalLight, FlatScene, GeometryLeaf, Group, Joint, LeafId, Pose,
    RequestOutput, SetupLight, Skeleton, SkeletonError, SkeletonNode, TransformNode, Visibility,
};
pub use queue::{DrawCall, DrawQueue};
pub use scope::Scope;
pub use value::{BlendMode, ScopeValue, Value};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
