//! The concrete node kinds that compose into a render function.
//!
//! Each kind reads or writes a small, documented set of environment keys
//! and delegates to its child(ren); see [`keys`](crate::keys) for the
//! shared vocabulary. Interior nodes mutate the environment through a
//! pushed scope, gates decide whether a subtree runs at all, and leaves
//! turn the visible environment into draw work.

mod flat_scene;
mod geometry;
mod group;
mod light;
mod output;
mod skeleton;
mod textures;
mod transform;
mod visibility;

pub use flat_scene::{FlatScene, LeafId};
pub use geometry::GeometryLeaf;
pub use group::Group;
pub use light::{DirectionalLight, SetupLight};
pub use output::RequestOutput;
pub use skeleton::{Joint, Pose, Skeleton, SkeletonError, SkeletonNode};
pub use textures::ApplyTextures;
pub use transform::TransformNode;
pub use visibility::Visibility;
