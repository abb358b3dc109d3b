//! Skeletal pose binding.
//!
//! A skeleton is a parent-indexed joint hierarchy with one inverse
//! bind-pose matrix per joint. A pose holds one local transform per joint;
//! flattening the hierarchy gives each joint's absolute transform, and the
//! skin matrix is the standard `absolute * inverse_bind` — it maps a
//! vertex from bind pose into the current animated pose. The node binds
//! the resulting palette under [`keys::BONES`] while active and changes
//! nothing otherwise.

use glam::Mat4;
use thiserror::Error;

use crate::bounds::Aabb;
use crate::frame::FrameContext;
use crate::keys;
use crate::node::{Callee, NodeRef, RenderNode};
use crate::scope::Scope;

/// Skeleton construction and pose validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkeletonError {
    /// A joint referenced a parent at or after its own index. Parents
    /// must precede children so the hierarchy flattens in one pass.
    #[error("joint {joint} references parent {parent}, which does not precede it")]
    ParentOutOfOrder { joint: usize, parent: usize },

    /// A pose's joint count differs from the skeleton's.
    #[error("pose has {pose} joints, skeleton has {skeleton}")]
    JointCountMismatch { pose: usize, skeleton: usize },
}

/// One joint: its parent (or `None` for a root) and its inverse
/// bind-pose matrix.
#[derive(Clone, Copy, Debug)]
pub struct Joint {
    pub parent: Option<usize>,
    pub inverse_bind: Mat4,
}

impl Joint {
    /// A root joint with the given inverse bind pose.
    pub fn root(inverse_bind: Mat4) -> Self {
        Joint {
            parent: None,
            inverse_bind,
        }
    }

    /// A child of `parent` with the given inverse bind pose.
    pub fn child_of(parent: usize, inverse_bind: Mat4) -> Self {
        Joint {
            parent: Some(parent),
            inverse_bind,
        }
    }
}

/// A parent-indexed joint hierarchy.
#[derive(Clone, Debug)]
pub struct Skeleton {
    joints: Vec<Joint>,
}

impl Skeleton {
    /// Builds a skeleton, checking that every parent precedes its
    /// children.
    pub fn new(joints: Vec<Joint>) -> Result<Self, SkeletonError> {
        for (index, joint) in joints.iter().enumerate() {
            if let Some(parent) = joint.parent {
                if parent >= index {
                    return Err(SkeletonError::ParentOutOfOrder {
                        joint: index,
                        parent,
                    });
                }
            }
        }
        Ok(Skeleton { joints })
    }

    /// Number of joints.
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Computes the skin-matrix palette for `pose`.
    ///
    /// Each joint's local transform is composed onto its parent's
    /// absolute transform (identity for roots), then premultiplied onto
    /// the joint's inverse bind pose.
    pub fn skin_palette(&self, pose: &Pose) -> Result<Vec<Mat4>, SkeletonError> {
        if pose.locals.len() != self.joints.len() {
            return Err(SkeletonError::JointCountMismatch {
                pose: pose.locals.len(),
                skeleton: self.joints.len(),
            });
        }
        let mut absolutes = Vec::with_capacity(self.joints.len());
        for (joint, local) in self.joints.iter().zip(&pose.locals) {
            let parent = match joint.parent {
                // Parents precede children, so this index is flattened.
                Some(parent) => absolutes[parent],
                None => Mat4::IDENTITY,
            };
            absolutes.push(parent * *local);
        }
        Ok(self
            .joints
            .iter()
            .zip(&absolutes)
            .map(|(joint, absolute)| *absolute * joint.inverse_bind)
            .collect())
    }
}

/// Per-joint local transforms for one animation frame.
#[derive(Clone, Debug)]
pub struct Pose {
    locals: Vec<Mat4>,
}

impl Pose {
    /// The rest pose: identity locals for `joint_count` joints.
    pub fn identity(joint_count: usize) -> Self {
        Pose {
            locals: vec![Mat4::IDENTITY; joint_count],
        }
    }

    /// Number of joints this pose covers.
    pub fn joint_count(&self) -> usize {
        self.locals.len()
    }

    /// Replaces one joint's local transform.
    ///
    /// # Panics
    ///
    /// Panics if `joint` is out of range; joints cannot be added or
    /// removed through a pose.
    pub fn set_local(&mut self, joint: usize, local: Mat4) {
        self.locals[joint] = local;
    }
}

/// Binds the skinning palette for an animated subtree.
///
/// While active, the node computes the skin matrices for its current pose
/// and binds them under [`keys::BONES`] in a pushed scope; while inactive
/// it forwards the caller's scope untouched. The pose is updated between
/// frames via [`set_pose`](Self::set_pose), which validates the joint
/// count once so execution never has to.
pub struct SkeletonNode {
    skeleton: Skeleton,
    pose: Pose,
    active: bool,
    child: Callee,
}

impl SkeletonNode {
    /// Creates an active node in the rest pose, with no child attached.
    pub fn new(skeleton: Skeleton) -> Self {
        let pose = Pose::identity(skeleton.joint_count());
        SkeletonNode {
            skeleton,
            pose,
            active: true,
            child: Callee::none(),
        }
    }

    /// Creates an active node in the rest pose, delegating to `child`.
    pub fn with_child(skeleton: Skeleton, child: NodeRef) -> Self {
        let mut node = Self::new(skeleton);
        node.child = Callee::to(child);
        node
    }

    /// Attaches or detaches the child.
    pub fn set_child(&mut self, child: Option<NodeRef>) {
        self.child.set(child);
    }

    /// Enables or disables the palette binding.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Replaces the current pose.
    pub fn set_pose(&mut self, pose: Pose) -> Result<(), SkeletonError> {
        if pose.joint_count() != self.skeleton.joint_count() {
            return Err(SkeletonError::JointCountMismatch {
                pose: pose.joint_count(),
                skeleton: self.skeleton.joint_count(),
            });
        }
        self.pose = pose;
        Ok(())
    }
}

impl RenderNode for SkeletonNode {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        if !self.active {
            self.child.execute(ctx, scope);
            return;
        }
        let palette = self
            .skeleton
            .skin_palette(&self.pose)
            .expect("pose joint count is validated on set_pose");
        let mut skinned = scope.child();
        skinned.set(keys::BONES, palette);
        self.child.execute(ctx, &skinned);
    }

    fn bounds(&self) -> Aabb {
        self.child.bounds()
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.child.bounds_changed_since(frame)
    }
}
