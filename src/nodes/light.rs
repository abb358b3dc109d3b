//! Blend mode and directional light setup.

use glam::{Vec3, Vec4};

use crate::bounds::Aabb;
use crate::frame::FrameContext;
use crate::keys;
use crate::node::{Callee, NodeRef, RenderNode};
use crate::scope::Scope;
use crate::value::BlendMode;

/// One directional light: a direction and an RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec4,
}

/// Sets the blend mode unconditionally, and a directional light when one
/// is configured.
///
/// The "always set some defaults, optionally set more" node: every
/// subtree below it gets a definite [`keys::BLEND_MODE`], while
/// [`keys::LIGHT_DIRECTION`] and [`keys::LIGHT_COLOR`] are only bound
/// when a light is present — descendants probe for them with
/// [`Scope::has`] and fall back to unlit rendering otherwise.
pub struct SetupLight {
    blend: BlendMode,
    light: Option<DirectionalLight>,
    child: Callee,
}

impl SetupLight {
    /// Creates an unlit, opaque setup with no child attached.
    pub fn new() -> Self {
        SetupLight {
            blend: BlendMode::Opaque,
            light: None,
            child: Callee::none(),
        }
    }

    /// Creates a setup delegating to `child`.
    pub fn with_child(child: NodeRef) -> Self {
        SetupLight {
            blend: BlendMode::Opaque,
            light: None,
            child: Callee::to(child),
        }
    }

    /// Attaches or detaches the child.
    pub fn set_child(&mut self, child: Option<NodeRef>) {
        self.child.set(child);
    }

    /// Sets the blend mode bound below this node.
    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    /// Configures the directional light; `None` leaves the subtree unlit.
    pub fn set_light(&mut self, light: Option<DirectionalLight>) {
        self.light = light;
    }
}

impl Default for SetupLight {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderNode for SetupLight {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        let mut lit = scope.child();
        lit.set(keys::BLEND_MODE, self.blend);
        if let Some(light) = self.light {
            lit.set(keys::LIGHT_DIRECTION, light.direction);
            lit.set(keys::LIGHT_COLOR, light.color);
        }
        self.child.execute(ctx, &lit);
    }

    fn bounds(&self) -> Aabb {
        self.child.bounds()
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.child.bounds_changed_since(frame)
    }
}
