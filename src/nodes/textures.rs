//! Texture binding with nested per-pair scopes.

use crate::bounds::Aabb;
use crate::frame::FrameContext;
use crate::hash::NameHash;
use crate::node::{Callee, NodeRef, RenderNode};
use crate::scope::Scope;

/// Binds one texture-handle uniform per registered (variable, asset)
/// pair, then executes the child with all of them visible.
///
/// Each pair is bound in its own nested scope, one frame per pair, rather
/// than flat into a single frame: every bound uniform must stay visible
/// to the uniforms bound after it and to the final child call, and the
/// nesting is what guarantees that ordering. The asset is requested from
/// the provider on every execution, so streaming upgrades (a better LOD
/// arriving) are picked up frame by frame without any notification
/// machinery.
pub struct ApplyTextures {
    pairs: Vec<(NameHash, NameHash)>,
    lod: u32,
    child: Callee,
}

impl ApplyTextures {
    /// Creates a node with no pairs and no child attached.
    pub fn new() -> Self {
        ApplyTextures {
            pairs: Vec::new(),
            lod: 0,
            child: Callee::none(),
        }
    }

    /// Creates a node delegating to `child`.
    pub fn with_child(child: NodeRef) -> Self {
        ApplyTextures {
            pairs: Vec::new(),
            lod: 0,
            child: Callee::to(child),
        }
    }

    /// Attaches or detaches the child.
    pub fn set_child(&mut self, child: Option<NodeRef>) {
        self.child.set(child);
    }

    /// Registers a (uniform variable, texture asset) pair. Pairs bind in
    /// registration order.
    pub fn add(&mut self, variable: NameHash, asset: NameHash) {
        self.pairs.push((variable, asset));
    }

    /// Level of detail requested from the asset provider.
    pub fn set_lod(&mut self, lod: u32) {
        self.lod = lod;
    }

    /// Binds pairs from `index` on, one nested scope each, then runs the
    /// child with everything in sight.
    fn apply(&self, index: usize, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        match self.pairs.get(index) {
            Some(&(variable, asset)) => {
                let resource = ctx.assets.asset(asset).acquire(self.lod);
                let mut textured = scope.child();
                textured.set(variable, resource);
                self.apply(index + 1, ctx, &textured);
            }
            None => self.child.execute(ctx, scope),
        }
    }
}

impl Default for ApplyTextures {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderNode for ApplyTextures {
    fn execute(&mut self, ctx: &mut FrameContext<'_>, scope: &Scope<'_>) {
        self.apply(0, ctx, scope);
    }

    fn bounds(&self) -> Aabb {
        self.child.bounds()
    }

    fn bounds_changed_since(&self, frame: u64) -> bool {
        self.child.bounds_changed_since(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{FixedAssets, GpuResourceId};
    use crate::frame::Viewport;
    use crate::queue::DrawQueue;
    use std::cell::RefCell;
    use std::rc::Rc;

    const ALBEDO_VAR: NameHash = NameHash::of("albedo_texture");
    const NORMAL_VAR: NameHash = NameHash::of("normal_texture");
    const ALBEDO_ASSET: NameHash = NameHash::of("crate/albedo");
    const NORMAL_ASSET: NameHash = NameHash::of("crate/normal");

    struct UniformProbe {
        albedo: Option<GpuResourceId>,
        normal: Option<GpuResourceId>,
        depth: usize,
    }

    impl RenderNode for UniformProbe {
        fn execute(&mut self, _: &mut FrameContext<'_>, scope: &Scope<'_>) {
            self.albedo = scope.try_get(ALBEDO_VAR);
            self.normal = scope.try_get(NORMAL_VAR);
            self.depth = scope.depth();
        }
    }

    #[test]
    fn both_uniforms_reach_the_child_in_nested_frames() {
        let mut assets = FixedAssets::new(GpuResourceId(0));
        assets.insert(ALBEDO_ASSET, GpuResourceId(10));
        assets.insert(NORMAL_ASSET, GpuResourceId(11));

        let probe = Rc::new(RefCell::new(UniformProbe {
            albedo: None,
            normal: None,
            depth: 0,
        }));
        let mut node = ApplyTextures::with_child(probe.clone());
        node.add(ALBEDO_VAR, ALBEDO_ASSET);
        node.add(NORMAL_VAR, NORMAL_ASSET);

        let mut queue = DrawQueue::new();
        let mut ctx = FrameContext {
            frame: 1,
            viewport: Viewport::new(64, 64),
            assets: &assets,
            queue: &mut queue,
        };
        node.execute(&mut ctx, &Scope::root());

        let seen = probe.borrow();
        assert_eq!(seen.albedo, Some(GpuResourceId(10)));
        assert_eq!(seen.normal, Some(GpuResourceId(11)));
        // Root frame plus one nested frame per bound pair.
        assert_eq!(seen.depth, 3);
    }

    #[test]
    fn no_pairs_means_a_plain_pass_through() {
        let assets = FixedAssets::new(GpuResourceId(0));
        let probe = Rc::new(RefCell::new(UniformProbe {
            albedo: None,
            normal: None,
            depth: 0,
        }));
        let mut node = ApplyTextures::with_child(probe.clone());

        let mut queue = DrawQueue::new();
        let mut ctx = FrameContext {
            frame: 1,
            viewport: Viewport::new(64, 64),
            assets: &assets,
            queue: &mut queue,
        };
        node.execute(&mut ctx, &Scope::root());

        let seen = probe.borrow();
        assert_eq!(seen.albedo, None);
        assert_eq!(seen.depth, 1, "no frames pushed without pairs");
    }
}
