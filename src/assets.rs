//! Asset access as the graph sees it: opaque handles, never blocking.
//!
//! The graph itself parses no files and owns no GPU memory. It asks an
//! [`AssetProvider`] for a handle by hashed name and acquires the best
//! currently available GPU resource each frame. Loading may happen in the
//! background on the provider's side; the graph only ever observes a
//! synchronous snapshot, so a node that got a placeholder this frame
//! simply asks again next frame.

use std::collections::HashMap;
use std::rc::Rc;

use crate::hash::NameHash;

/// Opaque handle to a GPU-resident resource (mesh, texture, ...).
///
/// The graph never dereferences these; it forwards them into draw calls
/// and environment bindings. The newtype keeps resource handles from being
/// confused with name hashes or other integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GpuResourceId(pub u64);

/// A logical asset that can produce a GPU resource on demand.
///
/// `acquire` triggers load-on-demand for the requested LOD but returns
/// synchronously with the best resource available *right now* — possibly
/// a lower LOD or a placeholder. It never blocks and never fails; "not
/// ready" is the provider's problem, not the graph's.
pub trait Asset {
    /// Returns the best currently available resource at (or near) the
    /// requested level of detail.
    fn acquire(&self, lod: u32) -> GpuResourceId;
}

/// Source of assets by hashed name.
pub trait AssetProvider {
    /// Returns the handle for a logical asset name.
    ///
    /// Unknown names yield a usable placeholder handle rather than an
    /// error; per-frame rendering never branches on asset readiness.
    fn asset(&self, name: NameHash) -> Rc<dyn Asset>;
}

/// An asset that always resolves to one fixed resource, whatever the LOD.
struct FixedAsset {
    resource: GpuResourceId,
}

impl Asset for FixedAsset {
    fn acquire(&self, _lod: u32) -> GpuResourceId {
        self.resource
    }
}

/// In-memory provider mapping names to already-resident resources.
///
/// Enough for tools, tests, and hosts that do their own streaming
/// upstream. Unknown names resolve to the placeholder resource.
///
/// # Example
///
/// ```
/// use phalanx::{FixedAssets, GpuResourceId, NameHash, AssetProvider};
///
/// let mut assets = FixedAssets::new(GpuResourceId(0));
/// assets.insert(NameHash::of("crate_albedo"), GpuResourceId(7));
///
/// let handle = assets.asset(NameHash::of("crate_albedo"));
/// assert_eq!(handle.acquire(0), GpuResourceId(7));
/// ```
pub struct FixedAssets {
    entries: HashMap<NameHash, Rc<dyn Asset>>,
    placeholder: Rc<dyn Asset>,
}

impl FixedAssets {
    /// Creates a provider whose unknown names resolve to `placeholder`.
    pub fn new(placeholder: GpuResourceId) -> Self {
        FixedAssets {
            entries: HashMap::new(),
            placeholder: Rc::new(FixedAsset {
                resource: placeholder,
            }),
        }
    }

    /// Registers a name → resource mapping, replacing any previous one.
    pub fn insert(&mut self, name: NameHash, resource: GpuResourceId) {
        self.entries.insert(name, Rc::new(FixedAsset { resource }));
    }
}

impl AssetProvider for FixedAssets {
    fn asset(&self, name: NameHash) -> Rc<dyn Asset> {
        match self.entries.get(&name) {
            Some(asset) => Rc::clone(asset),
            None => {
                log::debug!("asset {name} unknown, serving placeholder");
                Rc::clone(&self.placeholder)
            }
        }
    }
}
