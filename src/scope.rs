//! The scoped variable environment threaded through a graph traversal.
//!
//! A [`Scope`] is a chain of frames. Each executing node that wants to
//! mutate the environment pushes a fresh child frame, binds into it, and
//! hands the child to its callee(s); when the call returns the frame is
//! dropped and the caller's environment is untouched. This gives render
//! nodes dynamic-scoping semantics: a descendant can introduce, override,
//! or hide any named value without a registration step, while ancestors
//! and siblings never observe the change.
//!
//! # Example
//!
//! ```
//! use phalanx::{NameHash, Scope};
//! use phalanx::Mat4;
//!
//! const MODEL: NameHash = NameHash::of("model_matrix");
//!
//! let mut root = Scope::root();
//! root.set(MODEL, Mat4::IDENTITY);
//!
//! let mut child = root.child();
//! // Declares MODEL locally, copying the root's current value.
//! *child.bind::<Mat4>(MODEL) = Mat4::from_scale(phalanx::Vec3::splat(2.0));
//!
//! assert_eq!(root.get::<Mat4>(MODEL), Mat4::IDENTITY); // unaffected
//! ```
//!
//! # Contract
//!
//! Reading a key nobody declared, re-binding a key within one frame, and
//! reading a key with the wrong value type are programmer errors and panic
//! at the call site. Absence that a node is prepared for is probed with
//! [`Scope::has`] or [`Scope::try_get`] instead.

use std::collections::HashMap;

use crate::hash::NameHash;
use crate::value::{ScopeValue, Value};

/// A local slot. `Unset` is a tombstone: the key is *present* in the frame
/// but logically deleted for the whole subtree, which is different from the
/// key being absent and resolved through the parent.
#[derive(Clone, Debug)]
enum Slot {
    Bound(Value),
    Unset,
}

/// One frame of the chained, hierarchical key→value environment.
///
/// Frames are created on the stack when a node starts executing its
/// children and dropped when that call returns; the borrow on the parent
/// makes it impossible for a frame to outlive its ancestors. Storage is an
/// insertion-ordered list with linear scan — per-node variable counts are
/// small and no key ordering is externally observable.
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    slots: Vec<(NameHash, Slot)>,
}

impl Scope<'static> {
    /// Creates a root frame with no parent.
    ///
    /// Each traversal (one per pass or eye) gets its own root, so
    /// concurrent traversals of the same graph never share environment
    /// state.
    pub fn root() -> Self {
        Scope {
            parent: None,
            slots: Vec::new(),
        }
    }
}

impl<'p> Scope<'p> {
    /// Creates an empty child frame chained to this one.
    pub fn child(&self) -> Scope<'_> {
        Scope {
            parent: Some(self),
            slots: Vec::new(),
        }
    }

    /// How many frames deep this chain is (the root counts as 1).
    pub fn depth(&self) -> usize {
        1 + self.parent.map_or(0, Scope::depth)
    }

    fn local(&self, key: NameHash) -> Option<&Slot> {
        self.slots.iter().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    fn local_mut(&mut self, key: NameHash) -> Option<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, s)| s)
    }

    /// Resolves the value visible at this frame, walking toward the root.
    ///
    /// Returns `None` both when the key was never declared and when a
    /// frame on the way up has explicitly unset it.
    pub fn lookup(&self, key: NameHash) -> Option<&Value> {
        match self.local(key) {
            Some(Slot::Bound(value)) => Some(value),
            Some(Slot::Unset) => None,
            None => self.parent.and_then(|p| p.lookup(key)),
        }
    }

    /// Declares `key` in *this* frame and returns a live reference into
    /// the new slot.
    ///
    /// If an ancestor has `key`, the slot starts as a copy of the
    /// ancestor's current value; mutating the copy never affects the
    /// ancestor. If no ancestor has it, the slot starts at
    /// [`ScopeValue::default_value`].
    ///
    /// # Panics
    ///
    /// Panics if `key` is already declared (or unset) in this same frame,
    /// or if the inherited value's type differs from `V`.
    pub fn bind<V: ScopeValue>(&mut self, key: NameHash) -> &mut V {
        if self.local(key).is_some() {
            panic!("scope key {key} bound twice in the same frame");
        }
        let value = match self.parent.and_then(|p| p.lookup(key)) {
            Some(inherited) => inherited.clone(),
            None => V::default_value().into_value(),
        };
        self.slots.push((key, Slot::Bound(value)));
        match self.slots.last_mut() {
            Some((_, Slot::Bound(value))) => {
                let kind = value.kind();
                V::from_value_mut(value).unwrap_or_else(|| {
                    panic!("scope key {key} holds {kind}, bound as {}", V::KIND)
                })
            }
            _ => unreachable!(),
        }
    }

    /// Writes `key` in this frame: overwrites a local slot if one exists,
    /// otherwise creates one.
    ///
    /// Unlike [`bind`](Self::bind) this never searches ancestors and never
    /// copies anything down; it is a plain local write. Writing over a
    /// local tombstone revives the key for this subtree.
    pub fn set<V: ScopeValue>(&mut self, key: NameHash, value: V) {
        let value = value.into_value();
        match self.local_mut(key) {
            Some(slot) => *slot = Slot::Bound(value),
            None => self.slots.push((key, Slot::Bound(value))),
        }
    }

    /// Marks `key` as locally absent, hiding any ancestor value from this
    /// subtree. No prior `bind` is required.
    pub fn unset(&mut self, key: NameHash) {
        match self.local_mut(key) {
            Some(slot) => *slot = Slot::Unset,
            None => self.slots.push((key, Slot::Unset)),
        }
    }

    /// Whether `key` resolves to a value at this frame.
    ///
    /// A locally unset key answers `false` even when an ancestor still
    /// holds a value.
    pub fn has(&self, key: NameHash) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the value visible at this frame.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not declared anywhere in the chain (or is hidden
    /// by an unset), and if the stored type differs from `V`. Nodes that
    /// can proceed without the value use [`try_get`](Self::try_get).
    pub fn get<V: ScopeValue>(&self, key: NameHash) -> V {
        let value = self
            .lookup(key)
            .unwrap_or_else(|| panic!("scope key {key} is not declared"));
        V::from_value(value).unwrap_or_else(|| {
            panic!("scope key {key} holds {}, requested {}", value.kind(), V::KIND)
        })
    }

    /// Returns the value visible at this frame, or `None` when absent.
    ///
    /// # Panics
    ///
    /// Still panics on a type mismatch — a present value of the wrong
    /// type is a contract violation, not absence.
    pub fn try_get<V: ScopeValue>(&self, key: NameHash) -> Option<V> {
        self.lookup(key).map(|value| {
            V::from_value(value).unwrap_or_else(|| {
                panic!("scope key {key} holds {}, requested {}", value.kind(), V::KIND)
            })
        })
    }

    /// Materializes the whole chain into a flat snapshot.
    ///
    /// Parent entries land first, then each frame toward this one
    /// overrides or removes them, so the snapshot is exactly what
    /// [`lookup`](Self::lookup) would answer per key. Debugging and
    /// inspection aid; not meant for the per-frame hot path.
    pub fn to_map(&self) -> HashMap<NameHash, Value> {
        let mut map = match self.parent {
            Some(parent) => parent.to_map(),
            None => HashMap::new(),
        };
        for (key, slot) in &self.slots {
            match slot {
                Slot::Bound(value) => {
                    map.insert(*key, value.clone());
                }
                Slot::Unset => {
                    map.remove(key);
                }
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    const K: NameHash = NameHash::of("k");
    const OTHER: NameHash = NameHash::of("other");

    #[test]
    fn bind_copies_the_ancestor_value_down() {
        let mut root = Scope::root();
        root.set(K, Mat4::from_translation(Vec3::X));

        let mut child = root.child();
        let bound = child.bind::<Mat4>(K);
        assert_eq!(*bound, Mat4::from_translation(Vec3::X));

        // Mutating the child's copy never changes the parent's value.
        *bound = Mat4::from_translation(Vec3::Y);
        assert_eq!(child.get::<Mat4>(K), Mat4::from_translation(Vec3::Y));
        assert_eq!(root.get::<Mat4>(K), Mat4::from_translation(Vec3::X));
    }

    #[test]
    fn bind_without_ancestor_defaults() {
        let mut root = Scope::root();
        assert_eq!(*root.bind::<Mat4>(K), Mat4::IDENTITY);
    }

    #[test]
    #[should_panic(expected = "bound twice")]
    fn rebinding_in_one_frame_panics() {
        let mut root = Scope::root();
        root.bind::<f32>(K);
        root.bind::<f32>(K);
    }

    #[test]
    #[should_panic(expected = "not declared")]
    fn reading_an_undeclared_key_panics() {
        let root = Scope::root();
        root.get::<f32>(K);
    }

    #[test]
    #[should_panic(expected = "holds F32, requested Bool")]
    fn type_mismatch_panics() {
        let mut root = Scope::root();
        root.set(K, 1.0f32);
        root.get::<bool>(K);
    }

    #[test]
    fn unset_hides_the_ancestor_without_deleting_it() {
        let mut root = Scope::root();
        root.set(K, 3.0f32);

        let mut child = root.child();
        child.unset(K);

        assert!(!child.has(K));
        assert_eq!(child.try_get::<f32>(K), None);
        // The ancestor still answers directly.
        assert!(root.has(K));
        assert_eq!(root.get::<f32>(K), 3.0);
    }

    #[test]
    fn unset_hides_for_the_whole_subtree() {
        let mut root = Scope::root();
        root.set(K, 3.0f32);

        let mut child = root.child();
        child.unset(K);
        let grandchild = child.child();
        assert!(!grandchild.has(K));
    }

    #[test]
    fn set_is_a_plain_local_write() {
        let mut root = Scope::root();
        root.set(K, 1.0f32);

        let mut child = root.child();
        child.set(K, 2.0f32);
        // Local insert, not a write-through.
        assert_eq!(root.get::<f32>(K), 1.0);
        assert_eq!(child.get::<f32>(K), 2.0);
    }

    #[test]
    fn set_revives_a_local_unset() {
        let mut root = Scope::root();
        root.set(K, 1.0f32);

        let mut child = root.child();
        child.unset(K);
        child.set(K, 5.0f32);
        assert_eq!(child.get::<f32>(K), 5.0);
    }

    #[test]
    fn has_recurses_to_the_root() {
        let mut root = Scope::root();
        root.set(K, true);

        let child = root.child();
        let grandchild = child.child();
        assert!(grandchild.has(K));
        assert!(!grandchild.has(OTHER));
    }

    #[test]
    fn to_map_applies_overrides_and_removals() {
        let mut root = Scope::root();
        root.set(K, 1.0f32);
        root.set(OTHER, true);

        let mut child = root.child();
        child.set(K, 2.0f32);
        child.unset(OTHER);

        let map = child.to_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&K), Some(&Value::F32(2.0)));
        assert_eq!(map.get(&OTHER), None);
    }

    #[test]
    fn depth_counts_frames() {
        let root = Scope::root();
        let child = root.child();
        let grandchild = child.child();
        assert_eq!(root.depth(), 1);
        assert_eq!(grandchild.depth(), 3);
    }
}
