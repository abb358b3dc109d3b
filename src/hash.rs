//! Stable name hashing for environment variables and asset names.

/// A fixed-width hash of a symbolic name.
///
/// `NameHash` is the key type everywhere a "variable name" or "asset name"
/// appears: scope bindings, uniform declarations, texture lookups. Hashing
/// happens in `const` context, so well-known keys (see [`keys`](crate::keys))
/// compile down to plain integer constants with no runtime string work.
///
/// Two different names hashing to the same value would silently alias a
/// binding. The 64-bit FNV-1a space makes this vanishingly unlikely for the
/// handful of names a graph uses, and the crate does not defend against it.
///
/// # Example
///
/// ```
/// use phalanx::NameHash;
///
/// const ALBEDO: NameHash = NameHash::of("albedo_texture");
///
/// assert_eq!(ALBEDO, NameHash::of("albedo_texture"));
/// assert_ne!(ALBEDO, NameHash::of("normal_texture"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameHash(pub u64);

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl NameHash {
    /// Hashes a symbolic name with 64-bit FNV-1a.
    ///
    /// Usable in `const` context:
    ///
    /// ```
    /// use phalanx::NameHash;
    ///
    /// const MODEL: NameHash = NameHash::of("model_matrix");
    /// ```
    pub const fn of(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = FNV_OFFSET;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }
}

impl std::fmt::Display for NameHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
