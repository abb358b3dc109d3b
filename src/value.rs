//! Stored values for the scoped variable environment.
//!
//! The environment is type-heterogeneous across keys but each key carries
//! one fixed value type over the whole graph. [`Value`] is the explicit
//! variant the frames actually store; [`ScopeValue`] is the conversion
//! trait that gives [`Scope`](crate::Scope) its typed `bind`/`set`/`get`
//! surface without the caller ever matching on the variant.

use glam::{Mat4, Quat, Vec3, Vec4};

use crate::assets::GpuResourceId;
use crate::hash::NameHash;

/// How a subtree's draw work blends into the target.
///
/// Bound under [`keys::BLEND_MODE`](crate::keys::BLEND_MODE), typically by a
/// [`SetupLight`](crate::SetupLight) node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// No blending; fragments overwrite the target.
    #[default]
    Opaque,
    /// Standard source-alpha blending.
    Alpha,
    /// Additive blending (light accumulation).
    Additive,
}

/// A value stored in a scope frame.
///
/// The variant set covers what the built-in node kinds bind: matrices,
/// vectors, flags, name hashes, bone palettes, and opaque GPU resource
/// handles. Bone palettes are heap-allocated but still copied on
/// bind-down, because the environment's contract is value semantics —
/// a child's palette edit must never show through to an ancestor.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    F32(f32),
    U32(u32),
    Name(NameHash),
    Vec3(Vec3),
    Vec4(Vec4),
    Quat(Quat),
    Mat4(Mat4),
    /// Skinning palette; one matrix per joint.
    Mat4Array(Vec<Mat4>),
    Resource(GpuResourceId),
    Blend(BlendMode),
}

impl Value {
    /// Short variant name used in contract-violation panic messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::F32(_) => "F32",
            Value::U32(_) => "U32",
            Value::Name(_) => "Name",
            Value::Vec3(_) => "Vec3",
            Value::Vec4(_) => "Vec4",
            Value::Quat(_) => "Quat",
            Value::Mat4(_) => "Mat4",
            Value::Mat4Array(_) => "Mat4Array",
            Value::Resource(_) => "Resource",
            Value::Blend(_) => "Blend",
        }
    }
}

/// Conversion between a Rust type and its [`Value`] variant.
///
/// Implemented for every type the built-in nodes bind. Each implementation
/// maps to exactly one variant, so the per-key type contract reduces to
/// "always use the same Rust type for the same key".
pub trait ScopeValue: Clone {
    /// Variant name for diagnostics.
    const KIND: &'static str;

    /// Wraps the value in its variant.
    fn into_value(self) -> Value;

    /// Unwraps the variant, or `None` when the stored kind differs.
    fn from_value(value: &Value) -> Option<Self>;

    /// Mutable access into the variant, or `None` when the stored kind
    /// differs. Backs the live reference returned by
    /// [`Scope::bind`](crate::Scope::bind).
    fn from_value_mut(value: &mut Value) -> Option<&mut Self>;

    /// Value used when `bind` finds no ancestor to copy from.
    fn default_value() -> Self;
}

macro_rules! scope_value {
    ($ty:ty, $variant:ident, $default:expr) => {
        impl ScopeValue for $ty {
            const KIND: &'static str = stringify!($variant);

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn default_value() -> Self {
                $default
            }
        }
    };
}

scope_value!(bool, Bool, false);
scope_value!(f32, F32, 0.0);
scope_value!(u32, U32, 0);
scope_value!(NameHash, Name, NameHash(0));
scope_value!(Vec3, Vec3, Vec3::ZERO);
scope_value!(Vec4, Vec4, Vec4::ZERO);
scope_value!(Quat, Quat, Quat::IDENTITY);
scope_value!(Mat4, Mat4, Mat4::IDENTITY);
scope_value!(Vec<Mat4>, Mat4Array, Vec::new());
scope_value!(GpuResourceId, Resource, GpuResourceId(0));
scope_value!(BlendMode, Blend, BlendMode::Opaque);
