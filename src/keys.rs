//! Well-known environment keys shared by the built-in node kinds.
//!
//! Every key a built-in node reads or writes is declared here so the
//! implicit type contract per key (see [`Scope`](crate::Scope)) has one
//! authoritative home. Custom nodes are free to mint their own keys with
//! [`NameHash::of`]; these constants only cover the vocabulary the crate
//! itself uses.

use crate::hash::NameHash;

/// Model (object-to-world) matrix. Value type: `Mat4`.
pub const MODEL_MATRIX: NameHash = NameHash::of("model_matrix");

/// View (world-to-camera) matrix. Value type: `Mat4`.
pub const VIEW_MATRIX: NameHash = NameHash::of("view_matrix");

/// Projection matrix for the current pass. Value type: `Mat4`.
pub const PROJECTION_MATRIX: NameHash = NameHash::of("projection_matrix");

/// Blend mode for the subtree. Value type: [`BlendMode`](crate::BlendMode).
pub const BLEND_MODE: NameHash = NameHash::of("blend_mode");

/// Direction of the single directional light. Value type: `Vec3`.
pub const LIGHT_DIRECTION: NameHash = NameHash::of("light_direction");

/// Color of the single directional light. Value type: `Vec4`.
pub const LIGHT_COLOR: NameHash = NameHash::of("light_color");

/// Skinning palette bound by an active skeleton. Value type: `Vec<Mat4>`.
pub const BONES: NameHash = NameHash::of("bones");

/// Name of the output variable downstream shader generation should
/// produce. Value type: [`NameHash`].
pub const REQUESTED_OUTPUT: NameHash = NameHash::of("requested_output");

/// Declaration that the standard clip-space position output is expected
/// to exist. Value type: `bool`.
pub const CLIP_POSITION: NameHash = NameHash::of("clip_position");

/// Default value of [`REQUESTED_OUTPUT`]: the fragment color.
pub const FRAG_COLOR: NameHash = NameHash::of("frag_color");
