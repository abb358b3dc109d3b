//! Bounding volumes and the view frustum used for culling.
//!
//! Everything here is recomputed per pass from environment-held matrices;
//! nothing is cached across frames. The oriented box exists so transformed
//! bounds are only widened once: re-expanding an axis-aligned box after
//! every matrix in a chain over-grows it, so a transform keeps the box
//! oriented and expands to axis-aligned as the final step.

use glam::{Mat4, Vec3, Vec4Swizzles};

/// An axis-aligned bounding box.
///
/// The empty box is the identity for [`union`](Self::union) and is
/// represented with inverted infinite extents, so any real point expands
/// it correctly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The empty box: contains nothing, unions as identity.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Builds a box from explicit extents.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Builds a box from a center point and per-axis half extents.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Aabb {
            min: center - half,
            max: center + half,
        }
    }

    /// Whether this box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// The smallest box containing both operands.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grows the box to contain `point`.
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// The eight corner points. Meaningless for an empty box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }
}

/// An axis-aligned box carried through a rigid/affine transform without
/// being widened.
///
/// Produced by [`Obb::from_aabb`] and composed with further matrices via
/// [`transformed`](Self::transformed); the single widening step happens in
/// [`to_aabb`](Self::to_aabb).
#[derive(Clone, Copy, Debug)]
pub struct Obb {
    local: Aabb,
    transform: Mat4,
}

impl Obb {
    /// Wraps an axis-aligned box as an oriented box with identity
    /// orientation.
    pub fn from_aabb(local: Aabb) -> Self {
        Obb {
            local,
            transform: Mat4::IDENTITY,
        }
    }

    /// Composes a further transform onto the box without expanding it.
    pub fn transformed(&self, matrix: Mat4) -> Obb {
        Obb {
            local: self.local,
            transform: matrix * self.transform,
        }
    }

    /// Expands to the smallest axis-aligned box containing the oriented
    /// box. An empty input stays empty.
    pub fn to_aabb(&self) -> Aabb {
        if self.local.is_empty() {
            return Aabb::EMPTY;
        }
        let mut out = Aabb::EMPTY;
        for corner in self.local.corners() {
            out.expand(self.transform.transform_point3(corner));
        }
        out
    }
}

/// A plane in constant-normal form; `normal · p + d` is the signed
/// distance of `p`, positive on the side the normal points to.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Builds a plane from raw row coefficients and normalizes it so
    /// signed distances are in world units.
    fn from_coefficients(coefficients: glam::Vec4) -> Self {
        let normal = coefficients.xyz();
        let inv_len = normal.length().recip();
        Plane {
            normal: normal * inv_len,
            d: coefficients.w * inv_len,
        }
    }

    /// Signed distance from `point` to the plane.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }
}

/// The six planes of a view volume, normals pointing inward.
///
/// Extracted from a combined `projection * view` matrix by row
/// combination (the classic Gribb–Hartmann derivation). The projection is
/// expected to map depth to the [-1, 1] clip range (`Mat4::perspective_rh_gl`
/// and friends).
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Derives the frustum planes from a `projection * view` matrix.
    pub fn from_matrix(view_projection: Mat4) -> Self {
        let r0 = view_projection.row(0);
        let r1 = view_projection.row(1);
        let r2 = view_projection.row(2);
        let r3 = view_projection.row(3);
        Frustum {
            planes: [
                Plane::from_coefficients(r3 + r0), // left
                Plane::from_coefficients(r3 - r0), // right
                Plane::from_coefficients(r3 + r1), // bottom
                Plane::from_coefficients(r3 - r1), // top
                Plane::from_coefficients(r3 + r2), // near
                Plane::from_coefficients(r3 - r2), // far
            ],
        }
    }

    /// Whether any part of `aabb` could be inside the view volume.
    ///
    /// Tests the box's positive vertex against each plane: if that vertex
    /// is on the negative side of any plane the box is entirely outside.
    /// An empty box answers `true`; skipping happens only on positive
    /// evidence, and callers treat "no bounds" as "always execute".
    pub fn intersects(&self, aabb: &Aabb) -> bool {
        if aabb.is_empty() {
            return true;
        }
        for plane in &self.planes {
            let positive = Vec3::new(
                if plane.normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if plane.normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if plane.normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            if plane.signed_distance(positive) < 0.0 {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Quat;

    #[test]
    fn empty_box_unions_as_identity() {
        let b = Aabb::from_min_max(Vec3::NEG_ONE, Vec3::ONE);
        assert_eq!(Aabb::EMPTY.union(&b), b);
        assert!(Aabb::EMPTY.is_empty());
        assert!(!b.is_empty());
    }

    #[test]
    fn union_covers_both_operands() {
        let a = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_min_max(Vec3::splat(2.0), Vec3::splat(3.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(3.0));
    }

    #[test]
    fn obb_translation_moves_the_box() {
        let local = Aabb::from_min_max(Vec3::NEG_ONE, Vec3::ONE);
        let moved = Obb::from_aabb(local)
            .transformed(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)))
            .to_aabb();
        assert_relative_eq!(moved.min.x, 9.0);
        assert_relative_eq!(moved.max.x, 11.0);
    }

    #[test]
    fn obb_composes_without_intermediate_widening() {
        // Two chained 45° rotations around Z cancel out into 90°; the
        // composed oriented box expands once, so a unit box stays unit
        // sized. Expanding after each step would grow it to √2.
        let local = Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5));
        let rot = Mat4::from_quat(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4));
        let composed = Obb::from_aabb(local)
            .transformed(rot)
            .transformed(rot)
            .to_aabb();
        assert_relative_eq!(composed.max.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(composed.max.y, 0.5, epsilon = 1e-5);

        let widened_twice = Obb::from_aabb(Obb::from_aabb(local).transformed(rot).to_aabb())
            .transformed(rot)
            .to_aabb();
        assert!(widened_twice.max.x > 0.6);
    }

    #[test]
    fn frustum_rejects_a_box_behind_the_camera() {
        let projection = Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let frustum = Frustum::from_matrix(projection * view);

        let in_front = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let behind = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 20.0), Vec3::splat(0.5));
        assert!(frustum.intersects(&in_front));
        assert!(!frustum.intersects(&behind));
    }

    #[test]
    fn frustum_keeps_a_box_straddling_a_plane() {
        let projection = Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let frustum = Frustum::from_matrix(projection * view);

        // Sits across the left plane: partially visible, never culled.
        let straddling = Aabb::from_center_half_extents(Vec3::new(-5.0, 0.0, 0.0), Vec3::splat(5.0));
        assert!(frustum.intersects(&straddling));
    }

    #[test]
    fn empty_bounds_are_never_culled() {
        let projection = Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0);
        let frustum = Frustum::from_matrix(projection);
        assert!(frustum.intersects(&Aabb::EMPTY));
    }
}
