//! Oriented box
//!
//! A box is a center plus three extent vectors (half-size along each box axis).
//! Seen as a 4x4 affine map it sends the cube [-1, 1]^3 to world space: the
//! extents are the first three columns and the center is the translation.
//! That is what lets an incremental editor transform compose with the box by a
//! plain matrix product.
//!
//! The all-zero box is the empty selection.

use macroquad::math::{Mat4, Vec3};

const WORLD_AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub center: Vec3,
    /// Half-size vectors along the box's local x, y and z axes
    pub extents: [Vec3; 3],
}

impl Default for OrientedBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl OrientedBox {
    /// The empty box (no selection)
    pub const EMPTY: Self = Self {
        center: Vec3::ZERO,
        extents: [Vec3::ZERO; 3],
    };

    /// Axis-aligned box from a center and half-sizes
    pub fn from_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            center,
            extents: [Vec3::X * half.x, Vec3::Y * half.y, Vec3::Z * half.z],
        }
    }

    /// Axis-aligned box spanning two corners
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::from_extents((min + max) * 0.5, (max - min) * 0.5)
    }

    /// Unit plane at `pos` whose third axis is the (normalized) normal.
    ///
    /// The first tangent is `normal x axis` for the first world axis that is
    /// not parallel to the normal, the second tangent is `normal x first`.
    pub fn plane_from_normal(pos: Vec3, normal: Vec3) -> Self {
        let n = normal.normalize_or_zero();
        let u = WORLD_AXES
            .iter()
            .map(|axis| n.cross(*axis))
            .find(|v| v.length_squared() > 0.0)
            .unwrap_or(Vec3::ZERO);
        let v = n.cross(u);
        Self {
            center: pos,
            extents: [u, v, n],
        }
    }

    /// One voxel face centered on a surface hit: a plane scaled to half a
    /// unit along both tangents and flattened along the normal.
    pub fn face_rect(pos: Vec3, normal: Vec3) -> Self {
        Self::plane_from_normal(pos, normal).scaled(Vec3::new(0.5, 0.5, 0.0))
    }

    /// Scale each extent vector by the matching component of `s`
    pub fn scaled(mut self, s: Vec3) -> Self {
        for (i, e) in self.extents.iter_mut().enumerate() {
            *e *= s[i];
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.extents.iter().all(|e| *e == Vec3::ZERO)
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols(
            self.extents[0].extend(0.0),
            self.extents[1].extend(0.0),
            self.extents[2].extend(0.0),
            self.center.extend(1.0),
        )
    }

    pub fn from_mat4(m: &Mat4) -> Self {
        Self {
            center: m.w_axis.truncate(),
            extents: [m.x_axis.truncate(), m.y_axis.truncate(), m.z_axis.truncate()],
        }
    }

    /// Apply `transform` after the box's own mapping (`transform * box`)
    pub fn apply_transform(&self, transform: &Mat4) -> Self {
        Self::from_mat4(&(*transform * self.to_mat4()))
    }

    /// Volume of the box (eight times the triple product of the extents)
    pub fn volume(&self) -> f32 {
        let [a, b, c] = self.extents;
        (a.dot(b.cross(c)) * 8.0).abs()
    }

    /// The eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let [a, b, c] = self.extents;
        let mut out = [Vec3::ZERO; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            *corner = self.center + a * sx + b * sy + c * sz;
        }
        out
    }

    /// World-space axis-aligned bounds as (min, max)
    pub fn aabb(&self) -> (Vec3, Vec3) {
        self.corners()
            .iter()
            .fold((Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)), |(lo, hi), p| {
                (lo.min(*p), hi.max(*p))
            })
    }

    /// Smallest axis-aligned box holding both boxes. An empty side yields the other.
    pub fn union(&self, other: &OrientedBox) -> OrientedBox {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let (a_min, a_max) = self.aabb();
        let (b_min, b_max) = other.aabb();
        Self::from_min_max(a_min.min(b_min), a_max.max(b_max))
    }

    /// Axis-aligned bounds of the box grown to include `p`
    pub fn extend_to_point(&self, p: Vec3) -> OrientedBox {
        let (min, max) = self.aabb();
        Self::from_min_max(min.min(p), max.max(p))
    }

    /// Whether `p` lies inside the box's axis-aligned bounds
    pub fn contains_point(&self, p: Vec3) -> bool {
        if self.is_empty() {
            return false;
        }
        let (min, max) = self.aabb();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y && p.z >= min.z && p.z <= max.z
    }
}
