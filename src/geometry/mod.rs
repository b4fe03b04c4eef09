//! Geometry utilities shared by the selection tool, the box editor and the
//! gesture dispatcher.
//!
//! - `oriented_box` - OrientedBox (center + three extent vectors)
//! - `ray` - Ray type and ray/plane, ray/line, ray/box queries
//!
//! Vectors and matrices are glam types re-exported by macroquad.

pub mod oriented_box;
pub mod ray;

pub use oriented_box::OrientedBox;
pub use ray::{Ray, ray_aabb, ray_line_closest_point, ray_plane_intersection};

use macroquad::math::Vec3;

/// World axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Get the unit vector for this axis
    pub fn unit_vector(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Component index (0, 1, 2)
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_unit_vectors() {
        for axis in Axis::ALL {
            assert_eq!(axis.unit_vector()[axis.index()], 1.0);
            assert_eq!(axis.unit_vector().length(), 1.0);
        }
    }
}
