//! Ray casting utilities for 3D picking and drag operations

use macroquad::math::Vec3;

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,  // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Find the closest point on an infinite line to a ray.
///
/// Used for face dragging: the pointer ray "intersects" the line running
/// along the dragged face's normal.
///
/// Returns (point_on_line, parameter_along_line) or None if ray and line are parallel.
pub fn ray_line_closest_point(
    ray: &Ray,
    line_origin: Vec3,
    line_dir: Vec3,
) -> Option<(Vec3, f32)> {
    // Closest pair of points on two lines:
    //   P1 = ray.origin + t * d1, P2 = line_origin + s * d2
    // with (P1 - P2) perpendicular to both directions, giving
    //   s = (a*e - d*b) / (a*c - b^2)
    let w = ray.origin - line_origin;
    let d1 = ray.direction;
    let d2 = line_dir;

    let a = d1.dot(d1);
    let b = d1.dot(d2);
    let c = d2.dot(d2);
    let d = w.dot(d1);
    let e = w.dot(d2);

    let denom = a * c - b * b;
    if denom.abs() < 0.0001 {
        return None;  // Lines are parallel
    }

    let s = (a * e - d * b) / denom;
    Some((line_origin + line_dir * s, s))
}

/// Find the intersection of a ray with a plane.
///
/// Returns the distance along the ray to the intersection point,
/// or None if the ray is parallel to the plane or intersection is behind ray origin.
pub fn ray_plane_intersection(
    ray: &Ray,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 0.0001 {
        return None;  // Ray parallel to plane
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;  // Intersection behind ray origin
    }

    Some(t)
}

/// Entry and exit of a ray through an axis-aligned box
#[derive(Debug, Clone, Copy)]
pub struct AabbHit {
    /// Distance to the entry face (negative when the ray starts inside)
    pub t_near: f32,
    /// Distance to the exit face
    pub t_far: f32,
    /// Outward normal of the entry face
    pub near_normal: Vec3,
    /// Outward normal of the exit face
    pub far_normal: Vec3,
}

/// Slab test of a ray against the box [min, max].
///
/// Returns None when the ray misses or the whole box is behind the origin.
pub fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<AabbHit> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut near_normal = Vec3::ZERO;
    let mut far_normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.direction[axis];
        if d.abs() < 1e-8 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let mut unit = Vec3::ZERO;
        unit[axis] = 1.0;

        // Going +axis the ray enters through the min face (normal -axis)
        let (mut t0, mut t1) = ((min[axis] - o) / d, (max[axis] - o) / d);
        let (mut n0, mut n1) = (-unit, unit);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            std::mem::swap(&mut n0, &mut n1);
        }
        if t0 > t_near {
            t_near = t0;
            near_normal = n0;
        }
        if t1 < t_far {
            t_far = t1;
            far_normal = n1;
        }
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }

    Some(AabbHit { t_near, t_far, near_normal, far_normal })
}
