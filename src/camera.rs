//! Orbit camera for the 3D viewport
//!
//! Z is up. The camera orbits `target` at `distance`; yaw turns around Z and
//! pitch tilts toward the pole. View and projection are plain glam matrices,
//! so unprojecting the pointer works without a graphics context.

use macroquad::camera::{Camera3D, Projection};
use macroquad::math::{Mat4, Vec2, Vec3};

use crate::geometry::Ray;
use crate::ui::Rect;

/// Radians per pixel of pointer drag
const ORBIT_RATE: f32 = 0.01;
const PITCH_LIMIT: f32 = 1.5;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 200.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Rotation around Z (radians)
    pub yaw: f32,
    /// Elevation above the XY plane (radians)
    pub pitch: f32,
    pub distance: f32,
    /// Vertical field of view (radians)
    pub fovy: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 0.0, 1.0),
            yaw: -2.2,
            pitch: 0.6,
            distance: 28.0,
            fovy: 45f32.to_radians(),
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * cy, cp * sy, sp) * self.distance
    }

    /// Rotate by a pointer delta in pixels
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_RATE;
        self.pitch = (self.pitch + delta.y * ORBIT_RATE).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by wheel steps (positive = closer)
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * 0.9f32.powf(steps)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Z)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy, aspect, NEAR, FAR)
    }

    /// Ray from the eye through a screen point inside `viewport`
    pub fn screen_to_ray(&self, x: f32, y: f32, viewport: &Rect) -> Option<Ray> {
        if viewport.w <= 0.0 || viewport.h <= 0.0 {
            return None;
        }
        let ndc_x = (x - viewport.x) / viewport.w * 2.0 - 1.0;
        let ndc_y = 1.0 - (y - viewport.y) / viewport.h * 2.0;
        let inv = (self.projection(viewport.aspect()) * self.view()).inverse();
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        let eye = self.eye();
        let ray = Ray::new(eye, far - eye);
        if ray.direction == Vec3::ZERO || !ray.direction.is_finite() {
            return None;
        }
        Some(ray)
    }

    /// macroquad camera rendering into `viewport` of a screen `screen_h` pixels tall
    pub fn to_camera3d(&self, viewport: &Rect, screen_h: f32) -> Camera3D {
        Camera3D {
            position: self.eye(),
            target: self.target,
            up: Vec3::Z,
            fovy: self.fovy,
            aspect: Some(viewport.aspect()),
            projection: Projection::Perspective,
            // GL viewports count from the bottom edge
            viewport: Some((
                viewport.x as i32,
                (screen_h - viewport.bottom()) as i32,
                viewport.w as i32,
                viewport.h as i32,
            )),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = OrbitCamera::default();
        let viewport = Rect::new(100.0, 0.0, 800.0, 600.0);
        let ray = cam.screen_to_ray(500.0, 300.0, &viewport).unwrap();
        let to_target = (cam.target - cam.eye()).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999, "dir={:?}", ray.direction);
    }

    #[test]
    fn test_top_of_viewport_looks_higher() {
        let cam = OrbitCamera::default();
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let top = cam.screen_to_ray(400.0, 10.0, &viewport).unwrap();
        let bottom = cam.screen_to_ray(400.0, 590.0, &viewport).unwrap();
        assert!(top.direction.z > bottom.direction.z);
    }

    #[test]
    fn test_orbit_rate_per_pixel() {
        let mut cam = OrbitCamera::default();
        let (yaw, pitch) = (cam.yaw, cam.pitch);
        cam.orbit(Vec2::new(100.0, -20.0));
        assert!((cam.yaw - (yaw - 1.0)).abs() < 1e-5);
        assert!((cam.pitch - (pitch - 0.2)).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_and_zoom_are_clamped() {
        let mut cam = OrbitCamera::default();
        cam.orbit(Vec2::new(0.0, 10_000.0));
        assert!(cam.pitch <= PITCH_LIMIT);
        cam.zoom(1000.0);
        assert!((cam.distance - MIN_DISTANCE).abs() < 1e-4);
        cam.zoom(-1000.0);
        assert!((cam.distance - MAX_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_viewport_has_no_ray() {
        let cam = OrbitCamera::default();
        assert!(cam.screen_to_ray(0.0, 0.0, &Rect::new(0.0, 0.0, 0.0, 10.0)).is_none());
    }
}
