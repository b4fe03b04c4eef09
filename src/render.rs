//! Scene and overlay rendering
//!
//! Tools and the box editor never draw directly: they push `BoxOverlay`s into
//! a `RenderList` during `iter`, and the frame loop draws the list after the
//! voxels, inside the viewport camera.

use macroquad::prelude::*;

use crate::geometry::OrientedBox;
use crate::scene::{Rgba, VoxelImage};

const GRID_HALF: i32 = 16;
const GRID_COLOR: Color = Color::new(0.3, 0.3, 0.34, 1.0);
const AXIS_X_COLOR: Color = Color::new(0.7, 0.25, 0.25, 1.0);
const AXIS_Y_COLOR: Color = Color::new(0.25, 0.6, 0.25, 1.0);
const MASK_COLOR: Color = Color::new(0.3, 0.6, 1.0, 0.35);
pub const SELECTION_COLOR: Rgba = [255, 255, 255, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEffect {
    Wireframe,
    /// Translucent filled box
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxOverlay {
    pub bbox: OrientedBox,
    pub color: Rgba,
    pub effect: OverlayEffect,
}

/// Overlays queued for this frame
#[derive(Debug, Default)]
pub struct RenderList {
    boxes: Vec<BoxOverlay>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_box(&mut self, bbox: OrientedBox, color: Rgba, effect: OverlayEffect) {
        self.boxes.push(BoxOverlay { bbox, color, effect });
    }

    pub fn boxes(&self) -> &[BoxOverlay] {
        &self.boxes
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }
}

fn to_color(c: Rgba) -> Color {
    Color::from_rgba(c[0], c[1], c[2], c[3])
}

/// Ground grid in the z = 0 plane
pub fn draw_ground_grid() {
    let half = GRID_HALF as f32;
    for i in -GRID_HALF..=GRID_HALF {
        let f = i as f32;
        let (cx, cy) = match i {
            0 => (AXIS_Y_COLOR, AXIS_X_COLOR),
            _ => (GRID_COLOR, GRID_COLOR),
        };
        draw_line_3d(vec3(f, -half, 0.0), vec3(f, half, 0.0), cx);
        draw_line_3d(vec3(-half, f, 0.0), vec3(half, f, 0.0), cy);
    }
}

/// Every voxel of the visible layers
pub fn draw_image(image: &VoxelImage) {
    for layer in image.layers.iter().filter(|l| l.visible) {
        for (p, color) in &layer.voxels {
            let center = p.as_vec3() + Vec3::splat(0.5);
            draw_cube(center, Vec3::ONE, None, to_color(*color));
            draw_cube_wires(center, Vec3::ONE, Color::new(0.0, 0.0, 0.0, 0.25));
        }
    }
}

/// Selection mask as translucent cubes, drawn over the voxels
pub fn draw_mask(image: &VoxelImage) {
    for p in &image.mask {
        draw_cube(p.as_vec3() + Vec3::splat(0.5), Vec3::splat(1.02), None, MASK_COLOR);
    }
}

/// The twelve edges of a box
pub fn draw_box_wireframe(bbox: &OrientedBox, color: Color) {
    let c = bbox.corners();
    // Corner index bits are (x, y, z); an edge flips exactly one bit
    for i in 0..8usize {
        for bit in [1usize, 2, 4] {
            if i & bit == 0 {
                draw_line_3d(c[i], c[i | bit], color);
            }
        }
    }
}

pub fn draw_overlays(list: &RenderList) {
    for overlay in list.boxes() {
        let color = to_color(overlay.color);
        match overlay.effect {
            OverlayEffect::Wireframe => draw_box_wireframe(&overlay.bbox, color),
            OverlayEffect::Solid => {
                let (min, max) = overlay.bbox.aabb();
                let size = (max - min).max(Vec3::splat(0.02));
                draw_cube((min + max) * 0.5, size, None, Color { a: 0.35, ..color });
            }
        }
    }
}
