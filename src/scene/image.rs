//! Sparse voxel layers
//!
//! Voxel (i, j, k) occupies [i, i+1] x [j, j+1] x [k, k+1]. A voxel is inside
//! a box when its center is inside the box's axis-aligned bounds.

use std::collections::{HashMap, HashSet};

use macroquad::math::{IVec3, Vec3};

use crate::geometry::{ray_aabb, OrientedBox, Ray};

/// RGBA voxel color
pub type Rgba = [u8; 4];

/// A named layer of voxels
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub voxels: HashMap<IVec3, Rgba>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            voxels: HashMap::new(),
        }
    }
}

/// Result of a ray hitting the voxel volume
#[derive(Debug, Clone, Copy)]
pub struct VoxelHit {
    /// Distance along the ray
    pub t: f32,
    /// Hit point on the voxel face
    pub position: Vec3,
    /// Outward normal of the face that was hit
    pub normal: Vec3,
}

/// Layer stack with an active layer and a selection mask
#[derive(Debug, Clone)]
pub struct VoxelImage {
    pub layers: Vec<Layer>,
    pub active_layer: usize,
    /// Voxel positions marked by the add/sub selection actions
    pub mask: HashSet<IVec3>,
}

impl Default for VoxelImage {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelImage {
    /// Image with a single empty layer
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new("Layer 1")],
            active_layer: 0,
            mask: HashSet::new(),
        }
    }

    /// Small starting scene: a floor slab with a block standing on it
    pub fn demo() -> Self {
        let mut image = Self::new();
        let floor = OrientedBox::from_min_max(Vec3::new(-8.0, -8.0, 0.0), Vec3::new(8.0, 8.0, 1.0));
        let block = OrientedBox::from_min_max(Vec3::new(-2.0, -2.0, 1.0), Vec3::new(2.0, 2.0, 5.0));
        image.fill(&floor, [120, 120, 130, 255]);
        image.fill(&block, [200, 140, 60, 255]);
        image
    }

    pub fn active(&self) -> &Layer {
        &self.layers[self.active_layer]
    }

    pub fn active_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active_layer]
    }

    /// Total voxel count over all layers
    pub fn voxel_count(&self) -> usize {
        self.layers.iter().map(|l| l.voxels.len()).sum()
    }

    /// Voxel positions whose centers lie inside the box, z-major
    pub fn positions_in(bbox: &OrientedBox) -> impl Iterator<Item = IVec3> {
        let (lo, hi) = if bbox.is_empty() {
            (IVec3::ZERO, IVec3::splat(-1))
        } else {
            let (min, max) = bbox.aabb();
            (
                (min - Vec3::splat(0.5)).ceil().as_ivec3(),
                (max - Vec3::splat(0.5)).floor().as_ivec3(),
            )
        };
        (lo.z..=hi.z).flat_map(move |z| {
            (lo.y..=hi.y).flat_map(move |y| (lo.x..=hi.x).map(move |x| IVec3::new(x, y, z)))
        })
    }

    /// Whether the voxel at `p` counts as inside the box
    fn voxel_in(bbox: &OrientedBox, p: IVec3) -> bool {
        bbox.contains_point(p.as_vec3() + Vec3::splat(0.5))
    }

    /// Paint every voxel of the box into the active layer
    pub fn fill(&mut self, bbox: &OrientedBox, color: Rgba) {
        let layer = self.active_mut();
        for p in Self::positions_in(bbox) {
            layer.voxels.insert(p, color);
        }
    }

    /// Add the box to the selection mask
    pub fn mask_add(&mut self, bbox: &OrientedBox) {
        self.mask.extend(Self::positions_in(bbox));
    }

    /// Remove the box from the selection mask
    pub fn mask_sub(&mut self, bbox: &OrientedBox) {
        self.mask.retain(|p| !Self::voxel_in(bbox, *p));
    }

    /// Move the active layer's voxels inside the box into a new layer,
    /// which becomes the active one. Returns the number of voxels moved.
    pub fn cut_as_new_layer(&mut self, bbox: &OrientedBox) -> usize {
        let source = self.active_mut();
        let inside: Vec<IVec3> = source.voxels.keys().copied().filter(|p| Self::voxel_in(bbox, *p)).collect();
        let mut cut = Layer::new("Selection");
        for p in inside {
            if let Some(color) = source.voxels.remove(&p) {
                cut.voxels.insert(p, color);
            }
        }
        let moved = cut.voxels.len();
        self.layers.push(cut);
        self.active_layer = self.layers.len() - 1;
        moved
    }

    /// Inclusive voxel bounds of the visible layers
    fn bounds(&self) -> Option<(IVec3, IVec3)> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .flat_map(|l| l.voxels.keys())
            .fold(None, |acc, p| match acc {
                None => Some((*p, *p)),
                Some((lo, hi)) => Some((lo.min(*p), hi.max(*p))),
            })
    }

    /// Color of the topmost visible voxel at `p`
    pub fn voxel_at(&self, p: IVec3) -> Option<Rgba> {
        self.layers
            .iter()
            .rev()
            .filter(|l| l.visible)
            .find_map(|l| l.voxels.get(&p).copied())
    }

    /// Nearest visible voxel face hit by the ray.
    ///
    /// Walks the grid cell by cell from where the ray enters the occupied
    /// bounds. A ray starting inside a voxel doesn't hit that voxel.
    pub fn raycast(&self, ray: &Ray) -> Option<VoxelHit> {
        let (lo, hi) = self.bounds()?;
        let entry = ray_aabb(ray, lo.as_vec3(), (hi + IVec3::ONE).as_vec3())?;

        let mut t = entry.t_near.max(0.0);
        // Zero until the first step when the ray starts inside the bounds
        let mut normal = if entry.t_near >= 0.0 { entry.near_normal } else { Vec3::ZERO };
        let mut cell = ray.at(t).floor().as_ivec3().clamp(lo, hi);

        let mut step = IVec3::ZERO;
        let mut t_delta = Vec3::splat(f32::INFINITY);
        let mut t_max = Vec3::splat(f32::INFINITY);
        for axis in 0..3 {
            let d = ray.direction[axis];
            if d.abs() < 1e-8 {
                continue;
            }
            let o = ray.origin[axis];
            step[axis] = if d > 0.0 { 1 } else { -1 };
            t_delta[axis] = 1.0 / d.abs();
            let boundary = if d > 0.0 { cell[axis] + 1 } else { cell[axis] };
            t_max[axis] = (boundary as f32 - o) / d;
        }

        loop {
            if normal != Vec3::ZERO && self.voxel_at(cell).is_some() {
                return Some(VoxelHit { t, position: ray.at(t), normal });
            }

            let axis = if t_max.x <= t_max.y && t_max.x <= t_max.z {
                0
            } else if t_max.y <= t_max.z {
                1
            } else {
                2
            };
            if !t_max[axis].is_finite() || t_max[axis] > entry.t_far {
                return None;
            }
            t = t_max[axis];
            t_max[axis] += t_delta[axis];
            cell[axis] += step[axis];
            if cell[axis] < lo[axis] || cell[axis] > hi[axis] {
                return None;
            }
            normal = Vec3::ZERO;
            normal[axis] = -step[axis] as f32;
        }
    }
}
