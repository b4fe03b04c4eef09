//! Box transform editor
//!
//! A face-dragging manipulator for an axis-aligned box. Hovering highlights the
//! face under the pointer; pressing on it starts a drag along the face normal,
//! picked as the closest point between the pointer ray and the normal line.
//! Offsets are whole voxels.
//!
//! While a drag is active every call returns the incremental transform that
//! takes the box as it is now to the box the drag asks for, so the caller
//! just applies `transform * box`.

use macroquad::math::{Mat4, Vec3};

use crate::geometry::{ray_aabb, ray_line_closest_point, Axis, OrientedBox, Ray};
use crate::gesture::PointerState;
use crate::render::{OverlayEffect, RenderList};
use crate::scene::Rgba;

const HOVER_COLOR: Rgba = [120, 200, 255, 255];
const DRAG_COLOR: Rgba = [255, 200, 80, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxEditMode {
    /// Dragged face moves, the opposite one stays
    Resize,
    /// Whole box follows the dragged face
    Move,
}

/// Result of one `BoxEditor::edit` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxEdit {
    /// A face drag owns the pointer this frame
    pub active: bool,
    /// Incremental transform to apply to the box, if it changed
    pub transform: Option<Mat4>,
}

impl BoxEdit {
    pub const IDLE: Self = Self { active: false, transform: None };
}

/// One of the six faces of an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxFace {
    pub axis: Axis,
    pub positive: bool,
}

impl BoxFace {
    /// Face whose outward normal is `normal` (an axis-aligned unit vector)
    pub fn from_normal(normal: Vec3) -> Option<Self> {
        let axis = Axis::ALL.into_iter().find(|a| normal[a.index()].abs() > 0.5)?;
        Some(Self { axis, positive: normal[axis.index()] > 0.0 })
    }

    pub fn normal(&self) -> Vec3 {
        let n = self.axis.unit_vector();
        if self.positive { n } else { -n }
    }

    /// The face itself as a flat box
    pub fn rect(&self, min: Vec3, max: Vec3) -> OrientedBox {
        let a = self.axis.index();
        let (mut lo, mut hi) = (min, max);
        if self.positive {
            lo[a] = max[a];
        } else {
            hi[a] = min[a];
        }
        OrientedBox::from_min_max(lo, hi)
    }
}

#[derive(Debug, Clone, Copy)]
struct FaceDrag {
    face: BoxFace,
    mode: BoxEditMode,
    start_min: Vec3,
    start_max: Vec3,
    line_origin: Vec3,
    start_param: f32,
}

impl FaceDrag {
    /// Box bounds after moving the face `offset` voxels outward
    fn target(&self, offset: f32) -> (Vec3, Vec3) {
        let a = self.face.axis.index();
        let (mut min, mut max) = (self.start_min, self.start_max);
        match self.mode {
            BoxEditMode::Move => {
                let delta = self.face.normal() * offset;
                min += delta;
                max += delta;
            }
            BoxEditMode::Resize if self.face.positive => {
                max[a] = (max[a] + offset).max(min[a] + 1.0);
            }
            BoxEditMode::Resize => {
                min[a] = (min[a] - offset).min(max[a] - 1.0);
            }
        }
        (min, max)
    }
}

#[derive(Debug, Default)]
pub struct BoxEditor {
    hovered: Option<BoxFace>,
    drag: Option<FaceDrag>,
}

impl BoxEditor {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[cfg(test)]
    pub fn hovered(&self) -> Option<BoxFace> {
        self.hovered
    }

    pub fn edit(
        &mut self,
        bbox: &OrientedBox,
        mode: BoxEditMode,
        pointer: &PointerState,
        ray: Option<Ray>,
        render: &mut RenderList,
    ) -> BoxEdit {
        self.hovered = None;
        if bbox.is_empty() {
            self.drag = None;
            return BoxEdit::IDLE;
        }

        if let Some(drag) = self.drag {
            if !pointer.left_down {
                self.drag = None;
                return BoxEdit::IDLE;
            }
            let (min, max) = bbox.aabb();
            render.push_box(drag.face.rect(min, max), DRAG_COLOR, OverlayEffect::Solid);

            let Some(ray) = ray else {
                return BoxEdit { active: true, transform: None };
            };
            let Some((_, s)) = ray_line_closest_point(&ray, drag.line_origin, drag.face.normal()) else {
                return BoxEdit { active: true, transform: None };
            };
            let (t_min, t_max) = drag.target((s - drag.start_param).round());
            let target = OrientedBox::from_min_max(t_min, t_max);
            return BoxEdit {
                active: true,
                transform: Some(incremental_transform(bbox, &target)),
            };
        }

        if !pointer.in_viewport {
            return BoxEdit::IDLE;
        }
        let Some(ray) = ray else {
            return BoxEdit::IDLE;
        };
        let (min, max) = bbox.aabb();
        let Some(hit) = ray_aabb(&ray, min, max).filter(|h| h.t_near >= 0.0) else {
            return BoxEdit::IDLE;
        };
        let Some(face) = BoxFace::from_normal(hit.near_normal) else {
            return BoxEdit::IDLE;
        };
        self.hovered = Some(face);
        render.push_box(face.rect(min, max), HOVER_COLOR, OverlayEffect::Solid);

        if !pointer.left_pressed {
            return BoxEdit::IDLE;
        }

        let line_origin = ray.at(hit.t_near);
        let start_param = ray_line_closest_point(&ray, line_origin, face.normal())
            .map(|(_, s)| s)
            .unwrap_or(0.0);
        self.drag = Some(FaceDrag {
            face,
            mode,
            start_min: min,
            start_max: max,
            line_origin,
            start_param,
        });
        BoxEdit { active: true, transform: Some(Mat4::IDENTITY) }
    }
}

/// Transform `t` such that `t * current = target`; identity when `current`
/// cannot be inverted.
pub fn incremental_transform(current: &OrientedBox, target: &OrientedBox) -> Mat4 {
    let m = current.to_mat4();
    if m.determinant().abs() < 1e-6 {
        return Mat4::IDENTITY;
    }
    target.to_mat4() * m.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    fn pointer(down: bool, pressed: bool) -> PointerState {
        PointerState {
            left_down: down,
            left_pressed: pressed,
            in_viewport: true,
            ..Default::default()
        }
    }

    fn cube4() -> OrientedBox {
        OrientedBox::from_min_max(Vec3::ZERO, Vec3::splat(4.0))
    }

    /// Ray entering the +X face at (4, 2, 2), coming from above and outside
    fn press_ray() -> Ray {
        Ray::new(Vec3::new(10.0, 2.0, 6.0), Vec3::new(-6.0, 0.0, -4.0))
    }

    /// Vertical ray crossing the x axis line of the +X face at `x`
    fn ray_at_x(x: f32) -> Ray {
        Ray::new(Vec3::new(x, 2.0, 10.0), -Vec3::Z)
    }

    fn drag_to(mode: BoxEditMode, x: f32) -> OrientedBox {
        let bbox = cube4();
        let mut editor = BoxEditor::new();
        let mut render = RenderList::new();

        let edit = editor.edit(&bbox, mode, &pointer(true, true), Some(press_ray()), &mut render);
        assert!(edit.active);
        assert!(editor.is_dragging());

        let edit = editor.edit(&bbox, mode, &pointer(true, false), Some(ray_at_x(x)), &mut render);
        assert!(edit.active);
        bbox.apply_transform(&edit.transform.unwrap())
    }

    #[test]
    fn test_face_from_normal() {
        let face = BoxFace::from_normal(-Vec3::Y).unwrap();
        assert_eq!(face.axis, Axis::Y);
        assert!(!face.positive);
        assert_eq!(face.normal(), -Vec3::Y);
        assert!(BoxFace::from_normal(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_hover_highlights_face() {
        let mut editor = BoxEditor::new();
        let mut render = RenderList::new();
        let edit = editor.edit(&cube4(), BoxEditMode::Resize, &pointer(false, false), Some(press_ray()), &mut render);
        assert_eq!(edit, BoxEdit::IDLE);
        assert_eq!(editor.hovered(), Some(BoxFace { axis: Axis::X, positive: true }));
        assert_eq!(render.boxes().len(), 1);
    }

    #[test]
    fn test_resize_moves_one_face() {
        let resized = drag_to(BoxEditMode::Resize, 6.3);
        let (min, max) = resized.aabb();
        assert!(approx(min, Vec3::ZERO), "min={:?}", min);
        assert!(approx(max, Vec3::new(6.0, 4.0, 4.0)), "max={:?}", max);
    }

    #[test]
    fn test_resize_keeps_one_voxel() {
        let resized = drag_to(BoxEditMode::Resize, -3.0);
        let (min, max) = resized.aabb();
        assert!(approx(min, Vec3::ZERO));
        assert!(approx(max, Vec3::new(1.0, 4.0, 4.0)), "max={:?}", max);
    }

    #[test]
    fn test_move_translates() {
        let moved = drag_to(BoxEditMode::Move, 6.0);
        let (min, max) = moved.aabb();
        assert!(approx(min, Vec3::new(2.0, 0.0, 0.0)));
        assert!(approx(max, Vec3::new(6.0, 4.0, 4.0)));
        assert!(approx(moved.extents[0], cube4().extents[0]));
    }

    #[test]
    fn test_release_ends_drag() {
        let bbox = cube4();
        let mut editor = BoxEditor::new();
        let mut render = RenderList::new();
        editor.edit(&bbox, BoxEditMode::Resize, &pointer(true, true), Some(press_ray()), &mut render);
        let edit = editor.edit(&bbox, BoxEditMode::Resize, &pointer(false, false), Some(ray_at_x(5.0)), &mut render);
        assert_eq!(edit, BoxEdit::IDLE);
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_incremental_transform() {
        let current = cube4();
        let target = OrientedBox::from_min_max(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(4.0, 4.0, 6.0));
        let t = incremental_transform(&current, &target);
        let (min, max) = current.apply_transform(&t).aabb();
        assert!(approx(min, Vec3::new(-1.0, 0.0, 0.0)));
        assert!(approx(max, Vec3::new(4.0, 4.0, 6.0)));

        let flat = OrientedBox::from_min_max(Vec3::ZERO, Vec3::new(4.0, 4.0, 0.0));
        assert_eq!(incremental_transform(&flat, &target), Mat4::IDENTITY);
    }

    #[test]
    fn test_empty_box_is_never_edited() {
        let mut editor = BoxEditor::new();
        let mut render = RenderList::new();
        let edit = editor.edit(&OrientedBox::EMPTY, BoxEditMode::Move, &pointer(true, true), Some(press_ray()), &mut render);
        assert_eq!(edit, BoxEdit::IDLE);
        assert!(render.boxes().is_empty());
    }
}
