//! Per-frame gesture dispatch
//!
//! `begin_frame` resolves the pointer ray against the scene once. Every
//! `gesture3d` call then picks the nearest hit its snap mask allows and runs
//! the handler right away. A drag belongs to the gesture that began it; if
//! that gesture stops being registered the drag is dropped at `end_frame`.

use macroquad::math::Vec3;

use super::{Gesture3d, GestureEvent, GestureKind, GesturePhase, GestureResponse, SnapMask};
use crate::geometry::{ray_aabb, ray_plane_intersection, OrientedBox, Ray};
use crate::scene::VoxelImage;

/// Mouse state for the current frame, in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool,
    pub left_released: bool,
    /// Pointer is over the 3D viewport (not over the side panel)
    pub in_viewport: bool,
}

/// One candidate surface under the pointer
#[derive(Debug, Clone, Copy)]
struct SnapHit {
    t: f32,
    pos: Vec3,
    normal: Vec3,
    snapped: SnapMask,
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    gesture: Gesture3d,
    /// Plane of the begin hit, used when the pointer leaves every surface
    plane_pos: Vec3,
    plane_normal: Vec3,
    snapped: SnapMask,
    registered: bool,
}

#[derive(Debug, Default)]
pub struct GestureDispatcher {
    pointer: PointerState,
    ray: Option<Ray>,
    hits: Vec<SnapHit>,
    drag: Option<ActiveDrag>,
    consumed: bool,
}

impl GestureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture input and precompute every snap candidate for this frame
    pub fn begin_frame(
        &mut self,
        pointer: PointerState,
        ray: Option<Ray>,
        image: &VoxelImage,
        selection: &OrientedBox,
    ) {
        self.pointer = pointer;
        self.ray = ray;
        self.consumed = false;
        self.hits.clear();
        if let Some(drag) = &mut self.drag {
            drag.registered = false;
        }

        let Some(ray) = ray else {
            return;
        };

        if let Some(hit) = image.raycast(&ray) {
            self.hits.push(SnapHit {
                t: hit.t,
                pos: hit.position,
                normal: hit.normal,
                snapped: SnapMask::VOLUME,
            });
        }

        // Ground plane only counts when seen from above
        if ray.direction.z < 0.0 {
            if let Some(t) = ray_plane_intersection(&ray, Vec3::ZERO, Vec3::Z) {
                self.hits.push(SnapHit {
                    t,
                    pos: ray.at(t),
                    normal: Vec3::Z,
                    snapped: SnapMask::PLANE,
                });
            }
        }

        if !selection.is_empty() {
            let (min, max) = selection.aabb();
            if let Some(hit) = ray_aabb(&ray, min, max) {
                if hit.t_near >= 0.0 {
                    self.hits.push(SnapHit {
                        t: hit.t_near,
                        pos: ray.at(hit.t_near),
                        normal: hit.near_normal,
                        snapped: SnapMask::SELECTION_OUT,
                    });
                }
                self.hits.push(SnapHit {
                    t: hit.t_far,
                    pos: ray.at(hit.t_far),
                    normal: -hit.far_normal,
                    snapped: SnapMask::SELECTION_IN,
                });
            }
        }
    }

    /// Register a gesture for this frame and dispatch to `handler`.
    ///
    /// Returns true when the gesture consumed the pointer.
    pub fn gesture3d(
        &mut self,
        gesture: &Gesture3d,
        mut handler: impl FnMut(&GestureEvent) -> GestureResponse,
    ) -> bool {
        match gesture.kind {
            GestureKind::Hover => {
                if self.drag.is_some() || self.pointer.left_down || !self.pointer.in_viewport {
                    return false;
                }
                let Some(hit) = self.pick(gesture.snap_mask) else {
                    return false;
                };
                let event = Self::event(hit, gesture.snap_mask, GesturePhase::Hover);
                handler(&event) == GestureResponse::Accepted
            }
            GestureKind::Drag => match self.drag {
                Some(drag) if drag.gesture == *gesture => self.continue_drag(drag, handler),
                Some(_) => false,
                None => self.start_drag(gesture, handler),
            },
        }
    }

    fn start_drag(
        &mut self,
        gesture: &Gesture3d,
        mut handler: impl FnMut(&GestureEvent) -> GestureResponse,
    ) -> bool {
        if self.consumed || !self.pointer.left_pressed || !self.pointer.in_viewport {
            return false;
        }
        let Some(hit) = self.pick(gesture.snap_mask) else {
            return false;
        };
        let event = Self::event(hit, gesture.snap_mask, GesturePhase::Begin);
        if handler(&event) != GestureResponse::Accepted {
            return false;
        }
        self.consumed = true;

        if self.pointer.left_released {
            // Click without any held frame
            handler(&GestureEvent { phase: GesturePhase::End, ..event });
            return true;
        }
        self.drag = Some(ActiveDrag {
            gesture: *gesture,
            plane_pos: event.pos,
            plane_normal: event.normal,
            snapped: event.snapped,
            registered: true,
        });
        true
    }

    fn continue_drag(
        &mut self,
        drag: ActiveDrag,
        mut handler: impl FnMut(&GestureEvent) -> GestureResponse,
    ) -> bool {
        let phase = if self.pointer.left_released || !self.pointer.left_down {
            GesturePhase::End
        } else {
            GesturePhase::Update
        };
        let mask = drag.gesture.snap_mask;

        let hit = self.pick(mask).or_else(|| {
            let ray = self.ray?;
            let t = ray_plane_intersection(&ray, drag.plane_pos, drag.plane_normal)
                .or_else(|| ray_plane_intersection(&ray, drag.plane_pos, -drag.plane_normal))?;
            Some(SnapHit {
                t,
                pos: ray.at(t),
                normal: drag.plane_normal,
                snapped: drag.snapped,
            })
        });

        if let Some(hit) = hit {
            handler(&Self::event(hit, mask, phase));
        }

        self.consumed = true;
        self.drag = match phase {
            GesturePhase::End => None,
            _ => Some(ActiveDrag { registered: true, ..drag }),
        };
        true
    }

    /// Drop a drag whose gesture was not registered this frame
    pub fn end_frame(&mut self) {
        if matches!(self.drag, Some(ActiveDrag { registered: false, .. })) {
            self.drag = None;
        }
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn ray(&self) -> Option<Ray> {
        self.ray
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Nearest candidate allowed by `mask`
    fn pick(&self, mask: SnapMask) -> Option<SnapHit> {
        self.hits
            .iter()
            .filter(|h| mask.contains(h.snapped))
            .min_by(|a, b| a.t.total_cmp(&b.t))
            .copied()
    }

    fn event(hit: SnapHit, mask: SnapMask, phase: GesturePhase) -> GestureEvent {
        let pos = if mask.contains(SnapMask::ROUNDED) {
            round_to_voxel(hit.pos, hit.normal)
        } else {
            hit.pos
        };
        GestureEvent {
            pos,
            normal: hit.normal,
            snapped: hit.snapped,
            phase,
        }
    }
}

/// Snap to the center of the voxel face under `pos`: coordinates along the
/// face go to voxel centers, the coordinate along the normal to the face plane.
fn round_to_voxel(pos: Vec3, normal: Vec3) -> Vec3 {
    let mut out = pos;
    for axis in 0..3 {
        out[axis] = if normal[axis].abs() > 0.5 {
            pos[axis].round()
        } else {
            pos[axis].floor() + 0.5
        };
    }
    out
}
