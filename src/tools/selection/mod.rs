//! Selection tool
//!
//! Click and drag over the scene to span a selection box, one voxel face at
//! a time. Once a selection exists its faces can be dragged to resize or
//! move it, and the side panel edits it numerically.

mod panel;

use macroquad::logging::info;

use super::{Tool, ToolContext, ToolState};
use crate::box_edit::BoxEditMode;
use crate::geometry::OrientedBox;
use crate::gesture::{Gesture3d, GestureEvent, GesturePhase, GestureResponse, SnapMask};
use crate::render::{OverlayEffect, RenderList};
use crate::scene::Rgba;
use crate::session::{DragMode, EditorSession, Painter};
use crate::ui::{PanelUi, Rect};

const HOVER_COLOR: Rgba = [255, 255, 0, 255];

pub struct SelectionTool {
    active: bool,
    state: ToolState,
    /// Face rect under the pointer when the current drag began
    start_rect: OrientedBox,
}

impl SelectionTool {
    pub const ID: &'static str = "tool.selection";

    pub fn new() -> Self {
        Self {
            active: false,
            state: ToolState::Continue,
            start_rect: OrientedBox::EMPTY,
        }
    }

    fn on_hover(event: &GestureEvent, session: &mut EditorSession, render: &mut RenderList) -> GestureResponse {
        if event.snapped.intersects(SnapMask::SELECTION_OUT | SnapMask::SELECTION_IN) {
            return GestureResponse::Ignored;
        }
        session.set_help_text("Click and drag to set selection.");
        let rect = OrientedBox::face_rect(event.pos, event.normal);
        render.push_box(rect, HOVER_COLOR, OverlayEffect::Wireframe);
        GestureResponse::Accepted
    }

    fn on_drag(&mut self, event: &GestureEvent, session: &mut EditorSession) -> GestureResponse {
        session.set_help_text("Drag.");

        let rect = OrientedBox::face_rect(event.pos, event.normal);
        if event.phase == GesturePhase::Begin {
            self.start_rect = rect;
        }

        session.selection = self.start_rect.union(&rect);
        // A flat selection grows one voxel, into the volume when it was hit
        if session.selection.volume() == 0.0 {
            let dir = if event.snapped == SnapMask::VOLUME { -1.0 } else { 1.0 };
            let p = event.pos + event.normal * dir;
            session.selection = session.selection.extend_to_point(p);
        }
        GestureResponse::Accepted
    }
}

impl Default for SelectionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SelectionTool {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn label(&self) -> &'static str {
        "Selection"
    }

    fn active(&self) -> bool {
        self.active
    }

    fn do_activate(&mut self) -> bool {
        info!("tool activated: {}", self.id());
        self.active = true;
        true
    }

    fn do_deactivate(&mut self) -> bool {
        info!("tool deactivated: {}", self.id());
        self.start_rect = OrientedBox::EMPTY;
        self.active = false;
        true
    }

    fn shows_mask(&self) -> bool {
        true
    }

    fn iter(&mut self, ctx: &mut ToolContext, _painter: &Painter, _viewport: Rect) -> ToolState {
        let session = &mut *ctx.session;
        let gestures = &mut *ctx.gestures;
        let render = &mut *ctx.render;

        let mode = match session.drag_mode {
            DragMode::Resize => BoxEditMode::Resize,
            DragMode::Move => BoxEditMode::Move,
        };
        let edit = ctx
            .box_editor
            .edit(&session.selection, mode, gestures.pointer(), gestures.ray(), render);
        if edit.active {
            if let Some(transform) = edit.transform {
                session.selection = session.selection.apply_transform(&transform);
            }
            return self.state;
        }

        let mut mask = session.snap_mask | SnapMask::ROUNDED;
        mask.remove(SnapMask::SELECTION_IN | SnapMask::SELECTION_OUT);

        gestures.gesture3d(&Gesture3d::hover(mask | SnapMask::SELECTION_OUT), |event| {
            Self::on_hover(event, session, render)
        });
        gestures.gesture3d(&Gesture3d::drag(mask), |event| self.on_drag(event, session));

        self.state
    }

    fn gui(&mut self, ctx: &mut ToolContext, ui: &mut dyn PanelUi) {
        panel::selection_panel(ctx.session, ctx.actions, ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::box_edit::BoxEditor;
    use crate::geometry::Ray;
    use crate::gesture::{GestureDispatcher, PointerState};
    use crate::scene::VoxelImage;
    use crate::ui::ActionRegistry;
    use macroquad::math::{Mat4, Vec3};

    struct Harness {
        session: EditorSession,
        gestures: GestureDispatcher,
        box_editor: BoxEditor,
        actions: ActionRegistry,
        render: RenderList,
    }

    impl Harness {
        fn new(image: VoxelImage) -> Self {
            Self {
                session: EditorSession::new(image),
                gestures: GestureDispatcher::new(),
                box_editor: BoxEditor::new(),
                actions: ActionRegistry::with_defaults(),
                render: RenderList::new(),
            }
        }

        /// One frame: dispatcher setup, tool update, dispatcher teardown
        fn frame(&mut self, tool: &mut SelectionTool, pointer: PointerState, ray: Ray) -> ToolState {
            self.render.clear();
            self.gestures.begin_frame(pointer, Some(ray), &self.session.image, &self.session.selection);
            let mut ctx = ToolContext {
                session: &mut self.session,
                gestures: &mut self.gestures,
                box_editor: &mut self.box_editor,
                actions: &self.actions,
                render: &mut self.render,
            };
            let state = tool.iter(&mut ctx, &Painter::default(), Rect::new(0.0, 0.0, 800.0, 600.0));
            self.gestures.end_frame();
            state
        }
    }

    fn pointer(down: bool, pressed: bool, released: bool) -> PointerState {
        PointerState {
            left_down: down,
            left_pressed: pressed,
            left_released: released,
            in_viewport: true,
            ..Default::default()
        }
    }

    fn down_at(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), -Vec3::Z)
    }

    fn event(pos: Vec3, normal: Vec3, snapped: SnapMask, phase: GesturePhase) -> GestureEvent {
        GestureEvent { pos, normal, snapped, phase }
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    fn assert_bounds(bbox: &OrientedBox, min: Vec3, max: Vec3) {
        let (lo, hi) = bbox.aabb();
        assert!(approx(lo, min) && approx(hi, max), "bounds {:?}..{:?}, expected {:?}..{:?}", lo, hi, min, max);
    }

    #[test]
    fn test_drag_raw_events() {
        let mut tool = SelectionTool::new();
        let mut session = EditorSession::new(VoxelImage::new());

        tool.on_drag(&event(Vec3::new(2.0, 0.0, 0.0), Vec3::Z, SnapMask::PLANE, GesturePhase::Begin), &mut session);
        tool.on_drag(&event(Vec3::new(5.0, 0.0, 0.0), Vec3::Z, SnapMask::PLANE, GesturePhase::End), &mut session);

        assert_bounds(&session.selection, Vec3::new(1.5, -0.5, 0.0), Vec3::new(5.5, 0.5, 1.0));
        assert_eq!(session.help_text, "Drag.");
    }

    #[test]
    fn test_drag_through_dispatcher_snaps_to_voxels() {
        let mut h = Harness::new(VoxelImage::new());
        let mut tool = SelectionTool::new();
        tool.activate();

        h.frame(&mut tool, pointer(true, true, false), down_at(2.2, 0.3));
        h.frame(&mut tool, pointer(true, false, false), down_at(3.7, 0.3));
        let state = h.frame(&mut tool, pointer(false, false, true), down_at(5.3, 0.3));

        assert_eq!(state, ToolState::Continue);
        assert_bounds(&h.session.selection, Vec3::new(2.0, 0.0, 0.0), Vec3::new(6.0, 1.0, 1.0));
        assert!(!h.gestures.is_dragging());
    }

    #[test]
    fn test_dispatcher_drag_on_voxel_boundaries() {
        let mut h = Harness::new(VoxelImage::new());
        let mut tool = SelectionTool::new();
        tool.activate();

        h.frame(&mut tool, pointer(true, true, false), down_at(2.0, 0.0));
        h.frame(&mut tool, pointer(false, false, true), down_at(5.0, 0.0));

        // Rounded snapping moves y = 0 to the voxel center 0.5, so the box
        // covers the row y in [0, 1] rather than straddling y = 0
        assert_bounds(&h.session.selection, Vec3::new(2.0, 0.0, 0.0), Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn test_same_plane_drag_is_one_voxel_thick() {
        let mut tool = SelectionTool::new();
        let mut session = EditorSession::new(VoxelImage::new());
        for (x, phase) in [(0.5, GesturePhase::Begin), (3.5, GesturePhase::Update), (3.5, GesturePhase::End)] {
            tool.on_drag(&event(Vec3::new(x, 0.5, 0.0), Vec3::Z, SnapMask::PLANE, phase), &mut session);
            let (min, max) = session.selection.aabb();
            assert!((max.z - min.z - 1.0).abs() < 1e-5);
            assert!(session.selection.volume() > 0.0);
        }
    }

    #[test]
    fn test_volume_hit_grows_into_the_volume() {
        let mut tool = SelectionTool::new();
        let mut session = EditorSession::new(VoxelImage::new());
        let top = event(Vec3::new(0.5, 0.5, 1.0), Vec3::Z, SnapMask::VOLUME, GesturePhase::Begin);
        tool.on_drag(&top, &mut session);
        assert_bounds(&session.selection, Vec3::ZERO, Vec3::ONE);

        // Side face of a voxel: grows against the normal
        let side = event(Vec3::new(3.0, 0.5, 0.5), Vec3::X, SnapMask::VOLUME, GesturePhase::Begin);
        tool.on_drag(&side, &mut session);
        assert_bounds(&session.selection, Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn test_anchor_captured_once_per_drag() {
        let mut tool = SelectionTool::new();
        let mut session = EditorSession::new(VoxelImage::new());
        tool.on_drag(&event(Vec3::new(2.0, 0.0, 0.0), Vec3::Z, SnapMask::PLANE, GesturePhase::Begin), &mut session);
        tool.on_drag(&event(Vec3::new(8.0, 0.0, 0.0), Vec3::Z, SnapMask::PLANE, GesturePhase::Update), &mut session);
        tool.on_drag(&event(Vec3::new(3.0, 0.0, 0.0), Vec3::Z, SnapMask::PLANE, GesturePhase::Update), &mut session);
        assert_bounds(&session.selection, Vec3::new(1.5, -0.5, 0.0), Vec3::new(3.5, 0.5, 1.0));
    }

    #[test]
    fn test_hover_previews_face_and_skips_selection() {
        let mut render = RenderList::new();
        let mut session = EditorSession::new(VoxelImage::new());

        let on_plane = event(Vec3::new(0.5, 0.5, 0.0), Vec3::Z, SnapMask::PLANE, GesturePhase::Hover);
        assert_eq!(SelectionTool::on_hover(&on_plane, &mut session, &mut render), GestureResponse::Accepted);
        assert_eq!(session.help_text, "Click and drag to set selection.");
        assert_eq!(render.boxes().len(), 1);
        assert_eq!(render.boxes()[0].color, [255, 255, 0, 255]);
        assert_eq!(render.boxes()[0].effect, OverlayEffect::Wireframe);

        let on_selection = GestureEvent { snapped: SnapMask::SELECTION_OUT, ..on_plane };
        assert_eq!(SelectionTool::on_hover(&on_selection, &mut session, &mut render), GestureResponse::Ignored);
        assert_eq!(render.boxes().len(), 1);
    }

    #[test]
    fn test_hover_inside_selection_is_ignored() {
        let mut render = RenderList::new();
        let mut session = EditorSession::new(VoxelImage::new());
        let inside = event(Vec3::new(1.5, 1.5, 1.5), Vec3::Z, SnapMask::SELECTION_IN, GesturePhase::Hover);
        assert_eq!(SelectionTool::on_hover(&inside, &mut session, &mut render), GestureResponse::Ignored);
        assert!(render.boxes().is_empty());
        assert!(session.help_text.is_empty());
    }

    #[test]
    fn test_move_mode_applies_box_edit_transform() {
        let mut h = Harness::new(VoxelImage::new());
        let old = OrientedBox::from_min_max(Vec3::ZERO, Vec3::splat(4.0));
        h.session.selection = old;
        h.session.drag_mode = DragMode::Move;
        let mut tool = SelectionTool::new();
        tool.activate();

        // Press on the +X face, then drag two voxels outward
        let press = Ray::new(Vec3::new(10.0, 2.0, 6.0), Vec3::new(-6.0, 0.0, -4.0));
        h.frame(&mut tool, pointer(true, true, false), press);
        assert!(h.box_editor.is_dragging());
        h.frame(&mut tool, pointer(true, false, false), Ray::new(Vec3::new(6.0, 2.0, 10.0), -Vec3::Z));

        let expected = old.apply_transform(&Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        assert!(approx(h.session.selection.center, expected.center));
        for i in 0..3 {
            assert!(approx(h.session.selection.extents[i], expected.extents[i]));
        }
        // No gesture ran while the box editor owned the pointer
        assert!(!h.gestures.is_dragging());
        assert!(h.session.help_text.is_empty());
    }

    #[test]
    fn test_drag_mode_survives_reactivation() {
        let mut session = EditorSession::new(VoxelImage::new());
        let mut tool = SelectionTool::new();
        tool.activate();
        session.drag_mode = DragMode::Move;
        tool.deactivate();
        drop(tool);

        let mut tool = SelectionTool::new();
        assert!(tool.activate());
        assert_eq!(session.drag_mode, DragMode::Move);
        assert!(tool.shows_mask());
    }
}
