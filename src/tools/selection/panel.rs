//! Selection side panel: drag mode, actions and the numeric box editor

use macroquad::math::IVec3;

use crate::geometry::OrientedBox;
use crate::session::{DragMode, EditorSession};
use crate::ui::{ActionRegistry, PanelUi};

/// Integer (origin, size) of a box, origin being the minimum corner.
///
/// Per world axis the half-size is `|e0[a] + e1[a] + e2[a]|`.
pub fn origin_size(bbox: &OrientedBox) -> (IVec3, IVec3) {
    let [e0, e1, e2] = bbox.extents;
    let mag = (e0 + e1 + e2).abs();
    let size = (mag * 2.0).round().as_ivec3();
    let origin = (bbox.center - mag).round().as_ivec3();
    (origin, size)
}

/// Axis-aligned box with minimum corner `origin` and dimensions `size`
pub fn box_from_origin_size(origin: IVec3, size: IVec3) -> OrientedBox {
    let half = size.as_vec3() / 2.0;
    OrientedBox::from_extents(origin.as_vec3() + half, half)
}

pub fn selection_panel(session: &mut EditorSession, actions: &ActionRegistry, ui: &mut dyn PanelUi) {
    if session.selection.is_empty() {
        return;
    }

    ui.text("Drag mode");
    let mut mode = session.drag_mode.index();
    if ui.combo("##drag_mode", &mut mode, &DragMode::labels()) {
        if let Some(mode) = DragMode::from_index(mode) {
            session.drag_mode = mode;
        }
    }

    ui.group_begin(None);
    if ui.button("Reset", 1.0) {
        actions.run("selection.reset", session);
        ui.group_end();
        return;
    }
    if ui.button("Fill", 1.0) {
        actions.run("selection.fill", session);
    }
    ui.row_begin(2);
    if ui.button("Add", 0.5) {
        actions.run("selection.add", session);
    }
    if ui.button("Sub", 1.0) {
        actions.run("selection.sub", session);
    }
    ui.row_end();
    if ui.button("Cut as new layer", 1.0) {
        actions.run("selection.cut_as_new_layer", session);
    }
    ui.group_end();

    let (mut origin, mut size) = origin_size(&session.selection);

    ui.group_begin(Some("Origin"));
    ui.input_int("x", &mut origin.x);
    ui.input_int("y", &mut origin.y);
    ui.input_int("z", &mut origin.z);
    ui.group_end();

    ui.group_begin(Some("Size"));
    ui.input_int("w", &mut size.x);
    ui.input_int("h", &mut size.y);
    ui.input_int("d", &mut size.z);
    size = size.max(IVec3::ONE);
    ui.group_end();

    session.selection = box_from_origin_size(origin, size);
}
