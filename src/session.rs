//! Editor session state
//!
//! Process-wide state shared by tools, actions and the renderer. It outlives
//! any single tool activation: the selection volume and the last used drag
//! mode survive switching the selection tool off and on again.

use crate::geometry::OrientedBox;
use crate::gesture::SnapMask;
use crate::scene::{Rgba, VoxelImage};

/// How a box-editor drag on a selection face manipulates the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Resize,
    Move,
}

impl DragMode {
    pub const ALL: [DragMode; 2] = [DragMode::Resize, DragMode::Move];

    pub fn label(&self) -> &'static str {
        match self {
            DragMode::Resize => "Resize",
            DragMode::Move => "Move",
        }
    }

    pub fn labels() -> [&'static str; 2] {
        [DragMode::Resize.label(), DragMode::Move.label()]
    }

    pub fn index(&self) -> usize {
        match self {
            DragMode::Resize => 0,
            DragMode::Move => 1,
        }
    }

    pub fn from_index(i: usize) -> Option<DragMode> {
        DragMode::ALL.get(i).copied()
    }
}

/// Active paint used by volumetric actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    pub color: Rgba,
}

impl Default for Painter {
    fn default() -> Self {
        Self { color: [90, 170, 230, 255] }
    }
}

/// State shared across the whole editing session
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    /// Current selection volume (EMPTY when nothing is selected)
    pub selection: OrientedBox,
    /// Last used box-editor drag mode
    pub drag_mode: DragMode,
    /// Globally enabled snap targets
    pub snap_mask: SnapMask,
    pub image: VoxelImage,
    pub painter: Painter,
    /// One-line hint shown under the viewport, rewritten every frame
    pub help_text: String,
}

impl EditorSession {
    pub fn new(image: VoxelImage) -> Self {
        Self {
            image,
            ..Default::default()
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn set_help_text(&mut self, text: &str) {
        self.help_text.clear();
        self.help_text.push_str(text);
    }
}
