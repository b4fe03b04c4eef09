//! Editor tools
//!
//! A tool is created when the user switches to it and dropped when they
//! switch away. While active it gets one `iter` call per frame, where it
//! registers gestures and edits the session, and one `gui` call to fill the
//! side panel.
//!
//! # Lifecycle
//!
//! ```text
//! [Inactive] --activate()--> [Active] --deactivate()--> [Inactive]
//! ```

pub mod selection;

pub use selection::SelectionTool;

use crate::box_edit::BoxEditor;
use crate::gesture::GestureDispatcher;
use crate::render::RenderList;
use crate::session::{EditorSession, Painter};
use crate::ui::{ActionRegistry, PanelUi, Rect};

/// What a tool reports after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    #[default]
    Continue,
    /// The tool finished and can be dropped
    Done,
}

/// Everything a tool may touch during a frame
pub struct ToolContext<'a> {
    pub session: &'a mut EditorSession,
    pub gestures: &'a mut GestureDispatcher,
    pub box_editor: &'a mut BoxEditor,
    pub actions: &'a ActionRegistry,
    pub render: &'a mut RenderList,
}

/// Base trait for all tools
pub trait Tool {
    /// Unique identifier, also the id of the action that toggles the tool
    fn id(&self) -> &'static str;

    /// Human-readable label
    fn label(&self) -> &'static str;

    /// Whether this tool is currently active
    fn active(&self) -> bool;

    /// Attempt to activate the tool. Fails if it is already active.
    fn activate(&mut self) -> bool {
        if self.active() {
            return false;
        }
        self.do_activate()
    }

    /// Attempt to deactivate the tool. Fails if it is not active.
    fn deactivate(&mut self) -> bool {
        if !self.active() {
            return false;
        }
        self.do_deactivate()
    }

    /// Activation logic: set `active` and do any setup
    fn do_activate(&mut self) -> bool {
        true
    }

    /// Deactivation logic: clear `active` and do any cleanup
    fn do_deactivate(&mut self) -> bool {
        true
    }

    /// Whether the selection mask should be drawn while this tool is active
    fn shows_mask(&self) -> bool {
        false
    }

    /// Per-frame update
    fn iter(&mut self, ctx: &mut ToolContext, painter: &Painter, viewport: Rect) -> ToolState;

    /// Side panel content
    fn gui(&mut self, ctx: &mut ToolContext, ui: &mut dyn PanelUi);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestTool {
        active: bool,
        activate_count: u32,
        deactivate_count: u32,
    }

    impl Tool for TestTool {
        fn id(&self) -> &'static str { "test" }
        fn label(&self) -> &'static str { "Test" }
        fn active(&self) -> bool { self.active }

        fn do_activate(&mut self) -> bool {
            self.active = true;
            self.activate_count += 1;
            true
        }

        fn do_deactivate(&mut self) -> bool {
            self.active = false;
            self.deactivate_count += 1;
            true
        }

        fn iter(&mut self, _ctx: &mut ToolContext, _painter: &Painter, _viewport: Rect) -> ToolState {
            ToolState::Done
        }

        fn gui(&mut self, _ctx: &mut ToolContext, _ui: &mut dyn PanelUi) {}
    }

    #[test]
    fn test_activation_lifecycle() {
        let mut tool = TestTool { active: false, activate_count: 0, deactivate_count: 0 };

        assert!(!tool.active());
        assert!(tool.activate());
        assert!(tool.active());
        assert_eq!(tool.activate_count, 1);

        // Can't activate twice
        assert!(!tool.activate());
        assert_eq!(tool.activate_count, 1);

        assert!(tool.deactivate());
        assert!(!tool.active());
        assert_eq!(tool.deactivate_count, 1);

        assert!(!tool.deactivate());
        assert_eq!(tool.deactivate_count, 1);
        assert!(!tool.shows_mask());
    }
}
