//! Immediate-mode UI for the side panel
//!
//! Design principles:
//! - Immediate mode (no retained state, rebuilt each frame)
//! - Simple rectangle-based layout
//! - Macroquad integration for rendering
//!
//! Tool panels are written against the `PanelUi` trait rather than the
//! macroquad-backed `SidePanel`, so their logic can run without a window.

mod rect;
mod input;
mod theme;
mod widgets;
mod side_panel;
mod shortcuts;
#[cfg(test)]
mod scripted;
pub mod actions;

pub use rect::*;
pub use input::*;
pub use theme::*;
pub use side_panel::{draw_help_text, SidePanel};
pub use shortcuts::shortcuts_panel;
#[cfg(test)]
pub use scripted::ScriptedUi;
pub use actions::{ActionContext, ActionRegistry, Shortcut};

/// Widgets a tool panel can ask for, laid out top to bottom
pub trait PanelUi {
    /// Line of plain text
    fn text(&mut self, text: &str);

    /// Choice among `items`; returns true when `selected` changed
    fn combo(&mut self, label: &str, selected: &mut usize, items: &[&str]) -> bool;

    /// Open a framed group, optionally titled
    fn group_begin(&mut self, label: Option<&str>);

    fn group_end(&mut self);

    /// Put the next `columns` widgets side by side
    fn row_begin(&mut self, columns: usize);

    fn row_end(&mut self);

    /// Returns true when clicked. `width` is a fraction of the line (ignored inside rows).
    fn button(&mut self, label: &str, width: f32) -> bool;

    /// Integer field; returns true when `value` changed
    fn input_int(&mut self, label: &str, value: &mut i32) -> bool;

    /// Text field; returns true when an edit of `value` was committed
    fn input_text(&mut self, label: &str, value: &mut String) -> bool;
}
