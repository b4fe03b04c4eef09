//! Input state for UI interaction

use macroquad::prelude::*;

use super::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub right_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub scroll: f32,         // Scroll wheel delta
}

impl MouseState {
    /// Read the mouse from macroquad
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            scroll: mouse_wheel().1,
        }
    }

    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// Text typed this frame, for focused fields
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pub chars: Vec<char>,
    pub backspace: bool,
    pub enter: bool,
    pub escape: bool,
}

impl KeyboardState {
    pub fn capture() -> Self {
        let mut chars = Vec::new();
        while let Some(c) = get_char_pressed() {
            chars.push(c);
        }
        Self {
            chars,
            backspace: is_key_pressed(KeyCode::Backspace),
            enter: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            escape: is_key_pressed(KeyCode::Escape),
        }
    }
}

/// UI context passed through the frame
#[derive(Debug, Default)]
pub struct UiContext {
    pub mouse: MouseState,
    pub keys: KeyboardState,
    /// Text field being edited, with its edit buffer
    pub focus: Option<(u64, String)>,
    /// Counter for generating unique IDs
    id_counter: u64,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a unique ID for a widget. IDs are stable as long as the
    /// panel lays out the same widgets in the same order.
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState, keys: KeyboardState) {
        self.mouse = mouse;
        self.keys = keys;
        self.id_counter = 0;
    }

    pub fn is_focused(&self, id: u64) -> bool {
        matches!(self.focus, Some((f, _)) if f == id)
    }

    /// A text field owns the keyboard
    pub fn text_editing(&self) -> bool {
        self.focus.is_some()
    }
}
