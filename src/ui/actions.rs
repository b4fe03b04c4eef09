//! Action registry
//!
//! Named operations reachable from panel buttons and keyboard shortcuts.
//! Actions that change the editor session carry a `run` function; the others
//! (tool switching) are handled by the frame loop from their id.
//!
//! # Example
//! ```ignore
//! let mut registry = ActionRegistry::new();
//! for action in selection_actions() {
//!     registry.register(action);
//! }
//!
//! // Panel button
//! if ui.button("Fill", 1.0) {
//!     registry.run("selection.fill", &mut session);
//! }
//! ```

use macroquad::logging::info;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::fmt;

use crate::geometry::OrientedBox;
use crate::session::EditorSession;

/// A keyboard shortcut (key + modifiers)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: KeyCode,
    pub ctrl: bool, // Cmd on Mac
    pub shift: bool,
    pub alt: bool,
}

/// Why a shortcut string from the settings file was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    Empty,
    UnknownModifier(String),
    UnknownKey(String),
}

impl fmt::Display for ShortcutParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutParseError::Empty => write!(f, "empty shortcut"),
            ShortcutParseError::UnknownModifier(m) => write!(f, "unknown modifier '{}'", m),
            ShortcutParseError::UnknownKey(k) => write!(f, "unknown key '{}'", k),
        }
    }
}

impl std::error::Error for ShortcutParseError {}

impl Shortcut {
    /// Just a key, no modifiers
    pub fn key(key: KeyCode) -> Self {
        Self { key, ctrl: false, shift: false, alt: false }
    }

    /// Ctrl/Cmd + key
    #[cfg(test)]
    pub fn ctrl(key: KeyCode) -> Self {
        Self { ctrl: true, ..Self::key(key) }
    }

    /// Shift + key
    #[cfg(test)]
    pub fn shift(key: KeyCode) -> Self {
        Self { shift: true, ..Self::key(key) }
    }

    /// Check if this shortcut is currently pressed
    pub fn is_pressed(&self) -> bool {
        if !is_key_pressed(self.key) {
            return false;
        }

        let ctrl_down = is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper);
        let shift_down = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        let alt_down = is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt);

        self.ctrl == ctrl_down && self.shift == shift_down && self.alt == alt_down
    }

    /// Format for display and for the settings file, e.g. "Ctrl+Shift+R"
    pub fn to_config_string(&self) -> String {
        let mut out = String::new();
        if self.ctrl {
            out.push_str("Ctrl+");
        }
        if self.shift {
            out.push_str("Shift+");
        }
        if self.alt {
            out.push_str("Alt+");
        }
        out.push_str(key_name(self.key));
        out
    }

    /// Parse "Ctrl+Shift+R" style strings. Modifiers and key names are case-insensitive.
    pub fn parse(s: &str) -> Result<Self, ShortcutParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortcutParseError::Empty);
        }
        // "Ctrl++" binds the plus key
        let (mods, key) = match s.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None => match s.rsplit_once('+') {
                Some((mods, key)) => (mods, key),
                None => ("", s),
            },
        };

        let key_str = key.trim();
        let key = key_from_name(key_str)
            .ok_or_else(|| ShortcutParseError::UnknownKey(key_str.to_string()))?;
        let mut shortcut = Shortcut::key(key);
        for m in mods.split('+').map(str::trim).filter(|m| !m.is_empty()) {
            match m.to_ascii_lowercase().as_str() {
                "ctrl" | "cmd" => shortcut.ctrl = true,
                "shift" => shortcut.shift = true,
                "alt" => shortcut.alt = true,
                _ => return Err(ShortcutParseError::UnknownModifier(m.to_string())),
            }
        }
        Ok(shortcut)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_config_string())
    }
}

const KEY_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::A, "A"), (KeyCode::B, "B"), (KeyCode::C, "C"), (KeyCode::D, "D"),
    (KeyCode::E, "E"), (KeyCode::F, "F"), (KeyCode::G, "G"), (KeyCode::H, "H"),
    (KeyCode::I, "I"), (KeyCode::J, "J"), (KeyCode::K, "K"), (KeyCode::L, "L"),
    (KeyCode::M, "M"), (KeyCode::N, "N"), (KeyCode::O, "O"), (KeyCode::P, "P"),
    (KeyCode::Q, "Q"), (KeyCode::R, "R"), (KeyCode::S, "S"), (KeyCode::T, "T"),
    (KeyCode::U, "U"), (KeyCode::V, "V"), (KeyCode::W, "W"), (KeyCode::X, "X"),
    (KeyCode::Y, "Y"), (KeyCode::Z, "Z"),
    (KeyCode::Key0, "0"), (KeyCode::Key1, "1"), (KeyCode::Key2, "2"), (KeyCode::Key3, "3"),
    (KeyCode::Key4, "4"), (KeyCode::Key5, "5"), (KeyCode::Key6, "6"), (KeyCode::Key7, "7"),
    (KeyCode::Key8, "8"), (KeyCode::Key9, "9"),
    (KeyCode::Escape, "Esc"),
    (KeyCode::Enter, "Enter"),
    (KeyCode::Space, "Space"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::Backspace, "Backspace"),
    (KeyCode::Delete, "Del"),
    (KeyCode::Up, "Up"),
    (KeyCode::Down, "Down"),
    (KeyCode::Left, "Left"),
    (KeyCode::Right, "Right"),
    (KeyCode::F1, "F1"), (KeyCode::F2, "F2"), (KeyCode::F3, "F3"), (KeyCode::F4, "F4"),
    (KeyCode::F5, "F5"), (KeyCode::F6, "F6"), (KeyCode::F7, "F7"), (KeyCode::F8, "F8"),
    (KeyCode::F9, "F9"), (KeyCode::F10, "F10"), (KeyCode::F11, "F11"), (KeyCode::F12, "F12"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
    (KeyCode::PageUp, "PgUp"),
    (KeyCode::PageDown, "PgDn"),
    (KeyCode::Minus, "-"),
    (KeyCode::Equal, "="),
    (KeyCode::KpAdd, "+"),
    (KeyCode::LeftBracket, "["),
    (KeyCode::RightBracket, "]"),
    (KeyCode::Comma, ","),
    (KeyCode::Period, "."),
    (KeyCode::Slash, "/"),
];

fn key_name(key: KeyCode) -> &'static str {
    KEY_NAMES
        .iter()
        .find(|(k, _)| *k == key)
        .map_or("?", |(_, name)| *name)
}

fn key_from_name(name: &str) -> Option<KeyCode> {
    match name.to_ascii_lowercase().as_str() {
        "escape" => return Some(KeyCode::Escape),
        "delete" => return Some(KeyCode::Delete),
        _ => {}
    }
    KEY_NAMES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(k, _)| *k)
}

/// Editor state that enable conditions look at
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    pub has_selection: bool,
    pub tool_active: bool,
    /// A text field has focus (blocks shortcuts)
    pub text_editing: bool,
}

impl ActionContext {
    pub fn from_session(session: &EditorSession, tool_active: bool, text_editing: bool) -> Self {
        Self {
            has_selection: session.has_selection(),
            tool_active,
            text_editing,
        }
    }
}

type EnableFn = fn(&ActionContext) -> bool;

/// Effect of an action on the session
pub type ActionFn = fn(&mut EditorSession);

fn always_enabled(_: &ActionContext) -> bool {
    true
}

/// A registered action
#[derive(Clone)]
pub struct Action {
    /// Unique identifier (e.g. "selection.fill"), also the settings file key
    pub id: &'static str,
    pub label: &'static str,
    pub default_shortcut: Option<Shortcut>,
    /// Current shortcut (differs from the default once the user rebinds it)
    pub shortcut: Option<Shortcut>,
    pub status_tip: &'static str,
    enabled_fn: EnableFn,
    run_fn: Option<ActionFn>,
    pub category: &'static str,
}

impl Action {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            label: "",
            default_shortcut: None,
            shortcut: None,
            status_tip: "",
            enabled_fn: always_enabled,
            run_fn: None,
            category: "General",
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.default_shortcut = Some(shortcut.clone());
        self.shortcut = Some(shortcut);
        self
    }

    pub fn status_tip(mut self, tip: &'static str) -> Self {
        self.status_tip = tip;
        self
    }

    pub fn category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }

    pub fn enabled_when(mut self, f: EnableFn) -> Self {
        self.enabled_fn = f;
        self
    }

    pub fn runs(mut self, f: ActionFn) -> Self {
        self.run_fn = Some(f);
        self
    }

    pub fn is_enabled(&self, ctx: &ActionContext) -> bool {
        if ctx.text_editing {
            return false;
        }
        (self.enabled_fn)(ctx)
    }

    /// Shortcut pressed this frame and action enabled
    pub fn is_triggered(&self, ctx: &ActionContext) -> bool {
        if !self.is_enabled(ctx) {
            return false;
        }
        self.shortcut.as_ref().map_or(false, |s| s.is_pressed())
    }

    pub fn is_customized(&self) -> bool {
        self.shortcut != self.default_shortcut
    }

    /// Tooltip with shortcut hint
    pub fn tooltip(&self) -> String {
        let text = if self.status_tip.is_empty() { self.label } else { self.status_tip };
        match &self.shortcut {
            Some(shortcut) => format!("{} ({})", text, shortcut),
            None => text.to_string(),
        }
    }
}

/// Central registry for all actions
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<&'static str, Action>,
    /// Shortcut to action id, for conflict detection
    shortcut_map: HashMap<Shortcut, &'static str>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in action
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for action in selection_actions().into_iter().chain(tool_actions()) {
            registry.register(action);
        }
        registry
    }

    pub fn register(&mut self, action: Action) {
        if let Some(ref shortcut) = action.shortcut {
            self.shortcut_map.insert(shortcut.clone(), action.id);
        }
        self.actions.insert(action.id, action);
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn tooltip(&self, id: &str) -> String {
        self.actions.get(id).map_or_else(String::new, |a| a.tooltip())
    }

    /// Run an action on the session. Returns false for unknown ids and for
    /// actions without a session effect.
    pub fn run(&self, id: &str, session: &mut EditorSession) -> bool {
        let Some(f) = self.actions.get(id).and_then(|a| a.run_fn) else {
            return false;
        };
        info!("action: {}", id);
        f(session);
        true
    }

    /// Rebind a shortcut for an action
    pub fn rebind(&mut self, id: &str, new_shortcut: Option<Shortcut>) -> Result<(), &'static str> {
        let static_id = match self.actions.get(id) {
            Some(action) => action.id,
            None => return Err("Action not found"),
        };

        if let Some(ref shortcut) = new_shortcut {
            if let Some(&existing_id) = self.shortcut_map.get(shortcut) {
                if existing_id != static_id {
                    return Err("Shortcut already in use");
                }
            }
        }

        if let Some(old) = self.actions.get(id).and_then(|a| a.shortcut.clone()) {
            self.shortcut_map.remove(&old);
        }

        match self.actions.get_mut(id) {
            Some(action) => {
                action.shortcut = new_shortcut.clone();
                if let Some(shortcut) = new_shortcut {
                    self.shortcut_map.insert(shortcut, static_id);
                }
                Ok(())
            }
            None => Err("Action not found"),
        }
    }

    pub fn reset_shortcut(&mut self, id: &str) {
        if let Some(action) = self.actions.get(id) {
            let default = action.default_shortcut.clone();
            let _ = self.rebind(id, default);
        }
    }

    /// All actions ordered by id
    pub fn sorted(&self) -> Vec<&Action> {
        let mut actions: Vec<_> = self.actions.values().collect();
        actions.sort_by_key(|a| a.id);
        actions
    }

    /// Ids of actions whose shortcut was pressed this frame
    pub fn process_triggers(&self, ctx: &ActionContext) -> Vec<&'static str> {
        self.actions
            .values()
            .filter(|a| a.is_triggered(ctx))
            .map(|a| a.id)
            .collect()
    }
}

// ============================================================================
// Built-in actions
// ============================================================================

fn has_selection(ctx: &ActionContext) -> bool {
    ctx.has_selection
}

/// Operations on the current selection volume
pub fn selection_actions() -> Vec<Action> {
    vec![
        Action::new("selection.reset")
            .label("Reset")
            .status_tip("Clear the selection")
            .category("Selection")
            .enabled_when(has_selection)
            .runs(|s| s.selection = OrientedBox::EMPTY),
        Action::new("selection.fill")
            .label("Fill")
            .status_tip("Paint the selection with the current color")
            .category("Selection")
            .enabled_when(has_selection)
            .runs(|s| {
                let color = s.painter.color;
                s.image.fill(&s.selection, color);
            }),
        Action::new("selection.add")
            .label("Add")
            .status_tip("Add the selection to the mask")
            .category("Selection")
            .enabled_when(has_selection)
            .runs(|s| s.image.mask_add(&s.selection)),
        Action::new("selection.sub")
            .label("Sub")
            .status_tip("Remove the selection from the mask")
            .category("Selection")
            .enabled_when(has_selection)
            .runs(|s| s.image.mask_sub(&s.selection)),
        Action::new("selection.cut_as_new_layer")
            .label("Cut as new layer")
            .status_tip("Move the selected voxels into a new layer")
            .category("Selection")
            .enabled_when(has_selection)
            .runs(|s| {
                let moved = s.image.cut_as_new_layer(&s.selection);
                info!("cut {} voxels into layer {}", moved, s.image.active_layer);
            }),
    ]
}

/// Tool switching, handled by the frame loop
pub fn tool_actions() -> Vec<Action> {
    vec![
        Action::new("tool.selection")
            .label("Selection")
            .shortcut(Shortcut::key(KeyCode::R))
            .status_tip("Toggle the selection tool")
            .category("Tools"),
        Action::new("tool.deactivate")
            .label("Deactivate tool")
            .shortcut(Shortcut::key(KeyCode::Escape))
            .category("Tools")
            .enabled_when(|ctx| ctx.tool_active),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::VoxelImage;
    use macroquad::math::Vec3;

    fn session_with_selection() -> EditorSession {
        let mut session = EditorSession::new(VoxelImage::new());
        session.selection = OrientedBox::from_min_max(Vec3::ZERO, Vec3::new(2.0, 2.0, 1.0));
        session
    }

    #[test]
    fn test_shortcut_parse() {
        let s = Shortcut::parse("Ctrl+Shift+R").unwrap();
        assert_eq!(s, Shortcut { key: KeyCode::R, ctrl: true, shift: true, alt: false });
        assert_eq!(Shortcut::parse("r").unwrap(), Shortcut::key(KeyCode::R));
        assert_eq!(Shortcut::parse(" alt + f5 ").unwrap().key, KeyCode::F5);
        assert_eq!(Shortcut::parse("Escape").unwrap().key, KeyCode::Escape);
        assert_eq!(Shortcut::parse("Ctrl++").unwrap(), Shortcut::ctrl(KeyCode::KpAdd));
    }

    #[test]
    fn test_shortcut_parse_errors() {
        assert_eq!(Shortcut::parse("  "), Err(ShortcutParseError::Empty));
        assert_eq!(
            Shortcut::parse("Hyper+R"),
            Err(ShortcutParseError::UnknownModifier("Hyper".to_string()))
        );
        assert_eq!(
            Shortcut::parse("Ctrl+Nope"),
            Err(ShortcutParseError::UnknownKey("Nope".to_string()))
        );
    }

    #[test]
    fn test_shortcut_config_string() {
        for s in [Shortcut::ctrl(KeyCode::Z), Shortcut::shift(KeyCode::Delete), Shortcut::key(KeyCode::F12)] {
            assert_eq!(Shortcut::parse(&s.to_config_string()).unwrap(), s);
        }
        assert_eq!(Shortcut::shift(KeyCode::R).to_config_string(), "Shift+R");
    }

    #[test]
    fn test_action_builder() {
        let action = Action::new("test.action")
            .label("Test")
            .shortcut(Shortcut::ctrl(KeyCode::T))
            .status_tip("A test action")
            .category("Test");

        assert_eq!(action.id, "test.action");
        assert_eq!(action.label, "Test");
        assert!(action.shortcut.is_some());
        assert!(!action.is_customized());
        assert_eq!(action.tooltip(), "A test action (Ctrl+T)");
    }

    #[test]
    fn test_selection_actions_need_selection() {
        let registry = ActionRegistry::with_defaults();
        let ctx = ActionContext::default();
        let fill = registry.get("selection.fill").unwrap();
        assert!(!fill.is_enabled(&ctx));
        let ctx = ActionContext { has_selection: true, ..Default::default() };
        assert!(fill.is_enabled(&ctx));
        let ctx = ActionContext { has_selection: true, text_editing: true, ..Default::default() };
        assert!(!fill.is_enabled(&ctx));
    }

    #[test]
    fn test_run_reset_and_fill() {
        let registry = ActionRegistry::with_defaults();
        let mut session = session_with_selection();

        assert!(registry.run("selection.fill", &mut session));
        assert_eq!(session.image.voxel_count(), 4);
        assert_eq!(session.image.active().voxels.values().next(), Some(&session.painter.color));

        assert!(registry.run("selection.reset", &mut session));
        assert!(!session.has_selection());

        assert!(!registry.run("tool.selection", &mut session));
        assert!(!registry.run("no.such.action", &mut session));
    }

    #[test]
    fn test_run_mask_and_cut() {
        let registry = ActionRegistry::with_defaults();
        let mut session = session_with_selection();
        registry.run("selection.add", &mut session);
        assert_eq!(session.image.mask.len(), 4);
        registry.run("selection.sub", &mut session);
        assert!(session.image.mask.is_empty());

        registry.run("selection.fill", &mut session);
        registry.run("selection.cut_as_new_layer", &mut session);
        assert_eq!(session.image.layers.len(), 2);
        assert_eq!(session.image.active().voxels.len(), 4);
        assert!(session.image.layers[0].voxels.is_empty());
    }

    #[test]
    fn test_rebind() {
        let mut registry = ActionRegistry::with_defaults();

        assert!(registry.rebind("tool.selection", Some(Shortcut::ctrl(KeyCode::U))).is_ok());
        let action = registry.get("tool.selection").unwrap();
        assert_eq!(action.shortcut.as_ref().unwrap().key, KeyCode::U);
        assert!(action.is_customized());

        assert_eq!(
            registry.rebind("selection.fill", Some(Shortcut::ctrl(KeyCode::U))),
            Err("Shortcut already in use")
        );
        assert_eq!(registry.rebind("nope", None), Err("Action not found"));

        registry.reset_shortcut("tool.selection");
        assert!(!registry.get("tool.selection").unwrap().is_customized());
    }

    #[test]
    fn test_sorted_ids() {
        let registry = ActionRegistry::with_defaults();
        let ids: Vec<_> = registry.sorted().iter().map(|a| a.id).collect();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(ids, expected);
        assert!(ids.contains(&"selection.cut_as_new_layer"));
    }
}
