//! Shortcut editor
//!
//! One text field per action, grouped by category. Committing an empty field
//! unbinds the action; a rebound action gets a button restoring its default.

use macroquad::logging::{info, warn};

use super::actions::{ActionRegistry, Shortcut};
use super::PanelUi;

/// What the user asked for on one row
enum Edit {
    Bind(&'static str, Option<Shortcut>),
    Restore(&'static str),
}

struct Row {
    id: &'static str,
    label: &'static str,
    category: &'static str,
    value: String,
    customized: bool,
}

/// Draw the editor and apply its edits. Returns true when a binding changed.
pub fn shortcuts_panel(registry: &mut ActionRegistry, ui: &mut dyn PanelUi) -> bool {
    let rows: Vec<Row> = registry
        .sorted()
        .into_iter()
        .map(|a| Row {
            id: a.id,
            label: a.label,
            category: a.category,
            value: a.shortcut.as_ref().map(Shortcut::to_config_string).unwrap_or_default(),
            customized: a.is_customized(),
        })
        .collect();

    let mut edits = Vec::new();
    let mut category = None;
    for mut row in rows {
        if category != Some(row.category) {
            if category.is_some() {
                ui.group_end();
            }
            ui.group_begin(Some(row.category));
            category = Some(row.category);
        }

        if ui.input_text(row.label, &mut row.value) {
            let value = row.value.trim();
            if value.is_empty() {
                edits.push(Edit::Bind(row.id, None));
            } else {
                match Shortcut::parse(value) {
                    Ok(shortcut) => edits.push(Edit::Bind(row.id, Some(shortcut))),
                    Err(e) => warn!("shortcut for '{}': {}", row.id, e),
                }
            }
        }
        if row.customized && ui.button(&format!("Restore {}", row.label), 1.0) {
            edits.push(Edit::Restore(row.id));
        }
    }
    if category.is_some() {
        ui.group_end();
    }

    let mut changed = false;
    for edit in edits {
        match edit {
            Edit::Bind(id, shortcut) => {
                let shown = shortcut.as_ref().map_or_else(|| "nothing".to_string(), |s| s.to_string());
                match registry.rebind(id, shortcut) {
                    Ok(()) => {
                        info!("bound '{}' to {}", id, shown);
                        changed = true;
                    }
                    Err(e) => warn!("cannot bind '{}' to {}: {}", id, shown, e),
                }
            }
            Edit::Restore(id) => {
                registry.reset_shortcut(id);
                changed = true;
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ScriptedUi;
    use macroquad::prelude::KeyCode;

    fn shortcut_of(registry: &ActionRegistry, id: &str) -> Option<Shortcut> {
        registry.get(id).and_then(|a| a.shortcut.clone())
    }

    #[test]
    fn test_rows_grouped_by_category() {
        let mut registry = ActionRegistry::with_defaults();
        let mut ui = ScriptedUi::default();
        assert!(!shortcuts_panel(&mut registry, &mut ui));
        assert_eq!(ui.depth, 0);

        let groups: Vec<_> = ui.log.iter().filter(|l| l.starts_with("group:")).collect();
        assert_eq!(groups, ["group:Selection", "group:Tools"]);
        assert!(ui.log.contains(&"text_input:Selection=R".to_string()));
        assert!(ui.log.contains(&"text_input:Fill=".to_string()));
        // Nothing rebound yet
        assert!(!ui.log.iter().any(|l| l.starts_with("button:")));
    }

    #[test]
    fn test_commit_rebinds() {
        let mut registry = ActionRegistry::with_defaults();
        let mut ui = ScriptedUi::default();
        ui.texts.insert("Fill", "Ctrl+F");
        assert!(shortcuts_panel(&mut registry, &mut ui));
        assert_eq!(shortcut_of(&registry, "selection.fill"), Some(Shortcut::ctrl(KeyCode::F)));

        // Next frame offers a restore button for it
        let mut ui = ScriptedUi::default();
        shortcuts_panel(&mut registry, &mut ui);
        assert!(ui.log.contains(&"text_input:Fill=Ctrl+F".to_string()));
        assert!(ui.log.contains(&"button:Restore Fill".to_string()));
    }

    #[test]
    fn test_invalid_or_taken_shortcut_is_rejected() {
        let mut registry = ActionRegistry::with_defaults();
        let mut ui = ScriptedUi::default();
        ui.texts.insert("Fill", "Hyper+F");
        assert!(!shortcuts_panel(&mut registry, &mut ui));
        assert!(shortcut_of(&registry, "selection.fill").is_none());

        // R already toggles the selection tool
        let mut ui = ScriptedUi::default();
        ui.texts.insert("Fill", "R");
        assert!(!shortcuts_panel(&mut registry, &mut ui));
        assert!(shortcut_of(&registry, "selection.fill").is_none());
        assert_eq!(shortcut_of(&registry, "tool.selection"), Some(Shortcut::key(KeyCode::R)));
    }

    #[test]
    fn test_empty_unbinds_and_restore_resets() {
        let mut registry = ActionRegistry::with_defaults();
        let mut ui = ScriptedUi::default();
        ui.texts.insert("Selection", "");
        // "R" differs from "", so the scripted field commits
        assert!(shortcuts_panel(&mut registry, &mut ui));
        assert!(shortcut_of(&registry, "tool.selection").is_none());
        assert!(registry.get("tool.selection").is_some_and(|a| a.is_customized()));

        let mut ui = ScriptedUi { clicks: vec!["Restore Selection"], ..Default::default() };
        assert!(shortcuts_panel(&mut registry, &mut ui));
        assert_eq!(shortcut_of(&registry, "tool.selection"), Some(Shortcut::key(KeyCode::R)));
        assert!(!registry.get("tool.selection").is_some_and(|a| a.is_customized()));
    }
}
