//! Application state and the per-frame loop
//!
//! The window is split into a side panel on the left and the 3D viewport on
//! the right. One tool at most is active; it is created when switched on and
//! dropped when switched off.

use macroquad::logging::{info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;

use crate::box_edit::BoxEditor;
use crate::camera::OrbitCamera;
use crate::gesture::{GestureDispatcher, PointerState};
use crate::render::{
    draw_ground_grid, draw_image, draw_mask, draw_overlays, OverlayEffect, RenderList, SELECTION_COLOR,
};
use crate::scene::VoxelImage;
use crate::session::EditorSession;
use crate::settings::{Settings, LANGUAGES};
use crate::tools::{SelectionTool, Tool, ToolContext, ToolState};
use crate::ui::{
    draw_help_text, shortcuts_panel, ActionContext, ActionRegistry, KeyboardState, MouseState, PanelUi, Rect,
    SidePanel, Theme, UiContext,
};

pub const PANEL_WIDTH: f32 = 260.0;

pub struct AppState {
    pub session: EditorSession,
    pub actions: ActionRegistry,
    pub settings: Settings,
    settings_path: Option<PathBuf>,
    pub theme: Theme,
    pub camera: OrbitCamera,
    pub gestures: GestureDispatcher,
    pub box_editor: BoxEditor,
    pub render: RenderList,
    pub tool: Option<SelectionTool>,
    pub ui: UiContext,
    /// Pointer position of the previous frame while orbiting
    orbit_from: Option<Vec2>,
    /// Shortcut editor expanded in the panel
    show_shortcuts: bool,
}

impl AppState {
    pub fn new(image: VoxelImage, settings: Settings, settings_path: Option<PathBuf>) -> Self {
        let mut actions = ActionRegistry::with_defaults();
        let applied = settings.apply_shortcuts(&mut actions);
        if applied > 0 {
            info!("applied {} custom shortcuts", applied);
        }
        let theme = settings.theme();
        Self {
            session: EditorSession::new(image),
            actions,
            settings,
            settings_path,
            theme,
            camera: OrbitCamera::default(),
            gestures: GestureDispatcher::new(),
            box_editor: BoxEditor::new(),
            render: RenderList::new(),
            tool: None,
            ui: UiContext::new(),
            orbit_from: None,
            show_shortcuts: false,
        }
    }

    pub fn tool_active(&self) -> bool {
        self.tool.as_ref().is_some_and(|t| t.active())
    }

    /// Switch the selection tool on or off
    pub fn toggle_tool(&mut self) {
        if self.tool_active() {
            self.deactivate_tool();
            return;
        }
        let mut tool = SelectionTool::new();
        if tool.activate() {
            self.tool = Some(tool);
        }
    }

    pub fn deactivate_tool(&mut self) {
        if let Some(mut tool) = self.tool.take() {
            tool.deactivate();
        }
        self.box_editor = BoxEditor::new();
    }

    /// Run a triggered action. Tool switching lives here, everything else in
    /// the registry.
    pub fn handle_action(&mut self, id: &str) {
        match id {
            SelectionTool::ID => self.toggle_tool(),
            "tool.deactivate" => self.deactivate_tool(),
            _ => {
                if !self.actions.run(id, &mut self.session) {
                    warn!("action has no handler: {}", id);
                }
            }
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.settings.ui.theme = theme.name.to_string();
        self.save_settings();
    }

    fn set_language(&mut self, language: &str) {
        self.settings.ui.language = language.to_string();
        self.save_settings();
    }

    pub fn save_settings(&mut self) {
        self.settings.capture_shortcuts(&self.actions);
        self.settings.save_logged(self.settings_path.as_deref());
    }

    /// Right drag orbits, the wheel zooms
    fn update_camera(&mut self, mouse: &MouseState, in_viewport: bool) {
        let pos = vec2(mouse.x, mouse.y);
        if mouse.right_down && (in_viewport || self.orbit_from.is_some()) {
            if let Some(from) = self.orbit_from {
                self.camera.orbit(pos - from);
            }
            self.orbit_from = Some(pos);
        } else {
            self.orbit_from = None;
        }
        if in_viewport && mouse.scroll != 0.0 && !self.ui.text_editing() {
            self.camera.zoom(mouse.scroll.signum());
        }
    }

    /// Run the active tool for this frame
    fn update_tool(&mut self, mouse: &MouseState, viewport: Rect) {
        self.session.help_text.clear();
        self.render.clear();

        let pointer = PointerState {
            x: mouse.x,
            y: mouse.y,
            left_down: mouse.left_down,
            left_pressed: mouse.left_pressed,
            left_released: mouse.left_released,
            in_viewport: mouse.inside(&viewport),
        };
        let ray = self.camera.screen_to_ray(mouse.x, mouse.y, &viewport);
        self.gestures.begin_frame(pointer, ray, &self.session.image, &self.session.selection);

        let painter = self.session.painter;
        let mut done = false;
        if let Some(tool) = self.tool.as_mut() {
            let mut ctx = ToolContext {
                session: &mut self.session,
                gestures: &mut self.gestures,
                box_editor: &mut self.box_editor,
                actions: &self.actions,
                render: &mut self.render,
            };
            done = tool.iter(&mut ctx, &painter, viewport) == ToolState::Done;
        }
        self.gestures.end_frame();
        if self.session.has_selection() {
            self.render.push_box(self.session.selection, SELECTION_COLOR, OverlayEffect::Wireframe);
        }
        if done {
            self.deactivate_tool();
        }
    }

    fn draw_scene(&self, viewport: Rect, screen_h: f32) {
        draw_rectangle(viewport.x, viewport.y, viewport.w, viewport.h, self.theme.viewport_bg);
        set_camera(&self.camera.to_camera3d(&viewport, screen_h));

        draw_ground_grid();
        draw_image(&self.session.image);
        if self.tool.as_ref().is_some_and(|t| t.shows_mask()) {
            draw_mask(&self.session.image);
        }
        draw_overlays(&self.render);

        set_default_camera();
    }

    fn draw_panel(&mut self, rect: Rect) {
        let theme = self.theme;
        let mut toggle_tool = false;
        let mut new_theme = None;
        let mut new_language = None;
        let mut shortcuts_changed = false;

        {
            let mut panel = SidePanel::begin(&mut self.ui, &theme, rect);

            panel.header("Tools");
            let tool_label = match &self.tool {
                Some(_) => "Selection (on)",
                None => "Selection",
            };
            if panel.button(tool_label, 1.0) {
                toggle_tool = true;
            }
            panel.text(&self.actions.tooltip(SelectionTool::ID));

            panel.space(6.0);
            panel.header("Image");
            let layer = self.session.image.active();
            panel.text(&format!("{}: {} voxels", layer.name, self.session.image.voxel_count()));

            panel.space(6.0);
            panel.header("Interface");
            let names = Theme::names();
            let mut theme_index = names.iter().position(|n| *n == theme.name).unwrap_or(0);
            if panel.combo("Theme", &mut theme_index, &names) {
                new_theme = Theme::by_name(names[theme_index]);
            }
            let mut language_index = LANGUAGES
                .iter()
                .position(|l| *l == self.settings.ui.language)
                .unwrap_or(0);
            if panel.combo("Language", &mut language_index, &LANGUAGES) {
                new_language = Some(LANGUAGES[language_index]);
            }
            let shortcuts_label = if self.show_shortcuts { "Shortcuts (hide)" } else { "Shortcuts" };
            if panel.button(shortcuts_label, 1.0) {
                self.show_shortcuts = !self.show_shortcuts;
            }
            if self.show_shortcuts {
                shortcuts_changed = shortcuts_panel(&mut self.actions, &mut panel);
            }

            if let Some(tool) = self.tool.as_mut() {
                panel.space(6.0);
                panel.header(tool.label());
                let mut ctx = ToolContext {
                    session: &mut self.session,
                    gestures: &mut self.gestures,
                    box_editor: &mut self.box_editor,
                    actions: &self.actions,
                    render: &mut self.render,
                };
                tool.gui(&mut ctx, &mut panel);
            }
        }

        if toggle_tool {
            self.toggle_tool();
        }
        if let Some(theme) = new_theme {
            self.set_theme(theme);
        }
        if let Some(language) = new_language {
            self.set_language(language);
        }
        if shortcuts_changed {
            self.save_settings();
        }
    }

    /// One frame: input, shortcuts, tool, scene, panel
    pub fn frame(&mut self) {
        let mouse = MouseState::capture();
        let keys = KeyboardState::capture();
        self.ui.begin_frame(mouse, keys);

        let screen = Rect::screen(screen_width(), screen_height());
        let (panel_rect, viewport) = screen.split_h_px(PANEL_WIDTH);
        let in_viewport = mouse.inside(&viewport);

        self.update_camera(&mouse, in_viewport);

        let ctx = ActionContext::from_session(&self.session, self.tool_active(), self.ui.text_editing());
        for id in self.actions.process_triggers(&ctx) {
            self.handle_action(id);
        }

        self.update_tool(&mouse, viewport);

        clear_background(self.theme.bg);
        self.draw_scene(viewport, screen.h);
        self.draw_panel(panel_rect);
        draw_help_text(&viewport, &self.session.help_text, &self.theme);
    }
}
