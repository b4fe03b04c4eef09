//! voxsel: a voxel scene viewer with an interactive 3D selection box
//!
//! Press R (or the panel button) for the selection tool, then click and drag
//! over voxels or the ground plane to span a box. Drag its faces to resize or
//! move it, or edit origin and size in the side panel.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod box_edit;
mod camera;
mod geometry;
mod gesture;
mod render;
mod scene;
mod session;
mod settings;
mod tools;
mod ui;

use macroquad::logging::info;
use macroquad::prelude::*;

use app::AppState;
use scene::VoxelImage;
use settings::Settings;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("voxsel v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let settings_path = Settings::default_path();
    let settings = Settings::load_or_default(settings_path.as_deref());
    info!("voxsel v{} (theme {}, language {})", VERSION, settings.ui.theme, settings.ui.language);

    let mut app = AppState::new(VoxelImage::demo(), settings, settings_path);

    loop {
        app.frame();
        next_frame().await;
    }
}
