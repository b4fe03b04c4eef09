//! UI themes
//!
//! Colors used by the side panel and the viewport background. The theme is
//! picked by name from the settings file.

use macroquad::prelude::Color;

// =============================================================================
// Font Sizes
// =============================================================================

pub const FONT_SIZE_HEADER: f32 = 16.0;
pub const FONT_SIZE_CONTENT: f32 = 14.0;

// =============================================================================
// Themes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub panel_bg: Color,
    pub viewport_bg: Color,
    pub text: Color,
    pub text_dim: Color,
    pub button: Color,
    pub button_hover: Color,
    /// Pressed button, selected combo item, focused field
    pub accent: Color,
    pub group_border: Color,
}

impl Theme {
    pub const DARK: Theme = Theme {
        name: "dark",
        bg: Color::new(0.11, 0.11, 0.13, 1.0),
        panel_bg: Color::new(0.15, 0.15, 0.18, 1.0),
        viewport_bg: Color::new(0.2, 0.2, 0.23, 1.0),
        text: Color::new(0.8, 0.8, 0.85, 1.0),
        text_dim: Color::new(0.45, 0.45, 0.5, 1.0),
        button: Color::new(0.2, 0.2, 0.22, 1.0),
        button_hover: Color::new(0.26, 0.26, 0.3, 1.0),
        accent: Color::new(0.235, 0.392, 0.588, 1.0),
        group_border: Color::new(0.314, 0.314, 0.314, 1.0),
    };

    pub const LIGHT: Theme = Theme {
        name: "light",
        bg: Color::new(0.86, 0.86, 0.88, 1.0),
        panel_bg: Color::new(0.92, 0.92, 0.93, 1.0),
        viewport_bg: Color::new(0.78, 0.8, 0.84, 1.0),
        text: Color::new(0.12, 0.12, 0.14, 1.0),
        text_dim: Color::new(0.45, 0.45, 0.5, 1.0),
        button: Color::new(0.82, 0.82, 0.85, 1.0),
        button_hover: Color::new(0.76, 0.76, 0.8, 1.0),
        accent: Color::new(0.45, 0.62, 0.85, 1.0),
        group_border: Color::new(0.65, 0.65, 0.68, 1.0),
    };

    pub const ALL: [Theme; 2] = [Theme::DARK, Theme::LIGHT];

    pub fn by_name(name: &str) -> Option<Theme> {
        Self::ALL.into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn names() -> [&'static str; 2] {
        [Theme::DARK.name, Theme::LIGHT.name]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::DARK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_by_name() {
        assert_eq!(Theme::by_name("light").map(|t| t.name), Some("light"));
        assert_eq!(Theme::by_name("DARK").map(|t| t.name), Some("dark"));
        assert!(Theme::by_name("solarized").is_none());
        assert_eq!(Theme::default().name, "dark");
    }
}
