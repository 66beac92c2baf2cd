//! Theme data model: built-in palettes and resolution from config.
//!
//! The theme system provides two built-in palettes (dark and light) and
//! supports custom color overrides from the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tree panel
    pub tree_bg: Color,
    pub tree_fg: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    /// Nodes holding a selection entry.
    pub selected_fg: Color,
    /// Nodes on the ancestor chain of a selection (the drill path).
    pub marked_fg: Color,
    pub branch_fg: Color,
    pub leaf_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & chrome
    pub border_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub success_fg: Color,
    pub info_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_bg: Color::Reset,
        tree_fg: Color::Rgb(205, 214, 244),     // #cdd6f4 (text)
        cursor_bg: Color::Rgb(69, 71, 90),      // #45475a (surface1)
        cursor_fg: Color::Rgb(205, 214, 244),   // #cdd6f4
        selected_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        marked_fg: Color::Rgb(249, 226, 175),   // #f9e2af (yellow)
        branch_fg: Color::Rgb(137, 180, 250),   // #89b4fa (blue)
        leaf_fg: Color::Rgb(205, 214, 244),     // #cdd6f4

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        info_fg: Color::Rgb(137, 180, 250),    // #89b4fa (blue)
        accent_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086 (overlay0)
    }
}

/// Light theme — complementary light palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_bg: Color::Reset,
        tree_fg: Color::Rgb(76, 79, 105),      // #4c4f69 (text)
        cursor_bg: Color::Rgb(204, 208, 218),  // #ccd0da (surface1)
        cursor_fg: Color::Rgb(76, 79, 105),
        selected_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        marked_fg: Color::Rgb(223, 142, 29),   // #df8e1d (yellow)
        branch_fg: Color::Rgb(30, 102, 245),   // #1e66f5 (blue)
        leaf_fg: Color::Rgb(76, 79, 105),

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)

        error_fg: Color::Rgb(210, 15, 57),   // #d20f39 (red)
        success_fg: Color::Rgb(64, 160, 43), // #40a02b (green)
        info_fg: Color::Rgb(30, 102, 245),
        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
        dim_fg: Color::Rgb(156, 160, 176),   // #9ca0b0 (overlay0)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(), // "dark" or any unrecognized value
    }
}

/// Apply custom hex color overrides on top of an existing theme.
/// Malformed hex values keep the base color.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let mut apply = |slot: &mut Color, value: &Option<String>| {
        if let Some(color) = value.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    };
    apply(&mut theme.tree_bg, &custom.tree_bg);
    apply(&mut theme.tree_fg, &custom.tree_fg);
    apply(&mut theme.cursor_bg, &custom.cursor_bg);
    apply(&mut theme.cursor_fg, &custom.cursor_fg);
    apply(&mut theme.selected_fg, &custom.selected_fg);
    apply(&mut theme.marked_fg, &custom.marked_fg);
    apply(&mut theme.branch_fg, &custom.branch_fg);
    apply(&mut theme.leaf_fg, &custom.leaf_fg);
    apply(&mut theme.status_bg, &custom.status_bg);
    apply(&mut theme.status_fg, &custom.status_fg);
    apply(&mut theme.border_fg, &custom.border_fg);
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_valid() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#1a1b26"), Some(Color::Rgb(26, 27, 38)));
    }

    #[test]
    fn test_parse_hex_color_without_hash() {
        assert_eq!(parse_hex_color("ff0000"), Some(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#fff"), None); // too short
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#"), None);
    }

    #[test]
    fn test_resolve_dark_theme() {
        let config = ThemeConfig {
            scheme: Some("dark".to_string()),
            custom: None,
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.branch_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_resolve_light_theme() {
        let config = ThemeConfig {
            scheme: Some("light".to_string()),
            custom: None,
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.branch_fg, Color::Rgb(30, 102, 245));
    }

    #[test]
    fn test_resolve_default_is_dark() {
        let config = ThemeConfig::default();
        let theme = resolve_theme(&config);
        assert_eq!(theme.branch_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_resolve_custom_overrides() {
        let config = ThemeConfig {
            scheme: Some("custom".to_string()),
            custom: Some(ThemeColorsConfig {
                tree_bg: Some("#1a1b26".to_string()),
                marked_fg: Some("#c0caf5".to_string()),
                ..Default::default()
            }),
        };
        let theme = resolve_theme(&config);
        // Custom values applied
        assert_eq!(theme.tree_bg, Color::Rgb(26, 27, 38));
        assert_eq!(theme.marked_fg, Color::Rgb(192, 202, 245));
        // Non-custom values fall back to dark theme
        assert_eq!(theme.branch_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_custom_with_invalid_hex_falls_back() {
        let config = ThemeConfig {
            scheme: Some("custom".to_string()),
            custom: Some(ThemeColorsConfig {
                tree_bg: Some("#zzzzzz".to_string()),
                ..Default::default()
            }),
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.tree_bg, Color::Reset);
    }

    #[test]
    fn test_unknown_scheme_falls_back_to_dark() {
        let config = ThemeConfig {
            scheme: Some("neon".to_string()),
            custom: None,
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.branch_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_dark_and_light_different() {
        let dark = dark_theme();
        let light = light_theme();
        assert_ne!(dark.tree_fg, light.tree_fg);
        assert_ne!(dark.cursor_bg, light.cursor_bg);
        assert_ne!(dark.marked_fg, light.marked_fg);
        assert_ne!(dark.error_fg, light.error_fg);
    }
}
