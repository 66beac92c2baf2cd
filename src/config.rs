//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--mode`, `--selectable`, `--theme`, etc.)
//! 2. `$TREEVIEW_TUI_CONFIG` environment variable (path to config file)
//! 3. Project-local `.treeview-tui.toml` in the current working directory
//! 4. Global `~/.config/treeview-tui/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::tree::{SelectMode, SelectableType};

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse support.
    pub mouse: Option<bool>,
}

/// Selection behavior.
///
/// Fixed per widget instance: it is read once at startup and never changes
/// during a selection session.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SelectionConfig {
    /// Selection mode: "single" or "multi".
    pub mode: Option<String>,
    /// Which nodes may be selected: "all", "branch", "leaf".
    pub selectable: Option<String>,
}

/// Tree panel settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Use icon glyphs (false = ASCII fallback).
    pub use_icons: Option<bool>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_bg: Option<String>,
    pub tree_fg: Option<String>,
    pub cursor_bg: Option<String>,
    pub cursor_fg: Option<String>,
    pub selected_fg: Option<String>,
    pub marked_fg: Option<String>,
    pub branch_fg: Option<String>,
    pub leaf_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub selection: SelectionConfig,
    pub tree: TreeConfig,
    pub theme: ThemeConfig,
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $TREEVIEW_TUI_CONFIG environment variable
    if let Ok(env_path) = std::env::var("TREEVIEW_TUI_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. Project-local `.treeview-tui.toml` in CWD
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".treeview-tui.toml"));
    }

    // 3. Global `~/.config/treeview-tui/config.toml`
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("treeview-tui").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: other.general.mouse.or(self.general.mouse),
            },
            selection: SelectionConfig {
                mode: other.selection.mode.clone().or(self.selection.mode),
                selectable: other
                    .selection
                    .selectable
                    .clone()
                    .or(self.selection.selectable),
            },
            tree: TreeConfig {
                use_icons: other.tree.use_icons.or(self.tree.use_icons),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        // Start with built-in defaults (all None — the struct Default).
        let mut config = AppConfig::default();

        // Load from candidate files (lowest priority first so higher overwrites).
        let paths = candidate_paths();
        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in paths.iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        // Explicit --config file has higher priority than candidates.
        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        // CLI flag overrides are highest priority.
        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether mouse support is enabled.
    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    /// Selection mode, defaulting to single.
    pub fn select_mode(&self) -> SelectMode {
        self.selection
            .mode
            .as_deref()
            .map(SelectMode::from_str)
            .unwrap_or_default()
    }

    /// Selectable node type, defaulting to all.
    pub fn selectable_type(&self) -> SelectableType {
        self.selection
            .selectable
            .as_deref()
            .map(SelectableType::from_str)
            .unwrap_or_default()
    }

    /// Whether to use icon glyphs.
    pub fn use_icons(&self) -> bool {
        self.tree.use_icons.unwrap_or(true)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert!(cfg.mouse_enabled());
        assert_eq!(cfg.select_mode(), SelectMode::Single);
        assert_eq!(cfg.selectable_type(), SelectableType::All);
        assert!(cfg.use_icons());
        assert_eq!(cfg.theme_scheme(), "dark");
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r#"
[general]
mouse = false

[selection]
mode = "multi"
selectable = "leaf"

[tree]
use_icons = false

[theme]
scheme = "light"
"#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert!(!cfg.mouse_enabled());
        assert_eq!(cfg.select_mode(), SelectMode::Multi);
        assert_eq!(cfg.selectable_type(), SelectableType::Leaf);
        assert!(!cfg.use_icons());
        assert_eq!(cfg.theme_scheme(), "light");
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[selection]
mode = "multi"
"#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.select_mode(), SelectMode::Multi);
        // Unspecified sections keep defaults.
        assert_eq!(cfg.selectable_type(), SelectableType::All);
        assert!(cfg.mouse_enabled());
    }

    #[test]
    fn test_unknown_mode_falls_back_to_single() {
        let toml = r#"
[selection]
mode = "triple"
"#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.select_mode(), SelectMode::Single);
    }

    #[test]
    fn test_merge_other_wins() {
        let base: AppConfig = toml::from_str(
            r#"
[selection]
mode = "single"
selectable = "branch"
"#,
        )
        .unwrap();
        let over: AppConfig = toml::from_str(
            r#"
[selection]
mode = "multi"
"#,
        )
        .unwrap();

        let merged = base.merge(&over);
        assert_eq!(merged.select_mode(), SelectMode::Multi);
        // Fields absent in `over` survive from `base`.
        assert_eq!(merged.selectable_type(), SelectableType::Branch);
    }

    #[test]
    fn test_merge_custom_theme_colors() {
        let base: AppConfig = toml::from_str(
            r##"
[theme]
scheme = "custom"

[theme.custom]
tree_fg = "#ffffff"
"##,
        )
        .unwrap();
        let over = AppConfig::default();

        let merged = base.merge(&over);
        assert_eq!(merged.theme_scheme(), "custom");
        assert_eq!(
            merged.theme.custom.unwrap().tree_fg.as_deref(),
            Some("#ffffff")
        );
    }

    #[test]
    fn test_load_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[selection]
mode = "multi"
selectable = "branch"
"#
        )
        .unwrap();

        let cfg = load_file(file.path()).unwrap();
        assert_eq!(cfg.select_mode(), SelectMode::Multi);
        assert_eq!(cfg.selectable_type(), SelectableType::Branch);
    }

    #[test]
    fn test_load_file_missing_is_none() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn test_load_file_invalid_toml_is_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is not toml [[[").unwrap();
        assert!(load_file(file.path()).is_none());
    }
}
