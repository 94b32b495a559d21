//! Centralized rendering options with TOML preset support.
//!
//! All tweakable settings (scale, colors, debug overlays) are consolidated
//! here. Options serialize to/from TOML for presets; every sub-struct uses
//! `#[serde(default)]` so partial files work correctly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::molecule::{Element, ElementColor};

/// Color used when `default_color` fails to parse.
pub const FALLBACK_COLOR: u32 = 0xffff_ff55;

/// Color of the debug index overlay.
pub const DEBUG_COLOR: u32 = 0xffff_5555;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    pub layout: LayoutOptions,
    pub colors: ColorOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize options: {}", e))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
        std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }

    /// List available preset names (TOML file stems) in a directory.
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_string());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutOptions {
    /// Pixels per Cartesian unit.
    pub scale: f32,
    /// Overlay atom indices on the diagram.
    pub debug: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            scale: 20.0,
            debug: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Apply element-specific CPK colors. When off, optionally-colored
    /// elements fall back to `default_color`.
    pub colored_atoms: bool,
    /// Default label color as a `#rrggbb` string.
    pub default_color: String,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            colored_atoms: true,
            default_color: "#ffff55".to_string(),
        }
    }
}

impl ColorOptions {
    /// The default label color as opaque ARGB. Falls back to
    /// [`FALLBACK_COLOR`] when `default_color` does not parse.
    pub fn default_argb(&self) -> u32 {
        self.default_color
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6)
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .map_or(FALLBACK_COLOR, |rgb| 0xff00_0000 | rgb)
    }

    /// Resolve the display color for an element.
    pub fn color_for(&self, element: &Element) -> u32 {
        match element.color {
            ElementColor::None => self.default_argb(),
            ElementColor::Always(c) => c,
            ElementColor::Optional(c) => {
                if self.colored_atoms {
                    c
                } else {
                    self.default_argb()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[layout]
scale = 14.0
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.layout.scale, 14.0);
        // Everything else should be default
        assert!(!opts.layout.debug);
        assert!(opts.colors.colored_atoms);
        assert_eq!(opts.colors.default_argb(), 0xffff_ff55);
    }

    #[test]
    fn optional_colors_are_gated_by_colored_atoms() {
        let element = Element {
            symbol: "C".to_string(),
            invisible: false,
            color: ElementColor::Optional(0xff90_9090),
        };
        let mut colors = ColorOptions::default();
        assert_eq!(colors.color_for(&element), 0xff90_9090);
        colors.colored_atoms = false;
        assert_eq!(colors.color_for(&element), colors.default_argb());
    }

    #[test]
    fn always_colors_ignore_the_gate() {
        let element = Element {
            symbol: "R".to_string(),
            invisible: false,
            color: ElementColor::Always(0xff12_3456),
        };
        let colors = ColorOptions {
            colored_atoms: false,
            ..ColorOptions::default()
        };
        assert_eq!(colors.color_for(&element), 0xff12_3456);
    }

    #[test]
    fn malformed_default_color_falls_back() {
        let colors = ColorOptions {
            colored_atoms: true,
            default_color: "yellowish".to_string(),
        };
        assert_eq!(colors.default_argb(), FALLBACK_COLOR);
    }
}
