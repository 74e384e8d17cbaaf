//! Graph View Style System
//!
//! Maps node kind, file category, selection and theme to a visual style.
//! Every function here is pure: identical inputs give identical styles, which
//! lets the rendering surface diff consecutive snapshots.

use crate::graph::GraphNodeKind;
use repograph_core::{FileCategory, Theme, ViewMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color, serialized as `#RRGGBB` or `#RRGGBBAA`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB` literal to an opaque color
    pub const fn hex(value: u32) -> Self {
        Self::rgb(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("Invalid color: {}", value))
        };
        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Rounded,
    Circle,
}

/// Complete style for a graph node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub fill: Color,
    /// Left-to-right gradient drawn instead of `fill` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_gradient: Option<(Color, Color)>,
    pub border: Color,
    pub border_width: f32,
    /// Highlight ring around selected nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring: Option<Color>,
    pub text: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<Color>,
    pub shape: NodeShape,
    pub corner_radius: f32,
    pub font_size: f32,
    pub font_bold: bool,
    pub padding: f32,
}

/// Edge color and style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
    pub animated: bool,
}

// ============================================================================
// Color Constants
// ============================================================================

// Repository accent (violet) and gradient partner (teal)
pub const COLOR_ACCENT: Color = Color::hex(0x8B5CF6);
pub const COLOR_ACCENT_DEEP: Color = Color::hex(0x6D28D9);
pub const COLOR_TEAL: Color = Color::hex(0x14B8A6);

pub const COLOR_TEXT_DARK_THEME: Color = Color::hex(0xFFFFFF);
pub const COLOR_TEXT_LIGHT_THEME: Color = Color::hex(0x1F2937);

// Neutral edge strokes
pub const COLOR_EDGE_DARK: Color = Color::hex(0xCBD5E1);
pub const COLOR_EDGE_LIGHT: Color = Color::hex(0x94A3B8);

// Generic file category
pub const COLOR_FILE_DARK: Color = Color::hex(0x94A3B8);
pub const COLOR_FILE_LIGHT: Color = Color::hex(0x64748B);

/// Base color of a file category as (dark theme, light theme)
fn category_palette(category: FileCategory) -> (Color, Color) {
    match category {
        FileCategory::Javascript => (Color::hex(0xF59E0B), Color::hex(0xD97706)),
        FileCategory::Typescript | FileCategory::Python => {
            (Color::hex(0x3B82F6), Color::hex(0x2563EB))
        }
        FileCategory::Stylesheet => (Color::hex(0xEC4899), Color::hex(0xDB2777)),
        FileCategory::Json => (Color::hex(0x10B981), Color::hex(0x059669)),
        FileCategory::Markdown => (Color::hex(0x6366F1), Color::hex(0x4F46E5)),
        FileCategory::Ruby => (Color::hex(0xEF4444), Color::hex(0xDC2626)),
        FileCategory::Solidity => (Color::hex(0x6D28D9), Color::hex(0x4C1D95)),
        FileCategory::Html => (Color::hex(0xF97316), Color::hex(0xEA580C)),
        FileCategory::Image
        | FileCategory::Php
        | FileCategory::Java
        | FileCategory::Go
        | FileCategory::Rust
        | FileCategory::C
        | FileCategory::Cpp
        | FileCategory::CHeader
        | FileCategory::Csharp
        | FileCategory::Swift
        | FileCategory::Kotlin
        | FileCategory::Dart
        | FileCategory::Yaml
        | FileCategory::Toml
        | FileCategory::Shell
        | FileCategory::Batch
        | FileCategory::Powershell
        | FileCategory::Text
        | FileCategory::Csv
        | FileCategory::Pdf
        | FileCategory::Document
        | FileCategory::Spreadsheet
        | FileCategory::File => (COLOR_FILE_DARK, COLOR_FILE_LIGHT),
    }
}

/// Base color of a file category in the given theme
pub fn category_color(category: FileCategory, theme: Theme) -> Color {
    let (dark, light) = category_palette(category);
    match theme {
        Theme::Dark => dark,
        Theme::Light => light,
    }
}

/// Unselected background of a dependency-category node
fn category_background(category: FileCategory, theme: Theme) -> Color {
    if category == FileCategory::File {
        return COLOR_TEAL.with_alpha(26);
    }
    let (dark, _) = category_palette(category);
    match theme {
        Theme::Dark => dark.with_alpha(26),
        Theme::Light => dark.with_alpha(51),
    }
}

fn text_color(theme: Theme) -> Color {
    match theme {
        Theme::Dark => COLOR_TEXT_DARK_THEME,
        Theme::Light => COLOR_TEXT_LIGHT_THEME,
    }
}

fn accent_border(theme: Theme) -> Color {
    match theme {
        Theme::Dark => COLOR_ACCENT,
        Theme::Light => COLOR_ACCENT_DEEP,
    }
}

// ============================================================================
// Style Functions
// ============================================================================

/// Resolve the style of a node.
///
/// `category` is only consulted for file and dependency-category nodes;
/// a missing category falls back to the generic file palette.
pub fn resolve_node_style(
    kind: GraphNodeKind,
    category: Option<FileCategory>,
    selected: bool,
    theme: Theme,
) -> NodeStyle {
    let dark = theme == Theme::Dark;
    let category = category.unwrap_or(FileCategory::File);

    match kind {
        GraphNodeKind::Root | GraphNodeKind::Hub => {
            let alpha = if dark { 77 } else { 179 };
            let start = COLOR_ACCENT.with_alpha(alpha);
            NodeStyle {
                fill: start,
                fill_gradient: Some((start, COLOR_TEAL.with_alpha(alpha))),
                border: accent_border(theme),
                border_width: 2.0,
                ring: None,
                text: text_color(theme),
                text_shadow: Some(if dark {
                    Color::rgba(0, 0, 0, 128)
                } else {
                    Color::rgba(255, 255, 255, 128)
                }),
                shape: if kind == GraphNodeKind::Hub {
                    NodeShape::Circle
                } else {
                    NodeShape::Rounded
                },
                corner_radius: 8.0,
                font_size: 16.0,
                font_bold: true,
                padding: 12.0,
            }
        }
        GraphNodeKind::Directory => {
            let alpha = match (selected, dark) {
                (true, true) => 77,
                (true, false) => 128,
                (false, true) => 26,
                (false, false) => 51,
            };
            NodeStyle {
                fill: COLOR_ACCENT.with_alpha(alpha),
                fill_gradient: None,
                border: if selected {
                    COLOR_ACCENT
                } else {
                    accent_border(theme)
                },
                border_width: if selected { 2.0 } else { 1.0 },
                ring: selected.then_some(COLOR_ACCENT.with_alpha(64)),
                text: text_color(theme),
                text_shadow: dark.then_some(Color::rgba(0, 0, 0, 128)),
                shape: NodeShape::Rounded,
                corner_radius: 8.0,
                font_size: 12.0,
                font_bold: true,
                padding: 8.0,
            }
        }
        GraphNodeKind::File => {
            let base = category_color(category, theme);
            let fill = if selected {
                base.with_alpha(0x15)
            } else if dark {
                Color::TRANSPARENT
            } else {
                base.with_alpha(0x05)
            };
            NodeStyle {
                fill,
                fill_gradient: None,
                border: base,
                border_width: if selected { 3.0 } else { 1.0 },
                ring: selected.then_some(base.with_alpha(0x40)),
                text: text_color(theme),
                text_shadow: dark.then_some(Color::rgba(0, 0, 0, 77)),
                shape: NodeShape::Rounded,
                corner_radius: 4.0,
                font_size: 12.0,
                font_bold: true,
                padding: 8.0,
            }
        }
        GraphNodeKind::DependencyCategory => {
            let base = category_color(category, theme);
            NodeStyle {
                fill: if selected {
                    base.with_alpha(0x20)
                } else {
                    category_background(category, theme)
                },
                fill_gradient: None,
                border: base,
                border_width: if selected { 3.0 } else { 1.0 },
                ring: selected.then_some(base.with_alpha(0x40)),
                text: text_color(theme),
                text_shadow: dark.then_some(Color::rgba(0, 0, 0, 77)),
                shape: NodeShape::Rounded,
                corner_radius: 8.0,
                font_size: 12.0,
                font_bold: true,
                padding: 8.0,
            }
        }
    }
}

/// Resolve the style of the edge pointing at a node of the given kind.
pub fn resolve_edge_style(
    mode: ViewMode,
    target_kind: GraphNodeKind,
    target_category: Option<FileCategory>,
    target_selected: bool,
    theme: Theme,
) -> EdgeStyle {
    let color = if target_selected {
        match target_kind {
            GraphNodeKind::File | GraphNodeKind::DependencyCategory => {
                category_color(target_category.unwrap_or(FileCategory::File), theme)
            }
            GraphNodeKind::Root | GraphNodeKind::Hub | GraphNodeKind::Directory => COLOR_ACCENT,
        }
    } else {
        match (mode, theme) {
            (ViewMode::Structure, Theme::Dark) => COLOR_EDGE_DARK,
            (ViewMode::Structure, Theme::Light) => COLOR_EDGE_LIGHT,
            (ViewMode::Dependencies, Theme::Dark) => COLOR_ACCENT,
            (ViewMode::Dependencies, Theme::Light) => COLOR_ACCENT_DEEP,
        }
    };

    EdgeStyle {
        color,
        width: if target_selected { 2.0 } else { 1.0 },
        dashed: false,
        animated: mode == ViewMode::Dependencies,
    }
}

/// Theme-bound convenience wrapper over the resolve functions.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver {
    theme: Theme,
}

impl StyleResolver {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn node_style(
        &self,
        kind: GraphNodeKind,
        category: Option<FileCategory>,
        selected: bool,
    ) -> NodeStyle {
        resolve_node_style(kind, category, selected, self.theme)
    }

    pub fn edge_style(
        &self,
        mode: ViewMode,
        target_kind: GraphNodeKind,
        target_category: Option<FileCategory>,
        target_selected: bool,
    ) -> EdgeStyle {
        resolve_edge_style(mode, target_kind, target_category, target_selected, self.theme)
    }

    /// Minimap dot color for a node kind
    pub fn minimap_color(&self, kind: GraphNodeKind) -> Color {
        let dark = self.theme == Theme::Dark;
        match kind {
            GraphNodeKind::Root | GraphNodeKind::Hub => accent_border(self.theme),
            GraphNodeKind::Directory if dark => Color::hex(0x7C3AED),
            GraphNodeKind::Directory => COLOR_ACCENT_DEEP,
            GraphNodeKind::File | GraphNodeKind::DependencyCategory if dark => {
                Color::hex(0x3B82F6)
            }
            GraphNodeKind::File | GraphNodeKind::DependencyCategory => Color::hex(0x2563EB),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_display() {
        assert_eq!(Color::hex(0x8B5CF6).to_string(), "#8B5CF6");
        assert_eq!(Color::hex(0x8B5CF6).with_alpha(0x40).to_string(), "#8B5CF640");
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(
            Color::try_from("#10B981".to_string()),
            Ok(Color::rgb(0x10, 0xB9, 0x81))
        );
        assert_eq!(
            Color::try_from("00000080".to_string()),
            Ok(Color::rgba(0, 0, 0, 0x80))
        );
        assert!(Color::try_from("#12".to_string()).is_err());
        assert!(Color::try_from("#GG0000".to_string()).is_err());
    }

    #[test]
    fn test_category_colors_per_theme() {
        assert_eq!(
            category_color(FileCategory::Javascript, Theme::Dark),
            Color::hex(0xF59E0B)
        );
        assert_eq!(
            category_color(FileCategory::Javascript, Theme::Light),
            Color::hex(0xD97706)
        );
        assert_eq!(
            category_color(FileCategory::File, Theme::Light),
            COLOR_FILE_LIGHT
        );
    }

    #[test]
    fn test_selected_file_is_emphasized() {
        let plain = resolve_node_style(
            GraphNodeKind::File,
            Some(FileCategory::Typescript),
            false,
            Theme::Dark,
        );
        let selected = resolve_node_style(
            GraphNodeKind::File,
            Some(FileCategory::Typescript),
            true,
            Theme::Dark,
        );

        assert!(selected.border_width > plain.border_width);
        assert!(selected.ring.is_some());
        assert!(plain.ring.is_none());
        assert_eq!(plain.fill, Color::TRANSPARENT);
        assert_eq!(selected.fill, Color::hex(0x3B82F6).with_alpha(0x15));
    }

    #[test]
    fn test_hub_is_circle_root_is_rounded() {
        let hub = resolve_node_style(GraphNodeKind::Hub, None, false, Theme::Light);
        let root = resolve_node_style(GraphNodeKind::Root, None, false, Theme::Light);
        assert_eq!(hub.shape, NodeShape::Circle);
        assert_eq!(root.shape, NodeShape::Rounded);
        assert!(root.fill_gradient.is_some());
    }

    #[test]
    fn test_unknown_category_uses_teal_background() {
        let style = resolve_node_style(
            GraphNodeKind::DependencyCategory,
            Some(FileCategory::File),
            false,
            Theme::Dark,
        );
        assert_eq!(style.fill, COLOR_TEAL.with_alpha(26));
    }

    #[test]
    fn test_edge_style_follows_target_selection() {
        let plain = resolve_edge_style(
            ViewMode::Structure,
            GraphNodeKind::File,
            Some(FileCategory::Json),
            false,
            Theme::Light,
        );
        let selected = resolve_edge_style(
            ViewMode::Structure,
            GraphNodeKind::File,
            Some(FileCategory::Json),
            true,
            Theme::Light,
        );

        assert_eq!(plain.color, COLOR_EDGE_LIGHT);
        assert_eq!(plain.width, 1.0);
        assert_eq!(selected.color, Color::hex(0x059669));
        assert_eq!(selected.width, 2.0);
        assert!(!selected.animated);
    }

    #[test]
    fn test_dependency_edges_are_animated() {
        let style = resolve_edge_style(
            ViewMode::Dependencies,
            GraphNodeKind::DependencyCategory,
            Some(FileCategory::Markdown),
            false,
            Theme::Dark,
        );
        assert!(style.animated);
        assert_eq!(style.color, COLOR_ACCENT);
    }

    #[test]
    fn test_style_resolver_tracks_theme() {
        let mut resolver = StyleResolver::new(Theme::Light);
        let light = resolver.node_style(GraphNodeKind::Directory, None, false);
        resolver.set_theme(Theme::Dark);
        let dark = resolver.node_style(GraphNodeKind::Directory, None, false);
        assert_ne!(light, dark);
        assert_eq!(resolver.minimap_color(GraphNodeKind::Directory), Color::hex(0x7C3AED));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn kind_strategy() -> impl Strategy<Value = GraphNodeKind> {
            prop_oneof![
                Just(GraphNodeKind::Root),
                Just(GraphNodeKind::Hub),
                Just(GraphNodeKind::Directory),
                Just(GraphNodeKind::File),
                Just(GraphNodeKind::DependencyCategory),
            ]
        }

        fn category_strategy() -> impl Strategy<Value = Option<FileCategory>> {
            proptest::option::of(proptest::sample::select(FileCategory::ALL.to_vec()))
        }

        fn theme_strategy() -> impl Strategy<Value = Theme> {
            prop_oneof![Just(Theme::Light), Just(Theme::Dark)]
        }

        proptest! {
            /// Resolving twice with the same inputs yields equal styles.
            #[test]
            fn prop_node_style_is_deterministic(
                kind in kind_strategy(),
                category in category_strategy(),
                selected in any::<bool>(),
                theme in theme_strategy(),
            ) {
                let first = resolve_node_style(kind, category, selected, theme);
                let second = resolve_node_style(kind, category, selected, theme);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn prop_edge_style_is_deterministic(
                kind in kind_strategy(),
                category in category_strategy(),
                selected in any::<bool>(),
                theme in theme_strategy(),
                dependencies in any::<bool>(),
            ) {
                let mode = if dependencies { ViewMode::Dependencies } else { ViewMode::Structure };
                let first = resolve_edge_style(mode, kind, category, selected, theme);
                let second = resolve_edge_style(mode, kind, category, selected, theme);
                prop_assert_eq!(first, second);
                prop_assert!(first.width >= 1.0);
            }

            #[test]
            fn prop_selection_never_thins_border(
                kind in kind_strategy(),
                category in category_strategy(),
                theme in theme_strategy(),
            ) {
                let plain = resolve_node_style(kind, category, false, theme);
                let selected = resolve_node_style(kind, category, true, theme);
                prop_assert!(selected.border_width >= plain.border_width);
            }
        }
    }
}
