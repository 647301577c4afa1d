use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root settings structure, loaded once per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// One entry per status line, widgets in left-to-right order.
    pub lines: Vec<Vec<WidgetItem>>,
    /// Powerline (colored block) rendering.
    pub powerline: PowerlineConfig,
    /// Text inserted between adjacent content widgets.  `None` = nothing.
    pub default_separator: Option<String>,
    /// Text placed on both sides of every content widget.
    pub default_padding: Option<String>,
    /// Auto-inserted separators take the colors of the widget before them.
    pub inherit_separator_colors: bool,
    /// Render every widget bold.
    pub global_bold: bool,
    pub color_level: ColorLevel,
    pub flex_mode: FlexMode,
    /// Context usage percentage at which `full-until-compact` narrows.
    pub compact_threshold: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lines: vec![vec![
                WidgetItem::new("1", "model"),
                WidgetItem::new("2", "separator"),
                WidgetItem::new("3", "context-length"),
                WidgetItem::new("4", "separator"),
                WidgetItem::new("5", "git-branch"),
                WidgetItem::new("6", "separator"),
                WidgetItem::new("7", "git-changes"),
            ]],
            powerline: PowerlineConfig::default(),
            default_separator: None,
            default_padding: None,
            inherit_separator_colors: false,
            global_bold: false,
            color_level: ColorLevel::default(),
            flex_mode: FlexMode::default(),
            compact_threshold: 60,
        }
    }
}

/// Config block for a single widget instance.
///
/// Several fields predate `display_style` and are kept so that files saved
/// by older releases keep rendering the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetItem {
    /// Stable identifier, unique within its line.
    pub id: String,
    /// Widget type identifier, e.g. `"git-branch"`.  Unknown values are
    /// tolerated and render as nothing.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Legacy separator character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    /// Legacy "no label" flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_path: Option<String>,
    /// Truncation bound in terminal cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_colors: Option<bool>,
    /// Command timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Merge::is_none")]
    pub merge: Merge,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl WidgetItem {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn is_raw(&self) -> bool {
        self.raw_value == Some(true)
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// `true` only for the literal string `"true"`.
    pub fn meta_flag(&self, key: &str) -> bool {
        self.meta(key) == Some("true")
    }
}

/// How a widget joins the next rendered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawMerge", into = "RawMerge")]
pub enum Merge {
    #[default]
    None,
    /// No separator between the two widgets; padding is kept.
    Join,
    /// No separator and no padding at the junction.
    NoPadding,
}

impl Merge {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// On-disk shape: `true`/`false` or the string `"no-padding"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawMerge {
    Flag(bool),
    Mode(String),
}

impl From<RawMerge> for Merge {
    fn from(raw: RawMerge) -> Self {
        match raw {
            RawMerge::Flag(true) => Self::Join,
            RawMerge::Flag(false) => Self::None,
            RawMerge::Mode(mode) if mode == "no-padding" => Self::NoPadding,
            RawMerge::Mode(_) => Self::None,
        }
    }
}

impl From<Merge> for RawMerge {
    fn from(merge: Merge) -> Self {
        match merge {
            Merge::None => Self::Flag(false),
            Merge::Join => Self::Flag(true),
            Merge::NoPadding => Self::Mode("no-padding".to_string()),
        }
    }
}

/// Powerline rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PowerlineConfig {
    pub enabled: bool,
    /// `"custom"` or the name of a built-in palette.
    pub theme: String,
    /// Glyph drawn between blocks.
    pub separator: String,
    pub start_cap: Option<String>,
    pub end_cap: Option<String>,
    /// Palette used by the `custom` theme, assigned round-robin.
    pub custom_colors: Vec<ColorPair>,
}

impl Default for PowerlineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            theme: "custom".to_string(),
            separator: "\u{E0B0}".to_string(),
            start_cap: None,
            end_cap: None,
            custom_colors: Vec::new(),
        }
    }
}

/// A foreground/background color pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub fg: String,
    pub bg: String,
}

/// How many colors the output may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ColorLevel {
    /// No escape sequences at all.
    None,
    /// The 16 basic ANSI colors.
    Basic,
    #[default]
    Ansi256,
    TrueColor,
}

impl From<u8> for ColorLevel {
    fn from(level: u8) -> Self {
        match level {
            0 => Self::None,
            1 => Self::Basic,
            2 => Self::Ansi256,
            _ => Self::TrueColor,
        }
    }
}

impl From<ColorLevel> for u8 {
    fn from(level: ColorLevel) -> Self {
        match level {
            ColorLevel::None => 0,
            ColorLevel::Basic => 1,
            ColorLevel::Ansi256 => 2,
            ColorLevel::TrueColor => 3,
        }
    }
}

/// Width budget used for flex separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexMode {
    /// The whole terminal width.
    #[default]
    Full,
    /// Leave 40 cells for host notices on the right.
    FullMinus40,
    /// Full width until context usage reaches `compact_threshold`.
    FullUntilCompact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accepts_bool_and_no_padding() {
        let items: Vec<WidgetItem> = serde_json::from_str(
            r#"[
                {"id":"1","type":"model","merge":true},
                {"id":"2","type":"model","merge":"no-padding"},
                {"id":"3","type":"model","merge":false},
                {"id":"4","type":"model"}
            ]"#,
        )
        .unwrap();
        let merges: Vec<Merge> = items.iter().map(|i| i.merge).collect();
        assert_eq!(
            merges,
            vec![Merge::Join, Merge::NoPadding, Merge::None, Merge::None]
        );
    }

    #[test]
    fn camel_case_fields() {
        let item: WidgetItem = serde_json::from_str(
            r#"{"id":"a","type":"git-branch","rawValue":true,
                "backgroundColor":"blue","metadata":{"hideNoGit":"true"}}"#,
        )
        .unwrap();
        assert!(item.is_raw());
        assert_eq!(item.background_color.as_deref(), Some("blue"));
        assert!(item.meta_flag("hideNoGit"));
    }

    #[test]
    fn partial_settings_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"powerline":{"enabled":true},"colorLevel":3}"#).unwrap();
        assert!(settings.powerline.enabled);
        assert_eq!(settings.powerline.theme, "custom");
        assert_eq!(settings.color_level, ColorLevel::TrueColor);
        assert_eq!(settings.lines.len(), 1);
    }

    #[test]
    fn flex_mode_kebab_case() {
        let settings: Settings =
            serde_json::from_str(r#"{"flexMode":"full-until-compact"}"#).unwrap();
        assert_eq!(settings.flex_mode, FlexMode::FullUntilCompact);
    }
}
