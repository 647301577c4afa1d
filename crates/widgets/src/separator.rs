use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext, WidgetCategory};

use crate::{style::LegacyRule, style::StyleTable, Widget};

pub(crate) const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("pipe", " | "),
        DisplayStyle::new("dash", " - "),
        DisplayStyle::new("comma", ", "),
        DisplayStyle::new("dot", " · "),
        DisplayStyle::new("single", " "),
        DisplayStyle::new("double", "  "),
        DisplayStyle::new("triple", "   "),
    ],
    default: "pipe",
    aliases: &[("space", "double"), ("double-space", "triple")],
    legacy: &[
        LegacyRule::character("|", "pipe"),
        LegacyRule::character("-", "dash"),
        LegacyRule::character(",", "comma"),
        LegacyRule::character("·", "dot"),
        LegacyRule::character(" ", "single"),
        LegacyRule::character("  ", "double"),
        LegacyRule::character("   ", "triple"),
    ],
};

/// Literal text between widgets.  The style label is the rendered text.
#[derive(Debug, Default)]
pub struct SeparatorWidget;

impl SeparatorWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for SeparatorWidget {
    fn default_color(&self) -> &'static str {
        "gray"
    }

    fn display_name(&self) -> &'static str {
        "Separator"
    }

    fn description(&self) -> &'static str {
        "Visual separator between widgets"
    }

    fn style_table(&self) -> &'static StyleTable {
        &STYLES
    }

    fn category(&self) -> WidgetCategory {
        WidgetCategory::Separator
    }

    fn can_inherit_colors(&self) -> bool {
        true
    }

    fn render(
        &self,
        item: &WidgetItem,
        _ctx: &RenderContext,
        _settings: &Settings,
    ) -> Option<String> {
        STYLES.label(STYLES.resolve(item)).map(String::from)
    }
}

/// Placeholder that the layout engine widens to fill the line.
#[derive(Debug, Default)]
pub struct FlexSeparatorWidget;

impl FlexSeparatorWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for FlexSeparatorWidget {
    fn default_color(&self) -> &'static str {
        "gray"
    }

    fn display_name(&self) -> &'static str {
        "Flex Separator"
    }

    fn description(&self) -> &'static str {
        "Flexible separator that expands to fill available space"
    }

    fn category(&self) -> WidgetCategory {
        WidgetCategory::Dynamic
    }

    fn supports_colors(&self, _item: &WidgetItem) -> bool {
        false
    }

    fn render(
        &self,
        _item: &WidgetItem,
        _ctx: &RenderContext,
        _settings: &Settings,
    ) -> Option<String> {
        Some(String::new())
    }
}
