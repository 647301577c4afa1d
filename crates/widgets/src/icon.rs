use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{style::StyleTable, Widget};

const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("folder", "📁"),
        DisplayStyle::new("lightning", "⚡"),
        DisplayStyle::new("chart", "📊"),
        DisplayStyle::new("clock", "🕐"),
        DisplayStyle::new("wrench", "🔧"),
        DisplayStyle::new("gear", "⚙"),
        DisplayStyle::new("brain", "🧠"),
        DisplayStyle::new("page", "📄"),
        DisplayStyle::new("pencil", "✏"),
        DisplayStyle::new("magnifier", "🔍"),
        DisplayStyle::new("flag", "🏁"),
        DisplayStyle::new("eye", "👀"),
    ],
    default: "folder",
    aliases: &[],
    legacy:  &[],
};

#[derive(Debug, Default)]
pub struct IconWidget;

impl IconWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for IconWidget {
    fn default_color(&self) -> &'static str {
        "white"
    }

    fn display_name(&self) -> &'static str {
        "Icon"
    }

    fn description(&self) -> &'static str {
        "Displays a decorative icon"
    }

    fn style_table(&self) -> &'static StyleTable {
        &STYLES
    }

    fn render(
        &self,
        item: &WidgetItem,
        _ctx: &RenderContext,
        _settings: &Settings,
    ) -> Option<String> {
        let icon = STYLES.label(STYLES.resolve(item))?;
        Some(format!(" {icon} "))
    }
}
