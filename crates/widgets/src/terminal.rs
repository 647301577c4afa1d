use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{labeled, style::StyleTable, Widget, LABELED_OR_PLAIN};

const WIDTH_STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "Term: 120"),
        DisplayStyle::new("plain", "120"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// Terminal width in columns.
#[derive(Debug, Default)]
pub struct TerminalWidthWidget;

impl TerminalWidthWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for TerminalWidthWidget {
    fn default_color(&self) -> &'static str {
        "brightBlack"
    }

    fn display_name(&self) -> &'static str {
        "Terminal Width"
    }

    fn description(&self) -> &'static str {
        "Shows current terminal width in columns"
    }

    fn style_table(&self) -> &'static StyleTable {
        &WIDTH_STYLES
    }

    fn supports_raw_value(&self) -> bool {
        true
    }

    fn render(
        &self,
        item: &WidgetItem,
        ctx: &RenderContext,
        _settings: &Settings,
    ) -> Option<String> {
        let width = if ctx.is_preview { 120 } else { ctx.terminal_width? };
        Some(labeled("Term", width, WIDTH_STYLES.resolve(item) == "plain"))
    }
}

const VERSION_STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "Version: 1.0.80"),
        DisplayStyle::new("plain", "1.0.80"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// Version of the host application.
#[derive(Debug, Default)]
pub struct VersionWidget;

impl VersionWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for VersionWidget {
    fn default_color(&self) -> &'static str {
        "gray"
    }

    fn display_name(&self) -> &'static str {
        "Version"
    }

    fn description(&self) -> &'static str {
        "Shows the host application version"
    }

    fn style_table(&self) -> &'static StyleTable {
        &VERSION_STYLES
    }

    fn supports_raw_value(&self) -> bool {
        true
    }

    fn render(
        &self,
        item: &WidgetItem,
        ctx: &RenderContext,
        _settings: &Settings,
    ) -> Option<String> {
        let version = if ctx.is_preview {
            "1.0.80"
        } else {
            ctx.data.as_ref()?.version.as_deref()?
        };
        Some(labeled("Version", version, VERSION_STYLES.resolve(item) == "plain"))
    }
}
