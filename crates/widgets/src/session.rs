use std::time::Duration;

use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{labeled, style::StyleTable, Widget, LABELED_OR_PLAIN};

const CLOCK_STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "Session: 2hr 15m"),
        DisplayStyle::new("plain", "2hr 15m"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// `2hr 15m`, `2hr`, `15m`, or `<1m`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let minutes = elapsed.as_secs() / 60;
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, 0) => "<1m".to_string(),
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}hr"),
        (h, m) => format!("{h}hr {m}m"),
    }
}

/// Wall-clock time since the session started.
#[derive(Debug, Default)]
pub struct SessionClockWidget;

impl SessionClockWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for SessionClockWidget {
    fn default_color(&self) -> &'static str {
        "yellow"
    }

    fn display_name(&self) -> &'static str {
        "Session Clock"
    }

    fn description(&self) -> &'static str {
        "Shows elapsed time since current session started"
    }

    fn style_table(&self) -> &'static StyleTable {
        &CLOCK_STYLES
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
        let elapsed = if ctx.is_preview {
            Duration::from_secs(2 * 3600 + 15 * 60)
        } else {
            match ctx.session_duration {
                Some(d) => d,
                None => Duration::from_millis(ctx.data.as_ref()?.cost.as_ref()?.total_duration_ms?),
            }
        };
        Some(labeled("Session", format_elapsed(elapsed), CLOCK_STYLES.resolve(item) == "plain"))
    }
}

const COST_STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "Cost: $2.45"),
        DisplayStyle::new("plain", "$2.45"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// Total session cost in USD as reported by the host.
#[derive(Debug, Default)]
pub struct SessionCostWidget;

impl SessionCostWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for SessionCostWidget {
    fn default_color(&self) -> &'static str {
        "green"
    }

    fn display_name(&self) -> &'static str {
        "Session Cost"
    }

    fn description(&self) -> &'static str {
        "Shows the total session cost in USD"
    }

    fn style_table(&self) -> &'static StyleTable {
        &COST_STYLES
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
        let cost = if ctx.is_preview {
            2.45
        } else {
            ctx.data.as_ref()?.cost.as_ref()?.total_cost_usd?
        };
        Some(labeled("Cost", format!("${cost:.2}"), COST_STYLES.resolve(item) == "plain"))
    }
}
