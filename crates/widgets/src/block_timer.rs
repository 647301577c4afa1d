use chrono::Utc;
use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{style::LegacyRule, style::StyleTable, Widget};

const BLOCK_SECS: f64 = 5.0 * 3600.0;
const LONG_BAR: usize = 32;
const SHORT_BAR: usize = 16;

const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("time-labeled", "Block: 3hr 45m"),
        DisplayStyle::new("time-plain", "3hr 45m"),
        DisplayStyle::new("progress-labeled", "Block [████████░░] 73.9%"),
        DisplayStyle::new("progress-plain", "[████████░░] 73.9%"),
        DisplayStyle::new("progress-short-labeled", "Block [████░░] 73.9%"),
        DisplayStyle::new("progress-short-plain", "[████░░] 73.9%"),
    ],
    default: "time-labeled",
    aliases: &[],
    legacy: &[
        LegacyRule::meta(&[("display", "progress")], Some(true), "progress-plain"),
        LegacyRule::meta(&[("display", "progress")], Some(false), "progress-labeled"),
        LegacyRule::meta(&[("display", "progress-short")], Some(true), "progress-short-plain"),
        LegacyRule::meta(&[("display", "progress-short")], Some(false), "progress-short-labeled"),
        LegacyRule::raw(true, "time-plain"),
    ],
};

fn bar(progress: f64, width: usize) -> String {
    let filled = ((progress * width as f64).floor() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Time elapsed in the current five-hour usage block.
#[derive(Debug, Default)]
pub struct BlockTimerWidget;

impl BlockTimerWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for BlockTimerWidget {
    fn default_color(&self) -> &'static str {
        "yellow"
    }

    fn display_name(&self) -> &'static str {
        "Block Timer"
    }

    fn description(&self) -> &'static str {
        "Shows elapsed time since beginning of current 5hr block"
    }

    fn style_table(&self) -> &'static StyleTable {
        &STYLES
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
        let style = STYLES.resolve(item);
        let progress_style = style.starts_with("progress");
        let width = if style.contains("short") { SHORT_BAR } else { LONG_BAR };
        let labeled = style.ends_with("labeled");

        if ctx.is_preview {
            let body = match (progress_style, width) {
                (false, _) => "3hr 45m",
                (true, SHORT_BAR) => "[███████░░░░░░░░] 73.9%",
                (true, _) => "[██████████████████████░░░░░░░░] 73.9%",
            };
            return Some(match (labeled, progress_style) {
                (false, _) => body.to_string(),
                (true, true) => format!("Block {body}"),
                (true, false) => format!("Block: {body}"),
            });
        }

        let idle = ctx.block_metrics.is_none();
        let elapsed_secs = match &ctx.block_metrics {
            Some(block) => {
                let elapsed = ctx.now.with_timezone(&Utc) - block.start_time;
                elapsed.num_seconds().max(0) as f64
            }
            None => 0.0,
        };
        let progress = (elapsed_secs / BLOCK_SECS).min(1.0);

        let text = if progress_style {
            let pct = if idle {
                "0".to_string()
            } else {
                format!("{:.1}", progress * 100.0)
            };
            let body = format!("[{}] {pct}%", bar(progress, width));
            if labeled { format!("Block {body}") } else { body }
        } else {
            let minutes = elapsed_secs as u64 / 60;
            let (h, m) = (minutes / 60, minutes % 60);
            let body = if m == 0 && !idle { format!("{h}hr") } else { format!("{h}hr {m}m") };
            if labeled { format!("Block: {body}") } else { body }
        };
        Some(text)
    }
}
