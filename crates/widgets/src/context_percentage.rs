use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};
use statline_system::usage::clean_reset_text;

use crate::{style::LegacyRule, style::StyleTable, Widget};

/// Full context window in tokens.
pub const CONTEXT_WINDOW: u64 = 200_000;
/// Tokens usable before the host auto-compacts.
pub const USABLE_WINDOW: u64 = 160_000;

const SCALING: f64 = 1.04;

/// Share of `window` used by `length` tokens, in percent, capped at 100.
pub fn used_percent(length: u64, window: u64) -> f64 {
    (length as f64 / window as f64 * 100.0 * SCALING).min(100.0)
}

const INVERSE: &[(&str, &str)] = &[("inverse", "true")];

const LEGACY: &[LegacyRule] = &[
    LegacyRule::meta(INVERSE, Some(true), "remaining-plain"),
    LegacyRule::meta(INVERSE, Some(false), "remaining-short"),
    LegacyRule::raw(true, "used-plain"),
];

pub(crate) const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("remaining-plain", "91%"),
        DisplayStyle::new("remaining-left-suffix", "91% left"),
        DisplayStyle::new("remaining-short", "Left: 91%"),
        DisplayStyle::new("remaining-long", "Context remaining: 91%"),
        DisplayStyle::new("used-plain", "9%"),
        DisplayStyle::new("used-short", "Used: 9%"),
        DisplayStyle::new("used-long", "Context used: 9%"),
        DisplayStyle::new("weekly-used-reset", "weekly 10% Fri 8:00AM"),
        DisplayStyle::new("weekly-left-reset", "weekly 90% Fri 8:00AM (left)"),
        DisplayStyle::new("session-reset-used", "1h 37m 31%"),
        DisplayStyle::new("session-reset-left", "1h 37m 69% (left)"),
    ],
    default: "used-short",
    aliases: &[],
    legacy:  LEGACY,
};

/// `10%` for whole numbers, `10.5%` otherwise.
fn format_percent(percent: f64) -> String {
    let text = format!("{percent:.1}");
    format!("{}%", text.strip_suffix(".0").unwrap_or(&text))
}

fn display_percent(percent: f64, left: bool) -> f64 {
    if left {
        (100.0 - percent).clamp(0.0, 100.0)
    } else {
        percent
    }
}

/// Context window usage against the full 200k window, or the plan usage
/// figures written by an external usage tracker.
#[derive(Debug, Default)]
pub struct ContextPercentageWidget;

impl ContextPercentageWidget {
    pub fn new() -> Self {
        Self
    }

    fn render_usage(style: &str, ctx: &RenderContext) -> Option<String> {
        let left = style.ends_with("left-reset") || style.ends_with("reset-left");
        let weekly = style.starts_with("weekly");

        if ctx.is_preview {
            return Some(if weekly {
                format!("weekly {} Fri 8:00AM", format_percent(display_percent(10.0, left)))
            } else {
                format!("1h 37m {}", format_percent(display_percent(31.0, left)))
            });
        }

        let usage = ctx.usage.as_ref()?;
        if weekly {
            let pct = display_percent(usage.weekly_percent?, left);
            let reset = usage.weekly_reset.as_deref().filter(|s| !s.is_empty())?;
            Some(format!("weekly {} {}", format_percent(pct), clean_reset_text(reset)))
        } else {
            let pct = display_percent(usage.session_percent?, left);
            let reset = usage.session_reset.as_deref().filter(|s| !s.is_empty())?;
            Some(format!("{} {}", clean_reset_text(reset), format_percent(pct)))
        }
    }
}

impl Widget for ContextPercentageWidget {
    fn default_color(&self) -> &'static str {
        "blue"
    }

    fn display_name(&self) -> &'static str {
        "Context %"
    }

    fn description(&self) -> &'static str {
        "Shows context usage percentage (200k window) or weekly/session plan usage"
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
        if style.starts_with("weekly") || style.starts_with("session") {
            return Self::render_usage(style, ctx);
        }

        let used = if ctx.is_preview {
            9.3
        } else {
            used_percent(ctx.token_metrics.as_ref()?.context_length, CONTEXT_WINDOW)
        };
        let remaining = 100.0 - used;

        Some(match style {
            "remaining-plain" => format!("{remaining:.1}%"),
            "remaining-left-suffix" => format!("{remaining:.1}% left"),
            "remaining-short" => format!("Left: {remaining:.1}%"),
            "remaining-long" => format!("Context remaining: {remaining:.1}%"),
            "used-plain" => format!("{used:.1}%"),
            "used-long" => format!("Context used: {used:.1}%"),
            _ => format!("Used: {used:.1}%"),
        })
    }
}

const USABLE_STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("remaining-plain", "88%"),
        DisplayStyle::new("remaining-short", "Left: 88%"),
        DisplayStyle::new("remaining-long", "Usable remaining: 88%"),
        DisplayStyle::new("used-plain", "12%"),
        DisplayStyle::new("used-short", "Used: 12%"),
        DisplayStyle::new("used-long", "Usable used: 12%"),
    ],
    default: "used-short",
    aliases: &[],
    legacy:  LEGACY,
};

/// Context usage against the 160k tokens available before auto-compact.
#[derive(Debug, Default)]
pub struct ContextPercentageUsableWidget;

impl ContextPercentageUsableWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for ContextPercentageUsableWidget {
    fn default_color(&self) -> &'static str {
        "green"
    }

    fn display_name(&self) -> &'static str {
        "Context % (usable)"
    }

    fn description(&self) -> &'static str {
        "Shows percentage of usable context window used or remaining (of 160k tokens before auto-compact)"
    }
    fn style_table(&self) -> &'static StyleTable {
        &USABLE_STYLES
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
        let used = if ctx.is_preview {
            11.6
        } else {
            used_percent(ctx.token_metrics.as_ref()?.context_length, USABLE_WINDOW)
        };
        let remaining = 100.0 - used;

        Some(match USABLE_STYLES.resolve(item) {
            "remaining-plain" => format!("{remaining:.1}%"),
            "remaining-short" => format!("Left: {remaining:.1}%"),
            "remaining-long" => format!("Usable remaining: {remaining:.1}%"),
            "used-plain" => format!("{used:.1}%"),
            "used-long" => format!("Usable used: {used:.1}%"),
            _ => format!("Used: {used:.1}%"),
        })
    }
}
