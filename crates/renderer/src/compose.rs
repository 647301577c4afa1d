//! Multi-line composition.

use statline_config::{FlexMode, Settings};
use statline_core::RenderContext;
use statline_widgets::context_percentage::{used_percent, CONTEXT_WINDOW};

use crate::layout::render_line;

/// Columns given up by the narrow flex modes.
const COMPACT_MARGIN: usize = 40;

/// Width the layout engine may fill, per `flexMode`.
pub fn effective_width(settings: &Settings, ctx: &RenderContext) -> Option<usize> {
    let full = usize::from(ctx.terminal_width?);
    let narrow = full.saturating_sub(COMPACT_MARGIN);

    Some(match settings.flex_mode {
        FlexMode::Full => full,
        FlexMode::FullMinus40 => narrow,
        FlexMode::FullUntilCompact => {
            let used = ctx
                .token_metrics
                .map(|m| used_percent(m.context_length, CONTEXT_WINDOW))
                .unwrap_or(0.0);
            if used >= f64::from(settings.compact_threshold) {
                narrow
            } else {
                full
            }
        }
    })
}

/// Render every configured line and join them with newlines.  Lines that
/// render nothing stay in place as empty strings.
pub fn render_status_line(settings: &Settings, ctx: &RenderContext) -> String {
    let width = effective_width(settings, ctx);
    settings
        .lines
        .iter()
        .map(|items| render_line(items, ctx, settings, width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_config::{ColorLevel, WidgetItem};
    use statline_core::TokenMetrics;

    fn text(id: &str, s: &str) -> WidgetItem {
        WidgetItem {
            custom_text: Some(s.into()),
            ..WidgetItem::new(id, "custom-text")
        }
    }

    fn plain(lines: Vec<Vec<WidgetItem>>) -> Settings {
        Settings {
            lines,
            color_level: ColorLevel::None,
            ..Settings::default()
        }
    }

    #[test]
    fn lines_keep_their_positions() {
        let settings = plain(vec![
            vec![text("1", "top")],
            vec![WidgetItem::new("2", "custom-text")],
            vec![text("3", "bottom")],
        ]);
        let out = render_status_line(&settings, &RenderContext::preview());
        assert_eq!(out, "top\n\nbottom");
    }

    #[test]
    fn lines_fill_independently() {
        let settings = plain(vec![
            vec![text("1", "a"), WidgetItem::new("2", "flex-separator"), text("3", "b")],
            vec![text("4", "ccc"), WidgetItem::new("5", "flex-separator"), text("6", "d")],
        ]);
        let mut ctx = RenderContext::preview();
        ctx.terminal_width = Some(6);
        assert_eq!(render_status_line(&settings, &ctx), "a    b\nccc  d");
    }

    #[test]
    fn flex_modes() {
        let mut settings = plain(Vec::new());
        let mut ctx = RenderContext::preview();
        ctx.terminal_width = Some(120);
        assert_eq!(effective_width(&settings, &ctx), Some(120));

        settings.flex_mode = FlexMode::FullMinus40;
        assert_eq!(effective_width(&settings, &ctx), Some(80));

        settings.flex_mode = FlexMode::FullUntilCompact;
        settings.compact_threshold = 60;
        ctx.token_metrics = Some(TokenMetrics {
            context_length: 100_000,
            ..TokenMetrics::default()
        });
        assert_eq!(effective_width(&settings, &ctx), Some(120));
        ctx.token_metrics = Some(TokenMetrics {
            context_length: 130_000,
            ..TokenMetrics::default()
        });
        assert_eq!(effective_width(&settings, &ctx), Some(80));

        ctx.terminal_width = None;
        assert_eq!(effective_width(&settings, &ctx), None);
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut settings = Settings::default();
        settings.lines.push(vec![
            WidgetItem::new("a", "block-timer"),
            WidgetItem::new("b", "flex-separator"),
            WidgetItem::new("c", "context-percentage"),
        ]);
        let mut ctx = RenderContext::preview();
        ctx.terminal_width = Some(100);
        assert_eq!(render_status_line(&settings, &ctx), render_status_line(&settings, &ctx));
    }
}
