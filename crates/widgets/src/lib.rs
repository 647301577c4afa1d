//! Widget implementations and the registry that maps type ids to them.

pub mod block_timer;
pub mod context_percentage;
pub mod custom;
pub mod cwd;
pub mod git_branch;
pub mod git_changes;
pub mod git_user;
pub mod git_worktree;
pub mod icon;
pub mod model;
pub mod registry;
pub mod separator;
pub mod session;
pub mod style;
pub mod terminal;
pub mod tokens;

use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext, WidgetCategory};
use statline_system::GitProbe;

pub use registry::{is_known, list_types, resolve, REGISTRY};
pub use style::{LegacyRule, StyleTable};

/// A status-line widget.
///
/// Implementations are stateless; `render` reads the item, the context and
/// the settings and returns the text to show, or `None` to drop the item
/// from the line.
pub trait Widget: Send + Sync {
    /// Colour used when the item does not set one.
    fn default_color(&self) -> &'static str;
    fn display_name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    fn style_table(&self) -> &'static StyleTable {
        &StyleTable::NONE
    }

    fn styles(&self) -> &'static [DisplayStyle] {
        self.style_table().styles
    }

    fn render(&self, item: &WidgetItem, ctx: &RenderContext, settings: &Settings) -> Option<String>;

    /// Whether the legacy `rawValue` flag changes this widget's output.
    fn supports_raw_value(&self) -> bool {
        false
    }

    fn supports_colors(&self, _item: &WidgetItem) -> bool {
        true
    }

    fn category(&self) -> WidgetCategory {
        WidgetCategory::Content
    }

    /// Take the colours of the preceding content widget when the item has
    /// none of its own.
    fn can_inherit_colors(&self) -> bool {
        false
    }

    /// Appended when `maxWidth` cuts the text.
    fn truncation_marker(&self) -> &'static str {
        ""
    }
}

// ── Shared formatting ─────────────────────────────────────────────────────────

/// `1234567` → `1.2M`, `15234` → `15.2k`, `999` → `999`.
pub fn format_tokens(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// `"Label: value"` for labeled styles, the bare value otherwise.
pub(crate) fn labeled(label: &str, value: impl std::fmt::Display, plain: bool) -> String {
    if plain {
        value.to_string()
    } else {
        format!("{label}: {value}")
    }
}

/// Git queries run in the session's working directory.
pub(crate) fn git(ctx: &RenderContext) -> GitProbe<'_> {
    GitProbe::new(ctx.shell.as_ref(), ctx.cwd())
}

/// The `labeled | plain` table shared by simple value widgets.
pub(crate) const LABELED_OR_PLAIN: &[LegacyRule] = &[LegacyRule::raw(true, "plain")];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_counts() {
        assert_eq!(format_tokens(0), "0");
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(15_234), "15.2k");
        assert_eq!(format_tokens(1_234_567), "1.2M");
    }

    #[test]
    fn labels() {
        assert_eq!(labeled("Model", "Opus", false), "Model: Opus");
        assert_eq!(labeled("Model", "Opus", true), "Opus");
    }
}
