use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{git, style::LegacyRule, style::StyleTable, Widget};

const HIDE_NO_GIT: &[(&str, &str)] = &[("hideNoGit", "true")];

const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("with-icon-show", "𖠰 main / 𖠰 no git"),
        DisplayStyle::new("with-icon-hide", "𖠰 main / (hidden)"),
        DisplayStyle::new("plain-show", "main / no git"),
        DisplayStyle::new("plain-hide", "main / (hidden)"),
    ],
    default: "with-icon-show",
    aliases: &[],
    legacy: &[
        LegacyRule::meta(HIDE_NO_GIT, Some(true), "plain-hide"),
        LegacyRule::meta(HIDE_NO_GIT, Some(false), "with-icon-hide"),
        LegacyRule::raw(true, "plain-show"),
    ],
};

/// Name of the linked worktree, or `main` for the primary checkout.
#[derive(Debug, Default)]
pub struct GitWorktreeWidget;

impl GitWorktreeWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for GitWorktreeWidget {
    fn default_color(&self) -> &'static str {
        "blue"
    }

    fn display_name(&self) -> &'static str {
        "Git Worktree"
    }

    fn description(&self) -> &'static str {
        "Shows the current git worktree name"
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
        let icon = if style.starts_with("with-icon") { "𖠰 " } else { "" };

        let name = if ctx.is_preview {
            "main".to_string()
        } else {
            match git(ctx).worktree() {
                Some(name) => name,
                None if style.ends_with("hide") => return None,
                None => "no git".to_string(),
            }
        };
        Some(format!("{icon}{name}"))
    }
}
