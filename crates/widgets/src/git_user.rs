use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{git, style::StyleTable, Widget};

const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("name-only", "jdoe"),
        DisplayStyle::new("email-only", "jdoe@example.com"),
        DisplayStyle::new("name-with-email", "jdoe (jdoe@example.com)"),
    ],
    default: "name-only",
    aliases: &[],
    legacy:  &[],
};

/// `user.name` / `user.email` from git config.
#[derive(Debug, Default)]
pub struct GitUserWidget;

impl GitUserWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for GitUserWidget {
    fn default_color(&self) -> &'static str {
        "cyan"
    }

    fn display_name(&self) -> &'static str {
        "Git User"
    }

    fn description(&self) -> &'static str {
        "Shows the git user name and/or email from git config"
    }

    fn style_table(&self) -> &'static StyleTable {
        &STYLES
    }

    fn render(
        &self,
        item: &WidgetItem,
        ctx: &RenderContext,
        _settings: &Settings,
    ) -> Option<String> {
        let style = STYLES.resolve(item);
        if ctx.is_preview {
            return STYLES.label(style).map(String::from);
        }

        let probe = git(ctx);
        let value = match style {
            "email-only" => probe.user_email(),
            "name-with-email" => match (probe.user_name(), probe.user_email()) {
                (Some(name), Some(email)) => Some(format!("{name} ({email})")),
                (name, email) => name.or(email),
            },
            _ => probe.user_name(),
        };
        Some(value.unwrap_or_else(|| "n/a".into()))
    }
}
