use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{git, style::LegacyRule, style::StyleTable, Widget};

const HIDE_NO_GIT: &[(&str, &str)] = &[("hideNoGit", "true")];

pub(crate) const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("icon-only", "⎇ main / n/a"),
        DisplayStyle::new("icon-with-indicator", "⎇ main * / n/a"),
        DisplayStyle::new("plain-only", "main / n/a"),
        DisplayStyle::new("plain-with-indicator", "main * / n/a"),
    ],
    default: "icon-only",
    // Every pre-rename style showed the change indicator.
    aliases: &[
        ("with-icon-show", "icon-with-indicator"),
        ("with-icon-hide", "icon-with-indicator"),
        ("plain-show", "plain-with-indicator"),
        ("plain-hide", "plain-with-indicator"),
    ],
    legacy: &[
        LegacyRule::meta(HIDE_NO_GIT, Some(true), "plain-with-indicator"),
        LegacyRule::meta(HIDE_NO_GIT, Some(false), "icon-with-indicator"),
        LegacyRule::raw(true, "plain-only"),
    ],
};

/// Current branch, with `*` for uncommitted changes or `↑` for unpushed
/// commits in the indicator styles.
#[derive(Debug, Default)]
pub struct GitBranchWidget;

impl GitBranchWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for GitBranchWidget {
    fn default_color(&self) -> &'static str {
        "magenta"
    }

    fn display_name(&self) -> &'static str {
        "Git Branch"
    }

    fn description(&self) -> &'static str {
        "Shows the current git branch name with * for changes and ↑ for unpushed commits"
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
        let with_icon = style.starts_with("icon");
        let with_indicator = style.ends_with("indicator");
        let icon = if with_icon { "⎇ " } else { "" };

        if ctx.is_preview {
            let indicator = if with_indicator { " *" } else { "" };
            return Some(format!("{icon}main{indicator}"));
        }

        let probe = git(ctx);
        let Some(branch) = probe.branch() else {
            return Some("n/a".into());
        };

        let indicator = if !with_indicator {
            ""
        } else if probe.has_changes() {
            " *"
        } else if probe.commits_ahead() > 0 {
            " ↑"
        } else {
            ""
        };
        Some(format!("{icon}{branch}{indicator}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_core::{ScriptedShell, StatusData};
    use std::sync::Arc;

    fn ctx(shell: ScriptedShell) -> RenderContext {
        let mut ctx = RenderContext::new(Arc::new(shell));
        ctx.data = Some(StatusData::default());
        ctx
    }

    fn item(style: Option<&str>) -> WidgetItem {
        WidgetItem {
            display_style: style.map(String::from),
            ..WidgetItem::new("1", "git-branch")
        }
    }

    #[test]
    fn legacy_table() {
        let mut it = item(None);
        assert_eq!(STYLES.resolve(&it), "icon-only");

        it.raw_value = Some(true);
        assert_eq!(STYLES.resolve(&it), "plain-only");

        it.metadata.insert("hideNoGit".into(), "true".into());
        assert_eq!(STYLES.resolve(&it), "plain-with-indicator");

        it.raw_value = None;
        assert_eq!(STYLES.resolve(&it), "icon-with-indicator");
    }

    #[test]
    fn old_style_names() {
        assert_eq!(STYLES.resolve(&item(Some("plain-hide"))), "plain-with-indicator");
        assert_eq!(STYLES.resolve(&item(Some("with-icon-show"))), "icon-with-indicator");
    }

    #[test]
    fn dirty_branch_gets_star() {
        let shell = ScriptedShell::new()
            .with("git branch --show-current", "feature/x\n")
            .with("git status --porcelain", " M src/lib.rs\n");
        let out = GitBranchWidget.render(
            &item(Some("icon-with-indicator")),
            &ctx(shell),
            &Settings::default(),
        );
        assert_eq!(out.as_deref(), Some("⎇ feature/x *"));
    }

    #[test]
    fn ahead_branch_gets_arrow() {
        let shell = ScriptedShell::new()
            .with("git branch --show-current", "main\n")
            .with("git status --porcelain", "")
            .with("git rev-list --count @{u}..HEAD", "3\n");
        let out = GitBranchWidget.render(
            &item(Some("plain-with-indicator")),
            &ctx(shell),
            &Settings::default(),
        );
        assert_eq!(out.as_deref(), Some("main ↑"));
    }

    #[test]
    fn outside_repo_is_na() {
        let out =
            GitBranchWidget.render(&item(None), &ctx(ScriptedShell::new()), &Settings::default());
        assert_eq!(out.as_deref(), Some("n/a"));
    }

    #[test]
    fn preview_never_runs_git() {
        let out = GitBranchWidget.render(
            &item(Some("plain-only")),
            &RenderContext::preview(),
            &Settings::default(),
        );
        assert_eq!(out.as_deref(), Some("main"));
    }
}
