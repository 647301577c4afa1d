use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{git, style::LegacyRule, style::StyleTable, Widget};

pub(crate) const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("detailed-show", "(*2,+42,-10,↑3,?5) / (no git)"),
        DisplayStyle::new("detailed-hide", "(*2,+42,-10,↑3,?5) / (hidden)"),
        DisplayStyle::new("indicator-show", "* or ↑ / (no git)"),
        DisplayStyle::new("indicator-hide", "* or ↑ / (hidden)"),
    ],
    default: "detailed-show",
    aliases: &[("show-nogit", "detailed-show"), ("hide-nogit", "detailed-hide")],
    legacy:  &[LegacyRule::meta(&[("hideNoGit", "true")], None, "detailed-hide")],
};

/// Working-tree change summary: `*` staged files, `+`/`-` lines, `↑`
/// unpushed commits, `?` untracked files.
#[derive(Debug, Default)]
pub struct GitChangesWidget;

impl GitChangesWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for GitChangesWidget {
    fn default_color(&self) -> &'static str {
        "yellow"
    }

    fn display_name(&self) -> &'static str {
        "Git Changes"
    }

    fn description(&self) -> &'static str {
        "Shows git changes as detailed count or simple indicator (*x staged, +x insertions, -x deletions, ↑x unpushed, ?x untracked)"
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
        let indicator = style.starts_with("indicator");
        let hide_no_git = style.ends_with("hide");

        if ctx.is_preview {
            return Some(if indicator { "*" } else { "(*2,+42,-10,↑3,?5)" }.into());
        }

        let Some(changes) = git(ctx).changes() else {
            return (!hide_no_git).then(|| "(no git)".into());
        };

        if indicator {
            return if changes.is_dirty() {
                Some("*".into())
            } else if changes.commits_ahead > 0 {
                Some("↑".into())
            } else {
                None
            };
        }

        let mut parts = Vec::new();
        if changes.staged_files > 0 {
            parts.push(format!("*{}", changes.staged_files));
        }
        if changes.insertions > 0 {
            parts.push(format!("+{}", changes.insertions));
        }
        if changes.deletions > 0 {
            parts.push(format!("-{}", changes.deletions));
        }
        if changes.commits_ahead > 0 {
            parts.push(format!("↑{}", changes.commits_ahead));
        }
        if changes.untracked > 0 {
            parts.push(format!("?{}", changes.untracked));
        }
        // Binary edits and deletions have no line counts.
        if parts.is_empty() && changes.modified_files > 0 {
            parts.push(format!("±{}", changes.modified_files));
        }

        (!parts.is_empty()).then(|| format!("({})", parts.join(",")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_core::ScriptedShell;
    use std::sync::Arc;

    fn item(style: &str) -> WidgetItem {
        WidgetItem {
            display_style: Some(style.into()),
            ..WidgetItem::new("1", "git-changes")
        }
    }

    fn repo() -> ScriptedShell {
        ScriptedShell::new()
            .with("git diff --shortstat", " 2 files changed, 40 insertions(+), 10 deletions(-)\n")
            .with("git diff --cached --shortstat", " 1 file changed, 2 insertions(+)\n")
            .with("git rev-list --count @{u}..HEAD", "3\n")
            .with("git ls-files --others --exclude-standard", "a\nb\nc\nd\ne\n")
            .with("git status --porcelain", "M  a.rs\nA  b.rs\n M c.rs\n?? a\n")
    }

    fn render(style: &str, shell: ScriptedShell) -> Option<String> {
        let ctx = RenderContext::new(Arc::new(shell));
        GitChangesWidget.render(&item(style), &ctx, &Settings::default())
    }

    #[test]
    fn detailed_summary() {
        assert_eq!(render("detailed-show", repo()).as_deref(), Some("(*2,+42,-10,↑3,?5)"));
    }

    #[test]
    fn no_repo_placeholder() {
        assert_eq!(render("detailed-hide", ScriptedShell::new()), None);
        assert_eq!(render("detailed-show", ScriptedShell::new()).as_deref(), Some("(no git)"));
        assert_eq!(render("indicator-show", ScriptedShell::new()).as_deref(), Some("(no git)"));
    }

    #[test]
    fn clean_repo_is_none() {
        let clean = ScriptedShell::new()
            .with("git diff --shortstat", "")
            .with("git diff --cached --shortstat", "");
        assert_eq!(render("detailed-show", clean.clone()), None);
        assert_eq!(render("indicator-show", clean), None);
    }

    #[test]
    fn binary_only_changes() {
        let shell = ScriptedShell::new()
            .with("git diff --shortstat", " 1 file changed\n")
            .with("git diff --cached --shortstat", "")
            .with("git status --porcelain", " M logo.png\n");
        assert_eq!(render("detailed-show", shell).as_deref(), Some("(±1)"));
    }

    #[test]
    fn indicator_prefers_star() {
        assert_eq!(render("indicator-hide", repo()).as_deref(), Some("*"));
    }

    #[test]
    fn legacy_hide_flag() {
        let mut it = WidgetItem::new("1", "git-changes");
        it.metadata.insert("hideNoGit".into(), "true".into());
        assert_eq!(STYLES.resolve(&it), "detailed-hide");
        assert_eq!(STYLES.resolve(&item("hide-nogit")), "detailed-hide");
    }
}
