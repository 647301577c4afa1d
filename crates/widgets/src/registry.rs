//! Type id → widget lookup.
//!
//! The table is read-only and built on first use.  Registration order is
//! the order shown to users picking a widget type.

use std::sync::LazyLock;

use statline_config::Settings;
use statline_core::WidgetCategory;

use crate::{
    block_timer::BlockTimerWidget,
    context_percentage::{ContextPercentageUsableWidget, ContextPercentageWidget},
    custom::{CustomCommandWidget, CustomTextWidget},
    cwd::CurrentWorkingDirWidget,
    git_branch::GitBranchWidget,
    git_changes::GitChangesWidget,
    git_user::GitUserWidget,
    git_worktree::GitWorktreeWidget,
    icon::IconWidget,
    model::{ModelWidget, OutputStyleWidget},
    separator::{FlexSeparatorWidget, SeparatorWidget},
    session::{SessionClockWidget, SessionCostWidget},
    terminal::{TerminalWidthWidget, VersionWidget},
    tokens::{ContextLengthWidget, TokenKind, TokensWidget},
    Widget,
};

fn entry(id: &'static str, widget: impl Widget + 'static) -> (&'static str, Box<dyn Widget>) {
    (id, Box::new(widget))
}

pub static REGISTRY: LazyLock<Vec<(&'static str, Box<dyn Widget>)>> = LazyLock::new(|| {
    vec![
        entry("model", ModelWidget::new()),
        entry("output-style", OutputStyleWidget::new()),
        entry("git-branch", GitBranchWidget::new()),
        entry("git-changes", GitChangesWidget::new()),
        entry("git-worktree", GitWorktreeWidget::new()),
        entry("git-user", GitUserWidget::new()),
        entry("current-working-dir", CurrentWorkingDirWidget::new()),
        entry("tokens-input", TokensWidget::new(TokenKind::Input)),
        entry("tokens-output", TokensWidget::new(TokenKind::Output)),
        entry("tokens-cached", TokensWidget::new(TokenKind::Cached)),
        entry("tokens-total", TokensWidget::new(TokenKind::Total)),
        entry("context-length", ContextLengthWidget::new()),
        entry("context-percentage", ContextPercentageWidget::new()),
        entry("context-percentage-usable", ContextPercentageUsableWidget::new()),
        entry("session-clock", SessionClockWidget::new()),
        entry("session-cost", SessionCostWidget::new()),
        entry("block-timer", BlockTimerWidget::new()),
        entry("terminal-width", TerminalWidthWidget::new()),
        entry("version", VersionWidget::new()),
        entry("custom-text", CustomTextWidget::new()),
        entry("custom-command", CustomCommandWidget::new()),
        entry("separator", SeparatorWidget::new()),
        entry("flex-separator", FlexSeparatorWidget::new()),
        entry("icon", IconWidget::new()),
    ]
});

/// The widget registered under `kind`, if any.
pub fn resolve(kind: &str) -> Option<&'static dyn Widget> {
    REGISTRY
        .iter()
        .find(|(id, _)| *id == kind)
        .map(|(_, widget)| widget.as_ref())
}

pub fn is_known(kind: &str) -> bool {
    resolve(kind).is_some()
}

/// Type ids offered for the given settings.
///
/// Powerline mode draws its own junctions, so separator and flex types are
/// left out; with a default separator configured the manual separator is
/// left out instead.
pub fn list_types(settings: &Settings) -> Vec<&'static str> {
    REGISTRY
        .iter()
        .filter(|(id, widget)| {
            if settings.powerline.enabled {
                !matches!(
                    widget.category(),
                    WidgetCategory::Separator | WidgetCategory::Dynamic
                )
            } else if settings.default_separator.is_some() {
                *id != "separator"
            } else {
                true
            }
        })
        .map(|(id, _)| *id)
        .collect()
}
