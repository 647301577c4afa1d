use serde::{Deserialize, Serialize};

/// How the layout engine treats a widget's rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    /// Ordinary text (model name, branch, counters, ...).
    #[default]
    Content,
    /// Literal separator text between content widgets.
    Separator,
    /// Placeholder whose width is assigned by the layout engine.
    Dynamic,
}

/// A named visual variant a widget can render in.
///
/// `id` is the value persisted in `displayStyle`; `label` is a sample of
/// the output shown to users picking a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStyle {
    pub id:    &'static str,
    pub label: &'static str,
}

impl DisplayStyle {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}
