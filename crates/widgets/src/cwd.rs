use std::path::Path;

use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{labeled, style::StyleTable, Widget, LABELED_OR_PLAIN};

const PREVIEW_PATH: &str = "/Users/example/Documents/Projects/my-project";

const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "Folder: /path"),
        DisplayStyle::new("plain", "/path"),
        DisplayStyle::new("basename", "folder-name"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// The session's working directory.
///
/// `metadata.fishStyle = "true"` abbreviates intermediate components and
/// `metadata.segments = N` keeps only the last N; both override the
/// `basename` style's path shortening but not its label handling.
#[derive(Debug, Default)]
pub struct CurrentWorkingDirWidget;

impl CurrentWorkingDirWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for CurrentWorkingDirWidget {
    fn default_color(&self) -> &'static str {
        "blue"
    }

    fn display_name(&self) -> &'static str {
        "Current Working Dir"
    }

    fn description(&self) -> &'static str {
        "Shows the current working directory"
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
        let cwd = if ctx.is_preview {
            PREVIEW_PATH
        } else {
            ctx.cwd()?.to_str()?
        };
        let style = STYLES.resolve(item);
        let segments = item
            .meta("segments")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0);

        let shown = if item.meta_flag("fishStyle") {
            let home = dirs::home_dir();
            abbreviate(cwd, home.as_deref().and_then(|h| h.to_str()))
        } else if let Some(n) = segments {
            last_segments(cwd, n)
        } else if style == "basename" {
            parts(cwd).last().copied().unwrap_or(cwd).to_string()
        } else {
            cwd.to_string()
        };

        Some(labeled("Folder", shown, style != "labeled"))
    }
}

fn separator(path: &str) -> &'static str {
    if path.contains('\\') && !path.contains('/') {
        "\\"
    } else {
        "/"
    }
}

fn parts(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).filter(|p| !p.is_empty()).collect()
}

fn last_segments(path: &str, n: usize) -> String {
    let sep = separator(path);
    let parts = parts(path);
    if parts.len() <= n {
        return path.to_string();
    }
    format!("...{sep}{}", parts[parts.len() - n..].join(sep))
}

/// Fish-shell style: home becomes `~`, middle components shrink to their
/// first character (two for dot-directories).
fn abbreviate(path: &str, home: Option<&str>) -> String {
    let sep = separator(path);
    let under_home = home
        .filter(|home| !home.is_empty())
        .and_then(|home| Path::new(path).strip_prefix(home).ok());
    let normalized = match under_home {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~{sep}{}", rest.display()),
        None => path.to_string(),
    };

    let parts = parts(&normalized);
    let last = parts.len().saturating_sub(1);
    let short: Vec<String> = parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i == 0 || i == last {
                part.to_string()
            } else if part.starts_with('.') && part.len() > 1 {
                part.chars().take(2).collect()
            } else {
                part.chars().take(1).collect()
            }
        })
        .collect();

    let joined = short.join(sep);
    if normalized.starts_with('/') {
        format!("{sep}{joined}")
    } else {
        joined
    }
}
