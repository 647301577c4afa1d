use std::time::Duration;

use statline_config::{Settings, WidgetItem};
use statline_core::{shell::COMMAND_TIMEOUT, RenderContext, ShellRequest};
use tracing::debug;

use crate::Widget;

#[cfg(not(windows))]
const SHELL: (&str, &str) = ("sh", "-c");
#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd", "/C");

/// Fixed text from `customText`.  Hidden when the text is empty.
#[derive(Debug, Default)]
pub struct CustomTextWidget;

impl CustomTextWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for CustomTextWidget {
    fn default_color(&self) -> &'static str {
        "white"
    }

    fn display_name(&self) -> &'static str {
        "Custom Text"
    }

    fn description(&self) -> &'static str {
        "Displays user-defined custom text"
    }

    fn render(
        &self,
        item: &WidgetItem,
        _ctx: &RenderContext,
        _settings: &Settings,
    ) -> Option<String> {
        item.custom_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(String::from)
    }
}

/// Output of the shell command in `commandPath`.
///
/// The host's session JSON is piped to the command's stdin.  Only the first
/// non-empty line of stdout is shown.  Hidden when the command fails, times
/// out (`timeout` ms, default one second) or prints nothing.
#[derive(Debug, Default)]
pub struct CustomCommandWidget;

impl CustomCommandWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for CustomCommandWidget {
    fn default_color(&self) -> &'static str {
        "white"
    }

    fn display_name(&self) -> &'static str {
        "Custom Command"
    }

    fn description(&self) -> &'static str {
        "Shows output from a custom shell command"
    }

    fn truncation_marker(&self) -> &'static str {
        "..."
    }

    /// Commands that keep their own ANSI colours are not recoloured.
    fn supports_colors(&self, item: &WidgetItem) -> bool {
        item.preserve_colors != Some(true)
    }

    fn render(
        &self,
        item: &WidgetItem,
        ctx: &RenderContext,
        _settings: &Settings,
    ) -> Option<String> {
        let command = item.command_path.as_deref().filter(|c| !c.trim().is_empty())?;
        if ctx.is_preview {
            return Some(format!("[cmd: {command}]"));
        }

        let timeout = item.timeout.map_or(COMMAND_TIMEOUT, Duration::from_millis);
        let (program, flag) = SHELL;
        let args = [flag, command];
        let request = ShellRequest::new(program, &args)
            .cwd(ctx.cwd())
            .stdin(ctx.raw_input.as_deref())
            .timeout(timeout);

        let Some(stdout) = ctx.shell.run(&request) else {
            debug!(command, "custom command produced no output");
            return None;
        };
        stdout
            .lines()
            .map(str::trim_end)
            .find(|line| !line.trim().is_empty())
            .map(String::from)
    }
}
