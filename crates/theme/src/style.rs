use statline_config::ColorLevel;

use crate::colors::Color;

/// Reset all text attributes.
pub const RESET: &str = "\x1b[0m";

/// Resolved visual attributes for one piece of status-line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg:   Option<Color>,
    pub bg:   Option<Color>,
    pub bold: bool,
}

impl Style {
    pub fn new(fg: Option<Color>, bg: Option<Color>, bold: bool) -> Self {
        Self { fg, bg, bold }
    }

    /// The SGR sequence that switches the terminal into this style, or an
    /// empty string when nothing needs to change.
    pub fn prefix(&self, level: ColorLevel) -> String {
        if level == ColorLevel::None {
            return String::new();
        }
        let mut params: Vec<String> = Vec::new();
        if self.bold {
            params.push("1".to_string());
        }
        if let Some(fg) = self.fg.and_then(|c| c.downgrade(level)) {
            params.push(fg.fg_params());
        }
        if let Some(bg) = self.bg.and_then(|c| c.downgrade(level)) {
            params.push(bg.bg_params());
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", params.join(";"))
        }
    }

    /// Wrap `text` in this style followed by a reset.
    pub fn paint(&self, text: &str, level: ColorLevel) -> String {
        let prefix = self.prefix(level);
        if prefix.is_empty() || text.is_empty() {
            return text.to_string();
        }
        format!("{prefix}{text}{RESET}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_combines_params() {
        let style = Style::new(Some(Color::Basic(6)), Some(Color::Indexed(236)), true);
        assert_eq!(
            style.paint("hi", ColorLevel::Ansi256),
            "\x1b[1;36;48;5;236mhi\x1b[0m"
        );
    }

    #[test]
    fn no_colors_means_plain_text() {
        let style = Style::new(Some(Color::Basic(1)), None, true);
        assert_eq!(style.paint("hi", ColorLevel::None), "hi");
        assert_eq!(Style::default().paint("hi", ColorLevel::TrueColor), "hi");
    }
}
