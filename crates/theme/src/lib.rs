pub mod ansi;
pub mod colors;
pub mod style;

pub use ansi::{display_width, strip_ansi, truncate_cells};
pub use colors::Color;
pub use style::{Style, RESET};

use statline_config::PowerlineConfig;

/// Built-in powerline palettes: `(name, [(fg, bg), ...])`.
const PRESETS: &[(&str, &[(&str, &str)])] = &[
    (
        "nord",
        &[
            ("#2E3440", "#88C0D0"),
            ("#2E3440", "#81A1C1"),
            ("#ECEFF4", "#5E81AC"),
            ("#2E3440", "#A3BE8C"),
            ("#2E3440", "#EBCB8B"),
        ],
    ),
    (
        "tokyo-night",
        &[
            ("#1A1B26", "#7AA2F7"),
            ("#1A1B26", "#BB9AF7"),
            ("#1A1B26", "#7DCFFF"),
            ("#1A1B26", "#9ECE6A"),
            ("#1A1B26", "#E0AF68"),
        ],
    ),
    (
        "gruvbox",
        &[
            ("#282828", "#D79921"),
            ("#282828", "#98971A"),
            ("#EBDBB2", "#458588"),
            ("#EBDBB2", "#B16286"),
            ("#282828", "#689D6A"),
        ],
    ),
    (
        "monokai",
        &[
            ("#272822", "#F92672"),
            ("#272822", "#A6E22E"),
            ("#272822", "#66D9EF"),
            ("#272822", "#FD971F"),
            ("#272822", "#AE81FF"),
        ],
    ),
    (
        "minimal",
        &[
            ("ansi256:252", "ansi256:236"),
            ("ansi256:252", "ansi256:238"),
            ("ansi256:252", "ansi256:240"),
        ],
    ),
];

/// Compiled powerline theme derived from [`PowerlineConfig`].
///
/// Building a theme is infallible: an unknown theme name or unparsable
/// custom color falls back to per-widget colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name:    String,
    /// `(fg, bg)` pairs assigned round-robin to content blocks.  Empty means
    /// every block uses its own widget colors.
    pub palette: Vec<(Color, Color)>,
}

impl Theme {
    /// Build a [`Theme`] from the settings' `powerline` section.
    pub fn from_config(cfg: &PowerlineConfig) -> Self {
        let palette = if cfg.theme == "custom" {
            cfg.custom_colors
                .iter()
                .filter_map(|pair| Some((Color::parse(&pair.fg)?, Color::parse(&pair.bg)?)))
                .collect()
        } else if let Some((_, pairs)) = PRESETS.iter().find(|(name, _)| *name == cfg.theme) {
            pairs
                .iter()
                .filter_map(|(fg, bg)| Some((Color::parse(fg)?, Color::parse(bg)?)))
                .collect()
        } else {
            let known: Vec<_> = Self::available().collect();
            tracing::warn!(
                "Unknown powerline theme '{}' (known: {}); using widget colors.",
                cfg.theme,
                known.join(", ")
            );
            Vec::new()
        };

        Self {
            name: cfg.theme.clone(),
            palette,
        }
    }

    /// Colors for the `index`-th content block, if the theme manages them.
    pub fn block_colors(&self, index: usize) -> Option<(Color, Color)> {
        if self.palette.is_empty() {
            None
        } else {
            Some(self.palette[index % self.palette.len()])
        }
    }

    /// Names accepted in `powerline.theme`.
    pub fn available() -> impl Iterator<Item = &'static str> {
        std::iter::once("custom").chain(PRESETS.iter().map(|(name, _)| *name))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&PowerlineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_config::ColorPair;

    #[test]
    fn preset_palette_cycles() {
        let cfg = PowerlineConfig {
            theme: "minimal".into(),
            ..PowerlineConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.palette.len(), 3);
        assert_eq!(theme.block_colors(3), theme.block_colors(0));
        assert_eq!(
            theme.block_colors(1),
            Some((Color::Indexed(252), Color::Indexed(238)))
        );
    }

    #[test]
    fn custom_without_pairs_defers_to_widgets() {
        let theme = Theme::default();
        assert_eq!(theme.block_colors(0), None);
    }

    #[test]
    fn custom_pairs_skip_invalid_entries() {
        let cfg = PowerlineConfig {
            custom_colors: vec![
                ColorPair { fg: "white".into(), bg: "blue".into() },
                ColorPair { fg: "nonsense".into(), bg: "red".into() },
            ],
            ..PowerlineConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.palette, vec![(Color::Basic(7), Color::Basic(4))]);
    }

    #[test]
    fn unknown_theme_falls_back() {
        let cfg = PowerlineConfig {
            theme: "solarized-neon".into(),
            ..PowerlineConfig::default()
        };
        assert!(Theme::from_config(&cfg).palette.is_empty());
    }

    #[test]
    fn available_lists_custom_first() {
        let names: Vec<_> = Theme::available().collect();
        assert_eq!(names[0], "custom");
        assert!(names.contains(&"tokyo-night"));
    }
}
