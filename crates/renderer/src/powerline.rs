//! Powerline rendering: coloured blocks joined by arrow glyphs.
//!
//! Each merge group becomes one block.  A glyph between two blocks is drawn
//! in the left block's background on the right block's background; the last
//! block of a run closes with the end cap (or the glyph) on the terminal's
//! default background.  A flex slot ends the current run, so a line with
//! flex separators is a series of independent powerlines with plain space
//! between them.

use statline_config::Settings;
use statline_theme::{Color, Style, Theme};

use crate::layout::{paint_piece, Part, Piece, Unit};

#[derive(Debug)]
struct Block<'a> {
    pieces:  &'a [Piece],
    /// Theme foreground; `None` keeps each piece's own colour.
    fg:      Option<Color>,
    bg:      Color,
}

fn block<'a>(pieces: &'a [Piece], palette: Option<(Color, Color)>) -> Block<'a> {
    match palette {
        Some((fg, bg)) => Block { pieces, fg: Some(fg), bg },
        None => Block {
            pieces,
            fg: None,
            bg: pieces
                .first()
                .and_then(|p| p.style.bg)
                .unwrap_or(Color::FALLBACK_BG),
        },
    }
}

fn render_run(run: &[Block<'_>], settings: &Settings) -> String {
    let level = settings.color_level;
    let cfg = &settings.powerline;
    let mut out = String::new();

    if let (Some(cap), Some(first)) = (cfg.start_cap.as_deref(), run.first()) {
        out.push_str(&Style::new(Some(first.bg), None, false).paint(cap, level));
    }

    for (i, block) in run.iter().enumerate() {
        for piece in block.pieces {
            let fg = if piece.preserve_colors {
                None
            } else {
                block.fg.or(piece.style.fg)
            };
            let style = Style::new(fg, Some(block.bg), piece.style.bold);
            out.push_str(&paint_piece(piece, style, settings));
        }

        let next_bg = run.get(i + 1).map(|b| b.bg);
        let glyph = match next_bg {
            Some(_) => cfg.separator.as_str(),
            None => cfg.end_cap.as_deref().unwrap_or(&cfg.separator),
        };
        out.push_str(&Style::new(Some(block.bg), next_bg, false).paint(glyph, level));
    }
    out
}

/// Paint merge groups as powerline runs split at flex slots.
pub(crate) fn compose(units: &[Unit], settings: &Settings) -> Vec<Part> {
    let theme = Theme::from_config(&settings.powerline);
    let mut parts = Vec::new();
    let mut run: Vec<Block<'_>> = Vec::new();
    let mut index = 0;

    for unit in units {
        match unit {
            Unit::Flex => {
                if !run.is_empty() {
                    parts.push(Part::Fixed(render_run(&run, settings)));
                    run.clear();
                }
                parts.push(Part::Flex);
            }
            Unit::Group(pieces) => {
                run.push(block(pieces, theme.block_colors(index)));
                index += 1;
            }
        }
    }
    if !run.is_empty() {
        parts.push(Part::Fixed(render_run(&run, settings)));
    }
    parts
}

#[cfg(test)]
mod tests {
    use crate::layout::render_line;
    use statline_config::{ColorLevel, PowerlineConfig, Settings, WidgetItem};
    use statline_core::RenderContext;

    fn colored(id: &str, text: &str, fg: &str, bg: &str) -> WidgetItem {
        WidgetItem {
            custom_text: Some(text.into()),
            color: Some(fg.into()),
            background_color: Some(bg.into()),
            ..WidgetItem::new(id, "custom-text")
        }
    }

    fn settings() -> Settings {
        Settings {
            powerline: PowerlineConfig {
                enabled: true,
                separator: ">".into(),
                ..PowerlineConfig::default()
            },
            color_level: ColorLevel::Ansi256,
            ..Settings::default()
        }
    }

    fn line(items: &[WidgetItem], settings: &Settings, width: Option<usize>) -> String {
        render_line(items, &RenderContext::preview(), settings, width)
    }

    #[test]
    fn glyphs_chain_backgrounds() {
        let items = [colored("1", "A", "white", "blue"), colored("2", "B", "black", "red")];
        let out = line(&items, &settings(), None);
        assert_eq!(
            out,
            "\x1b[37;44mA\x1b[0m\x1b[34;41m>\x1b[0m\x1b[30;41mB\x1b[0m\x1b[31m>\x1b[0m"
        );
    }

    #[test]
    fn manual_separators_are_skipped() {
        let mut s = settings();
        s.color_level = ColorLevel::None;
        let items = [
            colored("1", "A", "white", "blue"),
            WidgetItem::new("2", "separator"),
            colored("3", "B", "white", "red"),
        ];
        assert_eq!(line(&items, &s, None), "A>B>");
    }

    #[test]
    fn caps_and_flex_runs() {
        let mut s = settings();
        s.color_level = ColorLevel::None;
        s.powerline.start_cap = Some("<".into());
        s.powerline.end_cap = Some("]".into());
        let items = [
            colored("1", "A", "white", "blue"),
            WidgetItem::new("2", "flex-separator"),
            colored("3", "B", "white", "red"),
        ];
        assert_eq!(line(&items, &s, Some(10)), "<A]    <B]");
    }

    #[test]
    fn named_theme_overrides_item_colors() {
        let mut s = settings();
        s.powerline.theme = "minimal".into();
        let items = [colored("1", "A", "white", "blue")];
        let out = line(&items, &s, None);
        assert!(!out.contains("44m"));
        assert!(out.contains('A'));
    }

    #[test]
    fn missing_background_uses_fallback() {
        let items = [WidgetItem {
            custom_text: Some("A".into()),
            ..WidgetItem::new("1", "custom-text")
        }];
        let out = line(&items, &settings(), None);
        assert!(out.starts_with("\x1b[37;48;5;236mA"));
    }
}
