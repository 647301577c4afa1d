//! Single-line layout: render, merge, separate, fill.

use std::panic::{catch_unwind, AssertUnwindSafe};

use statline_config::{Merge, Settings, WidgetItem};
use statline_core::{RenderContext, WidgetCategory};
use statline_theme::{display_width, strip_ansi, truncate_cells, Color, Style};
use statline_widgets::{resolve, Widget};
use tracing::{debug, warn};

use crate::powerline;

/// Marker ending a line cut to the terminal width.
const OVERFLOW_MARKER: &str = "…";

/// One widget's rendered output.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text:            String,
    pub style:           Style,
    pub category:        WidgetCategory,
    pub merge:           Merge,
    /// Text carries its own escape sequences.
    pub preserve_colors: bool,
}

/// Segment text after padding, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub text:            String,
    pub style:           Style,
    pub category:        WidgetCategory,
    pub preserve_colors: bool,
}

/// Result of merge resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    /// Space the layout widens to fill the line.
    Flex,
    /// Segments joined by merge directives, never split by separators.
    Group(Vec<Piece>),
}

impl Unit {
    fn is_separator(pieces: &[Piece]) -> bool {
        pieces.iter().all(|p| p.category == WidgetCategory::Separator)
    }
}

/// Painted output before flex widths are known.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Part {
    Fixed(String),
    Flex,
}

// ── Render pass ───────────────────────────────────────────────────────────────

/// Render every item of a line.
///
/// Items with an unknown type, items whose widget returns nothing and
/// widgets that panic are dropped.  Manual separators are dropped in
/// powerline mode.
pub fn render_segments(
    items: &[WidgetItem],
    ctx: &RenderContext,
    settings: &Settings,
) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(items.len());
    let mut last_content: Option<Style> = None;

    for item in items {
        let Some(widget) = resolve(&item.kind) else {
            debug!(kind = %item.kind, id = %item.id, "unknown widget type");
            continue;
        };
        let category = widget.category();
        if settings.powerline.enabled && category == WidgetCategory::Separator {
            continue;
        }

        let Some(text) = render_guarded(widget, item, ctx, settings) else {
            continue;
        };
        let preserve_colors = item.preserve_colors == Some(true);
        let text = if preserve_colors {
            text
        } else {
            strip_ansi(&text).into_owned()
        };
        let text = match item.max_width {
            Some(max) => truncate_cells(&text, max, widget.truncation_marker()),
            None => text,
        };
        if text.is_empty() && category != WidgetCategory::Dynamic {
            continue;
        }

        let mut style = item_style(widget, item, settings);
        if widget.can_inherit_colors() && item.color.is_none() && item.background_color.is_none() {
            if let Some(prev) = last_content {
                style.fg = prev.fg;
                style.bg = prev.bg;
            }
        }
        if category == WidgetCategory::Content {
            last_content = Some(style);
        }

        segments.push(Segment {
            text,
            style,
            category,
            merge: item.merge,
            preserve_colors,
        });
    }
    segments
}

fn render_guarded(
    widget: &dyn Widget,
    item: &WidgetItem,
    ctx: &RenderContext,
    settings: &Settings,
) -> Option<String> {
    match catch_unwind(AssertUnwindSafe(|| widget.render(item, ctx, settings))) {
        Ok(text) => text,
        Err(_) => {
            warn!(kind = %item.kind, id = %item.id, "widget panicked; leaving it out");
            None
        }
    }
}

fn parse_color(raw: &str) -> Option<Color> {
    let color = Color::parse(raw);
    if color.is_none() {
        debug!("ignoring unknown color '{raw}'");
    }
    color
}

/// Colours and weight for an item: its own settings, else the widget's
/// default colour.  Widgets that do not take colours keep only the
/// background.
fn item_style(widget: &dyn Widget, item: &WidgetItem, settings: &Settings) -> Style {
    let bg = item.background_color.as_deref().and_then(parse_color);
    if !widget.supports_colors(item) {
        return Style::new(None, bg, false);
    }
    let fg = item
        .color
        .as_deref()
        .and_then(parse_color)
        .or_else(|| Color::parse(widget.default_color()));
    let bold = item.bold.unwrap_or(false) || settings.global_bold;
    Style::new(fg, bg, bold)
}

// ── Merge resolution ──────────────────────────────────────────────────────────

/// Group segments joined by merge directives and apply padding.
///
/// A merge joins onto the next surviving segment unless that segment is a
/// flex placeholder or there is none.  `no-padding` also drops the padding
/// on both sides of the junction.  Only content segments are padded.
pub fn merge_units(segments: &[Segment], padding: &str) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut group: Vec<Piece> = Vec::new();
    let mut tight_left = false;

    for (i, seg) in segments.iter().enumerate() {
        if seg.category == WidgetCategory::Dynamic {
            units.push(Unit::Flex);
            tight_left = false;
            continue;
        }

        let joins = !seg.merge.is_none()
            && segments
                .get(i + 1)
                .is_some_and(|next| next.category != WidgetCategory::Dynamic);
        let tight_right = joins && seg.merge == Merge::NoPadding;

        let padded = seg.category == WidgetCategory::Content;
        let left = if padded && !tight_left { padding } else { "" };
        let right = if padded && !tight_right { padding } else { "" };

        group.push(Piece {
            text: format!("{left}{}{right}", seg.text),
            style: seg.style,
            category: seg.category,
            preserve_colors: seg.preserve_colors,
        });
        tight_left = tight_right;

        if !joins {
            units.push(Unit::Group(std::mem::take(&mut group)));
        }
    }
    units
}

// ── Classic composition ───────────────────────────────────────────────────────

pub(crate) fn paint_piece(piece: &Piece, style: Style, settings: &Settings) -> String {
    style.paint(&piece.text, settings.color_level)
}

/// Paint units with the default separator between neighbouring groups.
/// No separator is inserted next to a flex slot or a manual separator.
fn classic(units: &[Unit], settings: &Settings) -> Vec<Part> {
    let mut parts = Vec::with_capacity(units.len() * 2);
    let mut prev: Option<&[Piece]> = None;

    for unit in units {
        let pieces = match unit {
            Unit::Flex => {
                parts.push(Part::Flex);
                prev = None;
                continue;
            }
            Unit::Group(pieces) => pieces.as_slice(),
        };

        if let (Some(sep), Some(before)) = (settings.default_separator.as_deref(), prev) {
            if !Unit::is_separator(before) && !Unit::is_separator(pieces) {
                let style = match before.last() {
                    Some(last) if settings.inherit_separator_colors => {
                        Style::new(last.style.fg, last.style.bg, false)
                    }
                    _ => Style::default(),
                };
                parts.push(Part::Fixed(style.paint(sep, settings.color_level)));
            }
        }

        let text: String = pieces
            .iter()
            .map(|p| paint_piece(p, p.style, settings))
            .collect();
        parts.push(Part::Fixed(text));
        prev = Some(pieces);
    }
    parts
}

// ── Flex fill ─────────────────────────────────────────────────────────────────

/// Split `remaining` cells over `slots`; earlier slots get the remainder.
pub fn distribute(remaining: usize, slots: usize) -> Vec<usize> {
    if slots == 0 {
        return Vec::new();
    }
    let base = remaining / slots;
    let extra = remaining % slots;
    (0..slots).map(|i| base + usize::from(i < extra)).collect()
}

/// Replace flex slots with spaces and cut the line to `width`.
pub(crate) fn fill(parts: Vec<Part>, width: Option<usize>) -> String {
    let fixed: usize = parts
        .iter()
        .map(|p| match p {
            Part::Fixed(text) => display_width(text),
            Part::Flex => 0,
        })
        .sum();
    let slots = parts.iter().filter(|p| matches!(p, Part::Flex)).count();
    let remaining = width.map_or(0, |w| w.saturating_sub(fixed));
    let mut shares = distribute(remaining, slots).into_iter();

    let mut line = String::new();
    for part in parts {
        match part {
            Part::Fixed(text) => line.push_str(&text),
            Part::Flex => line.push_str(&" ".repeat(shares.next().unwrap_or(0))),
        }
    }

    match width {
        Some(w) if display_width(&line) > w => truncate_cells(&line, w, OVERFLOW_MARKER),
        _ => line,
    }
}

/// Lay out one configured line.  `width` is the target width in cells;
/// without it flex separators collapse and nothing is cut.
pub fn render_line(
    items: &[WidgetItem],
    ctx: &RenderContext,
    settings: &Settings,
    width: Option<usize>,
) -> String {
    let segments = render_segments(items, ctx, settings);
    let padding = settings.default_padding.as_deref().unwrap_or("");
    let units = merge_units(&segments, padding);

    let parts = if settings.powerline.enabled {
        powerline::compose(&units, settings)
    } else {
        classic(&units, settings)
    };
    fill(parts, width)
}
