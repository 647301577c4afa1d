use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext, TokenMetrics};

use crate::{format_tokens, labeled, style::StyleTable, Widget, LABELED_OR_PLAIN};

/// Which counter a [`TokensWidget`] shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Input,
    Output,
    Cached,
    Total,
}

impl TokenKind {
    fn label(self) -> &'static str {
        match self {
            Self::Input => "In",
            Self::Output => "Out",
            Self::Cached => "Cached",
            Self::Total => "Total",
        }
    }

    fn read(self, metrics: &TokenMetrics) -> u64 {
        match self {
            Self::Input => metrics.input_tokens,
            Self::Output => metrics.output_tokens,
            Self::Cached => metrics.cached_tokens,
            Self::Total => metrics.total_tokens,
        }
    }

    fn preview(self) -> u64 {
        match self {
            Self::Input => 15_234,
            Self::Output => 3_420,
            Self::Cached => 12_000,
            Self::Total => 30_654,
        }
    }
}

const STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "In: 15.2k"),
        DisplayStyle::new("plain", "15.2k"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// One of the session token counters.
#[derive(Debug)]
pub struct TokensWidget {
    kind: TokenKind,
}

impl TokensWidget {
    pub fn new(kind: TokenKind) -> Self {
        Self { kind }
    }
}

impl Widget for TokensWidget {
    fn default_color(&self) -> &'static str {
        match self.kind {
            TokenKind::Input => "blue",
            TokenKind::Output => "white",
            TokenKind::Cached => "cyan",
            TokenKind::Total => "cyan",
        }
    }

    fn display_name(&self) -> &'static str {
        match self.kind {
            TokenKind::Input => "Tokens Input",
            TokenKind::Output => "Tokens Output",
            TokenKind::Cached => "Tokens Cached",
            TokenKind::Total => "Tokens Total",
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            TokenKind::Input => "Shows input token count for the current session",
            TokenKind::Output => "Shows output token count for the current session",
            TokenKind::Cached => "Shows cached token count for the current session",
            TokenKind::Total => "Shows total token count (input + output + cache) for the current session",
        }
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
        let count = if ctx.is_preview {
            self.kind.preview()
        } else {
            self.kind.read(ctx.token_metrics.as_ref()?)
        };
        Some(labeled(self.kind.label(), format_tokens(count), STYLES.resolve(item) == "plain"))
    }
}

const CONTEXT_STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "Ctx: 18.6k"),
        DisplayStyle::new("plain", "18.6k"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// Tokens currently occupying the context window.
#[derive(Debug, Default)]
pub struct ContextLengthWidget;

impl ContextLengthWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for ContextLengthWidget {
    fn default_color(&self) -> &'static str {
        "brightBlack"
    }

    fn display_name(&self) -> &'static str {
        "Context Length"
    }

    fn description(&self) -> &'static str {
        "Shows the current context window size in tokens"
    }

    fn style_table(&self) -> &'static StyleTable {
        &CONTEXT_STYLES
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
        let length = if ctx.is_preview {
            18_600
        } else {
            ctx.token_metrics.as_ref()?.context_length
        };
        Some(labeled("Ctx", format_tokens(length), CONTEXT_STYLES.resolve(item) == "plain"))
    }
}
