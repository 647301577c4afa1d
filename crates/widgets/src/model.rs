use statline_config::{Settings, WidgetItem};
use statline_core::{DisplayStyle, RenderContext};

use crate::{labeled, style::StyleTable, Widget, LABELED_OR_PLAIN};

const MODEL_STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "Model: Sonnet 4.5"),
        DisplayStyle::new("plain", "Sonnet 4.5"),
        DisplayStyle::new("bracketed", "[Sonnet 4.5]"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// Displays the active model's display name.
#[derive(Debug, Default)]
pub struct ModelWidget;

impl ModelWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for ModelWidget {
    fn default_color(&self) -> &'static str {
        "cyan"
    }

    fn display_name(&self) -> &'static str {
        "Model"
    }

    fn description(&self) -> &'static str {
        "Displays the model name (e.g., Sonnet 4.5)"
    }

    fn style_table(&self) -> &'static StyleTable {
        &MODEL_STYLES
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
        let name = if ctx.is_preview {
            "Sonnet 4.5"
        } else {
            ctx.data.as_ref()?.model.as_ref()?.display_name.as_deref()?
        };

        Some(match MODEL_STYLES.resolve(item) {
            "plain" => name.to_string(),
            "bracketed" => format!("[{name}]"),
            _ => format!("Model: {name}"),
        })
    }
}

const OUTPUT_STYLES: StyleTable = StyleTable {
    styles: &[
        DisplayStyle::new("labeled", "Style: default"),
        DisplayStyle::new("plain", "default"),
    ],
    default: "labeled",
    aliases: &[],
    legacy:  LABELED_OR_PLAIN,
};

/// Displays the session's output style name.
#[derive(Debug, Default)]
pub struct OutputStyleWidget;

impl OutputStyleWidget {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for OutputStyleWidget {
    fn default_color(&self) -> &'static str {
        "cyan"
    }

    fn display_name(&self) -> &'static str {
        "Output Style"
    }

    fn description(&self) -> &'static str {
        "Shows the current output style"
    }

    fn style_table(&self) -> &'static StyleTable {
        &OUTPUT_STYLES
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
        let name = if ctx.is_preview {
            "default"
        } else {
            ctx.data.as_ref()?.output_style.as_ref()?.name.as_deref()?
        };
        Some(labeled("Style", name, OUTPUT_STYLES.resolve(item) == "plain"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_core::StatusData;

    fn live(json: &str) -> RenderContext {
        let mut ctx = RenderContext::preview();
        ctx.is_preview = false;
        ctx.data = Some(StatusData::from_json(json).unwrap());
        ctx
    }

    #[test]
    fn model_styles() {
        let ctx = live(r#"{"model":{"display_name":"Opus 4.1"}}"#);
        let settings = Settings::default();
        let mut item = WidgetItem::new("1", "model");

        assert_eq!(ModelWidget.render(&item, &ctx, &settings).as_deref(), Some("Model: Opus 4.1"));
        item.raw_value = Some(true);
        assert_eq!(ModelWidget.render(&item, &ctx, &settings).as_deref(), Some("Opus 4.1"));
        item.display_style = Some("bracketed".into());
        assert_eq!(ModelWidget.render(&item, &ctx, &settings).as_deref(), Some("[Opus 4.1]"));
    }

    #[test]
    fn model_missing_is_none() {
        let ctx = live("{}");
        let item = WidgetItem::new("1", "model");
        assert_eq!(ModelWidget.render(&item, &ctx, &Settings::default()), None);
    }

    #[test]
    fn output_style_preview() {
        let item = WidgetItem::new("1", "output-style");
        let out = OutputStyleWidget.render(&item, &RenderContext::preview(), &Settings::default());
        assert_eq!(out.as_deref(), Some("Style: default"));
    }
}
