//! Effective display-style resolution.
//!
//! Every widget owns one static [`StyleTable`].  Resolution order:
//! `displayStyle` (after renaming through `aliases`) when it names a listed
//! style, otherwise the first matching [`LegacyRule`] when no
//! `displayStyle` is set, otherwise `default`.  Rows are never edited once
//! released; saved configurations depend on them.

use statline_config::WidgetItem;
use statline_core::DisplayStyle;

/// One row of a legacy-field mapping.  Every present condition must hold.
#[derive(Debug, Clone, Copy)]
pub struct LegacyRule {
    /// Required value of `rawValue` (absent counts as `false`).
    pub raw_value: Option<bool>,
    /// `metadata` entries that must equal the given value.
    pub metadata:  &'static [(&'static str, &'static str)],
    /// Required value of the legacy `character` field.
    pub character: Option<&'static str>,
    pub style:     &'static str,
}

impl LegacyRule {
    pub const fn raw(raw_value: bool, style: &'static str) -> Self {
        Self { raw_value: Some(raw_value), metadata: &[], character: None, style }
    }

    pub const fn meta(
        metadata: &'static [(&'static str, &'static str)],
        raw_value: Option<bool>,
        style: &'static str,
    ) -> Self {
        Self { raw_value, metadata, character: None, style }
    }

    pub const fn character(character: &'static str, style: &'static str) -> Self {
        Self { raw_value: None, metadata: &[], character: Some(character), style }
    }

    fn matches(&self, item: &WidgetItem) -> bool {
        self.raw_value.map_or(true, |raw| item.is_raw() == raw)
            && self.metadata.iter().all(|(k, v)| item.meta(k) == Some(*v))
            && self.character.map_or(true, |c| item.character.as_deref() == Some(c))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StyleTable {
    pub styles:  &'static [DisplayStyle],
    pub default: &'static str,
    /// Renamed style ids, `(old, current)`.
    pub aliases: &'static [(&'static str, &'static str)],
    pub legacy:  &'static [LegacyRule],
}

impl StyleTable {
    /// Table for widgets without selectable styles.
    pub const NONE: StyleTable = StyleTable {
        styles:  &[],
        default: "",
        aliases: &[],
        legacy:  &[],
    };

    pub fn contains(&self, id: &str) -> bool {
        self.styles.iter().any(|s| s.id == id)
    }

    pub fn label(&self, id: &str) -> Option<&'static str> {
        self.styles.iter().find(|s| s.id == id).map(|s| s.label)
    }

    fn canonical<'a>(&self, id: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(old, _)| *old == id)
            .map_or(id, |&(_, current)| current)
    }

    pub fn resolve(&self, item: &WidgetItem) -> &'static str {
        if let Some(requested) = item.display_style.as_deref() {
            let id = self.canonical(requested);
            return self
                .styles
                .iter()
                .find(|s| s.id == id)
                .map_or(self.default, |s| s.id);
        }

        self.legacy
            .iter()
            .find(|rule| rule.matches(item))
            .map_or(self.default, |rule| rule.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: StyleTable = StyleTable {
        styles: &[
            DisplayStyle::new("a", "A"),
            DisplayStyle::new("b", "B"),
            DisplayStyle::new("c", "C"),
        ],
        default: "a",
        aliases: &[("old-b", "b")],
        legacy: &[
            LegacyRule::meta(&[("flag", "true")], Some(true), "c"),
            LegacyRule::raw(true, "b"),
        ],
    };

    fn item() -> WidgetItem {
        WidgetItem::new("1", "test")
    }

    #[test]
    fn explicit_style_wins() {
        let mut it = item();
        it.display_style = Some("c".into());
        it.raw_value = Some(true);
        assert_eq!(TABLE.resolve(&it), "c");
    }

    #[test]
    fn alias_is_renamed() {
        let mut it = item();
        it.display_style = Some("old-b".into());
        assert_eq!(TABLE.resolve(&it), "b");
    }

    #[test]
    fn unknown_style_is_default() {
        let mut it = item();
        it.display_style = Some("sparkly".into());
        it.raw_value = Some(true);
        assert_eq!(TABLE.resolve(&it), "a");
    }

    #[test]
    fn legacy_rows_in_order() {
        let mut it = item();
        it.raw_value = Some(true);
        assert_eq!(TABLE.resolve(&it), "b");

        it.metadata.insert("flag".into(), "true".into());
        assert_eq!(TABLE.resolve(&it), "c");

        it.raw_value = None;
        assert_eq!(TABLE.resolve(&it), "a");
    }
}
