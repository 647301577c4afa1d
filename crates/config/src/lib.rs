pub mod schema;

pub use schema::{
    ColorLevel, ColorPair, FlexMode, Merge, PowerlineConfig, Settings, WidgetItem,
};

use statline_core::{Result, StatlineError};
use std::path::{Path, PathBuf};

/// Load settings from a TOML or JSON file (chosen by extension).  Returns
/// `Settings::default()` if the file doesn't exist so the status line always
/// has something to show.
pub fn load(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Settings file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(Settings::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| StatlineError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw, is_json(path))
}

/// Parse settings text.
pub fn parse(raw: &str, json: bool) -> Result<Settings> {
    if json {
        serde_json::from_str(raw)
            .map_err(|e| StatlineError::Config(format!("JSON parse error: {e}")))
    } else {
        toml::from_str(raw).map_err(|e| StatlineError::Config(format!("TOML parse error: {e}")))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Return the default settings path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
    base.join("statline").join("settings.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn loads_toml_lines() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
defaultSeparator = "|"
lines = [
  [ {{ id = "1", type = "model", rawValue = true }}, {{ id = "2", type = "flex-separator" }} ],
  [],
]
"#
        )
        .unwrap();

        let settings = load(file.path()).unwrap();
        assert_eq!(settings.lines.len(), 2);
        assert_eq!(settings.lines[0][1].kind, "flex-separator");
        assert!(settings.lines[1].is_empty());
        assert_eq!(settings.default_separator.as_deref(), Some("|"));
    }

    #[test]
    fn loads_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"lines":[[{{"id":"x","type":"version"}}]]}}"#).unwrap();
        let settings = load(file.path()).unwrap();
        assert_eq!(settings.lines[0][0].kind, "version");
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = parse("lines = [[", false).unwrap_err();
        assert!(matches!(err, StatlineError::Config(_)));
    }
}
