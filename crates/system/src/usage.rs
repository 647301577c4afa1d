//! Plan-usage status written by an external tracker.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use statline_core::UsageStatus;
use tracing::debug;

/// `(pattern, replacement)` pairs applied in order to reset texts.
static UNIT_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\b(\d+)\s*hrs?\b", "${1}h"),
        (r"(?i)\b(\d+)\s*hours?\b", "${1}h"),
        (r"(?i)\b(\d+)\s*mins?\b", "${1}m"),
        (r"(?i)\b(\d+)\s*minutes?\b", "${1}m"),
        (r"(?i)\b(\d+)\s*secs?\b", "${1}s"),
        (r"(?i)\b(\d+)\s*seconds?\b", "${1}s"),
    ]
    .into_iter()
    .map(|(pattern, rep)| (Regex::new(pattern).expect("unit pattern is valid"), rep))
    .collect()
});

static MERIDIEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+([ap]m)\b").expect("meridiem pattern is valid"));
static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("space pattern is valid"));

/// `~/.cc-usage/status.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cc-usage").join("status.json"))
}

/// Read the status file; a missing or malformed file yields `None`.
pub fn load(path: &Path) -> Option<UsageStatus> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| debug!("no usage status at '{}': {e}", path.display()))
        .ok()?;
    serde_json::from_str(&raw)
        .map_err(|e| debug!("unreadable usage status: {e}"))
        .ok()
}

/// Normalize a reset description: `"Resets in 1 hr 37 mins"` → `"1h 37m"`,
/// `"Resets Fri 8 am"` → `"Fri 8AM"`.
pub fn clean_reset_text(text: &str) -> String {
    let text = text.trim_start();
    let text = text
        .strip_prefix("Resets in ")
        .or_else(|| text.strip_prefix("Resets "))
        .unwrap_or(text)
        .trim();

    let mut out = text.to_string();
    for (re, rep) in UNIT_RULES.iter() {
        out = re.replace_all(&out, *rep).into_owned();
    }
    out = MERIDIEM
        .replace_all(&out, |caps: &regex::Captures<'_>| caps[1].to_uppercase())
        .into_owned();
    SPACES.replace_all(&out, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cleans_durations() {
        assert_eq!(clean_reset_text("Resets in 1 hr 37 mins"), "1h 37m");
        assert_eq!(clean_reset_text("Resets in 2 hours 5 minutes"), "2h 5m");
        assert_eq!(clean_reset_text("45 seconds"), "45s");
    }

    #[test]
    fn cleans_meridiem() {
        assert_eq!(clean_reset_text("Resets Fri 8:00 am"), "Fri 8:00AM");
    }

    #[test]
    fn loads_status_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"weekly_percent":10,"weekly_reset":"Resets Fri 8:00 AM","session_percent":31.5}}"#
        )
        .unwrap();
        let status = load(file.path()).unwrap();
        assert_eq!(status.weekly_percent, Some(10.0));
        assert_eq!(status.session_percent, Some(31.5));
        assert_eq!(status.session_reset, None);
    }

    #[test]
    fn malformed_status_is_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();
        assert_eq!(load(file.path()), None);
    }
}
