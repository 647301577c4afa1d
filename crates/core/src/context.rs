use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::shell::{NoShell, ShellQuery};

/// Everything a widget may read while rendering.
///
/// Built fresh for every status-line refresh and never persisted.  `now` is
/// captured once so that two renders of the same context agree byte for
/// byte.
#[derive(Clone)]
pub struct RenderContext {
    /// Render fixed sample values instead of live data.
    pub is_preview:       bool,
    /// Session JSON supplied by the host on stdin.
    pub data:             Option<StatusData>,
    /// The unparsed host JSON, forwarded to custom commands.
    pub raw_input:        Option<String>,
    pub token_metrics:    Option<TokenMetrics>,
    pub block_metrics:    Option<BlockMetrics>,
    /// Wall-clock length of the session so far.
    pub session_duration: Option<Duration>,
    /// Plan usage status written by an external usage tracker.
    pub usage:            Option<UsageStatus>,
    /// Terminal width in cells, when it could be determined.
    pub terminal_width:   Option<u16>,
    pub now:              DateTime<Local>,
    /// Capability used for git and custom command probes.
    pub shell:            Arc<dyn ShellQuery>,
}

impl RenderContext {
    pub fn new(shell: Arc<dyn ShellQuery>) -> Self {
        Self {
            is_preview: false,
            data: None,
            raw_input: None,
            token_metrics: None,
            block_metrics: None,
            session_duration: None,
            usage: None,
            terminal_width: None,
            now: Local::now(),
            shell,
        }
    }

    /// Context for sample rendering; no process is ever spawned.
    pub fn preview() -> Self {
        Self {
            is_preview: true,
            ..Self::new(Arc::new(NoShell))
        }
    }

    /// Directory that external commands run in.
    pub fn cwd(&self) -> Option<&Path> {
        let data = self.data.as_ref()?;
        data.cwd
            .as_deref()
            .or_else(|| data.workspace.as_ref()?.current_dir.as_deref())
            .map(Path::new)
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("is_preview", &self.is_preview)
            .field("data", &self.data)
            .field("token_metrics", &self.token_metrics)
            .field("block_metrics", &self.block_metrics)
            .field("session_duration", &self.session_duration)
            .field("usage", &self.usage)
            .field("terminal_width", &self.terminal_width)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

/// Session JSON the host pipes to the status-line command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusData {
    pub session_id:      Option<String>,
    pub transcript_path: Option<String>,
    pub cwd:             Option<String>,
    pub model:           Option<ModelInfo>,
    pub workspace:       Option<WorkspaceInfo>,
    pub version:         Option<String>,
    pub output_style:    Option<OutputStyleInfo>,
    pub cost:            Option<CostInfo>,
}

impl StatusData {
    /// Parse the host's stdin payload.
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| crate::StatlineError::Input(format!("status JSON: {e}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub id:           Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceInfo {
    pub current_dir: Option<String>,
    pub project_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputStyleInfo {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostInfo {
    pub total_cost_usd:      Option<f64>,
    pub total_duration_ms:   Option<u64>,
    pub total_lines_added:   Option<u64>,
    pub total_lines_removed: Option<u64>,
}

/// Token totals for the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenMetrics {
    pub input_tokens:   u64,
    pub output_tokens:  u64,
    pub cached_tokens:  u64,
    pub total_tokens:   u64,
    /// Tokens occupying the context window as of the latest request.
    pub context_length: u64,
}

/// The active five-hour usage block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMetrics {
    pub start_time:     DateTime<Utc>,
    pub last_activity:  DateTime<Utc>,
}

/// Snapshot written by an external usage tracker (`status.json`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UsageStatus {
    pub weekly_percent:  Option<f64>,
    pub weekly_reset:    Option<String>,
    pub session_percent: Option<f64>,
    pub session_reset:   Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "session_id": "abc",
        "transcript_path": "/tmp/t.jsonl",
        "model": { "id": "claude-sonnet-4-5", "display_name": "Sonnet 4.5" },
        "workspace": { "current_dir": "/work/repo", "project_dir": "/work" },
        "version": "1.0.80",
        "output_style": { "name": "default" },
        "cost": { "total_cost_usd": 0.42, "total_duration_ms": 65000 },
        "some_future_field": true
    }"#;

    #[test]
    fn parses_host_json() {
        let data = StatusData::from_json(SAMPLE).unwrap();
        assert_eq!(
            data.model.and_then(|m| m.display_name).as_deref(),
            Some("Sonnet 4.5")
        );
        assert_eq!(data.cost.and_then(|c| c.total_cost_usd), Some(0.42));
    }

    #[test]
    fn cwd_falls_back_to_workspace() {
        let mut ctx = RenderContext::preview();
        ctx.data = Some(StatusData::from_json(SAMPLE).unwrap());
        assert_eq!(ctx.cwd(), Some(Path::new("/work/repo")));
    }

    #[test]
    fn malformed_json_is_input_error() {
        let err = StatusData::from_json("{ nope").unwrap_err();
        assert!(matches!(err, crate::StatlineError::Input(_)));
    }
}
