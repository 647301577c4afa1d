//! Token, session and block metrics from the host's JSONL transcript.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::Deserialize;
use statline_core::{BlockMetrics, Result, StatlineError, TokenMetrics};
use tracing::debug;

/// Length of one usage block.
const BLOCK_HOURS: i64 = 5;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Entry {
    timestamp:            Option<DateTime<Utc>>,
    is_sidechain:         bool,
    is_api_error_message: bool,
    message:              Option<Message>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Message {
    usage: Option<Usage>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
struct Usage {
    input_tokens:                u64,
    output_tokens:               u64,
    cache_read_input_tokens:     u64,
    cache_creation_input_tokens: u64,
}

/// Everything the status line needs from one transcript.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptSummary {
    pub tokens:     TokenMetrics,
    /// Every timestamp seen, in file order.
    pub timestamps: Vec<DateTime<Utc>>,
}

impl TranscriptSummary {
    /// Time between the first and last entry.
    pub fn session_duration(&self) -> Option<Duration> {
        let first = self.timestamps.iter().min()?;
        let last = self.timestamps.iter().max()?;
        (*last - *first).to_std().ok()
    }

    /// The block containing the latest activity, if it is still open at
    /// `now`.  A block starts at the hour of its first entry; an entry five
    /// hours after the block start, or after a five-hour gap, opens a new
    /// one.
    pub fn active_block(&self, now: DateTime<Utc>) -> Option<BlockMetrics> {
        let span = TimeDelta::hours(BLOCK_HOURS);
        let mut sorted = self.timestamps.clone();
        sorted.sort();

        let mut block: Option<BlockMetrics> = None;
        for ts in sorted {
            block = match block {
                Some(b) if ts - b.start_time < span && ts - b.last_activity < span => {
                    Some(BlockMetrics { last_activity: ts, ..b })
                }
                _ => Some(BlockMetrics {
                    start_time: ts.duration_trunc(TimeDelta::hours(1)).unwrap_or(ts),
                    last_activity: ts,
                }),
            };
        }

        block.filter(|b| now - b.start_time < span && now - b.last_activity < span)
    }
}

/// Summarize the transcript at `path`.  Lines that are not valid JSON are
/// skipped.
pub fn summarize(path: &Path) -> Result<TranscriptSummary> {
    let file = File::open(path).map_err(|e| {
        StatlineError::Input(format!("cannot open transcript '{}': {e}", path.display()))
    })?;
    let reader = BufReader::new(file);

    let mut summary = TranscriptSummary::default();
    let mut latest_main: Option<(DateTime<Utc>, Usage)> = None;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: Entry = match serde_json::from_str(&line) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("skipping transcript line: {e}");
                continue;
            }
        };

        if let Some(ts) = entry.timestamp {
            summary.timestamps.push(ts);
        }

        let Some(usage) = entry.message.and_then(|m| m.usage) else {
            continue;
        };
        let tokens = &mut summary.tokens;
        tokens.input_tokens += usage.input_tokens;
        tokens.output_tokens += usage.output_tokens;
        tokens.cached_tokens += usage.cache_read_input_tokens + usage.cache_creation_input_tokens;

        if entry.is_sidechain || entry.is_api_error_message {
            continue;
        }
        if let Some(ts) = entry.timestamp {
            if latest_main.map_or(true, |(seen, _)| ts >= seen) {
                latest_main = Some((ts, usage));
            }
        }
    }

    let tokens = &mut summary.tokens;
    tokens.total_tokens = tokens.input_tokens + tokens.output_tokens + tokens.cached_tokens;
    tokens.context_length = latest_main
        .map(|(_, u)| u.input_tokens + u.cache_read_input_tokens + u.cache_creation_input_tokens)
        .unwrap_or(0);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn write_transcript(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn sums_usage_and_tracks_context() {
        let file = write_transcript(&[
            r#"{"type":"user","timestamp":"2026-10-19T10:00:00Z"}"#,
            r#"{"type":"assistant","timestamp":"2026-10-19T10:00:05Z","message":{"usage":{"input_tokens":100,"output_tokens":50,"cache_read_input_tokens":1000,"cache_creation_input_tokens":200}}}"#,
            r#"{"type":"assistant","timestamp":"2026-10-19T10:05:00Z","isSidechain":true,"message":{"usage":{"input_tokens":7,"output_tokens":3}}}"#,
            "not json at all",
            r#"{"type":"assistant","timestamp":"2026-10-19T10:02:00Z","message":{"usage":{"input_tokens":10,"output_tokens":20,"cache_read_input_tokens":3000}}}"#,
        ]);

        let summary = summarize(file.path()).unwrap();
        assert_eq!(
            summary.tokens,
            TokenMetrics {
                input_tokens: 117,
                output_tokens: 73,
                cached_tokens: 4200,
                total_tokens: 4390,
                context_length: 3010,
            }
        );
        assert_eq!(summary.session_duration(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn missing_transcript_is_input_error() {
        let err = summarize(Path::new("/definitely/not/here.jsonl")).unwrap_err();
        assert!(matches!(err, StatlineError::Input(_)));
    }

    #[test]
    fn block_starts_on_the_hour() {
        let summary = TranscriptSummary {
            timestamps: vec![ts("2026-10-19T09:40:00Z"), ts("2026-10-19T11:15:00Z")],
            ..TranscriptSummary::default()
        };
        let block = summary.active_block(ts("2026-10-19T12:00:00Z")).unwrap();
        assert_eq!(block.start_time, ts("2026-10-19T09:00:00Z"));
        assert_eq!(block.last_activity, ts("2026-10-19T11:15:00Z"));
    }

    #[test]
    fn long_gap_opens_new_block() {
        let summary = TranscriptSummary {
            timestamps: vec![ts("2026-10-19T01:10:00Z"), ts("2026-10-19T08:30:00Z")],
            ..TranscriptSummary::default()
        };
        let block = summary.active_block(ts("2026-10-19T09:00:00Z")).unwrap();
        assert_eq!(block.start_time, ts("2026-10-19T08:00:00Z"));
    }

    #[test]
    fn expired_block_is_none() {
        let summary = TranscriptSummary {
            timestamps: vec![ts("2026-10-19T01:10:00Z")],
            ..TranscriptSummary::default()
        };
        assert_eq!(summary.active_block(ts("2026-10-19T07:00:00Z")), None);
    }
}
