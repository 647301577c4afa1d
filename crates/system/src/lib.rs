//! Render-context providers: subprocesses, git, transcripts, usage status.

pub mod git;
pub mod shell;
pub mod transcript;
pub mod usage;

pub use git::{ChangeSummary, GitProbe};
pub use shell::ProcessShell;
pub use transcript::{summarize, TranscriptSummary};
