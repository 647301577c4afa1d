//! Narrow capability for running read-only external commands.
//!
//! Widgets never spawn processes themselves; they describe the command with
//! a [`ShellRequest`] and hand it to whatever [`ShellQuery`] the render
//! context carries.  Every failure mode (missing binary, non-zero exit,
//! timeout) collapses into `None`.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Upper bound for git probes.
pub const GIT_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Default bound for user-supplied commands.
pub const COMMAND_TIMEOUT: Duration = Duration::from_millis(1_000);

/// One external command invocation.
#[derive(Debug, Clone, Copy)]
pub struct ShellRequest<'a> {
    pub program: &'a str,
    pub args:    &'a [&'a str],
    /// Working directory; `None` inherits the process cwd.
    pub cwd:     Option<&'a Path>,
    /// Text written to the child's stdin before waiting.
    pub stdin:   Option<&'a str>,
    pub timeout: Duration,
}

impl<'a> ShellRequest<'a> {
    pub fn new(program: &'a str, args: &'a [&'a str]) -> Self {
        Self {
            program,
            args,
            cwd: None,
            stdin: None,
            timeout: GIT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn cwd(mut self, cwd: Option<&'a Path>) -> Self {
        self.cwd = cwd;
        self
    }

    #[must_use]
    pub fn stdin(mut self, stdin: Option<&'a str>) -> Self {
        self.stdin = stdin;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `program arg1 arg2 ...`, used as a lookup key and in log lines.
    pub fn command_line(&self) -> String {
        let mut line = self.program.to_string();
        for arg in self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Runs a command and returns its stdout on success.
pub trait ShellQuery: Send + Sync {
    fn run(&self, request: &ShellRequest<'_>) -> Option<String>;
}

/// A shell that never produces output.  Used in preview rendering and when
/// process spawning is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShell;

impl ShellQuery for NoShell {
    fn run(&self, _request: &ShellRequest<'_>) -> Option<String> {
        None
    }
}

/// Canned responses keyed by [`ShellRequest::command_line`].
///
/// Commands without a response behave like a failed process.
#[derive(Debug, Default, Clone)]
pub struct ScriptedShell {
    responses: HashMap<String, String>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, command_line: &str, stdout: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), stdout.to_string());
        self
    }
}

impl ShellQuery for ScriptedShell {
    fn run(&self, request: &ShellRequest<'_>) -> Option<String> {
        self.responses.get(&request.command_line()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_joins_args() {
        let req = ShellRequest::new("git", &["diff", "--shortstat"]);
        assert_eq!(req.command_line(), "git diff --shortstat");
    }

    #[test]
    fn scripted_shell_misses_are_none() {
        let shell = ScriptedShell::new().with("git branch --show-current", "main\n");
        let hit = ShellRequest::new("git", &["branch", "--show-current"]);
        let miss = ShellRequest::new("git", &["status", "--porcelain"]);
        assert_eq!(shell.run(&hit).as_deref(), Some("main\n"));
        assert_eq!(shell.run(&miss), None);
    }
}
