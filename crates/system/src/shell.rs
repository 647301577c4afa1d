//! Production [`ShellQuery`]: real subprocesses with a hard timeout.

use std::process::Stdio;

use statline_core::{Result, ShellQuery, ShellRequest, StatlineError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::runtime::{Builder, Runtime};
use tokio::time;
use tracing::{debug, warn};

/// Runs commands on a private current-thread runtime so callers stay
/// synchronous.  A child that outlives its timeout is killed.
#[derive(Debug)]
pub struct ProcessShell {
    runtime: Runtime,
}

impl ProcessShell {
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StatlineError::Process(format!("cannot start runtime: {e}")))?;
        Ok(Self { runtime })
    }
}

impl ShellQuery for ProcessShell {
    fn run(&self, request: &ShellRequest<'_>) -> Option<String> {
        self.runtime.block_on(run_bounded(request))
    }
}

async fn run_bounded(request: &ShellRequest<'_>) -> Option<String> {
    let mut command = Command::new(request.program);
    command
        .args(request.args)
        .stdin(if request.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    if let Some(cwd) = request.cwd {
        command.current_dir(cwd);
    }

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            debug!("cannot spawn '{}': {e}", request.command_line());
            return None;
        }
    };

    let pipe = child.stdin.take();
    let input = request.stdin;
    let work = async move {
        if let (Some(mut pipe), Some(input)) = (pipe, input) {
            // Children that never read stdin close it early; that is fine.
            let _ = pipe.write_all(input.as_bytes()).await;
        }
        child.wait_with_output().await
    };

    match time::timeout(request.timeout, work).await {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(Ok(output)) => {
            debug!("'{}' exited with {}", request.command_line(), output.status);
            None
        }
        Ok(Err(e)) => {
            debug!("'{}' failed: {e}", request.command_line());
            None
        }
        Err(_) => {
            warn!(
                "'{}' timed out after {} ms",
                request.command_line(),
                request.timeout.as_millis()
            );
            None
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn captures_stdout() {
        let shell = ProcessShell::new().unwrap();
        let out = shell.run(&ShellRequest::new("sh", &["-c", "printf hello"]));
        assert_eq!(out.as_deref(), Some("hello"));
    }

    #[test]
    fn non_zero_exit_is_none() {
        let shell = ProcessShell::new().unwrap();
        assert_eq!(shell.run(&ShellRequest::new("sh", &["-c", "exit 3"])), None);
    }

    #[test]
    fn missing_binary_is_none() {
        let shell = ProcessShell::new().unwrap();
        assert_eq!(
            shell.run(&ShellRequest::new("statline-no-such-binary", &[])),
            None
        );
    }

    #[test]
    fn timeout_is_none() {
        let shell = ProcessShell::new().unwrap();
        let req = ShellRequest::new("sh", &["-c", "sleep 5"]).timeout(Duration::from_millis(100));
        assert_eq!(shell.run(&req), None);
    }

    #[test]
    fn stdin_is_forwarded() {
        let shell = ProcessShell::new().unwrap();
        let req = ShellRequest::new("sh", &["-c", "cat"]).stdin(Some("{\"a\":1}"));
        assert_eq!(shell.run(&req).as_deref(), Some("{\"a\":1}"));
    }
}
