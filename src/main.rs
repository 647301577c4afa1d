//! statline: prints a terminal status line built from the host's session
//! JSON on stdin.
//!
//! Run with:  `RUST_LOG=debug statline --width 120 < session.json`

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use statline_config::Settings;
use statline_core::{NoShell, RenderContext, ShellQuery, StatusData};
use statline_system::{transcript, usage, ProcessShell};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "statline")]
#[command(version)]
#[command(about = "Compose a terminal status line from session JSON on stdin")]
struct Cli {
    /// Settings file (TOML, or JSON when the extension is .json).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Target width in columns; defaults to $COLUMNS, then the terminal size.
    #[arg(long, value_name = "COLS")]
    width: Option<u16>,

    /// Render sample values instead of live session data.
    #[arg(long)]
    preview: bool,

    /// List the widget types available with the current settings.
    #[arg(long)]
    list_widgets: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the status line.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let path = cli.config.clone().unwrap_or_else(statline_config::default_path);
    let settings = statline_config::load(&path).unwrap_or_else(|e| {
        warn!("{e}; using default settings");
        Settings::default()
    });

    let mut stdout = io::stdout().lock();

    if cli.list_widgets {
        for kind in statline_widgets::list_types(&settings) {
            if let Some(widget) = statline_widgets::resolve(kind) {
                writeln!(stdout, "{kind:<28}{}", widget.display_name())?;
            }
        }
        return Ok(());
    }

    let mut ctx = if cli.preview {
        RenderContext::preview()
    } else {
        live_context()
    };
    ctx.terminal_width = terminal_width(cli.width);

    let line = statline_renderer::render_status_line(&settings, &ctx);
    writeln!(stdout, "{line}").context("writing status line")?;
    Ok(())
}

/// Context from stdin, the session transcript and the usage status file.
/// Every source is optional; failures are logged and skipped.
fn live_context() -> RenderContext {
    let shell: Arc<dyn ShellQuery> = match ProcessShell::new() {
        Ok(shell) => Arc::new(shell),
        Err(e) => {
            warn!("{e}; external commands disabled");
            Arc::new(NoShell)
        }
    };
    let mut ctx = RenderContext::new(shell);
    ctx.usage = usage::default_path().and_then(|p| usage::load(&p));

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return ctx;
    }
    let mut raw = String::new();
    if let Err(e) = stdin.lock().read_to_string(&mut raw) {
        warn!("cannot read stdin: {e}");
        return ctx;
    }
    if raw.trim().is_empty() {
        return ctx;
    }

    match StatusData::from_json(&raw) {
        Ok(data) => {
            if let Some(path) = data.transcript_path.as_deref() {
                match transcript::summarize(Path::new(path)) {
                    Ok(summary) => {
                        ctx.token_metrics = Some(summary.tokens);
                        ctx.session_duration = summary.session_duration();
                        ctx.block_metrics = summary.active_block(ctx.now.into());
                    }
                    Err(e) => debug!("{e}"),
                }
            }
            ctx.data = Some(data);
        }
        Err(e) => warn!("{e}"),
    }
    ctx.raw_input = Some(raw);
    ctx
}

fn terminal_width(flag: Option<u16>) -> Option<u16> {
    flag.or_else(|| std::env::var("COLUMNS").ok()?.trim().parse().ok())
        .or_else(|| crossterm::terminal::size().ok().map(|(cols, _)| cols))
        .filter(|cols| *cols > 0)
}
