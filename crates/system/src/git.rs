//! Read-only git queries used by the git widgets.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use statline_core::{ShellQuery, ShellRequest};

static INSERTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) insertion").expect("insertion pattern is valid"));
static DELETIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) deletion").expect("deletion pattern is valid"));

/// Working-tree change counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub insertions:     u64,
    pub deletions:      u64,
    pub commits_ahead:  u64,
    pub untracked:      u64,
    /// Tracked files with any staged or unstaged change.
    pub modified_files: u64,
    pub staged_files:   u64,
}

impl ChangeSummary {
    pub fn is_dirty(&self) -> bool {
        self.modified_files > 0 || self.untracked > 0
    }
}

/// Git queries pinned to one working directory.
#[derive(Clone, Copy)]
pub struct GitProbe<'a> {
    shell: &'a dyn ShellQuery,
    cwd:   Option<&'a Path>,
}

impl<'a> GitProbe<'a> {
    pub fn new(shell: &'a dyn ShellQuery, cwd: Option<&'a Path>) -> Self {
        Self { shell, cwd }
    }

    fn raw(&self, args: &[&str]) -> Option<String> {
        self.shell.run(&ShellRequest::new("git", args).cwd(self.cwd))
    }

    /// Trimmed output, `None` when the command failed or printed nothing.
    fn line(&self, args: &[&str]) -> Option<String> {
        let out = self.raw(args)?;
        let out = out.trim();
        (!out.is_empty()).then(|| out.to_string())
    }

    pub fn branch(&self) -> Option<String> {
        self.line(&["branch", "--show-current"])
    }

    pub fn has_changes(&self) -> bool {
        self.raw(&["status", "--porcelain"])
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Commits on HEAD not yet on the upstream; 0 without an upstream.
    pub fn commits_ahead(&self) -> u64 {
        self.line(&["rev-list", "--count", "@{u}..HEAD"])
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    /// `None` when the directory is not a repository (or git is missing).
    pub fn changes(&self) -> Option<ChangeSummary> {
        let unstaged = self.raw(&["diff", "--shortstat"])?;
        let staged = self.raw(&["diff", "--cached", "--shortstat"])?;

        let (ins_a, del_a) = parse_shortstat(&unstaged);
        let (ins_b, del_b) = parse_shortstat(&staged);

        let untracked = self
            .raw(&["ls-files", "--others", "--exclude-standard"])
            .map(|s| s.lines().filter(|l| !l.trim().is_empty()).count() as u64)
            .unwrap_or(0);

        let (modified_files, staged_files) = self
            .raw(&["status", "--porcelain"])
            .map(|s| count_porcelain(&s))
            .unwrap_or((0, 0));

        Some(ChangeSummary {
            insertions: ins_a + ins_b,
            deletions: del_a + del_b,
            commits_ahead: self.commits_ahead(),
            untracked,
            modified_files,
            staged_files,
        })
    }

    pub fn user_name(&self) -> Option<String> {
        self.line(&["config", "user.name"])
    }

    pub fn user_email(&self) -> Option<String> {
        self.line(&["config", "user.email"])
    }

    /// `main` for the primary checkout, else the linked worktree's name.
    pub fn worktree(&self) -> Option<String> {
        worktree_name(&self.line(&["rev-parse", "--git-dir"])?)
    }
}

/// `(insertions, deletions)` from `git diff --shortstat` output.
pub fn parse_shortstat(stat: &str) -> (u64, u64) {
    let grab = |re: &Regex| -> u64 {
        re.captures(stat)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    (grab(&INSERTIONS), grab(&DELETIONS))
}

/// `(modified, staged)` from `git status --porcelain`; untracked (`??`)
/// entries count toward neither.
pub fn count_porcelain(porcelain: &str) -> (u64, u64) {
    let mut modified = 0;
    let mut staged = 0;
    for line in porcelain.lines() {
        let code = line.get(..2).unwrap_or(line);
        let trimmed = code.trim();
        if trimmed.is_empty() || trimmed == "??" {
            continue;
        }
        modified += 1;
        if !code.starts_with([' ', '?']) {
            staged += 1;
        }
    }
    (modified, staged)
}

/// Worktree name from `git rev-parse --git-dir` output.
pub fn worktree_name(git_dir: &str) -> Option<String> {
    let git_dir = git_dir.trim_end_matches('/');
    if git_dir == ".git" || git_dir.ends_with("/.git") {
        return Some("main".to_string());
    }
    git_dir
        .split_once(".git/worktrees/")
        .map(|(_, name)| name.to_string())
        .filter(|name| !name.is_empty())
}
