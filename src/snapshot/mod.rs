//! Repository snapshot collection using git2-rs.
//!
//! Everything the analyzer needs is gathered up front into a [`RepoSnapshot`]
//! read-only record: branch name, staged/unstaged paths, bounded diff text,
//! change statistics, recent history, and the origin URL. Individual git
//! failures degrade to empty values rather than aborting the run; only
//! opening the repository and the final commit can fail.

use git2::{Diff, DiffOptions, ErrorCode, Oid, Repository, Status, StatusOptions, Tree};
use tracing::warn;

use crate::error::SnapshotError;

/// Byte cap for diff text before truncation kicks in.
pub const MAX_DIFF_BYTES: usize = 1024 * 1024;

/// Line cap for diff text before truncation kicks in.
pub const MAX_DIFF_LINES: usize = 10_000;

/// Summary counts parsed from the staged diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeStats {
    pub files: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// One entry of recent commit history.
#[derive(Debug, Clone)]
pub struct CommitSummary {
    pub hash: String,
    pub message: String,
}

/// Read-only view of the working tree state at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RepoSnapshot {
    pub branch_name: String,
    pub staged_files: Vec<String>,
    pub unstaged_files: Vec<String>,
    pub staged_diff: String,
    pub unstaged_diff: String,
    pub stats: ChangeStats,
    pub recent_commits: Vec<CommitSummary>,
    pub remote_url: Option<String>,
}

/// Collect a fresh snapshot of the repository state.
pub fn collect(repo: &Repository) -> RepoSnapshot {
    let (staged_files, unstaged_files) = list_status_files(repo);
    let head_tree = resolve_head_tree(repo);

    let staged = repo.diff_tree_to_index(head_tree.as_ref(), None, None);
    let (staged_diff, stats) = match staged {
        Ok(diff) => (render_diff(&diff), diff_stats(&diff)),
        Err(e) => {
            warn!("Failed to collect staged diff: {e}");
            (String::new(), ChangeStats::default())
        }
    };

    let mut opts = DiffOptions::new();
    let unstaged_diff = match repo.diff_index_to_workdir(None, Some(&mut opts)) {
        Ok(diff) => render_diff(&diff),
        Err(e) => {
            warn!("Failed to collect unstaged diff: {e}");
            String::new()
        }
    };

    RepoSnapshot {
        branch_name: current_branch(repo),
        staged_files,
        unstaged_files,
        staged_diff,
        unstaged_diff,
        stats,
        recent_commits: recent_commits(repo, 5),
        remote_url: remote_url(repo),
    }
}

/// Create a commit from the already-staged index with the given message.
///
/// Does not stage anything itself; callers are expected to have checked that
/// the snapshot lists at least one staged file. Works on unborn branches
/// (initial commit has no parent).
pub fn commit(repo: &Repository, message: &str) -> Result<Oid, SnapshotError> {
    let mut index = repo.index().map_err(SnapshotError::IndexFailed)?;
    let tree_id = index.write_tree().map_err(SnapshotError::IndexFailed)?;
    let tree = repo.find_tree(tree_id).map_err(SnapshotError::CommitFailed)?;

    let sig = repo.signature().map_err(SnapshotError::ConfigError)?;

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(SnapshotError::CommitFailed)
}

/// Current branch shorthand, or a short hash for detached HEAD.
fn current_branch(repo: &Repository) -> String {
    match repo.head() {
        Ok(head) => {
            if head.is_branch() {
                head.shorthand().unwrap_or("HEAD").to_string()
            } else {
                head.target()
                    .map(|oid| oid.to_string()[..8].to_string())
                    .unwrap_or_else(|| "HEAD".to_string())
            }
        }
        Err(_) => "HEAD".to_string(),
    }
}

/// HEAD tree, treating unborn branches as "no tree" so the staged diff is
/// computed against an empty base.
fn resolve_head_tree(repo: &Repository) -> Option<Tree<'_>> {
    match repo.head() {
        Ok(head) => head.peel_to_tree().ok(),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => None,
        Err(e) => {
            warn!("Failed to resolve HEAD tree: {e}");
            None
        }
    }
}

/// Staged and unstaged path lists in status-listing order.
fn list_status_files(repo: &Repository) -> (Vec<String>, Vec<String>) {
    let mut opts = StatusOptions::new();
    opts.include_untracked(false).renames_head_to_index(true);

    let statuses = match repo.statuses(Some(&mut opts)) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to read repository status: {e}");
            return (Vec::new(), Vec::new());
        }
    };

    let staged_mask = Status::INDEX_NEW
        | Status::INDEX_MODIFIED
        | Status::INDEX_DELETED
        | Status::INDEX_RENAMED
        | Status::INDEX_TYPECHANGE;
    let unstaged_mask = Status::WT_MODIFIED
        | Status::WT_DELETED
        | Status::WT_RENAMED
        | Status::WT_TYPECHANGE;

    let mut staged = Vec::new();
    let mut unstaged = Vec::new();
    for entry in statuses.iter() {
        let Some(path) = entry.path() else { continue };
        if entry.status().intersects(staged_mask) {
            staged.push(path.to_string());
        }
        if entry.status().intersects(unstaged_mask) {
            unstaged.push(path.to_string());
        }
    }

    (staged, unstaged)
}

/// Render unified diff text, bounded by [`MAX_DIFF_BYTES`] and
/// [`MAX_DIFF_LINES`]. Truncation appends a one-line notice so downstream
/// consumers can see that the text is partial. Truncation happens exactly
/// once, here; the analyzer never re-truncates.
fn render_diff(diff: &Diff<'_>) -> String {
    let mut text = String::new();
    let mut lines = 0usize;
    let mut truncated = false;

    let result = diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
        if truncated {
            return false;
        }

        let content = std::str::from_utf8(line.content()).unwrap_or("");
        if lines >= MAX_DIFF_LINES || text.len() + content.len() + 2 > MAX_DIFF_BYTES {
            truncated = true;
            return false;
        }

        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(content);
        lines += 1;

        true
    });

    if truncated {
        text.push_str(&format!("\n... (diff truncated at {MAX_DIFF_LINES} lines)"));
    } else if let Err(e) = result {
        warn!("Failed to render diff text: {e}");
    }

    text
}

/// File/insertion/deletion counts from the diff summary.
fn diff_stats(diff: &Diff<'_>) -> ChangeStats {
    match diff.stats() {
        Ok(stats) => ChangeStats {
            files: stats.files_changed(),
            insertions: stats.insertions(),
            deletions: stats.deletions(),
        },
        Err(e) => {
            warn!("Failed to compute diff stats: {e}");
            ChangeStats::default()
        }
    }
}

/// Last `count` non-merge commits from HEAD, newest first.
fn recent_commits(repo: &Repository, count: usize) -> Vec<CommitSummary> {
    let mut walk = match repo.revwalk() {
        Ok(w) => w,
        Err(_) => return Vec::new(),
    };
    if walk.push_head().is_err() {
        return Vec::new();
    }

    let mut commits = Vec::new();
    for oid in walk.flatten() {
        if commits.len() >= count {
            break;
        }
        let Ok(commit) = repo.find_commit(oid) else {
            continue;
        };
        if commit.parent_count() > 1 {
            continue;
        }
        commits.push(CommitSummary {
            hash: oid.to_string()[..8].to_string(),
            message: commit.summary().unwrap_or("").to_string(),
        });
    }

    commits
}

fn remote_url(repo: &Repository) -> Option<String> {
    repo.find_remote("origin")
        .ok()
        .and_then(|r| r.url().map(String::from))
}
