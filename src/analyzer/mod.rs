//! Turns a repository snapshot into a structured [`Analysis`] record.
//!
//! The analysis is built once per invocation and read-only afterward. Every
//! extracted list is bounded, and a failure to derive any single field
//! degrades to an empty value rather than aborting the run.

pub mod branch;
pub mod context;
pub mod extract;

use crate::snapshot::{ChangeStats, CommitSummary, RepoSnapshot};

pub use context::{ChangeContext, FileTypes, ImpactLevel};

/// Everything the rule engine needs to know about the working tree.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub branch_name: String,
    pub branch_type: Option<String>,
    pub branch_scope: Option<String>,
    pub staged_files: Vec<String>,
    pub unstaged_files: Vec<String>,
    pub staged_diff: String,
    pub unstaged_diff: String,
    pub stats: ChangeStats,
    pub file_types: FileTypes,
    pub file_extensions: Vec<String>,
    pub todos: Vec<String>,
    pub fixes: Vec<String>,
    pub bugs: Vec<String>,
    pub version_changes: Vec<String>,
    pub function_changes: Vec<String>,
    pub color_changes: Vec<String>,
    pub config_changes: Vec<String>,
    pub scope_suggestions: Vec<String>,
    pub context: ChangeContext,
    pub impact: ImpactLevel,
    pub summary: String,
    pub recent_commits: Vec<CommitSummary>,
    pub remote_url: Option<String>,
}

/// Build the full analysis from a snapshot. Pure, no repository access.
pub fn analyze(snapshot: &RepoSnapshot) -> Analysis {
    let (branch_type, branch_scope) = branch::decompose(&snapshot.branch_name);

    let file_types = FileTypes::categorize(&snapshot.staged_files);
    let file_extensions = context::file_extensions(&snapshot.staged_files);

    let diff = &snapshot.staged_diff;
    let todos = extract::extract_markers(diff, "TODO");
    let fixes = extract::extract_markers(diff, "FIX");
    let bugs = extract::extract_markers(diff, "BUG");
    let version_changes = extract::extract_versions(diff);
    let function_changes = extract::extract_functions(diff);
    let color_changes = extract::extract_colors(diff);
    let config_changes = extract::extract_configs(diff);

    let diff_lower = diff.to_lowercase();
    let change_context = ChangeContext {
        is_doc_update: !file_types.docs.is_empty(),
        is_test_update: !file_types.tests.is_empty(),
        is_config_update: !file_types.config.is_empty(),
        is_refactor: context::is_refactor(&snapshot.stats, &diff_lower),
        is_bug_fix: context::is_bug_fix(&diff_lower),
        is_feature_addition: context::is_feature_addition(&snapshot.stats, &diff_lower),
        is_perf_improvement: context::is_perf_improvement(&diff_lower),
        is_style_change: context::is_style_change(&diff_lower),
        has_version_bump: !version_changes.is_empty(),
        has_color_changes: !color_changes.is_empty(),
        has_function_changes: !function_changes.is_empty(),
    };

    let impact = context::impact_level(&snapshot.stats, snapshot.staged_files.len(), &file_types);
    let summary = context::change_summary(&snapshot.staged_files, &snapshot.stats, &file_types);
    let scope_suggestions =
        context::scope_suggestions(&snapshot.staged_files, branch_scope.as_deref(), &file_types);

    Analysis {
        branch_name: snapshot.branch_name.clone(),
        branch_type,
        branch_scope,
        staged_files: snapshot.staged_files.clone(),
        unstaged_files: snapshot.unstaged_files.clone(),
        staged_diff: snapshot.staged_diff.clone(),
        unstaged_diff: snapshot.unstaged_diff.clone(),
        stats: snapshot.stats,
        file_types,
        file_extensions,
        todos,
        fixes,
        bugs,
        version_changes,
        function_changes,
        color_changes,
        config_changes,
        scope_suggestions,
        context: change_context,
        impact,
        summary,
        recent_commits: snapshot.recent_commits.clone(),
        remote_url: snapshot.remote_url.clone(),
    }
}
