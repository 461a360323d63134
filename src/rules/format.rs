//! Scope resolution, description enhancement, and final message rendering.

use crate::analyzer::Analysis;
use crate::config::{CommitConfig, ScopeStyle};
use crate::rules::patterns::{
    CommitPattern, PatternSource, collapse_whitespace, strip_marker_prefix,
};

/// Resolve the scope for the final message.
///
/// The winner's own scope is preferred; otherwise fall back to branch
/// scope, then the first scope suggestion, then the first staged file's
/// leading path segment. The result is always run through the configured
/// style.
pub fn resolve_scope(
    winner: &CommitPattern,
    analysis: &Analysis,
    config: &CommitConfig,
) -> Option<String> {
    if !config.include_scope {
        return None;
    }

    let raw = winner
        .scope
        .clone()
        .or_else(|| analysis.branch_scope.clone())
        .or_else(|| analysis.scope_suggestions.first().cloned())
        .or_else(|| {
            analysis
                .staged_files
                .iter()
                .find_map(|f| f.split_once('/').map(|(first, _)| first.to_string()))
        })?;

    Some(format_scope(&raw, config.scope_style))
}

/// Apply the configured scope style.
///
/// `camelCase` title-cases each word and strips the separators, which
/// yields PascalCase ("USER_AUTH" becomes "UserAuth"). That behavior is
/// kept as-is and pinned by a test.
pub fn format_scope(scope: &str, style: ScopeStyle) -> String {
    let lower = scope.to_lowercase();
    match style {
        ScopeStyle::Lowercase => lower,
        ScopeStyle::KebabCase => lower.replace(['_', ' '], "-"),
        ScopeStyle::CamelCase => {
            let mut out = String::with_capacity(lower.len());
            let mut at_boundary = true;
            for ch in lower.chars() {
                match ch {
                    '_' | '-' | ' ' => at_boundary = true,
                    _ if at_boundary && ch.is_alphabetic() => {
                        out.extend(ch.to_uppercase());
                        at_boundary = false;
                    }
                    _ => {
                        out.push(ch);
                        at_boundary = !ch.is_alphabetic();
                    }
                }
            }
            out
        }
    }
}

/// Rewrite the winning description using wider analysis context.
///
/// Rules are checked in a fixed order and the first applicable one wins.
/// Context-derived rewrites (function names, config keys, markers, single
/// file) are skipped when the winner came from the branch name: a branch
/// like `feat/auth-flow` states intent explicitly, and incidental diff
/// signals must not override it.
pub fn enhance_description(
    description: &str,
    analysis: &Analysis,
    source: PatternSource,
    config: &CommitConfig,
) -> String {
    let description = clean_description(description);
    let enhanced = apply_enhancements(&description, analysis, source);
    let enhanced = ensure_verb_start(&enhanced);
    truncate(&enhanced, config.max_length)
}

fn apply_enhancements(description: &str, analysis: &Analysis, source: PatternSource) -> String {
    let description_lower = description.to_lowercase();

    if let Some(version) = analysis.version_changes.first()
        && !description_lower.contains("version")
    {
        if !analysis.file_types.docs.is_empty() {
            return format!("update documentation and bump version to {version}");
        }
        return format!("{description} and bump version to {version}");
    }

    if !analysis.file_types.docs.is_empty() && !description_lower.contains("documentation") {
        if !analysis.file_types.config.is_empty() {
            return format!("update documentation and {description}");
        }
        return "update documentation".to_string();
    }

    let branch_scope = analysis.branch_scope.as_deref();
    if let Some(scope) = branch_scope {
        if scope.contains("git") && (scope.contains("detection") || scope.contains("staged")) {
            return "improve git staged file detection".to_string();
        }
        if scope.contains("llm") {
            return "clean up LLM code".to_string();
        }
        if scope.contains("tui") {
            if !analysis.color_changes.is_empty() {
                return "improve color scheme consistency in TUI".to_string();
            }
            return "improve TUI consistency".to_string();
        }
    }

    if !analysis.color_changes.is_empty() && branch_scope.is_none() {
        return "improve color scheme consistency".to_string();
    }

    if source == PatternSource::Branch {
        return description.to_string();
    }

    if let Some(name) = analysis.function_changes.first() {
        return format!("update {name} function");
    }

    if !analysis.config_changes.is_empty() {
        return "update configuration".to_string();
    }

    if let Some(marker) = analysis.bugs.first().or(analysis.fixes.first()) {
        return format!("fix {}", marker.to_lowercase());
    }

    if let Some(todo) = analysis.todos.first() {
        return format!("implement {}", todo.to_lowercase());
    }

    if analysis.staged_files.len() == 1 {
        let file_name = analysis.staged_files[0]
            .rsplit('/')
            .next()
            .unwrap_or(&analysis.staged_files[0]);
        if file_name.ends_with(".md") {
            return "update documentation".to_string();
        }
        if file_name.ends_with(".py") {
            return "update code".to_string();
        }
        if [".toml", ".yaml", ".yml", ".json"]
            .iter()
            .any(|ext| file_name.ends_with(ext))
        {
            return "update configuration".to_string();
        }
    }

    description.to_string()
}

/// Collapse whitespace and drop leftover marker prefixes. Output stays
/// lowercase; conventional-commit descriptions are not capitalized.
pub fn clean_description(text: &str) -> String {
    let collapsed = collapse_whitespace(text.trim());
    strip_marker_prefix(&collapsed)
}

const IMPERATIVE_VERBS: &[&str] = &[
    "add",
    "update",
    "fix",
    "remove",
    "refactor",
    "improve",
    "enhance",
    "implement",
    "create",
    "delete",
    "modify",
    "change",
    "optimize",
    "clean",
    "format",
    "style",
    "test",
    "document",
    "configure",
    "bump",
    "upgrade",
    "downgrade",
    "replace",
    "rename",
    "move",
];

/// Prefix "update " unless the text already begins with a known
/// imperative verb.
pub fn ensure_verb_start(text: &str) -> String {
    let lower = text.to_lowercase();
    if IMPERATIVE_VERBS.iter().any(|verb| lower.starts_with(verb)) {
        return text.to_string();
    }
    format!("update {text}")
}

/// Cap the description at `max_length` characters, ellipsis included.
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Render the final message line.
pub fn format_conventional(kind: &str, scope: Option<&str>, description: &str) -> String {
    match scope {
        Some(scope) => format!("{kind}({scope}): {description}"),
        None => format!("{kind}: {description}"),
    }
}
