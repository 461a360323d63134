//! File categorization, scope suggestions, and change-context derivation.

use std::collections::BTreeSet;
use std::path::Path;

use crate::snapshot::ChangeStats;

/// Staged files partitioned by category. Every staged file appears in
/// exactly one bucket.
#[derive(Debug, Clone, Default)]
pub struct FileTypes {
    pub code: Vec<String>,
    pub docs: Vec<String>,
    pub tests: Vec<String>,
    pub config: Vec<String>,
    pub assets: Vec<String>,
    pub other: Vec<String>,
}

const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "jsx", "tsx", "java", "c", "cpp", "h", "hpp", "go", "rs", "php", "rb",
    "swift", "kt", "scala",
];
const DOC_EXTENSIONS: &[&str] = &["md", "txt", "rst", "adoc", "tex"];
const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml", "ini", "cfg", "conf", "env"];
const ASSET_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico", "css", "scss", "sass", "less",
];

impl FileTypes {
    /// Partition paths by name/extension heuristics.
    ///
    /// Test files are recognized by name before the extension buckets so
    /// `test_auth.py` lands in `tests`, not `code`.
    pub fn categorize(files: &[String]) -> Self {
        let mut types = FileTypes::default();

        for path in files {
            let name = file_name(path).to_lowercase();
            let ext = extension(path);

            if name.contains("test") || name.contains("spec") {
                types.tests.push(path.clone());
            } else if CODE_EXTENSIONS.contains(&ext.as_str()) {
                types.code.push(path.clone());
            } else if DOC_EXTENSIONS.contains(&ext.as_str()) {
                types.docs.push(path.clone());
            } else if CONFIG_EXTENSIONS.contains(&ext.as_str()) {
                types.config.push(path.clone());
            } else if ASSET_EXTENSIONS.contains(&ext.as_str()) {
                types.assets.push(path.clone());
            } else {
                types.other.push(path.clone());
            }
        }

        types
    }
}

/// Sorted unique lowercase extensions of the given paths.
pub fn file_extensions(files: &[String]) -> Vec<String> {
    let set: BTreeSet<String> = files
        .iter()
        .map(|f| extension(f))
        .filter(|e| !e.is_empty())
        .collect();
    set.into_iter().collect()
}

/// Independent boolean predicates over the diff and stats. Non-exclusive:
/// several flags may hold at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeContext {
    pub is_doc_update: bool,
    pub is_test_update: bool,
    pub is_config_update: bool,
    pub is_refactor: bool,
    pub is_bug_fix: bool,
    pub is_feature_addition: bool,
    pub is_perf_improvement: bool,
    pub is_style_change: bool,
    pub has_version_bump: bool,
    pub has_color_changes: bool,
    pub has_function_changes: bool,
}

/// Coarse classification of change size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImpactLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed thresholds, checked high → medium → low, first match wins.
pub fn impact_level(stats: &ChangeStats, file_count: usize, types: &FileTypes) -> ImpactLevel {
    let total = stats.insertions + stats.deletions;

    if total > 500 || file_count > 10 || (!types.config.is_empty() && file_count > 3) {
        return ImpactLevel::High;
    }
    if total > 100 || file_count > 3 || (!types.code.is_empty() && stats.insertions > 50) {
        return ImpactLevel::Medium;
    }
    ImpactLevel::Low
}

const REFACTOR_KEYWORDS: &[&str] = &[
    "refactor",
    "cleanup",
    "restructure",
    "reorganize",
    "simplify",
    "extract",
];
const BUG_KEYWORDS: &[&str] = &[
    "fix", "bug", "issue", "error", "exception", "crash", "fail", "broken", "wrong",
];
const FEATURE_KEYWORDS: &[&str] = &[
    "add",
    "new",
    "implement",
    "create",
    "introduce",
    "feature",
    "functionality",
];
const PERF_KEYWORDS: &[&str] = &[
    "performance",
    "optimize",
    "speed",
    "fast",
    "efficient",
    "cache",
    "memory",
];
const STYLE_KEYWORDS: &[&str] = &[
    "style",
    "format",
    "indent",
    "whitespace",
    "lint",
    "prettier",
    "beautify",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

pub fn is_refactor(stats: &ChangeStats, diff_lower: &str) -> bool {
    if contains_any(diff_lower, REFACTOR_KEYWORDS) {
        return true;
    }
    // Heavy deletions with roughly balanced churn usually mean code removal.
    stats.deletions > 20 && stats.insertions.abs_diff(stats.deletions) * 2 < stats.deletions
}

pub fn is_bug_fix(diff_lower: &str) -> bool {
    contains_any(diff_lower, BUG_KEYWORDS)
}

pub fn is_feature_addition(stats: &ChangeStats, diff_lower: &str) -> bool {
    if contains_any(diff_lower, FEATURE_KEYWORDS) {
        return true;
    }
    stats.insertions > stats.deletions * 2 && stats.insertions > 30
}

pub fn is_perf_improvement(diff_lower: &str) -> bool {
    contains_any(diff_lower, PERF_KEYWORDS)
}

pub fn is_style_change(diff_lower: &str) -> bool {
    contains_any(diff_lower, STYLE_KEYWORDS)
}

/// Deduplicated, sorted scope candidates.
///
/// Union of the branch scope, first path segments, file stems, name-based
/// keyword mappings, and category defaults.
pub fn scope_suggestions(
    staged_files: &[String],
    branch_scope: Option<&str>,
    types: &FileTypes,
) -> Vec<String> {
    let mut suggestions: BTreeSet<String> = BTreeSet::new();

    if let Some(scope) = branch_scope {
        suggestions.insert(scope.to_string());
    }

    for path in staged_files {
        if let Some((first, _)) = path.split_once('/') {
            if !first.is_empty() {
                suggestions.insert(first.to_string());
            }
        }
        let stem = file_stem(path);
        if !stem.is_empty() {
            suggestions.insert(stem);
        }

        // Name-based keyword mapping; first hit per file wins.
        let name = file_name(path).to_lowercase();
        let keyword_scope = if name.contains("auth") || name.contains("login") {
            Some("auth")
        } else if name.contains("api") {
            Some("api")
        } else if name.contains("ui") || name.contains("component") {
            Some("ui")
        } else if name.contains("db") || name.contains("database") {
            Some("db")
        } else if name.contains("util") || name.contains("helper") {
            Some("utils")
        } else if name.contains("tui") {
            Some("tui")
        } else if name.contains("llm") {
            Some("llm")
        } else if name.contains("git") {
            Some("git")
        } else {
            None
        };
        if let Some(scope) = keyword_scope {
            suggestions.insert(scope.to_string());
        }
    }

    if !types.code.is_empty() {
        suggestions.insert("core".to_string());
    }
    if !types.tests.is_empty() {
        suggestions.insert("test".to_string());
    }
    if !types.docs.is_empty() {
        suggestions.insert("docs".to_string());
    }
    if !types.config.is_empty() {
        suggestions.insert("config".to_string());
    }

    suggestions.into_iter().collect()
}

/// Human-readable one-line summary for display.
pub fn change_summary(staged_files: &[String], stats: &ChangeStats, types: &FileTypes) -> String {
    if staged_files.is_empty() {
        return "No changes".to_string();
    }

    let mut parts = Vec::new();

    if staged_files.len() == 1 {
        parts.push("1 file".to_string());
    } else {
        parts.push(format!("{} files", staged_files.len()));
    }

    match (stats.insertions, stats.deletions) {
        (0, 0) => {}
        (i, 0) => parts.push(format!("{i} additions")),
        (0, d) => parts.push(format!("{d} deletions")),
        (i, d) => parts.push(format!("{i} additions, {d} deletions")),
    }

    let mut kinds = Vec::new();
    if !types.code.is_empty() {
        kinds.push("code");
    }
    if !types.tests.is_empty() {
        kinds.push("tests");
    }
    if !types.docs.is_empty() {
        kinds.push("documentation");
    }
    if !types.config.is_empty() {
        kinds.push("configuration");
    }
    if !types.assets.is_empty() {
        kinds.push("assets");
    }
    if !kinds.is_empty() {
        parts.push(format!("({})", kinds.join(", ")));
    }

    parts.join(" ")
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

fn extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}
