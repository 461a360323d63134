//! Candidate generation and selection.
//!
//! Seven independent generators each contribute zero or more candidates.
//! Generator order carries no priority; ranking comes entirely from the
//! confidence weight, with description length as a tie-break (longer means
//! more specific). Confidences are fixed priority weights, not
//! probabilities.

use regex_lite::Regex;

use crate::analyzer::Analysis;
use crate::config::RulesConfig;

/// Which generator produced a candidate. Drives the description
/// enhancement pass: branch-derived descriptions are deliberate and must
/// not be overwritten by weaker diff signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSource {
    Branch,
    Comment,
    File,
    DiffContent,
    Function,
    Version,
    Stats,
    Fallback,
}

/// One hypothesis about the commit's type, scope, and description.
#[derive(Debug, Clone)]
pub struct CommitPattern {
    pub kind: String,
    pub scope: Option<String>,
    pub description: String,
    pub confidence: f64,
    pub source: PatternSource,
}

impl CommitPattern {
    fn new(
        kind: &str,
        scope: Option<String>,
        description: String,
        confidence: f64,
        source: PatternSource,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            scope,
            description,
            confidence,
            source,
        }
    }
}

/// Run every generator and collect all candidates.
pub fn collect_candidates(analysis: &Analysis, rules: &RulesConfig) -> Vec<CommitPattern> {
    let mut candidates = Vec::new();

    if let Some(pattern) = branch_candidate(analysis) {
        candidates.push(pattern);
    }
    candidates.extend(comment_candidates(analysis, rules));
    candidates.extend(file_candidates(analysis));
    candidates.extend(diff_candidates(analysis));
    if let Some(pattern) = function_candidate(analysis) {
        candidates.push(pattern);
    }
    if let Some(pattern) = version_candidate(analysis) {
        candidates.push(pattern);
    }
    if let Some(pattern) = stats_candidate(analysis) {
        candidates.push(pattern);
    }

    candidates
}

/// Pick the highest-ranked candidate, or the generic fallback when no
/// generator produced anything.
pub fn select_best(mut candidates: Vec<CommitPattern>) -> CommitPattern {
    if candidates.is_empty() {
        return CommitPattern::new(
            "feat",
            None,
            "update code".to_string(),
            0.1,
            PatternSource::Fallback,
        );
    }

    // Stable sort keeps generator order for exact ties.
    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.description.len().cmp(&a.description.len()))
    });
    candidates.remove(0)
}

fn branch_candidate(analysis: &Analysis) -> Option<CommitPattern> {
    let branch_type = analysis.branch_type.as_deref()?;
    let kind = normalize_commit_type(branch_type);

    let description = match analysis.branch_scope.as_deref() {
        Some(scope) => format!("implement {}", scope.replace(['-', '_'], " ")),
        None => "implement feature".to_string(),
    };

    Some(CommitPattern::new(
        kind,
        analysis.branch_scope.clone(),
        description,
        0.9,
        PatternSource::Branch,
    ))
}

fn comment_candidates(analysis: &Analysis, rules: &RulesConfig) -> Vec<CommitPattern> {
    let mut candidates = Vec::new();

    if rules.enable_todos {
        for todo in analysis.todos.iter().take(2) {
            candidates.push(CommitPattern::new(
                "feat",
                None,
                clean_comment_text(todo),
                0.8,
                PatternSource::Comment,
            ));
        }
    }
    if rules.enable_fixes {
        for fix in analysis.fixes.iter().take(2) {
            candidates.push(CommitPattern::new(
                "fix",
                None,
                clean_comment_text(fix),
                0.9,
                PatternSource::Comment,
            ));
        }
    }
    if rules.enable_bugs {
        for bug in analysis.bugs.iter().take(2) {
            candidates.push(CommitPattern::new(
                "fix",
                None,
                clean_comment_text(bug),
                0.9,
                PatternSource::Comment,
            ));
        }
    }

    candidates
}

struct FileCategory {
    needles: &'static [&'static str],
    suffixes: &'static [&'static str],
    kind: &'static str,
    confidence: f64,
    description: &'static str,
}

const FILE_CATEGORIES: &[FileCategory] = &[
    FileCategory {
        needles: &["readme", "docs", "documentation"],
        suffixes: &[".md", ".rst", ".txt"],
        kind: "docs",
        confidence: 0.9,
        description: "update documentation",
    },
    FileCategory {
        needles: &["test", "spec", "test_", "spec_"],
        suffixes: &[".test.", ".spec."],
        kind: "test",
        confidence: 0.9,
        description: "add tests",
    },
    FileCategory {
        needles: &["config", "settings", "env"],
        suffixes: &[".conf", ".cfg", ".ini", ".toml", ".yaml", ".yml"],
        kind: "chore",
        confidence: 0.8,
        description: "update configuration",
    },
    FileCategory {
        needles: &["style", "css", "scss", "less"],
        suffixes: &[".css", ".scss", ".less"],
        kind: "style",
        confidence: 0.8,
        description: "improve styling",
    },
    FileCategory {
        needles: &["requirements", "package.json", "pyproject.toml", "cargo.toml", "go.mod"],
        suffixes: &[],
        kind: "chore",
        confidence: 0.7,
        description: "update dependencies",
    },
];

const GENERIC_FILE_NAMES: &[&str] = &["README.md", "requirements.txt", "package.json"];

fn file_candidates(analysis: &Analysis) -> Vec<CommitPattern> {
    let mut candidates = Vec::new();

    for path in &analysis.staged_files {
        let path_lower = path.to_lowercase();
        let file_name = path.rsplit('/').next().unwrap_or(path);

        // A file may match several categories; each category contributes
        // at most once per file.
        for category in FILE_CATEGORIES {
            let matched = category.needles.iter().any(|n| path_lower.contains(n))
                || category
                    .suffixes
                    .iter()
                    .any(|s| path_lower.contains(s) || path_lower.ends_with(s));
            if !matched {
                continue;
            }

            let scope = path
                .split_once('/')
                .map(|(first, _)| first.to_lowercase());
            let description = if GENERIC_FILE_NAMES.contains(&file_name) {
                category.description.to_string()
            } else {
                format!("{} for {}", category.description, file_name)
            };

            candidates.push(CommitPattern::new(
                category.kind,
                scope,
                description,
                category.confidence,
                PatternSource::File,
            ));
        }
    }

    candidates
}

struct DiffGroup {
    pattern: &'static str,
    kind: &'static str,
    confidence: f64,
    description: &'static str,
}

const DIFF_GROUPS: &[DiffGroup] = &[
    DiffGroup {
        pattern: r"(?:fix|bug|issue|error|exception|crash|fail|broken|wrong|incorrect)\s",
        kind: "fix",
        confidence: 0.8,
        description: "fix issues",
    },
    DiffGroup {
        pattern: r"(?:add|new|implement|create|introduce|feature|functionality|capability)\s",
        kind: "feat",
        confidence: 0.7,
        description: "add new features",
    },
    DiffGroup {
        pattern: r"(?:refactor|cleanup|restructure|reorganize|simplify|extract|consolidate)\s",
        kind: "refactor",
        confidence: 0.7,
        description: "refactor code",
    },
    DiffGroup {
        pattern: r"(?:performance|optimize|speed|fast|efficient|cache|memory)\s",
        kind: "perf",
        confidence: 0.8,
        description: "improve performance",
    },
    DiffGroup {
        pattern: r"(?:style|format|indent|whitespace|lint|prettier|beautify)\s",
        kind: "style",
        confidence: 0.8,
        description: "improve code style",
    },
];

fn diff_candidates(analysis: &Analysis) -> Vec<CommitPattern> {
    let diff_lower = analysis.staged_diff.to_lowercase();
    let mut candidates = Vec::new();

    for group in DIFF_GROUPS {
        let Ok(re) = Regex::new(group.pattern) else {
            continue;
        };
        if re.is_match(&diff_lower) {
            candidates.push(CommitPattern::new(
                group.kind,
                None,
                group.description.to_string(),
                group.confidence,
                PatternSource::DiffContent,
            ));
        }
    }

    candidates
}

fn function_candidate(analysis: &Analysis) -> Option<CommitPattern> {
    let name = most_frequent(&analysis.function_changes)?;
    Some(CommitPattern::new(
        "refactor",
        None,
        format!("update {name} function"),
        0.6,
        PatternSource::Function,
    ))
}

/// Most frequent element, first occurrence winning ties.
fn most_frequent(items: &[String]) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for item in items {
        let count = items.iter().filter(|other| *other == item).count();
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((item, count)),
        }
    }
    best.map(|(name, _)| name)
}

fn version_candidate(analysis: &Analysis) -> Option<CommitPattern> {
    let version = analysis.version_changes.first()?;
    Some(CommitPattern::new(
        "chore",
        Some("version".to_string()),
        format!("bump version to {version}"),
        0.9,
        PatternSource::Version,
    ))
}

fn stats_candidate(analysis: &Analysis) -> Option<CommitPattern> {
    let insertions = analysis.stats.insertions;
    let deletions = analysis.stats.deletions;

    if insertions > deletions * 3 && insertions > 50 {
        return Some(CommitPattern::new(
            "feat",
            None,
            "add new features".to_string(),
            0.6,
            PatternSource::Stats,
        ));
    }
    if deletions > insertions * 3 && deletions > 50 {
        return Some(CommitPattern::new(
            "refactor",
            None,
            "remove unused code".to_string(),
            0.6,
            PatternSource::Stats,
        ));
    }
    if analysis.staged_files.len() == 1 {
        let file_name = analysis.staged_files[0]
            .rsplit('/')
            .next()
            .unwrap_or(&analysis.staged_files[0]);
        return Some(CommitPattern::new(
            "fix",
            None,
            format!("update {file_name}"),
            0.5,
            PatternSource::Stats,
        ));
    }

    None
}

/// Map branch-type aliases onto the conventional-commit vocabulary.
/// Unknown types default to `feat`.
pub fn normalize_commit_type(branch_type: &str) -> &'static str {
    match branch_type.to_lowercase().as_str() {
        "feat" | "feature" => "feat",
        "fix" | "bugfix" | "hotfix" => "fix",
        "docs" | "documentation" => "docs",
        "test" | "testing" => "test",
        "refactor" | "refactoring" => "refactor",
        "style" | "styling" => "style",
        "perf" | "performance" => "perf",
        "chore" | "maintenance" => "chore",
        "release" => "release",
        _ => "feat",
    }
}

/// Strip comment markers and TODO/FIX/BUG prefixes from a raw comment body.
pub fn clean_comment_text(text: &str) -> String {
    let text = text.trim();
    let text = text.trim_start_matches(['#', '/']).trim_start();
    let text = text.trim_end_matches(['#', '/']).trim_end();

    let text = strip_marker_prefix(text);
    collapse_whitespace(&text)
}

pub(crate) fn strip_marker_prefix(text: &str) -> String {
    let lower = text.to_lowercase();
    for marker in ["todo", "fixme", "fix", "bug"] {
        if lower.starts_with(marker) {
            let rest = &text[marker.len()..];
            return rest.trim_start_matches([':', ' ', '\t']).to_string();
        }
    }
    text.to_string()
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
