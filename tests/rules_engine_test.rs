//! End-to-end tests for the analyzer and rule engine: snapshot in,
//! conventional-commit message out.

use lazycommit::config::{Config, ScopeStyle};
use lazycommit::snapshot::{ChangeStats, RepoSnapshot};
use lazycommit::{Analysis, ImpactLevel, analyze, generate};
use regex_lite::Regex;

fn snapshot(branch: &str, files: &[&str], diff: &str, insertions: usize, deletions: usize) -> RepoSnapshot {
    RepoSnapshot {
        branch_name: branch.to_string(),
        staged_files: files.iter().map(|s| s.to_string()).collect(),
        staged_diff: diff.to_string(),
        stats: ChangeStats {
            files: files.len(),
            insertions,
            deletions,
        },
        ..Default::default()
    }
}

fn conventional_format() -> Regex {
    Regex::new(r"^(feat|fix|docs|style|refactor|perf|test|chore|release)(\([a-z0-9-]+\))?:\s+.+$")
        .unwrap()
}

#[test]
fn test_generate_is_deterministic() {
    let snap = snapshot(
        "fix/login-timeout",
        &["src/auth.rs", "tests/auth_test.rs"],
        "+// FIXME: handle timeout\n+fn retry() {\n",
        40,
        12,
    );
    let config = Config::default();

    let first = generate(&analyze(&snap), &config);
    let second = generate(&analyze(&snap), &config);
    assert_eq!(first, second);
}

#[test]
fn test_generate_total_coverage_and_format() {
    let format = conventional_format();
    let config = Config::default();

    let cases = vec![
        RepoSnapshot::default(),
        snapshot("main", &["src/lib.rs"], "+fn run() {}\n", 3, 1),
        snapshot("feat/auth-flow", &["auth/login.py"], "+def login():\n", 30, 2),
        snapshot("main", &["README.md"], "+# title\n", 5, 0),
        snapshot("main", &["a.rs", "b.rs", "c.rs"], "", 0, 0),
    ];

    for snap in cases {
        let message = generate(&analyze(&snap), &config);
        assert!(!message.is_empty());
        assert!(
            format.is_match(&message),
            "message does not conform: {message}"
        );
    }
}

#[test]
fn test_generate_description_respects_max_length() {
    let long_todo = "handle the retry logic for the network reconnect path when \
the upstream service flaps repeatedly under sustained load";
    let analysis = Analysis {
        todos: vec![long_todo.to_string()],
        ..Default::default()
    };
    let config = Config::default();

    let message = generate(&analysis, &config);
    let description = message.split_once(": ").expect("has prefix").1;
    assert!(description.chars().count() <= config.commit.max_length);
    assert!(description.ends_with("..."));
}

#[test]
fn test_branch_priority() {
    let snap = snapshot(
        "fix/login-timeout",
        &["src/auth.rs"],
        "+reconnect with backoff\n",
        10,
        2,
    );
    let message = generate(&analyze(&snap), &Config::default());
    assert!(
        message.starts_with("fix(login-timeout):"),
        "unexpected message: {message}"
    );
}

#[test]
fn test_comment_priority_over_generic_file_rules() {
    let snap = snapshot(
        "main",
        &["script.py"],
        "+// TODO: add retry logic\n",
        4,
        0,
    );
    let message = generate(&analyze(&snap), &Config::default());
    assert!(message.starts_with("feat"), "unexpected type: {message}");
    assert!(
        message.contains("retry logic"),
        "description lost the marker text: {message}"
    );
}

#[test]
fn test_truncated_diff_is_not_mutated_again() {
    let diff = "+line one\n+line two\n\n... (diff truncated at 10000 lines)";
    let snap = snapshot("main", &["src/lib.rs"], diff, 2, 0);

    let analysis = analyze(&snap);
    assert_eq!(analysis.staged_diff, diff);

    // Running the engine must leave the analysis untouched.
    let _ = generate(&analysis, &Config::default());
    assert_eq!(analysis.staged_diff, diff);
}

#[test]
fn test_scope_style_applies_to_branch_scope() {
    let analysis = Analysis {
        branch_type: Some("fix".to_string()),
        branch_scope: Some("user_auth".to_string()),
        ..Default::default()
    };

    let mut config = Config::default();
    config.commit.scope_style = ScopeStyle::KebabCase;
    assert_eq!(
        generate(&analysis, &config),
        "fix(user-auth): implement user auth"
    );

    config.commit.scope_style = ScopeStyle::Lowercase;
    assert_eq!(
        generate(&analysis, &config),
        "fix(user_auth): implement user auth"
    );
}

#[test]
fn test_impact_thresholds() {
    let high = analyze(&snapshot("main", &["big.rs"], "", 600, 0));
    assert_eq!(high.impact, ImpactLevel::High);

    let low = analyze(&snapshot("main", &["small.rs"], "", 20, 5));
    assert_eq!(low.impact, ImpactLevel::Low);
}

#[test]
fn test_end_to_end_branch_scenario() {
    let snap = snapshot(
        "feat/auth-flow",
        &["auth/login.py"],
        "+def login():\n+    return session.start()\n",
        30,
        2,
    );
    let message = generate(&analyze(&snap), &Config::default());
    assert_eq!(message, "feat(auth-flow): implement auth flow");
}
