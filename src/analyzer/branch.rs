//! Branch-name decomposition into a commit type and scope.

use regex_lite::Regex;

/// Split a branch name on the `<type>/<scope>` convention.
///
/// Recognized type aliases are matched first (case-insensitive); any other
/// name containing a `/` falls back to a generic first-slash split. Names
/// without a slash yield neither field.
pub fn decompose(branch_name: &str) -> (Option<String>, Option<String>) {
    let pattern = Regex::new(
        r"(?i)^(feat|feature|fix|bugfix|hotfix|docs|documentation|test|testing|refactor|refactoring|style|styling|perf|performance|chore|maintenance|release)/(.+)$",
    )
    .expect("branch pattern is valid");

    if let Some(caps) = pattern.captures(branch_name) {
        return (
            Some(caps[1].to_lowercase()),
            Some(caps[2].to_lowercase()),
        );
    }

    if let Some((kind, scope)) = branch_name.split_once('/') {
        if !kind.is_empty() && !scope.is_empty() {
            return (Some(kind.to_lowercase()), Some(scope.to_lowercase()));
        }
    }

    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_known_types() {
        assert_eq!(
            decompose("feat/auth-flow"),
            (Some("feat".into()), Some("auth-flow".into()))
        );
        assert_eq!(
            decompose("fix/login-timeout"),
            (Some("fix".into()), Some("login-timeout".into()))
        );
        assert_eq!(
            decompose("hotfix/broken-build"),
            (Some("hotfix".into()), Some("broken-build".into()))
        );
        assert_eq!(
            decompose("release/1.2.0"),
            (Some("release".into()), Some("1.2.0".into()))
        );
    }

    #[test]
    fn test_decompose_is_case_insensitive_and_lowercases() {
        assert_eq!(
            decompose("Feature/New-Login"),
            (Some("feature".into()), Some("new-login".into()))
        );
    }

    #[test]
    fn test_decompose_generic_slash_fallback() {
        assert_eq!(
            decompose("jdoe/experiment"),
            (Some("jdoe".into()), Some("experiment".into()))
        );
    }

    #[test]
    fn test_decompose_keeps_rest_after_first_slash() {
        assert_eq!(
            decompose("feat/auth/session"),
            (Some("feat".into()), Some("auth/session".into()))
        );
    }

    #[test]
    fn test_decompose_no_slash() {
        assert_eq!(decompose("main"), (None, None));
        assert_eq!(decompose("develop"), (None, None));
    }

    #[test]
    fn test_decompose_empty_sides() {
        assert_eq!(decompose("feat/"), (None, None));
        assert_eq!(decompose("/scope"), (None, None));
    }
}
