//! Pattern extraction from bounded diff text.
//!
//! Every extractor is capped at [`MAX_PATTERN_MATCHES`] results and refuses
//! diffs larger than the snapshot byte cap outright, so pathological input
//! never produces unbounded work. Matches are returned in pattern order,
//! trimmed but otherwise raw; the rule engine cleans them for display.

use regex_lite::Regex;

use crate::snapshot::MAX_DIFF_BYTES;

/// Cap on extracted matches per category.
pub const MAX_PATTERN_MATCHES: usize = 100;

/// Extract comment bodies for one marker word (TODO, FIX, or BUG).
///
/// Tries comment styles in a fixed order: C-style `//`, shell-style `#`,
/// block `/* */`, HTML `<!-- -->`, then a bare-word fallback.
pub fn extract_markers(diff: &str, marker: &str) -> Vec<String> {
    let patterns = [
        format!(r"(?i)//\s*{marker}[:\s]*(.+)"),
        format!(r"(?i)#\s*{marker}[:\s]*(.+)"),
        format!(r"(?i)/\*\s*{marker}[:\s]*(.+?)\*/"),
        format!(r"(?i)<!--\s*{marker}[:\s]*(.+?)-->"),
        format!(r"(?i){marker}[:\s]*(.+)"),
    ];
    extract_with_patterns(diff, &patterns)
}

/// Extract semver-looking version assignments.
pub fn extract_versions(diff: &str) -> Vec<String> {
    let patterns = [
        r#"(?i)version\s*[=:]\s*["']?(\d+\.\d+\.\d+)["']?"#.to_string(),
        r#"(?i)__version__\s*=\s*["']?(\d+\.\d+\.\d+)["']?"#.to_string(),
        r#""version":\s*"(\d+\.\d+\.\d+)""#.to_string(),
        r#"'version':\s*'(\d+\.\d+\.\d+)'"#.to_string(),
    ];
    extract_with_patterns(diff, &patterns)
}

/// Extract identifier names following function-declaration keywords.
///
/// Covers Python, JavaScript, Rust, Go, and Java/C# visibility+type
/// declarations. Case-sensitive: `def`/`fn`/`func` are keywords, not prose.
pub fn extract_functions(diff: &str) -> Vec<String> {
    let patterns = [
        r"def\s+(\w+)".to_string(),
        r"function\s+(\w+)".to_string(),
        r"fn\s+(\w+)".to_string(),
        r"func\s+(\w+)".to_string(),
        r"(?:public|private|protected)\s+\w+\s+(\w+)\s*\(".to_string(),
    ];
    extract_with_patterns(diff, &patterns)
}

/// Extract color literals and `color:`-style assignments.
pub fn extract_colors(diff: &str) -> Vec<String> {
    let patterns = [
        r#"(?i)color\s*[=:]\s*["']?([^"'\n]+)["']?"#.to_string(),
        r#"(?i)background-color\s*[=:]\s*["']?([^"'\n]+)["']?"#.to_string(),
        r#"(?i)border-color\s*[=:]\s*["']?([^"'\n]+)["']?"#.to_string(),
        r"#[0-9a-fA-F]{3,6}".to_string(),
        r"(?i)rgba?\([^)]+\)".to_string(),
        r"(?i)hsla?\([^)]+\)".to_string(),
    ];
    extract_with_patterns(diff, &patterns)
}

/// Extract config-ish key/value assignments.
pub fn extract_configs(diff: &str) -> Vec<String> {
    let patterns = [
        r#"(?i)config\s*[=:]\s*["']?([^"'\n]+)["']?"#.to_string(),
        r#"(?i)setting\s*[=:]\s*["']?([^"'\n]+)["']?"#.to_string(),
        r#"(?i)option\s*[=:]\s*["']?([^"'\n]+)["']?"#.to_string(),
        r#"(?i)parameter\s*[=:]\s*["']?([^"'\n]+)["']?"#.to_string(),
        r#"(?i)default\s*[=:]\s*["']?([^"'\n]+)["']?"#.to_string(),
    ];
    extract_with_patterns(diff, &patterns)
}

/// Run an ordered pattern list over the diff, collecting capture group 1
/// (or the whole match for group-less patterns) up to the match cap.
fn extract_with_patterns(diff: &str, patterns: &[String]) -> Vec<String> {
    if diff.is_empty() || diff.len() > MAX_DIFF_BYTES {
        return Vec::new();
    }

    let mut results = Vec::new();
    for pattern in patterns {
        let regex = match Regex::new(pattern) {
            Ok(r) => r,
            Err(_) => continue,
        };

        for caps in regex.captures_iter(diff) {
            if results.len() >= MAX_PATTERN_MATCHES {
                break;
            }
            let text = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            if !text.is_empty() {
                results.push(text);
            }
        }

        if results.len() >= MAX_PATTERN_MATCHES {
            break;
        }
    }

    results.truncate(MAX_PATTERN_MATCHES);
    results
}
