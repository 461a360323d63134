//! Prompt construction shared by every backend.

use crate::analyzer::Analysis;

const MAX_PROMPT_DIFF_LINES: usize = 100;
const MAX_PROMPT_LINE_CHARS: usize = 200;

/// Build the enhancement prompt from the analysis and the rule-generated
/// message.
pub fn build_prompt(analysis: &Analysis, rule_message: &str) -> String {
    let diff = format_diff(&analysis.staged_diff);

    let mut files = analysis
        .staged_files
        .iter()
        .take(5)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if analysis.staged_files.len() > 5 {
        files.push_str("...");
    }

    format!(
        "You are an expert at writing clear, concise commit messages that follow \
conventional commit standards.\n\n\
Context:\n\
- Branch: {branch}\n\
- Files changed: {files}\n\
- Change summary: {summary}\n\n\
Git diff:\n\
```\n\
{diff}\n\
```\n\n\
A rule-based system generated this commit message: \"{rule_message}\"\n\n\
Please enhance this commit message to be more specific, clear, and meaningful. \
Follow these guidelines:\n\
1. Use conventional commit format: <type>(<scope>): <description>\n\
2. Keep it under 72 characters\n\
3. Use imperative mood (e.g., \"add\" not \"added\")\n\
4. Be specific about what changed\n\
5. Focus on the \"why\" not just the \"what\"\n\
6. If the rule-based message is already good, return it unchanged\n\n\
Enhanced commit message:",
        branch = analysis.branch_name,
        summary = analysis.summary,
    )
}

/// Trim the diff for prompt use: drop binary-file notices and very long
/// lines, cap the total line count.
fn format_diff(diff: &str) -> String {
    if diff.is_empty() {
        return "No staged changes".to_string();
    }

    let mut kept = Vec::new();
    for line in diff.lines() {
        if line.contains("Binary files") || line.len() > MAX_PROMPT_LINE_CHARS {
            continue;
        }
        if kept.len() >= MAX_PROMPT_DIFF_LINES {
            kept.push("... (truncated)");
            break;
        }
        kept.push(line);
    }

    kept.join("\n")
}
