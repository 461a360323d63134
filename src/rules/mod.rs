//! Rule-based commit message generation.
//!
//! A pure function of the analysis and configuration: no repository
//! access, no randomness, and it never fails. Absence of signal degrades
//! to a generic fallback message.

pub mod format;
pub mod patterns;

use crate::analyzer::Analysis;
use crate::config::Config;

pub use patterns::{CommitPattern, PatternSource};

/// Generate a single conventional-commit-formatted message.
pub fn generate(analysis: &Analysis, config: &Config) -> String {
    let candidates = patterns::collect_candidates(analysis, &config.rules);
    let winner = patterns::select_best(candidates);

    let scope = format::resolve_scope(&winner, analysis, &config.commit);
    let description =
        format::enhance_description(&winner.description, analysis, winner.source, &config.commit);

    if config.commit.conventional {
        format::format_conventional(&winner.kind, scope.as_deref(), &description)
    } else {
        description
    }
}
