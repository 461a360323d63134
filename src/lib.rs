//! lazycommit - heuristic conventional-commit messages for staged changes.
//!
//! # Overview
//!
//! lazycommit inspects the working tree (branch name, staged files, diff
//! content, change statistics), turns the findings into a structured
//! analysis, and runs a weighted rule engine over it to produce a
//! conventional-commit message. An optional AI backend can rewrite the
//! message; the rule-based result is always kept as the fallback.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod llm;
pub mod rules;
pub mod snapshot;
pub mod ui;

// Re-export commonly used types
pub use analyzer::{Analysis, ChangeContext, FileTypes, ImpactLevel, analyze};
pub use config::{AiProvider, Config, ScopeStyle};
pub use error::{ConfigError, EnhanceError, SnapshotError};
pub use rules::{CommitPattern, PatternSource, generate};
pub use snapshot::{ChangeStats, CommitSummary, RepoSnapshot};
