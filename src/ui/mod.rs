//! Interactive review of the generated message.
//!
//! The prompt source is a trait so the accept/edit/quit loop can be
//! exercised in tests with scripted input instead of a terminal.

use std::io;

use dialoguer::{Input, Select};

use crate::analyzer::Analysis;

/// What the user picked at the review prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    Accept,
    Edit,
    Quit,
}

/// Final outcome of the review loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Commit(String),
    Abort,
}

/// Source of user decisions during review.
pub trait ReviewInput {
    fn choose(&mut self, message: &str) -> io::Result<ReviewChoice>;
    fn edit(&mut self, current: &str) -> io::Result<String>;
}

/// Production input backed by terminal prompts.
pub struct TerminalInput;

impl ReviewInput for TerminalInput {
    fn choose(&mut self, message: &str) -> io::Result<ReviewChoice> {
        let selection = Select::new()
            .with_prompt(format!("Commit message: {message}"))
            .items(&[
                "Commit with this message",
                "Edit the message",
                "Quit without committing",
            ])
            .default(0)
            .interact()
            .map_err(io::Error::other)?;

        Ok(match selection {
            0 => ReviewChoice::Accept,
            1 => ReviewChoice::Edit,
            _ => ReviewChoice::Quit,
        })
    }

    fn edit(&mut self, current: &str) -> io::Result<String> {
        Input::new()
            .with_prompt("Edit message")
            .with_initial_text(current)
            .interact_text()
            .map_err(io::Error::other)
    }
}

/// Print the change summary shown above the review prompt.
pub fn print_summary(analysis: &Analysis, message: &str) {
    println!("Branch:  {}", analysis.branch_name);
    println!("Changes: {}", analysis.summary);
    println!("Impact:  {}", analysis.impact);

    if !analysis.staged_files.is_empty() {
        println!("Staged files:");
        for file in analysis.staged_files.iter().take(10) {
            println!("  {file}");
        }
        if analysis.staged_files.len() > 10 {
            println!("  ... and {} more", analysis.staged_files.len() - 10);
        }
    }

    println!();
    println!("Message: {message}");
}

/// Run the accept/edit/quit loop until the user settles on a message or
/// walks away. Prompt failures (closed terminal, interrupt) abort rather
/// than committing.
pub fn review(message: &str, input: &mut dyn ReviewInput) -> ReviewOutcome {
    let mut current = message.to_string();

    loop {
        match input.choose(&current) {
            Ok(ReviewChoice::Accept) => return ReviewOutcome::Commit(current),
            Ok(ReviewChoice::Edit) => match input.edit(&current) {
                Ok(edited) if !edited.trim().is_empty() => current = edited.trim().to_string(),
                Ok(_) => {}
                Err(_) => return ReviewOutcome::Abort,
            },
            Ok(ReviewChoice::Quit) | Err(_) => return ReviewOutcome::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted {
        choices: VecDeque<ReviewChoice>,
        edits: VecDeque<String>,
    }

    impl Scripted {
        fn new(choices: &[ReviewChoice], edits: &[&str]) -> Self {
            Self {
                choices: choices.iter().copied().collect(),
                edits: edits.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl ReviewInput for Scripted {
        fn choose(&mut self, _message: &str) -> io::Result<ReviewChoice> {
            self.choices
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }

        fn edit(&mut self, _current: &str) -> io::Result<String> {
            self.edits
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[test]
    fn test_review_accept_returns_original_message() {
        let mut input = Scripted::new(&[ReviewChoice::Accept], &[]);
        let outcome = review("feat: add login", &mut input);
        assert_eq!(outcome, ReviewOutcome::Commit("feat: add login".to_string()));
    }

    #[test]
    fn test_review_edit_then_accept() {
        let mut input = Scripted::new(
            &[ReviewChoice::Edit, ReviewChoice::Accept],
            &["fix(auth): handle login timeout"],
        );
        let outcome = review("feat: update code", &mut input);
        assert_eq!(
            outcome,
            ReviewOutcome::Commit("fix(auth): handle login timeout".to_string())
        );
    }

    #[test]
    fn test_review_empty_edit_keeps_previous_message() {
        let mut input = Scripted::new(
            &[ReviewChoice::Edit, ReviewChoice::Accept],
            &["   "],
        );
        let outcome = review("feat: update code", &mut input);
        assert_eq!(outcome, ReviewOutcome::Commit("feat: update code".to_string()));
    }

    #[test]
    fn test_review_quit_aborts() {
        let mut input = Scripted::new(&[ReviewChoice::Quit], &[]);
        assert_eq!(review("feat: update code", &mut input), ReviewOutcome::Abort);
    }

    #[test]
    fn test_review_prompt_failure_aborts() {
        let mut input = Scripted::new(&[], &[]);
        assert_eq!(review("feat: update code", &mut input), ReviewOutcome::Abort);
    }
}
