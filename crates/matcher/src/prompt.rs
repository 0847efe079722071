// Operator interaction seam.
//
// The policy and the unmatched-item review only ever ask two kinds of
// question: yes/no and "pick a number in 0..=max". Implementations own
// validation; callers never see an out-of-range answer.

use std::collections::VecDeque;

use crate::error::MatchError;

pub trait Prompter {
    /// Ask a yes/no question. Re-asks (or fails) until a valid answer exists.
    fn confirm(&mut self, question: &str) -> Result<bool, MatchError>;

    /// Ask for an integer in `0..=max`.
    fn choose(&mut self, question: &str, max: usize) -> Result<usize, MatchError>;

    /// Informational line for the operator. Not a question.
    fn note(&mut self, message: &str);
}

/// A scripted answer for [`ScriptedPrompter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Choice(usize),
}

/// Deterministic prompter for tests and non-interactive runs.
///
/// Answers are consumed in order. Every question and note is recorded so
/// callers can assert on exactly what the operator would have seen.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub questions: Vec<String>,
    pub notes: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            questions: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, question: &str) -> Result<Answer, MatchError> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| MatchError::Prompt(format!("no scripted answer for: {question}")))
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool, MatchError> {
        match self.next_answer(question)? {
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            Answer::Choice(n) => Err(MatchError::Prompt(format!(
                "expected Y/N for '{question}', script has choice {n}"
            ))),
        }
    }

    fn choose(&mut self, question: &str, max: usize) -> Result<usize, MatchError> {
        match self.next_answer(question)? {
            Answer::Choice(n) if n <= max => Ok(n),
            Answer::Choice(n) => Err(MatchError::Prompt(format!(
                "scripted choice {n} out of range 0-{max}"
            ))),
            other => Err(MatchError::Prompt(format!(
                "expected a number for '{question}', script has {other:?}"
            ))),
        }
    }

    fn note(&mut self, message: &str) {
        self.notes.push(message.to_string());
    }
}
