use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The operator's input stream ended before a question was answered.
    InputClosed,
    /// The prompt provider failed (terminal write error, exhausted script, etc.).
    Prompt(String),
    /// The canonical list store could not be read or rewritten.
    Store(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputClosed => write!(f, "input closed before the question was answered"),
            Self::Prompt(msg) => write!(f, "prompt error: {msg}"),
            Self::Store(msg) => write!(f, "product list error: {msg}"),
        }
    }
}

impl std::error::Error for MatchError {}
