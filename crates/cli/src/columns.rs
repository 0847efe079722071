// Column selection: "1,3", "A, C" or a mix, 1-indexed.

use std::fmt;

use crate::util::{col_to_letter, letter_to_col};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    /// A number below 1 was given.
    BelowOne,
    /// A token that is neither a number nor column letters.
    Invalid(String),
}

impl fmt::Display for ColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowOne => write!(f, "Column index must be at least 1."),
            Self::Invalid(_) => {
                write!(f, "Invalid input. Please enter valid integers or column letters.")
            }
        }
    }
}

impl std::error::Error for ColumnError {}

/// Parse a comma-separated column list. Order is kept; duplicates dropped.
pub fn parse_columns(input: &str) -> Result<Vec<usize>, ColumnError> {
    let mut columns = Vec::new();
    for token in input.split(',').map(str::trim) {
        let col = if let Ok(n) = token.parse::<i64>() {
            if n < 1 {
                return Err(ColumnError::BelowOne);
            }
            usize::try_from(n).map_err(|_| ColumnError::Invalid(token.to_string()))?
        } else {
            letter_to_col(token).ok_or_else(|| ColumnError::Invalid(token.to_string()))?
        };
        if !columns.contains(&col) {
            columns.push(col);
        }
    }
    Ok(columns)
}

/// Human label for a column list, e.g. "1 (A), 3 (C)".
pub fn describe_columns(columns: &[usize]) -> String {
    columns
        .iter()
        .map(|&c| format!("{} ({})", c, col_to_letter(c)))
        .collect::<Vec<_>>()
        .join(", ")
}
