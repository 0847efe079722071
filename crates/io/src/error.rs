use std::fmt;
use std::path::PathBuf;

use prodnorm_matcher::MatchError;

#[derive(Debug)]
pub enum IoError {
    /// Workbook path does not exist.
    NotFound(PathBuf),
    /// Workbook exists but could not be opened or parsed.
    Open { path: PathBuf, reason: String },
    /// Workbook has no worksheets.
    NoSheets(PathBuf),
    /// Output workbook could not be built or saved.
    Write { path: PathBuf, reason: String },
    /// Product list file could not be read (or created).
    ListRead { path: PathBuf, reason: String },
    /// Product list file could not be rewritten.
    ListWrite { path: PathBuf, reason: String },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file '{}' not found", path.display()),
            Self::Open { path, reason } => {
                write!(f, "cannot open workbook '{}': {reason}", path.display())
            }
            Self::NoSheets(path) => write!(f, "workbook '{}' contains no sheets", path.display()),
            Self::Write { path, reason } => {
                write!(f, "cannot write workbook '{}': {reason}", path.display())
            }
            Self::ListRead { path, reason } => {
                write!(f, "cannot read product list '{}': {reason}", path.display())
            }
            Self::ListWrite { path, reason } => {
                write!(f, "cannot write product list '{}': {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for IoError {}

impl From<IoError> for MatchError {
    fn from(err: IoError) -> Self {
        MatchError::Store(err.to_string())
    }
}
