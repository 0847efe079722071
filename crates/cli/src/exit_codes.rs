//! CLI Exit Code Registry
//!
//! Every way `prodnorm` can end maps to exactly one code here. Scripts that
//! drive the tool through piped input rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Session completed, output workbook written           |
//! | 1    | General error (product list unreadable or unwritable)|
//! | 2    | Usage error (bad command-line arguments, from clap)  |
//! | 3    | Input closed or Ctrl-C before the session finished   |
//! | 4    | Input workbook unreadable or output unwritable       |

/// Success - session completed and results saved.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - anything without a more specific code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - clap rejects the arguments with this code on its own.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

/// Standard input reached end-of-file, or the operator pressed Ctrl-C.
pub const EXIT_INPUT_CLOSED: u8 = 3;

/// The input workbook could not be opened or the output could not be written.
pub const EXIT_WORKBOOK: u8 = 4;
