// prodnorm CLI library: terminal prompting and the interactive session.
// The binary in main.rs only wires these to stdin/stdout.

pub mod columns;
pub mod session;
pub mod terminal;
mod util;
