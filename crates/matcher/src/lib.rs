//! `prodnorm-matcher`: product name normalization engine.
//!
//! Pure engine crate: receives a cell grid and a canonical product list, returns
//! the cleaned grid. Operator interaction goes through [`Prompter`] and
//! persistence through [`CanonicalStore`]; no terminal or file IO here.

pub mod cache;
pub mod clean;
pub mod error;
pub mod grid;
pub mod policy;
pub mod prompt;
pub mod rank;
pub mod similarity;
pub mod store;
pub mod unmatched;

pub use cache::DecisionCache;
pub use clean::{clean, CellChange, CleanOutput, CleanStats};
pub use error::MatchError;
pub use grid::{Cell, Grid};
pub use policy::{resolve, PolicyConfig, Resolution, Tier};
pub use prompt::{Answer, Prompter, ScriptedPrompter};
pub use rank::{rank, Candidate};
pub use similarity::similarity;
pub use store::{CanonicalStore, MemoryStore};
pub use unmatched::{review, UnmatchedSet};
