use crate::cache::DecisionCache;
use crate::error::MatchError;
use crate::grid::{Cell, Grid};
use crate::policy::{PolicyConfig, Resolution};
use crate::prompt::Prompter;
use crate::unmatched::UnmatchedSet;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// String-valued cells visited in the selected columns (header excluded).
    pub processed: usize,
    /// Output cells overwritten with a canonical name.
    pub changed: usize,
}

/// One overwritten cell, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub grid: Grid,
    pub stats: CleanStats,
    pub unmatched: UnmatchedSet,
    pub changes: Vec<CellChange>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Join the lines of a multi-line cell (Alt+Enter) with single spaces.
/// Product list entries are one per line, so none may contain a break.
fn single_line(value: &str) -> String {
    if !value.contains(|c| c == '\r' || c == '\n') {
        return value.to_string();
    }
    value
        .split(|c| c == '\r' || c == '\n')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve every string cell of the selected columns against the canonical list.
///
/// The output starts as a copy of `input`; row 1 (header) and unselected
/// columns are never touched. Columns are walked in the order given, each
/// top to bottom, with repeated raw values answered from `cache`.
pub fn clean<P: Prompter + ?Sized>(
    input: &Grid,
    columns: &[usize],
    canonical: &[String],
    config: &PolicyConfig,
    cache: &mut DecisionCache,
    prompter: &mut P,
) -> Result<CleanOutput, MatchError> {
    let mut grid = input.clone();
    let mut stats = CleanStats::default();
    let mut unmatched = UnmatchedSet::new();
    let mut changes = Vec::new();

    let mut seen = Vec::with_capacity(columns.len());
    for &col in columns {
        if col == 0 || seen.contains(&col) {
            continue;
        }
        seen.push(col);

        for row in 2..=input.rows() {
            let Cell::Text(raw) = input.get(row, col) else {
                continue;
            };
            stats.processed += 1;
            let trimmed = raw.trim();
            prompter.note(&format!("Processing row {row}, column {col}: {trimmed}"));

            let cached = cache.get(raw).is_some();
            let resolution = cache.get_or_resolve(raw, canonical, config, prompter)?;

            match resolution {
                Resolution::ResolvedTo(name) => {
                    if name != *raw {
                        grid.set(row, col, Cell::Text(name.clone()));
                        stats.changed += 1;
                        let verb = if cached { "Applied confirmed match" } else { "Changed to" };
                        prompter.note(&format!("{verb}: {name}"));
                        changes.push(CellChange { row, col, from: raw.clone(), to: name });
                    }
                }
                Resolution::KeepOriginal => {
                    if !trimmed.is_empty() {
                        unmatched.insert(single_line(trimmed));
                    }
                    prompter.note(if cached {
                        "Applied previous decision: keeping original value"
                    } else {
                        "Keeping original value"
                    });
                }
            }
        }
    }

    log::info!(
        "cleaned {} cell(s) in {} column(s): {} changed, {} unmatched",
        stats.processed,
        seen.len(),
        stats.changed,
        unmatched.len()
    );

    Ok(CleanOutput { grid, stats, unmatched, changes })
}
