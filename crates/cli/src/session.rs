// Interactive cleaning session.
//
// Phases run strictly in order: product list, input workbook, columns,
// output path, clean, write output, review unmatched values. Recoverable
// mistakes (missing files, bad numbers) are re-prompted where they happen;
// a workbook that cannot be opened or written ends the run.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use prodnorm_config::Settings;
use prodnorm_io::{xlsx, CanonicalListFile, IoError};
use prodnorm_matcher::{clean, review, CellChange, CleanStats, DecisionCache, MatchError, PolicyConfig};

use crate::columns::{describe_columns, parse_columns};
use crate::terminal::Terminal;
use crate::util::{col_to_letter, display_width, pad_right};

/// Widest "Original" column in the changes table.
const MAX_CHANGE_WIDTH: usize = 32;

#[derive(Debug)]
pub enum SessionError {
    /// Operator interaction or product list failure.
    Match(MatchError),
    /// Workbook or product list file failure.
    Io(IoError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<MatchError> for SessionError {
    fn from(e: MatchError) -> Self {
        Self::Match(e)
    }
}

impl From<IoError> for SessionError {
    fn from(e: IoError) -> Self {
        Self::Io(e)
    }
}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub output_path: PathBuf,
    pub product_list: PathBuf,
    pub stats: CleanStats,
    pub unmatched: usize,
    pub added: usize,
}

pub struct Session {
    settings: Settings,
    working_dir: PathBuf,
}

impl Session {
    pub fn new(settings: Settings, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            working_dir: working_dir.into(),
        }
    }

    pub fn policy(&self) -> PolicyConfig {
        PolicyConfig {
            auto_accept: self.settings.auto_accept_threshold,
            confirm: self.settings.confirm_threshold,
            candidate_limit: self.settings.candidate_limit,
        }
    }

    fn resolve_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    fn default_output_dir(&self) -> PathBuf {
        match &self.settings.output_directory {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.working_dir.join(dir),
            None => self.working_dir.clone(),
        }
    }

    /// Run one full session against `term`.
    pub fn run<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<SessionReport, SessionError> {
        let mut list_file = self.ask_product_list(term)?;
        let canonical = list_file.load()?;
        if canonical.is_empty() {
            log::warn!("product list {} is empty", list_file.path().display());
            term.say("Warning: product list is empty; every value will be offered for addition.");
        } else {
            term.say(&format!(
                "Loaded {} product names from {}",
                canonical.len(),
                list_file.path().display()
            ));
        }

        let input_path = self.ask_input_file(term)?;
        let columns = self.ask_columns(term)?;
        let output_path = self.ask_output_path(term)?;

        log::info!(
            "cleaning {} columns [{}] -> {}",
            input_path.display(),
            describe_columns(&columns),
            output_path.display()
        );
        let grid = xlsx::read_first_sheet(&input_path)?;

        let mut cache = DecisionCache::new();
        let out = clean(&grid, &columns, &canonical, &self.policy(), &mut cache, term)?;
        xlsx::write_grid(&out.grid, &output_path)?;

        term.say("");
        term.say("Processing complete:");
        term.say(&format!("Total cells processed: {}", out.stats.processed));
        term.say(&format!("Changes made: {}", out.stats.changed));
        if !out.changes.is_empty() {
            print_changes(term, &out.changes);
        }

        if !out.unmatched.is_empty() {
            term.say("");
            term.say("Unmatched items:");
            for item in &out.unmatched {
                term.say(&format!("- {item}"));
            }
        }

        let added = review(&out.unmatched, term, &mut list_file)?;
        if !added.is_empty() {
            term.say(&format!(
                "Updated product list saved to {}",
                list_file.path().display()
            ));
        }

        term.say("");
        term.say(&format!("Results saved to: {}", output_path.display()));

        Ok(SessionReport {
            output_path,
            product_list: list_file.path().to_path_buf(),
            stats: out.stats,
            unmatched: out.unmatched.len(),
            added: added.len(),
        })
    }

    fn ask_product_list<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<CanonicalListFile, MatchError> {
        let default_name = &self.settings.product_list_file;
        loop {
            let name = term.ask(&format!(
                "Enter the name of the product list file (press Enter for '{default_name}'): "
            ))?;
            let name = name.trim();
            if name.is_empty() {
                return Ok(CanonicalListFile::new(self.resolve_path(default_name)));
            }
            let path = self.resolve_path(name);
            if path.is_file() {
                return Ok(CanonicalListFile::new(path));
            }
            term.say(&format!("File '{}' not found. Please try again.", path.display()));
        }
    }

    fn ask_input_file<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<PathBuf, MatchError> {
        loop {
            let name =
                term.ask("Enter the name of the input Excel file (with .xlsx extension): ")?;
            let path = self.resolve_path(name.trim());
            if !name.trim().is_empty() && path.is_file() {
                return Ok(path);
            }
            term.say(&format!("File '{}' not found. Please try again.", path.display()));
        }
    }

    fn ask_columns<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<Vec<usize>, MatchError> {
        loop {
            let input = term.ask(
                "Enter the column indices to clean (comma-separated, e.g., 1,2 for columns A and B): ",
            )?;
            match parse_columns(&input) {
                Ok(columns) => {
                    term.say(&format!("Cleaning column(s): {}", describe_columns(&columns)));
                    return Ok(columns);
                }
                Err(e) => term.say(&e.to_string()),
            }
        }
    }

    fn ask_output_path<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<PathBuf, MatchError> {
        let default_dir = self.default_output_dir();
        let dir = loop {
            let input = term.ask(&format!(
                "Enter the output directory (or '0' to use '{}'): ",
                default_dir.display()
            ))?;
            let input = input.trim();
            let dir = if input == "0" || input.is_empty() {
                default_dir.clone()
            } else {
                self.resolve_path(input)
            };
            if dir.is_dir() {
                break dir;
            }
            term.say(&format!("Directory '{}' not found. Please try again.", dir.display()));
        };

        loop {
            let name = term.ask("Enter the output file name (without extension): ")?;
            let name = name.trim();
            let name = name.strip_suffix(".xlsx").unwrap_or(name);
            if !name.is_empty() {
                return Ok(dir.join(format!("{name}.xlsx")));
            }
            term.say("Output file name cannot be empty.");
        }
    }
}

fn print_changes<R: BufRead, W: Write>(term: &mut Terminal<R, W>, changes: &[CellChange]) {
    let width = changes
        .iter()
        .map(|c| display_width(c.from.trim()))
        .max()
        .unwrap_or(0)
        .clamp("Original".len(), MAX_CHANGE_WIDTH);

    term.say("");
    term.say(&format!("  {}  {}  Canonical", pad_right("Cell", 7), pad_right("Original", width)));
    for change in changes {
        let cell = format!("{}{}", col_to_letter(change.col), change.row);
        term.say(&format!(
            "  {}  {}  {}",
            pad_right(&cell, 7),
            pad_right(change.from.trim(), width),
            change.to
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use prodnorm_matcher::{Cell, Grid};
    use tempfile::tempdir;

    fn terminal(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(t: &Terminal<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(t.output().clone()).unwrap()
    }

    fn write_input(dir: &Path, values: &[&str]) {
        let mut rows = vec![vec![Cell::Text("Product".into()), Cell::Text("Qty".into())]];
        for (i, v) in values.iter().enumerate() {
            rows.push(vec![Cell::Text(v.to_string()), Cell::Number(i as f64 + 1.0)]);
        }
        xlsx::write_grid(&Grid::from_rows(rows), &dir.join("in.xlsx")).unwrap();
    }

    #[test]
    fn full_run_with_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("products.txt"), "\"Acme Widget\"\n\"Acme Gadget\"\n").unwrap();
        write_input(dir.path(), &["Acme Widgt", "Foo Bar Baz"]);

        // list (default), input, columns, dir, name, keep Foo, add Foo
        let mut t = terminal("\nin.xlsx\n1\n0\nout\n0\ny\n");
        let session = Session::new(Settings::default(), dir.path());
        let report = session.run(&mut t).unwrap();

        assert_eq!(report.stats, CleanStats { processed: 2, changed: 1 });
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.added, 1);
        assert_eq!(report.output_path, dir.path().join("out.xlsx"));

        let out = xlsx::read_first_sheet(&report.output_path).unwrap();
        assert_eq!(out.get(2, 1), &Cell::Text("Acme Widget".into()));
        assert_eq!(out.get(3, 1), &Cell::Text("Foo Bar Baz".into()));
        assert_eq!(out.get(2, 2), &Cell::Number(1.0));

        let list = fs::read_to_string(dir.path().join("products.txt")).unwrap();
        assert_eq!(list, "\"Acme Widget\"\n\"Acme Gadget\"\n\"Foo Bar Baz\"\n");

        let text = printed(&t);
        assert!(text.contains("Total cells processed: 2"));
        assert!(text.contains("Changes made: 1"));
        assert!(text.contains("- Foo Bar Baz"));
    }

    #[test]
    fn missing_files_and_bad_columns_are_reprompted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("list.txt"), "\"Acme Widget\"\n").unwrap();
        write_input(dir.path(), &["Acme Widget"]);

        let mut t = terminal("nope.txt\nlist.txt\nmissing.xlsx\nin.xlsx\n1;2\n0\nA\nno-such-dir\n0\n\nresult.xlsx\n");
        let session = Session::new(Settings::default(), dir.path());
        let report = session.run(&mut t).unwrap();

        let text = printed(&t);
        assert!(text.contains("nope.txt' not found. Please try again."));
        assert!(text.contains("missing.xlsx' not found. Please try again."));
        assert!(text.contains("Invalid input. Please enter valid integers or column letters."));
        assert!(text.contains("Column index must be at least 1."));
        assert!(text.contains("no-such-dir' not found. Please try again."));
        assert!(text.contains("Output file name cannot be empty."));
        assert_eq!(report.output_path, dir.path().join("result.xlsx"));
        assert_eq!(report.stats.changed, 0);
    }

    #[test]
    fn missing_default_list_is_created() {
        let dir = tempdir().unwrap();
        write_input(dir.path(), &["Foo"]);

        // nothing to rank against, so Foo is kept silently and then declined
        let mut t = terminal("\nin.xlsx\n1\n0\nout\nn\n");
        let session = Session::new(Settings::default(), dir.path());
        let report = session.run(&mut t).unwrap();

        assert!(dir.path().join("products.txt").exists());
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.added, 0);
        assert!(printed(&t).contains("Warning: product list is empty"));
    }

    #[test]
    fn corrupt_workbook_is_fatal_and_writes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("products.txt"), "\"Acme Widget\"\n").unwrap();
        fs::write(dir.path().join("bad.xlsx"), b"not a workbook").unwrap();

        let mut t = terminal("\nbad.xlsx\n1\n0\nout\n");
        let session = Session::new(Settings::default(), dir.path());
        let err = session.run(&mut t).unwrap_err();

        assert!(matches!(err, SessionError::Io(IoError::Open { .. })));
        assert!(!dir.path().join("out.xlsx").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("products.txt")).unwrap(),
            "\"Acme Widget\"\n"
        );
    }

    #[test]
    fn closed_input_aborts() {
        let dir = tempdir().unwrap();
        let mut t = terminal("");
        let session = Session::new(Settings::default(), dir.path());
        let err = session.run(&mut t).unwrap_err();
        assert!(matches!(err, SessionError::Match(MatchError::InputClosed)));
    }

    #[test]
    fn settings_drive_policy_and_defaults() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("cleaned");
        fs::create_dir(&out_dir).unwrap();
        fs::write(dir.path().join("bakery.txt"), "\"Acme Widget\"\n").unwrap();
        write_input(dir.path(), &["acme widgt"]);

        let settings = Settings {
            auto_accept_threshold: 0.70,
            product_list_file: "bakery.txt".into(),
            output_directory: Some(PathBuf::from("cleaned")),
            ..Settings::default()
        };
        // 0.727 clears the lowered auto-accept bar, so no Y/N is asked
        let mut t = terminal("\nin.xlsx\n1\n0\nout\n");
        let session = Session::new(settings, dir.path());
        let report = session.run(&mut t).unwrap();

        assert_eq!(report.output_path, out_dir.join("out.xlsx"));
        assert_eq!(report.stats.changed, 1);
        assert_eq!(report.product_list, dir.path().join("bakery.txt"));
    }
}
