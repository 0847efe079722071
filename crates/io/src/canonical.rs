// Product list file: one `"entry"` per line, UTF-8.
//
// `quote` / `unquote` are the only places that know about the quoting, so
// load and append agree on the format byte for byte.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use prodnorm_matcher::{CanonicalStore, MatchError};

use crate::error::IoError;

/// Wrap an entry for storage.
pub fn quote(entry: &str) -> String {
    format!("\"{entry}\"")
}

/// Parse one stored line: trim, then drop one pair of enclosing `"`.
/// A quote on one side only is part of the entry. Blank results are not entries.
pub fn unquote(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

/// Entries of a list file's content, first occurrence wins.
pub fn parse(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for entry in content.lines().filter_map(unquote) {
        if seen.insert(entry.clone()) {
            entries.push(entry);
        } else {
            log::debug!("dropping duplicate product list entry {entry:?}");
        }
    }
    entries
}

/// File content for `entries`, one quoted entry per line.
pub fn render(entries: &[String]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&quote(entry));
        out.push('\n');
    }
    out
}

/// Decode file bytes. BOM-marked files (UTF-8, UTF-16) are honoured; otherwise
/// UTF-8, falling back to Windows-1252 for legacy exports.
fn decode(bytes: Vec<u8>) -> String {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(&bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return decoded.into_owned();
    }
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("product list is not valid UTF-8; decoding as Windows-1252");
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// File-backed canonical product list.
#[derive(Debug, Clone)]
pub struct CanonicalListFile {
    path: PathBuf,
}

impl CanonicalListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries currently stored; a missing file reads as empty.
    pub fn read(&self) -> Result<Vec<String>, IoError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(parse(&decode(bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(IoError::ListRead { path: self.path.clone(), reason: e.to_string() }),
        }
    }

    /// Entries at run start. A missing file is created empty for future runs.
    pub fn load(&self) -> Result<Vec<String>, IoError> {
        if !self.path.exists() {
            log::warn!("{} not found; creating an empty product list", self.path.display());
            fs::write(&self.path, "")
                .map_err(|e| IoError::ListRead { path: self.path.clone(), reason: e.to_string() })?;
            return Ok(Vec::new());
        }
        self.read()
    }

    /// Add entries not already stored and rewrite the whole file.
    ///
    /// Stored order is kept; new entries follow in sorted order. Entries
    /// containing a line break cannot be stored one per line and are skipped.
    /// Not atomic and not locked: one writer per list file. Returns how many
    /// were added.
    pub fn append(&self, new_entries: &BTreeSet<String>) -> Result<usize, IoError> {
        let mut entries = self.read()?;
        let existing: HashSet<String> = entries.iter().cloned().collect();
        let before = entries.len();
        for entry in new_entries {
            if entry.contains(|c| c == '\r' || c == '\n') {
                log::warn!("not adding {entry:?} to {}: contains a line break", self.path.display());
            } else if !existing.contains(entry) {
                entries.push(entry.clone());
            }
        }

        fs::write(&self.path, render(&entries))
            .map_err(|e| IoError::ListWrite { path: self.path.clone(), reason: e.to_string() })?;
        log::debug!("rewrote {} with {} entries", self.path.display(), entries.len());
        Ok(entries.len() - before)
    }
}

impl CanonicalStore for CanonicalListFile {
    fn load(&mut self) -> Result<Vec<String>, MatchError> {
        Ok(CanonicalListFile::load(self)?)
    }

    fn append(&mut self, entries: &BTreeSet<String>) -> Result<(), MatchError> {
        CanonicalListFile::append(self, entries)?;
        Ok(())
    }
}
