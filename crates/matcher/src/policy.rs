use crate::error::MatchError;
use crate::prompt::Prompter;
use crate::rank::{rank, Candidate};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds and candidate count for the three-tier policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyConfig {
    /// Best score at or above this is applied without asking.
    pub auto_accept: f64,
    /// Best score at or above this (and below `auto_accept`) is offered for Y/N.
    pub confirm: f64,
    /// Candidates shown in the manual-select list.
    pub candidate_limit: usize,
}

impl PolicyConfig {
    pub const DEFAULT_AUTO_ACCEPT: f64 = 0.85;
    pub const DEFAULT_CONFIRM: f64 = 0.60;
    pub const DEFAULT_CANDIDATE_LIMIT: usize = 5;
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            auto_accept: Self::DEFAULT_AUTO_ACCEPT,
            confirm: Self::DEFAULT_CONFIRM,
            candidate_limit: Self::DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

/// Confidence band of the best candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    AutoAccept,
    Confirm,
    ManualSelect,
}

impl Tier {
    pub fn classify(similarity: f64, config: &PolicyConfig) -> Self {
        if similarity >= config.auto_accept {
            Tier::AutoAccept
        } else if similarity >= config.confirm {
            Tier::Confirm
        } else {
            Tier::ManualSelect
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AutoAccept => write!(f, "auto_accept"),
            Self::Confirm => write!(f, "confirm"),
            Self::ManualSelect => write!(f, "manual_select"),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of resolving one distinct input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    ResolvedTo(String),
    KeepOriginal,
}

fn percent(similarity: f64) -> String {
    format!("{:.1}%", similarity * 100.0)
}

/// Resolve one raw cell value against the canonical list.
///
/// Auto-accepts, asks for confirmation, or falls back to a numbered candidate
/// list depending on the best score. A value that is blank after trimming is
/// kept without scoring anything.
pub fn resolve<P: Prompter + ?Sized>(
    query: &str,
    canonical: &[String],
    config: &PolicyConfig,
    prompter: &mut P,
) -> Result<Resolution, MatchError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Resolution::KeepOriginal);
    }

    let candidates = rank(query, canonical, config.candidate_limit);
    let Some(best) = candidates.first() else {
        log::debug!("no canonical entries to rank '{query}' against");
        return Ok(Resolution::KeepOriginal);
    };

    let tier = Tier::classify(best.similarity, config);
    log::debug!(
        "'{}' best '{}' at {} ({tier})",
        query,
        best.name,
        percent(best.similarity)
    );

    match tier {
        Tier::AutoAccept => {
            prompter.note(&format!("Match found: {query} -> {}", best.name));
            return Ok(Resolution::ResolvedTo(best.name.clone()));
        }
        Tier::Confirm => {
            prompter.note(&format!("Original product name: {query}"));
            prompter.note(&format!("Suggested change to: {}", best.name));
            prompter.note(&format!("Similarity: {}", percent(best.similarity)));
            if prompter.confirm("Accept this change?")? {
                return Ok(Resolution::ResolvedTo(best.name.clone()));
            }
        }
        Tier::ManualSelect => {}
    }

    select_from_list(query, &candidates, prompter)
}

fn select_from_list<P: Prompter + ?Sized>(
    query: &str,
    candidates: &[Candidate],
    prompter: &mut P,
) -> Result<Resolution, MatchError> {
    prompter.note(&format!("Original product name: '{query}'"));
    prompter.note("Please select the correct product name from the following options:");
    prompter.note("0. Keep original value (no change)");
    for (i, candidate) in candidates.iter().enumerate() {
        prompter.note(&format!(
            "{}. {} (Similarity: {})",
            i + 1,
            candidate.name,
            percent(candidate.similarity)
        ));
    }

    let choice = prompter.choose("Please select the correct product number", candidates.len())?;
    match choice.checked_sub(1).and_then(|i| candidates.get(i)) {
        Some(candidate) => {
            prompter.note(&format!("Selected: {}", candidate.name));
            Ok(Resolution::ResolvedTo(candidate.name.clone()))
        }
        None => {
            prompter.note(&format!("Keeping original value: {query}"));
            Ok(Resolution::KeepOriginal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Answer, ScriptedPrompter};

    fn canonical() -> Vec<String> {
        vec!["Acme Widget".to_string(), "Acme Gadget".to_string()]
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        let config = PolicyConfig::default();
        assert_eq!(Tier::classify(0.85, &config), Tier::AutoAccept);
        assert_eq!(Tier::classify(0.8499, &config), Tier::Confirm);
        assert_eq!(Tier::classify(0.60, &config), Tier::Confirm);
        assert_eq!(Tier::classify(0.5999, &config), Tier::ManualSelect);
    }

    #[test]
    fn auto_accept_asks_nothing() {
        let mut p = ScriptedPrompter::new([]);
        let r = resolve("Acme Widgt", &canonical(), &PolicyConfig::default(), &mut p).unwrap();
        assert_eq!(r, Resolution::ResolvedTo("Acme Widget".into()));
        assert!(p.questions.is_empty());
        assert_eq!(p.notes, vec!["Match found: Acme Widgt -> Acme Widget"]);
    }

    #[test]
    fn confirm_yes_accepts_best() {
        let mut p = ScriptedPrompter::new([Answer::Yes]);
        let r = resolve("acme widgt", &canonical(), &PolicyConfig::default(), &mut p).unwrap();
        assert_eq!(r, Resolution::ResolvedTo("Acme Widget".into()));
        assert_eq!(p.questions, vec!["Accept this change?"]);
        assert!(p.notes.contains(&"Similarity: 72.7%".to_string()));
    }

    #[test]
    fn confirm_no_falls_through_to_list() {
        let mut p = ScriptedPrompter::new([Answer::No, Answer::Choice(2)]);
        let r = resolve("acme widgt", &canonical(), &PolicyConfig::default(), &mut p).unwrap();
        assert_eq!(r, Resolution::ResolvedTo("Acme Gadget".into()));
        assert_eq!(p.questions.len(), 2);
        assert!(p.notes.contains(&"0. Keep original value (no change)".to_string()));
        assert!(p.notes.contains(&"Selected: Acme Gadget".to_string()));
    }

    #[test]
    fn manual_select_zero_keeps_original() {
        let mut p = ScriptedPrompter::new([Answer::Choice(0)]);
        let r = resolve("Foo Bar Baz", &canonical(), &PolicyConfig::default(), &mut p).unwrap();
        assert_eq!(r, Resolution::KeepOriginal);
        assert_eq!(p.questions, vec!["Please select the correct product number"]);
        assert!(p.notes.contains(&"Keeping original value: Foo Bar Baz".to_string()));
    }

    #[test]
    fn manual_select_lists_every_candidate() {
        let mut p = ScriptedPrompter::new([Answer::Choice(1)]);
        resolve("Foo Bar Baz", &canonical(), &PolicyConfig::default(), &mut p).unwrap();
        let numbered: Vec<&String> = p
            .notes
            .iter()
            .filter(|n| n.starts_with("1. ") || n.starts_with("2. "))
            .collect();
        assert_eq!(numbered.len(), 2);
    }

    #[test]
    fn blank_after_trim_is_kept_without_ranking() {
        let mut p = ScriptedPrompter::new([]);
        let r = resolve("   ", &canonical(), &PolicyConfig::default(), &mut p).unwrap();
        assert_eq!(r, Resolution::KeepOriginal);
        assert!(p.notes.is_empty());
    }

    #[test]
    fn empty_canonical_list_keeps_original() {
        let mut p = ScriptedPrompter::new([]);
        let r = resolve("Acme", &[], &PolicyConfig::default(), &mut p).unwrap();
        assert_eq!(r, Resolution::KeepOriginal);
        assert!(p.questions.is_empty());
    }

    #[test]
    fn query_is_trimmed_before_scoring() {
        let mut p = ScriptedPrompter::new([]);
        let r = resolve("  Acme Widget  ", &canonical(), &PolicyConfig::default(), &mut p).unwrap();
        assert_eq!(r, Resolution::ResolvedTo("Acme Widget".into()));
    }

    #[test]
    fn custom_thresholds() {
        let config = PolicyConfig { auto_accept: 0.70, confirm: 0.50, candidate_limit: 1 };
        let mut p = ScriptedPrompter::new([]);
        let r = resolve("acme widgt", &canonical(), &config, &mut p).unwrap();
        assert_eq!(r, Resolution::ResolvedTo("Acme Widget".into()));
    }
}
