use std::collections::BTreeSet;

use crate::error::MatchError;
use crate::prompt::Prompter;
use crate::store::CanonicalStore;

/// Distinct trimmed values kept as original during the run. Sorted, so the
/// review order is deterministic.
pub type UnmatchedSet = BTreeSet<String>;

/// Offer each unmatched value once for inclusion in the canonical list.
///
/// Approved values are appended in a single write. Returns what was approved.
pub fn review<P, S>(
    unmatched: &UnmatchedSet,
    prompter: &mut P,
    store: &mut S,
) -> Result<BTreeSet<String>, MatchError>
where
    P: Prompter + ?Sized,
    S: CanonicalStore + ?Sized,
{
    let mut approved = BTreeSet::new();
    if unmatched.is_empty() {
        return Ok(approved);
    }

    prompter.note("Processing unmatched items:");
    for item in unmatched {
        if prompter.confirm(&format!("Add \"{item}\" to product list?"))? {
            prompter.note(&format!("Added \"{item}\" to product list"));
            approved.insert(item.clone());
        }
    }

    if !approved.is_empty() {
        store.append(&approved)?;
        log::info!("appended {} new product name(s)", approved.len());
    }
    Ok(approved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Answer, ScriptedPrompter};
    use crate::store::MemoryStore;

    fn set(items: &[&str]) -> UnmatchedSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_set_is_a_no_op() {
        let mut p = ScriptedPrompter::new([]);
        let mut store = MemoryStore::new(["a"]);
        let approved = review(&UnmatchedSet::new(), &mut p, &mut store).unwrap();
        assert!(approved.is_empty());
        assert!(p.notes.is_empty());
        assert_eq!(store.appends, 0);
    }

    #[test]
    fn asks_in_sorted_order() {
        let mut p = ScriptedPrompter::new([Answer::No, Answer::No]);
        let mut store = MemoryStore::default();
        review(&set(&["zeta", "alpha"]), &mut p, &mut store).unwrap();
        assert_eq!(
            p.questions,
            vec!["Add \"alpha\" to product list?", "Add \"zeta\" to product list?"]
        );
    }

    #[test]
    fn appends_only_approved_once() {
        let mut p = ScriptedPrompter::new([Answer::Yes, Answer::No, Answer::Yes]);
        let mut store = MemoryStore::new(["existing"]);
        let approved = review(&set(&["a", "b", "c"]), &mut p, &mut store).unwrap();
        assert_eq!(approved, set(&["a", "c"]));
        assert_eq!(store.appends, 1);
        assert_eq!(store.entries, vec!["existing", "a", "c"]);
    }

    #[test]
    fn all_declined_writes_nothing() {
        let mut p = ScriptedPrompter::new([Answer::No]);
        let mut store = MemoryStore::default();
        review(&set(&["a"]), &mut p, &mut store).unwrap();
        assert_eq!(store.appends, 0);
    }
}
