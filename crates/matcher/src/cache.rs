use std::collections::HashMap;

use crate::error::MatchError;
use crate::policy::{resolve, PolicyConfig, Resolution};
use crate::prompt::Prompter;

/// Per-run memo of resolutions, keyed by the raw (untrimmed) cell string.
///
/// Once a raw string has a decision the policy is never consulted for it
/// again during the run. Not persisted.
#[derive(Debug, Default)]
pub struct DecisionCache {
    decisions: HashMap<String, Resolution>,
}

impl DecisionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, raw: &str) -> Option<&Resolution> {
        self.decisions.get(raw)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Cached resolution for `raw`, or resolve it now and remember the answer.
    pub fn get_or_resolve<P: Prompter + ?Sized>(
        &mut self,
        raw: &str,
        canonical: &[String],
        config: &PolicyConfig,
        prompter: &mut P,
    ) -> Result<Resolution, MatchError> {
        if let Some(resolution) = self.decisions.get(raw) {
            log::debug!("decision cache hit for {raw:?}");
            return Ok(resolution.clone());
        }

        let resolution = resolve(raw, canonical, config, prompter)?;
        self.decisions.insert(raw.to_string(), resolution.clone());
        Ok(resolution)
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
    fn second_lookup_does_not_prompt() {
        let mut cache = DecisionCache::new();
        let mut p = ScriptedPrompter::new([Answer::Yes]);
        let config = PolicyConfig::default();

        let first = cache.get_or_resolve("acme widgt", &canonical(), &config, &mut p).unwrap();
        let second = cache.get_or_resolve("acme widgt", &canonical(), &config, &mut p).unwrap();

        assert_eq!(first, second);
        assert_eq!(p.questions.len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keep_original_is_cached_too() {
        let mut cache = DecisionCache::new();
        let mut p = ScriptedPrompter::new([Answer::Choice(0)]);
        let config = PolicyConfig::default();

        cache.get_or_resolve("Foo Bar Baz", &canonical(), &config, &mut p).unwrap();
        let again = cache.get_or_resolve("Foo Bar Baz", &canonical(), &config, &mut p).unwrap();

        assert_eq!(again, Resolution::KeepOriginal);
        assert_eq!(p.questions.len(), 1);
    }

    #[test]
    fn whitespace_variants_are_distinct_keys() {
        let mut cache = DecisionCache::new();
        let mut p = ScriptedPrompter::new([Answer::Yes, Answer::Yes]);
        let config = PolicyConfig::default();

        cache.get_or_resolve("acme widgt", &canonical(), &config, &mut p).unwrap();
        cache.get_or_resolve(" acme widgt", &canonical(), &config, &mut p).unwrap();

        assert_eq!(p.questions.len(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_resolution_is_not_cached() {
        let mut cache = DecisionCache::new();
        let mut p = ScriptedPrompter::new([]);
        let config = PolicyConfig::default();

        assert!(cache.get_or_resolve("acme widgt", &canonical(), &config, &mut p).is_err());
        assert!(cache.get("acme widgt").is_none());
    }
}
