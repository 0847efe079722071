use crate::similarity::similarity;

/// A canonical name scored against one query. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub similarity: f64,
}

/// Score `query` against every canonical entry and keep the best `limit`.
///
/// Sorted by descending similarity. The sort is stable, so entries with equal
/// scores keep their canonical-list order.
pub fn rank(query: &str, canonical: &[String], limit: usize) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = canonical
        .iter()
        .map(|name| Candidate {
            name: name.clone(),
            similarity: similarity(query, name),
        })
        .collect();

    candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    candidates.truncate(limit);
    candidates
}
