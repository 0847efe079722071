/// Normalized Levenshtein similarity in `[0, 1]`.
///
/// `1 - distance / max(len(a), len(b))`, with lengths counted in chars so CJK
/// product names score the same as Latin ones. Two empty strings score 0.0, not
/// 1.0: an empty cell must never look like a perfect match.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let distance = strsim::levenshtein(a, b);
    1.0 - distance as f64 / max_len as f64
}
