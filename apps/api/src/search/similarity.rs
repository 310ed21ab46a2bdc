//! Edit-distance fallback for near-miss dataset names.

use crate::models::dataset::Dataset;

/// Levenshtein distance over Unicode scalar values, unit costs.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP matrix.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// The candidate whose name is closest to `query`. Ties keep the earliest
/// candidate; nameless records are never chosen.
pub fn closest_match<'a>(candidates: &'a [Dataset], query: &str) -> Option<&'a Dataset> {
    candidates
        .iter()
        .filter_map(|d| d.name().map(|name| (d, edit_distance(name, query))))
        .min_by_key(|(_, distance)| *distance)
        .map(|(d, _)| d)
}
