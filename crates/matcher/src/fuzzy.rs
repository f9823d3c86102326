//! Gestalt (Ratcliff/Obershelp) string similarity.
//!
//! The ratio is `2*M / T`, where `M` is the total length of matching blocks
//! found by recursively taking the longest common substring and descending
//! into the unmatched pieces on either side, and `T` is the combined length
//! of both inputs. Two empty strings score 1.0.

use std::collections::HashMap;

/// Similarity ratio between two strings, in [0.0, 1.0].
///
/// Operates on Unicode scalar values. The block decomposition is
/// directional, so `ratio(a, b)` and `ratio(b, a)` may differ slightly;
/// callers should keep the query side as `a`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut matches = 0usize;
    let mut regions = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((alo, ahi, blo, bhi)) = regions.pop() {
        let (i, j, size) = longest_match(&a, &b2j, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matches += size;
        if alo < i && blo < j {
            regions.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            regions.push((i + size, ahi, j + size, bhi));
        }
    }

    2.0 * matches as f64 / total as f64
}

/// Longest matching block of `a[alo..ahi]` within `b[blo..bhi]`.
///
/// Returns `(i, j, size)` with the leftmost-in-`a` (then leftmost-in-`b`)
/// block among the longest, which keeps the decomposition deterministic.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0usize;

    // j2len[j] = length of the run of matches ending at b[j] for the
    // current row of a.
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, &ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_j2len = HashMap::new();
        if let Some(positions) = b2j.get(&ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let run = match j.checked_sub(1) {
                    Some(prev) => j2len.get(&prev).copied().unwrap_or(0) + 1,
                    None => 1,
                };
                next_j2len.insert(j, run);
                if run > best_size {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_size = run;
                }
            }
        }
        j2len = next_j2len;
    }

    (best_i, best_j, best_size)
}
