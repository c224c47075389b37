//! Ratcliff/Obershelp ("gestalt") string similarity.
//!
//! `ratio = 2 * M / T`, where `M` is the total length of the matching blocks
//! found by repeatedly taking the longest common substring and recursing on
//! the unmatched text to its left and right, and `T` is the combined length.

/// Similarity of two strings in `[0, 1]`. Two empty strings score `1.0`.
///
/// The block search can depend on argument order when several longest blocks
/// tie, so the inputs are put in a canonical order first. This keeps
/// `similarity(a, b) == similarity(b, a)`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Case-insensitive variant used for title comparison.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    similarity(&a.to_lowercase(), &b.to_lowercase())
}

/// Sum of the sizes of all matching blocks.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`. Ties go to the
/// block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // curr[k] is the length of the common run ending at a[i], b[blo + k - 1].
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            curr[k] = if a[i] == b[j] { prev[k - 1] + 1 } else { 0 };
            if curr[k] > best_size {
                best_i = i + 1 - curr[k];
                best_j = j + 1 - curr[k];
                best_size = curr[k];
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}
