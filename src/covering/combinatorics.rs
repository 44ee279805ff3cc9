//! Subset enumeration helpers.

/// Number of `r`-subsets of an `n`-set.
///
/// Saturates at `u64::MAX` instead of overflowing.
pub fn binomial(n: usize, r: usize) -> u64 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    let mut acc: u128 = 1;
    for i in 0..r {
        // exact: acc * (n - i) is divisible by (i + 1)
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    acc as u64
}

/// All `r`-subsets of `{0, .., n-1}`, each sorted ascending, in
/// lexicographic order.
///
/// `r == 0` yields a single empty subset; `r > n` yields none.
pub fn combinations(n: usize, r: usize) -> Vec<Vec<usize>> {
    if r > n {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(binomial(n, r).min(1 << 20) as usize);
    let mut current: Vec<usize> = (0..r).collect();
    loop {
        out.push(current.clone());

        // Rightmost position that can still move right
        let Some(pos) = (0..r).rev().find(|&i| current[i] < n - r + i) else {
            break;
        };
        current[pos] += 1;
        for i in pos + 1..r {
            current[i] = current[i - 1] + 1;
        }
    }
    out
}

/// Whether every element of `subset` occurs in `superset`.
///
/// Both sequences must be sorted ascending. Runs a single merge-style
/// scan; returns `false` as soon as `superset` is exhausted.
pub fn is_sorted_subset<T: Ord>(subset: &[T], superset: &[T]) -> bool {
    let mut i = 0;
    for a in subset {
        while i < superset.len() && superset[i] < *a {
            i += 1;
        }
        if i == superset.len() || superset[i] != *a {
            return false;
        }
    }
    true
}
