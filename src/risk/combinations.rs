//! Enumeration of size-`k` feature subsets as boolean masks.
//!
//! # Enumeration order
//!
//! The mask starts with the `k` set bits packed at the low indices
//! (`[1]*k ++ [0]*(n-k)`, the lexicographically largest arrangement of the
//! bit multiset) and each [`advance`](Combinations::advance) steps to the
//! previous lexicographic permutation until none exists. Exactly `C(n, k)`
//! distinct masks are produced.
//!
//! Callers must not rely on the order for anything semantic; it is fixed only
//! so that runs are reproducible. The enumerator is restartable from scratch
//! only: construct a new one to re-enumerate.
//!
//! # Edge cases
//!
//! `k = 0` yields a single all-false mask; `k = n` a single all-true mask.
//! Both are exhausted after the first `advance`.

/// In-place enumerator over all length-`n` masks with exactly `k` true bits.
///
/// The current mask is read through [`mask`](Self::mask) and mutated in place
/// by [`advance`](Self::advance); no per-step allocation.
#[derive(Clone, Debug)]
pub struct Combinations {
    mask: Vec<bool>,
}

impl Combinations {
    /// Start enumerating size-`k` subsets of a universe of size `n`.
    ///
    /// # Panics
    ///
    /// Panics if `k > n`.
    pub fn new(n: usize, k: usize) -> Self {
        assert!(k <= n, "subset size {} exceeds universe size {}", k, n);
        let mut mask = vec![true; k];
        mask.resize(n, false);
        Self { mask }
    }

    /// The current combination mask.
    #[inline]
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Step to the next combination.
    ///
    /// Returns `false` once the current mask is the last one; the mask is
    /// left unchanged in that case.
    pub fn advance(&mut self) -> bool {
        prev_permutation(&mut self.mask)
    }
}

/// Rearrange `bits` into its previous lexicographic permutation.
///
/// Returns `false` (leaving `bits` unchanged) when `bits` is already the
/// smallest arrangement, i.e. non-decreasing.
fn prev_permutation(bits: &mut [bool]) -> bool {
    if bits.len() < 2 {
        return false;
    }

    // Rightmost descent: largest i with bits[i - 1] > bits[i].
    let mut i = bits.len() - 1;
    loop {
        if bits[i - 1] && !bits[i] {
            break;
        }
        if i == 1 {
            return false;
        }
        i -= 1;
    }

    // The suffix bits[i..] is non-decreasing, so the rightmost false bit is
    // the largest j with bits[j] < bits[i - 1].
    let mut j = bits.len() - 1;
    while bits[j] {
        j -= 1;
    }

    bits.swap(i - 1, j);
    bits[i..].reverse();
    true
}
