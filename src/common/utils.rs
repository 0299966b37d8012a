//! This file provides some common functions
//! on probability vectors.


/// Returns the index of the smallest entry.
/// Ties go to the lowest index.
/// Returns `0` for an empty slice.
#[inline(always)]
pub fn min_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < values[best] { best = i; }
    }
    best
}


/// Returns the index of the largest entry.
/// Ties go to the lowest index.
/// Returns `0` for an empty slice.
#[inline(always)]
pub fn max_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] { best = i; }
    }
    best
}


/// Normalize `items` so that `sum(items) == 1`.
/// A zero vector is left untouched.
#[inline(always)]
pub fn normalize(items: &mut [f64]) {
    let z = items.iter().sum::<f64>();
    if z <= 0f64 { return; }

    items.iter_mut()
        .for_each(|item| { *item /= z; });
}


/// Adds `src` to `acc` entrywise.
#[inline(always)]
pub(crate) fn accumulate(acc: &mut [f64], src: &[f64]) {
    acc.iter_mut()
        .zip(src)
        .for_each(|(a, s)| { *a += *s; });
}
