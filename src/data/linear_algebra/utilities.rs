//! Helper algorithms for the `linear_algebra` module.
//!
//! The sparse kernels all walk two index-sorted tuple slices in lockstep, like a sorted-merge
//! join, and run in `O(n + m)`.
use std::collections::HashSet;

use itertools::{EitherOrBoth, Itertools};

use crate::data::linear_algebra::SparseTuple;
use crate::data::number_types::traits::Scalar;

/// Compute `left + scale * right` on two sorted sparse slices.
///
/// Entries whose resulting value is zero (according to `NonZero`) are not emitted. The result is
/// allocated with room for the worst case (`left.len() + right.len()`) and is not shrunk.
pub(crate) fn merge_add<F: Scalar>(
    left: &[SparseTuple<F>],
    right: &[SparseTuple<F>],
    scale: Option<F>,
) -> Vec<SparseTuple<F>> {
    let scaled = |value: F| match scale {
        Some(factor) => value * factor,
        None => value,
    };

    let mut merged = Vec::with_capacity(left.len() + right.len());
    for pair in left.iter().merge_join_by(right, |l, r| l.0.cmp(&r.0)) {
        let (index, value) = match pair {
            EitherOrBoth::Both(&(index, value), &(_, other)) => (index, value + scaled(other)),
            EitherOrBoth::Left(&(index, value)) => (index, value),
            EitherOrBoth::Right(&(index, other)) => (index, scaled(other)),
        };
        if value.is_not_zero() {
            merged.push((index, value));
        }
    }

    merged
}

/// Element-wise product of two sorted sparse slices, keeping only the shared indices with a
/// nonzero product.
pub(crate) fn merge_mul<F: Scalar>(
    left: &[SparseTuple<F>],
    right: &[SparseTuple<F>],
) -> Vec<SparseTuple<F>> {
    let mut merged = Vec::with_capacity(left.len().min(right.len()));
    for pair in left.iter().merge_join_by(right, |l, r| l.0.cmp(&r.0)) {
        if let EitherOrBoth::Both(&(index, value), &(_, other)) = pair {
            let product = value * other;
            if product.is_not_zero() {
                merged.push((index, product));
            }
        }
    }

    merged
}

/// Inner product of two sorted sparse slices.
pub(crate) fn inner_product<F: Scalar>(left: &[SparseTuple<F>], right: &[SparseTuple<F>]) -> F {
    left.iter()
        .merge_join_by(right, |l, r| l.0.cmp(&r.0))
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(&(_, value), &(_, other)) => Some(value * other),
            _ => None,
        })
        .sum()
}

/// Inner product of a sparse slice with a dense slice, touching only the sparse entries.
///
/// # Panics
///
/// When a sparse index lies outside of the dense slice.
pub(crate) fn inner_product_with_dense<F: Scalar>(sparse: &[SparseTuple<F>], dense: &[F]) -> F {
    sparse.iter()
        .map(|&(index, value)| {
            assert!(
                index < dense.len(),
                "sparse index {} out of range for dense length {}", index, dense.len(),
            );
            value * dense[index]
        })
        .sum()
}

/// Expand sparse tuples into a dense buffer of length `len`.
///
/// # Panics
///
/// When a sparse index is not smaller than `len`.
pub(crate) fn to_dense<F: Scalar>(tuples: &[SparseTuple<F>], len: usize) -> Vec<F> {
    let mut values = vec![F::zero(); len];
    for &(index, value) in tuples {
        assert!(index < len, "sparse index {} out of range for dense length {}", index, len);
        values[index] = value;
    }

    values
}

/// Reduce the size of the vector by removing values.
///
/// Indices of the remaining tuples are shifted down by the number of removed indices before them,
/// whether or not a value was stored at a removed index.
///
/// The method operates in place.
///
/// # Arguments
///
/// * `vector`: `Vec` to remove indices from.
/// * `indices`: A set of indices to remove from the vector, assumed sorted.
pub(crate) fn remove_sparse_indices<T: Copy>(vector: &mut Vec<(usize, T)>, indices: &[usize]) {
    debug_assert!(indices.windows(2).all(|w| w[0] <= w[1]));
    // All values are unique
    debug_assert!(indices.iter().collect::<HashSet<_>>().len() == indices.len());

    if indices.is_empty() || vector.is_empty() {
        return;
    }

    let mut writing_index = 0;
    let mut present_skipped = 0;
    for (nr_skipped_before, &index) in indices.iter().enumerate() {
        while writing_index + present_skipped < vector.len() && vector[writing_index + present_skipped].0 < index {
            let to_move = vector[writing_index + present_skipped];
            vector[writing_index] = (to_move.0 - nr_skipped_before, to_move.1);
            writing_index += 1;
        }

        if writing_index + present_skipped < vector.len() && vector[writing_index + present_skipped].0 == index {
            present_skipped += 1;
        }
    }
    while writing_index + present_skipped < vector.len() {
        let to_move = vector[writing_index + present_skipped];
        vector[writing_index] = (to_move.0 - indices.len(), to_move.1);
        writing_index += 1;
    }

    vector.truncate(vector.len() - present_skipped);
}
