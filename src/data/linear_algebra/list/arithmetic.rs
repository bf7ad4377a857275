//! # Element-wise arithmetic
//!
//! Every binary operation dispatches on the storage modes of both operands. Sparse-sparse cases
//! are sorted merges, dense-dense cases are positional, and mixed cases only walk the sparse side.
use log::trace;

use crate::data::linear_algebra::SparseTuple;
use crate::data::linear_algebra::list::{List, Storage};
use crate::data::linear_algebra::utilities::{inner_product, inner_product_with_dense, merge_add, merge_mul, to_dense};
use crate::data::number_types::traits::Scalar;

impl<F: Scalar> List<F> {
    /// Add another list to this one.
    ///
    /// See `add_scaled` for how the storage modes interact.
    pub fn add(&mut self, other: &List<F>) {
        self.add_with(other, None);
    }

    /// Add a multiple of another list to this one.
    ///
    /// * Sparse + sparse: sorted merge of both index streams. Values that become zero are not
    /// stored.
    /// * Dense + dense: positional, both need the same length.
    /// * Dense + sparse: the sparse entries are added at their positions.
    /// * Sparse + dense: this list is promoted to a dense list of the other list's length first.
    /// Its storage mode stays dense afterwards.
    ///
    /// # Panics
    ///
    /// When two dense lists differ in length, or when a sparse index lies beyond a dense length.
    pub fn add_scaled(&mut self, other: &List<F>, scale: F) {
        self.add_with(other, Some(scale));
    }

    fn add_with(&mut self, other: &List<F>, scale: Option<F>) {
        let scaled = |value: F| match scale {
            Some(factor) => value * factor,
            None => value,
        };

        let promoted = match (&mut self.storage, &other.storage) {
            (Storage::Sparse(tuples), Storage::Sparse(other_tuples)) => {
                if !other_tuples.is_empty() {
                    *tuples = merge_add(tuples, other_tuples, scale);
                }
                None
            },
            (Storage::Dense(values), Storage::Dense(other_values)) => {
                assert_eq!(
                    values.len(), other_values.len(),
                    "can't add dense lists of lengths {} and {}", values.len(), other_values.len(),
                );

                for (value, &other) in values.iter_mut().zip(other_values) {
                    *value += scaled(other);
                }
                None
            },
            (Storage::Dense(values), Storage::Sparse(other_tuples)) => {
                let len = values.len();
                for &(index, other) in other_tuples {
                    assert!(index < len, "sparse index {} out of range for dense length {}", index, len);
                    values[index] += scaled(other);
                }
                None
            },
            (Storage::Sparse(tuples), Storage::Dense(other_values)) => {
                trace!("promoting sparse list with {} entries to dense length {}", tuples.len(), other_values.len());

                let mut values = to_dense(tuples, other_values.len());
                for (value, &other) in values.iter_mut().zip(other_values) {
                    *value += scaled(other);
                }
                Some(Storage::Dense(values))
            },
        };

        if let Some(storage) = promoted {
            self.storage = storage;
        }
    }

    /// Multiply this list element-wise with another list.
    ///
    /// Only indices stored in both lists can produce a nonzero value:
    ///
    /// * Sparse * sparse: sorted-merge intersection, zero products are not stored.
    /// * Dense * dense: positional, both need the same length.
    /// * Mixed: only the sparse operand's indices are visited. The nonzero products are kept
    /// sparse, unless they fill more than half of the dense length, in which case the result is
    /// dense. The receiver's storage mode changes accordingly.
    ///
    /// # Panics
    ///
    /// When two dense lists differ in length, or when a sparse index lies beyond a dense length.
    pub fn mul(&mut self, other: &List<F>) {
        let changed = match (&mut self.storage, &other.storage) {
            (Storage::Sparse(tuples), Storage::Sparse(other_tuples)) => {
                *tuples = merge_mul(tuples, other_tuples);
                None
            },
            (Storage::Dense(values), Storage::Dense(other_values)) => {
                assert_eq!(
                    values.len(), other_values.len(),
                    "can't multiply dense lists of lengths {} and {}", values.len(), other_values.len(),
                );

                for (value, &other) in values.iter_mut().zip(other_values) {
                    *value *= other;
                }
                None
            },
            (Storage::Sparse(tuples), Storage::Dense(other_values)) => {
                Some(mixed_product(tuples, other_values))
            },
            (Storage::Dense(values), Storage::Sparse(other_tuples)) => {
                Some(mixed_product(other_tuples, values))
            },
        };

        if let Some(storage) = changed {
            self.storage = storage;
        }
    }

    /// Inner product with another list.
    ///
    /// Sparse lists are merged, mixed cases only walk the sparse entries.
    ///
    /// # Panics
    ///
    /// When two dense lists differ in length, or when a sparse index lies beyond a dense length.
    pub fn dot(&self, other: &List<F>) -> F {
        match (&self.storage, &other.storage) {
            (Storage::Sparse(tuples), Storage::Sparse(other_tuples)) => inner_product(tuples, other_tuples),
            (Storage::Dense(values), Storage::Dense(other_values)) => {
                assert_eq!(
                    values.len(), other_values.len(),
                    "can't take the inner product of dense lists of lengths {} and {}", values.len(), other_values.len(),
                );

                values.iter().zip(other_values).map(|(&value, &other)| value * other).sum()
            },
            (Storage::Sparse(tuples), Storage::Dense(values))
            | (Storage::Dense(values), Storage::Sparse(tuples)) => inner_product_with_dense(tuples, values),
        }
    }
}

/// Product of a sparse and a dense list, stored in whichever mode takes less room.
///
/// # Panics
///
/// When a sparse index lies beyond the dense length.
fn mixed_product<F: Scalar>(tuples: &[SparseTuple<F>], values: &[F]) -> Storage<F> {
    let products = tuples.iter()
        .filter_map(|&(index, value)| {
            assert!(index < values.len(), "sparse index {} out of range for dense length {}", index, values.len());
            let product = value * values[index];
            product.is_not_zero().then_some((index, product))
        })
        .collect::<Vec<_>>();

    if products.len() * 2 > values.len() {
        trace!("keeping product with {} entries of length {} dense", products.len(), values.len());
        Storage::Dense(to_dense(&products, values.len()))
    } else {
        Storage::Sparse(products)
    }
}
