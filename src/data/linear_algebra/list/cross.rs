//! # Outer products
//!
//! Build a tableau whose row `i` is the right-hand list scaled by the left-hand value at `i`, and
//! whose column `j` is the left-hand list scaled by the right-hand value at `j`.
use log::debug;
use rayon::prelude::*;

use crate::data::linear_algebra::list::List;
use crate::data::linear_algebra::MIN_PARALLEL_LEN;
use crate::data::linear_algebra::tableau::{Axis, StorageFormat, Tableau};
use crate::data::linear_algebra::tableau::sparse::SparseTableau;
use crate::data::number_types::traits::Scalar;

impl<F: Scalar> List<F> {
    /// Outer product `self ⊗ other` as a tableau storing both rows and columns.
    ///
    /// See `cross_with_format`.
    #[must_use]
    pub fn cross(&self, other: &List<F>, nr_rows: usize, nr_columns: usize) -> Tableau<F> {
        self.cross_with_format(other, nr_rows, nr_columns, StorageFormat::RowAndColumn)
    }

    /// Outer product `self ⊗ other` as a `nr_rows` by `nr_columns` tableau.
    ///
    /// Rows without an entry stored in `self`, and columns without one in `other`, are left as
    /// empty lists. Rows and columns are computed concurrently.
    ///
    /// # Panics
    ///
    /// When `self` doesn't fit `nr_rows` or `other` doesn't fit `nr_columns`.
    #[must_use]
    pub fn cross_with_format(
        &self,
        other: &List<F>,
        nr_rows: usize,
        nr_columns: usize,
        format: StorageFormat,
    ) -> Tableau<F> {
        self.assert_fits(nr_rows);
        other.assert_fits(nr_columns);
        debug!(
            "outer product of {} by {} entries into a {} x {} tableau ({:?})",
            self.size(), other.size(), nr_rows, nr_columns, format,
        );

        let (rows, columns) = rayon::join(
            || format.stores(Axis::Row).then(|| scaled_copies(self, other)),
            || format.stores(Axis::Column).then(|| scaled_copies(other, self)),
        );

        let mut tableau = Tableau::new(nr_rows, nr_columns, format);
        if let Some(rows) = rows {
            tableau.place_lines(Axis::Row, line_indices(self).into_iter().zip(rows));
        }
        if let Some(columns) = columns {
            tableau.place_lines(Axis::Column, line_indices(other).into_iter().zip(columns));
        }

        tableau
    }

    /// Outer product `self ⊗ other`, materializing only the rows and columns stored in the
    /// operands.
    ///
    /// See `sparse_cross_with_format`.
    #[must_use]
    pub fn sparse_cross(&self, other: &List<F>) -> SparseTableau<F> {
        self.sparse_cross_with_format(other, StorageFormat::RowAndColumn)
    }

    /// Outer product `self ⊗ other` over the stored indices only.
    ///
    /// Row slot `i` of the result represents the `i`-th index stored in `self`, column slot `j` the
    /// `j`-th index stored in `other`.
    #[must_use]
    pub fn sparse_cross_with_format(&self, other: &List<F>, format: StorageFormat) -> SparseTableau<F> {
        debug!("sparse outer product of {} by {} entries ({:?})", self.size(), other.size(), format);

        let (rows, columns) = rayon::join(
            || format.stores(Axis::Row).then(|| scaled_copies(self, other)),
            || format.stores(Axis::Column).then(|| scaled_copies(other, self)),
        );

        SparseTableau::new(format, line_indices(self), rows, line_indices(other), columns)
    }
}

/// For every value stored in `scales`, a copy of `line` scaled by it.
fn scaled_copies<F: Scalar>(scales: &List<F>, line: &List<F>) -> Vec<List<F>> {
    let factors = scales.iter().map(|(_, factor)| factor).collect::<Vec<_>>();

    factors.into_par_iter()
        .with_min_len(MIN_PARALLEL_LEN)
        .map(|factor| line.scaled(factor))
        .collect()
}

fn line_indices<F: Scalar>(list: &List<F>) -> Vec<usize> {
    list.iter().map(|(index, _)| index).collect()
}
