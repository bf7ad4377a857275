//! # Sparse tableaus
//!
//! A tableau over a sparse set of rows and columns, as produced by `List::sparse_cross`. Physical
//! slot `i` of an axis holds one list and the logical index in the larger index space that it
//! represents.
use crate::data::linear_algebra::list::List;
use crate::data::linear_algebra::tableau::{Axis, StorageFormat};
use crate::data::number_types::traits::Scalar;
use crate::error::{Result, TableauError};

/// A tableau storing only some of its rows and columns.
///
/// Logical indices are strictly increasing along each axis, so no two slots represent the same
/// line. Sparse tableaus are read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseTableau<F> {
    format: StorageFormat,

    row_indices: Vec<usize>,
    column_indices: Vec<usize>,

    /// One list per row slot, present exactly when `format` stores rows.
    rows: Option<Vec<List<F>>>,
    /// One list per column slot, present exactly when `format` stores columns.
    columns: Option<Vec<List<F>>>,
}

impl<F> SparseTableau<F> {
    pub(crate) fn new(
        format: StorageFormat,
        row_indices: Vec<usize>,
        rows: Option<Vec<List<F>>>,
        column_indices: Vec<usize>,
        columns: Option<Vec<List<F>>>,
    ) -> Self {
        debug_assert!(row_indices.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(column_indices.windows(2).all(|w| w[0] < w[1]));
        debug_assert_eq!(rows.is_some(), format.stores(Axis::Row));
        debug_assert_eq!(columns.is_some(), format.stores(Axis::Column));
        debug_assert!(rows.as_ref().is_none_or(|rows| rows.len() == row_indices.len()));
        debug_assert!(columns.as_ref().is_none_or(|columns| columns.len() == column_indices.len()));

        Self { format, row_indices, column_indices, rows, columns }
    }

    /// Number of row slots.
    pub fn nr_rows(&self) -> usize {
        self.row_indices.len()
    }

    /// Number of column slots.
    pub fn nr_columns(&self) -> usize {
        self.column_indices.len()
    }

    /// Which views this tableau maintains.
    pub fn format(&self) -> StorageFormat {
        self.format
    }

    /// Logical row index represented by row slot `slot`.
    pub fn row_index_of(&self, slot: usize) -> usize {
        self.row_indices[slot]
    }

    /// Logical column index represented by column slot `slot`.
    pub fn column_index_of(&self, slot: usize) -> usize {
        self.column_indices[slot]
    }

    /// The list in row slot `slot`.
    ///
    /// # Errors
    ///
    /// When rows are not stored in this tableau's format.
    pub fn row(&self, slot: usize) -> Result<&List<F>> {
        self.line(Axis::Row, slot)
    }

    /// The list in column slot `slot`.
    ///
    /// # Errors
    ///
    /// When columns are not stored in this tableau's format.
    pub fn column(&self, slot: usize) -> Result<&List<F>> {
        self.line(Axis::Column, slot)
    }

    fn line(&self, axis: Axis, slot: usize) -> Result<&List<F>> {
        let (_, lines) = self.slots(axis)
            .ok_or(TableauError::AxisNotStored { axis, format: self.format })?;

        Ok(&lines[slot])
    }

    /// Logical indices of all slots along `axis`, whether or not that axis is stored.
    pub(crate) fn logical_indices(&self, axis: Axis) -> &[usize] {
        match axis {
            Axis::Row => &self.row_indices,
            Axis::Column => &self.column_indices,
        }
    }

    /// Logical indices and lists of all slots along `axis`, if that axis is stored.
    pub(crate) fn slots(&self, axis: Axis) -> Option<(&[usize], &[List<F>])> {
        match axis {
            Axis::Row => self.rows.as_deref().map(|rows| (self.row_indices.as_slice(), rows)),
            Axis::Column => self.columns.as_deref().map(|columns| (self.column_indices.as_slice(), columns)),
        }
    }
}

impl<F: Scalar> SparseTableau<F> {
    /// Value at logical position `(row, column)`.
    ///
    /// Positions outside of the stored slots are zero.
    pub fn at(&self, row: usize, column: usize) -> F {
        if let Some(rows) = &self.rows {
            match self.row_indices.binary_search(&row) {
                Ok(slot) => rows[slot].at(column),
                Err(_) => F::zero(),
            }
        } else if let Some(columns) = &self.columns {
            match self.column_indices.binary_search(&column) {
                Ok(slot) => columns[slot].at(row),
                Err(_) => F::zero(),
            }
        } else {
            F::zero()
        }
    }
}
