//! # Tableaus
//!
//! A `Tableau` stores a matrix as rows, as columns, or as both. When both are stored, they are two
//! views of the same matrix and every mutation keeps them equal: the value at `(i, j)` in row `i`
//! is the value at `i` in column `j`.
//!
//! Bulk operations are data-parallel over rows or columns. Every parallel iteration reads and
//! writes only its own line.
use std::fmt;
use std::fmt::Display;
use std::mem;

use log::debug;
use rayon::prelude::*;

use crate::data::linear_algebra::list::List;
use crate::data::linear_algebra::MIN_PARALLEL_LEN;
use crate::data::linear_algebra::tableau::sparse::SparseTableau;
use crate::data::number_types::traits::Scalar;
use crate::error::{Result, TableauError};

pub mod sparse;

/// Which views of the matrix a tableau maintains.
///
/// Storing fewer views saves memory and mutation work, but makes queries on the missing view
/// unavailable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StorageFormat {
    /// Only row lists are stored.
    RowOnly,
    /// Only column lists are stored.
    ColumnOnly,
    /// Both row and column lists are stored and kept in sync.
    RowAndColumn,
}

impl StorageFormat {
    /// Whether lists along `axis` are stored in this format.
    pub fn stores(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (StorageFormat::RowAndColumn, _)
            | (StorageFormat::RowOnly, Axis::Row)
            | (StorageFormat::ColumnOnly, Axis::Column)
        )
    }
}

/// Rows or columns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Horizontal lines, indexed by row number.
    Row,
    /// Vertical lines, indexed by column number.
    Column,
}

impl Axis {
    /// The other axis.
    pub fn opposite(self) -> Self {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Axis::Row => "row",
            Axis::Column => "column",
        })
    }
}

/// A matrix stored as row lists, column lists, or both.
///
/// Each list is owned by the tableau. Lines that were never written to are empty sparse lists.
#[derive(Clone, Debug, PartialEq)]
pub struct Tableau<F> {
    nr_rows: usize,
    nr_columns: usize,
    format: StorageFormat,

    /// Present exactly when `format` stores rows.
    rows: Option<Vec<List<F>>>,
    /// Present exactly when `format` stores columns.
    columns: Option<Vec<List<F>>>,
}

impl<F> Tableau<F> {
    /// Number of rows.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of columns, including an extra column if one was appended.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Which views this tableau maintains.
    pub fn format(&self) -> StorageFormat {
        self.format
    }

    /// Whether lines along `axis` are stored.
    pub fn has_axis(&self, axis: Axis) -> bool {
        self.format.stores(axis)
    }

    /// Row `i`.
    ///
    /// # Errors
    ///
    /// When rows are not stored in this tableau's format.
    pub fn row(&self, i: usize) -> Result<&List<F>> {
        self.line(Axis::Row, i)
    }

    /// Column `j`.
    ///
    /// # Errors
    ///
    /// When columns are not stored in this tableau's format.
    pub fn column(&self, j: usize) -> Result<&List<F>> {
        self.line(Axis::Column, j)
    }

    fn line(&self, axis: Axis, index: usize) -> Result<&List<F>> {
        let len = self.len_of(axis);
        assert!(index < len, "{} {} out of range for a tableau with {} {}s", axis, index, len, axis);

        self.lines(axis)
            .map(|lines| &lines[index])
            .ok_or(TableauError::AxisNotStored { axis, format: self.format })
    }

    fn lines(&self, axis: Axis) -> Option<&Vec<List<F>>> {
        match axis {
            Axis::Row => self.rows.as_ref(),
            Axis::Column => self.columns.as_ref(),
        }
    }

    /// The lines along `axis` and along the opposite axis.
    fn lines_mut(&mut self, axis: Axis) -> (&mut Option<Vec<List<F>>>, &mut Option<Vec<List<F>>>) {
        match axis {
            Axis::Row => (&mut self.rows, &mut self.columns),
            Axis::Column => (&mut self.columns, &mut self.rows),
        }
    }

    fn len_of(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.nr_rows,
            Axis::Column => self.nr_columns,
        }
    }
}

impl<F: Scalar> Tableau<F> {
    /// Create a tableau of the given dimensions with all lines empty.
    #[must_use]
    pub fn new(nr_rows: usize, nr_columns: usize, format: StorageFormat) -> Self {
        debug!("creating a {} x {} tableau ({:?})", nr_rows, nr_columns, format);

        Self {
            nr_rows,
            nr_columns,
            format,

            rows: format.stores(Axis::Row).then(|| vec![List::new(); nr_rows]),
            columns: format.stores(Axis::Column).then(|| vec![List::new(); nr_columns]),
        }
    }

    /// Create a tableau from its rows.
    ///
    /// # Arguments
    ///
    /// * `nr_columns`: Number of columns, every row needs to fit in it.
    /// * `rows`: The rows, in order.
    /// * `format`: Views to maintain. When only columns are stored, the rows are only used to fill
    /// them.
    #[must_use]
    pub fn from_rows(nr_columns: usize, rows: Vec<List<F>>, format: StorageFormat) -> Self {
        let mut tableau = Self::new(rows.len(), nr_columns, format);
        for (i, row) in rows.into_iter().enumerate() {
            tableau.append_row(i, row);
        }

        tableau
    }

    /// Value at `(row, column)`, read from whichever view is stored.
    ///
    /// # Panics
    ///
    /// When `row` or `column` is out of range.
    pub fn at(&self, row: usize, column: usize) -> F {
        assert!(row < self.nr_rows, "row {} out of range for a tableau with {} rows", row, self.nr_rows);
        assert!(column < self.nr_columns, "column {} out of range for a tableau with {} columns", column, self.nr_columns);

        match (&self.rows, &self.columns) {
            (Some(rows), _) => rows[row].at(column),
            (None, Some(columns)) => columns[column].at(row),
            (None, None) => unreachable!("every storage format stores rows or columns"),
        }
    }

    /// Add another tableau of the same shape and format to this one.
    ///
    /// Rows and columns are each added independently, in parallel.
    ///
    /// # Panics
    ///
    /// When dimensions or storage formats differ.
    pub fn add(&mut self, other: &Tableau<F>) {
        assert_eq!(
            (self.nr_rows, self.nr_columns), (other.nr_rows, other.nr_columns),
            "can't add tableaus of different dimensions",
        );
        assert_eq!(self.format, other.format, "can't add tableaus of different storage formats");

        for (lines, other_lines) in [(&mut self.rows, &other.rows), (&mut self.columns, &other.columns)] {
            if let (Some(lines), Some(other_lines)) = (lines, other_lines) {
                lines.par_iter_mut()
                    .zip(other_lines.par_iter())
                    .with_min_len(MIN_PARALLEL_LEN)
                    .for_each(|(line, other)| line.add(other));
            }
        }
    }

    /// Add a sparse tableau to this one.
    ///
    /// Every row slot of `other` is added to the row at that slot's logical index, and likewise
    /// for columns. Slots are processed in parallel.
    ///
    /// # Panics
    ///
    /// When `other` doesn't store a view that this tableau stores, or when a logical index of
    /// `other`, or an entry of one of its lines, is out of range.
    pub fn add_sparse(&mut self, other: &SparseTableau<F>) {
        for axis in [Axis::Row, Axis::Column] {
            let len = self.len_of(axis);
            assert!(
                other.logical_indices(axis).last().is_none_or(|&last| last < len),
                "sparse tableau {} index out of range for a tableau with {} {}s", axis, len, axis,
            );
        }

        for axis in [Axis::Row, Axis::Column] {
            let opposite_len = self.len_of(axis.opposite());
            let (lines, _) = self.lines_mut(axis);
            if let Some(lines) = lines {
                let (indices, addends) = other.slots(axis)
                    .unwrap_or_else(|| panic!("sparse tableau doesn't store the {} axis", axis));
                for addend in addends {
                    addend.assert_fits(opposite_len);
                }

                add_into_lines(lines, indices, addends);
            }
        }
    }

    /// Replace row `row` with `list`, updating the column view entry by entry.
    ///
    /// The previous row is dropped. Entries of the previous row that `list` doesn't store are
    /// removed from the columns.
    ///
    /// # Panics
    ///
    /// When `row` is out of range or `list` doesn't fit the number of columns.
    pub fn append_row(&mut self, row: usize, list: List<F>) {
        self.append_line(Axis::Row, row, list);
    }

    /// Replace column `column` with `list`, updating the row view entry by entry.
    ///
    /// See `append_row`.
    pub fn append_column(&mut self, column: usize, list: List<F>) {
        self.append_line(Axis::Column, column, list);
    }

    fn append_line(&mut self, axis: Axis, index: usize, list: List<F>) {
        let len = self.len_of(axis);
        assert!(index < len, "{} {} out of range for a tableau with {} {}s", axis, index, len, axis);
        list.assert_fits(self.len_of(axis.opposite()));

        let (own, opposite) = self.lines_mut(axis);
        if let Some(opposite) = opposite {
            match own.as_deref() {
                Some(own) => for (j, _) in own[index].iter() {
                    opposite[j].unset(index);
                },
                // Without our own view the stale entries can only be found by looking everywhere.
                None => opposite.par_iter_mut()
                    .with_min_len(MIN_PARALLEL_LEN)
                    .for_each(|line| line.unset(index)),
            }

            for (j, value) in list.iter() {
                opposite[j].insert(index, value);
            }
        }

        if let Some(own) = own {
            // The previous list is dropped here.
            own[index] = list;
        }
    }

    /// Add a column after the last one.
    ///
    /// # Panics
    ///
    /// When `list` doesn't fit the number of rows.
    pub fn append_extra_column(&mut self, list: List<F>) {
        list.assert_fits(self.nr_rows);

        let column = self.nr_columns;
        self.nr_columns += 1;
        debug!("appending extra column {} with {} entries", column, list.size());

        if let Some(rows) = &mut self.rows {
            for (row, value) in list.iter() {
                rows[row].push_value(column, value);
            }
            // Dense rows need a value for the new column as well
            rows.par_iter_mut()
                .with_min_len(MIN_PARALLEL_LEN)
                .filter(|row| row.is_dense() && row.size() == column)
                .for_each(|row| row.push_value(column, F::zero()));
        }

        if let Some(columns) = &mut self.columns {
            columns.push(list);
        }
    }

    /// Remove the last column, undoing `append_extra_column`.
    ///
    /// Rows only lose their trailing entry when it is stored at the removed column; rows that are
    /// out of sync are left alone.
    ///
    /// # Return value
    ///
    /// The removed column, if columns are stored.
    pub fn remove_extra_column(&mut self) -> Option<List<F>> {
        let Some(column) = self.nr_columns.checked_sub(1) else {
            debug!("ignoring removal of a column from a tableau without columns");
            return None;
        };
        self.nr_columns = column;
        debug!("removing extra column {}", column);

        if let Some(rows) = &mut self.rows {
            let nr_kept = rows.par_iter_mut()
                .with_min_len(MIN_PARALLEL_LEN)
                .map(|row| row.pop(Some(column)))
                .filter(|&popped| !popped)
                .count();
            if nr_kept > 0 {
                debug!("{} rows had no trailing entry in column {}", nr_kept, column);
            }
        }

        self.columns.as_mut().and_then(Vec::pop)
    }

    /// Compute `Σ_i scale[i] · row_i` as a dense list with a value for every column.
    ///
    /// With rows stored, only the rows at indices stored in `scale` are visited. With only columns
    /// stored, each result value is the inner product of `scale` with that column.
    ///
    /// # Panics
    ///
    /// When `scale` doesn't fit the number of rows.
    pub fn sum_scaled_rows(&self, scale: &List<F>) -> List<F> {
        scale.assert_fits(self.nr_rows);
        let nr_columns = self.nr_columns;

        match &self.rows {
            Some(rows) => {
                let factors = scale.iter().collect::<Vec<_>>();
                factors.par_iter()
                    .with_min_len(MIN_PARALLEL_LEN)
                    .fold(|| List::dense(nr_columns), |mut sum, &(i, factor)| {
                        sum.add_scaled(&rows[i], factor);
                        sum
                    })
                    .reduce(|| List::dense(nr_columns), |mut left, right| {
                        left.add(&right);
                        left
                    })
            },
            None => {
                let columns = self.columns.as_deref().unwrap_or(&[]);
                columns.par_iter()
                    .with_min_len(MIN_PARALLEL_LEN)
                    .map(|column| scale.dot(column))
                    .collect::<Vec<_>>()
                    .into()
            },
        }
    }

    /// Inner product of every row with `list`, as a dense list with a value for every row.
    ///
    /// # Errors
    ///
    /// When rows are not stored in this tableau's format.
    pub fn times(&self, list: &List<F>) -> Result<List<F>> {
        let rows = self.rows.as_ref()
            .ok_or(TableauError::AxisNotStored { axis: Axis::Row, format: self.format })?;

        Ok(rows.par_iter()
            .with_min_len(MIN_PARALLEL_LEN)
            .map(|row| row.dot(list))
            .collect::<Vec<_>>()
            .into())
    }

    /// Put lists in place without touching the opposite view.
    ///
    /// Only for constructing a tableau whose views are consistent by construction.
    pub(crate) fn place_lines(&mut self, axis: Axis, tagged: impl IntoIterator<Item=(usize, List<F>)>) {
        let (own, _) = self.lines_mut(axis);
        if let Some(own) = own {
            for (index, line) in tagged {
                own[index] = line;
            }
        }
    }
}

/// Add each addend to the line at its (strictly increasing) index, in parallel.
///
/// Only the targeted lines are visited: they are split off the front of the remaining lines one
/// by one, which also makes them disjoint.
fn add_into_lines<F: Scalar>(lines: &mut [List<F>], indices: &[usize], addends: &[List<F>]) {
    debug_assert_eq!(indices.len(), addends.len());
    debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));

    let mut remaining = lines;
    let mut offset = 0;
    let mut targets = Vec::with_capacity(indices.len());
    for (&index, addend) in indices.iter().zip(addends) {
        let (_, rest) = mem::take(&mut remaining).split_at_mut(index - offset);
        let (line, rest) = rest.split_at_mut(1);
        targets.push((&mut line[0], addend));
        remaining = rest;
        offset = index + 1;
    }

    targets.into_par_iter()
        .with_min_len(MIN_PARALLEL_LEN)
        .for_each(|(line, addend)| line.add(addend));
}
