//! # Lists
//!
//! A `List` is a single row or column of a tableau. It is stored either sparsely, as a `Vec` of
//! index-sorted `(index, value)` tuples, or densely, as one value for every position.
//!
//! The storage mode of a list only changes when asked for explicitly (`to_dense`, `into_dense`),
//! or as a documented side effect of the mixed-mode arithmetic in `add`, `add_scaled` and `mul`.
use std::fmt;
use std::fmt::Display;
use std::iter::{Enumerate, FromIterator};
use std::slice;

use num_traits::Signed;
use rayon::prelude::*;

use crate::data::linear_algebra::{MIN_PARALLEL_LEN, SparseTuple};
use crate::data::linear_algebra::utilities::{remove_sparse_indices, to_dense};
use crate::data::number_types::traits::Scalar;

mod arithmetic;
mod cross;

/// How the entries of a `List` are stored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Index-sorted `(index, value)` tuples, values not stored are zero.
    Sparse,
    /// A value for every position `0..size`, including explicit zeros.
    Dense,
}

#[derive(Clone, Debug, PartialEq)]
enum Storage<F> {
    Sparse(Vec<SparseTuple<F>>),
    Dense(Vec<F>),
}

/// A row or column of a tableau.
///
/// Two lists only compare equal when they have the same storage mode.
#[derive(Clone, Debug, PartialEq)]
pub struct List<F> {
    storage: Storage<F>,
}

impl<F> List<F> {
    /// Create an empty sparse list.
    #[must_use]
    pub fn new() -> Self {
        Self { storage: Storage::Sparse(Vec::new()) }
    }

    /// Create an empty sparse list with room for at least `capacity` entries.
    ///
    /// The capacity is rounded up to a power of two, growth afterwards happens by doubling.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { storage: Storage::Sparse(Vec::with_capacity(capacity.next_power_of_two())) }
    }

    /// Create a sparse list from index-sorted tuples.
    ///
    /// Indices should be strictly increasing. Zero values are allowed but are only removed by
    /// the merge operations.
    #[must_use]
    pub fn from_sparse(tuples: Vec<SparseTuple<F>>) -> Self {
        debug_assert!(tuples.windows(2).all(|w| w[0].0 < w[1].0), "sparse indices must be strictly increasing");

        Self { storage: Storage::Sparse(tuples) }
    }

    /// Current storage mode.
    pub fn mode(&self) -> Mode {
        match self.storage {
            Storage::Sparse(_) => Mode::Sparse,
            Storage::Dense(_) => Mode::Dense,
        }
    }

    /// Whether the entries are stored as index-sorted tuples.
    pub fn is_sparse(&self) -> bool {
        self.mode() == Mode::Sparse
    }

    /// Whether there is a value stored for every position.
    pub fn is_dense(&self) -> bool {
        self.mode() == Mode::Dense
    }

    /// Number of stored entries.
    ///
    /// For a dense list this is its length.
    pub fn size(&self) -> usize {
        match &self.storage {
            Storage::Sparse(tuples) => tuples.len(),
            Storage::Dense(values) => values.len(),
        }
    }

    /// Number of entries that can be stored without reallocating.
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Sparse(tuples) => tuples.capacity(),
            Storage::Dense(values) => values.len(),
        }
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Iterate in index order over the stored `(index, value)` pairs.
    ///
    /// For a dense list, every position is yielded, zeros included.
    pub fn iter(&self) -> Iter<'_, F> {
        let inner = match &self.storage {
            Storage::Sparse(tuples) => IterInner::Sparse(tuples.iter()),
            Storage::Dense(values) => IterInner::Dense(values.iter().enumerate()),
        };

        Iter { inner }
    }

    /// Remove the last stored entry.
    ///
    /// # Arguments
    ///
    /// * `last_index`: If provided, the entry is only removed when it is stored at this index.
    ///
    /// # Return value
    ///
    /// Whether an entry was removed. A mismatching `last_index` is not an error: it means that the
    /// list was already in the desired state.
    pub fn pop(&mut self, last_index: Option<usize>) -> bool {
        let last = match &self.storage {
            Storage::Sparse(tuples) => tuples.last().map(|&(index, _)| index),
            Storage::Dense(values) => values.len().checked_sub(1),
        };

        match last {
            Some(index) if last_index.is_none_or(|expected| expected == index) => {
                match &mut self.storage {
                    Storage::Sparse(tuples) => { tuples.pop(); },
                    Storage::Dense(values) => { values.pop(); },
                }
                true
            },
            _ => false,
        }
    }

    /// Remove the entry at `index` and shift all later entries one index down.
    ///
    /// This renumbers the list as if position `index` never existed, which is what eliminating a
    /// pivot column requires. Nothing needs to be stored at `index` for the shift to happen.
    pub fn erase(&mut self, index: usize)
    where
        F: Copy,
    {
        self.erase_indices(&[index]);
    }

    /// Remove several positions at once, see `erase`.
    ///
    /// # Arguments
    ///
    /// * `indices`: Sorted, unique positions to remove.
    pub fn erase_indices(&mut self, indices: &[usize])
    where
        F: Copy,
    {
        match &mut self.storage {
            Storage::Sparse(tuples) => remove_sparse_indices(tuples, indices),
            Storage::Dense(values) => {
                debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
                assert!(
                    indices.last().is_none_or(|&index| index < values.len()),
                    "erasing a position beyond the dense length {}", values.len(),
                );

                let mut to_remove = indices.iter().peekable();
                let mut position = 0;
                values.retain(|_| {
                    let keep = to_remove.next_if_eq(&&position).is_none();
                    position += 1;
                    keep
                });
            },
        }
    }

    /// Asserts that this list fits as a line of length `len` in a tableau.
    ///
    /// Dense lists need to have exactly that length, sparse lists can't store anything beyond it.
    pub(crate) fn assert_fits(&self, len: usize) {
        match &self.storage {
            Storage::Sparse(tuples) => if let Some(&(last, _)) = tuples.last() {
                assert!(last < len, "sparse index {} out of range for length {}", last, len);
            },
            Storage::Dense(values) => assert_eq!(
                values.len(), len,
                "dense list of length {} doesn't fit length {}", values.len(), len,
            ),
        }
    }
}

impl<F: Scalar> List<F> {
    /// Create a dense list of `len` zeros.
    #[must_use]
    pub fn dense(len: usize) -> Self {
        Self { storage: Storage::Dense(vec![F::zero(); len]) }
    }

    /// Create a list in the given mode.
    ///
    /// A sparse list gets `size` as its initial capacity, a dense list `size` zeros.
    #[must_use]
    pub fn with_mode(size: usize, mode: Mode) -> Self {
        match mode {
            Mode::Sparse => Self::with_capacity(size),
            Mode::Dense => Self::dense(size),
        }
    }

    /// Value at `index`.
    ///
    /// Sparse lists search the index in `O(log n)` and return zero when nothing is stored there.
    ///
    /// # Panics
    ///
    /// When `index` is not smaller than the length of a dense list.
    pub fn at(&self, index: usize) -> F {
        match &self.storage {
            Storage::Sparse(tuples) => match tuples.binary_search_by_key(&index, |&(i, _)| i) {
                Ok(position) => tuples[position].1,
                Err(_) => F::zero(),
            },
            Storage::Dense(values) => {
                assert!(index < values.len(), "index {} out of range for dense length {}", index, values.len());
                values[index]
            },
        }
    }

    /// Overwrite the value stored at `index`.
    ///
    /// Never inserts: when a sparse list has nothing stored at `index`, nothing happens. Lists only
    /// grow through `append`.
    ///
    /// # Panics
    ///
    /// When `index` is not smaller than the length of a dense list.
    pub fn set(&mut self, index: usize, value: F) {
        match &mut self.storage {
            Storage::Sparse(tuples) => if let Ok(position) = tuples.binary_search_by_key(&index, |&(i, _)| i) {
                tuples[position].1 = value;
            },
            Storage::Dense(values) => {
                assert!(index < values.len(), "index {} out of range for dense length {}", index, values.len());
                values[index] = value;
            },
        }
    }

    /// Add an entry.
    ///
    /// A sparse list stores it after all existing entries, so indices have to be appended in
    /// increasing order; the list is never re-sorted. Capacity doubles when exhausted. A dense
    /// list writes `value` at position `index`.
    ///
    /// # Panics
    ///
    /// When `index` is not smaller than the length of a dense list.
    pub fn append(&mut self, index: usize, value: F) {
        match &mut self.storage {
            Storage::Sparse(tuples) => {
                debug_assert!(
                    tuples.last().is_none_or(|&(last, _)| last < index),
                    "index {} appended after index {:?}", index, tuples.last().map(|&(last, _)| last),
                );

                if tuples.len() == tuples.capacity() {
                    tuples.reserve_exact(tuples.capacity().max(1));
                }
                tuples.push((index, value));
            },
            Storage::Dense(values) => {
                assert!(index < values.len(), "index {} out of range for dense length {}", index, values.len());
                values[index] = value;
            },
        }
    }

    /// Store `value` at `index`, inserting an entry if there is none.
    pub(crate) fn insert(&mut self, index: usize, value: F) {
        match &mut self.storage {
            Storage::Sparse(tuples) => match tuples.binary_search_by_key(&index, |&(i, _)| i) {
                Ok(position) => tuples[position].1 = value,
                Err(position) => tuples.insert(position, (index, value)),
            },
            Storage::Dense(values) => {
                assert!(index < values.len(), "index {} out of range for dense length {}", index, values.len());
                values[index] = value;
            },
        }
    }

    /// Make the value at `index` zero without renumbering other entries.
    pub(crate) fn unset(&mut self, index: usize) {
        match &mut self.storage {
            Storage::Sparse(tuples) => if let Ok(position) = tuples.binary_search_by_key(&index, |&(i, _)| i) {
                tuples.remove(position);
            },
            Storage::Dense(values) => if let Some(value) = values.get_mut(index) {
                *value = F::zero();
            },
        }
    }

    /// Grow the list by an entry at `index`, which lies beyond all current entries.
    ///
    /// A dense list grows by exactly one position, so `index` must equal its length.
    pub(crate) fn push_value(&mut self, index: usize, value: F) {
        match &mut self.storage {
            Storage::Sparse(_) => self.append(index, value),
            Storage::Dense(values) => {
                assert_eq!(index, values.len(), "dense lists grow one position at a time");
                values.push(value);
            },
        }
    }

    /// Remove all stored entries, keeping the allocation.
    ///
    /// A dense list keeps its length, all values become zero.
    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Sparse(tuples) => tuples.clear(),
            Storage::Dense(values) => values.iter_mut().for_each(|value| *value = F::zero()),
        }
    }

    /// Multiply every stored value with `factor`.
    ///
    /// A zero factor leaves the (now zero) entries of a sparse list in place.
    pub fn scale(&mut self, factor: F) {
        match &mut self.storage {
            Storage::Sparse(tuples) => tuples.iter_mut().for_each(|(_, value)| *value *= factor),
            Storage::Dense(values) => values.iter_mut().for_each(|value| *value *= factor),
        }
    }

    /// A copy of this list with every stored value multiplied with `factor`.
    #[must_use]
    pub fn scaled(&self, factor: F) -> Self {
        let mut copy = self.clone();
        copy.scale(factor);
        copy
    }

    /// A dense copy of length `len`.
    ///
    /// # Panics
    ///
    /// When a stored index is not smaller than `len`, or when this list is dense with a different
    /// length.
    #[must_use]
    pub fn to_dense(&self, len: usize) -> Self {
        self.clone().into_dense(len)
    }

    /// Convert into a dense list of length `len`, see `to_dense`.
    #[must_use]
    pub fn into_dense(self, len: usize) -> Self {
        match self.storage {
            Storage::Sparse(tuples) => Self { storage: Storage::Dense(to_dense(&tuples, len)) },
            Storage::Dense(values) => {
                assert_eq!(values.len(), len, "dense list can't change its length");
                Self { storage: Storage::Dense(values) }
            },
        }
    }

    /// Apply `transform` to every stored value, producing a list with the same indices.
    ///
    /// Values are transformed in parallel; no order of application is guaranteed.
    pub fn map<R, T>(&self, transform: T) -> List<R>
    where
        R: Send,
        T: Fn(F) -> R + Sync,
    {
        self.map_indexed(|_, value| transform(value))
    }

    /// Like `map`, but `transform` also receives the index of each value.
    pub fn map_indexed<R, T>(&self, transform: T) -> List<R>
    where
        R: Send,
        T: Fn(usize, F) -> R + Sync,
    {
        let storage = match &self.storage {
            Storage::Sparse(tuples) => Storage::Sparse(
                tuples.par_iter()
                    .with_min_len(MIN_PARALLEL_LEN)
                    .map(|&(index, value)| (index, transform(index, value)))
                    .collect()
            ),
            Storage::Dense(values) => Storage::Dense(
                values.par_iter()
                    .with_min_len(MIN_PARALLEL_LEN)
                    .enumerate()
                    .map(|(index, &value)| transform(index, value))
                    .collect()
            ),
        };

        List { storage }
    }

    /// Fold the stored `(index, value)` pairs, in index order.
    ///
    /// # Arguments
    ///
    /// * `combine`: Receives the current entry and the result so far, returns the new result. Ties
    /// are broken by whichever pair it returns.
    /// * `initial`: Result when nothing is stored.
    pub fn reduce<C>(&self, combine: C, initial: SparseTuple<F>) -> SparseTuple<F>
    where
        C: Fn(SparseTuple<F>, SparseTuple<F>) -> SparseTuple<F>,
    {
        self.iter().fold(initial, |accumulated, entry| combine(entry, accumulated))
    }

    /// Combiner for `reduce` keeping the pair with the smallest value.
    ///
    /// On a tie, the later entry is kept.
    pub fn min_reduce(entry: SparseTuple<F>, accumulated: SparseTuple<F>) -> SparseTuple<F> {
        if accumulated.1 < entry.1 { accumulated } else { entry }
    }

    /// Combiner for `reduce` keeping the pair with the largest absolute value.
    ///
    /// On a tie, the later entry is kept.
    pub fn max_abs_reduce(entry: SparseTuple<F>, accumulated: SparseTuple<F>) -> SparseTuple<F>
    where
        F: Signed,
    {
        if accumulated.1.abs() > entry.1.abs() { accumulated } else { entry }
    }
}

impl<F> Default for List<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FromIterator<SparseTuple<F>> for List<F> {
    /// Collect index-sorted tuples into a sparse list.
    fn from_iter<I: IntoIterator<Item=SparseTuple<F>>>(iter: I) -> Self {
        Self::from_sparse(iter.into_iter().collect())
    }
}

impl<F> From<Vec<F>> for List<F> {
    /// Wrap values as a dense list.
    fn from(values: Vec<F>) -> Self {
        Self { storage: Storage::Dense(values) }
    }
}

/// Iterator over the stored `(index, value)` pairs of a `List`.
#[derive(Clone, Debug)]
pub struct Iter<'a, F> {
    inner: IterInner<'a, F>,
}

#[derive(Clone, Debug)]
enum IterInner<'a, F> {
    Sparse(slice::Iter<'a, SparseTuple<F>>),
    Dense(Enumerate<slice::Iter<'a, F>>),
}

impl<F: Copy> Iterator for Iter<'_, F> {
    type Item = SparseTuple<F>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Sparse(tuples) => tuples.next().copied(),
            IterInner::Dense(values) => values.next().map(|(index, &value)| (index, value)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Sparse(tuples) => tuples.size_hint(),
            IterInner::Dense(values) => values.size_hint(),
        }
    }
}

impl<F: Copy> ExactSizeIterator for Iter<'_, F> {}

impl<'a, F: Copy> IntoIterator for &'a List<F> {
    type Item = SparseTuple<F>;
    type IntoIter = Iter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<F: Display> Display for List<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        match &self.storage {
            Storage::Sparse(tuples) => for (i, (index, value)) in tuples.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "({} {})", index, value)?;
            },
            Storage::Dense(values) => for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            },
        }
        write!(f, "]")
    }
}
