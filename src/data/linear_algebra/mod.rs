//! # Linear algebra primitives
//!
//! Rows and columns are `List`s, stored in either a dense or a sparse format. Tableaus are built
//! from them, keeping a row-major and a column-major view of the same matrix.

pub mod list;
pub mod tableau;
pub(crate) mod utilities;

/// An index and the value stored at that index.
pub type SparseTuple<F> = (usize, F);

/// Absolute values below this are considered zero for `f32` scalars.
pub const F32_EPSILON: f32 = 1e-6;
/// Absolute values below this are considered zero for `f64` scalars.
pub const F64_EPSILON: f64 = 1e-10;

/// Smallest number of rows, columns or entries handed to a single rayon task.
///
/// Splitting below this only adds scheduling overhead.
pub const MIN_PARALLEL_LEN: usize = 16;
