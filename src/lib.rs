//! # Sparse tableaus
//!
//! Data structures for simplex-method style computations: a `List` that stores a row or column
//! either sparsely or densely, and tableaus that keep a row-major and a column-major view of the
//! same matrix in sync.
//!
//! The crate doesn't pick pivots. A pivoting algorithm builds lists, combines them into tableaus
//! through outer products or by appending rows and columns, and reduces them with
//! `Tableau::sum_scaled_rows` and `Tableau::times`.
//!
//! Heavy operations run data-parallel on rayon's global thread pool. Run them inside
//! `rayon::ThreadPool::install` to use a different pool.
#![warn(missing_docs)]

pub mod data;
pub mod error;

pub use data::linear_algebra::list::{List, Mode};
pub use data::linear_algebra::SparseTuple;
pub use data::linear_algebra::tableau::{Axis, StorageFormat, Tableau};
pub use data::linear_algebra::tableau::sparse::SparseTableau;
pub use data::number_types::traits::{NonZero, Scalar};
pub use error::{Result, TableauError};
