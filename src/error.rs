//! # Errors
//!
//! Misuse of lists and tableaus, such as mismatched dense lengths or out-of-range indices, is a
//! programming error and panics. The one recoverable condition is asking a tableau for a view that
//! its storage format doesn't maintain.
use thiserror::Error;

use crate::data::linear_algebra::tableau::{Axis, StorageFormat};

/// Result type alias using this crate's `TableauError`.
pub type Result<T> = std::result::Result<T, TableauError>;

/// Errors returned by tableau accessors.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum TableauError {
    /// Rows were requested from a tableau that only stores columns, or the other way around.
    #[error("the {axis} axis is not stored in a tableau with storage format {format:?}")]
    AxisNotStored {
        /// The axis that was requested.
        axis: Axis,
        /// The storage format of the tableau.
        format: StorageFormat,
    },
}
