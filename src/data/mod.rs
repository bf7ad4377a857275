//! # Storing of tableau data in memory
//!
//! This module provides the data structures used to represent rows, columns and tableaus in
//! memory, and the requirements on the numbers stored in them.

pub mod linear_algebra;
pub mod number_types;
