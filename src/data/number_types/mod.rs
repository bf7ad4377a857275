//! # Number types
//!
//! The scalar requirements of the linear algebra types in this crate.
pub mod traits;
