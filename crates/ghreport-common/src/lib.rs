//! # GHReport Common
//!
//! Shared types, utilities, and common functionality for the GHData report.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace: the error type, the time-series domain model, date
//! conversion and logging setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
