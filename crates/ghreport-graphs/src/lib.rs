//! # GHReport Graphs
//!
//! Fetches repository activity series from a GHData backend and renders them
//! as SVG scatter charts with an optional least-squares trend line.
//!
//! Rendering is native Rust using plotters' SVG backend.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod data_fetcher;
pub mod least_squares;
pub mod svg_renderer;
pub mod traits;
pub mod utils;

pub use chart::*;
pub use data_fetcher::*;
pub use least_squares::*;
pub use svg_renderer::*;
pub use traits::*;
pub use utils::*;
