//! # GHReport
//!
//! Repository activity report for a GHData backend.
//!
//! The controller reads `owner` and `repo` from the page URL, fetches the
//! commit, stargazer and fork series independently and draws each one into
//! its own region of the page. The page itself is injected through
//! [`PageEnvironment`]; the binary uses [`HtmlPage`] and writes it to disk.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod page;
pub mod query;
pub mod report;

pub use cli::*;
pub use page::*;
pub use query::*;
pub use report::*;
