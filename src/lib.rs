//! # smartschool
//!
//! Fetches a student's evaluation results from the Smartschool portal and
//! exposes them as typed records.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Settings for connecting to a portal
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Errors raised by this crate
pub mod error;
/// Result record types
pub mod objects;
/// Table rendering for the command line
pub mod report;
pub mod results;
/// The HTTP session seam and its reqwest implementation
pub mod session;

pub use config::Config;
pub use error::SmartschoolError;
pub use objects::{ResultWithDetails, ResultWithoutDetails};
pub use results::{ResultDetail, Results};
pub use session::{HttpSession, Response, Session};
