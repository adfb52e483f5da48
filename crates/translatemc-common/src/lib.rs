//! # TranslateMC Common
//!
//! Shared types, error handling, and logging setup for TranslateMC.
//!
//! This crate provides the foundational types and utilities used across
//! all other crates in the TranslateMC workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, TranslateError};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
pub use types::*;
