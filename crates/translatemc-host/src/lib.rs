//! # TranslateMC Host
//!
//! Standalone host for the translation service.
//!
//! This is the binary crate that loads configuration, initializes logging,
//! connects the translation service to the remote catalog, keeps it fresh in
//! the background, and exposes the command layer through a terminal console.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod error;
pub mod host;

pub use console::{run, ConsoleReply, ConsoleSession};
pub use error::*;
pub use host::TranslateHost;
