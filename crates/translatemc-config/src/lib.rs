//! # TranslateMC Config
//!
//! Type-safe configuration management for TranslateMC.
//!
//! This crate provides configuration loading from YAML or TOML files with
//! environment overrides, validation, and a lock-free cache that supports
//! atomic replacement on reload.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
