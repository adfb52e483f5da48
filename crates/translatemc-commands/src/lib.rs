//! # TranslateMC Commands
//!
//! Host-facing glue around the translation service, kept free of any
//! particular server framework.
//!
//! This crate provides the `translate` command with tab completion, the
//! `%langs_...%` placeholder expansion, the first-join prompt, and the model
//! behind the language selector. Hosts adapt their own sender type through
//! [`CommandSender`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod messages;
pub mod onboarding;
pub mod placeholders;
pub mod selector;
pub mod sender;
pub mod translate;

pub use messages::{render, strip_color_codes, Messages};
pub use onboarding::{first_join_prompt, FirstJoinPrompt, FIRST_JOIN_DELAY};
pub use placeholders::{PlaceholderExpander, Requester};
pub use selector::{SelectorEntry, SelectorView};
pub use sender::{CommandSender, Console, Player, RELOAD_PERMISSION};
pub use translate::{CommandOutcome, TranslateCommand, COMMAND_NAME};
