//! Parser module for the STDL format
//!
//! Parsing runs in two steps over the logos token stream:
//!
//! - the chumsky grammar in [`document`] validates the text and flattens it into
//!   [`events::Event`]s, in the order its rules complete
//! - the [`builder::Builder`] replays those events with an explicit open-node stack,
//!   registering identifiers and checking every reference for cycles as it goes
//!
//! Either step may fail; nothing is returned to the caller unless both succeed.

pub mod api;
pub mod builder;
pub mod combinators;
pub mod document;
pub mod events;
#[cfg(test)]
mod tests;

pub use api::parse_document;
