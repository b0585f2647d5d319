//! Round entry: the transient draft of a round's scores.
//!
//! An entry exists only while the controller has a round open. It is
//! discarded on commit or cancel and never reaches storage.

pub mod staged;

pub use staged::{StagedEntry, StagedValue, MAX_STAGED_DIGITS};
