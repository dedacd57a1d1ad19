//! DB-compatible (e.g. de/serialisable) types.
//!
//! The types in this module are serialised in a DB-friendly way, e.g. IDs
//! live under `_id`.

mod choice;
pub use choice::Choice;

mod question;
pub use question::Question;

mod vote;
pub use vote::{NewVote, Vote};
