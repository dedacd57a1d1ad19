//! Request-payload types, validated against the shapes the API promises
//! client errors for.

mod question;
pub use question::QuestionSpec;
