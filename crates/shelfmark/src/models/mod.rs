//! Request payload models.
//!
//! Typed, explicitly deserialized request bodies for the web boundary.
//! Field mapping is checked at compile time through serde derives; there
//! is no reflective form binding. Each payload converts into the core
//! draft types that the repositories accept.

mod publication;
mod review;

pub use publication::{CreateAuthor, CreateKeyword, CreatePublication, CreateSource};
pub use review::CreateReview;
