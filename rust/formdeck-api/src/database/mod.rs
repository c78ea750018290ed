//! SQLite-backed persistence for forms, fields, and submissions.
//!
//! The store owns durability and referential order (fields before
//! submissions before the form row on delete); everything above it deals in
//! domain types only.

pub mod form_store;
pub mod schema;

pub use form_store::FormStore;
