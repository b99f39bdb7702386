//! Query/mutation functions grouped by entity.
//!
//! Everything is generic over [`sea_orm::ConnectionTrait`] so the same
//! functions run inside a handler's transaction or against a bare
//! connection in tests.

pub mod catalog;
pub mod categories;
pub mod customers;
pub mod orders;
