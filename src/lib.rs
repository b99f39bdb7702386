pub mod api;
pub mod cart;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod store;
