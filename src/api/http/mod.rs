// src/api/http/mod.rs
// REST surface: shared handler helpers plus router composition.

pub mod common;
pub mod handlers;
pub mod router;

pub use router::api_router;
