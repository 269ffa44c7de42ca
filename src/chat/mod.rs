// src/chat/mod.rs
// Text companion chat: persisted exchanges plus a rolling in-memory context
// window per user.

pub mod handlers;
pub mod service;
pub mod store;
pub mod types;

pub use service::ChatService;
pub use store::ChatStore;
pub use types::ChatRecord;
