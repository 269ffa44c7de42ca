// src/checkin/mod.rs

pub mod handlers;
pub mod store;
pub mod types;

pub use store::{CheckinError, CheckinStore};
pub use types::CheckinEntry;
