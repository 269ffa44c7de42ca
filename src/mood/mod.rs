// src/mood/mod.rs

pub mod handlers;
pub mod store;
pub mod types;

pub use store::MoodStore;
pub use types::MoodEntry;
