// src/exercise/mod.rs
// Read-only coping-exercise catalog, seeded at startup.

pub mod handlers;
pub mod store;
pub mod types;

pub use store::ExerciseStore;
pub use types::{Difficulty, Exercise};
