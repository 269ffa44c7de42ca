// src/expression/mod.rs
// Emotion detection endpoint backing the avatar's expression state.

pub mod handlers;
