// src/lib.rs

pub mod api;
pub mod chat;
pub mod checkin;
pub mod config;
pub mod db;
pub mod exercise;
pub mod expression;
pub mod llm;
pub mod mood;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod state;
pub mod voice;

pub use state::AppState;
