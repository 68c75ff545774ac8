// src/lib.rs

pub mod config;
pub mod core;
pub mod deck;
pub mod error;
pub mod logging;
pub mod render;
pub mod speech;
pub use crate::core::engine::{DeckSession, SessionOptions};
pub use crate::core::types::{OrderMode, Side, WordEntry};
pub use crate::deck::Deck;
