//! # Dialogue Rules
//!
//! The vocabulary of the chatbot - question intents, command words, smalltalk
//! phrases, the token matcher used to compare words, and bot settings.
//! This crate holds no knowledge and performs no I/O beyond reading a settings file.

pub mod intents;
pub mod matching;
pub mod settings;

pub use intents::*;
pub use matching::*;
pub use settings::*;
