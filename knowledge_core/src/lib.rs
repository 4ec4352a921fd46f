//! # Knowledge Core
//!
//! The chatbot's brain. This crate stores what the bot has learned, reads and
//! writes knowledge files, and turns lines of user text into replies.
//!
//! ## Core Components
//!
//! - **knowledge_base**: Facts filed by (intent, entity), grouped by intent, and the text format they persist in
//! - **chatbot**: Classifies a line of input and answers, learns, loads, saves, or resets
//! - **repl**: The interactive conversation loop on top of a line editor
//!
//! ## Learning Flow
//!
//! A question the store cannot answer comes back as [`Reply::Ask`]. The caller
//! collects an answer from the user and hands it to [`Chatbot::learn`], after
//! which the same question is answered from memory.

pub mod chatbot;
pub mod editor;
pub mod error;
pub mod knowledge_base;
pub mod repl;

pub use chatbot::*;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use error::*;
pub use knowledge_base::*;
pub use repl::Repl;
