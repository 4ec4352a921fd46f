//! Knowledge Base module - the chatbot's long-term memory.
//!
//! The knowledge base consists of:
//! - **Facts**: (intent, entity, answer) triples
//! - **Store**: the ordered collection of facts, grouped by intent
//! - **Codec**: the grouped `[intent]` / `entity=answer` text format

mod codec;
mod fact;
mod store;

pub use codec::*;
pub use fact::*;
pub use store::*;
