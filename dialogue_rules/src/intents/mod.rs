//! Intent definitions: the question words facts are filed under, and the
//! command words that drive the conversation.

mod smalltalk;

pub use smalltalk::*;

use serde::{Deserialize, Serialize};

use crate::matching::tokens_equal;

/// One of the six question words a fact can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Who,
    What,
    Where,
    When,
    Why,
    How,
}

impl Intent {
    /// Parse a question word.
    ///
    /// The match is exact apart from letter case and surrounding whitespace;
    /// `"WHERE"` is an intent, `"where?"` is not.
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.trim();
        Self::all()
            .into_iter()
            .find(|intent| intent.as_str().eq_ignore_ascii_case(word))
    }

    /// The lowercase question word.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Who => "who",
            Intent::What => "what",
            Intent::Where => "where",
            Intent::When => "when",
            Intent::Why => "why",
            Intent::How => "how",
        }
    }

    /// All intents in their canonical order.
    pub fn all() -> [Self; 6] {
        [
            Intent::Who,
            Intent::What,
            Intent::Where,
            Intent::When,
            Intent::Why,
            Intent::How,
        ]
    }

    /// Whether `word` may sit between the question word and the entity
    /// ("what **is** SIT", "who **are** the founders").
    pub fn accepts_filler(word: &str) -> bool {
        tokens_equal(word, "is") || tokens_equal(word, "are")
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the first word of an input line asks the chatbot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A 5W1H question about an entity.
    Question(Intent),
    /// Read a knowledge file.
    Load,
    /// Write the knowledge base to a file.
    Save,
    /// Forget everything.
    Reset,
    /// End the conversation.
    Exit,
    /// Casual chat.
    Smalltalk,
}

impl Command {
    /// Classify the first word of an input line.
    ///
    /// Returns `None` when the word is not part of the vocabulary.
    pub fn classify(word: &str) -> Option<Self> {
        if tokens_equal(word, "exit") || tokens_equal(word, "quit") {
            Some(Command::Exit)
        } else if is_smalltalk(word) {
            Some(Command::Smalltalk)
        } else if tokens_equal(word, "load") {
            Some(Command::Load)
        } else if let Some(intent) = Intent::all()
            .into_iter()
            .find(|intent| tokens_equal(word, intent.as_str()))
        {
            Some(Command::Question(intent))
        } else if tokens_equal(word, "reset") {
            Some(Command::Reset)
        } else if tokens_equal(word, "save") {
            Some(Command::Save)
        } else {
            None
        }
    }

    /// Whether `word` is an optional connective after this command
    /// ("load **from** kb.ini", "save **as** kb.ini").
    pub fn accepts_filler(&self, word: &str) -> bool {
        match self {
            Command::Question(_) => Intent::accepts_filler(word),
            Command::Load => tokens_equal(word, "from"),
            Command::Save => tokens_equal(word, "as") || tokens_equal(word, "to"),
            Command::Reset | Command::Exit | Command::Smalltalk => false,
        }
    }

    /// Every word that can start a recognized command.
    pub fn vocabulary() -> Vec<&'static str> {
        let mut words: Vec<&'static str> = Intent::all().iter().map(Intent::as_str).collect();
        words.extend(["load", "save", "reset", "exit", "quit"]);
        words.extend(SMALLTALK_OPENERS);
        words
    }
}
