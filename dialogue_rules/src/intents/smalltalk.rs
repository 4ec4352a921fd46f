//! Smalltalk: canned replies for casual openers.

use crate::matching::tokens_equal;

/// Words that open a smalltalk exchange.
pub const SMALLTALK_OPENERS: [&str; 12] = [
    "hello",
    "hey",
    "hi",
    "wassup",
    "greetings",
    "it's",
    "school",
    "like",
    "i",
    "are",
    "goodbye",
    "bye",
];

/// Check whether a word opens a smalltalk exchange.
pub fn is_smalltalk(word: &str) -> bool {
    SMALLTALK_OPENERS.iter().any(|opener| tokens_equal(word, opener))
}

/// The chatbot's answer to a smalltalk line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmalltalkReply {
    pub text: &'static str,
    /// Set for farewells; the conversation stops after this reply.
    pub ends_conversation: bool,
}

impl SmalltalkReply {
    fn say(text: &'static str) -> Self {
        Self {
            text,
            ends_conversation: false,
        }
    }
}

/// Pick a reply for a smalltalk line, given all of its words.
pub fn smalltalk_reply(words: &[&str]) -> SmalltalkReply {
    let first = words.first().copied().unwrap_or_default();
    let second = words.get(1).copied().unwrap_or_default();

    if tokens_equal(first, "goodbye") || tokens_equal(first, "bye") {
        SmalltalkReply {
            text: "Goodbye!",
            ends_conversation: true,
        }
    } else if tokens_equal(first, "it's") {
        SmalltalkReply::say("Indeed it is.")
    } else if tokens_equal(first, "school") {
        SmalltalkReply::say("School is a great place to learn new things!")
    } else if tokens_equal(first, "i") && tokens_equal(second, "like") {
        SmalltalkReply::say("I like it too!")
    } else if tokens_equal(first, "are") {
        SmalltalkReply::say("Of course I am!")
    } else {
        SmalltalkReply::say("Hello! What would you like to chat about?")
    }
}
