//! Fact definitions - the unit of learned knowledge.

use dialogue_rules::Intent;

/// A fact answers one question: `intent` + `entity` -> `answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    /// The question word this fact is filed under.
    pub intent: Intent,

    /// The subject phrase, as first written.
    pub entity: String,

    /// The answer given back to the user.
    pub answer: String,
}

impl Fact {
    /// Create a new fact.
    pub fn new(intent: Intent, entity: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            intent,
            entity: entity.into(),
            answer: answer.into(),
        }
    }

    /// Replace the answer. Returns `false` if the answer was already the same.
    pub fn set_answer(&mut self, answer: impl Into<String>) -> bool {
        let answer = answer.into();
        if self.answer == answer {
            return false;
        }
        self.answer = answer;
        true
    }
}
