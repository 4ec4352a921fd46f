//! Chatbot - turns a line of user text into a reply.
//!
//! The dispatcher works as follows:
//! 1. **Parse**: Split the line into words and classify the first word
//! 2. **Strip**: Drop the optional connective ("is", "from", "as", ...)
//! 3. **Dispatch**: Answer, load, save, reset, chat, or say goodbye
//! 4. **Learn**: On an unanswered question, hand back a [`Question`] for the caller to fill in

mod input;

pub use input::*;

use dialogue_rules::{smalltalk_reply, Command, Intent, Settings};
use std::path::Path;

use crate::error::{KnowledgeError, Result};
use crate::knowledge_base::{KnowledgeStore, LoadReport};

/// A question the bot could not answer and wants the user to answer instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub intent: Intent,
    pub entity: String,
    /// What to show the user, e.g. `I don't know. what is SIT?`
    pub prompt: String,
}

/// The chatbot's response to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and keep chatting.
    Say(String),
    /// Ask the user for an answer, then call [`Chatbot::learn`].
    Ask(Question),
    /// Print this and end the conversation.
    Exit(String),
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Reply::Say(text.into())
    }

    /// The text to print for this reply.
    pub fn text(&self) -> &str {
        match self {
            Reply::Say(text) | Reply::Exit(text) => text,
            Reply::Ask(question) => &question.prompt,
        }
    }
}

/// A conversation partner backed by a knowledge store.
pub struct Chatbot {
    store: KnowledgeStore,
    settings: Settings,
}

impl Chatbot {
    /// Create a chatbot with an empty knowledge store.
    pub fn new(settings: Settings) -> Self {
        Self {
            store: KnowledgeStore::new(),
            settings,
        }
    }

    /// Create a chatbot with default settings.
    pub fn with_defaults() -> Self {
        Self::new(Settings::default())
    }

    /// Replace the knowledge store.
    pub fn with_store(mut self, store: KnowledgeStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut KnowledgeStore {
        &mut self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bot_name(&self) -> &str {
        &self.settings.bot_name
    }

    pub fn user_name(&self) -> &str {
        &self.settings.user_name
    }

    /// Load the knowledge file named in the settings, if any.
    ///
    /// Returns `Ok(None)` when no file is configured.
    pub fn preload(&mut self) -> Result<Option<LoadReport>> {
        let Some(path) = self.settings.knowledge_file.clone() else {
            return Ok(None);
        };
        self.store.load_file(&path).map(Some)
    }

    /// Respond to one line of user input.
    pub fn respond(&mut self, line: &str) -> Reply {
        let command_line = match Utterance::parse(line) {
            Utterance::Empty => return Reply::say(""),
            Utterance::Unknown(word) => {
                return Reply::say(KnowledgeError::InvalidIntent(word.to_string()).to_string())
            }
            Utterance::Command(command_line) => command_line,
        };

        match command_line.command {
            Command::Question(intent) => self.answer(intent, &command_line),
            Command::Load => self.load(&command_line.argument),
            Command::Save => self.save(&command_line.argument),
            Command::Reset => {
                self.store.reset();
                Reply::say("All data has been reset!")
            }
            Command::Exit => Reply::Exit("Goodbye!".to_string()),
            Command::Smalltalk => {
                let mut words = vec![command_line.head];
                words.extend(&command_line.words);
                let reply = smalltalk_reply(&words[..]);
                if reply.ends_conversation {
                    Reply::Exit(reply.text.to_string())
                } else {
                    Reply::say(reply.text)
                }
            }
        }
    }

    /// Record the user's answer to a question the bot could not answer.
    ///
    /// A blank answer teaches nothing. Neither does a question whose entity
    /// contains `=`: knowledge files split on the first `=`, so such a fact
    /// would come back from a save under a different entity.
    pub fn learn(&mut self, question: &Question, answer: &str) -> String {
        let answer = answer.trim();
        if answer.is_empty() {
            return ":-(".to_string();
        }
        if question.entity.contains('=') {
            tracing::warn!(entity = %question.entity, "refusing to learn entity containing '='");
            return "Sorry, I can't remember things with \"=\" in their name.".to_string();
        }
        self.store.upsert(question.intent, &question.entity, answer);
        "Thank you.".to_string()
    }

    fn answer(&self, intent: Intent, command_line: &CommandLine<'_>) -> Reply {
        let entity = command_line.argument.as_str();
        if entity.is_empty() {
            return Reply::say("No entity was found.");
        }

        match self.store.get(intent.as_str(), entity) {
            Ok(answer) => Reply::say(answer),
            Err(e) if e.is_not_found() => Reply::Ask(Question {
                intent,
                entity: entity.to_string(),
                prompt: format!("I don't know. {} {}?", command_line.lead(), entity),
            }),
            Err(e) => Reply::say(e.to_string()),
        }
    }

    fn load(&mut self, path: &str) -> Reply {
        if path.is_empty() {
            return Reply::say("Load from which file?");
        }

        match self.store.load_file(Path::new(path)) {
            Ok(report) if report.skipped > 0 => Reply::say(format!(
                "{path} has been loaded successfully. Skipped {} unreadable lines.",
                report.skipped
            )),
            Ok(_) => Reply::say(format!("{path} has been loaded successfully.")),
            Err(e) => {
                tracing::warn!(path, error = %e, "load failed");
                Reply::say(format!("Sorry, I couldn't load {path}: {e}"))
            }
        }
    }

    fn save(&self, path: &str) -> Reply {
        if path.is_empty() {
            return Reply::say("Save to which file?");
        }

        match self.store.save_file(Path::new(path)) {
            Ok(()) => Reply::say("Saved!"),
            Err(e) => {
                tracing::warn!(path, error = %e, "save failed");
                Reply::say(format!("Sorry, I couldn't save to {path}: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(bot: &mut Chatbot, line: &str) -> Question {
        match bot.respond(line) {
            Reply::Ask(question) => question,
            other => panic!("expected a question, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_word() {
        let mut bot = Chatbot::with_defaults();
        assert_eq!(
            bot.respond("banana is yellow"),
            Reply::Say("I don't understand \"banana\".".to_string())
        );
    }

    #[test]
    fn test_empty_line() {
        let mut bot = Chatbot::with_defaults();
        assert_eq!(bot.respond("   "), Reply::Say(String::new()));
    }

    #[test]
    fn test_learn_then_answer() {
        let mut bot = Chatbot::with_defaults();

        let question = ask(&mut bot, "what is SIT");
        assert_eq!(question.intent, Intent::What);
        assert_eq!(question.entity, "SIT");
        assert_eq!(question.prompt, "I don't know. what is SIT?");

        assert_eq!(bot.learn(&question, "  a university "), "Thank you.");
        assert_eq!(
            bot.respond("What is sit?"),
            Reply::Say("a university".to_string())
        );
    }

    #[test]
    fn test_blank_answer_teaches_nothing() {
        let mut bot = Chatbot::with_defaults();
        let question = ask(&mut bot, "where is SIT");

        assert_eq!(bot.learn(&question, "   "), ":-(");
        assert!(bot.store().is_empty());
    }

    #[test]
    fn test_question_without_entity() {
        let mut bot = Chatbot::with_defaults();
        assert_eq!(bot.respond("who is"), Reply::Say("No entity was found.".to_string()));
    }

    #[test]
    fn test_question_without_filler() {
        let mut bot = Chatbot::with_defaults();
        let question = ask(&mut bot, "how compile C");
        assert_eq!(question.entity, "compile C");
        assert_eq!(question.prompt, "I don't know. how compile C?");
    }

    #[test]
    fn test_reset() {
        let mut bot = Chatbot::with_defaults();
        bot.store_mut().put("who", "Ada", "a programmer").unwrap();

        assert_eq!(bot.respond("reset"), Reply::Say("All data has been reset!".to_string()));
        assert!(bot.store().is_empty());
    }

    #[test]
    fn test_exit_and_farewell() {
        let mut bot = Chatbot::with_defaults();
        assert_eq!(bot.respond("quit"), Reply::Exit("Goodbye!".to_string()));
        assert_eq!(bot.respond("bye for now"), Reply::Exit("Goodbye!".to_string()));
    }

    #[test]
    fn test_smalltalk() {
        let mut bot = Chatbot::with_defaults();
        assert_eq!(bot.respond("I like pizza").text(), "I like it too!");
        assert_eq!(
            bot.respond("hello there").text(),
            "Hello! What would you like to chat about?"
        );
    }

    #[test]
    fn test_save_and_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.ini");
        let path_str = path.to_str().unwrap();

        let mut bot = Chatbot::with_defaults();
        bot.store_mut().put("what", "SIT", "a university").unwrap();
        bot.store_mut().put("where", "SIT", "Singapore").unwrap();

        assert_eq!(
            bot.respond(&format!("save as {path_str}")),
            Reply::Say("Saved!".to_string())
        );

        bot.respond("reset");
        assert_eq!(
            bot.respond(&format!("load from {path_str}")),
            Reply::Say(format!("{path_str} has been loaded successfully."))
        );
        assert_eq!(bot.respond("where is SIT").text(), "Singapore");
    }

    #[test]
    fn test_load_reports_skipped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messy.ini");
        std::fs::write(&path, "[who]\nAda=a programmer\njunk\n").unwrap();
        let path_str = path.to_str().unwrap();

        let mut bot = Chatbot::with_defaults();
        assert_eq!(
            bot.respond(&format!("load {path_str}")).text(),
            format!("{path_str} has been loaded successfully. Skipped 1 unreadable lines.")
        );
    }

    #[test]
    fn test_file_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ini");

        let mut bot = Chatbot::with_defaults();
        bot.store_mut().put("why", "sky", "scattering").unwrap();

        let reply = bot.respond(&format!("load {}", missing.display()));
        assert!(reply.text().starts_with("Sorry, I couldn't load"));
        assert_eq!(bot.store().len(), 1);

        assert_eq!(bot.respond("load"), Reply::Say("Load from which file?".to_string()));
        assert_eq!(bot.respond("save to"), Reply::Say("Save to which file?".to_string()));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no-such-dir").join("x.ini");

        let mut bot = Chatbot::with_defaults();
        bot.store_mut().put("who", "Ada", "a programmer").unwrap();

        let reply = bot.respond(&format!("save to {}", target.display()));
        assert!(reply.text().starts_with("Sorry, I couldn't save"));
        assert_eq!(bot.respond("who is Ada").text(), "a programmer");
        assert!(!target.exists());
    }

    #[test]
    fn test_entity_with_equals_is_not_learned() {
        let mut bot = Chatbot::with_defaults();
        let question = ask(&mut bot, "what is x=y");
        assert_eq!(question.entity, "x=y");

        let reply = bot.learn(&question, "an equation");
        assert!(reply.starts_with("Sorry, I can't remember"));
        assert!(bot.store().is_empty());
    }

    #[test]
    fn test_preload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("startup.ini");
        std::fs::write(&path, "[when]\nexam=Friday\n").unwrap();

        let mut bot = Chatbot::new(Settings::new().with_knowledge_file(&path));
        let report = bot.preload().unwrap().unwrap();

        assert_eq!(report.loaded, 1);
        assert_eq!(bot.respond("when is the exam").text(), "I don't know. when is the exam?");
        assert_eq!(bot.respond("when is exam").text(), "Friday");

        assert!(Chatbot::with_defaults().preload().unwrap().is_none());
    }
}
