//! The interactive conversation loop.

use std::io::{self, Write};

use crate::chatbot::{Chatbot, Question, Reply};
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::error::ReplError;

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor, W: Write = io::Stdout> {
    /// The line editor for input.
    editor: E,

    /// Where the bot's lines are printed.
    out: W,

    /// The bot being talked to.
    chatbot: Chatbot,

    /// Whether to greet the user before the first prompt.
    show_banner: bool,
}

impl Repl<RustylineEditor, io::Stdout> {
    /// Creates a new REPL on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(chatbot: Chatbot) -> Result<Self, ReplError> {
        Ok(Self::with_parts(RustylineEditor::new()?, io::stdout(), chatbot))
    }
}

impl<E: LineEditor, W: Write> Repl<E, W> {
    /// Creates a new REPL from an editor and an output sink.
    pub fn with_parts(editor: E, out: W, chatbot: Chatbot) -> Self {
        Self {
            editor,
            out,
            chatbot,
            show_banner: true,
        }
    }

    /// Disables the greeting.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the chatbot.
    pub fn chatbot(&self) -> &Chatbot {
        &self.chatbot
    }

    /// Consumes the REPL, returning the chatbot and the output sink.
    pub fn into_parts(self) -> (Chatbot, W) {
        (self.chatbot, self.out)
    }

    /// Runs the conversation until the user leaves.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), ReplError> {
        if self.show_banner {
            let greeting = format!(
                "Hello, I'm {}. Ask me who, what, where, when, why or how.",
                self.chatbot.bot_name()
            );
            self.say(&greeting)?;
        }

        let prompt = format!("{}: ", self.chatbot.user_name());
        loop {
            let line = match self.editor.read_line(&prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => {
                    self.say("Goodbye!")?;
                    break;
                }
            };

            if !line.trim().is_empty() {
                self.editor.add_history(&line);
            }

            match self.chatbot.respond(&line) {
                Reply::Say(text) if text.is_empty() => {}
                Reply::Say(text) => self.say(&text)?,
                Reply::Ask(question) => {
                    if !self.learn(&question, &prompt)? {
                        break;
                    }
                }
                Reply::Exit(text) => {
                    self.say(&text)?;
                    break;
                }
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Ask the user to answer `question`. Returns `false` if input ended.
    fn learn(&mut self, question: &Question, prompt: &str) -> Result<bool, ReplError> {
        self.say(&question.prompt)?;
        let reply = match self.editor.read_line(prompt)? {
            ReadResult::Line(answer) => self.chatbot.learn(question, &answer),
            ReadResult::Interrupted => ":-(".to_string(),
            ReadResult::Eof => {
                self.say("Goodbye!")?;
                return Ok(false);
            }
        };
        self.say(&reply)?;
        Ok(true)
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}: {}", self.chatbot.bot_name(), text)
    }
}
