//! Input parsing: from a raw line to a command and its argument.

use dialogue_rules::Command;

/// Split a line into whitespace-separated words.
pub fn split_words(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// A line of input, classified by its first word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance<'a> {
    /// Nothing but whitespace.
    Empty,
    /// The first word is not in the vocabulary.
    Unknown(&'a str),
    /// A recognized command.
    Command(CommandLine<'a>),
}

/// A recognized command with its words taken apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    pub command: Command,
    /// The first word, as typed.
    pub head: &'a str,
    /// The optional connective after the head ("is", "from", "as", ...).
    pub filler: Option<&'a str>,
    /// Every word after the head, connective included.
    pub words: Vec<&'a str>,
    /// The remaining words joined by single spaces: the entity or file name.
    pub argument: String,
}

impl<'a> CommandLine<'a> {
    /// The words the user used to ask, without the argument ("what is").
    pub fn lead(&self) -> String {
        match self.filler {
            Some(filler) => format!("{} {}", self.head, filler),
            None => self.head.to_string(),
        }
    }
}

impl<'a> Utterance<'a> {
    /// Parse one line of user input.
    pub fn parse(line: &'a str) -> Self {
        let words = split_words(line);
        let Some((&head, rest)) = words.split_first() else {
            return Utterance::Empty;
        };

        let Some(command) = Command::classify(head) else {
            return Utterance::Unknown(head);
        };

        let (filler, argument_words) = match rest.split_first() {
            Some((&second, tail)) if command.accepts_filler(second) => (Some(second), tail),
            _ => (None, rest),
        };

        Utterance::Command(CommandLine {
            command,
            head,
            filler,
            words: rest.to_vec(),
            argument: argument_words.join(" "),
        })
    }
}
