//! Text codec for knowledge files.
//!
//! A knowledge file is a sequence of blocks, one per intent:
//!
//! ```text
//! [what]
//! SIT=a university
//! ICT1002=a C programming module
//!
//! [where]
//! SIT=Singapore
//! ```
//!
//! Data lines split on the first `=`, so answers may contain `=` themselves.
//! Decoding is forgiving: lines that fit nowhere are skipped and counted, never
//! reported as errors. Only I/O failures stop a decode.

use dialogue_rules::Intent;
use std::io::{self, BufRead, Write};

use super::Fact;

/// One parsed `entity=answer` line, tagged with its block's intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub intent: Intent,
    pub entity: String,
    pub answer: String,
}

/// How a single line of a knowledge file reads on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace only.
    Blank,
    /// `[intent]` (brackets optional) naming a known intent.
    Header(Intent),
    /// `[name]` naming something that is not an intent.
    UnknownHeader(&'a str),
    /// `entity=answer`, both sides trimmed.
    Data { entity: &'a str, answer: &'a str },
    /// Anything else.
    Malformed,
}

impl<'a> Line<'a> {
    /// Classify one line of input. Surrounding whitespace (including `\r`) is ignored.
    pub fn classify(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Line::Blank;
        }

        if let Some((entity, answer)) = line.split_once('=') {
            return Line::Data {
                entity: entity.trim(),
                answer: answer.trim(),
            };
        }

        let name = line.trim_start_matches('[').trim_end_matches(']').trim();
        if let Some(intent) = Intent::parse(name) {
            Line::Header(intent)
        } else if line.starts_with('[') && line.ends_with(']') {
            Line::UnknownHeader(name)
        } else {
            Line::Malformed
        }
    }
}

/// Where the decoder is within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// No header seen yet; data lines have nowhere to go.
    AwaitingHeader,
    /// Inside the block of a known intent.
    InBlock(Intent),
    /// Inside the block of an unknown header; its data is ignored.
    SkippingBlock,
}

/// Streaming decoder over a knowledge file.
///
/// Yields one [`Record`] per accepted data line. After an I/O error the
/// decoder yields that error once and then stops.
pub struct Decoder<R> {
    reader: R,
    state: DecodeState,
    buffer: Vec<u8>,
    line_number: usize,
    skipped: usize,
    finished: bool,
}

impl<R: BufRead> Decoder<R> {
    /// Create a decoder reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: DecodeState::AwaitingHeader,
            buffer: Vec::new(),
            line_number: 0,
            skipped: 0,
            finished: false,
        }
    }

    /// Number of non-blank lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn skip(&mut self, reason: &str) {
        self.skipped += 1;
        tracing::debug!(line = self.line_number, reason, "skipping knowledge file line");
    }

    /// Feed one line through the state machine.
    fn step(&mut self, raw: &str) -> Option<Record> {
        match Line::classify(raw) {
            Line::Blank => None,
            Line::Header(intent) => {
                self.state = DecodeState::InBlock(intent);
                None
            }
            Line::UnknownHeader(name) => {
                tracing::debug!(line = self.line_number, header = name, "ignoring unknown header");
                self.state = DecodeState::SkippingBlock;
                None
            }
            Line::Data { entity, answer } => match self.state {
                DecodeState::InBlock(intent) => Some(Record {
                    intent,
                    entity: entity.to_string(),
                    answer: answer.to_string(),
                }),
                DecodeState::AwaitingHeader => {
                    self.skip("data before any header");
                    None
                }
                DecodeState::SkippingBlock => {
                    self.skip("data under unknown header");
                    None
                }
            },
            Line::Malformed => {
                self.skip("neither header nor data");
                None
            }
        }
    }
}

impl<R: BufRead> Iterator for Decoder<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => self.finished = true,
                Ok(_) => {
                    self.line_number += 1;
                    // Invalid UTF-8 is replaced rather than rejected, so a damaged
                    // line costs at most that line.
                    let line = String::from_utf8_lossy(&self.buffer).into_owned();
                    if let Some(record) = self.step(&line) {
                        return Some(Ok(record));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Write facts in the grouped text format.
///
/// A header is written whenever the intent changes from the previous fact, and
/// groups are separated by a single blank line. Facts are expected to arrive
/// grouped by intent; interleaved input yields repeated headers.
pub fn encode<'a, W, I>(facts: I, writer: &mut W) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a Fact>,
{
    let mut previous: Option<Intent> = None;

    for fact in facts {
        if previous != Some(fact.intent) {
            if previous.is_some() {
                writeln!(writer)?;
            }
            writeln!(writer, "[{}]", fact.intent)?;
            previous = Some(fact.intent);
        }
        writeln!(writer, "{}={}", fact.entity, fact.answer)?;
    }

    Ok(())
}
