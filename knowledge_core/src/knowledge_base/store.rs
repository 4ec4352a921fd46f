//! Knowledge Store - the ordered collection of learned facts.

use dialogue_rules::{normalize, Intent};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::{encode, Decoder, Fact};
use crate::error::{KnowledgeError, Result};

/// What a `put` did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// A new fact was added.
    Inserted,
    /// An existing fact received a different answer.
    Updated,
    /// An existing fact already had this answer.
    Unchanged,
}

/// Summary of a `load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Records parsed and upserted, overwrites included.
    pub loaded: usize,
    /// Non-blank lines that were neither headers nor usable data.
    pub skipped: usize,
}

/// All facts for one intent, in insertion order.
#[derive(Debug, Clone)]
struct IntentGroup {
    intent: Intent,
    facts: Vec<Fact>,

    /// Index: normalized entity -> position in `facts`.
    by_entity: HashMap<String, usize>,
}

impl IntentGroup {
    fn new(intent: Intent) -> Self {
        Self {
            intent,
            facts: Vec::new(),
            by_entity: HashMap::new(),
        }
    }

    fn find(&self, entity: &str) -> Option<&Fact> {
        self.by_entity
            .get(&normalize(entity))
            .map(|&position| &self.facts[position])
    }
}

/// The knowledge base.
///
/// Facts sharing an intent are stored contiguously. Intents appear in the order
/// they were first learned, and within an intent new entities are appended, so
/// iteration order is exactly the order the text format writes.
///
/// At most one fact exists per (intent, entity) pair, where entities are
/// compared with [`dialogue_rules::tokens_equal`].
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    groups: Vec<IntentGroup>,
}

impl KnowledgeStore {
    /// Create a new empty knowledge store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a question word, failing with `InvalidIntent` if it is not one of the six.
    pub fn parse_intent(intent: &str) -> Result<Intent> {
        Intent::parse(intent).ok_or_else(|| KnowledgeError::InvalidIntent(intent.to_string()))
    }

    /// Look up the answer to a question.
    ///
    /// # Errors
    ///
    /// `InvalidIntent` if `intent` is not a question word, `NotFound` if no
    /// fact matches.
    pub fn get(&self, intent: &str, entity: &str) -> Result<&str> {
        let parsed = Self::parse_intent(intent)?;
        self.lookup(parsed, entity)
            .map(|fact| fact.answer.as_str())
            .ok_or_else(|| KnowledgeError::NotFound {
                intent: parsed.to_string(),
                entity: entity.to_string(),
            })
    }

    /// Find the fact for an intent and entity.
    pub fn lookup(&self, intent: Intent, entity: &str) -> Option<&Fact> {
        self.group(intent).and_then(|group| group.find(entity))
    }

    /// Store an answer, overwriting any existing answer for the same question.
    ///
    /// # Errors
    ///
    /// `InvalidIntent` if `intent` is not a question word; the store is left
    /// untouched.
    pub fn put(&mut self, intent: &str, entity: &str, answer: &str) -> Result<PutOutcome> {
        let parsed = Self::parse_intent(intent)?;
        Ok(self.upsert(parsed, entity, answer))
    }

    /// Typed form of [`put`](Self::put); cannot fail.
    pub fn upsert(&mut self, intent: Intent, entity: &str, answer: &str) -> PutOutcome {
        let key = normalize(entity);
        let group = self.group_mut_or_insert(intent);

        if let Some(&position) = group.by_entity.get(&key) {
            let fact = &mut group.facts[position];
            if fact.set_answer(answer) {
                tracing::debug!(%intent, entity, "updated answer");
                PutOutcome::Updated
            } else {
                PutOutcome::Unchanged
            }
        } else {
            group.by_entity.insert(key, group.facts.len());
            group.facts.push(Fact::new(intent, entity, answer));
            tracing::debug!(%intent, entity, "learned new fact");
            PutOutcome::Inserted
        }
    }

    /// Forget every fact.
    pub fn reset(&mut self) {
        let forgotten = self.len();
        self.groups.clear();
        tracing::debug!(forgotten, "knowledge base reset");
    }

    /// Merge facts from a knowledge file into the store.
    ///
    /// Returns the number of records upserted. The store is not cleared first;
    /// call [`reset`](Self::reset) for a clean load.
    ///
    /// # Errors
    ///
    /// `Io` if reading fails. Facts upserted before the failure stay in the store.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        Ok(self.load_with_report(reader)?.loaded)
    }

    /// Like [`load`](Self::load), also reporting how many lines were skipped.
    pub fn load_with_report<R: BufRead>(&mut self, reader: R) -> Result<LoadReport> {
        let mut decoder = Decoder::new(reader);
        let mut report = LoadReport::default();

        for record in decoder.by_ref() {
            let record = record?;
            self.upsert(record.intent, &record.entity, &record.answer);
            report.loaded += 1;
        }
        report.skipped = decoder.skipped();

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped,
            total = self.len(),
            "knowledge loaded"
        );
        Ok(report)
    }

    /// Write every fact in storage order.
    ///
    /// # Errors
    ///
    /// `Io` if writing fails. The store itself is never modified.
    pub fn save<W: Write>(&self, mut writer: W) -> Result<()> {
        encode(self.facts(), &mut writer)?;
        tracing::info!(facts = self.len(), "knowledge saved");
        Ok(())
    }

    /// Open `path` and [`load`](Self::load) it. The file is closed on return.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let file = File::open(path.as_ref())?;
        self.load_with_report(BufReader::new(file))
    }

    /// Create or truncate `path` and [`save`](Self::save) to it.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Iterate all facts in storage order.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.groups.iter().flat_map(|group| group.facts.iter())
    }

    /// Facts filed under one intent, in insertion order.
    pub fn facts_for(&self, intent: Intent) -> &[Fact] {
        self.group(intent).map(|g| g.facts.as_slice()).unwrap_or(&[])
    }

    /// Intents that have at least one fact, in storage order.
    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        self.groups.iter().map(|group| group.intent)
    }

    /// Get the total number of facts.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.facts.len()).sum()
    }

    /// Check whether the store holds no facts.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn group(&self, intent: Intent) -> Option<&IntentGroup> {
        self.groups.iter().find(|group| group.intent == intent)
    }

    fn group_mut_or_insert(&mut self, intent: Intent) -> &mut IntentGroup {
        let position = match self.groups.iter().position(|group| group.intent == intent) {
            Some(position) => position,
            None => {
                self.groups.push(IntentGroup::new(intent));
                self.groups.len() - 1
            }
        };
        &mut self.groups[position]
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn intent_strategy() -> impl Strategy<Value = Intent> {
        prop::sample::select(Intent::all().to_vec())
    }

    fn phrase() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9']{1,8}( [a-zA-Z0-9']{1,8}){0,2}"
    }

    proptest! {
        #[test]
        fn put_then_get(intent in intent_strategy(), entity in phrase(), answer in phrase()) {
            let mut store = KnowledgeStore::new();
            store.put(intent.as_str(), &entity, &answer).unwrap();
            prop_assert_eq!(store.get(intent.as_str(), &entity).unwrap(), answer.as_str());
        }

        #[test]
        fn put_is_idempotent(intent in intent_strategy(), entity in phrase(), answer in phrase()) {
            let mut once = KnowledgeStore::new();
            once.upsert(intent, &entity, &answer);

            let mut twice = KnowledgeStore::new();
            twice.upsert(intent, &entity, &answer);
            prop_assert_eq!(twice.upsert(intent, &entity, &answer), PutOutcome::Unchanged);

            let mut a = Vec::new();
            let mut b = Vec::new();
            once.save(&mut a).unwrap();
            twice.save(&mut b).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn intents_stay_contiguous(puts in prop::collection::vec((intent_strategy(), phrase(), phrase()), 0..40)) {
            let mut store = KnowledgeStore::new();
            for (intent, entity, answer) in &puts {
                store.upsert(*intent, entity, answer);
            }

            let mut closed: Vec<Intent> = Vec::new();
            let mut current: Option<Intent> = None;
            for fact in store.facts() {
                if current != Some(fact.intent) {
                    prop_assert!(!closed.contains(&fact.intent));
                    if let Some(previous) = current {
                        closed.push(previous);
                    }
                    current = Some(fact.intent);
                }
            }
        }

        #[test]
        fn save_load_round_trip(puts in prop::collection::vec((intent_strategy(), phrase(), phrase()), 0..40)) {
            let mut store = KnowledgeStore::new();
            for (intent, entity, answer) in &puts {
                store.upsert(*intent, entity, answer);
            }

            let mut buf = Vec::new();
            store.save(&mut buf).unwrap();
            let mut reloaded = KnowledgeStore::new();
            reloaded.load(buf.as_slice()).unwrap();

            // Intent and entity order survive the reload byte for byte.
            let mut resaved = Vec::new();
            reloaded.save(&mut resaved).unwrap();
            prop_assert_eq!(&resaved, &buf);

            prop_assert_eq!(reloaded.len(), store.len());
            for fact in store.facts() {
                prop_assert_eq!(
                    reloaded.get(fact.intent.as_str(), &fact.entity).unwrap(),
                    fact.answer.as_str()
                );
            }
        }
    }
}
