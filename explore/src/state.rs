use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use tracing::{debug, trace};

use grammar::{Grammar, Word};

use crate::rewrite::apply_all_rules;
use crate::{Halt, Limits, Observer};

/// How a word was first reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationRecord {
    /// Rewrite steps from the start word.
    pub depth: usize,
    /// `None` only for the start word.
    pub parent: Option<Word>,
}

/// Exploration state for a single run.
///
/// Words move from the frontier to expanded in FIFO order. Final words are
/// recorded and collected but never enqueued.
#[derive(Debug)]
pub struct Explorer<'g, O> {
    grammar: &'g Grammar,
    limits: Limits,
    observer: O,
    frontier: VecDeque<(Word, usize)>,
    records: HashMap<Word, DerivationRecord>,
    finals: Vec<Word>,
}

impl<'g> Explorer<'g, ()> {
    pub fn new(grammar: &'g Grammar, limits: Limits) -> Self {
        Explorer {
            grammar,
            limits,
            observer: (),
            frontier: VecDeque::new(),
            records: HashMap::new(),
            finals: Vec::new(),
        }
    }
}

impl<'g, O: Observer> Explorer<'g, O> {
    /// Replace the observer notified of each newly recorded word.
    pub fn observe<P: Observer>(self, observer: P) -> Explorer<'g, P> {
        Explorer {
            grammar: self.grammar,
            limits: self.limits,
            observer,
            frontier: self.frontier,
            records: self.records,
            finals: self.finals,
        }
    }

    pub fn run(mut self) -> Exploration {
        let started = Instant::now();
        let start = self.grammar.start().clone();
        debug!(
            start = %start,
            rules = self.grammar.rules().len(),
            max_depth = self.limits.max_depth,
            "exploring"
        );

        self.records.insert(
            start.clone(),
            DerivationRecord {
                depth: 0,
                parent: None,
            },
        );
        self.classify(start.clone(), 0);

        let halt = loop {
            let (word, depth) = match self.frontier.pop_front() {
                Some(next) => next,
                None => break Halt::Exhausted,
            };
            // Depths never decrease along the queue, so nothing behind this
            // word could be expanded either.
            if depth >= self.limits.max_depth {
                break Halt::DepthBound;
            }
            if let Some(timeout) = self.limits.timeout {
                if started.elapsed() >= timeout {
                    break Halt::Timeout;
                }
            }
            if let Some(halt) = self.expand(&word, depth) {
                break halt;
            }
        };

        debug!(
            %halt,
            discovered = self.records.len(),
            finals = self.finals.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "exploration finished"
        );

        Exploration {
            start,
            finals: self.finals,
            records: self.records,
            halt,
        }
    }

    /// Record every unseen successor of `word`. Returns a halt reason if the
    /// word limit is hit.
    fn expand(&mut self, word: &Word, depth: usize) -> Option<Halt> {
        for successor in apply_all_rules(word, self.grammar.rules()) {
            if self.records.contains_key(&successor) {
                continue;
            }
            if let Some(cap) = self.limits.max_words {
                if self.records.len() >= cap {
                    return Some(Halt::WordLimit);
                }
            }

            trace!(parent = %word, child = %successor, depth = depth + 1, "discovered");
            self.observer.discovered(word, &successor, depth + 1);
            self.records.insert(
                successor.clone(),
                DerivationRecord {
                    depth: depth + 1,
                    parent: Some(word.clone()),
                },
            );
            self.classify(successor, depth + 1);
        }
        None
    }

    fn classify(&mut self, word: Word, depth: usize) {
        if self.grammar.is_final(&word) {
            self.finals.push(word);
        } else {
            self.frontier.push_back((word, depth));
        }
    }
}

/// The outcome of a run: final words plus the record of every word seen.
#[derive(Debug)]
pub struct Exploration {
    start: Word,
    finals: Vec<Word>,
    records: HashMap<Word, DerivationRecord>,
    halt: Halt,
}

impl Exploration {
    /// Final words in discovery order.
    pub fn words(&self) -> &[Word] {
        &self.finals
    }

    pub fn into_words(self) -> Vec<Word> {
        self.finals
    }

    pub fn halt(&self) -> Halt {
        self.halt
    }

    pub fn start(&self) -> &Word {
        &self.start
    }

    /// Number of distinct words recorded, final or not.
    pub fn discovered(&self) -> usize {
        self.records.len()
    }

    pub fn record(&self, word: &str) -> Option<&DerivationRecord> {
        self.records.get(word)
    }

    pub fn depth(&self, word: &str) -> Option<usize> {
        self.record(word).map(|r| r.depth)
    }

    /// The chain of words from the start word to `word` along first-discovery
    /// parents. `None` if `word` was never recorded.
    pub fn derivation(&self, word: &str) -> Option<Vec<Word>> {
        let (word, mut record) = self.records.get_key_value(word)?;
        let mut chain = vec![word.clone()];
        while let Some(parent) = &record.parent {
            chain.push(parent.clone());
            record = self.records.get(parent.as_str())?;
        }
        chain.reverse();
        Some(chain)
    }
}
