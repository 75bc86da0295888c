use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display};
use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use tracing::debug;

mod error;
pub use error::{Error, Result};
mod parser;

/// A sequence of symbols. Cloning is cheap, equality and hashing are by
/// value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(Rc<str>);

impl Word {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols in the word.
    pub fn symbol_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<String> for Word {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// A set of symbols, written as the string of its members.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Alphabet(BTreeSet<char>);

impl Alphabet {
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl From<&str> for Alphabet {
    fn from(s: &str) -> Self {
        Self(s.chars().collect())
    }
}

/// A production rule rewriting one occurrence of `lhs` into `rhs`.
///
/// The left-hand side is never empty.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rule {
    lhs: Word,
    rhs: Word,
}

impl Rule {
    pub fn new(lhs: impl Into<Word>, rhs: impl Into<Word>) -> Result<Self> {
        let lhs = lhs.into();
        let rhs = rhs.into();
        if lhs.is_empty() {
            return Err(Error::InvalidRule {
                rhs: rhs.as_str().to_owned(),
            });
        }
        Ok(Rule { lhs, rhs })
    }

    pub fn lhs(&self) -> &Word {
        &self.lhs
    }

    pub fn rhs(&self) -> &Word {
        &self.rhs
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.lhs, self.rhs)
    }
}

/// A start word, two alphabets and an ordered list of rules.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grammar {
    start: Word,
    non_terminals: Alphabet,
    terminals: Alphabet,
    rules: Vec<Rule>,
}

impl Grammar {
    /// Builds a grammar from `(lhs, rhs)` pairs, keeping their order. Fails
    /// on the first pair with an empty left-hand side.
    pub fn new<W, I, L, R>(start: W, non_terminals: &str, terminals: &str, rules: I) -> Result<Self>
    where
        W: Into<Word>,
        I: IntoIterator<Item = (L, R)>,
        L: Into<Word>,
        R: Into<Word>,
    {
        let rules = rules
            .into_iter()
            .map(|(lhs, rhs)| Rule::new(lhs, rhs))
            .collect::<Result<Vec<_>>>()?;
        Ok(Grammar {
            start: start.into(),
            non_terminals: non_terminals.into(),
            terminals: terminals.into(),
            rules,
        })
    }

    /// Reads and parses a grammar file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let grammar: Grammar = data.parse()?;
        debug!(
            path = %path.display(),
            rules = grammar.rules.len(),
            "loaded grammar"
        );
        Ok(grammar)
    }

    pub fn start(&self) -> &Word {
        &self.start
    }

    pub fn non_terminals(&self) -> &Alphabet {
        &self.non_terminals
    }

    pub fn terminals(&self) -> &Alphabet {
        &self.terminals
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether every symbol of `word` is a terminal. The empty word is final.
    pub fn is_final(&self, word: &str) -> bool {
        word.chars().all(|c| self.terminals.contains(c))
    }

    /// Symbols used by the start word or any rule that belong to neither
    /// alphabet.
    pub fn undeclared_symbols(&self) -> BTreeSet<char> {
        let rule_symbols = self
            .rules
            .iter()
            .flat_map(|rule| rule.lhs.chars().chain(rule.rhs.chars()));
        self.start
            .chars()
            .chain(rule_symbols)
            .filter(|&c| !self.terminals.contains(c) && !self.non_terminals.contains(c))
            .collect()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.start)?;
        writeln!(f, "{}", self.non_terminals)?;
        writeln!(f, "{}", self.terminals)?;

        // Consecutive rules sharing a left-hand side go on one line.
        let mut rules = self.rules.iter().peekable();
        while let Some(rule) = rules.next() {
            write!(f, "{}={}", rule.lhs, rule.rhs)?;
            while let Some(next) = rules.next_if(|next| next.lhs == rule.lhs) {
                write!(f, "|{}", next.rhs)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::grammar(s)
    }
}
