//! Breadth-first enumeration of the terminal words of a string-rewriting
//! grammar.

use grammar::{Grammar, Word};

mod limits;
mod occurrence;
mod rewrite;
mod state;

pub use limits::{Halt, Limits};
pub use occurrence::Occurrences;
pub use rewrite::{applicable_rules, apply_all_rules, apply_rule, rewrite};
pub use state::{DerivationRecord, Exploration, Explorer};

/// Receives every transition as soon as the child word is first recorded.
pub trait Observer {
    fn discovered(&mut self, parent: &Word, child: &Word, depth: usize);
}

impl Observer for () {
    fn discovered(&mut self, _parent: &Word, _child: &Word, _depth: usize) {}
}

impl<F: FnMut(&Word, &Word, usize)> Observer for F {
    fn discovered(&mut self, parent: &Word, child: &Word, depth: usize) {
        self(parent, child, depth)
    }
}

/// Final words reachable from the start word in at most `max_depth` rewrite
/// steps, in the order they were discovered.
pub fn generate_words(grammar: &Grammar, max_depth: usize) -> Vec<Word> {
    Explorer::new(grammar, Limits::depth(max_depth))
        .run()
        .into_words()
}

/// Like `generate_words`, reporting each transition to `observer`.
pub fn generate_words_with<O: Observer>(
    grammar: &Grammar,
    max_depth: usize,
    observer: O,
) -> Vec<Word> {
    Explorer::new(grammar, Limits::depth(max_depth))
        .observe(observer)
        .run()
        .into_words()
}
