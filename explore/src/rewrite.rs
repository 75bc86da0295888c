use indexmap::IndexSet;

use grammar::{Error, Result, Rule, Word};

use crate::occurrence::Occurrences;

/// Rewrites one occurrence of `lhs` in `word` into `rhs`, once for every
/// occurrence. Overlapping occurrences each produce their own word, and
/// rewrites never compound: `"aa"` under `a -> b` gives `["ba", "ab"]`.
///
/// Words are returned in the order their occurrence appears in `word`.
pub fn apply_rule(word: &str, lhs: &str, rhs: &str) -> Result<Vec<Word>> {
    let occurrences = Occurrences::new(word, lhs).map_err(|_| Error::InvalidRule {
        rhs: rhs.to_owned(),
    })?;
    Ok(occurrences
        .map(|pos| replace_at(word, pos, lhs.len(), rhs))
        .collect())
}

/// Same as `apply_rule`, for a rule whose left-hand side is known to be
/// non-empty.
pub fn rewrite(word: &str, rule: &Rule) -> Vec<Word> {
    let (lhs, rhs) = (rule.lhs().as_str(), rule.rhs().as_str());
    Occurrences::new(word, lhs)
        .into_iter()
        .flatten()
        .map(|pos| replace_at(word, pos, lhs.len(), rhs))
        .collect()
}

/// Rules whose left-hand side occurs at least once in `word`, in declared
/// order.
pub fn applicable_rules<'a>(word: &'a str, rules: &'a [Rule]) -> impl Iterator<Item = &'a Rule> {
    rules.iter().filter(move |rule| word.contains(rule.lhs().as_str()))
}

/// Every one-step successor of `word` under `rules`.
///
/// Successors produced by several rules or occurrences appear once, at the
/// position where they were first produced.
pub fn apply_all_rules(word: &str, rules: &[Rule]) -> IndexSet<Word> {
    let mut successors = IndexSet::new();
    for rule in applicable_rules(word, rules) {
        successors.extend(rewrite(word, rule));
    }
    successors
}

fn replace_at(word: &str, pos: usize, len: usize, rhs: &str) -> Word {
    let mut out = String::with_capacity(word.len() - len + rhs.len());
    out.push_str(&word[..pos]);
    out.push_str(rhs);
    out.push_str(&word[pos + len..]);
    out.into()
}
