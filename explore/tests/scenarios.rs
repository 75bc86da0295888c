//! End-to-end explorations of small grammars loaded from their text form.

use std::collections::{BTreeSet, HashSet};

use explore::{apply_rule, generate_words, generate_words_with, Explorer, Halt, Limits};
use grammar::{Grammar, Word};

fn load(src: &str) -> Grammar {
    src.parse().unwrap()
}

fn strs(words: &[Word]) -> Vec<&str> {
    words.iter().map(Word::as_str).collect()
}

#[test]
fn right_linear() {
    let g = load("S\nS\nab\nS=aS|b\n");
    let words = generate_words(&g, 3);
    assert_eq!(strs(&words), vec!["b", "ab", "aab"]);
}

#[test]
fn zero_depth() {
    let g = load("S\nS\nab\nS=aS|b\n");
    assert!(generate_words(&g, 0).is_empty());

    let g = load("ab\nS\nab\na=S\n");
    assert_eq!(strs(&generate_words(&g, 0)), vec!["ab"]);
}

#[test]
fn unused_rule_contributes_nothing() {
    let with = load("S\nSX\nabx\nS=aS|b\nX=x\n");
    let without = load("S\nS\nab\nS=aS|b\n");
    assert_eq!(generate_words(&with, 6), generate_words(&without, 6));
}

#[test]
fn balanced_parens() {
    // S -> (S) | SS | empty, explored up to depth 5.
    let g = load("S\nS\n()\nS=(S)|SS|\n");
    let ex = Explorer::new(&g, Limits::depth(5)).run();

    let got: BTreeSet<&str> = ex.words().iter().map(Word::as_str).collect();
    for w in &got {
        let mut open = 0i32;
        for c in w.chars() {
            open += if c == '(' { 1 } else { -1 };
            assert!(open >= 0, "unbalanced word: {}", w);
        }
        assert_eq!(open, 0, "unbalanced word: {}", w);
    }
    assert!(got.contains(""));
    assert!(got.contains("()"));
    assert!(got.contains("(())"));
    assert!(got.contains("()()"));
}

#[test]
fn same_depth_groups() {
    // Words of one depth come out together, whatever their order inside the
    // group.
    let g = load("S\nSA\nab\nS=AA\nA=a|b\n");
    let ex = Explorer::new(&g, Limits::depth(5)).run();
    assert_eq!(ex.halt(), Halt::Exhausted);

    let got: HashSet<&str> = ex.words().iter().map(Word::as_str).collect();
    let expected: HashSet<&str> = vec!["aa", "ab", "ba", "bb"].into_iter().collect();
    assert_eq!(got, expected);
}

#[test]
fn context_sensitive_rules() {
    // a^n b^n c^n for n >= 1.
    let g = load("S\nSBC\nabc\nS=aSBC|aBC\nCB=BC\naB=ab\nbB=bb\nbC=bc\ncC=cc\n");
    let words = generate_words(&g, 10);
    assert!(words.iter().any(|w| w == "abc"), "words: {:?}", words);
    assert!(words.iter().any(|w| w == "aabbcc"), "words: {:?}", words);
    for w in &words {
        let n = w.len() / 3;
        let expected = format!("{}{}{}", "a".repeat(n), "b".repeat(n), "c".repeat(n));
        assert_eq!(w.as_str(), expected);
    }
}

#[test]
fn trace_transitions() {
    let g = load("S\nS\nab\nS=aS|b\n");
    let mut lines = Vec::new();
    let words = generate_words_with(&g, 2, |parent: &Word, child: &Word, _depth: usize| {
        lines.push(format!("{} -> {}", parent, child))
    });
    assert_eq!(strs(&words), vec!["b", "ab"]);
    assert_eq!(lines, vec!["S -> aS", "S -> b", "aS -> aaS", "aS -> ab"]);
}

#[test]
fn overlapping_rewrites() {
    let got: HashSet<Word> = apply_rule("aa", "a", "b").unwrap().into_iter().collect();
    let expected: HashSet<Word> = vec![Word::from("ba"), Word::from("ab")].into_iter().collect();
    assert_eq!(got, expected);
}

#[test]
fn self_loop_terminates() {
    let g = load("S\nS\na\nS=S|a\n");
    let ex = Explorer::new(&g, Limits::depth(100)).run();
    assert_eq!(strs(ex.words()), vec!["a"]);
    assert_eq!(ex.halt(), Halt::Exhausted);
}
