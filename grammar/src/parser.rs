use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::{all_consuming, map},
    multi::separated_list0,
    sequence::separated_pair,
    IResult,
};
use tracing::debug;

use crate::{Error, Grammar, Result, Rule};

const HEADERS: [&str; 3] = ["start word", "non-terminal alphabet", "terminal alphabet"];

/// One `LHS=RHS1|RHS2|...` line, borrowed from the source.
#[derive(PartialEq, Eq, Debug)]
pub struct RuleLine<'a> {
    pub lhs: &'a str,
    pub alternatives: Vec<&'a str>,
}

pub fn rule_line(input: &str) -> IResult<&str, RuleLine> {
    map(
        separated_pair(
            take_till(|c: char| c == '='),
            char('='),
            separated_list0(char('|'), take_till(|c: char| c == '|' || c == '=')),
        ),
        |(lhs, alternatives)| RuleLine { lhs, alternatives },
    )(input)
}

/// Parses a full grammar source: three header lines followed by rule lines.
/// Trailing whitespace on every line is ignored.
pub fn grammar(input: &str) -> Result<Grammar> {
    let mut lines = input.lines().map(str::trim_end);

    let mut headers = Vec::with_capacity(HEADERS.len());
    for (idx, name) in HEADERS.iter().enumerate() {
        match lines.next() {
            Some(line) => headers.push(line),
            None => return Err(Error::format(idx + 1, format!("missing {}", name))),
        }
    }

    let mut rules = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + HEADERS.len() + 1;
        let (_, parsed) = all_consuming(rule_line)(line).map_err(|e| Error::from_nom(line_no, e))?;
        for rhs in parsed.alternatives {
            rules.push(Rule::new(parsed.lhs, rhs)?);
        }
    }

    debug!(
        start = headers[0],
        rules = rules.len(),
        "parsed grammar source"
    );

    Ok(Grammar {
        start: headers[0].into(),
        non_terminals: headers[1].into(),
        terminals: headers[2].into(),
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;

    struct TestCase<T> {
        input: &'static str,
        // Some indicates success, None indicates error.
        out: Option<IResult<&'static str, T>>,
    }

    fn assert_test_cases<T, F>(f: F, tests: Vec<TestCase<T>>)
    where
        T: Debug + Eq,
        F: Fn(&'static str) -> IResult<&'static str, T>,
    {
        for t in tests {
            let res = f(t.input);
            match t.out {
                Some(out) => assert_eq!(res, out, "input: {:?}", t.input),
                None => assert!(res.is_err(), "expected error: {:?}", res),
            }
        }
    }

    #[test]
    fn parse_rule_line() {
        let tests = vec![
            TestCase {
                input: "S=aS|b",
                out: Some(Ok((
                    "",
                    RuleLine {
                        lhs: "S",
                        alternatives: vec!["aS", "b"],
                    },
                ))),
            },
            TestCase {
                input: "ab=",
                out: Some(Ok((
                    "",
                    RuleLine {
                        lhs: "ab",
                        alternatives: vec![""],
                    },
                ))),
            },
            TestCase {
                input: "S=a||b|",
                out: Some(Ok((
                    "",
                    RuleLine {
                        lhs: "S",
                        alternatives: vec!["a", "", "b", ""],
                    },
                ))),
            },
            TestCase {
                input: "=a",
                out: Some(Ok((
                    "",
                    RuleLine {
                        lhs: "",
                        alternatives: vec!["a"],
                    },
                ))),
            },
            // A second separator stops the alternatives.
            TestCase {
                input: "S=a=b",
                out: Some(Ok((
                    "=b",
                    RuleLine {
                        lhs: "S",
                        alternatives: vec!["a"],
                    },
                ))),
            },
            TestCase {
                input: "Sab",
                out: None,
            },
            TestCase {
                input: "",
                out: None,
            },
        ];

        assert_test_cases(rule_line, tests);
    }

    #[test]
    fn parse_grammar() {
        let g = grammar("S\nS\nab\nS=aS|b\n").unwrap();
        let expected = Grammar::new("S", "S", "ab", vec![("S", "aS"), ("S", "b")]).unwrap();
        assert_eq!(g, expected);
    }

    #[test]
    fn parse_grammar_trims_line_ends() {
        let g = grammar("S  \r\nSA\t\r\nab\r\nS=A \r\nA=a|b\r\n").unwrap();
        let expected =
            Grammar::new("S", "SA", "ab", vec![("S", "A"), ("A", "a"), ("A", "b")]).unwrap();
        assert_eq!(g, expected);
    }

    #[test]
    fn parse_grammar_headers_only() {
        let g = grammar("ab\n\nab").unwrap();
        assert!(g.rules().is_empty());
        assert!(g.non_terminals().is_empty());
        assert_eq!(g.start(), "ab");
    }

    #[test]
    fn missing_headers() {
        let tests = vec![("", 1), ("S", 2), ("S\nS\n", 3)];
        for test in tests {
            match grammar(test.0) {
                Err(Error::Format { line, .. }) => assert_eq!(line, test.1, "input: {:?}", test.0),
                other => panic!("expected format error for {:?}, got {:?}", test.0, other),
            }
        }
    }

    #[test]
    fn malformed_rule_lines() {
        let tests = vec![
            ("S\nS\nab\nS=b\nSb\n", 5),
            ("S\nS\nab\nS=a=b\n", 4),
            ("S\nS\nab\nS=b\n\nS=a\n", 5),
        ];
        for test in tests {
            match grammar(test.0) {
                Err(Error::Format { line, .. }) => assert_eq!(line, test.1, "input: {:?}", test.0),
                other => panic!("expected format error for {:?}, got {:?}", test.0, other),
            }
        }
    }

    #[test]
    fn empty_lhs_is_invalid_rule() {
        let err = grammar("S\nS\nab\n=b\n").unwrap_err();
        assert!(matches!(err, Error::InvalidRule { .. }), "got {:?}", err);
    }
}
