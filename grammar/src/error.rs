use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A grammar source line could not be parsed. Lines are numbered from 1.
    #[error("malformed grammar at line {line}: {reason}")]
    Format { line: usize, reason: String },
    /// A rule with an empty left-hand side. It would match at every position
    /// of every word.
    #[error("rule with empty left-hand side (rewrites to {rhs:?})")]
    InvalidRule { rhs: String },
    #[error("failed to read grammar: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Error {
        Error::Format {
            line,
            reason: reason.into(),
        }
    }

    /// Converts a nom failure on some line into a format error.
    pub(crate) fn from_nom(line: usize, err: nom::Err<nom::error::Error<&str>>) -> Error {
        let reason = match err {
            nom::Err::Incomplete(_) => "unexpected end of line".to_owned(),
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.code {
                nom::error::ErrorKind::Eof if e.input.starts_with('=') => {
                    "more than one '=' separator".to_owned()
                }
                nom::error::ErrorKind::Eof => {
                    format!("unexpected trailing input {:?}", e.input)
                }
                nom::error::ErrorKind::Char => "expected '=' separator".to_owned(),
                kind => format!("{:?} near {:?}", kind, e.input),
            },
        };
        Error::format(line, reason)
    }
}
