use std::fmt::{self, Display};
use std::time::Duration;

/// Bounds on a single exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Words at this depth are recorded but never expanded.
    pub max_depth: usize,
    /// Maximum number of distinct words recorded, the start word included.
    pub max_words: Option<usize>,
    /// Wall-clock budget, checked before each expansion.
    pub timeout: Option<Duration>,
}

impl Limits {
    pub fn depth(max_depth: usize) -> Self {
        Limits {
            max_depth,
            max_words: None,
            timeout: None,
        }
    }

    pub fn with_max_words(self, max_words: usize) -> Self {
        Limits {
            max_words: Some(max_words),
            ..self
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Limits {
            timeout: Some(timeout),
            ..self
        }
    }
}

/// Why an exploration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// Every reachable intermediate word within the depth bound was expanded.
    Exhausted,
    /// A word at the maximum depth reached the front of the queue.
    DepthBound,
    WordLimit,
    Timeout,
}

impl Halt {
    /// Whether the result holds every final word within the depth bound.
    pub fn is_complete(self) -> bool {
        matches!(self, Halt::Exhausted | Halt::DepthBound)
    }
}

impl Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Halt::Exhausted => write!(f, "no words left to expand"),
            Halt::DepthBound => write!(f, "reached maximum depth"),
            Halt::WordLimit => write!(f, "reached word limit"),
            Halt::Timeout => write!(f, "timed out"),
        }
    }
}
