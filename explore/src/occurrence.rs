use grammar::{Error, Result};

/// Iterates over the byte offsets of every occurrence of a pattern within a
/// str, including overlapping ones.
///
/// After a match at `idx` the search resumes one symbol after `idx`, not at
/// the end of the match.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    input: &'a str,
    pattern: &'a str,
    idx: usize,
}

impl<'a> Occurrences<'a> {
    /// Create a new cursor over `input`. An empty pattern would match at
    /// every position and is rejected.
    pub fn new(input: &'a str, pattern: &'a str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::InvalidRule {
                rhs: String::new(),
            });
        }
        Ok(Occurrences {
            input,
            pattern,
            idx: 0,
        })
    }

    /// Move the cursor one symbol past `pos`.
    fn skip_symbol(&mut self, pos: usize) {
        let width = self.input[pos..]
            .chars()
            .next()
            .map_or(1, |c| c.len_utf8());
        self.idx = pos + width;
    }
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let rest = self.input.get(self.idx..)?;
        let pos = self.idx + rest.find(self.pattern)?;
        self.skip_symbol(pos);
        Some(pos)
    }
}
