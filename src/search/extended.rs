//! Extended query syntax.
//!
//! Whitespace-separated terms must all match; groups separated by `|` are
//! alternatives. A term may carry an operator:
//!
//! | Term     | Matches when the text            |
//! |----------|----------------------------------|
//! | `smile`  | fuzzily contains `smile`         |
//! | `=smile` | equals `smile`                   |
//! | `'smile` | contains `smile`                 |
//! | `!smile` | does not contain `smile`         |
//! | `^smile` | starts with `smile`              |
//! | `!^smi`  | does not start with `smi`        |
//! | `ile$`   | ends with `ile`                  |
//! | `!ile$`  | does not end with `ile`          |

use super::fuzzy::fuzzy_score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermOp {
    Fuzzy,
    Exact,
    Include,
    InverseInclude,
    Prefix,
    InversePrefix,
    Suffix,
    InverseSuffix,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub op: TermOp,
    pub pattern: String,
    chars: Vec<char>,
}

impl Term {
    pub fn new(op: TermOp, pattern: &str) -> Self {
        let pattern = pattern.to_lowercase();
        let chars = pattern.chars().collect();
        Self { op, pattern, chars }
    }

    /// Parse one whitespace-free token.
    pub fn parse(token: &str) -> Self {
        let op_and_rest = if let Some(rest) = token.strip_prefix("!^") {
            Some((TermOp::InversePrefix, rest))
        } else if let Some(rest) = token.strip_prefix('!') {
            match rest.strip_suffix('$') {
                Some(mid) => Some((TermOp::InverseSuffix, mid)),
                None => Some((TermOp::InverseInclude, rest)),
            }
        } else if let Some(rest) = token.strip_prefix('^') {
            Some((TermOp::Prefix, rest))
        } else if let Some(rest) = token.strip_prefix('=') {
            Some((TermOp::Exact, rest))
        } else if let Some(rest) = token.strip_prefix('\'') {
            Some((TermOp::Include, rest))
        } else {
            token.strip_suffix('$').map(|rest| (TermOp::Suffix, rest))
        };
        match op_and_rest {
            Some((op, rest)) if !rest.is_empty() => Term::new(op, rest),
            // A bare operator character is searched for literally.
            _ => Term::new(TermOp::Fuzzy, token),
        }
    }

    /// Score of this term against lowercased `text` (`chars` is the same
    /// text split into characters). `None` means no match.
    pub fn score(&self, text: &str, chars: &[char], threshold: f64) -> Option<f64> {
        let hit = match self.op {
            TermOp::Fuzzy => return fuzzy_score(&self.chars, chars, threshold),
            TermOp::Exact => text == self.pattern,
            TermOp::Include => text.contains(&self.pattern),
            TermOp::InverseInclude => !text.contains(&self.pattern),
            TermOp::Prefix => text.starts_with(&self.pattern),
            TermOp::InversePrefix => !text.starts_with(&self.pattern),
            TermOp::Suffix => text.ends_with(&self.pattern),
            TermOp::InverseSuffix => !text.ends_with(&self.pattern),
        };
        hit.then_some(0.0)
    }
}

/// A parsed query: alternatives of conjunctions.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    groups: Vec<Vec<Term>>,
}

impl Query {
    /// Parse with operator syntax.
    pub fn extended(query: &str) -> Self {
        let groups = query
            .split('|')
            .map(|g| g.split_whitespace().map(Term::parse).collect::<Vec<_>>())
            .filter(|g| !g.is_empty())
            .collect();
        Self { groups }
    }

    /// The whole query is one fuzzy pattern.
    pub fn plain(query: &str) -> Self {
        Self {
            groups: vec![vec![Term::new(TermOp::Fuzzy, query)]],
        }
    }

    pub fn groups(&self) -> &[Vec<Term>] {
        &self.groups
    }

    /// Mean term score of the first group whose terms all match.
    pub fn score(&self, text: &str, chars: &[char], threshold: f64) -> Option<f64> {
        self.groups.iter().find_map(|group| {
            let mut total = 0.0;
            for term in group {
                total += term.score(text, chars, threshold)?;
            }
            Some(total / group.len() as f64)
        })
    }
}
