//! Header value <-> [`DirectiveSet`] conversion.
//!
//! ```text
//! "default-src 'self'; img-src 'self' data:"
//!   <-> { default-src: ['self'], img-src: ['self', data:] }
//! ```
//!
//! Serializing a parsed set and parsing it again yields the same set. A
//! directive with no values serializes as its bare name, without a trailing
//! space.

use std::fmt;
use std::str::FromStr;

use super::directive::DirectiveSet;

/// Separates clauses in a policy string.
pub const CLAUSE_SEPARATOR: char = ';';

const CLAUSE_JOINER: &str = "; ";

impl DirectiveSet {
    /// Parse a policy header value.
    ///
    /// Empty clauses (stray or trailing `;`) are dropped. A repeated directive
    /// name takes the values of its last occurrence and the position of its
    /// first.
    pub fn parse(policy: &str) -> Self {
        let mut set = Self::new();
        for clause in policy.split(CLAUSE_SEPARATOR) {
            let mut tokens = clause.split_whitespace();
            let Some(name) = tokens.next() else {
                continue;
            };
            set.insert(name, tokens.map(str::to_string).collect());
        }
        set
    }

    /// Render the set as a single policy header value.
    pub fn serialize(&self) -> String {
        self.iter()
            .map(|(name, values)| render_clause(name, values))
            .collect::<Vec<_>>()
            .join(CLAUSE_JOINER)
    }
}

fn render_clause(name: &str, values: &[String]) -> String {
    if values.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", name, values.join(" "))
    }
}

/// Split a line of user input into tokens.
///
/// Whitespace and `;` both separate tokens, so a token can never smuggle a
/// clause boundary into the set.
pub fn split_tokens(line: &str) -> Vec<String> {
    line.split(|c: char| c.is_whitespace() || c == CLAUSE_SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

impl FromStr for DirectiveSet {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for DirectiveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
