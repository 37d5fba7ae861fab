//! Query names and the structured search expressions built from them.

use std::fmt;

/// A searchable author name: first and last whitespace-separated tokens.
///
/// Middle tokens are dropped, so "Jane A Smith" searches as Jane / Smith.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorQuery<'a> {
    first: &'a str,
    last: &'a str,
}

impl<'a> AuthorQuery<'a> {
    /// Parse a raw name. Returns `None` for fewer than two tokens.
    #[must_use]
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut tokens = raw.split_whitespace();
        let first = tokens.next()?;
        let last = tokens.next_back()?;
        Some(Self { first, last })
    }

    /// First token.
    #[must_use]
    pub const fn first(&self) -> &'a str {
        self.first
    }

    /// Last token.
    #[must_use]
    pub const fn last(&self) -> &'a str {
        self.last
    }

    /// Search expression requiring both name parts.
    #[must_use]
    pub fn expression(&self) -> SearchExpression {
        SearchExpression::author_name(self.first, self.last)
    }
}

/// Author search expression in Scopus query syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchExpression(String);

impl SearchExpression {
    /// `AUTHLASTNAME(last) AND AUTHFIRST(first)`.
    #[must_use]
    pub fn author_name(first: &str, last: &str) -> Self {
        Self(format!("AUTHLASTNAME({last}) AND AUTHFIRST({first})"))
    }

    /// Expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
