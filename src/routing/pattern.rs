//! Route pattern compiler.
//!
//! The pattern mini-language has three segment kinds:
//!
//! | Syntax       | Kind                | Binds                          |
//! |--------------|---------------------|--------------------------------|
//! | `users`      | literal             | nothing                        |
//! | `:id`        | named parameter     | `id` → segment text            |
//! | `:\|expr\|`  | regex-constrained   | 1-based position → segment text |
//!
//! Patterns are compiled once, at registration, and never change afterwards.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;
use regex::Regex;

use super::params::Params;
use crate::error::RouteError;

/// One compiled `/`-delimited component of a route pattern.
#[derive(Clone, Debug)]
pub enum Segment {
    /// Matched by exact text equality.
    Literal(String),
    /// Matches any non-empty segment and binds it to `name`.
    Param(String),
    /// Matches a segment only if the whole segment satisfies `regex`.
    ///
    /// `source` is the expression exactly as written between the pipes; it is
    /// what the trie compares when deciding whether two routes share a node.
    /// `index` is the 1-based position of this segment among the regex
    /// segments of its own pattern.
    Regex {
        source: String,
        regex: Regex,
        index: usize,
    },
}

impl Segment {
    fn parse(raw: &str, pattern: &str, regex_count: &mut usize) -> Result<Self, RouteError> {
        let Some(rest) = raw.strip_prefix(':') else {
            return Ok(Self::Literal(decode_segment(raw).into_owned()));
        };

        if let Some(body) = rest.strip_prefix('|') {
            let source = body
                .strip_suffix('|')
                .ok_or_else(|| RouteError::invalid(pattern, format!("unterminated regex segment `{raw}`")))?;
            if source.is_empty() {
                return Err(RouteError::invalid(pattern, "empty regex segment `:||`"));
            }
            // Anchored on both ends so a regex can never accept part of a segment.
            let regex = Regex::new(&format!("^(?:{source})$"))
                .map_err(|e| RouteError::invalid(pattern, format!("bad regex `{source}`: {e}")))?;
            *regex_count += 1;
            return Ok(Self::Regex {
                source: source.to_owned(),
                regex,
                index: *regex_count,
            });
        }

        if rest.is_empty() {
            return Err(RouteError::invalid(pattern, "empty parameter name"));
        }
        Ok(Self::Param(rest.to_owned()))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Param(name) => write!(f, ":{name}"),
            Self::Regex { source, .. } => write!(f, ":|{source}|"),
        }
    }
}

/// A compiled route pattern: an ordered, immutable list of [`Segment`]s.
#[derive(Clone, Debug)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compiles `pattern`.
    ///
    /// Leading, trailing and repeated slashes are ignored, so `""`, `"/"` and
    /// `"//"` all compile to the root pattern with zero segments.
    ///
    /// ```
    /// use arbor::routing::{RoutePattern, Segment};
    ///
    /// let p = RoutePattern::compile("/users/:id/files/:|[a-z]+\\.txt|").unwrap();
    /// assert_eq!(p.segments().len(), 4);
    /// assert!(matches!(&p.segments()[3], Segment::Regex { index: 1, .. }));
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, RouteError> {
        let mut regex_count = 0;
        let segments = split_path(pattern)
            .map(|raw| Segment::parse(raw, pattern, &mut regex_count))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { raw: pattern.to_owned(), segments })
    }

    /// The pattern text as it was registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the `:name` parameters, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Number of regex-constrained segments.
    pub fn regex_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Regex { .. }))
            .count()
    }

    /// Substitutes `params` back into the pattern, producing a concrete path.
    ///
    /// Returns `None` if a parameter or regex position has no binding, or if a
    /// bound value does not satisfy its regex.
    pub fn render(&self, params: &Params<'_, '_>) -> Option<String> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) => path.push_str(params.get(name)?),
                Segment::Regex { regex, index, .. } => {
                    let value = params.regex(*index)?;
                    if !regex.is_match(value) {
                        return None;
                    }
                    path.push_str(value);
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }
}

impl fmt::Display for RoutePattern {
    /// Canonical form: one leading slash, no trailing slash.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Splits a pattern or request path into its non-empty segments.
///
/// Used identically at compile time and match time, so both sides agree on
/// what a segment is.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Percent-decodes one already-split segment. An encoded `%2F` therefore
/// stays inside its segment. Invalid UTF-8 is replaced, not rejected.
/// Borrows when there is nothing to decode.
pub(crate) fn decode_segment(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}
