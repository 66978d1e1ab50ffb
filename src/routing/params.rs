//! Parameter bindings produced by a match.

use std::borrow::Cow;

/// How a binding is addressed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamKey<'r> {
    /// A `:name` segment.
    Name(&'r str),
    /// A `:|regex|` segment, by 1-based position within its pattern.
    Index(usize),
}

/// Bindings extracted while walking the trie for one request.
///
/// Keys borrow from the registry (`'r`). Values are the percent-decoded
/// segments; they borrow from the request path (`'p`) unless decoding had to
/// allocate. Nothing else is copied until [`Params::to_path_params`].
#[derive(Clone, Debug, Default)]
pub struct Params<'r, 'p> {
    entries: Vec<(ParamKey<'r>, Cow<'p, str>)>,
}

impl<'r, 'p> Params<'r, 'p> {
    pub(crate) fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub(crate) fn push(&mut self, key: ParamKey<'r>, value: Cow<'p, str>) {
        self.entries.push((key, value));
    }

    /// The value bound to the `:name` parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|(key, value)| match key {
            ParamKey::Name(n) if *n == name => Some(value.as_ref()),
            _ => None,
        })
    }

    /// The value captured by the `index`-th regex segment (1-based).
    pub fn regex(&self, index: usize) -> Option<&str> {
        self.entries.iter().find_map(|(key, value)| match key {
            ParamKey::Index(i) if *i == index => Some(value.as_ref()),
            _ => None,
        })
    }

    /// Bindings in path order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey<'r>, &str)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies the bindings out so they can outlive the registry borrow and the
    /// request path, e.g. to be moved into a `'static` handler future.
    pub fn to_path_params(&self) -> PathParams {
        let mut owned = PathParams::default();
        for (key, value) in &self.entries {
            match key {
                ParamKey::Name(name) => owned.named.push(((*name).to_owned(), value.to_string())),
                ParamKey::Index(_) => owned.captures.push(value.to_string()),
            }
        }
        owned
    }
}

/// Owned path parameters attached to a [`Request`](crate::Request).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathParams {
    named: Vec<(String, String)>,
    // Regex indices are assigned 1, 2, 3… in path order, so position n-1 holds
    // the capture for index n.
    captures: Vec<String>,
}

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// 1-based regex capture; `regex(0)` is always `None`.
    pub fn regex(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.captures.get(i))
            .map(String::as_str)
    }

    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.captures.is_empty()
    }
}
