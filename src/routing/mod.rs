//! Segment-trie routing core.
//!
//! [`Registry`] maps `(method, path)` to a handler value `H` and extracts path
//! parameters. It knows nothing about HTTP bodies, futures or responses; the
//! application [`Router`](crate::Router) builds on it with
//! `H = RouteHandler`.
//!
//! # Matching rules
//!
//! At each depth the matcher tries, in order:
//!
//! 1. the literal child whose text equals the segment,
//! 2. the named-parameter child (accepts any segment),
//! 3. the regex children, in registration order; the first whose regex
//!    matches the whole segment wins.
//!
//! Each request segment is percent-decoded after the path has been split, so
//! `%2F` never creates a new segment and `John%20Doe` binds `John Doe`.
//! Literal segments of patterns are decoded the same way when compiled.
//!
//! The first accepting child is taken and the walk never backs up. With
//! `/users/admin/settings` and `/users/:id` registered, `/users/admin` does
//! **not** fall back to `/users/:id`: the literal `admin` node is chosen and
//! has no route. Design overlapping routes so that a literal or earlier regex
//! never shadows a route you still want reachable.
//!
//! Lookup cost is proportional to the number of path segments, not to the
//! number of registered routes.

mod node;
mod params;
mod pattern;
mod shared;

use http::Method;
use tracing::debug;

use crate::error::RouteError;
use node::RouteNode;

pub use params::{ParamKey, Params, PathParams};
pub use pattern::{RoutePattern, Segment};
pub use shared::SharedRegistry;

use pattern::{decode_segment, split_path};

/// A registered route: method, compiled pattern and handler.
///
/// Owned by the [`Registry`] for its whole lifetime; lookups hand out
/// references, never copies.
pub struct Route<H> {
    method: Method,
    pattern: RoutePattern,
    handler: H,
}

impl<H> Route<H> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Outcome category of a lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchStatus {
    Matched,
    NotFound,
    MethodNotAllowed,
}

/// The result of [`Registry::lookup`].
///
/// Borrows the registry (`'r`) and the looked-up path (`'p`).
pub enum MatchResult<'r, 'p, H> {
    Matched {
        route: &'r Route<H>,
        params: Params<'r, 'p>,
    },
    /// The path resolved to a node, but no route there accepts the method.
    /// `allowed` lists the methods that would have matched, sorted.
    MethodNotAllowed { allowed: Vec<Method> },
    NotFound,
}

impl<'r, 'p, H> MatchResult<'r, 'p, H> {
    pub fn status(&self) -> MatchStatus {
        match self {
            Self::Matched { .. } => MatchStatus::Matched,
            Self::MethodNotAllowed { .. } => MatchStatus::MethodNotAllowed,
            Self::NotFound => MatchStatus::NotFound,
        }
    }

    pub fn handler(&self) -> Option<&'r H> {
        match self {
            Self::Matched { route, .. } => Some(route.handler()),
            _ => None,
        }
    }

    pub fn route(&self) -> Option<&'r Route<H>> {
        match self {
            Self::Matched { route, .. } => Some(*route),
            _ => None,
        }
    }

    pub fn params(&self) -> Option<&Params<'r, 'p>> {
        match self {
            Self::Matched { params, .. } => Some(params),
            _ => None,
        }
    }
}

/// Route table: one segment trie shared by all methods, with each terminal
/// node holding a method → route map.
///
/// Build it during startup with [`register`](Registry::register), then share
/// it (e.g. in an `Arc`) across workers. `lookup` takes `&self` and needs no
/// synchronisation. For registration while serving, see [`SharedRegistry`].
pub struct Registry<H> {
    root: RouteNode<H>,
    len: usize,
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self { root: RouteNode::new(), len: 0 }
    }

    /// Compiles `pattern` and binds `handler` to it for `method`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidPattern`] if the pattern does not compile.
    /// - [`RouteError::AmbiguousRoute`] if a `:name` segment lands on a
    ///   position already claimed by a different name.
    /// - [`RouteError::DuplicateRoute`] if `method` + pattern is already bound.
    ///
    /// On error nothing is bound and existing routes are untouched.
    pub fn register(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouteError> {
        let compiled = RoutePattern::compile(pattern)?;

        // A conflict can only occur on a node that already existed before this
        // call, and every node above an existing node exists too, so a failed
        // registration never leaves freshly created nodes behind.
        let mut node = &mut self.root;
        for segment in compiled.segments() {
            node = match segment {
                Segment::Literal(text) => node.literal_child_mut(text),
                Segment::Param(name) => {
                    node.param_child_mut(name)
                        .map_err(|existing| RouteError::AmbiguousRoute {
                            pattern: pattern.to_owned(),
                            name: name.clone(),
                            existing,
                        })?
                }
                Segment::Regex { source, regex, index } => node.regex_child_mut(source, regex, *index),
            };
        }

        if node.routes.contains_key(&method) {
            return Err(RouteError::DuplicateRoute {
                method,
                pattern: pattern.to_owned(),
            });
        }

        debug!(%method, pattern = %compiled, "route registered");
        node.routes.insert(
            method.clone(),
            Route { method, pattern: compiled, handler },
        );
        self.len += 1;
        Ok(())
    }

    /// Resolves `path` for `method`.
    ///
    /// Never fails: unknown paths, the empty path and paths with stray
    /// slashes all produce a [`MatchResult`]. The query string, if any, must
    /// already be stripped.
    pub fn lookup<'r, 'p>(&'r self, method: &Method, path: &'p str) -> MatchResult<'r, 'p, H> {
        let mut params = Params::new();
        let mut node = &self.root;
        for raw in split_path(path) {
            match node.child(decode_segment(raw), &mut params) {
                Some(next) => node = next,
                None => return MatchResult::NotFound,
            }
        }

        if let Some(route) = node.routes.get(method) {
            return MatchResult::Matched { route, params };
        }
        if node.routes.is_empty() {
            return MatchResult::NotFound;
        }
        let mut allowed: Vec<Method> = node.routes.keys().cloned().collect();
        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        MatchResult::MethodNotAllowed { allowed }
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All registered routes, in trie order.
    pub fn routes(&self) -> Vec<&Route<H>> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_routes(&mut out);
        out
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}
