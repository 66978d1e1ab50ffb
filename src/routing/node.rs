//! Segment trie.
//!
//! Every node represents one path depth. Children are split by kind so the
//! matcher can apply the precedence rules with one map lookup and at most a
//! short linear scan:
//!
//! ```text
//! literal map  →  param slot  →  regex list (registration order)
//! ```
//!
//! Once a child is chosen the walk commits to it; siblings of a rejected
//! branch are never revisited.

use std::borrow::Cow;
use std::collections::HashMap;

use http::Method;
use regex::Regex;

use super::Route;
use super::params::{ParamKey, Params};

pub(crate) struct RouteNode<H> {
    pub(crate) literals: HashMap<String, RouteNode<H>>,
    pub(crate) param: Option<ParamChild<H>>,
    pub(crate) regexes: Vec<RegexChild<H>>,
    /// Routes that terminate at this node, keyed by method.
    pub(crate) routes: HashMap<Method, Route<H>>,
}

pub(crate) struct ParamChild<H> {
    pub(crate) name: String,
    pub(crate) node: Box<RouteNode<H>>,
}

pub(crate) struct RegexChild<H> {
    pub(crate) source: String,
    pub(crate) regex: Regex,
    pub(crate) index: usize,
    pub(crate) node: RouteNode<H>,
}

impl<H> RouteNode<H> {
    pub(crate) fn new() -> Self {
        Self {
            literals: HashMap::new(),
            param: None,
            regexes: Vec::new(),
            routes: HashMap::new(),
        }
    }

    /// Picks the child that accepts the decoded `segment`, recording any
    /// binding.
    pub(crate) fn child<'r, 'p>(
        &'r self,
        segment: Cow<'p, str>,
        params: &mut Params<'r, 'p>,
    ) -> Option<&'r RouteNode<H>> {
        if let Some(node) = self.literals.get(segment.as_ref()) {
            return Some(node);
        }
        if let Some(param) = &self.param {
            params.push(ParamKey::Name(&param.name), segment);
            return Some(&*param.node);
        }
        let child = self.regexes.iter().find(|c| c.regex.is_match(&segment))?;
        params.push(ParamKey::Index(child.index), segment);
        Some(&child.node)
    }

    pub(crate) fn literal_child_mut(&mut self, text: &str) -> &mut RouteNode<H> {
        self.literals
            .entry(text.to_owned())
            .or_insert_with(RouteNode::new)
    }

    /// Returns the param slot's node, creating the slot if it is vacant.
    ///
    /// `Err` carries the name already occupying the slot when it differs from
    /// `name`.
    pub(crate) fn param_child_mut(&mut self, name: &str) -> Result<&mut RouteNode<H>, String> {
        let slot = self.param.get_or_insert_with(|| ParamChild {
            name: name.to_owned(),
            node: Box::new(RouteNode::new()),
        });
        if slot.name != name {
            return Err(slot.name.clone());
        }
        Ok(&mut *slot.node)
    }

    /// Reuses the regex child with byte-identical `source`, otherwise appends
    /// a new one after all existing regex children.
    pub(crate) fn regex_child_mut(
        &mut self,
        source: &str,
        regex: &Regex,
        index: usize,
    ) -> &mut RouteNode<H> {
        let pos = match self.regexes.iter().position(|c| c.source == source) {
            Some(pos) => pos,
            None => {
                self.regexes.push(RegexChild {
                    source: source.to_owned(),
                    regex: regex.clone(),
                    index,
                    node: RouteNode::new(),
                });
                self.regexes.len() - 1
            }
        };
        &mut self.regexes[pos].node
    }

    /// Depth-first walk collecting every route in the subtree.
    pub(crate) fn collect_routes<'a>(&'a self, out: &mut Vec<&'a Route<H>>) {
        out.extend(self.routes.values());
        for node in self.literals.values() {
            node.collect_routes(out);
        }
        if let Some(param) = &self.param {
            param.node.collect_routes(out);
        }
        for child in &self.regexes {
            child.node.collect_routes(out);
        }
    }
}
