//! Breadth-over-alternatives exploration of a token slice.
//!
//! The walker threads a set of [`MatchState`]s through the grammar. Each
//! state is one way of having consumed a prefix of the input: the position
//! it reached and the last token node on its path. States never share a
//! cursor, so every alternative and every repetition count is followed on its
//! own.
//!
//! When a token-producing element is reached at end-of-stream the walk asks
//! that element for its first suggestions (if collecting) and ends that
//! path. Those suggestions are exactly the tokens that may follow the input
//! along that path.
//!
//! States that reached the same position with last nodes of the same shape
//! are merged after every step. Their continuations differ only in history,
//! so ambiguous repetitions keep a bounded state set instead of doubling it
//! with every token.

use std::collections::HashSet;
use std::rc::Rc;

use super::{AlternativeSpec, ElementKind, ElementSpec, RuleSpec};
use crate::Error;
use crate::config::{AssistConfig, RecursionGuard};
use crate::node::{NodeRef, ParseNode};
use crate::suggestion::{ElementSuggestion, SuggestContext};
use crate::traits::{Lexeme, RuleRegistry};
use crate::visited::{MatchGuard, VisitedRules};

/// A position reached in the stream and the token node that got there.
pub(crate) struct MatchState<'g, T> {
    pub(crate) position: usize,
    pub(crate) last: Option<NodeRef<'g, T>>,
}

impl<'g, T> MatchState<'g, T> {
    #[inline]
    pub(crate) fn new(position: usize, last: Option<NodeRef<'g, T>>) -> Self {
        Self { position, last }
    }

    #[inline]
    pub(crate) fn start() -> Self {
        Self::new(0, None)
    }

    fn key(&self) -> StateKey {
        let shape = self.last.as_ref().map(|node| node.shape());
        (self.position, shape.unwrap_or_default())
    }
}

type StateKey = (usize, Vec<*const ElementSpec>);

/// Keeps the first state of every key not yet in `seen`.
fn merge<'g, T>(
    states: Vec<MatchState<'g, T>>,
    seen: &mut HashSet<StateKey>,
) -> Vec<MatchState<'g, T>> {
    states
        .into_iter()
        .filter(|state| seen.insert(state.key()))
        .collect()
}

impl<T> Clone for MatchState<'_, T> {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            last: self.last.clone(),
        }
    }
}

pub(crate) struct Walker<'g, 's, R: ?Sized, T> {
    registry: &'g R,
    tokens: &'s [T],
    config: AssistConfig,
    depth: RecursionGuard,
    context: Option<SuggestContext<'g, T>>,
    suggestions: Vec<ElementSuggestion<'g, T>>,
    frontier: Vec<NodeRef<'g, T>>,
    frontier_shapes: HashSet<Vec<*const ElementSpec>>,
}

impl<'g, 's, R, T> Walker<'g, 's, R, T>
where
    R: RuleRegistry + ?Sized,
    T: Lexeme,
{
    pub(crate) fn new(registry: &'g R, tokens: &'s [T], config: AssistConfig) -> Self {
        Self {
            registry,
            tokens,
            config,
            depth: RecursionGuard::new(),
            context: None,
            suggestions: Vec::new(),
            frontier: Vec::new(),
            frontier_shapes: HashSet::new(),
        }
    }

    /// Collect suggestions at end-of-stream, tagged with `match_with`.
    pub(crate) fn collecting(mut self, match_with: &str) -> Self {
        self.context = Some(SuggestContext::new(match_with));
        self
    }

    pub(crate) fn into_suggestions(self) -> Vec<ElementSuggestion<'g, T>> {
        self.suggestions
    }

    /// Token nodes whose match ended exactly at end-of-stream, one per shape.
    pub(crate) fn into_frontier(self) -> Vec<NodeRef<'g, T>> {
        self.frontier
    }

    /// Applies `spec` under its multiplicity to every state.
    pub(crate) fn element(
        &mut self,
        spec: &'g ElementSpec,
        states: Vec<MatchState<'g, T>>,
        parent: Option<&NodeRef<'g, T>>,
        guard: &MatchGuard,
    ) -> Result<Vec<MatchState<'g, T>>, Error> {
        let multiplicity = spec.multiplicity();
        let mut seen = HashSet::new();
        let mut reached = Vec::new();
        if multiplicity.allows_zero() {
            reached = merge(states.clone(), &mut seen);
        }

        let mut first = Vec::new();
        for state in &states {
            first.extend(self.element_once(spec, state, parent, guard)?);
        }
        let mut pending = merge(first, &mut seen);
        reached.extend(pending.iter().cloned());

        if multiplicity.allows_many() {
            while !pending.is_empty() {
                let mut next = Vec::new();
                for state in &pending {
                    for advanced in self.element_once(spec, state, parent, guard)? {
                        // An occurrence that consumed nothing would repeat forever.
                        if advanced.position > state.position {
                            next.push(advanced);
                        }
                    }
                }
                pending = merge(next, &mut seen);
                reached.extend(pending.iter().cloned());
            }
        }

        Ok(reached)
    }

    /// Applies a single occurrence of `spec` to one state.
    pub(crate) fn element_once(
        &mut self,
        spec: &'g ElementSpec,
        state: &MatchState<'g, T>,
        parent: Option<&NodeRef<'g, T>>,
        guard: &MatchGuard,
    ) -> Result<Vec<MatchState<'g, T>>, Error> {
        match spec.kind() {
            ElementKind::Token { token_type } | ElementKind::LexerRule { token_type, .. } => {
                let Some(token) = self.tokens.get(state.position) else {
                    self.suggest(spec, state, parent);
                    return Ok(Vec::new());
                };
                if token.token_type() != *token_type {
                    return Ok(Vec::new());
                }
                let node = ParseNode::token(
                    spec,
                    parent.cloned(),
                    state.last.clone(),
                    state.position,
                    token.clone(),
                );
                let position = state.position + 1;
                if position == self.tokens.len() && self.frontier_shapes.insert(node.shape()) {
                    self.frontier.push(Rc::clone(&node));
                }
                Ok(vec![MatchState::new(position, Some(node))])
            }
            ElementKind::Rule { rule_name } => {
                let Some(rule) = spec.resolve_rule(self.registry) else {
                    return Ok(Vec::new());
                };
                let Some(guard) = guard.enter(rule_name, state.position) else {
                    return Ok(Vec::new());
                };
                self.depth.descend(&self.config)?;
                let node = ParseNode::intermediate(spec, parent.cloned(), state.last.clone());
                let reached = self.rule(rule, state, &node, &guard);
                self.depth.ascend();
                reached
            }
        }
    }

    fn rule(
        &mut self,
        rule: &'g RuleSpec,
        state: &MatchState<'g, T>,
        node: &NodeRef<'g, T>,
        guard: &MatchGuard,
    ) -> Result<Vec<MatchState<'g, T>>, Error> {
        let mut seen = HashSet::new();
        let mut reached = Vec::new();
        for alternative in rule.alternatives() {
            let states = self.alternative(alternative, state, node, guard)?;
            reached.extend(merge(states, &mut seen));
        }
        Ok(reached)
    }

    fn alternative(
        &mut self,
        alternative: &'g AlternativeSpec,
        state: &MatchState<'g, T>,
        node: &NodeRef<'g, T>,
        guard: &MatchGuard,
    ) -> Result<Vec<MatchState<'g, T>>, Error> {
        let mut states = vec![state.clone()];
        for element in alternative.elements() {
            states = self.element(element, states, Some(node), guard)?;
            if states.is_empty() {
                break;
            }
        }
        Ok(states)
    }

    fn suggest(
        &mut self,
        spec: &'g ElementSpec,
        state: &MatchState<'g, T>,
        parent: Option<&NodeRef<'g, T>>,
    ) {
        if let Some(context) = &self.context {
            let context = context.with_partial(state.last.clone());
            let found = spec.suggest_first(self.registry, parent, &context, &VisitedRules::new());
            self.suggestions.extend(found);
        }
    }

    /// Last token nodes of the candidates that consumed input from `start`:
    /// every state that moved past it, and every path that ran into
    /// end-of-stream on the way.
    pub(crate) fn candidates(
        self,
        start: &MatchState<'g, T>,
        states: Vec<MatchState<'g, T>>,
    ) -> Vec<NodeRef<'g, T>> {
        let mut seen = HashSet::new();
        let advanced = states
            .into_iter()
            .filter(|state| state.position > start.position)
            .filter_map(|state| state.last);
        advanced
            .chain(self.frontier)
            .filter(|node| seen.insert((node.end(), node.shape())))
            .collect()
    }
}
