use core::fmt;
use std::rc::Rc;

use crate::spec::ElementSpec;

/// Shared handle to a parse node.
pub type NodeRef<'g, T> = Rc<ParseNode<'g, T>>;

/// A token consumed by a match, with its position in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedToken<T> {
    /// Stream index of the token.
    pub index: usize,
    /// The token as produced by the lexer.
    pub token: T,
}

/// An immutable fragment of a partial parse.
///
/// Nodes form two structures at once:
///
/// - a tree through [`parent`](Self::parent), where intermediate nodes stand
///   for rule-reference expansions;
/// - a flat chain through [`previous`](Self::previous), linking each matched
///   token to the one matched before it, across rule boundaries.
///
/// Nodes are created while matching or suggesting and never change after.
pub struct ParseNode<'g, T> {
    spec: &'g ElementSpec,
    parent: Option<NodeRef<'g, T>>,
    previous: Option<NodeRef<'g, T>>,
    token: Option<MatchedToken<T>>,
}

impl<'g, T> ParseNode<'g, T> {
    /// Creates a node for a matched token.
    pub fn token(
        spec: &'g ElementSpec,
        parent: Option<NodeRef<'g, T>>,
        previous: Option<NodeRef<'g, T>>,
        index: usize,
        token: T,
    ) -> NodeRef<'g, T> {
        Rc::new(Self {
            spec,
            parent,
            previous,
            token: Some(MatchedToken { index, token }),
        })
    }

    /// Creates a node for an element that has not matched a token itself,
    /// such as a rule reference being expanded.
    pub fn intermediate(
        spec: &'g ElementSpec,
        parent: Option<NodeRef<'g, T>>,
        previous: Option<NodeRef<'g, T>>,
    ) -> NodeRef<'g, T> {
        Rc::new(Self {
            spec,
            parent,
            previous,
            token: None,
        })
    }

    /// The element this node originates from.
    #[inline]
    pub fn spec(&self) -> &'g ElementSpec {
        self.spec
    }

    #[inline]
    pub fn parent(&self) -> Option<&NodeRef<'g, T>> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn previous(&self) -> Option<&NodeRef<'g, T>> {
        self.previous.as_ref()
    }

    #[inline]
    pub fn matched(&self) -> Option<&MatchedToken<T>> {
        self.token.as_ref()
    }

    #[inline]
    pub fn token_ref(&self) -> Option<&T> {
        self.token.as_ref().map(|m| &m.token)
    }

    /// Stream position right after this node's token.
    #[inline]
    pub fn end(&self) -> Option<usize> {
        self.token.as_ref().map(|m| m.index + 1)
    }

    /// Walks the parent chain, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &NodeRef<'g, T>> {
        core::iter::successors(self.parent.as_ref(), |node| node.parent.as_ref())
    }

    /// Walks the previous-sibling chain, most recent first.
    pub fn predecessors(&self) -> impl Iterator<Item = &NodeRef<'g, T>> {
        core::iter::successors(self.previous.as_ref(), |node| node.previous.as_ref())
    }

    /// The grammar position this node stands for: its element followed by the
    /// elements of its ancestors, innermost first.
    pub(crate) fn shape(&self) -> Vec<*const ElementSpec> {
        let mut shape = vec![self.spec as *const ElementSpec];
        shape.extend(self.ancestors().map(|node| node.spec as *const ElementSpec));
        shape
    }

    /// Tokens matched up to and including this node, in stream order.
    pub fn matched_tokens(&self) -> Vec<&T> {
        let mut tokens: Vec<&T> = self.token_ref().into_iter().collect();
        tokens.extend(self.predecessors().filter_map(|node| node.token_ref()));
        tokens.reverse();
        tokens
    }
}

impl<T> fmt::Debug for ParseNode<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parent = self.parent.as_ref().map(|p| p.spec.label());
        let previous = self.previous.as_ref().and_then(|p| p.matched());
        f.debug_struct("ParseNode")
            .field("spec", &self.spec.label())
            .field("parent", &parent)
            .field("previous", &previous.map(|m| m.index))
            .field("token", &self.token)
            .finish()
    }
}
