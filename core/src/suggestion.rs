use core::fmt;
use std::rc::Rc;

use crate::node::NodeRef;
use crate::spec::ElementSpec;
use crate::traits::TokenType;

/// Per-request context carried into every suggestion.
pub struct SuggestContext<'g, T> {
    partial: Option<NodeRef<'g, T>>,
    match_with: Rc<str>,
}

impl<'g, T> SuggestContext<'g, T> {
    /// A context with no matched tokens.
    ///
    /// `match_with` is the text the user is currently typing at the caret;
    /// it is carried verbatim for the presentation layer to filter on.
    pub fn new(match_with: &str) -> Self {
        Self {
            partial: None,
            match_with: Rc::from(match_with),
        }
    }

    /// The same context, positioned after `partial`.
    pub fn with_partial(&self, partial: Option<NodeRef<'g, T>>) -> Self {
        Self {
            partial,
            match_with: Rc::clone(&self.match_with),
        }
    }

    /// The last token node matched before the suggestion point.
    #[inline]
    pub fn partial(&self) -> Option<&NodeRef<'g, T>> {
        self.partial.as_ref()
    }

    #[inline]
    pub fn match_with(&self) -> &str {
        &self.match_with
    }
}

impl<T> Clone for SuggestContext<'_, T> {
    fn clone(&self) -> Self {
        Self {
            partial: self.partial.clone(),
            match_with: Rc::clone(&self.match_with),
        }
    }
}

/// One element that may come next at a partial-match position.
pub struct ElementSuggestion<'g, T> {
    element: &'g ElementSpec,
    parent: Option<NodeRef<'g, T>>,
    context: SuggestContext<'g, T>,
}

impl<'g, T> ElementSuggestion<'g, T> {
    pub fn new(
        element: &'g ElementSpec,
        parent: Option<NodeRef<'g, T>>,
        context: &SuggestContext<'g, T>,
    ) -> Self {
        Self {
            element,
            parent,
            context: context.clone(),
        }
    }

    /// The suggested element.
    #[inline]
    pub fn element(&self) -> &'g ElementSpec {
        self.element
    }

    #[inline]
    pub fn label(&self) -> &'g str {
        self.element.label()
    }

    /// Token type the suggested element expects, if it is token-producing.
    #[inline]
    pub fn token_type(&self) -> Option<TokenType> {
        self.element.token_type()
    }

    /// Innermost node enclosing the suggestion.
    #[inline]
    pub fn parent(&self) -> Option<&NodeRef<'g, T>> {
        self.parent.as_ref()
    }

    /// Last token node matched before the suggestion point.
    #[inline]
    pub fn partial(&self) -> Option<&NodeRef<'g, T>> {
        self.context.partial()
    }

    #[inline]
    pub fn match_with(&self) -> &str {
        self.context.match_with()
    }

    /// Enclosing elements, innermost first.
    pub fn lineage(&self) -> impl Iterator<Item = &'g ElementSpec> + '_ {
        let first = self.parent.as_ref();
        core::iter::successors(first, |node| node.parent()).map(|node| node.spec())
    }

    /// Names of the enclosing rules, outermost first.
    pub fn context(&self) -> Vec<&'g str> {
        let mut names: Vec<&'g str> = self.lineage().filter_map(|spec| spec.rule_name()).collect();
        names.reverse();
        names
    }

    /// Identity used to collapse suggestions reached along different paths:
    /// the element plus every enclosing element.
    pub(crate) fn identity(&self) -> Vec<*const ElementSpec> {
        let mut key = vec![self.element as *const ElementSpec];
        key.extend(self.lineage().map(|spec| spec as *const ElementSpec));
        key
    }
}

impl<T> Clone for ElementSuggestion<'_, T> {
    fn clone(&self) -> Self {
        Self {
            element: self.element,
            parent: self.parent.clone(),
            context: self.context.clone(),
        }
    }
}

impl<T> fmt::Debug for ElementSuggestion<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementSuggestion")
            .field("label", &self.label())
            .field("token_type", &self.token_type())
            .field("context", &self.context())
            .field("match_with", &self.match_with())
            .finish()
    }
}

impl<T> fmt::Display for ElementSuggestion<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let context = self.context();
        if context.is_empty() {
            f.write_str(self.label())
        } else {
            write!(f, "{} ({})", self.label(), context.join(" > "))
        }
    }
}
