use core::fmt;
use std::sync::OnceLock;

use super::RuleSpec;
use super::walk::{MatchState, Walker};
use crate::Error;
use crate::config::AssistConfig;
use crate::grammar::RuleId;
use crate::multiplicity::Multiplicity;
use crate::node::{NodeRef, ParseNode};
use crate::scan::MandatoryScan;
use crate::stream::AssistStream;
use crate::suggestion::{ElementSuggestion, SuggestContext};
use crate::traits::{Lexeme, RuleRegistry, TokenType};
use crate::visited::{MatchGuard, VisitedRules};

/// What an element refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// A single token of the given type.
    Token { token_type: TokenType },
    /// A single token of the given type, produced by the lexer rule
    /// `rule_name`. It matches exactly like [`ElementKind::Token`]; when
    /// suggested, it expands into the lexer rule's own elements (so a keyword
    /// rule suggests its literal).
    LexerRule {
        token_type: TokenType,
        rule_name: String,
    },
    /// A parser rule, matched by recursing into its alternatives.
    Rule { rule_name: String },
}

/// One quantified position within an alternative.
///
/// Element specifications are immutable and shared by every session. The only
/// interior state is the resolution cache of rule-reference variants, which
/// is written once, on first use, and then read-only.
///
/// # Example
///
/// ```ignore
/// // select_stmt := SELECT columns FROM IDENT where_clause?
/// let elements = [
///     ElementSpec::lexer_rule("SELECT", SELECT),
///     ElementSpec::rule("columns"),
///     ElementSpec::lexer_rule("FROM", FROM),
///     ElementSpec::token("IDENT", IDENT),
///     ElementSpec::rule("where_clause").optional(),
/// ];
/// ```
#[derive(Debug)]
pub struct ElementSpec {
    label: String,
    multiplicity: Multiplicity,
    kind: ElementKind,
    resolved: OnceLock<Option<RuleId>>,
}

impl ElementSpec {
    fn with_kind(label: String, kind: ElementKind) -> Self {
        Self {
            label,
            multiplicity: Multiplicity::One,
            kind,
            resolved: OnceLock::new(),
        }
    }

    /// A plain token reference. `label` is what suggestions and mandatory
    /// scans report for it, typically the literal text or the token name.
    pub fn token(label: impl Into<String>, token_type: impl Into<TokenType>) -> Self {
        Self::with_kind(
            label.into(),
            ElementKind::Token {
                token_type: token_type.into(),
            },
        )
    }

    /// A token produced by the lexer rule `rule_name`, labelled by that name.
    pub fn lexer_rule(rule_name: impl Into<String>, token_type: impl Into<TokenType>) -> Self {
        let rule_name = rule_name.into();
        Self::with_kind(
            rule_name.clone(),
            ElementKind::LexerRule {
                token_type: token_type.into(),
                rule_name,
            },
        )
    }

    /// A reference to the parser rule `rule_name`, labelled by that name.
    pub fn rule(rule_name: impl Into<String>) -> Self {
        let rule_name = rule_name.into();
        Self::with_kind(rule_name.clone(), ElementKind::Rule { rule_name })
    }

    #[inline]
    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    /// `?`
    #[inline]
    pub fn optional(self) -> Self {
        self.with_multiplicity(Multiplicity::ZeroOrOne)
    }

    /// `+`
    #[inline]
    pub fn one_or_more(self) -> Self {
        self.with_multiplicity(Multiplicity::OneOrMore)
    }

    /// `*`
    #[inline]
    pub fn zero_or_more(self) -> Self {
        self.with_multiplicity(Multiplicity::ZeroOrMore)
    }

    #[inline]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    #[inline]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// The token type matched by token-producing variants.
    #[inline]
    pub fn token_type(&self) -> Option<TokenType> {
        match &self.kind {
            ElementKind::Token { token_type } | ElementKind::LexerRule { token_type, .. } => {
                Some(*token_type)
            }
            ElementKind::Rule { .. } => None,
        }
    }

    /// The referenced rule name of rule-reference variants.
    #[inline]
    pub fn rule_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Token { .. } => None,
            ElementKind::LexerRule { rule_name, .. } | ElementKind::Rule { rule_name } => {
                Some(rule_name)
            }
        }
    }

    /// Resolves the referenced rule.
    ///
    /// The lookup happens once per element; later calls reuse the cached
    /// outcome, including a failed one. Plain token references resolve to
    /// `None`.
    pub fn resolve_rule<'g, R>(&self, registry: &'g R) -> Option<&'g RuleSpec>
    where
        R: RuleRegistry + ?Sized,
    {
        let name = self.rule_name()?;
        let id = (*self.resolved.get_or_init(|| registry.resolve(name)))?;
        registry.rule(id)
    }

    /// Attempts a single occurrence of this element at the cursor.
    ///
    /// On success the cursor is left after the match; on failure it is left
    /// where it was. Token-producing variants advance by exactly one token and
    /// always fail at end-of-stream. Multiplicity is not applied here; see
    /// [`matches`](Self::matches).
    pub fn match_once<R, T>(&self, registry: &R, stream: &mut AssistStream<'_, T>) -> bool
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        self.match_once_guarded(registry, stream, &MatchGuard::new())
    }

    pub(crate) fn match_once_guarded<R, T>(
        &self,
        registry: &R,
        stream: &mut AssistStream<'_, T>,
        guard: &MatchGuard,
    ) -> bool
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        match &self.kind {
            ElementKind::Token { token_type } | ElementKind::LexerRule { token_type, .. } => {
                match stream.current() {
                    Some(token) if token.token_type() == *token_type => {
                        stream.advance();
                        true
                    }
                    _ => false,
                }
            }
            ElementKind::Rule { rule_name } => {
                let Some(rule) = self.resolve_rule(registry) else {
                    return false;
                };
                let Some(guard) = guard.enter(rule_name, stream.cursor()) else {
                    return false;
                };
                rule.matches_guarded(registry, stream, &guard)
            }
        }
    }

    /// Matches this element under its multiplicity.
    ///
    /// Optional elements succeed without consuming when they do not match.
    /// Repeatable elements consume greedily until an occurrence fails or
    /// stops making progress. The cursor is left unchanged on failure.
    pub fn matches<R, T>(&self, registry: &R, stream: &mut AssistStream<'_, T>) -> bool
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        self.matches_guarded(registry, stream, &MatchGuard::new())
    }

    pub(crate) fn matches_guarded<R, T>(
        &self,
        registry: &R,
        stream: &mut AssistStream<'_, T>,
        guard: &MatchGuard,
    ) -> bool
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        if !self.match_once_guarded(registry, stream, guard) {
            return self.multiplicity.allows_zero();
        }
        if self.multiplicity.allows_many() {
            loop {
                let before = stream.cursor();
                if !self.match_once_guarded(registry, stream, guard) || stream.cursor() == before {
                    break;
                }
            }
        }
        true
    }

    /// Enumerates the candidate matches of one occurrence of this element.
    ///
    /// Each returned node is the last token consumed by one candidate; its
    /// [`previous`](ParseNode::previous) chain leads back to `previous` and
    /// its [`end`](ParseNode::end) is where the candidate leaves the stream.
    /// Candidates are mutually exclusive alternatives, not a sequence.
    ///
    /// Token-producing variants match at most one token: on success the
    /// cursor is advanced past it and the single node is returned. Parser
    /// rule references may leave several candidates open, including ones that
    /// are only a prefix of the rule because the stream ran out; the cursor
    /// is left in place and callers continue each candidate from a fork at
    /// its `end()`.
    ///
    /// # Panics
    ///
    /// Panics if the stream is already at end-of-stream. Enumerating there is
    /// a protocol error of the caller.
    pub fn partial_matches_once<'g, R, T>(
        &'g self,
        registry: &'g R,
        stream: &mut AssistStream<'_, T>,
        parent: Option<&NodeRef<'g, T>>,
        previous: Option<&NodeRef<'g, T>>,
    ) -> Result<Vec<NodeRef<'g, T>>, Error>
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        self.partial_matches_once_with_config(
            registry,
            stream,
            parent,
            previous,
            AssistConfig::DEFAULT,
        )
    }

    /// Like [`partial_matches_once`](Self::partial_matches_once), with rule
    /// expansion bounded by `config` instead of the defaults.
    ///
    /// # Panics
    ///
    /// Panics if the stream is at end-of-stream.
    pub fn partial_matches_once_with_config<'g, R, T>(
        &'g self,
        registry: &'g R,
        stream: &mut AssistStream<'_, T>,
        parent: Option<&NodeRef<'g, T>>,
        previous: Option<&NodeRef<'g, T>>,
        config: AssistConfig,
    ) -> Result<Vec<NodeRef<'g, T>>, Error>
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        assert!(
            !stream.is_eof(),
            "partial matches requested at end of stream (element `{}`)",
            self.label
        );

        match &self.kind {
            ElementKind::Token { token_type } | ElementKind::LexerRule { token_type, .. } => {
                let Some(token) = stream.current() else {
                    return Ok(Vec::new());
                };
                if token.token_type() != *token_type {
                    return Ok(Vec::new());
                }
                let node = ParseNode::token(
                    self,
                    parent.cloned(),
                    previous.cloned(),
                    stream.cursor(),
                    token.clone(),
                );
                stream.advance();
                Ok(vec![node])
            }
            ElementKind::Rule { .. } => {
                let mut walker = Walker::new(registry, stream.tokens(), config);
                let start = MatchState::new(stream.cursor(), previous.cloned());
                let states = walker.element_once(self, &start, parent, &MatchGuard::new())?;
                Ok(walker.candidates(&start, states))
            }
        }
    }

    /// Enumerates candidate matches of this element under its multiplicity,
    /// starting at the stream's cursor.
    ///
    /// Unlike [`partial_matches_once`](Self::partial_matches_once) this never
    /// moves the stream. Candidates that consume nothing (an optional element
    /// skipped) are not reported.
    ///
    /// # Panics
    ///
    /// Panics if the stream is at end-of-stream.
    pub fn partial_matches<'g, R, T>(
        &'g self,
        registry: &'g R,
        stream: &AssistStream<'_, T>,
        parent: Option<&NodeRef<'g, T>>,
        previous: Option<&NodeRef<'g, T>>,
    ) -> Result<Vec<NodeRef<'g, T>>, Error>
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        self.partial_matches_with_config(
            registry,
            stream,
            parent,
            previous,
            AssistConfig::DEFAULT,
        )
    }

    /// Like [`partial_matches`](Self::partial_matches), with rule expansion
    /// bounded by `config` instead of the defaults.
    ///
    /// # Panics
    ///
    /// Panics if the stream is at end-of-stream.
    pub fn partial_matches_with_config<'g, R, T>(
        &'g self,
        registry: &'g R,
        stream: &AssistStream<'_, T>,
        parent: Option<&NodeRef<'g, T>>,
        previous: Option<&NodeRef<'g, T>>,
        config: AssistConfig,
    ) -> Result<Vec<NodeRef<'g, T>>, Error>
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        assert!(
            !stream.is_eof(),
            "partial matches requested at end of stream (element `{}`)",
            self.label
        );

        let mut walker = Walker::new(registry, stream.tokens(), config);
        let start = MatchState::new(stream.cursor(), previous.cloned());
        let states = walker.element(self, vec![start.clone()], parent, &MatchGuard::new())?;
        Ok(walker.candidates(&start, states))
    }

    /// Suggests what may appear first for this element.
    ///
    /// A plain token suggests itself. Rule references expand: unless the
    /// rule was already entered along this descent (`visited`) or does not
    /// resolve, the rule's own first suggestions are returned, parented under
    /// a fresh intermediate node for this element.
    pub fn suggest_first<'g, R, T>(
        &'g self,
        registry: &'g R,
        parent: Option<&NodeRef<'g, T>>,
        context: &SuggestContext<'g, T>,
        visited: &VisitedRules,
    ) -> Vec<ElementSuggestion<'g, T>>
    where
        R: RuleRegistry + ?Sized,
    {
        match &self.kind {
            ElementKind::Token { .. } => {
                vec![ElementSuggestion::new(self, parent.cloned(), context)]
            }
            ElementKind::LexerRule { rule_name, .. } | ElementKind::Rule { rule_name } => {
                if visited.contains(rule_name) {
                    return Vec::new();
                }
                let Some(rule) = self.resolve_rule(registry) else {
                    return Vec::new();
                };
                let node = ParseNode::intermediate(self, parent.cloned(), None);
                rule.suggest_first(registry, &node, context, &visited.with(rule_name))
            }
        }
    }

    /// Scans the elements that must follow unconditionally from here.
    ///
    /// A plain token is its own single mandatory. Rule references delegate to
    /// the referenced rule; a rule already entered along this descent, or one
    /// that does not resolve, yields [`MandatoryScan::stop`].
    pub fn scan_mandatories<R>(&self, registry: &R, visited: &VisitedRules) -> MandatoryScan
    where
        R: RuleRegistry + ?Sized,
    {
        match &self.kind {
            ElementKind::Token { .. } => MandatoryScan::new(vec![self.label.clone()], false),
            ElementKind::LexerRule { rule_name, .. } | ElementKind::Rule { rule_name } => {
                if visited.contains(rule_name) {
                    return MandatoryScan::stop();
                }
                match self.resolve_rule(registry) {
                    Some(rule) => rule.scan_mandatories(registry, &visited.with(rule_name)),
                    None => MandatoryScan::stop(),
                }
            }
        }
    }
}

impl fmt::Display for ElementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label, self.multiplicity)
    }
}
