use std::collections::HashSet;

use crate::Error;
use crate::config::AssistConfig;
use crate::node::NodeRef;
use crate::scan::MandatoryScan;
use crate::spec::ElementSpec;
use crate::spec::walk::{MatchState, Walker};
use crate::suggestion::{ElementSuggestion, SuggestContext};
use crate::traits::{Lexeme, RuleRegistry};
use crate::visited::{MatchGuard, VisitedRules};

/// Completion engine over one entry rule of a grammar.
///
/// `CodeAssist` borrows the registry and holds no per-request state, so a
/// single instance can answer any number of requests. Each request explores
/// the input on its own cursors and cycle guards.
///
/// # Example
///
/// ```ignore
/// let assist = CodeAssist::new(&grammar, "query")?;
///
/// // Tokens before the caret, and the word being typed at the caret.
/// for suggestion in assist.suggest(&tokens, "fr")? {
///     println!("{suggestion}");
/// }
/// ```
#[derive(Debug)]
pub struct CodeAssist<'g, R: ?Sized> {
    registry: &'g R,
    entry: ElementSpec,
    config: AssistConfig,
}

impl<'g, R> CodeAssist<'g, R>
where
    R: RuleRegistry + ?Sized,
{
    /// Creates an engine rooted at `entry_rule`.
    ///
    /// Fails with [`Error::UnknownRule`] if the registry does not know the
    /// rule. Rules referenced further down may still be missing; those only
    /// contribute nothing.
    pub fn new(registry: &'g R, entry_rule: &str) -> Result<Self, Error> {
        let entry = ElementSpec::rule(entry_rule);
        if entry.resolve_rule(registry).is_none() {
            return Err(Error::UnknownRule {
                name: entry_rule.to_owned(),
            });
        }
        Ok(Self {
            registry,
            entry,
            config: AssistConfig::DEFAULT,
        })
    }

    #[inline]
    pub fn with_config(mut self, config: AssistConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &'g R {
        self.registry
    }

    /// The rule-reference element the engine starts from.
    #[inline]
    pub fn entry(&self) -> &ElementSpec {
        &self.entry
    }

    /// Suggests every element that may follow `tokens`.
    ///
    /// All parses under which `tokens` is a valid prefix of the entry rule
    /// are followed; suggestions reached along several of them are reported
    /// once, in the order first reached. Empty input yields what the entry
    /// rule may start with. Input that is not a valid prefix yields nothing.
    pub fn suggest<'a, T>(
        &'a self,
        tokens: &[T],
        match_with: &str,
    ) -> Result<Vec<ElementSuggestion<'a, T>>, Error>
    where
        T: Lexeme,
    {
        self.config.check_tokens(tokens.len())?;
        let mut walker = Walker::new(self.registry, tokens, self.config).collecting(match_with);
        walker.element(
            &self.entry,
            vec![MatchState::start()],
            None,
            &MatchGuard::new(),
        )?;

        let mut seen = HashSet::new();
        Ok(walker
            .into_suggestions()
            .into_iter()
            .filter(|suggestion| seen.insert(suggestion.identity()))
            .collect())
    }

    /// First suggestions of the entry rule, through the visited-set
    /// expansion of [`ElementSpec::suggest_first`].
    pub fn suggest_first<'a, T>(&'a self, match_with: &str) -> Vec<ElementSuggestion<'a, T>> {
        self.entry.suggest_first(
            self.registry,
            None,
            &SuggestContext::new(match_with),
            &VisitedRules::new(),
        )
    }

    /// Whether the entry rule can consume exactly `tokens`.
    ///
    /// Every alternative is explored, so a shorter match of an earlier
    /// alternative does not hide a complete match of a later one.
    pub fn matches<T>(&self, tokens: &[T]) -> Result<bool, Error>
    where
        T: Lexeme,
    {
        self.config.check_tokens(tokens.len())?;
        let mut walker = Walker::new(self.registry, tokens, self.config);
        let reached = walker.element(
            &self.entry,
            vec![MatchState::start()],
            None,
            &MatchGuard::new(),
        )?;
        Ok(reached.iter().any(|state| state.position == tokens.len()))
    }

    /// Last token nodes of every parse under which `tokens` is a valid,
    /// possibly incomplete, prefix of the entry rule.
    pub fn partial_matches<'a, T>(&'a self, tokens: &[T]) -> Result<Vec<NodeRef<'a, T>>, Error>
    where
        T: Lexeme,
    {
        self.config.check_tokens(tokens.len())?;
        let mut walker = Walker::new(self.registry, tokens, self.config);
        walker.element(
            &self.entry,
            vec![MatchState::start()],
            None,
            &MatchGuard::new(),
        )?;
        Ok(walker.into_frontier())
    }

    /// Mandatory scan of the entry rule.
    pub fn mandatories(&self) -> MandatoryScan {
        self.entry
            .scan_mandatories(self.registry, &VisitedRules::new())
    }
}
