use std::collections::HashMap;

use crate::Error;
use crate::spec::RuleSpec;
use crate::traits::RuleRegistry;

/// Index of a rule inside the registry that resolved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) usize);

impl RuleId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A loaded grammar: rules in declaration order plus a name index.
///
/// Grammars are immutable once built and `Send + Sync`, so one instance can
/// serve any number of concurrent sessions.
#[derive(Debug, Default)]
pub struct Grammar {
    rules: Vec<RuleSpec>,
    index: HashMap<String, RuleId>,
}

impl Grammar {
    #[inline]
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// Rules in declaration order.
    #[inline]
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks a rule up by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&RuleSpec> {
        self.lookup(name)
    }
}

impl RuleRegistry for Grammar {
    #[inline]
    fn resolve(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    #[inline]
    fn rule(&self, id: RuleId) -> Option<&RuleSpec> {
        self.rules.get(id.0)
    }
}

/// Collects rules into a [`Grammar`].
///
/// The builder checks only what the data model requires of each rule on its
/// own: a unique name and at least one alternative. References to rules that
/// are never added are accepted; they resolve to nothing at use.
///
/// # Example
///
/// ```ignore
/// let grammar = Grammar::builder()
///     .rule(RuleSpec::new("pair", [AlternativeSpec::new([
///         ElementSpec::token("key", KEY),
///         ElementSpec::token("=", EQ),
///         ElementSpec::rule("value"),
///     ])]))
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    rules: Vec<RuleSpec>,
}

impl GrammarBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    #[inline]
    pub fn rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several rules.
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleSpec>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> Result<Grammar, Error> {
        let mut index = HashMap::with_capacity(self.rules.len());
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.alternatives().is_empty() {
                return Err(Error::EmptyRule {
                    name: rule.name().to_owned(),
                });
            }
            if index.insert(rule.name().to_owned(), RuleId(i)).is_some() {
                return Err(Error::DuplicateRule {
                    name: rule.name().to_owned(),
                });
            }
        }
        Ok(Grammar {
            rules: self.rules,
            index,
        })
    }
}
