use crate::grammar::RuleId;
use crate::spec::RuleSpec;

/// Resolves rule names to rule specifications.
///
/// The registry is owned by whatever loaded the grammar. The engine only
/// reads from it: both methods must be pure lookups so that a single registry
/// can serve concurrent sessions.
///
/// Rule-reference elements cache the [`RuleId`] they resolved to, so an
/// element must only ever be evaluated against the registry that owns it.
pub trait RuleRegistry {
    /// Looks up the id of the rule called `name`.
    fn resolve(&self, name: &str) -> Option<RuleId>;

    /// Returns the rule for a previously resolved id.
    fn rule(&self, id: RuleId) -> Option<&RuleSpec>;

    /// Resolves `name` and returns its rule in one step.
    #[inline]
    fn lookup(&self, name: &str) -> Option<&RuleSpec> {
        self.resolve(name).and_then(|id| self.rule(id))
    }
}
