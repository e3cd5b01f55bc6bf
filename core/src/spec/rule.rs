use super::AlternativeSpec;
use crate::node::NodeRef;
use crate::scan::MandatoryScan;
use crate::stream::AssistStream;
use crate::suggestion::{ElementSuggestion, SuggestContext};
use crate::traits::{Lexeme, RuleRegistry};
use crate::visited::{MatchGuard, VisitedRules};

/// A named grammar rule: an ordered choice between alternatives.
#[derive(Debug)]
pub struct RuleSpec {
    name: String,
    alternatives: Vec<AlternativeSpec>,
}

impl RuleSpec {
    pub fn new(
        name: impl Into<String>,
        alternatives: impl IntoIterator<Item = AlternativeSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            alternatives: alternatives.into_iter().collect(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn alternatives(&self) -> &[AlternativeSpec] {
        &self.alternatives
    }

    /// Matches the first alternative that succeeds, in declaration order.
    ///
    /// The cursor is rewound between attempts and left untouched if no
    /// alternative matches.
    pub fn matches<R, T>(&self, registry: &R, stream: &mut AssistStream<'_, T>) -> bool
    where
        R: RuleRegistry + ?Sized,
        T: Lexeme,
    {
        let Some(guard) = MatchGuard::new().enter(&self.name, stream.cursor()) else {
            return false;
        };
        self.matches_guarded(registry, stream, &guard)
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
        let start = stream.cursor();
        for alternative in &self.alternatives {
            if alternative.matches_guarded(registry, stream, guard) {
                return true;
            }
            stream.rewind(start);
        }
        false
    }

    /// First suggestions of every alternative, in declaration order.
    ///
    /// Each alternative starts from the same `visited` set, so a rule entered
    /// while suggesting one alternative is still suggested in the next.
    pub fn suggest_first<'g, R, T>(
        &'g self,
        registry: &'g R,
        parent: &NodeRef<'g, T>,
        context: &SuggestContext<'g, T>,
        visited: &VisitedRules,
    ) -> Vec<ElementSuggestion<'g, T>>
    where
        R: RuleRegistry + ?Sized,
    {
        self.alternatives
            .iter()
            .flat_map(|alternative| alternative.suggest_first(registry, parent, context, visited))
            .collect()
    }

    /// Mandatory scan of the rule.
    ///
    /// Only a rule with a single alternative has a well-defined continuation;
    /// with several, the scan stops immediately and reports nothing, even if
    /// the alternatives share a prefix.
    pub fn scan_mandatories<R>(&self, registry: &R, visited: &VisitedRules) -> MandatoryScan
    where
        R: RuleRegistry + ?Sized,
    {
        match self.alternatives.as_slice() {
            [alternative] => alternative.scan_mandatories(registry, visited),
            _ => MandatoryScan::stop(),
        }
    }
}
