use super::ElementSpec;
use crate::multiplicity::Multiplicity;
use crate::node::NodeRef;
use crate::scan::MandatoryScan;
use crate::stream::AssistStream;
use crate::suggestion::{ElementSuggestion, SuggestContext};
use crate::traits::{Lexeme, RuleRegistry};
use crate::visited::{MatchGuard, VisitedRules};

/// An ordered sequence of elements. An empty sequence matches nothing and
/// always succeeds.
#[derive(Debug, Default)]
pub struct AlternativeSpec {
    elements: Vec<ElementSpec>,
}

impl AlternativeSpec {
    pub fn new(elements: impl IntoIterator<Item = ElementSpec>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// The empty alternative.
    #[inline]
    pub fn epsilon() -> Self {
        Self::default()
    }

    #[inline]
    pub fn elements(&self) -> &[ElementSpec] {
        &self.elements
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.elements.is_empty()
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
        for element in &self.elements {
            if !element.matches_guarded(registry, stream, guard) {
                stream.rewind(start);
                return false;
            }
        }
        true
    }

    /// Suggestions of the leading elements.
    ///
    /// The first element is always asked. Each element that may be skipped
    /// lets the next one be asked too; the walk ends after the first element
    /// that must occur.
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
        let mut suggestions = Vec::new();
        for element in &self.elements {
            suggestions.extend(element.suggest_first(registry, Some(parent), context, visited));
            if element.multiplicity().is_mandatory() {
                break;
            }
        }
        suggestions
    }

    /// Walks elements left to right, collecting mandatories until the first
    /// point of uncertainty.
    ///
    /// - `?` or `*`: stop; nothing from here on is guaranteed.
    /// - `+`: the first occurrence is guaranteed, further ones are not, so
    ///   its mandatories are kept and the scan stops.
    /// - exactly one: keep its mandatories and go on, unless its own scan
    ///   stopped.
    pub fn scan_mandatories<R>(&self, registry: &R, visited: &VisitedRules) -> MandatoryScan
    where
        R: RuleRegistry + ?Sized,
    {
        let mut scan = MandatoryScan::default();
        for element in &self.elements {
            scan = match element.multiplicity() {
                Multiplicity::ZeroOrOne | Multiplicity::ZeroOrMore => scan.stopped(),
                Multiplicity::OneOrMore => scan
                    .then(|| element.scan_mandatories(registry, visited))
                    .stopped(),
                Multiplicity::One => scan.then(|| element.scan_mandatories(registry, visited)),
            };
            if scan.is_stopped() {
                break;
            }
        }
        scan
    }
}
