//! Cycle-suppression bookkeeping threaded through recursive descents.
//!
//! Both structures are persistent: extending one returns a new value and
//! leaves the original untouched. A caller that fans out to several branches
//! (alternatives of a rule, successive elements of an alternative) hands each
//! branch the same base value, so what one branch records is never seen by
//! its siblings. Cycles are therefore detected along a single path only.

use im::{HashMap, HashSet};

/// Rule names entered along the current suggestion or scan descent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedRules {
    names: HashSet<String>,
}

impl VisitedRules {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// A copy of this set that also contains `name`.
    #[inline]
    pub fn with(&self, name: &str) -> Self {
        Self {
            names: self.names.update(name.to_owned()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for VisitedRules {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Stream positions at which rules were entered along the current match
/// descent.
///
/// A rule may be re-entered further along the stream (right recursion
/// consumes input between entries), but never at the position it was last
/// entered at: that is left recursion, and it would never consume a token.
#[derive(Debug, Clone, Default)]
pub(crate) struct MatchGuard {
    entered: HashMap<String, usize>,
}

impl MatchGuard {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records entering `name` at `position`.
    ///
    /// Returns `None` when `name` was already entered at `position` on this
    /// path.
    pub fn enter(&self, name: &str, position: usize) -> Option<Self> {
        if self.entered.get(name) == Some(&position) {
            return None;
        }
        Some(Self {
            entered: self.entered.update(name.to_owned(), position),
        })
    }
}
