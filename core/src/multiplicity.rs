use core::fmt;

/// Quantifier attached to every grammar element.
///
/// | Variant | Grammar suffix | Occurrences |
/// |---------|----------------|-------------|
/// | `One` | (none) | exactly 1 |
/// | `ZeroOrOne` | `?` | 0 or 1 |
/// | `OneOrMore` | `+` | 1 or more |
/// | `ZeroOrMore` | `*` | 0 or more |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    #[default]
    One,
    ZeroOrOne,
    OneOrMore,
    ZeroOrMore,
}

impl Multiplicity {
    /// Returns `true` if the element may be skipped entirely.
    #[inline]
    pub const fn allows_zero(self) -> bool {
        matches!(self, Multiplicity::ZeroOrOne | Multiplicity::ZeroOrMore)
    }

    /// Returns `true` if the element may occur more than once.
    #[inline]
    pub const fn allows_many(self) -> bool {
        matches!(self, Multiplicity::OneOrMore | Multiplicity::ZeroOrMore)
    }

    /// Returns `true` if at least one occurrence is required.
    #[inline]
    pub const fn is_mandatory(self) -> bool {
        !self.allows_zero()
    }

    /// The suffix used for this quantifier in grammar notation.
    #[inline]
    pub const fn suffix(self) -> &'static str {
        match self {
            Multiplicity::One => "",
            Multiplicity::ZeroOrOne => "?",
            Multiplicity::OneOrMore => "+",
            Multiplicity::ZeroOrMore => "*",
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
