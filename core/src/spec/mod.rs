//! Grammar specifications and the operations evaluated over them.
//!
//! ```text
//! RuleSpec            named choice
//!   └── AlternativeSpec     ordered sequence
//!         └── ElementSpec       quantified position
//!               ├── Token           matches one token type
//!               ├── LexerRule       token type, suggests through a lexer rule
//!               └── Rule            matches a parser rule structurally
//! ```
//!
//! Every level answers the same four questions: does the input match
//! ([`ElementSpec::matches`]), which candidates does a partial input leave
//! open ([`ElementSpec::partial_matches_once`]), what may come first
//! ([`ElementSpec::suggest_first`]), and what must come unconditionally
//! ([`ElementSpec::scan_mandatories`]). Rules and alternatives combine the
//! answers of their children; only [`ElementSpec`] knows about variants.

mod alternative;
mod element;
mod rule;
pub(crate) mod walk;

pub use alternative::AlternativeSpec;
pub use element::{ElementKind, ElementSpec};
pub use rule::RuleSpec;
