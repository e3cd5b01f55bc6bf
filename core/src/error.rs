//! Core error types for assistkit.
//!
//! Only conditions a caller can act on are reported as errors: grammar
//! construction problems and exceeded resource limits. A rule reference that
//! names a missing rule is *not* an error; the element simply contributes
//! nothing. Calling an operation against its documented precondition is a
//! bug in the caller and panics instead.

use thiserror::Error as ThisError;

/// Core assistkit error type.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The entry rule handed to the engine is not in the registry.
    #[error("unknown rule `{name}`")]
    UnknownRule { name: String },

    /// Two rules with the same name were added to a grammar.
    #[error("duplicate rule `{name}`")]
    DuplicateRule { name: String },

    /// A rule was declared without any alternative.
    #[error("rule `{name}` has no alternatives")]
    EmptyRule { name: String },

    /// Rule expansion nested deeper than the configured limit.
    ///
    /// Right-recursive rules nest once per consumed repetition, so very long
    /// inputs against such rules are the usual trigger.
    #[error("recursion limit exceeded: depth {depth} > limit {limit}")]
    RecursionLimitExceeded {
        /// Current nesting depth when the limit was exceeded.
        depth: usize,
        /// Maximum allowed depth.
        limit: usize,
    },

    /// The token slice handed to the engine is longer than allowed.
    #[error("token limit exceeded: {count} tokens > limit {limit}")]
    TokenLimitExceeded {
        /// Number of tokens supplied.
        count: usize,
        /// Maximum allowed token count.
        limit: usize,
    },
}
