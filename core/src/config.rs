//! Engine configuration for resource limits.
//!
//! Cycle suppression already guarantees that every operation terminates on a
//! finite grammar. The limits here bound how much work a single request may
//! do against adversarial input: a right-recursive rule nests one level per
//! repetition, so a long enough token slice would otherwise exhaust the stack.
//!
//! # Example
//!
//! ```ignore
//! use assistkit_core::config::AssistConfig;
//!
//! let config = AssistConfig::new()
//!     .with_max_recursion_depth(1024)
//!     .with_max_tokens(50_000);
//!
//! let assist = CodeAssist::new(&grammar, "query")?.with_config(config);
//! ```

use crate::Error;

/// Limits applied by [`CodeAssist`](crate::CodeAssist).
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_recursion_depth` | 256 |
/// | `max_tokens` | `usize::MAX` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistConfig {
    /// Maximum nesting of rule expansions while exploring the input.
    pub max_recursion_depth: usize,

    /// Maximum number of tokens accepted per request.
    pub max_tokens: usize,
}

impl Default for AssistConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl AssistConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_recursion_depth: 256,
        max_tokens: usize::MAX,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub const fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    #[inline]
    pub const fn with_max_tokens(mut self, count: usize) -> Self {
        self.max_tokens = count;
        self
    }

    /// Removes the nesting limit. Only safe for trusted input.
    #[inline]
    pub const fn disable_recursion_limit(self) -> Self {
        self.with_max_recursion_depth(usize::MAX)
    }

    /// Checks a request's token count against `max_tokens`.
    pub fn check_tokens(&self, count: usize) -> Result<(), Error> {
        if count > self.max_tokens {
            Err(Error::TokenLimitExceeded {
                count,
                limit: self.max_tokens,
            })
        } else {
            Ok(())
        }
    }
}

/// Number of rule references a walk is currently expanded into.
///
/// Right-recursive rules nest one expansion per repetition, so a long input
/// against `list := item list?` grows this by one per item.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Counts one more nested rule expansion and checks it against
    /// `max_recursion_depth`.
    #[inline]
    pub fn descend(&mut self, config: &AssistConfig) -> Result<(), Error> {
        self.depth = self.depth.saturating_add(1);
        if self.depth > config.max_recursion_depth {
            Err(Error::RecursionLimitExceeded {
                depth: self.depth,
                limit: config.max_recursion_depth,
            })
        } else {
            Ok(())
        }
    }

    /// Finishes the innermost expansion.
    #[inline]
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
