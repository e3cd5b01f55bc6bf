//! Collaborator interfaces for the assistkit engine.
//!
//! The engine sits between two external subsystems: the lexer that produced
//! the tokens, and the grammar loader that owns the rules. Both are reached
//! through the traits in this module.
//!
//! # Trait Overview
//!
//! ```text
//! Lexeme (token interface)
//!     └── token_type() compared against ElementSpec expectations
//!
//! RuleRegistry (grammar interface)
//!     ├── resolve(name) -> RuleId
//!     └── rule(id) -> RuleSpec
//! ```
//!
//! # Usage Patterns
//!
//! ```ignore
//! use assistkit::{CodeAssist, Grammar, Lexeme, RuleRegistry};
//!
//! fn complete<L: Lexeme>(grammar: &Grammar, tokens: &[L]) -> Vec<String> {
//!     let assist = CodeAssist::new(grammar, "query").unwrap();
//!     assist
//!         .suggest(tokens, "")
//!         .unwrap()
//!         .iter()
//!         .map(|s| s.label().to_string())
//!         .collect()
//! }
//! ```

mod lexeme;
mod registry;

pub use lexeme::{Lexeme, Token, TokenType};
pub use registry::RuleRegistry;
