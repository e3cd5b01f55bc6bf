mod assist;
pub mod config;
mod error;
mod grammar;
mod multiplicity;
mod node;
mod scan;
pub mod spec;
mod stream;
mod suggestion;
pub mod traits;
mod visited;

pub use assist::CodeAssist;
pub use config::{AssistConfig, RecursionGuard};
pub use error::Error;
pub use grammar::{Grammar, GrammarBuilder, RuleId};
pub use multiplicity::Multiplicity;
pub use node::{MatchedToken, NodeRef, ParseNode};
pub use scan::MandatoryScan;
pub use spec::{AlternativeSpec, ElementKind, ElementSpec, RuleSpec};
pub use stream::AssistStream;
pub use suggestion::{ElementSuggestion, SuggestContext};
pub use traits::{Lexeme, RuleRegistry, Token, TokenType};
pub use visited::VisitedRules;
