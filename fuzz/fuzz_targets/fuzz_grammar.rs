#![no_main]

use arbitrary::Arbitrary;
use assistkit::{
    AlternativeSpec, AssistConfig, CodeAssist, ElementSpec, Grammar, Multiplicity, RuleSpec,
    Token, TokenType,
};
use libfuzzer_sys::fuzz_target;

const TOKEN_TYPES: u8 = 4;
const MAX_RULES: usize = 8;
const MAX_ALTERNATIVES: usize = 4;
const MAX_ELEMENTS: usize = 6;
const MAX_TOKENS: usize = 32;

#[derive(Debug, Arbitrary)]
enum FuzzElement {
    Token(TokenType, Multiplicity),
    LexerRule(u8, TokenType, Multiplicity),
    Rule(u8, Multiplicity),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    rules: Vec<Vec<Vec<FuzzElement>>>,
    tokens: Vec<u8>,
    match_with: String,
}

fn token_type(tt: TokenType) -> TokenType {
    TokenType(tt.0 % u32::from(TOKEN_TYPES))
}

// Rule indices may point one past the last rule, leaving a dangling reference.
fn rule_name(index: u8, count: usize) -> String {
    format!("r{}", usize::from(index) % (count + 1))
}

fn element(element: &FuzzElement, count: usize) -> ElementSpec {
    match element {
        FuzzElement::Token(tt, m) => {
            let tt = token_type(*tt);
            ElementSpec::token(format!("t{}", tt.0), tt).with_multiplicity(*m)
        }
        FuzzElement::LexerRule(index, tt, m) => {
            ElementSpec::lexer_rule(rule_name(*index, count), token_type(*tt))
                .with_multiplicity(*m)
        }
        FuzzElement::Rule(index, m) => {
            ElementSpec::rule(rule_name(*index, count)).with_multiplicity(*m)
        }
    }
}

fn build(rules: &[Vec<Vec<FuzzElement>>]) -> Option<Grammar> {
    let count = rules.len().min(MAX_RULES);
    if count == 0 {
        return None;
    }
    let specs = rules.iter().take(count).enumerate().map(|(i, alternatives)| {
        let mut alternatives: Vec<AlternativeSpec> = alternatives
            .iter()
            .take(MAX_ALTERNATIVES)
            .map(|elements| {
                AlternativeSpec::new(
                    elements
                        .iter()
                        .take(MAX_ELEMENTS)
                        .map(|e| element(e, count)),
                )
            })
            .collect();
        if alternatives.is_empty() {
            alternatives.push(AlternativeSpec::epsilon());
        }
        RuleSpec::new(format!("r{i}"), alternatives)
    });
    Grammar::builder().rules(specs).build().ok()
}

fuzz_target!(|input: FuzzInput| {
    let Some(grammar) = build(&input.rules) else {
        return;
    };
    let tokens: Vec<Token> = input
        .tokens
        .iter()
        .take(MAX_TOKENS)
        .map(|b| Token::new(u32::from(b % TOKEN_TYPES), format!("t{}", b % TOKEN_TYPES)))
        .collect();

    let Ok(assist) = CodeAssist::new(&grammar, "r0") else {
        return;
    };
    let assist = assist.with_config(AssistConfig::new().with_max_recursion_depth(64));

    // Expansions are cycle-guarded and must terminate on any grammar.
    let _ = assist.mandatories();
    for suggestion in assist.suggest_first::<Token>(&input.match_with) {
        assert!(suggestion.token_type().is_some());
    }

    if let Ok(suggestions) = assist.suggest(&tokens, &input.match_with) {
        for suggestion in &suggestions {
            assert!(suggestion.token_type().is_some());
            assert_eq!(suggestion.match_with(), input.match_with);
        }
    }

    if let Ok(nodes) = assist.partial_matches(&tokens) {
        for node in nodes {
            assert_eq!(node.end(), Some(tokens.len()));
            assert_eq!(node.matched_tokens().len(), tokens.len());
        }
    }

    let _ = assist.matches(&tokens);
});
