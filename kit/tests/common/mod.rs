//! Shared grammars and lexers for the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;

use assistkit::{
    AlternativeSpec, ElementSpec, Grammar, RuleId, RuleRegistry, RuleSpec, Token, TokenType,
};
use logos::Logos;

/// Token type for a single-letter token: its character code.
pub fn letter(label: &str) -> TokenType {
    TokenType(label.chars().next().map(u32::from).unwrap_or_default())
}

/// A token reference whose label is its letter.
pub fn t(label: &str) -> ElementSpec {
    ElementSpec::token(label, letter(label))
}

/// One token per character of `input`.
pub fn letters(input: &str) -> Vec<Token> {
    input
        .chars()
        .map(|c| Token::new(u32::from(c), c.to_string()))
        .collect()
}

pub fn alt(elements: impl IntoIterator<Item = ElementSpec>) -> AlternativeSpec {
    AlternativeSpec::new(elements)
}

pub fn rule(name: &str, alternatives: impl IntoIterator<Item = AlternativeSpec>) -> RuleSpec {
    RuleSpec::new(name, alternatives)
}

pub fn grammar(rules: impl IntoIterator<Item = RuleSpec>) -> Grammar {
    Grammar::builder().rules(rules).build().unwrap()
}

/// A registry over a [`Grammar`] that records every rule it hands out.
pub struct CountingRegistry<'g> {
    inner: &'g Grammar,
    expanded: RefCell<Vec<String>>,
}

impl<'g> CountingRegistry<'g> {
    pub fn new(inner: &'g Grammar) -> Self {
        Self {
            inner,
            expanded: RefCell::new(Vec::new()),
        }
    }

    /// How many times the rule called `name` was fetched.
    pub fn expansions(&self, name: &str) -> usize {
        self.expanded.borrow().iter().filter(|n| *n == name).count()
    }
}

impl RuleRegistry for CountingRegistry<'_> {
    fn resolve(&self, name: &str) -> Option<RuleId> {
        self.inner.resolve(name)
    }

    fn rule(&self, id: RuleId) -> Option<&RuleSpec> {
        let rule = self.inner.rule(id)?;
        self.expanded.borrow_mut().push(rule.name().to_owned());
        Some(rule)
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sql {
    #[token("select")]
    Select,
    #[token("from")]
    From,
    #[token("where")]
    Where,
    #[token("and")]
    And,
    #[token(",")]
    Comma,
    #[token("*")]
    Star,
    #[token("=")]
    Eq,
    #[token(";")]
    Semi,
    #[regex("[0-9]+")]
    Number,
    #[regex("[a-z_][a-z0-9_]*")]
    Ident,
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
}

impl Sql {
    pub fn token_type(self) -> TokenType {
        TokenType(self as u32)
    }
}

/// Lexes `input`, dropping whitespace.
pub fn lex(input: &str) -> Vec<Token> {
    let mut lexer = Sql::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let kind = result.unwrap();
        if kind != Sql::Whitespace {
            tokens.push(Token::new(kind.token_type(), lexer.slice()));
        }
    }
    tokens
}

fn keyword(name: &str, literal: &str, kind: Sql) -> RuleSpec {
    rule(name, [alt([ElementSpec::token(literal, kind.token_type())])])
}

/// ```text
/// query          := select_stmt ';'?
/// select_stmt    := SELECT columns FROM IDENT where_clause?
/// columns        := '*' | column_list
/// column_list    := IDENT column_tail*
/// column_tail    := ',' IDENT
/// where_clause   := WHERE condition condition_tail*
/// condition      := IDENT '=' value
/// condition_tail := AND condition
/// value          := IDENT | NUMBER
///
/// SELECT := 'select'   FROM := 'from'   WHERE := 'where'   AND := 'and'
/// ```
pub fn sql_grammar() -> Grammar {
    let ident = || ElementSpec::token("IDENT", Sql::Ident.token_type());
    grammar([
        rule(
            "query",
            [alt([
                ElementSpec::rule("select_stmt"),
                ElementSpec::token(";", Sql::Semi.token_type()).optional(),
            ])],
        ),
        rule(
            "select_stmt",
            [alt([
                ElementSpec::lexer_rule("SELECT", Sql::Select.token_type()),
                ElementSpec::rule("columns"),
                ElementSpec::lexer_rule("FROM", Sql::From.token_type()),
                ident(),
                ElementSpec::rule("where_clause").optional(),
            ])],
        ),
        rule(
            "columns",
            [
                alt([ElementSpec::token("*", Sql::Star.token_type())]),
                alt([ElementSpec::rule("column_list")]),
            ],
        ),
        rule(
            "column_list",
            [alt([ident(), ElementSpec::rule("column_tail").zero_or_more()])],
        ),
        rule(
            "column_tail",
            [alt([
                ElementSpec::token(",", Sql::Comma.token_type()),
                ident(),
            ])],
        ),
        rule(
            "where_clause",
            [alt([
                ElementSpec::lexer_rule("WHERE", Sql::Where.token_type()),
                ElementSpec::rule("condition"),
                ElementSpec::rule("condition_tail").zero_or_more(),
            ])],
        ),
        rule(
            "condition",
            [alt([
                ident(),
                ElementSpec::token("=", Sql::Eq.token_type()),
                ElementSpec::rule("value"),
            ])],
        ),
        rule(
            "condition_tail",
            [alt([
                ElementSpec::lexer_rule("AND", Sql::And.token_type()),
                ElementSpec::rule("condition"),
            ])],
        ),
        rule(
            "value",
            [
                alt([ident()]),
                alt([ElementSpec::token("NUMBER", Sql::Number.token_type())]),
            ],
        ),
        keyword("SELECT", "select", Sql::Select),
        keyword("FROM", "from", Sql::From),
        keyword("WHERE", "where", Sql::Where),
        keyword("AND", "and", Sql::And),
    ])
}
