mod common;

use assistkit::{AssistConfig, AssistStream, ElementSpec, Error, Grammar, Multiplicity, ParseNode};
use common::{alt, grammar, letters, rule, t};
use test_case::test_case;

fn empty() -> Grammar {
    grammar(Vec::new())
}

#[test_case(Multiplicity::One, "", false, 0 ; "one on empty")]
#[test_case(Multiplicity::One, "a", true, 1 ; "one on single")]
#[test_case(Multiplicity::One, "aa", true, 1 ; "one on double")]
#[test_case(Multiplicity::One, "b", false, 0 ; "one on mismatch")]
#[test_case(Multiplicity::ZeroOrOne, "", true, 0 ; "optional on empty")]
#[test_case(Multiplicity::ZeroOrOne, "aa", true, 1 ; "optional on double")]
#[test_case(Multiplicity::ZeroOrOne, "b", true, 0 ; "optional on mismatch")]
#[test_case(Multiplicity::OneOrMore, "", false, 0 ; "plus on empty")]
#[test_case(Multiplicity::OneOrMore, "aaab", true, 3 ; "plus stops at mismatch")]
#[test_case(Multiplicity::ZeroOrMore, "b", true, 0 ; "star on mismatch")]
#[test_case(Multiplicity::ZeroOrMore, "aa", true, 2 ; "star on double")]
fn test_matches_under_multiplicity(
    multiplicity: Multiplicity,
    input: &str,
    expected: bool,
    cursor: usize,
) {
    let grammar = empty();
    let tokens = letters(input);
    let element = t("a").with_multiplicity(multiplicity);
    let mut stream = AssistStream::new(&tokens);

    assert_eq!(element.matches(&grammar, &mut stream), expected);
    assert_eq!(stream.cursor(), cursor);
}

#[test]
fn test_match_once_advances_only_on_success() {
    let grammar = empty();
    let tokens = letters("ab");
    let a = t("a");
    let b = t("b");
    let mut stream = AssistStream::new(&tokens);

    assert!(!b.match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 0);
    assert!(a.match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 1);
    assert!(b.match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 2);

    // End-of-stream never matches.
    assert!(!a.match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 2);
}

#[test]
fn test_match_once_is_deterministic() {
    let grammar = empty();
    let tokens = letters("ba");
    let a = t("a");
    let mut stream = AssistStream::new(&tokens);

    assert!(!a.match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 0);
    assert!(!a.match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 0);
}

#[test]
fn test_failed_rule_match_is_repeatable() {
    let grammar = grammar([rule("ab", [alt([t("a"), t("b")])])]);
    let element = ElementSpec::rule("ab");
    let tokens = letters("ac");
    let mut stream = AssistStream::new(&tokens);

    // The alternative consumed `a` before failing; each attempt rewinds it.
    for _ in 0..3 {
        assert!(!element.match_once(&grammar, &mut stream));
        assert_eq!(stream.cursor(), 0);
    }
}

#[test]
fn test_rule_match_takes_first_successful_alternative() {
    // pair := 'a' 'b' | 'a'
    let grammar = grammar([rule("pair", [alt([t("a"), t("b")]), alt([t("a")])])]);
    let element = ElementSpec::rule("pair");

    let tokens = letters("ab");
    let mut stream = AssistStream::new(&tokens);
    assert!(element.match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 2);

    // The first alternative fails halfway; the second still starts at 0.
    let tokens = letters("ac");
    let mut stream = AssistStream::new(&tokens);
    assert!(element.match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 1);
}

#[test]
fn test_unresolved_rule_never_matches() {
    let grammar = empty();
    let tokens = letters("a");
    let mut stream = AssistStream::new(&tokens);

    let missing = ElementSpec::rule("missing");
    let optional = ElementSpec::rule("missing").optional();

    assert!(!missing.match_once(&grammar, &mut stream));
    assert!(optional.matches(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 0);
}

#[test]
fn test_left_recursion_terminates() {
    // expr := expr '+' 'n' | 'n'
    let recursive = alt([ElementSpec::rule("expr"), t("+"), t("n")]);
    let grammar = grammar([rule("expr", [recursive, alt([t("n")])])]);
    let tokens = letters("n+n");
    let mut stream = AssistStream::new(&tokens);

    assert!(ElementSpec::rule("expr").match_once(&grammar, &mut stream));
    assert_eq!(stream.cursor(), 1);
}

#[test]
fn test_right_recursion_consumes_everything() {
    // list := 'a' list?
    let tail = ElementSpec::rule("list").optional();
    let grammar = grammar([rule("list", [alt([t("a"), tail])])]);
    let tokens = letters("aaaa");
    let mut stream = AssistStream::new(&tokens);

    assert!(ElementSpec::rule("list").match_once(&grammar, &mut stream));
    assert!(stream.is_eof());
}

#[test]
fn test_partial_matches_once_on_token() {
    let grammar = empty();
    let tokens = letters("ab");
    let rule_spec = ElementSpec::rule("outer");
    let a = t("a");
    let b = t("b");
    let parent = ParseNode::intermediate(&rule_spec, None, None);
    let mut stream = AssistStream::new(&tokens);

    let missed = b
        .partial_matches_once(&grammar, &mut stream, Some(&parent), None)
        .unwrap();
    assert!(missed.is_empty());
    assert_eq!(stream.cursor(), 0);

    let first = a
        .partial_matches_once(&grammar, &mut stream, Some(&parent), None)
        .unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(stream.cursor(), 1);

    let second = b
        .partial_matches_once(&grammar, &mut stream, Some(&parent), Some(&first[0]))
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(stream.cursor(), 2);

    let node = &second[0];
    assert_eq!(node.matched().map(|m| m.index), Some(1));
    assert_eq!(node.end(), Some(2));
    assert_eq!(node.parent().map(|p| p.spec().label()), Some("outer"));
    let texts: Vec<&str> = node
        .matched_tokens()
        .into_iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, ["a", "b"]);
}

#[test]
fn test_partial_matches_once_on_rule_reports_every_candidate() {
    // pair := 'a' | 'a' 'b'
    let grammar = grammar([rule("pair", [alt([t("a")]), alt([t("a"), t("b")])])]);
    let element = ElementSpec::rule("pair");
    let tokens = letters("ab");
    let mut stream = AssistStream::new(&tokens);

    let candidates = element
        .partial_matches_once(&grammar, &mut stream, None, None)
        .unwrap();
    let mut ends: Vec<usize> = candidates.iter().filter_map(|node| node.end()).collect();
    ends.sort_unstable();
    assert_eq!(ends, [1, 2]);
    assert_eq!(stream.cursor(), 0);

    for node in &candidates {
        let rules: Vec<&str> = node.ancestors().map(|n| n.spec().label()).collect();
        assert_eq!(rules, ["pair"]);
    }
}

#[test]
fn test_partial_matches_once_on_rule_keeps_prefix_candidates() {
    // triple := 'a' 'b' 'c'
    let grammar = grammar([rule("triple", [alt([t("a"), t("b"), t("c")])])]);
    let element = ElementSpec::rule("triple");
    let tokens = letters("ab");
    let mut stream = AssistStream::new(&tokens);

    let candidates = element
        .partial_matches_once(&grammar, &mut stream, None, None)
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].end(), Some(2));
}

#[test]
fn test_partial_matches_under_multiplicity() {
    let grammar = empty();
    let tokens = letters("aab");
    let element = t("a").zero_or_more();
    let stream = AssistStream::new(&tokens);

    let candidates = element
        .partial_matches(&grammar, &stream, None, None)
        .unwrap();
    let ends: Vec<usize> = candidates.iter().filter_map(|node| node.end()).collect();
    assert_eq!(ends, [1, 2]);
    assert_eq!(stream.cursor(), 0);
}

#[test]
fn test_partial_matches_with_config_bounds_expansion() {
    // list := 'a' list?
    let tail = ElementSpec::rule("list").optional();
    let grammar = grammar([rule("list", [alt([t("a"), tail])])]);
    let element = ElementSpec::rule("list");
    let tokens = letters(&"a".repeat(300));
    let mut stream = AssistStream::new(&tokens);

    let err = element
        .partial_matches_once(&grammar, &mut stream, None, None)
        .unwrap_err();
    let exceeded = Error::RecursionLimitExceeded {
        depth: 257,
        limit: 256,
    };
    assert_eq!(err, exceeded);

    let config = AssistConfig::new().with_max_recursion_depth(1024);
    let candidates = element
        .partial_matches_once_with_config(&grammar, &mut stream, None, None, config)
        .unwrap();
    assert!(candidates.iter().any(|node| node.end() == Some(300)));
    assert_eq!(stream.cursor(), 0);

    let candidates = element
        .partial_matches_with_config(&grammar, &stream, None, None, config)
        .unwrap();
    assert_eq!(candidates.len(), 300);
}

#[test]
#[should_panic(expected = "end of stream")]
fn test_partial_matches_once_at_eof_panics() {
    let grammar = empty();
    let tokens = letters("a");
    let mut stream = AssistStream::at(&tokens, 1);
    let _ = t("a").partial_matches_once(&grammar, &mut stream, None, None);
}

#[test]
fn test_resolution_outcome_is_cached() {
    let element = ElementSpec::rule("late");
    let without = empty();
    assert!(element.resolve_rule(&without).is_none());

    // A miss is remembered even against a registry that knows the rule.
    let with = grammar([rule("late", [alt([t("a")])])]);
    assert!(element.resolve_rule(&with).is_none());

    let fresh = ElementSpec::rule("late");
    let first = fresh.resolve_rule(&with).unwrap();
    let second = fresh.resolve_rule(&with).unwrap();
    assert!(std::ptr::eq(first, second));
}
