//! Tests for the heading expression language.

use super::*;
use crate::matcher::RegexCache;

fn eval(source: &str, filename: &str, heading: &str) -> bool {
    let expr = Expr::parse(source).unwrap_or_else(|e| panic!("{}: {}", source, e));
    expr.matches(&Env { filename, heading }, &RegexCache::default())
}

// =========================================================================
// Evaluation
// =========================================================================

#[test]
fn test_slug_equality() {
    let source = "slug(filename) == slug(heading)";
    assert!(eval(source, "getting-started", "Getting Started"));
    assert!(!eval(source, "installation", "Setup Guide"));
}

#[test]
fn test_trim_prefix_strips_ordering_token() {
    let source = r"trimPrefix(filename, '\d+-') == slug(heading)";
    assert!(eval(source, "01-overview", "Overview"));
    assert!(eval(source, "overview", "Overview"));
    assert!(!eval(source, "01-overview", "Intro"));
}

#[test]
fn test_trim_suffix() {
    assert!(eval(
        r"trimSuffix(filename, '-v\d+') == 'guide'",
        "guide-v2",
        "x"
    ));
}

#[test]
fn test_string_functions() {
    assert!(eval("lower(heading) == 'faq'", "f", "FAQ"));
    assert!(eval("upper(heading) == 'FAQ'", "f", "faq"));
    assert!(eval("trim('  x  ') == 'x'", "f", "h"));
    assert!(eval("replace(filename, '_', ' ') == heading", "api_reference", "api reference"));
}

#[test]
fn test_predicates() {
    assert!(eval("hasPrefix(heading, 'Step')", "f", "Step 1"));
    assert!(eval("hasSuffix(heading, '?')", "f", "Why?"));
    assert!(eval("contains(heading, 'API')", "f", "The API Reference"));
    assert!(eval(r"match(heading, '^Step \d+$')", "f", "Step 12"));
    assert!(!eval(r"match(heading, '^Step \d+$')", "f", "Step twelve"));
}

#[test]
fn test_boolean_operators_and_precedence() {
    assert!(eval("true || false && false", "f", "h"));
    assert!(!eval("(true || false) && false", "f", "h"));
    assert!(eval("!false", "f", "h"));
    assert!(eval("!(heading == 'x') && heading != 'y'", "f", "z"));
}

#[test]
fn test_match_with_invalid_regex_falls_back_to_substring() {
    assert!(eval("match(heading, '(oops')", "f", "an (oops here"));
    assert!(!eval("match(heading, '(oops')", "f", "fine"));
}

#[test]
fn test_double_quoted_strings_and_escapes() {
    assert!(eval(r#"heading == "say \"hi\"""#, "f", r#"say "hi""#));
    assert!(eval(r"heading == 'it\'s'", "f", "it's"));
}

// =========================================================================
// Parse and type errors
// =========================================================================

#[test]
fn test_empty_expression_is_rejected() {
    assert!(Expr::parse("   ").is_err());
}

#[test]
fn test_unknown_function_is_rejected() {
    let err = Expr::parse("shout(heading)").unwrap_err();
    assert!(err.message.contains("unknown function"));
    assert_eq!(err.offset, 0);
}

#[test]
fn test_unknown_variable_is_rejected() {
    let err = Expr::parse("title == 'x'").unwrap_err();
    assert!(err.message.contains("unknown variable"));
}

#[test]
fn test_wrong_arity_is_rejected() {
    assert!(Expr::parse("slug(heading, filename) == 'x'").is_err());
    assert!(Expr::parse("hasPrefix(heading)").is_err());
}

#[test]
fn test_non_boolean_result_is_rejected() {
    let err = Expr::parse("slug(heading)").unwrap_err();
    assert!(err.message.contains("boolean"));
}

#[test]
fn test_type_mismatch_is_rejected() {
    assert!(Expr::parse("heading == true").is_err());
    assert!(Expr::parse("heading && true").is_err());
    assert!(Expr::parse("!heading").is_err());
    assert!(Expr::parse("lower(contains(heading, 'x')) == 'true'").is_err());
}

#[test]
fn test_syntax_errors_are_rejected() {
    assert!(Expr::parse("heading == ").is_err());
    assert!(Expr::parse("(heading == 'x'").is_err());
    assert!(Expr::parse("heading = 'x'").is_err());
    assert!(Expr::parse("heading == 'x' 'y'").is_err());
    assert!(Expr::parse("heading == 'unterminated").is_err());
    assert!(Expr::parse("heading == 'x' # comment").is_err());
}

#[test]
fn test_error_offset_points_at_problem() {
    let err = Expr::parse("heading == 'x' && nope").unwrap_err();
    assert_eq!(err.offset, 18);
}

#[test]
fn test_deep_nesting_is_rejected() {
    let depth = 200_000;
    let source = format!("{}true{}", "(".repeat(depth), ")".repeat(depth));
    let err = Expr::parse(&source).unwrap_err();
    assert!(err.message.contains("nests deeper"));

    let negated = format!("{}true", "!".repeat(depth));
    assert!(Expr::parse(&negated).is_err());

    let chained = vec!["true"; depth].join(" && ");
    assert!(Expr::parse(&chained).is_err());
}

#[test]
fn test_nesting_within_limit_is_accepted() {
    let depth = super::parser::MAX_DEPTH / 2;
    let source = format!("{}heading == 'x'{}", "(".repeat(depth), ")".repeat(depth));
    assert!(eval(&source, "f", "x"));
    assert!(eval(&vec!["true"; 20].join(" && "), "f", "h"));
}
