//! Tests for the template scanner.

use easy_intl::parser::ast::{Segment, Stage};
use easy_intl::parser::{parse_stage, parse_template};

fn placeholder_sources(input: &str) -> Vec<String> {
    parse_template(input)
        .placeholders()
        .map(|p| p.source.clone())
        .collect()
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn parse_plain_text_is_one_literal() {
    let template = parse_template("Hello, world!");
    assert_eq!(
        template.segments,
        vec![Segment::Literal("Hello, world!".to_string())]
    );
}

#[test]
fn parse_empty_template() {
    assert!(parse_template("").segments.is_empty());
}

#[test]
fn parse_empty_braces_are_literal() {
    let template = parse_template("a {} b");
    assert_eq!(template.segments, vec![Segment::Literal("a {} b".to_string())]);
}

#[test]
fn parse_unclosed_brace_is_literal() {
    let template = parse_template("open {name");
    assert_eq!(
        template.segments,
        vec![Segment::Literal("open {name".to_string())]
    );
}

// =============================================================================
// Simple Placeholders
// =============================================================================

#[test]
fn parse_simple_placeholder() {
    let template = parse_template("Hi {name}!");
    let placeholders: Vec<_> = template.placeholders().collect();
    assert_eq!(placeholders.len(), 1);
    assert_eq!(placeholders[0].path, vec!["name"]);
    assert!(!placeholders[0].is_piped());
    assert_eq!(template.segments.len(), 3);
}

#[test]
fn parse_dotted_path() {
    let template = parse_template("{user.profile.name}");
    let placeholder = template.placeholders().next().unwrap();
    assert_eq!(placeholder.path, vec!["user", "profile", "name"]);
    assert_eq!(placeholder.path_str(), "user.profile.name");
}

#[test]
fn parse_simple_form_accepts_any_content() {
    let template = parse_template("{first name}");
    let placeholder = template.placeholders().next().unwrap();
    assert_eq!(placeholder.path, vec!["first name"]);
    assert_eq!(placeholder.source, "{first name}");
}

#[test]
fn parse_placeholder_ends_at_first_closing_brace() {
    assert_eq!(placeholder_sources("{a{b}c}"), vec!["{a{b}"]);
}

#[test]
fn parse_adjacent_placeholders() {
    assert_eq!(placeholder_sources("{a}{b}"), vec!["{a}", "{b}"]);
}

// =============================================================================
// Piped Placeholders
// =============================================================================

#[test]
fn parse_single_stage() {
    let template = parse_template("{price..currency(EUR)}");
    let placeholder = template.placeholders().next().unwrap();
    assert_eq!(placeholder.path, vec!["price"]);
    assert_eq!(
        placeholder.pipeline,
        vec![Stage {
            name: "currency".to_string(),
            args: vec!["EUR".to_string()],
        }]
    );
}

#[test]
fn parse_chained_stages_in_order() {
    let template = parse_template("{user.name..lower()..upper()}");
    let placeholder = template.placeholders().next().unwrap();
    assert_eq!(placeholder.path, vec!["user", "name"]);
    let names: Vec<_> = placeholder.pipeline.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["lower", "upper"]);
}

#[test]
fn parse_namespaced_stage() {
    let template = parse_template("{score..Math.round()}");
    let stage = &template.placeholders().next().unwrap().pipeline[0];
    assert_eq!(stage.name, "Math.round");
    assert_eq!(stage.name_segments().collect::<Vec<_>>(), vec!["Math", "round"]);
    assert!(stage.args.is_empty());
}

#[test]
fn parse_stage_without_parentheses() {
    let template = parse_template("{n..number}");
    let stage = &template.placeholders().next().unwrap().pipeline[0];
    assert_eq!(stage.name, "number");
    assert!(stage.args.is_empty());
}

#[test]
fn parse_space_in_args_falls_back_to_simple_form() {
    let template = parse_template("{n..plural(item, items)}");
    let placeholder = template.placeholders().next().unwrap();
    assert!(!placeholder.is_piped());
    assert_eq!(placeholder.path, vec!["n", "", "plural(item, items)"]);
}

#[test]
fn parse_bare_delimiter_is_not_piped() {
    let placeholder = parse_template("{name..}")
        .placeholders()
        .next()
        .cloned()
        .unwrap();
    assert!(!placeholder.is_piped());
}

// =============================================================================
// Stage Arguments
// =============================================================================

#[test]
fn parse_stage_splits_and_trims_args() {
    assert_eq!(
        parse_stage("plural(item, items)"),
        Stage {
            name: "plural".to_string(),
            args: vec!["item".to_string(), "items".to_string()],
        }
    );
}

#[test]
fn parse_stage_empty_parentheses_have_no_args() {
    assert!(parse_stage("currency()").args.is_empty());
    assert!(parse_stage("currency(  )").args.is_empty());
}

#[test]
fn parse_stage_keeps_empty_inner_args() {
    assert_eq!(parse_stage("f(a,,b)").args, vec!["a", "", "b"]);
}

#[test]
fn parse_stage_args_are_never_coerced() {
    assert_eq!(parse_stage("number(2)").args, vec!["2"]);
}

// =============================================================================
// Escaping
// =============================================================================

#[test]
fn parse_escaped_simple_placeholder_is_literal() {
    let template = parse_template(r"\{name}");
    assert_eq!(template.segments, vec![Segment::Literal(r"\{name}".to_string())]);
}

#[test]
fn parse_escaped_piped_placeholder_keeps_backslash_literal() {
    let template = parse_template(r"\{n..number()}");
    assert_eq!(template.segments[0], Segment::Literal(r"\".to_string()));
    assert_eq!(placeholder_sources(r"\{n..number()}"), vec!["{n..number()}"]);
}

#[test]
fn parse_escaped_brace_without_chain_is_literal() {
    assert!(placeholder_sources(r"\{n..}").is_empty());
    assert!(placeholder_sources(r"\{a.b}").is_empty());
}

#[test]
fn parse_long_run_of_unclosed_braces_is_literal() {
    let input = "{".repeat(200_000);
    let template = parse_template(&input);
    assert_eq!(template.segments, vec![Segment::Literal(input)]);
}

#[test]
fn parse_long_run_of_escaped_braces_before_close() {
    let input = format!("{}}}", r"\{".repeat(100_000));
    let template = parse_template(&input);
    assert_eq!(template.segments, vec![Segment::Literal(input)]);
}

#[test]
fn parse_escape_only_applies_to_following_brace() {
    assert_eq!(placeholder_sources(r"\{a} {b}"), vec!["{b}"]);
}
