//! Snapshot tests for rendered messages and diagnostics.

use easy_intl::parser::parse_template;
use easy_intl::{FormatterRegistry, data, lint_template, resolve_with_warnings};
use insta::assert_snapshot;

#[test]
fn invoice_message() {
    let registry = FormatterRegistry::with_defaults();
    let data = data! {
        "customer" => data! { "name" => "Ana" },
        "count" => 3,
        "total" => 1234.5,
        "due" => "2024-03-01",
    };
    let template = "{customer.name}: {count} {count..plural(item,items)}, \
                    {total..currency(EUR)} due {due..date(long)}";

    let (text, warnings) = resolve_with_warnings(template, &data, "en", &registry);
    assert!(warnings.is_empty());
    assert_snapshot!(text, @"Ana: 3 items, €1,234.50 due March 1, 2024");
}

#[test]
fn partial_failure_message() {
    let registry = FormatterRegistry::with_defaults();
    let data = data! { "name" => "John", "score" => "high" };
    let template = "{name..titlecase()} scored {score..number()} in {round}";

    let (text, warnings) = resolve_with_warnings(template, &data, "en", &registry);
    let report: Vec<String> = warnings.iter().map(ToString::to_string).collect();

    assert_snapshot!(text, @"John scored high in {round}");
    assert_snapshot!(report.join("\n"), @r"
    Training module not found: `titlecase`
    formatter `number` failed: expected a number, got 'high'
    ");
}

#[test]
fn lint_report() {
    let registry = FormatterRegistry::with_defaults();
    let template = parse_template("{a..curency(EUR)} {b..plural(x, y)} {c d}");
    let report: Vec<String> = lint_template(&template, &registry)
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_snapshot!(report.join("\n"), @r"
    {a..curency(EUR)}: unknown formatter `curency`
    {b..plural(x, y)}: pipeline is not recognized, placeholder will be read as a plain path
    {c d}: path can never resolve
    ");
}
