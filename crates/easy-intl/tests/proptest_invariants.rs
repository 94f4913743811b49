//! Property-based invariant tests for resolution and the store.
//!
//! 1. Text without an opening brace resolves to itself
//! 2. With empty data every template resolves to itself
//! 3. Resolution never panics and is deterministic
//! 4. Escaped simple placeholders are emitted verbatim
//! 5. The store notifies exactly once per effective mutation

use std::cell::Cell;
use std::rc::Rc;

use easy_intl::{Dictionary, FormatterRegistry, Listener, TranslationStore, Value, data, resolve};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn word() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}"
}

fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..4).prop_map(|segments| segments.join("."))
}

fn stage() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("currency()".to_string()),
        Just("number(1)".to_string()),
        Just("plural(a,b)".to_string()),
        Just("date(long)".to_string()),
        word().prop_map(|name| format!("{name}()")),
    ]
}

fn placeholder() -> impl Strategy<Value = String> {
    (path(), prop::collection::vec(stage(), 0..3)).prop_map(|(path, stages)| {
        if stages.is_empty() {
            format!("{{{path}}}")
        } else {
            format!("{{{path}..{}}}", stages.join(".."))
        }
    })
}

fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![placeholder(), "[^{}\\\\]{0,8}"],
        0..6,
    )
    .prop_map(|parts| parts.concat())
}

/// Operations that can be applied to a store.
#[derive(Debug, Clone)]
enum Op {
    Update(u8, u8),
    Batch(Vec<(u8, u8)>),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 0u8..3).prop_map(|(scope, value)| Op::Update(scope, value)),
        prop::collection::vec((0u8..4, 0u8..3), 0..3).prop_map(Op::Batch),
        Just(Op::Clear),
    ]
}

fn dictionary(value: u8) -> Dictionary {
    [("k".to_string(), value.to_string())].into()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn text_without_braces_is_identity(text in "[^{]{0,40}") {
        let registry = FormatterRegistry::with_defaults();
        prop_assert_eq!(resolve(&text, &data! {}, "en", &registry), text);
    }

    #[test]
    fn empty_data_leaves_template_unchanged(template in template()) {
        let registry = FormatterRegistry::with_defaults();
        prop_assert_eq!(resolve(&template, &Value::default(), "en", &registry), template);
    }

    #[test]
    fn resolution_is_total_and_deterministic(
        template in "\\PC{0,40}",
        n in any::<i64>(),
        s in "\\PC{0,8}",
    ) {
        let registry = FormatterRegistry::with_defaults();
        let data = data! { "a" => n, "b" => s, "c" => data! { "d" => 1.5 } };
        let first = resolve(&template, &data, "fr", &registry);
        let second = resolve(&template, &data, "fr", &registry);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn escaped_simple_placeholders_stay_verbatim(path in path(), n in any::<i32>()) {
        let registry = FormatterRegistry::with_defaults();
        let escaped = format!("\\{{{path}}}");
        let data = data! { "a" => n };
        prop_assert_eq!(resolve(&escaped, &data, "en", &registry), escaped);
    }

    #[test]
    fn store_notifies_once_per_effective_mutation(
        ops in prop::collection::vec(op_strategy(), 0..30),
    ) {
        let store = TranslationStore::new();
        let calls = Rc::new(Cell::new(0usize));
        let seen = Rc::clone(&calls);
        let listener: Listener = Rc::new(move || seen.set(seen.get() + 1));
        let _subscription = store.subscribe(listener);

        let mut expected = 0usize;
        for op in ops {
            match op {
                Op::Update(scope, value) => {
                    let scope = scope.to_string();
                    let changed = store
                        .get_snapshot(&scope)
                        .is_none_or(|current| *current != dictionary(value));
                    store.update(scope, dictionary(value));
                    if changed {
                        expected += 1;
                    }
                }
                Op::Batch(entries) => {
                    store.update_batch(
                        entries
                            .into_iter()
                            .map(|(scope, value)| (scope.to_string(), dictionary(value))),
                    );
                    expected += 1;
                }
                Op::Clear => {
                    store.clear();
                    expected += 1;
                }
            }
            prop_assert_eq!(calls.get(), expected);
        }
    }
}
