//! Tests for scope-bound translation.

use std::cell::Cell;
use std::rc::Rc;

use easy_intl::{
    Dictionary, FormatterRegistry, Listener, ResolveWarning, TranslationStore, Translator, Value,
    data,
};

fn dict(entries: &[(&str, &str)]) -> Dictionary {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn translator(store: &Rc<TranslationStore>, scope: &str) -> Translator {
    Translator::builder()
        .store(Rc::clone(store))
        .scope_id(scope)
        .build()
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn t_resolves_scope_template() {
    let store = Rc::new(TranslationStore::new());
    store.update("cart", dict(&[("total", "Total: {sum..currency(EUR)}")]));
    let t = Translator::builder()
        .store(Rc::clone(&store))
        .scope_id("cart")
        .locale("de")
        .build();

    assert_eq!(t.t("total", &data! { "sum" => 12.5 }), "Total: 12,50\u{a0}€");
}

#[test]
fn t_missing_key_returns_key() {
    let store = Rc::new(TranslationStore::new());
    store.update("cart", dict(&[("total", "Total")]));
    let t = translator(&store, "cart");

    let (text, warnings) = t.t_with_warnings("checkout", &data! {});
    assert_eq!(text, "checkout");
    assert!(warnings.is_empty());
}

#[test]
fn t_missing_scope_returns_key() {
    let store = Rc::new(TranslationStore::new());
    let t = translator(&store, "nowhere");
    assert_eq!(t.t("title", &data! {}), "title");
    assert!(!t.has_key("title"));
}

#[test]
fn t_does_not_read_other_scopes() {
    let store = Rc::new(TranslationStore::new());
    store.update("a", dict(&[("title", "A title")]));
    store.update("b", dict(&[("title", "B title")]));

    assert_eq!(translator(&store, "a").t("title", &data! {}), "A title");
    assert_eq!(translator(&store, "b").t("title", &data! {}), "B title");
}

#[test]
fn t_empty_template_is_not_missing() {
    let store = Rc::new(TranslationStore::new());
    store.update("s", dict(&[("blank", "")]));
    let t = translator(&store, "s");
    assert!(t.has_key("blank"));
    assert_eq!(t.t("blank", &data! {}), "");
}

#[test]
fn t_with_warnings_reports_skipped_stages() {
    let store = Rc::new(TranslationStore::new());
    store.update("s", dict(&[("k", "{name..shout()}")]));
    let t = translator(&store, "s");

    let (text, warnings) = t.t_with_warnings("k", &data! { "name" => "Ana" });
    assert_eq!(text, "Ana");
    assert!(matches!(
        warnings.as_slice(),
        [ResolveWarning::UnknownFormatter { name, .. }] if name == "shout"
    ));
}

// =============================================================================
// Reactivity
// =============================================================================

#[test]
fn t_sees_updates_after_notification() {
    let store = Rc::new(TranslationStore::new());
    let t = translator(&store, "header");
    let notified = Rc::new(Cell::new(false));
    let flag = Rc::clone(&notified);
    let listener: Listener = Rc::new(move || flag.set(true));
    let _subscription = store.subscribe(listener);

    assert_eq!(t.t("welcome", &data! {}), "welcome");

    store.update("header", dict(&[("welcome", "Welcome, {name}")]));
    assert!(notified.get());
    assert_eq!(t.t("welcome", &data! { "name" => "Ana" }), "Welcome, Ana");

    store.update("header", dict(&[("welcome", "Hi {name}")]));
    assert_eq!(t.t("welcome", &data! { "name" => "Ana" }), "Hi Ana");
}

#[test]
fn t_after_clear_falls_back_to_key() {
    let store = Rc::new(TranslationStore::new());
    store.update("s", dict(&[("k", "value")]));
    let t = translator(&store, "s");
    assert_eq!(t.t("k", &data! {}), "value");

    store.clear();
    assert_eq!(t.t("k", &data! {}), "k");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn builder_defaults() {
    let store = Rc::new(TranslationStore::new());
    let t = translator(&store, "s");
    assert_eq!(t.locale(), "en");
    assert_eq!(t.scope_id(), "s");
    assert!(t.formatters().has_formatter("currency"));
}

#[test]
fn set_locale_changes_formatting() {
    let store = Rc::new(TranslationStore::new());
    store.update("s", dict(&[("n", "{v..number(1)}")]));
    let mut t = translator(&store, "s");
    let data = data! { "v" => 1234.5 };

    assert_eq!(t.t("n", &data), "1,234.5");
    t.set_locale("de");
    assert_eq!(t.t("n", &data), "1.234,5");
}

#[test]
fn custom_formatters_via_builder() {
    let store = Rc::new(TranslationStore::new());
    store.update("s", dict(&[("k", "{name..shout()}")]));
    let mut extra = FormatterRegistry::new();
    extra.register("shout", |value: &Value, _: &str, _: &[String]| {
        Ok(Value::from(format!("{}!", value.to_string().to_uppercase())))
    });
    let t = Translator::builder()
        .store(Rc::clone(&store))
        .scope_id("s")
        .formatters(FormatterRegistry::with_overrides(extra))
        .build();

    assert_eq!(t.t("k", &data! { "name" => "ana" }), "ANA!");
    assert!(t.formatters().has_formatter("plural"));
}

#[test]
fn templates_are_cached_per_key() {
    let store = Rc::new(TranslationStore::new());
    store.update("s", dict(&[("a", "{x}"), ("b", "{x}"), ("c", "{y}")]));
    let t = translator(&store, "s");
    let data = data! { "x" => 1, "y" => 2 };

    t.t("a", &data);
    t.t("b", &data);
    t.t("c", &data);
    t.t("a", &data);
    assert_eq!(t.template_cache_len(), 3);

    t.clear_template_cache();
    assert_eq!(t.template_cache_len(), 0);
}

#[test]
fn updated_templates_replace_cached_entries() {
    let store = Rc::new(TranslationStore::new());
    let t = translator(&store, "s");
    let data = data! { "n" => 7 };

    for version in 0..50 {
        store.update("s", dict(&[("label", &format!("v{version}: {{n}}"))]));
        assert_eq!(t.t("label", &data), format!("v{version}: 7"));
    }
    assert_eq!(t.template_cache_len(), 1);
}

#[test]
fn scope_id_macro_names_the_module() {
    mod checkout {
        pub(super) fn scope() -> &'static str {
            easy_intl::scope_id!()
        }
    }

    let scope = checkout::scope();
    assert!(scope.ends_with("::checkout"), "{scope}");

    let store = Rc::new(TranslationStore::new());
    store.update(scope, dict(&[("pay", "Pay now")]));
    assert_eq!(translator(&store, scope).t("pay", &data! {}), "Pay now");
}
