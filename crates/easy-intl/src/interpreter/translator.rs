//! Scope-bound translation lookup.
//!
//! A [`Translator`] is what a UI layer hands to its components: it reads the
//! scope's dictionary from a [`TranslationStore`] and resolves the requested
//! key. Because it always reads the store's current snapshot, calling it again
//! after a store notification picks up the new templates.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bon::Builder;
use tracing::warn;

use crate::interpreter::{FormatterRegistry, ResolveContext, ResolveWarning, eval_template};
use crate::parser::ast::Template;
use crate::parser::parse_template;
use crate::store::TranslationStore;
use crate::types::Value;

/// Lookup-and-resolve for one scope.
///
/// A missing scope or key is not an error: the key itself is returned so the
/// UI shows something recognizable, and a warning is logged.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use easy_intl::{data, TranslationStore, Translator};
///
/// let store = Rc::new(TranslationStore::new());
/// let t = Translator::builder()
///     .store(Rc::clone(&store))
///     .scope_id("src/components/Header")
///     .build();
///
/// assert_eq!(t.t("welcome", &data! {}), "welcome");
///
/// store.update(
///     "src/components/Header",
///     [("welcome".to_string(), "Hello {name}".to_string())].into(),
/// );
/// assert_eq!(t.t("welcome", &data! { "name" => "Ana" }), "Hello Ana");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Translator {
    /// Store holding the dictionaries.
    store: Rc<TranslationStore>,

    /// Scope whose dictionary is consulted.
    scope_id: String,

    /// Locale passed to formatters.
    #[builder(default = "en".to_string())]
    locale: String,

    /// Formatters available to pipelines. Use
    /// [`FormatterRegistry::with_overrides`] to add custom ones on top of the
    /// defaults.
    #[builder(default = FormatterRegistry::with_defaults())]
    formatters: FormatterRegistry,

    /// Parsed templates keyed by translation key, with the source they were
    /// parsed from. An entry is replaced when the store's source changes.
    ///
    /// Uses `RefCell` for interior mutability so `t` can remain `&self`.
    #[builder(skip)]
    template_cache: RefCell<HashMap<String, (String, Rc<Template>)>>,
}

impl Translator {
    /// The scope this translator reads.
    pub fn scope_id(&self) -> &str {
        &self.scope_id
    }

    /// Get the current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Change the locale used for subsequent lookups.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The formatter registry.
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Translate `key`, resolving its template against `data`.
    pub fn t(&self, key: &str, data: &Value) -> String {
        self.t_with_warnings(key, data).0
    }

    /// Translate `key` and return the resolver warnings as well.
    pub fn t_with_warnings(&self, key: &str, data: &Value) -> (String, Vec<ResolveWarning>) {
        let Some(source) = self
            .store
            .get_snapshot(&self.scope_id)
            .and_then(|dictionary| dictionary.get(key).cloned())
        else {
            warn!(scope = %self.scope_id, key, "Missing translation: {key}");
            return (key.to_string(), Vec::new());
        };

        let template = self.cached_template(key, &source);
        let mut ctx = ResolveContext::new(data, &self.locale, &self.formatters);
        let text = eval_template(&template, &mut ctx);
        (text, ctx.take_warnings())
    }

    /// Returns true if the scope currently has a template for `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.store
            .get_snapshot(&self.scope_id)
            .is_some_and(|dictionary| dictionary.contains_key(key))
    }

    /// Drop all cached parsed templates.
    pub fn clear_template_cache(&self) {
        self.template_cache.borrow_mut().clear();
    }

    /// Number of cached parsed templates.
    pub fn template_cache_len(&self) -> usize {
        self.template_cache.borrow().len()
    }

    fn cached_template(&self, key: &str, source: &str) -> Rc<Template> {
        let cached = self
            .template_cache
            .borrow()
            .get(key)
            .filter(|(cached_source, _)| cached_source == source)
            .map(|(_, template)| Rc::clone(template));
        if let Some(template) = cached {
            return template;
        }
        let template = Rc::new(parse_template(source));
        self.template_cache.borrow_mut().insert(
            key.to_string(),
            (source.to_string(), Rc::clone(&template)),
        );
        template
    }
}
