pub mod formatters;
pub mod interpreter;
pub mod loader;
pub mod parser;
pub mod store;
pub mod types;

pub use interpreter::{
    FormatError, FormatterFn, FormatterRegistry, LintWarning, LoadError, RegistryEntry,
    ResolveContext, ResolveWarning, Translator, compute_suggestions, eval_template,
    lint_dictionary, lint_template, resolve, resolve_with_warnings,
};
pub use loader::{Bundle, load_bundle, parse_bundle, parse_dictionary};
pub use parser::parse_template;
pub use store::{Dictionary, Listener, StoreState, Subscription, TranslationStore};
pub use types::{Value, scope_id_from_source};

/// Creates a [`Value::Map`] from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, strings, lists, or nested `data!` maps directly.
///
/// # Example
///
/// ```
/// use easy_intl::{data, Value};
///
/// let d = data! { "count" => 3, "user" => data! { "name" => "Alice" } };
/// assert_eq!(d.get("count").and_then(Value::as_number), Some(3));
/// assert_eq!(d.get_path(["user", "name"]).and_then(Value::as_string), Some("Alice"));
/// ```
#[macro_export]
macro_rules! data {
    {} => {
        $crate::Value::Map(::std::collections::BTreeMap::new())
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::BTreeMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            $crate::Value::Map(map)
        }
    };
}

/// The module path of the call site, usable as a scope id.
///
/// # Example
///
/// ```
/// mod settings {
///     pub fn scope() -> &'static str {
///         easy_intl::scope_id!()
///     }
/// }
///
/// assert!(settings::scope().ends_with("settings"));
/// ```
#[macro_export]
macro_rules! scope_id {
    () => {
        ::core::module_path!()
    };
}
