mod scope;
mod value;

pub use scope::scope_id_from_source;
pub use value::Value;
