//! Text helpers: script detection and party name cleanup.

pub mod names;
pub mod script;

pub use names::normalize_name;
pub use script::{contains_tamil, is_tamil_char, TAMIL_BLOCK};
