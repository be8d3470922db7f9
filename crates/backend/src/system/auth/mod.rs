pub mod middleware;

pub use middleware::{require_internal_key, INTERNAL_KEY_HEADER};
