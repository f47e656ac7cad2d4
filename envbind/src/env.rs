//! Environment variable sources

use std::collections::HashMap;
use std::env;

/// A read-only key to value store that fields are resolved against.
pub trait Environment {
    /// Returns the value of `key`, or `None` if it is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment.
///
/// Variables whose value is not valid unicode are treated as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        env::var(key).ok()
    }
}

/// Fixed set of variables, intended for tests and embedding.
impl Environment for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}
