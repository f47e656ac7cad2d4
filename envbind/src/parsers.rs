//! Registry of type-specific parser functions
//!
//! [`CustomParsers`] maps a target type to a function turning a source string
//! into a value of that type. The registry is not consulted by [`bind`] or
//! [`Binder`]; it is available for callers that convert values themselves.
//!
//! [`bind`]: crate::bind
//! [`Binder`]: crate::Binder

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::error::BindError;

/// Boxed error returned by parser functions
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Signature of a registered parser
pub type ParserFn = Box<dyn Fn(&str) -> Result<Box<dyn Any>, BoxError> + Send + Sync>;

/// Parser functions keyed by the type they produce.
#[derive(Default)]
pub struct CustomParsers {
    parsers: HashMap<TypeId, ParserFn>,
}

impl CustomParsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `parser` for `T`, replacing any previous parser for `T`.
    ///
    /// ```rust
    /// use envbind::CustomParsers;
    ///
    /// let mut parsers = CustomParsers::new();
    /// parsers.register(|s: &str| serde_json::from_str::<Vec<u16>>(s));
    /// ```
    pub fn register<T, E, F>(&mut self, parser: F) -> &mut Self
    where
        T: Any,
        E: Into<BoxError>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let erased: ParserFn = Box::new(move |value: &str| {
            parser(value)
                .map(|parsed| Box::new(parsed) as Box<dyn Any>)
                .map_err(Into::into)
        });
        self.parsers.insert(TypeId::of::<T>(), erased);
        self
    }

    /// Whether a parser is registered for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.parsers.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Parse `value` with the parser registered for `T` and assign it.
    ///
    /// # Errors
    ///
    /// - [`BindError::UnsupportedType`] if no parser is registered for `T`
    /// - [`BindError::CustomParser`] if the parser fails
    pub fn parse_into<T: Any>(&self, target: &mut T, value: &str) -> Result<(), BindError> {
        let parser = self
            .parsers
            .get(&TypeId::of::<T>())
            .ok_or(BindError::UnsupportedType)?;

        let parsed = parser(value).map_err(|e| BindError::CustomParser {
            type_name: type_name::<T>().to_string(),
            message: e.to_string(),
        })?;

        // Keyed by TypeId::of::<T>, so the downcast cannot fail.
        if let Ok(parsed) = parsed.downcast::<T>() {
            *target = *parsed;
        }
        Ok(())
    }
}

impl fmt::Debug for CustomParsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomParsers")
            .field("len", &self.parsers.len())
            .finish()
    }
}
