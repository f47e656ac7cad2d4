//! Error types for environment variable binding

use std::fmt;

/// Errors that can occur while binding environment variables into a record.
///
/// Field-local failures are collected during a binding pass and returned
/// together as [`BindError::Multiple`]. Only [`BindError::NotARecord`] and
/// failures inside a boxed nested record abort a pass early.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The bind target is not a record.
    #[error("Expected a mutable reference to a record")]
    NotARecord,

    /// The field's type has no conversion rule.
    #[error("Type is not supported")]
    UnsupportedType,

    /// A nested record field was given a value directly.
    ///
    /// Nested records are bound field by field, so a record field cannot
    /// take a scalar string.
    #[error("Data type mismatch: a record field cannot be assigned a value directly")]
    TypeMismatch,

    /// The element type of a sequence field has no conversion rule.
    #[error("Unsupported sequence element type")]
    UnsupportedSliceType,

    /// The annotation key carries an option other than `required`.
    #[error("Env annotation option '{option}' is not supported")]
    UnsupportedOption {
        /// The unrecognized option token
        option: String,
    },

    /// A `required` environment variable is not set.
    #[error("Environment variable '{name}' is required but not set")]
    Missing {
        /// Name of the missing environment variable
        name: String,
    },

    /// Failed to convert the resolved value into the field's type.
    #[error("Failed to parse environment variable '{name}' as {type_name}: {message}")]
    Parse {
        /// Name of the environment variable being parsed
        name: String,
        /// Type name that parsing was attempted for
        type_name: String,
        /// Error message from the parser
        message: String,
    },

    /// A parser registered in [`CustomParsers`](crate::CustomParsers) failed.
    #[error("Custom parser error for {type_name}: {message}")]
    CustomParser {
        /// Type name the custom parser produces
        type_name: String,
        /// Error message from the custom parser
        message: String,
    },

    /// Every field-local error of one binding pass, in field order.
    #[error("{}", JoinedErrors(.0))]
    Multiple(Vec<BindError>),
}

impl BindError {
    /// Create a parse error
    pub fn parse_error<T: ?Sized>(name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            name: name.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a missing environment variable error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// The individual errors behind this one.
    ///
    /// Returns the collected list for [`BindError::Multiple`], or a single
    /// element slice holding `self` otherwise.
    pub fn errors(&self) -> &[BindError] {
        match self {
            Self::Multiple(errors) => errors,
            other => std::slice::from_ref(other),
        }
    }

    /// Flatten into the individual errors, see [`BindError::errors`].
    pub fn into_errors(self) -> Vec<BindError> {
        match self {
            Self::Multiple(errors) => errors,
            other => vec![other],
        }
    }
}

struct JoinedErrors<'a>(&'a [BindError]);

impl fmt::Display for JoinedErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(". ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}
