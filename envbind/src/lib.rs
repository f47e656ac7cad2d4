//! Bind environment variables into struct fields
//!
//! `envbind` populates a configuration struct from environment variables.
//! Each field carries an annotation naming its variable, an optional default,
//! an optional `required` marker and, for sequence fields, a separator.
//! A single call binds every field and reports all failures at once.
//!
//! # Features
//!
//! - **Declarative**: the schema is generated with `#[derive(EnvBind)]`
//! - **Aggregated errors**: every failing field is reported, joined with `". "`
//! - **Nested records**: records held by value or in a `Box` are bound recursively
//! - **Leave unchanged**: unset variables without a default keep the field's value
//!
//! # Value Parsing
//!
//! - `String`: the value verbatim
//! - `bool`: `1`, `t`, `true`, `0`, `f`, `false` (any case)
//! - `i32`, `u32`, `i64`, `f32`, `f64`: decimal literals
//! - `std::time::Duration`: duration literals such as `1h30m`, `500ms`, `1.5s`
//! - `Vec<T>` of `String`, `i32`, `i64`, `f32`, `f64` or `bool`: values split on
//!   the separator (`,` unless specified)
//!
//! # Example
//!
//! ```rust
//! use envbind::{EnvBind, Record};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct Config {
//!     #[env(name = "HOME")]
//!     pub home: String,
//!
//!     #[env(name = "PORT", default = "3000")]
//!     pub port: i32,
//!
//!     #[env(name = "HOSTS", separator = ":")]
//!     pub hosts: Vec<String>,
//!
//!     #[env(name = "TIMEOUT", default = "1m30s")]
//!     pub timeout: Duration,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("HOSTS", "a:b:c");
//! #     std::env::remove_var("PORT");
//! #     std::env::remove_var("TIMEOUT");
//! let config = Config::from_env()?;
//! assert_eq!(config.port, 3000);
//! assert_eq!(config.hosts, vec!["a", "b", "c"]);
//! assert_eq!(config.timeout, Duration::from_secs(90));
//! #     Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "NAME")]`
//!
//! The variable to read. Options may follow the name after a comma, as in
//! `name = "API_KEY,required"`. Fields without a name only take their
//! default; records without a name are bound field by field.
//!
//! ## `#[env(required)]`
//!
//! Fail with [`BindError::Missing`] when the variable is unset, even if a
//! default is given. Equivalent to appending `,required` to the name.
//!
//! ## `#[env(default = "literal")]`
//!
//! Source value used when the variable is unset. It is converted like any
//! other value.
//!
//! ## `#[env(separator = ":")]`
//!
//! Separator for `Vec<T>` fields.
//!
//! ## `#[env(skip)]`
//!
//! Never write this field. Records marked `skip` are still bound field by
//! field.
//!
//! ## `#[env(prefix = "APP_")]`
//!
//! Struct-level. Prepended to every variable name of the struct's own fields.
//!
//! ```rust
//! # use envbind::EnvBind;
//! #[derive(Default, EnvBind)]
//! #[env(prefix = "APP_")]
//! struct Config {
//!     // Reads APP_PORT
//!     #[env(name = "PORT")]
//!     pub port: u32,
//! }
//! ```

mod bind;
mod convert;
mod duration;
mod env;
mod error;
mod parsers;
mod resolve;
mod schema;

pub use bind::{bind, Binder};
pub use convert::convert;
pub use duration::{parse_duration, DurationError};
pub use env::{Environment, ProcessEnv};
pub use envbind_derive::EnvBind;
pub use error::BindError;
pub use parsers::{BoxError, CustomParsers, ParserFn};
pub use resolve::resolve;
pub use schema::{Field, FieldDescriptor, Record, SeqElement, SeqSlot, Slot};

// Re-export for application code returning `from_env` errors
#[doc(hidden)]
pub use anyhow;
