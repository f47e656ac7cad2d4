//! Recursive binding of records from an environment

use crate::convert::convert;
use crate::env::{Environment, ProcessEnv};
use crate::error::BindError;
use crate::resolve::resolve;
use crate::schema::{Field, FieldDescriptor, Record, Slot};

/// Bind `target` from the process environment.
///
/// Shorthand for `Binder::new().bind(target)`.
///
/// # Errors
///
/// - [`BindError::NotARecord`] if `target` is not a record, before any field is touched
/// - [`BindError::Multiple`] with every field-local error otherwise
pub fn bind<T: Field + ?Sized>(target: &mut T) -> Result<(), BindError> {
    Binder::new().bind(target)
}

/// Binds records from an [`Environment`].
///
/// Fields are visited in declaration order:
///
/// 1. A non-null boxed record field is bound recursively. Any error there
///    aborts the whole pass.
/// 2. Fields marked `skip` are ignored unless they hold a record by value.
/// 3. The source value is resolved from the field's annotations.
/// 4. A record field with an empty source value is bound recursively. Its
///    errors are discarded unless [`Binder::strict_nested`] is enabled.
/// 5. Resolution errors are collected and the field is left alone.
/// 6. An empty source value leaves the field unchanged.
/// 7. Otherwise the value is converted into the field, collecting any error.
#[derive(Debug, Clone)]
pub struct Binder<E = ProcessEnv> {
    env: E,
    strict_nested: bool,
}

impl Binder<ProcessEnv> {
    /// Binder reading the process environment.
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }
}

impl Default for Binder<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> Binder<E> {
    /// Binder reading `env`.
    pub fn with_env(env: E) -> Self {
        Self {
            env,
            strict_nested: false,
        }
    }

    /// Collect errors from records nested by value instead of discarding them.
    pub fn strict_nested(mut self, strict: bool) -> Self {
        self.strict_nested = strict;
        self
    }

    /// Bind every annotated field reachable from `target`.
    ///
    /// `target` must be a record or a non-null boxed record.
    pub fn bind<T: Field + ?Sized>(&self, target: &mut T) -> Result<(), BindError> {
        match target.slot() {
            Slot::Record(record) | Slot::Owned(Some(record)) => self.bind_record(record),
            _ => Err(BindError::NotARecord),
        }
    }

    /// Bind the fields of `record`.
    pub fn bind_record(&self, record: &mut dyn Record) -> Result<(), BindError> {
        let mut errors = Vec::new();

        for (index, field) in record.fields().iter().enumerate() {
            let slot = match record.field_slot(index) {
                Slot::Owned(Some(pointee)) if field.settable => {
                    tracing::debug!(field = field.name, "binding boxed record");
                    self.bind_record(pointee)?;
                    continue;
                }
                slot => slot,
            };

            if !field.settable && !slot.is_record() {
                tracing::trace!(field = field.name, "skipping field");
                continue;
            }

            let resolved = resolve(field, &self.env);
            let value = resolved.as_deref().unwrap_or_default();

            match slot {
                Slot::Record(nested) | Slot::Owned(Some(nested)) if value.is_empty() => {
                    self.bind_nested(field, nested, &mut errors);
                }
                slot => {
                    let value = match resolved {
                        Ok(value) => value,
                        Err(error) => {
                            errors.push(error);
                            continue;
                        }
                    };
                    if value.is_empty() {
                        tracing::trace!(field = field.name, key = field.env_name(), "no value");
                        continue;
                    }
                    match convert(slot, field, &value) {
                        Ok(()) => {
                            tracing::debug!(field = field.name, key = field.env_name(), "bound")
                        }
                        Err(error) => errors.push(error),
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(BindError::Multiple(errors))
        }
    }

    fn bind_nested(
        &self,
        field: &FieldDescriptor,
        nested: &mut dyn Record,
        errors: &mut Vec<BindError>,
    ) {
        tracing::debug!(field = field.name, "binding nested record");
        let Err(error) = self.bind_record(nested) else {
            return;
        };
        if self.strict_nested {
            errors.extend(error.into_errors());
        } else {
            tracing::warn!(
                field = field.name,
                error = %error,
                "discarding errors from nested record"
            );
        }
    }
}
