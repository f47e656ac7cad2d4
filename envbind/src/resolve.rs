//! Source value resolution for annotated fields

use crate::env::Environment;
use crate::error::BindError;
use crate::schema::FieldDescriptor;

/// Resolve the source string of `field` against `env`.
///
/// The value is the environment variable named by the field's key, or the
/// field's default when the variable is unset. Option tokens after the name
/// are applied in order and each one replaces the outcome of the previous:
///
/// - an empty token does nothing
/// - `required` reads the variable again, ignoring the default, and fails
///   with [`BindError::Missing`] when it is unset
/// - anything else fails with [`BindError::UnsupportedOption`]
///
/// The last option to set an error decides the result, so `required,bogus`
/// fails even when the variable is set while `bogus,required` succeeds.
pub fn resolve<E>(field: &FieldDescriptor, env: &E) -> Result<String, BindError>
where
    E: Environment + ?Sized,
{
    let (name, options) = field.split_key();
    // An empty name never matches a variable.
    let lookup = |name: &str| {
        if name.is_empty() {
            None
        } else {
            env.lookup(name)
        }
    };

    let mut value = lookup(name).unwrap_or_else(|| field.default.to_string());
    let mut error = None;

    for option in options {
        match option {
            "" => {}
            "required" => match lookup(name) {
                Some(found) => {
                    value = found;
                    error = None;
                }
                None => {
                    value = String::new();
                    error = Some(BindError::missing(name));
                }
            },
            other => {
                error = Some(BindError::UnsupportedOption {
                    option: other.to_string(),
                });
            }
        }
    }

    match error {
        Some(error) => Err(error),
        None => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_value_from_env() {
        let field = FieldDescriptor::new("home", "String").key("HOME");
        let env = vars(&[("HOME", "/home/app")]);
        assert_eq!(resolve(&field, &env).unwrap(), "/home/app");
    }

    #[test]
    fn test_default_when_unset() {
        let field = FieldDescriptor::new("port", "i32")
            .key("PORT")
            .default_value("3000");
        assert_eq!(resolve(&field, &vars(&[])).unwrap(), "3000");
    }

    #[test]
    fn test_env_overrides_default() {
        let field = FieldDescriptor::new("port", "i32")
            .key("PORT")
            .default_value("3000");
        let env = vars(&[("PORT", "8080")]);
        assert_eq!(resolve(&field, &env).unwrap(), "8080");
    }

    #[test]
    fn test_set_but_empty_beats_default() {
        let field = FieldDescriptor::new("port", "i32")
            .key("PORT")
            .default_value("3000");
        let env = vars(&[("PORT", "")]);
        assert_eq!(resolve(&field, &env).unwrap(), "");
    }

    #[test]
    fn test_unannotated_field_is_empty() {
        let field = FieldDescriptor::new("nested", "Nested");
        assert_eq!(resolve(&field, &vars(&[])).unwrap(), "");
    }

    #[test]
    fn test_empty_name_ignores_empty_key_entry() {
        let env = vars(&[("", "x")]);

        let nested = FieldDescriptor::new("nested", "Nested");
        assert_eq!(resolve(&nested, &env).unwrap(), "");

        let defaulted = FieldDescriptor::new("mode", "String").default_value("dev");
        assert_eq!(resolve(&defaulted, &env).unwrap(), "dev");

        let required = FieldDescriptor::new("mode", "String").key(",required");
        match resolve(&required, &env) {
            Err(BindError::Missing { name }) => assert_eq!(name, ""),
            other => panic!("Expected Missing error, got {other:?}"),
        }
    }

    #[test]
    fn test_required_present() {
        let field = FieldDescriptor::new("key", "String").key("API_KEY,required");
        let env = vars(&[("API_KEY", "secret")]);
        assert_eq!(resolve(&field, &env).unwrap(), "secret");
    }

    #[test]
    fn test_required_ignores_default() {
        let field = FieldDescriptor::new("key", "String")
            .key("API_KEY,required")
            .default_value("fallback");
        match resolve(&field, &vars(&[])) {
            Err(BindError::Missing { name }) => assert_eq!(name, "API_KEY"),
            other => panic!("Expected Missing error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_option_is_noop() {
        let field = FieldDescriptor::new("home", "String").key("HOME,");
        let env = vars(&[("HOME", "/root")]);
        assert_eq!(resolve(&field, &env).unwrap(), "/root");
    }

    #[test]
    fn test_unsupported_option() {
        let field = FieldDescriptor::new("home", "String").key("HOME,optional");
        let env = vars(&[("HOME", "/root")]);
        match resolve(&field, &env) {
            Err(BindError::UnsupportedOption { option }) => assert_eq!(option, "optional"),
            other => panic!("Expected UnsupportedOption error, got {other:?}"),
        }
    }

    #[test]
    fn test_last_option_wins() {
        let env = vars(&[("HOME", "/root")]);

        let bogus_last = FieldDescriptor::new("home", "String").key("HOME,required,bogus");
        assert!(matches!(
            resolve(&bogus_last, &env),
            Err(BindError::UnsupportedOption { .. })
        ));

        let required_last = FieldDescriptor::new("home", "String").key("HOME,bogus,required");
        assert_eq!(resolve(&required_last, &env).unwrap(), "/root");
    }
}
