//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts configuration attributes from structs and their
//! fields during macro expansion.

use syn::{Attribute, Field, Lit};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw annotation key: variable name, optionally followed by options.
    pub name: Option<String>,

    /// `required` flag, appended to the key as an option.
    pub required: bool,

    /// Default source value.
    pub default: Option<String>,

    /// Separator for sequence fields.
    pub separator: Option<String>,

    /// The field's own value is never written.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    attrs.name = Some(parse_str(&meta)?);
                    return Ok(());
                }

                // default = "..."
                if meta.path.is_ident("default") {
                    attrs.default = Some(parse_str(&meta)?);
                    return Ok(());
                }

                // separator = "..."
                if meta.path.is_ident("separator") {
                    attrs.separator = Some(parse_str(&meta)?);
                    return Ok(());
                }

                if meta.path.is_ident("required") {
                    attrs.required = true;
                    return Ok(());
                }

                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }

    /// Annotation key with `prefix` applied to a non-empty variable name.
    pub fn key(&self, prefix: &str) -> String {
        let mut key = match self.name.as_deref() {
            Some(name) if !name.is_empty() => format!("{prefix}{name}"),
            Some(name) => name.to_string(),
            None => String::new(),
        };
        if self.required {
            key.push_str(",required");
        }
        key
    }
}

/// Parsed `#[env(...)]` attributes from a struct.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prepended to the variable name of every field.
    pub prefix: String,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in env_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    parsed.prefix = parse_str(&meta)?;
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(parsed)
    }
}

fn env_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("env"))
}

fn parse_str(meta: &syn::meta::ParseNestedMeta) -> syn::Result<String> {
    let value = meta.value()?;
    match value.parse::<Lit>()? {
        Lit::Str(s) => Ok(s.value()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}
