//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// `EnvBind` derive macro
///
/// Implements `envbind::Record` and `envbind::Field` for a struct with named
/// fields. Every field type must implement `envbind::Field`.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to the struct's env var names
///
/// **Field-level**:
/// - `#[env(name = "NAME")]`: Environment variable name, optionally followed by `,required`
/// - `#[env(required)]`: The variable must be set
/// - `#[env(default = "value")]`: Source value used when the variable is not set
/// - `#[env(separator = ":")]`: Separator for `Vec<T>` fields
/// - `#[env(skip)]`: Never write the field
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_envbind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvBind only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvBind only supports structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut slot_arms = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = FieldAttrs::from_field(field)?;

        let name = field_name.to_string();
        let type_name = type_name(&field.ty);
        let key = attrs.key(&struct_attrs.prefix);
        let default = attrs.default.unwrap_or_default();
        let separator = attrs.separator.unwrap_or_default();
        let skip = attrs.skip.then(|| quote! { .skipped() });

        descriptors.push(quote! {
            ::envbind::FieldDescriptor::new(#name, #type_name)
                .key(#key)
                .default_value(#default)
                .separator(#separator)
                #skip
        });
        slot_arms.push(quote! {
            #index => ::envbind::Field::slot(&mut self.#field_name),
        });
    }

    Ok(quote! {
        impl #impl_generics ::envbind::Record for #struct_name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::envbind::FieldDescriptor] {
                const FIELDS: &[::envbind::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field_slot(&mut self, index: usize) -> ::envbind::Slot<'_> {
                match index {
                    #(#slot_arms)*
                    _ => ::envbind::Slot::Unsupported,
                }
            }
        }

        impl #impl_generics ::envbind::Field for #struct_name #ty_generics #where_clause {
            fn slot(&mut self) -> ::envbind::Slot<'_> {
                ::envbind::Slot::Record(self)
            }
        }
    })
}

/// Type as written, without the spacing `to_string` puts between tokens.
///
/// A space is kept only where it separates two words, as in `&'a mut T`.
fn type_name(ty: &Type) -> String {
    let spaced = ty.to_token_stream().to_string();
    let is_word = |c: char| c.is_alphanumeric() || c == '_' || c == '\'';

    let mut name = String::with_capacity(spaced.len());
    let mut chars = spaced.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let before = name.chars().last().is_some_and(is_word);
            let after = chars.peek().copied().is_some_and(is_word);
            if !(before && after) {
                continue;
            }
        }
        name.push(c);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_type_name_generics() {
        let ty: Type = parse_quote!(Vec<String>);
        assert_eq!(type_name(&ty), "Vec<String>");
    }

    #[test]
    fn test_type_name_paths() {
        let ty: Type = parse_quote!(Option<Box<std::time::Duration>>);
        assert_eq!(type_name(&ty), "Option<Box<std::time::Duration>>");
    }

    #[test]
    fn test_type_name_keeps_word_spacing() {
        let ty: Type = parse_quote!(&'static mut str);
        assert_eq!(type_name(&ty), "&'static mut str");
    }
}
