//! Struct-specific `AsRow` derivation.
//!
//! This module generates one `row.push(column, value)` statement per field
//! and collects generic parameters that need a `Display` bound.

use proc_macro2::{Ident, TokenStream};
use quote::quote_spanned;
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    attrs::{parse_field_option, FieldOption},
    generics::collect_generics_from_type,
    types::option_inner_type,
};

pub(crate) struct StructDeriveOutput {
    pub(crate) pushes: Vec<TokenStream>,
    pub(crate) display_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let fields = match data.fields {
        Fields::Named(fields) => fields,
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new(
                fields.span(),
                format!("`LogRow` needs named fields to use as column names; `{name}` is a tuple struct"),
            ));
        }
        Fields::Unit => {
            return Err(syn::Error::new(
                name.span(),
                format!("`LogRow` cannot be derived for unit struct `{name}`"),
            ));
        }
    };

    let mut pushes = Vec::new();
    let mut display_generics = Vec::new();
    let mut columns: Vec<String> = Vec::new();

    for field in fields.named {
        let span = field.span();
        let option = parse_field_option(&field.attrs)?;
        let Some(ident) = field.ident else {
            return Err(syn::Error::new(span, "named field without an identifier"));
        };

        let column = match option {
            FieldOption::Skip => continue,
            FieldOption::Column(Some(rename)) => rename.value(),
            FieldOption::Column(None) => column_name(&ident),
        };
        if columns.contains(&column) {
            return Err(syn::Error::new(
                span,
                format!("duplicate column `{column}`; use #[row(rename = \"...\")] to disambiguate"),
            ));
        }
        columns.push(column.clone());

        let ty = &field.ty;
        collect_generics_from_type(ty, generics, &mut display_generics);

        let push = if option_inner_type(ty).is_some() {
            quote_spanned! { span =>
                row.push(#column, match &self.#ident {
                    ::core::option::Option::Some(value) => ::std::string::ToString::to_string(value),
                    ::core::option::Option::None => ::std::string::String::from("NULL"),
                });
            }
        } else {
            quote_spanned! { span =>
                row.push(#column, &self.#ident);
            }
        };
        pushes.push(push);
    }

    Ok(StructDeriveOutput {
        pushes,
        display_generics,
    })
}

/// Field name as written, without a raw-identifier prefix.
fn column_name(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}
