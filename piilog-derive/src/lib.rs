//! Derive macros for `piilog`.
//!
//! This crate generates the code behind `#[derive(LogRow)]`. It:
//! - reads `#[row(...)]` field attributes
//! - emits a `piilog::AsRow` implementation that renders each field as one
//!   `column=value` pair, in declaration order
//!
//! It does **not** decide what is sensitive. Field sets and redaction live in
//! the main `piilog` crate and are applied when the row is formatted.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod attrs;
mod derive_struct;
mod generics;
mod types;
use derive_struct::derive_struct;
use generics::add_display_bounds;

/// Derives `piilog::AsRow` for structs with named fields.
///
/// Each field becomes one `column=value` pair, in declaration order. Values
/// are rendered with `Display`; `Option<T>` fields render `T` or `NULL`.
///
/// # Field Attributes
///
/// - **No annotation**: the column is the field name.
/// - `#[row(rename = "column")]`: use a different column name.
/// - `#[row(skip)]`: leave the field out of the row entirely.
///
/// Column names must be unique after renaming. Enums, unions, tuple structs
/// and unit structs are rejected at compile time.
#[proc_macro_derive(LogRow, attributes(row))]
pub fn derive_log_row(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the piilog crate root.
///
/// Handles crate renaming (e.g., `logs = { package = "piilog", ... }`)
/// and internal usage (when derive is used inside piilog itself).
fn crate_root() -> TokenStream {
    match crate_name("piilog") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::piilog },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = input;

    let output = match data {
        Data::Struct(data) => derive_struct(&ident, data, &generics)?,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`LogRow` cannot be derived for enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`LogRow` cannot be derived for unions",
            ));
        }
    };

    let crate_root = crate_root();
    let bounded = add_display_bounds(generics, &output.display_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let pushes = &output.pushes;

    Ok(quote! {
        impl #impl_generics #crate_root::AsRow for #ident #ty_generics #where_clause {
            fn as_row(&self) -> #crate_root::Row {
                let mut row = #crate_root::Row::default();
                #(#pushes)*
                row
            }
        }
    })
}
