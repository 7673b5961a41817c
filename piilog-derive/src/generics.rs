//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that appear in included fields.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are skipped when collecting generics. They are
//! usually marked `#[row(skip)]` anyway, but a marker type should never need
//! to be `Display`:
//!
//! ```ignore
//! #[derive(LogRow)]
//! struct TypedId<T> {
//!     id: String,
//!     #[row(skip)]
//!     _marker: PhantomData<T>,
//! }
//! ```

use syn::{parse_quote, Ident};

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return;
            };
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        _ => {}
    }
}

/// Adds `Display` bounds to generic parameters used by included fields.
pub(crate) fn add_display_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Display));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use syn::{parse_quote, Generics, Type};

    use super::{add_display_bounds, collect_generics_from_type};

    #[test]
    fn collects_direct_and_nested_generics_once() {
        let generics: Generics = parse_quote!(<T, U, V>);
        let mut used = Vec::new();
        let types: [Type; 3] = [
            parse_quote!(T),
            parse_quote!(Option<U>),
            parse_quote!(&'a T),
        ];
        for ty in &types {
            collect_generics_from_type(ty, &generics, &mut used);
        }
        let names: Vec<String> = used.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["T", "U"]);
    }

    #[test]
    fn phantom_data_is_ignored() {
        let generics: Generics = parse_quote!(<T>);
        let ty: Type = parse_quote!(PhantomData<T>);
        let mut used = Vec::new();
        collect_generics_from_type(&ty, &generics, &mut used);
        assert!(used.is_empty());
    }

    #[test]
    fn display_bound_is_added_only_where_used() {
        let generics: Generics = parse_quote!(<T, U>);
        let used = vec![syn::Ident::new("U", proc_macro2::Span::call_site())];
        let bounded = add_display_bounds(generics, &used);
        let params: Vec<String> = bounded
            .type_params()
            .map(|param| param.to_token_stream().to_string())
            .collect();
        assert_eq!(params[0], "T");
        assert!(params[1].contains("Display"));
    }
}
