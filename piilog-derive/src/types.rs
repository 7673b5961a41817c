//! Type utilities for the derive macro.

/// Returns `T` if `ty` is written as `Option<T>`.
///
/// Recognizes `Option`, `std::option::Option` and `core::option::Option`.
/// Type aliases of `Option` are not seen through and are rendered with
/// `Display` like any other type.
pub(crate) fn option_inner_type(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    let segments: Vec<String> = path
        .path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    let is_option = matches!(
        segments.iter().map(String::as_str).collect::<Vec<_>>().as_slice(),
        ["Option"] | ["std" | "core", "option", "Option"]
    );
    if !is_option {
        return None;
    }

    let segment = path.path.segments.last()?;
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use syn::{parse_quote, Type};

    use super::option_inner_type;

    #[test]
    fn detects_option_forms() {
        let plain: Type = parse_quote!(Option<String>);
        let qualified: Type = parse_quote!(::std::option::Option<u32>);
        assert!(option_inner_type(&plain).is_some());
        assert!(option_inner_type(&qualified).is_some());
    }

    #[test]
    fn ignores_other_types() {
        let string: Type = parse_quote!(String);
        let vec: Type = parse_quote!(Vec<Option<String>>);
        let reference: Type = parse_quote!(&'static str);
        assert!(option_inner_type(&string).is_none());
        assert!(option_inner_type(&vec).is_none());
        assert!(option_inner_type(&reference).is_none());
    }
}
