//! Parsing of `#[row(...)]` field attributes.
//!
//! This module maps attribute syntax to per-field decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// What to do with a field when building a row.
///
/// | Attribute | Option | Behavior |
/// |-----------|--------|----------|
/// | None | `Column(None)` | Column named after the field |
/// | `#[row(rename = "c")]` | `Column(Some("c"))` | Column named `c` |
/// | `#[row(skip)]` | `Skip` | Field is not part of the row |
#[derive(Clone, Debug)]
pub(crate) enum FieldOption {
    /// Include the field, optionally under another column name.
    Column(Option<LitStr>),
    /// Leave the field out.
    Skip,
}

fn set_option(target: &mut Option<FieldOption>, next: FieldOption, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[row] options specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_option(attrs: &[Attribute]) -> Result<FieldOption> {
    let mut option: Option<FieldOption> = None;
    for attr in attrs {
        if !attr.path().is_ident("row") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        set_option(&mut option, FieldOption::Skip, meta.path.span())
                    } else if meta.path.is_ident("rename") {
                        let name: LitStr = meta.value()?.parse()?;
                        if name.value().is_empty() {
                            return Err(meta.error("column name must not be empty"));
                        }
                        set_option(&mut option, FieldOption::Column(Some(name)), meta.path.span())
                    } else {
                        Err(meta.error(format!(
                            "unknown row option `{}`; expected `skip` or `rename`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected an option, e.g. #[row(skip)] or #[row(rename = \"column\")]",
                ));
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[row]; use #[row(rename = \"...\")]",
                ));
            }
        }
    }

    Ok(option.unwrap_or(FieldOption::Column(None)))
}
