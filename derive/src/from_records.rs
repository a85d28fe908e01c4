use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, Result, Type,
    parse::{Parse, ParseStream},
};

use crate::Selector;

pub(crate) fn expand_from_records(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromRecords` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromRecords` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    for field in &fields {
        if !seen.insert(field.selector.key()) {
            Err(Error::new_spanned(
                &field.name,
                "Record identifiers must be unique.",
            ))?
        }
    }

    let cases = fields.iter().map(|field| {
        let FieldMetadata {
            name,
            selector,
            is_vec,
        } = field;

        let assignment = if *is_vec {
            quote! {
                self.#name.push(::core::default::Default::default());
                self.#name.last_mut().map(|r| r as _)
            }
        } else {
            quote! {
                ::core::option::Option::Some(self.#name.insert(::core::default::Default::default()))
            }
        };

        let condition = selector.condition(quote!(number), quote!(name));
        quote! {
            if #condition {
                return { #assignment };
            }
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl ::sprocket::avec::FromRecords for #name {
            #[allow(unused_variables)]
            fn add_record(
                &mut self,
                number: u16,
                name: ::core::option::Option<&str>,
            ) -> ::core::option::Option<&mut dyn ::sprocket::avec::FromRecord> {
                #(#cases)*
                ::core::option::Option::None
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    selector: Selector,
    is_vec: bool,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("record")) else {
            return Ok(None);
        };

        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let RecordAttribute { selector } = attr.meta.require_list()?.parse_args()?;
        selector.validate::<u16>()?;

        let Type::Path(path) = &field.ty else {
            Err(Error::new_spanned(
                &field.ty,
                "Field must have a type annotation.",
            ))?
        };

        let Some(segment) = path.path.segments.first() else {
            Err(Error::new_spanned(
                &path.path.segments,
                "Field must have an `Option<T>` or `Vec<T>` type.",
            ))?
        };

        let is_vec = if segment.ident == "Option" {
            false
        } else if segment.ident == "Vec" {
            true
        } else {
            Err(Error::new_spanned(
                &segment.ident,
                "Field must have an `Option<T>` or `Vec<T>` type.",
            ))?
        };

        Ok(Some(Self {
            name,
            selector,
            is_vec,
        }))
    }
}

#[derive(Debug)]
struct RecordAttribute {
    selector: Selector,
}

impl Parse for RecordAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let selector = input.parse::<Selector>()?;
        Ok(Self { selector })
    }
}
