use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, GenericArgument, Ident, Pat,
    PathArguments, Result, Token, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

use crate::Selector;

pub(crate) fn expand_from_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromRecord` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromRecord` may only be derived on structs with named fields.",
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
    let mut field_cases = Vec::new();
    let mut time_case = None;

    for field in fields {
        match &field.identifier {
            FieldIdentifier::Selector(selector) => {
                if !seen.insert(selector.key()) {
                    Err(Error::new(field.span, "Field identifiers must be unique."))?
                }

                field_cases.push(field_case(selector, &field));
            }
            FieldIdentifier::Time => {
                if time_case.is_some() {
                    Err(Error::new(field.span, "Field identifiers must be unique."))?
                }

                time_case = Some(time_method(&field));
            }
        }
    }

    let name = &input.ident;

    let expanded = quote! {
        impl ::sprocket::avec::FromRecord for #name {
            #[allow(unused_variables)]
            fn add_field(&mut self, field: &::sprocket::sans::DecodedField) {
                #(#field_cases)*
            }

            #time_case
        }
    };

    Ok(expanded.into())
}

fn field_case(selector: &Selector, field: &FieldMetadata) -> TokenStream2 {
    let FieldMetadata {
        name,
        primitive,
        handler,
        ..
    } = field;

    let assignment = if let Some(Handler {
        field_type,
        acc,
        val,
        body,
    }) = handler
    {
        quote! {
            for value in field.elements::<#primitive>() {
                (|#acc: &mut #field_type, #val| { #body })(&mut self.#name, value);
            }
        }
    } else {
        quote! {
            if let ::core::option::Option::Some(value) = field.get::<#primitive>() {
                self.#name = ::core::option::Option::Some(value);
            }
        }
    };

    let condition = selector.condition(quote!(field.number()), quote!(field.name()));
    quote! {
        if #condition {
            #assignment
        }
    }
}

fn time_method(field: &FieldMetadata) -> TokenStream2 {
    let FieldMetadata { name, handler, .. } = field;

    let assignment = if let Some(Handler {
        field_type,
        acc,
        val,
        body,
    }) = handler
    {
        quote! {
            (|#acc: &mut #field_type, #val| #body)(&mut self.#name, offset)
        }
    } else {
        quote! { self.#name = ::core::option::Option::Some(offset) }
    };

    quote! {
        fn add_time_offset(&mut self, offset: u8) {
            #assignment;
        }
    }
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    primitive: Type,
    identifier: FieldIdentifier,
    handler: Option<Handler>,
    span: Span,
}

#[derive(Debug)]
enum FieldIdentifier {
    Selector(Selector),
    Time,
}

/// A handler closure, split into the parts spliced into generated code.
#[derive(Debug)]
struct Handler {
    field_type: Type,
    acc: Pat,
    val: Pat,
    body: syn::Expr,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            return Ok(None);
        };

        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let span = attr.span();

        let FieldAttribute {
            identifier,
            handler,
        } = attr.meta.require_list()?.parse_args()?;

        if let FieldIdentifier::Selector(selector) = &identifier {
            selector.validate::<u8>()?;
        }

        let (primitive, handler) = if let Some(handler) = handler {
            let mut inputs = handler.inputs.iter();
            let (Some(acc), Some(parameter), None) = (inputs.next(), inputs.next(), inputs.next())
            else {
                Err(Error::new_spanned(
                    &handler,
                    "Handler closure must have two parameters.",
                ))?
            };

            let Pat::Type(pat_type) = parameter else {
                Err(Error::new_spanned(
                    parameter,
                    "Handler closure's second parameter must be annotated with the expected type.",
                ))?
            };

            let primitive = (*pat_type.ty).clone();
            let handler = Handler {
                field_type: field.ty.clone(),
                acc: acc.clone(),
                val: parameter.clone(),
                body: (*handler.body).clone(),
            };

            (primitive, Some(handler))
        } else {
            (option_inner(&field.ty)?, None)
        };

        Ok(Some(Self {
            name,
            primitive,
            identifier,
            handler,
            span,
        }))
    }
}

/// The `T` of a field of type `Option<T>`.
fn option_inner(ty: &Type) -> Result<Type> {
    let Type::Path(path) = ty else {
        Err(Error::new_spanned(ty, "Field must have a type annotation."))?
    };

    let Some(segment) = path.path.segments.first() else {
        Err(Error::new_spanned(
            &path.path.segments,
            "Field must have a type annotation.",
        ))?
    };

    if segment.ident != "Option" {
        Err(Error::new_spanned(
            &segment.ident,
            "Field without a handler must have type `Option<T>`.",
        ))?
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        Err(Error::new_spanned(
            &segment.arguments,
            "Field of type `Option<T>` must have a generic parameter.",
        ))?
    };

    let Some(argument) = arguments.args.first() else {
        Err(Error::new_spanned(
            &arguments.args,
            "Field of type `Option<T>` must have a generic parameter.",
        ))?
    };

    let GenericArgument::Type(inner_type) = argument else {
        Err(Error::new_spanned(
            argument,
            "Generic argument of a field of type `Option<T>` must be a type.",
        ))?
    };

    Ok(inner_type.clone())
}

#[derive(Debug)]
struct FieldAttribute {
    identifier: FieldIdentifier,
    handler: Option<ExprClosure>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let identifier = if let Ok(ident) = input.parse::<Ident>() {
            if ident == "time" {
                FieldIdentifier::Time
            } else {
                Err(Error::new_spanned(
                    ident,
                    "Field identifier must be an integer literal, a string literal, or `time`.",
                ))?
            }
        } else {
            FieldIdentifier::Selector(input.parse::<Selector>()?)
        };

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self {
            identifier,
            handler,
        })
    }
}
