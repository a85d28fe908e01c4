use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    DeriveInput, Error, Lit, LitInt, LitStr, Result,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

mod from_record;
mod from_records;

#[proc_macro_derive(FromRecord, attributes(field))]
pub fn derive_from_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_record::expand_from_record(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

#[proc_macro_derive(FromRecords, attributes(record))]
pub fn derive_from_records(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_records::expand_from_records(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

/// A message or field, selected by number or by profile name.
#[derive(Debug)]
enum Selector {
    Number(LitInt),
    Name(LitStr),
}

impl Selector {
    /// Key identifying the selector, for detecting duplicates.
    fn key(&self) -> String {
        match self {
            Self::Number(n) => n.base10_digits().to_owned(),
            Self::Name(s) => format!("{:?}", s.value()),
        }
    }

    /// Condition matching the selector against a number and an optional name.
    fn condition(&self, number: TokenStream2, name: TokenStream2) -> TokenStream2 {
        match self {
            Self::Number(n) => quote! { #number == #n },
            Self::Name(s) => quote! { #name == ::core::option::Option::Some(#s) },
        }
    }

    /// Check the number fits the given integer type.
    fn validate<N>(&self) -> Result<()>
    where
        N: std::str::FromStr,
        N::Err: std::fmt::Display,
    {
        if let Self::Number(n) = self {
            n.base10_parse::<N>()?;
        }
        Ok(())
    }
}

impl Parse for Selector {
    fn parse(input: ParseStream) -> Result<Self> {
        match input.parse::<Lit>()? {
            Lit::Int(n) => Ok(Self::Number(n)),
            Lit::Str(s) => Ok(Self::Name(s)),
            lit => Err(Error::new_spanned(
                lit,
                "Identifier must be an integer or string literal.",
            )),
        }
    }
}
