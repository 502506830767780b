//! Procedural macros for the spyglass introspection engine.
//!
//! - `#[derive(Inspect)]`: Implements `spyglass::Inspect` for a struct with named
//!   fields. Every field becomes a property named after the field in PascalCase
//!   (`item_count` → `ItemCount`) and tagged `browsable`.
//!
//! Field attributes:
//! - `#[inspect(skip)]`: not exposed
//! - `#[inspect(rename = "Size")]`: exposed under another name
//! - `#[inspect(tags("advanced", "debug"))]`: replaces the default `browsable` tag
//!
//! Field types must implement `spyglass::ToValue`. Generic parameters used in
//! exposed fields need that bound declared on the struct.
//!
//! Container attribute:
//! - `#[inspect(label = "Pump")]`: type label shown for values holding this type
//!   (defaults to the type's name)
//!
//! Usage:
//! ```rust,ignore
//! use spyglass::Inspect;
//!
//! #[derive(Inspect)]
//! struct Widget {
//!     name: String,
//!     count: u32,
//!     #[inspect(tags("advanced"))]
//!     cache_hits: u64,
//!     #[inspect(skip)]
//!     scratch: Vec<u8>,
//! }
//! ```
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, LitStr, Token, parenthesized, parse_macro_input,
    punctuated::Punctuated,
};

#[proc_macro_derive(Inspect, attributes(inspect))]
pub fn derive_inspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_inspect(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct FieldSpec {
    ident: syn::Ident,
    name: String,
    tags: Vec<LitStr>,
}

fn expand_inspect(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let label = container_label(&input.attrs)?.unwrap_or_else(|| ident.to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "#[derive(Inspect)] requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "#[derive(Inspect)] can only be used on structs",
            ));
        }
    };

    let mut specs = Vec::with_capacity(fields.len());
    for field in fields {
        if let Some(spec) = field_spec(field)? {
            specs.push(spec);
        }
    }

    let descriptors = specs.iter().map(|spec| {
        let name = &spec.name;
        let tags = &spec.tags;
        quote! {
            ::spyglass::PropertyDescriptor {
                name: ::std::borrow::Cow::Borrowed(#name),
                tags: ::std::vec![#(::spyglass::Tag::new(#tags)),*],
            }
        }
    });

    let read_arms = specs.iter().map(|spec| {
        let name = &spec.name;
        let field = &spec.ident;
        quote! {
            #name => ::std::result::Result::Ok(::spyglass::ToValue::to_value(&self.#field))
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::spyglass::Inspect for #ident #ty_generics #where_clause {
            fn type_label(&self) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed(#label)
            }

            fn describe(
                &self,
                _ctx: &::spyglass::Context,
            ) -> ::std::result::Result<::std::vec::Vec<::spyglass::PropertyDescriptor>, ::spyglass::ReadFault> {
                ::std::result::Result::Ok(::std::vec![#(#descriptors),*])
            }

            fn read(
                &self,
                name: &str,
                _ctx: &::spyglass::Context,
            ) -> ::std::result::Result<::spyglass::Value, ::spyglass::ReadFault> {
                match name {
                    #(#read_arms,)*
                    _ => ::std::result::Result::Err(::spyglass::ReadFault::unknown(name)),
                }
            }
        }
    })
}

fn container_label(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut label = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("inspect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("label") {
                let lit: LitStr = meta.value()?.parse()?;
                label = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported container attribute, expected `label`"))
            }
        })?;
    }
    Ok(label)
}

fn field_spec(field: &syn::Field) -> syn::Result<Option<FieldSpec>> {
    let Some(ident) = field.ident.clone() else {
        return Ok(None);
    };

    let mut skip = false;
    let mut name = None;
    let mut tags = None;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("inspect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("tags") {
                let content;
                parenthesized!(content in meta.input);
                let list = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                tags = Some(list.into_iter().collect());
                Ok(())
            } else {
                Err(meta.error("unsupported field attribute, expected `skip`, `rename` or `tags`"))
            }
        })?;
    }

    if skip {
        return Ok(None);
    }

    let name = name.unwrap_or_else(|| pascal_case(&ident.to_string()));
    let tags = tags.unwrap_or_else(|| vec![LitStr::new("browsable", ident.span())]);
    Ok(Some(FieldSpec {
        ident,
        name,
        tags,
    }))
}

/// `item_count` → `ItemCount`; a raw identifier's `r#` prefix is dropped.
fn pascal_case(field: &str) -> String {
    let field = field.strip_prefix("r#").unwrap_or(field);
    let mut out = String::with_capacity(field.len());
    for part in field.split('_').filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.is_empty() { field.to_string() } else { out }
}
