//! Implementation of the `#[derive(Reflect)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::{Data, DataEnum, DeriveInput, Fields, Index, parse_macro_input};

use crate::attrs::{FieldAttrs, TypeAttrs, VariantAttrs};

pub fn derive_reflect_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_reflect_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_reflect_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect cannot be derived for generic types",
        ));
    }

    let attrs = TypeAttrs::from_attrs(&input.attrs)?;
    let type_name = attrs.name.clone().unwrap_or_else(|| name.to_string());

    let (is_enum, body) = match &input.data {
        Data::Struct(data) => (false, struct_body(name, &data.fields)?),
        Data::Enum(data) => (true, enum_body(name, data, is_repr_u128(&input.attrs)?)?),
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Reflect cannot be derived for unions",
            ));
        }
    };

    let flags = type_flags(&attrs, is_enum);
    let tags = &attrs.tags;
    let bases = &attrs.bases;

    Ok(quote! {
        impl ::reflection::Reflect for #name {
            fn type_name() -> &'static str {
                #type_name
            }

            fn type_flags() -> ::reflection::TypeFlags {
                #flags
            }

            #[allow(unused_variables)]
            fn reflect(
                ty: &mut ::reflection::TypeBuilder<'_, Self>,
            ) -> ::core::result::Result<(), ::reflection::RegistrationError> {
                #( ty.tag(<#tags as ::core::default::Default>::default()); )*
                #( ty.base::<#bases>()?; )*
                #body
                ::core::result::Result::Ok(())
            }
        }

        impl ::reflection::FieldShape for #name {
            type Element = Self;
        }
    })
}

/// `TypeFlags` expression for the declared flags.
fn type_flags(attrs: &TypeAttrs, is_enum: bool) -> TokenStream2 {
    let declared = [
        (is_enum, quote!(ENUM)),
        (attrs.is_abstract, quote!(ABSTRACT)),
        (attrs.is_final, quote!(FINAL)),
        (attrs.is_polymorphic, quote!(POLYMORPHIC)),
    ];
    let flags = declared.iter().filter(|(set, _)| *set).map(|(_, flag)| flag);
    quote! {
        ::reflection::TypeFlags::empty() #( | ::reflection::TypeFlags::#flags )*
    }
}

/// One `ty.member(...)` call per reflected field.
fn struct_body(owner: &syn::Ident, fields: &Fields) -> syn::Result<TokenStream2> {
    let mut members = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let (access, default_name) = match &field.ident {
            Some(ident) => (ident.to_token_stream(), ident.to_string()),
            None => (Index::from(index).to_token_stream(), index.to_string()),
        };
        let member_name = attrs.name.unwrap_or(default_name);

        let tags = &attrs.tags;
        let getter = attrs.get.map(|path| quote!(.getter(#path)));
        let setter = attrs.set.map(|path| quote!(.setter(#path)));
        let volatile = attrs.volatile.then(|| quote!(.volatile()));

        members.push(quote! {
            ty.member(
                ::reflection::member!(#owner, #access as #member_name)
                    #( .tag(<#tags as ::core::default::Default>::default()) )*
                    #getter
                    #setter
                    #volatile
            )?;
        });
    }

    Ok(quote!(#(#members)*))
}

/// Whether the enum is declared `#[repr(u128)]`.
fn is_repr_u128(attrs: &[syn::Attribute]) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("u128") {
                found = true;
            }
            // Skip arguments such as `align(8)`.
            if meta.input.peek(syn::token::Paren) {
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        })?;
    }
    Ok(found)
}

/// One `ty.enum_value(...)` call per fieldless variant.
///
/// Values are read as `i128`. A `u128` discriminant above `i128::MAX` would
/// wrap, so those enums get a compile-time bound check per variant.
fn enum_body(owner: &syn::Ident, data: &DataEnum, repr_u128: bool) -> syn::Result<TokenStream2> {
    let mut values = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Reflect can only be derived for enums with fieldless variants",
            ));
        }

        let attrs = VariantAttrs::from_attrs(&variant.attrs)?;
        if attrs.skip {
            continue;
        }

        let ident = &variant.ident;
        let value_name = attrs.name.unwrap_or_else(|| ident.to_string());
        if repr_u128 {
            values.push(quote! {
                const _: () = ::core::assert!(
                    (#owner::#ident as u128) <= i128::MAX as u128,
                    "enum discriminant does not fit in i128",
                );
            });
        }
        values.push(quote! {
            ty.enum_value(#value_name, #owner::#ident as i128)?;
        });
    }

    Ok(quote!(#(#values)*))
}
