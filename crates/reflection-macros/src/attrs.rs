//! Attribute parsing for `#[reflect(...)]`.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Path};

/// Parsed `#[reflect(...)]` attributes on a type.
#[derive(Debug, Default)]
pub struct TypeAttrs {
    /// Override registry name (default: Rust type name)
    pub name: Option<String>,
    /// Direct bases, in declaration order
    pub bases: Vec<Path>,
    /// Tags constructed with `Default::default()`
    pub tags: Vec<Path>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_polymorphic: bool,
}

/// Parsed `#[reflect(...)]` attributes on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Leave the field out of the registry
    pub skip: bool,
    /// Override member name
    pub name: Option<String>,
    /// Tags constructed with `Default::default()`
    pub tags: Vec<Path>,
    /// Getter function `fn(&Owner) -> &Field`
    pub get: Option<Path>,
    /// Setter function `fn(&mut Owner, Field)`
    pub set: Option<Path>,
    pub volatile: bool,
}

/// Parsed `#[reflect(...)]` attributes on an enum variant.
#[derive(Debug, Default)]
pub struct VariantAttrs {
    pub skip: bool,
    pub name: Option<String>,
}

impl TypeAttrs {
    /// Parse attributes from a list of `#[reflect(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("reflect") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    result.name = Some(parse_name(&meta)?);
                } else if meta.path.is_ident("bases") {
                    result.bases.extend(parse_paths(&meta)?);
                } else if meta.path.is_ident("tags") {
                    result.tags.extend(parse_paths(&meta)?);
                } else if meta.path.is_ident("abstract") {
                    result.is_abstract = true;
                } else if meta.path.is_ident("final") {
                    result.is_final = true;
                } else if meta.path.is_ident("polymorphic") {
                    result.is_polymorphic = true;
                } else {
                    return Err(unknown(&meta));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl FieldAttrs {
    /// Parse attributes from a list of `#[reflect(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("reflect") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("name") {
                    result.name = Some(parse_name(&meta)?);
                } else if meta.path.is_ident("tags") {
                    result.tags.extend(parse_paths(&meta)?);
                } else if meta.path.is_ident("get") {
                    result.get = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("set") {
                    result.set = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("volatile") {
                    result.volatile = true;
                } else {
                    return Err(unknown(&meta));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl VariantAttrs {
    /// Parse attributes from a list of `#[reflect(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("reflect") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("name") {
                    result.name = Some(parse_name(&meta)?);
                } else {
                    return Err(unknown(&meta));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

fn parse_name(meta: &ParseNestedMeta) -> syn::Result<String> {
    let value: LitStr = meta.value()?.parse()?;
    Ok(value.value())
}

/// Parse `key(A, b::C, ...)`.
fn parse_paths(meta: &ParseNestedMeta) -> syn::Result<Vec<Path>> {
    let mut paths = Vec::new();
    meta.parse_nested_meta(|inner| {
        paths.push(inner.path);
        Ok(())
    })?;
    Ok(paths)
}

fn unknown(meta: &ParseNestedMeta) -> syn::Error {
    meta.error(format!(
        "unknown reflect attribute: {}",
        meta.path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default()
    ))
}
