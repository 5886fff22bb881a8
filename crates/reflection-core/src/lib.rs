//! Core types for the reflection registry.
//!
//! This crate holds everything a type needs to describe itself:
//!
//! - [`TypeHash`] - fast name hash used as the registry key
//! - [`TypeTraits`] / [`TypeFlags`] - intrinsic properties of a type
//! - [`MemberTraits`] / [`Qualifiers`] / [`PointerKind`] / [`FieldShape`] - field layout
//! - [`MetaTag`] and the built-in tags
//! - [`Accessor`] - getter/setter overrides
//! - [`Member`] and [`Type`] - the runtime descriptors
//! - [`Reflect`], [`TypeBuilder`], [`MemberSpec`] and the [`member!`] and
//!   [`reflect_basic!`] macros - the registration surface
//!
//! The registry itself lives in `reflection-registry`.

mod accessor;
mod builder;
mod entries;
mod error;
mod meta_tag;
mod reflect;
mod shape;
mod traits;
mod type_hash;

pub use accessor::{Accessor, ErasedGetter, ErasedSetter};
pub use builder::{MemberSpec, TypeBuilder};
pub use entries::{Member, Type};
pub use error::{AccessError, RegistrationError};
pub use meta_tag::{AsAny, BitField, Hidden, MetaTag, MetaTags, NoSerialize, ReadOnly};
pub use reflect::{PRIMITIVE_NAMES, Reflect};
pub use shape::{FieldShape, MemberTraits, PointerKind, Qualifiers};
pub use traits::{TypeFlags, TypeTraits};
pub use type_hash::TypeHash;
