//! Runtime type reflection.
//!
//! Types describe their structure by implementing [`Reflect`] (usually via
//! `#[derive(Reflect)]`). At program start every reflected type is
//! registered into a [`TypeRegistryBuilder`], which is frozen into a
//! read-only [`TypeRegistry`] and published process-wide through
//! [`init`]. Consumers then look types up by name or by Rust type and walk
//! their members, bases, enum values and meta tags.
//!
//! # Crates
//!
//! ```text
//! reflection-core     - Type/Member data model, Reflect, builders, accessors
//! reflection-registry - TypeRegistryBuilder/TypeRegistry, inheritance, dump
//! reflection-macros   - #[derive(Reflect)]
//! ```
//!
//! # Example
//!
//! ```
//! use reflection::{ReadOnly, Reflect};
//!
//! #[derive(Reflect)]
//! #[reflect(abstract)]
//! pub struct Shape;
//!
//! #[derive(Reflect)]
//! #[reflect(bases(Shape))]
//! pub struct Circle {
//!     #[reflect(tags(ReadOnly))]
//!     radius: f32,
//! }
//!
//! let registry = reflection::init(|types| {
//!     types.register::<Shape>()?.register::<Circle>()?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let circle = &registry["Circle"];
//! assert!(circle.is_derived_from(&registry["Shape"]));
//! assert!(circle["radius"].has_meta_tag::<ReadOnly>());
//!
//! let c = Circle { radius: 2.0 };
//! assert_eq!(circle["radius"].get::<Circle, f32>(&c), Ok(&2.0));
//! ```

// Lets `#[derive(Reflect)]` output refer to `::reflection` inside this crate.
extern crate self as reflection;

pub mod global;

pub use global::{dump, find, find_type, get_or_init, init, registry, try_registry, types};

pub use reflection_core::{
    AccessError, Accessor, AsAny, BitField, ErasedGetter, ErasedSetter, FieldShape, Hidden,
    Member, MemberSpec, MemberTraits, MetaTag, MetaTags, NoSerialize, PRIMITIVE_NAMES,
    PointerKind, Qualifiers, ReadOnly, Reflect, RegistrationError, Type, TypeBuilder, TypeFlags,
    TypeHash, TypeTraits, member, reflect_basic,
};
pub use reflection_registry::{TypeRegistry, TypeRegistryBuilder};

pub use reflection_macros::Reflect;
