//! The `Reflect` trait and its primitive implementations.
//!
//! Every type that can appear in the registry implements [`Reflect`]. The
//! trait supplies the type's canonical name and declared flags, and an
//! optional [`reflect`](Reflect::reflect) hook that attaches tags, bases,
//! members and enum values through a [`TypeBuilder`].
//!
//! # Example
//!
//! ```
//! use reflection_core::{member, Reflect, RegistrationError, TypeBuilder};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: f32,
//!     y: f32,
//! }
//!
//! impl Reflect for Point {
//!     fn type_name() -> &'static str {
//!         "Point"
//!     }
//!
//!     fn reflect(ty: &mut TypeBuilder<'_, Self>) -> Result<(), RegistrationError> {
//!         ty.member(member!(Point, x))?.member(member!(Point, y))?;
//!         Ok(())
//!     }
//! }
//! ```

use crate::{FieldShape, RegistrationError, TypeBuilder, TypeFlags, TypeHash, TypeTraits};

/// A type whose structure can be queried at runtime.
pub trait Reflect: 'static + Sized {
    /// Canonical registry name. Unique across the registry.
    fn type_name() -> &'static str;

    /// Declared classification flags.
    fn type_flags() -> TypeFlags {
        TypeFlags::empty()
    }

    /// Snapshot of the type's intrinsic properties.
    fn type_traits() -> TypeTraits {
        TypeTraits::of::<Self>(Self::type_name(), Self::type_flags())
    }

    /// Registry key of the type.
    fn type_hash() -> TypeHash {
        TypeHash::from_name(Self::type_name())
    }

    /// Attach tags, bases, members and enum values.
    ///
    /// Runs exactly once per registry, the first time the type is registered.
    fn reflect(ty: &mut TypeBuilder<'_, Self>) -> Result<(), RegistrationError> {
        let _ = ty;
        Ok(())
    }
}

macro_rules! reflect_primitive {
    ($($ty:ty => $name:literal, $flags:expr;)*) => {
        $(
            impl Reflect for $ty {
                fn type_name() -> &'static str {
                    $name
                }

                fn type_flags() -> TypeFlags {
                    $flags
                }
            }

            impl FieldShape for $ty {
                type Element = $ty;
            }
        )*

        /// Names of every built-in primitive, in registration order.
        pub const PRIMITIVE_NAMES: &[&str] = &[$($name),*];
    };
}

const SIGNED_INT: TypeFlags = TypeFlags::FUNDAMENTAL.union(TypeFlags::INTEGRAL);
const UNSIGNED_INT: TypeFlags = SIGNED_INT.union(TypeFlags::UNSIGNED);
const FLOAT: TypeFlags = TypeFlags::FUNDAMENTAL.union(TypeFlags::FLOATING_POINT);

reflect_primitive! {
    () => "()", TypeFlags::FUNDAMENTAL;
    bool => "bool", UNSIGNED_INT;
    char => "char", UNSIGNED_INT;
    i8 => "i8", SIGNED_INT;
    i16 => "i16", SIGNED_INT;
    i32 => "i32", SIGNED_INT;
    i64 => "i64", SIGNED_INT;
    i128 => "i128", SIGNED_INT;
    isize => "isize", SIGNED_INT;
    u8 => "u8", UNSIGNED_INT;
    u16 => "u16", UNSIGNED_INT;
    u32 => "u32", UNSIGNED_INT;
    u64 => "u64", UNSIGNED_INT;
    u128 => "u128", UNSIGNED_INT;
    usize => "usize", UNSIGNED_INT;
    f32 => "f32", FLOAT;
    f64 => "f64", FLOAT;
    String => "String", TypeFlags::empty();
    &'static str => "&str", TypeFlags::empty();
}

/// Implement [`Reflect`] for a leaf type with no members.
///
/// The type must implement `Default`. The registry name defaults to the
/// type as written; `as "name"` overrides it.
///
/// ```
/// use reflection_core::{reflect_basic, Reflect};
///
/// #[derive(Default)]
/// struct Texture;
///
/// #[derive(Default)]
/// struct Sound;
///
/// reflect_basic!(Texture);
/// reflect_basic!(Sound as "audio::Sound");
///
/// assert_eq!(Texture::type_name(), "Texture");
/// assert_eq!(Sound::type_name(), "audio::Sound");
/// ```
#[macro_export]
macro_rules! reflect_basic {
    ($ty:ty) => {
        $crate::reflect_basic!($ty as stringify!($ty));
    };
    ($ty:ty as $name:expr) => {
        const _: fn() = || {
            fn assert_default<T: ::core::default::Default>() {}
            assert_default::<$ty>();
        };

        impl $crate::Reflect for $ty {
            fn type_name() -> &'static str {
                $name
            }
        }

        impl $crate::FieldShape for $ty {
            type Element = $ty;
        }
    };
}
