//! Intrinsic properties of a reflected type.
//!
//! [`TypeTraits`] is the immutable snapshot every [`Type`](crate::Type)
//! wraps. Size, alignment, `TypeId` and emptiness are read from the Rust type
//! itself; the classification flags are declared by the registration
//! (primitive impls, derive attributes or a manual `Reflect` impl).

use std::any::TypeId;

use bitflags::bitflags;

use crate::TypeHash;

bitflags! {
    /// Classification flags of a reflected type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u16 {
        /// Built-in scalar (`bool`, `char`, integers, floats, `()`).
        const FUNDAMENTAL = 1 << 0;
        /// Enumeration with named integral values.
        const ENUM = 1 << 1;
        /// Never instantiated directly; only meaningful as a base.
        const ABSTRACT = 1 << 2;
        /// May not appear as the base of another type.
        const FINAL = 1 << 3;
        /// Values can be overwritten in place.
        const ASSIGNABLE = 1 << 4;
        /// Integral scalar.
        const INTEGRAL = 1 << 5;
        /// Floating-point scalar.
        const FLOATING_POINT = 1 << 6;
        /// Unsigned scalar.
        const UNSIGNED = 1 << 7;
        /// Participates in dynamic dispatch.
        const POLYMORPHIC = 1 << 8;
        /// Zero-sized.
        const EMPTY = 1 << 9;
    }
}

/// Immutable snapshot of a type's intrinsic properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTraits {
    /// Canonical registry name.
    pub name: &'static str,
    /// Hash of `name`, used as the registry's fast-path key.
    pub name_hash: TypeHash,
    /// `size_of` the type in bytes.
    pub size: usize,
    /// `align_of` the type in bytes.
    pub align: usize,
    /// Rust identity of the type.
    pub type_id: TypeId,
    /// Classification flags.
    pub flags: TypeFlags,
}

impl TypeTraits {
    /// Snapshot the traits of `T` under `name` with the declared `flags`.
    ///
    /// `ASSIGNABLE` is always added (every sized value can be overwritten in
    /// place) and `EMPTY` is added for zero-sized types.
    pub fn of<T: 'static>(name: &'static str, flags: TypeFlags) -> Self {
        let size = std::mem::size_of::<T>();
        let mut flags = flags | TypeFlags::ASSIGNABLE;
        if size == 0 {
            flags |= TypeFlags::EMPTY;
        }
        Self {
            name,
            name_hash: TypeHash::from_name(name),
            size,
            align: std::mem::align_of::<T>(),
            type_id: TypeId::of::<T>(),
            flags,
        }
    }

    /// Length of the name in bytes.
    #[inline]
    pub fn name_len(&self) -> usize {
        self.name.len()
    }

    #[inline]
    pub fn is_fundamental(&self) -> bool {
        self.flags.contains(TypeFlags::FUNDAMENTAL)
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        self.flags.contains(TypeFlags::ENUM)
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT)
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.flags.contains(TypeFlags::FINAL)
    }

    #[inline]
    pub fn is_assignable(&self) -> bool {
        self.flags.contains(TypeFlags::ASSIGNABLE)
    }

    #[inline]
    pub fn is_integral(&self) -> bool {
        self.flags.contains(TypeFlags::INTEGRAL)
    }

    #[inline]
    pub fn is_floating_point(&self) -> bool {
        self.flags.contains(TypeFlags::FLOATING_POINT)
    }

    #[inline]
    pub fn is_unsigned(&self) -> bool {
        self.flags.contains(TypeFlags::UNSIGNED)
    }

    #[inline]
    pub fn is_polymorphic(&self) -> bool {
        self.flags.contains(TypeFlags::POLYMORPHIC)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.contains(TypeFlags::EMPTY)
    }
}
