//! Member shape: how a field's Rust type decays to an element type.
//!
//! A field of type `[[f32; 4]; 4]` is stored as an array of sixteen `f32`,
//! a `*const Texture` as a const pointer to `Texture`, and so on. The
//! [`FieldShape`] trait performs that decay at compile time and
//! [`MemberTraits`] records the result next to the field's name and offset.
//!
//! | Field type        | Element | Qualifiers            | Array length | Pointer kind |
//! |-------------------|---------|-----------------------|--------------|--------------|
//! | `T: Reflect`      | `T`     | none                  | 1            | none         |
//! | `[S; N]`          | decayed | `ARRAY` plus `S`'s    | `N * len(S)` | `S`'s        |
//! | `*const T`        | `T`     | `POINTER \| CONST`    | 1            | `Raw`        |
//! | `*mut T`          | `T`     | `POINTER`             | 1            | `Raw`        |
//! | `&'static T`      | `T`     | `REFERENCE \| CONST`  | 1            | none         |
//! | `&'static mut T`  | `T`     | `REFERENCE`           | 1            | none         |
//! | `Box`/`Arc`/`Rc`  | `T`     | `POINTER`             | 1            | its own      |

use std::rc::Rc;
use std::sync::Arc;

use bitflags::bitflags;

use crate::{Reflect, TypeTraits};

bitflags! {
    /// Qualifiers stripped from a field's type while decaying it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Qualifiers: u8 {
        const ARRAY = 1 << 0;
        const POINTER = 1 << 1;
        const CONST = 1 << 2;
        const REFERENCE = 1 << 3;
        /// Set explicitly on a member; Rust has no volatile field types.
        const VOLATILE = 1 << 4;
    }
}

/// Which pointer a `POINTER` qualifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// `*const T` or `*mut T`.
    Raw,
    Box,
    Arc,
    Rc,
}

impl PointerKind {
    /// Wrapper name as written in Rust source, `None` for raw pointers.
    pub fn wrapper_name(self) -> Option<&'static str> {
        match self {
            PointerKind::Raw => None,
            PointerKind::Box => Some("Box"),
            PointerKind::Arc => Some("Arc"),
            PointerKind::Rc => Some("Rc"),
        }
    }
}

/// Compile-time decay of a field type to its element type.
///
/// Implemented for every reflected type (by `#[derive(Reflect)]`,
/// `reflect_basic!` and the primitive impls) and for the wrappers in the
/// module table.
pub trait FieldShape: 'static {
    /// The decayed element type.
    type Element: Reflect;

    /// Qualifiers stripped while decaying.
    const QUALIFIERS: Qualifiers = Qualifiers::empty();

    /// Number of elements; the product of all dimensions for nested arrays.
    const ARRAY_LEN: usize = 1;

    /// Set exactly when `QUALIFIERS` contains `POINTER`.
    const POINTER_KIND: Option<PointerKind> = None;
}

impl<S: FieldShape, const N: usize> FieldShape for [S; N] {
    type Element = S::Element;
    const QUALIFIERS: Qualifiers = Qualifiers::ARRAY.union(S::QUALIFIERS);
    const ARRAY_LEN: usize = N * S::ARRAY_LEN;
    const POINTER_KIND: Option<PointerKind> = S::POINTER_KIND;
}

impl<T: Reflect> FieldShape for *const T {
    type Element = T;
    const QUALIFIERS: Qualifiers = Qualifiers::POINTER.union(Qualifiers::CONST);
    const POINTER_KIND: Option<PointerKind> = Some(PointerKind::Raw);
}

impl<T: Reflect> FieldShape for *mut T {
    type Element = T;
    const QUALIFIERS: Qualifiers = Qualifiers::POINTER;
    const POINTER_KIND: Option<PointerKind> = Some(PointerKind::Raw);
}

impl<T: Reflect> FieldShape for &'static T {
    type Element = T;
    const QUALIFIERS: Qualifiers = Qualifiers::REFERENCE.union(Qualifiers::CONST);
}

impl<T: Reflect> FieldShape for &'static mut T {
    type Element = T;
    const QUALIFIERS: Qualifiers = Qualifiers::REFERENCE;
}

impl<T: Reflect> FieldShape for Box<T> {
    type Element = T;
    const QUALIFIERS: Qualifiers = Qualifiers::POINTER;
    const POINTER_KIND: Option<PointerKind> = Some(PointerKind::Box);
}

impl<T: Reflect> FieldShape for Arc<T> {
    type Element = T;
    const QUALIFIERS: Qualifiers = Qualifiers::POINTER;
    const POINTER_KIND: Option<PointerKind> = Some(PointerKind::Arc);
}

impl<T: Reflect> FieldShape for Rc<T> {
    type Element = T;
    const QUALIFIERS: Qualifiers = Qualifiers::POINTER;
    const POINTER_KIND: Option<PointerKind> = Some(PointerKind::Rc);
}

/// Immutable snapshot of one member's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberTraits {
    /// Member name, unique within the owning type.
    pub name: &'static str,
    /// Byte offset within the owning type. Only meaningful for an instance
    /// of that exact type.
    pub offset: usize,
    /// Qualifiers stripped from the field type.
    pub qualifiers: Qualifiers,
    /// Element count; 1 when the field is not an array.
    pub array_len: usize,
    /// Which pointer the field holds, if any.
    pub pointer_kind: Option<PointerKind>,
    /// Traits of the decayed element type.
    pub element: TypeTraits,
}

impl MemberTraits {
    /// Describe a field of type `F` named `name` at byte `offset`.
    pub fn of<F: FieldShape>(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            qualifiers: F::QUALIFIERS,
            array_len: F::ARRAY_LEN,
            pointer_kind: F::POINTER_KIND,
            element: F::Element::type_traits(),
        }
    }

    /// Length of the name in bytes.
    #[inline]
    pub fn name_len(&self) -> usize {
        self.name.len()
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.qualifiers.contains(Qualifiers::ARRAY)
    }

    #[inline]
    pub fn is_pointer(&self) -> bool {
        self.qualifiers.contains(Qualifiers::POINTER)
    }

    #[inline]
    pub fn is_const(&self) -> bool {
        self.qualifiers.contains(Qualifiers::CONST)
    }

    #[inline]
    pub fn is_reference(&self) -> bool {
        self.qualifiers.contains(Qualifiers::REFERENCE)
    }

    #[inline]
    pub fn is_volatile(&self) -> bool {
        self.qualifiers.contains(Qualifiers::VOLATILE)
    }
}
