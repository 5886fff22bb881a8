//! Per-type registration builder.
//!
//! [`Reflect::reflect`] receives a [`TypeBuilder`] bound to the type being
//! registered. Infallible calls return `&mut Self`, fallible ones
//! `Result<&mut Self, RegistrationError>`, so both chain:
//!
//! ```ignore
//! ty.tag(Hidden)
//!     .base::<Shape>()?
//!     .member(member!(Circle, radius).tag(ReadOnly))?;
//! ```
//!
//! Members are described with [`MemberSpec`], normally through the
//! [`member!`](crate::member) macro which computes the offset with
//! `core::mem::offset_of!`.

use std::marker::PhantomData;

use tracing::trace;

use crate::{
    Accessor, FieldShape, Member, MemberTraits, MetaTag, MetaTags, Qualifiers, Reflect,
    RegistrationError, Type,
};

/// Registration handle for one type.
pub struct TypeBuilder<'a, T: Reflect> {
    ty: &'a mut Type,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Reflect> TypeBuilder<'a, T> {
    /// Wrap the registry entry of `T`.
    pub fn new(ty: &'a mut Type) -> Self {
        debug_assert_eq!(ty.type_hash(), T::type_hash());
        Self {
            ty,
            _marker: PhantomData,
        }
    }

    /// The entry being built.
    pub fn ty(&self) -> &Type {
        self.ty
    }

    /// Attach a tag to the type.
    pub fn tag<K: MetaTag>(&mut self, tag: K) -> &mut Self {
        self.ty.add_meta_tag(tag);
        self
    }

    /// Attach a default-constructed tag to the type.
    pub fn tag_default<K: MetaTag + Default>(&mut self) -> &mut Self {
        self.tag(K::default())
    }

    /// Declare `B` as a direct base.
    ///
    /// Only the link is recorded; `B` must be registered on its own.
    pub fn base<B: Reflect>(&mut self) -> Result<&mut Self, RegistrationError> {
        self.ty.add_base(B::type_hash(), B::type_name())?;
        trace!(ty = T::type_name(), base = B::type_name(), "base linked");
        Ok(self)
    }

    /// Add a member.
    ///
    /// Rejects duplicate names and offsets that do not fit inside `T` at the
    /// field's alignment.
    pub fn member<V: FieldShape>(
        &mut self,
        spec: MemberSpec<T, V>,
    ) -> Result<&mut Self, RegistrationError> {
        spec.validate()?;
        let name = spec.name;
        self.ty.add_member(spec.into_member())?;
        trace!(ty = T::type_name(), member = name, "member added");
        Ok(self)
    }

    /// Add a named enumerator. Values are `i128` so every `u64` and `i64`
    /// discriminant fits without wrapping.
    pub fn enum_value(&mut self, name: &'static str, value: i128) -> Result<&mut Self, RegistrationError> {
        self.ty.add_enum_value(name, value)?;
        Ok(self)
    }
}

/// Description of one member before it is added to a type.
pub struct MemberSpec<T, V> {
    name: &'static str,
    offset: usize,
    qualifiers: Qualifiers,
    tags: MetaTags,
    accessor: Accessor,
    _marker: PhantomData<fn(T) -> V>,
}

impl<T: Reflect, V: FieldShape> MemberSpec<T, V> {
    /// Describe the field of type `V` at byte `offset` within `T`.
    ///
    /// `field` is only used to infer `V`; pass the projection of the same
    /// field, e.g. `|p: &Point| &p.x`.
    ///
    /// # Safety
    ///
    /// `offset` must be the offset of a field of type `V` within `T`. The
    /// [`member!`](crate::member) macro guarantees this.
    pub unsafe fn from_offset(name: &'static str, offset: usize, field: fn(&T) -> &V) -> Self {
        let _ = field;
        Self {
            name,
            offset,
            qualifiers: V::QUALIFIERS,
            tags: MetaTags::new(),
            accessor: Accessor::raw(),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Attach a tag to the member.
    pub fn tag<K: MetaTag>(mut self, tag: K) -> Self {
        self.tags.push(tag);
        self
    }

    /// Read the member through `getter` instead of its offset.
    pub fn getter(mut self, getter: fn(&T) -> &V) -> Self {
        self.accessor = self.accessor.with_getter(getter);
        self
    }

    /// Write the member through `setter` instead of its offset.
    pub fn setter(mut self, setter: fn(&mut T, V)) -> Self {
        self.accessor = self.accessor.with_setter(setter);
        self
    }

    /// Mark the member volatile.
    pub fn volatile(mut self) -> Self {
        self.qualifiers |= Qualifiers::VOLATILE;
        self
    }

    fn validate(&self) -> Result<(), RegistrationError> {
        let size = std::mem::size_of::<V>();
        let align = std::mem::align_of::<V>();
        let reason = if self.offset.checked_add(size).is_none_or(|end| end > std::mem::size_of::<T>()) {
            format!(
                "{} bytes at offset {} exceed the {} bytes of the type",
                size,
                self.offset,
                std::mem::size_of::<T>()
            )
        } else if self.offset % align != 0 {
            format!("offset {} is not aligned to {}", self.offset, align)
        } else {
            return Ok(());
        };
        Err(RegistrationError::InvalidMember {
            type_name: T::type_name().to_string(),
            member: self.name.to_string(),
            reason,
        })
    }

    fn into_member(self) -> Member {
        let mut traits = MemberTraits::of::<V>(self.name, self.offset);
        traits.qualifiers = self.qualifiers;
        // SAFETY: upheld by the caller of `from_offset`.
        unsafe { Member::new::<T, V>(traits, self.tags, self.accessor) }
    }
}

/// Build a [`MemberSpec`] for a field of a struct.
///
/// ```ignore
/// member!(Point, x)                 // named "x"
/// member!(Point, x as "pos_x")      // renamed
/// member!(Pair, 0)                  // tuple field "0"
/// ```
#[macro_export]
macro_rules! member {
    ($owner:ty, $field:tt as $name:expr) => {
        // SAFETY: the offset and the projection name the same field, so the
        // offset locates a value of the projected type.
        unsafe {
            $crate::MemberSpec::<$owner, _>::from_offset(
                $name,
                ::core::mem::offset_of!($owner, $field),
                |owner: &$owner| &owner.$field,
            )
        }
    };
    ($owner:ty, $field:tt) => {
        $crate::member!($owner, $field as stringify!($field))
    };
}
