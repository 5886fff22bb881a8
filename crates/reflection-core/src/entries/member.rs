//! Member descriptor.
//!
//! A [`Member`] is one reflected field of a [`Type`](crate::Type): its
//! [`MemberTraits`], attached tags and optional accessor override. It also
//! remembers the Rust owner and field types so the safe accessors can reject
//! an instance or value of the wrong type instead of reading garbage.

use std::any::{Any, TypeId};

use crate::{AccessError, Accessor, MemberTraits, MetaTag, MetaTags, Qualifiers, TypeTraits};

/// Runtime metadata for one field.
#[derive(Debug)]
pub struct Member {
    traits: MemberTraits,
    tags: MetaTags,
    accessor: Accessor,
    owner_id: TypeId,
    owner_name: &'static str,
    field_id: TypeId,
    field_name: &'static str,
    field_size: usize,
}

impl Member {
    /// Describe a field of type `V` inside `T`.
    ///
    /// # Safety
    ///
    /// `traits.offset` must be the offset of a field of type `V` within `T`,
    /// as produced by `core::mem::offset_of!`.
    pub unsafe fn new<T: 'static, V: 'static>(
        traits: MemberTraits,
        tags: MetaTags,
        accessor: Accessor,
    ) -> Self {
        Self {
            traits,
            tags,
            accessor,
            owner_id: TypeId::of::<T>(),
            owner_name: std::any::type_name::<T>(),
            field_id: TypeId::of::<V>(),
            field_name: std::any::type_name::<V>(),
            field_size: std::mem::size_of::<V>(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.traits.name
    }

    #[inline]
    pub fn traits(&self) -> &MemberTraits {
        &self.traits
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.traits.offset
    }

    #[inline]
    pub fn qualifiers(&self) -> Qualifiers {
        self.traits.qualifiers
    }

    #[inline]
    pub fn array_len(&self) -> usize {
        self.traits.array_len
    }

    /// Traits of the decayed element type.
    #[inline]
    pub fn element(&self) -> &TypeTraits {
        &self.traits.element
    }

    /// Size in bytes of the whole field (not the element).
    #[inline]
    pub fn field_size(&self) -> usize {
        self.field_size
    }

    /// Rust type of the owning struct.
    pub fn owner_type_id(&self) -> TypeId {
        self.owner_id
    }

    /// Rust type of the field.
    pub fn field_type_id(&self) -> TypeId {
        self.field_id
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn has_getter(&self) -> bool {
        self.accessor.has_getter()
    }

    pub fn has_setter(&self) -> bool {
        self.accessor.has_setter()
    }

    pub fn meta_tags(&self) -> &MetaTags {
        &self.tags
    }

    pub fn has_meta_tag<K: MetaTag>(&self) -> bool {
        self.tags.has::<K>()
    }

    pub fn get_meta_tag<K: MetaTag>(&self) -> Option<&K> {
        self.tags.get::<K>()
    }

    /// Read the member from `instance`, through the getter if one is set.
    pub fn get<'a, T: 'static, V: 'static>(&self, instance: &'a T) -> Result<&'a V, AccessError> {
        self.check::<T, V>()?;
        match self.accessor.getter() {
            Some(getter) => getter
                .get(instance)
                .and_then(|value| value.downcast_ref::<V>())
                .ok_or_else(|| self.value_mismatch::<V>()),
            // SAFETY: owner and field types were checked above.
            None => Ok(unsafe { &*self.field_ptr((instance as *const T).cast_mut()).cast::<V>() }),
        }
    }

    /// Borrow the member mutably through its offset.
    ///
    /// Members read through a getter have no addressable place and return
    /// [`AccessError::NotAddressable`].
    pub fn get_mut<'a, T: 'static, V: 'static>(
        &self,
        instance: &'a mut T,
    ) -> Result<&'a mut V, AccessError> {
        self.check::<T, V>()?;
        if self.accessor.has_getter() {
            return Err(AccessError::NotAddressable(self.name()));
        }
        // SAFETY: owner and field types were checked above.
        Ok(unsafe { &mut *self.field_ptr(instance as *mut T).cast::<V>() })
    }

    /// Write `value` into `instance`, through the setter if one is set.
    pub fn set<T: 'static, V: 'static>(&self, instance: &mut T, value: V) -> Result<(), AccessError> {
        self.check::<T, V>()?;
        match self.accessor.setter() {
            Some(setter) => setter
                .set(instance as &mut dyn Any, Box::new(value))
                .map_err(|_| self.value_mismatch::<V>()),
            None => {
                // SAFETY: owner and field types were checked above; the
                // previous value is dropped in place.
                unsafe { *self.field_ptr(instance as *mut T).cast::<V>() = value };
                Ok(())
            }
        }
    }

    /// Read the member without checking types.
    ///
    /// # Safety
    ///
    /// `T` must be the owning type and `V` the field type.
    pub unsafe fn get_unchecked<'a, T: 'static, V: 'static>(&self, instance: &'a T) -> &'a V {
        debug_assert!(self.check::<T, V>().is_ok(), "{:?}", self.check::<T, V>());
        match self.accessor.getter() {
            Some(getter) => unsafe {
                getter
                    .get(instance)
                    .and_then(|value| value.downcast_ref::<V>())
                    .unwrap_unchecked()
            },
            None => unsafe { &*self.field_ptr((instance as *const T).cast_mut()).cast::<V>() },
        }
    }

    /// Address of the member inside the instance at `base`.
    ///
    /// Every raw read and write goes through here.
    fn field_ptr<T>(&self, base: *mut T) -> *mut u8 {
        debug_assert!(self.traits.offset + self.field_size <= std::mem::size_of::<T>());
        base.cast::<u8>().wrapping_add(self.traits.offset)
    }

    fn check<T: 'static, V: 'static>(&self) -> Result<(), AccessError> {
        if TypeId::of::<T>() != self.owner_id {
            return Err(AccessError::OwnerMismatch {
                member: self.name(),
                expected: self.owner_name,
                found: std::any::type_name::<T>(),
            });
        }
        if TypeId::of::<V>() != self.field_id {
            return Err(self.value_mismatch::<V>());
        }
        Ok(())
    }

    fn value_mismatch<V>(&self) -> AccessError {
        AccessError::ValueMismatch {
            member: self.name(),
            expected: self.field_name,
            found: std::any::type_name::<V>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldShape, Hidden, ReadOnly};
    use std::mem::offset_of;

    #[derive(Debug, Default)]
    struct Point {
        x: f32,
        y: f32,
    }

    struct Named {
        id: u32,
        label: String,
    }

    fn raw<T: 'static, V: FieldShape>(name: &'static str, offset: usize) -> Member {
        let traits = MemberTraits::of::<V>(name, offset);
        unsafe { Member::new::<T, V>(traits, MetaTags::new(), Accessor::raw()) }
    }

    fn sentinel_x(_: &Point) -> &f32 {
        &SENTINEL
    }

    static SENTINEL: f32 = -1.0;

    #[test]
    fn raw_round_trip() {
        let member = raw::<Point, f32>("y", offset_of!(Point, y));
        let mut point = Point { x: 1.0, y: 2.0 };

        assert_eq!(member.get::<Point, f32>(&point), Ok(&2.0));
        member.set(&mut point, 5.5f32).unwrap();
        assert_eq!(point.y, 5.5);
        assert_eq!(point.x, 1.0);
        assert_eq!(member.get::<Point, f32>(&point), Ok(&5.5));
    }

    #[test]
    fn get_mut_through_offset() {
        let member = raw::<Point, f32>("x", offset_of!(Point, x));
        let mut point = Point::default();
        *member.get_mut::<Point, f32>(&mut point).unwrap() = 3.0;
        assert_eq!(point.x, 3.0);
    }

    #[test]
    fn set_drops_previous_value() {
        let member = raw::<Named, String>("label", offset_of!(Named, label));
        let mut named = Named { id: 1, label: "old".to_string() };
        member.set(&mut named, "new".to_string()).unwrap();
        assert_eq!(named.label, "new");
        assert_eq!(named.id, 1);
    }

    #[test]
    fn wrong_owner_is_rejected() {
        let member = raw::<Point, f32>("x", offset_of!(Point, x));
        let named = Named { id: 0, label: String::new() };
        assert!(matches!(
            member.get::<Named, f32>(&named),
            Err(AccessError::OwnerMismatch { member: "x", .. })
        ));
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let member = raw::<Point, f32>("x", offset_of!(Point, x));
        let mut point = Point::default();
        assert!(matches!(
            member.set(&mut point, 1.0f64),
            Err(AccessError::ValueMismatch { member: "x", .. })
        ));
        assert_eq!(point.x, 0.0);
    }

    #[test]
    fn getter_takes_precedence_over_offset() {
        let member = unsafe {
            Member::new::<Point, f32>(
                MemberTraits::of::<f32>("x", offset_of!(Point, x)),
                MetaTags::new(),
                Accessor::raw().with_getter(sentinel_x),
            )
        };
        let mut point = Point { x: 4.0, y: 0.0 };

        assert_eq!(member.get::<Point, f32>(&point), Ok(&SENTINEL));
        assert_eq!(unsafe { member.get_unchecked::<Point, f32>(&point) }, &SENTINEL);
        assert_eq!(
            member.get_mut::<Point, f32>(&mut point),
            Err(AccessError::NotAddressable("x"))
        );

        // No setter, so writes still go through the offset.
        member.set(&mut point, 9.0f32).unwrap();
        assert_eq!(point.x, 9.0);
    }

    #[test]
    fn tags_are_queryable() {
        let mut tags = MetaTags::new();
        tags.push(Hidden);
        let member = unsafe {
            Member::new::<Point, f32>(MemberTraits::of::<f32>("x", 0), tags, Accessor::raw())
        };
        assert!(member.has_meta_tag::<Hidden>());
        assert!(member.get_meta_tag::<Hidden>().is_some());
        assert!(!member.has_meta_tag::<ReadOnly>());
        assert!(member.get_meta_tag::<ReadOnly>().is_none());
    }
}
