//! Accessor overrides for members.
//!
//! By default a member is read and written through its byte offset. A member
//! may instead route reads through a getter, writes through a setter, or
//! both; each direction falls back to the offset independently.
//!
//! The typed functions are erased behind [`ErasedGetter`] / [`ErasedSetter`]
//! so a [`Member`](crate::Member) can store them without naming the owner and
//! field types.

use std::any::Any;
use std::fmt;

/// Type-erased getter: `fn(&Owner) -> &Field`.
pub trait ErasedGetter: Send + Sync {
    /// Run the getter. `None` if `owner` is not the expected type.
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any>;
}

/// Type-erased setter: `fn(&mut Owner, Field)`.
pub trait ErasedSetter: Send + Sync {
    /// Run the setter. Hands `value` back if either type does not match.
    fn set(&self, owner: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;
}

struct FnGetter<T: 'static, V: 'static> {
    f: fn(&T) -> &V,
}

impl<T: 'static, V: 'static> ErasedGetter for FnGetter<T, V> {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        let owner = owner.downcast_ref::<T>()?;
        Some((self.f)(owner))
    }
}

struct FnSetter<T: 'static, V: 'static> {
    f: fn(&mut T, V),
}

impl<T: 'static, V: 'static> ErasedSetter for FnSetter<T, V> {
    fn set(&self, owner: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        let Some(owner) = owner.downcast_mut::<T>() else {
            return Err(value);
        };
        let value = value.downcast::<V>()?;
        (self.f)(owner, *value);
        Ok(())
    }
}

/// Optional getter/setter pair attached to a member.
#[derive(Default)]
pub struct Accessor {
    getter: Option<Box<dyn ErasedGetter>>,
    setter: Option<Box<dyn ErasedSetter>>,
}

impl Accessor {
    /// Offset-only access in both directions.
    pub fn raw() -> Self {
        Self::default()
    }

    /// Route reads through `getter`.
    pub fn with_getter<T: 'static, V: 'static>(mut self, getter: fn(&T) -> &V) -> Self {
        self.getter = Some(Box::new(FnGetter { f: getter }));
        self
    }

    /// Route writes through `setter`.
    pub fn with_setter<T: 'static, V: 'static>(mut self, setter: fn(&mut T, V)) -> Self {
        self.setter = Some(Box::new(FnSetter { f: setter }));
        self
    }

    pub fn getter(&self) -> Option<&dyn ErasedGetter> {
        self.getter.as_deref()
    }

    pub fn setter(&self) -> Option<&dyn ErasedSetter> {
        self.setter.as_deref()
    }

    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    /// Neither direction is overridden.
    pub fn is_raw(&self) -> bool {
        self.getter.is_none() && self.setter.is_none()
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("getter", &self.has_getter())
            .field("setter", &self.has_setter())
            .finish()
    }
}
