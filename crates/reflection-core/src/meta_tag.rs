//! Meta tags: identity-only markers attached to types and members.
//!
//! A tag carries no data of its own; it is looked up by its Rust type.
//!
//! ```
//! use reflection_core::{Hidden, MetaTags, ReadOnly};
//!
//! let mut tags = MetaTags::new();
//! tags.push(Hidden);
//! assert!(tags.has::<Hidden>());
//! assert!(tags.get::<ReadOnly>().is_none());
//! ```

use std::any::{Any, type_name};
use std::fmt;

/// Upcast helper so tags can be downcast by concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A marker attachable to a [`Type`](crate::Type) or [`Member`](crate::Member).
///
/// Tags used in `#[reflect(tags(...))]` must also implement `Default`.
pub trait MetaTag: AsAny + Send + Sync + fmt::Debug {
    /// Display name of the tag.
    fn tag_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Excluded from editor and inspector listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hidden;
impl MetaTag for Hidden {}

/// Skipped by serializers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSerialize;
impl MetaTag for NoSerialize {}

/// Visible but not editable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOnly;
impl MetaTag for ReadOnly {}

/// The member's bits are meaningful individually.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitField;
impl MetaTag for BitField {}

/// Ordered list of tags. Duplicates are kept; lookups return the first match.
#[derive(Debug, Default)]
pub struct MetaTags {
    tags: Vec<Box<dyn MetaTag>>,
}

impl MetaTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag.
    pub fn push<K: MetaTag>(&mut self, tag: K) {
        self.tags.push(Box::new(tag));
    }

    /// First tag of type `K`, if any.
    pub fn get<K: MetaTag>(&self) -> Option<&K> {
        self.tags
            .iter()
            .find_map(|tag| (**tag).as_any().downcast_ref::<K>())
    }

    /// Whether a tag of type `K` is attached.
    pub fn has<K: MetaTag>(&self) -> bool {
        self.get::<K>().is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn MetaTag> {
        self.tags.iter().map(|tag| &**tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
