//! Type descriptor.
//!
//! A [`Type`] is the runtime metadata node for one host type. It owns its
//! members and enum values and refers to its bases by [`TypeHash`]; the
//! registry resolves those links and fills in the transitive ancestor set
//! when it is built.

use std::ops::Index;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Member, MetaTag, MetaTags, RegistrationError, TypeHash, TypeTraits};

/// Runtime metadata for one host type.
#[derive(Debug)]
pub struct Type {
    traits: TypeTraits,
    bases: Vec<TypeHash>,
    base_names: Vec<&'static str>,
    members: Vec<Member>,
    member_index: FxHashMap<&'static str, usize>,
    enum_values: Vec<(&'static str, i128)>,
    enum_index: FxHashMap<&'static str, usize>,
    tags: MetaTags,
    ancestors: FxHashSet<TypeHash>,
}

impl Type {
    /// Create an empty descriptor for a type with the given traits.
    pub fn new(traits: TypeTraits) -> Self {
        Self {
            traits,
            bases: Vec::new(),
            base_names: Vec::new(),
            members: Vec::new(),
            member_index: FxHashMap::default(),
            enum_values: Vec::new(),
            enum_index: FxHashMap::default(),
            tags: MetaTags::new(),
            ancestors: FxHashSet::default(),
        }
    }

    // ==========================================================================
    // Traits
    // ==========================================================================

    #[inline]
    pub fn name(&self) -> &'static str {
        self.traits.name
    }

    #[inline]
    pub fn type_hash(&self) -> TypeHash {
        self.traits.name_hash
    }

    #[inline]
    pub fn traits(&self) -> &TypeTraits {
        &self.traits
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        self.traits.is_enum()
    }

    // ==========================================================================
    // Inheritance
    // ==========================================================================

    /// Direct bases, in declaration order.
    pub fn bases(&self) -> &[TypeHash] {
        &self.bases
    }

    /// Names of the direct bases, parallel to [`bases`](Self::bases).
    pub fn base_names(&self) -> &[&'static str] {
        &self.base_names
    }

    /// Whether `self` is a direct or indirect base of `other`.
    ///
    /// Strict: a type is not a base of itself.
    pub fn is_base_of(&self, other: &Type) -> bool {
        other.ancestors.contains(&self.type_hash())
    }

    /// Whether `other` is a direct or indirect base of `self`.
    ///
    /// Strict: a type is not derived from itself.
    pub fn is_derived_from(&self, other: &Type) -> bool {
        self.ancestors.contains(&other.type_hash())
    }

    /// Every direct and indirect base. Empty until the registry is built.
    pub fn ancestors(&self) -> &FxHashSet<TypeHash> {
        &self.ancestors
    }

    // ==========================================================================
    // Members
    // ==========================================================================

    /// Optional lookup of a member by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.member_index.get(name).map(|&i| &self.members[i])
    }

    /// Members in registration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.member_index.contains_key(name)
    }

    // ==========================================================================
    // Enum values
    // ==========================================================================

    /// Value of the named enumerator.
    pub fn enum_value(&self, name: &str) -> Option<i128> {
        self.enum_index.get(name).map(|&i| self.enum_values[i].1)
    }

    /// Name of the first enumerator holding `value`.
    pub fn enum_name(&self, value: i128) -> Option<&'static str> {
        self.enum_values
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| *name)
    }

    /// Enumerators in registration order. Empty for non-enum types.
    pub fn enum_values(&self) -> &[(&'static str, i128)] {
        &self.enum_values
    }

    // ==========================================================================
    // Meta tags
    // ==========================================================================

    pub fn meta_tags(&self) -> &MetaTags {
        &self.tags
    }

    pub fn has_meta_tag<K: MetaTag>(&self) -> bool {
        self.tags.has::<K>()
    }

    pub fn get_meta_tag<K: MetaTag>(&self) -> Option<&K> {
        self.tags.get::<K>()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Attach a tag.
    pub fn add_meta_tag<K: MetaTag>(&mut self, tag: K) {
        self.tags.push(tag);
    }

    /// Link a direct base by hash.
    pub fn add_base(
        &mut self,
        base: TypeHash,
        base_name: &'static str,
    ) -> Result<(), RegistrationError> {
        if base == self.type_hash() {
            return Err(RegistrationError::CyclicInheritance(self.name().to_string()));
        }
        if self.bases.contains(&base) {
            return Err(RegistrationError::DuplicateBase {
                type_name: self.name().to_string(),
                base: base_name.to_string(),
            });
        }
        self.bases.push(base);
        self.base_names.push(base_name);
        Ok(())
    }

    /// Add a member. Names must be unique within the type.
    pub fn add_member(&mut self, member: Member) -> Result<(), RegistrationError> {
        let name = member.name();
        if self.member_index.contains_key(name) {
            return Err(RegistrationError::DuplicateMember {
                type_name: self.name().to_string(),
                member: name.to_string(),
            });
        }
        self.member_index.insert(name, self.members.len());
        self.members.push(member);
        Ok(())
    }

    /// Add a named enumerator. Only valid on enum types.
    pub fn add_enum_value(&mut self, name: &'static str, value: i128) -> Result<(), RegistrationError> {
        if !self.is_enum() {
            return Err(RegistrationError::NotAnEnum(self.name().to_string()));
        }
        if self.enum_index.contains_key(name) {
            return Err(RegistrationError::DuplicateEnumValue {
                enum_name: self.name().to_string(),
                value_name: name.to_string(),
            });
        }
        self.enum_index.insert(name, self.enum_values.len());
        self.enum_values.push((name, value));
        Ok(())
    }

    /// Record the transitive ancestor set. Called when the registry is built.
    pub fn set_ancestors(&mut self, ancestors: FxHashSet<TypeHash>) {
        self.ancestors = ancestors;
    }
}

impl Index<&str> for Type {
    type Output = Member;

    /// Required lookup of a member by name.
    ///
    /// # Panics
    ///
    /// Panics if the type has no member with that name.
    fn index(&self, name: &str) -> &Member {
        match self.member(name) {
            Some(member) => member,
            None => panic!("type '{}' has no member '{}'", self.name(), name),
        }
    }
}
