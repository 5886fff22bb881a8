//! TypeRegistryBuilder and TypeRegistry.
//!
//! # Lifecycle
//!
//! - **Build phase**: a [`TypeRegistryBuilder`] collects types. Registration
//!   is single-threaded and idempotent: registering a type twice yields one
//!   entry, wired once.
//! - **Read phase**: [`TypeRegistryBuilder::build`] validates the collected
//!   types and freezes them into a [`TypeRegistry`]. The frozen registry has
//!   no mutation API, is `Send + Sync`, and can be shared freely.
//!
//! # Storage Model
//!
//! Types are stored by [`TypeHash`]. The hash is only a fast path: every
//! entry keeps its name, every lookup compares it, and a second name hashing
//! to an occupied slot is rejected with [`RegistrationError::HashCollision`].

use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::ops::Index;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, trace, warn};

use reflection_core::{Member, Reflect, RegistrationError, Type, TypeBuilder, TypeHash};

use crate::inheritance::InheritanceGraph;

/// Write phase of the registry.
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    types: FxHashMap<TypeHash, Type>,
    /// Types whose `reflect` hook has already run.
    wired: FxHashSet<TypeHash>,
    /// Types whose `reflect` hook failed, with the first error.
    rejected: FxHashMap<TypeHash, (&'static str, RegistrationError)>,
}

impl TypeRegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with every built-in primitive registered.
    ///
    /// # Errors
    ///
    /// Fails only if two primitive names share a hash.
    pub fn with_primitives() -> Result<Self, RegistrationError> {
        let mut builder = Self::new();
        builder.register_primitives()?;
        Ok(builder)
    }

    /// Register every built-in primitive.
    pub fn register_primitives(&mut self) -> Result<&mut Self, RegistrationError> {
        self.register_basic::<()>()?
            .register_basic::<bool>()?
            .register_basic::<char>()?
            .register_basic::<i8>()?
            .register_basic::<i16>()?
            .register_basic::<i32>()?
            .register_basic::<i64>()?
            .register_basic::<i128>()?
            .register_basic::<isize>()?
            .register_basic::<u8>()?
            .register_basic::<u16>()?
            .register_basic::<u32>()?
            .register_basic::<u64>()?
            .register_basic::<u128>()?
            .register_basic::<usize>()?
            .register_basic::<f32>()?
            .register_basic::<f64>()?
            .register_basic::<String>()?
            .register_basic::<&'static str>()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Return the entry for `T`, creating it if absent.
    ///
    /// Never overwrites: an existing entry is returned as long as it was
    /// created with the same name and traits.
    pub fn get_or_create<T: Reflect>(&mut self) -> Result<&mut Type, RegistrationError> {
        let traits = T::type_traits();
        match self.types.entry(traits.name_hash) {
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if existing.name() != traits.name {
                    warn!(name = traits.name, existing = existing.name(), "type hash collision");
                    return Err(RegistrationError::HashCollision {
                        name: traits.name.to_string(),
                        existing: existing.name().to_string(),
                        hash: traits.name_hash,
                    });
                }
                if *existing.traits() != traits {
                    warn!(name = traits.name, "conflicting type traits");
                    return Err(RegistrationError::ConflictingTraits {
                        name: traits.name.to_string(),
                    });
                }
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!(name = traits.name, size = traits.size, "type created");
                Ok(entry.insert(Type::new(traits)))
            }
        }
    }

    /// Register `T` and run its `reflect` hook.
    ///
    /// The hook runs only the first time; later calls are no-ops. Bases are
    /// not registered implicitly.
    ///
    /// If the hook fails the partly wired entry is dropped and the type is
    /// rejected: later `register::<T>()` calls return the same error and
    /// [`build`](Self::build) refuses to freeze the registry.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn register<T: Reflect>(&mut self) -> Result<&mut Self, RegistrationError> {
        let hash = T::type_hash();
        if let Some((name, err)) = self.rejected.get(&hash)
            && *name == T::type_name()
        {
            return Err(err.clone());
        }
        if self.wired.contains(&hash) {
            self.get_or_create::<T>()?;
            trace!(name = T::type_name(), "already registered");
            return Ok(self);
        }

        let ty = self.get_or_create::<T>()?;
        if let Err(err) = T::reflect(&mut TypeBuilder::<T>::new(ty)) {
            warn!(name = T::type_name(), error = %err, "registration rejected");
            self.types.remove(&hash);
            self.rejected.insert(hash, (T::type_name(), err.clone()));
            return Err(err);
        }
        self.wired.insert(hash);
        Ok(self)
    }

    /// Register `T` without running its `reflect` hook.
    pub fn register_basic<T: Reflect>(&mut self) -> Result<&mut Self, RegistrationError> {
        self.get_or_create::<T>()?;
        Ok(self)
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn find(&self, name: &str) -> Option<&Type> {
        lookup(&self.types, name)
    }

    pub fn find_type<T: Reflect>(&self) -> Option<&Type> {
        self.find(T::type_name())
            .filter(|ty| ty.traits().type_id == TypeId::of::<T>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ==========================================================================
    // Build
    // ==========================================================================

    /// Validate the collected types and freeze them.
    ///
    /// Fails if a type was rejected during registration, a base or member
    /// type was never registered, a final type is used as a base, or the
    /// base graph has a cycle.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build(self) -> Result<TypeRegistry, RegistrationError> {
        let Self {
            mut types,
            rejected,
            ..
        } = self;

        if let Some((_, err)) = rejected.into_values().min_by_key(|(name, _)| *name) {
            return Err(err);
        }

        resolve_links(&types)?;

        let graph = InheritanceGraph::new(&types);
        graph.check_acyclic(&types)?;
        for ty in types.values_mut() {
            ty.set_ancestors(graph.ancestors(ty.type_hash()));
        }

        info!(types = types.len(), "type registry built");
        Ok(TypeRegistry { types })
    }
}

/// Check that every base and member element type is registered.
fn resolve_links(types: &FxHashMap<TypeHash, Type>) -> Result<(), RegistrationError> {
    let mut sorted: Vec<&Type> = types.values().collect();
    sorted.sort_unstable_by_key(|ty| ty.name());

    for ty in sorted {
        for &base_name in ty.base_names() {
            let base = lookup(types, base_name).ok_or_else(|| RegistrationError::UnresolvedBase {
                type_name: ty.name().to_string(),
                base: base_name.to_string(),
            })?;
            if base.traits().is_final() {
                return Err(RegistrationError::FinalBase {
                    type_name: ty.name().to_string(),
                    base: base_name.to_string(),
                });
            }
        }
        for member in ty.members() {
            let element = member.element().name;
            if lookup(types, element).is_none() {
                return Err(RegistrationError::UnresolvedMemberType {
                    type_name: ty.name().to_string(),
                    member: member.name().to_string(),
                    element: element.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Hash lookup confirmed by name.
fn lookup<'a>(types: &'a FxHashMap<TypeHash, Type>, name: &str) -> Option<&'a Type> {
    types
        .get(&TypeHash::from_name(name))
        .filter(|ty| ty.name() == name)
}

/// Read phase of the registry.
///
/// Produced by [`TypeRegistryBuilder::build`]; immutable from then on.
#[derive(Debug)]
pub struct TypeRegistry {
    types: FxHashMap<TypeHash, Type>,
}

impl TypeRegistry {
    /// Optional lookup by name.
    pub fn find(&self, name: &str) -> Option<&Type> {
        lookup(&self.types, name)
    }

    /// Optional lookup by Rust type.
    pub fn find_type<T: Reflect>(&self) -> Option<&Type> {
        self.find(T::type_name())
            .filter(|ty| ty.traits().type_id == TypeId::of::<T>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Every registered type, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Direct bases of `ty`, in declaration order.
    pub fn base_types<'a>(&'a self, ty: &'a Type) -> impl Iterator<Item = &'a Type> + 'a {
        ty.base_names().iter().filter_map(|name| self.find(name))
    }

    /// Registry entry of a member's element type.
    pub fn member_type(&self, member: &Member) -> Option<&Type> {
        self.find(member.element().name)
    }

    /// Human-readable listing of every type.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl Index<&str> for TypeRegistry {
    type Output = Type;

    /// Required lookup by name.
    ///
    /// # Panics
    ///
    /// Panics if no type with that name is registered.
    fn index(&self, name: &str) -> &Type {
        match self.find(name) {
            Some(ty) => ty,
            None => panic!("type '{}' is not registered", name),
        }
    }
}
