//! Process-wide type registry.
//!
//! The registry is written once, during an explicit initialization step run
//! at program start, and is read-only afterwards:
//!
//! ```text
//! init(|builder| ...)     - build with primitives, publish, fail if already published
//! get_or_init(|builder| ...) - publish on first call, return the published registry after
//! registry()              - required access, panics before initialization
//! try_registry()          - optional access
//! ```
//!
//! Every type an application reflects should be registered from the closure
//! passed to [`init`], so the registration code is reachable from `main` and
//! cannot be dropped by the linker.

use std::sync::OnceLock;

use reflection_core::{Reflect, RegistrationError, Type};
use reflection_registry::{TypeRegistry, TypeRegistryBuilder};
use tracing::{debug, info};

static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Build and publish the process-wide registry.
///
/// The builder handed to `register` already holds every primitive type.
///
/// # Errors
///
/// Returns [`RegistrationError::AlreadyInitialized`] if a registry has
/// already been published (the closure is not run), or any error raised by
/// `register` or by [`TypeRegistryBuilder::build`].
pub fn init<F>(register: F) -> Result<&'static TypeRegistry, RegistrationError>
where
    F: FnOnce(&mut TypeRegistryBuilder) -> Result<(), RegistrationError>,
{
    if REGISTRY.get().is_some() {
        return Err(RegistrationError::AlreadyInitialized);
    }

    let (registry, published) = publish(build(register)?);
    if !published {
        // Another thread won the race.
        return Err(RegistrationError::AlreadyInitialized);
    }
    Ok(registry)
}

/// Return the published registry, building it from `register` first if
/// nothing has been published yet.
///
/// # Errors
///
/// Returns any error raised while building a new registry. Once a registry
/// is published this never fails and `register` is not run.
pub fn get_or_init<F>(register: F) -> Result<&'static TypeRegistry, RegistrationError>
where
    F: FnOnce(&mut TypeRegistryBuilder) -> Result<(), RegistrationError>,
{
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }

    let (registry, _) = publish(build(register)?);
    Ok(registry)
}

/// The published registry.
///
/// # Panics
///
/// Panics if neither [`init`] nor [`get_or_init`] has completed.
pub fn registry() -> &'static TypeRegistry {
    match REGISTRY.get() {
        Some(registry) => registry,
        None => panic!("type registry accessed before reflection::init"),
    }
}

/// The published registry, or `None` before initialization.
pub fn try_registry() -> Option<&'static TypeRegistry> {
    REGISTRY.get()
}

/// Optional lookup by name in the published registry.
pub fn find(name: &str) -> Option<&'static Type> {
    try_registry()?.find(name)
}

/// Optional lookup by Rust type in the published registry.
pub fn find_type<T: Reflect>() -> Option<&'static Type> {
    try_registry()?.find_type::<T>()
}

/// Every published type, in no particular order.
///
/// # Panics
///
/// Panics before initialization.
pub fn types() -> impl Iterator<Item = &'static Type> {
    registry().types()
}

/// Human-readable listing of every published type.
///
/// # Panics
///
/// Panics before initialization.
pub fn dump() -> String {
    registry().dump()
}

#[cfg_attr(feature = "profiling", profiling::function)]
fn build<F>(register: F) -> Result<TypeRegistry, RegistrationError>
where
    F: FnOnce(&mut TypeRegistryBuilder) -> Result<(), RegistrationError>,
{
    let mut builder = TypeRegistryBuilder::with_primitives()?;
    register(&mut builder)?;
    builder.build()
}

/// Install `registry` unless one is already published.
///
/// Returns the published registry and whether it is the one passed in.
fn publish(registry: TypeRegistry) -> (&'static TypeRegistry, bool) {
    let mut published = false;
    let installed = REGISTRY.get_or_init(|| {
        published = true;
        registry
    });
    if published {
        info!(types = installed.len(), "global type registry published");
    } else {
        debug!("global type registry already published, discarding new build");
    }
    (installed, published)
}
