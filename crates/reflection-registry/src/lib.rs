//! Type registry for the reflection system.
//!
//! Registration happens on a [`TypeRegistryBuilder`]; [`TypeRegistryBuilder::build`]
//! resolves every base and member type, checks the inheritance graph and
//! freezes the result into a read-only [`TypeRegistry`].
//!
//! # Example
//!
//! ```
//! use reflection_core::{member, Reflect, RegistrationError, TypeBuilder};
//! use reflection_registry::TypeRegistryBuilder;
//!
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
//!
//! let mut builder = TypeRegistryBuilder::with_primitives().unwrap();
//! builder.register::<Point>().unwrap();
//! let registry = builder.build().unwrap();
//!
//! let point = &registry["Point"];
//! assert_eq!(point.traits().size, 8);
//! assert_eq!(point["y"].offset(), std::mem::offset_of!(Point, y));
//! ```

mod dump;
mod inheritance;
mod registry;

pub use registry::{TypeRegistry, TypeRegistryBuilder};
