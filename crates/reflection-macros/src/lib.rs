//! Reflection Proc Macros
//!
//! This crate provides `#[derive(Reflect)]`, which captures a type's
//! structure for the reflection registry.
//!
//! Generated code refers to the `reflection` facade crate, so depend on
//! `reflection` rather than using this crate directly.
//!
//! # Example
//!
//! ```ignore
//! use reflection::{Hidden, ReadOnly, Reflect};
//!
//! #[derive(Reflect)]
//! #[reflect(bases(Shape), tags(Hidden))]
//! pub struct Circle {
//!     #[reflect(tags(ReadOnly))]
//!     radius: f32,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_reflect;

/// Derive the `Reflect` trait (and `FieldShape`) for a struct or enum.
///
/// # Type Attributes
///
/// - `#[reflect(name = "...")]` - Override the registry name
/// - `#[reflect(bases(A, B))]` - Declare direct bases (registered separately)
/// - `#[reflect(tags(Hidden, ...))]` - Attach tags built with `Default`
/// - `#[reflect(abstract)]`, `#[reflect(final)]`, `#[reflect(polymorphic)]` -
///   Set the matching `TypeFlags`
///
/// # Field Attributes
///
/// - `#[reflect(skip)]` - Leave the field out
/// - `#[reflect(name = "...")]` - Override the member name
/// - `#[reflect(tags(...))]` - Attach tags built with `Default`
/// - `#[reflect(get = path)]` - Read through `fn(&Self) -> &Field`
/// - `#[reflect(set = path)]` - Write through `fn(&mut Self, Field)`
/// - `#[reflect(volatile)]` - Add the `VOLATILE` qualifier
///
/// # Enums
///
/// Every fieldless variant becomes an enum value (`Variant as i128`), so
/// `u64` and `i64` discriminants keep their full range. A `#[repr(u128)]`
/// variant above `i128::MAX` fails to compile.
/// Variants accept `#[reflect(name = "...")]` and `#[reflect(skip)]`.
///
/// Unions, generic types and enums with data-carrying variants are rejected.
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect)]
/// pub enum Direction {
///     North,
///     East,
///     #[reflect(name = "Down")]
///     South,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    derive_reflect::derive_reflect_impl(input)
}
