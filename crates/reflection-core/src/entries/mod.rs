//! Registry entries.
//!
//! - [`Type`] - metadata node for one host type
//! - [`Member`] - metadata for one field of a type

mod member;
mod type_entry;

pub use member::Member;
pub use type_entry::Type;
