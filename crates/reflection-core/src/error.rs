//! Error types for the reflection system.
//!
//! ```text
//! RegistrationError - Structural errors found while building the registry
//! AccessError       - Precondition violations when reading or writing members
//! ```
//!
//! Both are programmer errors. Registration errors surface from
//! `TypeRegistryBuilder::build` (and the global `init`), where the
//! application is expected to abort; access errors are returned by the safe
//! member accessors instead of invoking undefined behavior.

use thiserror::Error;

use crate::TypeHash;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while registering types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two distinct names produced the same hash.
    #[error("type hash collision: '{name}' and '{existing}' both hash to {hash}")]
    HashCollision {
        /// The name being registered.
        name: String,
        /// The name already holding the hash.
        existing: String,
        /// The colliding hash.
        hash: TypeHash,
    },

    /// The same name was registered with different traits.
    #[error("type '{name}' was registered twice with conflicting traits")]
    ConflictingTraits {
        /// The type name.
        name: String,
    },

    /// A member with this name already exists on the type.
    #[error("duplicate member: '{member}' in type '{type_name}'")]
    DuplicateMember {
        /// The owning type.
        type_name: String,
        /// The duplicated member name.
        member: String,
    },

    /// A duplicate enum value was registered.
    #[error("duplicate enum value: '{value_name}' in enum '{enum_name}'")]
    DuplicateEnumValue {
        /// The enum name.
        enum_name: String,
        /// The duplicate value name.
        value_name: String,
    },

    /// The same base type was listed twice.
    #[error("type '{type_name}' lists base '{base}' more than once")]
    DuplicateBase {
        /// The derived type.
        type_name: String,
        /// The repeated base.
        base: String,
    },

    /// Enum values were added to a type that is not an enumeration.
    #[error("type '{0}' is not an enum and cannot hold enum values")]
    NotAnEnum(String),

    /// A member's offset does not describe a field of its owner.
    #[error("invalid member '{member}' in type '{type_name}': {reason}")]
    InvalidMember {
        /// The owning type.
        type_name: String,
        /// The member name.
        member: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A base type was never registered.
    #[error("type '{type_name}' derives from unregistered type '{base}'")]
    UnresolvedBase {
        /// The derived type.
        type_name: String,
        /// The missing base.
        base: String,
    },

    /// A member's element type was never registered.
    #[error("member '{type_name}.{member}' refers to unregistered type '{element}'")]
    UnresolvedMemberType {
        /// The owning type.
        type_name: String,
        /// The member name.
        member: String,
        /// The missing element type.
        element: String,
    },

    /// A final type was used as a base.
    #[error("type '{type_name}' cannot derive from final type '{base}'")]
    FinalBase {
        /// The derived type.
        type_name: String,
        /// The final base.
        base: String,
    },

    /// The base-class graph contains a cycle.
    #[error("cyclic inheritance involving type '{0}'")]
    CyclicInheritance(String),

    /// The process-wide registry has already been published.
    #[error("the global type registry is already initialized")]
    AlreadyInitialized,
}

// ============================================================================
// Access Errors
// ============================================================================

/// Errors returned by the checked member accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The instance is not of the member's owning type.
    #[error("member '{member}' belongs to '{expected}', not '{found}'")]
    OwnerMismatch {
        /// The member name.
        member: &'static str,
        /// The owning Rust type.
        expected: &'static str,
        /// The Rust type that was passed in.
        found: &'static str,
    },

    /// The requested value type does not match the field type.
    #[error("member '{member}' holds '{expected}', not '{found}'")]
    ValueMismatch {
        /// The member name.
        member: &'static str,
        /// The field's Rust type.
        expected: &'static str,
        /// The Rust type that was requested.
        found: &'static str,
    },

    /// The member is read through a getter and cannot be borrowed mutably.
    #[error("member '{0}' is accessed through a getter and has no mutable place")]
    NotAddressable(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_error_display() {
        let err = RegistrationError::DuplicateMember {
            type_name: "Point".into(),
            member: "x".into(),
        };
        assert_eq!(err.to_string(), "duplicate member: 'x' in type 'Point'");

        let err = RegistrationError::UnresolvedBase {
            type_name: "Circle".into(),
            base: "Shape".into(),
        };
        assert_eq!(
            err.to_string(),
            "type 'Circle' derives from unregistered type 'Shape'"
        );
    }

    #[test]
    fn access_error_display() {
        let err = AccessError::ValueMismatch {
            member: "x",
            expected: "f32",
            found: "f64",
        };
        assert_eq!(err.to_string(), "member 'x' holds 'f32', not 'f64'");
    }
}
