//! Human-readable registry listing.
//!
//! Types are listed by name; members, bases and enum values keep their
//! registration order. Meta tags are not shown.
//!
//! ```text
//! Circle (size 4, align 4) [final]
//!   base Shape
//!   radius: f32 @ 0
//! Direction (size 1, align 1) [enum]
//!   North = 0
//!   East = 1
//! ```

use std::fmt::{self, Write as _};

use reflection_core::{MemberTraits, PointerKind, Qualifiers, Type, TypeFlags};

use crate::TypeRegistry;

impl fmt::Display for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&Type> = self.types().collect();
        types.sort_unstable_by_key(|ty| ty.name());
        for ty in types {
            write_type(f, ty)?;
        }
        Ok(())
    }
}

fn write_type(f: &mut fmt::Formatter<'_>, ty: &Type) -> fmt::Result {
    let traits = ty.traits();
    write!(f, "{} (size {}, align {})", ty.name(), traits.size, traits.align)?;
    let flags = flag_names(traits.flags);
    if !flags.is_empty() {
        write!(f, " [{}]", flags.join(", "))?;
    }
    writeln!(f)?;

    for base in ty.base_names() {
        writeln!(f, "  base {}", base)?;
    }
    for member in ty.members() {
        writeln!(
            f,
            "  {}: {} @ {}",
            member.name(),
            member_type_name(member.traits()),
            member.offset()
        )?;
    }
    for (name, value) in ty.enum_values() {
        writeln!(f, "  {} = {}", name, value)?;
    }
    Ok(())
}

fn flag_names(flags: TypeFlags) -> Vec<&'static str> {
    [
        (TypeFlags::ENUM, "enum"),
        (TypeFlags::ABSTRACT, "abstract"),
        (TypeFlags::FINAL, "final"),
        (TypeFlags::POLYMORPHIC, "polymorphic"),
    ]
    .into_iter()
    .filter(|(flag, _)| flags.contains(*flag))
    .map(|(_, name)| name)
    .collect()
}

/// Rust-style spelling of a member's declared type.
fn member_type_name(traits: &MemberTraits) -> String {
    let q = traits.qualifiers;
    let mut name = String::new();
    if q.contains(Qualifiers::VOLATILE) {
        name.push_str("volatile ");
    }
    let element = traits.element.name;
    let wrapper = traits.pointer_kind.and_then(PointerKind::wrapper_name);
    let inner = if let Some(wrapper) = wrapper {
        format!("{}<{}>", wrapper, element)
    } else if q.contains(Qualifiers::POINTER) {
        let mutability = if q.contains(Qualifiers::CONST) { "const" } else { "mut" };
        format!("*{} {}", mutability, element)
    } else if q.contains(Qualifiers::REFERENCE) {
        let mutability = if q.contains(Qualifiers::CONST) { "" } else { "mut " };
        format!("&{}{}", mutability, element)
    } else {
        element.to_string()
    };
    if q.contains(Qualifiers::ARRAY) {
        let _ = write!(name, "[{}; {}]", inner, traits.array_len);
    } else {
        name.push_str(&inner);
    }
    name
}
