//! Integration tests for `#[derive(Reflect)]`.

use reflection::{
    FieldShape, Hidden, Qualifiers, ReadOnly, Reflect, TypeFlags, TypeHash, TypeRegistry,
    TypeRegistryBuilder,
};

fn build(register: impl FnOnce(&mut TypeRegistryBuilder)) -> TypeRegistry {
    let mut builder = TypeRegistryBuilder::with_primitives().unwrap();
    register(&mut builder);
    builder.build().unwrap()
}

/// Test the default name and hash.
#[derive(Reflect)]
struct Plain {
    value: i32,
}

#[test]
fn test_default_name() {
    assert_eq!(Plain::type_name(), "Plain");
    assert_eq!(Plain::type_hash(), TypeHash::from_name("Plain"));
    assert_eq!(Plain::type_flags(), TypeFlags::empty());

    let traits = Plain::type_traits();
    assert_eq!(traits.size, 4);
    assert!(traits.is_assignable());
}

/// Test `#[reflect(name = "...")]` on types and fields.
#[derive(Reflect)]
#[reflect(name = "Player")]
struct PlayerData {
    #[reflect(name = "hp")]
    health: i32,
    level: u8,
}

#[test]
fn test_renamed_type_and_field() {
    assert_eq!(PlayerData::type_name(), "Player");

    let registry = build(|types| {
        types.register::<PlayerData>().unwrap();
    });
    let player = &registry["Player"];
    assert!(registry.find("PlayerData").is_none());
    assert!(player.has_member("hp"));
    assert!(!player.has_member("health"));
    assert_eq!(player["hp"].offset(), std::mem::offset_of!(PlayerData, health));

    let data = PlayerData {
        health: 90,
        level: 3,
    };
    assert_eq!(player["hp"].get::<PlayerData, i32>(&data), Ok(&90));
    assert_eq!(player["level"].get::<PlayerData, u8>(&data), Ok(&3));
}

/// Test `#[reflect(skip)]`.
#[derive(Reflect)]
struct Cached {
    key: u64,
    #[reflect(skip)]
    scratch: Vec<u8>,
}

#[test]
fn test_skipped_field() {
    let registry = build(|types| {
        types.register::<Cached>().unwrap();
    });
    let cached = &registry["Cached"];
    assert_eq!(cached.members().len(), 1);
    assert!(cached.member("scratch").is_none());

    let value = Cached {
        key: 7,
        scratch: Vec::new(),
    };
    assert_eq!(cached["key"].get::<Cached, u64>(&value), Ok(&7));
    assert!(value.scratch.is_empty());
}

/// Test tuple structs, whose members are named by position.
#[derive(Reflect)]
struct Rgb(u8, u8, #[reflect(name = "blue")] u8);

#[test]
fn test_tuple_struct() {
    let registry = build(|types| {
        types.register::<Rgb>().unwrap();
    });
    let rgb = &registry["Rgb"];
    let names: Vec<&str> = rgb.members().iter().map(|m| m.name()).collect();
    assert_eq!(names, ["0", "1", "blue"]);

    let mut color = Rgb(1, 2, 3);
    rgb["1"].set(&mut color, 20u8).unwrap();
    assert_eq!(color.1, 20);
    assert_eq!(rgb["blue"].get::<Rgb, u8>(&color), Ok(&3));
    assert_eq!(color.0, 1);
}

/// Test arrays, pointers and `volatile`.
#[derive(Reflect)]
struct Buffer {
    #[reflect(volatile)]
    head: u32,
    data: [[u16; 4]; 2],
    cursor: *const u16,
}

#[test]
fn test_field_shapes() {
    let registry = build(|types| {
        types.register::<Buffer>().unwrap();
    });
    let buffer = &registry["Buffer"];

    let head = &buffer["head"];
    assert!(head.traits().is_volatile());
    assert_eq!(head.qualifiers(), Qualifiers::VOLATILE);

    let data = &buffer["data"];
    assert!(data.traits().is_array());
    assert_eq!(data.array_len(), 8);
    assert_eq!(data.element().name, "u16");
    assert_eq!(data.field_size(), 16);

    let cursor = &buffer["cursor"];
    assert!(cursor.traits().is_pointer());
    assert!(cursor.traits().is_const());
    assert_eq!(cursor.element().name, "u16");

    let value = Buffer {
        head: 0,
        data: [[1, 2, 3, 4], [5, 6, 7, 8]],
        cursor: std::ptr::null(),
    };
    let read = data.get::<Buffer, [[u16; 4]; 2]>(&value).unwrap();
    assert_eq!(read[1][2], 7);
    assert!(value.cursor.is_null());
    assert_eq!(value.head, 0);
}

/// Test that the derive implements `FieldShape` so the type can be a member.
#[derive(Reflect)]
struct Inner {
    value: f64,
}

#[derive(Reflect)]
struct Outer {
    inner: Inner,
    many: [Inner; 3],
}

#[test]
fn test_nested_types() {
    assert_eq!(<Inner as FieldShape>::ARRAY_LEN, 1);
    assert!(<Inner as FieldShape>::QUALIFIERS.is_empty());

    let registry = build(|types| {
        types.register::<Inner>().unwrap().register::<Outer>().unwrap();
    });
    let outer = &registry["Outer"];
    let inner = registry.member_type(&outer["inner"]).unwrap();
    assert!(std::ptr::eq(inner, &registry["Inner"]));
    assert_eq!(outer["many"].array_len(), 3);

    let value = Outer {
        inner: Inner { value: 1.5 },
        many: [Inner { value: 0.0 }, Inner { value: 1.0 }, Inner { value: 2.0 }],
    };
    let nested = outer["inner"].get::<Outer, Inner>(&value).unwrap();
    assert_eq!(inner["value"].get::<Inner, f64>(nested), Ok(&1.5));
    assert_eq!(value.many[2].value, 2.0);
}

/// Test enum naming and `skip` on variants.
#[derive(Reflect, Clone, Copy)]
#[reflect(tags(Hidden))]
enum Mode {
    Idle = 1,
    #[reflect(name = "Running")]
    Run = 4,
    #[reflect(skip)]
    Internal = 9,
}

#[test]
fn test_enum_attributes() {
    assert!(Mode::type_flags().contains(TypeFlags::ENUM));

    let registry = build(|types| {
        types.register::<Mode>().unwrap();
    });
    let mode = &registry["Mode"];
    assert!(mode.is_enum());
    assert!(mode.has_meta_tag::<Hidden>());
    assert_eq!(mode.enum_values(), [("Idle", 1), ("Running", 4)]);
    assert_eq!(mode.enum_value("Run"), None);
    assert_eq!(mode.enum_name(Mode::Internal as i128), None);
}

/// Test type flags from attributes.
#[derive(Reflect)]
#[reflect(abstract, polymorphic)]
struct Base;

#[derive(Reflect)]
#[reflect(bases(Base), final)]
struct Leaf {
    #[reflect(tags(ReadOnly, Hidden))]
    id: u32,
}

#[test]
fn test_type_flags_and_bases() {
    let flags = Base::type_flags();
    assert!(flags.contains(TypeFlags::ABSTRACT | TypeFlags::POLYMORPHIC));
    assert!(Base::type_traits().is_empty());
    assert!(Leaf::type_flags().contains(TypeFlags::FINAL));

    let registry = build(|types| {
        types.register::<Base>().unwrap().register::<Leaf>().unwrap();
    });
    let leaf = &registry["Leaf"];
    assert!(leaf.is_derived_from(&registry["Base"]));
    assert_eq!(leaf.bases(), [Base::type_hash()]);

    let id = &leaf["id"];
    assert!(id.has_meta_tag::<ReadOnly>());
    assert!(id.has_meta_tag::<Hidden>());
    assert_eq!(id.meta_tags().len(), 2);
}

/// Fields stay private; the derive expands inside the defining module.
mod account {
    use reflection::Reflect;

    #[derive(Reflect)]
    pub struct Account {
        balance: i64,
        owner: String,
    }

    impl Account {
        pub fn new(owner: &str, balance: i64) -> Self {
            Self {
                balance,
                owner: owner.to_string(),
            }
        }
    }
}

#[test]
fn test_private_fields() {
    use account::Account;

    let registry = build(|types| {
        types.register::<Account>().unwrap();
    });
    let account_type = &registry["Account"];

    let mut account = Account::new("ada", 10);
    account_type["balance"].set(&mut account, 25i64).unwrap();
    assert_eq!(account_type["balance"].get::<Account, i64>(&account), Ok(&25));
    assert_eq!(
        account_type["owner"].get::<Account, String>(&account).map(String::as_str),
        Ok("ada")
    );
}

/// Test that wide discriminants keep their value.
#[derive(Reflect, Clone, Copy)]
#[repr(u64)]
enum Wide {
    Zero = 0,
    Max = u64::MAX,
}

#[derive(Reflect, Clone, Copy)]
#[repr(i64)]
enum Signed {
    Min = i64::MIN,
    Minus = -1,
}

#[derive(Reflect, Clone, Copy)]
#[repr(u128)]
enum Huge {
    Top = i128::MAX as u128,
}

#[test]
fn test_wide_discriminants() {
    let registry = build(|types| {
        types
            .register::<Wide>()
            .unwrap()
            .register::<Signed>()
            .unwrap()
            .register::<Huge>()
            .unwrap();
    });

    let wide = &registry["Wide"];
    assert_eq!(wide.enum_value("Max"), Some(u64::MAX as i128));
    assert_eq!(wide.enum_name(u64::MAX as i128), Some("Max"));
    assert_eq!(wide.enum_name(-1), None);
    assert_eq!(wide.enum_value("Zero"), Some(Wide::Zero as i128));

    let signed = &registry["Signed"];
    assert_eq!(signed.enum_value("Min"), Some(i64::MIN as i128));
    assert_eq!(signed.enum_name(-1), Some("Minus"));

    assert_eq!(registry["Huge"].enum_value("Top"), Some(i128::MAX));
    assert_eq!(Huge::Top as u128, i128::MAX as u128);
    assert_eq!(Signed::Minus as i64, -1);
    assert_eq!(Wide::Max as u64, u64::MAX);
}
