//! Tests for the process-wide registry.
//!
//! Every test in this binary shares one registry, published through
//! `get_or_init` with the same registration function.

use reflection::{Reflect, RegistrationError, TypeRegistry, TypeRegistryBuilder};

#[derive(Reflect)]
#[reflect(abstract)]
pub struct Component;

#[derive(Reflect, Default)]
#[reflect(bases(Component))]
pub struct Transform {
    position: [f32; 3],
    scale: f32,
}

#[derive(Reflect, Clone, Copy)]
pub enum Layer {
    Background,
    World,
    Overlay,
}

fn register(types: &mut TypeRegistryBuilder) -> Result<(), RegistrationError> {
    types
        .register::<Component>()?
        .register::<Transform>()?
        .register::<Layer>()?;
    Ok(())
}

fn registry() -> &'static TypeRegistry {
    reflection::get_or_init(register).unwrap()
}

#[test]
fn test_published_types() {
    let registry = registry();
    assert!(std::ptr::eq(registry, reflection::registry()));
    assert!(reflection::try_registry().is_some());

    let transform = reflection::find("Transform").unwrap();
    assert!(std::ptr::eq(transform, reflection::find_type::<Transform>().unwrap()));
    assert!(transform.is_derived_from(reflection::find("Component").unwrap()));
    assert_eq!(transform["position"].array_len(), 3);
    assert!(reflection::find("Missing").is_none());
}

#[test]
fn test_second_init_is_rejected() {
    registry();
    let mut ran = false;
    let result = reflection::init(|_| {
        ran = true;
        Ok(())
    });
    assert_eq!(result.unwrap_err(), RegistrationError::AlreadyInitialized);
    assert!(!ran);
}

#[test]
fn test_concurrent_readers() {
    registry();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let mut transform = Transform::default();
                let ty = reflection::find_type::<Transform>().unwrap();
                ty["scale"].set(&mut transform, 2.0f32).unwrap();
                assert_eq!(transform.scale, 2.0);
                reflection::find("Layer").unwrap().enum_value("World")
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(Layer::World as i128));
    }
}

#[test]
fn test_enumeration_and_dump() {
    registry();
    let names: Vec<&str> = reflection::types().map(|ty| ty.name()).collect();
    assert!(names.contains(&"Layer"));
    assert!(names.contains(&"i32"));
    assert_eq!(names.len(), reflection::registry().len());

    let dump = reflection::dump();
    assert!(dump.contains("Transform (size"));
    assert!(dump.contains("  base Component\n"));
    assert!(dump.contains("  position: [f32; 3] @ "));
    assert!(dump.contains("  Overlay = 2\n"));
    assert!(!dump.contains("Missing"));
}
