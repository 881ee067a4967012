//! Value and Native Class Integration Tests
//!
//! Tests the integration between var_core values and the native_classes
//! registry: registered instances stored in containers, used as map keys,
//! combined with operators and reached through registry-aware dispatch.

use integration_tests::Point;
use native_classes::{dispatch, ClassRegistry};
use var_core::{Array, ErrorKind, Map, Value};

fn registry() -> ClassRegistry {
    let registry = ClassRegistry::new();
    registry.register::<Point>().unwrap();
    registry
}

fn point(registry: &ClassRegistry, x: f64, y: f64) -> Value {
    Value::Object(
        registry
            .construct("Point", &[Value::from(x), Value::from(y)])
            .unwrap(),
    )
}

/// Test: initializer defaults fill missing coordinates
#[test]
fn test_construct_with_defaults() {
    let registry = registry();
    let origin = Value::Object(registry.construct("Point", &[]).unwrap());
    assert_eq!(origin.to_string(), "Point(0.0, 0.0)");
    let p = Value::Object(registry.construct("Point", &[Value::from(3.0)]).unwrap());
    assert_eq!(dispatch::get_member(&registry, &p, "x").unwrap(), Value::from(3.0));
    assert_eq!(dispatch::get_member(&registry, &p, "y").unwrap(), Value::from(0.0));
}

/// Test: instances in an array are aliased by shallow copy and cloned by
/// deep copy
#[test]
fn test_instances_inside_arrays() {
    let registry = registry();
    let list = Value::from(vec![point(&registry, 1.0, 2.0)]);
    let shallow = list.copy(false).unwrap();
    let deep = list.copy(true).unwrap();

    let mut first = list.get_index(&Value::from(0)).unwrap();
    dispatch::set_member(&registry, &mut first, "x", Value::from(9.0)).unwrap();

    let aliased = shallow.get_index(&Value::from(0)).unwrap();
    assert_eq!(dispatch::get_member(&registry, &aliased, "x").unwrap(), Value::from(9.0));
    let cloned = deep.get_index(&Value::from(0)).unwrap();
    assert_eq!(dispatch::get_member(&registry, &cloned, "x").unwrap(), Value::from(1.0));
}

/// Test: instances with value equality and hashing work as map keys
#[test]
fn test_instances_as_map_keys() {
    let registry = registry();
    let map = Map::new();
    map.insert(point(&registry, 1.0, 1.0), "one").unwrap();
    map.insert(point(&registry, 1.0, 1.0), "again").unwrap();
    assert_eq!(map.size(), 1);
    assert_eq!(
        map.get(&point(&registry, 1.0, 1.0)).unwrap(),
        Some(Value::from("again"))
    );
    assert!(!map.has(&point(&registry, 2.0, 1.0)).unwrap());
}

/// Test: object operators go through the object's capabilities
#[test]
fn test_object_operators() {
    let registry = registry();
    let sum = point(&registry, 1.0, 2.0)
        .add(&point(&registry, 3.0, 4.0))
        .unwrap();
    assert_eq!(sum, point(&registry, 4.0, 6.0));

    let err = point(&registry, 1.0, 2.0).add(&Value::from(1)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::OperatorNotSupported);
    let err = point(&registry, 1.0, 2.0).mul(&Value::from(2)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotImplemented);
}

/// Test: methods, static functions and constants through dispatch
#[test]
fn test_dispatch_round_trip() {
    let registry = registry();
    let p = point(&registry, 3.0, 4.0);
    assert_eq!(
        dispatch::call_method(&registry, &p, "length", &[]).unwrap(),
        Value::from(5.0)
    );
    let distance = dispatch::call_static(
        &registry,
        "Point",
        "distance",
        &[point(&registry, 0.0, 0.0), p.clone()],
    )
    .unwrap();
    assert_eq!(distance, Value::from(5.0));
    let err = dispatch::call_static(&registry, "Point", "distance", &[p, Value::from(1)])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert_eq!(
        dispatch::get_static(&registry, "Point", "DIMENSIONS").unwrap(),
        Value::from(2)
    );
}

/// Test: built-in container methods are unaffected by the registry
#[test]
fn test_builtins_through_dispatch() {
    let registry = registry();
    let list = Value::from(Array::new());
    dispatch::call_method(&registry, &list, "push", &[point(&registry, 1.0, 0.0)]).unwrap();
    assert_eq!(
        dispatch::call_method(&registry, &list, "contains", &[point(&registry, 1.0, 0.0)]).unwrap(),
        Value::from(true)
    );
    let text = Value::from("%s at %d");
    let rendered = text
        .rem(&Value::from(vec![point(&registry, 1.0, 0.0), Value::from(3)]))
        .unwrap();
    assert_eq!(rendered, Value::from("Point(1.0, 0.0) at 3"));
}

/// Test: iterating a map of instances, writing through entries
#[test]
fn test_iterate_map_of_instances() {
    let registry = registry();
    let map = Map::new();
    map.insert("a", point(&registry, 1.0, 0.0)).unwrap();
    map.insert("b", point(&registry, 0.0, 1.0)).unwrap();
    for entry in Value::from(map.clone()).iter().unwrap() {
        let mut entry = entry.unwrap();
        let moved = entry
            .get_member("value")
            .unwrap()
            .add(&point(&registry, 1.0, 1.0))
            .unwrap();
        entry.set_member("value", moved).unwrap();
    }
    assert_eq!(
        map.get(&Value::from("b")).unwrap(),
        Some(point(&registry, 1.0, 2.0))
    );
}
