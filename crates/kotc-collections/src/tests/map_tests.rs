use super::*;
use kotc_solver::{ClassId, ContainerKind, ElementType, SlotRole};

fn scores() -> MutableMap {
    MutableMap::new([
        (Value::from("a"), Value::from(1)),
        (Value::from("b"), Value::from(2)),
    ])
    .unwrap()
}

#[test]
fn test_construction_binds_both_slots() {
    let map = scores();
    assert_eq!(map.key_type(), Some(ElementType::Class(ClassId::STR)));
    assert_eq!(map.value_type(), Some(ElementType::Class(ClassId::INT)));
    assert_eq!(map.type_name(), "MutableMap");
}

#[test]
fn test_repeated_key_keeps_last_value() {
    let map = Map::new([
        (Value::from("a"), Value::from(1)),
        (Value::from("a"), Value::from(2)),
    ])
    .unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&Value::from("a")), Some(&Value::from(2)));
}

#[test]
fn test_violation_names_the_failing_side() {
    let mut map = scores();

    let err = map.put(Value::from("c"), Value::from("three")).unwrap_err();
    let violation = err.type_violation().unwrap();
    assert_eq!(violation.role, SlotRole::Value);
    assert_eq!(violation.container, ContainerKind::MutableMap);
    assert_eq!(
        err.to_string(),
        "Cannot add element of type 'str' to MutableMap value[int]"
    );

    let err = map.put(Value::from(3), Value::from(3)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot add element of type 'int' to MutableMap key[str]"
    );
    assert_eq!(map.len(), 2);
}

#[test]
fn test_lookup() {
    let map = scores();
    let zero = Value::from(0);

    assert_eq!(map.get_value(&Value::from("a")).unwrap(), &Value::from(1));
    assert_eq!(
        map.get_value(&Value::from("z")).unwrap_err(),
        CollectionError::KeyAbsent {
            key: Value::from("z")
        }
    );
    assert_eq!(map.get_or_default(&Value::from("z"), &zero), &zero);
    assert!(map.contains_key(&Value::from("b")));
    assert!(map.contains_value(&Value::from(2)));
    assert!(!map.contains_value(&Value::from(3)));
}

#[test]
fn test_keys_and_values_carry_slots() {
    let map = Map::of_type(
        ClassId::STR,
        ClassId::INT,
        [(Value::from("a"), Value::from(1))],
    )
    .unwrap();

    let keys = map.keys();
    assert_eq!(keys.element_type(), Some(ElementType::Class(ClassId::STR)));
    assert_eq!(keys.type_name(), "Set[str]");

    let values = map.values();
    assert_eq!(values.element_type(), Some(ElementType::Class(ClassId::INT)));
    assert_eq!(values.type_name(), "List[int]");
    assert!(values.plus(Value::from("x")).is_err());
}

#[test]
fn test_filters_propagate() {
    let map = scores();

    let only_b = map.filter_keys(|k| k.as_str() == Some("b"));
    assert_eq!(only_b.len(), 1);
    assert_eq!(only_b.value_type(), map.value_type());

    let none = map.filter_values(|_| false);
    assert!(none.is_empty());
    assert!(none.plus(Value::from("x"), Value::from("y")).is_err());

    let big = map.filter(|_, v| v.as_int() > Some(1));
    assert_eq!(big.get(&Value::from("b")), Some(&Value::from(2)));
}

#[test]
fn test_map_values_keeps_key_slot() {
    let map = scores();

    let labels = map.map_values(|_, v| Value::from(format!("#{v}"))).unwrap();
    assert_eq!(labels.key_type(), map.key_type());
    assert_eq!(labels.value_type(), Some(ElementType::Class(ClassId::STR)));

    let err = map.map_values(|k, v| {
        if k.as_str() == Some("a") {
            v.clone()
        } else {
            Value::from("x")
        }
    });
    assert!(err.is_err());
}

#[test]
fn test_map_keys_keeps_value_slot() {
    let map = scores();
    let by_length = map
        .map_keys(|k, _| Value::from(k.as_str().map_or(0, str::len) as i64 * 10))
        .unwrap();

    assert_eq!(by_length.len(), 1);
    assert_eq!(by_length.key_type(), Some(ElementType::Class(ClassId::INT)));
    assert_eq!(by_length.value_type(), map.value_type());
}

#[test]
fn test_plus_and_minus() {
    let map = scores().to_map();

    let grown = map.plus(Value::from("c"), Value::from(3)).unwrap();
    assert_eq!(grown.len(), 3);
    assert_eq!(map.len(), 2);

    let err = map.plus(Value::from("c"), Value::from("three")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot add element of type 'str' to Map value[int]"
    );

    let smaller = map.minus(&Value::from("a"));
    assert_eq!(smaller.len(), 1);
    assert_eq!(smaller.key_type(), map.key_type());
}

#[test]
fn test_put_all_is_atomic() {
    let mut map = scores();
    let err = map.put_all([
        (Value::from("c"), Value::from(3)),
        (Value::from("d"), Value::from(4.0)),
    ]);
    assert!(err.is_err());
    assert_eq!(map.len(), 2);
    assert!(!map.contains_key(&Value::from("c")));
}

#[test]
fn test_put_if_absent_and_get_or_put() {
    let mut map = scores();

    assert_eq!(
        map.put_if_absent(Value::from("a"), Value::from(100)).unwrap(),
        Some(Value::from(1))
    );
    assert_eq!(map.put_if_absent(Value::from("c"), Value::from(3)).unwrap(), None);
    assert!(map.put_if_absent(Value::from("d"), Value::None).is_err());

    assert_eq!(
        map.get_or_put(Value::from("e"), || Value::from(5)).unwrap(),
        Value::from(5)
    );
    assert_eq!(
        map.get_or_put(Value::from("e"), || Value::from(50)).unwrap(),
        Value::from(5)
    );
}

#[test]
fn test_compute_family() {
    let mut map = scores();

    let bumped = map
        .compute(Value::from("a"), |_, old| {
            Some(Value::from(old.and_then(Value::as_int).unwrap_or(0) + 1))
        })
        .unwrap();
    assert_eq!(bumped, Some(Value::from(2)));

    assert!(
        map.compute(Value::from("a"), |_, _| Some(Value::from("bad")))
            .is_err()
    );
    assert_eq!(map.get(&Value::from("a")), Some(&Value::from(2)));

    assert_eq!(
        map.compute_if_absent(Value::from("z"), |_| Value::from(26))
            .unwrap(),
        Value::from(26)
    );
    assert_eq!(
        map.compute_if_present(Value::from("missing"), |_, _| Some(Value::from(0)))
            .unwrap(),
        None
    );
    assert_eq!(
        map.compute_if_present(Value::from("z"), |_, _| None).unwrap(),
        None
    );
    assert!(!map.contains_key(&Value::from("z")));
}

#[test]
fn test_compute_removal_resets_when_empty() {
    let mut map = MutableMap::new([(Value::from("only"), Value::from(1))]).unwrap();
    map.compute(Value::from("only"), |_, _| None).unwrap();

    assert!(map.is_empty());
    assert!(map.key_constraint().is_unset());
    assert!(map.value_constraint().is_unset());
    map.put(Value::from(1), Value::from("now strings")).unwrap();
}

#[test]
fn test_replace_and_replace_all() {
    let mut map = scores();

    assert_eq!(map.replace(Value::from("zz"), Value::from(9)).unwrap(), None);
    assert!(!map.contains_key(&Value::from("zz")));
    assert_eq!(
        map.replace(Value::from("a"), Value::from(10)).unwrap(),
        Some(Value::from(1))
    );
    assert!(map.replace(Value::from("a"), Value::from("ten")).is_err());

    map.replace_all(|_, v| Value::from(v.as_int().unwrap_or(0) * 2))
        .unwrap();
    assert_eq!(map.get(&Value::from("a")), Some(&Value::from(20)));

    let err = map.replace_all(|k, v| {
        if k.as_str() == Some("b") {
            Value::None
        } else {
            v.clone()
        }
    });
    assert!(err.is_err());
    assert_eq!(map.get(&Value::from("b")), Some(&Value::from(4)));
}

#[test]
fn test_merge() {
    let mut map = scores();
    let add = |old: &Value, new: &Value| {
        Some(Value::from(
            old.as_int().unwrap_or(0) + new.as_int().unwrap_or(0),
        ))
    };

    assert_eq!(
        map.merge(Value::from("a"), Value::from(5), add).unwrap(),
        Some(Value::from(6))
    );
    assert_eq!(
        map.merge(Value::from("n"), Value::from(1), add).unwrap(),
        Some(Value::from(1))
    );
    assert!(map.merge(Value::from("m"), Value::from("x"), add).is_err());
    assert_eq!(
        map.merge(Value::from("n"), Value::from(1), |_, _| None).unwrap(),
        None
    );
    assert!(!map.contains_key(&Value::from("n")));
}

#[test]
fn test_remove_and_remove_value() {
    let mut map = scores();

    assert!(!map.remove_value(&Value::from("a"), &Value::from(99)));
    assert!(map.remove_value(&Value::from("a"), &Value::from(1)));
    assert_eq!(map.remove(&Value::from("b")), Some(Value::from(2)));
    assert_eq!(map.remove(&Value::from("b")), None);
    assert!(map.key_constraint().is_unset());
}

#[test]
fn test_declared_map_resets_to_declaration() {
    let mut map = MutableMap::variant(ClassId::STR, ClassId::INT).empty();
    assert!(map.put(Value::from("a"), Value::from("x")).is_err());

    map.put(Value::from("a"), Value::from(1)).unwrap();
    map.clear();
    assert_eq!(map.value_type(), Some(ElementType::Class(ClassId::INT)));
    assert_eq!(map.type_name(), "MutableMap[str, int]");
}

#[test]
fn test_conversions_round_trip() {
    let map = Map::of_type(ClassId::STR, ClassId::INT, []).unwrap();
    let mutable = map.to_mutable_map();

    assert_eq!(mutable.type_name(), "MutableMap[str, int]");
    let back = mutable.to_map();
    assert_eq!(back.variant_id(), map.variant_id());
    assert_eq!(back.key_constraint(), map.key_constraint());
    assert_eq!(back.value_constraint(), map.value_constraint());
}

#[test]
fn test_plus_on_mutable_map_reports_mutable_kind() {
    let map = scores();

    let err = map.plus(Value::from("c"), Value::from("three")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot add element of type 'str' to MutableMap value[int]"
    );
    let err = map.plus_all([(Value::from(3), Value::from(3))]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot add element of type 'int' to MutableMap key[str]"
    );
    assert_eq!(map.plus(Value::from("c"), Value::from(3)).unwrap().len(), 3);
    assert_eq!(map.len(), 2);
}
