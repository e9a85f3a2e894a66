//! How derived containers inherit, or re-infer, their element types.

use kotc::{ClassId, ElementType, List, Map, MutableList, MutableMap, Set, TypeConstraint, Value};

fn ints(values: &[i64]) -> List {
    List::new(values.iter().copied().map(Value::from)).unwrap()
}

fn int_bound() -> TypeConstraint {
    TypeConstraint::Bound(ElementType::Class(ClassId::INT))
}

#[test]
fn test_structural_derivations_keep_the_slot() {
    let list = ints(&[3, 1, 2, 3]);

    let derived = [
        list.filter(|v| v.as_int() > Some(1)),
        list.filter_not(|_| true),
        list.take(2),
        list.drop(10),
        list.reversed(),
        list.sorted_by_key(|v| v.as_int()),
        list.sorted_with(|a, b| b.as_int().cmp(&a.as_int())),
        list.distinct(),
    ];
    for result in &derived {
        assert_eq!(result.constraint(), &int_bound());
    }
    assert!(derived[1].plus(Value::from("x")).is_err());
}

#[test]
fn test_structural_derivations_keep_unset() {
    let empty = List::empty();
    let filtered = empty.filter(|_| true).reversed().take(3);
    assert!(filtered.constraint().is_unset());
    assert!(filtered.plus(Value::from("anything")).is_ok());
}

#[test]
fn test_declared_variant_survives_filtering() {
    let list = List::of_type(ClassId::INT, [Value::from(1)]).unwrap();
    let none = list.filter(|_| false);

    assert!(none.is_empty());
    assert_eq!(none.type_name(), "List[int]");
    assert_eq!(none.variant_id(), list.variant_id());
}

#[test]
fn test_mapping_infers_fresh() {
    let list = ints(&[1, 2]);

    let strings = list.map(|v| Value::from(format!("n{v}"))).unwrap();
    assert_eq!(strings.element_type(), Some(ElementType::Class(ClassId::STR)));

    let nothing = list.filter(|_| false).map(|v| v.clone()).unwrap();
    assert!(nothing.constraint().is_unset());

    let mixed = list.map(|v| match v.as_int() {
        Some(1) => Value::from(1),
        _ => Value::from("two"),
    });
    assert_eq!(
        mixed.unwrap_err().to_string(),
        "Cannot add element of type 'str' to List[int]"
    );
}

#[test]
fn test_flat_map_infers_from_first_produced() {
    let list = ints(&[1, 2]);
    let doubled = list
        .flat_map(|v| [Value::from(v.to_string()), Value::from("!")])
        .unwrap();
    assert_eq!(doubled.len(), 4);
    assert_eq!(doubled.element_type(), Some(ElementType::Class(ClassId::STR)));
}

#[test]
fn test_grouping_builds_independent_lists() {
    let words = List::new(["ant", "bee", "cat", "ape"].map(Value::from)).unwrap();
    let by_letter = words
        .group_by(|w| Value::from(w.as_str().and_then(|s| s.get(..1)).unwrap_or("")))
        .unwrap();

    assert_eq!(by_letter.key_type(), Some(ElementType::Class(ClassId::STR)));
    let a = by_letter.get(&Value::from("a")).and_then(Value::as_list).unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a.element_type(), Some(ElementType::Class(ClassId::STR)));
    assert_eq!(a.variant_id(), None);
}

#[test]
fn test_associate_infers_both_sides() {
    let list = ints(&[1, 2]);

    let squares = list
        .associate_with(|v| Value::from(v.as_int().unwrap_or(0).pow(2)))
        .unwrap();
    assert_eq!(squares.key_type(), Some(ElementType::Class(ClassId::INT)));
    assert_eq!(squares.get(&Value::from(2)), Some(&Value::from(4)));

    let labels = list.associate_by(|v| Value::from(format!("k{v}"))).unwrap();
    assert_eq!(labels.key_type(), Some(ElementType::Class(ClassId::STR)));
    assert_eq!(labels.value_type(), Some(ElementType::Class(ClassId::INT)));

    let pairs = list
        .associate(|v| (v.clone(), Value::from(v.as_int() == Some(1))))
        .unwrap();
    assert_eq!(pairs.value_type(), Some(ElementType::Class(ClassId::BOOL)));
}

#[test]
fn test_conversions_keep_the_slot() {
    let list = ints(&[1, 2, 2]);

    assert_eq!(list.to_set().constraint(), &int_bound());
    assert_eq!(list.to_mutable_list().constraint(), &int_bound());
    assert_eq!(list.to_mutable_set().constraint(), &int_bound());
    assert_eq!(list.to_set().to_list().constraint(), &int_bound());

    let mut mutable = list.to_mutable_list();
    assert!(mutable.add(Value::from("x")).is_err());
    assert_eq!(mutable.to_list().constraint(), &int_bound());
}

#[test]
fn test_conversions_keep_unset() {
    let empty = MutableList::empty();
    assert!(empty.to_list().to_set().constraint().is_unset());
    assert!(Set::empty().to_mutable_set().constraint().is_unset());
    assert!(
        MutableMap::empty()
            .to_map()
            .keys()
            .constraint()
            .is_unset()
    );
}

#[test]
fn test_map_views_keep_their_side() {
    let map = Map::new([(Value::from("a"), Value::from(1))]).unwrap();

    let keys = map.keys();
    let values = map.values();
    assert_eq!(keys.constraint(), map.key_constraint());
    assert_eq!(values.constraint(), map.value_constraint());

    assert!(keys.plus(Value::from(1)).is_err());
    assert!(values.plus(Value::from("b")).is_err());

    let empty = map.filter(|_, _| false);
    assert_eq!(empty.keys().constraint(), map.key_constraint());
}

#[test]
fn test_set_algebra_infers_fresh() {
    let numbers = Set::new([1, 2].map(Value::from)).unwrap();
    let strings = Set::new(["a"].map(Value::from)).unwrap();

    let disjoint = numbers.intersect(&strings).unwrap();
    assert!(disjoint.is_empty());
    assert!(disjoint.constraint().is_unset());

    let list = numbers.to_list();
    let union = list.union(&Set::new([3].map(Value::from)).unwrap()).unwrap();
    assert_eq!(union.len(), 3);
    assert!(numbers.union(&strings).is_err());
}

#[test]
fn test_plus_validates_against_source() {
    let list = ints(&[1]);
    assert_eq!(list.plus_all([Value::from(2), Value::from(true)]).unwrap().len(), 3);
    assert!(list.plus_all([Value::from(2), Value::from(2.0)]).is_err());
    assert_eq!(list.len(), 1);

    let empty = List::empty();
    let strings = empty.plus(Value::from("first")).unwrap();
    assert_eq!(strings.element_type(), Some(ElementType::Class(ClassId::STR)));
}
