use super::*;
use kotc_solver::{ClassId, ContainerKind, ElementType};

fn numbers() -> List {
    List::new((1..=6).map(Value::from)).unwrap()
}

fn parity(value: &Value) -> Value {
    Value::from(value.as_int().unwrap_or(0) % 2)
}

fn sum(a: &Value, b: &Value) -> Value {
    Value::from(a.as_int().unwrap_or(0) + b.as_int().unwrap_or(0))
}

#[test]
fn test_grouping_keys_in_first_seen_order() {
    let grouping = numbers().grouping_by(parity);
    assert_eq!(grouping.len(), 2);
    let keys: Vec<&Value> = grouping.keys().collect();
    assert_eq!(keys, vec![&Value::from(1), &Value::from(0)]);
}

#[test]
fn test_each_count() {
    let counts = numbers()
        .grouping_by(|v| Value::from(v.as_int().unwrap_or(0) > 4))
        .each_count()
        .unwrap();

    assert_eq!(counts.get(&Value::from(false)), Some(&Value::from(4)));
    assert_eq!(counts.get(&Value::from(true)), Some(&Value::from(2)));
    assert_eq!(counts.value_type(), Some(ElementType::Class(ClassId::INT)));
}

#[test]
fn test_fold_sees_every_element() {
    let totals = numbers()
        .grouping_by(parity)
        .fold(|_, _| Value::from(0), |_, acc, item| sum(&acc, item))
        .unwrap();

    assert_eq!(totals.get(&Value::from(0)), Some(&Value::from(12)));
    assert_eq!(totals.get(&Value::from(1)), Some(&Value::from(9)));
}

#[test]
fn test_reduce_starts_from_first_element() {
    let totals = numbers()
        .grouping_by(parity)
        .reduce(|_, acc, item| sum(&acc, item))
        .unwrap();

    assert_eq!(totals.get(&Value::from(0)), Some(&Value::from(12)));
    assert_eq!(totals.get(&Value::from(1)), Some(&Value::from(9)));
}

#[test]
fn test_aggregate_flags_first_element() {
    let words = List::new(
        ["apple", "apricot", "banana"]
            .into_iter()
            .map(Value::from),
    )
    .unwrap();

    let joined = words
        .grouping_by(|w| Value::from(w.as_str().and_then(|s| s.get(..1)).unwrap_or("")))
        .aggregate(|_, acc, item, first| match (acc, first) {
            (Some(acc), false) => Value::from(format!("{acc},{item}")),
            _ => item.clone(),
        })
        .unwrap();

    assert_eq!(joined.get(&Value::from("a")), Some(&Value::from("apple,apricot")));
    assert_eq!(joined.get(&Value::from("b")), Some(&Value::from("banana")));
}

#[test]
fn test_aggregation_results_must_be_homogeneous() {
    let err = numbers()
        .grouping_by(parity)
        .reduce(|key, acc, item| {
            if key.as_int() == Some(0) {
                Value::from("even")
            } else {
                sum(&acc, item)
            }
        })
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot add element of type 'str' to Map value[int]"
    );
}

#[test]
fn test_group_values_are_lists() {
    let groups = numbers().group_by(parity).unwrap();
    assert_eq!(
        groups.value_type(),
        Some(ElementType::Collection(ContainerKind::List))
    );
    let evens = groups.get(&Value::from(0)).and_then(Value::as_list).unwrap();
    assert_eq!(evens.len(), 3);
}
