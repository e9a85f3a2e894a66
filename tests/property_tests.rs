//! Property tests for the container type lifecycle.
//!
//! 1. Every stored element satisfies its container's constraint
//! 2. The first element wins: `[A, B]` binds to A, `[B, A]` is rejected
//! 3. A bound supertype accepts its subclasses and nothing unrelated
//! 4. Emptying a mutable container frees its type
//! 5. Kind conversions round-trip the constraint
//! 6. A rejected insertion leaves the container untouched

use kotc::{
    ClassId, ElementType, List, Map, MutableList, MutableMap, MutableSet, RuntimeTyped,
    TypeConstraint, Value, is_valid, registry,
};
use proptest::prelude::*;

#[derive(Clone, Copy)]
struct Zoo {
    animal: ClassId,
    dog: ClassId,
    cat: ClassId,
    rock: ClassId,
}

fn zoo() -> Zoo {
    let registry = registry();
    let animal = registry.define("Animal", &[]).unwrap();
    Zoo {
        animal,
        dog: registry.define("Dog", &[animal]).unwrap(),
        cat: registry.define("Cat", &[animal]).unwrap(),
        rock: registry.define("Rock", &[]).unwrap(),
    }
}

/// A generated element, turned into a `Value` once the classes exist.
#[derive(Clone, Debug)]
enum Sample {
    Int(i64),
    Bool(bool),
    Float(f64),
    Str(String),
    Animal,
    Dog,
    Cat,
    Rock,
}

impl Sample {
    fn value(&self, zoo: Zoo) -> Value {
        match self {
            Sample::Int(n) => Value::from(*n),
            Sample::Bool(b) => Value::from(*b),
            Sample::Float(x) => Value::from(*x),
            Sample::Str(s) => Value::from(s.as_str()),
            Sample::Animal => Value::object(zoo.animal, []),
            Sample::Dog => Value::object(zoo.dog, []),
            Sample::Cat => Value::object(zoo.cat, []),
            Sample::Rock => Value::object(zoo.rock, []),
        }
    }

    fn is_animal(&self) -> bool {
        matches!(self, Sample::Animal | Sample::Dog | Sample::Cat)
    }
}

fn arb_sample() -> impl Strategy<Value = Sample> {
    prop_oneof![
        any::<i64>().prop_map(Sample::Int),
        any::<bool>().prop_map(Sample::Bool),
        any::<f64>().prop_map(Sample::Float),
        "[a-z]{0,6}".prop_map(Sample::Str),
        Just(Sample::Animal),
        Just(Sample::Dog),
        Just(Sample::Cat),
        Just(Sample::Rock),
    ]
}

#[derive(Clone, Debug)]
enum Edit {
    Add(Sample),
    AddAll(Vec<Sample>),
    Set(prop::sample::Index, Sample),
    RemoveFirst,
    Clear,
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => arb_sample().prop_map(Edit::Add),
        2 => prop::collection::vec(arb_sample(), 0..4).prop_map(Edit::AddAll),
        1 => (any::<prop::sample::Index>(), arb_sample()).prop_map(|(i, s)| Edit::Set(i, s)),
        2 => Just(Edit::RemoveFirst),
        1 => Just(Edit::Clear),
    ]
}

fn apply(list: &mut MutableList, edit: &Edit, zoo: Zoo) {
    // Rejections are expected; the invariant must hold either way.
    match edit {
        Edit::Add(sample) => {
            let _ = list.add(sample.value(zoo));
        }
        Edit::AddAll(samples) => {
            let _ = list.add_all(samples.iter().map(|s| s.value(zoo)));
        }
        Edit::Set(index, sample) => {
            if !list.is_empty() {
                let _ = list.set(index.index(list.len()), sample.value(zoo));
            }
        }
        Edit::RemoveFirst => {
            let _ = list.remove_first_or_none();
        }
        Edit::Clear => list.clear(),
    }
}

fn all_valid<'a>(items: impl IntoIterator<Item = &'a Value>, constraint: &TypeConstraint) -> bool {
    items
        .into_iter()
        .all(|item| is_valid(&item.runtime_type(), constraint))
}

proptest! {
    #[test]
    fn stored_elements_satisfy_constraint(edits in prop::collection::vec(arb_edit(), 0..40)) {
        let zoo = zoo();
        let mut list = MutableList::empty();
        for edit in &edits {
            apply(&mut list, edit, zoo);
            prop_assert!(all_valid(&list, list.constraint()));
            prop_assert_eq!(list.is_empty(), list.constraint().is_unset());
        }
    }

    #[test]
    fn declared_list_stays_bound(edits in prop::collection::vec(arb_edit(), 0..40)) {
        let zoo = zoo();
        let mut list = MutableList::variant(zoo.animal).empty();
        for edit in &edits {
            apply(&mut list, edit, zoo);
            prop_assert!(!list.constraint().is_unset());
            prop_assert!(all_valid(&list, list.constraint()));
        }
    }

    #[test]
    fn first_element_wins(base in any::<i64>(), flag in any::<bool>()) {
        let zoo = zoo();

        let animals = List::new([Sample::Animal.value(zoo), Sample::Dog.value(zoo)]);
        prop_assert!(animals.is_ok());
        prop_assert!(List::new([Sample::Dog.value(zoo), Sample::Animal.value(zoo)]).is_err());

        let ints = List::new([Value::from(base), Value::from(flag)]).unwrap();
        prop_assert_eq!(ints.element_type(), Some(ElementType::Class(ClassId::INT)));
        prop_assert!(List::new([Value::from(flag), Value::from(base)]).is_err());
    }

    #[test]
    fn bound_supertype_accepts_subclasses(sample in arb_sample()) {
        let zoo = zoo();
        let mut list = MutableList::variant(zoo.animal).empty();
        let accepted = list.add(sample.value(zoo)).is_ok();
        prop_assert_eq!(accepted, sample.is_animal());
    }

    #[test]
    fn emptied_containers_accept_any_type(
        items in prop::collection::vec(any::<i64>(), 1..20),
        word in "[a-z]{1,8}",
    ) {
        let mut list = MutableList::new(items.iter().copied().map(Value::from)).unwrap();
        while list.remove_first_or_none().is_some() {}
        prop_assert!(list.add(Value::from(word.as_str())).is_ok());

        let mut set = MutableSet::new(items.iter().copied().map(Value::from)).unwrap();
        let members: Vec<Value> = set.iter().cloned().collect();
        for member in &members {
            set.remove(member);
        }
        prop_assert!(set.add(Value::from(word.as_str())).unwrap());

        let mut map = MutableMap::new(
            items.iter().map(|&n| (Value::from(n), Value::from(n))),
        ).unwrap();
        let keys: Vec<Value> = map.keys().iter().cloned().collect();
        for key in &keys {
            map.remove(key);
        }
        prop_assert!(map.put(Value::from(word.as_str()), Value::from(word.as_str())).is_ok());
    }

    #[test]
    fn conversions_round_trip(samples in prop::collection::vec(arb_sample(), 0..8)) {
        let zoo = zoo();
        let Ok(list) = List::new(samples.iter().map(|s| s.value(zoo))) else {
            return Ok(());
        };
        let via_set = list.to_set().to_list();
        let via_mutable_list = list.to_mutable_list().to_list();
        let via_mutable_set = list.to_mutable_set().to_list();
        prop_assert_eq!(via_set.constraint(), list.constraint());
        prop_assert_eq!(via_mutable_list.constraint(), list.constraint());
        prop_assert_eq!(via_mutable_set.constraint(), list.constraint());

        let map = Map::new(list.iter().map(|v| (v.clone(), v.clone()))).unwrap();
        let back = map.to_mutable_map().to_map();
        prop_assert_eq!(back.key_constraint(), map.key_constraint());
        prop_assert_eq!(back.value_constraint(), map.value_constraint());
    }

    #[test]
    fn declared_conversions_round_trip(samples in prop::collection::vec(arb_sample(), 0..8)) {
        let zoo = zoo();
        let animals: Vec<Value> = samples
            .iter()
            .filter(|s| s.is_animal())
            .map(|s| s.value(zoo))
            .collect();
        let list = List::of_type(zoo.animal, animals).unwrap();

        let back = list.to_mutable_set().to_set().to_list();
        prop_assert_eq!(back.variant_id(), list.variant_id());
        prop_assert_eq!(back.constraint(), list.constraint());
        prop_assert_eq!(back.type_name(), "List[Animal]");
    }

    #[test]
    fn rejected_insertion_is_atomic(
        items in prop::collection::vec(any::<i64>(), 0..10),
        batch in prop::collection::vec(any::<i64>(), 0..5),
        at in any::<prop::sample::Index>(),
    ) {
        let mut list = MutableList::of_type(
            ClassId::INT,
            items.iter().copied().map(Value::from),
        ).unwrap();
        let before = list.clone();

        prop_assert!(list.add(Value::from("bad")).is_err());
        prop_assert_eq!(&list, &before);

        let mut values: Vec<Value> = batch.iter().copied().map(Value::from).collect();
        values.insert(at.index(values.len() + 1), Value::from("bad"));
        prop_assert!(list.add_all(values.clone()).is_err());
        prop_assert_eq!(&list, &before);

        let index = at.index(list.len() + 1);
        prop_assert!(list.add_all_at(index, values).is_err());
        prop_assert_eq!(&list, &before);
        prop_assert_eq!(list.constraint(), before.constraint());
    }
}
