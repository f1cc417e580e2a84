use std::collections::HashMap;

use multilevel::animals::{create_jerry, create_tom, define_animal};
use multilevel::construct::{Hierarchy, PropertyState};
use multilevel::datatype::Value;
use multilevel::error::MultilevelError;

#[test]
fn animal_has_prop_is_animal() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    assert!(animal.is_defined("is_animal"));
}

#[test]
fn animal_is_animal_is_assigned_to_true() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    assert_eq!(
        animal.property("is_animal").unwrap(),
        PropertyState::Assigned(Value::from(true))
    );
}

#[test]
fn animal_is_animal_only_accepts_booleans() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    let err = hierarchy
        .instantiate(
            &animal,
            "Robot",
            HashMap::from([
                (String::from("species"), Value::from("robot")),
                (String::from("is_animal"), Value::from("no")),
            ]),
            false,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        MultilevelError::ConstraintViolation { constraint, .. } if constraint == "is_bool"
    ));
}

#[test]
fn tom_props() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    let tom = create_tom(&hierarchy, &animal).unwrap();
    assert_eq!(
        tom.property("name").unwrap(),
        PropertyState::Assigned(Value::from("tom"))
    );
    assert_eq!(
        tom.property("species").unwrap(),
        PropertyState::Assigned(Value::from("cat"))
    );
    assert_eq!(
        tom.property("traits").unwrap(),
        PropertyState::Assigned(Value::from(vec!["lazy", "food loving"]))
    );
    assert_eq!(
        tom.property("is_animal").unwrap(),
        PropertyState::Assigned(Value::from(true))
    );
}

#[test]
fn jerry_props() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    let jerry = create_jerry(&hierarchy, &animal).unwrap();
    assert_eq!(
        jerry.property("name").unwrap(),
        PropertyState::Assigned(Value::from("jerry"))
    );
    assert_eq!(
        jerry.property("species").unwrap(),
        PropertyState::Assigned(Value::from("mouse"))
    );
    assert_eq!(
        jerry.property("traits").unwrap(),
        PropertyState::Assigned(Value::from(vec!["mischievous", "master mind"]))
    );
}

#[test]
fn jerry_is_instance() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    let jerry = create_jerry(&hierarchy, &animal).unwrap();
    assert!(jerry.declared_as_instance());
    // a clabject declared as an instance should not be instantiable any further
    let err = hierarchy
        .instantiate(&jerry, "further_clab", HashMap::new(), false)
        .unwrap_err();
    assert!(matches!(
        err,
        MultilevelError::ClabjectDeclaredAsInstance { .. }
    ));
}

#[test]
fn tom_cannot_be_instantiated_with_any_inputs() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    let tom = create_tom(&hierarchy, &animal).unwrap();
    let attempts = vec![
        ("x", HashMap::new(), false),
        ("x", HashMap::new(), true),
        (
            "kitten",
            HashMap::from([(String::from("name"), Value::from("kitten"))]),
            true,
        ),
    ];
    for (name, init_values, declare) in attempts {
        let err = hierarchy
            .instantiate(&tom, name, init_values, declare)
            .unwrap_err();
        assert!(
            matches!(err, MultilevelError::ClabjectDeclaredAsInstance { .. }),
            "instantiating tom must always fail, got {err}"
        );
    }
}

#[test]
fn hierarchy_depths_and_parents() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    let tom = create_tom(&hierarchy, &animal).unwrap();
    assert_eq!(animal.depth(), 0);
    assert_eq!(tom.depth(), 2);
    let cat = tom.parent().unwrap();
    assert_eq!(cat.name(), "Cat");
    assert_eq!(cat.depth(), 1);
    assert_eq!(cat.parent().unwrap().name(), "Animal");
    assert!(animal.parent().is_none());
}

#[test]
fn reading_a_property_twice_returns_the_same_value() {
    let hierarchy = Hierarchy::new();
    let animal = define_animal(&hierarchy).unwrap();
    let tom = create_tom(&hierarchy, &animal).unwrap();
    let first = tom.property("traits").unwrap();
    let second = tom.property("traits").unwrap();
    assert_eq!(first, second);
}
