//! The animal sample hierarchy, with the cartoon characters Tom and Jerry as
//! terminal instances.
//!
//! `Animal` sits at depth 0 and declares four properties instantiated down
//! the classification hierarchy: `is_animal` defaults to true everywhere,
//! `species` is actualized one step down (on `Cat` and `Mouse`), while `name`
//! and `traits` are actualized two steps down, on the characters themselves.

use std::collections::HashMap;
use std::sync::Arc;

use crate::constraint::{Constraint, PropDef};
use crate::construct::{Clabject, Hierarchy};
use crate::datatype::Value;
use crate::error::Result;

/// Builds the `Animal` root clabject, the top of the classification hierarchy.
pub fn define_animal(hierarchy: &Hierarchy) -> Result<Arc<Clabject>> {
    let animal = hierarchy.create_root("Animal")?;
    hierarchy.define_properties(
        &animal,
        vec![
            PropDef::new("is_animal", 0)
                .constrained(Constraint::is_bool())
                .defaulted(true),
            PropDef::new("species", 1).constrained(Constraint::is_str()),
            PropDef::new("name", 2).constrained(Constraint::is_str()),
            PropDef::new("traits", 2).collection(1, 3, Constraint::is_str()),
        ],
    )?;
    Ok(animal)
}

/// Creates a clabject representing the cartoon character Tom, declared as an
/// instance of a `Cat` clabject instantiated from the given `Animal` root.
pub fn create_tom(hierarchy: &Hierarchy, animal: &Arc<Clabject>) -> Result<Arc<Clabject>> {
    let cat = hierarchy.instantiate(
        animal,
        "Cat",
        HashMap::from([(String::from("species"), Value::from("cat"))]),
        false,
    )?;
    hierarchy.instantiate(
        &cat,
        "tom",
        HashMap::from([
            (String::from("name"), Value::from("tom")),
            (String::from("traits"), Value::from(vec!["lazy", "food loving"])),
        ]),
        true,
    )
}

/// Creates a clabject representing the cartoon character Jerry, declared as
/// an instance of a `Mouse` clabject instantiated from the given `Animal` root.
pub fn create_jerry(hierarchy: &Hierarchy, animal: &Arc<Clabject>) -> Result<Arc<Clabject>> {
    let mouse = hierarchy.instantiate(
        animal,
        "Mouse",
        HashMap::from([(String::from("species"), Value::from("mouse"))]),
        false,
    )?;
    hierarchy.instantiate(
        &mouse,
        "jerry",
        HashMap::from([
            (String::from("name"), Value::from("jerry")),
            (
                String::from("traits"),
                Value::from(vec!["mischievous", "master mind"]),
            ),
        ]),
        true,
    )
}
