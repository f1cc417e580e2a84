//! Multilevel – a lightweight implementation of multi-level modeling built
//! around the *clabject* concept.
//!
//! A clabject is an entity that is simultaneously a class and an instance:
//! * A [`construct::Clabject`] sits at a classification depth (0 at the root,
//!   +1 per instantiation step) and can itself be instantiated, unless it was
//!   declared as a terminal instance at creation time.
//! * A [`constraint::PropDef`] is declared once and inherited downward; its
//!   target depth states where the property must receive a concrete value
//!   (it is "potential" above that depth and "actualized" at it).
//! * A [`constraint::Constraint`] is a named predicate that any assigned
//!   value must satisfy, checked at assignment time.
//! * A [`constraint::CollectionDescription`] marks a property as a sequence
//!   with cardinality bounds and a per-element constraint.
//!
//! Clabjects are owned and shared through `Arc` by a keeper inside the
//! [`construct::Hierarchy`], which also maintains lookup indexes by name and
//! depth. Each hierarchy is an independent object graph with no process-wide
//! state; structural mutation is serialized through its mutexes and assigned
//! values are immutable once a clabject has been published.
//!
//! ## Modules
//! * [`construct`] – Clabjects, their keeper and lookups, and the hierarchy.
//! * [`constraint`] – Property definitions, constraints and collections.
//! * [`datatype`] – The dynamically typed [`datatype::Value`].
//! * [`error`] – The error taxonomy; every violation surfaces immediately.
//! * [`settings`] – Explicit configuration loading for hosts.
//! * [`animals`] – The Tom and Jerry sample hierarchy.
//!
//! ## Quick Start
//! ```
//! use std::collections::HashMap;
//! use multilevel::construct::{Hierarchy, PropertyState};
//! use multilevel::constraint::{Constraint, PropDef};
//! use multilevel::datatype::Value;
//!
//! let hierarchy = Hierarchy::new();
//! let animal = hierarchy.create_root("Animal").unwrap();
//! hierarchy
//!     .define_properties(
//!         &animal,
//!         vec![PropDef::new("species", 1).constrained(Constraint::is_str())],
//!     )
//!     .unwrap();
//! let cat = hierarchy
//!     .instantiate(
//!         &animal,
//!         "Cat",
//!         HashMap::from([(String::from("species"), Value::from("cat"))]),
//!         false,
//!     )
//!     .unwrap();
//! assert_eq!(
//!     cat.property("species").unwrap(),
//!     PropertyState::Assigned(Value::from("cat"))
//! );
//! ```

pub mod animals;
pub mod constraint;
pub mod construct;
pub mod datatype;
pub mod error;
pub mod settings;
