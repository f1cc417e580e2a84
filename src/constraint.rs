//! Property definitions and the constraints that guard their values.
//!
//! A [`PropDef`] is declared once on a clabject and inherited downward until
//! its target depth is reached. [`Constraint`]s are named predicates over
//! [`Value`]; a definition carries an ordered sequence of them and all must
//! pass for any assigned value (implicit AND). A [`CollectionDescription`]
//! marks a property as a sequence with cardinality bounds whose elements must
//! individually satisfy an element constraint.

use std::fmt;
use std::sync::Arc;

use crate::datatype::Value;
use crate::error::{MultilevelError, Result};

// ------------- Constraint -------------
/// A named validation predicate applied to values at assignment time.
#[derive(Clone)]
pub struct Constraint {
    name: &'static str,
    check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Constraint {
    pub fn new(name: &'static str, check: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name,
            check: Arc::new(check),
        }
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn check(&self, value: &Value) -> bool {
        (self.check)(value)
    }
    // the built-in constraints, named after the shapes they demand
    pub fn is_str() -> Self {
        Self::new("is_str", |v| matches!(v, Value::String(_)))
    }
    pub fn is_bool() -> Self {
        Self::new("is_bool", |v| matches!(v, Value::Bool(_)))
    }
    pub fn is_int() -> Self {
        Self::new("is_int", |v| matches!(v, Value::Int(_)))
    }
    pub fn non_empty_str() -> Self {
        Self::new("non_empty_str", |v| {
            matches!(v, Value::String(s) if !s.is_empty())
        })
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Constraint({})", self.name)
    }
}
impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ------------- Levels -------------
/// The depths at which a property remains visible and settable.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Levels {
    /// Visible at every depth below its declaration ("*").
    All,
    /// Visible only at the given depths.
    Only(Vec<u32>),
}

impl Levels {
    pub fn covers(&self, depth: u32) -> bool {
        match self {
            Levels::All => true,
            Levels::Only(depths) => depths.contains(&depth),
        }
    }
}

impl fmt::Display for Levels {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Levels::All => write!(f, "*"),
            Levels::Only(depths) => {
                let mut s = String::new();
                for d in depths {
                    s += &(d.to_string() + ",");
                }
                s.pop();
                write!(f, "{}", s)
            }
        }
    }
}

// ------------- CollectionDescription -------------
/// Marks a property as a sequence with cardinality bounds, each element of
/// which must satisfy the element constraint on its own.
#[derive(Clone, Debug)]
pub struct CollectionDescription {
    min: usize,
    max: usize,
    element: Constraint,
}

impl CollectionDescription {
    pub fn new(min: usize, max: usize, element: Constraint) -> Self {
        Self { min, max, element }
    }
    pub fn min(&self) -> usize {
        self.min
    }
    pub fn max(&self) -> usize {
        self.max
    }
    pub fn element(&self) -> &Constraint {
        &self.element
    }
}

// ------------- PropDef -------------
/// A property definition, declared on one clabject and inherited by its
/// descendants. The target depth is the absolute depth at which the property
/// is actualized, i.e. must hold a concrete value; above it the property is
/// merely potential.
#[derive(Clone, Debug)]
pub struct PropDef {
    name: String,
    target_depth: u32,
    levels: Levels,
    default: Option<Value>,
    constraints: Vec<Constraint>,
    collection: Option<CollectionDescription>,
}

impl PropDef {
    pub fn new(name: &str, target_depth: u32) -> Self {
        Self {
            name: String::from(name),
            target_depth,
            levels: Levels::All,
            default: None,
            constraints: Vec::new(),
            collection: None,
        }
    }
    pub fn at_levels(mut self, levels: Levels) -> Self {
        self.levels = levels;
        self
    }
    pub fn constrained(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
    pub fn defaulted(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
    pub fn collection(mut self, min: usize, max: usize, element: Constraint) -> Self {
        self.collection = Some(CollectionDescription::new(min, max, element));
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn target_depth(&self) -> u32 {
        self.target_depth
    }
    pub fn levels(&self) -> &Levels {
        &self.levels
    }
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
    pub fn collection_description(&self) -> Option<&CollectionDescription> {
        self.collection.as_ref()
    }
    /// Runs the declared constraints in order against a candidate value,
    /// then the collection description when one is present. The first
    /// failure is reported, naming the property, value and constraint.
    pub fn validate(&self, value: &Value) -> Result<()> {
        for constraint in &self.constraints {
            if !constraint.check(value) {
                return Err(self.violation(value, constraint.name().to_owned()));
            }
        }
        if let Some(collection) = &self.collection {
            let Some(elements) = value.as_list() else {
                return Err(self.violation(value, String::from("is_list")));
            };
            if elements.len() < collection.min() || elements.len() > collection.max() {
                return Err(self.violation(
                    value,
                    format!("cardinality {}..={}", collection.min(), collection.max()),
                ));
            }
            for element in elements {
                if !collection.element().check(element) {
                    return Err(self.violation(element, collection.element().name().to_owned()));
                }
            }
        }
        Ok(())
    }
    fn violation(&self, value: &Value, constraint: String) -> MultilevelError {
        MultilevelError::ConstraintViolation {
            property: self.name.clone(),
            value: value.to_string() + "::<" + value.data_type() + ">",
            constraint,
        }
    }
}

impl fmt::Display for PropDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} @ {} [{}]", self.name, self.target_depth, self.levels)
    }
}
