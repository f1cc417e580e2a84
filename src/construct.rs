use std::sync::{Arc, Mutex};

// keepers and lookups use HashMap/HashSet with a fast non-cryptographic hasher
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hash, Hasher};

// custom made ordering for clabjects
use std::cmp::Ordering;

// used to print out readable forms of a construct
use std::fmt;

use tracing::debug;

// our own stuff that we need
use crate::constraint::PropDef;
use crate::datatype::Value;
use crate::error::{MultilevelError, Result};

// ------------- ClabjectId -------------
pub type ClabjectId = u64;

pub type IdHasher = BuildHasherDefault<SeaHasher>;
pub type OtherHasher = BuildHasherDefault<SeaHasher>;

pub const GENESIS: ClabjectId = 0;

// Ids are only ever created internally, one per kept clabject, so a plain
// counter suffices.
#[derive(Debug)]
pub struct ClabjectGenerator {
    lower_bound: ClabjectId,
}

impl ClabjectGenerator {
    pub fn new() -> Self {
        Self {
            lower_bound: GENESIS,
        }
    }
    pub fn generate(&mut self) -> ClabjectId {
        self.lower_bound += 1;
        self.lower_bound
    }
}

// ------------- PropertyState -------------
/// Outcome of reading a property that is defined at the reader's depth.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum PropertyState {
    /// The property holds a concrete, constraint-satisfying value.
    Assigned(Value),
    /// The property is defined here, but its target depth lies further down
    /// the hierarchy, so it is not yet required to hold a value.
    Potential,
}

impl fmt::Display for PropertyState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PropertyState::Assigned(value) => write!(f, "{}", value),
            PropertyState::Potential => write!(f, "<potential>"),
        }
    }
}

// ------------- Clabject -------------
#[derive(Debug)]
struct ClabjectState {
    // every ancestor-declared definition plus the ones declared here;
    // visibility at this depth is decided on access via Levels::covers
    props: HashMap<String, Arc<PropDef>, OtherHasher>,
    values: HashMap<String, Value, OtherHasher>,
}

/// A node in a classification hierarchy that is both a type (it can be
/// instantiated) and an instance (of its parent).
///
/// A clabject created with `declare_as_instance = true` is terminal: the
/// hierarchy below it is permanently closed. Assigned values never change
/// after the constructing call returns, so reads are safe to share freely.
#[derive(Debug)]
pub struct Clabject {
    clabject: ClabjectId,
    name: String,
    depth: u32,
    declared_as_instance: bool,
    parent: Option<Arc<Clabject>>,
    state: Mutex<ClabjectState>,
}

impl Clabject {
    fn new(
        clabject: ClabjectId,
        name: String,
        depth: u32,
        declared_as_instance: bool,
        parent: Option<Arc<Clabject>>,
        props: HashMap<String, Arc<PropDef>, OtherHasher>,
        values: HashMap<String, Value, OtherHasher>,
    ) -> Self {
        Self {
            clabject,
            name,
            depth,
            declared_as_instance,
            parent,
            state: Mutex::new(ClabjectState { props, values }),
        }
    }
    pub fn clabject(&self) -> ClabjectId {
        self.clabject
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn depth(&self) -> u32 {
        self.depth
    }
    pub fn declared_as_instance(&self) -> bool {
        self.declared_as_instance
    }
    pub fn parent(&self) -> Option<Arc<Clabject>> {
        self.parent.as_ref().map(Arc::clone)
    }
    /// The definitions visible at this clabject's depth, own and inherited.
    pub fn properties(&self) -> Vec<Arc<PropDef>> {
        let state = self.state.lock().unwrap();
        let mut props: Vec<Arc<PropDef>> = state
            .props
            .values()
            .filter(|def| def.levels().covers(self.depth))
            .map(Arc::clone)
            .collect();
        props.sort_by(|a, b| a.name().cmp(b.name()));
        props
    }
    pub fn is_defined(&self, name: &str) -> bool {
        let state = self.state.lock().unwrap();
        state
            .props
            .get(name)
            .is_some_and(|def| def.levels().covers(self.depth))
    }
    /// Reads a property by name.
    ///
    /// Fails with `UnknownProperty` when no definition is visible at this
    /// depth and with `UnsetProperty` when the target depth has been reached
    /// or passed without a value ever being assigned. A definition whose
    /// target depth still lies ahead reads as [`PropertyState::Potential`].
    pub fn property(&self, name: &str) -> Result<PropertyState> {
        let state = self.state.lock().unwrap();
        let def = state
            .props
            .get(name)
            .filter(|def| def.levels().covers(self.depth))
            .ok_or_else(|| MultilevelError::UnknownProperty {
                property: String::from(name),
                clabject: self.name.clone(),
            })?;
        match state.values.get(name) {
            Some(value) => Ok(PropertyState::Assigned(value.clone())),
            None if def.target_depth() > self.depth => Ok(PropertyState::Potential),
            None => Err(MultilevelError::UnsetProperty {
                property: String::from(name),
                clabject: self.name.clone(),
            }),
        }
    }
}

impl PartialEq for Clabject {
    fn eq(&self, other: &Self) -> bool {
        self.clabject == other.clabject
    }
}
impl Eq for Clabject {}
impl Hash for Clabject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.clabject.hash(state);
    }
}
impl Ord for Clabject {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.depth, &self.name, self.clabject).cmp(&(other.depth, &other.name, other.clabject))
    }
}
impl PartialOrd for Clabject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for Clabject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = if self.declared_as_instance {
            "instance"
        } else {
            "type"
        };
        match &self.parent {
            Some(parent) => write!(
                f,
                "{} ({} at depth {}) : {}",
                self.name,
                kind,
                self.depth,
                parent.name()
            ),
            None => write!(f, "{} ({} at depth {})", self.name, kind, self.depth),
        }
    }
}

// ------------- ClabjectKeeper -------------
#[derive(Debug)]
pub struct ClabjectKeeper {
    kept: HashMap<ClabjectId, Arc<Clabject>, IdHasher>,
}
impl ClabjectKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    pub fn keep(&mut self, clabject: Clabject) -> Arc<Clabject> {
        let keepsake = Arc::new(clabject);
        self.kept.insert(keepsake.clabject(), Arc::clone(&keepsake));
        keepsake
    }
    pub fn get(&self, clabject: ClabjectId) -> Option<Arc<Clabject>> {
        self.kept.get(&clabject).map(Arc::clone)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

// ------------- Lookups -------------
#[derive(Debug)]
pub struct Lookup<K, V, H = RandomState> {
    index: HashMap<K, HashSet<V>, H>,
}
impl<K: Eq + Hash, V: Eq + Hash, H: BuildHasher + Default> Lookup<K, V, H> {
    pub fn new() -> Self {
        Self {
            index: HashMap::<K, HashSet<V>, H>::default(),
        }
    }
    pub fn insert(&mut self, key: K, value: V) {
        let set = self.index.entry(key).or_insert(HashSet::<V>::new());
        set.insert(value);
    }
    pub fn lookup(&self, key: &K) -> Option<&HashSet<V>> {
        self.index.get(key)
    }
}

// ------------- Hierarchy -------------
/// This sets up a classification hierarchy with the necessary structures.
///
/// A hierarchy owns the id generator, the keeper of its clabjects and the
/// lookups between constructs. Structural mutation (defining properties,
/// instantiating children) is serialized through the owned mutexes; once a
/// clabject has been handed out its assigned values are read-only.
pub struct Hierarchy {
    // owns a clabject id generator
    pub clabject_generator: Arc<Mutex<ClabjectGenerator>>,
    // owns the keeper of clabjects
    pub clabject_keeper: Arc<Mutex<ClabjectKeeper>>,
    // owns lookups between constructs (similar to database indexes)
    pub name_to_clabject_lookup: Arc<Mutex<Lookup<String, ClabjectId, OtherHasher>>>,
    pub depth_to_clabject_lookup: Arc<Mutex<Lookup<u32, ClabjectId, OtherHasher>>>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self {
            clabject_generator: Arc::new(Mutex::new(ClabjectGenerator::new())),
            clabject_keeper: Arc::new(Mutex::new(ClabjectKeeper::new())),
            name_to_clabject_lookup: Arc::new(Mutex::new(Lookup::new())),
            depth_to_clabject_lookup: Arc::new(Mutex::new(Lookup::new())),
        }
    }
    // functions to access the owned generator, keeper and lookups
    pub fn clabject_generator(&self) -> Arc<Mutex<ClabjectGenerator>> {
        Arc::clone(&self.clabject_generator)
    }
    pub fn clabject_keeper(&self) -> Arc<Mutex<ClabjectKeeper>> {
        Arc::clone(&self.clabject_keeper)
    }
    pub fn name_to_clabject_lookup(&self) -> Arc<Mutex<Lookup<String, ClabjectId, OtherHasher>>> {
        Arc::clone(&self.name_to_clabject_lookup)
    }
    pub fn depth_to_clabject_lookup(&self) -> Arc<Mutex<Lookup<u32, ClabjectId, OtherHasher>>> {
        Arc::clone(&self.depth_to_clabject_lookup)
    }
    fn keep(&self, clabject: Clabject) -> Arc<Clabject> {
        let kept = self.clabject_keeper.lock().unwrap().keep(clabject);
        self.name_to_clabject_lookup
            .lock()
            .unwrap()
            .insert(String::from(kept.name()), kept.clabject());
        self.depth_to_clabject_lookup
            .lock()
            .unwrap()
            .insert(kept.depth(), kept.clabject());
        kept
    }

    /// Produces a depth-0 clabject with no properties.
    pub fn create_root(&self, name: &str) -> Result<Arc<Clabject>> {
        if name.is_empty() {
            return Err(MultilevelError::InvalidName(String::from(
                "a clabject name must not be empty",
            )));
        }
        let id = self.clabject_generator.lock().unwrap().generate();
        debug!(clabject = name, id, "create root");
        Ok(self.keep(Clabject::new(
            id,
            String::from(name),
            0,
            false,
            None,
            HashMap::default(),
            HashMap::default(),
        )))
    }

    /// Attaches a sequence of property definitions to a clabject.
    ///
    /// All definitions are checked before any is attached, so a failing
    /// sequence leaves the clabject untouched. A definition with a default
    /// assigns that default to the declaring clabject right away.
    pub fn define_properties(&self, clabject: &Arc<Clabject>, defs: Vec<PropDef>) -> Result<()> {
        let mut state = clabject.state.lock().unwrap();
        let mut seen: HashSet<&str, OtherHasher> = HashSet::default();
        for def in &defs {
            if def.target_depth() < clabject.depth() {
                return Err(MultilevelError::InvalidPropertyDefinition {
                    property: String::from(def.name()),
                    reason: format!(
                        "target depth {} is above the declaring depth {}",
                        def.target_depth(),
                        clabject.depth()
                    ),
                });
            }
            if let Some(collection) = def.collection_description() {
                if collection.min() > collection.max() {
                    return Err(MultilevelError::InvalidPropertyDefinition {
                        property: String::from(def.name()),
                        reason: format!(
                            "collection cardinality {} exceeds {}",
                            collection.min(),
                            collection.max()
                        ),
                    });
                }
            }
            // collisions with attached definitions and within the batch itself
            if state.props.contains_key(def.name()) || !seen.insert(def.name()) {
                return Err(MultilevelError::InvalidPropertyDefinition {
                    property: String::from(def.name()),
                    reason: String::from("a property of that name is already defined"),
                });
            }
            if let Some(default) = def.default() {
                def.validate(default)
                    .map_err(|e| MultilevelError::InvalidPropertyDefinition {
                        property: String::from(def.name()),
                        reason: format!("default value fails its own constraints: {}", e),
                    })?;
            }
        }
        for def in defs {
            debug!(clabject = clabject.name(), property = %def, "define property");
            if let Some(default) = def.default() {
                if def.levels().covers(clabject.depth()) {
                    state
                        .values
                        .insert(String::from(def.name()), default.clone());
                }
            }
            state.props.insert(String::from(def.name()), Arc::new(def));
        }
        Ok(())
    }

    /// Instantiates a child clabject from a parent, one depth step down.
    ///
    /// The parent must not be declared as an instance. The child starts from
    /// a snapshot of the values already assigned up the hierarchy, so a
    /// species actualized on `Cat` is readable on `tom`. Every initializer
    /// value is validated against the inherited definition it names; every
    /// inherited definition with a default and still no value is assigned
    /// the default. Definitions whose target depth is not yet reached are
    /// carried forward unset.
    pub fn instantiate(
        &self,
        parent: &Arc<Clabject>,
        name: &str,
        init_values: HashMap<String, Value>,
        declare_as_instance: bool,
    ) -> Result<Arc<Clabject>> {
        if parent.declared_as_instance() {
            return Err(MultilevelError::ClabjectDeclaredAsInstance {
                clabject: String::from(parent.name()),
            });
        }
        if name.is_empty() {
            return Err(MultilevelError::InvalidName(String::from(
                "a clabject name must not be empty",
            )));
        }
        let depth = parent.depth() + 1;
        // the parent's maps already accumulate its ancestors' definitions
        // and assigned values, so inheriting one level up suffices
        let (inherited, mut values) = {
            let parent_state = parent.state.lock().unwrap();
            let props: HashMap<String, Arc<PropDef>, OtherHasher> = parent_state
                .props
                .iter()
                .map(|(key, def)| (key.clone(), Arc::clone(def)))
                .collect();
            let values: HashMap<String, Value, OtherHasher> = parent_state
                .values
                .iter()
                .filter(|(key, _)| {
                    props
                        .get(*key)
                        .is_some_and(|def| def.levels().covers(depth))
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            (props, values)
        };
        for (key, value) in init_values {
            let def = inherited
                .get(&key)
                .filter(|def| def.levels().covers(depth))
                .ok_or_else(|| MultilevelError::UnknownProperty {
                    property: key.clone(),
                    clabject: String::from(name),
                })?;
            def.validate(&value)?;
            values.insert(key, value);
        }
        for (key, def) in &inherited {
            if let Some(default) = def.default() {
                if def.levels().covers(depth) && !values.contains_key(key) {
                    values.insert(key.clone(), default.clone());
                }
            }
        }
        let id = self.clabject_generator.lock().unwrap().generate();
        debug!(
            clabject = name,
            id,
            depth,
            instance = declare_as_instance,
            parent = parent.name(),
            "instantiate"
        );
        Ok(self.keep(Clabject::new(
            id,
            String::from(name),
            depth,
            declare_as_instance,
            Some(Arc::clone(parent)),
            inherited,
            values,
        )))
    }

    pub fn lookup(&self, clabject: ClabjectId) -> Option<Arc<Clabject>> {
        self.clabject_keeper.lock().unwrap().get(clabject)
    }
    pub fn find_by_name(&self, name: &str) -> Vec<Arc<Clabject>> {
        let key = String::from(name);
        let lookup = self.name_to_clabject_lookup.lock().unwrap();
        let keeper = self.clabject_keeper.lock().unwrap();
        let mut found: Vec<Arc<Clabject>> = lookup
            .lookup(&key)
            .into_iter()
            .flatten()
            .filter_map(|id| keeper.get(*id))
            .collect();
        found.sort_by_key(|c| c.clabject());
        found
    }
    pub fn at_depth(&self, depth: u32) -> Vec<Arc<Clabject>> {
        let lookup = self.depth_to_clabject_lookup.lock().unwrap();
        let keeper = self.clabject_keeper.lock().unwrap();
        let mut found: Vec<Arc<Clabject>> = lookup
            .lookup(&depth)
            .into_iter()
            .flatten()
            .filter_map(|id| keeper.get(*id))
            .collect();
        found.sort_by_key(|c| c.clabject());
        found
    }
    pub fn len(&self) -> usize {
        self.clabject_keeper.lock().unwrap().len()
    }
    pub fn is_empty(&self) -> bool {
        self.clabject_keeper.lock().unwrap().is_empty()
    }
}
