/*!

  Chip definitions and the library netlists resolve them from.

*/

use crate::{
    behaviour::{ChipBehaviour, MAX_TRUTHTABLE_INPUTS, NetlistBehaviour, PrimitiveGate, Truthtable},
    error::{NetlistError, Result},
    netlist::Netlist,
};
use std::collections::HashMap;
use tracing::debug;

/// A reusable chip: an id, its pin counts and the behaviour every instance starts from
#[derive(Debug, Clone)]
pub struct ChipDefinition {
    def_id: String,
    behaviour: ChipBehaviour,
}

impl ChipDefinition {
    /// Creates a new definition
    pub fn new(def_id: impl Into<String>, behaviour: impl Into<ChipBehaviour>) -> Self {
        Self {
            def_id: def_id.into(),
            behaviour: behaviour.into(),
        }
    }

    /// Returns the id of the definition
    pub fn def_id(&self) -> &str {
        &self.def_id
    }

    /// Returns the number of input pins
    pub fn inputs(&self) -> usize {
        self.behaviour.inputs()
    }

    /// Returns the number of output pins
    pub fn outputs(&self) -> usize {
        self.behaviour.outputs()
    }

    /// Returns the prototype behaviour
    pub fn behaviour(&self) -> &ChipBehaviour {
        &self.behaviour
    }

    /// Returns a fresh behaviour for a new instance of this chip
    pub fn instantiate(&self) -> ChipBehaviour {
        self.behaviour.clone()
    }
}

/// Resolves chip definitions by id
pub trait ChipLibrary {
    /// Returns the definition `def_id`
    fn get(&self, def_id: &str) -> Option<&ChipDefinition>;

    /// Returns the id of a primitive that computes the same function as `netlist`, if one is known
    fn find_equivalent_static_primitive(&self, _netlist: &Netlist) -> Option<String> {
        None
    }
}

/// An in-memory [ChipLibrary]
#[derive(Debug, Clone, Default)]
pub struct Library {
    definitions: HashMap<String, ChipDefinition>,
}

impl Library {
    /// Creates an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library holding every [PrimitiveGate] under its name
    pub fn with_primitives() -> Self {
        let mut library = Self::new();
        for g in PrimitiveGate::ALL {
            library
                .definitions
                .insert(g.name().to_string(), ChipDefinition::new(g.name(), g));
        }
        library
    }

    /// Registers a definition
    pub fn insert(&mut self, definition: ChipDefinition) -> Result<()> {
        if self.definitions.contains_key(definition.def_id()) {
            return Err(NetlistError::DuplicateId(definition.def_id().to_string()));
        }
        self.definitions
            .insert(definition.def_id().to_string(), definition);
        Ok(())
    }

    /// Returns an iterator over the definition ids
    pub fn def_ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Saves `netlist` as the chip `def_id`.
    ///
    /// A netlist matching a registered primitive reuses that primitive. Other static netlists
    /// with at most [MAX_TRUTHTABLE_INPUTS] inputs are compiled into a truth table. Everything
    /// else is kept as a nested netlist.
    pub fn save_chip(&mut self, def_id: &str, netlist: &Netlist) -> Result<&ChipDefinition> {
        if self.definitions.contains_key(def_id) {
            return Err(NetlistError::DuplicateId(def_id.to_string()));
        }
        if !netlist.has_input_and_output() {
            return Err(NetlistError::IncompleteNetlist(
                "a chip needs at least one input and one output".to_string(),
            ));
        }
        if !netlist.fully_connected() {
            return Err(NetlistError::IncompleteNetlist(
                "every pin must be connected".to_string(),
            ));
        }

        let behaviour = if let Some(primitive) = self
            .find_equivalent_static_primitive(netlist)
            .and_then(|id| self.get(&id))
        {
            debug!(def_id, primitive = primitive.def_id(), "saved as primitive");
            primitive.instantiate()
        } else if netlist.is_static() && netlist.input_ids().len() <= MAX_TRUTHTABLE_INPUTS {
            debug!(def_id, "saved as truth table");
            Truthtable::compile(netlist, netlist.input_ids())?.into()
        } else {
            debug!(def_id, "saved as nested netlist");
            NetlistBehaviour::new(netlist.copy()).into()
        };

        self.definitions
            .insert(def_id.to_string(), ChipDefinition::new(def_id, behaviour));
        self.get(def_id)
            .ok_or_else(|| NetlistError::UnknownDefinition(def_id.to_string()))
    }
}

impl ChipLibrary for Library {
    fn get(&self, def_id: &str) -> Option<&ChipDefinition> {
        self.definitions.get(def_id)
    }

    fn find_equivalent_static_primitive(&self, netlist: &Netlist) -> Option<String> {
        let inputs = netlist.input_ids().len();
        let outputs = netlist.output_ids().len();
        if inputs > MAX_TRUTHTABLE_INPUTS || !netlist.is_static() {
            return None;
        }
        let tt = Truthtable::compile(netlist, netlist.input_ids()).ok()?;
        PrimitiveGate::ALL
            .into_iter()
            .filter(|g| g.inputs() == inputs && g.outputs() == outputs)
            .filter(|g| self.definitions.contains_key(g.name()))
            .find(|g| {
                Truthtable::from_fn(g.inputs(), g.outputs(), |i| g.evaluate(i))
                    .is_ok_and(|gate_tt| gate_tt == tt)
            })
            .map(|g| g.name().to_string())
    }
}
