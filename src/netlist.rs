/*!

  API for a netlist data structure and its event-driven evaluation.

*/

use crate::{
    behaviour::{ChipBehaviour, PrimitiveGate},
    circuit::{Connection, ConnectionId, InputPin, NodeId, OutputPin, Signal, Value},
    error::{NetlistError, Result},
    graph::{Analysis, StaticAnalysis},
    library::ChipLibrary,
};
use std::{
    collections::{HashMap, HashSet, VecDeque},
    rc::Rc,
};
use tracing::{debug, trace, warn};

/// Default bound on the number of signals processed by one evaluation
pub const MAX_ITERATIONS: usize = 1000;

/// The role of a node, with the logic of chip nodes
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A principal input, driven by the caller
    Input,
    /// A principal output, read by the caller
    Output,
    /// An instance of a chip definition
    Chip {
        /// The chip library definition this node was built from
        def_id: String,
        /// The logic of the chip
        behaviour: ChipBehaviour,
    },
}

/// A vertex of the netlist along with the current values on its pins
#[derive(Debug, Clone)]
pub struct NetlistNode {
    id: NodeId,
    kind: NodeKind,
    input_vals: Vec<Value>,
    output_vals: Vec<Value>,
}

impl NetlistNode {
    /// Creates an INPUT node
    pub fn input(id: impl Into<NodeId>) -> Self {
        Self::with_pins(id.into(), NodeKind::Input, 0, 1)
    }

    /// Creates an OUTPUT node
    pub fn output(id: impl Into<NodeId>) -> Self {
        Self::with_pins(id.into(), NodeKind::Output, 1, 0)
    }

    /// Creates a CHIP node whose pin counts follow `behaviour`
    pub fn chip(
        id: impl Into<NodeId>,
        def_id: impl Into<String>,
        behaviour: impl Into<ChipBehaviour>,
    ) -> Self {
        let behaviour = behaviour.into();
        let (inputs, outputs) = (behaviour.inputs(), behaviour.outputs());
        let kind = NodeKind::Chip {
            def_id: def_id.into(),
            behaviour,
        };
        Self::with_pins(id.into(), kind, inputs, outputs)
    }

    fn with_pins(id: NodeId, kind: NodeKind, inputs: usize, outputs: usize) -> Self {
        Self {
            id,
            kind,
            input_vals: vec![Value::X; inputs],
            output_vals: vec![Value::X; outputs],
        }
    }

    /// Returns the id of the node
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the role of the node
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` if this node is a principal input
    pub fn is_an_input(&self) -> bool {
        matches!(self.kind, NodeKind::Input)
    }

    /// Returns `true` if this node is a principal output
    pub fn is_an_output(&self) -> bool {
        matches!(self.kind, NodeKind::Output)
    }

    /// Returns the behaviour, if this node is a chip
    pub fn behaviour(&self) -> Option<&ChipBehaviour> {
        match &self.kind {
            NodeKind::Chip { behaviour, .. } => Some(behaviour),
            _ => None,
        }
    }

    /// Returns the chip definition id, if this node is a chip
    pub fn def_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Chip { def_id, .. } => Some(def_id),
            _ => None,
        }
    }

    /// Returns the number of input pins
    pub fn input_pins(&self) -> usize {
        self.input_vals.len()
    }

    /// Returns the number of output pins
    pub fn output_pins(&self) -> usize {
        self.output_vals.len()
    }

    /// Returns the current input values
    pub fn input_vals(&self) -> &[Value] {
        &self.input_vals
    }

    /// Returns the current output values
    pub fn output_vals(&self) -> &[Value] {
        &self.output_vals
    }

    /// Sets input `idx` to `value`. Chips recompute every output from the full input vector.
    pub fn set_input_val(&mut self, idx: usize, value: Value) -> Result<()> {
        if idx >= self.input_vals.len() {
            return Err(NetlistError::PinIndexOutOfRange {
                node: self.id.clone(),
                index: idx,
                count: self.input_vals.len(),
            });
        }
        self.input_vals[idx] = value;
        if let NodeKind::Chip { behaviour, .. } = &mut self.kind {
            self.output_vals = behaviour.evaluate(&self.input_vals)?;
        }
        Ok(())
    }

    /// Puts every pin back to X
    pub fn reset(&mut self) {
        self.input_vals.fill(Value::X);
        self.output_vals.fill(Value::X);
    }
}

/// Why an evaluation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReturnReason {
    /// Every signal was consumed
    Stable,
    /// The iteration bound was hit with signals still pending
    MaxIterations,
}

/// The result of [Netlist::evaluate]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    output_values: Vec<(NodeId, Value)>,
    reason: ReturnReason,
    iterations: usize,
}

impl Evaluation {
    /// Returns the value of every OUTPUT node, in declaration order
    pub fn output_values(&self) -> &[(NodeId, Value)] {
        &self.output_values
    }

    /// Returns the output values without their ids, in declaration order
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.output_values.iter().map(|(_, v)| *v)
    }

    /// Returns the value of the OUTPUT node `id`
    pub fn get(&self, id: &str) -> Option<Value> {
        self.output_values
            .iter()
            .find(|(k, _)| k.as_str() == id)
            .map(|(_, v)| *v)
    }

    /// Returns why the evaluation stopped
    pub fn reason(&self) -> ReturnReason {
        self.reason
    }

    /// Returns `true` if the network settled
    pub fn is_stable(&self) -> bool {
        self.reason == ReturnReason::Stable
    }

    /// Returns the number of signals that were processed
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// A snapshot of every pin and wire value, for drawing the netlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    /// The value carried by each connection
    pub wires: HashMap<ConnectionId, Value>,
    /// Input pin values per node
    pub input_pins: HashMap<NodeId, HashMap<usize, Value>>,
    /// Output pin values per node
    pub output_pins: HashMap<NodeId, HashMap<usize, Value>>,
}

/// A netlist data structure
///
/// Nodes and connections are the canonical state. Every other field is an index that is
/// kept in sync by the mutating methods.
#[derive(Debug, Clone)]
pub struct Netlist {
    /// The nodes, in insertion order
    nodes: Vec<NetlistNode>,
    /// The connections, in insertion order
    connections: Vec<Rc<Connection>>,
    /// Fan-out of every output pin
    output_index: HashMap<NodeId, HashMap<usize, Vec<Rc<Connection>>>>,
    /// Driver of every input pin
    input_index: HashMap<NodeId, HashMap<usize, Rc<Connection>>>,
    /// Position of every node in `nodes`
    nodes_by_id: HashMap<NodeId, usize>,
    connections_by_id: HashMap<ConnectionId, Rc<Connection>>,
    /// INPUT nodes in declaration order
    input_ids: Vec<NodeId>,
    /// OUTPUT nodes in declaration order
    output_ids: Vec<NodeId>,
    max_iterations: usize,
}

impl Default for Netlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Netlist {
    /// Creates an empty netlist
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            output_index: HashMap::new(),
            input_index: HashMap::new(),
            nodes_by_id: HashMap::new(),
            connections_by_id: HashMap::new(),
            input_ids: Vec::new(),
            output_ids: Vec::new(),
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Returns an independent copy. Connections are shared, nodes are cloned.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns the iteration bound used by [Netlist::evaluate]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Changes the iteration bound used by [Netlist::evaluate]
    pub fn set_max_iterations(&mut self, max: usize) {
        self.max_iterations = max;
    }

    /// Adds a node to the netlist
    pub fn add_node(&mut self, node: NetlistNode) -> Result<()> {
        if self.nodes_by_id.contains_key(&node.id) {
            return Err(NetlistError::DuplicateId(node.id.to_string()));
        }
        match node.kind {
            NodeKind::Input => self.input_ids.push(node.id.clone()),
            NodeKind::Output => self.output_ids.push(node.id.clone()),
            NodeKind::Chip { .. } => (),
        }
        self.nodes_by_id.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Adds an INPUT node
    pub fn add_input(&mut self, id: impl Into<NodeId>) -> Result<()> {
        self.add_node(NetlistNode::input(id))
    }

    /// Adds an OUTPUT node
    pub fn add_output(&mut self, id: impl Into<NodeId>) -> Result<()> {
        self.add_node(NetlistNode::output(id))
    }

    /// Adds a primitive gate, using the gate name as its definition id
    pub fn add_gate(&mut self, id: impl Into<NodeId>, gate: PrimitiveGate) -> Result<()> {
        self.add_node(NetlistNode::chip(id, gate.name(), gate))
    }

    /// Adds a CHIP node built from the library definition `def_id`
    pub fn add_chip(
        &mut self,
        id: impl Into<NodeId>,
        def_id: &str,
        library: &dyn ChipLibrary,
    ) -> Result<()> {
        let definition = library
            .get(def_id)
            .ok_or_else(|| NetlistError::UnknownDefinition(def_id.to_string()))?;
        self.add_node(NetlistNode::chip(id, def_id, definition.instantiate()))
    }

    /// Checks that `node` exists and has more than `index` pins on the given side
    fn check_pin(&self, node: &NodeId, index: usize, output: bool) -> Result<()> {
        let n = self
            .node(node)
            .ok_or_else(|| NetlistError::UnknownNode(node.clone()))?;
        let count = if output {
            n.output_pins()
        } else {
            n.input_pins()
        };
        if index >= count {
            return Err(NetlistError::PinIndexOutOfRange {
                node: node.clone(),
                index,
                count,
            });
        }
        Ok(())
    }

    /// Adds a connection. The netlist is unchanged if validation fails.
    pub fn add_connection(&mut self, connection: Connection) -> Result<Rc<Connection>> {
        if self.connections_by_id.contains_key(connection.id()) {
            return Err(NetlistError::DuplicateId(connection.id().to_string()));
        }
        let (from, to) = (connection.from(), connection.to());
        self.check_pin(&from.node_id, from.output_idx, true)?;
        self.check_pin(&to.node_id, to.input_idx, false)?;
        if self.driver(to).is_some() {
            return Err(NetlistError::InputAlreadyConnected(to.clone()));
        }

        let connection = Rc::new(connection);
        self.output_index
            .entry(connection.from().node_id.clone())
            .or_default()
            .entry(connection.from().output_idx)
            .or_default()
            .push(connection.clone());
        self.input_index
            .entry(connection.to().node_id.clone())
            .or_default()
            .insert(connection.to().input_idx, connection.clone());
        self.connections_by_id
            .insert(connection.id().clone(), connection.clone());
        self.connections.push(connection.clone());
        Ok(connection)
    }

    /// Creates and adds a connection from `from` to `to`
    pub fn connect(
        &mut self,
        id: impl Into<ConnectionId>,
        from: OutputPin,
        to: InputPin,
    ) -> Result<Rc<Connection>> {
        self.add_connection(Connection::new(id, from, to))
    }

    /// Removes a connection and resets the input it was driving to X.
    /// The netlist is unchanged if the reset fails.
    pub fn rmv_connection(&mut self, id: &ConnectionId) -> Result<Rc<Connection>> {
        let connection = self
            .connections_by_id
            .get(id)
            .cloned()
            .ok_or_else(|| NetlistError::UnknownConnection(id.clone()))?;

        let to = connection.to();
        if let Some(&slot) = self.nodes_by_id.get(&to.node_id) {
            self.nodes[slot].set_input_val(to.input_idx, Value::X)?;
        }

        self.connections_by_id.remove(id);
        self.connections.retain(|c| !Rc::ptr_eq(c, &connection));

        let from = connection.from();
        if let Some(pins) = self.output_index.get_mut(&from.node_id) {
            if let Some(fan_out) = pins.get_mut(&from.output_idx) {
                fan_out.retain(|c| !Rc::ptr_eq(c, &connection));
                if fan_out.is_empty() {
                    pins.remove(&from.output_idx);
                }
            }
            if pins.is_empty() {
                self.output_index.remove(&from.node_id);
            }
        }

        if let Some(pins) = self.input_index.get_mut(&to.node_id) {
            pins.remove(&to.input_idx);
            if pins.is_empty() {
                self.input_index.remove(&to.node_id);
            }
        }
        Ok(connection)
    }

    /// Removes a node along with every connection touching it
    pub fn rmv_node(&mut self, id: &NodeId) -> Result<NetlistNode> {
        let slot = *self
            .nodes_by_id
            .get(id)
            .ok_or_else(|| NetlistError::UnknownNode(id.clone()))?;

        let touching: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|c| c.from().node_id == *id || c.to().node_id == *id)
            .map(|c| c.id().clone())
            .collect();
        for cid in touching {
            self.rmv_connection(&cid)?;
        }

        let node = self.nodes.remove(slot);
        self.nodes_by_id.remove(id);
        for s in self.nodes_by_id.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        self.input_ids.retain(|i| i != id);
        self.output_ids.retain(|o| o != id);
        Ok(node)
    }

    /// Returns the node `id`
    pub fn node(&self, id: &NodeId) -> Option<&NetlistNode> {
        self.nodes_by_id.get(id).map(|&slot| &self.nodes[slot])
    }

    /// Returns the connection `id`
    pub fn connection(&self, id: &ConnectionId) -> Option<&Rc<Connection>> {
        self.connections_by_id.get(id)
    }

    /// Returns an iterator over the nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &NetlistNode> {
        self.nodes.iter()
    }

    /// Returns an iterator over the connections, in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &Rc<Connection>> {
        self.connections.iter()
    }

    /// Returns the INPUT node ids in declaration order
    pub fn input_ids(&self) -> &[NodeId] {
        &self.input_ids
    }

    /// Returns the OUTPUT node ids in declaration order
    pub fn output_ids(&self) -> &[NodeId] {
        &self.output_ids
    }

    /// Returns the connections leaving `pin`
    pub fn fan_out(&self, pin: &OutputPin) -> impl Iterator<Item = &Rc<Connection>> {
        self.output_index
            .get(&pin.node_id)
            .and_then(|pins| pins.get(&pin.output_idx))
            .into_iter()
            .flatten()
    }

    /// Returns the connection driving `pin`
    pub fn driver(&self, pin: &InputPin) -> Option<&Rc<Connection>> {
        self.input_index
            .get(&pin.node_id)
            .and_then(|pins| pins.get(&pin.input_idx))
    }

    /// Constructs an analysis of the netlist.
    pub fn get_analysis<'a, A: Analysis<'a>>(&'a self) -> Result<A> {
        A::build(self)
    }

    /// Puts every pin of every node back to X
    pub fn reset(&mut self) {
        self.nodes.iter_mut().for_each(NetlistNode::reset);
    }

    /// Queues one signal per connection leaving `pin`
    fn enqueue_fan_out(&self, pin: &OutputPin, value: Value, queue: &mut VecDeque<Signal>) {
        for c in self.fan_out(pin) {
            queue.push_back(c.create_signal(value));
        }
    }

    /// Reads the sink value of every OUTPUT node
    fn collect_outputs(&self) -> Vec<(NodeId, Value)> {
        self.output_ids
            .iter()
            .map(|id| {
                let value = self
                    .node(id)
                    .and_then(|n| n.input_vals.first().copied())
                    .unwrap_or_default();
                (id.clone(), value)
            })
            .collect()
    }

    /// Propagates the values of the INPUT nodes through the netlist.
    ///
    /// Signals are processed in FIFO order. A node output is forwarded when its value changes or when
    /// it has not been forwarded yet during this call. Hitting the iteration bound is reported through
    /// [ReturnReason::MaxIterations] rather than as an error.
    pub fn evaluate(&mut self, inputs: &HashMap<NodeId, Value>, reset: bool) -> Result<Evaluation> {
        if let Some(missing) = self.input_ids.iter().find(|id| !inputs.contains_key(*id)) {
            return Err(NetlistError::MissingInputValue(missing.clone()));
        }
        if reset {
            self.reset();
        }

        let mut queue = VecDeque::new();
        let mut sent: HashSet<OutputPin> = HashSet::new();
        for id in &self.input_ids {
            let value = inputs[id];
            let slot = self.nodes_by_id[id];
            self.nodes[slot].output_vals[0] = value;
            let pin = OutputPin::new(id.clone(), 0);
            self.enqueue_fan_out(&pin, value, &mut queue);
            sent.insert(pin);
        }

        let mut iterations = 0;
        while iterations < self.max_iterations {
            let Some(signal) = queue.pop_front() else {
                break;
            };
            iterations += 1;
            trace!(from = %signal.from, to = %signal.to, value = %signal.value, "signal");

            let slot = *self
                .nodes_by_id
                .get(&signal.to.node_id)
                .ok_or_else(|| NetlistError::DanglingConnection(signal.to.node_id.clone()))?;
            let node = &mut self.nodes[slot];
            let old_outputs = node.output_vals.clone();
            node.set_input_val(signal.to.input_idx, signal.value)?;
            let new_outputs = node.output_vals.clone();

            for (idx, (old, new)) in old_outputs.iter().zip(&new_outputs).enumerate() {
                let pin = OutputPin::new(signal.to.node_id.clone(), idx);
                if old != new || !sent.contains(&pin) {
                    self.enqueue_fan_out(&pin, *new, &mut queue);
                    sent.insert(pin);
                }
            }
        }

        let reason = if queue.is_empty() {
            ReturnReason::Stable
        } else {
            ReturnReason::MaxIterations
        };
        debug!(iterations, ?reason, pending = queue.len(), "evaluation finished");
        Ok(Evaluation {
            output_values: self.collect_outputs(),
            reason,
            iterations,
        })
    }

    /// Returns `true` if every input pin is driven and every output pin drives something
    pub fn fully_connected(&self) -> bool {
        self.nodes.iter().all(|n| {
            let drivers = self.input_index.get(&n.id);
            let users = self.output_index.get(&n.id);
            (0..n.input_pins()).all(|i| drivers.is_some_and(|d| d.contains_key(&i)))
                && (0..n.output_pins()).all(|i| users.is_some_and(|u| u.contains_key(&i)))
        })
    }

    /// Returns `true` if there is at least one INPUT and one OUTPUT node
    pub fn has_input_and_output(&self) -> bool {
        !self.input_ids.is_empty() && !self.output_ids.is_empty()
    }

    /// Returns `true` if the netlist is acyclic and every behaviour is static,
    /// so it can be collapsed into a truth table.
    pub fn is_static(&self) -> bool {
        self.get_analysis::<StaticAnalysis>()
            .is_ok_and(|a| a.is_static())
    }

    /// Returns the current value of every wire and pin without evaluating
    pub fn render_state(&self) -> RenderState {
        let mut state = RenderState::default();
        for c in &self.connections {
            let value = self
                .node(&c.from().node_id)
                .and_then(|n| n.output_vals.get(c.from().output_idx).copied())
                .unwrap_or_default();
            state.wires.insert(c.id().clone(), value);
        }
        for n in &self.nodes {
            state
                .input_pins
                .insert(n.id.clone(), n.input_vals.iter().copied().enumerate().collect());
            state
                .output_pins
                .insert(n.id.clone(), n.output_vals.iter().copied().enumerate().collect());
        }
        state
    }

    /// Captures the netlist in its flat serialized form.
    /// Connections whose endpoints are no longer valid are dropped with a warning.
    pub fn serialize(&self) -> SerializedNetlist {
        let chips = self
            .nodes
            .iter()
            .map(|n| SerializedChip {
                id: n.id.clone(),
                details: match &n.kind {
                    NodeKind::Input => ChipDetails::Input,
                    NodeKind::Output => ChipDetails::Output,
                    NodeKind::Chip { def_id, .. } => ChipDetails::Chip {
                        def_id: def_id.clone(),
                    },
                },
            })
            .collect();

        let mut available: HashMap<&NodeId, HashSet<usize>> = self
            .nodes
            .iter()
            .map(|n| (&n.id, (0..n.input_pins()).collect()))
            .collect();
        let mut connections = Vec::with_capacity(self.connections.len());
        for c in &self.connections {
            let from_ok = self
                .node(&c.from().node_id)
                .is_some_and(|n| c.from().output_idx < n.output_pins());
            let to_ok = from_ok
                && available
                    .get_mut(&c.to().node_id)
                    .is_some_and(|free| free.remove(&c.to().input_idx));
            if to_ok {
                connections.push(c.as_ref().clone());
            } else {
                warn!(connection = %c, "dropping connection with invalid endpoints");
            }
        }

        SerializedNetlist { chips, connections }
    }

    /// Rebuilds a netlist, resolving chip definitions through `library`
    pub fn from_serialized(data: &SerializedNetlist, library: &dyn ChipLibrary) -> Result<Self> {
        let mut netlist = Netlist::new();
        for chip in &data.chips {
            match &chip.details {
                ChipDetails::Input => netlist.add_input(chip.id.clone())?,
                ChipDetails::Output => netlist.add_output(chip.id.clone())?,
                ChipDetails::Chip { def_id } => {
                    netlist.add_chip(chip.id.clone(), def_id, library)?
                }
            }
        }
        for c in &data.connections {
            netlist.add_connection(c.clone())?;
        }
        Ok(netlist)
    }
}

impl std::fmt::Display for Netlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indent = " ".repeat(2);
        writeln!(f, "netlist (")?;
        for id in &self.input_ids {
            writeln!(f, "{indent}input {id};")?;
        }
        for id in &self.output_ids {
            writeln!(f, "{indent}output {id};")?;
        }
        for n in &self.nodes {
            if let NodeKind::Chip { def_id, .. } = &n.kind {
                let operands: Vec<String> = (0..n.input_pins())
                    .map(|i| match self.driver(&InputPin::new(n.id.clone(), i)) {
                        Some(c) => c.from().to_string(),
                        None => "_".to_string(),
                    })
                    .collect();
                writeln!(f, "{indent}{def_id} {} ({});", n.id, operands.join(", "))?;
            }
        }
        for id in &self.output_ids {
            if let Some(c) = self.driver(&InputPin::new(id.clone(), 0)) {
                writeln!(f, "{indent}assign {id} = {};", c.from())?;
            }
        }
        writeln!(f, ")")
    }
}

/// How to rebuild a serialized node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ChipDetails {
    /// A principal input
    Input,
    /// A principal output
    Output,
    /// A chip resolved through the chip library
    Chip {
        /// The library definition id
        #[cfg_attr(feature = "serde", serde(rename = "defId"))]
        def_id: String,
    },
}

/// A serialized node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct SerializedChip {
    /// The node id
    pub id: NodeId,
    /// What kind of node to rebuild
    pub details: ChipDetails,
}

/// The flat, persistable form of a netlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct SerializedNetlist {
    /// The nodes, in insertion order
    pub chips: Vec<SerializedChip>,
    /// The connections, in insertion order
    pub connections: Vec<Connection>,
}

#[cfg(feature = "serde")]
/// JSON support for netlists
pub mod serde {
    use super::{Netlist, SerializedNetlist};
    use crate::{error::NetlistError, library::ChipLibrary};

    /// Errors raised while reading a netlist from JSON
    #[derive(Debug, thiserror::Error)]
    pub enum DeserializeError {
        /// The document is not a valid serialized netlist
        #[error(transparent)]
        Json(#[from] serde_json::Error),
        /// The document describes an invalid netlist
        #[error(transparent)]
        Netlist(#[from] NetlistError),
    }

    /// Serialize the netlist into the writer.
    pub fn netlist_serialize(
        netlist: &Netlist,
        writer: impl std::io::Write,
    ) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, &netlist.serialize())
    }

    /// Deserialize a netlist from the reader.
    pub fn netlist_deserialize(
        reader: impl std::io::Read,
        library: &dyn ChipLibrary,
    ) -> Result<Netlist, DeserializeError> {
        let data: SerializedNetlist = serde_json::from_reader(reader)?;
        Ok(Netlist::from_serialized(&data, library)?)
    }
}
