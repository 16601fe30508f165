/*!

  Errors raised while building, editing and evaluating a netlist.

*/

use crate::circuit::{ConnectionId, InputPin, NodeId};
use thiserror::Error;

/// Result type for netlist operations
pub type Result<T> = std::result::Result<T, NetlistError>;

/// Errors that can occur while working with a netlist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetlistError {
    /// A node or connection with this id already exists
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// The referenced node is not part of the netlist
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// The referenced connection is not part of the netlist
    #[error("Unknown connection: {0}")]
    UnknownConnection(ConnectionId),

    /// A pin index exceeds the pin count of its node
    #[error("Pin index {index} out of range for node {node} with {count} pins")]
    PinIndexOutOfRange {
        /// The node owning the pin
        node: NodeId,
        /// The offending index
        index: usize,
        /// The number of pins on that side of the node
        count: usize,
    },

    /// The destination pin is already driven by another connection
    #[error("Input pin {0} is already connected")]
    InputAlreadyConnected(InputPin),

    /// The caller did not supply a value for an INPUT node
    #[error("Missing value for input node {0}")]
    MissingInputValue(NodeId),

    /// A signal is headed for a node that no longer exists
    #[error("Signal targets missing node {0}")]
    DanglingConnection(NodeId),

    /// A behaviour was evaluated with the wrong number of inputs
    #[error("Expected {expected} inputs, got {actual}")]
    ArityMismatch {
        /// Number of inputs the behaviour takes
        expected: usize,
        /// Number of inputs supplied
        actual: usize,
    },

    /// The netlist has too many inputs to tabulate
    #[error("Cannot build a truth table with {inputs} inputs (limit is {limit})")]
    TruthtableTooLarge {
        /// Number of inputs of the netlist
        inputs: usize,
        /// The maximum number of inputs
        limit: usize,
    },

    /// A stored truth table does not hold one row per input combination
    #[error("Truth table holds {actual} bits, expected {expected}")]
    TruthtableSize {
        /// Number of bits implied by the input and output counts
        expected: usize,
        /// Number of bits present
        actual: usize,
    },

    /// The netlist contains a cycle or a non-static behaviour
    #[error("Netlist is not static")]
    NotStatic,

    /// The chip library has no definition with this id
    #[error("Unknown chip definition: {0}")]
    UnknownDefinition(String),

    /// The netlist cannot be saved as a chip
    #[error("Incomplete netlist: {0}")]
    IncompleteNetlist(String),
}
