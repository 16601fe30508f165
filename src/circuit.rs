/*!

  Leaf types of a circuit: tri-state values, pin addresses and connections.

*/

/// A tri-state logic level carried by every pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum Value {
    /// A logical 0
    Zero,
    /// A logical 1
    One,
    /// Undriven or unknown
    #[default]
    X,
}

impl Value {
    /// Returns the logical negation. X stays X.
    pub fn negate(self) -> Self {
        match self {
            Value::Zero => Value::One,
            Value::One => Value::Zero,
            Value::X => Value::X,
        }
    }

    /// Returns `true` if the value is 0 or 1
    pub fn is_determined(&self) -> bool {
        !matches!(self, Value::X)
    }

    /// Returns the boolean level, if the value is determined
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Zero => Some(false),
            Value::One => Some(true),
            Value::X => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b { Value::One } else { Value::Zero }
    }
}

impl std::ops::Not for Value {
    type Output = Value;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Zero => write!(f, "0"),
            Value::One => write!(f, "1"),
            Value::X => write!(f, "X"),
        }
    }
}

/// Declares a string-backed identifier type
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// The id of a node in a netlist
    NodeId
);

string_id!(
    /// The id of a connection in a netlist
    ConnectionId
);

/// Addresses the `output_idx`th output of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OutputPin {
    /// The node driving the pin
    pub node_id: NodeId,
    /// Position among the node outputs
    pub output_idx: usize,
}

impl OutputPin {
    /// Creates a new output pin address
    pub fn new(node_id: impl Into<NodeId>, output_idx: usize) -> Self {
        Self {
            node_id: node_id.into(),
            output_idx,
        }
    }
}

impl std::fmt::Display for OutputPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.out{}", self.node_id, self.output_idx)
    }
}

/// Addresses the `input_idx`th input of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct InputPin {
    /// The node reading the pin
    pub node_id: NodeId,
    /// Position among the node inputs
    pub input_idx: usize,
}

impl InputPin {
    /// Creates a new input pin address
    pub fn new(node_id: impl Into<NodeId>, input_idx: usize) -> Self {
        Self {
            node_id: node_id.into(),
            input_idx,
        }
    }
}

impl std::fmt::Display for InputPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.in{}", self.node_id, self.input_idx)
    }
}

/// A value travelling along a connection during propagation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    /// The value being carried
    pub value: Value,
    /// Where the value comes from
    pub from: OutputPin,
    /// Where the value is going
    pub to: InputPin,
}

/// A directed wire from an output pin to an input pin.
/// Connections are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Connection {
    id: ConnectionId,
    from: OutputPin,
    to: InputPin,
}

impl Connection {
    /// Creates a new connection
    pub fn new(id: impl Into<ConnectionId>, from: OutputPin, to: InputPin) -> Self {
        Self {
            id: id.into(),
            from,
            to,
        }
    }

    /// Returns the id of the connection
    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Returns the driving pin
    pub fn from(&self) -> &OutputPin {
        &self.from
    }

    /// Returns the driven pin
    pub fn to(&self) -> &InputPin {
        &self.to
    }

    /// Wraps `value` into a signal travelling along this connection
    pub fn create_signal(&self, value: Value) -> Signal {
        Signal {
            value,
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.id, self.from, self.to)
    }
}
