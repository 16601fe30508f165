/*!

  Evaluation strategies for chip nodes: primitive gates, compiled truth tables and nested netlists.

*/

use crate::{
    circuit::{NodeId, Value},
    error::{NetlistError, Result},
    netlist::Netlist,
};
use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// The largest number of inputs a truth table may have (2^20 rows)
pub const MAX_TRUTHTABLE_INPUTS: usize = 20;

/// Fails unless `inputs` has exactly `expected` entries
fn check_arity(expected: usize, inputs: &[Value]) -> Result<()> {
    if inputs.len() != expected {
        return Err(NetlistError::ArityMismatch {
            expected,
            actual: inputs.len(),
        });
    }
    Ok(())
}

/// A built-in logic gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum PrimitiveGate {
    /// Two-input AND
    And,
    /// Two-input OR
    Or,
    /// Two-input NAND
    Nand,
    /// Two-input XOR
    Xor,
    /// Inverter
    Not,
}

impl PrimitiveGate {
    /// Every primitive gate
    pub const ALL: [PrimitiveGate; 5] = [
        PrimitiveGate::And,
        PrimitiveGate::Or,
        PrimitiveGate::Nand,
        PrimitiveGate::Xor,
        PrimitiveGate::Not,
    ];

    /// Returns the lower-case name of the gate, also used as its library id
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveGate::And => "and",
            PrimitiveGate::Or => "or",
            PrimitiveGate::Nand => "nand",
            PrimitiveGate::Xor => "xor",
            PrimitiveGate::Not => "not",
        }
    }

    /// Returns the number of input pins
    pub fn inputs(&self) -> usize {
        match self {
            PrimitiveGate::Not => 1,
            _ => 2,
        }
    }

    /// Returns the number of output pins
    pub fn outputs(&self) -> usize {
        1
    }

    /// Evaluates the gate. Unknown inputs only produce X when the determined inputs do not force the result.
    pub fn evaluate(&self, inputs: &[Value]) -> Result<Vec<Value>> {
        use Value::*;
        check_arity(self.inputs(), inputs)?;
        let out = match self {
            PrimitiveGate::Not => inputs[0].negate(),
            PrimitiveGate::And => match (inputs[0], inputs[1]) {
                (Zero, _) | (_, Zero) => Zero,
                (One, One) => One,
                _ => X,
            },
            PrimitiveGate::Nand => match (inputs[0], inputs[1]) {
                (Zero, _) | (_, Zero) => One,
                (One, One) => Zero,
                _ => X,
            },
            PrimitiveGate::Or => match (inputs[0], inputs[1]) {
                (One, _) | (_, One) => One,
                (Zero, Zero) => Zero,
                _ => X,
            },
            PrimitiveGate::Xor => match (inputs[0], inputs[1]) {
                (X, _) | (_, X) => X,
                (a, b) => Value::from(a != b),
            },
        };
        Ok(vec![out])
    }
}

impl std::fmt::Display for PrimitiveGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PrimitiveGate {
    type Err = NetlistError;

    fn from_str(s: &str) -> Result<Self> {
        PrimitiveGate::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| NetlistError::UnknownDefinition(s.to_string()))
    }
}

/// A bit-packed lookup table.
///
/// Each row holds `outputs` consecutive bits. Bits are stored most-significant first
/// within every machine word, and input 0 is the most-significant bit of the row number.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTruthtable"))]
pub struct Truthtable {
    table: BitVec<usize, Msb0>,
    inputs: usize,
    outputs: usize,
}

/// A truth table as read from a document, before its size is checked
#[cfg(feature = "serde")]
#[derive(::serde::Deserialize)]
struct RawTruthtable {
    table: BitVec<usize, Msb0>,
    inputs: usize,
    outputs: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTruthtable> for Truthtable {
    type Error = NetlistError;

    fn try_from(raw: RawTruthtable) -> Result<Self> {
        if raw.inputs > MAX_TRUTHTABLE_INPUTS {
            return Err(NetlistError::TruthtableTooLarge {
                inputs: raw.inputs,
                limit: MAX_TRUTHTABLE_INPUTS,
            });
        }
        let expected = (1usize << raw.inputs).checked_mul(raw.outputs);
        if expected != Some(raw.table.len()) {
            return Err(NetlistError::TruthtableSize {
                expected: expected.unwrap_or(usize::MAX),
                actual: raw.table.len(),
            });
        }
        Ok(Self {
            table: raw.table,
            inputs: raw.inputs,
            outputs: raw.outputs,
        })
    }
}

impl Truthtable {
    /// Creates a table with every output bit cleared
    pub fn new(inputs: usize, outputs: usize) -> Result<Self> {
        if inputs > MAX_TRUTHTABLE_INPUTS {
            return Err(NetlistError::TruthtableTooLarge {
                inputs,
                limit: MAX_TRUTHTABLE_INPUTS,
            });
        }
        Ok(Self {
            table: BitVec::repeat(false, (1 << inputs) * outputs),
            inputs,
            outputs,
        })
    }

    /// Tabulates `f` over every determined input combination.
    /// Outputs that come back as X are stored as 0.
    pub fn from_fn<F>(inputs: usize, outputs: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(&[Value]) -> Result<Vec<Value>>,
    {
        let mut tt = Self::new(inputs, outputs)?;
        for row in 0..tt.rows() {
            let results = f(&Self::row_inputs(row, inputs))?;
            if results.len() != outputs {
                return Err(NetlistError::ArityMismatch {
                    expected: outputs,
                    actual: results.len(),
                });
            }
            for (k, v) in results.into_iter().enumerate() {
                tt.table.set(row * outputs + k, v == Value::One);
            }
        }
        Ok(tt)
    }

    /// Compiles a static netlist. Input `i` of the table drives the INPUT node `idx_to_input_id[i]`.
    /// The netlist is copied, so its own state is left untouched.
    pub fn compile(netlist: &Netlist, idx_to_input_id: &[NodeId]) -> Result<Self> {
        let inputs = idx_to_input_id.len();
        if inputs > MAX_TRUTHTABLE_INPUTS {
            return Err(NetlistError::TruthtableTooLarge {
                inputs,
                limit: MAX_TRUTHTABLE_INPUTS,
            });
        }
        if !netlist.is_static() {
            return Err(NetlistError::NotStatic);
        }

        let mut scratch = netlist.copy();
        let outputs = scratch.output_ids().len();
        let tt = Self::from_fn(inputs, outputs, |row| {
            let values: HashMap<NodeId, Value> = idx_to_input_id
                .iter()
                .cloned()
                .zip(row.iter().copied())
                .collect();
            Ok(scratch.evaluate(&values, true)?.values().collect())
        })?;
        debug!(inputs, outputs, rows = tt.rows(), "compiled truth table");
        Ok(tt)
    }

    /// Returns the input vector for row `row` of a table with `inputs` inputs
    pub fn row_inputs(row: usize, inputs: usize) -> Vec<Value> {
        (0..inputs)
            .map(|i| Value::from((row >> (inputs - 1 - i)) & 1 == 1))
            .collect()
    }

    /// Returns the row number for a determined input vector, or [None] if any input is X
    pub fn row_index(inputs: &[Value]) -> Option<usize> {
        inputs.iter().try_fold(0usize, |row, v| {
            v.as_bool().map(|b| (row << 1) | usize::from(b))
        })
    }

    /// Returns the number of inputs
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Returns the number of outputs
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Returns the number of rows
    pub fn rows(&self) -> usize {
        1 << self.inputs
    }

    /// Returns the raw output bits of row `row`
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &BitSlice<usize, Msb0> {
        let start = row * self.outputs;
        &self.table[start..start + self.outputs]
    }

    /// Returns the packed table
    pub fn as_bitslice(&self) -> &BitSlice<usize, Msb0> {
        &self.table
    }

    /// Returns the machine words backing the table
    pub fn as_raw_slice(&self) -> &[usize] {
        self.table.as_raw_slice()
    }

    /// Looks up the outputs for `inputs`. Any X input makes every output X.
    pub fn evaluate(&self, inputs: &[Value]) -> Result<Vec<Value>> {
        check_arity(self.inputs, inputs)?;
        match Self::row_index(inputs) {
            Some(row) => Ok(self.row(row).iter().by_vals().map(Value::from).collect()),
            None => Ok(vec![Value::X; self.outputs]),
        }
    }
}

impl std::fmt::Display for Truthtable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows() {
            for v in Self::row_inputs(row, self.inputs) {
                write!(f, "{v}")?;
            }
            write!(f, " |")?;
            for b in self.row(row).iter().by_vals() {
                write!(f, " {}", Value::from(b))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A nested netlist used as the logic of a chip
#[derive(Debug, Clone)]
pub struct NetlistBehaviour {
    netlist: Netlist,
    idx_to_input_id: Vec<NodeId>,
}

impl NetlistBehaviour {
    /// Wraps `netlist`, assigning chip inputs to INPUT nodes in declaration order
    pub fn new(netlist: Netlist) -> Self {
        let idx_to_input_id = netlist.input_ids().to_vec();
        Self {
            netlist,
            idx_to_input_id,
        }
    }

    /// Wraps `netlist` with an explicit input assignment.
    /// The assignment must name every INPUT node exactly once.
    pub fn with_mapping(netlist: Netlist, idx_to_input_id: Vec<NodeId>) -> Result<Self> {
        if idx_to_input_id.len() != netlist.input_ids().len() {
            return Err(NetlistError::ArityMismatch {
                expected: netlist.input_ids().len(),
                actual: idx_to_input_id.len(),
            });
        }
        let mut seen = HashSet::new();
        for id in &idx_to_input_id {
            if !netlist.input_ids().contains(id) {
                return Err(NetlistError::UnknownNode(id.clone()));
            }
            if !seen.insert(id) {
                return Err(NetlistError::DuplicateId(id.to_string()));
            }
        }
        Ok(Self {
            netlist,
            idx_to_input_id,
        })
    }

    /// Returns the nested netlist
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// Returns the INPUT node fed by each chip input
    pub fn idx_to_input_id(&self) -> &[NodeId] {
        &self.idx_to_input_id
    }

    /// Returns the number of chip inputs
    pub fn inputs(&self) -> usize {
        self.idx_to_input_id.len()
    }

    /// Returns the number of chip outputs
    pub fn outputs(&self) -> usize {
        self.netlist.output_ids().len()
    }

    /// Compiles the nested netlist into a truth table
    pub fn to_truthtable(&self) -> Result<Truthtable> {
        Truthtable::compile(&self.netlist, &self.idx_to_input_id)
    }

    /// Runs the nested netlist from a reset state and returns its outputs in declaration order
    pub fn evaluate(&mut self, inputs: &[Value]) -> Result<Vec<Value>> {
        check_arity(self.inputs(), inputs)?;
        let values: HashMap<NodeId, Value> = self
            .idx_to_input_id
            .iter()
            .cloned()
            .zip(inputs.iter().copied())
            .collect();
        let eval = self.netlist.evaluate(&values, true)?;
        if !eval.is_stable() {
            debug!("nested netlist did not settle");
        }
        Ok(eval.values().collect())
    }
}

/// The logic attached to a chip node
#[derive(Debug, Clone)]
pub enum ChipBehaviour {
    /// A built-in gate
    Primitive(PrimitiveGate),
    /// A compiled lookup table
    Truthtable(Truthtable),
    /// A nested netlist
    Netlist(NetlistBehaviour),
}

impl ChipBehaviour {
    /// Returns the number of input pins
    pub fn inputs(&self) -> usize {
        match self {
            ChipBehaviour::Primitive(g) => g.inputs(),
            ChipBehaviour::Truthtable(tt) => tt.inputs(),
            ChipBehaviour::Netlist(nb) => nb.inputs(),
        }
    }

    /// Returns the number of output pins
    pub fn outputs(&self) -> usize {
        match self {
            ChipBehaviour::Primitive(g) => g.outputs(),
            ChipBehaviour::Truthtable(tt) => tt.outputs(),
            ChipBehaviour::Netlist(nb) => nb.outputs(),
        }
    }

    /// Computes every output from the full input vector
    pub fn evaluate(&mut self, inputs: &[Value]) -> Result<Vec<Value>> {
        match self {
            ChipBehaviour::Primitive(g) => g.evaluate(inputs),
            ChipBehaviour::Truthtable(tt) => tt.evaluate(inputs),
            ChipBehaviour::Netlist(nb) => nb.evaluate(inputs),
        }
    }

    /// Returns `true` if the behaviour is purely combinational
    pub fn is_static(&self) -> bool {
        match self {
            ChipBehaviour::Primitive(_) | ChipBehaviour::Truthtable(_) => true,
            ChipBehaviour::Netlist(nb) => nb.netlist().is_static(),
        }
    }
}

impl From<PrimitiveGate> for ChipBehaviour {
    fn from(g: PrimitiveGate) -> Self {
        ChipBehaviour::Primitive(g)
    }
}

impl From<Truthtable> for ChipBehaviour {
    fn from(tt: Truthtable) -> Self {
        ChipBehaviour::Truthtable(tt)
    }
}

impl From<NetlistBehaviour> for ChipBehaviour {
    fn from(nb: NetlistBehaviour) -> Self {
        ChipBehaviour::Netlist(nb)
    }
}
