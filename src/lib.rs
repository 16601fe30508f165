#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, unreachable_pub)]
/*!

`chipnet`

A netlist of INPUT, OUTPUT and CHIP nodes joined by point-to-point connections,
simulated with tri-state values (0, 1, X) by event-driven propagation.
Chips are primitive gates, compiled truth tables or nested netlists, so a circuit
can be saved into a [library::Library] and reused inside larger designs.

## Simple Example
```
use chipnet::{
    behaviour::PrimitiveGate,
    circuit::{InputPin, OutputPin, Value},
    inputs,
    netlist::Netlist,
};

let mut netlist = Netlist::new();
netlist.add_input("a").unwrap();
netlist.add_input("b").unwrap();
netlist.add_gate("and", PrimitiveGate::And).unwrap();
netlist.add_gate("not", PrimitiveGate::Not).unwrap();
netlist.add_output("y").unwrap();

netlist.connect("c0", OutputPin::new("a", 0), InputPin::new("and", 0)).unwrap();
netlist.connect("c1", OutputPin::new("b", 0), InputPin::new("and", 1)).unwrap();
netlist.connect("c2", OutputPin::new("and", 0), InputPin::new("not", 0)).unwrap();
netlist.connect("c3", OutputPin::new("not", 0), InputPin::new("y", 0)).unwrap();

let eval = netlist.evaluate(&inputs! { "a" => true, "b" => true }, true).unwrap();
assert!(eval.is_stable());
assert_eq!(eval.get("y"), Some(Value::Zero));
```

*/

pub mod behaviour;
pub mod circuit;
pub mod error;
pub mod graph;
pub mod library;
pub mod netlist;
pub mod util;
