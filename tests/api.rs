use chipnet::assert_outputs_eq;
use chipnet::behaviour::ChipBehaviour;
use chipnet::behaviour::NetlistBehaviour;
use chipnet::behaviour::PrimitiveGate;
use chipnet::behaviour::Truthtable;
use chipnet::circuit::InputPin;
use chipnet::circuit::NodeId;
use chipnet::circuit::OutputPin;
use chipnet::circuit::Value;
use chipnet::error::NetlistError;
use chipnet::inputs;
use chipnet::library::ChipDefinition;
use chipnet::library::ChipLibrary;
use chipnet::library::Library;
use chipnet::netlist::Netlist;
use chipnet::netlist::ReturnReason;

fn get_simple_example() -> Netlist {
    let mut netlist = Netlist::new();
    netlist.add_input("in1").unwrap();
    netlist.add_input("in2").unwrap();
    netlist.add_gate("and", PrimitiveGate::And).unwrap();
    netlist.add_gate("not", PrimitiveGate::Not).unwrap();
    netlist.add_output("out").unwrap();
    netlist
        .connect("c0", OutputPin::new("in1", 0), InputPin::new("and", 0))
        .unwrap();
    netlist
        .connect("c1", OutputPin::new("in2", 0), InputPin::new("and", 1))
        .unwrap();
    netlist
        .connect("c2", OutputPin::new("and", 0), InputPin::new("not", 0))
        .unwrap();
    netlist
        .connect("c3", OutputPin::new("not", 0), InputPin::new("out", 0))
        .unwrap();
    netlist
}

/// A NAND whose output also feeds its own second input
fn nand_loop() -> Netlist {
    let mut netlist = Netlist::new();
    netlist.add_input("in").unwrap();
    netlist.add_gate("nand", PrimitiveGate::Nand).unwrap();
    netlist.add_output("out").unwrap();
    netlist
        .connect("c0", OutputPin::new("in", 0), InputPin::new("nand", 0))
        .unwrap();
    netlist
        .connect("loop", OutputPin::new("nand", 0), InputPin::new("nand", 1))
        .unwrap();
    netlist
        .connect("c1", OutputPin::new("nand", 0), InputPin::new("out", 0))
        .unwrap();
    netlist
}

#[test]
fn and_not_end_to_end() {
    let mut netlist = get_simple_example();

    let eval = netlist
        .evaluate(&inputs! { "in1" => true, "in2" => true }, true)
        .unwrap();
    assert_eq!(eval.reason(), ReturnReason::Stable);
    assert_outputs_eq!(eval, [false]);

    let eval = netlist
        .evaluate(&inputs! { "in1" => false, "in2" => true }, true)
        .unwrap();
    assert!(eval.is_stable());
    assert_outputs_eq!(eval, [true]);
}

#[test]
fn unknown_inputs_propagate() {
    let mut netlist = get_simple_example();
    let eval = netlist
        .evaluate(&inputs! { "in1" => Value::X, "in2" => true }, true)
        .unwrap();
    assert_outputs_eq!(eval, [Value::X]);

    // A controlling zero hides the unknown
    let eval = netlist
        .evaluate(&inputs! { "in1" => Value::X, "in2" => false }, true)
        .unwrap();
    assert_outputs_eq!(eval, [true]);
}

#[test]
fn reset_evaluation_is_deterministic() {
    let mut netlist = get_simple_example();
    let values = inputs! { "in1" => true, "in2" => false };
    let first = netlist.evaluate(&values, true).unwrap();
    netlist
        .evaluate(&inputs! { "in1" => true, "in2" => true }, true)
        .unwrap();
    let second = netlist.evaluate(&values, true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_input_is_an_error() {
    let mut netlist = get_simple_example();
    let err = netlist
        .evaluate(&inputs! { "in1" => true }, true)
        .unwrap_err();
    assert_eq!(err, NetlistError::MissingInputValue(NodeId::from("in2")));
}

#[test]
fn primed_loop_hits_iteration_bound() {
    let mut netlist = nand_loop();

    // A zero forces the NAND high, which settles the loop
    let eval = netlist.evaluate(&inputs! { "in" => false }, true).unwrap();
    assert!(eval.is_stable());
    assert_outputs_eq!(eval, [true]);

    // Releasing it without a reset turns the loop into an inverter ring
    let eval = netlist.evaluate(&inputs! { "in" => true }, false).unwrap();
    assert_eq!(eval.reason(), ReturnReason::MaxIterations);
    assert_eq!(eval.iterations(), netlist.max_iterations());
    assert!(eval.get("out").unwrap().is_determined());
}

#[test]
fn iteration_bound_is_configurable() {
    let mut netlist = nand_loop();
    netlist.set_max_iterations(10);
    netlist.evaluate(&inputs! { "in" => false }, true).unwrap();
    let eval = netlist.evaluate(&inputs! { "in" => true }, false).unwrap();
    assert_eq!(eval.reason(), ReturnReason::MaxIterations);
    assert_eq!(eval.iterations(), 10);
}

#[test]
fn unprimed_inverter_loop_stays_unknown() {
    let mut netlist = Netlist::new();
    netlist.add_gate("not", PrimitiveGate::Not).unwrap();
    netlist.add_output("out").unwrap();
    netlist
        .connect("loop", OutputPin::new("not", 0), InputPin::new("not", 0))
        .unwrap();
    netlist
        .connect("c0", OutputPin::new("not", 0), InputPin::new("out", 0))
        .unwrap();

    let eval = netlist.evaluate(&inputs! {}, true).unwrap();
    assert!(eval.is_stable());
    assert_outputs_eq!(eval, [Value::X]);
}

#[test]
fn truthtable_matches_evaluation() {
    let mut netlist = get_simple_example();
    netlist
        .evaluate(&inputs! { "in1" => true, "in2" => true }, true)
        .unwrap();
    let tt = Truthtable::compile(&netlist, netlist.input_ids()).unwrap();
    assert_eq!((tt.inputs(), tt.outputs(), tt.rows()), (2, 1, 4));

    // Compiling works on a copy
    let and = netlist.node(&"and".into()).unwrap();
    assert_eq!(and.output_vals(), &[Value::One]);

    for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
        let eval = netlist
            .evaluate(&inputs! { "in1" => a, "in2" => b }, true)
            .unwrap();
        let expected: Vec<Value> = eval.values().collect();
        assert_eq!(
            tt.evaluate(&[Value::from(a), Value::from(b)]).unwrap(),
            expected
        );
        // AND followed by NOT is a NAND
        assert_eq!(expected, vec![Value::from(!(a && b))]);
    }
}

#[test]
fn truthtable_follows_input_mapping() {
    let mut netlist = Netlist::new();
    netlist.add_input("a").unwrap();
    netlist.add_input("b").unwrap();
    netlist.add_gate("not", PrimitiveGate::Not).unwrap();
    netlist.add_output("y").unwrap();
    netlist
        .connect("c0", OutputPin::new("a", 0), InputPin::new("not", 0))
        .unwrap();
    netlist
        .connect("c1", OutputPin::new("not", 0), InputPin::new("y", 0))
        .unwrap();

    // y = !a, with `a` as the least significant input
    let tt = Truthtable::compile(&netlist, &[NodeId::from("b"), NodeId::from("a")]).unwrap();
    assert!(tt.row(0b00)[0]);
    assert!(!tt.row(0b01)[0]);
    assert!(tt.row(0b10)[0]);
    assert!(!tt.row(0b11)[0]);
}

#[test]
fn truthtable_rejects_wide_netlists() {
    let mut netlist = Netlist::new();
    let ids: Vec<NodeId> = (0..21).map(|i| NodeId::from(format!("in_{i}"))).collect();
    for id in &ids {
        netlist.add_input(id.clone()).unwrap();
    }
    assert_eq!(
        Truthtable::compile(&netlist, &ids),
        Err(NetlistError::TruthtableTooLarge {
            inputs: 21,
            limit: 20
        })
    );
}

#[test]
fn truthtable_rejects_loops() {
    let netlist = nand_loop();
    assert_eq!(
        Truthtable::compile(&netlist, netlist.input_ids()),
        Err(NetlistError::NotStatic)
    );
}

#[test]
fn nested_netlist_restarts_every_time() {
    let mut library = Library::with_primitives();
    let def = library.save_chip("latch", &nand_loop()).unwrap();
    assert!(matches!(def.behaviour(), ChipBehaviour::Netlist(_)));
    assert!(!def.behaviour().is_static());

    let mut top = Netlist::new();
    top.add_input("p").unwrap();
    top.add_chip("u0", "latch", &library).unwrap();
    top.add_output("q").unwrap();
    top.connect("c0", OutputPin::new("p", 0), InputPin::new("u0", 0))
        .unwrap();
    top.connect("c1", OutputPin::new("u0", 0), InputPin::new("q", 0))
        .unwrap();
    assert!(!top.is_static());

    let eval = top.evaluate(&inputs! { "p" => false }, true).unwrap();
    assert_outputs_eq!(eval, [true]);

    // The nested run starts from X, so the loop cannot remember the previous state
    let eval = top.evaluate(&inputs! { "p" => true }, false).unwrap();
    assert!(eval.is_stable());
    assert_outputs_eq!(eval, [Value::X]);
}

#[test]
fn nested_static_netlist() {
    let mut library = Library::with_primitives();
    let inner = get_simple_example();
    library
        .insert(ChipDefinition::new("nand2", NetlistBehaviour::new(inner)))
        .unwrap();
    let def = library.get("nand2").unwrap();
    assert!(def.behaviour().is_static());
    assert_eq!((def.inputs(), def.outputs()), (2, 1));

    let mut top = Netlist::new();
    top.add_input("a").unwrap();
    top.add_chip("u0", "nand2", &library).unwrap();
    top.add_output("y").unwrap();
    // Both chip inputs tied to the same source
    top.connect("c0", OutputPin::new("a", 0), InputPin::new("u0", 0))
        .unwrap();
    top.connect("c1", OutputPin::new("a", 0), InputPin::new("u0", 1))
        .unwrap();
    top.connect("c2", OutputPin::new("u0", 0), InputPin::new("y", 0))
        .unwrap();
    assert!(top.is_static());

    let eval = top.evaluate(&inputs! { "a" => true }, true).unwrap();
    assert_outputs_eq!(eval, [false]);
    let eval = top.evaluate(&inputs! { "a" => false }, true).unwrap();
    assert_outputs_eq!(eval, [true]);

    let tt = Truthtable::compile(&top, top.input_ids()).unwrap();
    assert_eq!(tt.evaluate(&[Value::One]).unwrap(), vec![Value::Zero]);
}
