use chipnet::behaviour::PrimitiveGate;
use chipnet::circuit::ConnectionId;
use chipnet::circuit::InputPin;
use chipnet::circuit::NodeId;
use chipnet::circuit::OutputPin;
use chipnet::circuit::Value;
use chipnet::error::NetlistError;
use chipnet::inputs;
use chipnet::library::Library;
use chipnet::netlist::Netlist;

fn get_simple_example() -> Netlist {
    let mut netlist = Netlist::new();
    netlist.add_input("a").unwrap();
    netlist.add_input("b").unwrap();
    netlist.add_gate("inst_0", PrimitiveGate::And).unwrap();
    netlist.add_output("y").unwrap();
    netlist
        .connect("c0", OutputPin::new("a", 0), InputPin::new("inst_0", 0))
        .unwrap();
    netlist
        .connect("c1", OutputPin::new("b", 0), InputPin::new("inst_0", 1))
        .unwrap();
    netlist
        .connect("c2", OutputPin::new("inst_0", 0), InputPin::new("y", 0))
        .unwrap();
    netlist
}

#[test]
fn input_pin_has_one_driver() {
    let mut netlist = get_simple_example();
    let err = netlist
        .connect("c3", OutputPin::new("b", 0), InputPin::new("inst_0", 0))
        .unwrap_err();
    assert_eq!(
        err,
        NetlistError::InputAlreadyConnected(InputPin::new("inst_0", 0))
    );

    // Freeing the pin allows a new driver
    netlist.rmv_connection(&"c0".into()).unwrap();
    netlist
        .connect("c3", OutputPin::new("b", 0), InputPin::new("inst_0", 0))
        .unwrap();
    let driver = netlist.driver(&InputPin::new("inst_0", 0)).unwrap();
    assert_eq!(driver.id(), &ConnectionId::from("c3"));

    // The old connection id cannot be reused for the same pin
    let err = netlist
        .connect("c0", OutputPin::new("a", 0), InputPin::new("inst_0", 0))
        .unwrap_err();
    assert!(matches!(err, NetlistError::InputAlreadyConnected(_)));
}

#[test]
fn output_pin_fans_out() {
    let mut netlist = get_simple_example();
    netlist.add_output("z").unwrap();
    netlist
        .connect("c3", OutputPin::new("inst_0", 0), InputPin::new("z", 0))
        .unwrap();
    assert_eq!(netlist.fan_out(&OutputPin::new("inst_0", 0)).count(), 2);

    let eval = netlist
        .evaluate(&inputs! { "a" => true, "b" => true }, true)
        .unwrap();
    assert_eq!(eval.get("y"), Some(Value::One));
    assert_eq!(eval.get("z"), Some(Value::One));
}

#[test]
fn rmv_node_removes_connections() {
    let mut netlist = get_simple_example();
    let removed = netlist.rmv_node(&"inst_0".into()).unwrap();
    assert_eq!(removed.id(), &NodeId::from("inst_0"));
    assert_eq!(netlist.connections().count(), 0);
    assert_eq!(netlist.nodes().count(), 3);
    assert!(netlist.fan_out(&OutputPin::new("a", 0)).next().is_none());
    assert!(netlist.driver(&InputPin::new("y", 0)).is_none());
    for id in ["c0", "c1", "c2"] {
        assert!(netlist.connection(&id.into()).is_none());
    }

    // The remaining nodes are still reachable by id
    netlist.add_gate("inst_1", PrimitiveGate::Or).unwrap();
    netlist
        .connect("c0", OutputPin::new("a", 0), InputPin::new("inst_1", 0))
        .unwrap();
    netlist
        .connect("c1", OutputPin::new("b", 0), InputPin::new("inst_1", 1))
        .unwrap();
    netlist
        .connect("c2", OutputPin::new("inst_1", 0), InputPin::new("y", 0))
        .unwrap();
    let eval = netlist
        .evaluate(&inputs! { "a" => false, "b" => true }, true)
        .unwrap();
    assert_eq!(eval.get("y"), Some(Value::One));
}

#[test]
fn ids_are_unique() {
    let mut netlist = get_simple_example();
    assert_eq!(
        netlist.add_input("a"),
        Err(NetlistError::DuplicateId("a".to_string()))
    );
    assert_eq!(
        netlist.add_gate("y", PrimitiveGate::Not),
        Err(NetlistError::DuplicateId("y".to_string()))
    );
    netlist.add_output("z").unwrap();
    let err = netlist
        .connect("c0", OutputPin::new("a", 0), InputPin::new("z", 0))
        .unwrap_err();
    assert_eq!(err, NetlistError::DuplicateId("c0".to_string()));
}

#[test]
fn bad_endpoints_are_rejected() {
    let mut netlist = get_simple_example();
    let before = netlist.connections().count();

    assert_eq!(
        netlist
            .connect("c3", OutputPin::new("nope", 0), InputPin::new("y", 0))
            .unwrap_err(),
        NetlistError::UnknownNode(NodeId::from("nope"))
    );
    assert_eq!(
        netlist
            .connect("c3", OutputPin::new("a", 1), InputPin::new("y", 0))
            .unwrap_err(),
        NetlistError::PinIndexOutOfRange {
            node: NodeId::from("a"),
            index: 1,
            count: 1
        }
    );
    assert_eq!(
        netlist
            .connect("c3", OutputPin::new("a", 0), InputPin::new("inst_0", 2))
            .unwrap_err(),
        NetlistError::PinIndexOutOfRange {
            node: NodeId::from("inst_0"),
            index: 2,
            count: 2
        }
    );
    // Outputs have no output pins
    assert!(
        netlist
            .connect("c3", OutputPin::new("y", 0), InputPin::new("inst_0", 0))
            .is_err()
    );
    assert_eq!(netlist.connections().count(), before);
}

#[test]
fn unknown_ids_on_removal() {
    let mut netlist = get_simple_example();
    assert_eq!(
        netlist.rmv_node(&"nope".into()).unwrap_err(),
        NetlistError::UnknownNode(NodeId::from("nope"))
    );
    assert_eq!(
        netlist.rmv_connection(&"nope".into()).unwrap_err(),
        NetlistError::UnknownConnection(ConnectionId::from("nope"))
    );
}

#[test]
fn unknown_chip_definition() {
    let mut netlist = Netlist::new();
    let library = Library::with_primitives();
    netlist.add_chip("u0", "xor", &library).unwrap();
    assert_eq!(netlist.node(&"u0".into()).unwrap().def_id(), Some("xor"));
    assert_eq!(
        netlist.add_chip("u1", "mux", &library),
        Err(NetlistError::UnknownDefinition("mux".to_string()))
    );
}

#[test]
fn copies_are_independent() {
    let mut netlist = get_simple_example();
    let mut copy = netlist.copy();
    copy.rmv_node(&"b".into()).unwrap();
    assert_eq!(netlist.input_ids().len(), 2);

    netlist
        .evaluate(&inputs! { "a" => true, "b" => true }, true)
        .unwrap();
    let and = copy.node(&"inst_0".into()).unwrap();
    assert_eq!(and.output_vals(), &[Value::X]);

    copy.reset();
    let eval = copy.evaluate(&inputs! { "a" => false }, true).unwrap();
    assert_eq!(eval.get("y"), Some(Value::Zero));
}
