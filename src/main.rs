use chipnet::{
    behaviour::{PrimitiveGate, Truthtable},
    circuit::{InputPin, OutputPin},
    error::Result,
    inputs,
    library::Library,
    netlist::Netlist,
};
use tracing::{Level, info};

/// Connects `from` to `to`, naming the wire after its endpoints
fn wire(netlist: &mut Netlist, from: (&str, usize), to: (&str, usize)) -> Result<()> {
    let id = format!("{}.{}-{}.{}", from.0, from.1, to.0, to.1);
    netlist.connect(id, OutputPin::new(from.0, from.1), InputPin::new(to.0, to.1))?;
    Ok(())
}

fn half_adder() -> Result<Netlist> {
    let mut netlist = Netlist::new();

    // Add the two inputs
    netlist.add_input("a")?;
    netlist.add_input("b")?;

    netlist.add_gate("xor", PrimitiveGate::Xor)?;
    netlist.add_gate("and", PrimitiveGate::And)?;

    // Sum first, then carry
    netlist.add_output("s")?;
    netlist.add_output("c")?;

    wire(&mut netlist, ("a", 0), ("xor", 0))?;
    wire(&mut netlist, ("b", 0), ("xor", 1))?;
    wire(&mut netlist, ("a", 0), ("and", 0))?;
    wire(&mut netlist, ("b", 0), ("and", 1))?;
    wire(&mut netlist, ("xor", 0), ("s", 0))?;
    wire(&mut netlist, ("and", 0), ("c", 0))?;
    Ok(netlist)
}

fn full_adder(library: &Library) -> Result<Netlist> {
    let mut netlist = Netlist::new();
    netlist.add_input("a")?;
    netlist.add_input("b")?;
    netlist.add_input("cin")?;
    netlist.add_chip("ha_0", "half_adder", library)?;
    netlist.add_chip("ha_1", "half_adder", library)?;
    netlist.add_chip("or", "or", library)?;
    netlist.add_output("sum")?;
    netlist.add_output("cout")?;

    wire(&mut netlist, ("a", 0), ("ha_0", 0))?;
    wire(&mut netlist, ("b", 0), ("ha_0", 1))?;
    wire(&mut netlist, ("ha_0", 0), ("ha_1", 0))?;
    wire(&mut netlist, ("cin", 0), ("ha_1", 1))?;
    wire(&mut netlist, ("ha_0", 1), ("or", 0))?;
    wire(&mut netlist, ("ha_1", 1), ("or", 1))?;
    wire(&mut netlist, ("ha_1", 0), ("sum", 0))?;
    wire(&mut netlist, ("or", 0), ("cout", 0))?;
    Ok(netlist)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let mut ha = half_adder()?;
    print!("{ha}");
    for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
        let eval = ha.evaluate(&inputs! { "a" => a, "b" => b }, true)?;
        info!(a, b, s = %eval.get("s").unwrap_or_default(), c = %eval.get("c").unwrap_or_default());
    }
    print!("{}", Truthtable::compile(&ha, ha.input_ids())?);

    let mut library = Library::with_primitives();
    library.save_chip("half_adder", &ha)?;

    let mut fa = full_adder(&library)?;
    print!("{fa}");
    let eval = fa.evaluate(&inputs! { "a" => true, "b" => true, "cin" => true }, true)?;
    info!(
        sum = %eval.get("sum").unwrap_or_default(),
        cout = %eval.get("cout").unwrap_or_default(),
        iterations = eval.iterations(),
        reason = ?eval.reason(),
        "full adder settled"
    );

    #[cfg(feature = "serde")]
    {
        chipnet::netlist::serde::netlist_serialize(&fa, std::io::stdout())?;
        println!();
    }
    Ok(())
}

#[test]
fn test_full_adder() {
    let mut library = Library::with_primitives();
    library.save_chip("half_adder", &half_adder().unwrap()).unwrap();
    let mut fa = full_adder(&library).unwrap();
    for row in 0..8 {
        let (a, b, cin) = (row & 4 != 0, row & 2 != 0, row & 1 != 0);
        let eval = fa
            .evaluate(&inputs! { "a" => a, "b" => b, "cin" => cin }, true)
            .unwrap();
        let total = a as u8 + b as u8 + cin as u8;
        chipnet::assert_outputs_eq!(eval, [total & 1 == 1, total >= 2]);
    }
}
