/*!

  Utils for writing netlist tests and demos.

*/

/// Builds the input map taken by [Netlist::evaluate](crate::netlist::Netlist::evaluate).
///
/// ```
/// use chipnet::{circuit::{NodeId, Value}, inputs};
/// let values = inputs! { "a" => true, "b" => Value::X };
/// assert_eq!(values[&NodeId::from("a")], Value::One);
/// assert_eq!(values[&NodeId::from("b")], Value::X);
/// ```
#[macro_export]
macro_rules! inputs {
    ($($id:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map: ::std::collections::HashMap<$crate::circuit::NodeId, $crate::circuit::Value> =
            ::std::collections::HashMap::new();
        $(
            map.insert(
                $crate::circuit::NodeId::from($id),
                $crate::circuit::Value::from($value),
            );
        )*
        map
    }};
}

/// Compare the output values of an evaluation, in declaration order.
#[macro_export]
macro_rules! assert_outputs_eq {
    ($eval:expr, [$($value:expr),* $(,)?] $(,)?) => {
        match (&$eval, [$($crate::circuit::Value::from($value)),*]) {
            (eval, expected) => {
                let actual: ::std::vec::Vec<$crate::circuit::Value> = eval.values().collect();
                assert_eq!(actual.as_slice(), expected.as_slice());
            }
        }
    };
    ($eval:expr, [$($value:expr),* $(,)?], $($arg:tt)+) => {
        match (&$eval, [$($crate::circuit::Value::from($value)),*]) {
            (eval, expected) => {
                let actual: ::std::vec::Vec<$crate::circuit::Value> = eval.values().collect();
                assert_eq!(
                    actual.as_slice(),
                    expected.as_slice(),
                    std::format_args!($($arg)+)
                );
            }
        }
    };
}
