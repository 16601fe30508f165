/*!

  Graph analyses over a netlist.

*/

use crate::circuit::NodeId;
#[cfg(feature = "graph")]
use crate::circuit::ConnectionId;
use crate::error::Result;
use crate::netlist::Netlist;
#[cfg(feature = "graph")]
use petgraph::graph::DiGraph;
use std::collections::{HashMap, HashSet};

/// A common trait of analyses than can be performed on a netlist.
/// An analysis becomes stale when the netlist is modified.
pub trait Analysis<'a>
where
    Self: Sized + 'a,
{
    /// Construct the analysis to the current state of the netlist.
    fn build(netlist: &'a Netlist) -> Result<Self>;
}

/// A table that maps nodes to the nodes they drive
pub struct FanOutTable<'a> {
    // A reference to the underlying netlist
    _netlist: &'a Netlist,
    /// Maps a node to the nodes it drives, without duplicates, in connection order
    node_fan_out: HashMap<&'a NodeId, Vec<&'a NodeId>>,
}

impl<'a> FanOutTable<'a> {
    /// Returns an iterator to the nodes driven by `node`.
    pub fn get_node_users(&self, node: &NodeId) -> impl Iterator<Item = &'a NodeId> + '_ {
        self.node_fan_out
            .get(node)
            .into_iter()
            .flat_map(|users| users.iter().copied())
    }

    /// Returns `true` if some connection leaves `node`
    pub fn node_has_uses(&self, node: &NodeId) -> bool {
        self.node_fan_out.get(node).is_some_and(|u| !u.is_empty())
    }
}

impl<'a> Analysis<'a> for FanOutTable<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self> {
        let mut node_fan_out: HashMap<&'a NodeId, Vec<&'a NodeId>> = HashMap::new();
        for c in netlist.connections() {
            let users = node_fan_out.entry(&c.from().node_id).or_default();
            if !users.contains(&&c.to().node_id) {
                users.push(&c.to().node_id);
            }
        }
        Ok(FanOutTable {
            _netlist: netlist,
            node_fan_out,
        })
    }
}

/// Decides whether a netlist is static, i.e. acyclic and built only from static behaviours.
///
/// The search is an iterative depth-first traversal of the fan-out graph started from every
/// unvisited node, so large designs do not exhaust the call stack.
pub struct StaticAnalysis<'a> {
    _netlist: &'a Netlist,
    /// A node reached again while still on the current path
    cycle: Option<&'a NodeId>,
    /// A node whose behaviour is not static
    non_static: Option<&'a NodeId>,
}

impl<'a> StaticAnalysis<'a> {
    /// Returns `true` if the netlist can be collapsed into a truth table
    pub fn is_static(&self) -> bool {
        self.cycle.is_none() && self.non_static.is_none()
    }

    /// Returns `true` if a feedback loop was found
    pub fn has_cycle(&self) -> bool {
        self.cycle.is_some()
    }

    /// Returns a node that lies on a feedback loop
    pub fn cycle_node(&self) -> Option<&'a NodeId> {
        self.cycle
    }

    /// Returns a node with a non-static behaviour
    pub fn non_static_node(&self) -> Option<&'a NodeId> {
        self.non_static
    }
}

impl<'a> Analysis<'a> for StaticAnalysis<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self> {
        let fan_out = FanOutTable::build(netlist)?;
        let mut analysis = StaticAnalysis {
            _netlist: netlist,
            cycle: None,
            non_static: None,
        };

        let is_static_node = |id: &NodeId| {
            netlist
                .node(id)
                .and_then(|n| n.behaviour())
                .is_none_or(|b| b.is_static())
        };

        let mut done: HashSet<&'a NodeId> = HashSet::new();
        let mut on_path: HashSet<&'a NodeId> = HashSet::new();
        for root in netlist.nodes().map(|n| n.id()) {
            if done.contains(root) {
                continue;
            }
            if !is_static_node(root) {
                analysis.non_static = Some(root);
                return Ok(analysis);
            }
            // Each frame holds a node and the position of the next child to visit.
            let mut stack: Vec<(&'a NodeId, usize)> = vec![(root, 0)];
            on_path.insert(root);
            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                match fan_out.get_node_users(node).nth(frame.1) {
                    Some(next) => {
                        frame.1 += 1;
                        if on_path.contains(next) {
                            analysis.cycle = Some(next);
                            return Ok(analysis);
                        }
                        if done.contains(next) {
                            continue;
                        }
                        if !is_static_node(next) {
                            analysis.non_static = Some(next);
                            return Ok(analysis);
                        }
                        on_path.insert(next);
                        stack.push((next, 0));
                    }
                    None => {
                        on_path.remove(node);
                        done.insert(node);
                        stack.pop();
                    }
                }
            }
        }
        Ok(analysis)
    }
}

/// Returns a petgraph representation of the netlist as a directed multi-graph with type [DiGraph<NodeId, ConnectionId>].
#[cfg(feature = "graph")]
pub struct MultiDiGraph<'a> {
    _netlist: &'a Netlist,
    graph: DiGraph<NodeId, ConnectionId>,
}

#[cfg(feature = "graph")]
impl MultiDiGraph<'_> {
    /// Return a reference to the graph constructed by this analysis
    pub fn get_graph(&self) -> &DiGraph<NodeId, ConnectionId> {
        &self.graph
    }

    /// Renders the graph in dot format
    pub fn to_dot(&self) -> String {
        format!("{}", petgraph::dot::Dot::with_config(&self.graph, &[]))
    }
}

#[cfg(feature = "graph")]
impl<'a> Analysis<'a> for MultiDiGraph<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self> {
        let mut mapping = HashMap::new();
        let mut graph = DiGraph::new();

        for node in netlist.nodes() {
            let id = graph.add_node(node.id().clone());
            mapping.insert(node.id(), id);
        }

        for c in netlist.connections() {
            let s_id = mapping[&c.from().node_id];
            let t_id = mapping[&c.to().node_id];
            graph.add_edge(s_id, t_id, c.id().clone());
        }

        Ok(Self {
            _netlist: netlist,
            graph,
        })
    }
}
