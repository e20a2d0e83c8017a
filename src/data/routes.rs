use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::model::Flight;

/// Directed route graph: airports as nodes, one edge per distinct
/// origin → destination pair weighted by the number of flights on it.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    pub graph: DiGraph<String, usize>,
    index: HashMap<String, NodeIndex>,
}

impl RouteGraph {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Flight>) -> Self {
        let mut routes = RouteGraph::default();
        for flight in rows {
            if flight.origin.is_empty() || flight.destination.is_empty() {
                continue;
            }
            let from = routes.node(&flight.origin);
            let to = routes.node(&flight.destination);
            match routes.graph.find_edge(from, to) {
                Some(edge) => routes.graph[edge] += 1,
                None => {
                    routes.graph.add_edge(from, to, 1);
                }
            }
        }
        routes
    }

    fn node(&mut self, code: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(code) {
            return idx;
        }
        let idx = self.graph.add_node(code.to_string());
        self.index.insert(code.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Airport codes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|i| self.graph[i].as_str())
    }

    /// `(from, to, flights)` for every route.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, usize)> + '_ {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                *e.weight(),
            )
        })
    }
}
