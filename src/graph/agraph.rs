//! This module describes the attributed graph the contraction engines work on.
//!
//! The graph is undirected and can have many edges between 2 given nodes.
//! Storage relies on a petgraph StableGraph, so node and edge indexes stay valid while
//! nodes are removed during contraction.
//! Nodes are identified by a [NodeId] given by the caller, an IndexMap translates
//! NodeId to petgraph NodeIndex and keeps the enumeration order of nodes.
//!
//! A node of a quotient graph also stores the list of original nodes it stands for
//! (see [NodeData::get_contracted]).

use indexmap::IndexMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;

use super::attributes::*;
use crate::error::ContractionError;

/// identity of a node, unique in a graph
pub type NodeId = u64;

/// name of the attribute used to break ties in contraction
pub const POSITION: &str = "position";

/// name of the attribute holding display label
pub const LABEL: &str = "label";

/// name of the graph metadata collecting a description of transformations
pub const INFO: &str = "info";

/// access to attributes, common to nodes and edges
pub trait HasAttributes {
    fn get_attrs(&self) -> &Attributes;

    /// value of attribute name if set
    fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.get_attrs().get(name)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.get_attrs().contains_key(name)
    }
} // end of trait HasAttributes

/// data associated to a node.
#[derive(Clone, Debug)]
pub struct NodeData {
    id: NodeId,
    attrs: Attributes,
    /// original nodes collapsed in this node, only set in quotient graphs
    contracted: Option<Vec<NodeId>>,
}

impl NodeData {
    pub fn new(id: NodeId, attrs: Attributes) -> Self {
        NodeData {
            id,
            attrs,
            contracted: None,
        }
    }

    pub fn get_id(&self) -> NodeId {
        self.id
    }

    pub fn get_attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    /// sets (or overwrites) an attribute
    pub fn set_attr(&mut self, name: &str, value: AttrValue) {
        self.attrs.insert(String::from(name), value);
    }

    /// ids of original nodes this node stands for. None if node is not a quotient node.
    pub fn get_contracted(&self) -> Option<&[NodeId]> {
        self.contracted.as_deref()
    }

    pub fn set_contracted(&mut self, contracted: Vec<NodeId>) {
        self.contracted = Some(contracted);
    }

    pub(crate) fn contracted_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        self.contracted.as_mut()
    }
} // end of impl NodeData

impl HasAttributes for NodeData {
    fn get_attrs(&self) -> &Attributes {
        &self.attrs
    }
}

/// Data associated to an edge
#[derive(Clone, Debug, Default)]
pub struct EdgeData {
    attrs: Attributes,
}

impl EdgeData {
    pub fn new(attrs: Attributes) -> Self {
        EdgeData { attrs }
    }

    pub fn get_attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }
} // end of impl EdgeData

impl HasAttributes for EdgeData {
    fn get_attrs(&self) -> &Attributes {
        &self.attrs
    }
}

//=============================================================================

/// An undirected attributed multigraph with graph level metadata.
#[derive(Clone, Debug, Default)]
pub struct AttributedGraph {
    graph: StableGraph<NodeData, EdgeData, Undirected>,
    /// NodeId to NodeIndex, in node enumeration order
    index: IndexMap<NodeId, NodeIndex>,
    /// graph level data : info, sequence, id ...
    meta: Attributes,
}

impl AttributedGraph {
    pub fn new() -> Self {
        AttributedGraph::default()
    }

    /// adds a node. If id is already present, attributes are merged into existing ones.
    pub fn add_node(&mut self, id: NodeId, attrs: Attributes) -> NodeIndex {
        match self.index.get(&id) {
            Some(ndix) => {
                let ndix = *ndix;
                self.graph[ndix].attrs.extend(attrs);
                ndix
            }
            None => {
                let ndix = self.graph.add_node(NodeData::new(id, attrs));
                self.index.insert(id, ndix);
                ndix
            }
        }
    } // end of add_node

    /// adds an edge between 2 existing and distinct nodes. Parallel edges are allowed.
    pub fn add_edge(
        &mut self,
        u: NodeId,
        v: NodeId,
        attrs: Attributes,
    ) -> Result<EdgeIndex, ContractionError> {
        if u == v {
            return Err(ContractionError::SelfLoop(u));
        }
        let u_idx = self.get_index(u)?;
        let v_idx = self.get_index(v)?;
        Ok(self.graph.add_edge(u_idx, v_idx, EdgeData::new(attrs)))
    } // end of add_edge

    /// removes a node and its edges, returns its data
    pub fn remove_node(&mut self, id: NodeId) -> Option<NodeData> {
        let ndix = self.index.shift_remove(&id)?;
        self.graph.remove_node(ndix)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// true if there is at least one edge between u and v
    pub fn contains_edge(&self, u: NodeId, v: NodeId) -> bool {
        match (self.index.get(&u), self.index.get(&v)) {
            (Some(a), Some(b)) => self.graph.find_edge(*a, *b).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// node ids in enumeration order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.keys().copied()
    }

    /// nodes in enumeration order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> + '_ {
        self.index.values().map(move |ndix| &self.graph[*ndix])
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.index.get(&id).map(|ndix| &self.graph[*ndix])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        match self.index.get(&id) {
            Some(ndix) => self.graph.node_weight_mut(*ndix),
            None => None,
        }
    }

    /// value of an attribute of a node, None if node or attribute is missing
    pub fn node_attr(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        self.node(id).and_then(|n| n.get_attr(name))
    }

    pub fn set_node_attr(
        &mut self,
        id: NodeId,
        name: &str,
        value: AttrValue,
    ) -> Result<(), ContractionError> {
        let node = self
            .node_mut(id)
            .ok_or(ContractionError::UnknownNode(id))?;
        node.set_attr(name, value);
        Ok(())
    }

    /// distinct neighbours of a node, in adjacency order
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut neighbours = Vec::<NodeId>::new();
        if let Some(ndix) = self.index.get(&id) {
            for n in self.graph.neighbors(*ndix) {
                let n_id = self.graph[n].id;
                if !neighbours.contains(&n_id) {
                    neighbours.push(n_id);
                }
            }
        }
        neighbours
    } // end of neighbors

    /// edges incident to a node, as (other endpoint, edge attributes)
    pub fn incident_edges(&self, id: NodeId) -> Vec<(NodeId, &Attributes)> {
        let ndix = match self.index.get(&id) {
            Some(ndix) => *ndix,
            None => return Vec::new(),
        };
        self.graph
            .edges(ndix)
            .map(|e| {
                let other = if e.source() == ndix {
                    e.target()
                } else {
                    e.source()
                };
                (self.graph[other].id, &e.weight().attrs)
            })
            .collect()
    } // end of incident_edges

    /// attributes of one edge between u and v, None if there is no such edge
    pub fn edge_attrs_mut(&mut self, u: NodeId, v: NodeId) -> Option<&mut Attributes> {
        let a = *self.index.get(&u)?;
        let b = *self.index.get(&v)?;
        let e = self.graph.find_edge(a, b)?;
        self.graph.edge_weight_mut(e).map(|data| data.get_attrs_mut())
    }

    /// all edges as (u, v, attributes)
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &Attributes)> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((self.graph[a].id, self.graph[b].id, &self.graph[e].attrs))
        })
    }

    /// gives a position attribute, equal to its enumeration rank, to each node without one.
    pub fn ensure_positions(&mut self) {
        let mut nb_assigned = 0;
        for (rank, ndix) in self.index.values().enumerate() {
            let node = &mut self.graph[*ndix];
            if !node.has_attr(POSITION) {
                node.set_attr(POSITION, AttrValue::from(rank));
                nb_assigned += 1;
            }
        }
        log::trace!("ensure_positions assigned {} positions", nb_assigned);
    } // end of ensure_positions

    /// graph level metadata
    pub fn meta(&self) -> &Attributes {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Attributes {
        &mut self.meta
    }

    pub fn set_meta(&mut self, name: &str, value: AttrValue) {
        self.meta.insert(String::from(name), value);
    }

    /// appends a line to the info metadata
    pub fn append_info(&mut self, text: &str) {
        let info = match self.meta.get(INFO) {
            Some(info) => info.to_text(),
            None => String::new(),
        };
        self.meta
            .insert(String::from(INFO), AttrValue::from(format!("{}\n{}", info, text)));
    }

    /// a name to identify the graph in logs : metadata id, or header, or <unnamed>
    pub fn describe(&self) -> String {
        self.meta
            .get("id")
            .or_else(|| self.meta.get("header"))
            .map(|v| v.to_text())
            .unwrap_or_else(|| String::from("<unnamed>"))
    }

    fn get_index(&self, id: NodeId) -> Result<NodeIndex, ContractionError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(ContractionError::UnknownNode(id))
    }
} // end of impl AttributedGraph

//=====================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn triangle() -> AttributedGraph {
        let mut graph = AttributedGraph::new();
        for i in 0..3 {
            graph.add_node(i, attributes([("label", "A")]));
        }
        graph.add_edge(0, 1, Attributes::new()).unwrap();
        graph.add_edge(1, 2, Attributes::new()).unwrap();
        graph.add_edge(2, 0, Attributes::new()).unwrap();
        graph
    }

    #[test]
    fn build_and_query() {
        log_init_test();
        //
        let mut graph = triangle();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.contains_edge(1, 0));
        assert_eq!(graph.neighbors(0).len(), 2);
        // parallel edge does not duplicate neighbours
        graph.add_edge(0, 1, attributes([("label", "=")])).unwrap();
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.neighbors(0).len(), 2);
        assert_eq!(graph.incident_edges(0).len(), 3);
        // refused edges
        assert_eq!(
            graph.add_edge(1, 1, Attributes::new()),
            Err(ContractionError::SelfLoop(1))
        );
        assert_eq!(
            graph.add_edge(1, 7, Attributes::new()),
            Err(ContractionError::UnknownNode(7))
        );
    } // end of build_and_query

    #[test]
    fn removal_keeps_order() {
        log_init_test();
        //
        let mut graph = triangle();
        graph.add_node(3, Attributes::new());
        graph.add_edge(3, 2, Attributes::new()).unwrap();
        let removed = graph.remove_node(1).unwrap();
        assert_eq!(removed.get_id(), 1);
        assert_eq!(graph.node_ids().collect::<Vec<NodeId>>(), vec![0, 2, 3]);
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.contains_edge(0, 1));
        let edges: Vec<(NodeId, NodeId)> = graph.edges().map(|(u, v, _)| (u, v)).collect();
        assert!(edges.contains(&(2, 0)));
        assert!(edges.contains(&(3, 2)));
    } // end of removal_keeps_order

    #[test]
    fn positions_and_meta() {
        log_init_test();
        //
        let mut graph = triangle();
        graph.set_node_attr(1, POSITION, AttrValue::from(10i64)).unwrap();
        graph.ensure_positions();
        assert_eq!(graph.node_attr(0, POSITION), Some(&AttrValue::Int(0)));
        assert_eq!(graph.node_attr(1, POSITION), Some(&AttrValue::Int(10)));
        assert_eq!(graph.node_attr(2, POSITION), Some(&AttrValue::Int(2)));
        //
        assert_eq!(graph.describe(), "<unnamed>");
        graph.set_meta("header", AttrValue::from("seq1"));
        assert_eq!(graph.describe(), "seq1");
        graph.set_meta(INFO, AttrValue::from("RNAfold"));
        graph.append_info("contracted");
        assert_eq!(graph.meta()[INFO], AttrValue::from("RNAfold\ncontracted"));
    } // end of positions_and_meta
} // end of mod tests
