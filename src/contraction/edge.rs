//! Edge contraction : nodes with equal value of an attribute, linked by edges going
//! toward increasing positions, are merged into the node of smallest position.
//!
//! The algorithm iterates to a fixed point. At each step a node n absorbs all its
//! neighbours w having the same attribute value and a greater position:
//! - edges of w are rerouted to n (edges between n and w, or between absorbed nodes, are dropped;
//!   an edge to a node already linked to n is merged into the existing edge, rerouted
//!   attributes overwriting existing ones. Absorbed nodes are taken by increasing position),
//! - w is removed and its contracted list goes into n's list.
//!
//! Each step removes at least one node, so for a graph of N nodes there are at most N-1 steps.
//! The resulting partition does not depend on the order in which merges are done.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::ContractionError;
use crate::graph::*;

use super::modifier::*;
use super::nesting::nest;
use super::params::ContractionParams;
use super::stream::Transform;

/// returns the quotient graph of graph by contraction on node_attribute.
/// Nodes of the quotient carry the sorted list of the original nodes they contract.
pub fn edge_contraction(
    graph: &AttributedGraph,
    node_attribute: &str,
) -> Result<AttributedGraph, ContractionError> {
    edge_contraction_counted(graph, node_attribute).map(|(g, _)| g)
}

/// as [edge_contraction] but also returns the number of merge steps done
pub fn edge_contraction_counted(
    graph: &AttributedGraph,
    node_attribute: &str,
) -> Result<(AttributedGraph, usize), ContractionError> {
    //
    let mut g = graph.clone();
    let ids: Vec<NodeId> = g.node_ids().collect();
    for id in ids {
        if let Some(node) = g.node_mut(id) {
            node.set_contracted(vec![id]);
        }
    }
    //
    let mut nb_merge = 0;
    loop {
        set_labels(&mut g, node_attribute);
        match find_merge(&g, node_attribute) {
            Some((n, greater)) => {
                log::trace!("node {} absorbs {:?}", n, greater);
                merge_into(&mut g, n, &greater)?;
                nb_merge += 1;
            }
            None => break,
        }
    }
    //
    let ids: Vec<NodeId> = g.node_ids().collect();
    for id in ids {
        match g.node_mut(id).and_then(|n| n.contracted_mut()) {
            Some(contracted) if !contracted.is_empty() => contracted.sort_unstable(),
            _ => return Err(ContractionError::MissingContractedSet(id)),
        }
    }
    log::debug!(
        "edge_contraction on {} : {} nodes -> {} nodes, {} merge steps",
        graph.describe(),
        graph.node_count(),
        g.node_count(),
        nb_merge
    );
    Ok((g, nb_merge))
} // end of edge_contraction_counted

// label of each node is set to its current contraction attribute value
fn set_labels(g: &mut AttributedGraph, node_attribute: &str) {
    let ids: Vec<NodeId> = g.node_ids().collect();
    for id in ids {
        if let Some(node) = g.node_mut(id) {
            if let Some(value) = node.get_attr(node_attribute).cloned() {
                node.set_attr(LABEL, value);
            }
        }
    }
}

fn get_position(node: &NodeData) -> Option<f64> {
    node.get_attr(POSITION).and_then(|p| p.to_f64())
}

// first node (in enumeration order) having neighbours to absorb, with these neighbours
fn find_merge(g: &AttributedGraph, node_attribute: &str) -> Option<(NodeId, Vec<NodeId>)> {
    for node in g.nodes() {
        let (value, position) = match (node.get_attr(node_attribute), get_position(node)) {
            (Some(v), Some(p)) => (v, p),
            _ => continue,
        };
        let mut greater: Vec<(f64, NodeId)> = g
            .neighbors(node.get_id())
            .into_iter()
            .filter_map(|w| {
                let w_node = g.node(w)?;
                let p = get_position(w_node)?;
                if w_node.get_attr(node_attribute) == Some(value) && p > position {
                    Some((p, w))
                } else {
                    None
                }
            })
            .collect();
        if !greater.is_empty() {
            greater.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            return Some((node.get_id(), greater.into_iter().map(|(_, w)| w).collect()));
        }
    }
    None
} // end of find_merge

// n absorbs greater nodes
fn merge_into(
    g: &mut AttributedGraph,
    n: NodeId,
    greater: &[NodeId],
) -> Result<(), ContractionError> {
    let absorbed_set: HashSet<NodeId, ahash::RandomState> = greater.iter().copied().collect();
    // collect edges to reroute before removing nodes
    let mut rerouted = Vec::<(NodeId, Attributes)>::new();
    for w in greater {
        for (other, attrs) in g.incident_edges(*w) {
            if other != n && !absorbed_set.contains(&other) {
                rerouted.push((other, attrs.clone()));
            }
        }
    }
    //
    let mut absorbed = Vec::<NodeId>::new();
    for w in greater {
        let data = g.remove_node(*w).ok_or(ContractionError::UnknownNode(*w))?;
        match data.get_contracted() {
            Some(c) => absorbed.extend_from_slice(c),
            None => return Err(ContractionError::MissingContractedSet(*w)),
        }
    }
    //
    for (other, attrs) in rerouted {
        match g.edge_attrs_mut(n, other) {
            Some(existing) => {
                log::trace!("edge {} {} already present, rerouted attributes merged", n, other);
                existing.extend(attrs);
            }
            None => {
                g.add_edge(n, other, attrs)?;
            }
        }
    }
    //
    let contracted = g
        .node_mut(n)
        .and_then(|d| d.contracted_mut())
        .ok_or(ContractionError::MissingContractedSet(n))?;
    contracted.extend(absorbed);
    Ok(())
} // end of merge_into

//=====================================================================================

/// Contraction of graphs : edge contraction, then aggregation of attributes by modifiers,
/// weight rescaling and optionally nesting.
#[derive(Debug, Clone)]
pub struct Contract {
    params: ContractionParams,
}

impl Contract {
    /// checks parameters, so errors of configuration are detected before any graph is processed
    pub fn new(params: ContractionParams) -> Result<Self, ContractionError> {
        params.validate()?;
        log::debug!(
            "Contract on attribute {}, nesting : {}, modifiers :\n{}",
            params.get_contraction_attribute(),
            params.is_nesting(),
            serialize_modifiers(params.get_modifiers())
        );
        Ok(Contract { params })
    }

    pub fn get_params(&self) -> &ContractionParams {
        &self.params
    }
} // end of impl Contract

impl Transform for Contract {
    fn transform_one(&self, graph: &AttributedGraph) -> Result<AttributedGraph, ContractionError> {
        // positions are assigned on our copy, the caller graph is left untouched
        let mut prepared = graph.clone();
        prepared.ensure_positions();
        //
        let mut contracted = edge_contraction(&prepared, self.params.get_contraction_attribute())?;
        contracted.append_info(&serialize_modifiers(self.params.get_modifiers()));
        apply_modifiers(
            &mut contracted,
            &prepared,
            self.params.get_modifiers(),
            self.params.get_separator(),
            self.params.get_weight_scaling_factor(),
        )?;
        //
        if self.params.is_nesting() {
            nest(&prepared, &contracted)
        } else {
            Ok(contracted)
        }
    } // end of transform_one
} // end of impl Transform for Contract

//=====================================================================================

// end of mod tests
