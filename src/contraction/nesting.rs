//! Nesting graph : an original graph and its quotient in one graph, with an edge from each
//! quotient node to each original node it contracts.
//!
//! Ids of the nesting graph are renumbered : original nodes get 0..nb_original in
//! enumeration order, quotient nodes follow. The [IdMap] returned by [nest_mapped] gives
//! the correspondence.

use indexmap::IndexMap;

use crate::error::ContractionError;
use crate::graph::*;

/// edge attribute flagging nesting edges
pub const NESTING: &str = "nesting";

/// attributes of a nesting edge : label ".", length 0.1, nesting true
pub fn nesting_attributes() -> Attributes {
    attributes([
        (LABEL, AttrValue::from(".")),
        ("length", AttrValue::from(0.1)),
        (NESTING, AttrValue::from(true)),
    ])
}

/// Translates node ids of the original and quotient graphs to ids in the nesting graph.
pub struct IdMap {
    original: IndexMap<NodeId, NodeId>,
    quotient: IndexMap<NodeId, NodeId>,
} // end of struct IdMap

impl IdMap {
    /// id in nesting graph of an original node
    pub fn get_original(&self, id: NodeId) -> Option<NodeId> {
        self.original.get(&id).copied()
    }

    /// id in nesting graph of a quotient node
    pub fn get_quotient(&self, id: NodeId) -> Option<NodeId> {
        self.quotient.get(&id).copied()
    }
} // end of impl IdMap

// info of original followed by what the quotient info adds to it
fn merge_info(original: Option<&AttrValue>, quotient: Option<&AttrValue>) -> Option<String> {
    let q_info = quotient?.to_text();
    let o_info = original.map(|v| v.to_text()).unwrap_or_default();
    if q_info == o_info {
        return None;
    }
    let merged = match q_info.strip_prefix(o_info.as_str()) {
        Some(extension) => format!("{}{}", o_info, extension),
        None if o_info.is_empty() => q_info,
        None => format!("{}\n{}", o_info, q_info),
    };
    Some(merged)
}

/// builds the nesting graph of original and its quotient.
/// Each node of quotient must have a contracted list of ids of original.
pub fn nest(
    original: &AttributedGraph,
    quotient: &AttributedGraph,
) -> Result<AttributedGraph, ContractionError> {
    nest_mapped(original, quotient).map(|(g, _)| g)
}

/// as [nest] but also returns the id translation
pub fn nest_mapped(
    original: &AttributedGraph,
    quotient: &AttributedGraph,
) -> Result<(AttributedGraph, IdMap), ContractionError> {
    let mut nested = AttributedGraph::new();
    let mut next_id: NodeId = 0;
    // copy of original
    let mut original_map = IndexMap::<NodeId, NodeId>::with_capacity(original.node_count());
    for node in original.nodes() {
        nested.add_node(next_id, node.get_attrs().clone());
        if let Some(c) = node.get_contracted() {
            // original may itself be a quotient, its lists refer to another graph
            if let Some(n) = nested.node_mut(next_id) {
                n.set_contracted(c.to_vec());
            }
        }
        original_map.insert(node.get_id(), next_id);
        next_id += 1;
    }
    for (u, v, attrs) in original.edges() {
        nested.add_edge(original_map[&u], original_map[&v], attrs.clone())?;
    }
    // copy of quotient, contracted lists translated
    let mut quotient_map = IndexMap::<NodeId, NodeId>::with_capacity(quotient.node_count());
    let mut nb_nesting = 0;
    for node in quotient.nodes() {
        let contracted = match node.get_contracted() {
            Some(c) if !c.is_empty() => c,
            _ => return Err(ContractionError::MissingContractedSet(node.get_id())),
        };
        let translated = contracted
            .iter()
            .map(|m| {
                original_map
                    .get(m)
                    .copied()
                    .ok_or(ContractionError::UnknownNode(*m))
            })
            .collect::<Result<Vec<NodeId>, ContractionError>>()?;
        nested.add_node(next_id, node.get_attrs().clone());
        for m in &translated {
            nested.add_edge(next_id, *m, nesting_attributes())?;
            nb_nesting += 1;
        }
        if let Some(n) = nested.node_mut(next_id) {
            n.set_contracted(translated);
        }
        quotient_map.insert(node.get_id(), next_id);
        next_id += 1;
    }
    for (u, v, attrs) in quotient.edges() {
        nested.add_edge(quotient_map[&u], quotient_map[&v], attrs.clone())?;
    }
    // metadata, original has precedence except for what the quotient added to info
    let mut meta = quotient.meta().clone();
    meta.extend(original.meta().iter().map(|(k, v)| (k.clone(), v.clone())));
    if let Some(info) = merge_info(original.meta().get(INFO), quotient.meta().get(INFO)) {
        meta.insert(String::from(INFO), AttrValue::from(info));
    }
    *nested.meta_mut() = meta;
    //
    log::debug!(
        "nest {} : {} nodes, {} edges, {} nesting edges",
        nested.describe(),
        nested.node_count(),
        nested.edge_count(),
        nb_nesting
    );
    let idmap = IdMap {
        original: original_map,
        quotient: quotient_map,
    };
    Ok((nested, idmap))
} // end of nest_mapped

//=====================================================================================

// end of mod tests
