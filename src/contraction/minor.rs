//! Graph minor driven by an explicit partition of nodes.
//!
//! Each node belongs to one or more parts. The minor has one node per distinct part,
//! contracting all nodes assigned to that part, so contracted lists may overlap.
//! Two parts are linked if some original edge links a node of the first to a node of the second.
//! The quotient edge gets the attributes of the first original edge witnessing it.

use indexmap::IndexMap;

use crate::error::ContractionError;
use crate::graph::*;

use super::modifier::*;
use super::nesting::nest;
use super::params::MinorParams;
use super::stream::Transform;

/// A part a node belongs to : an id and a human readable name
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub id: AttrValue,
    pub name: String,
}

impl Part {
    pub fn new(id: AttrValue, name: &str) -> Self {
        Part {
            id,
            name: String::from(name),
        }
    }

    // part ids are compared through their serialized form
    fn key(&self) -> String {
        self.id.to_text()
    }
} // end of impl Part

/// For each node, the ordered list of parts it belongs to.
#[derive(Clone, Debug, Default)]
pub struct PartitionAssignment {
    parts: IndexMap<NodeId, Vec<Part>>,
}

impl PartitionAssignment {
    pub fn new() -> Self {
        PartitionAssignment::default()
    }

    /// adds a part to the list of parts of node
    pub fn assign(&mut self, node: NodeId, part: Part) {
        self.parts.entry(node).or_insert_with(Vec::new).push(part);
    }

    /// sets the parts of node from aligned lists of ids and names
    pub fn set_parts(
        &mut self,
        node: NodeId,
        ids: Vec<AttrValue>,
        names: Vec<String>,
    ) -> Result<(), ContractionError> {
        if ids.len() != names.len() {
            return Err(ContractionError::MalformedPartition {
                node,
                nb_ids: ids.len(),
                nb_names: names.len(),
            });
        }
        let parts = ids
            .into_iter()
            .zip(names)
            .map(|(id, name)| Part { id, name })
            .collect();
        self.parts.insert(node, parts);
        Ok(())
    } // end of set_parts

    pub fn get_parts(&self, node: NodeId) -> Option<&[Part]> {
        self.parts.get(&node).map(|p| p.as_slice())
    }

    /// reads parts from 2 node attributes holding aligned lists of ids and names.
    /// A scalar attribute is taken as a list of one element. Nodes without part_id get no part.
    pub fn from_attributes(
        graph: &AttributedGraph,
        part_id: &str,
        part_name: &str,
    ) -> Result<Self, ContractionError> {
        let mut assignment = PartitionAssignment::new();
        for node in graph.nodes() {
            let ids = match node.get_attr(part_id) {
                Some(v) => as_list(v),
                None => continue,
            };
            let names: Vec<String> = match node.get_attr(part_name) {
                Some(v) => as_list(v).iter().map(|n| n.to_text()).collect(),
                None => Vec::new(),
            };
            assignment.set_parts(node.get_id(), ids, names)?;
        }
        Ok(assignment)
    } // end of from_attributes
} // end of impl PartitionAssignment

fn as_list(value: &AttrValue) -> Vec<AttrValue> {
    match value.as_list() {
        Some(l) => l.to_vec(),
        None => vec![value.clone()],
    }
}

// a part of the minor : id, last name seen, members
struct PartNode {
    id: AttrValue,
    name: String,
    members: Vec<NodeId>,
}

/// Computes the minor of graph for the given assignment.
/// Quotient nodes are numbered 0.. in order of first appearance of their part,
/// and carry part_id_attr, part_name_attr and label attributes.
/// Graph metadata is copied onto the minor.
pub fn minor(
    graph: &AttributedGraph,
    assignment: &PartitionAssignment,
    part_id_attr: &str,
    part_name_attr: &str,
) -> Result<AttributedGraph, ContractionError> {
    let mut part_nodes = IndexMap::<String, PartNode>::new();
    for u in graph.node_ids() {
        let parts = match assignment.get_parts(u) {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ContractionError::MissingPartition(u)),
        };
        for part in parts {
            let part_node = part_nodes.entry(part.key()).or_insert_with(|| PartNode {
                id: part.id.clone(),
                name: part.name.clone(),
                members: Vec::new(),
            });
            part_node.name = part.name.clone();
            part_node.members.push(u);
        }
    }
    //
    let mut minor_graph = AttributedGraph::new();
    *minor_graph.meta_mut() = graph.meta().clone();
    for (rank, part_node) in part_nodes.values().enumerate() {
        let id = rank as NodeId;
        minor_graph.add_node(
            id,
            attributes([
                (part_id_attr, part_node.id.clone()),
                (part_name_attr, AttrValue::from(part_node.name.as_str())),
                (LABEL, AttrValue::from(part_node.name.as_str())),
            ]),
        );
        if let Some(n) = minor_graph.node_mut(id) {
            n.set_contracted(part_node.members.clone());
        }
    }
    //
    for (u, v, attrs) in graph.edges() {
        // parts of u and v exist, checked above
        let parts_u = assignment.get_parts(u).unwrap_or(&[]);
        let parts_v = assignment.get_parts(v).unwrap_or(&[]);
        for pu in parts_u {
            for pv in parts_v {
                let a = part_nodes.get_index_of(&pu.key());
                let b = part_nodes.get_index_of(&pv.key());
                if let (Some(a), Some(b)) = (a, b) {
                    let (a, b) = (a as NodeId, b as NodeId);
                    if a != b && !minor_graph.contains_edge(a, b) {
                        minor_graph.add_edge(a, b, attrs.clone())?;
                    }
                }
            }
        }
    }
    log::debug!(
        "minor on {} : {} nodes -> {} parts, {} edges",
        graph.describe(),
        graph.node_count(),
        minor_graph.node_count(),
        minor_graph.edge_count()
    );
    Ok(minor_graph)
} // end of minor

//=====================================================================================

/// Minor of graphs whose nodes carry their parts in attributes, then aggregation by modifiers,
/// weight rescaling and optionally nesting.
#[derive(Debug, Clone)]
pub struct Minor {
    params: MinorParams,
}

impl Minor {
    pub fn new(params: MinorParams) -> Result<Self, ContractionError> {
        params.validate()?;
        log::debug!(
            "Minor on attributes {} / {}, nesting : {}, modifiers :\n{}",
            params.get_part_id(),
            params.get_part_name(),
            params.is_nesting(),
            serialize_modifiers(params.get_modifiers())
        );
        Ok(Minor { params })
    }

    pub fn get_params(&self) -> &MinorParams {
        &self.params
    }

    /// minor of graph with an explicit assignment, followed by aggregation and nesting.
    pub fn transform_with(
        &self,
        graph: &AttributedGraph,
        assignment: &PartitionAssignment,
    ) -> Result<AttributedGraph, ContractionError> {
        let mut minor_graph = minor(
            graph,
            assignment,
            self.params.get_part_id(),
            self.params.get_part_name(),
        )?;
        minor_graph.append_info(&serialize_modifiers(self.params.get_modifiers()));
        apply_modifiers(
            &mut minor_graph,
            graph,
            self.params.get_modifiers(),
            self.params.get_separator(),
            self.params.get_weight_scaling_factor(),
        )?;
        if self.params.is_nesting() {
            nest(graph, &minor_graph)
        } else {
            Ok(minor_graph)
        }
    } // end of transform_with
} // end of impl Minor

impl Transform for Minor {
    fn transform_one(&self, graph: &AttributedGraph) -> Result<AttributedGraph, ContractionError> {
        let assignment = PartitionAssignment::from_attributes(
            graph,
            self.params.get_part_id(),
            self.params.get_part_name(),
        )?;
        self.transform_with(graph, &assignment)
    }
} // end of impl Transform for Minor

//=====================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    use crate::contraction::reduction::Reduction;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // path 0-1-2-3-4, node 2 in parts 1 and 2
    //   parts : 0,1 -> stem (1) ; 2 -> stem (1) and loop (2) ; 3,4 -> loop (2)
    fn partitioned_path() -> AttributedGraph {
        let mut graph = AttributedGraph::new();
        let parts: [(Vec<i64>, Vec<&str>); 5] = [
            (vec![1], vec!["stem"]),
            (vec![1], vec!["stem"]),
            (vec![1, 2], vec!["stem", "loop"]),
            (vec![2], vec!["loop"]),
            (vec![2], vec!["loop"]),
        ];
        for (i, (ids, names)) in parts.iter().enumerate() {
            graph.add_node(
                i as NodeId,
                attributes([
                    ("part_id", AttrValue::from(ids.clone())),
                    ("part_name", AttrValue::from(names.clone())),
                    ("weight", AttrValue::from(1i64)),
                ]),
            );
            if i > 0 {
                graph
                    .add_edge(i as NodeId, (i - 1) as NodeId, attributes([(LABEL, AttrValue::from(format!("e{}", i)))]))
                    .unwrap();
            }
        }
        graph.set_meta("id", AttrValue::from("path5"));
        graph
    }

    #[test]
    fn minor_coverage() {
        log_init_test();
        //
        let graph = partitioned_path();
        let assignment = PartitionAssignment::from_attributes(&graph, "part_id", "part_name").unwrap();
        let minor_graph = minor(&graph, &assignment, "part_id", "part_name").unwrap();
        assert_eq!(minor_graph.node_count(), 2);
        assert_eq!(minor_graph.node(0).unwrap().get_contracted(), Some(&[0, 1, 2][..]));
        assert_eq!(minor_graph.node(1).unwrap().get_contracted(), Some(&[2, 3, 4][..]));
        assert_eq!(minor_graph.node_attr(0, LABEL), Some(&AttrValue::from("stem")));
        assert_eq!(minor_graph.node_attr(1, "part_id"), Some(&AttrValue::Int(2)));
        // every original node is covered
        for u in graph.node_ids() {
            assert!(minor_graph.nodes().any(|n| n.get_contracted().unwrap().contains(&u)));
        }
        // metadata kept
        assert_eq!(minor_graph.meta()["id"], AttrValue::from("path5"));
    } // end of minor_coverage

    #[test]
    fn minor_first_edge_wins() {
        log_init_test();
        //
        let graph = partitioned_path();
        let assignment = PartitionAssignment::from_attributes(&graph, "part_id", "part_name").unwrap();
        let minor_graph = minor(&graph, &assignment, "part_id", "part_name").unwrap();
        // edges e2 (1-2), e3 (2-3) witness stem-loop. e2 comes first
        assert_eq!(minor_graph.edge_count(), 1);
        let (_, _, attrs) = minor_graph.edges().next().unwrap();
        assert_eq!(attrs.get(LABEL), Some(&AttrValue::from("e2")));
        for (u, v, _) in minor_graph.edges() {
            assert_ne!(u, v);
        }
    } // end of minor_first_edge_wins

    #[test]
    fn minor_partition_errors() {
        log_init_test();
        //
        let mut graph = partitioned_path();
        graph.add_node(9, Attributes::new());
        let assignment = PartitionAssignment::from_attributes(&graph, "part_id", "part_name").unwrap();
        assert_eq!(
            minor(&graph, &assignment, "part_id", "part_name").unwrap_err(),
            ContractionError::MissingPartition(9)
        );
        //
        let mut assignment = PartitionAssignment::new();
        let res = assignment.set_parts(0, vec![AttrValue::from(1i64)], Vec::new());
        assert_eq!(
            res,
            Err(ContractionError::MalformedPartition {
                node: 0,
                nb_ids: 1,
                nb_names: 0
            })
        );
    } // end of minor_partition_errors

    #[test]
    fn minor_explicit_assignment() {
        log_init_test();
        //
        let graph = partitioned_path();
        let mut assignment = PartitionAssignment::new();
        for u in graph.node_ids() {
            let part = if u < 3 { Part::new(AttrValue::from("left"), "L") } else { Part::new(AttrValue::from("right"), "R") };
            assignment.assign(u, part);
        }
        let params = MinorParams::new(
            "part_id",
            "part_name",
            false,
            2.,
            vec![ContractionModifier::new("weight", "weight", Reduction::Sum)],
        );
        let minor_transform = Minor::new(params).unwrap();
        let minor_graph = minor_transform.transform_with(&graph, &assignment).unwrap();
        assert_eq!(minor_graph.node_count(), 2);
        assert_eq!(minor_graph.node_attr(0, "weight"), Some(&AttrValue::Float(6.)));
        assert_eq!(minor_graph.node_attr(1, "weight"), Some(&AttrValue::Float(4.)));
        assert_eq!(minor_graph.edge_count(), 1);
    } // end of minor_explicit_assignment

    #[test]
    fn minor_transform_nested() {
        log_init_test();
        //
        let graph = partitioned_path();
        let mut params = MinorParams::default();
        params.nesting = true;
        let minor_transform = Minor::new(params).unwrap();
        let nested = minor_transform.transform_one(&graph).unwrap();
        // node 2 is in 2 parts : 6 nesting edges
        let nb_nesting = nested
            .edges()
            .filter(|(_, _, a)| a.get("nesting") == Some(&AttrValue::Bool(true)))
            .count();
        assert_eq!(nb_nesting, 6);
        assert_eq!(nested.node_count(), 7);
        assert_eq!(nested.edge_count(), 4 + 1 + 6);
    } // end of minor_transform_nested
} // end of mod tests
