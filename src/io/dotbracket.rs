//! Builds the graph of an RNA secondary structure given in dot bracket notation.
//!
//! Node i is nucleotide i of the sequence, with label the nucleotide and position i.
//! Consecutive nucleotides are linked by backbone edges, matching brackets by basepair edges.
//! Folding the sequence is not done here, the structure comes from an external tool.

use crate::error::ContractionError;
use crate::graph::*;

/// label of backbone edges
pub const BACKBONE_LABEL: &str = "-";

/// label of basepair edges
pub const BASEPAIR_LABEL: &str = "=";

fn edge_attributes(label: &str, kind: &str) -> Attributes {
    attributes([
        (LABEL, AttrValue::from(label)),
        ("type", AttrValue::from(kind)),
        ("len", AttrValue::from(1i64)),
    ])
}

/// returns the graph of sequence folded as described by structure.
/// Only '(' and ')' pair nucleotides, any other character is unpaired.
pub fn sequence_dotbracket_to_graph(
    sequence: &str,
    structure: &str,
) -> Result<AttributedGraph, ContractionError> {
    let nucleotides: Vec<char> = sequence.chars().collect();
    let brackets: Vec<char> = structure.chars().collect();
    if nucleotides.len() != brackets.len() {
        return Err(ContractionError::MalformedStructure {
            position: nucleotides.len().min(brackets.len()),
            reason: format!(
                "sequence length {} differs from structure length {}",
                nucleotides.len(),
                brackets.len()
            ),
        });
    }
    //
    let mut graph = AttributedGraph::new();
    let mut lifo = Vec::<NodeId>::new();
    for (i, (c, b)) in nucleotides.iter().zip(brackets.iter()).enumerate() {
        let id = i as NodeId;
        graph.add_node(
            id,
            attributes([(LABEL, AttrValue::from(*c)), (POSITION, AttrValue::from(i))]),
        );
        if i > 0 {
            graph.add_edge(id, id - 1, edge_attributes(BACKBONE_LABEL, "backbone"))?;
        }
        match b {
            '(' => lifo.push(id),
            ')' => match lifo.pop() {
                Some(j) => {
                    graph.add_edge(id, j, edge_attributes(BASEPAIR_LABEL, "basepair"))?;
                }
                None => {
                    return Err(ContractionError::MalformedStructure {
                        position: i,
                        reason: String::from("closing bracket without opening bracket"),
                    });
                }
            },
            _ => {}
        }
    }
    if let Some(j) = lifo.pop() {
        return Err(ContractionError::MalformedStructure {
            position: j as usize,
            reason: String::from("opening bracket never closed"),
        });
    }
    graph.set_meta("sequence", AttrValue::from(sequence));
    graph.set_meta("structure", AttrValue::from(structure));
    Ok(graph)
} // end of sequence_dotbracket_to_graph

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn hairpin() {
        log_init_test();
        //
        let graph = sequence_dotbracket_to_graph("GGAAACC", "((...))").unwrap();
        assert_eq!(graph.node_count(), 7);
        // 6 backbone, 2 basepairs
        assert_eq!(graph.edge_count(), 8);
        assert!(graph.contains_edge(0, 6));
        assert!(graph.contains_edge(1, 5));
        assert_eq!(graph.node_attr(2, LABEL), Some(&AttrValue::from("A")));
        assert_eq!(graph.node_attr(4, POSITION), Some(&AttrValue::Int(4)));
        let nb_basepair = graph
            .edges()
            .filter(|(_, _, a)| a.get(LABEL) == Some(&AttrValue::from(BASEPAIR_LABEL)))
            .count();
        assert_eq!(nb_basepair, 2);
        assert_eq!(graph.meta()["structure"], AttrValue::from("((...))"));
    } // end of hairpin

    #[test]
    fn malformed() {
        log_init_test();
        //
        assert!(matches!(
            sequence_dotbracket_to_graph("GGA", "(("),
            Err(ContractionError::MalformedStructure { position: 2, .. })
        ));
        assert!(matches!(
            sequence_dotbracket_to_graph("GAC", ".)."),
            Err(ContractionError::MalformedStructure { position: 1, .. })
        ));
        assert!(matches!(
            sequence_dotbracket_to_graph("GAC", "(.."),
            Err(ContractionError::MalformedStructure { position: 0, .. })
        ));
    } // end of malformed
} // end of mod tests
