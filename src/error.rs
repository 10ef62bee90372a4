//! Errors raised by the contraction and minor engines.
//!
//! Errors come in two families:
//! - configuration errors (unknown reduction, malformed modifier, bad parameter) are
//!   returned before any graph is processed and abort the whole stream.
//! - item errors concern one graph only. A stream logs them and skips the graph.

use crate::graph::NodeId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractionError {
    /// a quotient node has no (or an empty) list of contracted nodes
    #[error("empty contraction list for node {0}")]
    MissingContractedSet(NodeId),

    /// a modifier names a reduction we do not know
    #[error("undefined attribute reduction : {0}")]
    UndefinedAttributeReduction(String),

    /// a modifier line is not of the form "attribute_in:a attribute_out:b reduction:r"
    #[error("malformed contraction modifier : {0}")]
    MalformedModifier(String),

    /// a parameter is out of its domain
    #[error("invalid parameter {name} : {reason}")]
    InvalidParameter { name: String, reason: String },

    /// sum, average or weight rescaling met a value that is not a number
    #[error("attribute {attribute} of node {node} is not numeric : {value}")]
    NumericParse {
        attribute: String,
        node: NodeId,
        value: String,
    },

    /// average over no node
    #[error("average of attribute {0} over an empty node set")]
    EmptyIdSet(String),

    #[error("node {0} not in graph")]
    UnknownNode(NodeId),

    #[error("self loop on node {0} refused")]
    SelfLoop(NodeId),

    /// node has no partition id in a minor
    #[error("node {0} belongs to no partition")]
    MissingPartition(NodeId),

    #[error("node {node} has {nb_ids} partition ids but {nb_names} partition names")]
    MalformedPartition {
        node: NodeId,
        nb_ids: usize,
        nb_names: usize,
    },

    /// sequence / dot bracket inconsistency
    #[error("malformed structure at position {position} : {reason}")]
    MalformedStructure { position: usize, reason: String },
} // end of enum ContractionError

impl ContractionError {
    /// true for errors that concern the configuration and not a particular graph.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ContractionError::UndefinedAttributeReduction(_)
                | ContractionError::MalformedModifier(_)
                | ContractionError::InvalidParameter { .. }
        )
    }
} // end of impl ContractionError

// end of mod tests
