//! Attributed graphs : the data the contraction engines consume and produce.
//!
//! Nodes and edges carry ordered maps of attributes, the graph itself carries metadata
//! (info, sequence, id ...) that transformations must propagate.

/// attribute values
pub mod attributes;

/// the multigraph on top of petgraph.
pub mod agraph;

pub use attributes::*;
pub use agraph::*;
