//! To ease access to most frequently items
//! 


pub use crate::error::ContractionError;

pub use crate::graph::*;

pub use crate::contraction::reduction::*;
pub use crate::contraction::modifier::*;
pub use crate::contraction::params::*;
pub use crate::contraction::edge::{edge_contraction, edge_contraction_counted, Contract};
pub use crate::contraction::minor::{minor, Minor, Part, PartitionAssignment};
pub use crate::contraction::nesting::{nest, nest_mapped, nesting_attributes, IdMap};
pub use crate::contraction::stream::{transform_par, GraphStream, Transform};

pub use crate::io::dotbracket::sequence_dotbracket_to_graph;
pub use crate::io::csv::{read_structures_csv, write_graph_csv};
