//! This module implements quotients of attributed graphs as used to build
//! hierarchical (nested) graphs for graph kernels.
//!
//! Two ways of grouping nodes are provided:
//! - *contraction* ([edge::edge_contraction]): connected nodes sharing the value of an attribute
//!   are merged into the node of smallest position. The groups are implicit and form a partition.
//! - *minor* ([minor::minor]): each node carries the list of parts it belongs to. Parts can overlap.
//!
//! In both cases each quotient node keeps the list of original nodes it contracts.
//! Its attributes are then computed from theirs by a list of [modifier::ContractionModifier],
//! each applying a [reduction::Reduction] (histogram, sum, average, categorical, set_categorical).
//!
//! The nesting graph ([nesting::nest]) joins the original graph and its quotient with edges from
//! each quotient node to its original nodes. Graph kernels can then treat nesting edges as a
//! distinct edge class, see for example:
//!
//! - Costa, De Grave. Fast neighborhood subgraph pairwise distance kernel. ICML 2010
//!
//! Transformations ([edge::Contract], [minor::Minor]) apply to lazy sequences of graphs
//! through the [stream::Transform] trait.

/// Defines reductions of attributes.
pub mod reduction;

/// Defines modifiers, and their application to quotient nodes.
pub mod modifier;

/// Defines contraction and minor parameters.
pub mod params;

/// fixed point edge contraction.
pub mod edge;

/// minors from explicit partitions.
pub mod minor;

/// original + quotient graph.
pub mod nesting;

/// lazy application to sequences of graphs.
pub mod stream;
