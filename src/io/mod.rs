//! Input / output of graphs.
//!
//! Graphs of RNA secondary structures are built from dot bracket strings, read from a csv file.
//! Graphs can be dumped as csv for inspection.

/// dot bracket to graph
pub mod dotbracket;

/// csv load and dump
pub mod csv;
