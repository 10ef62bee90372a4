//! Reductions compute the attribute of a quotient node from the attributes of the
//! original nodes it contracts.
//!
//! Each reduction reads one attribute over a list of node ids of the *original* graph
//! and never modifies that graph.
//!
//! - histogram : count of each distinct value, missing values count as "N/A".
//! - sum, average : values parsed as numbers, missing values count as 1.
//! - categorical : sorted serialized values joined with a separator, duplicates kept.
//! - set_categorical : as categorical but each value appears once.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ContractionError;
use crate::graph::*;

/// stands for a missing value in histogram and categorical reductions
pub const NOT_AVAILABLE: &str = "N/A";

/// default separator of categorical reductions
pub const DEFAULT_SEPARATOR: &str = ".";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    Histogram,
    Sum,
    Average,
    Categorical,
    SetCategorical,
}

impl Reduction {
    /// all reductions, in documentation order
    pub const ALL: [Reduction; 5] = [
        Reduction::Histogram,
        Reduction::Sum,
        Reduction::Average,
        Reduction::Categorical,
        Reduction::SetCategorical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Reduction::Histogram => "histogram",
            Reduction::Sum => "sum",
            Reduction::Average => "average",
            Reduction::Categorical => "categorical",
            Reduction::SetCategorical => "set_categorical",
        }
    }

    /// computes the reduction of attribute_in over nodes ids of graph.
    /// separator is used only by categorical reductions.
    pub fn reduce(
        &self,
        attribute_in: &str,
        graph: &AttributedGraph,
        ids: &[NodeId],
        separator: &str,
    ) -> Result<AttrValue, ContractionError> {
        match self {
            Reduction::Histogram => contraction_histogram(attribute_in, graph, ids),
            Reduction::Sum => contraction_sum(attribute_in, graph, ids),
            Reduction::Average => contraction_average(attribute_in, graph, ids),
            Reduction::Categorical => {
                contraction_categorical(attribute_in, graph, ids, separator)
            }
            Reduction::SetCategorical => {
                contraction_set_categorical(attribute_in, graph, ids, separator)
            }
        }
    } // end of reduce
} // end of impl Reduction

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Reduction {
    type Err = ContractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reduction::ALL
            .iter()
            .find(|r| r.name() == s)
            .copied()
            .ok_or_else(|| ContractionError::UndefinedAttributeReduction(String::from(s)))
    }
}

//=====================================================================================

// values of attribute for each id, None when unset. Fails on ids not in graph
fn get_values<'a>(
    attribute_in: &str,
    graph: &'a AttributedGraph,
    ids: &[NodeId],
) -> Result<Vec<(NodeId, Option<&'a AttrValue>)>, ContractionError> {
    ids.iter()
        .map(|id| {
            let node = graph.node(*id).ok_or(ContractionError::UnknownNode(*id))?;
            Ok((*id, node.get_attr(attribute_in)))
        })
        .collect()
} // end of get_values

fn get_numeric_values(
    attribute_in: &str,
    graph: &AttributedGraph,
    ids: &[NodeId],
) -> Result<Vec<f64>, ContractionError> {
    let values = get_values(attribute_in, graph, ids)?;
    let mut numeric = Vec::<f64>::with_capacity(values.len());
    for (id, value) in values {
        match value {
            None => numeric.push(1.),
            Some(v) => match v.to_f64() {
                Some(f) => numeric.push(f),
                None => {
                    return Err(ContractionError::NumericParse {
                        attribute: String::from(attribute_in),
                        node: id,
                        value: v.to_text(),
                    });
                }
            },
        }
    }
    Ok(numeric)
} // end of get_numeric_values

fn get_serialized_values(
    attribute_in: &str,
    graph: &AttributedGraph,
    ids: &[NodeId],
) -> Result<Vec<String>, ContractionError> {
    let values = get_values(attribute_in, graph, ids)?;
    Ok(values
        .iter()
        .map(|(_, v)| match v {
            Some(v) => v.to_text(),
            None => String::from(NOT_AVAILABLE),
        })
        .collect())
}

/// counts occurrences of each value, most frequent first.
/// Values with the same count stay in order of first occurrence.
pub fn contraction_histogram(
    attribute_in: &str,
    graph: &AttributedGraph,
    ids: &[NodeId],
) -> Result<AttrValue, ContractionError> {
    let values = get_serialized_values(attribute_in, graph, ids)?;
    let mut counts = IndexMap::<String, usize>::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(AttrValue::Histogram(sorted.into_iter().collect()))
} // end of contraction_histogram

pub fn contraction_sum(
    attribute_in: &str,
    graph: &AttributedGraph,
    ids: &[NodeId],
) -> Result<AttrValue, ContractionError> {
    let values = get_numeric_values(attribute_in, graph, ids)?;
    Ok(AttrValue::Float(values.iter().sum()))
}

/// mean of values. An empty id list is an error.
pub fn contraction_average(
    attribute_in: &str,
    graph: &AttributedGraph,
    ids: &[NodeId],
) -> Result<AttrValue, ContractionError> {
    if ids.is_empty() {
        return Err(ContractionError::EmptyIdSet(String::from(attribute_in)));
    }
    let values = get_numeric_values(attribute_in, graph, ids)?;
    let sum: f64 = values.iter().sum();
    Ok(AttrValue::Float(sum / values.len() as f64))
}

pub fn contraction_categorical(
    attribute_in: &str,
    graph: &AttributedGraph,
    ids: &[NodeId],
    separator: &str,
) -> Result<AttrValue, ContractionError> {
    let mut values = get_serialized_values(attribute_in, graph, ids)?;
    values.sort();
    Ok(AttrValue::Str(values.join(separator)))
}

pub fn contraction_set_categorical(
    attribute_in: &str,
    graph: &AttributedGraph,
    ids: &[NodeId],
    separator: &str,
) -> Result<AttrValue, ContractionError> {
    let mut values = get_serialized_values(attribute_in, graph, ids)?;
    values.sort();
    values.dedup();
    Ok(AttrValue::Str(values.join(separator)))
}

//=====================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // 3 nodes with weight 3,3,5 and type a,a,b. node 3 has nothing
    fn small_graph() -> AttributedGraph {
        let mut graph = AttributedGraph::new();
        graph.add_node(0, attributes([("weight", AttrValue::from(3i64)), ("type", AttrValue::from("a"))]));
        graph.add_node(1, attributes([("weight", AttrValue::from("3")), ("type", AttrValue::from("a"))]));
        graph.add_node(2, attributes([("weight", AttrValue::from(5.)), ("type", AttrValue::from("b"))]));
        graph.add_node(3, Attributes::new());
        graph
    }

    #[test]
    fn numeric_reductions() {
        log_init_test();
        //
        let graph = small_graph();
        let ids = [0, 1, 2];
        let sum = Reduction::Sum.reduce("weight", &graph, &ids, ".").unwrap();
        assert_eq!(sum, AttrValue::Float(11.));
        let average = Reduction::Average.reduce("weight", &graph, &ids, ".").unwrap();
        match average {
            AttrValue::Float(f) => assert!((f - 3.6667).abs() < 1.0e-4),
            _ => panic!("average should be a float"),
        }
        // missing value counts as 1
        let sum = contraction_sum("weight", &graph, &[2, 3]).unwrap();
        assert_eq!(sum, AttrValue::Float(6.));
    } // end of numeric_reductions

    #[test]
    fn numeric_failures() {
        log_init_test();
        //
        let graph = small_graph();
        let res = contraction_sum("type", &graph, &[0]);
        assert_eq!(
            res,
            Err(ContractionError::NumericParse {
                attribute: String::from("type"),
                node: 0,
                value: String::from("a")
            })
        );
        assert_eq!(
            contraction_average("weight", &graph, &[]),
            Err(ContractionError::EmptyIdSet(String::from("weight")))
        );
        assert_eq!(
            contraction_sum("weight", &graph, &[9]),
            Err(ContractionError::UnknownNode(9))
        );
    } // end of numeric_failures

    #[test]
    fn categorical_reductions() {
        log_init_test();
        //
        let graph = small_graph();
        let ids = [2, 0, 1];
        let set_cat = Reduction::SetCategorical.reduce("type", &graph, &ids, ".").unwrap();
        assert_eq!(set_cat, AttrValue::from("a.b"));
        let cat = Reduction::Categorical.reduce("type", &graph, &ids, ".").unwrap();
        assert_eq!(cat, AttrValue::from("a.a.b"));
        let cat = contraction_categorical("type", &graph, &[3, 0], "-").unwrap();
        assert_eq!(cat, AttrValue::from("N/A-a"));
    } // end of categorical_reductions

    #[test]
    fn histogram_reduction() {
        log_init_test();
        //
        let graph = small_graph();
        let histo = contraction_histogram("type", &graph, &[2, 0, 1, 3]).unwrap();
        match histo {
            AttrValue::Histogram(h) => {
                assert_eq!(h.len(), 3);
                assert_eq!(h.get_index(0), Some((&String::from("a"), &2)));
                assert_eq!(h["b"], 1);
                assert_eq!(h[NOT_AVAILABLE], 1);
            }
            _ => panic!("histogram expected"),
        }
    } // end of histogram_reduction

    #[test]
    fn parse_reduction_names() {
        for r in Reduction::ALL {
            assert_eq!(r.name().parse::<Reduction>().unwrap(), r);
        }
        assert_eq!(
            "median".parse::<Reduction>(),
            Err(ContractionError::UndefinedAttributeReduction(String::from("median")))
        );
    }
} // end of mod tests
