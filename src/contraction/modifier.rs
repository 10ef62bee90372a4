//! Contraction modifiers describe how an attribute of a quotient node is computed.
//!
//! A modifier reads attribute_in on the contracted original nodes, reduces the values
//! with a [Reduction] and stores the result in attribute_out of the quotient node.
//! Modifiers are applied in list order, so a later modifier overwrites an attribute_out
//! set by an earlier one.
//!
//! Text form of a modifier, as appended to graph info :
//! `attribute_in:type attribute_out:label reduction:set_categorical`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::reduction::Reduction;
use crate::error::ContractionError;
use crate::graph::*;

/// name of the node attribute rescaled after modifiers
pub const WEIGHT: &str = "weight";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractionModifier {
    pub attribute_in: String,
    pub attribute_out: String,
    pub reduction: Reduction,
}

impl ContractionModifier {
    pub fn new(attribute_in: &str, attribute_out: &str, reduction: Reduction) -> Self {
        ContractionModifier {
            attribute_in: String::from(attribute_in),
            attribute_out: String::from(attribute_out),
            reduction,
        }
    }
} // end of impl ContractionModifier

impl fmt::Display for ContractionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attribute_in:{} attribute_out:{} reduction:{}",
            self.attribute_in, self.attribute_out, self.reduction
        )
    }
}

impl FromStr for ContractionModifier {
    type Err = ContractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut attribute_in: Option<&str> = None;
        let mut attribute_out: Option<&str> = None;
        let mut reduction: Option<Reduction> = None;
        for field in s.split_whitespace() {
            match field.split_once(':') {
                Some(("attribute_in", v)) if !v.is_empty() => attribute_in = Some(v),
                Some(("attribute_out", v)) if !v.is_empty() => attribute_out = Some(v),
                Some(("reduction", v)) => reduction = Some(v.parse::<Reduction>()?),
                _ => return Err(ContractionError::MalformedModifier(String::from(s))),
            }
        }
        match (attribute_in, attribute_out, reduction) {
            (Some(a_in), Some(a_out), Some(r)) => Ok(ContractionModifier::new(a_in, a_out, r)),
            _ => Err(ContractionError::MalformedModifier(String::from(s))),
        }
    } // end of from_str
} // end of impl FromStr

/// The default modifiers of contraction : label from the set of types, weights summed.
/// Built at each call, callers own their copy.
pub fn default_modifiers() -> Vec<ContractionModifier> {
    vec![
        ContractionModifier::new("type", LABEL, Reduction::SetCategorical),
        ContractionModifier::new(WEIGHT, WEIGHT, Reduction::Sum),
    ]
}

/// one line per modifier, each line terminated by a newline
pub fn serialize_modifiers(modifiers: &[ContractionModifier]) -> String {
    let mut lines = String::new();
    for m in modifiers {
        lines.push_str(&m.to_string());
        lines.push('\n');
    }
    lines
}

/// parses modifiers from text, one per non blank line
pub fn parse_modifiers(text: &str) -> Result<Vec<ContractionModifier>, ContractionError> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.parse::<ContractionModifier>())
        .collect()
}

/// Fills attributes of each node of quotient by applying modifiers over the
/// original nodes it contracts, then rescales its weight if weight_scaling_factor is not 1.
/// Every node of quotient must carry a non empty contracted list of nodes of original.
pub fn apply_modifiers(
    quotient: &mut AttributedGraph,
    original: &AttributedGraph,
    modifiers: &[ContractionModifier],
    separator: &str,
    weight_scaling_factor: f64,
) -> Result<(), ContractionError> {
    let ids: Vec<NodeId> = quotient.node_ids().collect();
    for id in ids {
        let contracted: Vec<NodeId> = match quotient.node(id).and_then(|n| n.get_contracted()) {
            Some(c) if !c.is_empty() => c.to_vec(),
            _ => return Err(ContractionError::MissingContractedSet(id)),
        };
        let mut values = Vec::<(&str, AttrValue)>::with_capacity(modifiers.len());
        for m in modifiers {
            let value = m
                .reduction
                .reduce(&m.attribute_in, original, &contracted, separator)?;
            values.push((m.attribute_out.as_str(), value));
        }
        let node = quotient
            .node_mut(id)
            .ok_or(ContractionError::UnknownNode(id))?;
        for (name, value) in values {
            node.set_attr(name, value);
        }
        if weight_scaling_factor != 1. {
            let weight = match node.get_attr(WEIGHT) {
                None => 1.,
                Some(w) => w.to_f64().ok_or_else(|| ContractionError::NumericParse {
                    attribute: String::from(WEIGHT),
                    node: id,
                    value: w.to_text(),
                })?,
            };
            node.set_attr(WEIGHT, AttrValue::Float(weight * weight_scaling_factor));
        }
        log::trace!("node {} aggregated over {} nodes", id, contracted.len());
    }
    Ok(())
} // end of apply_modifiers

//=====================================================================================

// end of mod tests
