//! Contraction and minor parameters
//!
//!
//!
use serde::{Deserialize, Serialize};

use super::modifier::*;
use super::reduction::DEFAULT_SEPARATOR;
use crate::error::ContractionError;
use crate::graph::LABEL;

// common checks
fn check_scaling_factor(factor: f64) -> Result<(), ContractionError> {
    if !factor.is_finite() || factor <= 0. {
        return Err(ContractionError::InvalidParameter {
            name: String::from("weight_scaling_factor"),
            reason: format!("must be finite and > 0, got {}", factor),
        });
    }
    Ok(())
}

fn check_attribute_name(name: &str, value: &str) -> Result<(), ContractionError> {
    if value.trim().is_empty() {
        return Err(ContractionError::InvalidParameter {
            name: String::from(name),
            reason: String::from("empty attribute name"),
        });
    }
    Ok(())
}

fn check_modifiers(modifiers: &[ContractionModifier]) -> Result<(), ContractionError> {
    for m in modifiers {
        if m.attribute_in.trim().is_empty() || m.attribute_out.trim().is_empty() {
            return Err(ContractionError::MalformedModifier(m.to_string()));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractionParams {
    /// node attribute whose equal values are contracted
    pub contraction_attribute: String,
    /// do we return the nesting graph (original + quotient + nesting edges) or the quotient only
    pub nesting: bool,
    /// multiplies the weight of quotient nodes
    pub weight_scaling_factor: f64,
    /// how quotient attributes are computed, in order
    pub modifiers: Vec<ContractionModifier>,
    /// separator of categorical reductions
    pub separator: String,
} // end of ContractionParams

impl ContractionParams {
    pub fn new(
        contraction_attribute: &str,
        nesting: bool,
        weight_scaling_factor: f64,
        modifiers: Vec<ContractionModifier>,
    ) -> Self {
        ContractionParams {
            contraction_attribute: String::from(contraction_attribute),
            nesting,
            weight_scaling_factor,
            modifiers,
            separator: String::from(DEFAULT_SEPARATOR),
        }
    }

    ///
    pub fn get_contraction_attribute(&self) -> &str {
        &self.contraction_attribute
    }

    ///
    pub fn is_nesting(&self) -> bool {
        self.nesting
    }

    ///
    pub fn get_weight_scaling_factor(&self) -> f64 {
        self.weight_scaling_factor
    }

    ///
    pub fn get_modifiers(&self) -> &[ContractionModifier] {
        &self.modifiers
    }

    ///
    pub fn get_separator(&self) -> &str {
        &self.separator
    }

    pub fn set_separator(&mut self, separator: &str) {
        self.separator = String::from(separator);
    }

    pub fn set_nesting(&mut self, nesting: bool) {
        self.nesting = nesting;
    }

    /// checks parameters before any graph is processed
    pub fn validate(&self) -> Result<(), ContractionError> {
        check_attribute_name("contraction_attribute", &self.contraction_attribute)?;
        check_scaling_factor(self.weight_scaling_factor)?;
        check_modifiers(&self.modifiers)
    }
} // end of impl ContractionParams

impl Default for ContractionParams {
    fn default() -> Self {
        ContractionParams::new(LABEL, false, 1., default_modifiers())
    }
}

//=================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinorParams {
    /// node attribute holding the list of partition ids of a node
    pub part_id: String,
    /// node attribute holding the list of partition names, aligned with part_id
    pub part_name: String,
    ///
    pub nesting: bool,
    ///
    pub weight_scaling_factor: f64,
    /// no default modifiers for minors
    pub modifiers: Vec<ContractionModifier>,
    ///
    pub separator: String,
} // end of MinorParams

impl MinorParams {
    pub fn new(
        part_id: &str,
        part_name: &str,
        nesting: bool,
        weight_scaling_factor: f64,
        modifiers: Vec<ContractionModifier>,
    ) -> Self {
        MinorParams {
            part_id: String::from(part_id),
            part_name: String::from(part_name),
            nesting,
            weight_scaling_factor,
            modifiers,
            separator: String::from(DEFAULT_SEPARATOR),
        }
    }

    pub fn get_part_id(&self) -> &str {
        &self.part_id
    }

    pub fn get_part_name(&self) -> &str {
        &self.part_name
    }

    pub fn is_nesting(&self) -> bool {
        self.nesting
    }

    pub fn get_weight_scaling_factor(&self) -> f64 {
        self.weight_scaling_factor
    }

    pub fn get_modifiers(&self) -> &[ContractionModifier] {
        &self.modifiers
    }

    pub fn get_separator(&self) -> &str {
        &self.separator
    }

    pub fn set_separator(&mut self, separator: &str) {
        self.separator = String::from(separator);
    }

    pub fn validate(&self) -> Result<(), ContractionError> {
        check_attribute_name("part_id", &self.part_id)?;
        check_attribute_name("part_name", &self.part_name)?;
        check_scaling_factor(self.weight_scaling_factor)?;
        check_modifiers(&self.modifiers)
    }
} // end of impl MinorParams

impl Default for MinorParams {
    fn default() -> Self {
        MinorParams::new("part_id", "part_name", false, 1., Vec::new())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn default_params() {
        let params = ContractionParams::default();
        assert_eq!(params.get_contraction_attribute(), "label");
        assert!(!params.is_nesting());
        assert_eq!(params.get_separator(), ".");
        assert_eq!(params.get_modifiers().len(), 2);
        assert!(params.validate().is_ok());
        //
        let params = MinorParams::default();
        assert!(params.get_modifiers().is_empty());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn invalid_params() {
        let params = ContractionParams::new("label", false, 0., Vec::new());
        let err = params.validate().unwrap_err();
        assert!(err.is_configuration());
        let params = ContractionParams::new("label", false, f64::NAN, Vec::new());
        assert!(params.validate().is_err());
        let params = ContractionParams::new(" ", false, 1., Vec::new());
        assert!(params.validate().is_err());
        let mut params = MinorParams::default();
        params.part_name = String::new();
        assert!(params.validate().is_err());
    }
} // end of mod tests
