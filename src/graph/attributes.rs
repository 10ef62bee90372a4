//! This module describes the values attached to nodes, edges and graphs.
//!
//! An attribute is a (name, value) couple. A missing name means the attribute is unset.
//! Values are strings, numbers, booleans, lists of values or histograms (the result of
//! the histogram reduction).
//!

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered map of attributes. Insertion order is kept, so dumps are reproducible.
pub type Attributes = IndexMap<String, AttrValue>;

/// separator used when a list value is flattened to a string
pub const LIST_SEPARATOR: &str = "_";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AttrValue>),
    /// value -> count, most frequent first
    Histogram(IndexMap<String, usize>),
}

impl AttrValue {
    /// String form used by categorical reductions and histogram keys.
    /// Lists are flattened with [LIST_SEPARATOR].
    pub fn to_text(&self) -> String {
        match self {
            AttrValue::Bool(b) => {
                if *b {
                    String::from("True")
                } else {
                    String::from("False")
                }
            }
            AttrValue::Int(i) => i.to_string(),
            AttrValue::Float(f) => {
                // keep a trailing .0 for integral values so 3. and 3 stay distinct
                if f.is_finite() && f.fract() == 0. {
                    format!("{:.1}", f)
                } else {
                    format!("{}", f)
                }
            }
            AttrValue::Str(s) => s.clone(),
            AttrValue::List(l) => l
                .iter()
                .map(|v| v.to_text())
                .collect::<Vec<String>>()
                .join(LIST_SEPARATOR),
            AttrValue::Histogram(h) => h
                .iter()
                .map(|(k, c)| format!("{}:{}", k, c))
                .collect::<Vec<String>>()
                .join(LIST_SEPARATOR),
        }
    } // end of to_text

    /// numeric value if there is a sensible one. Strings are parsed after trimming.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Bool(b) => Some(if *b { 1. } else { 0. }),
            AttrValue::Int(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            AttrValue::Str(s) => s.trim().parse::<f64>().ok(),
            AttrValue::List(_) | AttrValue::Histogram(_) => None,
        }
    } // end of to_f64

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }
} // end of impl AttrValue

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(String::from(s))
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<char> for AttrValue {
    fn from(c: char) -> Self {
        AttrValue::Str(c.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        AttrValue::Int(i as i64)
    }
}

impl From<usize> for AttrValue {
    fn from(i: usize) -> Self {
        AttrValue::Int(i as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl<T> From<Vec<T>> for AttrValue
where
    T: Into<AttrValue>,
{
    fn from(v: Vec<T>) -> Self {
        AttrValue::List(v.into_iter().map(|t| t.into()).collect())
    }
}

/// builds an attribute map from (name, value) couples
pub fn attributes<K, V, I>(pairs: I) -> Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
} // end of attributes

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn serialize_values() {
        assert_eq!(AttrValue::from("A").to_text(), "A");
        assert_eq!(AttrValue::from(3i64).to_text(), "3");
        assert_eq!(AttrValue::from(3.).to_text(), "3.0");
        assert_eq!(AttrValue::from(0.25).to_text(), "0.25");
        assert_eq!(AttrValue::from(true).to_text(), "True");
        assert_eq!(AttrValue::from(vec!["a", "b"]).to_text(), "a_b");
    }

    #[test]
    fn text_form_with_serde_in_scope() {
        // Serialize is imported here as in the reduction module, to_text must not clash
        let values = vec![AttrValue::from("a"), AttrValue::from(2.)];
        let refs: Vec<&AttrValue> = values.iter().collect();
        let texts: Vec<String> = refs.iter().map(|v| v.to_text()).collect();
        assert_eq!(texts, vec!["a", "2.0"]);
        let list = AttrValue::from(vec![AttrValue::from(1i64), AttrValue::from(true)]);
        assert_eq!(list.to_string(), "1_True");
    }

    #[test]
    fn numeric_values() {
        assert_eq!(AttrValue::from(" 2.5 ").to_f64(), Some(2.5));
        assert_eq!(AttrValue::from(4i64).to_f64(), Some(4.));
        assert_eq!(AttrValue::from(false).to_f64(), Some(0.));
        assert_eq!(AttrValue::from("abc").to_f64(), None);
        assert_eq!(AttrValue::from(vec![1i64]).to_f64(), None);
    }

    #[test]
    fn build_attributes() {
        let attrs = attributes([("label", AttrValue::from("A")), ("weight", AttrValue::from(2.))]);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get_index(0).unwrap().0, "label");
        assert_eq!(attrs["weight"], AttrValue::Float(2.));
    }
} // end of mod tests
