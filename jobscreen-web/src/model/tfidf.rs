//! TF-IDF vectorizer
//!
//! Tokens are runs of two or more word characters (`\b\w\w+\b`), matched
//! on the lowercased text by default. Each vocabulary term's raw count is
//! multiplied by its idf weight and the row is L2-normalized.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

use crate::inference::InferenceError;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// Row normalization applied after idf weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    /// Term → column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub norm: Norm,
    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,
}

impl TfidfVectorizer {
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.idf.is_empty() {
            return Err("idf table is empty".to_string());
        }
        if let Some((term, index)) = self.vocabulary.iter().find(|(_, index)| **index >= self.idf.len()) {
            return Err(format!(
                "term {:?} maps to column {} but only {} idf weights exist",
                term,
                index,
                self.idf.len()
            ));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err("idf table contains a non-finite weight".to_string());
        }
        Ok(())
    }

    pub fn transform(&self, text: &str) -> Result<Vec<f64>, InferenceError> {
        let lowered;
        let source = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in TOKEN_RE.find_iter(source) {
            if let Some(&column) = self.vocabulary.get(token.as_str()) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut row = vec![0.0; self.idf.len()];
        for (column, tf) in counts {
            let idf = self.idf.get(column).copied().ok_or_else(|| {
                InferenceError::Vectorize(format!("vocabulary column {} has no idf weight", column))
            })?;
            let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
            row[column] = tf * idf;
        }

        if self.norm == Norm::L2 {
            let magnitude = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if magnitude > 0.0 {
                row.iter_mut().for_each(|v| *v /= magnitude);
            }
        }

        Ok(row)
    }
}
