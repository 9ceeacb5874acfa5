//! Linear classifiers
//!
//! Both models compute `w · x + b`. Logistic regression maps the score
//! through a sigmoid and exposes the fake-class probability; the linear
//! SVM only exposes a label.

use serde::Deserialize;

use crate::inference::InferenceError;

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
    /// Fake-class probability that must be exceeded for a label of 1
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinearSvm {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

pub(crate) fn validate_weights(coef: &[f64], intercept: f64) -> Result<(), String> {
    if coef.is_empty() {
        return Err("coefficient vector is empty".to_string());
    }
    if !intercept.is_finite() || coef.iter().any(|w| !w.is_finite()) {
        return Err("weights must be finite".to_string());
    }
    Ok(())
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), String> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(format!("threshold must be between 0 and 1 exclusive, got {}", threshold))
    }
}

fn decision(coef: &[f64], intercept: f64, features: &[f64]) -> Result<f64, InferenceError> {
    if features.len() != coef.len() {
        return Err(InferenceError::ShapeMismatch {
            expected: coef.len(),
            actual: features.len(),
        });
    }
    let score = coef.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + intercept;
    if !score.is_finite() {
        return Err(InferenceError::Classifier(format!("decision score is {}", score)));
    }
    Ok(score)
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl LogisticRegression {
    pub fn probability(&self, features: &[f64]) -> Result<f64, InferenceError> {
        decision(&self.coef, self.intercept, features).map(sigmoid)
    }

    /// Label 1 when the decision score is strictly above the logit of `threshold`
    ///
    /// Compared on the raw score so that scores rounding to a probability
    /// of exactly 0.5 still land on the correct side.
    pub fn predict(&self, features: &[f64]) -> Result<u8, InferenceError> {
        let score = decision(&self.coef, self.intercept, features)?;
        Ok(u8::from(score > self.score_cutoff()))
    }

    /// ln(1) is exactly 0 at the default threshold
    fn score_cutoff(&self) -> f64 {
        (self.threshold / (1.0 - self.threshold)).ln()
    }

    pub fn predict_proba(&self, features: &[f64]) -> Option<Result<f64, InferenceError>> {
        Some(self.probability(features))
    }
}

impl LinearSvm {
    pub fn predict(&self, features: &[f64]) -> Result<u8, InferenceError> {
        let score = decision(&self.coef, self.intercept, features)?;
        Ok(u8::from(score > 0.0))
    }

    pub fn predict_proba(&self, _features: &[f64]) -> Option<Result<f64, InferenceError>> {
        None
    }
}
