//! Inference orchestration
//!
//! Feature assembly order is fixed at training time:
//!
//! ```text
//! [ text features (vectorizer.dimension()) | meta features (8) ]
//! ```
//!
//! Reordering either block silently corrupts predictions; nothing
//! downstream can detect it.

use jobscreen_common::config::ArtifactPaths;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::extract::{
    derive_meta_features, encode_meta, extract_fields, ExtractedFields, MetaFeatures, MetaVector,
};
use crate::model::{load_artifacts, ArtifactError, Classifier, Vectorizer};

/// Errors raised while vectorizing or predicting
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("vectorization failed: {0}")]
    Vectorize(String),

    #[error("feature vector has {actual} columns but the classifier expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("classifier error: {0}")]
    Classifier(String),
}

/// Errors from the full per-request pipeline
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Model or vectorizer could not be loaded
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Vectorization or prediction failed
    #[error("Prediction failed: {0}")]
    Inference(#[from] InferenceError),

    /// The blocking screening task did not complete
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Classifier verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Fake,
    Genuine,
}

impl Verdict {
    /// Map a classifier label (1 = fake) to a verdict
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Verdict::Fake
        } else {
            Verdict::Genuine
        }
    }

    /// Text shown on the result page
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Fake => "FAKE Job Posting",
            Verdict::Genuine => "Genuine Job",
        }
    }

    pub fn is_fake(&self) -> bool {
        matches!(self, Verdict::Fake)
    }
}

/// Classifier output for one posting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub verdict: Verdict,
    /// Probability mass on the fake class, when the model exposes one
    pub fake_probability: Option<f64>,
}

/// Everything produced for one screened posting
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub fields: ExtractedFields,
    pub meta: MetaFeatures,
    pub prediction: Prediction,
}

/// Concatenate text features and the meta vector, in that order
pub fn assemble_features(mut text_features: Vec<f64>, meta: &MetaVector) -> Vec<f64> {
    text_features.extend_from_slice(meta);
    text_features
}

/// Derive meta features, vectorize, assemble and classify `text`
pub fn run_inference(
    text: &str,
    vectorizer: &dyn Vectorizer,
    classifier: &dyn Classifier,
) -> Result<(MetaFeatures, Prediction), InferenceError> {
    let meta = derive_meta_features(text);
    let meta_vector = encode_meta(&meta);

    let text_features = vectorizer.transform(text)?;
    if text_features.len() != vectorizer.dimension() {
        return Err(InferenceError::Vectorize(format!(
            "vectorizer produced {} columns, declared {}",
            text_features.len(),
            vectorizer.dimension()
        )));
    }

    let features = assemble_features(text_features, &meta_vector);
    debug!(columns = features.len(), meta = ?meta_vector, "Assembled feature vector");

    let label = classifier.predict(&features)?;
    let fake_probability = classifier.predict_proba(&features).transpose()?;

    Ok((
        meta,
        Prediction {
            verdict: Verdict::from_label(label),
            fake_probability,
        },
    ))
}

/// Full per-request pipeline: load artifacts, extract fields, classify
///
/// Artifacts are read from disk on every call.
pub fn screen_posting(text: &str, paths: &ArtifactPaths) -> Result<ScreeningReport, ScreenError> {
    let (classifier, vectorizer) = load_artifacts(paths).map_err(|e| {
        error!("Artifact load failed: {}", e);
        e
    })?;

    let fields = extract_fields(text);
    debug!(
        title = %fields.title,
        location = %fields.location,
        words = fields.length,
        "Extracted display fields"
    );

    let (meta, prediction) = run_inference(text, &vectorizer, &classifier).map_err(|e| {
        error!("Prediction failed: {}", e);
        e
    })?;

    Ok(ScreeningReport {
        fields,
        meta,
        prediction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::META_VECTOR_LEN;

    /// Emits a fixed row regardless of input
    struct FixedVectorizer(Vec<f64>);

    impl Vectorizer for FixedVectorizer {
        fn transform(&self, _text: &str) -> Result<Vec<f64>, InferenceError> {
            Ok(self.0.clone())
        }

        fn dimension(&self) -> usize {
            self.0.len()
        }
    }

    /// Labels fake when the first meta column (telecommuting) is set
    struct RemoteIsFake {
        text_dim: usize,
        proba: bool,
    }

    impl Classifier for RemoteIsFake {
        fn predict(&self, features: &[f64]) -> Result<u8, InferenceError> {
            if features.len() != self.text_dim + META_VECTOR_LEN {
                return Err(InferenceError::ShapeMismatch {
                    expected: self.text_dim + META_VECTOR_LEN,
                    actual: features.len(),
                });
            }
            Ok(if features[self.text_dim] == 1.0 { 1 } else { 0 })
        }

        fn predict_proba(&self, features: &[f64]) -> Option<Result<f64, InferenceError>> {
            self.proba
                .then(|| self.predict(features).map(|l| if l == 1 { 0.9 } else { 0.1 }))
        }
    }

    #[test]
    fn test_assemble_order() {
        let meta = [1.0, 0.0, 1.0, 5.0, 13.0, 13.0, 5.0, 5.0];
        let features = assemble_features(vec![0.25, 0.75], &meta);
        assert_eq!(features.len(), 10);
        assert_eq!(&features[..2], &[0.25, 0.75]);
        assert_eq!(&features[2..], &meta);
    }

    #[test]
    fn test_remote_posting_flagged_with_probability() {
        let vectorizer = FixedVectorizer(vec![0.0; 4]);
        let classifier = RemoteIsFake { text_dim: 4, proba: true };

        let (meta, prediction) =
            run_inference("Work from home, earn $$$", &vectorizer, &classifier).unwrap();

        assert!(meta.telecommuting);
        assert_eq!(prediction.verdict, Verdict::Fake);
        assert_eq!(prediction.fake_probability, Some(0.9));
    }

    #[test]
    fn test_no_probability_interface() {
        let vectorizer = FixedVectorizer(vec![0.0; 4]);
        let classifier = RemoteIsFake { text_dim: 4, proba: false };

        let (_, prediction) = run_inference("On-site role", &vectorizer, &classifier).unwrap();
        assert_eq!(prediction.verdict, Verdict::Genuine);
        assert!(prediction.fake_probability.is_none());
    }

    #[test]
    fn test_shape_mismatch_surfaces() {
        let vectorizer = FixedVectorizer(vec![0.0; 3]);
        let classifier = RemoteIsFake { text_dim: 4, proba: true };

        let err = run_inference("text", &vectorizer, &classifier).unwrap_err();
        assert!(matches!(err, InferenceError::ShapeMismatch { expected: 12, actual: 11 }));
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::from_label(1).label(), "FAKE Job Posting");
        assert_eq!(Verdict::from_label(0).label(), "Genuine Job");
        assert!(Verdict::Fake.is_fake());
    }

    #[test]
    fn test_screen_error_message_prefix() {
        let err = ScreenError::from(InferenceError::Classifier("boom".to_string()));
        assert_eq!(err.to_string(), "Prediction failed: classifier error: boom");
    }
}
