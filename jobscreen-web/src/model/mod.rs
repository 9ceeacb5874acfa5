//! Model artifacts
//!
//! The vectorizer and classifier are trained elsewhere and exported as
//! JSON documents. Both are loaded from disk on every screening request;
//! there is no cache, so a replaced artifact takes effect on the next
//! request.

pub mod linear;
pub mod tfidf;

use jobscreen_common::config::ArtifactPaths;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::inference::InferenceError;

pub use linear::{LinearSvm, LogisticRegression};
pub use tfidf::{Norm, TfidfVectorizer};

/// Turns posting text into fixed-length numeric features
pub trait Vectorizer: Send + Sync {
    /// Dense feature vector of exactly [`Vectorizer::dimension`] elements
    fn transform(&self, text: &str) -> Result<Vec<f64>, InferenceError>;

    /// Number of columns produced by `transform`
    fn dimension(&self) -> usize;
}

/// Binary classifier over an assembled feature vector
pub trait Classifier: Send + Sync {
    /// 1 = fake, 0 = genuine
    fn predict(&self, features: &[f64]) -> Result<u8, InferenceError>;

    /// Probability of the fake class, or `None` when the model has no
    /// probability interface
    fn predict_proba(&self, features: &[f64]) -> Option<Result<f64, InferenceError>>;
}

/// Which artifact an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Vectorizer,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Model => write!(f, "Model"),
            ArtifactKind::Vectorizer => write!(f, "Vectorizer"),
        }
    }
}

/// Artifact loading errors
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{kind} not found at {}", .path.display())]
    NotFound { kind: ArtifactKind, path: PathBuf },

    #[error("{kind} could not be read from {}: {source}", .path.display())]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} at {} is not a valid artifact: {source}", .path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} artifact is inconsistent: {reason}")]
    Invalid { kind: ArtifactKind, reason: String },
}

/// Serialized vectorizer, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorizerArtifact {
    Tfidf(TfidfVectorizer),
}

impl VectorizerArtifact {
    fn validate(&self) -> Result<(), String> {
        match self {
            VectorizerArtifact::Tfidf(v) => v.validate(),
        }
    }
}

impl Vectorizer for VectorizerArtifact {
    fn transform(&self, text: &str) -> Result<Vec<f64>, InferenceError> {
        match self {
            VectorizerArtifact::Tfidf(v) => v.transform(text),
        }
    }

    fn dimension(&self) -> usize {
        match self {
            VectorizerArtifact::Tfidf(v) => v.dimension(),
        }
    }
}

/// Serialized classifier, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
    LinearSvm(LinearSvm),
}

impl ClassifierArtifact {
    fn validate(&self) -> Result<(), String> {
        match self {
            ClassifierArtifact::LogisticRegression(m) => {
                linear::validate_weights(&m.coef, m.intercept)?;
                linear::validate_threshold(m.threshold)
            }
            ClassifierArtifact::LinearSvm(m) => linear::validate_weights(&m.coef, m.intercept),
        }
    }
}

impl Classifier for ClassifierArtifact {
    fn predict(&self, features: &[f64]) -> Result<u8, InferenceError> {
        match self {
            ClassifierArtifact::LogisticRegression(m) => m.predict(features),
            ClassifierArtifact::LinearSvm(m) => m.predict(features),
        }
    }

    fn predict_proba(&self, features: &[f64]) -> Option<Result<f64, InferenceError>> {
        match self {
            ClassifierArtifact::LogisticRegression(m) => m.predict_proba(features),
            ClassifierArtifact::LinearSvm(m) => m.predict_proba(features),
        }
    }
}

/// Load classifier and vectorizer from disk
///
/// Existence of both files is checked before either is parsed, model
/// first, so a missing file is always reported as `"<kind> not found at <path>"`.
pub fn load_artifacts(
    paths: &ArtifactPaths,
) -> Result<(ClassifierArtifact, VectorizerArtifact), ArtifactError> {
    ensure_exists(ArtifactKind::Model, &paths.model)?;
    ensure_exists(ArtifactKind::Vectorizer, &paths.vectorizer)?;

    let model: ClassifierArtifact = read_json(ArtifactKind::Model, &paths.model)?;
    model
        .validate()
        .map_err(|reason| ArtifactError::Invalid { kind: ArtifactKind::Model, reason })?;

    let vectorizer: VectorizerArtifact = read_json(ArtifactKind::Vectorizer, &paths.vectorizer)?;
    vectorizer.validate().map_err(|reason| ArtifactError::Invalid {
        kind: ArtifactKind::Vectorizer,
        reason,
    })?;

    debug!(
        model = %paths.model.display(),
        vectorizer = %paths.vectorizer.display(),
        dimension = vectorizer.dimension(),
        "Loaded model artifacts"
    );

    Ok((model, vectorizer))
}

fn ensure_exists(kind: ArtifactKind, path: &Path) -> Result<(), ArtifactError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ArtifactError::NotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn read_json<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
