// SPDX-License-Identifier: MIT

/// Length of the feature vectors produced by [`extract_features`].
pub const FEATURE_LEN: usize = 5;

/// Numeric features describing a task, fed to the classifier.
pub type FeatureVector = [f64; FEATURE_LEN];

/// Keywords that mark a task description as suitable for quantum processing.
const QUANTUM_READY_KEYWORDS: [&str; 3] = ["optimization", "simulation", "factorization"];

/// A computational task submitted to the router.
#[derive(Debug, Clone)]
pub struct Task {
    /// Task type label, used for feature extraction.
    pub task_type: String,
    /// Free-form description, used for the quantum-readiness heuristic.
    pub description: String,
}

impl Task {
    pub fn new(task_type: &str, description: &str) -> Self {
        Self {
            task_type: task_type.to_string(),
            description: description.to_string(),
        }
    }
}

/// Return the feature vector for a task type from the static mapping.
/// Fails for unknown task types.
pub fn extract_features(task_type: &str) -> anyhow::Result<FeatureVector> {
    match task_type {
        "matrix_multiplication" => Ok([1000.0, 50000.0, 3.0, 1.0, 1.0]),
        "image_processing" => Ok([5000.0, 100000.0, 2.0, 2.0, 1.0]),
        "optimization" => Ok([50.0, 1000000.0, 1.0, 3.0, 5.0]),
        other => anyhow::bail!("unknown task type: {}", other),
    }
}

/// Assess whether a task description is suitable for quantum processing.
/// The check is a keyword heuristic, case-insensitive.
pub fn quantum_ready(description: &str) -> bool {
    let description = description.to_lowercase();
    QUANTUM_READY_KEYWORDS
        .iter()
        .any(|keyword| description.contains(keyword))
}
