// SPDX-License-Identifier: MIT

use crate::task::FeatureVector;

/// Coarse device category predicted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DeviceClass {
    Cpu,
    Gpu,
    Qpu,
}

/// Prediction seam: any trained model that maps a feature vector to a
/// device category can stand behind this trait.
pub trait Classifier {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<DeviceClass>;
}

/// One labelled point of a nearest-centroid model.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Centroid {
    pub label: DeviceClass,
    pub features: FeatureVector,
}

/// Nearest-centroid classifier.
///
/// The model artifact is a JSON array of labelled centroids. Training
/// happens elsewhere; this crate only loads and applies the artifact.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CentroidClassifier {
    centroids: Vec<Centroid>,
}

impl CentroidClassifier {
    pub fn new(centroids: Vec<Centroid>) -> anyhow::Result<Self> {
        anyhow::ensure!(!centroids.is_empty(), "model has no centroids");
        Ok(Self { centroids })
    }

    /// Load a serialized model. Failure is fatal and propagated.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|err| anyhow::anyhow!("cannot open model file {}: {}", path.display(), err))?;
        let centroids: Vec<Centroid> = serde_json::from_reader(file)
            .map_err(|err| anyhow::anyhow!("cannot parse model file {}: {}", path.display(), err))?;
        Self::new(centroids)
    }
}

impl Default for CentroidClassifier {
    /// Built-in model covering the three known task types.
    fn default() -> Self {
        Self {
            centroids: vec![
                Centroid {
                    label: DeviceClass::Cpu,
                    features: [1000.0, 50000.0, 3.0, 1.0, 1.0],
                },
                Centroid {
                    label: DeviceClass::Gpu,
                    features: [5000.0, 100000.0, 2.0, 2.0, 1.0],
                },
                Centroid {
                    label: DeviceClass::Qpu,
                    features: [50.0, 1000000.0, 1.0, 3.0, 5.0],
                },
            ],
        }
    }
}

fn squared_distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

impl Classifier for CentroidClassifier {
    fn predict(&self, features: &FeatureVector) -> anyhow::Result<DeviceClass> {
        let nearest = self
            .centroids
            .iter()
            .min_by(|a, b| {
                squared_distance(&a.features, features)
                    .total_cmp(&squared_distance(&b.features, features))
            })
            .ok_or_else(|| anyhow::anyhow!("model has no centroids"))?;
        Ok(nearest.label)
    }
}
