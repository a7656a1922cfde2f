// SPDX-License-Identifier: MIT

use crate::classifier::{Classifier, DeviceClass};
use crate::resources::{ResourceProbe, ResourceSnapshot};
use crate::task::Task;

/// Load percentage above which a device is considered busy.
pub const LOAD_THRESHOLD: f64 = 80.0;

/// Final computation method selected for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Cpu,
    Gpu,
    Qpu,
    Hybrid,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "CPU"),
            Self::Gpu => write!(f, "GPU"),
            Self::Qpu => write!(f, "QPU"),
            Self::Hybrid => write!(f, "Hybrid"),
        }
    }
}

/// Combine the classifier prediction with live resource loads.
/// The policy is first-match-wins with fixed thresholds; anything that
/// does not match falls back to hybrid execution.
pub fn decide(prediction: DeviceClass, snapshot: &ResourceSnapshot) -> Method {
    match prediction {
        DeviceClass::Cpu if snapshot.cpu_load < LOAD_THRESHOLD => Method::Cpu,
        DeviceClass::Gpu
            if !snapshot.gpu_loads.is_empty()
                && snapshot
                    .gpu_loads
                    .iter()
                    .all(|gpu| gpu.load < LOAD_THRESHOLD) =>
        {
            Method::Gpu
        }
        DeviceClass::Qpu if snapshot.quantum_available() => Method::Qpu,
        _ => Method::Hybrid,
    }
}

/// Full decision pipeline: feature extraction, classifier prediction,
/// resource snapshot, method selection.
pub struct Router<C: Classifier, P: ResourceProbe> {
    classifier: C,
    probe: P,
}

impl<C: Classifier, P: ResourceProbe> Router<C, P> {
    pub fn new(classifier: C, probe: P) -> Self {
        Self { classifier, probe }
    }

    pub fn route(&self, task: &Task) -> anyhow::Result<Method> {
        let features = crate::task::extract_features(&task.task_type)?;
        let prediction = self.classifier.predict(&features)?;
        let snapshot = self.probe.snapshot();
        log::debug!(
            "task '{}' predicted {:?}, cpu {:.1}%, {} gpus, {} quantum backends",
            task.task_type,
            prediction,
            snapshot.cpu_load,
            snapshot.gpu_loads.len(),
            snapshot.quantum_backends.len()
        );
        let method = decide(prediction, &snapshot);
        log::info!("selected computation method for '{}': {}", task.task_type, method);
        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::CentroidClassifier;
    use crate::resources::{GpuLoad, StaticProbe};

    fn snapshot(cpu: f64, gpus: &[(u32, f64)], backends: &[&str]) -> ResourceSnapshot {
        ResourceSnapshot {
            cpu_load: cpu,
            gpu_loads: gpus
                .iter()
                .map(|(id, load)| GpuLoad {
                    id: *id,
                    load: *load,
                })
                .collect(),
            quantum_backends: backends.iter().map(|name| name.to_string()).collect(),
        }
    }

    #[test]
    fn test_cpu_prediction_follows_cpu_load() {
        assert_eq!(
            decide(DeviceClass::Cpu, &snapshot(50.0, &[], &[])),
            Method::Cpu
        );
        assert_eq!(
            decide(DeviceClass::Cpu, &snapshot(90.0, &[], &[])),
            Method::Hybrid
        );
    }

    #[test]
    fn test_gpu_prediction_needs_all_gpus_idle() {
        assert_eq!(
            decide(DeviceClass::Gpu, &snapshot(0.0, &[(0, 30.0), (1, 40.0)], &[])),
            Method::Gpu
        );
        assert_eq!(
            decide(DeviceClass::Gpu, &snapshot(0.0, &[(0, 90.0)], &[])),
            Method::Hybrid
        );
        // No GPU present at all.
        assert_eq!(
            decide(DeviceClass::Gpu, &snapshot(0.0, &[], &[])),
            Method::Hybrid
        );
    }

    #[test]
    fn test_qpu_prediction_needs_a_backend() {
        assert_eq!(
            decide(DeviceClass::Qpu, &snapshot(0.0, &[], &[])),
            Method::Hybrid
        );
        assert_eq!(
            decide(DeviceClass::Qpu, &snapshot(0.0, &[], &["stub_qpu_0"])),
            Method::Qpu
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly at the threshold counts as busy.
        assert_eq!(
            decide(DeviceClass::Cpu, &snapshot(LOAD_THRESHOLD, &[], &[])),
            Method::Hybrid
        );
    }

    #[test]
    fn test_router_pipeline() -> anyhow::Result<()> {
        let router = Router::new(
            CentroidClassifier::default(),
            StaticProbe(snapshot(50.0, &[], &[])),
        );
        let method = router.route(&Task::new("matrix_multiplication", "dense matmul"))?;
        assert_eq!(method, Method::Cpu);
        Ok(())
    }

    #[test]
    fn test_router_rejects_unknown_task_type() {
        let router = Router::new(
            CentroidClassifier::default(),
            StaticProbe(ResourceSnapshot::default()),
        );
        assert!(router.route(&Task::new("protein_folding", "")).is_err());
    }

    #[test]
    fn test_router_falls_back_to_hybrid_on_busy_qpu_prediction() -> anyhow::Result<()> {
        let router = Router::new(
            CentroidClassifier::default(),
            StaticProbe(snapshot(95.0, &[], &[])),
        );
        let method = router.route(&Task::new("optimization", "portfolio optimization"))?;
        assert_eq!(method, Method::Hybrid);
        Ok(())
    }
}
