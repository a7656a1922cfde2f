// SPDX-License-Identifier: MIT

use rand::SeedableRng;
use rand_distr::Distribution;

/// Load of a single GPU, as reported by a probe.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GpuLoad {
    /// Device identifier.
    pub id: u32,
    /// Load percentage, 0..100.
    pub load: f64,
}

/// Point-in-time view of the resources the router can pick from.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ResourceSnapshot {
    /// CPU load percentage, 0..100.
    pub cpu_load: f64,
    /// Per-GPU load, empty when no GPU is present.
    pub gpu_loads: Vec<GpuLoad>,
    /// Names of reachable quantum backends. This list comes from
    /// configuration: there is no functional quantum hardware probe.
    pub quantum_backends: Vec<String>,
}

impl ResourceSnapshot {
    pub fn quantum_available(&self) -> bool {
        !self.quantum_backends.is_empty()
    }
}

/// Source of resource snapshots. The concrete probe is an external
/// collaborator as far as the decision logic is concerned.
pub trait ResourceProbe {
    fn snapshot(&self) -> ResourceSnapshot;
}

/// Probe backed by the operating system.
///
/// CPU load is measured from two `/proc/stat` readings taken over the
/// configured sampling window. GPU enumeration is not implemented and the
/// GPU list is always empty. The quantum backend list is the configured
/// stub list. Any probe failure yields a default (empty) snapshot.
pub struct SystemProbe {
    sample_window: std::time::Duration,
    quantum_backends: Vec<String>,
}

impl SystemProbe {
    pub fn new(sample_window: std::time::Duration, quantum_backends: Vec<String>) -> Self {
        Self {
            sample_window,
            quantum_backends,
        }
    }

    /// Parse the aggregate cpu line of `/proc/stat` into (busy, total) ticks.
    fn read_cpu_ticks() -> anyhow::Result<(u64, u64)> {
        let stat = std::fs::read_to_string("/proc/stat")?;
        let line = stat
            .lines()
            .find(|line| line.starts_with("cpu "))
            .ok_or_else(|| anyhow::anyhow!("no aggregate cpu line in /proc/stat"))?;
        let fields = line
            .split_whitespace()
            .skip(1)
            .filter_map(|field| field.parse::<u64>().ok())
            .collect::<Vec<u64>>();
        anyhow::ensure!(fields.len() >= 4, "truncated cpu line in /proc/stat");
        let total = fields.iter().sum::<u64>();
        // fields[3] is idle, fields[4] (if present) is iowait
        let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
        Ok((total - idle, total))
    }

    fn cpu_percent(&self) -> anyhow::Result<f64> {
        let (busy_before, total_before) = Self::read_cpu_ticks()?;
        std::thread::sleep(self.sample_window);
        let (busy_after, total_after) = Self::read_cpu_ticks()?;
        let total = total_after.saturating_sub(total_before);
        if total == 0 {
            return Ok(0.0);
        }
        Ok(100.0 * busy_after.saturating_sub(busy_before) as f64 / total as f64)
    }
}

impl ResourceProbe for SystemProbe {
    fn snapshot(&self) -> ResourceSnapshot {
        match self.cpu_percent() {
            Ok(cpu_load) => ResourceSnapshot {
                cpu_load,
                gpu_loads: vec![],
                quantum_backends: self.quantum_backends.clone(),
            },
            Err(err) => {
                log::warn!("resource probe failed, using default snapshot: {}", err);
                ResourceSnapshot::default()
            }
        }
    }
}

/// Probe returning jittered loads around configured means, for demos and
/// tests. Seeded, so repeated runs see the same sequence.
pub struct SimulatedProbe {
    cpu_mean: f64,
    gpu_means: Vec<f64>,
    quantum_backends: Vec<String>,
    jitter: rand_distr::Normal<f64>,
    rng: std::sync::Mutex<rand::rngs::StdRng>,
}

impl SimulatedProbe {
    pub fn new(
        seed: u64,
        cpu_mean: f64,
        gpu_means: Vec<f64>,
        quantum_backends: Vec<String>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            cpu_mean,
            gpu_means,
            quantum_backends,
            jitter: rand_distr::Normal::new(0.0, 5.0)?,
            rng: std::sync::Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        })
    }
}

impl ResourceProbe for SimulatedProbe {
    fn snapshot(&self) -> ResourceSnapshot {
        let mut rng = self.rng.lock().unwrap();
        let mut jittered = |mean: f64| (mean + self.jitter.sample(&mut *rng)).clamp(0.0, 100.0);
        ResourceSnapshot {
            cpu_load: jittered(self.cpu_mean),
            gpu_loads: self
                .gpu_means
                .iter()
                .enumerate()
                .map(|(id, mean)| GpuLoad {
                    id: id as u32,
                    load: jittered(*mean),
                })
                .collect(),
            quantum_backends: self.quantum_backends.clone(),
        }
    }
}

/// Fixed snapshot, mainly for tests.
pub struct StaticProbe(pub ResourceSnapshot);

impl ResourceProbe for StaticProbe {
    fn snapshot(&self) -> ResourceSnapshot {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantum_available() {
        let mut snapshot = ResourceSnapshot::default();
        assert!(!snapshot.quantum_available());
        snapshot.quantum_backends.push("stub_qpu_0".to_string());
        assert!(snapshot.quantum_available());
    }

    #[test]
    fn test_system_probe_never_panics() {
        // Whatever the host looks like, a failed read must degrade to the
        // default snapshot instead of erroring out.
        let probe = SystemProbe::new(std::time::Duration::from_millis(10), vec![]);
        let snapshot = probe.snapshot();
        assert!((0.0..=100.0).contains(&snapshot.cpu_load));
        assert!(snapshot.gpu_loads.is_empty());
    }

    #[test]
    fn test_simulated_probe_is_reproducible() -> anyhow::Result<()> {
        let make = || SimulatedProbe::new(42, 50.0, vec![30.0, 70.0], vec!["qpu".to_string()]);
        let first = make()?.snapshot();
        let second = make()?.snapshot();
        assert_eq!(first.cpu_load, second.cpu_load);
        assert_eq!(first.gpu_loads, second.gpu_loads);
        assert_eq!(first.gpu_loads.len(), 2);
        Ok(())
    }

    #[test]
    fn test_simulated_probe_clamps_loads() -> anyhow::Result<()> {
        let probe = SimulatedProbe::new(1, 100.0, vec![0.0], vec![])?;
        for _ in 0..100 {
            let snapshot = probe.snapshot();
            assert!((0.0..=100.0).contains(&snapshot.cpu_load));
            assert!((0.0..=100.0).contains(&snapshot.gpu_loads[0].load));
        }
        Ok(())
    }
}
