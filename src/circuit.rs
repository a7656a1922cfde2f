// SPDX-License-Identifier: MIT

use rand::{Rng, SeedableRng};

/// Rotation angle: either a symbol bound at simulation time or a fixed
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Symbol(String),
    Value(f64),
}

/// Gate operations supported by the demo circuits, all on a single qubit.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Rotation around the Y axis.
    Ry(Param),
    /// Hadamard gate.
    H,
    /// Terminal measurement in the computational basis.
    Measure,
}

/// Ordered gate sequence over a single-qubit register.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    gates: Vec<Gate>,
}

impl Circuit {
    /// A Hadamard gate followed by a measurement.
    pub fn hadamard() -> Self {
        Self {
            gates: vec![Gate::H, Gate::Measure],
        }
    }

    /// A rotation parameterized by the symbol `theta`, then a Hadamard
    /// gate, then a measurement.
    pub fn parametric() -> Self {
        Self {
            gates: vec![
                Gate::Ry(Param::Symbol("theta".to_string())),
                Gate::H,
                Gate::Measure,
            ],
        }
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }
}

/// Symbol values bound at simulation time.
#[derive(Debug, Clone, Default)]
pub struct Bindings(std::collections::HashMap<String, f64>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, name: &str, value: f64) -> Self {
        self.0.insert(name.to_string(), value);
        self
    }

    fn resolve(&self, param: &Param) -> anyhow::Result<f64> {
        match param {
            Param::Value(value) => Ok(*value),
            Param::Symbol(name) => self
                .0
                .get(name)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("unbound symbol: {}", name)),
        }
    }
}

/// Outcome of one execution of a measured circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Measured bit of the single qubit.
    pub outcome: u8,
}

/// Execution seam: any backend that can run a circuit with symbol
/// bindings can stand behind this trait.
pub trait Simulator {
    fn run(&self, circuit: &Circuit, bindings: &Bindings) -> anyhow::Result<Measurement>;
}

/// Demo backend evolving the single-qubit state vector.
///
/// Ry and H both have real matrices, so the two amplitudes stay real.
pub struct StateVectorSimulator {
    rng: std::sync::Mutex<rand::rngs::StdRng>,
}

impl StateVectorSimulator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: std::sync::Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }

    fn probability_of_one(circuit: &Circuit, bindings: &Bindings) -> anyhow::Result<f64> {
        let mut amplitudes = [1.0_f64, 0.0_f64];
        let mut measured = false;
        for gate in circuit.gates() {
            anyhow::ensure!(!measured, "gate after terminal measurement");
            match gate {
                Gate::Ry(param) => {
                    let theta = bindings.resolve(param)?;
                    let (sin, cos) = (theta / 2.0).sin_cos();
                    amplitudes = [
                        cos * amplitudes[0] - sin * amplitudes[1],
                        sin * amplitudes[0] + cos * amplitudes[1],
                    ];
                }
                Gate::H => {
                    let scale = std::f64::consts::FRAC_1_SQRT_2;
                    amplitudes = [
                        scale * (amplitudes[0] + amplitudes[1]),
                        scale * (amplitudes[0] - amplitudes[1]),
                    ];
                }
                Gate::Measure => measured = true,
            }
        }
        anyhow::ensure!(measured, "circuit has no measurement");
        Ok((amplitudes[1] * amplitudes[1]).clamp(0.0, 1.0))
    }
}

impl Simulator for StateVectorSimulator {
    fn run(&self, circuit: &Circuit, bindings: &Bindings) -> anyhow::Result<Measurement> {
        let p_one = Self::probability_of_one(circuit, bindings)?;
        let mut rng = self.rng.lock().unwrap();
        Ok(Measurement {
            outcome: rng.gen_bool(p_one) as u8,
        })
    }
}

/// Run a circuit, reporting simulation failure as an absent result. No
/// retry.
pub fn simulate(
    simulator: &dyn Simulator,
    circuit: &Circuit,
    bindings: &Bindings,
) -> Option<Measurement> {
    match simulator.run(circuit, bindings) {
        Ok(measurement) => {
            log::info!("simulation result: {}", measurement.outcome);
            Some(measurement)
        }
        Err(err) => {
            log::error!("error during simulation: {}", err);
            None
        }
    }
}
