// SPDX-License-Identifier: MIT

use clap::Parser;

use hybrid_task_router::circuit;
use hybrid_task_router::classifier::CentroidClassifier;
use hybrid_task_router::config::{self, Config};
use hybrid_task_router::decision::Router;
use hybrid_task_router::dispatch;
use hybrid_task_router::resources::SystemProbe;
use hybrid_task_router::task::Task;

#[derive(Debug, clap::Parser)]
#[command(long_about = None)]
struct Args {
    /// Task type label used for feature extraction
    #[arg(long, default_value_t = String::from("optimization"))]
    task_type: String,
    /// Free-form task description
    #[arg(long, default_value_t = String::from("optimize the portfolio using quantum methods"))]
    description: String,
    /// Rotation angle for the parametric circuit demo, in radians
    #[arg(long)]
    theta: Option<f64>,
    /// Path to a JSON configuration file
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Path to a serialized classifier model, overriding the configuration
    #[arg(long)]
    model_path: Option<std::path::PathBuf>,
    /// Seed for the pseudo-random number generator of the demo simulator
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config::init_logging(&config.logging)?;

    let model_path = args.model_path.as_ref().or(config.model_path.as_ref());
    let classifier = match model_path {
        Some(path) => CentroidClassifier::from_file(path)?,
        None => CentroidClassifier::default(),
    };
    let probe = SystemProbe::new(
        config.cpu_sample_window(),
        config.resources.quantum_backends.clone(),
    );

    let task = Task::new(&args.task_type, &args.description);
    log::info!(
        "routing task '{}' (quantum ready: {})",
        task.task_type,
        hybrid_task_router::task::quantum_ready(&task.description)
    );

    let router = Router::new(classifier, probe);
    let method = router.route(&task)?;
    println!("Selected computation method: {}", method);

    dispatch::dispatch(&task, method).await?;

    if let Some(theta) = args.theta {
        let simulator = circuit::StateVectorSimulator::new(args.seed);
        let bindings = circuit::Bindings::new().bind("theta", theta);
        match circuit::simulate(&simulator, &circuit::Circuit::parametric(), &bindings) {
            Some(measurement) => {
                println!("Circuit demo (theta = {}): measured {}", theta, measurement.outcome)
            }
            None => println!("Circuit demo (theta = {}): no result", theta),
        }
    }

    Ok(())
}
