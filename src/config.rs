// SPDX-License-Identifier: MIT

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoggingConfig {
    /// Log level filter: "error", "warn", "info", "debug" or "trace".
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResourceConfig {
    /// Quantum backends declared reachable. There is no functional
    /// quantum hardware probe; this stub list is what the decision
    /// logic sees.
    #[serde(default)]
    pub quantum_backends: Vec<String>,
    /// CPU sampling window, in ms.
    #[serde(default = "default_cpu_sample_window_ms")]
    pub cpu_sample_window_ms: u64,
}

fn default_cpu_sample_window_ms() -> u64 {
    1000
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            quantum_backends: vec![],
            cpu_sample_window_ms: default_cpu_sample_window_ms(),
        }
    }
}

/// Top-level configuration, loaded once by the hosting process.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    /// Path to a serialized classifier model. The built-in model is
    /// used when absent.
    #[serde(default)]
    pub model_path: Option<std::path::PathBuf>,
}

impl Config {
    /// Load the configuration from a JSON file. Failure is fatal.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path).map_err(|err| {
            anyhow::anyhow!("cannot open config file {}: {}", path.display(), err)
        })?;
        serde_json::from_reader(file).map_err(|err| {
            anyhow::anyhow!("cannot parse config file {}: {}", path.display(), err)
        })
    }

    pub fn cpu_sample_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.resources.cpu_sample_window_ms)
    }
}

/// Initialize logging from the configuration. To be called exactly once
/// by the hosting process.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level = config
        .level
        .parse::<log::LevelFilter>()
        .map_err(|err| anyhow::anyhow!("invalid log level '{}': {}", config.level, err))?;
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init()?;
    Ok(())
}
