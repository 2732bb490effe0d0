use clap::Parser;

/// Job board API server.
#[derive(Parser, Debug)]
#[command(name = "jobboard-backend")]
#[command(version, about = "Job board API server", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long = "config-path", env = "JOBBOARD_CONFIG_PATH")]
    pub config_path: Option<String>,
}
