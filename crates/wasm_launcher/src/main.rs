use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use wasm_launcher::config::DEFAULT_ARGS;
use wasm_launcher::config::DEFAULT_ENTRY;
use wasm_launcher::launch;
use wasm_launcher::LaunchConfig;

/// Load a WebAssembly module and call its entry point once.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Path to the `.wasm` binary.
    path: PathBuf,

    /// Exported function to call.
    #[arg(long, default_value = DEFAULT_ENTRY)]
    entry: String,

    /// Argument for the entry point, repeat once per parameter. Defaults to `8 1`.
    #[arg(long = "arg", allow_negative_numbers = true)]
    args: Vec<i32>,

    /// Log runtime activity to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn launch_config(&self) -> LaunchConfig {
        let args = if self.args.is_empty() {
            DEFAULT_ARGS.to_vec()
        } else {
            self.args.clone()
        };
        LaunchConfig {
            entry: self.entry.clone(),
            args,
            ..LaunchConfig::default()
        }
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .init();

    let config = cli.launch_config();
    let code = match launch(&config, &cli.path, &mut std::io::stdout()) {
        Ok(_) => 0,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    };
    std::process::exit(code)
}
