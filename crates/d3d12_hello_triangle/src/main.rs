#![cfg_attr(not(windows), allow(dead_code))]

pub mod command_line;
pub mod scene;

#[cfg(windows)]
pub mod adapter_utils;
#[cfg(windows)]
pub mod dx_sample;
#[cfg(windows)]
pub mod hello_triangle;
#[cfg(windows)]
pub mod sample_runner;
#[cfg(windows)]
pub mod windy_error;

use tracing::info;

fn init_tracing() {
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .init();
}

#[cfg(windows)]
fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    info!("Starting D3D12 Hello Triangle...");

    sample_runner::run_sample::<hello_triangle::Sample>()?;

    info!("Sample finished successfully.");
    Ok(())
}

#[cfg(not(windows))]
fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    let command_line = command_line::build_command_line();
    info!(?command_line, "parsed command line");
    eyre::bail!("the Direct3D 12 sample only runs on Windows")
}
