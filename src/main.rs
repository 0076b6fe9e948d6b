//! Demonstration binary: runs the full startup and sequencer protocol
//! against the emulated camera and prints the reached exposure cycle.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use rust_gencam::camera::UsbCamera;
use rust_gencam::config::Settings;
use rust_gencam::genapi::mock::MockDevice;
use rust_gencam::genapi::{features, NodeMap};

#[derive(Parser)]
#[command(
    name = "rust_gencam",
    about = "Program the exposure sequencer of an emulated USB camera"
)]
struct Cli {
    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exposure times in microseconds for the sequencer cycle
    /// (comma separated); overrides the settings file.
    #[arg(long, value_delimiter = ',')]
    exposures: Option<Vec<f64>>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let exposures = cli
        .exposures
        .unwrap_or_else(|| settings.sequencer.exposure_times_us.clone());

    let camera = UsbCamera::new(MockDevice::new());
    info!("Opened emulated {} camera", camera.type_name());

    if !camera.apply_startup_settings(&settings.startup) {
        bail!("Startup settings could not be applied");
    }

    if exposures.is_empty() {
        info!("No exposure times configured; startup settings applied, nothing to sequence");
        return Ok(());
    }

    let (ok, reached) = camera.configure_sequencer(&exposures);
    if !ok {
        bail!(
            "Sequencer configuration failed after {} of {} sets",
            reached.len(),
            exposures.len()
        );
    }

    println!("Programmed {} sequencer sets:", reached.len());
    for (requested, reached) in exposures.iter().zip(&reached) {
        println!("  requested {requested:>12.1} us -> reached {reached:.6} s");
    }

    // Drive the emulated frame-start signal through one full cycle and
    // back to the start.
    let device = camera.node_map();
    println!("Cycling on frame start:");
    for _ in 0..exposures.len() {
        device.pulse_frame_start()?;
        println!(
            "  active set {} -> exposure {:.1} us",
            device.active_set(),
            device.get_float(features::EXPOSURE_TIME)?
        );
    }

    camera.reset_sequencer()?;
    println!(
        "Reset via software signal: active set {}",
        device.active_set()
    );

    Ok(())
}
