use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use usb_simple::led::LedFlasher;
use usb_simple_host::cli::LogArgs;
use usb_simple_host::startup::open_device;

/// Flashes the board's LED, one second on and one second off, until interrupted.
#[derive(Parser, Debug)]
#[clap(version)]
struct Cli {
    #[clap(flatten)]
    logging: LogArgs,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    args.logging.init()?;

    let device = open_device()?;

    info!("Flashing LED, press Ctrl+C to stop");
    let mut flasher = LedFlasher::new(device);
    match flasher.run().context("Control transfer failed")? {}
}
