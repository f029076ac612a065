use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::stdout;
use usb_simple::buttons::{FlashRateController, BUTTON_INTERFACE};
use usb_simple_host::cli::LogArgs;
use usb_simple_host::startup::open_device;

/// Adjusts the board's LED flash rate from its push buttons.
#[derive(Parser, Debug)]
#[clap(version)]
struct Cli {
    #[clap(flatten)]
    logging: LogArgs,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    args.logging.init()?;

    let mut device = open_device()?;
    device
        .claim_interface(BUTTON_INTERFACE)
        .context("Could not claim interface")?;

    info!("Waiting for button presses, press Ctrl+C to stop");
    let mut controller = FlashRateController::new(device, stdout().lock());
    match controller.run().context("Button handling failed")? {}
}
