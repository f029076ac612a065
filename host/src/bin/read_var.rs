use anyhow::{Context, Result};
use clap::Parser;
use std::io::stdout;
use usb_simple::poll::VariablePoller;
use usb_simple_host::cli::LogArgs;
use usb_simple_host::startup::open_device;

/// Reads the board's variable once a second and prints it.
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

    let mut poller = VariablePoller::new(device, stdout().lock());
    match poller.run().context("Unable to read variable")? {}
}
