use anyhow::{Context, Result};
use log::{debug, info};
use std::process::exit;
use usb_simple::device::SimpleUsb;
use usb_simple::error::ConnectError;
use usb_simple::rusb::GlobalContext;

pub const EXIT_DEVICE_NOT_FOUND: i32 = 255;

/// The process status and message for a start-up failure which ends the utility immediately,
/// rather than being reported as an ordinary error.
pub fn early_exit(error: &ConnectError) -> Option<(i32, &'static str)> {
    match error {
        ConnectError::DeviceNotFound => Some((EXIT_DEVICE_NOT_FOUND, "Could not find device")),
        _ => None,
    }
}

/// Opens the board, or terminates the process with status 255 if it isn't attached.
pub fn open_device() -> Result<SimpleUsb<GlobalContext>> {
    let device = match usb_simple::device::locate() {
        Ok(device) => device,
        Err(error) => {
            if let Some((code, message)) = early_exit(&error) {
                debug!("{}", error);
                eprintln!("{}", message);
                exit(code);
            }
            return Err(error).context("Unable to open the USB device");
        }
    };

    match device.get_descriptor() {
        Ok(data) => info!(
            "Using {} at bus {} address {}",
            data,
            device.bus_number(),
            device.address()
        ),
        Err(error) => info!(
            "Using device at bus {} address {} (descriptor strings unavailable: {})",
            device.bus_number(),
            device.address(),
            error
        ),
    }

    Ok(device)
}
