// `base` holds the ControlDevice trait which the host loops are written against, `libusb` holds
// the rusb backed implementation and the locator.
use crate::error::ConnectError;
use log::warn;

pub mod base;
mod libusb;

pub use libusb::{find_devices, locate, locate_with, SimpleUsb};

/// Picks the first enumerated candidate, multiple matches are not treated as an error.
pub(crate) fn select_first<T>(found: Vec<T>) -> Result<T, ConnectError> {
    if found.len() > 1 {
        warn!(
            "Found {} matching devices, using the first one enumerated",
            found.len()
        );
    }
    found.into_iter().next().ok_or(ConnectError::DeviceNotFound)
}
