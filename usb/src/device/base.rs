use crate::commands::{Command, ControlRequest};
use crate::error::CommandError;
use log::debug;
use rusb::Direction;
use std::fmt;

/// Anything which can carry the board's control and interrupt transfers.
pub trait ControlDevice {
    fn write_control(&mut self, request: ControlRequest, data: &[u8]) -> Result<(), rusb::Error>;

    /// Reads up to `request.length` bytes, the returned buffer is truncated to what arrived.
    fn read_control(&mut self, request: ControlRequest) -> Result<Vec<u8>, rusb::Error>;

    fn read_interrupt(&mut self, endpoint: u8, length: usize) -> Result<Vec<u8>, rusb::Error>;

    fn execute(&mut self, command: Command) -> Result<Vec<u8>, CommandError> {
        let request = command.request();
        debug!("Sending {:?} as {:x?}", command, request);

        match request.direction() {
            Direction::In => Ok(self.read_control(request)?),
            Direction::Out => {
                self.write_control(request, &[])?;
                Ok(vec![])
            }
        }
    }
}

pub struct UsbData {
    pub(crate) vendor_id: u16,
    pub(crate) product_id: u16,
    pub(crate) device_version: (u8, u8, u8),
    pub(crate) device_manufacturer: String,
    pub(crate) product_name: String,
}

impl UsbData {
    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }
    pub fn product_id(&self) -> u16 {
        self.product_id
    }
    pub fn device_version(&self) -> (u8, u8, u8) {
        self.device_version
    }
    pub fn device_manufacturer(&self) -> String {
        self.device_manufacturer.clone()
    }
    pub fn product_name(&self) -> String {
        self.product_name.clone()
    }
}

impl fmt::Display for UsbData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [self.device_manufacturer.as_str(), self.product_name.as_str()]
            .into_iter()
            .filter(|name| !name.is_empty())
            .collect();
        if !names.is_empty() {
            write!(f, "{} ", names.join(" "))?;
        }

        let (major, minor, sub_minor) = self.device_version;
        write!(
            f,
            "({:04x}:{:04x}, version {}.{}.{})",
            self.vendor_id, self.product_id, major, minor, sub_minor
        )
    }
}
