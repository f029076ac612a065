use crate::commands::ControlRequest;
use crate::device::base::{ControlDevice, UsbData};
use crate::device::select_first;
use crate::error::ConnectError;
use crate::{PID_SIMPLE_USB, VID_SIMPLE_USB};
use log::debug;
use rusb::{Device, DeviceDescriptor, DeviceHandle, GlobalContext, Language, UsbContext};
use std::time::Duration;

// A zero timeout makes libusb wait forever, interrupt reports only arrive on button presses.
const INTERRUPT_TIMEOUT: Duration = Duration::ZERO;

pub struct SimpleUsb<T: UsbContext> {
    handle: DeviceHandle<T>,
    device: Device<T>,
    descriptor: DeviceDescriptor,

    language: Option<Language>,
    timeout: Duration,
}

impl<T: UsbContext> SimpleUsb<T> {
    pub fn from_device(
        device: Device<T>,
        descriptor: DeviceDescriptor,
    ) -> Result<Self, ConnectError> {
        let handle = device.open()?;
        let timeout = Duration::from_millis(1000);

        debug!("Connected to device at {:?}", device);

        // String descriptors are only used for logging, a board without them is still usable.
        let language = match handle.read_languages(timeout) {
            Ok(languages) => languages.first().cloned(),
            Err(error) => {
                debug!("Unable to read supported languages: {}", error);
                None
            }
        };

        Ok(Self {
            handle,
            device,
            descriptor,
            language,
            timeout,
        })
    }

    pub fn claim_interface(&mut self, interface: u8) -> Result<(), ConnectError> {
        // Not every platform supports detaching, claiming will report it if that matters.
        if let Err(error) = self.handle.set_auto_detach_kernel_driver(true) {
            debug!("Kernel driver auto detach unavailable: {}", error);
        }

        if let Err(error) = self.handle.claim_interface(interface) {
            debug!("Claiming interface {} failed: {}", interface, error);
            return Err(ConnectError::DeviceNotClaimed);
        }

        debug!("Claimed interface {}", interface);
        Ok(())
    }

    pub fn bus_number(&self) -> u8 {
        self.device.bus_number()
    }

    pub fn address(&self) -> u8 {
        self.device.address()
    }

    pub fn get_descriptor(&self) -> Result<UsbData, rusb::Error> {
        let version = self.descriptor.device_version();
        let device_version = (version.0, version.1, version.2);

        let (device_manufacturer, product_name) = match self.language {
            Some(language) => (
                self.handle.read_manufacturer_string(
                    language,
                    &self.descriptor,
                    Duration::from_millis(100),
                )?,
                self.handle.read_product_string(
                    language,
                    &self.descriptor,
                    Duration::from_millis(100),
                )?,
            ),
            None => (String::new(), String::new()),
        };

        Ok(UsbData {
            vendor_id: self.descriptor.vendor_id(),
            product_id: self.descriptor.product_id(),
            device_version,
            device_manufacturer,
            product_name,
        })
    }
}

impl<T: UsbContext> ControlDevice for SimpleUsb<T> {
    fn write_control(&mut self, request: ControlRequest, data: &[u8]) -> Result<(), rusb::Error> {
        self.handle.write_control(
            request.request_type,
            request.request,
            request.value,
            request.index,
            data,
            self.timeout,
        )?;

        Ok(())
    }

    fn read_control(&mut self, request: ControlRequest) -> Result<Vec<u8>, rusb::Error> {
        let mut buf = vec![0; request.length as usize];
        let response_length = self.handle.read_control(
            request.request_type,
            request.request,
            request.value,
            request.index,
            &mut buf,
            self.timeout,
        )?;
        buf.truncate(response_length);
        Ok(buf)
    }

    fn read_interrupt(&mut self, endpoint: u8, length: usize) -> Result<Vec<u8>, rusb::Error> {
        let mut buf = vec![0; length];
        let read = self
            .handle
            .read_interrupt(endpoint, &mut buf, INTERRUPT_TIMEOUT)?;
        buf.truncate(read);
        Ok(buf)
    }
}

/// Both identifiers must agree, a shared vendor id alone is not enough.
pub(crate) fn matches(descriptor_ids: (u16, u16), vendor_id: u16, product_id: u16) -> bool {
    descriptor_ids == (vendor_id, product_id)
}

pub fn find_devices<T: UsbContext>(
    context: &T,
    vendor_id: u16,
    product_id: u16,
) -> Result<Vec<(Device<T>, DeviceDescriptor)>, rusb::Error> {
    let mut found_devices = Vec::new();

    for device in context.devices()?.iter() {
        if let Ok(descriptor) = device.device_descriptor() {
            let ids = (descriptor.vendor_id(), descriptor.product_id());
            if matches(ids, vendor_id, product_id) {
                debug!(
                    "Found candidate at bus {} address {}",
                    device.bus_number(),
                    device.address()
                );
                found_devices.push((device, descriptor));
            }
        }
    }

    Ok(found_devices)
}

pub fn locate_with<T: UsbContext>(
    context: &T,
    vendor_id: u16,
    product_id: u16,
) -> Result<SimpleUsb<T>, ConnectError> {
    let (device, descriptor) = select_first(find_devices(context, vendor_id, product_id)?)?;
    SimpleUsb::from_device(device, descriptor)
}

/// Opens the first attached board matching the fixed vendor and product pair.
pub fn locate() -> Result<SimpleUsb<GlobalContext>, ConnectError> {
    locate_with(&GlobalContext::default(), VID_SIMPLE_USB, PID_SIMPLE_USB)
}
