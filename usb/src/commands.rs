use crate::led::LedState;
use rusb::{Direction, Recipient, RequestType};

pub const REQUEST_SET_LED: u8 = 0x01;
pub const REQUEST_READ_VARIABLE: u8 = 0x02;

/// The five setup fields of a single control transfer. `length` is the payload size for
/// writes, and the number of bytes expected back for reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlRequest {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl ControlRequest {
    pub fn direction(&self) -> Direction {
        if self.request_type & 0x80 != 0 {
            Direction::In
        } else {
            Direction::Out
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SetLed(LedState),
    SetFlashRate(u16),
    ReadVariable,
}

impl Command {
    pub fn request(&self) -> ControlRequest {
        match self {
            Command::SetLed(state) => vendor_out(REQUEST_SET_LED, state.value()),
            Command::SetFlashRate(rate) => vendor_out(REQUEST_SET_LED, *rate),
            Command::ReadVariable => ControlRequest {
                request_type: rusb::request_type(
                    Direction::In,
                    RequestType::Vendor,
                    Recipient::Device,
                ),
                request: REQUEST_READ_VARIABLE,
                value: 0x0000,
                index: 0x0000,
                length: 1,
            },
        }
    }
}

// Every write this board understands is a zero length vendor request to the device.
fn vendor_out(request: u8, value: u16) -> ControlRequest {
    ControlRequest {
        request_type: rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Device),
        request,
        value,
        index: 0x0000,
        length: 0,
    }
}
