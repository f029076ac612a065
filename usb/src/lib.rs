pub use rusb;
pub mod buttons;
pub mod commands;
pub mod device;
pub mod error;
pub mod led;
pub mod poll;

#[cfg(test)]
mod mock;

use std::time::Duration;

pub const VID_SIMPLE_USB: u16 = 0xdead;
pub const PID_SIMPLE_USB: u16 = 0xbeef;

/// Delay between iterations of every host loop.
pub const LOOP_INTERVAL: Duration = Duration::from_secs(1);
