use crate::commands::Command;
use crate::device::base::ControlDevice;
use crate::error::CommandError;
use crate::LOOP_INTERVAL;
use std::convert::Infallible;
use std::thread::sleep;
use std::time::Duration;

/// The board switches its LED based on the `value` field of request 0x01.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LedState {
    On,
    Off,
}

impl LedState {
    pub fn value(&self) -> u16 {
        match self {
            LedState::On => 0x0000,
            LedState::Off => 0x0001,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LedState::On => LedState::Off,
            LedState::Off => LedState::On,
        }
    }
}

pub struct LedFlasher<D: ControlDevice> {
    device: D,
    // The state most recently sent, the first transfer is always 'On'.
    state: LedState,
    interval: Duration,
}

impl<D: ControlDevice> LedFlasher<D> {
    pub fn new(device: D) -> Self {
        Self::with_interval(device, LOOP_INTERVAL)
    }

    pub fn with_interval(device: D, interval: Duration) -> Self {
        Self {
            device,
            state: LedState::Off,
            interval,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Sends the next state in the On / Off cycle, and returns what was sent.
    pub fn step(&mut self) -> Result<LedState, CommandError> {
        let next = self.state.toggled();
        self.device.execute(Command::SetLed(next))?;
        self.state = next;
        Ok(next)
    }

    /// Flashes forever, only returning if a transfer fails.
    pub fn run(&mut self) -> Result<Infallible, CommandError> {
        loop {
            self.step()?;
            sleep(self.interval);
        }
    }
}
