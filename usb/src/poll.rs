use crate::commands::Command;
use crate::device::base::ControlDevice;
use crate::error::CommandError;
use crate::LOOP_INTERVAL;
use std::convert::Infallible;
use std::io::Write;
use std::thread::sleep;
use std::time::Duration;

/// Reads the board's single byte variable, and prints it to `output` as `Value: N`.
pub struct VariablePoller<D: ControlDevice, W: Write> {
    device: D,
    output: W,
    interval: Duration,
}

impl<D: ControlDevice, W: Write> VariablePoller<D, W> {
    pub fn new(device: D, output: W) -> Self {
        Self::with_interval(device, output, LOOP_INTERVAL)
    }

    pub fn with_interval(device: D, output: W, interval: Duration) -> Self {
        Self {
            device,
            output,
            interval,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn read_value(&mut self) -> Result<u8, CommandError> {
        let response = self.device.execute(Command::ReadVariable)?;

        // Anything past the first byte is ignored.
        response
            .first()
            .copied()
            .ok_or(CommandError::MalformedResponse {
                expected: 1,
                received: response.len(),
            })
    }

    pub fn poll_once(&mut self) -> Result<u8, CommandError> {
        let value = self.read_value()?;
        writeln!(self.output, "Value: {}", value)?;
        self.output.flush()?;
        Ok(value)
    }

    /// Polls forever, only returning if a transfer or the output fails.
    pub fn run(&mut self) -> Result<Infallible, CommandError> {
        loop {
            self.poll_once()?;
            sleep(self.interval);
        }
    }
}
