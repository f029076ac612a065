// The board reports its three push buttons as a single byte on an interrupt endpoint, and the
// host answers by changing the LED flash rate through the same request the LED uses.
use crate::commands::Command;
use crate::device::base::ControlDevice;
use crate::error::CommandError;
use enumset::{EnumSet, EnumSetType};
use log::{trace, warn};
use std::convert::Infallible;
use std::io::Write;

pub const BUTTON_INTERFACE: u8 = 0;
pub const BUTTON_ENDPOINT: u8 = 0x81;

pub const FLASH_RATE_STEP: u16 = 100;
pub const MAX_FLASH_RATE: u16 = 2500;

/// Bit positions in the report byte, bits 3 to 7 are reserved.
#[derive(EnumSetType, Debug)]
pub enum Button {
    Increase,
    Decrease,
    StartStop,
}

pub fn parse_report(report: u8) -> EnumSet<Button> {
    EnumSet::from_u8_truncated(report)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RateChange {
    Increased(u16),
    Decreased(u16),
    Toggled(bool),
}

pub struct FlashRateController<D: ControlDevice, W: Write> {
    device: D,
    output: W,

    flash_rate: u16,
    running: bool,
    previous: EnumSet<Button>,
}

impl<D: ControlDevice, W: Write> FlashRateController<D, W> {
    pub fn new(device: D, output: W) -> Self {
        Self {
            device,
            output,
            flash_rate: 0,
            running: true,
            previous: EnumSet::empty(),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn flash_rate(&self) -> u16 {
        self.flash_rate
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Applies one report from the board. Only buttons which were not held in the previous
    /// report count, and at most one change is made per report.
    pub fn handle_report(&mut self, report: u8) -> Result<Option<RateChange>, CommandError> {
        let pressed = parse_report(report);
        let rising = pressed - self.previous;
        self.previous = pressed;

        let change = if rising.contains(Button::Increase) && self.running {
            if self.flash_rate < MAX_FLASH_RATE {
                self.flash_rate += FLASH_RATE_STEP;
            }
            writeln!(self.output, "Increase delay to {}ms", self.flash_rate)?;
            self.send_rate(self.flash_rate)?;
            RateChange::Increased(self.flash_rate)
        } else if rising.contains(Button::Decrease) && self.running {
            if self.flash_rate >= FLASH_RATE_STEP {
                self.flash_rate -= FLASH_RATE_STEP;
            }
            writeln!(self.output, "Decrease delay to {}ms", self.flash_rate)?;
            self.send_rate(self.flash_rate)?;
            RateChange::Decreased(self.flash_rate)
        } else if rising.contains(Button::StartStop) {
            self.running = !self.running;
            writeln!(self.output, "Start/Stop: {}", u8::from(self.running))?;
            self.send_rate(if self.running { self.flash_rate } else { 0 })?;
            RateChange::Toggled(self.running)
        } else {
            return Ok(None);
        };

        self.output.flush()?;
        Ok(Some(change))
    }

    fn send_rate(&mut self, rate: u16) -> Result<(), CommandError> {
        self.device.execute(Command::SetFlashRate(rate))?;
        Ok(())
    }

    fn next_report(&mut self) -> Result<Option<u8>, CommandError> {
        match self.device.read_interrupt(BUTTON_ENDPOINT, 1) {
            Ok(report) => {
                trace!("Button report: {:x?}", report);
                Ok(report.first().copied())
            }
            Err(rusb::Error::Timeout) => {
                warn!("Timed out waiting for a button report");
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Stops the LED, then reacts to button reports forever. Only returns on failure.
    pub fn run(&mut self) -> Result<Infallible, CommandError> {
        self.send_rate(0)?;

        loop {
            if let Some(report) = self.next_report()? {
                self.handle_report(report)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDevice;

    const INCREASE: u8 = 0b001;
    const DECREASE: u8 = 0b010;
    const START_STOP: u8 = 0b100;

    fn controller() -> FlashRateController<MockDevice, Vec<u8>> {
        FlashRateController::new(MockDevice::new(), Vec::new())
    }

    fn printed(controller: &FlashRateController<MockDevice, Vec<u8>>) -> String {
        String::from_utf8(controller.output().clone()).unwrap()
    }

    // Press and release, so the next press is a fresh edge.
    fn tap(
        controller: &mut FlashRateController<MockDevice, Vec<u8>>,
        report: u8,
    ) -> Option<RateChange> {
        let change = controller.handle_report(report).unwrap();
        assert_eq!(controller.handle_report(0).unwrap(), None);
        change
    }

    #[test]
    fn reserved_bits_are_ignored() {
        assert!(parse_report(0b1111_1000).is_empty());
        assert_eq!(
            parse_report(0b1000_0101),
            Button::Increase | Button::StartStop
        );
    }

    #[test]
    fn increase_steps_and_sends() {
        let mut controller = controller();
        assert_eq!(tap(&mut controller, INCREASE), Some(RateChange::Increased(100)));
        assert_eq!(tap(&mut controller, INCREASE), Some(RateChange::Increased(200)));

        assert_eq!(controller.device().values(), vec![100, 200]);
        assert_eq!(
            printed(&controller),
            "Increase delay to 100ms\nIncrease delay to 200ms\n"
        );
        for transfer in controller.device().transfers() {
            assert_eq!(transfer.request.request_type, 0x40);
            assert_eq!(transfer.request.request, 0x01);
        }
    }

    #[test]
    fn increase_is_capped() {
        let mut controller = controller();
        for _ in 0..30 {
            tap(&mut controller, INCREASE);
        }
        assert_eq!(controller.flash_rate(), MAX_FLASH_RATE);
        assert_eq!(controller.device().values().last(), Some(&MAX_FLASH_RATE));
    }

    #[test]
    fn decrease_stops_at_zero() {
        let mut controller = controller();
        tap(&mut controller, INCREASE);
        assert_eq!(tap(&mut controller, DECREASE), Some(RateChange::Decreased(0)));
        assert_eq!(tap(&mut controller, DECREASE), Some(RateChange::Decreased(0)));
        assert!(printed(&controller).ends_with("Decrease delay to 0ms\n"));
    }

    #[test]
    fn held_button_acts_once() {
        let mut controller = controller();
        assert!(controller.handle_report(INCREASE).unwrap().is_some());
        assert_eq!(controller.handle_report(INCREASE).unwrap(), None);
        assert_eq!(controller.handle_report(INCREASE).unwrap(), None);
        assert_eq!(controller.flash_rate(), 100);
        assert_eq!(controller.device().transfers().len(), 1);
    }

    #[test]
    fn stopped_ignores_rate_buttons() {
        let mut controller = controller();
        tap(&mut controller, INCREASE);
        assert_eq!(tap(&mut controller, START_STOP), Some(RateChange::Toggled(false)));
        assert_eq!(tap(&mut controller, INCREASE), None);
        assert_eq!(tap(&mut controller, DECREASE), None);

        assert!(!controller.is_running());
        assert_eq!(controller.flash_rate(), 100);
        assert_eq!(controller.device().values(), vec![100, 0]);
    }

    #[test]
    fn restart_resends_rate() {
        let mut controller = controller();
        tap(&mut controller, INCREASE);
        tap(&mut controller, INCREASE);
        tap(&mut controller, START_STOP);
        assert_eq!(tap(&mut controller, START_STOP), Some(RateChange::Toggled(true)));

        assert_eq!(controller.device().values(), vec![100, 200, 0, 200]);
        assert!(printed(&controller).ends_with("Start/Stop: 0\nStart/Stop: 1\n"));
    }

    #[test]
    fn increase_takes_precedence() {
        let mut controller = controller();
        let change = controller
            .handle_report(INCREASE | DECREASE | START_STOP)
            .unwrap();
        assert_eq!(change, Some(RateChange::Increased(100)));
        assert!(controller.is_running());
    }

    #[test]
    fn run_sends_initial_rate_and_reads_endpoint() {
        let device = MockDevice::new()
            .report(Ok(vec![INCREASE]))
            .report(Err(rusb::Error::Timeout))
            .report(Ok(vec![]))
            .report(Ok(vec![0]))
            .report(Ok(vec![INCREASE]));
        let mut controller = FlashRateController::new(device, Vec::new());

        assert!(matches!(
            controller.run(),
            Err(CommandError::UsbError(rusb::Error::NoDevice))
        ));
        assert_eq!(controller.device().values(), vec![0, 100, 200]);
        assert!(controller
            .device()
            .interrupt_endpoints()
            .iter()
            .all(|&endpoint| endpoint == BUTTON_ENDPOINT));
    }
}
