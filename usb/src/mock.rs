// A recording ControlDevice for driving the host loops without hardware.
use crate::commands::ControlRequest;
use crate::device::base::ControlDevice;
use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug, Clone)]
pub(crate) struct Transfer {
    pub request: ControlRequest,
    pub data: Vec<u8>,
    pub at: Instant,
}

#[derive(Default)]
pub(crate) struct MockDevice {
    transfers: Vec<Transfer>,
    responses: VecDeque<Vec<u8>>,
    reports: VecDeque<Result<Vec<u8>, rusb::Error>>,
    fail_after: Option<usize>,
    interrupt_endpoints: Vec<u8>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the payload returned by the next control read. Reads with nothing queued fail
    /// with `NoDevice`.
    pub fn respond_with(mut self, data: Vec<u8>) -> Self {
        self.responses.push_back(data);
        self
    }

    /// Queues the result of the next interrupt read. Once the queue is drained, interrupt
    /// reads fail with `NoDevice`.
    pub fn report(mut self, report: Result<Vec<u8>, rusb::Error>) -> Self {
        self.reports.push_back(report);
        self
    }

    /// Control transfers start failing with `NoDevice` once `count` have succeeded.
    pub fn fail_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn values(&self) -> Vec<u16> {
        self.transfers.iter().map(|t| t.request.value).collect()
    }

    pub fn interrupt_endpoints(&self) -> &[u8] {
        &self.interrupt_endpoints
    }

    fn check_alive(&self) -> Result<(), rusb::Error> {
        match self.fail_after {
            Some(count) if self.transfers.len() >= count => Err(rusb::Error::NoDevice),
            _ => Ok(()),
        }
    }

    fn record(&mut self, request: ControlRequest, data: &[u8]) {
        self.transfers.push(Transfer {
            request,
            data: data.to_vec(),
            at: Instant::now(),
        });
    }
}

impl ControlDevice for MockDevice {
    fn write_control(&mut self, request: ControlRequest, data: &[u8]) -> Result<(), rusb::Error> {
        self.check_alive()?;
        self.record(request, data);
        Ok(())
    }

    fn read_control(&mut self, request: ControlRequest) -> Result<Vec<u8>, rusb::Error> {
        self.check_alive()?;
        let mut response = self.responses.pop_front().ok_or(rusb::Error::NoDevice)?;
        response.truncate(request.length as usize);
        self.record(request, &[]);
        Ok(response)
    }

    fn read_interrupt(&mut self, endpoint: u8, length: usize) -> Result<Vec<u8>, rusb::Error> {
        self.interrupt_endpoints.push(endpoint);
        let mut report = self.reports.pop_front().unwrap_or(Err(rusb::Error::NoDevice))?;
        report.truncate(length);
        Ok(report)
    }
}
