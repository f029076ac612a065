#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("No matching USB device was found")]
    DeviceNotFound,

    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Unable to Claim Interface")]
    DeviceNotClaimed,
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Malformed response, expected {expected} byte(s), received {received}")]
    MalformedResponse { expected: usize, received: usize },

    #[error("Unable to write output: {0}")]
    OutputError(#[from] std::io::Error),
}
