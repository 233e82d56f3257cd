pub mod mock;
pub mod serialport;

use std::time::Duration;

use crate::constants::{DEFAULT_BAUD_RATE, SERIAL_TIMEOUT_MS};
use crate::error::JtagResult;

/// Parameters the link is opened with. Fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct LinkParams {
    pub port: String,
    pub baud: u32,
    pub timeout: Duration,
}

impl LinkParams {
    /// Parameters for the given port with the stock Jtagger settings.
    pub fn new(port: impl Into<String>) -> Self {
        LinkParams {
            port: port.into(),
            baud: DEFAULT_BAUD_RATE,
            timeout: Duration::from_millis(SERIAL_TIMEOUT_MS),
        }
    }

    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Outcome of a single blocking line read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRead {
    /// Decoded text exactly as received, terminator included when one
    /// arrived. Empty when the device reported a deliberate empty read.
    Line(String),

    /// No bytes arrived within the read window. Not a fault.
    TimedOut,
}

/// Byte-level transport to the probe.
pub trait DeviceLink {
    /// Block until a newline-terminated line arrives or the read window
    /// elapses. Partial data received before the window closes is
    /// returned as a line; the probe prompt has no trailing newline.
    fn read_line(&mut self) -> JtagResult<LinkRead>;

    /// Frame `text` with the line terminator and push it out immediately.
    fn write_line(&mut self, text: &str) -> JtagResult<()>;

    /// Discard any bytes queued for input or output.
    fn reset_buffers(&mut self) -> JtagResult<()>;

    /// Release the connection. Idempotent.
    fn close(&mut self) -> JtagResult<()>;
}

/// Frame one command line for transmission. An empty command is replaced
/// with a single space: the probe treats a bare terminator as no input.
pub(crate) fn frame_command(text: &str) -> Vec<u8> {
    let body = if text.is_empty() { " " } else { text };
    let mut frame = Vec::with_capacity(body.len() + 1);
    frame.extend_from_slice(body.as_bytes());
    frame.push(b'\n');
    frame
}

/// Decode received bytes one-to-one into chars. Maps every byte value,
/// so extended output from the probe never fails the read.
pub(crate) fn decode_line(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_keeps_command_bytes_intact() {
        assert_eq!(frame_command("read_idcode"), b"read_idcode\n");
        assert_eq!(frame_command("z"), b"z\n");
    }

    #[test]
    fn frame_substitutes_space_for_empty_command() {
        assert_eq!(frame_command(""), b" \n");
    }

    #[test]
    fn decode_passes_seven_bit_text_through() {
        assert_eq!(decode_line(b"IDCODE: 0x31050dd\n"), "IDCODE: 0x31050dd\n");
    }

    #[test]
    fn decode_does_not_fail_on_extended_bytes() {
        let decoded = decode_line(&[b'T', b'=', 0xb0, b'C', b'\n']);
        assert_eq!(decoded, "T=\u{b0}C\n");
    }

    #[test]
    fn default_params_match_the_jtagger_sketch() {
        let params = LinkParams::new("/dev/ttyUSB0");
        assert_eq!(params.baud, 115_200);
        assert_eq!(params.timeout, Duration::from_millis(500));
    }

    #[test]
    fn params_builder_applies_overrides() {
        let params = LinkParams::new("/dev/ttyACM0")
            .with_baud(57_600)
            .with_timeout(Duration::from_secs(1));
        assert_eq!(params.port, "/dev/ttyACM0");
        assert_eq!(params.baud, 57_600);
        assert_eq!(params.timeout, Duration::from_secs(1));
    }
}
