use tracing::{info, trace};

use super::{DeviceLink, LinkParams, LinkRead, decode_line, frame_command};
use crate::constants::MAX_LINE_BYTES;
use crate::error::{JtagError, JtagResult};
use std::io::{Read, Write};

/// Serial port link to the probe.
pub struct SerialPortLink {
    port: Option<Box<dyn serialport::SerialPort>>,
    params: LinkParams,
}

impl SerialPortLink {
    pub fn open(params: LinkParams) -> JtagResult<SerialPortLink> {
        let port = serialport::new(&params.port, params.baud)
            .timeout(params.timeout)
            .open()
            .map_err(|e| {
                JtagError::Connection(format!("Could not open {}: {}", params.port, e))
            })?;

        info!("Opened {} at {} baud", params.port, params.baud);
        Ok(SerialPortLink {
            port: Some(port),
            params,
        })
    }

    pub fn params(&self) -> &LinkParams {
        &self.params
    }

    fn port_mut(&mut self) -> JtagResult<&mut Box<dyn serialport::SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| JtagError::LinkFault("Link is closed".to_string()))
    }
}

impl DeviceLink for SerialPortLink {
    fn read_line(&mut self) -> JtagResult<LinkRead> {
        let name = self.params.port.clone();
        let port = self.port_mut()?;

        let mut buffer: Vec<u8> = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            match port.read(&mut byte) {
                Ok(1) => {
                    buffer.push(byte[0]);
                    if byte[0] == b'\n' || buffer.len() >= MAX_LINE_BYTES {
                        break;
                    }
                }
                // Deliberate empty read from the driver
                Ok(_) => break,
                Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    if buffer.is_empty() {
                        return Ok(LinkRead::TimedOut);
                    }
                    // The prompt arrives without a newline; hand the
                    // partial line back instead of swallowing it.
                    break;
                }
                Err(e) => {
                    return Err(JtagError::LinkFault(format!(
                        "Read failed on {}: {}",
                        name, e
                    )));
                }
            }
        }

        Ok(LinkRead::Line(decode_line(&buffer)))
    }

    fn write_line(&mut self, text: &str) -> JtagResult<()> {
        let name = self.params.port.clone();
        let port = self.port_mut()?;

        let frame = frame_command(text);
        port.write_all(&frame)
            .map_err(|e| JtagError::LinkFault(format!("Write failed on {}: {}", name, e)))?;
        port.flush()
            .map_err(|e| JtagError::LinkFault(format!("Flush failed on {}: {}", name, e)))?;
        trace!("Sent bytes {:?}", frame);

        Ok(())
    }

    fn reset_buffers(&mut self) -> JtagResult<()> {
        let port = self.port_mut()?;
        port.clear(serialport::ClearBuffer::All)
            .map_err(|e| JtagError::LinkFault(format!("Failed to clear buffers: {}", e)))?;
        port.flush()
            .map_err(|e| JtagError::LinkFault(format!("Failed to flush buffers: {}", e)))?;
        Ok(())
    }

    fn close(&mut self) -> JtagResult<()> {
        if let Some(port) = self.port.take() {
            drop(port);
            info!("Closed {}", self.params.port);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_reports_connection_error_for_missing_port() {
        let result = SerialPortLink::open(LinkParams::new("/dev/nonexistent_port_12345"));

        match result {
            Err(JtagError::Connection(msg)) => {
                assert!(msg.contains("nonexistent_port_12345"));
            }
            Err(e) => panic!("Expected Connection error, got: {:?}", e),
            Ok(_) => panic!("Open of a nonexistent port should fail"),
        }
    }
}
