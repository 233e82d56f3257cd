use std::time::Duration;

use clap::ValueEnum;

use crate::constants::{DEFAULT_BAUD_RATE, SERIAL_TIMEOUT_MS};
use crate::error::{JtagError, JtagResult};
use crate::link::LinkParams;

/// Probe enum includes all boards the Jtagger sketch has been tested on
#[derive(Debug, Clone, ValueEnum)]
pub enum Probe {
    /// Atmega328p based Arduino Uno
    ArduinoUno,

    /// Arduino Nano (FT232 or CH340 bridge)
    ArduinoNano,

    /// Arduino Mega 2560
    ArduinoMega,
}

/// Optional overrides for the serial parameters of a probe preset.
#[derive(Debug, Clone, Default)]
pub struct SerialOverrides {
    pub port: Option<String>,
    pub baud: Option<u32>,
    pub timeout: Option<Duration>,
}

/// Resolve the link parameters for a given probe board. Overrides can be
/// provided to pin any of them; a missing port is discovered by scanning
/// for the board's USB product id.
pub fn link_params_for_probe(
    probe: Probe,
    overrides: Option<SerialOverrides>,
) -> JtagResult<LinkParams> {
    // The Jtagger sketch runs Serial.begin(115200) on every board; only
    // the USB bridge chips differ.
    let product_id: Vec<u16> = match probe {
        Probe::ArduinoUno => vec![0x0043, 0x7523, 0x0001, 0xea60, 0x6015],
        Probe::ArduinoNano => vec![0x6001, 0x7523],
        Probe::ArduinoMega => vec![0x0042, 0x6001, 0x7523],
    };

    let overrides = overrides.unwrap_or_default();
    let port = match overrides.port {
        Some(port) => port,
        None => serial_port_from_product_id(&product_id)?,
    };

    Ok(LinkParams {
        port,
        baud: overrides.baud.unwrap_or(DEFAULT_BAUD_RATE),
        timeout: overrides
            .timeout
            .unwrap_or(Duration::from_millis(SERIAL_TIMEOUT_MS)),
    })
}

pub(crate) fn serial_port_from_product_id(product_ids: &Vec<u16>) -> JtagResult<String> {
    match serialport::available_ports() {
        Ok(ports) => {
            for port in ports {
                if let serialport::SerialPortType::UsbPort(info) = port.port_type {
                    for pid in product_ids {
                        if *pid == info.pid {
                            return Ok(port.port_name);
                        }
                    }
                }
            }
        }
        Err(e) => {
            return Err(JtagError::Configuration(format!(
                "Could not get available ports. Err {:?}",
                e
            )));
        }
    };

    Err(JtagError::Configuration(format!(
        "Looked at all available serial ports; could not find one that matches one of
        product IDs {:?}. Try specifying a serial port for the given probe?",
        product_ids
    )))
}

/// Print every serial port visible on this machine, with USB identity
/// where the OS reports one.
pub fn print_available_ports() -> JtagResult<()> {
    let ports = serialport::available_ports().map_err(|e| {
        JtagError::Configuration(format!("Could not get available ports. Err {:?}", e))
    })?;

    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    for port in ports {
        match port.port_type {
            serialport::SerialPortType::UsbPort(info) => {
                println!(
                    "{}  usb {:04x}:{:04x}  {}",
                    port.port_name,
                    info.vid,
                    info.pid,
                    info.product.as_deref().unwrap_or("-")
                );
            }
            _ => println!("{}", port.port_name),
        }
    }

    Ok(())
}
