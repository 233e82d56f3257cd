use std::time::Duration;

use clap::Parser;
use jtagctl::error::{JtagError, JtagResult};
use jtagctl::link::LinkParams;
use jtagctl::probes::SerialOverrides;
use jtagctl::{Controller, Probe};

#[derive(Parser, Debug, Clone)]
pub(crate) struct ConnectOptions {
    /// Probe board type
    #[clap(short, long)]
    board: Option<Probe>,

    /// Serial port
    #[clap(short, long)]
    serial: Option<String>,

    /// Baud rate
    #[clap(short = 'r', long)]
    baudrate: Option<u32>,

    /// Read timeout in milliseconds
    #[clap(short, long)]
    timeout: Option<u64>,

    /// Disable the startup spinner
    #[clap(long, default_value_t = false)]
    no_spinner: bool,
}

pub(crate) fn handle_connect(opts: ConnectOptions) -> JtagResult<()> {
    let mut controller = match (opts.board, opts.serial) {
        (Some(board), serial) => {
            let overrides = SerialOverrides {
                port: serial,
                baud: opts.baudrate,
                timeout: opts.timeout.map(Duration::from_millis),
            };
            Controller::from_probe_and_overrides(board, overrides)?
        }
        (None, Some(serial)) => {
            let mut params = LinkParams::new(serial);
            if let Some(baud) = opts.baudrate {
                params = params.with_baud(baud);
            }
            if let Some(ms) = opts.timeout {
                params = params.with_timeout(Duration::from_millis(ms));
            }
            Controller::from_link_params(params)?
        }
        (None, None) => {
            return Err(JtagError::Configuration(
                "Specify a probe board (--board) or a serial port (--serial)".to_string(),
            ));
        }
    };

    controller.startup_spinner(!opts.no_spinner);
    controller.run()
}
