use std::process::ExitCode;

use clap::{Parser, command};
use connect::{ConnectOptions, handle_connect};
use jtagctl::error::JtagResult;
use jtagctl::{ir, probes};

mod connect;

#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
enum Cli {
    /// Open the probe link and run an interactive session
    #[command(name = "connect", alias = "c")]
    Connect(ConnectOptions),

    /// List serial ports visible on this machine
    #[command(name = "ports")]
    Ports,

    /// Print the MAX10 instruction register reference
    #[command(name = "instructions", alias = "ir")]
    Instructions,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: JtagResult<()> = match cli {
        Cli::Connect(opts) => handle_connect(opts),
        Cli::Ports => probes::print_available_ports(),
        Cli::Instructions => {
            ir::print_table();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
