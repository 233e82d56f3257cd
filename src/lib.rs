use console::{Console, StdConsole};
use error::JtagResult;
use link::serialport::SerialPortLink;
use link::{DeviceLink, LinkParams};
pub use probes::Probe;
use probes::{SerialOverrides, link_params_for_probe};
use session::Session;

pub mod console;
pub(crate) mod constants;
pub mod error;
pub mod ir;
pub mod link;
pub mod probes;
pub mod session;
pub(crate) mod util;

/// Owns the link to the probe and runs the interactive session over it.
pub struct Controller {
    link: Box<dyn DeviceLink>,
    startup_spinner: bool,
}

impl Controller {
    /// Open a serial link with explicit parameters.
    pub fn from_link_params(params: LinkParams) -> JtagResult<Self> {
        Ok(Self::attach(Box::new(SerialPortLink::open(params)?)))
    }

    /// Open a serial link to the given probe board, discovering the port
    /// by its USB product id.
    pub fn new(probe: Probe) -> JtagResult<Self> {
        let params = link_params_for_probe(probe, None)?;
        Self::from_link_params(params)
    }

    /// Open a serial link to the given probe board with any of port, baud
    /// and timeout pinned by the caller.
    pub fn from_probe_and_overrides(probe: Probe, overrides: SerialOverrides) -> JtagResult<Self> {
        let params = link_params_for_probe(probe, Some(overrides))?;
        Self::from_link_params(params)
    }

    /// Take over an already-open link. Used by tests to drive the session
    /// against a mock.
    pub fn attach(link: Box<dyn DeviceLink>) -> Self {
        Controller {
            link,
            startup_spinner: false,
        }
    }

    pub fn startup_spinner(&mut self, enable: bool) {
        self.startup_spinner = enable;
    }

    /// Run the session on the operator's terminal.
    pub fn run(self) -> JtagResult<()> {
        self.run_with(StdConsole::new())
    }

    /// Run the session over any console implementation.
    pub fn run_with<C: Console>(self, console: C) -> JtagResult<()> {
        let mut session = Session::new(self.link, console);
        session.startup_spinner(self.startup_spinner);
        session.run()
    }
}
