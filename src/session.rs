use tracing::{debug, info};

use crate::console::Console;
use crate::constants::{PROMPT_MARKER, START_TOKEN, TERMINATE_TOKEN};
use crate::error::JtagResult;
use crate::link::{DeviceLink, LinkRead};
use crate::util;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingStartMessage,
    AwaitingOperatorStart,
    Running,
    Terminated,
}

/// Outcome of one prompt-wait drain.
enum DrainOutcome {
    /// A line containing the prompt marker arrived; input is required.
    PromptSeen,
    /// The read window closed with nothing more to show.
    WentQuiet,
}

/// The interactive loop between operator and probe: a one-time startup
/// handshake, then wait-for-prompt / forward-one-command until the
/// terminate token goes out.
pub struct Session<C: Console> {
    link: Box<dyn DeviceLink>,
    console: C,
    state: SessionState,
    startup_spinner: bool,
}

impl<C: Console> Session<C> {
    pub fn new(link: Box<dyn DeviceLink>, console: C) -> Self {
        Session {
            link,
            console,
            state: SessionState::AwaitingStartMessage,
            startup_spinner: false,
        }
    }

    pub fn startup_spinner(&mut self, enable: bool) {
        self.startup_spinner = enable;
    }

    /// Run the session to completion. The link is closed exactly once, on
    /// the success path and the fault path alike.
    pub fn run(mut self) -> JtagResult<()> {
        let outcome = self.drive();
        let closed = self.link.close();
        outcome.and(closed)
    }

    fn drive(&mut self) -> JtagResult<()> {
        self.link.reset_buffers()?;
        self.handshake()?;
        self.command_loop()
    }

    /// Wait for the probe start message, then for the operator to type
    /// the start token, then send it.
    fn handshake(&mut self) -> JtagResult<()> {
        let spinner = self
            .startup_spinner
            .then(|| util::create_spinner("Waiting for probe start message"));

        // Unbounded wait: the probe announces itself once it comes up
        let waited = loop {
            match self.drain_until_prompt() {
                Ok(DrainOutcome::PromptSeen) => break Ok(()),
                Ok(DrainOutcome::WentQuiet) => continue,
                Err(e) => break Err(e),
            }
        };
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        waited?;
        self.enter(SessionState::AwaitingOperatorStart);

        loop {
            let line = self.console.read_command()?;
            if line == START_TOKEN {
                break;
            }
        }
        self.link.write_line(START_TOKEN)?;
        self.enter(SessionState::Running);
        info!("Session started");

        Ok(())
    }

    /// Steady state: each iteration waits for a prompt and forwards one
    /// operator command verbatim. The terminate check runs only right
    /// after a fresh send.
    fn command_loop(&mut self) -> JtagResult<()> {
        while self.state == SessionState::Running {
            match self.drain_until_prompt()? {
                DrainOutcome::PromptSeen => {
                    let command = self.console.read_command()?;
                    self.link.write_line(&command)?;

                    if command == TERMINATE_TOKEN {
                        info!("Terminate command sent, draining probe output");
                        self.drain_until_prompt()?;
                        self.enter(SessionState::Terminated);
                    }
                }
                DrainOutcome::WentQuiet => continue,
            }
        }
        Ok(())
    }

    /// Echo probe output until a prompt line arrives or the probe goes
    /// quiet for one read window.
    fn drain_until_prompt(&mut self) -> JtagResult<DrainOutcome> {
        loop {
            match self.link.read_line()? {
                LinkRead::TimedOut => return Ok(DrainOutcome::WentQuiet),
                LinkRead::Line(line) if line.is_empty() => return Ok(DrainOutcome::WentQuiet),
                LinkRead::Line(line) => {
                    self.console.echo(&line)?;
                    if line.contains(PROMPT_MARKER) {
                        return Ok(DrainOutcome::PromptSeen);
                    }
                }
            }
        }
    }

    fn enter(&mut self, next: SessionState) {
        debug!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
