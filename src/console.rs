//! Operator-facing side of the bridge: one line of input per prompt,
//! device output echoed byte-for-byte.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::error::{JtagError, JtagResult};

pub trait Console {
    /// Block for one line of operator input, terminator stripped.
    fn read_command(&mut self) -> JtagResult<String>;

    /// Show a chunk of device output exactly as received.
    fn echo(&mut self, text: &str) -> JtagResult<()>;
}

/// Production console on stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        StdConsole
    }
}

impl Console for StdConsole {
    fn read_command(&mut self) -> JtagResult<String> {
        let mut line = String::new();
        let read = std::io::stdin()
            .read_line(&mut line)
            .map_err(|e| JtagError::Console(format!("Failed to read operator input: {}", e)))?;
        if read == 0 {
            return Err(JtagError::Console("Operator input closed".to_string()));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn echo(&mut self, text: &str) -> JtagResult<()> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| JtagError::Console(format!("Failed to write device output: {}", e)))
    }
}

#[derive(Debug, Default)]
struct ScriptState {
    inputs: VecDeque<String>,
    echoed: Vec<String>,
}

/// Scripted console for tests. Clones share state, so a test can inspect
/// the echo transcript after the session has consumed the console.
#[derive(Clone, Default)]
pub struct ScriptedConsole {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            state: Arc::new(Mutex::new(ScriptState {
                inputs: inputs.into_iter().map(Into::into).collect(),
                echoed: Vec::new(),
            })),
        }
    }

    /// Everything echoed so far, in order.
    pub fn echoed(&self) -> Vec<String> {
        self.state.lock().unwrap().echoed.clone()
    }
}

impl Console for ScriptedConsole {
    fn read_command(&mut self) -> JtagResult<String> {
        self.state
            .lock()
            .unwrap()
            .inputs
            .pop_front()
            .ok_or_else(|| JtagError::Console("Operator script ran out of input".to_string()))
    }

    fn echo(&mut self, text: &str) -> JtagResult<()> {
        self.state.lock().unwrap().echoed.push(text.to_string());
        Ok(())
    }
}
