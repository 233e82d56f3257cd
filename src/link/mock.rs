//! Mock link for exercising the session loop without hardware.
//!
//! Reads are served from a scripted queue and every transmitted frame is
//! logged. Clones share state, so a test can keep a handle for assertions
//! after the session has taken ownership of the link.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{DeviceLink, LinkRead, decode_line, frame_command};
use crate::error::{JtagError, JtagResult};

/// One scripted outcome for a `read_line` call.
#[derive(Debug, Clone)]
enum ScriptedRead {
    Line(String),
    Timeout,
    Fault(String),
}

#[derive(Debug, Default)]
struct MockLinkState {
    reads: VecDeque<ScriptedRead>,
    write_log: Vec<Vec<u8>>,
    reset_count: usize,
    close_count: usize,
}

#[derive(Clone, Default)]
pub struct MockLink {
    state: Arc<Mutex<MockLinkState>>,
}

impl MockLink {
    pub fn new() -> Self {
        MockLink::default()
    }

    /// Script a line to be returned by a subsequent read, exactly as the
    /// device would send it (include the newline for full lines, omit it
    /// for prompt fragments).
    pub fn enqueue_line(&self, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.reads.push_back(ScriptedRead::Line(text.to_string()));
    }

    /// Script a read window that elapses with no data.
    pub fn enqueue_timeout(&self) {
        let mut state = self.state.lock().unwrap();
        state.reads.push_back(ScriptedRead::Timeout);
    }

    /// Script a transport fault surfaced by the next read.
    pub fn enqueue_fault(&self, message: &str) {
        let mut state = self.state.lock().unwrap();
        state.reads.push_back(ScriptedRead::Fault(message.to_string()));
    }

    /// Every frame written so far, terminators included.
    pub fn write_log(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().write_log.clone()
    }

    /// The write log decoded to text, for readable assertions.
    pub fn sent_lines(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.write_log.iter().map(|f| decode_line(f)).collect()
    }

    pub fn reset_count(&self) -> usize {
        self.state.lock().unwrap().reset_count
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().unwrap().close_count
    }
}

impl DeviceLink for MockLink {
    fn read_line(&mut self) -> JtagResult<LinkRead> {
        let mut state = self.state.lock().unwrap();
        match state.reads.pop_front() {
            Some(ScriptedRead::Line(text)) => Ok(LinkRead::Line(text)),
            Some(ScriptedRead::Timeout) => Ok(LinkRead::TimedOut),
            Some(ScriptedRead::Fault(message)) => Err(JtagError::LinkFault(message)),
            // A drained script reads like a quiet device
            None => Ok(LinkRead::TimedOut),
        }
    }

    fn write_line(&mut self, text: &str) -> JtagResult<()> {
        let mut state = self.state.lock().unwrap();
        state.write_log.push(frame_command(text));
        Ok(())
    }

    fn reset_buffers(&mut self) -> JtagResult<()> {
        let mut state = self.state.lock().unwrap();
        state.reset_count += 1;
        Ok(())
    }

    fn close(&mut self) -> JtagResult<()> {
        let mut state = self.state.lock().unwrap();
        state.close_count += 1;
        Ok(())
    }
}
