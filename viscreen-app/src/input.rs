use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Lines from stdin, delivered over a channel so the main loop can wait with
/// a timeout bounded by the trial deadline. The reader thread only forwards
/// input; every state transition stays on the main thread.
pub struct InputReader {
    rx: Receiver<String>,
}

pub enum Input {
    Line(String),
    TimedOut,
    Closed,
}

impl InputReader {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Wait for one line, at most `timeout`.
    pub fn read_line(&self, timeout: Duration) -> Input {
        match self.rx.recv_timeout(timeout) {
            Ok(line) => Input::Line(line),
            Err(RecvTimeoutError::Timeout) => Input::TimedOut,
            Err(RecvTimeoutError::Disconnected) => Input::Closed,
        }
    }

    /// Block until the respondent presses Enter (or stdin closes).
    pub fn wait_enter(&self) -> Input {
        match self.rx.recv() {
            Ok(line) => Input::Line(line),
            Err(_) => Input::Closed,
        }
    }
}
