//! Process terminal plumbing for unix hosts: window size queries and a signal thread that
//! forwards SIGWINCH/SIGINT/SIGTERM into the console input channel.

use std::io::{self, Stdout};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use libc::{self, c_int};
use signal_hook::iterator::{Handle, Signals};
use tracing::debug;

use crate::core::output::AnsiTerminal;
use crate::runtime::event::ConsoleInput;

pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// `(columns, rows)` of the terminal behind `fd`, or `None` when it is not a terminal.
pub fn terminal_size(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

pub fn stdout_size() -> (u16, u16) {
    terminal_size(libc::STDOUT_FILENO).unwrap_or(FALLBACK_SIZE)
}

/// An ANSI terminal over stdout sized from the current window.
pub fn stdout_terminal() -> AnsiTerminal<Stdout> {
    let (columns, rows) = stdout_size();
    AnsiTerminal::new(io::stdout(), columns, rows)
}

/// Forwards window-size changes and termination signals as console inputs until dropped.
pub struct SignalForwarder {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl SignalForwarder {
    pub fn spawn(inputs: Sender<ConsoleInput>) -> io::Result<Self> {
        let mut signals = Signals::new([libc::SIGWINCH, libc::SIGINT, libc::SIGTERM])?;
        let handle = signals.handle();

        let thread = thread::spawn(move || {
            for signal in signals.forever() {
                let input = if signal == libc::SIGWINCH {
                    let (columns, rows) = stdout_size();
                    ConsoleInput::Resize { columns, rows }
                } else {
                    debug!(signal, "termination signal");
                    ConsoleInput::Shutdown
                };
                if inputs.send(input).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

impl Drop for SignalForwarder {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
