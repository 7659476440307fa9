//! Host user interface — the output sink
//!
//! `HostUi` accumulates every line a real interactive host would have
//! displayed into one growing text buffer. Error lines can be intercepted
//! by installing an override handler; the handler receives the sink itself
//! and decides what, if anything, lands in the buffer.

use std::cell::RefCell;
use std::rc::Rc;

/// Override handler for error lines.
///
/// The handler is given mutable access to the sink so it may append to the
/// buffer itself; re-borrowing a shared handle to the same sink inside the
/// handler is not allowed.
pub type ErrorLineHandler = Box<dyn FnMut(&mut HostUi, &str)>;

/// A sink handle shared between the driver and the executing session.
pub type SharedUi = Rc<RefCell<HostUi>>;

/// The output sink: an append-only text log plus an optional error-line
/// override.
#[derive(Default)]
pub struct HostUi {
    log: String,
    on_error_line: Option<ErrorLineHandler>,
}

impl HostUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink wrapped for sharing with a host.
    pub fn shared() -> SharedUi {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Append text without a line terminator.
    pub fn write(&mut self, text: &str) {
        self.log.push_str(text);
    }

    /// Append text followed by a line terminator.
    pub fn write_line(&mut self, text: &str) {
        self.log.push_str(text);
        self.log.push('\n');
    }

    /// Append an error line, or route it to the installed override.
    pub fn write_error_line(&mut self, text: &str) {
        if let Some(mut handler) = self.on_error_line.take() {
            handler(self, text);
            self.on_error_line = Some(handler);
        } else {
            self.write_line(text);
        }
    }

    /// Install an error-line override. Replaces any previous handler.
    pub fn set_error_line_handler(&mut self, handler: ErrorLineHandler) {
        self.on_error_line = Some(handler);
    }

    /// Snapshot of the accumulated log; safe to call mid-execution.
    pub fn log(&self) -> &str {
        &self.log
    }
}
