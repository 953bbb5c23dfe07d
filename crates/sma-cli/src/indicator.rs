use std::io::{IsTerminal, Write};

/// Loading indicator shown on stderr while a request is in flight. Cleared
/// when dropped, whether the request succeeded or failed.
pub(crate) struct LoadingIndicator {
    interactive: bool,
}

impl LoadingIndicator {
    pub(crate) fn show(message: &str) -> Self {
        let mut stderr = std::io::stderr();
        let interactive = stderr.is_terminal();
        if interactive {
            let _ = write!(stderr, "{message}");
            let _ = stderr.flush();
        }
        tracing::debug!(message, "request in flight");
        Self { interactive }
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        if self.interactive {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
        }
    }
}
