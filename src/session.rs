//! Tracks metadata for a loading/rendering session.

use crate::log;

/// Metadata for a loading/rendering session.
///
/// There is no context yet where the library's code may start to track
/// things when the calling program first uses an API entry point; this
/// struct provides that context.  Debug logging is controlled by the
/// `ICONDRAW_LOG` environment variable; warnings requested through
/// [`ErrorMode::Warn`](crate::document::ErrorMode) are always emitted.
#[derive(Debug, Clone)]
pub struct Session {
    log_enabled: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            log_enabled: log::log_enabled(),
        }
    }

    pub fn log_enabled(&self) -> bool {
        self.log_enabled
    }

    /// The host diagnostic channel for non-fatal warnings.
    pub fn warn(&self, msg: &str) {
        eprintln!("icondraw: {}", msg);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
