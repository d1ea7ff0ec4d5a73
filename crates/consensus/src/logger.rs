use std::time::Instant;
use tracing::{info_span, Span};

/// Name of the consensus logging subsystem.
pub const SUBSYSTEM: &str = "BDAG";

/// Root span every consensus process logs under.
pub fn consensus_span() -> Span {
    info_span!("consensus", subsystem = SUBSYSTEM)
}

/// Child span for one process, e.g. `"block_validator"`.
pub fn process_span(parent: &Span, process: &'static str) -> Span {
    info_span!(parent: parent, "process", name = process)
}

/// Logs `"<name> start"` when created and the elapsed time when dropped.
#[must_use = "the timer logs when it is dropped"]
pub struct ExecutionTimer {
    name: &'static str,
    span: Span,
    start: Instant,
}

impl ExecutionTimer {
    pub fn start(span: &Span, name: &'static str) -> Self {
        span.in_scope(|| tracing::trace!("{name} start"));
        Self {
            name,
            span: span.clone(),
            start: Instant::now(),
        }
    }
}

impl Drop for ExecutionTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let name = self.name;
        self.span
            .in_scope(|| tracing::trace!("{name} end, took {elapsed:?}"));
    }
}
