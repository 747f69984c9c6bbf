//! Percentage progress reporting.
//!
//! The downloader reports raw byte counts after every chunk; [`ProgressAdapter`]
//! turns them into at most one event per integer percentage so a UI is not
//! flooded with per-chunk updates.

/// Receiver of progress events (a terminal line, a notification, a log).
pub trait ProgressSink {
    /// `percentage` is absolute (0..=100), `delta` is the increase since the previous event.
    fn report(&mut self, percentage: u8, delta: u8, label: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(u8, u8, &str),
{
    fn report(&mut self, percentage: u8, delta: u8, label: &str) {
        self(percentage, delta, label)
    }
}

/// Sink that emits progress as debug-level tracing records.
#[derive(Debug, Clone)]
pub struct LogProgress {
    pub title: String,
}

impl ProgressSink for LogProgress {
    fn report(&mut self, percentage: u8, delta: u8, label: &str) {
        tracing::debug!(title = %self.title, percentage, delta, "{}", label);
    }
}

/// Percentage of `read` over `total`, floored and clamped to 100. An empty body counts as done.
pub fn percentage(read: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (u128::from(read) * 100) / u128::from(total);
    pct.min(100) as u8
}

/// Deduplicating adapter between byte counts and a [`ProgressSink`].
pub struct ProgressAdapter<'a> {
    sink: &'a mut dyn ProgressSink,
    last: Option<u8>,
}

impl<'a> ProgressAdapter<'a> {
    pub fn new(sink: &'a mut dyn ProgressSink) -> Self {
        Self { sink, last: None }
    }

    /// Report `read` of `total` bytes. Emits only when the percentage moved forward.
    pub fn report(&mut self, read: u64, total: u64) {
        let pct = percentage(read, total);
        let prev = match self.last {
            Some(prev) if pct <= prev => return,
            Some(prev) => prev,
            None => 0,
        };
        self.last = Some(pct);
        self.sink.report(pct, pct - prev, &format!("{pct}%"));
    }
}
