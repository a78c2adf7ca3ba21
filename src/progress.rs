// src/progress.rs
use crate::runner::RunState;

/// Lightweight progress reporting for a run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once before the first request.
    fn begin(&mut self) {}

    /// Free-form status line for human eyes (skipped pages, warning counts).
    fn log(&mut self, _msg: &str) {}

    /// Every runner state transition, in order.
    fn state(&mut self, _state: &RunState) {}

    /// A list page was fully processed. `total` is the running record count.
    fn page_done(&mut self, _page: u32, _records: usize, _total: usize) {}

    /// One record of the current page was enriched (`index` is 1-based).
    fn record_done(&mut self, _index: usize, _of: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Short-lived reborrow of an optional sink, for handing it down a call.
/// `as_deref_mut` would pin the trait object's lifetime to the caller's borrow.
pub fn reborrow<'a>(progress: &'a mut Option<&mut dyn Progress>) -> Option<&'a mut dyn Progress> {
    progress.as_mut().map(|p| &mut **p as &mut dyn Progress)
}
