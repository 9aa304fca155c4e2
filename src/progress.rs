// src/progress.rs
/// Lightweight progress reporting used by the collectors.
/// The CLI implements this to print status lines; tests use [`NullProgress`]
/// or a recording sink.
pub trait Progress {
    /// Called at the start with the number of items queued.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One item (event, fight, year page) finished.
    fn item_done(&mut self, _label: &str) {}

    /// One item failed; the batch carries on.
    fn item_failed(&mut self, _label: &str, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
