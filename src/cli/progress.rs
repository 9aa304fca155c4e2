// src/cli/progress.rs
use crate::progress::Progress;

/// Status lines on stderr, so stdout stays clean for command output.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.failed = 0;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        eprintln!("  [{}/{}] {label}", self.done + self.failed, self.total);
    }
    fn item_failed(&mut self, label: &str, error: &str) {
        self.failed += 1;
        eprintln!("  [{}/{}] {label} FAILED: {error}", self.done + self.failed, self.total);
    }
    fn finish(&mut self) {
        if self.total == 0 {
            return; // nothing queued, nothing to report
        }
        if self.failed == 0 {
            eprintln!("Done ({}/{})", self.done, self.total);
        } else {
            eprintln!("Done ({}/{}, {} failed)", self.done, self.total, self.failed);
        }
    }
}
