/// Outcome of one undo action during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum UndoStatus {
    /// The action ran and succeeded.
    Executed,
    /// The action was suppressed by its auto-commit flag.
    Skipped,
    /// The action ran and failed.
    Failed,
}

/// Record of one playback pass over a scope's undo list.
///
/// Entries are positional, in playback order. The report is
/// observational: it never changes which failure a scope exit surfaces.
#[derive(Debug, Default)]
pub struct PlaybackReport {
    statuses: Vec<UndoStatus>,
}

impl PlaybackReport {
    /// Create a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of the next undo action in playback order.
    pub(crate) fn record(&mut self, status: UndoStatus) {
        self.statuses.push(status);
    }

    /// Per-action outcomes in playback order.
    #[must_use]
    pub fn statuses(&self) -> &[UndoStatus] {
        &self.statuses
    }

    /// Number of undo actions that ran and succeeded.
    #[must_use]
    pub fn executed(&self) -> usize {
        self.count(UndoStatus::Executed)
    }

    /// Number of undo actions suppressed by auto-commit.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(UndoStatus::Skipped)
    }

    /// Number of undo actions that ran and failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(UndoStatus::Failed)
    }

    /// Get a summary of the playback for display.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} executed, {} skipped, {} failed",
            self.executed(),
            self.skipped(),
            self.failed()
        )
    }

    fn count(&self, status: UndoStatus) -> usize {
        self.statuses.iter().filter(|&&s| s == status).count()
    }
}
