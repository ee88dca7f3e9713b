use std::collections::VecDeque;
use std::fmt::Debug;

use tracing::{debug, warn};

use crate::action::{UndoAction, UndoHandle};
use crate::error::RollbackError;
use crate::report::{PlaybackReport, UndoStatus};

/// A scope that replays registered undo actions when it exits.
///
/// Callers register undo actions at the top or bottom of the scope's undo
/// list while performing forward work. On exit the list is replayed front
/// to back: top registration is LIFO (the newest action runs first),
/// bottom registration is FIFO, and every bottom action runs after every
/// top action. A failure in the protected block replays everything; a
/// clean exit skips the actions marked auto-commit.
///
/// A scope exits through [`RollbackScope::run`] (the scoped entry point)
/// or [`RollbackScope::finish`] (the manual form). Both consume the
/// scope, so a closed scope cannot accept further registrations. Dropping
/// a scope that was never finished replays its pending actions as the
/// failure path.
pub struct RollbackScope<E> {
    undo_list: VecDeque<UndoAction<E>>,
}

impl<E> RollbackScope<E> {
    /// Create an empty scope with no registered undo actions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            undo_list: VecDeque::new(),
        }
    }

    /// Register an undo action at the top of the undo list.
    ///
    /// The action executes before all currently registered actions and
    /// after any action pushed later. State the action needs is captured
    /// by the closure at registration time. The returned handle can mark
    /// the action auto-commit; see [`UndoHandle::set_auto_commit`].
    pub fn push<F>(&mut self, undo: F) -> UndoHandle
    where
        F: FnOnce() -> Result<(), E> + 'static,
    {
        let (action, handle) = UndoAction::new(undo);
        self.undo_list.push_front(action);
        handle
    }

    /// Register an undo action at the bottom of the undo list.
    ///
    /// The action executes after all top-registered actions, including
    /// ones pushed later. Bottom-registered actions run among themselves
    /// in registration order.
    pub fn push_bottom<F>(&mut self, undo: F) -> UndoHandle
    where
        F: FnOnce() -> Result<(), E> + 'static,
    {
        let (action, handle) = UndoAction::new(undo);
        self.undo_list.push_back(action);
        handle
    }

    /// Discard every pending undo action without executing any of them.
    ///
    /// Used when the scope's forward work is to be kept permanently. The
    /// scope stays open: actions pushed afterwards are replayed normally.
    pub fn commit_all(&mut self) {
        debug!(
            discarded = self.undo_list.len(),
            "discarding pending undo actions"
        );
        self.undo_list.clear();
    }

    fn playback(&mut self, failed: bool) -> (Option<E>, PlaybackReport) {
        let mut report = PlaybackReport::new();
        let mut first_failure = None;

        for (index, action) in self.undo_list.drain(..).enumerate() {
            if !failed && action.auto_commit() {
                debug!(index, "skipping auto-committed undo action");
                report.record(UndoStatus::Skipped);
                continue;
            }

            match action.invoke() {
                Ok(()) => {
                    debug!(index, "undo action completed");
                    report.record(UndoStatus::Executed);
                }
                Err(failure) => {
                    report.record(UndoStatus::Failed);
                    if first_failure.is_none() {
                        warn!(index, "undo action failed; continuing playback");
                        first_failure = Some(failure);
                    } else {
                        warn!(index, "undo action failed; keeping the first failure");
                    }
                }
            }
        }

        (first_failure, report)
    }
}

impl<E: Debug> RollbackScope<E> {
    /// Run a block inside a new scope, replaying undo actions when it
    /// finishes.
    ///
    /// The block receives the open scope and registers undo actions while
    /// performing forward work. When it returns, the scope exits: on
    /// `Err` every pending action replays and the block's failure
    /// propagates; on `Ok` pending actions replay except those marked
    /// auto-commit, and the block's value is returned if no undo action
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns `RollbackError::BlockFailed` if the block fails.
    /// Returns `RollbackError::UndoFailed` if the block succeeds and an
    /// undo action fails during playback.
    pub fn run<T, F>(block: F) -> Result<T, RollbackError<E>>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let mut scope = Self::new();
        let outcome = block(&mut scope);
        scope.finish(outcome)
    }

    /// Run a block inside a new scope and return both the result and a
    /// report of the playback.
    ///
    /// The report lists one [`UndoStatus`] per registered action in
    /// playback order.
    pub fn run_with_report<T, F>(block: F) -> (Result<T, RollbackError<E>>, PlaybackReport)
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let mut scope = Self::new();
        let outcome = block(&mut scope);
        scope.finish_with_report(outcome)
    }

    /// Exit the scope with the outcome of the protected work.
    ///
    /// Consumes the scope and replays the undo list exactly once. Passing
    /// `Err` replays every pending action; passing `Ok` skips the ones
    /// marked auto-commit.
    ///
    /// # Errors
    ///
    /// Returns `RollbackError::BlockFailed` wrapping the outcome's error
    /// if there is one; it takes precedence over any undo failure.
    /// Otherwise returns `RollbackError::UndoFailed` wrapping the first
    /// undo failure, if any.
    pub fn finish<T>(self, outcome: Result<T, E>) -> Result<T, RollbackError<E>> {
        let (result, _report) = self.finish_internal(outcome);
        result
    }

    /// Exit the scope and return both the result and a report of the
    /// playback.
    pub fn finish_with_report<T>(
        self,
        outcome: Result<T, E>,
    ) -> (Result<T, RollbackError<E>>, PlaybackReport) {
        self.finish_internal(outcome)
    }

    fn finish_internal<T>(
        mut self,
        outcome: Result<T, E>,
    ) -> (Result<T, RollbackError<E>>, PlaybackReport) {
        let (undo_failure, report) = self.playback(outcome.is_err());

        let result = match outcome {
            Err(source) => {
                if let Some(discarded) = undo_failure {
                    warn!(
                        error = ?discarded,
                        "discarding undo failure; the protected block failure takes precedence"
                    );
                }
                Err(RollbackError::BlockFailed { source })
            }
            Ok(value) => match undo_failure {
                Some(source) => Err(RollbackError::UndoFailed { source }),
                None => Ok(value),
            },
        };

        (result, report)
    }
}

impl<E> Default for RollbackScope<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for RollbackScope<E> {
    fn drop(&mut self) {
        if self.undo_list.is_empty() {
            return;
        }
        // Pending actions here mean the scope never exited cleanly, so
        // playback runs as the failure path and auto-commit is ignored.
        warn!(
            pending = self.undo_list.len(),
            "scope dropped with pending undo actions; rolling back"
        );
        let (failure, _report) = self.playback(true);
        if failure.is_some() {
            warn!("undo failure discarded during drop playback");
        }
    }
}
