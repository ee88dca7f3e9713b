use std::fmt::Debug;

use thiserror::Error;

/// Error from a completed scope exit.
///
/// Exactly one failure is surfaced per exit, tagged with its origin. A
/// failure in the protected block always takes precedence; an undo
/// failure is surfaced only when the block itself succeeded, and only the
/// first one encountered during playback is kept.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RollbackError<E: Debug> {
    /// The protected block failed. Undo playback has already run.
    #[error("protected block failed")]
    BlockFailed {
        /// The failure returned by the protected block.
        #[source]
        source: E,
    },

    /// The protected block succeeded, but an undo action failed during
    /// playback. The remaining undo actions still ran.
    #[error("undo action failed during rollback playback")]
    UndoFailed {
        /// The first failure returned by an undo action.
        #[source]
        source: E,
    },
}
