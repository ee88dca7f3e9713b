use std::cell::Cell;
use std::rc::Rc;

/// Handle to a registered undo action.
///
/// Returned by [`RollbackScope::push`](crate::RollbackScope::push) and
/// [`RollbackScope::push_bottom`](crate::RollbackScope::push_bottom). The
/// handle exposes exactly one operation: marking the action auto-commit.
/// It shares its flag with the record stored in the scope, so toggling it
/// is visible to playback no matter when it happens. Holding a handle past
/// the end of its scope is allowed; toggling it then has no effect.
#[derive(Debug)]
pub struct UndoHandle {
    auto_commit: Rc<Cell<bool>>,
}

impl UndoHandle {
    /// Mark the action auto-commit.
    ///
    /// An auto-committed action is skipped when its scope exits without a
    /// failure in the protected block. It still runs when the scope exits
    /// because of a block failure, or when an unfinished scope is dropped.
    /// The flag never changes playback order. Setting it repeatedly is
    /// idempotent.
    pub fn set_auto_commit(&self) {
        self.auto_commit.set(true);
    }
}

/// A registered undo action: the deferred closure plus its auto-commit
/// flag. Owned exclusively by the scope that created it; the caller only
/// ever sees the [`UndoHandle`] side of the shared flag.
pub(crate) struct UndoAction<E> {
    undo: Box<dyn FnOnce() -> Result<(), E>>,
    auto_commit: Rc<Cell<bool>>,
}

impl<E> UndoAction<E> {
    pub(crate) fn new<F>(undo: F) -> (Self, UndoHandle)
    where
        F: FnOnce() -> Result<(), E> + 'static,
    {
        let auto_commit = Rc::new(Cell::new(false));
        let handle = UndoHandle {
            auto_commit: Rc::clone(&auto_commit),
        };
        let action = Self {
            undo: Box::new(undo),
            auto_commit,
        };
        (action, handle)
    }

    pub(crate) fn auto_commit(&self) -> bool {
        self.auto_commit.get()
    }

    pub(crate) fn invoke(self) -> Result<(), E> {
        (self.undo)()
    }
}
