//! Scoped rollback execution with ordered undo actions.
//!
//! This crate provides a scope that collects undo actions while forward
//! work makes side effects, then replays them when the scope exits. Top
//! registration replays newest-first; bottom registration appends actions
//! that run after everything else. Actions marked auto-commit are skipped
//! when the scope exits cleanly, and a failure in the protected block
//! always outranks failures from the undo actions themselves.
//!
//! # Examples
//!
//! Undo actions replay in reverse registration order when the protected
//! block fails:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use rollback_scope::{RollbackError, RollbackScope};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("provisioning failed")]
//! struct ProvisionError;
//!
//! let cleaned_up = Rc::new(RefCell::new(Vec::new()));
//!
//! let result: Result<(), RollbackError<ProvisionError>> = RollbackScope::run(|scope| {
//!     // Volume created: register how to undo it.
//!     let log = Rc::clone(&cleaned_up);
//!     scope.push(move || {
//!         log.borrow_mut().push("delete volume");
//!         Ok(())
//!     });
//!
//!     // Address allocated: register how to undo it.
//!     let log = Rc::clone(&cleaned_up);
//!     scope.push(move || {
//!         log.borrow_mut().push("release address");
//!         Ok(())
//!     });
//!
//!     // The next step fails, so the scope replays the undo actions in
//!     // reverse registration order.
//!     Err(ProvisionError)
//! });
//!
//! assert!(result.is_err());
//! assert_eq!(*cleaned_up.borrow(), ["release address", "delete volume"]);
//! ```
//!
//! Auto-commit skips an undo action once its forward operation is final:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use rollback_scope::{RollbackError, RollbackScope};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("write failed")]
//! struct WriteError;
//!
//! let undone = Rc::new(RefCell::new(Vec::new()));
//!
//! let result: Result<(), RollbackError<WriteError>> = RollbackScope::run(|scope| {
//!     let log = Rc::clone(&undone);
//!     let handle = scope.push(move || {
//!         log.borrow_mut().push("restore backup");
//!         Ok(())
//!     });
//!
//!     // The write is verified, so its undo is no longer wanted on a
//!     // clean exit. It would still run if a later step failed.
//!     handle.set_auto_commit();
//!     Ok(())
//! });
//!
//! assert!(result.is_ok());
//! assert!(undone.borrow().is_empty());
//! ```

mod action;
mod error;
mod report;
mod scope;

pub use action::UndoHandle;
pub use error::RollbackError;
pub use report::{PlaybackReport, UndoStatus};
pub use scope::RollbackScope;
