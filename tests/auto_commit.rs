//! Integration tests for auto-commit suppression of undo actions.

use std::cell::RefCell;
use std::rc::Rc;

use rollback_scope::{PlaybackReport, RollbackError, RollbackScope, UndoHandle};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TestError(String);

fn push_recorder(
    scope: &mut RollbackScope<TestError>,
    log: &Rc<RefCell<Vec<i32>>>,
    value: i32,
) -> UndoHandle {
    let log = Rc::clone(log);
    scope.push(move || {
        log.borrow_mut().push(value);
        Ok(())
    })
}

#[test]
fn auto_committed_action_is_skipped_on_clean_exit() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let result: Result<(), RollbackError<TestError>> = RollbackScope::run(|scope| {
        push_recorder(scope, &log, 2);
        push_recorder(scope, &log, 1).set_auto_commit();
        push_recorder(scope, &log, 0);
        Ok(())
    });

    assert!(result.is_ok());
    assert_eq!(*log.borrow(), [0, 2]);
}

#[test]
fn auto_committed_action_runs_when_the_block_fails() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let result: Result<(), RollbackError<TestError>> = RollbackScope::run(|scope| {
        push_recorder(scope, &log, 2);
        push_recorder(scope, &log, 1).set_auto_commit();
        push_recorder(scope, &log, 0);
        Err(TestError("block failed".to_string()))
    });

    let err = result.expect_err("block failure should surface");
    match err {
        RollbackError::BlockFailed { source } => {
            assert_eq!(source.to_string(), "block failed");
        }
        _ => panic!("unexpected error variant"),
    }
    assert_eq!(*log.borrow(), [0, 1, 2]);
}

#[test]
fn undo_failure_does_not_disable_auto_commit_skipping() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let result: Result<(), RollbackError<TestError>> = RollbackScope::run(|scope| {
        push_recorder(scope, &log, 2);
        push_recorder(scope, &log, 1).set_auto_commit();
        let failing = Rc::clone(&log);
        scope.push(move || {
            failing.borrow_mut().push(0);
            Err(TestError("undo 0 failed".to_string()))
        });
        Ok(())
    });

    let err = result.expect_err("undo failure should surface");
    match err {
        RollbackError::UndoFailed { source } => {
            assert_eq!(source.to_string(), "undo 0 failed");
        }
        _ => panic!("unexpected error variant"),
    }
    assert_eq!(*log.borrow(), [0, 2]);
}

#[test]
fn every_auto_committed_action_is_skipped_on_clean_exit() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let (result, report): (Result<(), RollbackError<TestError>>, PlaybackReport) =
        RollbackScope::run_with_report(|scope| {
            for i in 0..3 {
                push_recorder(scope, &log, i).set_auto_commit();
            }
            Ok(())
        });

    assert!(result.is_ok());
    assert!(log.borrow().is_empty());
    assert_eq!(report.skipped(), 3);
    assert_eq!(report.executed(), 0);
}

#[test]
fn the_flag_can_be_set_any_time_before_exit() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let result: Result<(), RollbackError<TestError>> = RollbackScope::run(|scope| {
        let handle = push_recorder(scope, &log, 1);
        push_recorder(scope, &log, 0);
        handle.set_auto_commit();
        Ok(())
    });

    assert!(result.is_ok());
    assert_eq!(*log.borrow(), [0]);
}
