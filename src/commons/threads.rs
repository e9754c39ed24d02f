//! Run closures after a delay or one after another on background threads.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{JutilsError, Result};

/// A unit of work for [`do_successively`].
pub type Action = Box<dyn FnOnce() + Send + 'static>;

const DO_AFTER_THREAD: &str = "do-after";
const DO_SUCCESSIVELY_THREAD: &str = "do-successively";

fn spawn<F, R>(name: &str, work: F) -> Result<JoinHandle<R>>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn(work)
        .map_err(JutilsError::ThreadSpawn)
}

fn join<R>(name: &str, handle: JoinHandle<R>) -> Result<R> {
    handle.join().map_err(|_| {
        tracing::warn!(thread = name, "Background action panicked");
        JutilsError::ThreadPanicked(name.to_string())
    })
}

/// Wait `delay` on a background thread, run `action` there, and block until
/// it finishes.
pub fn do_after<F>(delay: Duration, action: F) -> Result<()>
where
    F: FnOnce() + Send + 'static,
{
    let handle = do_after_detached(delay, action)?;
    join(DO_AFTER_THREAD, handle)
}

/// Like [`do_after`] but returns immediately with the thread's handle.
pub fn do_after_detached<F>(delay: Duration, action: F) -> Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    tracing::debug!(?delay, "Scheduling delayed action");
    spawn(DO_AFTER_THREAD, move || {
        thread::sleep(delay);
        action();
    })
}

/// Run each action on its own thread, strictly one after another, and block
/// until the last one finishes.
///
/// A panicking action does not stop the sequence: every later action still
/// runs, and the first panic is reported once the sequence is done.
pub fn do_successively(actions: Vec<Action>) -> Result<()> {
    let handle = do_successively_detached(actions)?;
    join(DO_SUCCESSIVELY_THREAD, handle)?
}

/// Like [`do_successively`] but returns immediately. Joining the handle
/// yields the outcome of the sequence.
pub fn do_successively_detached(actions: Vec<Action>) -> Result<JoinHandle<Result<()>>> {
    tracing::debug!(count = actions.len(), "Scheduling sequential actions");
    spawn(DO_SUCCESSIVELY_THREAD, move || {
        let mut first_panic = None;
        for (i, action) in actions.into_iter().enumerate() {
            let name = format!("{DO_SUCCESSIVELY_THREAD}-{i}");
            let handle = spawn(&name, action)?;
            if let Err(err) = join(&name, handle) {
                if first_panic.is_none() {
                    first_panic = Some(err);
                }
            }
        }
        first_panic.map_or(Ok(()), Err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[test]
    fn test_do_after_waits_and_runs() {
        let ran = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&ran);
        let start = Instant::now();

        do_after(Duration::from_millis(20), move || {
            *flag.lock().unwrap() = true;
        })
        .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(20));
        assert!(*ran.lock().unwrap());
    }

    #[test]
    fn test_do_after_reports_panic() {
        let result = do_after(Duration::ZERO, || panic!("boom"));
        assert!(matches!(result, Err(JutilsError::ThreadPanicked(_))));
    }

    #[test]
    fn test_do_after_detached_returns_handle() {
        let handle = do_after_detached(Duration::from_millis(5), || {}).unwrap();
        assert_eq!(handle.thread().name(), Some(DO_AFTER_THREAD));
        handle.join().unwrap();
    }

    #[test]
    fn test_do_successively_preserves_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let actions: Vec<Action> = (0..5)
            .map(|i| {
                let log = Arc::clone(&log);
                Box::new(move || {
                    // Later actions sleep less, so ordering only holds if
                    // each one waits for its predecessor.
                    thread::sleep(Duration::from_millis(10 - 2 * i));
                    log.lock().unwrap().push(i);
                }) as Action
            })
            .collect();

        do_successively(actions).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_do_successively_continues_after_panic() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let after = Arc::clone(&log);
        let actions: Vec<Action> = vec![
            Box::new(|| panic!("first fails")) as Action,
            Box::new(|| panic!("second fails")) as Action,
            Box::new(move || after.lock().unwrap().push("third")) as Action,
        ];

        let handle = do_successively_detached(actions).unwrap();
        let outcome = handle.join().unwrap();
        match outcome {
            Err(JutilsError::ThreadPanicked(name)) => assert_eq!(name, "do-successively-0"),
            other => panic!("expected the first panic, got {other:?}"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["third"]);
    }
}
