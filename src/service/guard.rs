use std::sync::Arc;

use parking_lot::Mutex;

/// Holds the single-flight run flag for as long as it lives.
///
/// The flag sits behind a lock so that a run's last event and the flag
/// release happen as one step: anyone who has seen the last event can start
/// again, and nobody can start before it is sent.
///
/// Dropping the guard without [`finish`](Self::finish) clears the flag,
/// including during a panic unwind.
#[derive(Debug)]
pub(super) struct RunGuard {
    flag: Arc<Mutex<bool>>,
    released: bool,
}

impl RunGuard {
    /// Sets the flag, or returns `None` if it was already set.
    pub(super) fn acquire(flag: &Arc<Mutex<bool>>) -> Option<Self> {
        let mut running = flag.lock();
        if *running {
            return None;
        }
        *running = true;

        Some(Self {
            flag: Arc::clone(flag),
            released: false,
        })
    }

    /// Runs `last` and clears the flag while holding the lock.
    pub(super) fn finish<T>(mut self, last: impl FnOnce() -> T) -> T {
        let mut running = self.flag.lock();
        let value = last();
        *running = false;
        drop(running);

        self.released = true;
        value
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if !self.released {
            *self.flag.lock() = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_guard_at_a_time() {
        let flag = Arc::new(Mutex::new(false));

        let guard = RunGuard::acquire(&flag).unwrap();
        assert!(*flag.lock());
        assert!(RunGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!*flag.lock());
        assert!(RunGuard::acquire(&flag).is_some());
    }

    #[test]
    fn finish_runs_last_step_before_release() {
        let flag = Arc::new(Mutex::new(false));
        let guard = RunGuard::acquire(&flag).unwrap();

        let observed = guard.finish(|| {
            // The lock is held here, so the flag cannot be observed as clear.
            flag.try_lock().is_none()
        });
        assert!(observed);
        assert!(!*flag.lock());
    }

    #[test]
    fn finished_guard_does_not_clear_a_later_run() {
        let flag = Arc::new(Mutex::new(false));

        let first = RunGuard::acquire(&flag).unwrap();
        first.finish(|| ());

        let _second = RunGuard::acquire(&flag).unwrap();
        assert!(*flag.lock());
        assert!(RunGuard::acquire(&flag).is_none());
    }
}
