//! A word bank shared between threads.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::store::WordBank;

/// Cloneable handle to one [`WordBank`] behind a single lock.
///
/// Every operation, read or write, takes the lock for its whole duration, so
/// callers always observe the bank between operations.
#[derive(Debug, Clone, Default)]
pub struct SharedWordBank {
    inner: Arc<Mutex<WordBank>>,
}

impl SharedWordBank {
    pub fn new(bank: WordBank) -> Self {
        SharedWordBank {
            inner: Arc::new(Mutex::new(bank)),
        }
    }

    /// Lock the bank until the guard is dropped.
    pub fn lock(&self) -> MutexGuard<'_, WordBank> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the bank.
    pub fn with<R>(&self, f: impl FnOnce(&mut WordBank) -> R) -> R {
        let mut bank = self.inner.lock();
        f(&mut bank)
    }

    /// Take the bank back if this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<WordBank, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| SharedWordBank { inner })
    }
}

impl From<WordBank> for SharedWordBank {
    fn from(bank: WordBank) -> Self {
        SharedWordBank::new(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_increments() {
        let mut bank = WordBank::new();
        bank.add_word("cat", "feline").unwrap();
        let shared = SharedWordBank::new(bank);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        shared.with(|bank| bank.increase_search_count("cat")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let bank = shared.try_unwrap().unwrap();
        assert_eq!(bank.get("cat").unwrap().search_count(), 101);
        bank.verify_integrity().unwrap();
    }

    #[test]
    fn test_lock_guard() {
        let shared = SharedWordBank::default();
        shared.lock().add_word("dog", "canine").unwrap();
        assert!(shared.lock().contains("dog"));
    }
}
