use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::bounded_vec::BoundedVec;

pub const DEFAULT_CAPACITY: usize = 8;

/// Value stored when `/add` is called without a usable `val` parameter.
pub const DEFAULT_VALUE: &str = "NoData";

/// Shared application state handed to every request handler.
///
/// Cloning is cheap and every clone refers to the same list. All access goes
/// through a single mutex, so `add` and `render` never interleave.
#[derive(Debug, Clone)]
pub struct App {
    list: Arc<Mutex<BoundedVec<String>>>,
}

impl App {
    pub fn new(capacity: usize) -> Self {
        Self {
            list: Arc::new(Mutex::new(BoundedVec::new(capacity))),
        }
    }

    /// Appends a value, evicting the oldest one if the list is full.
    pub fn add(&self, value: String) {
        let mut list = self.lock();
        if let Some(evicted) = list.push(value) {
            tracing::debug!(%evicted, "list full, evicted oldest value");
        }
        tracing::debug!(len = list.len(), capacity = list.max_size(), "value added");
    }

    pub fn render(&self) -> String {
        self.lock().to_string()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.lock().max_size()
    }

    // A panic cannot leave the deque half-updated, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, BoundedVec<String>> {
        self.list.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_default_app_is_empty() {
        let app = App::default();
        assert_eq!(app.capacity(), DEFAULT_CAPACITY);
        assert_eq!(app.len(), 0);
        assert_eq!(app.render(), "[ Empty ]");
    }

    #[test]
    fn test_clones_share_one_list() {
        let app = App::default();
        let other = app.clone();

        app.add("A".to_string());
        other.add("B".to_string());

        assert_eq!(app.render(), "[ A <-> B ]");
        assert_eq!(other.len(), 2);
    }

    #[test]
    fn test_nine_adds_keep_last_eight() {
        let app = App::default();
        for i in 1..=9 {
            app.add(format!("v{}", i));
        }
        assert_eq!(app.len(), 8);
        assert_eq!(
            app.render(),
            "[ v2 <-> v3 <-> v4 <-> v5 <-> v6 <-> v7 <-> v8 <-> v9 ]"
        );
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let app = App::default();

        let handles: Vec<_> = (0..DEFAULT_CAPACITY)
            .map(|i| {
                let app = app.clone();
                thread::spawn(move || app.add(format!("t{}", i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(app.len(), DEFAULT_CAPACITY);
        let rendered = app.render();
        for i in 0..DEFAULT_CAPACITY {
            assert!(rendered.contains(&format!("t{}", i)));
        }
    }

    #[test]
    fn test_concurrent_adds_past_capacity_stay_bounded() {
        let app = App::new(4);

        let handles: Vec<_> = (0..16)
            .map(|t| {
                let app = app.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        app.add(format!("{}-{}", t, i));
                        assert!(app.len() <= 4);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(app.len(), 4);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let app = App::default();
        app.add("before".to_string());

        let poisoner = app.clone();
        let result = thread::spawn(move || {
            let _guard = poisoner.list.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());

        app.add("after".to_string());
        assert_eq!(app.render(), "[ before <-> after ]");
    }
}
