use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// a single shared bit, toggled from the input pump thread and polled by
/// the game thread. this is the only state that crosses a thread boundary;
/// everything else the engine owns outright
#[derive(Clone, Default)]
pub struct PauseFlag(Arc<AtomicBool>);

impl PauseFlag {
    pub fn new() -> Self {
        PauseFlag::default()
    }

    /// flip the flag; called from the event side on each qualifying edge
    pub fn toggle(&self) {
        self.0.fetch_xor(true, Ordering::SeqCst);
    }

    /// read-only on the game side; the flag is never cleared here
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_clear() {
        assert!(!PauseFlag::new().is_set());
    }

    #[test]
    fn test_toggle_sets_and_clears() {
        let f = PauseFlag::new();
        f.toggle();
        assert!(f.is_set());
        f.toggle();
        assert!(!f.is_set());
    }

    #[test]
    fn test_double_toggle_restores_value() {
        // press-release-press-release must land back where it started
        let f = PauseFlag::new();
        f.toggle();
        let before = f.is_set();
        f.toggle();
        f.toggle();
        assert_eq!(f.is_set(), before);
    }

    #[test]
    fn test_toggle_from_another_thread() {
        let f = PauseFlag::new();
        let g = f.clone();
        thread::spawn(move || g.toggle()).join().unwrap();
        assert!(f.is_set());
    }
}
