use crate::pause::PauseFlag;
use std::time::Duration;

/// all of the engine's waiting goes through a Ticker, so tests can run the
/// whole state machine without touching the wall clock
pub trait Ticker {
    fn sleep(&mut self, duration: Duration);
}

/// production ticker; spin_sleep keeps the short playback intervals honest
/// where a plain thread::sleep would overshoot
pub struct SpinTicker;

impl Ticker for SpinTicker {
    fn sleep(&mut self, duration: Duration) {
        spin_sleep::sleep(duration);
    }
}

/// test ticker: records every requested sleep without sleeping, and can
/// flip a PauseFlag after the n-th call to stand in for the asynchronous
/// edge that can land between any two statements
pub struct CountingTicker {
    pub slept: Vec<Duration>,
    trip: Option<(usize, PauseFlag)>,
}

impl CountingTicker {
    pub fn new() -> Self {
        CountingTicker {
            slept: Vec::new(),
            trip: None,
        }
    }

    /// toggle `flag` once, immediately after the n-th sleep (0-based)
    pub fn trip_after(n: usize, flag: PauseFlag) -> Self {
        CountingTicker {
            slept: Vec::new(),
            trip: Some((n, flag)),
        }
    }
}

impl Ticker for CountingTicker {
    fn sleep(&mut self, duration: Duration) {
        self.slept.push(duration);
        if let Some((n, flag)) = &self.trip {
            if self.slept.len() == n + 1 {
                flag.toggle();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_ticker_records() {
        let mut t = CountingTicker::new();
        t.sleep(Duration::from_millis(300));
        t.sleep(Duration::from_millis(500));
        assert_eq!(
            t.slept,
            vec![Duration::from_millis(300), Duration::from_millis(500)]
        );
    }

    #[test]
    fn test_trip_toggles_flag_once() {
        let flag = PauseFlag::new();
        let mut t = CountingTicker::trip_after(1, flag.clone());
        t.sleep(Duration::from_millis(1));
        assert!(!flag.is_set());
        t.sleep(Duration::from_millis(1));
        assert!(flag.is_set());
        t.sleep(Duration::from_millis(1));
        assert!(flag.is_set());
    }
}
