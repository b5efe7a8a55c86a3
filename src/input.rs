use crate::pause::PauseFlag;
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// keyboard keys standing in for the four game buttons, by symbol index
const BUTTON_KEYMAP: [(char, u8); 4] = [('1', 0), ('2', 1), ('3', 2), ('4', 3)];

/// toggles the pause flag, like the wired pause button would
const PAUSE_KEY: char = 'p';

/// how long the pump thread sits in poll() before rechecking shutdown
const PUMP_POLL: Duration = Duration::from_millis(50);

/// reads the game buttons
pub trait Input {
    /// true if the given button has a pending press. the engine polls all
    /// four in a fixed priority order on a short tick, so a press only has
    /// to outlive one tick to register
    fn read_button(&mut self, symbol: u8) -> Result<bool, io::Error>;

    /// discard any presses buffered so far
    fn flush(&mut self) -> Result<(), io::Error>;
}

/// keyboard-backed implementation. a dedicated pump thread drains crossterm
/// events and plays the part of the interrupt context: button keys are
/// queued for the game thread, the pause key flips the shared flag in
/// place, and Esc or Ctrl-C request process exit
pub struct TermInput {
    queue: Arc<Mutex<VecDeque<u8>>>,
    quit: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    pump: Option<thread::JoinHandle<()>>,
}

impl TermInput {
    pub fn new(pause: PauseFlag) -> Result<TermInput, io::Error> {
        terminal::enable_raw_mode()?;
        let queue = Arc::new(Mutex::new(VecDeque::new()));
        let quit = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::new(AtomicBool::new(false));
        let pump = {
            let queue = Arc::clone(&queue);
            let quit = Arc::clone(&quit);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || pump_events(queue, quit, shutdown, pause))
        };
        Ok(TermInput {
            queue,
            quit,
            shutdown,
            pump: Some(pump),
        })
    }

    fn lock_queue(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<u8>>, io::Error> {
        self.queue
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "input pump thread panicked"))
    }
}

fn pump_events(
    queue: Arc<Mutex<VecDeque<u8>>>,
    quit: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    pause: PauseFlag,
) {
    while !shutdown.load(Ordering::SeqCst) {
        match poll(PUMP_POLL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                log::warn!("input poll failed: {}", e);
                break;
            }
        }
        let evt = match read() {
            Ok(Event::Key(evt)) => evt,
            Ok(_) => continue,
            Err(e) => {
                log::warn!("input read failed: {}", e);
                break;
            }
        };
        match evt.code {
            KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                quit.store(true, Ordering::SeqCst);
            }
            KeyCode::Esc => {
                quit.store(true, Ordering::SeqCst);
            }
            KeyCode::Char(key) if key == PAUSE_KEY => {
                pause.toggle();
            }
            KeyCode::Char(key) => match BUTTON_KEYMAP.iter().find(|(k, _)| *k == key) {
                Some((_, symbol)) => {
                    if let Ok(mut q) = queue.lock() {
                        q.push_back(*symbol);
                    }
                }
                None => {
                    log::debug!("ignoring unmapped key {:?}", key);
                }
            },
            _ => {}
        }
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(pump) = self.pump.take() {
            let _ = pump.join();
        }
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for TermInput {
    fn read_button(&mut self, symbol: u8) -> Result<bool, io::Error> {
        if self.quit.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "quit requested"));
        }
        let mut queue = self.lock_queue()?;
        if queue.front() == Some(&symbol) {
            queue.pop_front();
            return Ok(true);
        }
        Ok(false)
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        self.lock_queue()?.clear();
        Ok(())
    }
}

/// scripted presses for testing; each press is consumed in order. the
/// script stands for presses yet to happen, so flush leaves it alone
pub struct DummyInput {
    presses: VecDeque<u8>,
}

impl DummyInput {
    pub fn new(presses: &[u8]) -> Self {
        DummyInput {
            presses: presses.iter().copied().collect(),
        }
    }
}

impl Input for DummyInput {
    fn read_button(&mut self, symbol: u8) -> Result<bool, io::Error> {
        if self.presses.front() == Some(&symbol) {
            self.presses.pop_front();
            return Ok(true);
        }
        Ok(false)
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}
