//! simon — the classic four-button memory game, as a terminal program
//! driven by a remote peer over TCP.
//!
//! ## Design
//!
//! * one logical game thread; the only shared state is a single atomic
//!   pause bit, flipped by the input pump and polled at checkpoints
//! * every device sits behind a trait (buttons, lamps, buzzer, two-line
//!   display, command channel) so a board port or a test double can slot
//!   in without touching the engine
//! * all waiting goes through a Ticker, so the state machine is testable
//!   without the wall clock and playback intervals are precise in
//!   production
//! * pause is abandon-and-restart: an interrupted round is dropped whole
//!   and play resumes from the top of the next round, never mid-sequence
//!
//! Model
//!
//! Engine
//!  |-- input, lamps, sound, display, channel, ticker, pause flag, rng
//!  |-- sequence (append-only, capped), score, per-step interval
//!  `-- run loop
//!       |-- pause checkpoint (low-rate poll until the flag clears)
//!       |-- extend sequence and play it back
//!       |-- collect and verify the answer, echoing each press
//!       `-- score the win, or report the loss and start a new session

pub mod channel;
pub mod display;
pub mod engine;
pub mod input;
pub mod lamps;
pub mod pause;
pub mod sound;
pub mod timer;
