use crate::channel::Channel;
use crate::display::Display;
use crate::input::Input;
use crate::lamps::Lamps;
use crate::pause::PauseFlag;
use crate::sound::Sound;
use crate::timer::Ticker;
use rand::rngs::StdRng;
use rand::Rng;
use std::io;
use std::time::Duration;

/// the sequence never grows past one short of this
pub const SEQUENCE_CAPACITY: usize = 100;

/// one symbol per button/lamp pair
const SYMBOL_COUNT: u8 = 4;

const TITLE: &str = "Simon";

// playback and round pacing
const STEP_GAP: Duration = Duration::from_millis(500);
const ROUND_GAP: Duration = Duration::from_millis(300);

// polling granularity: buttons on a fine tick, the pause flag on a coarse one
const POLL_TICK: Duration = Duration::from_millis(1);
const PAUSE_POLL: Duration = Duration::from_millis(100);

// how long narration stays on the display
const MESSAGE_HOLD: Duration = Duration::from_secs(2);
const GAME_OVER_HOLD: Duration = Duration::from_secs(5);

// the two actuator cues
const LOSS_SETTLE: Duration = Duration::from_millis(200);
const LOSS_PULSE: Duration = Duration::from_millis(100);
const LOSS_PULSES: u8 = 4;
const LEVEL_UP_PULSE: Duration = Duration::from_millis(150);
const LEVEL_UP_PULSES: u8 = 3;

/// per-step playback interval, chosen over the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// case-sensitive substring match, Easy before Medium before Hard when
    /// the text somehow contains several; anything unrecognized plays as
    /// Medium
    pub fn from_text(text: &str) -> Self {
        if text.contains("Easy") {
            Difficulty::Easy
        } else if text.contains("Medium") {
            Difficulty::Medium
        } else if text.contains("Hard") {
            Difficulty::Hard
        } else {
            Difficulty::Medium
        }
    }

    pub fn interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(600),
            Difficulty::Medium => Duration::from_millis(300),
            Difficulty::Hard => Duration::from_millis(100),
        }
    }
}

/// result of waiting on the buttons
enum ButtonRead {
    Pressed(u8),
    Paused,
}

/// how far playback got
#[derive(Debug, PartialEq, Eq)]
pub enum Playback {
    Done,
    Paused,
}

/// what the player's answer came to. Paused is neither right nor wrong;
/// the round is simply abandoned
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
    Paused,
}

/// how a whole round ended
#[derive(Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
    Paused,
}

/// the game proper: owns the sequence, the score and the pacing, and talks
/// to everything else through the device traits. single-threaded except
/// for the pause flag, which the input pump flips underneath it
pub struct Engine<'a> {
    input: &'a mut dyn Input,
    lamps: &'a mut dyn Lamps,
    sound: &'a mut dyn Sound,
    display: &'a mut dyn Display,
    channel: &'a mut dyn Channel,
    ticker: &'a mut dyn Ticker,
    pause: PauseFlag,
    rng: StdRng,
    sequence: Vec<u8>,
    score: u32,
    interval: Duration,
}

impl<'a> Engine<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input: &'a mut dyn Input,
        lamps: &'a mut dyn Lamps,
        sound: &'a mut dyn Sound,
        display: &'a mut dyn Display,
        channel: &'a mut dyn Channel,
        ticker: &'a mut dyn Ticker,
        pause: PauseFlag,
        rng: StdRng,
    ) -> Engine<'a> {
        Engine {
            input,
            lamps,
            sound,
            display,
            channel,
            ticker,
            pause,
            rng,
            sequence: Vec::new(),
            score: 0,
            interval: Difficulty::Medium.interval(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// run rounds until the peer goes away or the player asks to quit;
    /// both surface as io errors from the collaborators
    pub fn run(&mut self) -> Result<(), io::Error> {
        self.select_difficulty()?;
        loop {
            if self.pause.is_set() {
                self.hold_while_paused()?;
            }
            self.play_round()?;
            self.ticker.sleep(ROUND_GAP);
        }
    }

    /// one full round: extend, play back, collect the answer, settle up.
    /// a pause anywhere abandons the round without scoring it either way
    pub fn play_round(&mut self) -> Result<RoundOutcome, io::Error> {
        if let Playback::Paused = self.advance_round()? {
            return Ok(RoundOutcome::Paused);
        }
        match self.collect_and_verify()? {
            Verdict::Paused => Ok(RoundOutcome::Paused),
            Verdict::Wrong => {
                self.report_loss_and_reset()?;
                self.select_difficulty()?;
                Ok(RoundOutcome::Lost)
            }
            Verdict::Correct => {
                self.on_success()?;
                Ok(RoundOutcome::Won)
            }
        }
    }

    /// block on the channel for a difficulty line and take the interval
    /// from it. a pause raised while we wait takes effect at the next
    /// round checkpoint
    pub fn select_difficulty(&mut self) -> Result<(), io::Error> {
        self.display.clear()?;
        self.display.print(0, "Choose")?;
        self.display.print(1, "difficulty")?;
        let text = self.channel.receive_text()?;
        let difficulty = Difficulty::from_text(&text);
        self.interval = difficulty.interval();
        log::info!("difficulty {:?} from {:?}", difficulty, text);
        self.display.clear()?;
        self.display.print(0, "Difficulty:")?;
        self.display.print(1, &text)?;
        self.ticker.sleep(MESSAGE_HOLD);
        self.display.clear()?;
        self.display.print(0, TITLE)?;
        Ok(())
    }

    /// append one random symbol and replay the whole sequence
    pub fn advance_round(&mut self) -> Result<Playback, io::Error> {
        self.extend_sequence();
        self.play_sequence()
    }

    fn extend_sequence(&mut self) {
        let symbol = self.rng.gen_range(0..SYMBOL_COUNT);
        if self.sequence.len() < SEQUENCE_CAPACITY - 1 {
            self.sequence.push(symbol);
        } else {
            // growth pins one short of capacity; the new symbol is dropped
            log::warn!("sequence at capacity, dropping symbol {}", symbol);
        }
        log::debug!("round {} begins", self.sequence.len());
    }

    /// replay the sequence from the start, checking the pause flag before
    /// each step. an in-flight flash always finishes; only whole steps are
    /// skipped
    pub fn play_sequence(&mut self) -> Result<Playback, io::Error> {
        for i in 0..self.sequence.len() {
            if self.pause.is_set() {
                return Ok(Playback::Paused);
            }
            let symbol = self.sequence[i];
            self.flash_symbol(symbol)?;
            self.ticker.sleep(STEP_GAP);
        }
        Ok(Playback::Done)
    }

    /// read the player's answer one press at a time. every press is echoed
    /// on lamp and buzzer whether or not it was right; the first mismatch
    /// ends the round
    pub fn collect_and_verify(&mut self) -> Result<Verdict, io::Error> {
        self.input.flush()?;
        for i in 0..self.sequence.len() {
            let expected = self.sequence[i];
            let actual = match self.await_button()? {
                ButtonRead::Paused => return Ok(Verdict::Paused),
                ButtonRead::Pressed(symbol) => symbol,
            };
            self.flash_symbol(actual)?;
            if actual != expected {
                log::info!("expected {}, got {}", expected, actual);
                return Ok(Verdict::Wrong);
            }
        }
        Ok(Verdict::Correct)
    }

    /// poll the four buttons in priority order on a ~1ms tick until one is
    /// pressed, or until the pause flag comes up
    fn await_button(&mut self) -> Result<ButtonRead, io::Error> {
        loop {
            if self.pause.is_set() {
                return Ok(ButtonRead::Paused);
            }
            for symbol in 0..SYMBOL_COUNT {
                if self.input.read_button(symbol)? {
                    return Ok(ButtonRead::Pressed(symbol));
                }
            }
            self.ticker.sleep(POLL_TICK);
        }
    }

    /// send the score to the peer exactly once, play the failure cue, and
    /// wipe sequence and score for the next session
    pub fn report_loss_and_reset(&mut self) -> Result<(), io::Error> {
        log::info!("round lost at score {}", self.score);
        self.channel.send_line(&self.score.to_string())?;
        self.sequence.clear();
        self.ticker.sleep(LOSS_SETTLE);
        for _ in 0..LOSS_PULSES {
            self.pulse(LOSS_PULSE)?;
        }
        self.display.clear()?;
        self.display.print(0, "You lose :(")?;
        self.display.print(1, &format!("Score: {}", self.score))?;
        self.ticker.sleep(GAME_OVER_HOLD);
        self.display.clear()?;
        self.score = 0;
        Ok(())
    }

    /// score the win and play the level-up cue. a pause mid-cue abandons
    /// the remaining pulses, never the increment
    pub fn on_success(&mut self) -> Result<(), io::Error> {
        self.score += 1;
        log::debug!("score {}", self.score);
        self.display.print(1, &format!("Score: {}", self.score))?;
        for _ in 0..LEVEL_UP_PULSES {
            if self.pause.is_set() {
                return Ok(());
            }
            self.pulse(LEVEL_UP_PULSE)?;
        }
        Ok(())
    }

    /// lamp and buzzer together for one difficulty interval
    fn flash_symbol(&mut self, symbol: u8) -> Result<(), io::Error> {
        self.lamps.set(symbol, true)?;
        self.sound.start()?;
        self.ticker.sleep(self.interval);
        self.lamps.set(symbol, false)?;
        self.sound.stop()
    }

    /// one buzzer pulse: equal time on and off
    fn pulse(&mut self, width: Duration) -> Result<(), io::Error> {
        self.sound.start()?;
        self.ticker.sleep(width);
        self.sound.stop()?;
        self.ticker.sleep(width);
        Ok(())
    }

    /// the outer loop's pause checkpoint: narrate, poll the flag at a low
    /// rate until it clears, then pick up with a fresh round
    fn hold_while_paused(&mut self) -> Result<(), io::Error> {
        log::info!("paused");
        self.display.clear()?;
        self.display.print(0, "Paused")?;
        while self.pause.is_set() {
            self.ticker.sleep(PAUSE_POLL);
        }
        log::info!("resumed");
        self.display.clear()?;
        self.display.print(0, TITLE)?;
        self.display.print(1, &format!("Score: {}", self.score))?;
        self.ticker.sleep(MESSAGE_HOLD);
        self.display.clear()?;
        self.display.print(0, TITLE)?;
        Ok(())
    }
}
