use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::execute;
use std::io;

/// the four coloured indicators, addressed by symbol index 0-3. the engine
/// only ever switches one lamp at a time
pub trait Lamps {
    fn set(&mut self, symbol: u8, on: bool) -> Result<(), io::Error>;
}

/// classic simon colours, by symbol index
const LAMP_COLOURS: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

/// screen row the lamp strip is drawn on
const LAMP_ROW: u16 = 1;
const LAMP_WIDTH: u16 = 4;
const LAMP_GAP: u16 = 2;

/// renders the lamps as coloured cells on the terminal. assumes symbol
/// indices were validated by the caller; out-of-range is a programming
/// error and panics via the colour lookup
pub struct TermLamps {
    out: io::Stdout,
}

impl TermLamps {
    pub fn new() -> Result<TermLamps, io::Error> {
        let mut lamps = TermLamps { out: io::stdout() };
        for symbol in 0..LAMP_COLOURS.len() as u8 {
            lamps.set(symbol, false)?;
        }
        Ok(lamps)
    }
}

impl Lamps for TermLamps {
    fn set(&mut self, symbol: u8, on: bool) -> Result<(), io::Error> {
        let colour = if on {
            LAMP_COLOURS[symbol as usize]
        } else {
            Color::DarkGrey
        };
        let col = LAMP_GAP + symbol as u16 * (LAMP_WIDTH + LAMP_GAP);
        execute!(
            self.out,
            MoveTo(col, LAMP_ROW),
            SetBackgroundColor(colour),
            Print(" ".repeat(LAMP_WIDTH as usize)),
            ResetColor
        )?;
        Ok(())
    }
}

/// records every lamp transition in order, for asserting playback and echo
/// behaviour without a terminal
pub struct DummyLamps {
    pub transitions: Vec<(u8, bool)>,
}

impl DummyLamps {
    pub fn new() -> Self {
        DummyLamps {
            transitions: Vec::new(),
        }
    }

    /// just the symbols that were switched on, in order
    pub fn lit(&self) -> Vec<u8> {
        self.transitions
            .iter()
            .filter(|(_, on)| *on)
            .map(|(s, _)| *s)
            .collect()
    }
}

impl Lamps for DummyLamps {
    fn set(&mut self, symbol: u8, on: bool) -> Result<(), io::Error> {
        self.transitions.push((symbol, on));
        Ok(())
    }
}
