use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use std::io;

/// the two-line character display the game narrates on. implementations
/// accept clear/print-row operations and nothing fancier; the engine never
/// depends on what (if anything) gets rendered
pub trait Display {
    /// blank both rows
    fn clear(&mut self) -> Result<(), io::Error>;

    /// put `text` at the start of `row` (0 or 1), replacing the row
    fn print(&mut self, row: u8, text: &str) -> Result<(), io::Error>;
}

// geometry of the character panel we imitate (a 16x2 module)
struct Panel(usize, usize);

impl Panel {
    fn cols(&self) -> usize {
        self.0
    }

    fn rows(&self) -> usize {
        self.1
    }

    /// what actually fits on one row
    fn fit<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.cols()) {
            Some((i, _)) => &text[..i],
            None => text,
        }
    }
}

const PANEL: Panel = Panel(16, 2);

/// terminal row the panel's first line lands on, below the lamp strip
const PANEL_TOP: u16 = 3;

/// draws the panel at a fixed position with direct cursor addressing
pub struct TermDisplay {
    out: io::Stdout,
}

impl TermDisplay {
    pub fn new() -> Result<TermDisplay, io::Error> {
        let mut out = io::stdout();
        execute!(out, Clear(ClearType::All), Hide)?;
        Ok(TermDisplay { out })
    }
}

impl Drop for TermDisplay {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show);
    }
}

impl Display for TermDisplay {
    fn clear(&mut self) -> Result<(), io::Error> {
        for row in 0..PANEL.rows() as u16 {
            execute!(
                self.out,
                MoveTo(0, PANEL_TOP + row),
                Clear(ClearType::CurrentLine)
            )?;
        }
        Ok(())
    }

    fn print(&mut self, row: u8, text: &str) -> Result<(), io::Error> {
        execute!(
            self.out,
            MoveTo(0, PANEL_TOP + row as u16),
            Clear(ClearType::CurrentLine),
            Print(PANEL.fit(text))
        )?;
        Ok(())
    }
}

/// captures whatever the engine narrates, for tests
pub struct DummyDisplay {
    pub rows: [String; 2],
}

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay {
            rows: [String::new(), String::new()],
        }
    }
}

impl Display for DummyDisplay {
    fn clear(&mut self) -> Result<(), io::Error> {
        self.rows = [String::new(), String::new()];
        Ok(())
    }

    fn print(&mut self, row: u8, text: &str) -> Result<(), io::Error> {
        self.rows[row as usize] = text.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Panel tests
    #[test]
    fn test_panel_shape() {
        assert_eq!(PANEL.cols(), 16);
        assert_eq!(PANEL.rows(), 2);
    }

    #[test]
    fn test_fit_passes_short_text() {
        assert_eq!(PANEL.fit("Score: 12"), "Score: 12");
    }

    #[test]
    fn test_fit_truncates_long_text() {
        assert_eq!(PANEL.fit("this line is far too long"), "this line is far");
    }

    #[test]
    fn test_fit_is_char_aware() {
        // truncation must not split a multi-byte character
        let text = "ééééééééééééééééé";
        assert_eq!(PANEL.fit(text).chars().count(), 16);
    }

    // DummyDisplay tests
    #[test]
    fn test_dummy_captures_rows() {
        let mut d = DummyDisplay::new();
        d.print(0, "Simon").unwrap();
        d.print(1, "Score: 3").unwrap();
        assert_eq!(d.rows[0], "Simon");
        assert_eq!(d.rows[1], "Score: 3");
        d.clear().unwrap();
        assert_eq!(d.rows[0], "");
    }
}
