use beep::beep;
use std::io;

/// drives the single on/off actuator that buzzes along with the lamps.
/// pulse lengths are the engine's business; implementations only switch
pub trait Sound {
    fn start(&mut self) -> Result<(), io::Error>;
    fn stop(&mut self) -> Result<(), io::Error>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// PC-speaker buzzer; needs console access, so not the default wiring
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Sound for SimpleBeep {
    fn start(&mut self) -> Result<(), io::Error> {
        beep(SIMPLEBEEP_PITCH).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        self.is_beeping = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), io::Error> {
        beep(0).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        self.is_beeping = false;
        Ok(())
    }
}

pub struct Mute {}
impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}
impl Sound for Mute {
    fn start(&mut self) -> Result<(), io::Error> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}

/// records every switch so tests can count cue pulses
pub struct DummySound {
    pub events: Vec<bool>,
}

impl DummySound {
    pub fn new() -> Self {
        DummySound { events: Vec::new() }
    }

    /// number of completed on/off pulses
    pub fn pulses(&self) -> usize {
        self.events
            .chunks(2)
            .filter(|c| matches!(c, [true, false]))
            .count()
    }
}

impl Sound for DummySound {
    fn start(&mut self) -> Result<(), io::Error> {
        self.events.push(true);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), io::Error> {
        self.events.push(false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_counts_pulses() {
        let mut s = DummySound::new();
        for _ in 0..3 {
            s.start().unwrap();
            s.stop().unwrap();
        }
        assert_eq!(s.pulses(), 3);
    }
}
