use std::env;
use std::error::Error;
use std::io::ErrorKind;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use simon::channel::TcpLineChannel;
use simon::display::{Display, TermDisplay};
use simon::engine::Engine;
use simon::input::TermInput;
use simon::lamps::TermLamps;
use simon::pause::PauseFlag;
use simon::sound::Mute;
use simon::timer::SpinTicker;

const DEFAULT_ADDR: &str = "0.0.0.0:3232";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let addr = env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDR.to_string());

    // narrate the connection wait before anything else comes up
    let mut display = TermDisplay::new()?;
    display.print(0, "Waiting for")?;
    display.print(1, "connection...")?;
    let mut channel = TcpLineChannel::accept(&addr)?;
    display.clear()?;
    display.print(0, "Connected")?;
    spin_sleep::sleep(Duration::from_secs(2));

    let pause = PauseFlag::new();
    let mut input = TermInput::new(pause.clone())?;
    let mut lamps = TermLamps::new()?;
    // swap in SimpleBeep for an audible buzzer on consoles that allow it
    let mut sound = Mute::new();
    let mut ticker = SpinTicker;
    let rng = StdRng::from_entropy();

    let mut engine = Engine::new(
        &mut input,
        &mut lamps,
        &mut sound,
        &mut display,
        &mut channel,
        &mut ticker,
        pause,
        rng,
    );
    match engine.run() {
        // Esc / Ctrl-C land here via the input layer
        Err(e) if e.kind() == ErrorKind::Interrupted => Ok(()),
        other => other.map_err(Into::into),
    }
}
