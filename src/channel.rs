use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream, ToSocketAddrs};

/// the command link to the single remote peer: short text lines in, the
/// score out. blocking is part of the contract; the engine only asks for
/// input at points where it has nothing else to do
pub trait Channel {
    /// block until a non-empty line arrives, and return it without the
    /// trailing newline
    fn receive_text(&mut self) -> Result<String, io::Error>;

    /// write one line to the peer
    fn send_line(&mut self, line: &str) -> Result<(), io::Error>;
}

/// line-oriented TCP rendition of the wireless link. binds, accepts exactly
/// one peer, and talks to it for the life of the process
pub struct TcpLineChannel {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl TcpLineChannel {
    pub fn accept(addr: impl ToSocketAddrs) -> Result<TcpLineChannel, io::Error> {
        let listener = TcpListener::bind(addr)?;
        log::info!("waiting for a peer on {}", listener.local_addr()?);
        let (stream, peer) = listener.accept()?;
        log::info!("peer connected from {}", peer);
        let writer = stream.try_clone()?;
        Ok(TcpLineChannel {
            reader: BufReader::new(stream),
            writer,
        })
    }
}

impl Channel for TcpLineChannel {
    fn receive_text(&mut self) -> Result<String, io::Error> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "peer disconnected",
                ));
            }
            let text = line.trim_end_matches(|c| c == '\r' || c == '\n');
            if !text.is_empty() {
                return Ok(text.to_string());
            }
        }
    }

    fn send_line(&mut self, line: &str) -> Result<(), io::Error> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}

/// scripted peer for tests: canned incoming lines, captured outgoing ones
pub struct ScriptedChannel {
    incoming: Vec<String>,
    pub sent: Vec<String>,
}

impl ScriptedChannel {
    pub fn new(incoming: &[&str]) -> Self {
        ScriptedChannel {
            incoming: incoming.iter().rev().map(|s| s.to_string()).collect(),
            sent: Vec::new(),
        }
    }
}

impl Channel for ScriptedChannel {
    fn receive_text(&mut self) -> Result<String, io::Error> {
        self.incoming.pop().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")
        })
    }

    fn send_line(&mut self, line: &str) -> Result<(), io::Error> {
        self.sent.push(line.to_string());
        Ok(())
    }
}
