//! TCP client for the sys-botbase remote control protocol.
//!
//! sys-botbase speaks a line-oriented text protocol: commands are CRLF
//! terminated, and query commands answer with a single LF-terminated line of
//! hex characters. Input commands produce no reply.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use tracing::trace;

use super::SwitchConnection;
use super::input::{Button, Stick};
use crate::error::{Error, Result};

const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection to a console running the sys-botbase sysmodule.
pub struct BotbaseConnection {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl BotbaseConnection {
    /// Connect to a console (sys-botbase listens on port 6000).
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(Some(READ_TIMEOUT))?;
        stream.set_nodelay(true)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self { stream, reader })
    }

    /// Version of the sys-botbase module itself (not of the game).
    pub fn server_version(&mut self) -> Result<String> {
        self.query("getVersion")
    }

    fn send(&mut self, command: &str) -> Result<()> {
        trace!("-> {command}");
        self.stream.write_all(command.as_bytes())?;
        self.stream.write_all(b"\r\n")?;
        self.stream.flush()?;
        Ok(())
    }

    fn query(&mut self, command: &str) -> Result<String> {
        self.send(command)?;
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            return Err(Error::Protocol {
                command: command.to_string(),
                message: "connection closed".to_string(),
            });
        }
        let reply = line.trim_end_matches(['\r', '\n', '\0']);
        trace!("<- {reply}");
        Ok(reply.to_string())
    }
}

impl SwitchConnection for BotbaseConnection {
    fn title_id(&mut self) -> Result<String> {
        self.query("getTitleID")
    }

    fn game_version(&mut self) -> Result<String> {
        self.query("game version")
    }

    fn resolve_pointer(&mut self, chain: &[i64]) -> Result<u64> {
        let command = pointer_command(chain);
        let reply = self.query(&command)?;
        parse_address(&command, &reply)
    }

    fn read_bytes(&mut self, address: u64, len: usize) -> Result<Vec<u8>> {
        let command = peek_command(address, len);
        let reply = self.query(&command)?;
        decode_reply(&command, &reply)
    }

    fn click(&mut self, button: Button, hold: Duration) -> Result<()> {
        self.send(&format!("click {button}"))?;
        thread::sleep(hold);
        Ok(())
    }

    fn set_stick(&mut self, stick: Stick, x: i16, y: i16, hold: Duration) -> Result<()> {
        let command = format!(
            "setStick {stick} {} {}",
            format_signed(x as i64),
            format_signed(y as i64)
        );
        self.send(&command)?;
        thread::sleep(hold);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.send("detachController")?;
        self.stream.shutdown(Shutdown::Both)?;
        Ok(())
    }
}

fn peek_command(address: u64, len: usize) -> String {
    format!("peekAbsolute {address:#x} {len}")
}

fn pointer_command(chain: &[i64]) -> String {
    let mut command = String::from("pointerAll");
    for offset in chain {
        command.push(' ');
        command.push_str(&format_signed(*offset));
    }
    command
}

/// Hex with a sign rather than a two's-complement bit pattern; the remote
/// side parses offsets as signed values.
fn format_signed(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{value:#x}")
    }
}

fn parse_address(command: &str, reply: &str) -> Result<u64> {
    let digits = reply.trim().trim_start_matches("0x");
    u64::from_str_radix(digits, 16).map_err(|e| Error::Protocol {
        command: command.to_string(),
        message: format!("expected a hex address, got '{reply}': {e}"),
    })
}

fn decode_reply(command: &str, reply: &str) -> Result<Vec<u8>> {
    hex::decode(reply.trim()).map_err(|e| Error::Protocol {
        command: command.to_string(),
        message: format!("expected hex bytes, got '{reply}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_command() {
        assert_eq!(
            peek_command(0x4529_1DF0, 0x110),
            "peekAbsolute 0x45291df0 272"
        );
    }

    #[test]
    fn test_pointer_command() {
        assert_eq!(
            pointer_command(&[0x4C1_DCF8, 0xB8, 0x10, 0xE8]),
            "pointerAll 0x4c1dcf8 0xb8 0x10 0xe8"
        );
    }

    #[test]
    fn test_pointer_command_negative_offset() {
        assert_eq!(pointer_command(&[0x1000, -0x20]), "pointerAll 0x1000 -0x20");
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("pointerAll", "00000041DEADBEEF").unwrap(), 0x41DE_ADBE_EF);
        assert_eq!(parse_address("pointerAll", "0x10\n").unwrap(), 0x10);
        assert!(parse_address("pointerAll", "not-hex").is_err());
    }

    #[test]
    fn test_decode_reply() {
        assert_eq!(decode_reply("peekAbsolute", "39300D00").unwrap(), vec![
            0x39, 0x30, 0x0D, 0x00
        ]);
        assert!(decode_reply("peekAbsolute", "393").is_err());
    }
}
