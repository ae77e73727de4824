use std::fmt;

use crate::error::{Error, Result};

/// The six-digit trainer id displayed in-game.
///
/// The save stores a 32-bit id split into two little-endian 16-bit halves;
/// what the player sees is that value modulo one million, zero-padded. A
/// value of exactly zero means the save has not been initialized yet and is
/// never a real candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainerId(u32);

impl TrainerId {
    pub const DIGITS: u32 = 6;
    const MODULUS: u32 = 1_000_000;

    /// Decode from the two id halves at `offset` inside a status block.
    pub fn from_status_block(block: &[u8], offset: usize) -> Result<Self> {
        let Some(raw) = block.get(offset..offset + 4) else {
            return Err(Error::ShortRead {
                expected: offset + 4,
                actual: block.len(),
            });
        };
        let tid = u16::from_le_bytes([raw[0], raw[1]]);
        let sid = u16::from_le_bytes([raw[2], raw[3]]);
        Ok(Self::from_id32((sid as u32) << 16 | tid as u32))
    }

    /// Reduce a full 32-bit id to its display value.
    pub fn from_id32(id32: u32) -> Self {
        Self(id32 % Self::MODULUS)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// True while the save still reads as all zeroes.
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Digit at `position`, most significant first (position 0 is the
    /// hundred-thousands place).
    pub fn digit(self, position: u32) -> u8 {
        debug_assert!(position < Self::DIGITS);
        ((self.0 / 10u32.pow(Self::DIGITS - 1 - position)) % 10) as u8
    }
}

impl fmt::Display for TrainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

/// Decode a UTF-16LE profile-name region; `None` until the player has
/// actually entered one.
pub fn decode_profile_name(block: &[u8], offset: usize, len: usize) -> Option<String> {
    let region = block.get(offset..offset + len)?;
    let (text, _, _) = encoding_rs::UTF_16LE.decode(region);
    let name: String = text.chars().take_while(|c| *c != '\0').collect();
    if name.is_empty() { None } else { Some(name) }
}
