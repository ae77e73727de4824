//! Wildcard acceptance patterns for trainer ids.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::game::TrainerId;

/// A six-character template of literal digits and `x` wildcards.
///
/// `8xxxxx` accepts any id starting with 8; `000001` accepts exactly one id.
/// Matching is pure and position-by-position against the zero-padded
/// rendering of the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptancePattern {
    // None = wildcard at that position.
    cells: [Option<u8>; TrainerId::DIGITS as usize],
}

impl AcceptancePattern {
    pub fn matches(&self, id: TrainerId) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(position, cell)| match cell {
                None => true,
                Some(digit) => *digit == id.digit(position as u32),
            })
    }
}

impl FromStr for AcceptancePattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let expected = TrainerId::DIGITS as usize;
        if s.chars().count() != expected {
            return Err(Error::InvalidPattern {
                pattern: s.to_string(),
                message: format!("expected {expected} characters"),
            });
        }
        let mut cells = [None; TrainerId::DIGITS as usize];
        for (i, c) in s.chars().enumerate() {
            cells[i] = match c {
                'x' | 'X' => None,
                '0'..='9' => Some(c as u8 - b'0'),
                other => {
                    return Err(Error::InvalidPattern {
                        pattern: s.to_string(),
                        message: format!("invalid character '{other}'"),
                    });
                }
            };
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for AcceptancePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell {
                None => write!(f, "x")?,
                Some(digit) => write!(f, "{digit}")?,
            }
        }
        Ok(())
    }
}

/// Parse an ordered pattern list, rejecting the whole list on the first bad
/// entry.
pub fn parse_patterns<S: AsRef<str>>(raw: &[S]) -> Result<Vec<AcceptancePattern>, Error> {
    raw.iter().map(|s| s.as_ref().parse()).collect()
}
