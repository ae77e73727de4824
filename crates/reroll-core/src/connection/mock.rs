//! Scripted connection for engine tests.

use std::collections::VecDeque;
use std::time::Duration;

use super::input::{Button, Stick};
use super::SwitchConnection;
use crate::error::Result;

/// In-memory device: reads come from a script, inputs are recorded.
///
/// Once the scripted reads run out, the last block repeats forever, which
/// matches a device whose memory has stopped changing.
pub struct MockConnection {
    pub title: String,
    pub version: String,
    reads: VecDeque<Vec<u8>>,
    last_read: Vec<u8>,
    pub clicks: Vec<Button>,
    pub sticks: Vec<(Stick, i16, i16)>,
    pub pointer_resolutions: u32,
    pub disconnected: bool,
}

impl MockConnection {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            reads: VecDeque::new(),
            last_read: Vec::new(),
            clicks: Vec::new(),
            sticks: Vec::new(),
            pointer_resolutions: 0,
            disconnected: false,
        }
    }

    /// Queue the next block `read_bytes` returns.
    pub fn push_read(&mut self, block: Vec<u8>) {
        self.reads.push_back(block);
    }

    /// Count of presses of one particular button.
    pub fn presses_of(&self, button: Button) -> usize {
        self.clicks.iter().filter(|b| **b == button).count()
    }
}

impl SwitchConnection for MockConnection {
    fn title_id(&mut self) -> Result<String> {
        Ok(self.title.clone())
    }

    fn game_version(&mut self) -> Result<String> {
        Ok(self.version.clone())
    }

    fn resolve_pointer(&mut self, _chain: &[i64]) -> Result<u64> {
        self.pointer_resolutions += 1;
        Ok(0xDEAD_0000)
    }

    fn read_bytes(&mut self, _address: u64, len: usize) -> Result<Vec<u8>> {
        if let Some(block) = self.reads.pop_front() {
            self.last_read = block;
        }
        let mut block = self.last_read.clone();
        block.truncate(len);
        Ok(block)
    }

    fn click(&mut self, button: Button, _hold: Duration) -> Result<()> {
        self.clicks.push(button);
        Ok(())
    }

    fn set_stick(&mut self, stick: Stick, x: i16, y: i16, _hold: Duration) -> Result<()> {
        self.sticks.push((stick, x, y));
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.disconnected = true;
        Ok(())
    }
}
