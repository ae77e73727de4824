//! The restart-and-reread cycle that rerolls the trainer id.
//!
//! One [`Reroller`] drives one console: identify the running title and
//! version, poll memory until a plausible id shows up, confirm it has
//! settled, compare it against the acceptance patterns, and close/relaunch
//! the game until a match appears or the run is cancelled. Every delay and
//! every remote call is a point where cancellation is observed.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::connection::{Button, Stick, SwitchConnection};
use crate::error::{Error, Result};
use crate::game::{GameProfile, TrainerId, decode_profile_name};
use crate::offsets::{LocationDescriptor, LocationSource};
use crate::pattern::AcceptancePattern;
use crate::shutdown::CancelToken;
use crate::timing;

/// How a completed run ended. Fatal conditions come back as errors instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// An id matching one of the acceptance patterns is on screen.
    Matched(TrainerId),
    /// The cancel signal was raised before a match was found.
    Cancelled,
}

/// Engine-side delays, split from the profile so tests can shrink them.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub post_launch: Duration,
    pub poll_interval: Duration,
    pub stability_interval: Duration,
    pub stability_samples: u32,
    pub post_detect: Duration,
}

impl Timing {
    pub fn for_profile(profile: &GameProfile) -> Self {
        Self {
            post_launch: profile.post_launch_delay,
            poll_interval: timing::cycle::VALUE_POLL_INTERVAL,
            stability_interval: timing::cycle::STABILITY_INTERVAL,
            stability_samples: timing::cycle::STABILITY_SAMPLES,
            post_detect: profile.post_detect_delay,
        }
    }
}

/// Drives one console through close/relaunch cycles until the trainer id
/// matches one of the acceptance patterns.
pub struct Reroller {
    profile: &'static GameProfile,
    patterns: Vec<AcceptancePattern>,
    timing: Timing,
    max_restarts: Option<u32>,
}

impl Reroller {
    pub fn new(profile: &'static GameProfile, patterns: Vec<AcceptancePattern>) -> Self {
        Self {
            timing: Timing::for_profile(profile),
            profile,
            patterns,
            max_restarts: None,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Bound the number of restarts; `None` keeps the historical unbounded
    /// behavior.
    pub fn with_restart_limit(mut self, limit: Option<u32>) -> Self {
        self.max_restarts = limit;
        self
    }

    /// Run to completion or cancellation.
    ///
    /// Whatever happens, the device session is torn down before this
    /// returns: held input is neutralized and the connection is closed, so
    /// nothing is left dangling on the console side.
    pub fn run<C: SwitchConnection>(&self, conn: &mut C, cancel: &CancelToken) -> Result<RunOutcome> {
        let result = self.run_cycle(conn, cancel);
        match &result {
            Ok(RunOutcome::Matched(id)) => info!("Trainer id: {id}"),
            Ok(RunOutcome::Cancelled) => info!("Cancelled before a match was found"),
            Err(e) => error!("{e}"),
        }
        info!("Ending {} reroll loop.", self.profile.name);
        self.hard_stop(conn);
        result
    }

    fn run_cycle<C: SwitchConnection>(
        &self,
        conn: &mut C,
        cancel: &CancelToken,
    ) -> Result<RunOutcome> {
        // Console logo and game load screen.
        if cancel.wait(self.timing.post_launch) {
            return Ok(RunOutcome::Cancelled);
        }

        let mut restarts = 0u32;
        loop {
            if cancel.is_cancelled() {
                return Ok(RunOutcome::Cancelled);
            }

            // Re-identify every cycle so a game update applied mid-run fails
            // fast instead of reading stale addresses.
            let title = conn.title_id()?;
            let variant = self.profile.variant_for(&title)?;
            let version = conn.game_version()?;
            let descriptor = variant.table.resolve(&version)?;
            if restarts == 0 {
                info!("Detected {} ({title}) version {version}", self.profile.name);
            }

            let Some(candidate) = self.await_candidate(conn, cancel, &descriptor)? else {
                return Ok(RunOutcome::Cancelled);
            };

            if !self.timing.post_detect.is_zero() && cancel.wait(self.timing.post_detect) {
                return Ok(RunOutcome::Cancelled);
            }

            let candidate = if self.profile.naming_flow {
                match self.settle_through_naming(conn, cancel, &descriptor, candidate)? {
                    Some(settled) => settled,
                    None => return Ok(RunOutcome::Cancelled),
                }
            } else {
                candidate
            };

            let Some(id) = self.confirm_stability(conn, cancel, &descriptor, candidate)? else {
                return Ok(RunOutcome::Cancelled);
            };

            if let Some(matched) = self.evaluate(id) {
                return Ok(RunOutcome::Matched(matched));
            }

            restarts += 1;
            if let Some(limit) = self.max_restarts
                && restarts > limit
            {
                return Err(Error::RestartLimitReached(limit));
            }
            info!("No pattern matched {id}, restarting the game (attempt {restarts})");
            self.close_game(conn)?;
            self.start_game(conn)?;
            if cancel.wait(self.timing.post_launch) {
                return Ok(RunOutcome::Cancelled);
            }
        }
    }

    /// Poll until a plausible id (and, where required, a profile name) shows
    /// up. `Ok(None)` means cancellation was observed.
    fn await_candidate<C: SwitchConnection>(
        &self,
        conn: &mut C,
        cancel: &CancelToken,
        descriptor: &LocationDescriptor,
    ) -> Result<Option<TrainerId>> {
        loop {
            if cancel.wait(self.timing.poll_interval) {
                return Ok(None);
            }
            let block = self.read_status_block(conn, descriptor)?;
            let id = TrainerId::from_status_block(&block, self.profile.id_offset)?;
            if id.is_unset() {
                debug!("Identifier not initialized yet");
                continue;
            }
            if let Some((offset, len)) = self.profile.name_field {
                match decode_profile_name(&block, offset, len) {
                    Some(name) => debug!("Profile name: {name}"),
                    None => {
                        info!("Waiting for the player to finish the naming screen");
                        continue;
                    }
                }
            }
            return Ok(Some(id));
        }
    }

    /// The id keeps mutating while the naming dialogue is open; advance it
    /// until two consecutive reads agree.
    fn settle_through_naming<C: SwitchConnection>(
        &self,
        conn: &mut C,
        cancel: &CancelToken,
        descriptor: &LocationDescriptor,
        first: TrainerId,
    ) -> Result<Option<TrainerId>> {
        info!("Advancing through the intro dialogue...");
        let mut previous = first;
        loop {
            if cancel.is_cancelled() {
                return Ok(None);
            }
            conn.click(Button::B, timing::input::DIALOGUE_ADVANCE_HOLD)?;
            let block = self.read_status_block(conn, descriptor)?;
            let current = TrainerId::from_status_block(&block, self.profile.id_offset)?;
            if current == previous {
                return Ok(Some(current));
            }
            debug!("Identifier moved from {previous} to {current} during the naming flow");
            previous = current;
        }
    }

    /// Re-sample the candidate a few times. Disagreement is logged, never
    /// fatal; the last sample is what gets evaluated.
    fn confirm_stability<C: SwitchConnection>(
        &self,
        conn: &mut C,
        cancel: &CancelToken,
        descriptor: &LocationDescriptor,
        candidate: TrainerId,
    ) -> Result<Option<TrainerId>> {
        let mut latest = candidate;
        for _ in 0..self.timing.stability_samples {
            if cancel.wait(self.timing.stability_interval) {
                return Ok(None);
            }
            let block = self.read_status_block(conn, descriptor)?;
            latest = TrainerId::from_status_block(&block, self.profile.id_offset)?;
            if latest != candidate {
                warn!("Trainer id unstable: read {latest}, expected {candidate}");
            }
        }
        Ok(Some(latest))
    }

    fn evaluate(&self, id: TrainerId) -> Option<TrainerId> {
        for pattern in &self.patterns {
            debug!("Checking {id} against pattern {pattern}");
            if pattern.matches(id) {
                info!("{id} matches pattern {pattern}");
                return Some(id);
            }
        }
        None
    }

    fn read_status_block<C: SwitchConnection>(
        &self,
        conn: &mut C,
        descriptor: &LocationDescriptor,
    ) -> Result<Vec<u8>> {
        let address = match descriptor.source {
            LocationSource::Absolute(address) => address,
            LocationSource::Chain(chain) => conn.resolve_pointer(chain)?,
        };
        let block = conn.read_bytes(address, descriptor.len)?;
        if block.len() < descriptor.len {
            return Err(Error::ShortRead {
                expected: descriptor.len,
                actual: block.len(),
            });
        }
        Ok(block)
    }

    /// Back out to the system menu and close the running title.
    fn close_game<C: SwitchConnection>(&self, conn: &mut C) -> Result<()> {
        conn.click(Button::B, timing::input::MENU_CANCEL_HOLD)?;
        conn.click(Button::Home, timing::input::HOME_HOLD)?;
        conn.click(Button::X, timing::input::CLOSE_SELECT_HOLD)?;
        conn.click(Button::A, timing::input::CLOSE_CONFIRM_HOLD)?;
        info!("Closed out of the game");
        Ok(())
    }

    /// Relaunch from the system menu. The Up+A pair dismisses the prompt
    /// shown when installed DLC cannot be used; on the loading screen it is
    /// harmless.
    fn start_game<C: SwitchConnection>(&self, conn: &mut C) -> Result<()> {
        conn.click(Button::A, timing::input::LAUNCH_CONFIRM_HOLD)?;
        conn.click(Button::A, timing::input::LAUNCH_CONFIRM_HOLD)?;
        conn.click(Button::DUp, timing::input::DLC_FALLBACK_HOLD)?;
        conn.click(Button::A, timing::input::DLC_FALLBACK_HOLD)?;
        info!("Restarting the game");
        Ok(())
    }

    /// Neutralize held input and drop the device session. Failures here are
    /// logged only; teardown runs on every exit path.
    fn hard_stop<C: SwitchConnection>(&self, conn: &mut C) {
        if let Err(e) = conn.set_stick(Stick::Left, 0, 0, timing::input::STICK_NEUTRAL_HOLD) {
            warn!("Failed to neutralize stick input: {e}");
        }
        if let Err(e) = conn.disconnect() {
            warn!("Failed to close the device session: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::mock::MockConnection;
    use crate::game::{Game, tables};
    use crate::pattern::parse_patterns;
    use std::sync::Arc;
    use std::thread;

    fn fast_timing() -> Timing {
        Timing {
            post_launch: Duration::from_millis(1),
            poll_interval: Duration::from_millis(1),
            stability_interval: Duration::from_millis(1),
            stability_samples: 3,
            post_detect: Duration::ZERO,
        }
    }

    fn bdsp_reroller(patterns: &[&str]) -> Reroller {
        Reroller::new(Game::Bdsp.profile(), parse_patterns(patterns).unwrap())
            .with_timing(fast_timing())
    }

    /// Two little-endian id halves, as BDSP stores them.
    fn id_block(id32: u32) -> Vec<u8> {
        let tid = (id32 & 0xFFFF) as u16;
        let sid = (id32 >> 16) as u16;
        let mut block = tid.to_le_bytes().to_vec();
        block.extend_from_slice(&sid.to_le_bytes());
        block
    }

    fn swsh_block(id32: u32, name: &str) -> Vec<u8> {
        let mut block = vec![0u8; tables::swsh::BLOCK_LEN];
        block[tables::swsh::ID_OFFSET..tables::swsh::ID_OFFSET + 4]
            .copy_from_slice(&id_block(id32));
        for (i, unit) in name.encode_utf16().enumerate() {
            let at = tables::swsh::NAME_OFFSET + i * 2;
            block[at..at + 2].copy_from_slice(&unit.to_le_bytes());
        }
        block
    }

    #[test]
    fn test_matching_id_completes_without_restart() {
        let mut conn = MockConnection::new(tables::bdsp::DIAMOND_ID, "1.3.0");
        conn.push_read(id_block(812_345));

        let outcome = bdsp_reroller(&["8xxxxx", "0xxxxx"])
            .run(&mut conn, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome, RunOutcome::Matched(TrainerId::from_id32(812_345)));
        assert_eq!(conn.presses_of(Button::Home), 0);
        assert!(conn.disconnected);
        assert_eq!(conn.sticks, vec![(Stick::Left, 0, 0)]);
    }

    #[test]
    fn test_rejected_id_restarts_exactly_once_then_matches() {
        let mut conn = MockConnection::new(tables::bdsp::DIAMOND_ID, "1.3.0");
        // First cycle: candidate plus three stability samples.
        for _ in 0..4 {
            conn.push_read(id_block(512_345));
        }
        // Second cycle, after the restart.
        conn.push_read(id_block(812_345));

        let outcome = bdsp_reroller(&["8xxxxx", "0xxxxx"])
            .run(&mut conn, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome, RunOutcome::Matched(TrainerId::from_id32(812_345)));
        // Close presses HOME once per restart.
        assert_eq!(conn.presses_of(Button::Home), 1);
        assert_eq!(conn.presses_of(Button::X), 1);
        assert_eq!(conn.presses_of(Button::DUp), 1);
    }

    #[test]
    fn test_zero_id_is_never_a_candidate() {
        let mut conn = MockConnection::new(tables::bdsp::DIAMOND_ID, "1.3.0");
        // 000000 would match "0xxxxx" if it were ever evaluated.
        for _ in 0..3 {
            conn.push_read(id_block(0));
        }
        conn.push_read(id_block(812_345));

        let outcome = bdsp_reroller(&["0xxxxx", "8xxxxx"])
            .run(&mut conn, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome, RunOutcome::Matched(TrainerId::from_id32(812_345)));
        assert_eq!(conn.presses_of(Button::Home), 0);
    }

    #[test]
    fn test_cancellation_during_await_tears_down() {
        let mut conn = MockConnection::new(tables::bdsp::DIAMOND_ID, "1.3.0");
        conn.push_read(id_block(0)); // never becomes valid

        let cancel = Arc::new(CancelToken::new());
        let raiser = Arc::clone(&cancel);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            raiser.raise();
        });

        let timing = Timing {
            poll_interval: Duration::from_millis(5),
            ..fast_timing()
        };
        let outcome = Reroller::new(Game::Bdsp.profile(), parse_patterns(&["8xxxxx"]).unwrap())
            .with_timing(timing)
            .run(&mut conn, &cancel)
            .unwrap();
        handle.join().unwrap();

        assert_eq!(outcome, RunOutcome::Cancelled);
        // Never got past AWAIT_VALID_VALUE: no restart input was sent.
        assert!(conn.clicks.is_empty());
        // Teardown still ran.
        assert!(conn.disconnected);
        assert_eq!(conn.sticks, vec![(Stick::Left, 0, 0)]);
    }

    #[test]
    fn test_unsupported_version_fails_without_restarting() {
        let mut conn = MockConnection::new(tables::bdsp::DIAMOND_ID, "9.9.9");
        conn.push_read(id_block(812_345));

        let err = bdsp_reroller(&["8xxxxx"])
            .run(&mut conn, &CancelToken::new())
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedVersion(v) if v == "9.9.9"));
        assert!(conn.clicks.is_empty());
        assert!(conn.disconnected);
    }

    #[test]
    fn test_unsupported_title_fails() {
        let mut conn = MockConnection::new("0123456789ABCDEF", "1.3.0");

        let err = bdsp_reroller(&["8xxxxx"])
            .run(&mut conn, &CancelToken::new())
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedTitle { game: "BDSP", .. }));
        assert!(conn.disconnected);
    }

    #[test]
    fn test_restart_limit_fails_the_run() {
        let mut conn = MockConnection::new(tables::bdsp::DIAMOND_ID, "1.3.0");
        conn.push_read(id_block(512_345)); // never matches

        let err = bdsp_reroller(&["8xxxxx"])
            .with_restart_limit(Some(2))
            .run(&mut conn, &CancelToken::new())
            .unwrap_err();

        assert!(matches!(err, Error::RestartLimitReached(2)));
        // Two full restarts ran before the limit tripped.
        assert_eq!(conn.presses_of(Button::Home), 2);
    }

    #[test]
    fn test_instability_is_advisory_and_last_sample_wins() {
        let mut conn = MockConnection::new(tables::bdsp::DIAMOND_ID, "1.3.0");
        conn.push_read(id_block(512_345)); // candidate
        conn.push_read(id_block(812_345)); // stability samples disagree
        // remaining samples repeat 812345

        let outcome = bdsp_reroller(&["8xxxxx"])
            .run(&mut conn, &CancelToken::new())
            .unwrap();

        // The disagreeing value is still evaluated and matches.
        assert_eq!(outcome, RunOutcome::Matched(TrainerId::from_id32(812_345)));
        assert_eq!(conn.presses_of(Button::Home), 0);
    }

    #[test]
    fn test_pointer_chain_is_resolved_per_read() {
        let mut conn = MockConnection::new(tables::bdsp::DIAMOND_ID, "1.3.0");
        conn.push_read(id_block(812_345));

        bdsp_reroller(&["8xxxxx"])
            .run(&mut conn, &CancelToken::new())
            .unwrap();

        // One resolution for the candidate read, one per stability sample.
        assert_eq!(conn.pointer_resolutions, 4);
    }

    #[test]
    fn test_naming_flow_waits_for_name_then_settles() {
        let mut conn = MockConnection::new(tables::swsh::SWORD_ID, "1.3.2");
        // Id present but the name is still empty: keep polling.
        conn.push_read(swsh_block(812_345, ""));
        // Name entered; the candidate is picked up.
        conn.push_read(swsh_block(812_345, "Ash"));
        // Naming flow reads agree immediately afterwards.

        let outcome = Reroller::new(Game::Swsh.profile(), parse_patterns(&["8xxxxx"]).unwrap())
            .with_timing(fast_timing())
            .run(&mut conn, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome, RunOutcome::Matched(TrainerId::from_id32(812_345)));
        // At least one dialogue-advance press happened.
        assert!(conn.presses_of(Button::B) >= 1);
        assert_eq!(conn.presses_of(Button::Home), 0);
    }

    #[test]
    fn test_naming_flow_follows_a_moving_id() {
        let mut conn = MockConnection::new(tables::swsh::SWORD_ID, "1.3.2");
        conn.push_read(swsh_block(111_111, "Ash")); // candidate
        conn.push_read(swsh_block(222_222, "Ash")); // moves during naming
        conn.push_read(swsh_block(812_345, "Ash")); // moves again
        // settles at 812345 from here on

        let outcome = Reroller::new(Game::Swsh.profile(), parse_patterns(&["8xxxxx"]).unwrap())
            .with_timing(fast_timing())
            .run(&mut conn, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome, RunOutcome::Matched(TrainerId::from_id32(812_345)));
        // One press per read in the sub-loop: 222222, 812345, 812345 again.
        assert_eq!(conn.presses_of(Button::B), 3);
    }
}
