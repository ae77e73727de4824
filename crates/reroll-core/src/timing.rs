//! Fixed delays used by the reroll cycle.
//!
//! Hold durations are how long the line stays idle after an input is sent;
//! the system menu animations need that much time to settle before the next
//! press registers.

/// Delays for the read-and-check part of the cycle.
pub mod cycle {
    use std::time::Duration;

    /// Pause before each identifier read while waiting for a candidate.
    pub const VALUE_POLL_INTERVAL: Duration = Duration::from_secs(1);

    /// Number of confirmation samples once a candidate is found.
    pub const STABILITY_SAMPLES: u32 = 3;

    /// Pause before each confirmation sample.
    pub const STABILITY_INTERVAL: Duration = Duration::from_secs(1);
}

/// Hold durations for the close/relaunch button choreography.
pub mod input {
    use std::time::Duration;

    /// B, backing out of any open menu before going home.
    pub const MENU_CANCEL_HOLD: Duration = Duration::from_millis(500);

    /// HOME, waiting for the system menu to appear.
    pub const HOME_HOLD: Duration = Duration::from_secs(2);

    /// X on the system menu, opening the close prompt.
    pub const CLOSE_SELECT_HOLD: Duration = Duration::from_secs(1);

    /// A confirming the close; the game takes a while to exit.
    pub const CLOSE_CONFIRM_HOLD: Duration = Duration::from_secs(5);

    /// A presses launching the title again.
    pub const LAUNCH_CONFIRM_HOLD: Duration = Duration::from_secs(1);

    /// D-pad Up / A pair dismissing the unusable-DLC prompt.
    pub const DLC_FALLBACK_HOLD: Duration = Duration::from_millis(600);

    /// B while skipping through the in-game naming dialogue.
    pub const DIALOGUE_ADVANCE_HOLD: Duration = Duration::from_millis(500);

    /// Neutral stick input held during teardown.
    pub const STICK_NEUTRAL_HOLD: Duration = Duration::from_millis(500);
}
