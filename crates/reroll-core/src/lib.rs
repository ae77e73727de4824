//! # reroll-core
//!
//! Core library for the trainer-id reroll bot.
//!
//! This crate provides:
//! - Per-game version/offset tables and title validation
//! - The reroll engine: poll for a candidate id, confirm it has settled,
//!   match it against wildcard digit patterns, close and relaunch the game
//!   until a match appears
//! - A [`SwitchConnection`] trait with a TCP sys-botbase implementation
//! - Cooperative cancellation usable from Ctrl-C handlers
//!
//! The engine is generic over the connection, so it can be driven against a
//! scripted device in tests; see `connection::mock`.

pub mod config;
pub mod connection;
pub mod error;
pub mod game;
pub mod offsets;
pub mod pattern;
pub mod reroll;
pub mod shutdown;
pub mod timing;

pub use config::RunConfig;
pub use connection::{BotbaseConnection, Button, Stick, SwitchConnection};
pub use error::{Error, Result};
pub use game::{Game, GameProfile, TitleVariant, TrainerId};
pub use offsets::{LocationDescriptor, LocationSource, VersionOffsetTable};
pub use pattern::{AcceptancePattern, parse_patterns};
pub use reroll::{Reroller, RunOutcome, Timing};
pub use shutdown::CancelToken;
