//! # Team Rules
//!
//! The state model of the team simulation: players with focus and morale
//! meters, personality traits that scale how those meters move, team events,
//! disciplinary actions and the team aggregate. Every tunable number lives in
//! [`Tuning`].
//!
//! This crate only describes how state evolves. Deciding *which* action a
//! coach takes lives in `locker_room`.

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod team;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use team::*;
