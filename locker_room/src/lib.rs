//! # Locker Room
//!
//! The reacting side of the team simulation. This crate sits on top of
//! `team_rules` and decides what happens after something happens to the team.
//!
//! ## Core Components
//!
//! - **coach**: Decision table, crisis override and the coach's history
//! - **clubhouse**: One team, one coach and one tuning, driven by events
//!
//! ## Event Cascade
//!
//! 1. Every affected player reacts to the event
//! 2. The coach responds to coach-relevant events, player by player
//! 3. Team chemistry and culture are recomputed from the updated roster
//!
//! Mutation only flows downward: players never reach back into the team or
//! the coach.

pub mod clubhouse;
pub mod coach;
pub mod error;

pub use clubhouse::*;
pub use coach::*;
pub use error::*;
